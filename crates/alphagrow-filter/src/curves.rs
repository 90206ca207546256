//! Spline tone curves
//!
//! A [`ToneCurve`] is a monotonic remapping of 8-bit values defined by a
//! handful of control points and interpolated between them with cubic
//! Bezier segments, the way interactive "curves" tools do it:
//!
//! - Each segment between two control points gets two inner control
//!   heights, derived from the slopes through the neighbouring points.
//! - A segment at either end of the curve has only one neighbour; its
//!   free inner control sits half-way towards the constrained one.
//! - Inputs below the first / above the last control point are held at
//!   that point's output.
//!
//! The curve is evaluated into a 256-entry [`TrcLut`] and applied with
//! [`trc_map`].

use crate::{FilterError, FilterResult};
use alphagrow_core::{Pix, PixMut, PixelDepth, color};

/// A 256-entry lookup table for tone reproduction curve mapping.
///
/// Maps input pixel values [0..255] to output pixel values [0..255].
pub type TrcLut = [u8; 256];

/// Number of samples in the evaluated curve.
const N_SAMPLES: usize = 256;

/// Control points used to soften a hard alpha mask back towards an
/// antialiased falloff: shadows and midtones are brightened.
const ALPHA_SOFTENING_POINTS: [(u8, u8); 3] = [(0, 0), (96, 160), (255, 255)];

/// A spline tone curve over the 8-bit domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToneCurve {
    points: Vec<(u8, u8)>,
}

impl ToneCurve {
    /// Create a curve from `(input, output)` control points.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidParameters`] if fewer than two points
    /// are given or the inputs are not strictly increasing.
    pub fn new(points: &[(u8, u8)]) -> FilterResult<Self> {
        if points.len() < 2 {
            return Err(FilterError::InvalidParameters(format!(
                "tone curve needs at least 2 points, got {}",
                points.len()
            )));
        }
        if let Some(w) = points.windows(2).find(|w| w[0].0 >= w[1].0) {
            return Err(FilterError::InvalidParameters(format!(
                "control point inputs must increase: {} then {}",
                w[0].0, w[1].0
            )));
        }
        Ok(Self {
            points: points.to_vec(),
        })
    }

    /// The fixed curve `(0,0), (96,160), (255,255)` applied to restored
    /// alpha masks.
    pub fn alpha_softening() -> Self {
        Self {
            points: ALPHA_SOFTENING_POINTS.to_vec(),
        }
    }

    /// The identity curve.
    pub fn identity() -> Self {
        Self {
            points: vec![(0, 0), (255, 255)],
        }
    }

    /// Get the control points.
    pub fn points(&self) -> &[(u8, u8)] {
        &self.points
    }

    /// Evaluate the curve at 256 evenly spaced inputs, normalized to
    /// `[0.0, 1.0]`.
    pub fn samples(&self) -> [f64; N_SAMPLES] {
        let mut samples = [0.0f64; N_SAMPLES];
        let norm = |v: u8| v as f64 / 255.0;

        let (first_x, first_y) = self.points[0];
        let (last_x, last_y) = self.points[self.points.len() - 1];
        for s in &mut samples[..=first_x as usize] {
            *s = norm(first_y);
        }
        for s in &mut samples[last_x as usize..] {
            *s = norm(last_y);
        }

        let last = self.points.len() - 1;
        for i in 0..last {
            let p1 = i.saturating_sub(1);
            let p4 = (i + 2).min(last);
            self.plot_segment(&mut samples, p1, i, i + 1, p4);
        }
        samples
    }

    /// Fill the samples between control points `p2` and `p3`, with `p1`
    /// and `p4` the neighbours used for the tangents (equal to `p2` / `p3`
    /// at the ends of the curve).
    fn plot_segment(&self, samples: &mut [f64], p1: usize, p2: usize, p3: usize, p4: usize) {
        let pt = |i: usize| {
            let (x, y) = self.points[i];
            (x as f64 / 255.0, y as f64 / 255.0)
        };
        let (x0, y0) = pt(p2);
        let (x3, y3) = pt(p3);
        let dx = x3 - x0;
        let dy = y3 - y0;

        let (y1, y2) = match (p1 == p2, p3 == p4) {
            (true, true) => (y0 + dy / 3.0, y0 + dy * 2.0 / 3.0),
            (true, false) => {
                let (x4, y4) = pt(p4);
                let slope = (y4 - y0) / (x4 - x0);
                let y2 = y3 - slope * dx / 3.0;
                (y0 + (y2 - y0) / 2.0, y2)
            }
            (false, true) => {
                let (xp, yp) = pt(p1);
                let slope = (y3 - yp) / (x3 - xp);
                let y1 = y0 + slope * dx / 3.0;
                (y1, y3 + (y1 - y3) / 2.0)
            }
            (false, false) => {
                let (xp, yp) = pt(p1);
                let (x4, y4) = pt(p4);
                let y1 = y0 + (y3 - yp) / (x3 - xp) * dx / 3.0;
                let y2 = y3 - (y4 - y0) / (x4 - x0) * dx / 3.0;
                (y1, y2)
            }
        };

        let start = self.points[p2].0 as usize;
        let steps = (self.points[p3].0 - self.points[p2].0) as usize;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let u = 1.0 - t;
            let y = y0 * u * u * u + 3.0 * y1 * u * u * t + 3.0 * y2 * u * t * t + y3 * t * t * t;
            if let Some(s) = samples.get_mut(start + i) {
                *s = y.clamp(0.0, 1.0);
            }
        }
    }

    /// Evaluate the curve into a lookup table.
    pub fn lut(&self) -> TrcLut {
        let samples = self.samples();
        let mut lut = [0u8; 256];
        for (entry, s) in lut.iter_mut().zip(samples.iter()) {
            *entry = (s * 255.0 + 0.5) as u8;
        }
        lut
    }

    /// Evaluate the curve at a single input.
    pub fn eval(&self, input: u8) -> u8 {
        self.lut()[input as usize]
    }
}

/// Apply a TRC lookup table to an image in-place.
///
/// For 8 bpp images every pixel is remapped. For 32 bpp images the R, G
/// and B components are remapped and alpha is preserved.
///
/// # Errors
///
/// Returns [`FilterError::UnsupportedDepth`] for other depths.
pub fn trc_map(pix: &mut PixMut, lut: &TrcLut) -> FilterResult<()> {
    let w = pix.width();
    let h = pix.height();

    match pix.depth() {
        PixelDepth::Bit8 => {
            for y in 0..h {
                for x in 0..w {
                    let val = pix.get_pixel_unchecked(x, y) as usize;
                    pix.set_pixel_unchecked(x, y, lut[val] as u32);
                }
            }
        }
        PixelDepth::Bit32 => {
            for y in 0..h {
                for x in 0..w {
                    let (r, g, b, a) = color::extract_rgba(pix.get_pixel_unchecked(x, y));
                    let mapped = color::compose_rgba(
                        lut[r as usize],
                        lut[g as usize],
                        lut[b as usize],
                        a,
                    );
                    pix.set_pixel_unchecked(x, y, mapped);
                }
            }
        }
    }

    Ok(())
}

/// Return a copy of an 8 bpp image remapped through `curve`.
///
/// # Errors
///
/// Returns [`FilterError::UnsupportedDepth`] unless the image is 8 bpp.
pub fn apply_curve(pix: &Pix, curve: &ToneCurve) -> FilterResult<Pix> {
    if pix.depth() != PixelDepth::Bit8 {
        return Err(FilterError::UnsupportedDepth {
            expected: "8 bpp",
            actual: pix.depth().bits(),
        });
    }
    let mut pm = pix.to_mut();
    trc_map(&mut pm, &curve.lut())?;
    Ok(pm.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha_softening_fixed_points() {
        let lut = ToneCurve::alpha_softening().lut();
        assert_eq!(lut[0], 0);
        assert_eq!(lut[96], 160);
        assert_eq!(lut[255], 255);
    }

    #[test]
    fn test_alpha_softening_monotonic() {
        let lut = ToneCurve::alpha_softening().lut();
        for i in 1..256 {
            assert!(lut[i] >= lut[i - 1], "not monotonic at {}: {} < {}", i, lut[i], lut[i - 1]);
        }
    }

    #[test]
    fn test_alpha_softening_brightens() {
        let curve = ToneCurve::alpha_softening();
        for v in [16u8, 48, 96, 128, 200] {
            assert!(curve.eval(v) >= v, "curve({}) = {}", v, curve.eval(v));
        }
        assert!(curve.eval(48) > 48);
    }

    #[test]
    fn test_identity_curve() {
        let lut = ToneCurve::identity().lut();
        for (i, &val) in lut.iter().enumerate() {
            assert_eq!(val, i as u8, "identity mismatch at {}", i);
        }
    }

    #[test]
    fn test_holds_outside_control_range() {
        let curve = ToneCurve::new(&[(50, 20), (200, 230)]).unwrap();
        let lut = curve.lut();
        assert_eq!(lut[0], 20);
        assert_eq!(lut[50], 20);
        assert_eq!(lut[200], 230);
        assert_eq!(lut[255], 230);
    }

    #[test]
    fn test_invalid_points() {
        assert!(ToneCurve::new(&[(0, 0)]).is_err());
        assert!(ToneCurve::new(&[(0, 0), (0, 255)]).is_err());
        assert!(ToneCurve::new(&[(100, 0), (50, 255)]).is_err());
    }

    #[test]
    fn test_apply_curve_gray() {
        let mut pm = Pix::new(3, 1, PixelDepth::Bit8).unwrap().to_mut();
        pm.set_pixel(1, 0, 96).unwrap();
        pm.set_pixel(2, 0, 255).unwrap();
        let out = apply_curve(&pm.into(), &ToneCurve::alpha_softening()).unwrap();
        assert_eq!(out.get_pixel(0, 0), Some(0));
        assert_eq!(out.get_pixel(1, 0), Some(160));
        assert_eq!(out.get_pixel(2, 0), Some(255));

        let rgb = Pix::new(1, 1, PixelDepth::Bit32).unwrap();
        assert!(apply_curve(&rgb, &ToneCurve::identity()).is_err());
    }

    #[test]
    fn test_trc_map_rgb_keeps_alpha() {
        let mut pm = Pix::new_filled(1, 1, PixelDepth::Bit32, color::compose_rgba(96, 0, 255, 77))
            .unwrap()
            .to_mut();
        trc_map(&mut pm, &ToneCurve::alpha_softening().lut()).unwrap();
        assert_eq!(pm.get_pixel(0, 0), Some(color::compose_rgba(160, 0, 255, 77)));
    }
}
