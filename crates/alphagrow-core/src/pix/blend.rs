//! Image compositing
//!
//! Porter-Duff "source over" compositing of a 32 bpp image onto another
//! at an arbitrary offset, with layer opacity and an optional 8 bpp mask.
//!
//! Colors are straight (not premultiplied). Two exactness guarantees
//! hold:
//!
//! - a fully opaque source pixel replaces the destination pixel exactly
//! - a fully transparent source pixel leaves the destination untouched

use super::{Pix, PixMut, PixelDepth};
use crate::color;
use crate::error::{Error, Result};

/// Composite one straight-alpha pixel over another.
///
/// `src_alpha` is the effective source coverage after opacity and mask
/// have been applied.
#[inline]
fn over(src: u32, src_alpha: u32, dst: u32) -> u32 {
    if src_alpha == 0 {
        return dst;
    }
    let (sr, sg, sb) = color::extract_rgb(src);
    let (dr, dg, db, da) = color::extract_rgba(dst);
    let da = da as u32;

    if src_alpha == 255 {
        return color::compose_rgb(sr, sg, sb);
    }

    let out_a255 = src_alpha * 255 + da * (255 - src_alpha);
    let half = out_a255 / 2;
    let channel = |c: u8, d: u8| -> u8 {
        ((c as u32 * src_alpha * 255 + d as u32 * da * (255 - src_alpha) + half) / out_a255) as u8
    };
    color::compose_rgba(
        channel(sr, dr),
        channel(sg, dg),
        channel(sb, db),
        ((out_a255 + 127) / 255) as u8,
    )
}

impl PixMut {
    /// Composite `src` over this image with its top-left corner at
    /// `(x, y)`.
    ///
    /// Parts of `src` falling outside this image are clipped.
    ///
    /// # Arguments
    ///
    /// * `src` - 32 bpp source; an RGB source (spp 3) is fully opaque
    /// * `x`, `y` - Placement of the source origin in this image
    /// * `opacity` - Layer opacity in `[0.0, 1.0]`
    /// * `mask` - Optional 8 bpp mask, same size as `src`, scaling source alpha
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] if either image is not 32 bpp or
    /// the mask is not 8 bpp, and [`Error::DimensionMismatch`] if the mask
    /// does not match the source size.
    pub fn composite(
        &mut self,
        src: &Pix,
        x: i32,
        y: i32,
        opacity: f32,
        mask: Option<&Pix>,
    ) -> Result<()> {
        if self.depth() != PixelDepth::Bit32 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        if src.depth() != PixelDepth::Bit32 {
            return Err(Error::UnsupportedDepth(src.depth().bits()));
        }
        if let Some(m) = mask {
            if m.depth() != PixelDepth::Bit8 {
                return Err(Error::UnsupportedDepth(m.depth().bits()));
            }
            if m.width() != src.width() || m.height() != src.height() {
                return Err(Error::DimensionMismatch {
                    expected: (src.width(), src.height()),
                    actual: (m.width(), m.height()),
                });
            }
        }

        let opacity = opacity.clamp(0.0, 1.0);
        let src_has_alpha = src.has_alpha();
        let dst_has_alpha = self.spp() == 4;

        let Some((sx0, sy0, dx0, dy0, w, h)) =
            overlap(src.width(), src.height(), x, y, self.width(), self.height())
        else {
            return Ok(());
        };

        for j in 0..h {
            for i in 0..w {
                let (sx, sy) = (sx0 + i, sy0 + j);
                let (dx, dy) = (dx0 + i, dy0 + j);
                let s = src.get_pixel_unchecked(sx, sy);

                let mut a = if src_has_alpha { color::alpha(s) as u32 } else { 255 };
                if let Some(m) = mask {
                    a = (a * m.get_pixel_unchecked(sx, sy) + 127) / 255;
                }
                if opacity < 1.0 {
                    a = (a as f32 * opacity + 0.5) as u32;
                }

                let d = self.get_pixel_unchecked(dx, dy);
                let mut out = over(s, a, d);
                if !dst_has_alpha {
                    out = color::with_alpha(out, 255);
                }
                self.set_pixel_unchecked(dx, dy, out);
            }
        }

        Ok(())
    }
}

/// Compute the overlap of a `sw`x`sh` source placed at `(x, y)` with a
/// `dw`x`dh` destination.
///
/// Returns `(src_x, src_y, dst_x, dst_y, width, height)` or `None` when
/// the two do not intersect.
pub(crate) fn overlap(
    sw: u32,
    sh: u32,
    x: i32,
    y: i32,
    dw: u32,
    dh: u32,
) -> Option<(u32, u32, u32, u32, u32, u32)> {
    let left = (x as i64).max(0);
    let top = (y as i64).max(0);
    let right = (x as i64 + sw as i64).min(dw as i64);
    let bottom = (y as i64 + sh as i64).min(dh as i64);
    if right <= left || bottom <= top {
        return None;
    }
    Some((
        (left - x as i64) as u32,
        (top - y as i64) as u32,
        left as u32,
        top as u32,
        (right - left) as u32,
        (bottom - top) as u32,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas(val: u32) -> PixMut {
        Pix::new_filled(4, 4, PixelDepth::Bit32, val).unwrap().to_mut()
    }

    fn dot(val: u32) -> Pix {
        Pix::new_filled(1, 1, PixelDepth::Bit32, val).unwrap()
    }

    #[test]
    fn test_opaque_source_replaces_exactly() {
        let mut dst = canvas(color::compose_rgba(200, 100, 50, 30));
        let src = dot(color::compose_rgba(1, 2, 3, 255));
        dst.composite(&src, 2, 1, 1.0, None).unwrap();
        assert_eq!(dst.get_pixel(2, 1), Some(color::compose_rgba(1, 2, 3, 255)));
        assert_eq!(dst.get_pixel(0, 0), Some(color::compose_rgba(200, 100, 50, 30)));
    }

    #[test]
    fn test_transparent_source_is_noop() {
        let before = color::compose_rgba(200, 100, 50, 30);
        let mut dst = canvas(before);
        let src = dot(color::compose_rgba(9, 9, 9, 0));
        dst.composite(&src, 0, 0, 1.0, None).unwrap();
        assert_eq!(dst.get_pixel(0, 0), Some(before));
    }

    #[test]
    fn test_half_over_transparent_keeps_color() {
        let mut dst = canvas(0);
        let src = dot(color::compose_rgba(100, 150, 200, 128));
        dst.composite(&src, 0, 0, 1.0, None).unwrap();
        assert_eq!(dst.get_pixel(0, 0), Some(color::compose_rgba(100, 150, 200, 128)));
    }

    #[test]
    fn test_half_over_opaque_mixes() {
        let mut dst = canvas(color::compose_rgb(0, 0, 0));
        let src = dot(color::compose_rgba(255, 255, 255, 128));
        dst.composite(&src, 0, 0, 1.0, None).unwrap();
        let (r, g, b, a) = color::extract_rgba(dst.get_pixel(0, 0).unwrap());
        assert_eq!(a, 255);
        assert!((r as i32 - 128).abs() <= 1, "got {r}");
        assert_eq!((r, g), (g, b));
    }

    #[test]
    fn test_opacity_and_mask() {
        let mut dst = canvas(color::compose_rgb(0, 0, 0));
        let src = dot(color::compose_rgb(255, 255, 255));
        dst.composite(&src, 0, 0, 0.0, None).unwrap();
        assert_eq!(dst.get_pixel(0, 0), Some(color::compose_rgb(0, 0, 0)));

        let mask = Pix::new(1, 1, PixelDepth::Bit8).unwrap();
        dst.composite(&src, 1, 0, 1.0, Some(&mask)).unwrap();
        assert_eq!(dst.get_pixel(1, 0), Some(color::compose_rgb(0, 0, 0)));

        let wrong = Pix::new(2, 1, PixelDepth::Bit8).unwrap();
        assert!(dst.composite(&src, 0, 0, 1.0, Some(&wrong)).is_err());
    }

    #[test]
    fn test_clipping() {
        let mut dst = canvas(0);
        let src = Pix::new_filled(3, 3, PixelDepth::Bit32, color::compose_rgb(5, 5, 5)).unwrap();
        dst.composite(&src, -2, 3, 1.0, None).unwrap();
        assert_eq!(dst.get_pixel(0, 3), Some(color::compose_rgb(5, 5, 5)));
        assert_eq!(dst.get_pixel(1, 3), Some(0));
        assert_eq!(dst.get_pixel(0, 2), Some(0));

        dst.composite(&src, 10, 10, 1.0, None).unwrap();
    }

    #[test]
    fn test_overlap() {
        assert_eq!(overlap(3, 3, -1, -1, 4, 4), Some((1, 1, 0, 0, 2, 2)));
        assert_eq!(overlap(3, 3, 3, 3, 4, 4), Some((0, 0, 3, 3, 1, 1)));
        assert_eq!(overlap(3, 3, 4, 0, 4, 4), None);
    }
}
