//! Synthetic test images
//!
//! All fixtures are 32 bpp RGBA with straight alpha.

use crate::TestResult;
use alphagrow_core::{Pix, PixelDepth, color};

/// A fully transparent image with one opaque `size`x`size` square of
/// `rgb` whose top-left corner is at `(x0, y0)`.
pub fn square_on_transparent(
    width: u32,
    height: u32,
    x0: u32,
    y0: u32,
    size: u32,
    rgb: (u8, u8, u8),
) -> TestResult<Pix> {
    let mut pm = Pix::new(width, height, PixelDepth::Bit32)?.to_mut();
    let (r, g, b) = rgb;
    for y in y0..(y0 + size).min(height) {
        for x in x0..(x0 + size).min(width) {
            pm.set_rgba(x, y, r, g, b, 255)?;
        }
    }
    Ok(pm.into())
}

/// A fully transparent image with a single pixel of `rgba` at `(x, y)`.
pub fn single_pixel(
    width: u32,
    height: u32,
    x: u32,
    y: u32,
    rgba: (u8, u8, u8, u8),
) -> TestResult<Pix> {
    let mut pm = Pix::new(width, height, PixelDepth::Bit32)?.to_mut();
    let (r, g, b, a) = rgba;
    pm.set_rgba(x, y, r, g, b, a)?;
    Ok(pm.into())
}

/// A disk of `rgb` centred at `(cx, cy)` whose edge pixels get partial
/// alpha, like an antialiased sprite.
pub fn soft_disk(
    width: u32,
    height: u32,
    cx: f32,
    cy: f32,
    radius: f32,
    rgb: (u8, u8, u8),
) -> TestResult<Pix> {
    let mut pm = Pix::new(width, height, PixelDepth::Bit32)?.to_mut();
    let (r, g, b) = rgb;
    for y in 0..height {
        for x in 0..width {
            let d = ((x as f32 + 0.5 - cx).powi(2) + (y as f32 + 0.5 - cy).powi(2)).sqrt();
            let coverage = (radius + 0.5 - d).clamp(0.0, 1.0);
            let a = (coverage * 255.0 + 0.5) as u8;
            if a > 0 {
                pm.set_rgba(x, y, r, g, b, a)?;
            }
        }
    }
    Ok(pm.into())
}

/// Manhattan distance from `(x, y)` to the nearest pixel of `pix` with
/// non-zero alpha, or `None` if there is none.
pub fn manhattan_to_opaque(pix: &Pix, x: u32, y: u32) -> Option<u32> {
    let mut best: Option<u32> = None;
    for py in 0..pix.height() {
        for px in 0..pix.width() {
            if color::alpha(pix.get_pixel_unchecked(px, py)) == 0 {
                continue;
            }
            let d = px.abs_diff(x) + py.abs_diff(y);
            best = Some(best.map_or(d, |b| b.min(d)));
        }
    }
    best
}

/// Count the pixels of a 32 bpp image whose RGB equals `rgb`.
pub fn count_rgb(pix: &Pix, rgb: (u8, u8, u8)) -> u32 {
    let mut n = 0;
    for y in 0..pix.height() {
        for x in 0..pix.width() {
            if color::extract_rgb(pix.get_pixel_unchecked(x, y)) == rgb {
                n += 1;
            }
        }
    }
    n
}
