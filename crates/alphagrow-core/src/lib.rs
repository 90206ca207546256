//! alphagrow-core - Basic raster structures for the dilation filter
//!
//! This crate provides the image container every other alphagrow crate
//! operates on:
//!
//! - [`Pix`] / [`PixMut`] - The image container (immutable / mutable)
//! - [`RgbColor`] - Floating-point color parameter
//!
//! Only two depths are stored: 8 bpp single-channel images (alpha
//! snapshots, masks) and 32 bpp RGB/RGBA images (layer content).

pub mod error;
pub mod pix;

pub use error::{Error, Result};
pub use pix::{Pix, PixMut, PixelDepth, RgbComponent};

use std::fmt;
use std::str::FromStr;

/// Color channel indices and helper functions for 32-bit RGBA pixels.
///
/// # Pixel format
///
/// 32-bit pixels are stored as `0xRRGGBBAA` (red in MSB, alpha in LSB).
pub mod color {
    /// Red channel (MSB, byte 0)
    pub const RED: usize = 0;
    /// Green channel (byte 1)
    pub const GREEN: usize = 1;
    /// Blue channel (byte 2)
    pub const BLUE: usize = 2;
    /// Alpha channel (LSB, byte 3)
    pub const ALPHA: usize = 3;

    /// Shift amounts for extracting color channels
    pub const RED_SHIFT: u32 = 24;
    pub const GREEN_SHIFT: u32 = 16;
    pub const BLUE_SHIFT: u32 = 8;
    pub const ALPHA_SHIFT: u32 = 0;

    /// Extract red component from a 32-bit pixel.
    #[inline]
    pub fn red(pixel: u32) -> u8 {
        ((pixel >> RED_SHIFT) & 0xff) as u8
    }

    /// Extract green component from a 32-bit pixel.
    #[inline]
    pub fn green(pixel: u32) -> u8 {
        ((pixel >> GREEN_SHIFT) & 0xff) as u8
    }

    /// Extract blue component from a 32-bit pixel.
    #[inline]
    pub fn blue(pixel: u32) -> u8 {
        ((pixel >> BLUE_SHIFT) & 0xff) as u8
    }

    /// Extract alpha component from a 32-bit pixel.
    #[inline]
    pub fn alpha(pixel: u32) -> u8 {
        ((pixel >> ALPHA_SHIFT) & 0xff) as u8
    }

    /// Compose a 32-bit RGB pixel (alpha = 255).
    #[inline]
    pub fn compose_rgb(r: u8, g: u8, b: u8) -> u32 {
        compose_rgba(r, g, b, 255)
    }

    /// Compose a 32-bit RGBA pixel.
    #[inline]
    pub fn compose_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
        ((r as u32) << RED_SHIFT)
            | ((g as u32) << GREEN_SHIFT)
            | ((b as u32) << BLUE_SHIFT)
            | ((a as u32) << ALPHA_SHIFT)
    }

    /// Extract RGB values from a 32-bit pixel.
    #[inline]
    pub fn extract_rgb(pixel: u32) -> (u8, u8, u8) {
        (red(pixel), green(pixel), blue(pixel))
    }

    /// Extract RGBA values from a 32-bit pixel.
    #[inline]
    pub fn extract_rgba(pixel: u32) -> (u8, u8, u8, u8) {
        (red(pixel), green(pixel), blue(pixel), alpha(pixel))
    }

    /// Replace the alpha byte of a 32-bit pixel.
    #[inline]
    pub fn with_alpha(pixel: u32, a: u8) -> u32 {
        (pixel & !0xff) | ((a as u32) << ALPHA_SHIFT)
    }
}

/// An RGB color with each component in `[0.0, 1.0]`.
///
/// This is the form in which the background color reaches the filter.
/// It converts to 8-bit components by rounding `v * 255`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RgbColor {
    r: f32,
    g: f32,
    b: f32,
}

impl RgbColor {
    /// Opaque white, the default background.
    pub const WHITE: RgbColor = RgbColor {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// Opaque black.
    pub const BLACK: RgbColor = RgbColor {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// Create a color from floating-point components.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if any component lies outside
    /// `[0.0, 1.0]` or is NaN.
    pub fn new(r: f32, g: f32, b: f32) -> Result<Self> {
        for (name, v) in [("red", r), ("green", g), ("blue", b)] {
            if !(0.0..=1.0).contains(&v) {
                return Err(Error::InvalidParameter(format!(
                    "{name} component {v} not in [0.0, 1.0]"
                )));
            }
        }
        Ok(Self { r, g, b })
    }

    /// Create a color from 8-bit components.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Get the floating-point components.
    pub fn components(&self) -> (f32, f32, f32) {
        (self.r, self.g, self.b)
    }

    /// Convert to 8-bit components.
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        let q = |v: f32| (v * 255.0 + 0.5) as u8;
        (q(self.r), q(self.g), q(self.b))
    }

    /// Convert to an opaque 32-bit pixel.
    pub fn to_pixel(&self) -> u32 {
        let (r, g, b) = self.to_rgb8();
        color::compose_rgb(r, g, b)
    }
}

impl Default for RgbColor {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = self.to_rgb8();
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

impl FromStr for RgbColor {
    type Err = Error;

    /// Parse `#rrggbb` or a comma-separated `r,g,b` float triple.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(Error::InvalidParameter(format!("bad hex color: {s}")));
            }
            let byte = |i: usize| {
                u8::from_str_radix(&hex[i..i + 2], 16)
                    .map_err(|_| Error::InvalidParameter(format!("bad hex color: {s}")))
            };
            return Ok(Self::from_rgb8(byte(0)?, byte(2)?, byte(4)?));
        }

        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(Error::InvalidParameter(format!(
                "expected '#rrggbb' or 'r,g,b', got: {s}"
            )));
        }
        let mut vals = [0.0f32; 3];
        for (slot, part) in vals.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| Error::InvalidParameter(format!("bad component: {part}")))?;
        }
        Self::new(vals[0], vals[1], vals[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_extract() {
        let p = color::compose_rgba(10, 20, 30, 40);
        assert_eq!(p, 0x0a14_1e28);
        assert_eq!(color::extract_rgba(p), (10, 20, 30, 40));
        assert_eq!(color::alpha(color::compose_rgb(1, 2, 3)), 255);
        assert_eq!(color::with_alpha(p, 7), 0x0a14_1e07);
    }

    #[test]
    fn test_rgb_color_range() {
        assert!(RgbColor::new(0.0, 0.5, 1.0).is_ok());
        assert!(RgbColor::new(1.1, 0.0, 0.0).is_err());
        assert!(RgbColor::new(0.0, -0.1, 0.0).is_err());
        assert!(RgbColor::new(0.0, 0.0, f32::NAN).is_err());
    }

    #[test]
    fn test_rgb_color_to_rgb8() {
        assert_eq!(RgbColor::WHITE.to_rgb8(), (255, 255, 255));
        assert_eq!(RgbColor::BLACK.to_rgb8(), (0, 0, 0));
        assert_eq!(RgbColor::new(0.5, 0.0, 1.0).unwrap().to_rgb8(), (128, 0, 255));
        assert_eq!(RgbColor::default(), RgbColor::WHITE);
    }

    #[test]
    fn test_rgb_color_parse() {
        let c: RgbColor = "#ff8000".parse().unwrap();
        assert_eq!(c.to_rgb8(), (255, 128, 0));
        assert_eq!(c.to_string(), "#ff8000");

        let c: RgbColor = "0, 0.5, 1".parse().unwrap();
        assert_eq!(c.to_rgb8(), (0, 128, 255));

        assert!("#ff80".parse::<RgbColor>().is_err());
        assert!("1,2".parse::<RgbColor>().is_err());
        assert!("2,0,0".parse::<RgbColor>().is_err());
    }
}
