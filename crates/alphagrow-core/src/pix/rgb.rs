//! RGB component operations
//!
//! Functions for extracting and setting individual color channels of
//! 32 bpp images.

use super::{Pix, PixMut, PixelDepth};
use crate::color;
use crate::error::{Error, Result};

/// Color component selector for channel operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RgbComponent {
    /// Red channel (bits 24-31)
    Red,
    /// Green channel (bits 16-23)
    Green,
    /// Blue channel (bits 8-15)
    Blue,
    /// Alpha channel (bits 0-7)
    Alpha,
}

impl RgbComponent {
    #[inline]
    fn get(self, pixel: u32) -> u8 {
        match self {
            RgbComponent::Red => color::red(pixel),
            RgbComponent::Green => color::green(pixel),
            RgbComponent::Blue => color::blue(pixel),
            RgbComponent::Alpha => color::alpha(pixel),
        }
    }

    #[inline]
    fn put(self, pixel: u32, val: u8) -> u32 {
        let (mut r, mut g, mut b, mut a) = color::extract_rgba(pixel);
        match self {
            RgbComponent::Red => r = val,
            RgbComponent::Green => g = val,
            RgbComponent::Blue => b = val,
            RgbComponent::Alpha => a = val,
        }
        color::compose_rgba(r, g, b, a)
    }
}

impl Pix {
    /// Extract a single color component as an 8 bpp image.
    ///
    /// For an RGB image without alpha the alpha component reads as 255
    /// everywhere.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] unless the image is 32 bpp.
    pub fn get_rgb_component(&self, comp: RgbComponent) -> Result<Pix> {
        if self.depth() != PixelDepth::Bit32 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }

        let w = self.width();
        let h = self.height();
        let mut result_mut = Pix::new(w, h, PixelDepth::Bit8)?.to_mut();
        let opaque = !self.has_alpha();

        for y in 0..h {
            for x in 0..w {
                let val = if opaque && comp == RgbComponent::Alpha {
                    255
                } else {
                    comp.get(self.get_pixel_unchecked(x, y))
                };
                result_mut.set_pixel_unchecked(x, y, val as u32);
            }
        }

        Ok(result_mut.into())
    }

    /// Return a copy of this 32 bpp image whose alpha is taken from an
    /// 8 bpp `mask` of the same size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] on depth mismatch and
    /// [`Error::DimensionMismatch`] on size mismatch.
    pub fn with_alpha_from(&self, mask: &Pix) -> Result<Pix> {
        let mut out = self.to_mut();
        out.set_rgb_component(mask, RgbComponent::Alpha)?;
        Ok(out.into())
    }
}

impl PixMut {
    /// Overwrite one component of this 32 bpp image from an 8 bpp source.
    ///
    /// Setting the alpha component marks the image as RGBA.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] on depth mismatch and
    /// [`Error::DimensionMismatch`] on size mismatch.
    pub fn set_rgb_component(&mut self, src: &Pix, comp: RgbComponent) -> Result<()> {
        if self.depth() != PixelDepth::Bit32 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        if src.depth() != PixelDepth::Bit8 {
            return Err(Error::UnsupportedDepth(src.depth().bits()));
        }
        if src.width() != self.width() || src.height() != self.height() {
            return Err(Error::DimensionMismatch {
                expected: (self.width(), self.height()),
                actual: (src.width(), src.height()),
            });
        }

        if comp == RgbComponent::Alpha {
            self.set_spp(4);
        }

        for y in 0..self.height() {
            for x in 0..self.width() {
                let val = src.get_pixel_unchecked(x, y) as u8;
                let pixel = self.get_pixel_unchecked(x, y);
                self.set_pixel_unchecked(x, y, comp.put(pixel, val));
            }
        }

        Ok(())
    }
}
