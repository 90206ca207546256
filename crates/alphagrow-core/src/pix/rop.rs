//! Raster operations (ROP)
//!
//! Verbatim rectangular copies between images of the same depth, used
//! when a layer is re-sized onto a new canvas without compositing.

use super::blend::overlap;
use super::{Pix, PixMut};
use crate::error::{Error, Result};

impl PixMut {
    /// Copy `src` into this image with its top-left corner at `(x, y)`.
    ///
    /// Destination pixels are overwritten, alpha included; parts of
    /// `src` outside this image are clipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompatibleDepths`] if the depths differ.
    pub fn blit(&mut self, src: &Pix, x: i32, y: i32) -> Result<()> {
        if src.depth() != self.depth() {
            return Err(Error::IncompatibleDepths(
                src.depth().bits(),
                self.depth().bits(),
            ));
        }

        let Some((sx0, sy0, dx0, dy0, w, h)) =
            overlap(src.width(), src.height(), x, y, self.width(), self.height())
        else {
            return Ok(());
        };

        for j in 0..h {
            for i in 0..w {
                let val = src.get_pixel_unchecked(sx0 + i, sy0 + j);
                self.set_pixel_unchecked(dx0 + i, dy0 + j, val);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PixelDepth;

    #[test]
    fn test_blit_overwrites_alpha() {
        let mut dst = Pix::new_filled(3, 3, PixelDepth::Bit32, 0xffff_ffff)
            .unwrap()
            .to_mut();
        let src = Pix::new_filled(2, 2, PixelDepth::Bit32, 0x1020_3000).unwrap();
        dst.blit(&src, 2, -1).unwrap();
        assert_eq!(dst.get_pixel(2, 0), Some(0x1020_3000));
        assert_eq!(dst.get_pixel(1, 0), Some(0xffff_ffff));
        assert_eq!(dst.get_pixel(2, 1), Some(0xffff_ffff));
    }

    #[test]
    fn test_blit_gray() {
        let mut dst = Pix::new(6, 2, PixelDepth::Bit8).unwrap().to_mut();
        let src = Pix::new_filled(2, 1, PixelDepth::Bit8, 77).unwrap();
        dst.blit(&src, 3, 1).unwrap();
        assert_eq!(dst.get_pixel(3, 1), Some(77));
        assert_eq!(dst.get_pixel(4, 1), Some(77));
        assert_eq!(dst.get_pixel(5, 1), Some(0));
    }

    #[test]
    fn test_blit_depth_mismatch() {
        let mut dst = Pix::new(2, 2, PixelDepth::Bit8).unwrap().to_mut();
        let src = Pix::new(2, 2, PixelDepth::Bit32).unwrap();
        assert!(dst.blit(&src, 0, 0).is_err());
    }
}
