//! Depth conversion

use super::{Pix, PixelDepth};
use crate::color;
use crate::error::Result;

impl Pix {
    /// Convert to 32 bpp.
    ///
    /// - **8 bpp**: gray is replicated into R=G=B, fully opaque, no alpha
    /// - **32 bpp**: returned as a deep copy
    pub fn convert_to_32(&self) -> Result<Pix> {
        match self.depth() {
            PixelDepth::Bit32 => Ok(self.deep_clone()),
            PixelDepth::Bit8 => {
                let (w, h) = (self.width(), self.height());
                let mut out = Pix::new_filled(w, h, PixelDepth::Bit32, 0xff)?.to_mut();

                let mut tab = [0u32; 256];
                for (i, entry) in tab.iter_mut().enumerate() {
                    let g = i as u8;
                    *entry = color::compose_rgba(g, g, g, 255);
                }
                for y in 0..h {
                    for x in 0..w {
                        let val = self.get_pixel_unchecked(x, y) as usize;
                        out.set_pixel_unchecked(x, y, tab[val]);
                    }
                }
                Ok(out.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gray_to_rgb() {
        let mut pm = Pix::new(2, 1, PixelDepth::Bit8).unwrap().to_mut();
        pm.set_pixel(1, 0, 77).unwrap();
        let rgb = Pix::from(pm).convert_to_32().unwrap();
        assert_eq!(rgb.depth(), PixelDepth::Bit32);
        assert!(!rgb.has_alpha());
        assert_eq!(rgb.get_rgba(0, 0), Some((0, 0, 0, 255)));
        assert_eq!(rgb.get_rgba(1, 0), Some((77, 77, 77, 255)));
    }

    #[test]
    fn test_rgba_is_copied() {
        let mut pm = Pix::new(1, 1, PixelDepth::Bit32).unwrap().to_mut();
        pm.set_rgba(0, 0, 1, 2, 3, 4).unwrap();
        let src: Pix = pm.into();
        let out = src.convert_to_32().unwrap();
        assert!(out.has_alpha());
        assert_eq!(out.get_rgba(0, 0), Some((1, 2, 3, 4)));
    }
}
