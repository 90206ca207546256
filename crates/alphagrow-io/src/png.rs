//! PNG image format support
//!
//! Images are decoded to 8 bits per sample: palettes and low bit depths
//! are expanded, 16-bit samples are stripped to their high byte. Gray
//! becomes an 8 bpp `Pix`; everything else becomes 32 bpp, RGBA when the
//! file carries transparency.

use crate::{IoError, IoResult};
use alphagrow_core::{Pix, PixelDepth, color};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;

    let (color_type, bit_depth) = reader.output_color_type();
    if bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "unexpected PNG output depth: {:?}",
            bit_depth
        )));
    }
    let (pix_depth, spp, samples) = match color_type {
        ColorType::Grayscale => (PixelDepth::Bit8, 1, 1),
        ColorType::GrayscaleAlpha => (PixelDepth::Bit32, 4, 2),
        ColorType::Rgb => (PixelDepth::Bit32, 3, 3),
        ColorType::Rgba => (PixelDepth::Bit32, 4, 4),
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "PNG palette was not expanded".to_string(),
            ));
        }
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let mut pix_mut = Pix::new(width, height, pix_depth)?.to_mut();
    if pix_depth == PixelDepth::Bit32 {
        pix_mut.set_spp(spp);
    }

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];

    for y in 0..height {
        let row = &data[y as usize * bytes_per_row..];
        for x in 0..width {
            let s = &row[x as usize * samples..];
            let pixel = match color_type {
                ColorType::Grayscale => s[0] as u32,
                ColorType::GrayscaleAlpha => color::compose_rgba(s[0], s[0], s[0], s[1]),
                ColorType::Rgb => color::compose_rgb(s[0], s[1], s[2]),
                _ => color::compose_rgba(s[0], s[1], s[2], s[3]),
            };
            pix_mut.set_pixel_unchecked(x, y, pixel);
        }
    }

    Ok(pix_mut.into())
}

/// Write a PNG image
///
/// 8 bpp images are written as gray, 32 bpp as RGBA if they carry alpha
/// and RGB otherwise.
pub fn write_png<W: Write>(pix: &Pix, writer: W) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();

    let (color_type, samples) = match pix.depth() {
        PixelDepth::Bit8 => (ColorType::Grayscale, 1),
        PixelDepth::Bit32 if pix.has_alpha() => (ColorType::Rgba, 4),
        PixelDepth::Bit32 => (ColorType::Rgb, 3),
    };

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    let bytes_per_row = width as usize * samples;
    let mut data = vec![0u8; bytes_per_row * height as usize];

    for y in 0..height {
        let row = &mut data[y as usize * bytes_per_row..(y as usize + 1) * bytes_per_row];
        for x in 0..width {
            let pixel = pix.get_pixel_unchecked(x, y);
            let out = &mut row[x as usize * samples..(x as usize + 1) * samples];
            match color_type {
                ColorType::Grayscale => out[0] = pixel as u8,
                ColorType::Rgb => {
                    let (r, g, b) = color::extract_rgb(pixel);
                    out.copy_from_slice(&[r, g, b]);
                }
                _ => {
                    let (r, g, b, a) = color::extract_rgba(pixel);
                    out.copy_from_slice(&[r, g, b, a]);
                }
            }
        }
    }

    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_png_roundtrip_grayscale() {
        let mut pix_mut = Pix::new(10, 10, PixelDepth::Bit8).unwrap().to_mut();
        for y in 0..10 {
            for x in 0..10 {
                pix_mut.set_pixel(x, y, (x + y) * 10).unwrap();
            }
        }
        let pix: Pix = pix_mut.into();

        let mut buffer = Vec::new();
        write_png(&pix, &mut buffer).unwrap();
        let pix2 = read_png(Cursor::new(buffer)).unwrap();

        assert_eq!(pix2.depth(), PixelDepth::Bit8);
        assert_eq!(pix2.data(), pix.data());
    }

    #[test]
    fn test_png_roundtrip_rgba() {
        let mut pix_mut = Pix::new(5, 3, PixelDepth::Bit32).unwrap().to_mut();
        pix_mut.set_rgba(0, 0, 255, 0, 0, 255).unwrap();
        pix_mut.set_rgba(4, 2, 10, 20, 30, 77).unwrap();
        let pix: Pix = pix_mut.into();

        let mut buffer = Vec::new();
        write_png(&pix, &mut buffer).unwrap();
        let pix2 = read_png(Cursor::new(buffer)).unwrap();

        assert!(pix2.has_alpha());
        assert_eq!(pix2.get_rgba(0, 0), Some((255, 0, 0, 255)));
        assert_eq!(pix2.get_rgba(4, 2), Some((10, 20, 30, 77)));
        assert_eq!(pix2.get_rgba(1, 1), Some((0, 0, 0, 0)));
    }

    #[test]
    fn test_png_rgb_is_opaque() {
        let pix = Pix::new_filled(2, 2, PixelDepth::Bit32, color::compose_rgb(1, 2, 3)).unwrap();
        let mut buffer = Vec::new();
        write_png(&pix, &mut buffer).unwrap();
        let pix2 = read_png(Cursor::new(buffer)).unwrap();
        assert!(!pix2.has_alpha());
        assert_eq!(pix2.get_pixel(1, 1), Some(color::compose_rgb(1, 2, 3)));
    }

    #[test]
    fn test_png_garbage() {
        assert!(read_png(Cursor::new(b"not a png".to_vec())).is_err());
    }
}
