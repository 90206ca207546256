//! alphagrow-io - Image I/O
//!
//! PNG is the only format: it is lossless and carries the alpha channel
//! the dilation filter works on.

mod error;
pub mod png;

pub use crate::png::{read_png, write_png};
pub use error::{IoError, IoResult};

use alphagrow_core::Pix;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Read a PNG image from a file path.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    let file = File::open(path)?;
    read_png(BufReader::new(file))
}

/// Write an image to a file path as PNG.
pub fn write_image<P: AsRef<Path>>(pix: &Pix, path: P) -> IoResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_png(pix, &mut writer)?;
    writer.flush()?;
    Ok(())
}
