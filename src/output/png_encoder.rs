//! PNG output.
//!
//! 8-bit RGBA, no interlacing, encoded by the pure-Rust `png` crate.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::framebuffer::Framebuffer;
use crate::log::debug;

/// PNG encoder for framebuffer output.
#[derive(Debug, Clone, Copy)]
pub struct PngEncoder;

impl PngEncoder {
    /// Write `fb` to a PNG file, replacing any existing file.
    ///
    /// # Errors
    ///
    /// I/O failures creating the file, or an encoding failure.
    pub fn write_to_file<P: AsRef<Path>>(fb: &Framebuffer, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut out = BufWriter::new(File::create(path)?);
        Self::encode(fb, &mut out)?;
        out.flush()?;
        debug!(
            path = %path.display(),
            width = fb.width(),
            height = fb.height(),
            "wrote png"
        );
        Ok(())
    }

    /// Encode `fb` to PNG bytes in memory.
    ///
    /// # Errors
    ///
    /// An encoding failure.
    pub fn to_bytes(fb: &Framebuffer) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        Self::encode(fb, &mut buffer)?;
        Ok(buffer)
    }

    fn encode<W: Write>(fb: &Framebuffer, out: W) -> Result<()> {
        let mut encoder = png::Encoder::new(out, fb.width(), fb.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(fb.pixels())?;
        writer.finish()?;
        Ok(())
    }
}
