use std::path::{Path, PathBuf};

use eyre::eyre;
use image::RgbaImage;

/// A frame header can legally declare a canvas far beyond anything a real
/// sprite sheet holds; anything past this pixel count is a corrupt header.
const MAX_FRAME_PIXELS: usize = 1 << 24;

/// Where decoded frames go. The decoder side only ever hands over a name,
/// the canvas size and a flat RGBA buffer; everything about encoding and
/// placement lives behind this. `Ok(None)` means the frame was refused
/// without failing the run.
pub trait ImageSink {
    fn write_frame(
        &mut self,
        name: &str,
        width: u32,
        height: u32,
        rgba: &[u8],
    ) -> eyre::Result<Option<PathBuf>>;
}

pub struct PngSink {
    out_dir: PathBuf,
}

impl PngSink {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }
}

impl ImageSink for PngSink {
    fn write_frame(
        &mut self,
        name: &str,
        width: u32,
        height: u32,
        rgba: &[u8],
    ) -> eyre::Result<Option<PathBuf>> {
        let pixels = width as usize * height as usize;

        if pixels == 0 || pixels > MAX_FRAME_PIXELS {
            log::warn!("{name}: {width}x{height} is not a plausible canvas, frame skipped");
            return Ok(None);
        }

        // A truncated run-length stream yields a short buffer; the canvas is
        // filled up with transparent pixels so dimensions stay as declared.
        let mut buf = rgba.to_vec();
        buf.resize(pixels * 4, 0);

        let image = RgbaImage::from_raw(width, height, buf)
            .ok_or_else(|| eyre!("cannot build {}x{} image from frame buffer", width, height))?;

        let path = self.out_dir.join(name);
        image.save(&path)?;

        Ok(Some(path))
    }
}
