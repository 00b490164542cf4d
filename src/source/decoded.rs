use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{FbPaintError, FbPaintResult};
use crate::pixel::rgba::Rgba;
use crate::source::SourceImage;

/// An image decoded from a file, kept as straight (non-premultiplied) RGBA8.
#[derive(Clone, Debug)]
pub struct DecodedImage {
    width: usize,
    height: usize,
    /// Straight RGBA8, row-major, tightly packed.
    rgba8: Vec<u8>,
}

impl DecodedImage {
    /// Decode the image file at `path`. The format is guessed from its content.
    #[tracing::instrument(level = "debug", skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> FbPaintResult<Self> {
        let path = path.as_ref();
        let bytes =
            std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
        Self::from_bytes(&bytes).map_err(|err| match err {
            FbPaintError::Other(e) => {
                FbPaintError::Other(e.context(format!("decode image '{}'", path.display())))
            }
            other => other,
        })
    }

    /// Decode an in-memory encoded image.
    pub fn from_bytes(bytes: &[u8]) -> FbPaintResult<Self> {
        let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
        let rgba = dyn_img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba8(width as usize, height as usize, rgba.into_raw())
    }

    /// Wrap raw straight RGBA8 pixels.
    pub fn from_rgba8(width: usize, height: usize, rgba8: Vec<u8>) -> FbPaintResult<Self> {
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| FbPaintError::image("image dimensions overflow"))?;
        if rgba8.len() != expected {
            return Err(FbPaintError::image(format!(
                "expected {expected} bytes for {width}x{height} rgba8, got {}",
                rgba8.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8,
        })
    }
}

impl SourceImage for DecodedImage {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn rgba(&self, x: usize, y: usize) -> Rgba {
        if x >= self.width || y >= self.height {
            return Rgba::NULL;
        }
        let i = (y * self.width + x) * 4;
        let px = &self.rgba8[i..i + 4];
        Rgba::new(px[0], px[1], px[2], px[3])
    }
}
