use crate::pixel::rgba::Rgba;
use crate::source::SourceImage;

/// An image compiled into the binary as a color palette plus one palette
/// index per pixel.
///
/// Tables of this shape are produced by [`crate::encode::encode_table_image`].
/// Pixels whose index is missing, or points past the palette, read as null.
#[derive(Clone, Copy, Debug)]
pub struct TableImage {
    width: usize,
    height: usize,
    palette: &'static [[u8; 4]],
    pixels: &'static [u8],
}

impl TableImage {
    /// Wrap static tables. `pixels` is row-major, `width * height` entries.
    pub const fn new(
        width: usize,
        height: usize,
        palette: &'static [[u8; 4]],
        pixels: &'static [u8],
    ) -> Self {
        Self {
            width,
            height,
            palette,
            pixels,
        }
    }

    /// Number of distinct colors.
    pub const fn palette_len(&self) -> usize {
        self.palette.len()
    }
}

impl SourceImage for TableImage {
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
        self.pixels
            .get(y * self.width + x)
            .and_then(|&idx| self.palette.get(usize::from(idx)))
            .map_or(Rgba::NULL, |&px| Rgba::from(px))
    }
}
