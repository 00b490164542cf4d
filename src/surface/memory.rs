use crate::pixel::rgb::Rgb;
use crate::surface::Surface;

/// An in-memory [`Surface`] that counts the writes it receives.
///
/// Useful for headless runs and for checking how many device writes a paint
/// operation would cost.
#[derive(Clone, Debug)]
pub struct MemorySurface {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
    writes: usize,
}

impl MemorySurface {
    /// A black surface.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, Rgb::BLACK)
    }

    /// A surface filled with `color` (null fills as black).
    pub fn filled(width: usize, height: usize, color: Rgb) -> Self {
        let color = if color.is_null() { Rgb::BLACK } else { color };
        Self {
            width,
            height,
            pixels: vec![color; width.saturating_mul(height)],
            writes: 0,
        }
    }

    /// A surface whose pixel at `(x, y)` is `f(x, y)`.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> Rgb) -> Self {
        let mut pixels = Vec::with_capacity(width.saturating_mul(height));
        for y in 0..height {
            for x in 0..width {
                let color = f(x, y);
                pixels.push(if color.is_null() { Rgb::BLACK } else { color });
            }
        }
        Self {
            width,
            height,
            pixels,
            writes: 0,
        }
    }

    /// Row-major pixel contents.
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Number of accepted `set_pixel` calls since creation or the last reset.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Reset the write counter to zero.
    pub fn reset_write_count(&mut self) {
        self.writes = 0;
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }
}

impl Surface for MemorySurface {
    fn is_open(&self) -> bool {
        true
    }

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn pixel(&self, x: usize, y: usize) -> Rgb {
        self.index(x, y)
            .map_or(Rgb::BLACK, |idx| self.pixels[idx])
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: Rgb) {
        if color.is_null() {
            return;
        }
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx] = color;
            self.writes += 1;
        }
    }
}
