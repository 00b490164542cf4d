//! Bitmaps the painter can composite.

pub mod cursor;
pub mod decoded;
pub mod table;

use crate::pixel::rgb::Rgb;
use crate::pixel::rgba::Rgba;

/// A fixed-size, immutable grid of RGBA pixels.
pub trait SourceImage {
    /// Width in pixels.
    fn width(&self) -> usize;

    /// Height in pixels.
    fn height(&self) -> usize;

    /// Pixel at `(x, y)`, or [`Rgba::NULL`] outside the image.
    fn rgba(&self, x: usize, y: usize) -> Rgba;

    /// Pixel at `(x, y)` without its alpha channel.
    fn rgb(&self, x: usize, y: usize) -> Rgb {
        self.rgba(x, y).rgb()
    }
}

impl<T: SourceImage + ?Sized> SourceImage for Box<T> {
    fn width(&self) -> usize {
        (**self).width()
    }

    fn height(&self) -> usize {
        (**self).height()
    }

    fn rgba(&self, x: usize, y: usize) -> Rgba {
        (**self).rgba(x, y)
    }
}
