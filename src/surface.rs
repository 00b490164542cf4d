//! Pixel-addressable display surfaces.
//!
//! A [`Surface`] is owned by something outside this process's control: other
//! writers may change any pixel between calls, so users must re-read rather
//! than assume their last write is still visible.

#[allow(unsafe_code)]
pub mod framebuffer;
pub mod layout;
pub mod memory;

use crate::pixel::rgb::Rgb;

/// A width x height grid of RGB pixels that can be read and written.
///
/// Implementations are total: reads outside the surface or on a closed
/// surface return non-null black, and invalid writes are dropped.
pub trait Surface {
    /// Return `true` when the surface is backed by a usable resource.
    fn is_open(&self) -> bool;

    /// Visible width in pixels (0 when closed).
    fn width(&self) -> usize;

    /// Visible height in pixels (0 when closed).
    fn height(&self) -> usize;

    /// Current color at `(x, y)`.
    fn pixel(&self, x: usize, y: usize) -> Rgb;

    /// Write `color` at `(x, y)`. Null colors are ignored.
    fn set_pixel(&mut self, x: usize, y: usize, color: Rgb);
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn is_open(&self) -> bool {
        (**self).is_open()
    }

    fn width(&self) -> usize {
        (**self).width()
    }

    fn height(&self) -> usize {
        (**self).height()
    }

    fn pixel(&self, x: usize, y: usize) -> Rgb {
        (**self).pixel(x, y)
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: Rgb) {
        (**self).set_pixel(x, y, color)
    }
}
