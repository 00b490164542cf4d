//! Damage-tracked compositing of one image onto a [`Surface`].
//!
//! The painter keeps one restore entry per image pixel. An entry is filled the
//! first time the painter overwrites the surface pixel under that image pixel
//! and holds the value it replaced, so the image can later be removed or moved
//! without leaving stray pixels behind.
//!
//! Surface writes are assumed to be slow (device memory), so every operation
//! skips writes whose result is already on screen.

use std::ops::AddAssign;

use crate::foundation::geometry::PixelRect;
use crate::pixel::rgb::Rgb;
use crate::source::SourceImage;
use crate::surface::Surface;

/// Surface writes performed by one painter operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaintStats {
    /// Composited pixels written.
    pub written: usize,
    /// Saved pixels written back.
    pub restored: usize,
    /// Pixels whose composited value was already on the surface.
    pub skipped: usize,
}

impl PaintStats {
    /// Total surface writes.
    pub fn writes(self) -> usize {
        self.written + self.restored
    }
}

impl AddAssign for PaintStats {
    fn add_assign(&mut self, rhs: Self) {
        self.written += rhs.written;
        self.restored += rhs.restored;
        self.skipped += rhs.skipped;
    }
}

/// What the painter replaced at one pixel, and what it put there.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Damage {
    saved: Rgb,
    drawn: Rgb,
}

/// Composites an owned [`SourceImage`] onto a surface at a movable origin.
///
/// Every operation is total: closed surfaces, empty images and placements
/// outside the surface are silently ignored. Dropping a painter does not
/// restore the surface; call [`ImagePainter::clear`] first for that.
pub struct ImagePainter<I> {
    image: I,
    width: usize,
    height: usize,
    origin: (usize, usize),
    restore: Vec<Option<Damage>>,
    scratch: Vec<Option<Damage>>,
}

impl<I: SourceImage> ImagePainter<I> {
    /// Take ownership of `image`, placed at `(0, 0)` and not yet drawn.
    pub fn new(image: I) -> Self {
        let width = image.width();
        let height = image.height();
        let len = width.saturating_mul(height);
        Self {
            image,
            width,
            height,
            origin: (0, 0),
            restore: vec![None; len],
            scratch: Vec::new(),
        }
    }

    /// Image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Current top-left placement on the surface.
    pub fn origin(&self) -> (usize, usize) {
        self.origin
    }

    /// The painted image.
    pub fn image(&self) -> &I {
        &self.image
    }

    /// Give the image back, discarding the restore buffer without touching
    /// any surface.
    pub fn into_image(self) -> I {
        self.image
    }

    /// Number of surface pixels currently holding painter output that has
    /// not been restored.
    pub fn damaged_pixels(&self) -> usize {
        self.restore.iter().filter(|e| e.is_some()).count()
    }

    /// Composite every visible image pixel onto `surface`.
    pub fn draw<S: Surface + ?Sized>(&mut self, surface: &mut S) -> PaintStats {
        let mut stats = PaintStats::default();
        if !surface.is_open() {
            return stats;
        }
        let visible = self.visible_rect(self.origin, surface);
        for (x, y) in visible.points() {
            self.draw_pixel(x, y, surface, &mut stats);
        }
        tracing::trace!(origin = ?self.origin, ?stats, "draw");
        stats
    }

    /// Remove the image from `surface`, restoring every pixel it replaced.
    ///
    /// Pixels changed by someone else since the painter drew them are left
    /// alone. The restore buffer is empty afterwards, so a second call is a
    /// no-op. A closed surface leaves the buffer untouched.
    pub fn clear<S: Surface + ?Sized>(&mut self, surface: &mut S) -> PaintStats {
        let mut stats = PaintStats::default();
        if !surface.is_open() {
            return stats;
        }
        let (ox, oy) = self.origin;
        for idx in 0..self.restore.len() {
            if self.restore[idx].is_none() {
                continue;
            }
            let x = ox.saturating_add(idx % self.width);
            let y = oy.saturating_add(idx / self.width);
            self.restore_pixel(idx, x, y, surface, &mut stats);
        }
        tracing::trace!(origin = ?self.origin, ?stats, "clear");
        stats
    }

    /// Move the image's top-left corner to `(x, y)`.
    ///
    /// With a surface, pixels the image no longer covers (or now covers with
    /// a fully transparent pixel) are restored, then the image is redrawn at
    /// its new place. Without one (or with a closed one) this is
    /// [`ImagePainter::move_to`]. Setting the current origin again does nothing.
    pub fn set_origin<S: Surface + ?Sized>(
        &mut self,
        x: usize,
        y: usize,
        surface: Option<&mut S>,
    ) -> PaintStats {
        let mut stats = PaintStats::default();
        let target = (x, y);
        if target == self.origin {
            return stats;
        }
        let Some(surface) = surface.filter(|s| s.is_open()) else {
            self.move_to(x, y);
            return stats;
        };

        let old = self.visible_rect(self.origin, surface);
        let new = self.visible_rect(target, surface);
        for (fx, fy) in old.points() {
            let still_covered = new.contains(fx, fy)
                && !self.image.rgba(fx - x, fy - y).is_transparent();
            if !still_covered {
                self.clear_pixel(fx, fy, surface, &mut stats);
            }
        }

        self.reanchor(target);
        self.origin = target;
        stats += self.draw(surface);
        tracing::trace!(from = ?old, to = ?new, ?stats, "set_origin");
        stats
    }

    /// Move the origin to `(x, y)` without touching any surface.
    ///
    /// Saved pixels stay attached to the surface pixels they came from. Saved
    /// pixels the image no longer covers at the new origin are forgotten and
    /// can never be restored, so call [`ImagePainter::clear`] first when the
    /// image is on screen.
    pub fn move_to(&mut self, x: usize, y: usize) {
        let target = (x, y);
        if target == self.origin {
            return;
        }
        self.reanchor(target);
        self.origin = target;
    }

    /// Surface rectangle covered by the image when placed at `origin`.
    fn visible_rect<S: Surface + ?Sized>(&self, origin: (usize, usize), surface: &S) -> PixelRect {
        PixelRect::placed(
            origin,
            self.width,
            self.height,
            surface.width(),
            surface.height(),
        )
    }

    /// Restore-buffer index of surface pixel `(x, y)` at the current origin.
    fn local_index(&self, x: usize, y: usize) -> Option<usize> {
        let ix = x.checked_sub(self.origin.0)?;
        let iy = y.checked_sub(self.origin.1)?;
        (ix < self.width && iy < self.height).then(|| iy * self.width + ix)
    }

    fn draw_pixel<S: Surface + ?Sized>(
        &mut self,
        x: usize,
        y: usize,
        surface: &mut S,
        stats: &mut PaintStats,
    ) {
        let Some(idx) = self.local_index(x, y) else {
            return;
        };
        let source = self
            .image
            .rgba(x - self.origin.0, y - self.origin.1);
        if source.is_transparent() {
            self.restore_pixel(idx, x, y, surface, stats);
            return;
        }

        let current = surface.pixel(x, y);
        // Blend against what was under the image, never against our own output.
        let covered = self.restore[idx].map_or(current, |d| d.saved);
        let to_draw = source.combined_over(covered);
        if to_draw == current {
            if let Some(damage) = &mut self.restore[idx] {
                damage.drawn = to_draw;
            }
            stats.skipped += 1;
            return;
        }

        self.restore[idx] = Some(Damage {
            saved: covered,
            drawn: to_draw,
        });
        surface.set_pixel(x, y, to_draw);
        stats.written += 1;
    }

    fn clear_pixel<S: Surface + ?Sized>(
        &mut self,
        x: usize,
        y: usize,
        surface: &mut S,
        stats: &mut PaintStats,
    ) {
        if let Some(idx) = self.local_index(x, y) {
            self.restore_pixel(idx, x, y, surface, stats);
        }
    }

    /// Write back the saved value for entry `idx` (at surface `(x, y)`) if the
    /// surface still shows what the painter drew, then empty the entry.
    fn restore_pixel<S: Surface + ?Sized>(
        &mut self,
        idx: usize,
        x: usize,
        y: usize,
        surface: &mut S,
        stats: &mut PaintStats,
    ) {
        let Some(damage) = self.restore[idx].take() else {
            return;
        };
        if x < surface.width() && y < surface.height() && surface.pixel(x, y) == damage.drawn {
            surface.set_pixel(x, y, damage.saved);
            stats.restored += 1;
        }
    }

    /// Re-index restore entries for a new origin so each stays attached to the
    /// same surface pixel. Entries that fall outside the image are dropped.
    fn reanchor(&mut self, target: (usize, usize)) {
        if self.damaged_pixels() == 0 {
            return;
        }
        let (ox, oy) = self.origin;
        let (nx, ny) = target;
        self.scratch.clear();
        self.scratch.resize(self.restore.len(), None);
        for (idx, entry) in self.restore.iter_mut().enumerate() {
            let Some(damage) = entry.take() else {
                continue;
            };
            let fx = ox.saturating_add(idx % self.width);
            let fy = oy.saturating_add(idx / self.width);
            let (Some(ix), Some(iy)) = (fx.checked_sub(nx), fy.checked_sub(ny)) else {
                continue;
            };
            if ix < self.width && iy < self.height {
                self.scratch[iy * self.width + ix] = Some(damage);
            }
        }
        std::mem::swap(&mut self.restore, &mut self.scratch);
    }
}

#[cfg(test)]
#[path = "../tests/unit/painter.rs"]
mod tests;
