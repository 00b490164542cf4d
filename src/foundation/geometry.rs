/// Half-open pixel rectangle `[x0, x1) x [y0, y1)` in surface coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PixelRect {
    /// Inclusive left edge.
    pub x0: usize,
    /// Inclusive top edge.
    pub y0: usize,
    /// Exclusive right edge.
    pub x1: usize,
    /// Exclusive bottom edge.
    pub y1: usize,
}

impl PixelRect {
    /// Rectangle of a `width x height` block placed at `origin`, clipped to a
    /// `clip_width x clip_height` area anchored at `(0, 0)`.
    ///
    /// Placements that start past the clip area produce an empty rectangle.
    pub fn placed(
        origin: (usize, usize),
        width: usize,
        height: usize,
        clip_width: usize,
        clip_height: usize,
    ) -> Self {
        let (x0, y0) = origin;
        let x1 = x0.saturating_add(width).min(clip_width).max(x0);
        let y1 = y0.saturating_add(height).min(clip_height).max(y0);
        Self { x0, y0, x1, y1 }
    }

    /// Width in pixels.
    pub fn width(self) -> usize {
        self.x1.saturating_sub(self.x0)
    }

    /// Height in pixels.
    pub fn height(self) -> usize {
        self.y1.saturating_sub(self.y0)
    }

    /// Return `true` when the rectangle covers no pixels.
    pub fn is_empty(self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Return `true` when `(x, y)` lies inside the rectangle.
    pub fn contains(self, x: usize, y: usize) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }

    /// Row-major iterator over every `(x, y)` in the rectangle.
    pub fn points(self) -> impl Iterator<Item = (usize, usize)> {
        (self.y0..self.y1).flat_map(move |y| (self.x0..self.x1).map(move |x| (x, y)))
    }
}
