//! Bounce an image back and forth across a surface at a fixed pixel rate.

use std::time::{Duration, Instant};

use crate::config::BounceConfig;
use crate::painter::{ImagePainter, PaintStats};
use crate::source::SourceImage;
use crate::surface::Surface;

/// Horizontal ping-pong motion on a fixed row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounce {
    x: usize,
    y: usize,
    x_max: usize,
    forward: bool,
}

impl Bounce {
    /// Start half way along the travel range, vertically centered, moving right.
    pub fn centered(
        surface_width: usize,
        surface_height: usize,
        image_width: usize,
        image_height: usize,
    ) -> Self {
        let x_max = surface_width.saturating_sub(image_width);
        Self {
            x: x_max / 2,
            y: surface_height.saturating_sub(image_height) / 2,
            x_max,
            forward: true,
        }
    }

    pub fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    /// Rightmost origin the image can take.
    pub fn x_max(&self) -> usize {
        self.x_max
    }

    /// Advance one pixel, turning around at either edge.
    pub fn step(&mut self) -> (usize, usize) {
        if self.x_max == 0 {
            return self.position();
        }
        if self.forward && self.x >= self.x_max {
            self.forward = false;
        } else if !self.forward && self.x == 0 {
            self.forward = true;
        }
        if self.forward {
            self.x += 1;
        } else {
            self.x -= 1;
        }
        self.position()
    }
}

/// Outcome of [`run_bounce`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BounceStats {
    /// Moves performed.
    pub steps: u64,
    /// Surface work across the whole run, final clear included.
    pub paint: PaintStats,
}

/// Draw `painter`'s image centered on `surface` and bounce it at
/// `config.pixels_per_second` until `config.steps` moves have been made.
///
/// Without a step limit this only returns if the process is interrupted.
pub fn run_bounce<I, S>(
    painter: &mut ImagePainter<I>,
    surface: &mut S,
    config: &BounceConfig,
) -> BounceStats
where
    I: SourceImage,
    S: Surface + ?Sized,
{
    let mut motion = Bounce::centered(
        surface.width(),
        surface.height(),
        painter.width(),
        painter.height(),
    );
    let period = Duration::from_secs(1) / config.pixels_per_second.max(1);
    tracing::info!(
        width = surface.width(),
        height = surface.height(),
        pps = config.pixels_per_second,
        steps = ?config.steps,
        "bounce start"
    );

    let mut stats = BounceStats::default();
    let (x, y) = motion.position();
    painter.move_to(x, y);
    stats.paint += painter.draw(surface);

    let mut deadline = Instant::now();
    while config.steps.is_none_or(|limit| stats.steps < limit) {
        deadline += period;
        let (x, y) = motion.step();
        stats.paint += painter.set_origin(x, y, Some(&mut *surface));
        stats.steps += 1;

        let now = Instant::now();
        if deadline > now {
            std::thread::sleep(deadline - now);
        } else {
            // Fell behind; don't try to catch up with a burst of moves.
            deadline = now;
        }
    }

    if config.clear_on_exit {
        stats.paint += painter.clear(surface);
    }
    tracing::info!(steps = stats.steps, writes = stats.paint.writes(), "bounce done");
    stats
}
