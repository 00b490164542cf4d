use super::*;
use crate::pixel::rgba::Rgba;
use crate::surface::framebuffer::FrameBuffer;
use crate::surface::memory::MemorySurface;

struct Grid {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
}

impl Grid {
    fn solid(width: usize, height: usize, px: Rgba) -> Self {
        Self {
            width,
            height,
            pixels: vec![px; width * height],
        }
    }

    fn from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> Rgba) -> Self {
        let mut pixels = Vec::new();
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }
}

impl SourceImage for Grid {
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
        self.pixels[y * self.width + x]
    }
}

fn checkerboard(width: usize, height: usize) -> MemorySurface {
    MemorySurface::from_fn(width, height, |x, y| {
        Rgb::new((x * 20) as u8, (y * 20) as u8, ((x + y) % 2 * 200) as u8)
    })
}

const RED: Rgba = Rgba::new(255, 0, 0, 255);

#[test]
fn draw_then_clear_restores_background() {
    let mut surface = checkerboard(8, 8);
    let before = surface.pixels().to_vec();
    let mut painter = ImagePainter::new(Grid::solid(3, 3, RED));
    painter.move_to(2, 1);

    let drawn = painter.draw(&mut surface);
    assert_eq!(drawn.written, 9);
    assert_eq!(surface.pixel(2, 1), Rgb::new(255, 0, 0));
    assert_eq!(painter.damaged_pixels(), 9);

    let cleared = painter.clear(&mut surface);
    assert_eq!(cleared.restored, 9);
    assert_eq!(surface.pixels(), before.as_slice());
    assert_eq!(painter.damaged_pixels(), 0);
}

#[test]
fn clear_is_idempotent() {
    let mut surface = checkerboard(6, 6);
    let mut painter = ImagePainter::new(Grid::solid(2, 2, Rgba::new(9, 9, 9, 100)));
    painter.draw(&mut surface);
    painter.clear(&mut surface);
    let after_first = surface.pixels().to_vec();

    surface.reset_write_count();
    let second = painter.clear(&mut surface);
    assert_eq!(second, PaintStats::default());
    assert_eq!(surface.write_count(), 0);
    assert_eq!(surface.pixels(), after_first.as_slice());
    assert_eq!(painter.damaged_pixels(), 0);
}

#[test]
fn unchanged_origin_writes_nothing() {
    let mut surface = checkerboard(8, 8);
    let mut painter = ImagePainter::new(Grid::solid(2, 2, RED));
    painter.set_origin(3, 3, Some(&mut surface));
    surface.reset_write_count();

    let stats = painter.set_origin(3, 3, Some(&mut surface));
    assert_eq!(stats, PaintStats::default());
    assert_eq!(surface.write_count(), 0);
}

#[test]
fn redrawing_opaque_image_writes_nothing() {
    let mut surface = checkerboard(8, 8);
    let mut painter = ImagePainter::new(Grid::solid(4, 4, RED));
    painter.draw(&mut surface);
    surface.reset_write_count();

    let stats = painter.draw(&mut surface);
    assert_eq!(surface.write_count(), 0);
    assert_eq!(stats.writes(), 0);
    assert_eq!(stats.skipped, 16);
}

#[test]
fn redrawing_translucent_image_does_not_compound() {
    let mut surface = MemorySurface::filled(4, 4, Rgb::new(10, 10, 10));
    let mut painter = ImagePainter::new(Grid::solid(2, 2, Rgba::new(200, 200, 200, 128)));
    painter.draw(&mut surface);
    let once = surface.pixels().to_vec();

    surface.reset_write_count();
    painter.draw(&mut surface);
    assert_eq!(surface.write_count(), 0);
    assert_eq!(surface.pixels(), once.as_slice());
}

#[test]
fn transparent_pixels_never_paint() {
    let mut surface = checkerboard(4, 4);
    let before = surface.pixels().to_vec();
    let img = Grid::from_fn(2, 2, |x, _| if x == 0 { RED } else { Rgba::new(1, 2, 3, 0) });
    let mut painter = ImagePainter::new(img);

    painter.draw(&mut surface);
    assert_eq!(surface.pixel(0, 0), Rgb::new(255, 0, 0));
    assert_eq!(surface.pixel(1, 0), before[1]);
    assert_eq!(surface.pixel(1, 1), before[5]);
    assert_eq!(painter.damaged_pixels(), 2);
}

#[test]
fn transparent_pixel_moved_over_painted_pixel_restores_it() {
    let mut surface = checkerboard(4, 1);
    let before = surface.pixels().to_vec();
    let img = Grid::from_fn(2, 1, |x, _| if x == 0 { RED } else { Rgba::NULL });
    let mut painter = ImagePainter::new(img);

    painter.set_origin(1, 0, Some(&mut surface));
    assert_eq!(surface.pixel(1, 0), Rgb::new(255, 0, 0));

    painter.set_origin(0, 0, Some(&mut surface));
    assert_eq!(surface.pixel(0, 0), Rgb::new(255, 0, 0));
    assert_eq!(surface.pixel(1, 0), before[1]);
    assert_eq!(surface.pixel(2, 0), before[2]);
}

#[test]
fn alpha_blend_is_exact() {
    let mut surface = MemorySurface::filled(1, 1, Rgb::new(10, 10, 10));
    let mut painter = ImagePainter::new(Grid::solid(1, 1, Rgba::new(200, 200, 200, 128)));
    painter.draw(&mut surface);
    assert_eq!(surface.pixel(0, 0), Rgb::new(104, 104, 104));
}

#[test]
fn move_restores_vacated_area() {
    let mut surface = checkerboard(8, 8);
    let before = surface.pixels().to_vec();
    let mut painter = ImagePainter::new(Grid::solid(2, 2, RED));

    painter.draw(&mut surface);
    painter.set_origin(5, 5, Some(&mut surface));

    for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
        assert_eq!(surface.pixel(x, y), before[y * 8 + x], "({x}, {y})");
    }
    for (x, y) in [(5, 5), (6, 5), (5, 6), (6, 6)] {
        assert_eq!(surface.pixel(x, y), Rgb::new(255, 0, 0), "({x}, {y})");
    }
    assert_eq!(painter.origin(), (5, 5));
}

#[test]
fn overlapping_moves_blend_against_original_background() {
    let mut surface = checkerboard(10, 10);
    let before = surface.pixels().to_vec();
    let img = Grid::from_fn(3, 3, |x, y| Rgba::new(250, 100, 0, (40 + 60 * x + 20 * y) as u8));
    let mut painter = ImagePainter::new(img);

    painter.draw(&mut surface);
    for step in 1..=4 {
        painter.set_origin(step, step / 2, Some(&mut surface));
        let (ox, oy) = painter.origin();
        for y in 0..10 {
            for x in 0..10 {
                let bg = before[y * 10 + x];
                let inside = x >= ox && x < ox + 3 && y >= oy && y < oy + 3;
                let expected = if inside {
                    painter.image().rgba(x - ox, y - oy).combined_over(bg)
                } else {
                    bg
                };
                assert_eq!(surface.pixel(x, y), expected, "step {step} ({x}, {y})");
            }
        }
    }

    painter.clear(&mut surface);
    assert_eq!(surface.pixels(), before.as_slice());
}

#[test]
fn externally_modified_pixel_is_left_alone() {
    let mut surface = checkerboard(4, 4);
    let mut painter = ImagePainter::new(Grid::solid(2, 2, RED));
    painter.draw(&mut surface);

    let foreign = Rgb::new(1, 1, 1);
    surface.set_pixel(1, 1, foreign);
    let stats = painter.clear(&mut surface);

    assert_eq!(stats.restored, 3);
    assert_eq!(surface.pixel(1, 1), foreign);
    assert_eq!(painter.damaged_pixels(), 0);
}

#[test]
fn move_without_surface_keeps_damage_attached() {
    let mut surface = checkerboard(4, 1);
    let before = surface.pixels().to_vec();
    let mut painter = ImagePainter::new(Grid::solid(2, 1, RED));
    painter.draw(&mut surface);

    let stats = painter.set_origin(1, 0, None::<&mut MemorySurface>);
    assert_eq!(stats, PaintStats::default());
    assert_eq!(painter.origin(), (1, 0));
    // (0, 0) fell outside the image and is forgotten; (1, 0) is still tracked.
    assert_eq!(painter.damaged_pixels(), 1);

    painter.clear(&mut surface);
    assert_eq!(surface.pixel(0, 0), Rgb::new(255, 0, 0));
    assert_eq!(surface.pixel(1, 0), before[1]);
}

#[test]
fn closed_surface_is_ignored() {
    let mut fb = FrameBuffer::open("/nonexistent/fbpaint-painter-fb");
    let mut painter = ImagePainter::new(Grid::solid(2, 2, RED));

    assert_eq!(painter.draw(&mut fb), PaintStats::default());
    assert_eq!(painter.clear(&mut fb), PaintStats::default());
    assert_eq!(painter.set_origin(3, 4, Some(&mut fb)), PaintStats::default());
    assert_eq!(painter.origin(), (3, 4));
    assert_eq!(painter.damaged_pixels(), 0);
}

#[test]
fn draw_clips_to_surface() {
    let mut surface = MemorySurface::new(8, 8);
    let mut painter = ImagePainter::new(Grid::solid(4, 4, RED));
    painter.move_to(6, 6);
    assert_eq!(painter.draw(&mut surface).written, 4);

    painter.set_origin(20, 20, Some(&mut surface));
    assert_eq!(surface.write_count(), 8);
    assert!(surface.pixels().iter().all(|&p| p == Rgb::BLACK));
}

#[test]
fn empty_image_is_harmless() {
    let mut surface = MemorySurface::new(4, 4);
    let mut painter = ImagePainter::new(Grid::solid(0, 0, RED));
    assert_eq!(painter.draw(&mut surface), PaintStats::default());
    painter.set_origin(1, 1, Some(&mut surface));
    assert_eq!(painter.clear(&mut surface), PaintStats::default());
    assert_eq!(surface.write_count(), 0);
}

#[test]
fn boxed_images_paint() {
    let img: Box<dyn SourceImage> = Box::new(Grid::solid(1, 1, RED));
    let mut surface = MemorySurface::new(2, 2);
    let mut painter = ImagePainter::new(img);
    painter.set_origin(1, 1, Some(&mut surface));
    assert_eq!(surface.pixel(1, 1), Rgb::new(255, 0, 0));
    assert_eq!(painter.into_image().width(), 1);
}

#[test]
fn move_to_keeps_overlapping_damage_only() {
    let mut surface = checkerboard(6, 1);
    let before = surface.pixels().to_vec();
    let mut painter = ImagePainter::new(Grid::solid(3, 1, RED));
    painter.draw(&mut surface);
    surface.reset_write_count();

    painter.move_to(2, 0);
    assert_eq!(surface.write_count(), 0);
    assert_eq!(painter.origin(), (2, 0));
    // Only (2, 0) is still under the image; (0, 0) and (1, 0) are forgotten.
    assert_eq!(painter.damaged_pixels(), 1);

    painter.clear(&mut surface);
    assert_eq!(surface.pixel(2, 0), before[2]);
    assert_eq!(surface.pixel(0, 0), Rgb::new(255, 0, 0));
}

#[test]
fn clear_before_move_to_leaves_nothing_behind() {
    let mut surface = checkerboard(6, 1);
    let before = surface.pixels().to_vec();
    let mut painter = ImagePainter::new(Grid::solid(3, 1, RED));
    painter.draw(&mut surface);

    painter.clear(&mut surface);
    painter.move_to(3, 0);
    painter.draw(&mut surface);
    painter.clear(&mut surface);
    assert_eq!(surface.pixels(), before.as_slice());
}
