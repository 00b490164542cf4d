//! Damage-tracked compositing of a single image onto the Linux fbdev frame
//! buffer.
//!
//! An [`ImagePainter`] draws a [`SourceImage`] onto a [`Surface`], remembers
//! every pixel it overwrote, and can move or remove the image while putting
//! exactly those pixels back.

#![deny(unsafe_code)]

pub mod bounce;
pub mod config;
pub mod encode;
pub mod foundation;
pub mod painter;
pub mod pixel;
pub mod source;
pub mod surface;

pub use bounce::{Bounce, BounceStats, run_bounce};
pub use config::BounceConfig;
pub use encode::encode_table_image;
pub use foundation::error::{FbPaintError, FbPaintResult};
pub use foundation::geometry::PixelRect;
pub use painter::{ImagePainter, PaintStats};
pub use pixel::rgb::Rgb;
pub use pixel::rgba::{Rgba, combine};
pub use source::cursor::CURSOR;
pub use source::decoded::DecodedImage;
pub use source::table::TableImage;
pub use source::SourceImage;
pub use surface::framebuffer::FrameBuffer;
pub use surface::layout::{ChannelLayout, PixelLayout};
pub use surface::memory::MemorySurface;
pub use surface::Surface;
