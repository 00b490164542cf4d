//! Built-in 14x14 arrow cursor.

use crate::source::table::TableImage;

/// Black outline, transparent background, translucent red fill, dark tip.
pub const CURSOR_PALETTE: [[u8; 4]; 4] = [
    [0, 0, 0, 255],
    [0, 255, 41, 0],
    [214, 27, 27, 153],
    [0, 0, 0, 222],
];

#[rustfmt::skip]
pub const CURSOR_PIXELS: [u8; 196] = [
    0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    0, 2, 3, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    0, 3, 2, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1,
    1, 0, 0, 2, 2, 0, 0, 0, 1, 1, 1, 1, 1, 1,
    1, 1, 0, 2, 2, 2, 2, 0, 0, 0, 1, 1, 1, 1,
    1, 1, 0, 0, 2, 2, 2, 2, 2, 0, 0, 0, 1, 1,
    1, 1, 1, 0, 2, 2, 2, 2, 2, 2, 2, 0, 0, 0,
    1, 1, 1, 0, 0, 2, 2, 2, 2, 2, 2, 0, 0, 1,
    1, 1, 1, 1, 0, 2, 2, 2, 2, 2, 0, 0, 1, 1,
    1, 1, 1, 1, 0, 0, 2, 2, 2, 2, 0, 0, 1, 1,
    1, 1, 1, 1, 1, 0, 2, 2, 0, 0, 2, 0, 0, 1,
    1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 2, 0, 0,
    1, 1, 1, 1, 1, 1, 0, 0, 1, 1, 0, 0, 0, 1,
    1, 1, 1, 1, 1, 1, 0, 1, 1, 1, 1, 0, 1, 1,
];

/// The default image for `fbpaint bounce`.
pub const CURSOR: TableImage = TableImage::new(14, 14, &CURSOR_PALETTE, &CURSOR_PIXELS);
