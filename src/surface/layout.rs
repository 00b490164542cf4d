use crate::pixel::rgb::Rgb;

/// Bit position and width of one color channel inside a packed pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChannelLayout {
    /// Bit offset from the least significant bit.
    pub offset: u32,
    /// Number of bits.
    pub length: u32,
}

impl ChannelLayout {
    /// Create a channel layout.
    pub const fn new(offset: u32, length: u32) -> Self {
        Self { offset, length }
    }

    fn max_value(self) -> u64 {
        if self.length == 0 {
            0
        } else {
            (1u64 << self.length.min(32)) - 1
        }
    }

    fn pack(self, value: u8) -> u32 {
        let max = self.max_value();
        if max == 0 || self.offset >= 32 {
            return 0;
        }
        let scaled = (u64::from(value) * max + 127) / 255;
        ((scaled << self.offset) & u64::from(u32::MAX)) as u32
    }

    fn unpack(self, packed: u32) -> u8 {
        let max = self.max_value();
        if max == 0 || self.offset >= 32 {
            return 0;
        }
        let raw = (u64::from(packed) >> self.offset) & max;
        ((raw * 255 + max / 2) / max) as u8
    }
}

/// Geometry and native color packing of a pixel buffer in memory.
///
/// Pixels are `bytes_per_pixel` wide, stored in host byte order, and rows are
/// `line_length` bytes apart. `x_offset`/`y_offset` select the visible
/// window inside a larger virtual buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PixelLayout {
    /// Visible width in pixels.
    pub width: usize,
    /// Visible height in pixels.
    pub height: usize,
    /// Bytes occupied by a single pixel (2, 3 or 4).
    pub bytes_per_pixel: usize,
    /// Bytes between the starts of consecutive rows.
    pub line_length: usize,
    /// Horizontal pan of the visible window, in pixels.
    pub x_offset: usize,
    /// Vertical pan of the visible window, in pixels.
    pub y_offset: usize,
    /// Red channel position.
    pub red: ChannelLayout,
    /// Green channel position.
    pub green: ChannelLayout,
    /// Blue channel position.
    pub blue: ChannelLayout,
}

impl PixelLayout {
    /// 32-bit XRGB8888 layout with tightly packed rows.
    pub fn xrgb8888(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            bytes_per_pixel: 4,
            line_length: width * 4,
            x_offset: 0,
            y_offset: 0,
            red: ChannelLayout::new(16, 8),
            green: ChannelLayout::new(8, 8),
            blue: ChannelLayout::new(0, 8),
        }
    }

    /// Return `true` for pixel sizes this crate can read and write.
    pub fn is_supported(&self) -> bool {
        matches!(self.bytes_per_pixel, 2..=4)
    }

    /// Byte offset of `(x, y)` inside a buffer of `buffer_len` bytes.
    ///
    /// `None` when the coordinate is outside the visible area, the layout is
    /// unsupported, or the pixel would extend past the buffer.
    pub fn byte_offset(&self, x: usize, y: usize, buffer_len: usize) -> Option<usize> {
        if x >= self.width || y >= self.height || !self.is_supported() {
            return None;
        }
        let col = x
            .checked_add(self.x_offset)?
            .checked_mul(self.bytes_per_pixel)?;
        let row = y
            .checked_add(self.y_offset)?
            .checked_mul(self.line_length)?;
        let offset = col.checked_add(row)?;
        let end = offset.checked_add(self.bytes_per_pixel)?;
        (end <= buffer_len).then_some(offset)
    }

    /// Pack `color` into a native pixel value. Null packs as black.
    pub fn pack(&self, color: Rgb) -> u32 {
        self.red.pack(color.red()) | self.green.pack(color.green()) | self.blue.pack(color.blue())
    }

    /// Unpack a native pixel value.
    pub fn unpack(&self, packed: u32) -> Rgb {
        Rgb::new(
            self.red.unpack(packed),
            self.green.unpack(packed),
            self.blue.unpack(packed),
        )
    }

    /// Decode the pixel stored in `bytes` (exactly `bytes_per_pixel` long).
    pub fn read_bytes(&self, bytes: &[u8]) -> Rgb {
        let mut word = [0u8; 4];
        let n = bytes.len().min(4);
        if cfg!(target_endian = "little") {
            word[..n].copy_from_slice(&bytes[..n]);
        } else {
            word[4 - n..].copy_from_slice(&bytes[..n]);
        }
        self.unpack(u32::from_ne_bytes(word))
    }

    /// Encode `color` into `out` (exactly `bytes_per_pixel` long).
    pub fn write_bytes(&self, color: Rgb, out: &mut [u8]) {
        let word = self.pack(color).to_ne_bytes();
        let n = out.len().min(4);
        if cfg!(target_endian = "little") {
            out[..n].copy_from_slice(&word[..n]);
        } else {
            out[..n].copy_from_slice(&word[4 - n..]);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/layout.rs"]
mod tests;
