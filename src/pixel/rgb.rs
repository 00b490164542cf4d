use std::fmt;

/// An opaque RGB color, or the null value meaning "no pixel data".
///
/// Null is tracked with an explicit flag because every channel combination,
/// including all-zero black, is a real color.
#[derive(Clone, Copy)]
pub struct Rgb {
    null: bool,
    red: u8,
    green: u8,
    blue: u8,
}

impl Rgb {
    /// The null pixel.
    pub const NULL: Rgb = Rgb {
        null: true,
        red: 0,
        green: 0,
        blue: 0,
    };

    /// Non-null black.
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    /// Create a non-null color.
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self {
            null: false,
            red,
            green,
            blue,
        }
    }

    /// Return `true` when this value carries no pixel data.
    pub const fn is_null(self) -> bool {
        self.null
    }

    /// Red channel (0 for null).
    pub const fn red(self) -> u8 {
        self.red
    }

    /// Green channel (0 for null).
    pub const fn green(self) -> u8 {
        self.green
    }

    /// Blue channel (0 for null).
    pub const fn blue(self) -> u8 {
        self.blue
    }

    /// Channels as `[r, g, b]`, or `None` for null.
    pub const fn channels(self) -> Option<[u8; 3]> {
        if self.null {
            None
        } else {
            Some([self.red, self.green, self.blue])
        }
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::NULL
    }
}

impl PartialEq for Rgb {
    fn eq(&self, other: &Self) -> bool {
        match (self.null, other.null) {
            (true, true) => true,
            (false, false) => {
                self.red == other.red && self.green == other.green && self.blue == other.blue
            }
            _ => false,
        }
    }
}

impl Eq for Rgb {}

impl From<[u8; 3]> for Rgb {
    fn from([red, green, blue]: [u8; 3]) -> Self {
        Self::new(red, green, blue)
    }
}

impl fmt::Debug for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.null {
            f.write_str("Rgb(null)")
        } else {
            write!(f, "Rgb({}, {}, {})", self.red, self.green, self.blue)
        }
    }
}
