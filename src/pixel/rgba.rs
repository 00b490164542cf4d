use crate::pixel::rgb::Rgb;

/// Blend one channel of a top color with alpha `alpha` over a bottom channel.
///
/// Each term is truncated separately:
/// `top * alpha / 255 + bottom * (255 - alpha) / 255`. Output must stay
/// pixel-identical to existing fixed-point renderings, so no rounding.
pub const fn combine(alpha: u8, top: u8, bottom: u8) -> u8 {
    let alpha = alpha as u16;
    let top_part = top as u16 * alpha / 255;
    let bottom_part = bottom as u16 * (255 - alpha) / 255;
    (top_part + bottom_part) as u8
}

/// An RGB color with straight (non-premultiplied) alpha.
///
/// Null whenever its RGB base is null; a null value always has alpha 0.
#[derive(Clone, Copy, Debug, Default)]
pub struct Rgba {
    rgb: Rgb,
    alpha: u8,
}

impl Rgba {
    /// The null pixel, fully transparent.
    pub const NULL: Rgba = Rgba {
        rgb: Rgb::NULL,
        alpha: 0,
    };

    /// Create a non-null color.
    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            rgb: Rgb::new(red, green, blue),
            alpha,
        }
    }

    /// Attach an alpha value to `rgb`. A null `rgb` always yields alpha 0.
    pub const fn from_rgb(rgb: Rgb, alpha: u8) -> Self {
        let alpha = if rgb.is_null() { 0 } else { alpha };
        Self { rgb, alpha }
    }

    /// The RGB base color.
    pub const fn rgb(self) -> Rgb {
        self.rgb
    }

    /// Alpha channel.
    pub const fn alpha(self) -> u8 {
        self.alpha
    }

    /// Return `true` when this value carries no pixel data.
    pub const fn is_null(self) -> bool {
        self.rgb.is_null()
    }

    /// Return `true` for alpha 255.
    pub const fn is_opaque(self) -> bool {
        self.alpha == u8::MAX
    }

    /// Return `true` for alpha 0.
    pub const fn is_transparent(self) -> bool {
        self.alpha == 0
    }

    /// The opaque color produced by displaying this pixel over `background`.
    ///
    /// Null pixels leave the background unchanged and opaque pixels replace it
    /// verbatim. A null background blends as black.
    pub fn combined_over(self, background: Rgb) -> Rgb {
        if self.is_null() {
            return background;
        }
        if self.is_opaque() {
            return self.rgb;
        }
        Rgb::new(
            combine(self.alpha, self.rgb.red(), background.red()),
            combine(self.alpha, self.rgb.green(), background.green()),
            combine(self.alpha, self.rgb.blue(), background.blue()),
        )
    }
}

impl PartialEq for Rgba {
    fn eq(&self, other: &Self) -> bool {
        if self.is_null() || other.is_null() {
            return self.is_null() && other.is_null();
        }
        self.rgb == other.rgb && self.alpha == other.alpha
    }
}

impl Eq for Rgba {}

/// An `Rgba` matches an `Rgb` only when both are null, or when it is opaque
/// with identical channels.
impl PartialEq<Rgb> for Rgba {
    fn eq(&self, other: &Rgb) -> bool {
        if self.is_null() || other.is_null() {
            return self.is_null() && other.is_null();
        }
        self.is_opaque() && self.rgb == *other
    }
}

impl From<[u8; 4]> for Rgba {
    fn from([red, green, blue, alpha]: [u8; 4]) -> Self {
        Self::new(red, green, blue, alpha)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pixel/rgba.rs"]
mod tests;
