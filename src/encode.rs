//! Generate Rust source that embeds an image as a [`crate::TableImage`].

use std::fmt::Write as _;

use crate::foundation::error::{FbPaintError, FbPaintResult};
use crate::source::SourceImage;

/// Largest palette a table image can index with `u8`.
pub const MAX_PALETTE_LEN: usize = 256;

/// Render `image` as Rust source defining `{name}_PALETTE`, `{name}_PIXELS` and
/// a `{name}` [`crate::TableImage`] constant.
///
/// Colors are numbered in first-seen, row-major order; null pixels encode as
/// fully transparent black. `source_label` (typically the input file name) is
/// mentioned in the header comment.
pub fn encode_table_image<I: SourceImage + ?Sized>(
    name: &str,
    image: &I,
    source_label: &str,
) -> FbPaintResult<String> {
    validate_const_name(name)?;

    let (width, height) = (image.width(), image.height());
    let mut palette: Vec<[u8; 4]> = Vec::new();
    let mut pixels: Vec<u8> = Vec::with_capacity(width.saturating_mul(height));
    for y in 0..height {
        for x in 0..width {
            let px = image.rgba(x, y);
            let color = match px.rgb().channels() {
                Some([r, g, b]) => [r, g, b, px.alpha()],
                None => [0, 0, 0, 0],
            };
            let idx = match palette.iter().position(|c| *c == color) {
                Some(i) => i,
                None => {
                    if palette.len() == MAX_PALETTE_LEN {
                        return Err(FbPaintError::encode(format!(
                            "image has more than {MAX_PALETTE_LEN} distinct colors"
                        )));
                    }
                    palette.push(color);
                    palette.len() - 1
                }
            };
            pixels.push(idx as u8);
        }
    }

    tracing::debug!(name, width, height, colors = palette.len(), "encoded table image");
    Ok(render_source(name, width, height, &palette, &pixels, source_label))
}

fn validate_const_name(name: &str) -> FbPaintResult<()> {
    let mut chars = name.chars();
    let starts_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_uppercase() || c == '_');
    let rest_ok = chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_');
    if starts_ok && rest_ok && name != "_" {
        Ok(())
    } else {
        Err(FbPaintError::validation(format!(
            "'{name}' is not an UPPER_SNAKE_CASE constant name"
        )))
    }
}

fn render_source(
    name: &str,
    width: usize,
    height: usize,
    palette: &[[u8; 4]],
    pixels: &[u8],
    source_label: &str,
) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "// Generated by `fbpaint encode` from {source_label}.");
    let _ = writeln!(out);
    let _ = writeln!(out, "use fbpaint::TableImage;");
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "pub const {name}_PALETTE: [[u8; 4]; {}] = [",
        palette.len()
    );
    for [r, g, b, a] in palette {
        let _ = writeln!(out, "    [{r}, {g}, {b}, {a}],");
    }
    let _ = writeln!(out, "];");
    let _ = writeln!(out);

    let _ = writeln!(out, "#[rustfmt::skip]");
    let _ = writeln!(out, "pub const {name}_PIXELS: [u8; {}] = [", pixels.len());
    for row in pixels.chunks(width.max(1)) {
        let line = row
            .iter()
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(out, "    {line},");
    }
    let _ = writeln!(out, "];");
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "pub const {name}: TableImage = TableImage::new({width}, {height}, &{name}_PALETTE, &{name}_PIXELS);"
    );
    out
}

#[cfg(test)]
#[path = "../tests/unit/encode.rs"]
mod tests;
