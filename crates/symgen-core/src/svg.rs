//! SVG normalization: drop the `<svg ...>` wrapper and escape quotes.
//!
//! Slicing is offset-based (first `>` and the last six characters). Nothing is
//! validated; an input that is not a single `<svg ...>...</svg>` document
//! yields garbled output. Use [`is_well_formed_wrapper`] to flag such inputs.

/// Length of the closing `</svg>` tag.
const CLOSING_TAG_LEN: usize = "</svg>".len();

/// Returns the markup between the end of the opening tag and the last
/// [`CLOSING_TAG_LEN`] characters, verbatim.
pub fn strip_svg_wrapper(svg: &str) -> &str {
    let start = svg.find('>').map_or(0, |i| i + 1);
    let end = svg
        .char_indices()
        .rev()
        .nth(CLOSING_TAG_LEN - 1)
        .map_or(0, |(i, _)| i);
    if start >= end {
        return "";
    }
    &svg[start..end]
}

/// Escapes `"` so the markup can sit inside a double-quoted string literal.
pub fn escape_quotes(markup: &str) -> String {
    markup.replace('"', "\\\"")
}

/// Inner markup of `svg`, ready to embed in a string literal.
pub fn cleanup_svg(svg: &str) -> String {
    escape_quotes(strip_svg_wrapper(svg))
}

/// True when `svg` starts with an `<svg` tag and ends with `</svg>`, i.e. the
/// offsets used by [`strip_svg_wrapper`] land where they are meant to.
pub fn is_well_formed_wrapper(svg: &str) -> bool {
    svg.starts_with("<svg") && svg.ends_with("</svg>")
}
