//! Text measurement, truncation and encoding for PDF output

use crate::constants::DEFAULT_CHAR_WIDTH_RATIO;
use tracing::trace;

/// Estimate text width based on character count and font size
pub fn estimate_text_width(text: &str, font_size: f32) -> f32 {
    let char_count = text.chars().count() as f32;
    char_count * font_size * DEFAULT_CHAR_WIDTH_RATIO
}

/// Cut text down to what fits on one line of the given width
///
/// Only the first line of multi-line text is kept. Cells have a fixed
/// height, so text is clipped rather than wrapped.
pub fn fit_text(text: &str, max_width: f32, font_size: f32) -> String {
    let line = text.lines().next().unwrap_or("");

    if estimate_text_width(line, font_size) <= max_width {
        return line.to_string();
    }

    let char_width = font_size * DEFAULT_CHAR_WIDTH_RATIO;
    let max_chars = if char_width > 0.0 {
        (max_width / char_width).max(0.0) as usize
    } else {
        0
    };

    trace!(
        "Truncating {:?} to {} characters for width {}",
        line, max_chars, max_width
    );
    line.chars().take(max_chars).collect()
}

/// Encode text for a simple font using WinAnsiEncoding
///
/// Characters the encoding cannot represent become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            // Printable ASCII and Latin-1 map to the same byte
            ' '..='~' | '\u{a0}'..='\u{ff}' => ch as u8,
            '\u{20ac}' => 0x80,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201c}' => 0x93,
            '\u{201d}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\t' => b' ',
            _ => b'?',
        })
        .collect()
}
