//! Unit conversion utilities.
//!
//! Grid descriptors carry sizes in screen pixels; SpreadsheetML wants points for
//! row heights, character widths for columns and EMUs for drawing anchors.

pub const EMUS_PER_INCH: i64 = 914_400;

/// Screen resolution assumed for pixel sizes.
pub const DEFAULT_DPI: u32 = 96;

/// Maximum digit width of the default font (Calibri 11) in pixels.
const MAX_DIGIT_WIDTH_PX: f64 = 7.0;

/// Cell padding Excel adds around column content, in pixels.
const COLUMN_PADDING_PX: f64 = 5.0;

#[inline]
pub fn px_to_emu(px: u32, dpi: u32) -> i64 {
    ((px as f64) * EMUS_PER_INCH as f64 / dpi as f64) as i64
}

#[inline]
pub fn px_to_emu_96(px: u32) -> i64 {
    px_to_emu(px, DEFAULT_DPI)
}

#[inline]
pub fn px_to_pt(px: f64) -> f64 {
    px * 72.0 / DEFAULT_DPI as f64
}

/// Convert a pixel width into an Excel column width (characters of the default font).
///
/// Widths are truncated to two decimals the way Excel stores them.
pub fn px_to_column_width(px: f64) -> f64 {
    let chars = ((px - COLUMN_PADDING_PX) / MAX_DIGIT_WIDTH_PX * 100.0 + 0.5).trunc() / 100.0;
    chars.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_px_to_emu() {
        assert_eq!(px_to_emu_96(1), 9_525);
        assert_eq!(px_to_emu_96(96), EMUS_PER_INCH);
        assert_eq!(px_to_emu(72, 72), EMUS_PER_INCH);
    }

    #[test]
    fn test_px_to_pt() {
        assert_eq!(px_to_pt(20.0), 15.0);
        assert_eq!(px_to_pt(0.0), 0.0);
    }

    #[test]
    fn test_px_to_column_width() {
        assert_eq!(px_to_column_width(75.0), 10.0);
        assert_eq!(px_to_column_width(64.0), 8.43);
        assert_eq!(px_to_column_width(2.0), 0.0);
    }
}
