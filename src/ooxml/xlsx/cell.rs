//! A1-style cell references.

/// Number of columns in a worksheet (`A` to `XFD`).
pub const MAX_COLUMNS: u32 = 16_384;

/// Number of rows in a worksheet.
pub const MAX_ROWS: u32 = 1_048_576;

/// Convert a 1-based column number to Excel column letters (e.g., 1 -> "A", 27 -> "AA").
pub fn column_to_letters(col: u32) -> String {
    let mut letters = String::new();
    let mut col = col;

    while col > 0 {
        col -= 1;
        let letter = ((col % 26) as u8 + b'A') as char;
        letters.insert(0, letter);
        col /= 26;
    }

    letters
}

/// A1 reference of a 1-based (row, column) pair.
pub fn cell_reference(row: u32, col: u32) -> String {
    let mut reference = column_to_letters(col);
    reference.push_str(itoa::Buffer::new().format(row));
    reference
}

/// A1 range reference, collapsed to a single cell when both corners match.
pub fn range_reference(first: (u32, u32), last: (u32, u32)) -> String {
    if first == last {
        return cell_reference(first.0, first.1);
    }
    format!(
        "{}:{}",
        cell_reference(first.0, first.1),
        cell_reference(last.0, last.1)
    )
}
