/// Convert a zero-based column index to spreadsheet letters
///
/// Works for any width: `0 -> A`, `25 -> Z`, `26 -> AA`, `701 -> ZZ`, `702 -> AAA`.
///
/// # Examples
/// ```
/// use roster_bridge::column::column_letter;
///
/// assert_eq!(column_letter(0), "A");
/// assert_eq!(column_letter(27), "AB");
/// assert_eq!(column_letter(702), "AAA");
/// ```
pub fn column_letter(index: usize) -> String {
    let mut name = Vec::new();
    let mut n = index + 1;

    while n > 0 {
        n -= 1;
        name.push(b'A' + (n % 26) as u8);
        n /= 26;
    }

    name.iter().rev().map(|&b| b as char).collect()
}

/// A1 range covering columns `A` through the `width`-th column of one row
///
/// A zero width is treated as a single column.
pub fn row_range(row: u32, width: usize) -> String {
    let last = column_letter(width.saturating_sub(1));
    format!("A{row}:{last}{row}")
}
