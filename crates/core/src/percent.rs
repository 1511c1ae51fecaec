//! Rounded integer percentages shared by scoring and aggregation.

/// `round(100 × part / total)`, clamped to 100.
///
/// Returns 0 if `total` is 0. Halves round up, so 1 of 8 is 13.
pub fn rounded_percentage(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (part as f64 / total as f64 * 100.0).round() as u32;
    pct.min(100) as u8
}
