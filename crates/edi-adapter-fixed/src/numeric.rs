//! Implied-decimal value unpacking
//!
//! NOTFIS/OCOREN monetary and quantity fields carry no decimal separator:
//! the last two characters are the fractional part (`"000001050"` is
//! `10.50`).

/// Unpack a fixed-point decimal with an implied 2-decimal suffix.
///
/// Blank or unparseable input unpacks to `0.00`; a value shorter than two
/// characters is all fraction.
pub fn unpack_decimal(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    // split two characters (not bytes) from the end
    let split = trimmed.char_indices().rev().nth(1).map_or(0, |(i, _)| i);
    let (integral, fraction) = trimmed.split_at(split);
    format!("{integral}.{fraction}").parse().unwrap_or(0.0)
}
