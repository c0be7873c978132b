//! Decimal price strings to token base units.

use crate::error::X402Error;

/// Convert a non-negative decimal price string (e.g. `"0.01"`) into the
/// token's integer base-unit representation, rendered as a decimal string.
///
/// The fractional part is truncated (never rounded) to `decimals` digits,
/// matching fixed-point token semantics. The result is built by digit
/// concatenation (`whole * 10^decimals + padded_fraction`), so arbitrarily
/// large prices convert without precision loss.
pub fn to_base_units(price: &str, decimals: u32) -> Result<String, X402Error> {
    let (whole, frac) = match price.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (price, ""),
    };

    // A second '.' lands in `frac` and fails the digit check below.
    if !whole.chars().all(|c| c.is_ascii_digit()) {
        return Err(X402Error::MalformedAmount(format!(
            "invalid price '{price}': whole part must be digits"
        )));
    }
    if !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(X402Error::MalformedAmount(format!(
            "invalid price '{price}': fractional part must be digits"
        )));
    }

    let whole = if whole.is_empty() { "0" } else { whole };
    let frac = &frac[..frac.len().min(decimals as usize)];

    let mut units = String::with_capacity(whole.len() + decimals as usize);
    units.push_str(whole);
    units.push_str(frac);
    for _ in 0..(decimals as usize - frac.len()) {
        units.push('0');
    }

    let trimmed = units.trim_start_matches('0');
    Ok(if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    })
}
