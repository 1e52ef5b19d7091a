//! Helpers over decimal text
//!
//! Operands travel between backends as decimal text. These helpers read the
//! shape of that text (precision, sign, dotted versions) and move the decimal
//! point without going through a float.

use std::iter;

/// Number of digits after the decimal point, or 0 when there is none.
///
/// Digits are counted up to the first non-digit, so an exponent suffix
/// (`"1.25e3"`) or a further version component (`"1.30.5"`) is not counted.
pub fn precision(value: &str) -> u32 {
    value.split_once('.').map_or(0, |(_, fraction)| {
        fraction.bytes().take_while(u8::is_ascii_digit).count() as u32
    })
}

/// Sign check on the text itself, so it holds at any precision.
pub fn is_negative(value: &str) -> bool {
    value.trim_start().starts_with('-')
}

/// More than one decimal point, as in `"1.30.5"`.
pub fn is_version_like(value: &str) -> bool {
    value.bytes().filter(|&b| b == b'.').count() > 1
}

/// A dotted version made only of digit components, e.g. `"0.90.01"`.
pub fn is_version(value: &str) -> bool {
    is_version_like(value)
        && value
            .split('.')
            .all(|component| !component.is_empty() && component.bytes().all(|b| b.is_ascii_digit()))
}

/// Moves the decimal point `places` digits to the right and drops whatever
/// fraction is left, so `shift_point("6.66", 1) == Some(66)`.
///
/// Returns `None` for text that is not plain `[sign]digits[.digits]` or that
/// does not fit in an `i128`.
pub fn shift_point(value: &str, places: u32) -> Option<i128> {
    let (negative, unsigned) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut digits = String::with_capacity(whole.len() + places as usize);
    digits.push_str(whole);
    digits.extend(fraction.chars().chain(iter::repeat('0')).take(places as usize));
    if digits.is_empty() {
        return None;
    }

    let magnitude: i128 = digits.parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Inverse of [`shift_point`]: divides `value` by `10^places` and renders
/// the result without trailing fractional zeros.
pub fn insert_point(value: i128, places: u32) -> String {
    if places == 0 {
        return value.to_string();
    }

    let width = places as usize;
    let digits = value.unsigned_abs().to_string();
    let padded = format!("{digits:0>len$}", len = width + 1);
    let (whole, fraction) = padded.split_at(padded.len() - width);
    let fraction = fraction.trim_end_matches('0');

    let mut rendered = String::with_capacity(padded.len() + 2);
    if value < 0 {
        rendered.push('-');
    }
    rendered.push_str(whole);
    if !fraction.is_empty() {
        rendered.push('.');
        rendered.push_str(fraction);
    }
    rendered
}

/// Shortest decimal text for a finite float; never uses an exponent and
/// never renders a negative zero.
pub fn format_float(value: f64) -> String {
    if value == 0.0 {
        "0".to_owned()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("10", 0)]
    #[case("1.04", 2)]
    #[case("-0.125", 3)]
    #[case("7.", 0)]
    #[case("1.25e3", 2)]
    #[case("0.90.01", 2)]
    fn counts_fraction_digits(#[case] value: &str, #[case] expected: u32) {
        assert_eq!(precision(value), expected);
    }

    #[test]
    fn version_detection_needs_two_dots() {
        assert!(is_version_like("0.90.01"));
        assert!(!is_version_like("0.90"));
        assert!(is_version("1.30.5"));
        assert!(!is_version("1..5"));
        assert!(!is_version("1.3a.5"));
    }

    #[rstest]
    #[case("4.4", 1, Some(44))]
    #[case("6.66", 1, Some(66))]
    #[case("12", 2, Some(1200))]
    #[case("-0.5", 3, Some(-500))]
    #[case("1e3", 0, None)]
    #[case("", 0, None)]
    fn shifts_point_and_truncates(#[case] value: &str, #[case] places: u32, #[case] expected: Option<i128>) {
        assert_eq!(shift_point(value, places), expected);
    }

    #[rstest]
    #[case(22, 1, "2.2")]
    #[case(20, 1, "2")]
    #[case(5, 2, "0.05")]
    #[case(-125, 2, "-1.25")]
    #[case(7, 0, "7")]
    fn inserts_point_and_trims(#[case] value: i128, #[case] places: u32, #[case] expected: &str) {
        assert_eq!(insert_point(value, places), expected);
    }

    #[test]
    fn formats_floats_without_exponent_or_negative_zero() {
        assert_eq!(format_float(24.0), "24");
        assert_eq!(format_float(-0.0), "0");
        assert_eq!(format_float(766_217_865.41), "766217865.41");
        assert_eq!(format_float(1e21), "1000000000000000000000");
    }
}
