//! Operand validation
//!
//! Every operand is checked before it reaches a backend. The default
//! [`DecimalValidator`] accepts plain and scientific decimal notation.

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Optional sign, digits with an optional decimal point, optional exponent.
static NUMBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$")
        .expect("number pattern is a valid regex")
});

/// Decides whether a piece of text is a number the adapter may operate on.
///
/// Implementations must be pure: the same input always yields the same answer.
pub trait NumberValidator: fmt::Debug + Send + Sync {
    fn is_valid(&self, value: &str) -> bool;
}

/// Accepts decimal text such as `"42"`, `"-0.5"`, `".25"` or `"1.5e-3"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecimalValidator;

impl NumberValidator for DecimalValidator {
    fn is_valid(&self, value: &str) -> bool {
        NUMBER_PATTERN.is_match(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0")]
    #[case("42")]
    #[case("-17")]
    #[case("+3")]
    #[case("3.14")]
    #[case("-0.001")]
    #[case(".5")]
    #[case("5.")]
    #[case("1e10")]
    #[case("1.5E-3")]
    #[case("-2.5e+7")]
    fn accepts_decimal_text(#[case] value: &str) {
        assert!(DecimalValidator.is_valid(value), "{value} should be valid");
    }

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("1.2.3")]
    #[case("--1")]
    #[case("1e")]
    #[case(".")]
    #[case(" 1")]
    #[case("0x1F")]
    #[case("NaN")]
    #[case("inf")]
    #[case("1,000")]
    fn rejects_non_numeric_text(#[case] value: &str) {
        assert!(!DecimalValidator.is_valid(value), "{value} should be invalid");
    }
}
