//! Rounding strategies
//!
//! The strategy decides how a value that sits exactly halfway between two
//! representable results at the target precision is resolved. Values that are
//! not on a tie always round to the nearest result.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "decimal")]
use rust_decimal::{Decimal, RoundingStrategy as DecimalRounding};
use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};

/// Significant digits kept when snapping a scaled float before rounding.
///
/// `1.005 * 100` is `100.49999999999999` in binary; snapping to 15 significant
/// digits turns it back into the tie the caller wrote.
const PRE_ROUND_DIGITS: usize = 14;

/// Scaled magnitude below which 15 significant digits still cover every
/// integer digit, so snapping cannot drop a real one.
const PRE_ROUND_LIMIT: f64 = 1e15;

/// Magnitude above which every `f64` is already an integer.
const EXACT_INTEGER_LIMIT: f64 = 4_503_599_627_370_496.0; // 2^52

/// Tie-breaking rule applied when a result is cut down to a target precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoundingStrategy {
    /// Ties round away from zero.
    #[default]
    #[serde(alias = "half_up", alias = "HALF_UP")]
    HalfUp,
    /// Ties round toward zero.
    #[serde(alias = "half_down", alias = "HALF_DOWN")]
    HalfDown,
    /// Ties round to the neighbour with an even last digit.
    #[serde(alias = "half_even", alias = "HALF_EVEN")]
    HalfEven,
    /// Ties round to the neighbour with an odd last digit.
    #[serde(alias = "half_odd", alias = "HALF_ODD")]
    HalfOdd,
}

impl RoundingStrategy {
    pub const ALL: [Self; 4] = [Self::HalfUp, Self::HalfDown, Self::HalfEven, Self::HalfOdd];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HalfUp => "half-up",
            Self::HalfDown => "half-down",
            Self::HalfEven => "half-even",
            Self::HalfOdd => "half-odd",
        }
    }

    /// Whether a tie whose truncated neighbour has `last_digit_odd` parity
    /// should move away from zero.
    const fn breaks_tie_away(self, last_digit_odd: bool) -> bool {
        match self {
            Self::HalfUp => true,
            Self::HalfDown => false,
            Self::HalfEven => last_digit_odd,
            Self::HalfOdd => !last_digit_odd,
        }
    }

    /// Rounds `value` to `precision` fractional digits.
    ///
    /// Non-finite values, and values too large to carry a fraction at that
    /// precision, are returned unchanged.
    pub fn round_f64(self, value: f64, precision: u32) -> f64 {
        if !value.is_finite() {
            return value;
        }

        let factor = 10_f64.powi(precision.min(i32::MAX as u32) as i32);
        let scaled = value * factor;
        if !scaled.is_finite() || scaled.abs() >= EXACT_INTEGER_LIMIT {
            return value;
        }

        let scaled = if scaled.abs() < PRE_ROUND_LIMIT {
            pre_round(scaled)
        } else {
            scaled
        };
        let truncated = scaled.trunc();
        let fraction = (scaled - truncated).abs();
        let away = if fraction > 0.5 {
            true
        } else if fraction < 0.5 {
            false
        } else {
            self.breaks_tie_away(truncated % 2.0 != 0.0)
        };

        let rounded = if away {
            truncated + scaled.signum()
        } else {
            truncated
        };
        rounded / factor
    }

    /// Rounds a decimal to `precision` fractional digits.
    #[cfg(feature = "decimal")]
    pub fn round_decimal(self, value: Decimal, precision: u32) -> Decimal {
        match self {
            Self::HalfUp => {
                value.round_dp_with_strategy(precision, DecimalRounding::MidpointAwayFromZero)
            }
            Self::HalfDown => {
                value.round_dp_with_strategy(precision, DecimalRounding::MidpointTowardZero)
            }
            Self::HalfEven => {
                value.round_dp_with_strategy(precision, DecimalRounding::MidpointNearestEven)
            }
            Self::HalfOdd => round_half_odd(value, precision),
        }
    }
}

/// `rust_decimal` has no half-odd strategy, so the tie is resolved by hand.
#[cfg(feature = "decimal")]
fn round_half_odd(value: Decimal, precision: u32) -> Decimal {
    if precision >= value.scale() {
        return value;
    }

    let truncated = value.round_dp_with_strategy(precision, DecimalRounding::ToZero);
    let remainder = (value - truncated).abs();
    if remainder.is_zero() {
        return truncated;
    }

    // precision < scale <= 28, so the unit is representable
    let unit = Decimal::new(1, precision);
    let half = unit / Decimal::from(2);
    let away = match remainder.cmp(&half) {
        core::cmp::Ordering::Greater => true,
        core::cmp::Ordering::Less => false,
        core::cmp::Ordering::Equal => {
            let units = (truncated / unit).trunc();
            let last_digit_odd = !(units % Decimal::from(2)).is_zero();
            RoundingStrategy::HalfOdd.breaks_tie_away(last_digit_odd)
        }
    };

    if !away {
        truncated
    } else if value.is_sign_negative() {
        truncated - unit
    } else {
        truncated + unit
    }
}

fn pre_round(value: f64) -> f64 {
    format!("{value:.digits$e}", digits = PRE_ROUND_DIGITS)
        .parse()
        .unwrap_or(value)
}

impl fmt::Display for RoundingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoundingStrategy {
    type Err = MathError;

    /// Accepts `half-up`, `half_up`, `HALF_UP` and the like.
    fn from_str(s: &str) -> MathResult<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == normalized)
            .ok_or_else(|| {
                MathError::configuration(format!(
                    "unknown rounding strategy '{s}', expected one of half-up, half-down, half-even, half-odd"
                ))
            })
    }
}
