//! Special functions and integer kernels for the native backend
//!
//! Plain `f64`/`u64` functions with no knowledge of decimal text. The gamma
//! family uses a rational approximation on `[1, 2)` for small arguments and a
//! Stirling series for large ones.

use core::cmp::Ordering;

use thiserror::Error;

// ============================================================================
// Constants
// ============================================================================

/// Euler–Mascheroni constant.
const EULER_GAMMA: f64 = 0.577_215_664_901_532_860_606_512_090;

/// `ln(2π) / 2`
const HALF_LN_TWO_PI: f64 = 0.918_938_533_204_672_741_780_329_736_405_62;

/// Largest argument whose gamma value fits in an `f64`.
pub const GAMMA_MAX_ARGUMENT: f64 = 171.624;

/// Below this the near-zero expansion `1 / (x(1 + γx))` is used.
const SMALL_ARGUMENT: f64 = 0.001;

/// From here on the Stirling series is accurate to double precision.
const STIRLING_THRESHOLD: f64 = 12.0;

/// Numerator coefficients of the rational approximation on `[1, 2)`.
const NUMERATOR: [f64; 8] = [
    -1.716_185_138_865_494_925_338_11e0,
    2.476_565_080_557_591_991_083_14e1,
    -3.798_042_564_709_456_350_975_77e2,
    6.293_311_553_128_184_426_610_52e2,
    8.669_662_027_904_132_112_950_64e2,
    -3.145_127_296_884_836_752_543_57e4,
    -3.614_441_341_869_117_298_070_69e4,
    6.645_614_382_024_054_406_278_55e4,
];

/// Denominator coefficients of the rational approximation on `[1, 2)`.
const DENOMINATOR: [f64; 8] = [
    -3.084_023_001_197_389_752_543_53e1,
    3.153_506_269_796_041_615_291_44e2,
    -1.015_156_367_490_219_141_661_46e3,
    -3.107_771_671_572_311_094_404_44e3,
    2.253_811_842_098_015_103_301_12e4,
    4.755_846_277_527_881_107_678_15e3,
    -1.346_599_598_649_693_063_924_56e5,
    -1.151_322_596_755_534_834_972_11e5,
];

/// Stirling correction coefficients `B₂ₖ / (2k(2k-1))`.
const STIRLING: [f64; 8] = [
    1.0 / 12.0,
    -1.0 / 360.0,
    1.0 / 1260.0,
    -1.0 / 1680.0,
    1.0 / 1188.0,
    -691.0 / 360_360.0,
    1.0 / 156.0,
    -3617.0 / 122_400.0,
];

/// Argument outside the domain of a special function.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainError {
    #[error("must be positive")]
    NotPositive,

    #[error("number too large")]
    TooLarge,
}

// ============================================================================
// Gamma Function
// ============================================================================

/// Γ(x) for `0 < x <= 171.624`.
pub fn gamma(x: f64) -> Result<f64, DomainError> {
    if x.is_nan() || x <= 0.0 {
        return Err(DomainError::NotPositive);
    }
    if x > GAMMA_MAX_ARGUMENT {
        return Err(DomainError::TooLarge);
    }

    if x < SMALL_ARGUMENT {
        return Ok(1.0 / (x * (1.0 + EULER_GAMMA * x)));
    }

    if x < STIRLING_THRESHOLD {
        return Ok(gamma_rational(x));
    }

    Ok(log_gamma(x)?.exp())
}

/// Reduces `x` into `[1, 2)`, evaluates the rational approximation there and
/// undoes the reduction.
fn gamma_rational(x: f64) -> f64 {
    let below_one = x < 1.0;
    let (mut y, shifts) = if below_one {
        (x + 1.0, 0)
    } else {
        let shifts = x.floor() as u32 - 1;
        (x - f64::from(shifts), shifts)
    };

    let z = y - 1.0;
    let (numerator, denominator) = NUMERATOR
        .iter()
        .zip(DENOMINATOR.iter())
        .fold((0.0, 1.0), |(num, den), (p, q)| ((num + p) * z, den * z + q));
    let mut result = numerator / denominator + 1.0;

    if below_one {
        // Γ(x) = Γ(x + 1) / x
        result /= y - 1.0;
    } else {
        // Γ(y + n) = Γ(y) · y · (y + 1) ⋯ (y + n - 1)
        for _ in 0..shifts {
            result *= y;
            y += 1.0;
        }
    }

    result
}

/// ln Γ(x) for `x > 0`.
pub fn log_gamma(x: f64) -> Result<f64, DomainError> {
    if x.is_nan() || x <= 0.0 {
        return Err(DomainError::NotPositive);
    }

    if x < STIRLING_THRESHOLD {
        return Ok(gamma(x)?.abs().ln());
    }

    let z = 1.0 / (x * x);
    let sum = STIRLING[..7]
        .iter()
        .rev()
        .fold(STIRLING[7], |acc, c| acc * z + c);
    let series = sum / x;

    Ok((x - 0.5) * x.ln() - x + HALF_LN_TWO_PI + series)
}

// ============================================================================
// Primes
// ============================================================================

/// Trial division by every candidate in `[2, ⌊√n⌋]`.
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    (2..=n.isqrt()).all(|divisor| n % divisor != 0)
}

/// Smallest prime strictly greater than `n`, or `None` past `u64::MAX`.
pub fn next_prime(n: u64) -> Option<u64> {
    let mut candidate = n.checked_add(1)?.max(2);
    while !is_prime(candidate) {
        candidate = candidate.checked_add(1)?;
    }
    Some(candidate)
}

// ============================================================================
// Versions
// ============================================================================

/// Orders dotted version strings component by component.
///
/// Numeric components compare as numbers (`"0.9" < "0.10"`), anything else
/// compares as text. When one version is a prefix of the other the shorter
/// one sorts first.
pub fn compare_versions(left: &str, right: &str) -> Ordering {
    let mut left_parts = left.split('.');
    let mut right_parts = right.split('.');
    loop {
        match (left_parts.next(), right_parts.next()) {
            (None, None) => return Ordering::Equal,
            (Some(_), None) => return Ordering::Greater,
            (None, Some(_)) => return Ordering::Less,
            (Some(a), Some(b)) => {
                let ordering = match (a.parse::<u64>(), b.parse::<u64>()) {
                    (Ok(a), Ok(b)) => a.cmp(&b),
                    _ => a.cmp(b),
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn assert_close(actual: f64, expected: f64) {
        let tolerance = 1e-10 * expected.abs().max(1.0);
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected}, got {actual}"
        );
    }

    #[rstest]
    #[case(1.0, 1.0)]
    #[case(2.0, 1.0)]
    #[case(5.0, 24.0)]
    #[case(0.5, 1.772_453_850_905_516)]
    #[case(1.5, 0.886_226_925_452_758)]
    #[case(5.4, 44.598_848_145_082_634)]
    #[case(10.0, 362_880.0)]
    #[case(20.0, 121_645_100_408_832_000.0)]
    fn gamma_matches_reference_values(#[case] x: f64, #[case] expected: f64) {
        assert_close(gamma(x).unwrap(), expected);
    }

    #[test]
    fn gamma_of_small_integers_is_exact() {
        assert_eq!(gamma(5.0).unwrap(), 24.0);
        assert_eq!(gamma(3.0).unwrap(), 2.0);
    }

    #[test]
    fn gamma_near_zero_uses_expansion() {
        let x = 0.0005;
        assert_close(gamma(x).unwrap(), 1.0 / (x * (1.0 + EULER_GAMMA * x)));
    }

    #[rstest]
    #[case(0.0, DomainError::NotPositive)]
    #[case(-1.5, DomainError::NotPositive)]
    #[case(171.7, DomainError::TooLarge)]
    fn gamma_rejects_out_of_domain(#[case] x: f64, #[case] expected: DomainError) {
        assert_eq!(gamma(x), Err(expected));
    }

    #[rstest]
    #[case(3.0, 2.0_f64.ln())]
    #[case(12.0, 17.502_307_845_873_887)]
    #[case(100.0, 359.134_205_369_575_4)]
    fn log_gamma_matches_reference_values(#[case] x: f64, #[case] expected: f64) {
        assert_close(log_gamma(x).unwrap(), expected);
    }

    #[test]
    fn log_gamma_rejects_non_positive() {
        assert_eq!(log_gamma(0.0), Err(DomainError::NotPositive));
        assert_eq!(DomainError::NotPositive.to_string(), "must be positive");
        assert_eq!(DomainError::TooLarge.to_string(), "number too large");
    }

    #[test]
    fn trial_division_primality() {
        let primes: Vec<u64> = (0..30).filter(|&n| is_prime(n)).collect();
        assert_eq!(primes, [2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
        assert!(is_prime(1_000_000_007));
        assert!(!is_prime(1_000_000_007 * 3));
    }

    #[rstest]
    #[case(0, Some(2))]
    #[case(2, Some(3))]
    #[case(5, Some(7))]
    #[case(89, Some(97))]
    #[case(u64::MAX, None)]
    fn next_prime_scans_upward(#[case] n: u64, #[case] expected: Option<u64>) {
        assert_eq!(next_prime(n), expected);
    }

    #[rstest]
    #[case("0.90.01", "0.91.04", Ordering::Less)]
    #[case("1.10.0", "1.9.0", Ordering::Greater)]
    #[case("1.2.3", "1.2.3", Ordering::Equal)]
    #[case("1.2", "1.2.0", Ordering::Less)]
    #[case("1.2.beta", "1.2.alpha", Ordering::Greater)]
    fn orders_versions_by_component(
        #[case] left: &str,
        #[case] right: &str,
        #[case] expected: Ordering,
    ) {
        assert_eq!(compare_versions(left, right), expected);
    }
}
