//! Property-based tests for the math adapter using proptest
//!
//! These tests check algebraic properties and invariants that must hold for
//! any operand, regardless of which backend ends up answering.

use nebula_math::prelude::*;
use nebula_math::{BigIntegerBackend, NativeBackend};
use proptest::prelude::*;

fn native_only() -> MathAdapter {
    MathAdapter::builder().backend(NativeBackend::new()).build().unwrap()
}

fn bigint_only() -> MathAdapter {
    MathAdapter::builder().backend(BigIntegerBackend::new()).build().unwrap()
}

/// Decimal text with up to 4 fractional digits.
fn decimal_text() -> impl Strategy<Value = String> {
    (any::<i32>(), proptest::option::of("[0-9]{1,4}")).prop_map(|(whole, fraction)| match fraction {
        Some(fraction) => format!("{whole}.{fraction}"),
        None => whole.to_string(),
    })
}

// ===== ARITHMETIC =====

proptest! {
    #[test]
    fn addition_commutative(a in decimal_text(), b in decimal_text()) {
        let math = MathAdapter::new();
        prop_assert_eq!(math.add(&a, &b, None)?, math.add(&b, &a, None)?);
    }

    #[test]
    fn multiplication_commutative(a in decimal_text(), b in decimal_text()) {
        let math = MathAdapter::new();
        prop_assert_eq!(math.multiply(&a, &b, Some(4))?, math.multiply(&b, &a, Some(4))?);
    }

    #[test]
    fn integer_addition_associative(a in any::<i32>(), b in any::<i32>(), c in any::<i32>()) {
        let math = MathAdapter::new();
        let (a, b, c) = (a.to_string(), b.to_string(), c.to_string());

        let left = math.add(&math.add(&a, &b, None)?, &c, None)?;
        let right = math.add(&a, &math.add(&b, &c, None)?, None)?;
        prop_assert_eq!(left, right);
    }

    #[test]
    fn division_by_zero_in_every_configuration(a in decimal_text(), precision in proptest::option::of(0u32..8)) {
        for math in [MathAdapter::new(), native_only(), bigint_only()] {
            prop_assert_eq!(math.divide(&a, "0", precision), Err(MathError::DivisionByZero));
        }
    }

    #[test]
    fn add_then_subtract_round_trips(a in decimal_text(), b in decimal_text()) {
        let math = MathAdapter::new();
        let sum = math.add(&a, &b, Some(4))?;
        let back = math.subtract(&sum, &b, Some(4))?;
        prop_assert_eq!(math.compare(&back, &a, Some(4))?, core::cmp::Ordering::Equal);
    }
}

// ===== PRECISION =====

proptest! {
    #[test]
    fn precision_round_trips(whole in "-?[0-9]{1,12}", fraction in "[0-9]{1,20}") {
        let value = format!("{whole}.{fraction}");
        prop_assert_eq!(MathAdapter::precision(&value) as usize, fraction.len());
    }

    #[test]
    fn integers_have_zero_precision(n in any::<i64>()) {
        prop_assert_eq!(MathAdapter::precision(&n.to_string()), 0);
    }

    #[test]
    fn results_carry_requested_precision(a in decimal_text(), b in decimal_text(), precision in 1u32..10) {
        let sum = MathAdapter::new().add(&a, &b, Some(precision))?;
        prop_assert_eq!(MathAdapter::precision(&sum), precision);
    }
}

// ===== NUMBER THEORY =====

proptest! {
    #[test]
    fn perfect_square_matches_integer_root(n in 0u64..10_000_000) {
        let root = n.isqrt();
        let expected = root * root == n;
        prop_assert_eq!(MathAdapter::new().is_perfect_square(&n.to_string(), None)?, expected);
        prop_assert_eq!(native_only().is_perfect_square(&n.to_string(), None)?, expected);
    }

    #[test]
    fn squares_are_perfect(n in 0u64..3_000_000) {
        let square = (n * n).to_string();
        prop_assert!(MathAdapter::new().is_perfect_square(&square, None)?);
    }

    #[test]
    fn fractional_text_is_never_prime(n in 0u32..100_000, fraction in "[0-9]{1,4}") {
        let value = format!("{n}.{fraction}");
        prop_assert!(!MathAdapter::new().is_prime(&value)?);
    }

    #[test]
    fn probabilistic_and_trial_division_agree(n in 0u64..50_000) {
        let value = n.to_string();
        prop_assert_eq!(bigint_only().is_prime(&value)?, native_only().is_prime(&value)?);
    }

    #[test]
    fn next_prime_is_prime_and_greater(n in 0u64..100_000) {
        let math = MathAdapter::new();
        let next = math.next_prime(&n.to_string())?;
        prop_assert!(next.parse::<u64>().unwrap() > n);
        prop_assert!(math.is_prime(&next)?);
    }

    #[test]
    fn gcd_divides_both_operands(a in 1u32..1_000_000, b in 1u32..1_000_000) {
        let math = MathAdapter::new();
        let gcd = math.gcd(&a.to_string(), &b.to_string())?;
        prop_assert_eq!(math.modulo(&a.to_string(), &gcd, None)?, "0");
        prop_assert_eq!(math.modulo(&b.to_string(), &gcd, None)?, "0");
        prop_assert_eq!(native_only().gcd(&a.to_string(), &b.to_string())?, gcd);
    }

    #[test]
    fn factorial_is_gamma_of_successor(whole in 0u32..10, fraction in "[1-9]") {
        let math = MathAdapter::new();
        let n = format!("{whole}.{fraction}");
        let successor = format!("{}.{fraction}", whole + 1);
        prop_assert_eq!(math.factorial(&n, None)?, math.gamma(&successor, None)?);
    }
}
