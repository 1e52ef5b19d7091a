//! Native fallback backend on `i128`/`f64`
//!
//! Always compiled and the last entry of the default chain. Whole operands at
//! precision 0 use checked `i128` arithmetic and drop to `f64` on overflow;
//! everything else is computed in `f64` and rounded to the target precision
//! with the configured strategy. This is the only backend that evaluates the
//! gamma family and fractional factorials.

use core::cmp::Ordering;

use num_integer::Integer;
use tracing::trace;

use super::{Backend, Scale};
use crate::error::{MathError, MathResult};
use crate::operation::{Operation, OperationType};
use crate::special::{self, DomainError};
use crate::text;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeBackend {
    enabled: bool,
}

impl NativeBackend {
    pub const NAME: &'static str = "native";

    pub const fn new() -> Self {
        Self { enabled: true }
    }

    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Whole-number text that fits an `i128`.
    fn integer(value: &str) -> Option<i128> {
        if value.contains(['.', 'e', 'E']) {
            return None;
        }
        value.parse().ok()
    }

    /// Both operands as `i128`, only when the target precision is 0.
    fn integer_pair(left: &str, right: &str, scale: Scale) -> Option<(i128, i128)> {
        if scale.precision != 0 {
            return None;
        }
        Some((Self::integer(left)?, Self::integer(right)?))
    }

    fn float(value: &str) -> MathResult<f64> {
        value
            .parse()
            .map_err(|_| MathError::invalid_operand(value, "not a finite decimal number"))
    }

    fn float_pair(left: &str, right: &str) -> MathResult<(f64, f64)> {
        Ok((Self::float(left)?, Self::float(right)?))
    }

    /// Rounds a float result to the target precision and renders it.
    fn finish(operation: Operation, value: f64, scale: Scale) -> MathResult<String> {
        if !value.is_finite() {
            return Err(MathError::unsupported(
                Self::NAME,
                operation,
                "result is not finite",
            ));
        }
        Ok(text::format_float(scale.round_f64(value)))
    }

    /// Truncates to a non-negative whole number; negatives clamp to 0.
    fn whole(operation: Operation, value: &str) -> MathResult<u64> {
        if let Ok(n) = value.parse::<u64>() {
            return Ok(n);
        }
        let float = Self::float(value)?.trunc();
        if float <= 0.0 {
            return Ok(0);
        }
        if float >= u64::MAX as f64 {
            return Err(MathError::unsupported(
                Self::NAME,
                operation,
                "operand exceeds 64 bits",
            ));
        }
        Ok(float as u64)
    }

    fn domain_error(value: &str, error: DomainError) -> MathError {
        MathError::invalid_operand(value, error.to_string())
    }

    /// `n!` for whole `n`, continuing in `f64` once `u128` overflows and
    /// stopping as soon as the float product is infinite.
    fn integer_factorial(value: &str, n: u64, scale: Scale) -> MathResult<String> {
        let mut product: u128 = 1;
        for factor in 2..=n {
            match product.checked_mul(u128::from(factor)) {
                Some(next) => product = next,
                None => {
                    trace!(operand = value, "factorial left u128 range, continuing in f64");
                    let mut float = product as f64;
                    for f in factor..=n {
                        float *= f as f64;
                        if float.is_infinite() {
                            break;
                        }
                    }
                    return Self::finish(Operation::Factorial, float, scale);
                }
            }
        }
        Ok(product.to_string())
    }
}

impl Default for NativeBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for NativeBackend {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn supports(&self, _kind: OperationType) -> bool {
        true
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn add(&self, left: &str, right: &str, scale: Scale) -> MathResult<String> {
        if let Some(sum) = Self::integer_pair(left, right, scale).and_then(|(a, b)| a.checked_add(b)) {
            return Ok(sum.to_string());
        }
        let (a, b) = Self::float_pair(left, right)?;
        Self::finish(Operation::Add, a + b, scale)
    }

    fn subtract(&self, left: &str, right: &str, scale: Scale) -> MathResult<String> {
        if let Some(difference) =
            Self::integer_pair(left, right, scale).and_then(|(a, b)| a.checked_sub(b))
        {
            return Ok(difference.to_string());
        }
        let (a, b) = Self::float_pair(left, right)?;
        Self::finish(Operation::Subtract, a - b, scale)
    }

    fn multiply(&self, left: &str, right: &str, scale: Scale) -> MathResult<String> {
        if let Some(product) =
            Self::integer_pair(left, right, scale).and_then(|(a, b)| a.checked_mul(b))
        {
            return Ok(product.to_string());
        }
        let (a, b) = Self::float_pair(left, right)?;
        Self::finish(Operation::Multiply, a * b, scale)
    }

    fn divide(&self, left: &str, right: &str, scale: Scale) -> MathResult<String> {
        let (a, b) = Self::float_pair(left, right)?;
        if b == 0.0 {
            return Err(MathError::DivisionByZero);
        }
        let mut quotient = Self::finish(Operation::Divide, a / b, scale)?;
        if scale.precision != 0 && !quotient.contains('.') {
            quotient.push_str(".0");
        }
        Ok(quotient)
    }

    fn compare(&self, left: &str, right: &str, scale: Scale) -> MathResult<Ordering> {
        if text::is_version_like(left) && text::is_version_like(right) {
            return Ok(special::compare_versions(left, right));
        }
        if let (Some(a), Some(b)) = (Self::integer(left), Self::integer(right)) {
            return Ok(a.cmp(&b));
        }
        let (a, b) = Self::float_pair(left, right)?;
        scale
            .round_f64(a)
            .partial_cmp(&scale.round_f64(b))
            .ok_or_else(|| MathError::unsupported(Self::NAME, Operation::Compare, "operands are unordered"))
    }

    fn modulo(&self, left: &str, right: &str, scale: Scale) -> MathResult<String> {
        if let Some((a, b)) = Self::integer_pair(left, right, scale) {
            if b == 0 {
                return Err(MathError::DivisionByZero);
            }
            if let Some(remainder) = a.checked_rem(b) {
                return Ok(remainder.to_string());
            }
        }
        let (a, b) = Self::float_pair(left, right)?;
        if b == 0.0 {
            return Err(MathError::DivisionByZero);
        }
        Self::finish(Operation::Modulo, a % b, scale)
    }

    fn power(&self, base: &str, exponent: &str, scale: Scale) -> MathResult<String> {
        let (base, exponent) = Self::float_pair(base, exponent)?;
        Self::finish(Operation::Power, base.powf(exponent), scale)
    }

    fn square_root(&self, value: &str, scale: Scale) -> MathResult<String> {
        let x = Self::float(value)?;
        if x < 0.0 {
            return Err(MathError::invalid_operand(
                value,
                "cannot take the square root of a negative number",
            ));
        }
        Self::finish(Operation::SquareRoot, x.sqrt(), scale)
    }

    fn absolute(&self, value: &str) -> MathResult<String> {
        if let Some(n) = Self::integer(value).and_then(i128::checked_abs) {
            return Ok(n.to_string());
        }
        Ok(text::format_float(Self::float(value)?.abs()))
    }

    fn negate(&self, value: &str) -> MathResult<String> {
        if let Some(n) = Self::integer(value).and_then(i128::checked_neg) {
            return Ok(n.to_string());
        }
        Ok(text::format_float(-Self::float(value)?))
    }

    fn factorial(&self, value: &str, scale: Scale) -> MathResult<String> {
        if text::is_negative(value) {
            return Err(MathError::invalid_operand(value, "factorial of a negative number"));
        }
        if let Ok(n) = value.parse::<u64>() {
            return Self::integer_factorial(value, n, scale);
        }

        let x = Self::float(value)?;
        let gamma = special::gamma(x + 1.0).map_err(|error| Self::domain_error(value, error))?;
        Self::finish(Operation::Factorial, gamma, scale)
    }

    fn gcd(&self, left: &str, right: &str) -> MathResult<String> {
        let places = text::precision(left).min(text::precision(right));
        let shifted = text::shift_point(left, places).zip(text::shift_point(right, places));
        let (a, b) = shifted.ok_or_else(|| {
            MathError::unsupported(Self::NAME, Operation::Gcd, "operands do not fit 128 bits")
        })?;
        Ok(text::insert_point(a.gcd(&b), places))
    }

    fn next_prime(&self, value: &str) -> MathResult<String> {
        let n = Self::whole(Operation::NextPrime, value)?;
        special::next_prime(n)
            .map(|prime| prime.to_string())
            .ok_or_else(|| {
                MathError::unsupported(Self::NAME, Operation::NextPrime, "no prime fits 64 bits")
            })
    }

    fn is_prime(&self, value: &str, _repetitions: u32) -> MathResult<bool> {
        if text::is_negative(value) {
            return Ok(false);
        }
        if let Ok(n) = value.parse::<u64>() {
            return Ok(special::is_prime(n));
        }
        let x = Self::float(value)?;
        if x.fract() != 0.0 {
            return Ok(false);
        }
        Ok(special::is_prime(Self::whole(Operation::IsPrime, value)?))
    }

    fn is_perfect_square(&self, value: &str, _scale: Scale) -> MathResult<bool> {
        if text::is_negative(value) {
            return Ok(false);
        }
        if let Ok(n) = value.parse::<u64>() {
            let root = n.isqrt();
            return Ok(root * root == n);
        }
        let x = Self::float(value)?;
        let root = x.sqrt().round();
        Ok(root * root == x)
    }

    fn gamma(&self, value: &str, scale: Scale) -> MathResult<String> {
        let x = Self::float(value)?;
        let result = special::gamma(x).map_err(|error| Self::domain_error(value, error))?;
        Self::finish(Operation::Gamma, result, scale)
    }

    fn log_gamma(&self, value: &str, scale: Scale) -> MathResult<String> {
        let x = Self::float(value)?;
        let result = special::log_gamma(x).map_err(|error| Self::domain_error(value, error))?;
        Self::finish(Operation::LogGamma, result, scale)
    }
}
