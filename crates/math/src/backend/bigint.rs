//! Big-integer backend on top of `num-bigint-dig`
//!
//! Integer-only: the adapter never hands it a float-typed call. Every
//! operation maps directly onto a big-integer primitive; inexact results
//! (a division with a remainder, a negative exponent) are refused so that the
//! next backend can produce a fractional answer.

use core::cmp::Ordering;
use core::str::FromStr;

use num_bigint_dig::prime::probably_prime;
use num_bigint_dig::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::{Backend, Scale};
use crate::error::{MathError, MathResult};
use crate::operation::{Operation, OperationType};

/// Miller-Rabin rounds used while scanning for the next prime.
const NEXT_PRIME_ROUNDS: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BigIntegerBackend {
    enabled: bool,
}

impl BigIntegerBackend {
    pub const NAME: &'static str = "bigint";

    pub const fn new() -> Self {
        Self { enabled: true }
    }

    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    fn parse(operation: Operation, value: &str) -> MathResult<BigInt> {
        BigInt::from_str(value).map_err(|_| {
            MathError::unsupported(Self::NAME, operation, format!("'{value}' is not an integer"))
        })
    }

    fn parse_pair(operation: Operation, left: &str, right: &str) -> MathResult<(BigInt, BigInt)> {
        Ok((Self::parse(operation, left)?, Self::parse(operation, right)?))
    }

    fn probably_prime(value: &BigInt, rounds: usize) -> bool {
        value
            .to_biguint()
            .is_some_and(|unsigned| probably_prime(&unsigned, rounds))
    }
}

impl Default for BigIntegerBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for BigIntegerBackend {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn supports(&self, kind: OperationType) -> bool {
        kind.is_integer()
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn add(&self, left: &str, right: &str, _scale: Scale) -> MathResult<String> {
        let (a, b) = Self::parse_pair(Operation::Add, left, right)?;
        Ok((a + b).to_string())
    }

    fn subtract(&self, left: &str, right: &str, _scale: Scale) -> MathResult<String> {
        let (a, b) = Self::parse_pair(Operation::Subtract, left, right)?;
        Ok((a - b).to_string())
    }

    fn multiply(&self, left: &str, right: &str, _scale: Scale) -> MathResult<String> {
        let (a, b) = Self::parse_pair(Operation::Multiply, left, right)?;
        Ok((a * b).to_string())
    }

    fn divide(&self, left: &str, right: &str, _scale: Scale) -> MathResult<String> {
        let (a, b) = Self::parse_pair(Operation::Divide, left, right)?;
        if b.is_zero() {
            return Err(MathError::DivisionByZero);
        }
        let (quotient, remainder) = a.div_rem(&b);
        if !remainder.is_zero() {
            return Err(MathError::unsupported(
                Self::NAME,
                Operation::Divide,
                format!("{left} / {right} is not a whole number"),
            ));
        }
        Ok(quotient.to_string())
    }

    fn compare(&self, left: &str, right: &str, _scale: Scale) -> MathResult<Ordering> {
        let (a, b) = Self::parse_pair(Operation::Compare, left, right)?;
        Ok(a.cmp(&b))
    }

    fn modulo(&self, left: &str, right: &str, _scale: Scale) -> MathResult<String> {
        let (a, b) = Self::parse_pair(Operation::Modulo, left, right)?;
        if b.is_zero() {
            return Err(MathError::DivisionByZero);
        }
        Ok((a % b).to_string())
    }

    fn power(&self, base: &str, exponent: &str, _scale: Scale) -> MathResult<String> {
        let (base, exponent) = Self::parse_pair(Operation::Power, base, exponent)?;
        let exponent = exponent.to_u32().ok_or_else(|| {
            MathError::unsupported(
                Self::NAME,
                Operation::Power,
                "exponent must be a non-negative 32-bit integer",
            )
        })?;
        Ok(num_traits::pow(base, exponent as usize).to_string())
    }

    fn square_root(&self, value: &str, _scale: Scale) -> MathResult<String> {
        let n = Self::parse(Operation::SquareRoot, value)?;
        if n.is_negative() {
            return Err(MathError::invalid_operand(
                value,
                "cannot take the square root of a negative number",
            ));
        }
        Ok(n.sqrt().to_string())
    }

    fn absolute(&self, value: &str) -> MathResult<String> {
        Ok(Self::parse(Operation::Absolute, value)?.abs().to_string())
    }

    fn negate(&self, value: &str) -> MathResult<String> {
        Ok((-Self::parse(Operation::Negate, value)?).to_string())
    }

    fn factorial(&self, value: &str, _scale: Scale) -> MathResult<String> {
        let n = Self::parse(Operation::Factorial, value)?;
        if n.is_negative() {
            return Err(MathError::invalid_operand(value, "factorial of a negative number"));
        }
        let n = n.to_u64().ok_or_else(|| {
            MathError::unsupported(Self::NAME, Operation::Factorial, "operand is too large")
        })?;
        let product = (2..=n).fold(BigInt::one(), |acc, factor| acc * BigInt::from(factor));
        Ok(product.to_string())
    }

    fn gcd(&self, left: &str, right: &str) -> MathResult<String> {
        let (a, b) = Self::parse_pair(Operation::Gcd, left, right)?;
        Ok(a.gcd(&b).to_string())
    }

    fn root(&self, value: &str, degree: u32) -> MathResult<String> {
        let n = Self::parse(Operation::Root, value)?;
        if degree == 0 {
            return Err(MathError::invalid_operand(value, "root degree must be positive"));
        }
        if n.is_negative() && degree % 2 == 0 {
            return Err(MathError::invalid_operand(
                value,
                "even root of a negative number",
            ));
        }
        Ok(n.nth_root(degree).to_string())
    }

    fn next_prime(&self, value: &str) -> MathResult<String> {
        let n = Self::parse(Operation::NextPrime, value)?;
        let two = BigInt::from(2u8);
        let mut candidate = if n < two { two } else { n + BigInt::one() };
        while !Self::probably_prime(&candidate, NEXT_PRIME_ROUNDS) {
            candidate += BigInt::one();
        }
        Ok(candidate.to_string())
    }

    fn is_prime(&self, value: &str, repetitions: u32) -> MathResult<bool> {
        let n = Self::parse(Operation::IsPrime, value)?;
        if n < BigInt::from(2u8) {
            return Ok(false);
        }
        Ok(Self::probably_prime(&n, repetitions as usize))
    }

    fn is_perfect_square(&self, value: &str, _scale: Scale) -> MathResult<bool> {
        let n = Self::parse(Operation::IsPerfectSquare, value)?;
        if n.is_negative() {
            return Ok(false);
        }
        let root = n.sqrt();
        Ok(&root * &root == n)
    }
}
