//! Exact decimal backend on top of `rust_decimal`
//!
//! Every result is rendered with exactly the requested number of fractional
//! digits. Addition, multiplication, division and powers cut the exact result
//! down to that scale; subtraction and square roots are computed one digit
//! past it and rounded back with the configured strategy.

use core::cmp::Ordering;
use core::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy as DecimalRounding};

use super::{Backend, Scale};
use crate::error::{MathError, MathResult};
use crate::operation::{Operation, OperationType};
use crate::text;

/// Largest scale a `rust_decimal::Decimal` can carry.
pub const MAX_SCALE: u32 = 28;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalBackend {
    enabled: bool,
}

impl DecimalBackend {
    pub const NAME: &'static str = "decimal";

    pub const fn new() -> Self {
        Self { enabled: true }
    }

    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    fn parse(operation: Operation, value: &str) -> MathResult<Decimal> {
        let parsed = if value.contains(['e', 'E']) {
            Decimal::from_scientific(value)
        } else {
            Decimal::from_str(value)
        };
        parsed.map_err(|error| {
            MathError::unsupported(
                Self::NAME,
                operation,
                format!("'{value}' is not representable: {error}"),
            )
        })
    }

    fn parse_pair(operation: Operation, left: &str, right: &str) -> MathResult<(Decimal, Decimal)> {
        Ok((Self::parse(operation, left)?, Self::parse(operation, right)?))
    }

    fn check_scale(operation: Operation, scale: Scale) -> MathResult<()> {
        if scale.precision > MAX_SCALE {
            return Err(MathError::unsupported(
                Self::NAME,
                operation,
                format!("scale exceeds maximum: {} > {MAX_SCALE}", scale.precision),
            ));
        }
        Ok(())
    }

    fn overflow(operation: Operation) -> MathError {
        MathError::unsupported(Self::NAME, operation, "decimal overflow")
    }

    fn truncate(value: Decimal, precision: u32) -> Decimal {
        value.round_dp_with_strategy(precision, DecimalRounding::ToZero)
    }

    /// Computes one digit past the target and rounds back with the strategy.
    fn round_widened(value: Decimal, scale: Scale) -> Decimal {
        let widened = Self::truncate(value, scale.widened().precision);
        scale.rounding.round_decimal(widened, scale.precision)
    }

    /// Renders with exactly `precision` fractional digits.
    fn render(mut value: Decimal, precision: u32) -> String {
        value.rescale(precision);
        if value.is_zero() {
            value.set_sign_positive(true);
        }
        value.to_string()
    }
}

impl Default for DecimalBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for DecimalBackend {
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
        Self::check_scale(Operation::Add, scale)?;
        let (a, b) = Self::parse_pair(Operation::Add, left, right)?;
        let sum = a.checked_add(b).ok_or_else(|| Self::overflow(Operation::Add))?;
        Ok(Self::render(Self::truncate(sum, scale.precision), scale.precision))
    }

    fn subtract(&self, left: &str, right: &str, scale: Scale) -> MathResult<String> {
        Self::check_scale(Operation::Subtract, scale)?;
        let (a, b) = Self::parse_pair(Operation::Subtract, left, right)?;
        let difference = a
            .checked_sub(b)
            .ok_or_else(|| Self::overflow(Operation::Subtract))?;
        Ok(Self::render(Self::round_widened(difference, scale), scale.precision))
    }

    fn multiply(&self, left: &str, right: &str, scale: Scale) -> MathResult<String> {
        Self::check_scale(Operation::Multiply, scale)?;
        let (a, b) = Self::parse_pair(Operation::Multiply, left, right)?;
        let product = a
            .checked_mul(b)
            .ok_or_else(|| Self::overflow(Operation::Multiply))?;
        Ok(Self::render(Self::truncate(product, scale.precision), scale.precision))
    }

    fn divide(&self, left: &str, right: &str, scale: Scale) -> MathResult<String> {
        Self::check_scale(Operation::Divide, scale)?;
        let (a, b) = Self::parse_pair(Operation::Divide, left, right)?;
        if b.is_zero() {
            return Err(MathError::DivisionByZero);
        }
        let quotient = a
            .checked_div(b)
            .ok_or_else(|| Self::overflow(Operation::Divide))?;
        Ok(Self::render(Self::truncate(quotient, scale.precision), scale.precision))
    }

    fn compare(&self, left: &str, right: &str, scale: Scale) -> MathResult<Ordering> {
        if text::is_version_like(left) && text::is_version_like(right) {
            return Err(MathError::unsupported(
                Self::NAME,
                Operation::Compare,
                "version-like operands have no decimal ordering",
            ));
        }
        Self::check_scale(Operation::Compare, scale)?;
        let (a, b) = Self::parse_pair(Operation::Compare, left, right)?;
        Ok(Self::truncate(a, scale.precision).cmp(&Self::truncate(b, scale.precision)))
    }

    fn modulo(&self, left: &str, right: &str, scale: Scale) -> MathResult<String> {
        if scale.precision != 0 {
            return Err(MathError::unsupported(
                Self::NAME,
                Operation::Modulo,
                "modulo is only defined at scale 0",
            ));
        }
        let (a, b) = Self::parse_pair(Operation::Modulo, left, right)?;
        if b.is_zero() {
            return Err(MathError::DivisionByZero);
        }
        let remainder = a
            .checked_rem(b)
            .ok_or_else(|| Self::overflow(Operation::Modulo))?;
        Ok(Self::render(Self::truncate(remainder, 0), 0))
    }

    fn power(&self, base: &str, exponent: &str, scale: Scale) -> MathResult<String> {
        Self::check_scale(Operation::Power, scale)?;
        let (a, e) = Self::parse_pair(Operation::Power, base, exponent)?;
        if !e.fract().is_zero() {
            return Err(MathError::unsupported(
                Self::NAME,
                Operation::Power,
                "exponent must be a whole number",
            ));
        }
        let exponent = e
            .to_i64()
            .ok_or_else(|| Self::overflow(Operation::Power))?;
        let result = a
            .checked_powi(exponent)
            .ok_or_else(|| Self::overflow(Operation::Power))?;
        Ok(Self::render(Self::truncate(result, scale.precision), scale.precision))
    }

    fn square_root(&self, value: &str, scale: Scale) -> MathResult<String> {
        Self::check_scale(Operation::SquareRoot, scale)?;
        let decimal = Self::parse(Operation::SquareRoot, value)?;
        if decimal.is_sign_negative() && !decimal.is_zero() {
            return Err(MathError::invalid_operand(
                value,
                "cannot take the square root of a negative number",
            ));
        }
        let root = decimal
            .sqrt()
            .ok_or_else(|| Self::overflow(Operation::SquareRoot))?;
        Ok(Self::render(Self::round_widened(root, scale), scale.precision))
    }
}
