//! The math adapter
//!
//! [`MathAdapter`] is the single entry point callers use. For every call it
//!
//! 1. validates each operand with its [`NumberValidator`],
//! 2. classifies the call as integer or float from the operand text,
//! 3. checks the operation's preconditions,
//! 4. walks its backend list in order until one backend succeeds.
//!
//! A backend is consulted only when it is enabled and supports the inferred
//! [`OperationType`]. Every backend failure is wrapped in
//! [`MathError::BackendFailed`] and the next backend is tried; when the list is
//! exhausted the last wrapped failure is returned.
//!
//! ```
//! use nebula_math::MathAdapter;
//!
//! let math = MathAdapter::new();
//! assert_eq!(math.power("5.5", "12", Some(2)).unwrap(), "766217865.41");
//! assert_eq!(math.gamma("5", None).unwrap(), "24");
//! assert!(math.is_prime("97").unwrap());
//! ```

use core::cmp::Ordering;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::backend::{self, Backend, Scale};
use crate::config::MathConfig;
use crate::error::{MathError, MathResult};
use crate::operation::{Operation, OperationType};
use crate::rounding::RoundingStrategy;
use crate::text;
use crate::validator::{DecimalValidator, NumberValidator};

/// Miller-Rabin rounds used by [`MathAdapter::is_prime`].
pub const DEFAULT_PRIME_REPETITIONS: u32 = 10;

/// Renders an [`Ordering`] as the `-1`/`0`/`1` text some callers expect.
pub const fn ordering_text(ordering: Ordering) -> &'static str {
    match ordering {
        Ordering::Less => "-1",
        Ordering::Equal => "0",
        Ordering::Greater => "1",
    }
}

/// Backend-agnostic arbitrary-precision arithmetic.
///
/// Cheap to clone; clones share the validator and backends.
#[derive(Debug, Clone)]
pub struct MathAdapter {
    validator: Arc<dyn NumberValidator>,
    backends: Arc<[Arc<dyn Backend>]>,
    rounding: RoundingStrategy,
}

impl Default for MathAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl MathAdapter {
    /// Decimal validator, every compiled-in backend, half-up rounding.
    pub fn new() -> Self {
        Self {
            validator: Arc::new(DecimalValidator),
            backends: backend::default_chain().into(),
            rounding: RoundingStrategy::default(),
        }
    }

    pub fn builder() -> MathAdapterBuilder {
        MathAdapterBuilder::default()
    }

    pub fn from_config(config: &MathConfig) -> MathResult<Self> {
        Self::builder()
            .backends(config.build_backends()?)
            .rounding(config.rounding)
            .build()
    }

    pub fn rounding(&self) -> RoundingStrategy {
        self.rounding
    }

    /// Backend names in the order they are consulted.
    pub fn backend_names(&self) -> Vec<&'static str> {
        self.backends.iter().map(|backend| backend.name()).collect()
    }

    /// Number of digits after the decimal point.
    pub fn precision(value: &str) -> u32 {
        text::precision(value)
    }

    // ------------------------------------------------------------------------
    // Arithmetic
    // ------------------------------------------------------------------------

    pub fn add(&self, left: &str, right: &str, precision: Option<u32>) -> MathResult<String> {
        self.binary(Operation::Add, left, right, precision, |backend, a, b, scale| {
            backend.add(a, b, scale)
        })
    }

    pub fn subtract(&self, left: &str, right: &str, precision: Option<u32>) -> MathResult<String> {
        self.binary(Operation::Subtract, left, right, precision, |backend, a, b, scale| {
            backend.subtract(a, b, scale)
        })
    }

    pub fn multiply(&self, left: &str, right: &str, precision: Option<u32>) -> MathResult<String> {
        self.binary(Operation::Multiply, left, right, precision, |backend, a, b, scale| {
            backend.multiply(a, b, scale)
        })
    }

    /// Fails with [`MathError::DivisionByZero`] before any backend runs when
    /// the divisor is the literal `"0"`.
    pub fn divide(&self, left: &str, right: &str, precision: Option<u32>) -> MathResult<String> {
        self.validate(left)?;
        self.validate(right)?;
        if right == "0" {
            return Err(MathError::DivisionByZero);
        }
        self.binary(Operation::Divide, left, right, precision, |backend, a, b, scale| {
            backend.divide(a, b, scale)
        })
    }

    pub fn modulo(&self, left: &str, right: &str, precision: Option<u32>) -> MathResult<String> {
        self.binary(Operation::Modulo, left, right, precision, |backend, a, b, scale| {
            backend.modulo(a, b, scale)
        })
    }

    pub fn power(&self, base: &str, exponent: &str, precision: Option<u32>) -> MathResult<String> {
        self.binary(Operation::Power, base, exponent, precision, |backend, a, b, scale| {
            backend.power(a, b, scale)
        })
    }

    /// Three-way comparison at `precision` digits.
    ///
    /// Two dotted versions such as `"0.90.01"` and `"0.91.04"` are accepted
    /// even though they are not numbers, and are ordered component by
    /// component.
    pub fn compare(&self, left: &str, right: &str, precision: Option<u32>) -> MathResult<Ordering> {
        if !(text::is_version(left) && text::is_version(right)) {
            self.validate(left)?;
            self.validate(right)?;
        }
        let scale = self.scale(precision, &[left, right]);
        self.delegate(Operation::Compare, OperationType::infer(&[left, right]), |backend| {
            backend.compare(left, right, scale)
        })
    }

    pub fn square_root(&self, value: &str, precision: Option<u32>) -> MathResult<String> {
        self.unary(Operation::SquareRoot, value, |backend| {
            backend.square_root(value, self.scale(precision, &[value]))
        })
    }

    pub fn absolute(&self, value: &str) -> MathResult<String> {
        self.unary(Operation::Absolute, value, |backend| backend.absolute(value))
    }

    pub fn negate(&self, value: &str) -> MathResult<String> {
        self.unary(Operation::Negate, value, |backend| backend.negate(value))
    }

    // ------------------------------------------------------------------------
    // Number theory
    // ------------------------------------------------------------------------

    /// `n!`; a fractional operand yields `Γ(n + 1)`.
    pub fn factorial(&self, value: &str, precision: Option<u32>) -> MathResult<String> {
        self.validate(value)?;
        Self::require_non_negative(Operation::Factorial, value)?;
        self.unary(Operation::Factorial, value, |backend| {
            backend.factorial(value, self.scale(precision, &[value]))
        })
    }

    pub fn gcd(&self, left: &str, right: &str) -> MathResult<String> {
        self.validate(left)?;
        self.validate(right)?;
        Self::require_non_negative(Operation::Gcd, left)?;
        Self::require_non_negative(Operation::Gcd, right)?;
        self.delegate(Operation::Gcd, OperationType::infer(&[left, right]), |backend| {
            backend.gcd(left, right)
        })
    }

    /// Integer `degree`-th root of a non-negative whole number, rounded down.
    pub fn root(&self, value: &str, degree: u32) -> MathResult<String> {
        self.validate(value)?;
        Self::require_non_negative(Operation::Root, value)?;
        let kind = OperationType::infer(&[value]);
        if !kind.is_integer() {
            return Err(MathError::precondition(
                Operation::Root,
                value,
                "operand must be a whole number",
            ));
        }
        if degree == 0 {
            return Err(MathError::precondition(
                Operation::Root,
                degree.to_string(),
                "degree must be positive",
            ));
        }
        self.delegate(Operation::Root, kind, |backend| backend.root(value, degree))
    }

    pub fn next_prime(&self, value: &str) -> MathResult<String> {
        self.unary(Operation::NextPrime, value, |backend| backend.next_prime(value))
    }

    /// Primality with [`DEFAULT_PRIME_REPETITIONS`] rounds.
    pub fn is_prime(&self, value: &str) -> MathResult<bool> {
        self.is_prime_with_reps(value, DEFAULT_PRIME_REPETITIONS)
    }

    /// Primality; `repetitions` only affects probabilistic backends.
    ///
    /// Anything written with fractional digits is never prime.
    pub fn is_prime_with_reps(&self, value: &str, repetitions: u32) -> MathResult<bool> {
        self.validate(value)?;
        if text::precision(value) > 0 {
            return Ok(false);
        }
        match value {
            "1" => return Ok(false),
            "2" => return Ok(true),
            _ => {}
        }
        self.unary(Operation::IsPrime, value, |backend| {
            backend.is_prime(value, repetitions)
        })
    }

    pub fn is_perfect_square(&self, value: &str, precision: Option<u32>) -> MathResult<bool> {
        self.unary(Operation::IsPerfectSquare, value, |backend| {
            backend.is_perfect_square(value, self.scale(precision, &[value]))
        })
    }

    pub fn gamma(&self, value: &str, precision: Option<u32>) -> MathResult<String> {
        self.unary(Operation::Gamma, value, |backend| {
            backend.gamma(value, self.scale(precision, &[value]))
        })
    }

    pub fn log_gamma(&self, value: &str, precision: Option<u32>) -> MathResult<String> {
        self.unary(Operation::LogGamma, value, |backend| {
            backend.log_gamma(value, self.scale(precision, &[value]))
        })
    }

    // ------------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------------

    fn validate(&self, value: &str) -> MathResult<()> {
        if self.validator.is_valid(value) {
            Ok(())
        } else {
            Err(MathError::invalid_operand(value, "not a valid number"))
        }
    }

    fn require_non_negative(operation: Operation, value: &str) -> MathResult<()> {
        if text::is_negative(value) {
            return Err(MathError::precondition(
                operation,
                value,
                "operand must not be negative",
            ));
        }
        Ok(())
    }

    /// Explicit precision, or the largest precision among the operands.
    fn scale(&self, precision: Option<u32>, operands: &[&str]) -> Scale {
        let precision = precision.unwrap_or_else(|| {
            operands
                .iter()
                .map(|operand| text::precision(operand))
                .max()
                .unwrap_or(0)
        });
        Scale::new(precision, self.rounding)
    }

    fn unary<T>(
        &self,
        operation: Operation,
        value: &str,
        call: impl Fn(&dyn Backend) -> MathResult<T>,
    ) -> MathResult<T> {
        self.validate(value)?;
        self.delegate(operation, OperationType::infer(&[value]), call)
    }

    fn binary(
        &self,
        operation: Operation,
        left: &str,
        right: &str,
        precision: Option<u32>,
        call: impl Fn(&dyn Backend, &str, &str, Scale) -> MathResult<String>,
    ) -> MathResult<String> {
        self.validate(left)?;
        self.validate(right)?;
        let scale = self.scale(precision, &[left, right]);
        self.delegate(operation, OperationType::infer(&[left, right]), |backend| {
            call(backend, left, right, scale)
        })
    }

    /// Tries each eligible backend in order and returns the first success.
    fn delegate<T>(
        &self,
        operation: Operation,
        kind: OperationType,
        call: impl Fn(&dyn Backend) -> MathResult<T>,
    ) -> MathResult<T> {
        let mut last_error = None;

        let eligible = self
            .backends
            .iter()
            .filter(|backend| backend.is_enabled() && backend.supports(kind));
        for backend in eligible {
            trace!(backend = backend.name(), %operation, %kind, "dispatching to backend");
            match call(backend.as_ref()) {
                Ok(value) => return Ok(value),
                Err(error) => {
                    debug!(
                        backend = backend.name(),
                        %operation,
                        %error,
                        "backend failed, trying next"
                    );
                    last_error = Some(MathError::backend_failed(backend.name(), operation, error));
                }
            }
        }

        Err(last_error.unwrap_or(MathError::Unknown { operation }))
    }
}

/// Builder for [`MathAdapter`]
#[derive(Debug, Default)]
pub struct MathAdapterBuilder {
    validator: Option<Arc<dyn NumberValidator>>,
    backends: Vec<Arc<dyn Backend>>,
    rounding: RoundingStrategy,
}

impl MathAdapterBuilder {
    #[must_use = "builder methods must be chained or built"]
    pub fn validator(mut self, validator: impl NumberValidator + 'static) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Appends a backend to the end of the chain.
    #[must_use = "builder methods must be chained or built"]
    pub fn backend(self, backend: impl Backend + 'static) -> Self {
        self.shared_backend(Arc::new(backend))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn shared_backend(mut self, backend: Arc<dyn Backend>) -> Self {
        self.backends.push(backend);
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn backends(mut self, backends: impl IntoIterator<Item = Arc<dyn Backend>>) -> Self {
        self.backends.extend(backends);
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn rounding(mut self, rounding: RoundingStrategy) -> Self {
        self.rounding = rounding;
        self
    }

    /// Sets the rounding strategy by name, e.g. `"half-even"` or `"HALF_ODD"`.
    pub fn rounding_name(self, name: &str) -> MathResult<Self> {
        Ok(self.rounding(name.parse()?))
    }

    pub fn build(self) -> MathResult<MathAdapter> {
        if self.backends.is_empty() {
            return Err(MathError::configuration("At least one backend is required"));
        }
        Ok(MathAdapter {
            validator: self
                .validator
                .unwrap_or_else(|| Arc::new(DecimalValidator)),
            backends: self.backends.into(),
            rounding: self.rounding,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::NativeBackend;
    use pretty_assertions::assert_eq;

    fn native_only() -> MathAdapter {
        MathAdapter::builder().backend(NativeBackend::new()).build().unwrap()
    }

    #[test]
    fn empty_builder_is_a_configuration_error() {
        let error = MathAdapter::builder().build().unwrap_err();
        assert!(matches!(error, MathError::Configuration { .. }));
    }

    #[test]
    fn unknown_rounding_name_is_rejected() {
        assert!(MathAdapter::builder().rounding_name("ceiling").is_err());
        let adapter = MathAdapter::builder()
            .rounding_name("HALF_EVEN")
            .unwrap()
            .backend(NativeBackend::new())
            .build()
            .unwrap();
        assert_eq!(adapter.rounding(), RoundingStrategy::HalfEven);
    }

    #[test]
    fn invalid_operands_never_reach_a_backend() {
        let adapter = native_only();
        assert_eq!(
            adapter.add("abc", "1", None),
            Err(MathError::invalid_operand("abc", "not a valid number"))
        );
        assert!(adapter.gamma("", None).unwrap_err().is_invalid_operand());
    }

    #[test]
    fn derived_precision_is_the_larger_operand_precision() {
        let adapter = native_only();
        assert_eq!(adapter.add("1.5", "1.25", None).unwrap(), "2.75");
        assert_eq!(adapter.scale(None, &["1.5", "1.25"]).precision, 2);
        assert_eq!(adapter.scale(Some(7), &["1.5"]).precision, 7);
    }

    #[test]
    fn preconditions_fail_before_dispatch() {
        let adapter = native_only();
        for error in [
            adapter.factorial("-3", None).unwrap_err(),
            adapter.gcd("4", "-6").unwrap_err(),
            adapter.root("-8", 3).unwrap_err(),
            adapter.root("8.5", 3).unwrap_err(),
            adapter.root("8", 0).unwrap_err(),
        ] {
            assert!(matches!(error, MathError::InvalidPrecondition { .. }), "{error:?}");
        }
    }

    #[test]
    fn exhausted_chain_returns_last_wrapped_failure() {
        let error = native_only().root("27", 3).unwrap_err();
        assert_eq!(error.backend(), Some(NativeBackend::NAME));
        assert!(matches!(
            error,
            MathError::BackendFailed { operation: Operation::Root, .. }
        ));
        assert!(error.is_unsupported());
    }

    #[test]
    fn disabled_backends_leave_nothing_eligible() {
        let adapter = MathAdapter::builder()
            .backend(NativeBackend::new().with_enabled(false))
            .build()
            .unwrap();
        assert_eq!(
            adapter.add("1", "2", None),
            Err(MathError::Unknown { operation: Operation::Add })
        );
    }

    #[test]
    fn ordering_renders_as_sign_text() {
        assert_eq!(ordering_text(Ordering::Less), "-1");
        assert_eq!(ordering_text(Ordering::Equal), "0");
        assert_eq!(ordering_text(Ordering::Greater), "1");
    }
}
