//! Numeric backends
//!
//! A backend is one interchangeable numeric engine. The adapter holds an
//! ordered list of them and walks it for every call: a backend that does not
//! support the inferred [`OperationType`], or that is disabled, is skipped; a
//! backend that returns an error hands the call to the next one.
//!
//! | Backend | Types | Feature |
//! |---|---|---|
//! | [`DecimalBackend`] | integer, float | `decimal` |
//! | [`BigIntegerBackend`] | integer | `bigint` |
//! | [`NativeBackend`] | integer, float | always |

use core::cmp::Ordering;
use core::fmt;
use std::sync::Arc;

use crate::error::{MathError, MathResult};
use crate::operation::{Operation, OperationType};
use crate::rounding::RoundingStrategy;

#[cfg(feature = "bigint")]
pub mod bigint;
#[cfg(feature = "decimal")]
pub mod decimal;
pub mod native;

#[cfg(feature = "bigint")]
pub use bigint::BigIntegerBackend;
#[cfg(feature = "decimal")]
pub use decimal::DecimalBackend;
pub use native::NativeBackend;

/// Target precision of a call together with the rounding strategy used to
/// reach it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scale {
    pub precision: u32,
    pub rounding: RoundingStrategy,
}

impl Scale {
    pub const fn new(precision: u32, rounding: RoundingStrategy) -> Self {
        Self {
            precision,
            rounding,
        }
    }

    /// One extra digit, used where a result is computed past the target
    /// precision and rounded back down.
    pub const fn widened(self) -> Self {
        Self {
            precision: self.precision.saturating_add(1),
            rounding: self.rounding,
        }
    }

    pub fn round_f64(self, value: f64) -> f64 {
        self.rounding.round_f64(value, self.precision)
    }
}

/// The contract every numeric engine fulfils.
///
/// Operands are decimal text that already passed validation. Arithmetic
/// results are decimal text. Operations a backend cannot perform return
/// [`MathError::UnsupportedOperation`]; the number-theory operations default
/// to exactly that.
pub trait Backend: fmt::Debug + Send + Sync {
    /// Short name used in errors and logs.
    fn name(&self) -> &'static str;

    /// Whether this backend handles calls of the given type.
    fn supports(&self, kind: OperationType) -> bool;

    /// Whether this backend may be consulted at all.
    fn is_enabled(&self) -> bool;

    fn add(&self, left: &str, right: &str, scale: Scale) -> MathResult<String>;

    fn subtract(&self, left: &str, right: &str, scale: Scale) -> MathResult<String>;

    fn multiply(&self, left: &str, right: &str, scale: Scale) -> MathResult<String>;

    fn divide(&self, left: &str, right: &str, scale: Scale) -> MathResult<String>;

    fn compare(&self, left: &str, right: &str, scale: Scale) -> MathResult<Ordering>;

    fn modulo(&self, left: &str, right: &str, scale: Scale) -> MathResult<String>;

    fn power(&self, base: &str, exponent: &str, scale: Scale) -> MathResult<String>;

    fn square_root(&self, value: &str, scale: Scale) -> MathResult<String>;

    fn absolute(&self, value: &str) -> MathResult<String> {
        let _ = value;
        Err(self.unsupported(Operation::Absolute))
    }

    fn negate(&self, value: &str) -> MathResult<String> {
        let _ = value;
        Err(self.unsupported(Operation::Negate))
    }

    fn factorial(&self, value: &str, scale: Scale) -> MathResult<String> {
        let _ = (value, scale);
        Err(self.unsupported(Operation::Factorial))
    }

    fn gcd(&self, left: &str, right: &str) -> MathResult<String> {
        let _ = (left, right);
        Err(self.unsupported(Operation::Gcd))
    }

    /// Integer `degree`-th root, rounded toward zero.
    fn root(&self, value: &str, degree: u32) -> MathResult<String> {
        let _ = (value, degree);
        Err(self.unsupported(Operation::Root))
    }

    fn next_prime(&self, value: &str) -> MathResult<String> {
        let _ = value;
        Err(self.unsupported(Operation::NextPrime))
    }

    /// `repetitions` only matters to probabilistic implementations.
    fn is_prime(&self, value: &str, repetitions: u32) -> MathResult<bool> {
        let _ = (value, repetitions);
        Err(self.unsupported(Operation::IsPrime))
    }

    fn is_perfect_square(&self, value: &str, scale: Scale) -> MathResult<bool> {
        let _ = (value, scale);
        Err(self.unsupported(Operation::IsPerfectSquare))
    }

    fn gamma(&self, value: &str, scale: Scale) -> MathResult<String> {
        let _ = (value, scale);
        Err(self.unsupported(Operation::Gamma))
    }

    fn log_gamma(&self, value: &str, scale: Scale) -> MathResult<String> {
        let _ = (value, scale);
        Err(self.unsupported(Operation::LogGamma))
    }

    /// Error for an operation this backend does not implement.
    fn unsupported(&self, operation: Operation) -> MathError {
        MathError::unsupported(self.name(), operation, "operation is not implemented")
    }
}

/// The default priority order: exact decimal, then big integer, then the
/// native fallback. Backends whose feature is off are left out.
pub fn default_chain() -> Vec<Arc<dyn Backend>> {
    let mut chain: Vec<Arc<dyn Backend>> = Vec::with_capacity(3);
    #[cfg(feature = "decimal")]
    chain.push(Arc::new(DecimalBackend::new()));
    #[cfg(feature = "bigint")]
    chain.push(Arc::new(BigIntegerBackend::new()));
    chain.push(Arc::new(NativeBackend::new()));
    chain
}
