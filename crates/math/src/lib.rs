//! # nebula-math
//!
//! Arbitrary-precision arithmetic over decimal text, independent of any one
//! numeric engine.
//!
//! Callers talk to a [`MathAdapter`]. It validates operands, decides whether a
//! call is integer or float from the text, enforces preconditions and then
//! hands the call to the first backend in its list that accepts it:
//!
//! - [`DecimalBackend`]: exact decimals via `rust_decimal` (feature `decimal`)
//! - [`BigIntegerBackend`]: unbounded integers via `num-bigint-dig` (feature `bigint`)
//! - [`NativeBackend`]: `i128`/`f64` fallback, always present, and the only
//!   backend with gamma and log-gamma
//!
//! ```
//! use core::cmp::Ordering;
//! use nebula_math::prelude::*;
//!
//! let math = MathAdapter::new();
//! assert_eq!(math.square_root("49.39", Some(4))?, "7.0278");
//! assert_eq!(math.compare("0.90.01", "0.91.04", Some(5))?, Ordering::Less);
//! assert_eq!(math.gcd("4.4", "6.66")?, "2.2");
//! # Ok::<(), MathError>(())
//! ```

pub mod adapter;
pub mod backend;
pub mod config;
pub mod error;
pub mod operation;
pub mod rounding;
pub mod special;
pub mod text;
pub mod validator;

pub use adapter::{DEFAULT_PRIME_REPETITIONS, MathAdapter, MathAdapterBuilder, ordering_text};
pub use backend::{Backend, NativeBackend, Scale};
#[cfg(feature = "bigint")]
pub use backend::BigIntegerBackend;
#[cfg(feature = "decimal")]
pub use backend::DecimalBackend;
pub use config::{BackendConfig, BackendKind, MathConfig};
pub use error::{MathError, MathResult};
pub use operation::{Operation, OperationType};
pub use rounding::RoundingStrategy;
pub use validator::{DecimalValidator, NumberValidator};

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        MathAdapter, MathConfig, MathError, MathResult, NumberValidator, RoundingStrategy,
        ordering_text,
    };
}
