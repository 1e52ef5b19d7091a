//! Configuration types and validation
//!
//! A [`MathConfig`] describes the rounding strategy and the ordered backend
//! list of a [`MathAdapter`](crate::adapter::MathAdapter). It is plain serde
//! data, so it can be embedded in any larger JSON/TOML/YAML configuration.
//!
//! ```json
//! {
//!   "rounding": "half-even",
//!   "backends": [
//!     { "kind": "decimal" },
//!     { "kind": "big_integer", "enabled": false },
//!     { "kind": "native" }
//!   ]
//! }
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::backend::{Backend, NativeBackend};
#[cfg(feature = "bigint")]
use crate::backend::BigIntegerBackend;
#[cfg(feature = "decimal")]
use crate::backend::DecimalBackend;
use crate::error::{MathError, MathResult};
use crate::rounding::RoundingStrategy;

/// Adapter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MathConfig {
    /// Tie-breaking rule handed to every backend
    #[serde(default)]
    pub rounding: RoundingStrategy,

    /// Backends in priority order
    #[serde(default = "default_backends")]
    pub backends: Vec<BackendConfig>,
}

impl Default for MathConfig {
    fn default() -> Self {
        Self {
            rounding: RoundingStrategy::default(),
            backends: default_backends(),
        }
    }
}

fn default_backends() -> Vec<BackendConfig> {
    [BackendKind::Decimal, BackendKind::BigInteger, BackendKind::Native]
        .into_iter()
        .map(BackendConfig::new)
        .collect()
}

impl MathConfig {
    /// Parses and validates a JSON document.
    pub fn from_json(json: &str) -> MathResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| MathError::configuration(format!("Failed to deserialize config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Deserializes from an already parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> MathResult<Self> {
        let config: Self = serde_json::from_value(value)
            .map_err(|e| MathError::configuration(format!("Failed to deserialize config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> MathResult<()> {
        if self.backends.is_empty() {
            return Err(MathError::configuration("Backend list cannot be empty"));
        }

        let mut seen = HashSet::with_capacity(self.backends.len());
        for backend in &self.backends {
            if !seen.insert(backend.kind) {
                return Err(MathError::configuration(format!(
                    "Backend '{}' is listed more than once",
                    backend.kind
                )));
            }
        }

        Ok(())
    }

    /// Instantiates the configured backends that are compiled into this build.
    pub fn build_backends(&self) -> MathResult<Vec<Arc<dyn Backend>>> {
        self.validate()?;
        let backends: Vec<_> = self
            .backends
            .iter()
            .filter_map(|backend| backend.kind.build(backend.enabled))
            .collect();
        if backends.is_empty() {
            return Err(MathError::configuration(
                "None of the configured backends is available in this build",
            ));
        }
        Ok(backends)
    }
}

/// One entry of the backend list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackendConfig {
    pub kind: BackendKind,

    /// A disabled backend stays in the list but is never consulted
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

const fn enabled_by_default() -> bool {
    true
}

impl BackendConfig {
    pub const fn new(kind: BackendKind) -> Self {
        Self {
            kind,
            enabled: true,
        }
    }

    pub const fn disabled(kind: BackendKind) -> Self {
        Self {
            kind,
            enabled: false,
        }
    }
}

/// The backends this crate knows how to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Exact decimal arithmetic (`decimal` feature)
    Decimal,
    /// Arbitrary-size integers (`bigint` feature)
    #[serde(alias = "bigint")]
    BigInteger,
    /// `i64`/`f64` fallback, always available
    Native,
}

impl BackendKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Decimal => "decimal",
            Self::BigInteger => "big_integer",
            Self::Native => "native",
        }
    }

    /// Whether this kind was compiled into the current build.
    pub const fn is_available(self) -> bool {
        match self {
            Self::Decimal => cfg!(feature = "decimal"),
            Self::BigInteger => cfg!(feature = "bigint"),
            Self::Native => true,
        }
    }

    /// Builds the backend, or `None` (with a warning) when its feature is off.
    pub fn build(self, enabled: bool) -> Option<Arc<dyn Backend>> {
        match self {
            #[cfg(feature = "decimal")]
            Self::Decimal => Some(Arc::new(DecimalBackend::new().with_enabled(enabled))),
            #[cfg(feature = "bigint")]
            Self::BigInteger => Some(Arc::new(BigIntegerBackend::new().with_enabled(enabled))),
            Self::Native => Some(Arc::new(NativeBackend::new().with_enabled(enabled))),
            #[allow(unreachable_patterns)]
            unavailable => {
                warn!(backend = %unavailable, "configured backend is not compiled in, skipping");
                None
            }
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
