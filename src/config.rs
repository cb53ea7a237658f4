//! # Capture Configuration
//!
//! Settings that shape how hydration behaves, loaded with the `config` crate from
//! built-in defaults, an optional file, and `CAPTURE_*` environment variables (in
//! increasing order of precedence).
//!
//! ```rust,no_run
//! use capture_core::CaptureConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // CAPTURE_COERCION=strict CAPTURE_CACHE_HYDRATORS=false
//! let config = CaptureConfig::from_env()?;
//! let from_file = CaptureConfig::load("config/capture.toml")?;
//! # Ok(())
//! # }
//! ```

use crate::constants::env;
use crate::error::{CaptureError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use tracing::{debug, warn};

static GLOBAL_CONFIG: OnceLock<Arc<CaptureConfig>> = OnceLock::new();

/// How constructor arguments treat scalars of a different kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoercionMode {
    /// Numeric strings, integral floats and booleans convert like a loosely-typed host
    #[default]
    Coercive,
    /// Exact kinds only, apart from int to float widening
    Strict,
}

impl fmt::Display for CoercionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Coercive => write!(f, "coercive"),
            Self::Strict => write!(f, "strict"),
        }
    }
}

impl std::str::FromStr for CoercionMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "coercive" => Ok(Self::Coercive),
            "strict" => Ok(Self::Strict),
            _ => Err(format!("Invalid coercion mode: {s}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CaptureConfig {
    pub coercion: CoercionMode,
    /// Whether `HydratorFactory` keeps hydrators per type identifier
    pub cache_hydrators: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            coercion: CoercionMode::Coercive,
            cache_hydrators: true,
        }
    }
}

impl CaptureConfig {
    /// Defaults overridden by `CAPTURE_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::build(None)
    }

    /// Process-wide configuration used by [`crate::Hydrator::new`]
    ///
    /// Read from the environment on first use. An invalid environment falls back
    /// to the defaults.
    pub fn global() -> &'static Arc<CaptureConfig> {
        GLOBAL_CONFIG.get_or_init(|| {
            let config = Self::from_env().unwrap_or_else(|error| {
                warn!(error = %error, "Invalid capture configuration in environment, using defaults");
                Self::default()
            });
            Arc::new(config)
        })
    }

    /// Defaults, then the given TOML/YAML/JSON file, then the environment
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::build(Some(path.as_ref()))
    }

    fn build(path: Option<&Path>) -> Result<Self> {
        let defaults = Self::default();
        let mut builder = config::Config::builder()
            .set_default("coercion", defaults.coercion.to_string())?
            .set_default("cache_hydrators", defaults.cache_hydrators)?;

        if let Some(path) = path {
            if !path.exists() {
                return Err(CaptureError::Configuration(format!(
                    "Configuration file not found: {}",
                    path.display()
                )));
            }
            builder = builder.add_source(config::File::from(path));
        }

        let config: CaptureConfig = builder
            .add_source(config::Environment::with_prefix(env::CONFIG_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        debug!(
            coercion = %config.coercion,
            cache_hydrators = config.cache_hydrators,
            "Capture configuration loaded"
        );

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CaptureConfig::default();
        assert_eq!(config.coercion, CoercionMode::Coercive);
        assert!(config.cache_hydrators);
    }

    #[test]
    fn test_coercion_mode_parsing() {
        assert_eq!("strict".parse::<CoercionMode>(), Ok(CoercionMode::Strict));
        assert_eq!("coercive".parse::<CoercionMode>(), Ok(CoercionMode::Coercive));
        assert!("lenient".parse::<CoercionMode>().is_err());
        assert_eq!(CoercionMode::Strict.to_string(), "strict");
    }

    #[test]
    fn test_missing_file_is_a_configuration_error() {
        let result = CaptureConfig::load("/nonexistent/capture.toml");
        assert!(matches!(result, Err(CaptureError::Configuration(_))));
    }
}
