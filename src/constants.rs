//! # Capture Constants
//!
//! The fixed primitive kind tags a field can be declared with, and the
//! environment variable names the ambient layers read.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Environment variables consulted by configuration and logging
pub mod env {
    /// Prefix for configuration overrides, e.g. `CAPTURE_COERCION=strict`
    pub const CONFIG_PREFIX: &str = "CAPTURE";
    pub const ENVIRONMENT: &str = "CAPTURE_ENV";
    pub const FALLBACK_ENVIRONMENT: &str = "APP_ENV";
    pub const LOG_FORMAT: &str = "CAPTURE_LOG_FORMAT";
}

/// Primitive kind tags whose source values pass through hydration untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    /// Lists and plain associative arrays
    Array,
    String,
    Int,
    Float,
    Bool,
    /// Any already constructed instance
    Object,
    Callable,
    Resource,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 8] = [
        Self::Array,
        Self::String,
        Self::Int,
        Self::Float,
        Self::Bool,
        Self::Object,
        Self::Callable,
        Self::Resource,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Array => "array",
            Self::String => "string",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Object => "object",
            Self::Callable => "callable",
            Self::Resource => "resource",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PrimitiveKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "array" | "list" => Ok(Self::Array),
            "string" => Ok(Self::String),
            "int" | "integer" => Ok(Self::Int),
            "float" => Ok(Self::Float),
            "bool" | "boolean" => Ok(Self::Bool),
            "object" => Ok(Self::Object),
            "callable" => Ok(Self::Callable),
            "resource" => Ok(Self::Resource),
            _ => Err(format!("Invalid primitive kind: {s}")),
        }
    }
}
