//! # Hydrator
//!
//! Builds typed instances of a capturable type from loosely-typed sources.
//!
//! ## Algorithm
//!
//! ```text
//! capture(source)
//! ├── build_arguments: for each capturable field, in declaration order
//! │   ├── no declared type          -> MissingFieldType
//! │   ├── union / intersection      -> UnsupportedType
//! │   └── build_argument
//! │       ├── key/member missing    -> CaptureFailed(MissingValue)
//! │       ├── primitive kind        -> raw value, untouched
//! │       └── nested type           -> mapping/record? recurse : NotCapturableValue
//! └── constructor(arguments)        -> instance, or CaptureFailed(cause)
//! ```
//!
//! The walk is depth-first and fail-fast; nothing partial is ever returned. There
//! is no cycle detection: a type whose capturable fields lead back to itself keeps
//! recursing for as long as the source keeps nesting.
//!
//! ## Usage
//!
//! ```rust
//! use capture_core::{
//!     Arguments, Capturable, ConstructResult, FieldDescriptor, FieldType, Hydrator,
//!     TypeRegistry,
//! };
//! use capture_core::value::Value;
//! use serde_json::json;
//!
//! #[derive(Debug, PartialEq)]
//! struct Address {
//!     country: String,
//!     city: String,
//! }
//!
//! impl Capturable for Address {
//!     fn fields() -> Vec<FieldDescriptor> {
//!         vec![
//!             FieldDescriptor::new("country", FieldType::STRING).capturable(),
//!             FieldDescriptor::new("city", FieldType::STRING).capturable(),
//!         ]
//!     }
//!
//!     fn construct(args: &mut Arguments) -> ConstructResult<Self> {
//!         Ok(Self { country: args.string()?, city: args.string()? })
//!     }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! TypeRegistry::global().register::<Address>()?;
//!
//! let source = Value::from(json!({"city": "Tokyo", "country": "Japan"}));
//! let Value::Mapping(source) = source else { unreachable!() };
//!
//! let address: Address = Hydrator::for_type::<Address>()?.capture_into(&source)?;
//! assert_eq!(address.city, "Tokyo");
//! # Ok(())
//! # }
//! ```

use crate::arguments::Arguments;
use crate::config::CaptureConfig;
use crate::descriptor::{Capturable, FieldType, TypeDescriptor};
use crate::error::{CaptureError, ConstructError, Result};
use crate::logging::log_capture_failure;
use crate::registry::TypeRegistry;
use crate::value::{Object, SourceValue, Value};
use std::any::Any;
use std::error::Error as _;
use std::sync::Arc;
use tracing::debug;

/// Captures instances of one capturable type
///
/// A hydrator holds no mutable state; it can be shared across threads and reused
/// for any number of captures.
#[derive(Debug, Clone)]
pub struct Hydrator {
    descriptor: Arc<TypeDescriptor>,
    registry: Arc<TypeRegistry>,
    config: Arc<CaptureConfig>,
}

impl Hydrator {
    /// Bind to a type in the process-wide registry, with the process-wide configuration
    pub fn new(type_identifier: &str) -> Result<Self> {
        Ok(
            Self::with_registry(TypeRegistry::global().clone(), type_identifier)?
                .with_config(CaptureConfig::global().clone()),
        )
    }

    /// Bind to a [`Capturable`] type in the process-wide registry
    pub fn for_type<T: Capturable>() -> Result<Self> {
        Self::new(T::type_identifier())
    }

    /// Bind to a type in the given registry, with default configuration
    pub fn with_registry(registry: Arc<TypeRegistry>, type_identifier: &str) -> Result<Self> {
        let descriptor = registry
            .resolve(type_identifier)
            .ok_or_else(|| CaptureError::UnknownType(type_identifier.to_string()))?;

        if !descriptor.is_capturable() {
            return Err(CaptureError::NotCapturable(
                descriptor.identifier().to_string(),
            ));
        }

        debug!(
            type_identifier = descriptor.identifier(),
            arity = descriptor.arity(),
            "Hydrator bound to capturable type"
        );

        Ok(Self {
            descriptor,
            registry,
            config: Arc::new(CaptureConfig::default()),
        })
    }

    /// Use the given configuration for this hydrator and the nested ones it creates
    pub fn with_config(mut self, config: Arc<CaptureConfig>) -> Self {
        self.config = config;
        self
    }

    pub fn type_identifier(&self) -> &str {
        self.descriptor.identifier()
    }

    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    /// Construct an instance of the bound type from a mapping or record
    pub fn capture<'a>(&self, source: impl Into<SourceValue<'a>>) -> Result<Object> {
        let source = source.into();
        debug!(
            type_identifier = self.type_identifier(),
            source = source.kind_name(),
            "Capturing"
        );

        let mut arguments = self.build_arguments(source)?;
        let given = arguments.len();

        self.descriptor
            .instantiate(&mut arguments)
            .and_then(|instance| match arguments.remaining() {
                0 => Ok(instance),
                _ => Err(ConstructError::ArgumentCount {
                    expected: arguments.consumed(),
                    given,
                }),
            })
            .map_err(|cause| self.capture_failed(cause))
    }

    /// Capture and take the instance as its concrete type
    pub fn capture_into<'a, T: Any + Send + Sync>(
        &self,
        source: impl Into<SourceValue<'a>>,
    ) -> Result<T> {
        self.capture(source)?.into_inner::<T>().map_err(|object| {
            self.capture_failed(ConstructError::Invalid(format!(
                "Captured {} is not a {}",
                object.type_name(),
                std::any::type_name::<T>()
            )))
        })
    }

    /// Resolve the constructor arguments: one per capturable field, in declaration order
    fn build_arguments(&self, source: SourceValue<'_>) -> Result<Arguments> {
        let mut arguments = Arguments::new(self.config.coercion);

        for field in self.descriptor.capturable_fields() {
            let field_type = field
                .declared_type()
                .ok_or_else(|| CaptureError::MissingFieldType(field.name().to_string()))?;

            if !field_type.is_supported() {
                return Err(CaptureError::UnsupportedType(
                    field_type.kind_name().to_string(),
                ));
            }

            let value = self.build_argument(field_type, source, field.name())?;
            arguments.push(field.name(), value);
        }

        Ok(arguments)
    }

    fn build_argument(
        &self,
        field_type: &FieldType,
        source: SourceValue<'_>,
        field_name: &str,
    ) -> Result<Value> {
        let raw = source.get(field_name).ok_or_else(|| {
            self.capture_failed(ConstructError::MissingValue {
                field: field_name.to_string(),
            })
        })?;

        match field_type {
            FieldType::Primitive(_) => Ok(raw.clone()),
            FieldType::Nested(type_identifier) => {
                let nested_source = SourceValue::from_value(raw)
                    .ok_or_else(|| CaptureError::NotCapturableValue(field_name.to_string()))?;

                let nested = Hydrator::with_registry(self.registry.clone(), type_identifier)?
                    .with_config(self.config.clone());
                nested.capture(nested_source).map(Value::Object)
            }
            FieldType::Union(_) | FieldType::Intersection(_) => Err(
                CaptureError::UnsupportedType(field_type.kind_name().to_string()),
            ),
        }
    }

    fn capture_failed(&self, cause: ConstructError) -> CaptureError {
        let error = CaptureError::capture_failed(self.type_identifier(), cause);
        let cause = error.source().map(ToString::to_string);
        log_capture_failure(self.type_identifier(), &error.to_string(), cause.as_deref());
        error
    }
}
