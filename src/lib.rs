#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Capture Core
//!
//! Typed object hydration from loosely-typed key/value data.
//!
//! ## Overview
//!
//! A *capturable* type declares which of its fields are filled from a source
//! mapping (or record) and in which order they reach its constructor. Capturing
//! walks those fields, looks each one up by name in the source, recursively
//! captures nested capturable types, and hands the resolved values to the
//! constructor. The result is a fully built instance or a typed error; nothing
//! partial is ever returned.
//!
//! ## Architecture
//!
//! Rust has no runtime reflection, so the metadata capturing needs lives in a
//! [`TypeRegistry`]: each type registers a [`TypeDescriptor`] listing its fields
//! (name, declared [`FieldType`], capturable marker) and a constructor taking
//! [`Arguments`]. Types usually get there by implementing [`Capturable`].
//!
//! ```text
//! source mapping ─> Hydrator ─> TypeRegistry ─> descriptor ─> Arguments ─> constructor
//!                      └── nested field ─> Hydrator (same registry) ─┘
//! ```
//!
//! ## Module Organization
//!
//! - [`value`] - Dynamic values, mappings, records and opaque instances
//! - [`descriptor`] - Field and type descriptors, the [`Capturable`] trait
//! - [`arguments`] - Positional constructor arguments with typed extraction
//! - [`hydrator`] - The capture algorithm
//! - [`registry`] - Type registry and hydrator factory
//! - [`config`] - Configuration management
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured logging setup
//!
//! ## Quick Start
//!
//! ```rust
//! use capture_core::{
//!     Arguments, Capturable, ConstructResult, FieldDescriptor, FieldType, Hydrator, Record,
//!     TypeRegistry,
//! };
//!
//! #[derive(Debug)]
//! struct Tag {
//!     label: String,
//!     weight: i64,
//! }
//!
//! impl Capturable for Tag {
//!     fn type_identifier() -> &'static str {
//!         "quickstart::Tag"
//!     }
//!
//!     fn fields() -> Vec<FieldDescriptor> {
//!         vec![
//!             FieldDescriptor::new("label", FieldType::STRING).capturable(),
//!             FieldDescriptor::new("weight", FieldType::INT).capturable(),
//!         ]
//!     }
//!
//!     fn construct(args: &mut Arguments) -> ConstructResult<Self> {
//!         Ok(Self { label: args.string()?, weight: args.int()? })
//!     }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! TypeRegistry::global().register::<Tag>()?;
//!
//! let source = Record::new().with("weight", 3).with("label", "urgent");
//! let tag: Tag = Hydrator::for_type::<Tag>()?.capture_into(&source)?;
//! assert_eq!((tag.label.as_str(), tag.weight), ("urgent", 3));
//! # Ok(())
//! # }
//! ```

pub mod arguments;
pub mod config;
pub mod constants;
pub mod descriptor;
pub mod error;
pub mod hydrator;
pub mod logging;
pub mod registry;
pub mod validation;
pub mod value;

pub use arguments::Arguments;
pub use config::{CaptureConfig, CoercionMode};
pub use constants::PrimitiveKind;
pub use descriptor::{Capturable, Constructor, FieldDescriptor, FieldType, TypeDescriptor};
pub use error::{CaptureError, ConstructError, ConstructResult, Result};
pub use hydrator::Hydrator;
pub use registry::{HydratorCacheStats, HydratorFactory, RegistryStats, TypeRegistry};
pub use value::{Callable, Mapping, Object, Record, Resource, SourceValue, Value};
