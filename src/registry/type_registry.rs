//! # Type Registry
//!
//! The metadata facility hydration resolves type identifiers against.
//!
//! ## Architecture
//!
//! ```text
//! type identifier -> TypeRegistry -> Arc<TypeDescriptor> -> fields + constructor
//! ```
//!
//! Descriptors are validated on registration and never mutated afterwards, so
//! the registry behaves as an append-only table: the first registration of an
//! identifier wins and later ones return the stored descriptor. Lookups go
//! through a sharded concurrent map and are safe from any thread.
//!
//! ## Usage
//!
//! ```rust
//! use capture_core::registry::TypeRegistry;
//! use capture_core::{FieldDescriptor, FieldType, Object, TypeDescriptor};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = TypeRegistry::new();
//! registry.register_descriptor(
//!     TypeDescriptor::new("app::Tag")
//!         .capturable()
//!         .field(FieldDescriptor::new("label", FieldType::STRING).capturable())
//!         .constructor(|args| Ok(Object::new("app::Tag", args.string()?))),
//! )?;
//!
//! assert!(registry.is_capturable("app::Tag"));
//! # Ok(())
//! # }
//! ```

use crate::descriptor::{Capturable, TypeDescriptor};
use crate::error::Result;
use crate::logging::log_registry_operation;
use crate::validation::validate_descriptor;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::{Arc, OnceLock};
use tracing::debug;

static GLOBAL_REGISTRY: OnceLock<Arc<TypeRegistry>> = OnceLock::new();

/// Registry statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryStats {
    pub total_types: usize,
    pub capturable_types: usize,
    /// Sorted registered identifiers
    pub type_identifiers: Vec<String>,
}

/// Concurrent table of type descriptors keyed by identifier
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: DashMap<String, Arc<TypeDescriptor>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry used by [`crate::Hydrator::new`]
    pub fn global() -> &'static Arc<TypeRegistry> {
        GLOBAL_REGISTRY.get_or_init(|| Arc::new(TypeRegistry::new()))
    }

    /// Register a [`Capturable`] type under its identifier
    pub fn register<T: Capturable>(&self) -> Result<Arc<TypeDescriptor>> {
        self.register_descriptor(TypeDescriptor::of::<T>())
    }

    /// Validate and register a descriptor, returning the stored one
    pub fn register_descriptor(&self, descriptor: TypeDescriptor) -> Result<Arc<TypeDescriptor>> {
        validate_descriptor(&descriptor)?;

        match self.types.entry(descriptor.identifier().to_string()) {
            Entry::Occupied(entry) => {
                debug!(
                    type_identifier = descriptor.identifier(),
                    "Type already registered, keeping the first registration"
                );
                Ok(entry.get().clone())
            }
            Entry::Vacant(entry) => {
                let stored = Arc::new(descriptor);
                entry.insert(stored.clone());
                log_registry_operation(
                    "register",
                    stored.identifier(),
                    "success",
                    Some(if stored.is_capturable() {
                        "capturable"
                    } else {
                        "not capturable"
                    }),
                );
                Ok(stored)
            }
        }
    }

    /// Look up a descriptor by identifier
    pub fn resolve(&self, type_identifier: &str) -> Option<Arc<TypeDescriptor>> {
        self.types
            .get(type_identifier)
            .map(|entry| entry.value().clone())
    }

    pub fn contains(&self, type_identifier: &str) -> bool {
        self.types.contains_key(type_identifier)
    }

    /// Whether the identifier is registered and marked capturable
    pub fn is_capturable(&self, type_identifier: &str) -> bool {
        self.resolve(type_identifier)
            .is_some_and(|descriptor| descriptor.is_capturable())
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn stats(&self) -> RegistryStats {
        let mut type_identifiers: Vec<String> =
            self.types.iter().map(|entry| entry.key().clone()).collect();
        type_identifiers.sort();

        RegistryStats {
            total_types: type_identifiers.len(),
            capturable_types: self
                .types
                .iter()
                .filter(|entry| entry.value().is_capturable())
                .count(),
            type_identifiers,
        }
    }
}
