//! # Registry Infrastructure
//!
//! Type metadata and hydrator construction.
//!
//! ## Available Registries
//!
//! - **TypeRegistry**: Descriptors for every type hydration can resolve
//! - **HydratorFactory**: Factory for creating and caching hydrators
//!
//! ## Architecture
//!
//! ```text
//! Registry Infrastructure
//! ├── TypeRegistry       (identifier -> descriptor, first registration wins)
//! └── HydratorFactory    (hydrator creation & caching over one registry)
//! ```

pub mod hydrator_factory;
pub mod type_registry;

// Re-export main types for easy access
pub use hydrator_factory::{HydratorCacheStats, HydratorFactory};
pub use type_registry::{RegistryStats, TypeRegistry};
