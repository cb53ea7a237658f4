//! # Hydrator Factory
//!
//! Factory for creating hydrators against one registry and configuration, with an
//! optional per-identifier cache.
//!
//! ## Overview
//!
//! Building a [`Hydrator`] resolves and checks its type every time. Callers that
//! capture the same types over and over can go through a `HydratorFactory`, which
//! keeps one hydrator per identifier when `cache_hydrators` is enabled. Only
//! successful constructions are cached, so a type registered after a failed
//! attempt is picked up on the next call.
//!
//! ## Usage
//!
//! ```rust
//! use capture_core::registry::{HydratorFactory, TypeRegistry};
//! use capture_core::CaptureConfig;
//! use std::sync::Arc;
//!
//! let factory = HydratorFactory::new(Arc::new(TypeRegistry::new()), CaptureConfig::default());
//! assert!(factory.create_hydrator("app::Missing").is_err());
//! assert_eq!(factory.cache_stats().cached_hydrators, 0);
//! ```

use crate::config::CaptureConfig;
use crate::error::Result;
use crate::hydrator::Hydrator;
use crate::registry::TypeRegistry;
use crate::value::{Object, SourceValue};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Factory for creating hydrators with shared registry and configuration
#[derive(Debug)]
pub struct HydratorFactory {
    registry: Arc<TypeRegistry>,
    config: Arc<CaptureConfig>,
    /// Cache of created hydrators for reuse
    hydrator_cache: DashMap<String, Arc<Hydrator>>,
}

impl HydratorFactory {
    pub fn new(registry: Arc<TypeRegistry>, config: CaptureConfig) -> Self {
        Self {
            registry,
            config: Arc::new(config),
            hydrator_cache: DashMap::new(),
        }
    }

    /// Factory over the process-wide registry
    pub fn with_global_registry(config: CaptureConfig) -> Self {
        Self::new(TypeRegistry::global().clone(), config)
    }

    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    /// Create (or reuse) a hydrator for the identifier
    pub fn create_hydrator(&self, type_identifier: &str) -> Result<Arc<Hydrator>> {
        if self.config.cache_hydrators {
            if let Some(hydrator) = self.hydrator_cache.get(type_identifier) {
                debug!(type_identifier, "Returning cached hydrator");
                return Ok(hydrator.value().clone());
            }
        }

        let hydrator = Arc::new(
            Hydrator::with_registry(self.registry.clone(), type_identifier)?
                .with_config(self.config.clone()),
        );

        if self.config.cache_hydrators {
            // A concurrent caller may have won the race; either hydrator is equivalent
            return Ok(match self.hydrator_cache.entry(type_identifier.to_string()) {
                Entry::Occupied(entry) => {
                    debug!(type_identifier, "Reusing hydrator cached by a concurrent caller");
                    entry.get().clone()
                }
                Entry::Vacant(entry) => {
                    info!(type_identifier, "Created and cached new hydrator");
                    entry.insert(hydrator).value().clone()
                }
            });
        }

        Ok(hydrator)
    }

    /// Resolve the hydrator for the identifier and capture the source with it
    pub fn capture<'a>(
        &self,
        type_identifier: &str,
        source: impl Into<SourceValue<'a>>,
    ) -> Result<Object> {
        self.create_hydrator(type_identifier)?.capture(source)
    }

    /// Clear the hydrator cache
    pub fn clear_cache(&self) {
        self.hydrator_cache.clear();
        info!("Hydrator cache cleared");
    }

    /// Get cache statistics
    pub fn cache_stats(&self) -> HydratorCacheStats {
        let mut cache_keys: Vec<String> = self
            .hydrator_cache
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        cache_keys.sort();

        HydratorCacheStats {
            cached_hydrators: cache_keys.len(),
            cache_keys,
        }
    }
}

/// Statistics about the hydrator cache
#[derive(Debug, Clone)]
pub struct HydratorCacheStats {
    pub cached_hydrators: usize,
    pub cache_keys: Vec<String>,
}
