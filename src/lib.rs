// SPDX-License-Identifier: MIT OR Apache-2.0

//! A hexagonal architecture filtering layer for configuration storage.
//!
//! This crate wraps a hierarchical key/value configuration store and routes
//! every read and write through an ordered chain of filters. Filters can
//! exclude, merge, or conditionally delete entries without the backend or the
//! caller knowing that filtering exists.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Core types (`ConfigData`, `CollectionName`, errors)
//! - **Ports**: Trait definitions that define interfaces (`Storage`, `StorageFilter`, `ConfigCodec`)
//! - **Adapters**: Storage backends (in-memory, YAML files) and the YAML codec
//! - **Service**: `FilteringStorage`, which drives the filter chain
//!
//! # Filter Chain
//!
//! - Reads ask the backend first, then pass the result through each filter in order
//! - Writes pass the data through each filter in order, then hand it to the backend
//! - A write filtered down to nothing is skipped, or becomes a delete when a
//!   filter asks for it
//! - Collections derive their own chain: each filter decides whether it goes along
//!
//! # Feature Flags
//!
//! - `memory`: Enable the in-memory backend (default)
//! - `file`: Enable the YAML file backend (default)
//! - `full`: Enable all features
//!
//! # Quick Start
//!
//! ```rust
//! use filtercfg::prelude::*;
//! use std::sync::Arc;
//!
//! /// Keeps the `devel` module out of exported configuration.
//! struct ExcludeDevel;
//!
//! impl StorageFilter for ExcludeDevel {
//!     fn filter_write(&self, name: &str, data: ConfigData, _storage: &dyn Storage) -> Result<ConfigData> {
//!         Ok(if name.starts_with("devel.") { ConfigData::new() } else { data })
//!     }
//!
//!     fn filter_write_empty_is_delete(&self, name: &str) -> Result<bool> {
//!         Ok(name.starts_with("devel."))
//!     }
//! }
//!
//! # fn main() -> Result<()> {
//! let storage = FilteringStorage::with_filter(Box::new(MemoryStorage::new()), Arc::new(ExcludeDevel));
//!
//! let mut data = ConfigData::new();
//! data.insert("enabled".to_string(), true.into());
//!
//! // Reported as success, but nothing is stored.
//! assert!(storage.write("devel.settings", data.clone())?);
//! assert!(!storage.exists("devel.settings")?);
//!
//! assert!(storage.write("system.site", data)?);
//! assert!(storage.exists("system.site")?);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::domain::{CollectionName, ConfigBatch, ConfigData, Result, StorageError};
    pub use crate::ports::{CollectionFilter, ConfigCodec, Storage, StorageFilter};
    pub use crate::service::{FilteringStorage, FilteringStorageBuilder};

    // Re-export adapters based on feature flags
    #[cfg(feature = "file")]
    pub use crate::adapters::FileStorage;
    #[cfg(feature = "memory")]
    pub use crate::adapters::MemoryStorage;
    pub use crate::adapters::YamlCodec;
}
