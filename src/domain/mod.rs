// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core types.
//!
//! This module contains the core domain types for the storage crate. It is
//! independent of any backend and defines the fundamental concepts used
//! throughout the library.

pub mod collection_name;
pub mod config_data;
pub mod errors;

// Re-export commonly used types
pub use collection_name::CollectionName;
pub use config_data::{ConfigBatch, ConfigData};
pub use errors::{Result, StorageError};
