// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the filtering storage.
//!
//! This module contains `FilteringStorage`, which wraps a storage backend and
//! drives a chain of filters around every operation.

pub mod filtering_storage;

// Re-export commonly used types
pub use filtering_storage::{FilteringStorage, FilteringStorageBuilder};
