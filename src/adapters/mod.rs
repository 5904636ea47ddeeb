// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing storage backend implementations.
//!
//! This module contains concrete implementations of the storage and codec
//! traits defined in the ports layer. Each backend implements the `Storage`
//! trait and can be wrapped by a `FilteringStorage`.

#[cfg(feature = "file")]
pub mod file;
#[cfg(feature = "memory")]
pub mod memory;
pub mod yaml_codec;

// Re-export adapters based on feature flags
#[cfg(feature = "file")]
pub use file::FileStorage;
#[cfg(feature = "memory")]
pub use memory::MemoryStorage;
pub use yaml_codec::YamlCodec;
