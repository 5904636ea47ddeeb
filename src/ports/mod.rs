// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! This module contains the trait definitions (ports) that define the interfaces
//! between the filtering layer, storage backends, filters and codecs. The storage
//! and codec traits are implemented by adapters in the adapters layer; filters
//! are supplied by the caller.

pub mod codec;
pub mod filter;
pub mod storage;

// Re-export commonly used types
pub use codec::ConfigCodec;
pub use filter::{CollectionFilter, StorageFilter};
pub use storage::Storage;
