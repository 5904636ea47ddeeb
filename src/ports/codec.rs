// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration codec trait definition.
//!
//! This module defines the `ConfigCodec` trait, which provides an interface for
//! turning entry data into a serialized document and back. Backends delegate
//! [`Storage::encode`](crate::ports::Storage::encode) and
//! [`Storage::decode`](crate::ports::Storage::decode) to a codec.

use crate::domain::{ConfigData, Result};

/// A trait for encoding and decoding configuration entries.
///
/// # Examples
///
/// ```rust
/// use filtercfg::domain::{ConfigData, Result};
/// use filtercfg::ports::ConfigCodec;
///
/// struct KeysOnly;
///
/// impl ConfigCodec for KeysOnly {
///     fn encode(&self, data: &ConfigData) -> Result<String> {
///         Ok(data.keys().cloned().collect::<Vec<_>>().join(","))
///     }
///
///     fn decode(&self, _raw: &str) -> Result<ConfigData> {
///         Ok(ConfigData::new())
///     }
///
///     fn file_extension(&self) -> &str {
///         "keys"
///     }
/// }
///
/// let mut data = ConfigData::new();
/// data.insert("a".to_string(), 1.into());
/// data.insert("b".to_string(), 2.into());
/// assert_eq!(KeysOnly.encode(&data).unwrap(), "a,b");
/// ```
pub trait ConfigCodec: Send + Sync {
    /// Encodes entry data into a serialized document.
    fn encode(&self, data: &ConfigData) -> Result<String>;

    /// Decodes a serialized document into entry data.
    ///
    /// An empty document decodes to an empty mapping.
    fn decode(&self, raw: &str) -> Result<ConfigData>;

    /// Returns the file extension (without the leading dot) for documents
    /// produced by this codec.
    fn file_extension(&self) -> &str;
}
