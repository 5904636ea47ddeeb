// SPDX-License-Identifier: MIT OR Apache-2.0

//! YAML codec adapter.
//!
//! This module provides the codec used by the bundled backends to serialize
//! configuration entries as YAML documents.

use crate::domain::config_data::config_data_from_value;
use crate::domain::{ConfigData, Result, StorageError};
use crate::ports::ConfigCodec;

/// YAML codec implementation.
///
/// # Examples
///
/// ```rust
/// use filtercfg::adapters::YamlCodec;
/// use filtercfg::ports::ConfigCodec;
///
/// let codec = YamlCodec::new();
/// let data = codec.decode("name: Example\npage:\n  front: /node").unwrap();
/// assert_eq!(data["name"], serde_yaml::Value::from("Example"));
/// assert!(codec.encode(&data).unwrap().contains("front: /node"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlCodec;

impl YamlCodec {
    /// Creates a new YAML codec.
    pub fn new() -> Self {
        YamlCodec
    }
}

impl ConfigCodec for YamlCodec {
    fn encode(&self, data: &ConfigData) -> Result<String> {
        serde_yaml::to_string(data)
            .map_err(|e| StorageError::from_yaml_error(format!("Failed to encode YAML: {}", e), e))
    }

    fn decode(&self, raw: &str) -> Result<ConfigData> {
        if raw.trim().is_empty() {
            return Ok(ConfigData::new());
        }

        let value: serde_yaml::Value = serde_yaml::from_str(raw)
            .map_err(|e| StorageError::from_yaml_error(format!("Failed to parse YAML: {}", e), e))?;
        config_data_from_value(value)
    }

    fn file_extension(&self) -> &str {
        "yml"
    }
}
