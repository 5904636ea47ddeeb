// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration entry data.
//!
//! An entry's value is an ordered mapping from string keys to arbitrary
//! structured values (nested mappings, sequences and scalars).

use crate::domain::errors::{Result, StorageError};
use serde_yaml::Value;
use std::collections::BTreeMap;

/// The data of a single configuration entry.
///
/// An empty mapping means "nothing to persist" when it reaches a write.
pub type ConfigData = BTreeMap<String, Value>;

/// The result of a batch read, keyed by entry name.
///
/// Names that do not exist are absent from the batch.
pub type ConfigBatch = BTreeMap<String, ConfigData>;

/// Converts a structured value into entry data.
///
/// `Null` becomes an empty mapping. Any other non-mapping value, or a mapping
/// with a non-string key, is rejected with a [`StorageError::Codec`] error.
///
/// # Examples
///
/// ```
/// use filtercfg::domain::config_data::config_data_from_value;
///
/// let value: serde_yaml::Value = serde_yaml::from_str("name: site\nlangcode: en").unwrap();
/// let data = config_data_from_value(value).unwrap();
/// assert_eq!(data.len(), 2);
/// assert_eq!(data["name"], serde_yaml::Value::from("site"));
/// ```
pub fn config_data_from_value(value: Value) -> Result<ConfigData> {
    match value {
        Value::Null => Ok(ConfigData::new()),
        Value::Mapping(mapping) => {
            let mut data = ConfigData::new();
            for (key, val) in mapping {
                match key {
                    Value::String(k) => {
                        data.insert(k, val);
                    }
                    other => {
                        return Err(StorageError::Codec {
                            message: format!("Non-string key in configuration data: {:?}", other),
                            source: None,
                        })
                    }
                }
            }
            Ok(data)
        }
        Value::Tagged(tagged) => config_data_from_value(tagged.value),
        other => Err(StorageError::Codec {
            message: format!(
                "Configuration data must be a mapping, found {}",
                value_kind(&other)
            ),
            source: None,
        }),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
