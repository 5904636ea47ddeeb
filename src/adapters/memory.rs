// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory storage adapter.
//!
//! This module provides a storage backend that keeps every collection in
//! memory. Instances derived through `create_collection` share the same data.

use crate::adapters::YamlCodec;
use crate::domain::{CollectionName, ConfigBatch, ConfigData, Result, StorageError};
use crate::ports::{ConfigCodec, Storage};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

type Collections = BTreeMap<CollectionName, BTreeMap<String, ConfigData>>;

/// Storage backend holding configuration in memory.
///
/// Useful for tests and for staging configuration before it is written to a
/// persistent backend.
///
/// # Examples
///
/// ```rust
/// use filtercfg::adapters::MemoryStorage;
/// use filtercfg::domain::{CollectionName, ConfigData};
/// use filtercfg::ports::Storage;
///
/// # fn main() -> filtercfg::domain::Result<()> {
/// let storage = MemoryStorage::new();
/// let french = storage.create_collection(&CollectionName::from("language.fr"))?;
///
/// let mut data = ConfigData::new();
/// data.insert("name".to_string(), "Exemple".into());
/// french.write("system.site", data)?;
///
/// assert!(!storage.exists("system.site")?);
/// assert_eq!(
///     storage.get_all_collection_names()?,
///     vec![CollectionName::from("language.fr")]
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    /// Collection this instance is bound to
    collection: CollectionName,
    /// Data of all collections, shared between derived instances
    data: Arc<RwLock<Collections>>,
    codec: YamlCodec,
}

impl MemoryStorage {
    /// Creates an empty storage bound to the default collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage for the default collection with the given entries.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use filtercfg::adapters::MemoryStorage;
    /// use filtercfg::domain::ConfigData;
    /// use filtercfg::ports::Storage;
    /// use std::collections::BTreeMap;
    ///
    /// let mut entries = BTreeMap::new();
    /// entries.insert("core.extension".to_string(), ConfigData::new());
    ///
    /// let storage = MemoryStorage::with_entries(entries);
    /// assert!(storage.exists("core.extension").unwrap());
    /// ```
    pub fn with_entries(entries: BTreeMap<String, ConfigData>) -> Self {
        let storage = Self::new();
        if let Ok(mut data) = storage.data.write() {
            data.insert(CollectionName::default(), entries);
        }
        storage
    }

    fn read_lock(&self) -> Result<RwLockReadGuard<'_, Collections>> {
        self.data
            .read()
            .map_err(|_| StorageError::backend("memory", "storage lock poisoned"))
    }

    fn write_lock(&self) -> Result<RwLockWriteGuard<'_, Collections>> {
        self.data
            .write()
            .map_err(|_| StorageError::backend("memory", "storage lock poisoned"))
    }
}

impl Storage for MemoryStorage {
    fn exists(&self, name: &str) -> Result<bool> {
        let data = self.read_lock()?;
        Ok(data
            .get(&self.collection)
            .map_or(false, |entries| entries.contains_key(name)))
    }

    fn read(&self, name: &str) -> Result<Option<ConfigData>> {
        let data = self.read_lock()?;
        Ok(data
            .get(&self.collection)
            .and_then(|entries| entries.get(name))
            .cloned())
    }

    fn read_multiple(&self, names: &[String]) -> Result<ConfigBatch> {
        let data = self.read_lock()?;
        let mut batch = ConfigBatch::new();
        if let Some(entries) = data.get(&self.collection) {
            for name in names {
                if let Some(value) = entries.get(name) {
                    batch.insert(name.clone(), value.clone());
                }
            }
        }
        Ok(batch)
    }

    fn write(&self, name: &str, value: ConfigData) -> Result<bool> {
        let mut data = self.write_lock()?;
        data.entry(self.collection.clone())
            .or_default()
            .insert(name.to_string(), value);
        Ok(true)
    }

    fn delete(&self, name: &str) -> Result<bool> {
        let mut data = self.write_lock()?;
        let removed = data
            .get_mut(&self.collection)
            .and_then(|entries| entries.remove(name))
            .is_some();
        Ok(removed)
    }

    fn rename(&self, name: &str, new_name: &str) -> Result<bool> {
        let mut data = self.write_lock()?;
        let Some(entries) = data.get_mut(&self.collection) else {
            return Ok(false);
        };
        match entries.remove(name) {
            Some(value) => {
                entries.insert(new_name.to_string(), value);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn encode(&self, data: &ConfigData) -> Result<String> {
        self.codec.encode(data)
    }

    fn decode(&self, raw: &str) -> Result<ConfigData> {
        self.codec.decode(raw)
    }

    fn list_all(&self, prefix: &str) -> Result<Vec<String>> {
        let data = self.read_lock()?;
        Ok(data
            .get(&self.collection)
            .map(|entries| {
                entries
                    .keys()
                    .filter(|name| name.starts_with(prefix))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn delete_all(&self, prefix: &str) -> Result<bool> {
        let mut data = self.write_lock()?;
        if let Some(entries) = data.get_mut(&self.collection) {
            entries.retain(|name, _| !name.starts_with(prefix));
        }
        Ok(true)
    }

    fn create_collection(&self, collection: &CollectionName) -> Result<Box<dyn Storage>> {
        Ok(Box::new(MemoryStorage {
            collection: collection.clone(),
            data: Arc::clone(&self.data),
            codec: self.codec,
        }))
    }

    fn get_all_collection_names(&self) -> Result<Vec<CollectionName>> {
        let data = self.read_lock()?;
        Ok(data
            .iter()
            .filter(|(name, entries)| !name.is_default() && !entries.is_empty())
            .map(|(name, _)| name.clone())
            .collect())
    }

    fn get_collection_name(&self) -> Result<CollectionName> {
        Ok(self.collection.clone())
    }
}
