// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage trait definition.
//!
//! This module defines the `Storage` trait, the port every configuration
//! backend implements. The filtering layer implements it too, so a filtered
//! storage can stand in wherever a plain backend is expected.

use crate::domain::{CollectionName, ConfigBatch, ConfigData, Result};

/// A hierarchical key/value configuration store bound to one collection.
///
/// Entries are addressed by name within the collection this instance is bound
/// to. A different collection is reached through [`Storage::create_collection`],
/// which hands back a new instance.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow for use in multi-threaded
/// contexts. All methods take `&self`; backends that mutate state use interior
/// mutability.
///
/// # Examples
///
/// ```rust
/// use filtercfg::adapters::MemoryStorage;
/// use filtercfg::domain::ConfigData;
/// use filtercfg::ports::Storage;
///
/// # fn main() -> filtercfg::domain::Result<()> {
/// let storage = MemoryStorage::new();
/// let mut data = ConfigData::new();
/// data.insert("name".to_string(), "Example".into());
///
/// assert!(storage.write("system.site", data)?);
/// assert!(storage.exists("system.site")?);
/// assert_eq!(storage.list_all("system.")?, vec!["system.site".to_string()]);
/// # Ok(())
/// # }
/// ```
pub trait Storage: Send + Sync {
    /// Returns `true` if an entry with this name exists.
    fn exists(&self, name: &str) -> Result<bool>;

    /// Reads an entry.
    ///
    /// Returns `Ok(None)` if the entry does not exist.
    fn read(&self, name: &str) -> Result<Option<ConfigData>>;

    /// Reads several entries at once.
    ///
    /// Names that do not exist are left out of the returned batch.
    fn read_multiple(&self, names: &[String]) -> Result<ConfigBatch>;

    /// Writes an entry, returning whether the write succeeded.
    fn write(&self, name: &str, data: ConfigData) -> Result<bool>;

    /// Deletes an entry, returning whether anything was deleted.
    fn delete(&self, name: &str) -> Result<bool>;

    /// Renames an entry, returning whether the rename succeeded.
    fn rename(&self, name: &str, new_name: &str) -> Result<bool>;

    /// Encodes entry data into this backend's serialized form.
    fn encode(&self, data: &ConfigData) -> Result<String>;

    /// Decodes this backend's serialized form into entry data.
    fn decode(&self, raw: &str) -> Result<ConfigData>;

    /// Lists the names of all entries starting with `prefix`.
    ///
    /// An empty prefix lists every entry in the collection.
    fn list_all(&self, prefix: &str) -> Result<Vec<String>>;

    /// Deletes every entry starting with `prefix`.
    fn delete_all(&self, prefix: &str) -> Result<bool>;

    /// Creates a storage instance bound to another collection.
    fn create_collection(&self, collection: &CollectionName) -> Result<Box<dyn Storage>>;

    /// Returns the names of all non-default collections with data.
    fn get_all_collection_names(&self) -> Result<Vec<CollectionName>>;

    /// Returns the collection this instance is bound to.
    fn get_collection_name(&self) -> Result<CollectionName>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn exists(&self, name: &str) -> Result<bool> {
        (**self).exists(name)
    }

    fn read(&self, name: &str) -> Result<Option<ConfigData>> {
        (**self).read(name)
    }

    fn read_multiple(&self, names: &[String]) -> Result<ConfigBatch> {
        (**self).read_multiple(names)
    }

    fn write(&self, name: &str, data: ConfigData) -> Result<bool> {
        (**self).write(name, data)
    }

    fn delete(&self, name: &str) -> Result<bool> {
        (**self).delete(name)
    }

    fn rename(&self, name: &str, new_name: &str) -> Result<bool> {
        (**self).rename(name, new_name)
    }

    fn encode(&self, data: &ConfigData) -> Result<String> {
        (**self).encode(data)
    }

    fn decode(&self, raw: &str) -> Result<ConfigData> {
        (**self).decode(raw)
    }

    fn list_all(&self, prefix: &str) -> Result<Vec<String>> {
        (**self).list_all(prefix)
    }

    fn delete_all(&self, prefix: &str) -> Result<bool> {
        (**self).delete_all(prefix)
    }

    fn create_collection(&self, collection: &CollectionName) -> Result<Box<dyn Storage>> {
        (**self).create_collection(collection)
    }

    fn get_all_collection_names(&self) -> Result<Vec<CollectionName>> {
        (**self).get_all_collection_names()
    }

    fn get_collection_name(&self) -> Result<CollectionName> {
        (**self).get_collection_name()
    }
}
