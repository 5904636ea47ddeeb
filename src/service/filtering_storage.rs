// SPDX-License-Identifier: MIT OR Apache-2.0

//! Filtering storage implementation.
//!
//! This module provides `FilteringStorage`, a decorator that routes every
//! storage operation through an ordered chain of filters before it reaches the
//! backend (writes) or before the result reaches the caller (reads).

use crate::domain::{CollectionName, ConfigBatch, ConfigData, Result, StorageError};
use crate::ports::{CollectionFilter, Storage, StorageFilter};
use std::sync::Arc;

/// A storage that filters every operation of a wrapped backend.
///
/// The filter chain is fixed at construction. Reads take the backend's result
/// and pass it through each filter in order. Writes pass the input through
/// each filter in order and hand the final value to the backend. Errors from
/// the backend or from a filter are returned unchanged.
///
/// `FilteringStorage` implements [`Storage`] itself, so it can be used
/// wherever the backend is expected, including as the backend of another
/// filtering storage.
///
/// # Examples
///
/// ```rust
/// use filtercfg::prelude::*;
/// use std::sync::Arc;
///
/// struct HideDevel;
///
/// impl StorageFilter for HideDevel {
///     fn filter_read(&self, name: &str, data: Option<ConfigData>) -> Result<Option<ConfigData>> {
///         Ok(if name.starts_with("devel.") { None } else { data })
///     }
/// }
///
/// # fn main() -> Result<()> {
/// let backend = MemoryStorage::new();
/// let mut data = ConfigData::new();
/// data.insert("enabled".to_string(), true.into());
/// backend.write("devel.settings", data)?;
///
/// let storage = FilteringStorage::builder()
///     .with_storage(Box::new(backend))
///     .with_filter(Arc::new(HideDevel))
///     .build()?;
///
/// assert!(storage.read("devel.settings")?.is_none());
/// # Ok(())
/// # }
/// ```
pub struct FilteringStorage {
    /// The wrapped backend
    storage: Box<dyn Storage>,
    /// Filters, in the order they are applied
    filters: Vec<Arc<dyn StorageFilter>>,
}

impl FilteringStorage {
    /// Creates a filtering storage with the given filter chain.
    pub fn new<I>(storage: Box<dyn Storage>, filters: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn StorageFilter>>,
    {
        Self {
            storage,
            filters: filters.into_iter().collect(),
        }
    }

    /// Creates a filtering storage with a single filter.
    pub fn with_filter(storage: Box<dyn Storage>, filter: Arc<dyn StorageFilter>) -> Self {
        Self::new(storage, std::iter::once(filter))
    }

    /// Creates a new filtering storage builder.
    pub fn builder() -> FilteringStorageBuilder {
        FilteringStorageBuilder::new()
    }

    /// Returns the wrapped backend.
    pub fn inner(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    /// Returns the number of filters in the chain.
    pub fn filter_count(&self) -> usize {
        self.filters.len()
    }

    /// Returns the names of the filters in chain order.
    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Creates a filtering storage for another collection.
    ///
    /// The backend creates the new inner storage. Each filter decides on its
    /// own whether it continues into the new collection, is replaced, or is
    /// left out; the answers are collected in chain order.
    pub fn collection(&self, collection: &CollectionName) -> Result<FilteringStorage> {
        let mut filters = Vec::with_capacity(self.filters.len());
        for filter in &self.filters {
            match filter.filter_create_collection(collection)? {
                CollectionFilter::Keep => filters.push(Arc::clone(filter)),
                CollectionFilter::Replace(replacement) => {
                    tracing::trace!(
                        "Filter '{}' replaced by '{}' for collection '{}'",
                        filter.name(),
                        replacement.name(),
                        collection
                    );
                    filters.push(replacement);
                }
                CollectionFilter::Skip => {
                    tracing::debug!(
                        "Filter '{}' left out of collection '{}'",
                        filter.name(),
                        collection
                    );
                }
            }
        }

        let storage = self.storage.create_collection(collection)?;
        Ok(FilteringStorage { storage, filters })
    }

    /// Asks the chain, in order, whether an empty write means delete.
    ///
    /// Stops at the first filter that says yes.
    fn empty_write_is_delete(&self, name: &str) -> Result<Option<&str>> {
        for filter in &self.filters {
            if filter.filter_write_empty_is_delete(name)? {
                return Ok(Some(filter.name()));
            }
        }
        Ok(None)
    }
}

impl Storage for FilteringStorage {
    fn exists(&self, name: &str) -> Result<bool> {
        let mut exists = self.storage.exists(name)?;
        for filter in &self.filters {
            exists = filter.filter_exists(name, exists)?;
        }
        Ok(exists)
    }

    fn read(&self, name: &str) -> Result<Option<ConfigData>> {
        let mut data = self.storage.read(name)?;
        for filter in &self.filters {
            data = filter.filter_read(name, data)?;
        }
        Ok(data)
    }

    fn read_multiple(&self, names: &[String]) -> Result<ConfigBatch> {
        let mut data = self.storage.read_multiple(names)?;
        for filter in &self.filters {
            data = filter.filter_read_multiple(names, data)?;
        }
        Ok(data)
    }

    fn write(&self, name: &str, data: ConfigData) -> Result<bool> {
        let mut data = data;
        for filter in &self.filters {
            if data.is_empty() {
                break;
            }
            tracing::trace!("Filter '{}' transforming write of '{}'", filter.name(), name);
            data = filter.filter_write(name, data, self.storage.as_ref())?;
        }

        if !data.is_empty() {
            return self.storage.write(name, data);
        }

        if self.storage.exists(name)? {
            if let Some(filter) = self.empty_write_is_delete(name)? {
                tracing::debug!(
                    "Empty write of '{}' treated as delete by filter '{}'",
                    name,
                    filter
                );
                return self.storage.delete(name);
            }
        }

        // Nothing left to persist; not an error.
        tracing::debug!("Write of '{}' filtered to nothing, skipped", name);
        Ok(true)
    }

    fn delete(&self, name: &str) -> Result<bool> {
        let mut delete = true;
        for filter in &self.filters {
            delete = filter.filter_delete(name, delete)?;
        }

        if !delete {
            tracing::debug!("Delete of '{}' vetoed by filters", name);
            return Ok(false);
        }
        self.storage.delete(name)
    }

    fn rename(&self, name: &str, new_name: &str) -> Result<bool> {
        let mut rename = true;
        for filter in &self.filters {
            rename = filter.filter_rename(name, new_name, rename)?;
        }

        if !rename {
            tracing::debug!("Rename of '{}' to '{}' vetoed by filters", name, new_name);
            return Ok(false);
        }
        self.storage.rename(name, new_name)
    }

    fn encode(&self, data: &ConfigData) -> Result<String> {
        self.storage.encode(data)
    }

    fn decode(&self, raw: &str) -> Result<ConfigData> {
        self.storage.decode(raw)
    }

    fn list_all(&self, prefix: &str) -> Result<Vec<String>> {
        let mut names = self.storage.list_all(prefix)?;
        for filter in &self.filters {
            names = filter.filter_list_all(prefix, names)?;
        }
        Ok(names)
    }

    fn delete_all(&self, prefix: &str) -> Result<bool> {
        let mut delete = true;
        for filter in &self.filters {
            delete = filter.filter_delete_all(prefix, delete)?;
        }

        if !delete {
            tracing::debug!("Delete of all entries under '{}' vetoed by filters", prefix);
            return Ok(false);
        }
        self.storage.delete_all(prefix)
    }

    fn create_collection(&self, collection: &CollectionName) -> Result<Box<dyn Storage>> {
        Ok(Box::new(self.collection(collection)?))
    }

    fn get_all_collection_names(&self) -> Result<Vec<CollectionName>> {
        let mut collections = self.storage.get_all_collection_names()?;
        for filter in &self.filters {
            collections = filter.filter_get_all_collection_names(collections)?;
        }
        Ok(collections)
    }

    fn get_collection_name(&self) -> Result<CollectionName> {
        let mut collection = self.storage.get_collection_name()?;
        for filter in &self.filters {
            collection = filter.filter_get_collection_name(collection)?;
        }
        Ok(collection)
    }
}

/// Builder for constructing a `FilteringStorage`.
///
/// Filters are applied in the order they are added.
///
/// # Examples
///
/// ```rust
/// use filtercfg::adapters::MemoryStorage;
/// use filtercfg::service::FilteringStorageBuilder;
///
/// # fn main() -> filtercfg::domain::Result<()> {
/// let storage = FilteringStorageBuilder::new()
///     .with_storage(Box::new(MemoryStorage::new()))
///     .build()?;
/// assert_eq!(storage.filter_count(), 0);
/// # Ok(())
/// # }
/// ```
pub struct FilteringStorageBuilder {
    storage: Option<Box<dyn Storage>>,
    filters: Vec<Arc<dyn StorageFilter>>,
}

impl FilteringStorageBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            storage: None,
            filters: Vec::new(),
        }
    }

    /// Sets the backend to wrap.
    pub fn with_storage(mut self, storage: Box<dyn Storage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Appends a filter to the chain.
    pub fn with_filter(mut self, filter: Arc<dyn StorageFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Appends several filters to the chain, keeping their order.
    pub fn with_filters<I>(mut self, filters: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn StorageFilter>>,
    {
        self.filters.extend(filters);
        self
    }

    /// Builds the filtering storage.
    ///
    /// Fails with [`StorageError::MissingBackend`] if no backend was set.
    pub fn build(self) -> Result<FilteringStorage> {
        let storage = self.storage.ok_or(StorageError::MissingBackend)?;
        Ok(FilteringStorage::new(storage, self.filters))
    }
}

impl Default for FilteringStorageBuilder {
    fn default() -> Self {
        Self::new()
    }
}
