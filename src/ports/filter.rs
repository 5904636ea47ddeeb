// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage filter trait definition.
//!
//! This module defines the `StorageFilter` trait, one policy step in the chain
//! driven by [`FilteringStorage`](crate::service::FilteringStorage). Every
//! method receives the value accumulated so far and returns the next one.

use crate::domain::{CollectionName, ConfigBatch, ConfigData, Result};
use crate::ports::Storage;
use std::sync::Arc;

/// A filter's decision about a derived collection.
///
/// Returned by [`StorageFilter::filter_create_collection`].
#[derive(Clone)]
pub enum CollectionFilter {
    /// The same filter instance continues into the new collection.
    Keep,
    /// Another filter instance takes this filter's place in the new collection.
    Replace(Arc<dyn StorageFilter>),
    /// The filter does not take part in the new collection.
    Skip,
}

impl std::fmt::Debug for CollectionFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectionFilter::Keep => write!(f, "Keep"),
            CollectionFilter::Replace(filter) => write!(f, "Replace({})", filter.name()),
            CollectionFilter::Skip => write!(f, "Skip"),
        }
    }
}

/// A trait for filters applied by a filtering storage.
///
/// Every method has a pass-through default, so a filter only overrides the
/// operations it cares about. Filters are invoked in chain order and each one
/// sees the output of the previous one (or the backend's raw result for the
/// first filter).
///
/// Returning an error aborts the rest of the chain and the operation.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`. Filters are shared through `Arc`
/// between a storage and the collections derived from it.
///
/// # Examples
///
/// ```rust
/// use filtercfg::domain::Result;
/// use filtercfg::ports::StorageFilter;
///
/// /// Hides every entry of the `devel` module.
/// struct HideDevel;
///
/// impl StorageFilter for HideDevel {
///     fn filter_exists(&self, name: &str, exists: bool) -> Result<bool> {
///         Ok(exists && !name.starts_with("devel."))
///     }
///
///     fn filter_list_all(&self, _prefix: &str, names: Vec<String>) -> Result<Vec<String>> {
///         Ok(names.into_iter().filter(|n| !n.starts_with("devel.")).collect())
///     }
/// }
///
/// let filter = HideDevel;
/// assert!(!filter.filter_exists("devel.settings", true).unwrap());
/// assert!(filter.filter_exists("system.site", true).unwrap());
/// ```
pub trait StorageFilter: Send + Sync {
    /// Returns a short name for the filter, used in logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Filters the result of an existence check.
    fn filter_exists(&self, _name: &str, exists: bool) -> Result<bool> {
        Ok(exists)
    }

    /// Filters the data read for an entry.
    fn filter_read(&self, _name: &str, data: Option<ConfigData>) -> Result<Option<ConfigData>> {
        Ok(data)
    }

    /// Filters the batch read for several entries.
    fn filter_read_multiple(&self, _names: &[String], data: ConfigBatch) -> Result<ConfigBatch> {
        Ok(data)
    }

    /// Filters data about to be written.
    ///
    /// `storage` is the wrapped backend, available for lookups such as merging
    /// against the data already stored. Returning an empty mapping means there
    /// is nothing to persist; the remaining filters are then not asked to
    /// transform it.
    fn filter_write(&self, _name: &str, data: ConfigData, _storage: &dyn Storage) -> Result<ConfigData> {
        Ok(data)
    }

    /// Decides whether a write that was filtered down to nothing should delete
    /// the existing entry.
    ///
    /// The first filter to return `true` wins.
    fn filter_write_empty_is_delete(&self, _name: &str) -> Result<bool> {
        Ok(false)
    }

    /// Filters whether an entry may be deleted.
    fn filter_delete(&self, _name: &str, delete: bool) -> Result<bool> {
        Ok(delete)
    }

    /// Filters whether an entry may be renamed.
    fn filter_rename(&self, _name: &str, _new_name: &str, rename: bool) -> Result<bool> {
        Ok(rename)
    }

    /// Filters a list of entry names.
    fn filter_list_all(&self, _prefix: &str, names: Vec<String>) -> Result<Vec<String>> {
        Ok(names)
    }

    /// Filters whether the entries under a prefix may be deleted.
    fn filter_delete_all(&self, _prefix: &str, delete: bool) -> Result<bool> {
        Ok(delete)
    }

    /// Decides how this filter takes part in a derived collection.
    fn filter_create_collection(&self, _collection: &CollectionName) -> Result<CollectionFilter> {
        Ok(CollectionFilter::Keep)
    }

    /// Filters the list of collection names.
    fn filter_get_all_collection_names(
        &self,
        collections: Vec<CollectionName>,
    ) -> Result<Vec<CollectionName>> {
        Ok(collections)
    }

    /// Filters the name of the current collection.
    fn filter_get_collection_name(&self, collection: CollectionName) -> Result<CollectionName> {
        Ok(collection)
    }
}
