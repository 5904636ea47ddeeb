// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared test doubles for the filtering storage tests.
//!
//! `RecordingStorage` and `TaggingFilter` write every call they receive into a
//! shared `CallLog`, so tests can assert on the exact order of operations.

#![allow(dead_code)]

use filtercfg::adapters::MemoryStorage;
use filtercfg::domain::{CollectionName, ConfigBatch, ConfigData, Result, StorageError};
use filtercfg::ports::{CollectionFilter, Storage, StorageFilter};
use serde_yaml::Value;
use std::sync::{Arc, Mutex};

/// Ordered record of calls made to test doubles.
pub type CallLog = Arc<Mutex<Vec<String>>>;

/// Key under which tagging filters record themselves in entry data.
pub const TAGS_KEY: &str = "tags";

/// Creates an empty call log.
pub fn new_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// Returns a snapshot of the calls recorded so far.
pub fn calls(log: &CallLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

/// Returns the recorded calls starting with `prefix`.
pub fn calls_with_prefix(log: &CallLog, prefix: &str) -> Vec<String> {
    calls(log)
        .into_iter()
        .filter(|c| c.starts_with(prefix))
        .collect()
}

/// Clears the call log.
pub fn clear(log: &CallLog) {
    log.lock().unwrap().clear();
}

/// Installs a test subscriber so filter decisions show up in test output.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::TRACE)
        .with_test_writer()
        .try_init();
}

/// Builds entry data with a single key.
pub fn entry(key: &str, value: &str) -> ConfigData {
    let mut data = ConfigData::new();
    data.insert(key.to_string(), Value::from(value));
    data
}

/// Returns the tags recorded in entry data, in order.
pub fn tags(data: &ConfigData) -> Vec<String> {
    data.get(TAGS_KEY)
        .and_then(Value::as_sequence)
        .map(|seq| {
            seq.iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

fn push_tag(data: &mut ConfigData, tag: &str) {
    let entry = data
        .entry(TAGS_KEY.to_string())
        .or_insert_with(|| Value::Sequence(Vec::new()));
    if let Value::Sequence(seq) = entry {
        seq.push(Value::from(tag));
    }
}

/// A backend that records every call before delegating to a `MemoryStorage`.
pub struct RecordingStorage {
    inner: Box<dyn Storage>,
    log: CallLog,
}

impl RecordingStorage {
    /// Creates an empty recording storage.
    pub fn new(log: CallLog) -> Self {
        Self {
            inner: Box::new(MemoryStorage::new()),
            log,
        }
    }

    /// Stores an entry without recording the call.
    pub fn with_entry(self, name: &str, data: ConfigData) -> Self {
        self.inner.write(name, data).unwrap();
        self
    }

    fn record(&self, call: String) {
        self.log.lock().unwrap().push(call);
    }
}

impl Storage for RecordingStorage {
    fn exists(&self, name: &str) -> Result<bool> {
        self.record(format!("backend.exists:{}", name));
        self.inner.exists(name)
    }

    fn read(&self, name: &str) -> Result<Option<ConfigData>> {
        self.record(format!("backend.read:{}", name));
        self.inner.read(name)
    }

    fn read_multiple(&self, names: &[String]) -> Result<ConfigBatch> {
        self.record(format!("backend.read_multiple:{}", names.join(",")));
        self.inner.read_multiple(names)
    }

    fn write(&self, name: &str, data: ConfigData) -> Result<bool> {
        self.record(format!("backend.write:{}", name));
        self.inner.write(name, data)
    }

    fn delete(&self, name: &str) -> Result<bool> {
        self.record(format!("backend.delete:{}", name));
        self.inner.delete(name)
    }

    fn rename(&self, name: &str, new_name: &str) -> Result<bool> {
        self.record(format!("backend.rename:{}:{}", name, new_name));
        self.inner.rename(name, new_name)
    }

    fn encode(&self, data: &ConfigData) -> Result<String> {
        self.record("backend.encode".to_string());
        self.inner.encode(data)
    }

    fn decode(&self, raw: &str) -> Result<ConfigData> {
        self.record("backend.decode".to_string());
        self.inner.decode(raw)
    }

    fn list_all(&self, prefix: &str) -> Result<Vec<String>> {
        self.record(format!("backend.list_all:{}", prefix));
        self.inner.list_all(prefix)
    }

    fn delete_all(&self, prefix: &str) -> Result<bool> {
        self.record(format!("backend.delete_all:{}", prefix));
        self.inner.delete_all(prefix)
    }

    fn create_collection(&self, collection: &CollectionName) -> Result<Box<dyn Storage>> {
        self.record(format!("backend.create_collection:{}", collection));
        Ok(Box::new(RecordingStorage {
            inner: self.inner.create_collection(collection)?,
            log: Arc::clone(&self.log),
        }))
    }

    fn get_all_collection_names(&self) -> Result<Vec<CollectionName>> {
        self.record("backend.get_all_collection_names".to_string());
        self.inner.get_all_collection_names()
    }

    fn get_collection_name(&self) -> Result<CollectionName> {
        self.record("backend.get_collection_name".to_string());
        self.inner.get_collection_name()
    }
}

/// A configurable filter that tags the data it sees and records its calls.
///
/// With no options set it tags data and otherwise passes everything through.
#[derive(Clone)]
pub struct TaggingFilter {
    tag: String,
    log: CallLog,
    empties_writes: bool,
    empty_is_delete: bool,
    verdict: Option<bool>,
    hidden_prefix: Option<String>,
    skipped_collections: Vec<String>,
}

impl TaggingFilter {
    /// Creates a filter that tags data with `tag`.
    pub fn new(tag: &str, log: &CallLog) -> Self {
        Self {
            tag: tag.to_string(),
            log: Arc::clone(log),
            empties_writes: false,
            empty_is_delete: false,
            verdict: None,
            hidden_prefix: None,
            skipped_collections: Vec::new(),
        }
    }

    /// Makes `filter_write` return empty data.
    pub fn emptying_writes(mut self) -> Self {
        self.empties_writes = true;
        self
    }

    /// Makes `filter_write_empty_is_delete` answer `true`.
    pub fn empty_is_delete(mut self) -> Self {
        self.empty_is_delete = true;
        self
    }

    /// Forces the answer of the delete, rename and delete-all filters.
    pub fn with_verdict(mut self, verdict: bool) -> Self {
        self.verdict = Some(verdict);
        self
    }

    /// Hides entries whose name starts with `prefix` from reads and listings.
    pub fn hiding(mut self, prefix: &str) -> Self {
        self.hidden_prefix = Some(prefix.to_string());
        self
    }

    /// Opts out of the given collection.
    pub fn skipping_collection(mut self, collection: &str) -> Self {
        self.skipped_collections.push(collection.to_string());
        self
    }

    /// Wraps the filter in a chain handle.
    pub fn shared(self) -> Arc<dyn StorageFilter> {
        Arc::new(self)
    }

    fn record(&self, operation: &str) {
        self.log
            .lock()
            .unwrap()
            .push(format!("{}:{}", operation, self.tag));
    }

    fn is_hidden(&self, name: &str) -> bool {
        self.hidden_prefix
            .as_deref()
            .map_or(false, |prefix| name.starts_with(prefix))
    }
}

impl StorageFilter for TaggingFilter {
    fn name(&self) -> &str {
        &self.tag
    }

    fn filter_exists(&self, name: &str, exists: bool) -> Result<bool> {
        self.record("exists");
        Ok(exists && !self.is_hidden(name))
    }

    fn filter_read(&self, name: &str, data: Option<ConfigData>) -> Result<Option<ConfigData>> {
        self.record("read");
        if self.is_hidden(name) {
            return Ok(None);
        }
        Ok(data.map(|mut data| {
            push_tag(&mut data, &self.tag);
            data
        }))
    }

    fn filter_read_multiple(&self, _names: &[String], data: ConfigBatch) -> Result<ConfigBatch> {
        self.record("read_multiple");
        Ok(data
            .into_iter()
            .filter(|(name, _)| !self.is_hidden(name))
            .map(|(name, mut data)| {
                push_tag(&mut data, &self.tag);
                (name, data)
            })
            .collect())
    }

    fn filter_write(&self, _name: &str, mut data: ConfigData, _storage: &dyn Storage) -> Result<ConfigData> {
        self.record("write");
        if self.empties_writes {
            return Ok(ConfigData::new());
        }
        push_tag(&mut data, &self.tag);
        Ok(data)
    }

    fn filter_write_empty_is_delete(&self, _name: &str) -> Result<bool> {
        self.record("empty_is_delete");
        Ok(self.empty_is_delete)
    }

    fn filter_delete(&self, _name: &str, delete: bool) -> Result<bool> {
        self.record("delete");
        Ok(self.verdict.unwrap_or(delete))
    }

    fn filter_rename(&self, _name: &str, _new_name: &str, rename: bool) -> Result<bool> {
        self.record("rename");
        Ok(self.verdict.unwrap_or(rename))
    }

    fn filter_list_all(&self, _prefix: &str, names: Vec<String>) -> Result<Vec<String>> {
        self.record("list_all");
        Ok(names.into_iter().filter(|n| !self.is_hidden(n)).collect())
    }

    fn filter_delete_all(&self, _prefix: &str, delete: bool) -> Result<bool> {
        self.record("delete_all");
        Ok(self.verdict.unwrap_or(delete))
    }

    fn filter_create_collection(&self, collection: &CollectionName) -> Result<CollectionFilter> {
        self.record("create_collection");
        if self
            .skipped_collections
            .iter()
            .any(|c| c == collection.as_str())
        {
            Ok(CollectionFilter::Skip)
        } else {
            Ok(CollectionFilter::Keep)
        }
    }

    fn filter_get_all_collection_names(
        &self,
        collections: Vec<CollectionName>,
    ) -> Result<Vec<CollectionName>> {
        self.record("get_all_collection_names");
        Ok(collections)
    }

    fn filter_get_collection_name(&self, collection: CollectionName) -> Result<CollectionName> {
        self.record("get_collection_name");
        Ok(collection)
    }
}

/// A filter whose write step always fails.
pub struct FailingFilter {
    log: CallLog,
}

impl FailingFilter {
    /// Creates a failing filter recording into `log`.
    pub fn new(log: &CallLog) -> Self {
        Self {
            log: Arc::clone(log),
        }
    }
}

impl StorageFilter for FailingFilter {
    fn name(&self) -> &str {
        "failing"
    }

    fn filter_write(&self, name: &str, _data: ConfigData, _storage: &dyn Storage) -> Result<ConfigData> {
        self.log.lock().unwrap().push("write:failing".to_string());
        Err(StorageError::filter("failing", format!("refusing to write {}", name)))
    }
}
