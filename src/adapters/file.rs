// SPDX-License-Identifier: MIT OR Apache-2.0

//! File system storage adapter.
//!
//! This module provides a storage backend that keeps one YAML file per entry.
//! The default collection lives in the base directory; the collection
//! `language.fr` lives in `<base>/language/fr`.

use crate::adapters::YamlCodec;
use crate::domain::{CollectionName, ConfigBatch, ConfigData, Result, StorageError};
use crate::ports::{ConfigCodec, Storage};
use directories::ProjectDirs;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Maximum allowed size of a single entry file (10MB)
const MAX_ENTRY_FILE_SIZE: u64 = 10 * 1024 * 1024;

const BACKEND_NAME: &str = "file";

/// Storage backend keeping configuration as YAML files in a directory.
///
/// # Examples
///
/// ```rust,no_run
/// use filtercfg::adapters::FileStorage;
/// use filtercfg::ports::Storage;
///
/// # fn main() -> filtercfg::domain::Result<()> {
/// let storage = FileStorage::new("/var/lib/myapp/config/sync");
/// for name in storage.list_all("system.")? {
///     println!("{}", name);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FileStorage {
    /// Base directory of the default collection
    base_dir: PathBuf,
    /// Collection this instance is bound to
    collection: CollectionName,
    codec: YamlCodec,
}

impl FileStorage {
    /// Creates a storage for the default collection rooted at `dir`.
    ///
    /// The directory is created on first write.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: dir.as_ref().to_path_buf(),
            collection: CollectionName::default(),
            codec: YamlCodec::new(),
        }
    }

    /// Creates a storage rooted at the default OS-appropriate location.
    ///
    /// This method uses the `directories` crate to determine the configuration
    /// directory for the current operating system.
    ///
    /// # Arguments
    ///
    /// * `app_name` - The application name (e.g., "myapp")
    /// * `qualifier` - The organization/qualifier (e.g., "com.example")
    pub fn from_default_location(app_name: &str, qualifier: &str) -> Result<Self> {
        let proj_dirs = ProjectDirs::from(qualifier, "", app_name).ok_or_else(|| {
            StorageError::backend(BACKEND_NAME, "Failed to determine project directories")
        })?;

        Ok(Self::new(proj_dirs.config_dir()))
    }

    /// Returns the base directory of the default collection.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Returns the directory holding this collection's entries.
    pub fn collection_dir(&self) -> PathBuf {
        self.collection
            .segments()
            .fold(self.base_dir.clone(), |dir, segment| dir.join(segment))
    }

    /// Returns the file path of an entry.
    pub fn file_path(&self, name: &str) -> Result<PathBuf> {
        validate_name(name)?;
        Ok(self
            .collection_dir()
            .join(format!("{}.{}", name, self.codec.file_extension())))
    }

    fn entry_name<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        file_name
            .strip_suffix(self.codec.file_extension())
            .and_then(|stem| stem.strip_suffix('.'))
            .filter(|stem| !stem.is_empty())
    }

    fn read_file(&self, path: &Path) -> Result<String> {
        let metadata = fs::metadata(path).map_err(|e| io_error("Failed to read file metadata", path, e))?;
        if metadata.len() > MAX_ENTRY_FILE_SIZE {
            return Err(StorageError::backend(
                BACKEND_NAME,
                format!(
                    "Configuration file too large: {} bytes (max {} bytes)",
                    metadata.len(),
                    MAX_ENTRY_FILE_SIZE
                ),
            ));
        }

        fs::read_to_string(path).map_err(|e| io_error("Failed to read configuration file", path, e))
    }

    /// Returns `true` if `dir` directly contains at least one entry file.
    fn has_entries(&self, dir: &Path) -> Result<bool> {
        for entry in read_dir(dir)? {
            if entry.path().is_file() {
                if let Some(file_name) = entry.file_name().to_str() {
                    if self.entry_name(file_name).is_some() {
                        return Ok(true);
                    }
                }
            }
        }
        Ok(false)
    }

    fn collect_collections(
        &self,
        dir: &Path,
        prefix: &str,
        collections: &mut Vec<CollectionName>,
    ) -> Result<()> {
        for entry in read_dir(dir)? {
            // Symlinked directories are not followed.
            let file_type = entry
                .file_type()
                .map_err(|e| io_error("Failed to read file type", &entry.path(), e))?;
            if !file_type.is_dir() {
                continue;
            }
            let path = entry.path();
            let Some(segment) = entry.file_name().to_str().map(str::to_string) else {
                tracing::warn!("Skipping non UTF-8 directory in {}", dir.display());
                continue;
            };
            // A dotted directory cannot be addressed as a collection segment.
            if segment.contains('.') || validate_name(&segment).is_err() {
                tracing::debug!("Skipping directory '{}', not a collection segment", segment);
                continue;
            }

            let name = if prefix.is_empty() {
                segment
            } else {
                format!("{}.{}", prefix, segment)
            };
            if self.has_entries(&path)? {
                collections.push(CollectionName::from(name.as_str()));
            }
            self.collect_collections(&path, &name, collections)?;
        }
        Ok(())
    }
}

impl Storage for FileStorage {
    fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.file_path(name)?.is_file())
    }

    fn read(&self, name: &str) -> Result<Option<ConfigData>> {
        let path = self.file_path(name)?;
        if !path.is_file() {
            return Ok(None);
        }
        let content = self.read_file(&path)?;
        self.codec.decode(&content).map(Some)
    }

    fn read_multiple(&self, names: &[String]) -> Result<ConfigBatch> {
        let mut batch = ConfigBatch::new();
        for name in names {
            if let Some(data) = self.read(name)? {
                batch.insert(name.clone(), data);
            }
        }
        Ok(batch)
    }

    fn write(&self, name: &str, data: ConfigData) -> Result<bool> {
        let path = self.file_path(name)?;
        let content = self.codec.encode(&data)?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| io_error("Failed to create directory", dir, e))?;
        }
        fs::write(&path, content).map_err(|e| io_error("Failed to write configuration file", &path, e))?;
        Ok(true)
    }

    fn delete(&self, name: &str) -> Result<bool> {
        let path = self.file_path(name)?;
        if !path.is_file() {
            return Ok(false);
        }
        fs::remove_file(&path).map_err(|e| io_error("Failed to delete configuration file", &path, e))?;
        Ok(true)
    }

    fn rename(&self, name: &str, new_name: &str) -> Result<bool> {
        let from = self.file_path(name)?;
        let to = self.file_path(new_name)?;
        if !from.is_file() {
            return Ok(false);
        }
        fs::rename(&from, &to).map_err(|e| io_error("Failed to rename configuration file", &from, e))?;
        Ok(true)
    }

    fn encode(&self, data: &ConfigData) -> Result<String> {
        self.codec.encode(data)
    }

    fn decode(&self, raw: &str) -> Result<ConfigData> {
        self.codec.decode(raw)
    }

    fn list_all(&self, prefix: &str) -> Result<Vec<String>> {
        let dir = self.collection_dir();
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in read_dir(&dir)? {
            if !entry.path().is_file() {
                continue;
            }
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                tracing::warn!("Skipping non UTF-8 file name in {}", dir.display());
                continue;
            };
            if let Some(name) = self.entry_name(file_name) {
                if name.starts_with(prefix) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    fn delete_all(&self, prefix: &str) -> Result<bool> {
        let mut success = true;
        for name in self.list_all(prefix)? {
            success = self.delete(&name)? && success;
        }
        Ok(success)
    }

    fn create_collection(&self, collection: &CollectionName) -> Result<Box<dyn Storage>> {
        for segment in collection.segments() {
            validate_name(segment)?;
        }
        Ok(Box::new(FileStorage {
            base_dir: self.base_dir.clone(),
            collection: collection.clone(),
            codec: self.codec,
        }))
    }

    fn get_all_collection_names(&self) -> Result<Vec<CollectionName>> {
        let mut collections = Vec::new();
        if self.base_dir.is_dir() {
            self.collect_collections(&self.base_dir, "", &mut collections)?;
        }
        collections.sort();
        Ok(collections)
    }

    fn get_collection_name(&self) -> Result<CollectionName> {
        Ok(self.collection.clone())
    }
}

/// Rejects names that would escape the collection directory.
fn validate_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        "name is empty"
    } else if name.contains('/') || name.contains('\\') {
        "contains a path separator"
    } else if name == "." || name == ".." {
        "is a relative path component"
    } else {
        return Ok(());
    };

    Err(StorageError::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    })
}

/// Reads a directory, skipping entries that cannot be read.
fn read_dir(dir: &Path) -> Result<Vec<fs::DirEntry>> {
    let entries = fs::read_dir(dir).map_err(|e| io_error("Failed to read directory", dir, e))?;
    Ok(entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                None
            }
        })
        .collect())
}

fn io_error(message: &str, path: &Path, err: io::Error) -> StorageError {
    StorageError::BackendError {
        backend: BACKEND_NAME.to_string(),
        message: format!(
            "{}: {}",
            message,
            path.file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("<unknown>")
        ),
        source: Some(Box::new(err)),
    }
}
