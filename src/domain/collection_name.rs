// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collection name newtype.
//!
//! A storage instance is always bound to exactly one collection. The default
//! collection has the empty name.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The name of a storage collection.
///
/// Collection names are dot-separated by convention (e.g. `language.fr`).
/// The default collection is represented by the empty string.
///
/// # Examples
///
/// ```
/// use filtercfg::domain::CollectionName;
///
/// let default = CollectionName::default();
/// assert!(default.is_default());
///
/// let french = CollectionName::from("language.fr");
/// assert_eq!(french.as_str(), "language.fr");
/// assert_eq!(french.segments().collect::<Vec<_>>(), vec!["language", "fr"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CollectionName(String);

impl CollectionName {
    /// Creates a new `CollectionName` from a `String`.
    pub fn new(name: String) -> Self {
        CollectionName(name)
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for the default (empty) collection.
    pub fn is_default(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the dot-separated segments of the name.
    ///
    /// The default collection has no segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.').filter(|s| !s.is_empty())
    }

    /// Converts the `CollectionName` into its inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for CollectionName {
    fn from(s: String) -> Self {
        CollectionName(s)
    }
}

impl From<&str> for CollectionName {
    fn from(s: &str) -> Self {
        CollectionName(s.to_string())
    }
}

impl From<CollectionName> for String {
    fn from(name: CollectionName) -> Self {
        name.0
    }
}

impl AsRef<str> for CollectionName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
