//! Represents an object stored in a container, plus the raw listing records
//! the service returns for prefix/delimiter queries.

use super::StorageItem;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single object within a container.
///
/// Holds metadata only, never content bytes. Built from REST headers or a
/// JSON listing entry and immutable afterwards.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StorageObject {
    /// Name of the container holding this object.
    pub container_name: String,

    /// Full object name as given by the service (path-like, `/`-delimited).
    pub full_name: String,

    /// Timestamp of the last modification.
    pub last_modified: DateTime<Utc>,

    /// Content hash reported by the service, when known.
    pub etag: Option<String>,

    /// Size in bytes. Never negative.
    pub length: i64,

    /// MIME type, when known.
    pub content_type: Option<String>,

    /// User metadata headers (unique keys, unordered).
    pub metadata: HashMap<String, String>,
}

impl StorageItem for StorageObject {
    fn full_name(&self) -> &str {
        &self.full_name
    }
}

/// Descriptor for an object about to be created: everything the service
/// needs besides the content bytes themselves.
#[derive(Clone, Debug)]
pub struct NewObject {
    pub container_name: String,
    pub full_name: String,
    pub content_type: Option<String>,
    pub metadata: HashMap<String, String>,
}

impl NewObject {
    pub fn new(container_name: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            container_name: container_name.into(),
            full_name: full_name.into(),
            content_type: None,
            metadata: HashMap::new(),
        }
    }
}

/// One object entry in a raw container listing.
#[derive(Deserialize, Clone, Debug)]
pub struct ObjectRecord {
    pub name: String,
    pub bytes: i64,
    pub hash: Option<String>,
    pub content_type: Option<String>,
    pub last_modified: DateTime<Utc>,
}

impl ObjectRecord {
    /// Convert a listing record into a [`StorageObject`] scoped to
    /// `container_name`.
    pub fn into_object(self, container_name: &str) -> StorageObject {
        StorageObject {
            container_name: container_name.to_string(),
            full_name: self.name,
            last_modified: self.last_modified,
            etag: self.hash,
            length: self.bytes,
            content_type: self.content_type,
            metadata: HashMap::new(),
        }
    }
}

/// One entry of a prefix/delimiter listing: either a real object or a
/// `subdir` marker the service emits for a grouped prefix.
///
/// Subdir markers carry only the prefix string (`{"subdir": "a/b/"}`), so
/// they must be tried first when deserializing.
#[derive(Deserialize, Clone, Debug)]
#[serde(untagged)]
pub enum ListEntry {
    Subdir {
        subdir: String,
    },
    Object(ObjectRecord),
}
