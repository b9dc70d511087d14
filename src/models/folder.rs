//! Represents a client-synthesized folder.
//!
//! Folders are not first-class server entities; every folder is derived from
//! the `/`-delimited prefixes found in an object listing (plus explicit
//! pseudo-directory markers). A folder tree is rebuilt on every conversion
//! and never mutated afterwards.

use super::{StorageItem, StorageObject};
use serde::{Deserialize, Serialize};

/// A synthesized grouping of objects sharing a name prefix.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct StorageFolder {
    /// Full path of this folder from the container root, `/`-separated, with
    /// a trailing `/` for synthesized directory-style entries.
    pub full_name: String,

    /// Immediate child folders. Names are case-sensitive; construction order
    /// is not guaranteed, so lookups go by name.
    pub folders: Vec<StorageFolder>,

    /// Objects whose full name falls directly under this folder (no further
    /// `/` beyond the folder's own depth).
    pub objects: Vec<StorageObject>,
}

impl StorageFolder {
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            folders: Vec::new(),
            objects: Vec::new(),
        }
    }

    /// Find an immediate child folder by bare name.
    pub fn folder(&self, name: &str) -> Option<&StorageFolder> {
        self.folders.iter().find(|f| f.name() == name)
    }

    /// Find a direct child object by bare name.
    pub fn object(&self, name: &str) -> Option<&StorageObject> {
        self.objects.iter().find(|o| o.name() == name)
    }
}

impl StorageItem for StorageFolder {
    fn full_name(&self) -> &str {
        &self.full_name
    }
}
