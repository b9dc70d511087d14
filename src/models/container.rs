//! Represents a container — the flat top-level namespace for objects within
//! an account.

use super::{StorageItem, StorageObject};
use crate::services::folder_tree;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A named bucket of objects.
///
/// Objects live directly under the container by flat name; the folder tree
/// is derived on demand from those names.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StorageContainer {
    /// Container name (flat, no `/` hierarchy of its own).
    pub name: String,

    /// Total bytes consumed by all objects in the container.
    pub total_bytes_used: i64,

    /// Total number of objects in the container.
    pub total_object_count: i64,

    /// Container-level metadata headers.
    pub metadata: HashMap<String, String>,

    /// Flat collection of objects, as listed by the service.
    pub objects: Vec<StorageObject>,
}

impl StorageContainer {
    /// Materialize the derived folder forest from the flat object list.
    ///
    /// Rebuilt from scratch on every call; slashless objects stay in the
    /// flat `objects` list and appear in no folder.
    pub fn folders(&self) -> Vec<super::StorageFolder> {
        folder_tree::build_forest(&self.objects)
    }
}

impl StorageItem for StorageContainer {
    fn full_name(&self) -> &str {
        &self.name
    }
}
