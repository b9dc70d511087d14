//! Represents a storage account — the root of the container namespace.

use super::{StorageContainer, StorageItem};
use serde::{Deserialize, Serialize};

/// An account-level grouping of containers with aggregate usage counters.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StorageAccount {
    /// Account name.
    pub name: String,

    /// Total bytes consumed across all containers.
    pub total_bytes_used: i64,

    /// Total number of objects across all containers.
    pub total_object_count: i64,

    /// Number of containers in the account.
    pub container_count: i64,

    /// Flat collection of containers.
    pub containers: Vec<StorageContainer>,
}

impl StorageItem for StorageAccount {
    fn full_name(&self) -> &str {
        &self.name
    }
}
