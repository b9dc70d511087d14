//! Represents a large-object manifest: the special object that stitches
//! independently uploaded segments back into one logical object.

use super::{StorageItem, StorageObject};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A manifest pending submission to the service.
///
/// The kind is a closed sum: a manifest is either static or dynamic, and
/// submission logic matches exhaustively on the tag. There is deliberately
/// no escape hatch for a third kind.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StorageManifest {
    /// Container the manifest object is created in.
    pub container_name: String,

    /// Full name of the manifest object.
    pub full_name: String,

    /// User metadata headers to attach to the manifest object.
    pub metadata: HashMap<String, String>,

    pub kind: ManifestKind,
}

/// Static vs. dynamic manifest representation.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub enum ManifestKind {
    /// Explicit ordered segment list, uploaded as the manifest body. The
    /// service caps these at 1000 entries and enforces per-segment size
    /// limits; selection logic guarantees the list it carries is eligible.
    Static { objects: Vec<StorageObject> },

    /// Prefix-based manifest: the service resolves segments at read time by
    /// listing `segments_path` (`{container}/{prefix}/`). No client-side
    /// segment list is carried.
    Dynamic { segments_path: String },
}

impl StorageItem for StorageManifest {
    fn full_name(&self) -> &str {
        &self.full_name
    }
}
