//! Core data models for the Swift-style storage client.
//!
//! These entities mirror the logical structure of the service: accounts own
//! containers, containers own a flat namespace of objects, and folders are
//! synthesized client-side from `/`-delimited name prefixes. Everything here
//! is a plain record, built once from listing/header data and never mutated.

use crate::naming;

pub mod account;
pub mod container;
pub mod folder;
pub mod manifest;
pub mod object;

pub use account::StorageAccount;
pub use container::StorageContainer;
pub use folder::StorageFolder;
pub use manifest::{ManifestKind, StorageManifest};
pub use object::{ListEntry, NewObject, ObjectRecord, StorageObject};

/// Common surface of every named item in the storage hierarchy.
///
/// `full_name` is the raw path exactly as the service reported it; `name` is
/// the bare final component with leading/trailing slash runs stripped. An
/// all-slash full name yields an empty bare name.
pub trait StorageItem {
    fn full_name(&self) -> &str;

    fn name(&self) -> &str {
        naming::item_name(self.full_name())
    }
}
