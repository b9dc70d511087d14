//! Collaborator boundary: the abstract storage client the core drives.
//!
//! The REST/auth layer lives behind [`StorageClient`]. Implementations map
//! each call onto the wire protocol and normalize any non-success response
//! into [`StoreError::Remote`] carrying the HTTP-equivalent status. The core
//! never inspects statuses itself beyond the single not-found check during
//! segment-folder resolution.

use crate::errors::{StoreError, StoreResult};
use crate::models::{NewObject, StorageContainer, StorageFolder, StorageManifest, StorageObject};
use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::collections::HashMap;
use std::pin::Pin;

/// A boxed stream of content bytes for object downloads.
pub type ByteStream = Pin<Box<dyn Stream<Item = StoreResult<Bytes>> + Send>>;

/// Asynchronous storage operations the core consumes.
///
/// Every method is a single remote round-trip; none of them retry. Within
/// one logical flow the core issues these calls strictly sequentially.
#[async_trait]
pub trait StorageClient: Send + Sync {
    /// Fetch container metadata plus its flat object listing.
    async fn get_container(&self, name: &str) -> StoreResult<StorageContainer>;

    /// Create a container with the given metadata headers.
    async fn create_container(
        &self,
        name: &str,
        metadata: &HashMap<String, String>,
    ) -> StoreResult<()>;

    /// Create a pseudo-directory marker object at `full_folder_path`.
    async fn create_folder(&self, container_name: &str, full_folder_path: &str)
    -> StoreResult<()>;

    /// Fetch one folder's direct entries via a prefix/delimiter query.
    async fn get_folder(
        &self,
        container_name: &str,
        full_folder_path: &str,
    ) -> StoreResult<StorageFolder>;

    /// Fetch object metadata.
    async fn get_object(&self, container_name: &str, name: &str) -> StoreResult<StorageObject>;

    /// Fetch object content as a byte stream.
    async fn get_object_content(&self, container_name: &str, name: &str)
    -> StoreResult<ByteStream>;

    /// Delete an object.
    async fn delete_object(&self, container_name: &str, name: &str) -> StoreResult<()>;

    /// Upload an object's content and return the stored descriptor.
    async fn create_object(
        &self,
        descriptor: &NewObject,
        content: Bytes,
    ) -> StoreResult<StorageObject>;

    /// Persist a manifest. Static manifests are PUT with the segment list as
    /// body under a manifest-mode query flag; dynamic manifests are PUT as a
    /// zero-length object carrying the segments-path header. The dispatch is
    /// an exhaustive match on [`crate::models::ManifestKind`].
    async fn create_manifest(&self, manifest: &StorageManifest) -> StoreResult<()>;
}

/// Service-catalog gate for this client family.
///
/// A catalog entry is usable only when its service type matches exactly and
/// its advertised version is some `1.x`.
#[derive(Clone, Debug)]
pub struct ServiceDefinition {
    pub service_type: String,
}

impl ServiceDefinition {
    const SUPPORTED_MAJOR: u32 = 1;

    pub fn new(service_type: impl Into<String>) -> Self {
        Self {
            service_type: service_type.into(),
        }
    }

    /// True when `service_type` matches this definition exactly.
    pub fn supports_service(&self, service_type: &str) -> bool {
        self.service_type == service_type
    }

    /// Parse `version`'s major component; any `1.x` is accepted, `2.x` and
    /// above rejected, unparseable rejected.
    pub fn supports_version(&self, version: &str) -> bool {
        match Self::major_version(version) {
            Ok(major) => major == Self::SUPPORTED_MAJOR,
            Err(_) => false,
        }
    }

    fn major_version(version: &str) -> StoreResult<u32> {
        let major = version.split('.').next().unwrap_or(version);
        major
            .trim()
            .parse::<u32>()
            .map_err(|err| StoreError::format(version, format!("bad major version: {err}")))
    }
}
