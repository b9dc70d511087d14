//! In-memory [`StorageClient`] used by the integration tests.
//!
//! Stores container and object state behind a mutex and records every
//! mutating call so tests can assert on call order and counts. Manifest
//! objects resolve their content by concatenating their segments, the same
//! way the real service materializes a large-object GET.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use futures::stream;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use swift_store::{
    ByteStream, ListEntry, ManifestKind, NewObject, ObjectRecord, StorageClient,
    StorageContainer, StorageFolder, StorageManifest, StorageObject, StoreError, StoreResult,
    naming,
    services::folder_tree,
};

#[derive(Clone)]
struct StoredObject {
    content: Vec<u8>,
    content_type: Option<String>,
    metadata: HashMap<String, String>,
    manifest: Option<ManifestKind>,
    length_override: Option<i64>,
}

impl StoredObject {
    fn length(&self) -> i64 {
        self.length_override.unwrap_or(self.content.len() as i64)
    }

    fn etag(&self) -> String {
        format!("{:x}", md5::compute(&self.content))
    }
}

#[derive(Default)]
struct ContainerState {
    metadata: HashMap<String, String>,
    objects: BTreeMap<String, StoredObject>,
}

#[derive(Default)]
struct State {
    containers: HashMap<String, ContainerState>,
    /// Mutating calls in order: "create_container x", "put a/b", "delete c",
    /// "manifest d".
    log: Vec<String>,
    /// When set, `get_container` fails with this status instead.
    fail_get_container: Option<u16>,
}

#[derive(Default, Clone)]
pub struct InMemoryClient {
    state: Arc<Mutex<State>>,
}

impl InMemoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-create a container, optionally with seeded objects.
    pub fn seed_container(&self, name: &str, objects: &[(&str, &[u8])]) {
        let mut state = self.state.lock().unwrap();
        let container = state.containers.entry(name.to_string()).or_default();
        for (object_name, content) in objects {
            container.objects.insert(
                object_name.to_string(),
                StoredObject {
                    content: content.to_vec(),
                    content_type: None,
                    metadata: HashMap::new(),
                    manifest: None,
                    length_override: None,
                },
            );
        }
    }

    pub fn fail_get_container(&self, status: u16) {
        self.state.lock().unwrap().fail_get_container = Some(status);
    }

    pub fn container_exists(&self, name: &str) -> bool {
        self.state.lock().unwrap().containers.contains_key(name)
    }

    pub fn object_content(&self, container: &str, name: &str) -> Option<Vec<u8>> {
        let state = self.state.lock().unwrap();
        state
            .containers
            .get(container)
            .and_then(|c| c.objects.get(name))
            .map(|o| o.content.clone())
    }

    pub fn object_names(&self, container: &str) -> Vec<String> {
        let state = self.state.lock().unwrap();
        state
            .containers
            .get(container)
            .map(|c| c.objects.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn log(&self) -> Vec<String> {
        self.state.lock().unwrap().log.clone()
    }

    /// The manifest kind recorded for a stored manifest object, if any.
    pub fn manifest_kind(&self, container: &str, name: &str) -> Option<ManifestKind> {
        let state = self.state.lock().unwrap();
        state
            .containers
            .get(container)
            .and_then(|c| c.objects.get(name))
            .and_then(|o| o.manifest.clone())
    }

    fn describe(name: &str, object: &StoredObject, container: &str) -> StorageObject {
        StorageObject {
            container_name: container.to_string(),
            full_name: name.to_string(),
            last_modified: Utc::now(),
            etag: Some(object.etag()),
            length: object.length(),
            content_type: object.content_type.clone(),
            metadata: object.metadata.clone(),
        }
    }

    /// Resolve the full content of an object, expanding manifests into
    /// their concatenated segments.
    fn resolve_content(&self, container: &str, name: &str) -> StoreResult<Vec<u8>> {
        let state = self.state.lock().unwrap();
        let container_state = state
            .containers
            .get(container)
            .ok_or_else(|| StoreError::remote(404, format!("no container `{container}`")))?;
        let object = container_state
            .objects
            .get(name)
            .ok_or_else(|| StoreError::remote(404, format!("no object `{name}`")))?;

        match &object.manifest {
            None => Ok(object.content.clone()),
            Some(ManifestKind::Static { objects }) => {
                let mut content = Vec::new();
                for segment in objects {
                    let stored = state
                        .containers
                        .get(&segment.container_name)
                        .and_then(|c| c.objects.get(&segment.full_name))
                        .ok_or_else(|| {
                            StoreError::remote(409, format!("missing segment `{}`", segment.full_name))
                        })?;
                    content.extend_from_slice(&stored.content);
                }
                Ok(content)
            }
            Some(ManifestKind::Dynamic { segments_path }) => {
                let (seg_container, prefix) = segments_path
                    .split_once('/')
                    .ok_or_else(|| StoreError::remote(409, "bad segments path"))?;
                let container_state = state
                    .containers
                    .get(seg_container)
                    .ok_or_else(|| StoreError::remote(404, "no segments container"))?;
                let mut content = Vec::new();
                for (segment_name, stored) in &container_state.objects {
                    if segment_name.starts_with(prefix) && segment_name.as_str() != prefix {
                        content.extend_from_slice(&stored.content);
                    }
                }
                Ok(content)
            }
        }
    }
}

#[async_trait]
impl StorageClient for InMemoryClient {
    async fn get_container(&self, name: &str) -> StoreResult<StorageContainer> {
        let state = self.state.lock().unwrap();
        if let Some(status) = state.fail_get_container {
            return Err(StoreError::remote(status, "injected failure"));
        }
        let container = state
            .containers
            .get(name)
            .ok_or_else(|| StoreError::remote(404, format!("no container `{name}`")))?;
        let objects: Vec<StorageObject> = container
            .objects
            .iter()
            .map(|(object_name, stored)| Self::describe(object_name, stored, name))
            .collect();
        Ok(StorageContainer {
            name: name.to_string(),
            total_bytes_used: objects.iter().map(|o| o.length).sum(),
            total_object_count: objects.len() as i64,
            metadata: container.metadata.clone(),
            objects,
        })
    }

    async fn create_container(
        &self,
        name: &str,
        metadata: &HashMap<String, String>,
    ) -> StoreResult<()> {
        let mut state = self.state.lock().unwrap();
        state.log.push(format!("create_container {name}"));
        state.containers.insert(
            name.to_string(),
            ContainerState {
                metadata: metadata.clone(),
                objects: BTreeMap::new(),
            },
        );
        Ok(())
    }

    async fn create_folder(
        &self,
        container_name: &str,
        full_folder_path: &str,
    ) -> StoreResult<()> {
        let mut state = self.state.lock().unwrap();
        state.log.push(format!("create_folder {full_folder_path}"));
        let container = state
            .containers
            .get_mut(container_name)
            .ok_or_else(|| StoreError::remote(404, format!("no container `{container_name}`")))?;
        container.objects.insert(
            full_folder_path.to_string(),
            StoredObject {
                content: Vec::new(),
                content_type: Some("application/directory".to_string()),
                metadata: HashMap::new(),
                manifest: None,
                length_override: None,
            },
        );
        Ok(())
    }

    async fn get_folder(
        &self,
        container_name: &str,
        full_folder_path: &str,
    ) -> StoreResult<StorageFolder> {
        let entries: Vec<ListEntry> = {
            let state = self.state.lock().unwrap();
            let container = state.containers.get(container_name).ok_or_else(|| {
                StoreError::remote(404, format!("no container `{container_name}`"))
            })?;
            let prefix = format!("{}/", naming::trim_slashes(full_folder_path));
            container
                .objects
                .iter()
                .filter(|(name, _)| name.starts_with(&prefix))
                .map(|(name, stored)| {
                    ListEntry::Object(ObjectRecord {
                        name: name.clone(),
                        bytes: stored.length(),
                        hash: Some(stored.etag()),
                        content_type: stored.content_type.clone(),
                        last_modified: Utc::now(),
                    })
                })
                .collect()
        };
        folder_tree::build_folder(container_name, full_folder_path, entries)
    }

    async fn get_object(&self, container_name: &str, name: &str) -> StoreResult<StorageObject> {
        let state = self.state.lock().unwrap();
        let container = state
            .containers
            .get(container_name)
            .ok_or_else(|| StoreError::remote(404, format!("no container `{container_name}`")))?;
        let stored = container
            .objects
            .get(name)
            .ok_or_else(|| StoreError::remote(404, format!("no object `{name}`")))?;
        Ok(Self::describe(name, stored, container_name))
    }

    async fn get_object_content(
        &self,
        container_name: &str,
        name: &str,
    ) -> StoreResult<ByteStream> {
        let content = self.resolve_content(container_name, name)?;
        Ok(Box::pin(stream::once(async move {
            Ok::<Bytes, StoreError>(Bytes::from(content))
        })))
    }

    async fn delete_object(&self, container_name: &str, name: &str) -> StoreResult<()> {
        let mut state = self.state.lock().unwrap();
        state.log.push(format!("delete {name}"));
        let container = state
            .containers
            .get_mut(container_name)
            .ok_or_else(|| StoreError::remote(404, format!("no container `{container_name}`")))?;
        container
            .objects
            .remove(name)
            .ok_or_else(|| StoreError::remote(404, format!("no object `{name}`")))?;
        Ok(())
    }

    async fn create_object(
        &self,
        descriptor: &NewObject,
        content: Bytes,
    ) -> StoreResult<StorageObject> {
        let mut state = self.state.lock().unwrap();
        state.log.push(format!("put {}", descriptor.full_name));
        let container = state
            .containers
            .get_mut(&descriptor.container_name)
            .ok_or_else(|| {
                StoreError::remote(404, format!("no container `{}`", descriptor.container_name))
            })?;
        let stored = StoredObject {
            content: content.to_vec(),
            content_type: descriptor.content_type.clone(),
            metadata: descriptor.metadata.clone(),
            manifest: None,
            length_override: None,
        };
        let described = Self::describe(&descriptor.full_name, &stored, &descriptor.container_name);
        container
            .objects
            .insert(descriptor.full_name.clone(), stored);
        Ok(described)
    }

    async fn create_manifest(&self, manifest: &StorageManifest) -> StoreResult<()> {
        let mut state = self.state.lock().unwrap();
        state.log.push(format!("manifest {}", manifest.full_name));

        // Logical length a GET of the manifest would report.
        let length = match &manifest.kind {
            ManifestKind::Static { objects } => objects.iter().map(|o| o.length).sum(),
            ManifestKind::Dynamic { segments_path } => {
                match segments_path.split_once('/') {
                    Some((seg_container, prefix)) => state
                        .containers
                        .get(seg_container)
                        .map(|c| {
                            c.objects
                                .iter()
                                .filter(|(name, _)| {
                                    name.starts_with(prefix) && name.as_str() != prefix
                                })
                                .map(|(_, o)| o.length())
                                .sum()
                        })
                        .unwrap_or(0),
                    None => 0,
                }
            }
        };

        let container = state
            .containers
            .get_mut(&manifest.container_name)
            .ok_or_else(|| {
                StoreError::remote(404, format!("no container `{}`", manifest.container_name))
            })?;
        container.objects.insert(
            manifest.full_name.clone(),
            StoredObject {
                content: Vec::new(),
                content_type: None,
                metadata: manifest.metadata.clone(),
                manifest: Some(manifest.kind.clone()),
                length_override: Some(length),
            },
        );
        Ok(())
    }
}
