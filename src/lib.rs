//! Client library for Swift-style object storage.
//!
//! The service exposes accounts → containers → objects over a flat,
//! `/`-delimited namespace; this crate supplies the two pieces of real
//! machinery a client needs on top of the wire protocol:
//!
//! - **Large objects**: [`services::uploader::LargeObjectUploader`] splits a
//!   seekable content stream into fixed-size segments, uploads each as an
//!   independently named object (`{name}/0000000000`, ...), resumes over
//!   segments left by an interrupted run, and submits a static or dynamic
//!   manifest depending on the service's limits.
//! - **Folder trees**: [`services::folder_tree`] reconstructs a nested
//!   directory structure from flat listings plus pseudo-directory and
//!   `subdir` markers.
//!
//! The HTTP/auth layer stays behind the [`client::StorageClient`] trait;
//! any implementation of it plugs in.

pub mod client;
pub mod errors;
pub mod models;
pub mod naming;
pub mod segments;
pub mod services;

pub use client::{ByteStream, ServiceDefinition, StorageClient};
pub use errors::{StoreError, StoreResult};
pub use models::{
    ListEntry, ManifestKind, NewObject, ObjectRecord, StorageAccount, StorageContainer,
    StorageFolder, StorageItem, StorageManifest, StorageObject,
};
pub use services::manifest::ManifestLimits;
pub use services::uploader::LargeObjectUploader;
