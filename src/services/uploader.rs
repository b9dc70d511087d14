//! Large-object upload orchestration.
//!
//! A large object is stored as N independent segment objects plus one
//! manifest. This module drives the whole flow: discover any segments left
//! behind by an interrupted run, resume from the highest one, stream-chunk
//! the content, upload segments strictly in ascending order, then select and
//! submit the manifest.
//!
//! Uploads are deliberately sequential — segment `n + 1` is not started
//! until segment `n` has been confirmed. The naming/resume protocol assumes
//! at most one unconfirmed segment exists at a time, and two concurrent
//! `create` calls for the same object name race on segment indices and are
//! not supported. Cancellation is dropping the future: already-uploaded
//! segments stay behind and the next `create` call resumes over them.

use crate::client::StorageClient;
use crate::errors::{StoreError, StoreResult};
use crate::models::{NewObject, StorageFolder, StorageObject};
use crate::segments;
use crate::services::manifest::{self, ManifestLimits};
use bytes::Bytes;
use std::collections::HashMap;
use std::io::{ErrorKind, SeekFrom};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncSeek, AsyncSeekExt};
use tracing::{debug, info};

/// Orchestrates segmented uploads through an abstract [`StorageClient`].
#[derive(Clone)]
pub struct LargeObjectUploader {
    client: Arc<dyn StorageClient>,
    limits: ManifestLimits,
}

impl LargeObjectUploader {
    pub fn new(client: Arc<dyn StorageClient>) -> Self {
        Self::with_limits(client, ManifestLimits::default())
    }

    pub fn with_limits(client: Arc<dyn StorageClient>, limits: ManifestLimits) -> Self {
        Self { client, limits }
    }

    /// Create a large object from `content`, split into roughly
    /// `number_of_segments` segments stored in `segments_container_name`,
    /// and return the re-fetched manifest object.
    ///
    /// The content source must be seekable: total length is taken by
    /// seeking to the end, and on resume the stream is positioned at
    /// `resume_index * chunk_size` so a re-run reproduces the exact bytes
    /// of the segments it replaces.
    pub async fn create<R>(
        &self,
        container_name: &str,
        object_name: &str,
        metadata: HashMap<String, String>,
        content: &mut R,
        number_of_segments: i32,
        segments_container_name: &str,
    ) -> StoreResult<StorageObject>
    where
        R: AsyncRead + AsyncSeek + Unpin + Send,
    {
        if container_name.is_empty() {
            return Err(StoreError::invalid_argument(
                "container_name",
                "must not be empty",
            ));
        }
        if object_name.is_empty() {
            return Err(StoreError::invalid_argument(
                "object_name",
                "must not be empty",
            ));
        }
        if segments_container_name.is_empty() {
            return Err(StoreError::invalid_argument(
                "segments_container_name",
                "must not be empty",
            ));
        }
        if number_of_segments < 1 {
            return Err(StoreError::invalid_argument(
                "number_of_segments",
                format!("must be >= 1, was {number_of_segments}"),
            ));
        }

        let folder = self
            .get_segments_folder(segments_container_name, object_name)
            .await?;

        let (mut index, last_name) = last_segment(&folder);
        if !last_name.is_empty() {
            // The highest existing segment may be a truncated leftover from
            // an interrupted run. It is discarded and redone unconditionally;
            // no content verification is attempted.
            info!(segment = %last_name, "discarding maybe-partial last segment before resume");
            self.client
                .delete_object(segments_container_name, &last_name)
                .await?;
        }

        let total_length = content.seek(SeekFrom::End(0)).await? as i64;
        let chunk = chunk_size(total_length, number_of_segments)?;
        let resume_offset = i64::from(index) * chunk;
        content.seek(SeekFrom::Start(resume_offset as u64)).await?;
        debug!(
            object = object_name,
            total_length,
            chunk,
            resume_index = index,
            "starting segment upload loop"
        );

        let base = format!("{object_name}/");
        let mut position = resume_offset;
        while position < total_length {
            let bytes = read_chunk(content, chunk).await?;
            position += bytes.len() as i64;
            let key = segments::build_segment_key(&base, index)?;
            debug!(segment = %key, len = bytes.len(), "uploading segment");
            let descriptor = NewObject::new(segments_container_name, &key);
            self.client.create_object(&descriptor, bytes).await?;
            index += 1;
        }

        let folder = self
            .client
            .get_folder(segments_container_name, object_name)
            .await?;
        let uploaded = ordered_segments(&folder);
        let manifest = manifest::build_manifest(
            &self.limits,
            container_name,
            object_name,
            metadata,
            uploaded,
            segments_container_name,
        )?;
        self.client.create_manifest(&manifest).await?;

        // Re-fetch to confirm server-side materialization and pick up the
        // manifest's final length/etag/timestamps.
        self.client.get_object(container_name, object_name).await
    }

    /// Fetch the segments folder, creating the segments container (plus a
    /// placeholder folder marker) when the container lookup reports
    /// not-found. Any other failure propagates unchanged.
    async fn get_segments_folder(
        &self,
        segments_container_name: &str,
        object_name: &str,
    ) -> StoreResult<StorageFolder> {
        match self.client.get_container(segments_container_name).await {
            Ok(_) => {}
            Err(err) if err.is_not_found() => {
                info!(
                    container = segments_container_name,
                    "segments container missing, creating it"
                );
                self.client
                    .create_container(segments_container_name, &HashMap::new())
                    .await?;
                self.client
                    .create_folder(segments_container_name, &format!("{object_name}/"))
                    .await?;
            }
            Err(err) => return Err(err),
        }
        self.client
            .get_folder(segments_container_name, object_name)
            .await
    }
}

/// Find the resume point in an existing segments folder.
///
/// Returns the parsed id and full name of the lexicographically greatest
/// validly named segment — equal to the numerically greatest, because the
/// suffix encoding is fixed-width. Objects whose names do not parse as
/// segment ids are skipped, not failed on. `(0, "")` when nothing valid
/// exists.
fn last_segment(folder: &StorageFolder) -> (i32, String) {
    let mut best: Option<(i32, &str)> = None;
    for object in &folder.objects {
        let Ok(id) = segments::extract_segment_id(&object.full_name) else {
            continue;
        };
        let replace = match best {
            Some((_, name)) => object.full_name.as_str() > name,
            None => true,
        };
        if replace {
            best = Some((id, object.full_name.as_str()));
        }
    }
    match best {
        Some((id, name)) => (id, name.to_string()),
        None => (0, String::new()),
    }
}

/// Collect a folder's validly named segment objects in ascending id order.
fn ordered_segments(folder: &StorageFolder) -> Vec<StorageObject> {
    let mut indexed: Vec<(i32, StorageObject)> = folder
        .objects
        .iter()
        .filter_map(|object| {
            segments::extract_segment_id(&object.full_name)
                .ok()
                .map(|id| (id, object.clone()))
        })
        .collect();
    indexed.sort_by_key(|(id, _)| *id);
    indexed.into_iter().map(|(_, object)| object).collect()
}

/// Compute the per-segment chunk size.
///
/// `segment_count == 0` means "one chunk, the whole length". Otherwise the
/// length is divided with ceiling rounding and clamped to at least 1 byte,
/// so asking for more segments than there are bytes still yields usable
/// chunks.
pub fn chunk_size(total_length: i64, segment_count: i32) -> StoreResult<i64> {
    if total_length <= 0 {
        return Err(StoreError::invalid_argument(
            "total_length",
            format!("must be positive, was {total_length}"),
        ));
    }
    if segment_count < 0 {
        return Err(StoreError::invalid_argument(
            "segment_count",
            format!("must be >= 0, was {segment_count}"),
        ));
    }
    if segment_count == 0 {
        return Ok(total_length);
    }
    let count = i64::from(segment_count);
    Ok(((total_length + count - 1) / count).max(1))
}

/// Read one chunk of up to `chunk_size` bytes from `stream`.
///
/// A read that hits end-of-stream early returns just the bytes that were
/// available — no zero-fill. The one exception is a stream with zero bytes
/// available from the start: that yields an all-zero buffer of the full
/// requested size, matching the service client this library interoperates
/// with.
pub async fn read_chunk<R>(stream: &mut R, chunk_size: i64) -> StoreResult<Bytes>
where
    R: AsyncRead + Unpin + Send,
{
    if chunk_size < 0 {
        return Err(StoreError::invalid_argument(
            "chunk_size",
            format!("must be >= 0, was {chunk_size}"),
        ));
    }
    let mut buffer = vec![0u8; chunk_size as usize];
    let mut filled = 0;
    while filled < buffer.len() {
        let read = stream.read(&mut buffer[filled..]).await.map_err(|err| {
            match err.kind() {
                ErrorKind::BrokenPipe | ErrorKind::NotConnected => StoreError::StreamClosed,
                _ => StoreError::Io(err),
            }
        })?;
        if read == 0 {
            break;
        }
        filled += read;
    }
    if filled > 0 {
        buffer.truncate(filled);
    }
    Ok(Bytes::from(buffer))
}
