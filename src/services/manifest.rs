//! Static-vs-dynamic manifest selection.
//!
//! Static manifests carry an explicit segment list and read back with no
//! extra request amplification, so they are preferred — but the service
//! imposes hard limits on segment count, per-segment size, and a minimum
//! segment size. Whenever the uploaded segment set violates any of those,
//! the selection degrades to a dynamic manifest resolved server-side by
//! prefix.

use crate::errors::{StoreError, StoreResult};
use crate::models::{ManifestKind, StorageManifest, StorageObject};
use std::collections::HashMap;
use tracing::debug;

/// Service limits governing static-manifest eligibility.
///
/// Defaults match the Swift service limits: at most 1000 segments, each at
/// most 5 GiB, and every segment except the last at least 1 MiB.
#[derive(Clone, Copy, Debug)]
pub struct ManifestLimits {
    /// Hard cap on the number of entries a static manifest may list.
    pub max_segment_count: usize,

    /// Maximum byte size of any single segment in a static manifest.
    pub max_segment_size: i64,

    /// Minimum byte size required of every segment except the last.
    pub min_segment_size: i64,
}

impl Default for ManifestLimits {
    fn default() -> Self {
        Self {
            max_segment_count: 1000,
            max_segment_size: 5 * 1024 * 1024 * 1024,
            min_segment_size: 1024 * 1024,
        }
    }
}

/// True iff every segment except the last meets `min_size`.
///
/// The final segment is exempt: it holds whatever bytes remain, so it is
/// allowed to be arbitrarily small. A single-segment list therefore always
/// passes, whatever its size. An empty list never does.
pub fn has_min_size_segments(segments: &[StorageObject], min_size: i64) -> bool {
    if segments.is_empty() {
        return false;
    }
    segments[..segments.len() - 1]
        .iter()
        .all(|segment| segment.length >= min_size)
}

/// Decide and construct the manifest for an uploaded segment set.
///
/// `segments` must be non-empty and in ascending segment order; the order
/// is preserved verbatim in a static manifest. Falls back to a dynamic
/// manifest pointing at `"{segment_container_name}/{manifest_name}/"` when
/// the set is ineligible for a static one.
pub fn build_manifest(
    limits: &ManifestLimits,
    container_name: &str,
    manifest_name: &str,
    metadata: HashMap<String, String>,
    segments: Vec<StorageObject>,
    segment_container_name: &str,
) -> StoreResult<StorageManifest> {
    if container_name.is_empty() {
        return Err(StoreError::invalid_argument(
            "container_name",
            "must not be empty",
        ));
    }
    if manifest_name.is_empty() {
        return Err(StoreError::invalid_argument(
            "manifest_name",
            "must not be empty",
        ));
    }
    if segment_container_name.is_empty() {
        return Err(StoreError::invalid_argument(
            "segment_container_name",
            "must not be empty",
        ));
    }
    if segments.is_empty() {
        return Err(StoreError::invalid_argument(
            "segments",
            "must contain at least one segment",
        ));
    }

    let oversized = segments
        .iter()
        .any(|segment| segment.length > limits.max_segment_size);
    let needs_dynamic = segments.len() > limits.max_segment_count
        || oversized
        || !has_min_size_segments(&segments, limits.min_segment_size);

    let kind = if needs_dynamic {
        ManifestKind::Dynamic {
            segments_path: format!("{segment_container_name}/{manifest_name}/"),
        }
    } else {
        ManifestKind::Static { objects: segments }
    };
    debug!(
        manifest = manifest_name,
        dynamic = needs_dynamic,
        "selected manifest representation"
    );

    Ok(StorageManifest {
        container_name: container_name.to_string(),
        full_name: manifest_name.to_string(),
        metadata,
        kind,
    })
}
