//! Segment-key codec for large-object uploads.
//!
//! Each segment of a large object is stored as an independent object named
//! `{base}/NNNNNNNNNN`, a 10-digit zero-padded decimal index. The fixed width
//! makes lexicographic order equal numeric order, which the resume logic
//! relies on when it picks the lexicographically-last name as the highest
//! existing segment.

use crate::errors::{StoreError, StoreResult};
use crate::naming;

/// Width of the zero-padded decimal segment suffix.
pub const SEGMENT_KEY_WIDTH: usize = 10;

/// Build the canonical object name for segment `segment_index` beneath
/// `base_path`.
///
/// `base_path` must be non-empty and end with `/` (the uploader always
/// supplies a trailing-slash base); a single leading `/` is stripped.
/// Fails with an invalid-argument error for a negative index.
pub fn build_segment_key(base_path: &str, segment_index: i32) -> StoreResult<String> {
    if base_path.is_empty() {
        return Err(StoreError::invalid_argument("base_path", "must not be empty"));
    }
    let base = base_path.strip_prefix('/').unwrap_or(base_path);
    if !base.ends_with('/') {
        return Err(StoreError::invalid_argument(
            "base_path",
            "must end with `/`",
        ));
    }
    if segment_index < 0 {
        return Err(StoreError::invalid_argument(
            "segment_index",
            format!("must be >= 0, was {segment_index}"),
        ));
    }
    Ok(format!("{base}{segment_index:0width$}", width = SEGMENT_KEY_WIDTH))
}

/// Parse the segment index out of a segment object name.
///
/// The bare name (last path component) must be a 1–10 digit unsigned decimal
/// with no stray characters; the value must fit in an `i32`. Any violation
/// is a format error naming the offending value. Digits are folded manually
/// so parsing is locale-independent.
pub fn extract_segment_id(object_name: &str) -> StoreResult<i32> {
    let bare = naming::item_name(object_name);
    if bare.is_empty() || bare.len() > SEGMENT_KEY_WIDTH {
        return Err(StoreError::format(
            object_name,
            format!("segment suffix must be 1-{SEGMENT_KEY_WIDTH} decimal digits"),
        ));
    }
    let mut value: i64 = 0;
    for ch in bare.chars() {
        let digit = ch
            .to_digit(10)
            .ok_or_else(|| StoreError::format(object_name, format!("`{ch}` is not a digit")))?;
        value = value * 10 + i64::from(digit);
    }
    i32::try_from(value)
        .map_err(|_| StoreError::format(object_name, "segment id exceeds i32::MAX"))
}
