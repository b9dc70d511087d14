//! Shared name-normalization rules for the flat object namespace.
//!
//! The service stores objects under flat, `/`-delimited names. Folder
//! synthesis and segment-path construction both lean on the same two
//! operations: stripping slash runs off either end of a name, and taking the
//! final path component.

/// Strip every leading and trailing `/` from `full_name`, doubled runs
/// included. Returns the empty string for an all-slash input.
pub fn trim_slashes(full_name: &str) -> &str {
    full_name.trim_matches('/')
}

/// Extract the bare item name: the substring after the last `/` remaining
/// once leading/trailing slash runs are removed.
///
/// `"a/b/c"` → `"c"`, `"/a/b/"` → `"b"`, `"///"` → `""`. The original
/// `full_name` is never modified; callers keep it verbatim.
pub fn item_name(full_name: &str) -> &str {
    let trimmed = trim_slashes(full_name);
    match trimmed.rfind('/') {
        Some(pos) => &trimmed[pos + 1..],
        None => trimmed,
    }
}

/// Split a full name into its non-empty path segments, discarding the empty
/// pieces produced by leading, trailing, or doubled slashes.
pub fn path_segments(full_name: &str) -> impl Iterator<Item = &str> {
    full_name.split('/').filter(|segment| !segment.is_empty())
}
