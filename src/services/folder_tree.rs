//! Folder-tree materialization.
//!
//! The service namespace is flat; folders exist only as `/`-delimited name
//! prefixes (plus explicit pseudo-directory markers and the `subdir` entries
//! a prefix/delimiter query emits). This module converts flat listings into
//! a tree of [`StorageFolder`] nodes.
//!
//! Construction goes through a temporary index of nodes that is discarded
//! once the single pass over the input finishes; the returned tree is plain
//! owned data with no aliasing.

use crate::errors::{StoreError, StoreResult};
use crate::models::{ListEntry, StorageFolder, StorageObject};
use crate::naming;
use std::collections::BTreeMap;
use tracing::debug;

/// Intermediate mutable node, keyed by bare segment name. The map keeps
/// siblings deduplicated by construction; nesting keeps full paths unique.
#[derive(Default)]
struct Node {
    children: BTreeMap<String, Node>,
    objects: Vec<StorageObject>,
}

impl Node {
    fn descend(&mut self, segment: &str) -> &mut Node {
        self.children.entry(segment.to_string()).or_default()
    }
}

/// Consume an index level and emit finished folders, depth-first. `prefix`
/// is the parent's full path: empty at the root, `/`-terminated otherwise.
fn finish(children: BTreeMap<String, Node>, prefix: &str) -> Vec<StorageFolder> {
    children
        .into_iter()
        .map(|(segment, node)| {
            let full_name = format!("{prefix}{segment}/");
            let mut folder = StorageFolder::new(&full_name);
            folder.objects = node.objects;
            folder.folders = finish(node.children, &full_name);
            folder
        })
        .collect()
}

/// Convert a flat object collection into a folder forest (container scope).
///
/// One root per distinct first path segment; multiple roots are all
/// returned. Objects with no `/` in their name belong to the container's
/// flat list and appear in no folder here. Names ending in `/` are pure
/// directory markers: they create folders but attach no object. The result
/// is independent of input order.
pub fn build_forest(objects: &[StorageObject]) -> Vec<StorageFolder> {
    let mut root = Node::default();
    for object in objects {
        attach(&mut root, object, 0);
    }
    finish(root.children, "")
}

/// Convert one folder's raw listing entries into a single folder (folder
/// scope).
///
/// The returned folder keeps `folder_name` verbatim as its full name. A
/// folder with zero entries does not exist as far as the service is
/// concerned, so an empty payload is an error rather than an empty node.
/// `subdir` markers create child folders directly, with no knowledge of
/// their contents.
pub fn build_folder(
    container_name: &str,
    folder_name: &str,
    entries: Vec<ListEntry>,
) -> StoreResult<StorageFolder> {
    if container_name.is_empty() {
        return Err(StoreError::invalid_argument(
            "container_name",
            "must not be empty",
        ));
    }
    if folder_name.is_empty() {
        return Err(StoreError::invalid_argument(
            "folder_name",
            "must not be empty",
        ));
    }
    if entries.is_empty() {
        return Err(StoreError::FolderNotFound(folder_name.to_string()));
    }

    let depth = naming::path_segments(folder_name).count();
    let mut root = Node::default();
    for entry in entries {
        match entry {
            ListEntry::Subdir { subdir } => {
                let mut node = &mut root;
                for segment in naming::path_segments(&subdir).skip(depth) {
                    node = node.descend(segment);
                }
            }
            ListEntry::Object(record) => {
                let object = record.into_object(container_name);
                attach(&mut root, &object, depth);
            }
        }
    }

    let base = naming::trim_slashes(folder_name);
    let prefix = if base.is_empty() {
        String::new()
    } else {
        format!("{base}/")
    };
    let mut folder = StorageFolder::new(folder_name);
    folder.objects = root.objects;
    folder.folders = finish(root.children, &prefix);
    debug!(
        folder = folder_name,
        children = folder.folders.len(),
        objects = folder.objects.len(),
        "materialized folder"
    );
    Ok(folder)
}

/// Parse a raw JSON listing payload, as returned by a prefix/delimiter
/// query, into entries ready for [`build_folder`].
///
/// The payload is a flat array mixing object records and `subdir` markers.
/// A malformed payload is a format error; an empty array parses fine and is
/// rejected later by [`build_folder`].
pub fn parse_listing(payload: &str) -> StoreResult<Vec<ListEntry>> {
    serde_json::from_str(payload)
        .map_err(|err| StoreError::format(payload, format!("bad listing payload: {err}")))
}

/// Convenience wrapper: parse `payload` and materialize the folder in one
/// step.
pub fn build_folder_from_payload(
    container_name: &str,
    folder_name: &str,
    payload: &str,
) -> StoreResult<StorageFolder> {
    let entries = parse_listing(payload)?;
    build_folder(container_name, folder_name, entries)
}

/// Walk one object's path into the tree rooted at `root`, skipping the
/// first `skip` segments (the scope folder's own depth), creating folders
/// along the way and attaching the object at its immediate parent.
fn attach(root: &mut Node, object: &StorageObject, skip: usize) {
    let segments: Vec<&str> = naming::path_segments(&object.full_name).collect();
    if segments.len() <= skip {
        // All-slash name, or a marker for the scope folder itself.
        return;
    }

    // A trailing slash marks a pure directory entry: every segment is a
    // folder and no object is attached.
    let is_marker = object.full_name.ends_with('/');
    let parent_depth = if is_marker {
        segments.len()
    } else {
        segments.len() - 1
    };

    let mut node = root;
    for segment in &segments[skip..parent_depth] {
        node = node.descend(segment);
    }
    // parent_depth == 0 means a slashless object at container scope; those
    // stay in the container's flat list and are attached nowhere.
    if !is_marker && parent_depth > 0 {
        node.objects.push(object.clone());
    }
}
