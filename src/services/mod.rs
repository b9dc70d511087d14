//! Core services: folder-tree materialization, manifest selection, and
//! large-object upload orchestration.

pub mod folder_tree;
pub mod manifest;
pub mod uploader;
