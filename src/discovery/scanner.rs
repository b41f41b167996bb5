//! File system scanner for layer documents.
//!
//! Recursively walks source directories for `*.layers.yaml` files.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::parser::DOCUMENT_SUFFIX;

use super::manifest::Manifest;

/// Check whether a path names a layer document.
pub fn is_layer_document(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| name.ends_with(DOCUMENT_SUFFIX) && name.len() > DOCUMENT_SUFFIX.len())
}

/// Scan a directory for layer documents, sorted by path.
pub fn scan_directory(root: &Path, manifest: &Manifest) -> Vec<PathBuf> {
    if !root.exists() {
        return Vec::new();
    }

    let mut documents: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            let relative = path.strip_prefix(root).unwrap_or(path);
            !manifest.is_excluded(relative) && is_layer_document(path)
        })
        .collect();

    documents.sort();
    documents
}

/// Scan every source path, relative to `base_path` unless absolute.
///
/// A document reachable from two sources is listed once.
pub fn scan_sources(sources: &[String], base_path: &Path, manifest: &Manifest) -> Vec<PathBuf> {
    let mut documents = Vec::new();

    for source in sources {
        let source_path = if Path::new(source).is_absolute() {
            PathBuf::from(source)
        } else {
            base_path.join(source)
        };

        for path in scan_directory(&source_path, manifest) {
            if !documents.contains(&path) {
                documents.push(path);
            }
        }
    }

    documents
}
