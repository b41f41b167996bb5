//! Layer document discovery for asrc projects.
//!
//! Finds every `*.layers.yaml` document in a project directory, either by
//! scanning the whole tree or the sources listed in an `asrc.yaml` manifest.
//!
//! # Example
//!
//! ```ignore
//! use asrc::discovery::discover;
//!
//! let result = discover("./art")?;
//! println!("Found {} documents", result.documents.len());
//! ```

mod manifest;
mod scanner;

use std::path::{Path, PathBuf};

use crate::error::Result;

pub use manifest::Manifest;
pub use scanner::{is_layer_document, scan_directory, scan_sources};

/// The name of the manifest file.
pub const MANIFEST_FILENAME: &str = "asrc.yaml";

/// Result of discovering documents in a project.
#[derive(Debug)]
pub struct DiscoveryResult {
    /// The project root directory.
    pub root: PathBuf,

    /// The loaded manifest (default if no asrc.yaml was found).
    pub manifest: Manifest,

    /// Whether an asrc.yaml manifest was found.
    pub has_manifest: bool,

    /// Discovered document paths, in processing order.
    pub documents: Vec<PathBuf>,
}

impl DiscoveryResult {
    /// Output directory, resolved against the project root.
    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.manifest.output)
    }
}

/// Discover documents in a project directory.
///
/// Looks for an `asrc.yaml` manifest in the root directory. If found, uses
/// the manifest's source paths. Otherwise, scans the entire directory.
pub fn discover(root: impl AsRef<Path>) -> Result<DiscoveryResult> {
    let root = root.as_ref().to_path_buf();

    let manifest_path = root.join(MANIFEST_FILENAME);
    let (manifest, has_manifest) = if manifest_path.exists() {
        (Manifest::load(&manifest_path)?, true)
    } else {
        (Manifest::default(), false)
    };

    let sources = manifest.effective_sources();
    let documents = scan_sources(&sources, &root, &manifest);

    Ok(DiscoveryResult {
        root,
        manifest,
        has_manifest,
        documents,
    })
}

/// Discover documents from specific paths (no manifest lookup).
///
/// Directories are scanned; files are taken as given, in argument order.
pub fn discover_paths(paths: &[PathBuf]) -> Result<DiscoveryResult> {
    let manifest = Manifest::default();
    let mut documents = Vec::new();

    for path in paths {
        let found = if path.is_dir() {
            scan_directory(path, &manifest)
        } else if path.is_file() && is_layer_document(path) {
            vec![path.clone()]
        } else {
            Vec::new()
        };

        for doc in found {
            if !documents.contains(&doc) {
                documents.push(doc);
            }
        }
    }

    let root = paths
        .first()
        .map(|p| if p.is_dir() { p.as_path() } else { p.parent().unwrap_or(p) })
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));

    Ok(DiscoveryResult {
        root,
        manifest,
        has_manifest: false,
        documents,
    })
}
