//! Project manifest (asrc.yaml) parsing.
//!
//! The manifest holds project configuration: where documents live, where
//! output goes and the encoder tunables. Every field is optional.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::bitmap::{HITMAP_COMPRESSION, WALKMAP_SCALE};
use crate::compiler::{CompilerOptions, DEFAULT_FRAME_DELAY};
use crate::error::{AsrcError, Result};

/// Project manifest loaded from asrc.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Manifest {
    /// Directories to scan for layer documents. Defaults to the project root.
    pub sources: Vec<String>,

    /// Patterns to exclude from discovery.
    pub excludes: Vec<String>,

    /// Output directory.
    pub output: PathBuf,

    /// Image directory, relative to `output`.
    pub images: PathBuf,

    /// Resource description file name, relative to `output`.
    pub resource_file: PathBuf,

    /// Hitmap compression factor.
    pub hitmap_compression: u32,

    /// Walkmap downscale factor.
    pub walkmap_scale: u32,

    /// Delay for animation frames without one.
    pub frame_delay: u32,

    /// Wrap each document in a group named after it.
    pub wrap_documents: bool,

    /// Pretty-print the resource description.
    pub pretty: bool,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            sources: vec![],
            excludes: vec![],
            output: PathBuf::from("dist"),
            images: PathBuf::from("images"),
            resource_file: PathBuf::from("resources.json"),
            hitmap_compression: HITMAP_COMPRESSION,
            walkmap_scale: WALKMAP_SCALE,
            frame_delay: DEFAULT_FRAME_DELAY,
            wrap_documents: false,
            pretty: false,
        }
    }
}

impl Manifest {
    /// Load manifest from an asrc.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| AsrcError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse manifest from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let manifest: Manifest = serde_yaml::from_str(content).map_err(|e| AsrcError::Parse {
            message: format!("Invalid manifest: {}", e),
            help: Some("Check asrc.yaml syntax".to_string()),
        })?;

        if manifest.hitmap_compression == 0 || manifest.walkmap_scale == 0 {
            return Err(AsrcError::Parse {
                message: "hitmap_compression and walkmap_scale must be at least 1".to_string(),
                help: None,
            });
        }

        Ok(manifest)
    }

    /// Check if a path should be excluded.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.excludes
            .iter()
            .any(|pattern| Self::matches_pattern(&path_str, pattern))
    }

    /// Minimal glob matching: `*.ext`, `dir/*`, `**/dir/*` and substrings.
    fn matches_pattern(path: &str, pattern: &str) -> bool {
        if let Some(suffix) = pattern.strip_prefix("**/") {
            if let Some(dir) = suffix.strip_suffix("/*") {
                return path.starts_with(&format!("{}/", dir))
                    || path.contains(&format!("/{}/", dir));
            }
            return path.ends_with(suffix) || path.contains(suffix);
        }

        if let Some(suffix) = pattern.strip_prefix('*') {
            if !pattern.contains('/') {
                return path.ends_with(suffix);
            }
        }

        if let Some(dir) = pattern.strip_suffix("/*") {
            return path.starts_with(&format!("{}/", dir)) || path.contains(&format!("/{}/", dir));
        }

        path.contains(pattern)
    }

    /// Source directories, defaulting to the project root.
    pub fn effective_sources(&self) -> Vec<String> {
        if self.sources.is_empty() {
            vec![".".to_string()]
        } else {
            self.sources.clone()
        }
    }

    /// Compiler tunables from this manifest.
    pub fn compiler_options(&self) -> CompilerOptions {
        CompilerOptions {
            hitmap_compression: self.hitmap_compression,
            walkmap_scale: self.walkmap_scale,
            frame_delay: self.frame_delay,
            wrap_documents: self.wrap_documents,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_manifest() {
        let manifest = Manifest::parse("").unwrap();
        assert_eq!(manifest, Manifest::default());
    }

    #[test]
    fn test_parse_full_manifest() {
        let yaml = r#"
sources:
  - art/
excludes:
  - "*.bak"
output: build
images: png
resource_file: bundle.json
hitmap_compression: 2
walkmap_scale: 16
frame_delay: 90
wrap_documents: true
pretty: true
"#;
        let manifest = Manifest::parse(yaml).unwrap();

        assert_eq!(manifest.sources, vec!["art/"]);
        assert_eq!(manifest.output, PathBuf::from("build"));
        assert_eq!(manifest.images, PathBuf::from("png"));
        assert_eq!(manifest.resource_file, PathBuf::from("bundle.json"));
        assert!(manifest.pretty);

        let options = manifest.compiler_options();
        assert_eq!(options.hitmap_compression, 2);
        assert_eq!(options.walkmap_scale, 16);
        assert_eq!(options.frame_delay, 90);
        assert!(options.wrap_documents);
    }

    #[test]
    fn test_defaults_match_compiler() {
        let manifest = Manifest::parse("output: out").unwrap();
        assert_eq!(manifest.compiler_options(), CompilerOptions::default());
        assert_eq!(manifest.images, PathBuf::from("images"));
        assert_eq!(manifest.resource_file, PathBuf::from("resources.json"));
    }

    #[test]
    fn test_zero_scale_rejected() {
        assert!(Manifest::parse("walkmap_scale: 0").is_err());
        assert!(Manifest::parse("hitmap_compression: 0").is_err());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Manifest::parse("shader: dark").is_err());
    }

    #[test]
    fn test_effective_sources() {
        let mut manifest = Manifest::default();
        assert_eq!(manifest.effective_sources(), vec!["."]);

        manifest.sources = vec!["art/".to_string()];
        assert_eq!(manifest.effective_sources(), vec!["art/"]);
    }

    #[test]
    fn test_is_excluded() {
        let manifest = Manifest {
            excludes: vec![
                "*.bak".to_string(),
                "**/drafts/*".to_string(),
                "old/*".to_string(),
            ],
            ..Default::default()
        };

        assert!(manifest.is_excluded(Path::new("art/village.layers.yaml.bak")));
        assert!(manifest.is_excluded(Path::new("art/drafts/castle.layers.yaml")));
        assert!(manifest.is_excluded(Path::new("drafts/castle.layers.yaml")));
        assert!(manifest.is_excluded(Path::new("old/castle.layers.yaml")));
        assert!(!manifest.is_excluded(Path::new("art/village.layers.yaml")));
    }
}
