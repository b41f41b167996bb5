//! Init command implementation.
//!
//! Generates an `asrc.yaml` manifest from discovered layer documents.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Component, PathBuf};

use clap::Args;

use crate::bitmap::{HITMAP_COMPRESSION, WALKMAP_SCALE};
use crate::compiler::DEFAULT_FRAME_DELAY;
use crate::discovery::{discover_paths, MANIFEST_FILENAME};
use crate::error::{AsrcError, Result};
use crate::output::{display_path, plural, Printer};

/// Initialize an asrc project by generating an asrc.yaml manifest
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to scan (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing asrc.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let manifest_path = args.path.join(MANIFEST_FILENAME);

    if manifest_path.exists() && !args.force {
        return Err(AsrcError::Build {
            message: format!("{} already exists", MANIFEST_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    // Scan without the old manifest, so --force starts clean.
    printer.status("Scanning", &display_path(&args.path));
    let discovery = discover_paths(std::slice::from_ref(&args.path))?;

    // Top-level directories holding documents, relative to the project root.
    let mut source_dirs = BTreeSet::new();
    for document in &discovery.documents {
        let relative = document.strip_prefix(&discovery.root).unwrap_or(document);
        let mut components = relative.components();
        let first = components.next();
        let dir = match (first, components.next()) {
            (Some(Component::Normal(dir)), Some(_)) => format!("{}/", dir.to_string_lossy()),
            _ => ".".to_string(),
        };
        source_dirs.insert(dir);
    }

    // Build YAML by hand for clean formatting.
    let mut yaml = String::new();

    if !source_dirs.is_empty() && !source_dirs.contains(".") {
        yaml.push_str("sources:\n");
        for dir in &source_dirs {
            yaml.push_str(&format!("  - \"{}\"\n", dir));
        }
    }

    yaml.push_str("output: dist\n");
    yaml.push_str("images: images\n");
    yaml.push_str("resource_file: resources.json\n");
    yaml.push_str(&format!("hitmap_compression: {}\n", HITMAP_COMPRESSION));
    yaml.push_str(&format!("walkmap_scale: {}\n", WALKMAP_SCALE));
    yaml.push_str(&format!("frame_delay: {}\n", DEFAULT_FRAME_DELAY));

    fs::write(&manifest_path, &yaml).map_err(|e| AsrcError::Io {
        path: manifest_path.clone(),
        message: format!("Failed to write manifest: {}", e),
    })?;

    if !source_dirs.is_empty() {
        let dirs: Vec<&str> = source_dirs.iter().map(|s| s.as_str()).collect();
        printer.info("Discovered", &dirs.join(", "));
    }

    printer.success(
        "Created",
        &format!(
            "{} ({} found)",
            MANIFEST_FILENAME,
            plural(discovery.documents.len(), "document", "documents")
        ),
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::{discover, Manifest};
    use tempfile::tempdir;

    const DOC: &str = "layers:\n  - name: \"hero:origin\"\n";

    fn quiet() -> Printer {
        Printer::with_verbosity(true, false)
    }

    #[test]
    fn test_init_creates_loadable_manifest() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("hero.layers.yaml"), DOC).unwrap();

        let args = InitArgs {
            path: dir.path().to_path_buf(),
            force: false,
        };
        run(args, &quiet()).unwrap();

        let manifest = Manifest::load(&dir.path().join("asrc.yaml")).unwrap();
        assert_eq!(manifest, Manifest::default());
    }

    #[test]
    fn test_init_errors_if_manifest_exists() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("asrc.yaml"), "output: build").unwrap();

        let args = InitArgs {
            path: dir.path().to_path_buf(),
            force: false,
        };

        assert!(run(args, &quiet()).is_err());
    }

    #[test]
    fn test_init_force_overwrites_broken_manifest() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("asrc.yaml"), "output: [").unwrap();

        let args = InitArgs {
            path: dir.path().to_path_buf(),
            force: true,
        };
        run(args, &quiet()).unwrap();

        let content = fs::read_to_string(dir.path().join("asrc.yaml")).unwrap();
        assert!(content.contains("output: dist"));
    }

    #[test]
    fn test_init_discovers_source_directories() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("levels/forest")).unwrap();
        fs::create_dir_all(dir.path().join("actors")).unwrap();
        fs::write(dir.path().join("levels/forest/clearing.layers.yaml"), DOC).unwrap();
        fs::write(dir.path().join("actors/hero.layers.yaml"), DOC).unwrap();

        let args = InitArgs {
            path: dir.path().to_path_buf(),
            force: false,
        };
        run(args, &quiet()).unwrap();

        let content = fs::read_to_string(dir.path().join("asrc.yaml")).unwrap();
        assert!(content.contains("sources:"));
        assert!(content.contains("\"actors/\""));
        assert!(content.contains("\"levels/\""));
        assert!(!content.contains("forest"));

        let result = discover(dir.path()).unwrap();
        assert_eq!(result.documents.len(), 2);
    }

    #[test]
    fn test_init_empty_directory() {
        let dir = tempdir().unwrap();

        let args = InitArgs {
            path: dir.path().to_path_buf(),
            force: false,
        };
        run(args, &quiet()).unwrap();

        let content = fs::read_to_string(dir.path().join("asrc.yaml")).unwrap();
        assert!(content.contains("output: dist"));
        assert!(!content.contains("sources:"));
    }
}
