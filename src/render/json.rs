//! Resource description output.

use std::fs;
use std::path::Path;

use crate::error::{AsrcError, Result};
use crate::types::ResourceFile;

/// Serialize a resource file to JSON.
pub fn resource_json(resources: &ResourceFile, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(resources)
    } else {
        serde_json::to_string(resources)
    };
    json.map_err(|e| AsrcError::Build {
        message: format!("Failed to serialize resources: {}", e),
        help: None,
    })
}

/// Write a resource file as JSON, creating the parent directory if needed.
pub fn write_resource_json(resources: &ResourceFile, path: &Path, pretty: bool) -> Result<()> {
    let json = resource_json(resources, pretty)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| AsrcError::Io {
            path: parent.to_path_buf(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    fs::write(path, json).map_err(|e| AsrcError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write resources: {}", e),
    })?;
    Ok(())
}
