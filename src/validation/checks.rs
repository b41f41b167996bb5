//! Validation checks over a compiled resource file.
//!
//! Each check takes a `&ResourceFile` and returns a `ValidationResult`.

use std::collections::HashSet;

use crate::types::{ResourceFile, ResourceGroup, ResourceSprite};

use super::warning::{Diagnostic, ValidationResult};

/// Visit every group depth-first with its slash-joined path.
fn each_group<'a>(
    groups: &'a [ResourceGroup],
    prefix: &str,
    visit: &mut dyn FnMut(&str, &'a ResourceGroup),
) {
    for group in groups {
        let path = if prefix.is_empty() {
            group.name.clone()
        } else {
            format!("{}/{}", prefix, group.name)
        };
        visit(&path, group);
        each_group(&group.children, &path, visit);
    }
}

/// Check for sprites sharing a name within one group.
pub fn check_duplicate_sprites(resources: &ResourceFile) -> ValidationResult {
    let mut result = ValidationResult::new();

    each_group(&resources.groups, "", &mut |path, group| {
        let mut seen = HashSet::new();
        for sprite in &group.sprites {
            if !seen.insert(sprite.name()) {
                result.push(
                    Diagnostic::error(
                        "asrc::validate::duplicate-sprite",
                        format!("Group '{}' has more than one sprite named '{}'", path, sprite.name()),
                    )
                    .with_help("Rename one of the layers; the runtime looks sprites up by name"),
                );
            }
        }
    });

    result
}

/// Check for top-level groups sharing a name.
///
/// Usually two documents defining the same group, which the runtime cannot
/// tell apart.
pub fn check_duplicate_groups(resources: &ResourceFile) -> ValidationResult {
    let mut result = ValidationResult::new();
    let mut seen = HashSet::new();

    for group in &resources.groups {
        if !seen.insert(group.name.as_str()) {
            result.push(
                Diagnostic::warning(
                    "asrc::validate::duplicate-group",
                    format!("Top-level group '{}' is defined more than once", group.name),
                )
                .with_help("Rename the group in one of the documents, or enable wrap_documents"),
            );
        }
    }

    result
}

/// Check for walkmaps smaller than one tile.
pub fn check_empty_walkmaps(resources: &ResourceFile, walkmap_scale: u32) -> ValidationResult {
    let mut result = ValidationResult::new();

    each_group(&resources.groups, "", &mut |path, group| {
        for sprite in &group.sprites {
            if let ResourceSprite::Walkmap(walkmap) = sprite {
                let scale = walkmap.scale.unwrap_or(walkmap_scale).max(1);
                if walkmap.width / scale == 0 || walkmap.height / scale == 0 {
                    result.push(
                        Diagnostic::warning(
                            "asrc::validate::empty-walkmap",
                            format!(
                                "Walkmap '{}' in group '{}' is {}x{}, smaller than one {}px tile",
                                walkmap.name, path, walkmap.width, walkmap.height, scale
                            ),
                        )
                        .with_help("Enlarge the walkmap layer or lower walkmap_scale"),
                    );
                }
            }
        }
    });

    result
}

/// Check for animations without frames.
pub fn check_empty_animations(resources: &ResourceFile) -> ValidationResult {
    let mut result = ValidationResult::new();

    each_group(&resources.groups, "", &mut |path, group| {
        for sprite in &group.sprites {
            if let ResourceSprite::Animation(animation) = sprite {
                if animation.frames.is_empty() {
                    result.push(
                        Diagnostic::error(
                            "asrc::validate::empty-animation",
                            format!("Animation '{}' in group '{}' has no frames", animation.name, path),
                        )
                        .with_help("Add raster layers inside the animation container"),
                    );
                }
            }
        }
    });

    result
}

/// Check that every image reference resolves to a registered image.
pub fn check_image_refs(resources: &ResourceFile) -> ValidationResult {
    let mut result = ValidationResult::new();
    let known: HashSet<&str> = resources.images.iter().map(|i| i.hash.as_str()).collect();

    each_group(&resources.groups, "", &mut |path, group| {
        for sprite in &group.sprites {
            for hash in sprite.image_refs() {
                if !known.contains(hash) {
                    result.error(
                        "asrc::validate::missing-image",
                        format!(
                            "Sprite '{}' in group '{}' references unknown image {}",
                            sprite.name(),
                            path,
                            hash
                        ),
                    );
                }
            }
        }
    });

    result
}
