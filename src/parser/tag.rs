//! Layer naming convention.
//!
//! Designers attach behaviour to a layer by suffixing its name with a tag:
//! `hero:namespace`, `spawn:point`, `floor:walkmap`. Untagged layers are
//! frames (raster layers) or groups (containers).

use std::fmt;

use crate::error::{AsrcError, Result};

/// Delimiter between a layer's local name and its tag.
pub const TAG_DELIMITER: char = ':';

/// Local name used when a layer's name is empty.
pub const DEFAULT_NAME: &str = "default";

/// The closed set of layer tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Origin,
    Namespace,
    Animation,
    Walkmap,
    Proxy,
    Point,
    Text,
}

impl Tag {
    /// Every tag, in documentation order.
    pub const ALL: [Tag; 7] = [
        Tag::Origin,
        Tag::Namespace,
        Tag::Animation,
        Tag::Walkmap,
        Tag::Proxy,
        Tag::Point,
        Tag::Text,
    ];

    /// Look up a tag by its keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Tag::ALL.into_iter().find(|tag| tag.keyword() == keyword)
    }

    /// The keyword written after the delimiter.
    pub fn keyword(self) -> &'static str {
        match self {
            Tag::Origin => "origin",
            Tag::Namespace => "namespace",
            Tag::Animation => "animation",
            Tag::Walkmap => "walkmap",
            Tag::Proxy => "proxy",
            Tag::Point => "point",
            Tag::Text => "text",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A layer name split into its local name and optional tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerName {
    pub name: String,
    pub tag: Option<Tag>,
}

/// Split a raw name at the first delimiter.
///
/// Both halves are trimmed; an empty tag counts as no tag.
fn split_name(raw: &str) -> (String, Option<&str>) {
    let (name, tag) = match raw.split_once(TAG_DELIMITER) {
        Some((name, tag)) => (name.trim(), Some(tag.trim())),
        None => (raw.trim(), None),
    };

    let name = if name.is_empty() {
        DEFAULT_NAME.to_string()
    } else {
        name.to_string()
    };

    (name, tag.filter(|t| !t.is_empty()))
}

/// Parse a raw layer name into local name and tag.
pub fn parse_layer_name(raw: &str) -> Result<LayerName> {
    let (name, keyword) = split_name(raw);

    let tag = match keyword {
        None => None,
        Some(keyword) => match Tag::from_keyword(keyword) {
            Some(tag) => Some(tag),
            None => {
                return Err(AsrcError::UnrecognizedTag {
                    layer: name,
                    tag: keyword.to_string(),
                })
            }
        },
    };

    Ok(LayerName { name, tag })
}

/// Parse an animation frame name (`name:delay`).
///
/// Returns the frame's local name and its delay, falling back to
/// `default_delay` when the name carries no delay. `animation` is only used
/// for error reporting.
pub fn parse_frame_delay(raw: &str, animation: &str, default_delay: u32) -> Result<(String, u32)> {
    let (name, payload) = split_name(raw);

    let delay = match payload {
        None => default_delay,
        Some(payload) => payload
            .parse::<u32>()
            .map_err(|_| AsrcError::InvalidAnimationFrame {
                animation: animation.to_string(),
                frame: name.clone(),
                reason: format!("delay '{}' is not a non-negative integer", payload),
            })?,
    };

    Ok((name, delay))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untagged_name() {
        let parsed = parse_layer_name("door").unwrap();
        assert_eq!(parsed.name, "door");
        assert_eq!(parsed.tag, None);
    }

    #[test]
    fn test_every_keyword_round_trips() {
        for tag in Tag::ALL {
            let parsed = parse_layer_name(&format!("thing:{}", tag)).unwrap();
            assert_eq!(parsed.tag, Some(tag));
            assert_eq!(parsed.name, "thing");
        }
    }

    #[test]
    fn test_empty_name_uses_placeholder() {
        let parsed = parse_layer_name(":origin").unwrap();
        assert_eq!(parsed.name, DEFAULT_NAME);
        assert_eq!(parsed.tag, Some(Tag::Origin));

        assert_eq!(parse_layer_name("").unwrap().name, DEFAULT_NAME);
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let parsed = parse_layer_name("  spawn : point ").unwrap();
        assert_eq!(parsed.name, "spawn");
        assert_eq!(parsed.tag, Some(Tag::Point));
    }

    #[test]
    fn test_empty_tag_is_untagged() {
        let parsed = parse_layer_name("door:").unwrap();
        assert_eq!(parsed.name, "door");
        assert_eq!(parsed.tag, None);
    }

    #[test]
    fn test_unknown_tag_names_the_layer() {
        let err = parse_layer_name("thing:bogus").unwrap_err();
        match err {
            AsrcError::UnrecognizedTag { layer, tag } => {
                assert_eq!(layer, "thing");
                assert_eq!(tag, "bogus");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_tags_are_case_sensitive() {
        assert!(parse_layer_name("thing:Origin").is_err());
    }

    #[test]
    fn test_only_first_delimiter_splits() {
        let err = parse_layer_name("a:point:extra").unwrap_err();
        assert!(matches!(err, AsrcError::UnrecognizedTag { ref tag, .. } if tag == "point:extra"));
    }

    #[test]
    fn test_frame_delay() {
        assert_eq!(
            parse_frame_delay("walk1:120", "walk", 100).unwrap(),
            ("walk1".to_string(), 120)
        );
    }

    #[test]
    fn test_frame_delay_default() {
        assert_eq!(
            parse_frame_delay("walk1", "walk", 80).unwrap(),
            ("walk1".to_string(), 80)
        );
    }

    #[test]
    fn test_frame_delay_invalid() {
        for raw in ["walk1:fast", "walk1:-5", "walk1:1.5"] {
            let err = parse_frame_delay(raw, "walk", 100).unwrap_err();
            assert!(
                matches!(err, AsrcError::InvalidAnimationFrame { ref animation, ref frame, .. }
                    if animation == "walk" && frame == "walk1"),
                "{}",
                raw
            );
        }
    }
}
