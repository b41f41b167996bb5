//! Resource description types.
//!
//! These serialize to the JSON document consumed by the runtime. The sprite
//! `type` names are part of the runtime contract and must not change.

use serde::{Deserialize, Serialize};

/// The complete compiled resource description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceFile {
    pub groups: Vec<ResourceGroup>,
    pub images: Vec<ResourceImage>,
}

impl ResourceFile {
    /// Total number of sprites across every group.
    pub fn sprite_count(&self) -> usize {
        self.groups.iter().map(ResourceGroup::sprite_count).sum()
    }

    /// Total number of groups, nested ones included.
    pub fn group_count(&self) -> usize {
        self.groups.iter().map(ResourceGroup::group_count).sum()
    }

    /// Look up an image by content hash.
    pub fn image(&self, hash: &str) -> Option<&ResourceImage> {
        self.images.iter().find(|image| image.hash == hash)
    }
}

/// A named node of the group forest.
///
/// Groups may hold sprites and child groups at the same time. Empty lists
/// are left out of the serialized form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceGroup {
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sprites: Vec<ResourceSprite>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ResourceGroup>,
}

impl ResourceGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sprites: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty() && self.children.is_empty()
    }

    /// Number of sprites in this group and all descendants.
    pub fn sprite_count(&self) -> usize {
        self.sprites.len()
            + self
                .children
                .iter()
                .map(ResourceGroup::sprite_count)
                .sum::<usize>()
    }

    /// Number of groups in this subtree, this one included.
    pub fn group_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(ResourceGroup::group_count)
            .sum::<usize>()
    }

    /// Find a direct child group by name.
    pub fn child(&self, name: &str) -> Option<&ResourceGroup> {
        self.children.iter().find(|group| group.name == name)
    }

    /// Find a sprite of this group by its qualified name.
    pub fn sprite(&self, name: &str) -> Option<&ResourceSprite> {
        self.sprites.iter().find(|sprite| sprite.name() == name)
    }
}

/// A placed sprite. Serialized with a `type` field naming the kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ResourceSprite {
    Frame(ResourceFrame),
    Proxy(ResourceQuad),
    Point(ResourcePoint),
    Text(ResourceFrame),
    Animation(ResourceAnimation),
    Walkmap(ResourceBitmap),
    Quad(ResourceQuad),
    Bitmap(ResourceBitmap),
}

impl ResourceSprite {
    /// Fully qualified sprite name.
    pub fn name(&self) -> &str {
        match self {
            ResourceSprite::Frame(frame) | ResourceSprite::Text(frame) => &frame.name,
            ResourceSprite::Proxy(quad) | ResourceSprite::Quad(quad) => &quad.name,
            ResourceSprite::Point(point) => &point.name,
            ResourceSprite::Animation(animation) => &animation.name,
            ResourceSprite::Walkmap(bitmap) | ResourceSprite::Bitmap(bitmap) => &bitmap.name,
        }
    }

    /// The kind name as written to the resource file.
    pub fn kind(&self) -> &'static str {
        match self {
            ResourceSprite::Frame(_) => "Frame",
            ResourceSprite::Proxy(_) => "Proxy",
            ResourceSprite::Point(_) => "Point",
            ResourceSprite::Text(_) => "Text",
            ResourceSprite::Animation(_) => "Animation",
            ResourceSprite::Walkmap(_) => "Walkmap",
            ResourceSprite::Quad(_) => "Quad",
            ResourceSprite::Bitmap(_) => "Bitmap",
        }
    }

    /// Content hashes of every image this sprite references.
    pub fn image_refs(&self) -> Vec<&str> {
        match self {
            ResourceSprite::Frame(frame) | ResourceSprite::Text(frame) => {
                vec![frame.image.as_str()]
            }
            ResourceSprite::Animation(animation) => animation
                .frames
                .iter()
                .map(|frame| frame.image.as_str())
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// A single positioned point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcePoint {
    pub name: String,
    pub left: i32,
    pub top: i32,
}

/// A positioned rectangle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceQuad {
    pub name: String,
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
}

/// A rectangle carrying packed occupancy bits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceBitmap {
    pub name: String,
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
    /// Packed bits, base64 without padding.
    pub data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<u32>,
}

/// A positioned image reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceFrame {
    pub name: String,
    pub left: i32,
    pub top: i32,
    /// Content hash of the referenced image.
    pub image: String,
}

/// One frame of an animation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceAnimationFrame {
    pub image: String,
    pub left: i32,
    pub top: i32,
    pub delay: u32,
}

/// An ordered frame sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceAnimation {
    pub name: String,
    pub frames: Vec<ResourceAnimationFrame>,
}

/// One distinct pixel content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceImage {
    pub hash: String,
    pub width: u32,
    pub height: u32,
    /// Packed hitmap bits, base64 without padding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hitmap: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn frame(name: &str, image: &str) -> ResourceSprite {
        ResourceSprite::Frame(ResourceFrame {
            name: name.to_string(),
            left: 1,
            top: 2,
            image: image.to_string(),
        })
    }

    #[test]
    fn test_sprite_serializes_type_tag() {
        let json = serde_json::to_value(frame("door", "abc")).unwrap();
        assert_eq!(json["type"], "Frame");
        assert_eq!(json["name"], "door");
        assert_eq!(json["image"], "abc");
    }

    #[test]
    fn test_proxy_and_text_keep_their_kind() {
        let proxy = ResourceSprite::Proxy(ResourceQuad {
            name: "hit".to_string(),
            left: 0,
            top: 0,
            width: 4,
            height: 4,
        });
        let json = serde_json::to_value(&proxy).unwrap();
        assert_eq!(json["type"], "Proxy");
        assert_eq!(json["width"], 4);

        let text = ResourceSprite::Text(ResourceFrame {
            name: "label".to_string(),
            left: 0,
            top: 0,
            image: "h".to_string(),
        });
        assert_eq!(serde_json::to_value(&text).unwrap()["type"], "Text");
    }

    #[test]
    fn test_runtime_kinds_deserialize() {
        let json = r#"[
            {"type": "Quad", "name": "q", "left": 1, "top": 2, "width": 3, "height": 4},
            {"type": "Bitmap", "name": "b", "left": 0, "top": 0, "width": 8, "height": 8, "data": "/w"}
        ]"#;
        let sprites: Vec<ResourceSprite> = serde_json::from_str(json).unwrap();
        assert_eq!(sprites[0].kind(), "Quad");
        assert_eq!(sprites[1].kind(), "Bitmap");
        assert_eq!(sprites[1].name(), "b");
    }

    #[test]
    fn test_empty_group_lists_are_omitted() {
        let group = ResourceGroup::new("empty");
        let json = serde_json::to_string(&group).unwrap();
        assert_eq!(json, r#"{"name":"empty"}"#);

        let back: ResourceGroup = serde_json::from_str(&json).unwrap();
        assert!(back.is_empty());
    }

    #[test]
    fn test_counts() {
        let mut root = ResourceGroup::new("root");
        root.sprites.push(frame("a", "1"));
        let mut child = ResourceGroup::new("child");
        child.sprites.push(frame("b", "1"));
        child.sprites.push(frame("c", "2"));
        root.children.push(child);

        let file = ResourceFile {
            groups: vec![root],
            images: vec![],
        };
        assert_eq!(file.sprite_count(), 3);
        assert_eq!(file.group_count(), 2);
    }

    #[test]
    fn test_image_refs() {
        let animation = ResourceSprite::Animation(ResourceAnimation {
            name: "walk".to_string(),
            frames: vec![
                ResourceAnimationFrame {
                    image: "x".to_string(),
                    left: 0,
                    top: 0,
                    delay: 100,
                },
                ResourceAnimationFrame {
                    image: "y".to_string(),
                    left: 0,
                    top: 0,
                    delay: 100,
                },
            ],
        });
        assert_eq!(animation.image_refs(), vec!["x", "y"]);
        assert!(ResourceSprite::Point(ResourcePoint {
            name: "p".to_string(),
            left: 0,
            top: 0
        })
        .image_refs()
        .is_empty());
    }
}
