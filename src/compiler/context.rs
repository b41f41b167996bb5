//! Placement context carried down the layer tree.
//!
//! The context is a value: descending into a layer that declares an origin
//! or a namespace produces a new context for that subtree, and the caller's
//! context is untouched when the subtree returns. The root context has the
//! sentinel origin (0, 0) and an empty namespace.

/// A reference point in document coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Origin {
    pub left: i32,
    pub top: i32,
}

impl Origin {
    pub const fn new(left: i32, top: i32) -> Self {
        Self { left, top }
    }
}

/// Active origin and namespace at one point of the walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    origin: Origin,
    namespace: Vec<String>,
}

impl Context {
    /// The context at the start of every document.
    pub fn root() -> Self {
        Self::default()
    }

    /// The active origin.
    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Namespace segments, outermost first.
    pub fn namespace(&self) -> &[String] {
        &self.namespace
    }

    /// A context with `(left, top)` as the active origin.
    pub fn with_origin(&self, left: i32, top: i32) -> Self {
        Self {
            origin: Origin::new(left, top),
            namespace: self.namespace.clone(),
        }
    }

    /// A context with one more namespace segment.
    pub fn with_namespace(&self, segment: &str) -> Self {
        let mut namespace = self.namespace.clone();
        namespace.push(segment.to_string());
        Self {
            origin: self.origin,
            namespace,
        }
    }

    /// Dot-joined namespace plus `local`.
    pub fn qualify(&self, local: &str) -> String {
        if self.namespace.is_empty() {
            return local.to_string();
        }
        let mut name = self.namespace.join(".");
        name.push('.');
        name.push_str(local);
        name
    }

    /// A document position relative to the active origin.
    pub fn relative(&self, left: i32, top: i32) -> (i32, i32) {
        (left - self.origin.left, top - self.origin.top)
    }

    /// Center of a `width` x `height` raster placed at `(left, top)`,
    /// relative to the active origin.
    pub fn relative_center(&self, left: i32, top: i32, width: u32, height: u32) -> (i32, i32) {
        let (cx, cy) = center(left, top, width, height);
        self.relative(cx, cy)
    }
}

/// Absolute center of a raster placed at `(left, top)`.
pub fn center(left: i32, top: i32, width: u32, height: u32) -> (i32, i32) {
    (left + (width / 2) as i32, top + (height / 2) as i32)
}
