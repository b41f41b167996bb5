//! Core domain types for asrc.
//!
//! - `Layer` / `LayerContent` / `Raster` - the decoded layer tree
//! - `ResourceFile` and friends - the compiled resource description

mod layer;
mod resource;

pub use layer::{Layer, LayerContent, LayerDocument, Raster};
pub use resource::{
    ResourceAnimation, ResourceAnimationFrame, ResourceBitmap, ResourceFile, ResourceFrame,
    ResourceGroup, ResourceImage, ResourcePoint, ResourceQuad, ResourceSprite,
};
