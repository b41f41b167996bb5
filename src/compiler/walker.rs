//! Layer tree walker.
//!
//! Visits a decoded layer tree and turns it into resource groups. Each layer
//! is dispatched on its tag and content:
//!
//! | tag         | content   | result                                        |
//! |-------------|-----------|-----------------------------------------------|
//! | `origin`    | raster    | layer position becomes the origin for siblings |
//! | `origin`    | none      | layer position becomes the origin for siblings |
//! | `origin`    | container | children walked under the container position   |
//! | `namespace` | container | children walked with an extra name segment     |
//! | `animation` | container | Animation sprite, one frame per child raster    |
//! | `walkmap`   | raster    | Walkmap sprite                                 |
//! | `proxy`     | raster    | Proxy sprite                                   |
//! | `point`     | raster    | Point at the raster center                     |
//! | `point`     | none      | Point at the layer position                    |
//! | `text`      | raster    | Text sprite (image without hitmap)             |
//! | none        | raster    | Frame sprite (image with hitmap)               |
//! | none        | container | child group                                    |
//! | none        | none      | skipped with a warning                         |

use crate::bitmap::{encode_bits, encode_walkmap};
use crate::error::{AsrcError, Result};
use crate::parser::{parse_frame_delay, parse_layer_name, Tag};
use crate::registry::ImageRegistry;
use crate::types::{
    Layer, LayerContent, Raster, ResourceAnimation, ResourceAnimationFrame, ResourceBitmap,
    ResourceFrame, ResourceGroup, ResourcePoint, ResourceQuad, ResourceSprite,
};
use crate::validation::Diagnostic;

use super::context::Context;
use super::CompilerOptions;

/// Where the walker puts what it builds.
///
/// The top level of a document only takes groups; everywhere else a scope
/// is the group being filled.
#[derive(Debug, Default)]
pub(crate) struct Scope {
    top_level: bool,
    pub sprites: Vec<ResourceSprite>,
    pub children: Vec<ResourceGroup>,
}

impl Scope {
    pub fn top_level() -> Self {
        Self {
            top_level: true,
            ..Self::default()
        }
    }

    fn group() -> Self {
        Self::default()
    }

    /// Fail when this scope cannot take a sprite of `kind`.
    ///
    /// Checked before any image is registered, so a rejected layer never
    /// reaches the sink.
    fn accept(&self, layer: &str, kind: &str) -> Result<()> {
        if self.top_level {
            return Err(AsrcError::UnexpectedTopLevelSprite {
                layer: layer.to_string(),
                kind: kind.to_string(),
            });
        }
        Ok(())
    }

    fn push_sprite(&mut self, layer: &str, sprite: ResourceSprite) -> Result<()> {
        self.accept(layer, sprite.kind())?;
        self.sprites.push(sprite);
        Ok(())
    }

    fn into_group(self, name: String) -> ResourceGroup {
        ResourceGroup {
            name,
            sprites: self.sprites,
            children: self.children,
        }
    }
}

/// Walks one document's layers.
pub(crate) struct Walker<'a> {
    registry: &'a mut ImageRegistry,
    options: &'a CompilerOptions,
    document: &'a str,
    notices: Vec<Diagnostic>,
}

impl<'a> Walker<'a> {
    pub fn new(
        registry: &'a mut ImageRegistry,
        options: &'a CompilerOptions,
        document: &'a str,
    ) -> Self {
        Self {
            registry,
            options,
            document,
            notices: Vec::new(),
        }
    }

    /// Warnings raised while walking.
    pub fn into_notices(self) -> Vec<Diagnostic> {
        self.notices
    }

    /// Walk sibling layers into `scope`.
    ///
    /// Origin markers change the context for the siblings that follow them;
    /// the change ends with this call.
    pub fn walk_layers(&mut self, layers: &[Layer], ctx: &Context, scope: &mut Scope) -> Result<()> {
        let mut ctx = ctx.clone();
        for layer in layers {
            if let Some(next) = self.visit(layer, &ctx, scope)? {
                ctx = next;
            }
        }
        Ok(())
    }

    /// Build a group named `name` from `layers`.
    pub fn group(&mut self, name: String, layers: &[Layer], ctx: &Context) -> Result<ResourceGroup> {
        let mut scope = Scope::group();
        self.walk_layers(layers, ctx, &mut scope)?;
        Ok(scope.into_group(name))
    }

    /// Visit one layer. Returns a replacement context for the following
    /// siblings when the layer is an origin marker.
    fn visit(&mut self, layer: &Layer, ctx: &Context, scope: &mut Scope) -> Result<Option<Context>> {
        let parsed = parse_layer_name(layer.raw_name())?;
        let name = parsed.name;

        match (parsed.tag, &layer.content) {
            (Some(Tag::Origin), Some(LayerContent::Raster(_))) | (Some(Tag::Origin), None) => {
                return Ok(Some(ctx.with_origin(layer.left, layer.top)));
            }
            (Some(Tag::Origin), Some(LayerContent::Container(children))) => {
                self.walk_layers(children, &ctx.with_origin(layer.left, layer.top), scope)?;
            }
            (Some(Tag::Namespace), Some(LayerContent::Container(children))) => {
                self.walk_layers(children, &ctx.with_namespace(&name), scope)?;
            }
            (Some(Tag::Animation), Some(LayerContent::Container(children))) => {
                scope.accept(&name, "Animation")?;
                let sprite = self.animation(ctx.qualify(&name), children, ctx)?;
                scope.push_sprite(&name, sprite)?;
            }
            (Some(Tag::Walkmap), Some(LayerContent::Raster(raster))) => {
                let sprite = self.walkmap(ctx.qualify(&name), layer, raster, ctx);
                scope.push_sprite(&name, sprite)?;
            }
            (Some(Tag::Proxy), Some(LayerContent::Raster(raster))) => {
                let (left, top) = ctx.relative_center(layer.left, layer.top, raster.width(), raster.height());
                let sprite = ResourceSprite::Proxy(ResourceQuad {
                    name: ctx.qualify(&name),
                    left,
                    top,
                    width: raster.width(),
                    height: raster.height(),
                });
                scope.push_sprite(&name, sprite)?;
            }
            (Some(Tag::Point), Some(LayerContent::Raster(raster))) => {
                let (left, top) = ctx.relative_center(layer.left, layer.top, raster.width(), raster.height());
                let sprite = ResourceSprite::Point(ResourcePoint {
                    name: ctx.qualify(&name),
                    left,
                    top,
                });
                scope.push_sprite(&name, sprite)?;
            }
            (Some(Tag::Point), None) => {
                let (left, top) = ctx.relative(layer.left, layer.top);
                let sprite = ResourceSprite::Point(ResourcePoint {
                    name: ctx.qualify(&name),
                    left,
                    top,
                });
                scope.push_sprite(&name, sprite)?;
            }
            (Some(Tag::Text), Some(LayerContent::Raster(raster))) => {
                scope.accept(&name, "Text")?;
                let frame = self.frame(ctx.qualify(&name), layer, raster, ctx, false)?;
                scope.push_sprite(&name, ResourceSprite::Text(frame))?;
            }
            (None, Some(LayerContent::Raster(raster))) => {
                scope.accept(&name, "Frame")?;
                let frame = self.frame(ctx.qualify(&name), layer, raster, ctx, true)?;
                scope.push_sprite(&name, ResourceSprite::Frame(frame))?;
            }
            (None, Some(LayerContent::Container(children))) => {
                let group = self.group(ctx.qualify(&name), children, ctx)?;
                if group.is_empty() {
                    self.notice(
                        "asrc::walk::empty-group",
                        format!("Dropping empty group '{}'", group.name),
                    );
                } else {
                    scope.children.push(group);
                }
            }
            (None, None) => {
                self.notice(
                    "asrc::walk::empty-layer",
                    format!("Skipping empty layer '{}'", layer.raw_name()),
                );
            }
            (Some(tag), _) => {
                return Err(AsrcError::MisplacedTag {
                    layer: name,
                    tag: tag.to_string(),
                    expected: expected_content(tag).to_string(),
                });
            }
        }

        Ok(None)
    }

    fn frame(
        &mut self,
        name: String,
        layer: &Layer,
        raster: &Raster,
        ctx: &Context,
        hitmap: bool,
    ) -> Result<ResourceFrame> {
        let image = self.registry.register(raster, hitmap)?;
        let (left, top) = ctx.relative_center(layer.left, layer.top, raster.width(), raster.height());
        Ok(ResourceFrame {
            name,
            left,
            top,
            image,
        })
    }

    fn walkmap(&self, name: String, layer: &Layer, raster: &Raster, ctx: &Context) -> ResourceSprite {
        let scale = self.options.walkmap_scale;
        let walkmap = encode_walkmap(raster, scale);
        let (left, top) = ctx.relative_center(layer.left, layer.top, raster.width(), raster.height());
        ResourceSprite::Walkmap(ResourceBitmap {
            name,
            left,
            top,
            width: raster.width(),
            height: raster.height(),
            data: encode_bits(&walkmap.data),
            scale: Some(scale),
        })
    }

    fn animation(&mut self, name: String, children: &[Layer], ctx: &Context) -> Result<ResourceSprite> {
        let mut frames = Vec::with_capacity(children.len());

        for child in children {
            let (frame_name, delay) =
                parse_frame_delay(child.raw_name(), &name, self.options.frame_delay)?;

            let raster = match &child.content {
                Some(LayerContent::Raster(raster)) => raster,
                _ => {
                    return Err(AsrcError::InvalidAnimationFrame {
                        animation: name,
                        frame: frame_name,
                        reason: "frame layer has no raster".to_string(),
                    })
                }
            };

            let image = self.registry.register(raster, true)?;
            let (left, top) = ctx.relative_center(child.left, child.top, raster.width(), raster.height());
            frames.push(ResourceAnimationFrame {
                image,
                left,
                top,
                delay,
            });
        }

        Ok(ResourceSprite::Animation(ResourceAnimation { name, frames }))
    }

    fn notice(&mut self, code: &str, message: String) {
        self.notices
            .push(Diagnostic::warning(code, message).with_document(self.document));
    }
}

/// What content a tag needs, for error messages.
fn expected_content(tag: Tag) -> &'static str {
    match tag {
        Tag::Origin => "a raster, a container or a marker",
        Tag::Namespace | Tag::Animation => "a container layer",
        Tag::Walkmap | Tag::Proxy | Tag::Text => "a raster layer",
        Tag::Point => "a raster layer or a marker",
    }
}
