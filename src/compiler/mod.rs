//! Resource compiler.
//!
//! Turns decoded layer documents into a [`ResourceFile`]. One compiler is
//! used for a whole run: its image registry is shared by every document, so
//! identical pixels in different documents resolve to the same image.
//!
//! # Example
//!
//! ```ignore
//! use asrc::compiler::{CompilerOptions, ResourceCompiler};
//! use asrc::registry::DiscardSink;
//!
//! let mut compiler = ResourceCompiler::new(CompilerOptions::default(), Box::new(DiscardSink));
//! compiler.compile_document(&village)?;
//! compiler.compile_document(&castle)?;
//! let resources = compiler.finish();
//! ```

mod context;
mod walker;

use crate::bitmap::{HITMAP_COMPRESSION, WALKMAP_SCALE};
use crate::error::{AsrcError, Result};
use crate::registry::{ImageRegistry, RasterSink};
use crate::types::{LayerDocument, ResourceFile, ResourceGroup};
use crate::validation::ValidationResult;

pub use context::{center, Context, Origin};

use walker::{Scope, Walker};

/// Default animation frame delay, in document time units.
pub const DEFAULT_FRAME_DELAY: u32 = 100;

/// Tunables for a compile run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerOptions {
    /// Hitmap compression factor.
    pub hitmap_compression: u32,
    /// Walkmap downscale factor.
    pub walkmap_scale: u32,
    /// Delay for animation frames that do not name one.
    pub frame_delay: u32,
    /// Wrap each document in a top-level group named after it.
    pub wrap_documents: bool,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            hitmap_compression: HITMAP_COMPRESSION,
            walkmap_scale: WALKMAP_SCALE,
            frame_delay: DEFAULT_FRAME_DELAY,
            wrap_documents: false,
        }
    }
}

/// Counters reported at the end of a build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileStats {
    pub documents: usize,
    pub groups: usize,
    pub sprites: usize,
    pub images: usize,
    /// Registrations that reused an existing image.
    pub dedup_hits: usize,
}

/// Accumulates groups and images across documents.
#[derive(Debug)]
pub struct ResourceCompiler {
    options: CompilerOptions,
    registry: ImageRegistry,
    groups: Vec<ResourceGroup>,
    diagnostics: ValidationResult,
    documents: usize,
}

impl ResourceCompiler {
    /// Create a compiler that persists new images to `sink`.
    pub fn new(options: CompilerOptions, sink: Box<dyn RasterSink>) -> Self {
        let registry = ImageRegistry::new(sink, options.hitmap_compression);
        Self {
            options,
            registry,
            groups: Vec::new(),
            diagnostics: ValidationResult::new(),
            documents: 0,
        }
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    /// Compile one document, appending its top-level groups.
    ///
    /// Origin and namespace context start fresh for every document. On error
    /// nothing from this document is added to the group list.
    pub fn compile_document(&mut self, document: &LayerDocument) -> Result<()> {
        if document.layers.is_empty() {
            return Err(AsrcError::EmptyDocument {
                document: document.name.clone(),
            });
        }

        let root = Context::root();
        let mut walker = Walker::new(&mut self.registry, &self.options, &document.name);

        let groups = if self.options.wrap_documents {
            let group = walker.group(document.name.clone(), &document.layers, &root)?;
            vec![group]
        } else {
            let mut scope = Scope::top_level();
            walker.walk_layers(&document.layers, &root, &mut scope)?;
            scope.children
        };

        self.diagnostics.extend(walker.into_notices());

        for group in groups {
            if group.is_empty() {
                self.diagnostics.warning(
                    "asrc::walk::empty-group",
                    format!("Document '{}' produced an empty group '{}'", document.name, group.name),
                );
            } else {
                self.groups.push(group);
            }
        }

        self.documents += 1;
        Ok(())
    }

    /// Groups compiled so far.
    pub fn groups(&self) -> &[ResourceGroup] {
        &self.groups
    }

    /// Registry of every image seen so far.
    pub fn registry(&self) -> &ImageRegistry {
        &self.registry
    }

    /// Warnings raised while walking.
    pub fn diagnostics(&self) -> &ValidationResult {
        &self.diagnostics
    }

    pub fn stats(&self) -> CompileStats {
        CompileStats {
            documents: self.documents,
            groups: self.groups.iter().map(ResourceGroup::group_count).sum(),
            sprites: self.groups.iter().map(ResourceGroup::sprite_count).sum(),
            images: self.registry.len(),
            dedup_hits: self.registry.hits(),
        }
    }

    /// Finish the run and produce the resource description.
    pub fn finish(self) -> ResourceFile {
        ResourceFile {
            groups: self.groups,
            images: self.registry.into_images(),
        }
    }
}
