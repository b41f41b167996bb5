use miette::Diagnostic;
use thiserror::Error;

/// Main error type for asrc operations
#[derive(Error, Diagnostic, Debug)]
pub enum AsrcError {
    #[error("IO error: {0}")]
    #[diagnostic(code(asrc::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(asrc::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(asrc::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Document {document} has no layers")]
    #[diagnostic(
        code(asrc::empty_document),
        help("A layer document needs at least one top-level layer")
    )]
    EmptyDocument { document: String },

    #[error("Layer '{layer}' has unrecognized tag '{tag}'")]
    #[diagnostic(
        code(asrc::unrecognized_tag),
        help("Known tags: origin, namespace, animation, walkmap, proxy, point, text")
    )]
    UnrecognizedTag { layer: String, tag: String },

    #[error("Layer '{layer}' is tagged '{tag}' but is not {expected}")]
    #[diagnostic(code(asrc::misplaced_tag))]
    MisplacedTag {
        layer: String,
        tag: String,
        expected: String,
    },

    #[error("Animation '{animation}' has an invalid frame '{frame}': {reason}")]
    #[diagnostic(
        code(asrc::invalid_animation_frame),
        help("Animation frames are raster layers named 'name:delay', e.g. 'walk1:120'")
    )]
    InvalidAnimationFrame {
        animation: String,
        frame: String,
        reason: String,
    },

    #[error("Top-level layer '{layer}' produced a {kind} sprite")]
    #[diagnostic(
        code(asrc::unexpected_top_level_sprite),
        help("Put sprites inside a group layer, or enable wrap_documents")
    )]
    UnexpectedTopLevelSprite { layer: String, kind: String },

    #[error("Build error: {message}")]
    #[diagnostic(code(asrc::build))]
    Build {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, AsrcError>;
