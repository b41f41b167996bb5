//! Build command implementation.
//!
//! Compiles layer documents into deduplicated PNG images and a JSON
//! resource description.

use std::path::PathBuf;

use clap::Args;

use crate::compiler::{CompileStats, CompilerOptions, ResourceCompiler};
use crate::discovery::{discover, discover_paths, DiscoveryResult};
use crate::error::{AsrcError, Result};
use crate::output::{display_path, plural, Printer};
use crate::parser::load_document;
use crate::registry::RasterSink;
use crate::render::{resource_json, write_resource_json, PngWriter};
use crate::validation::{print_diagnostics, validate_resources, ValidationResult};

/// Compile layer documents into images and a resource description
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Project directory, or layer documents and directories to compile
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Output directory (overrides asrc.yaml)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Image directory, relative to the output directory
    #[arg(long)]
    pub images: Option<PathBuf>,

    /// Hitmap compression factor
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub hitmap_compression: Option<u32>,

    /// Walkmap downscale factor
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub walkmap_scale: Option<u32>,

    /// Wrap each document in a group named after it
    #[arg(long)]
    pub wrap_documents: bool,

    /// Pretty-print the resource description
    #[arg(long)]
    pub pretty: bool,

    /// Print the resource description to stdout instead of writing it
    #[arg(long)]
    pub stdout: bool,
}

pub fn run(args: BuildArgs, printer: &Printer) -> Result<()> {
    let discovery = discover_inputs(&args.paths)?;
    if discovery.documents.is_empty() {
        return Err(no_documents(&args.paths));
    }

    let manifest = &discovery.manifest;
    let output_dir = args.output.clone().unwrap_or_else(|| discovery.output_dir());
    let images_dir = output_dir.join(args.images.as_ref().unwrap_or(&manifest.images));
    let resource_path = output_dir.join(&manifest.resource_file);
    let options = build_options(&discovery, &args);
    let pretty = args.pretty || manifest.pretty;

    let writer = PngWriter::create(&images_dir)?;
    printer.verbose("Images", &display_path(writer.dir()));

    let compiler = compile_documents(&discovery, options.clone(), Box::new(writer), printer)?;
    let stats = compiler.stats();
    let mut diagnostics = compiler.diagnostics().clone();
    let resources = compiler.finish();

    diagnostics.merge(validate_resources(&resources, options.walkmap_scale));
    report(&diagnostics, printer)?;

    if args.stdout {
        println!("{}", resource_json(&resources, pretty)?);
    } else {
        write_resource_json(&resources, &resource_path, pretty)?;
        printer.status("Writing", &display_path(&resource_path));
    }

    printer.success("Finished", &summary(&stats));
    Ok(())
}

/// Resolve command-line paths to a discovery result.
///
/// A single directory is treated as a project root and its asrc.yaml is
/// honoured; anything else is taken as an explicit list of inputs.
pub(crate) fn discover_inputs(paths: &[PathBuf]) -> Result<DiscoveryResult> {
    match paths {
        [dir] if dir.is_dir() => discover(dir),
        _ => {
            if let Some(missing) = paths.iter().find(|p| !p.exists()) {
                return Err(AsrcError::Io {
                    path: missing.clone(),
                    message: "No such file or directory".to_string(),
                });
            }
            discover_paths(paths)
        }
    }
}

fn build_options(discovery: &DiscoveryResult, args: &BuildArgs) -> CompilerOptions {
    let mut options = discovery.manifest.compiler_options();
    if let Some(compression) = args.hitmap_compression {
        options.hitmap_compression = compression;
    }
    if let Some(scale) = args.walkmap_scale {
        options.walkmap_scale = scale;
    }
    options.wrap_documents |= args.wrap_documents;
    options
}

/// Load and compile every discovered document in order.
pub(crate) fn compile_documents(
    discovery: &DiscoveryResult,
    options: CompilerOptions,
    sink: Box<dyn RasterSink>,
    printer: &Printer,
) -> Result<ResourceCompiler> {
    let mut compiler = ResourceCompiler::new(options, sink);

    for path in &discovery.documents {
        let document = load_document(path)?;
        printer.status(
            "Compiling",
            &format!(
                "{} {}",
                document.name,
                printer.dim(&format!("({})", display_path(path)))
            ),
        );

        let images_before = compiler.registry().len();
        let hits_before = compiler.registry().hits();
        compiler.compile_document(&document)?;

        printer.verbose(
            "Images",
            &format!(
                "{} new, {} reused",
                compiler.registry().len() - images_before,
                compiler.registry().hits() - hits_before
            ),
        );
    }

    Ok(compiler)
}

/// Print diagnostics and fail when any of them is an error.
pub(crate) fn report(diagnostics: &ValidationResult, printer: &Printer) -> Result<()> {
    print_diagnostics(diagnostics, printer);

    if diagnostics.has_errors() {
        return Err(AsrcError::Build {
            message: format!(
                "Validation failed with {}",
                plural(diagnostics.error_count(), "error", "errors")
            ),
            help: Some("Fix the reported layers and build again".to_string()),
        });
    }
    Ok(())
}

pub(crate) fn summary(stats: &CompileStats) -> String {
    format!(
        "{}, {}, {}, {} ({} reused)",
        plural(stats.documents, "document", "documents"),
        plural(stats.groups, "group", "groups"),
        plural(stats.sprites, "sprite", "sprites"),
        plural(stats.images, "image", "images"),
        stats.dedup_hits
    )
}

pub(crate) fn no_documents(paths: &[PathBuf]) -> AsrcError {
    let shown: Vec<String> = paths.iter().map(|p| display_path(p)).collect();
    AsrcError::Build {
        message: format!("No layer documents found in {}", shown.join(", ")),
        help: Some("Layer documents are files named <name>.layers.yaml".to_string()),
    }
}
