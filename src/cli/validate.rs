//! Validate command implementation.
//!
//! Compiles every document into a discarding sink, so nothing is written,
//! then runs the resource checks.

use std::path::PathBuf;

use clap::Args;

use crate::error::Result;
use crate::output::{plural, Printer};
use crate::registry::DiscardSink;
use crate::validation::validate_resources;

use super::build::{compile_documents, discover_inputs, no_documents, report, summary};

/// Compile and check layer documents without writing output
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Project directory, or layer documents and directories to check
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

pub fn run(args: ValidateArgs, printer: &Printer) -> Result<()> {
    let discovery = discover_inputs(&args.paths)?;
    if discovery.documents.is_empty() {
        return Err(no_documents(&args.paths));
    }

    let options = discovery.manifest.compiler_options();
    let walkmap_scale = options.walkmap_scale;
    let compiler = compile_documents(&discovery, options, Box::new(DiscardSink), printer)?;
    let stats = compiler.stats();
    let mut diagnostics = compiler.diagnostics().clone();
    let resources = compiler.finish();

    diagnostics.merge(validate_resources(&resources, walkmap_scale));

    if args.strict {
        diagnostics.promote_warnings();
    }
    report(&diagnostics, printer)?;

    if diagnostics.has_warnings() {
        printer.warning(
            "Checked",
            &format!(
                "{} with {}",
                summary(&stats),
                plural(diagnostics.warning_count(), "warning", "warnings")
            ),
        );
    } else {
        printer.success("Checked", &summary(&stats));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AsrcError;
    use std::fs;
    use tempfile::tempdir;

    fn quiet() -> Printer {
        Printer::with_verbosity(true, false)
    }

    fn write_png(path: &std::path::Path, width: u32, height: u32) {
        image::RgbaImage::from_pixel(width, height, image::Rgba([0, 0, 0, 255]))
            .save(path)
            .unwrap();
    }

    #[test]
    fn test_validate_writes_nothing() {
        let dir = tempdir().unwrap();
        write_png(&dir.path().join("hero.png"), 4, 4);
        fs::write(
            dir.path().join("hero.layers.yaml"),
            "layers:\n  - name: hero\n    children:\n      - name: idle\n        image: hero.png\n",
        )
        .unwrap();

        let args = ValidateArgs {
            paths: vec![dir.path().to_path_buf()],
            strict: false,
        };
        run(args, &quiet()).unwrap();

        assert!(!dir.path().join("dist").exists());
    }

    #[test]
    fn test_validate_reports_duplicate_sprites() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("hero.layers.yaml"),
            r#"
layers:
  - name: hero
    children:
      - name: "spawn:point"
      - name: "spawn:point"
        left: 5
"#,
        )
        .unwrap();

        let args = ValidateArgs {
            paths: vec![dir.path().to_path_buf()],
            strict: false,
        };
        let err = run(args, &quiet()).unwrap_err();
        assert!(matches!(err, AsrcError::Build { .. }));
    }

    #[test]
    fn test_strict_fails_on_warnings() {
        let dir = tempdir().unwrap();
        write_png(&dir.path().join("floor.png"), 4, 4);
        fs::write(
            dir.path().join("level.layers.yaml"),
            "layers:\n  - name: level\n    children:\n      - name: \"floor:walkmap\"\n        image: floor.png\n",
        )
        .unwrap();

        let lenient = ValidateArgs {
            paths: vec![dir.path().to_path_buf()],
            strict: false,
        };
        run(lenient, &quiet()).unwrap();

        let strict = ValidateArgs {
            paths: vec![dir.path().to_path_buf()],
            strict: true,
        };
        assert!(run(strict, &quiet()).is_err());
    }
}
