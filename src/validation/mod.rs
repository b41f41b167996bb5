//! Validation for compiled resources.
//!
//! Runs a suite of checks against a compiled resource file and reports
//! errors and warnings. Walk notices raised by the compiler use the same
//! `Diagnostic` type. Used by both `asrc validate` and `asrc build`.

mod checks;
mod warning;

pub use warning::{Diagnostic, Severity, ValidationResult};

use crate::output::Printer;
use crate::types::ResourceFile;

/// Run all validation checks against a resource file.
pub fn validate_resources(resources: &ResourceFile, walkmap_scale: u32) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.merge(checks::check_duplicate_groups(resources));
    result.merge(checks::check_duplicate_sprites(resources));
    result.merge(checks::check_empty_walkmaps(resources, walkmap_scale));
    result.merge(checks::check_empty_animations(resources));
    result.merge(checks::check_image_refs(resources));

    result
}

/// Print diagnostics to stderr, without a summary line.
pub fn print_diagnostics(result: &ValidationResult, printer: &Printer) {
    for d in result.iter() {
        let label = printer.severity(&d.severity.to_string(), d.severity == Severity::Error);
        match &d.document {
            Some(document) => eprintln!("  {}[{}]: {}: {}", label, d.code, document, d.message),
            None => eprintln!("  {}[{}]: {}", label, d.code, d.message),
        }
        if let Some(help) = &d.help {
            eprintln!("    {} {}", printer.dim("help:"), help);
        }
    }
}
