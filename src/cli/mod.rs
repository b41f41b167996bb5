pub mod build;
pub mod completions;
pub mod init;
pub mod validate;

use clap::{Parser, Subcommand};

/// asrc - Layered art to runtime resource compiler
#[derive(Parser, Debug)]
#[command(name = "asrc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Only print warnings and errors
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Print per-layer details
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile layer documents into images and a resource description
    Build(build::BuildArgs),

    /// Compile and check layer documents without writing output
    Validate(validate::ValidateArgs),

    /// Initialize an asrc project (generates asrc.yaml)
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
