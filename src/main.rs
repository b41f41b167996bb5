use asrc::cli::{Cli, Commands};
use asrc::output::Printer;
use clap::Parser;
use miette::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::with_verbosity(cli.quiet, cli.verbose);

    match cli.command {
        Commands::Build(args) => asrc::cli::build::run(args, &printer)?,
        Commands::Validate(args) => asrc::cli::validate::run(args, &printer)?,
        Commands::Init(args) => asrc::cli::init::run(args, &printer)?,
        Commands::Completions(args) => asrc::cli::completions::run(args)?,
    }

    Ok(())
}
