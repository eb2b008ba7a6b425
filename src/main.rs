use clap::Parser;
use miette::Result;
use palettetool::cli::{Cli, Commands};
use palettetool::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new(cli.verbose);

    match cli.command {
        Commands::Convert(args) => {
            palettetool::cli::convert::run(args, cli.config.as_deref(), &printer)?
        }
        Commands::Formats(args) => palettetool::cli::formats::run(args)?,
        Commands::Init(args) => palettetool::cli::init::run(args, &printer)?,
        Commands::Completions(args) => palettetool::cli::completions::run(args)?,
    }

    Ok(())
}
