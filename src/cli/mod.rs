pub mod completions;
pub mod convert;
pub mod formats;
pub mod init;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// palettetool - convert between colour palette formats
#[derive(Parser, Debug)]
#[command(name = "palettetool")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log each step of the conversion
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Config file (default: ./palettetool.yaml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a palette from one format to another
    Convert(convert::ConvertArgs),

    /// List supported input and output formats
    Formats(formats::FormatsArgs),

    /// Write a default palettetool.yaml
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SortKey;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_convert() {
        let cli = Cli::parse_from([
            "palettetool",
            "convert",
            "--in",
            "sunset.aco",
            "--out",
            "sunset.png",
            "--sort-png",
            "hue",
            "--json-palette-index",
            "2",
            "--verbose",
        ]);

        assert!(cli.verbose);
        match cli.command {
            Commands::Convert(args) => {
                assert_eq!(args.input, PathBuf::from("sunset.aco"));
                assert_eq!(args.output, PathBuf::from("sunset.png"));
                assert_eq!(args.sort_png, Some(SortKey::Hue));
                assert_eq!(args.json_palette_index, Some(2));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_convert_requires_files() {
        assert!(Cli::try_parse_from(["palettetool", "convert", "--in", "a.aco"]).is_err());
    }
}
