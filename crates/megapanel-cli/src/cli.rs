use std::io::Write;

use clap::{Parser, Subcommand};

use crate::build::{BuildAllArgs, BuildArgs, run_build, run_build_all, run_explain};
use crate::error::Result;
use crate::logging::init_logging;

#[derive(Debug, Parser)]
#[command(
    name = "megapanel",
    about = "Build balanced mega menu panel layouts from a JSON menu",
    version
)]
pub struct Cli {
    /// Log debug events to stderr (overridden by MEGAPANEL_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build the panel for one item.
    Build(BuildArgs),

    /// Build a panel for every top-level item with children.
    #[command(name = "build-all")]
    BuildAll(BuildAllArgs),

    /// Print the split decision, classification and columns for one item.
    Explain(BuildArgs),
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let stdout = std::io::stdout();
    run(cli, &mut stdout.lock())
}

pub fn run(cli: Cli, out: &mut dyn Write) -> Result<()> {
    match cli.command {
        Commands::Build(args) => run_build(args, out),
        Commands::BuildAll(args) => run_build_all(args, out),
        Commands::Explain(args) => run_explain(args, out),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use super::{Cli, Commands, run};
    use crate::error::CliError;

    #[test]
    fn parses_build_with_negative_columns() {
        let cli = Cli::try_parse_from([
            "megapanel", "build", "--menu", "menu.json", "--item", "shop", "--columns", "-3",
        ])
        .unwrap();
        match cli.command {
            Commands::Build(args) => {
                assert_eq!(args.item, "shop");
                assert_eq!(args.source.columns, -3);
                assert_eq!(args.source.menu, PathBuf::from("menu.json"));
                assert!(args.source.config.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn build_all_defaults_to_five_columns() {
        let cli = Cli::try_parse_from(["megapanel", "-v", "build-all", "--menu", "m.json"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::BuildAll(args) => assert_eq!(args.source.columns, 5),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn build_requires_item() {
        assert!(Cli::try_parse_from(["megapanel", "build", "--menu", "m.json"]).is_err());
    }

    #[test]
    fn missing_menu_dispatches_read_error() {
        let cli = Cli::try_parse_from([
            "megapanel",
            "explain",
            "--menu",
            "/definitely/not/here.json",
            "--item",
            "x",
        ])
        .unwrap();
        let result = run(cli, &mut Vec::<u8>::new());
        assert!(matches!(result, Err(CliError::Read { .. })));
    }
}
