//! glaze CLI - markdown directive pipeline.
//!
//! Provides commands for:
//! - `build`: Render content to HTML fragments, metadata, and OG images
//! - `check`: Validate directives without writing anything

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, CheckArgs};
use output::{Output, Tone};

/// glaze - markdown directive pipeline.
#[derive(Parser)]
#[command(name = "glaze", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the content directory.
    Build(BuildArgs),
    /// Check directives in the content directory.
    Check(CheckArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Build(args) => args.verbose,
            Self::Check(args) => args.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Build(args) => args.execute(),
        Commands::Check(args) => args.execute(),
    };

    if let Err(err) = result {
        output.line(Tone::Error, format_args!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_build_flags() {
        let cli = Cli::try_parse_from([
            "glaze",
            "build",
            "--source-dir",
            "posts",
            "--no-og",
            "-v",
        ])
        .unwrap();
        assert!(cli.command.verbose());
        assert!(matches!(cli.command, Commands::Build(_)));
    }

    #[test]
    fn test_og_dir_requires_value() {
        assert!(Cli::try_parse_from(["glaze", "build", "--og-dir"]).is_err());
    }

    #[test]
    fn test_check_is_quiet_by_default() {
        let cli = Cli::try_parse_from(["glaze", "check"]).unwrap();
        assert!(!cli.command.verbose());
    }
}
