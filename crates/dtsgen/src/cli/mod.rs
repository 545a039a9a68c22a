mod generate;
mod init;

pub use generate::GenerateCommand;
pub use init::InitCommand;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// dtsgen - TypeScript declarations and API clients from backend models
#[derive(Parser)]
#[command(name = "dtsgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Generate TypeScript from an IR document.
    Generate(GenerateCommand),

    /// Write a starter dtsgen.toml.
    Init(InitCommand),
}

impl Cli {
    /// Execute the CLI command.
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Generate(cmd) => cmd.execute(),
            Commands::Init(cmd) => cmd.execute(),
        }
    }
}

/// Initialize logging. `RUST_LOG` wins over the default level.
pub(crate) fn init_tracing(verbose: bool) {
    let log_level = if verbose { "debug" } else { "info" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()))
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_generate() {
        let cli = Cli::try_parse_from([
            "dtsgen",
            "generate",
            "--input",
            "ir.json",
            "--root",
            "src/",
            "--dry-run",
        ]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::try_parse_from(["dtsgen", "init", "--force"]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_cli_rejects_unknown_command() {
        let cli = Cli::try_parse_from(["dtsgen", "migrate"]);
        assert!(cli.is_err());
    }
}
