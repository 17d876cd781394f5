mod check;
mod completions;
mod generate;
mod inspect;

use std::path::{Path, PathBuf};

use check::CheckCommand;
use clap::{Args, Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use generate::GenerateCommand;
use inspect::InspectCommand;
use sdkgen_document::ApiSpec;

use crate::{
    config::{Config, DEFAULT_CONFIG},
    ops::Settings,
};

/// Extension trait for exiting on document errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for sdkgen_document::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "sdkgen")]
#[command(version)]
#[command(about = "Generate typed API client SDKs from API documents")]
#[command(args_conflicts_with_subcommands = true)]
pub(crate) struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Running without a subcommand generates
    #[command(flatten)]
    generate: GenerateCommand,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            None => self.generate.run(),
            Some(Commands::Generate(cmd)) => cmd.run(),
            Some(Commands::Check(cmd)) => cmd.run(),
            Some(Commands::Inspect(cmd)) => cmd.run(),
            Some(Commands::Completions(cmd)) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an SDK (the default)
    Generate(GenerateCommand),

    /// Validate an API document without generating code
    Check(CheckCommand),

    /// Print the synthesized SDK model as JSON
    Inspect(InspectCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Where the API document comes from.
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Path to sdkgen.toml (defaults to ./sdkgen.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// API document, JSON or YAML (overrides sdkgen.toml)
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

impl SourceArgs {
    /// Configuration merged with the flags given here.
    pub fn settings(&self) -> Result<Settings> {
        let config = match &self.config {
            Some(path) => Config::load(path, true)?,
            None => Config::load(Path::new(DEFAULT_CONFIG), false)?,
        };
        Ok(Settings::new(config).input(self.input.clone()))
    }

    /// Parse the configured document, exiting with a rendered report on failure.
    pub fn load(&self) -> Result<(Settings, ApiSpec)> {
        let settings = self.settings()?;
        tracing::info!(input = %settings.input.display(), "loading api document");
        let spec = sdkgen_document::parse_file(&settings.input).unwrap_or_exit();
        Ok((settings, spec))
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;
    use crate::config::Language;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_bare_invocation_generates() {
        let cli = Cli::try_parse_from([
            "sdkgen", "-i", "openapi.yaml", "-o", "out", "-l", "ts", "--dry-run",
        ])
        .unwrap();

        assert!(cli.command.is_none());
        assert_eq!(cli.generate.source.input, Some(PathBuf::from("openapi.yaml")));
        assert_eq!(cli.generate.output, Some(PathBuf::from("out")));
        assert_eq!(cli.generate.language, Some(Language::TypeScript));
        assert!(cli.generate.dry_run);
    }

    #[test]
    fn test_subcommands() {
        let cli = Cli::try_parse_from(["sdkgen", "check", "-c", "custom.toml"]).unwrap();
        let Some(Commands::Check(check)) = &cli.command else {
            panic!("expected check");
        };
        assert_eq!(check.source.config, Some(PathBuf::from("custom.toml")));

        let cli = Cli::try_parse_from(["sdkgen", "inspect", "--document", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(&cli.command, Some(Commands::Inspect(cmd)) if cmd.document));
    }

    #[test]
    fn test_rejects_unknown_language() {
        assert!(Cli::try_parse_from(["sdkgen", "--language", "python"]).is_err());
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let dir = tempfile::TempDir::new().unwrap();
        let source = SourceArgs {
            config: Some(dir.path().join("missing.toml")),
            input: None,
        };
        assert!(source.settings().is_err());
    }
}
