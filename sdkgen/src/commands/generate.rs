use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::SourceArgs;
use crate::{
    config::Language,
    ops::{self, GenerateOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args, Debug)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output directory (overrides sdkgen.toml, defaults to ./sdk)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Target language (overrides sdkgen.toml)
    #[arg(short, long)]
    pub language: Option<Language>,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let (settings, spec) = self.source.load()?;
        let settings = settings
            .output(self.output.clone())
            .language(self.language);

        let report = ops::generate(
            &spec,
            &settings,
            GenerateOptions {
                output_dir: &settings.output,
                language: settings.language,
                dry_run: self.dry_run,
            },
        )?;
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
