use clap::Args;
use eyre::Result;

use super::SourceArgs;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args, Debug)]
pub struct CheckCommand {
    #[command(flatten)]
    pub source: SourceArgs,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let (settings, spec) = self.source.load()?;
        let report = ops::check(&spec, &settings);
        report.render(&mut TerminalOutput::new());

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
