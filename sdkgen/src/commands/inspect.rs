use std::io::{self, Write};

use clap::Args;
use eyre::Result;
use sdkgen_codegen::synthesize;

use super::SourceArgs;

#[derive(Args, Debug)]
pub struct InspectCommand {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Print the normalized document instead of the synthesized SDK
    #[arg(long)]
    pub document: bool,
}

impl InspectCommand {
    pub fn run(&self) -> Result<()> {
        let (settings, spec) = self.source.load()?;

        let json = if self.document {
            serde_json::to_string_pretty(&spec)?
        } else {
            let output = synthesize(&spec, settings.meta(&spec));
            for diagnostic in &output.diagnostics {
                eprintln!("{}", diagnostic);
            }
            serde_json::to_string_pretty(&output.ir)?
        };

        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", json)?;
        Ok(())
    }
}
