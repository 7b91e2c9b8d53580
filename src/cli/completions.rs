//! Shell completions generation.

use std::path::PathBuf;

use clap::{Args, CommandFactory};
use clap_complete::Shell;

use crate::error::{RaError, Result};
use crate::output::{display_path, Printer};

use super::{ensure_dir, Cli};

/// Generate shell completions
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,

    /// Write the completion script into this directory instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub fn run(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();

    let Some(dir) = args.output else {
        clap_complete::generate(args.shell, &mut cmd, "randomart", &mut std::io::stdout());
        return Ok(());
    };

    ensure_dir(&dir)?;
    let path = clap_complete::generate_to(args.shell, &mut cmd, "randomart", &dir).map_err(|e| {
        RaError::Io {
            path: dir.clone(),
            message: format!("Failed to write completions: {}", e),
        }
    })?;
    Printer::new().status("Wrote", &display_path(&path));
    Ok(())
}
