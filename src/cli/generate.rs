//! Generate command implementation.
//!
//! Writes a random tree as JSON, or prints its formula to stdout.

use std::path::PathBuf;

use clap::Args;

use crate::artwork::save_tree;
use crate::config::Settings;
use crate::error::Result;
use crate::generate::{generate, random_budget};
use crate::output::{display_path, Printer};

use super::make_rng;

/// Generate an expression tree without rendering it
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Size budget (drawn from the configured range when omitted)
    #[arg(long, short)]
    pub budget: Option<i32>,

    /// Random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write the tree as JSON to this file instead of printing it
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub fn run(args: GenerateArgs, settings: Settings) -> Result<()> {
    let mut rng = make_rng(args.seed.or(settings.seed));
    let budget = args
        .budget
        .unwrap_or_else(|| random_budget(&mut rng, settings.min_budget, settings.max_budget));
    let expr = generate(&mut rng, budget);

    match &args.output {
        Some(path) => {
            save_tree(&expr, path)?;
            Printer::new().status(
                "Generated",
                &format!(
                    "{} (budget {}, {} nodes)",
                    display_path(path),
                    budget,
                    expr.node_count()
                ),
            );
        }
        None => println!("{}", expr),
    }

    Ok(())
}
