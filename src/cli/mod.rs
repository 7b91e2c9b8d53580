pub mod batch;
pub mod completions;
pub mod generate;
pub mod render;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::artwork::Artwork;
use crate::config::{OutputFormat, Settings};
use crate::error::{RaError, Result};
use crate::render::{render_image, render_slab, write_png};

/// randomart - Random expression art generator
#[derive(Parser, Debug)]
#[command(name = "randomart")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Settings file (defaults to ./randomart.yaml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate and render images in a loop
    Batch(batch::BatchArgs),

    /// Render a single image
    Render(render::RenderArgs),

    /// Generate an expression tree without rendering it
    Generate(generate::GenerateArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Load settings from `--config` or the working directory.
pub fn load_settings(config: Option<&Path>) -> Result<Settings> {
    let cwd = std::env::current_dir()?;
    Settings::discover(config, &cwd)
}

/// Seeded generator when a seed is given, entropy otherwise.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Render `art` and write it to `path` in the given format.
pub fn render_to_file(
    art: &Artwork,
    path: &Path,
    format: OutputFormat,
    side: u32,
    block: u32,
    scale: u32,
) -> Result<()> {
    match format {
        OutputFormat::Png => write_png(&render_image(art, side, block)?, path, scale),
        OutputFormat::Slab => render_slab(art, side, block)?.save(path),
    }
}

/// Create `dir` (and parents) if it does not exist yet.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.as_os_str().is_empty() || dir.exists() {
        return Ok(());
    }
    std::fs::create_dir_all(dir).map_err(|e| RaError::Io {
        path: dir.to_path_buf(),
        message: format!("Failed to create output directory: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::MemorySlab;
    use crate::types::Expr;
    use clap::CommandFactory;
    use tempfile::tempdir;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_make_rng_is_seeded() {
        use rand::Rng;
        let a: u64 = make_rng(Some(5)).gen();
        let b: u64 = make_rng(Some(5)).gen();
        assert_eq!(a, b);
    }

    #[test]
    fn test_render_to_file_formats() {
        let dir = tempdir().unwrap();
        let art = Artwork::new(Expr::VarY);

        let png = dir.path().join("a.png");
        render_to_file(&art, &png, OutputFormat::Png, 8, 1, 2).unwrap();
        assert_eq!(image::open(&png).unwrap().width(), 16);

        let slab = dir.path().join("a.slab");
        render_to_file(&art, &slab, OutputFormat::Slab, 8, 1, 2).unwrap();
        assert_eq!(MemorySlab::load(&slab).unwrap().words().len(), 64);
    }

    #[test]
    fn test_ensure_dir() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
        ensure_dir(&nested).unwrap();
    }
}
