//! Render command implementation.
//!
//! Renders one artwork, either loaded from a saved tree or freshly generated.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;

use crate::artwork::{load_tree, save_tree, Artwork};
use crate::config::{Backend, OutputFormat, Settings};
use crate::error::Result;
use crate::output::{display_path, format_duration, Printer};

use super::{ensure_dir, make_rng, render_to_file};

/// Render a single image
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Tree file to render (a random tree is generated otherwise)
    #[arg(long, short)]
    pub tree: Option<PathBuf>,

    /// Output file
    #[arg(long, short, default_value = "art.png")]
    pub output: PathBuf,

    /// Save the rendered tree to this file
    #[arg(long)]
    pub save_tree: Option<PathBuf>,

    /// Canvas side length in pixels
    #[arg(long)]
    pub size: Option<u32>,

    /// Pixel block size
    #[arg(long)]
    pub block: Option<u32>,

    /// Scale factor for PNG output (integer upscaling)
    #[arg(long, default_value = "1")]
    pub scale: u32,

    /// Evaluation backend
    #[arg(long, value_enum)]
    pub backend: Option<Backend>,

    /// Output format (inferred from the output extension when omitted)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Random seed used when generating a tree
    #[arg(long)]
    pub seed: Option<u64>,
}

impl RenderArgs {
    fn effective_format(&self, settings: &Settings) -> OutputFormat {
        if let Some(format) = self.format {
            return format;
        }
        match self.output.extension().and_then(|e| e.to_str()) {
            Some("slab") => OutputFormat::Slab,
            Some("png") => OutputFormat::Png,
            _ => settings.format,
        }
    }
}

pub fn run(args: RenderArgs, settings: Settings) -> Result<()> {
    let printer = Printer::new();
    let format = args.effective_format(&settings);
    let size = args.size.unwrap_or(settings.size);
    let block = args.block.unwrap_or(settings.block);
    let backend = args.backend.unwrap_or(settings.backend);

    let expr = match &args.tree {
        Some(path) => {
            printer.info("Loading", &display_path(path));
            load_tree(path)?
        }
        None => {
            let mut rng = make_rng(args.seed.or(settings.seed));
            Artwork::random(&mut rng, settings.min_budget, settings.max_budget).into_expr()
        }
    };

    if let Some(path) = &args.save_tree {
        save_tree(&expr, path)?;
        printer.status("Saved", &display_path(path));
    }

    if let Some(parent) = args.output.parent() {
        ensure_dir(parent)?;
    }

    let started = Instant::now();
    let art = Artwork::with_backend(expr, backend);
    render_to_file(&art, &args.output, format, size, block, args.scale)?;

    printer.status(
        "Rendered",
        &format!(
            "{} {}",
            display_path(&args.output),
            printer.dim(&format!("({}x{} in {})", size, size, format_duration(started.elapsed())))
        ),
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::MemorySlab;
    use crate::types::Expr;
    use tempfile::tempdir;

    fn args(output: PathBuf) -> RenderArgs {
        RenderArgs {
            tree: None,
            output,
            save_tree: None,
            size: Some(6),
            block: None,
            scale: 1,
            backend: None,
            format: None,
            seed: Some(11),
        }
    }

    #[test]
    fn test_format_from_extension() {
        let settings = Settings::default();
        assert_eq!(args("a.slab".into()).effective_format(&settings), OutputFormat::Slab);
        assert_eq!(args("a.png".into()).effective_format(&settings), OutputFormat::Png);
        assert_eq!(args("a.out".into()).effective_format(&settings), OutputFormat::Png);

        let mut explicit = args("a.png".into());
        explicit.format = Some(OutputFormat::Slab);
        assert_eq!(explicit.effective_format(&settings), OutputFormat::Slab);
    }

    #[test]
    fn test_render_saved_tree() {
        let dir = tempdir().unwrap();
        let tree = dir.path().join("tree.json");
        save_tree(&Expr::constant(1.0, -1.0, 0.0), &tree).unwrap();

        let output = dir.path().join("nested").join("art.slab");
        let mut a = args(output.clone());
        a.tree = Some(tree);
        run(a, Settings::default()).unwrap();

        let slab = MemorySlab::load(&output).unwrap();
        assert!(slab.words().iter().all(|&w| w == 0x00FF_0080));
    }

    #[test]
    fn test_same_seed_renders_same_image() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("a.slab");
        let second = dir.path().join("b.slab");
        let mut a = args(first.clone());
        a.save_tree = Some(dir.path().join("a.json"));
        let mut b = args(second.clone());
        b.backend = Some(Backend::Tree);

        run(a, Settings::default()).unwrap();
        run(b, Settings::default()).unwrap();

        assert_eq!(MemorySlab::load(&first).unwrap(), MemorySlab::load(&second).unwrap());
        assert!(dir.path().join("a.json").is_file());
    }
}
