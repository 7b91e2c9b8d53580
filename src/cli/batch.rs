//! Batch command implementation.
//!
//! Generates random artworks forever (or `--count` times), writing each one
//! as `out{index:08x}.{ext}` in the output directory.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;

use crate::artwork::{save_tree, Artwork};
use crate::config::{Backend, OutputFormat, Settings};
use crate::error::Result;
use crate::output::{display_path, format_duration, plural, Printer};

use super::{ensure_dir, make_rng, render_to_file};

/// Generate and render images in a loop
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// First image index, in hexadecimal
    #[arg(value_parser = parse_hex_index, default_value = "0")]
    pub start: u64,

    /// Stop after this many images (runs until interrupted otherwise)
    #[arg(long, short = 'n')]
    pub count: Option<u64>,

    /// Output directory
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Canvas side length in pixels
    #[arg(long)]
    pub size: Option<u32>,

    /// Evaluation backend
    #[arg(long, value_enum)]
    pub backend: Option<Backend>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Random seed for reproducible batches
    #[arg(long)]
    pub seed: Option<u64>,

    /// Also save each tree as JSON next to its image
    #[arg(long)]
    pub save_trees: bool,
}

/// Parse an image index written in hexadecimal, with or without `0x`.
pub fn parse_hex_index(s: &str) -> std::result::Result<u64, String> {
    let digits = s.trim_start_matches("0x").trim_start_matches("0X");
    u64::from_str_radix(digits, 16).map_err(|e| format!("invalid hexadecimal index '{}': {}", s, e))
}

/// File name for the image with the given index.
pub fn output_name(index: u64, format: OutputFormat) -> String {
    format!("out{:08x}.{}", index, format.extension())
}

pub fn run(args: BatchArgs, settings: Settings) -> Result<()> {
    let output = args.output.unwrap_or(settings.output);
    let size = args.size.unwrap_or(settings.size);
    let backend = args.backend.unwrap_or(settings.backend);
    let format = args.format.unwrap_or(settings.format);
    let mut rng = make_rng(args.seed.or(settings.seed));

    ensure_dir(&output)?;

    let printer = Printer::new();
    let mut rendered = 0usize;

    for index in args.start..=u64::MAX {
        if args.count.is_some_and(|n| rendered as u64 >= n) {
            break;
        }

        let mut art = Artwork::random(&mut rng, settings.min_budget, settings.max_budget);
        let path = output.join(output_name(index, format));

        if args.save_trees {
            save_tree(art.expr(), &path.with_extension("json"))?;
        }

        let started = Instant::now();
        if backend == Backend::Reified {
            art.reify();
        }
        render_to_file(&art, &path, format, size, settings.block, 1)?;

        printer.status(
            "Rendered",
            &format!(
                "{} {}",
                display_path(&path),
                printer.dim(&format!(
                    "({} nodes in {})",
                    art.expr().node_count(),
                    format_duration(started.elapsed())
                ))
            ),
        );
        rendered += 1;
    }

    printer.info(
        "Finished",
        &format!(
            "{} in {}",
            plural(rendered, "image", "images"),
            printer.cyan(&display_path(&output))
        ),
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::MemorySlab;
    use tempfile::tempdir;

    #[test]
    fn test_parse_hex_index() {
        assert_eq!(parse_hex_index("0"), Ok(0));
        assert_eq!(parse_hex_index("ff"), Ok(255));
        assert_eq!(parse_hex_index("0x1A"), Ok(26));
        assert!(parse_hex_index("zz").is_err());
    }

    #[test]
    fn test_output_name() {
        assert_eq!(output_name(0x2a, OutputFormat::Png), "out0000002a.png");
        assert_eq!(output_name(1, OutputFormat::Slab), "out00000001.slab");
    }

    #[test]
    fn test_batch_writes_numbered_files() {
        let dir = tempdir().unwrap();
        let args = BatchArgs {
            start: 0x10,
            count: Some(2),
            output: Some(dir.path().to_path_buf()),
            size: Some(8),
            backend: Some(Backend::Tree),
            format: Some(OutputFormat::Slab),
            seed: Some(3),
            save_trees: true,
        };
        let settings = Settings {
            min_budget: 2,
            max_budget: 6,
            ..Settings::default()
        };

        run(args, settings).unwrap();

        for name in ["out00000010", "out00000011"] {
            let slab = MemorySlab::load(&dir.path().join(format!("{}.slab", name))).unwrap();
            assert_eq!(slab.words().len(), 64);
            assert!(dir.path().join(format!("{}.json", name)).is_file());
        }
        assert!(!dir.path().join("out00000012.slab").exists());
    }

    #[test]
    fn test_batch_stops_at_last_index() {
        let dir = tempdir().unwrap();
        let args = BatchArgs {
            start: u64::MAX,
            count: Some(3),
            output: Some(dir.path().to_path_buf()),
            size: Some(4),
            backend: None,
            format: Some(OutputFormat::Slab),
            seed: Some(5),
            save_trees: false,
        };

        run(args, Settings::default()).unwrap();

        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
        assert!(dir.path().join("outffffffffffffffff.slab").is_file());
    }
}
