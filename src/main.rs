use clap::Parser;
use miette::Result;
use randomart::cli::{load_settings, Cli, Commands};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Batch(args) => randomart::cli::batch::run(args, load_settings(config)?)?,
        Commands::Render(args) => randomart::cli::render::run(args, load_settings(config)?)?,
        Commands::Generate(args) => randomart::cli::generate::run(args, load_settings(config)?)?,
        Commands::Completions(args) => randomart::cli::completions::run(args)?,
    }

    Ok(())
}
