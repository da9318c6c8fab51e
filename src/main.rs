use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use design_token_pipeline::{
    config::DEFAULT_CONFIG_FILE, pipeline, BuildError, PipelineConfig, Registry,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "design-tokens", version, about = "Compile design tokens into theme modules")]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build every platform, or only the ones given
    Build {
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
        #[arg(short, long = "platform")]
        platforms: Vec<String>,
    },
    /// Remove the files a build writes
    Clean {
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
        #[arg(short, long = "platform")]
        platforms: Vec<String>,
    },
    /// List registered formats, filters and transforms
    List,
}

fn run(command: Command) -> Result<(), BuildError> {
    let registry = Registry::with_defaults();
    match command {
        Command::Build { config, platforms } => {
            let config = PipelineConfig::load(&config)?;
            let report = pipeline::build(&config, &registry, &platforms)?;
            for file in report.files {
                println!("{} ({} tokens)", file.path.display(), file.token_count);
            }
        }
        Command::Clean { config, platforms } => {
            let config = PipelineConfig::load(&config)?;
            for path in pipeline::clean(&config, &platforms)? {
                println!("removed {}", path.display());
            }
        }
        Command::List => {
            println!("formats:\n  {}", registry.list_formats().join("\n  "));
            println!("filters:\n  {}", registry.list_filters().join("\n  "));
            println!("transforms:\n  {}", registry.list_transforms().join("\n  "));
            println!(
                "transform groups:\n  {}",
                registry.list_transform_groups().join("\n  ")
            );
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
