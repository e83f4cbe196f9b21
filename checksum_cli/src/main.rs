use anyhow::{Context, Result};
use checksum_cli::config::{AppConfig, ConfigManager, get_config};
use checksum_cli::output::{OutputFormat, create_formatter};
use checksum_cli::runner::DigestRunner;
use checksum_cli::terminal;
use checksum_core::{Algorithm, DigesterRegistry};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "checksum")]
#[command(author, version, about = "Compute and verify file checksums", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate checksum(s) for file(s)
    Calc {
        /// Files to digest
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Checksum algorithm, case-insensitive (can be specified multiple times)
        #[arg(short, long = "algorithm", value_name = "ALGORITHM")]
        algorithms: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Write a reference file (FILE.ext) next to each input
        #[arg(short, long)]
        write: bool,
    },

    /// Verify file(s) against their reference checksum files
    Verify {
        /// Files to verify; FILE.ext must exist for each algorithm
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Checksum algorithm, case-insensitive (can be specified multiple times)
        #[arg(short, long = "algorithm", value_name = "ALGORITHM")]
        algorithms: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// List supported checksum algorithms
    Algorithms,

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the configuration file path
    Path,

    /// List all configuration values
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on debug flag
    if cli.debug {
        env_logger::Builder::from_env(env_logger::Env::default())
            .filter_level(log::LevelFilter::Debug)
            .filter_module("checksum_core", log::LevelFilter::Debug)
            .filter_module("checksum_cli", log::LevelFilter::Debug)
            .format_timestamp_millis()
            .init();
        eprintln!("Debug logging enabled");
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    match cli.command {
        Commands::Calc {
            files,
            algorithms,
            format,
            write,
        } => {
            let config = get_config().context("Failed to load configuration")?;
            calc_command(config, files, algorithms, format, write).await?;
        }
        Commands::Verify {
            files,
            algorithms,
            format,
        } => {
            let config = get_config().context("Failed to load configuration")?;
            verify_command(config, files, algorithms, format).await?;
        }
        Commands::Algorithms => list_algorithms(),
        Commands::Config { command } => config_command(command)?,
        Commands::Completions { shell } => generate_completions(shell),
    }

    Ok(())
}

/// Build the registry and runner shared by `calc` and `verify`
fn prepare(config: &AppConfig, algorithms: Vec<String>) -> Result<DigestRunner> {
    let registry = DigesterRegistry::with_config(config.digest.clone())
        .context("Invalid digest configuration")?;
    let algorithms = if algorithms.is_empty() {
        config.defaults.algorithms.clone()
    } else {
        algorithms
    };
    DigestRunner::new(&registry, &algorithms)
}

fn resolve_format(config: &AppConfig, format: Option<OutputFormat>) -> Result<OutputFormat> {
    match format {
        Some(format) => Ok(format),
        None => OutputFormat::from_string(&config.output.default_format),
    }
}

async fn calc_command(
    config: AppConfig,
    files: Vec<PathBuf>,
    algorithms: Vec<String>,
    format: Option<OutputFormat>,
    write: bool,
) -> Result<()> {
    let runner = prepare(&config, algorithms)?;
    let format = resolve_format(&config, format)?;
    log::debug!("Digesting {} file(s), write references: {write}", files.len());

    let results = runner.calc(&files, write).await?;

    let formatter = create_formatter(format, terminal::use_color(config.output.color_enabled));
    println!("{}", formatter.format_digests(&results)?.trim_end());
    Ok(())
}

async fn verify_command(
    config: AppConfig,
    files: Vec<PathBuf>,
    algorithms: Vec<String>,
    format: Option<OutputFormat>,
) -> Result<()> {
    let runner = prepare(&config, algorithms)?;
    let format = resolve_format(&config, format)?;

    let outcomes = runner.verify(&files).await?;

    let formatter = create_formatter(format, terminal::use_color(config.output.color_enabled));
    println!("{}", formatter.format_verification(&outcomes)?.trim_end());

    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
    if failed > 0 {
        anyhow::bail!("{failed} of {} checksum verification(s) failed", outcomes.len());
    }
    Ok(())
}

fn list_algorithms() {
    for algorithm in Algorithm::ALL {
        if algorithm.is_available() {
            println!("{:<8} {}", algorithm.name(), algorithm.filename_extension());
        } else {
            println!(
                "{:<8} {} {}",
                algorithm.name(),
                algorithm.filename_extension(),
                "(not available in this build)".dimmed()
            );
        }
    }
}

fn config_command(command: ConfigCommand) -> Result<()> {
    let manager = ConfigManager::new();

    match command {
        ConfigCommand::Path => {
            println!("{}", manager.get_config_path().display());
        }
        ConfigCommand::List => {
            let items = manager.list()?;
            eprintln!("Config file: {}", manager.get_config_path().display());
            for (key, value) in items {
                println!("{key} = {value}");
            }
        }
    }

    Ok(())
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    generate(shell, &mut cmd, name, &mut std::io::stdout());
}
