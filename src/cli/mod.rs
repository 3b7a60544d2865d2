use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;

use crate::config::{GeneratorConfig, DEFAULT_CONFIG_TEMPLATE};
use crate::core::registry::TypeRegistry;
use crate::emit::{ModuleGenerator, ModuleWriter};

#[derive(Parser)]
#[command(name = "typebridge")]
#[command(about = "Generate TypeScript model modules from annotated type graphs")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate TypeScript modules from model files
    Generate {
        /// Configuration file
        #[arg(short, long, default_value = "typebridge.toml")]
        config: PathBuf,

        /// Output directory (overrides the config file)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fail on dependencies that are neither generated nor mapped
        #[arg(long)]
        strict: bool,

        /// Model file globs (override the config file; comma-separated)
        #[arg(long, value_delimiter = ',')]
        models: Vec<String>,
    },

    /// Write a commented starter configuration file
    Init {
        /// Destination path
        #[arg(short, long, default_value = "typebridge.toml")]
        config: PathBuf,
    },

    /// Print the effective configuration after merging defaults
    #[command(name = "show-config")]
    ShowConfig {
        /// Configuration file
        #[arg(short, long, default_value = "typebridge.toml")]
        config: PathBuf,
    },
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(format!("type_bridge={}", log_level))
        .init();

    if !atty::is(atty::Stream::Stdout) {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Generate {
            config,
            output,
            strict,
            models,
        } => {
            generate(GenerateArgs {
                config,
                output,
                strict,
                models,
            })
            .await?;
        }

        Commands::Init { config } => {
            init_config(config).await?;
        }

        Commands::ShowConfig { config } => {
            show_config(config).await?;
        }
    }

    Ok(())
}

struct GenerateArgs {
    config: PathBuf,
    output: Option<PathBuf>,
    strict: bool,
    models: Vec<String>,
}

async fn generate(args: GenerateArgs) -> Result<()> {
    let started = Instant::now();

    let mut config = GeneratorConfig::load_or_default(&args.config).await?;

    // CLI flags override file values
    if let Some(output) = args.output {
        config.output.path = output;
    }
    if args.strict {
        config.generation.strict_dependencies = true;
    }
    if !args.models.is_empty() {
        config.models.patterns = args.models;
    }
    if config.models.patterns.is_empty() {
        anyhow::bail!("No model file patterns; set [models] patterns in the config or pass --models");
    }

    let options = config.to_options()?;
    let registry = TypeRegistry::load_patterns(&config.models.patterns)
        .context("Failed to load model files")?;
    println!(
        "{} Loaded {} types from {} pattern(s)",
        "→".blue(),
        registry.len(),
        config.models.patterns.len()
    );

    let generator = ModuleGenerator::new(&registry, &options);
    let modules = generator.generate().context("Generation failed")?;

    let writer = ModuleWriter::new(&config.output.path);
    let written = writer.write_all(&modules).await?;

    println!(
        "{} Generated {} modules into {} in {:.2?}",
        "✓".green(),
        written.len(),
        writer.output_root().display(),
        started.elapsed()
    );

    Ok(())
}

async fn init_config(path: PathBuf) -> Result<()> {
    if path.exists() {
        anyhow::bail!(
            "{} already exists; remove it or pass a different --config path",
            path.display()
        );
    }
    tokio::fs::write(&path, DEFAULT_CONFIG_TEMPLATE)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!(
        "{} Configuration initialized at {}",
        "✓".green(),
        path.display()
    );
    Ok(())
}

async fn show_config(path: PathBuf) -> Result<()> {
    let config = GeneratorConfig::load_or_default(&path).await?;
    let rendered = toml::to_string_pretty(&config).context("Failed to render configuration")?;
    print!("{}", rendered);
    Ok(())
}
