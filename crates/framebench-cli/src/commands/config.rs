//! Config command - manage report configuration.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use framebench_core::config::{search_paths, ConfigFormat};
use framebench_core::ReportConfig;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::output::{self, CommandOutput, OutputFormat};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show(ShowArgs),

    /// Generate a configuration file with default values
    Init(InitArgs),

    /// Check configuration paths
    Path,
}

/// Arguments for config show.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Configuration file to show
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

/// Arguments for config init.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "framebench.yaml")]
    pub output: PathBuf,

    /// Output format (yaml, toml, json); inferred from the file extension if omitted
    #[arg(short, long)]
    pub format: Option<String>,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

/// Configuration output for JSON.
#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    pub path: Option<String>,
    pub content: ReportConfig,
}

/// Configuration search path status.
#[derive(Debug, Clone, Serialize)]
pub struct PathStatus {
    pub path: String,
    pub exists: bool,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, global_config: Option<&Path>, json: bool) -> Result<()> {
    let format = OutputFormat::from_json_flag(json);

    match args.command {
        ConfigCommand::Show(show_args) => execute_show(show_args, global_config, format),
        ConfigCommand::Init(init_args) => execute_init(init_args, format),
        ConfigCommand::Path => execute_path(format),
    }
}

/// Execute config show.
fn execute_show(args: ShowArgs, global_config: Option<&Path>, format: OutputFormat) -> Result<()> {
    let explicit = args.file.as_deref().or(global_config);
    let (config, path) =
        ReportConfig::load(explicit).context("Failed to load configuration")?;

    match format {
        OutputFormat::Json => {
            let result = CommandOutput::data(ConfigOutput {
                path: path.map(|p| p.display().to_string()),
                content: config,
            });
            result.emit(format)?;
        }
        OutputFormat::Text => {
            if let Some(ref path) = path {
                output::info(&format!("Configuration from: {}", path.display()));
            } else {
                output::info("Default configuration");
            }

            println!("\n{}", serde_yaml::to_string(&config)?);
        }
    }

    Ok(())
}

/// Execute config init.
fn execute_init(args: InitArgs, format: OutputFormat) -> Result<()> {
    if args.output.exists() && !args.force {
        let result: CommandOutput<()> = CommandOutput::failure(format!(
            "File {} already exists. Use --force to overwrite.",
            args.output.display()
        ));
        result.emit(format)?;
        return Ok(());
    }

    let config_format = match args.format.as_deref() {
        Some(name) => name.parse::<ConfigFormat>()?,
        None => ConfigFormat::from_path(&args.output)?,
    };

    let content = ReportConfig::default().render(config_format)?;
    std::fs::write(&args.output, &content)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    match format {
        OutputFormat::Json => {
            let result = CommandOutput::data(serde_json::json!({
                "path": args.output.display().to_string(),
                "format": config_format.extension(),
            }));
            result.emit(format)?;
        }
        OutputFormat::Text => {
            output::success(&format!(
                "Created configuration file: {}",
                args.output.display()
            ));
            output::info(&format!("Format: {}", config_format.extension()));
        }
    }

    Ok(())
}

/// Execute config path.
fn execute_path(format: OutputFormat) -> Result<()> {
    let paths: Vec<PathStatus> = search_paths()
        .into_iter()
        .map(|path| PathStatus {
            exists: path.is_file(),
            path: path.display().to_string(),
        })
        .collect();

    match format {
        OutputFormat::Json => {
            CommandOutput::data(paths).emit(format)?;
        }
        OutputFormat::Text => {
            output::section("Configuration Search Paths");
            for status in &paths {
                output::status(&status.path, status.exists);
            }

            output::section("Environment Variables");
            for var in ["FRAMEBENCH_CONFIG", "FRAMEBENCH_RESULTS"] {
                output::key_value(
                    var,
                    &std::env::var(var).unwrap_or_else(|_| "(not set)".to_string()),
                );
            }
        }
    }

    Ok(())
}
