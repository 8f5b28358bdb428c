//! CLI argument definitions using clap.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use framebench_core::ReportConfig;
use std::path::PathBuf;

use crate::commands;

/// Framebench - compare inference framework benchmark results
#[derive(Parser, Debug)]
#[command(name = "framebench")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (YAML, TOML or JSON)
    #[arg(short, long, env = "FRAMEBENCH_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare the two frameworks per metric and condition
    Summary(commands::summary::SummaryArgs),

    /// Break down every metric per number of prompts
    Prompts(commands::prompts::PromptsArgs),

    /// Regenerate the benchmark directory index page
    Index(commands::index::IndexArgs),

    /// Manage report configuration
    Config(commands::config::ConfigArgs),

    /// Generate shell completions
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command.
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Summary(args) => {
                let config = load_config(self.config.as_deref())?;
                commands::summary::execute(args, &config, self.json)
            }
            Commands::Prompts(args) => {
                let config = load_config(self.config.as_deref())?;
                commands::prompts::execute(args, &config, self.json)
            }
            Commands::Index(args) => {
                let config = load_config(self.config.as_deref())?;
                commands::index::execute(args, &config, self.json)
            }
            Commands::Config(args) => {
                commands::config::execute(args, self.config.as_deref(), self.json)
            }
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

fn load_config(explicit: Option<&std::path::Path>) -> Result<ReportConfig> {
    let (config, _) = ReportConfig::load(explicit).context("Failed to load configuration")?;
    Ok(config)
}
