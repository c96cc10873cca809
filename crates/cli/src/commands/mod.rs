//! Command implementations
//!
//! Every command loads the configuration, connects once and runs a single
//! transfer operation through the resulting session.

pub mod get;
pub mod ls;
pub mod put;

use std::path::PathBuf;

use clap::{Args, Subcommand};
use skbn_core::{Config, ConfigManager, Session};
use skbn_s3::S3Client;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Options shared by all commands
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Path to the config file [default: <config dir>/skbn/config.toml]
    #[arg(long, global = true, env = "SKBN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Region to connect to (overrides the config file)
    #[arg(long, global = true, env = "SKBN_REGION")]
    pub region: Option<String>,

    /// Endpoint of an S3-compatible service (overrides the config file)
    #[arg(long, global = true, env = "SKBN_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Use path-style bucket addressing
    #[arg(long, global = true)]
    pub path_style: bool,

    /// Output JSON instead of human-readable text
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

impl GlobalArgs {
    pub fn output_config(&self) -> OutputConfig {
        OutputConfig {
            json: self.json,
            no_color: self.no_color,
            quiet: self.quiet,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List objects under a bucket or prefix, recursively
    Ls(ls::LsArgs),

    /// Download one object to a local file
    Get(get::GetArgs),

    /// Upload one local file
    Put(put::PutArgs),
}

/// Execute a command
pub async fn execute(command: Commands, global: &GlobalArgs) -> ExitCode {
    let formatter = Formatter::new(global.output_config());

    match command {
        Commands::Ls(args) => ls::execute(args, global, &formatter).await,
        Commands::Get(args) => get::execute(args, global, &formatter).await,
        Commands::Put(args) => put::execute(args, global, &formatter).await,
    }
}

/// Load the config file and apply command-line overrides
pub fn load_config(global: &GlobalArgs) -> skbn_core::Result<Config> {
    let manager = match &global.config {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new()?,
    };

    let mut config = manager.load()?;

    if let Some(region) = &global.region {
        config.region = region.clone();
    }
    if let Some(endpoint) = &global.endpoint {
        config.endpoint = Some(endpoint.clone());
    }
    if global.path_style {
        config.force_path_style = true;
    }

    config.validate()?;
    Ok(config)
}

/// Helper to open a session, reporting failures through the formatter
pub async fn connect_session(
    global: &GlobalArgs,
    formatter: &Formatter,
) -> Result<Session<S3Client>, ExitCode> {
    let config = match load_config(global) {
        Ok(c) => c,
        Err(e) => {
            formatter.error(&format!("Failed to load configuration: {e}"));
            return Err(ExitCode::UsageError);
        }
    };

    match skbn_s3::connect(config).await {
        Ok(session) => Ok(session),
        Err(e) => {
            formatter.error(&e.to_string());
            Err(ExitCode::NetworkError)
        }
    }
}
