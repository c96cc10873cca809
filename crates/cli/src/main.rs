//! skbn - copy objects to and from S3-compatible storage

mod commands;
mod exit_code;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use commands::{Commands, GlobalArgs};

/// Resilient object-storage transfer client
#[derive(Parser, Debug)]
#[command(name = "skbn", version, about)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.debug);

    let code = commands::execute(cli.command, &cli.global).await;
    std::process::exit(code.as_i32());
}

/// Log to stderr so stdout stays clean for listings and JSON
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
