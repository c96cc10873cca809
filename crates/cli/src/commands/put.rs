//! put command - Upload one local file
//!
//! When the destination names only a bucket, the object key is the
//! source file's name.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use skbn_core::upload_destination;

use super::{GlobalArgs, connect_session};
use crate::exit_code::ExitCode;
use crate::output::Formatter;

/// Upload a local file as one object
#[derive(Args, Debug)]
pub struct PutArgs {
    /// Local file to upload
    pub source: PathBuf,

    /// Destination (bucket[/key])
    pub destination: String,
}

#[derive(Debug, Serialize)]
struct PutOutput {
    source: String,
    destination: String,
    size_bytes: usize,
    size_human: String,
}

/// Execute the put command
pub async fn execute(args: PutArgs, global: &GlobalArgs, formatter: &Formatter) -> ExitCode {
    let source = args.source.to_string_lossy().to_string();
    let destination = match upload_destination(&args.destination, &source) {
        Ok(d) => d.to_string(),
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::UsageError;
        }
    };

    let data = match tokio::fs::read(&args.source).await {
        Ok(d) => d,
        Err(e) => {
            formatter.error(&format!("Failed to read '{}': {e}", args.source.display()));
            return ExitCode::GeneralError;
        }
    };

    let session = match connect_session(global, formatter).await {
        Ok(s) => s,
        Err(code) => return code,
    };

    let size = data.len();

    if let Err(e) = session.upload(&args.destination, &source, data).await {
        formatter.error(&e.to_string());
        return ExitCode::from_error(&e);
    }

    let output = PutOutput {
        source,
        destination,
        size_bytes: size,
        size_human: humansize::format_size(size, humansize::BINARY),
    };

    if formatter.is_json() {
        formatter.json(&output);
    } else {
        formatter.success(&format!(
            "Uploaded {} to {} ({})",
            formatter.style_name(&output.source),
            formatter.style_name(&output.destination),
            formatter.style_size(&output.size_human)
        ));
    }

    ExitCode::Success
}
