//! get command - Download one object
//!
//! Writes the object to `--output`, or to a file named after the key in
//! the current directory.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use skbn_core::{ObjectPath, file_name, parse_path};

use super::{GlobalArgs, connect_session};
use crate::exit_code::ExitCode;
use crate::output::Formatter;

/// Download an object to a local file
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Object to download (bucket/key)
    pub path: String,

    /// Local file to write [default: the key's file name]
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct GetOutput {
    path: String,
    file: String,
    size_bytes: usize,
    size_human: String,
}

/// Resolve the object path and the local file it lands in
fn resolve_target(args: &GetArgs) -> skbn_core::Result<(ObjectPath, PathBuf)> {
    let object = parse_path(&args.path)?;
    if object.is_bucket_only() {
        return Err(skbn_core::Error::InvalidPath(format!(
            "'{}' names a bucket, not an object",
            args.path
        )));
    }

    let file = match &args.output {
        Some(file) => file.clone(),
        None => PathBuf::from(file_name(&object.key)?),
    };

    Ok((object, file))
}

/// Execute the get command
pub async fn execute(args: GetArgs, global: &GlobalArgs, formatter: &Formatter) -> ExitCode {
    let (object, file) = match resolve_target(&args) {
        Ok(t) => t,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::UsageError;
        }
    };

    let session = match connect_session(global, formatter).await {
        Ok(s) => s,
        Err(code) => return code,
    };

    let data = match session.download(&args.path).await {
        Ok(d) => d,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::from_error(&e);
        }
    };

    if let Err(e) = tokio::fs::write(&file, &data).await {
        formatter.error(&format!("Failed to write '{}': {e}", file.display()));
        return ExitCode::GeneralError;
    }

    let output = GetOutput {
        path: object.to_string(),
        file: file.display().to_string(),
        size_bytes: data.len(),
        size_human: humansize::format_size(data.len(), humansize::BINARY),
    };

    if formatter.is_json() {
        formatter.json(&output);
    } else {
        formatter.success(&format!(
            "Downloaded {} to {} ({})",
            formatter.style_name(&output.path),
            formatter.style_name(&output.file),
            formatter.style_size(&output.size_human)
        ));
    }

    ExitCode::Success
}
