//! ls command - List objects under a prefix
//!
//! Entries are printed relative to the queried prefix, in the order the
//! service returned them.

use clap::Args;
use serde::Serialize;
use skbn_core::parse_path;

use super::{GlobalArgs, connect_session};
use crate::exit_code::ExitCode;
use crate::output::Formatter;

/// List objects recursively
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Path to list (bucket[/prefix])
    pub path: String,
}

#[derive(Debug, Serialize)]
struct LsOutput {
    path: String,
    entries: Vec<String>,
    count: usize,
}

/// Execute the ls command
pub async fn execute(args: LsArgs, global: &GlobalArgs, formatter: &Formatter) -> ExitCode {
    if let Err(e) = parse_path(&args.path) {
        formatter.error(&e.to_string());
        return ExitCode::UsageError;
    }

    let session = match connect_session(global, formatter).await {
        Ok(s) => s,
        Err(code) => return code,
    };

    match session.list(&args.path).await {
        Ok(entries) => {
            if formatter.is_json() {
                let output = LsOutput {
                    path: args.path,
                    count: entries.len(),
                    entries,
                };
                formatter.json(&output);
            } else {
                for entry in &entries {
                    formatter.println(entry);
                }
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&e.to_string());
            ExitCode::from_error(&e)
        }
    }
}
