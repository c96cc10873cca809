//! Output formatting
//!
//! Human-readable output goes to stdout with optional colors; `--json`
//! switches every command to machine-readable JSON.

mod formatter;

pub use formatter::Formatter;

/// Output settings taken from the global flags
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit JSON instead of human-readable text
    pub json: bool,

    /// Disable colored output
    pub no_color: bool,

    /// Suppress everything except errors
    pub quiet: bool,
}
