//! Process exit codes

use skbn_core::Error;

/// Exit codes reported by every command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    /// Bad arguments, paths or configuration
    UsageError = 2,
    /// The object store could not be reached or kept failing
    NetworkError = 3,
}

impl ExitCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Map a core error to the exit code a script should see
    pub fn from_error(error: &Error) -> Self {
        match error.root_cause() {
            Error::InvalidPath(_) | Error::Config(_) => ExitCode::UsageError,
            Error::Network(_) | Error::ContentLengthMismatch { .. } => ExitCode::NetworkError,
            _ => ExitCode::GeneralError,
        }
    }
}
