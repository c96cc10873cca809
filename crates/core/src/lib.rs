//! skbn-core: Core library for the skbn object-storage client
//!
//! This crate provides the core functionality for skbn, including:
//! - Logical path interpretation (`bucket/key/...`)
//! - Configuration loading
//! - A single retry helper shared by every remote operation
//! - The ObjectStore trait the transfer operations run against
//! - Session establishment and the list, download and upload operations
//!
//! This crate is designed to be independent of any specific S3 SDK,
//! allowing for easy testing and potential future support for other backends.

pub mod config;
pub mod error;
mod ops;
pub mod path;
pub mod retry;
pub mod session;
pub mod traits;

pub use config::{Config, ConfigManager, DEFAULT_REGION, RetryConfig};
pub use error::{Error, Result};
pub use path::{ObjectPath, file_name, parse_path, upload_destination};
pub use retry::{RetryBuilder, is_retryable_error, retry_with_backoff};
pub use session::{Session, connect};
pub use traits::{GetObjectOutput, MemoryBody, ObjectBody, ObjectStore, SessionFactory};
