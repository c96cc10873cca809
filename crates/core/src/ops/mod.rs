//! Transfer operations on a [`Session`](crate::Session)
//!
//! Each operation parses its logical path on its own, so calls share
//! nothing but the session. Path errors are returned as-is; remote
//! failures are retried and then wrapped in the operation's error.

mod download;
mod list;
mod upload;
