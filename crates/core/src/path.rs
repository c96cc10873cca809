//! Logical path interpretation
//!
//! A logical path has the form `bucket[/key-segment]*`. The first segment
//! names the bucket, the rest form the object key (or listing prefix).
//! There is no escaping, so a bucket name can never contain `/`.

use std::fmt;

use crate::error::{Error, Result};

/// A logical path split into bucket and key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectPath {
    /// Bucket name (first segment, never empty)
    pub bucket: String,

    /// Cleaned object key or prefix; empty for a bucket-only path
    pub key: String,

    /// Raw segments following the bucket, before cleaning
    pub segments: Vec<String>,
}

impl ObjectPath {
    /// True when the path names only a bucket
    pub fn is_bucket_only(&self) -> bool {
        self.key.is_empty()
    }

    /// The same bucket addressed at a different key
    pub fn with_key(&self, key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            bucket: self.bucket.clone(),
            segments: key.split('/').map(str::to_string).collect(),
            key,
        }
    }
}

impl fmt::Display for ObjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.key.is_empty() {
            write!(f, "{}", self.bucket)
        } else {
            write!(f, "{}/{}", self.bucket, self.key)
        }
    }
}

/// Parse a logical path into bucket and key
///
/// The key is the remaining segments joined with `/` and cleaned: empty
/// and `.` segments are dropped and `..` removes the segment before it.
///
/// # Errors
/// Returns [`Error::InvalidPath`] when the path has no bucket segment.
pub fn parse_path(path: &str) -> Result<ObjectPath> {
    let mut parts = path.split('/');

    let bucket = match parts.next() {
        Some(b) if !b.is_empty() => b.to_string(),
        _ => return Err(Error::InvalidPath(format!("missing bucket in '{path}'"))),
    };

    let segments: Vec<String> = parts.map(str::to_string).collect();
    let key = join_key(&segments);

    Ok(ObjectPath {
        bucket,
        key,
        segments,
    })
}

/// Extract the file name component of a source path
///
/// Everything after the last `/` is the name, so `"/tmp/dir/report.csv"`
/// yields `"report.csv"`.
pub fn file_name(path: &str) -> Result<&str> {
    let name = path.rsplit('/').next().unwrap_or(path);
    if name.is_empty() {
        return Err(Error::InvalidPath(format!(
            "cannot derive a file name from '{path}'"
        )));
    }
    Ok(name)
}

/// Resolve where an upload of `from_path` to `to_path` lands
///
/// A bucket-only destination takes the source's file name as its key.
pub fn upload_destination(to_path: &str, from_path: &str) -> Result<ObjectPath> {
    let destination = parse_path(to_path)?;
    if destination.is_bucket_only() {
        return Ok(destination.with_key(file_name(from_path)?));
    }
    Ok(destination)
}

fn join_key(segments: &[String]) -> String {
    let mut cleaned: Vec<&str> = Vec::with_capacity(segments.len());

    for segment in segments {
        match segment.as_str() {
            "" | "." => {}
            ".." => match cleaned.last() {
                Some(&last) if last != ".." => {
                    cleaned.pop();
                }
                _ => cleaned.push(".."),
            },
            s => cleaned.push(s),
        }
    }

    cleaned.join("/")
}
