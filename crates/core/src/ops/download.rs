use crate::error::{Error, Result};
use crate::path::parse_path;
use crate::retry::{is_retryable_error, retry_with_backoff};
use crate::session::Session;
use crate::traits::{GetObjectOutput, ObjectStore};

impl<S: ObjectStore> Session<S> {
    /// Download the full content of one object into memory
    ///
    /// The returned buffer always has the length the store declared for
    /// the object. A body that ends early or runs long fails the attempt
    /// with [`Error::ContentLengthMismatch`] and is retried like any other
    /// transport failure.
    ///
    /// # Errors
    /// A bucket-only path is rejected with [`Error::InvalidPath`], since it
    /// names no object.
    pub async fn download(&self, path: &str) -> Result<Vec<u8>> {
        let parsed = parse_path(path)?;
        if parsed.is_bucket_only() {
            return Err(Error::InvalidPath(format!(
                "'{path}' names a bucket, not an object"
            )));
        }

        let store = self.store();
        let bucket = parsed.bucket.as_str();
        let key = parsed.key.as_str();

        tracing::debug!(bucket = bucket, key = key, "Downloading object");

        retry_with_backoff(
            self.retry_config(),
            || async move {
                let output = store.get_object(bucket, key).await?;
                read_body(output).await
            },
            is_retryable_error,
        )
        .await
        .map_err(|e| Error::Download {
            path: path.to_string(),
            source: Box::new(e),
        })
    }
}

/// Upper bound on the buffer reserved from a declared length before any
/// bytes arrive
const MAX_INITIAL_RESERVE: u64 = 8 * 1024 * 1024;

/// Drain a body, holding it to its declared length
async fn read_body(output: GetObjectOutput) -> Result<Vec<u8>> {
    let GetObjectOutput {
        content_length,
        mut body,
    } = output;

    let Some(expected) = content_length else {
        tracing::debug!("No content length declared, reading body to the end");
        let mut buffer = Vec::new();
        while let Some(chunk) = body.next_chunk().await? {
            buffer.extend_from_slice(&chunk);
        }
        return Ok(buffer);
    };

    let reserve = usize::try_from(expected.min(MAX_INITIAL_RESERVE)).unwrap_or_default();
    let mut buffer = Vec::with_capacity(reserve);
    while let Some(chunk) = body.next_chunk().await? {
        let received = (buffer.len() + chunk.len()) as u64;
        if received > expected {
            return Err(Error::ContentLengthMismatch { expected, received });
        }
        buffer.extend_from_slice(&chunk);
    }

    let received = buffer.len() as u64;
    if received != expected {
        return Err(Error::ContentLengthMismatch { expected, received });
    }

    Ok(buffer)
}
