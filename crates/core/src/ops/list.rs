use crate::error::{Error, Result};
use crate::path::parse_path;
use crate::retry::{is_retryable_error, retry_with_backoff};
use crate::session::Session;
use crate::traits::ObjectStore;

impl<S: ObjectStore> Session<S> {
    /// List every key under a logical path, relative to its prefix
    ///
    /// Each entry is the object key with the first occurrence of the
    /// prefix removed. Entries keep the order the store returned them in.
    /// An empty prefix yields an empty list, not an error.
    pub async fn list(&self, path: &str) -> Result<Vec<String>> {
        let parsed = parse_path(path)?;
        let store = self.store();
        let bucket = parsed.bucket.as_str();
        let prefix = parsed.key.as_str();

        tracing::debug!(bucket = bucket, prefix = prefix, "Listing objects");

        let keys = retry_with_backoff(
            self.retry_config(),
            || async move { store.list_objects(bucket, prefix).await },
            is_retryable_error,
        )
        .await
        .map_err(|e| Error::List {
            path: path.to_string(),
            source: Box::new(e),
        })?;

        Ok(keys.iter().map(|key| key.replacen(prefix, "", 1)).collect())
    }
}
