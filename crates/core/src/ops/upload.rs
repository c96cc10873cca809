use bytes::Bytes;

use crate::error::{Error, Result};
use crate::path::upload_destination;
use crate::retry::{is_retryable_error, retry_with_backoff};
use crate::session::Session;
use crate::traits::ObjectStore;

impl<S: ObjectStore> Session<S> {
    /// Write an in-memory buffer as one object
    ///
    /// When `to_path` names only a bucket, the key is the file name of
    /// `from_path`: uploading `/tmp/dir/report.csv` to `bucket` writes
    /// `bucket/report.csv`. Otherwise `from_path` is only used in errors.
    pub async fn upload(
        &self,
        to_path: &str,
        from_path: &str,
        data: impl Into<Bytes>,
    ) -> Result<()> {
        let destination = upload_destination(to_path, from_path)?;

        let data: Bytes = data.into();
        let store = self.store();
        let bucket = destination.bucket.as_str();
        let key = destination.key.as_str();

        tracing::debug!(
            bucket = bucket,
            key = key,
            size = data.len(),
            "Uploading object"
        );

        retry_with_backoff(
            self.retry_config(),
            || {
                let data = data.clone();
                async move { store.put_object(bucket, key, data).await }
            },
            is_retryable_error,
        )
        .await
        .map_err(|e| Error::Upload {
            path: destination.to_string(),
            from: from_path.to_string(),
            source: Box::new(e),
        })
    }
}
