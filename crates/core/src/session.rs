//! Session handle and connection establishment

use crate::config::RetryConfig;
use crate::error::{Error, Result};
use crate::retry::{is_retryable_error, retry_with_backoff};
use crate::traits::{ObjectStore, SessionFactory};

/// A probed, reusable handle to an object store
///
/// Immutable once created. The list, download and upload operations only
/// borrow it, so one session can serve any number of calls, including
/// concurrent ones when the store allows it.
#[derive(Debug, Clone)]
pub struct Session<S> {
    store: S,
    region: String,
    retry: RetryConfig,
}

impl<S: ObjectStore> Session<S> {
    /// Wrap an already usable store without probing it
    pub fn new(store: S, region: impl Into<String>, retry: RetryConfig) -> Self {
        Self {
            store,
            region: region.into(),
            retry,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }
}

/// Build a store and verify it answers a bucket listing
///
/// Each attempt constructs a fresh store and probes it; a failure at
/// either step consumes the attempt and is followed by the backoff. The
/// first store that passes the probe is returned.
///
/// # Errors
/// Returns [`Error::Connection`] carrying the last failure once all
/// attempts are used.
pub async fn connect<F: SessionFactory>(
    factory: &F,
    retry: &RetryConfig,
) -> Result<Session<F::Store>> {
    let region = factory.region();

    let store = retry_with_backoff(
        retry,
        || async move {
            let store = factory.build().await?;
            store.list_buckets().await?;
            Ok(store)
        },
        is_retryable_error,
    )
    .await
    .map_err(|e| Error::Connection {
        region: region.to_string(),
        source: Box::new(e),
    })?;

    tracing::info!(region = region, "Connected to object storage");

    Ok(Session::new(store, region, *retry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::MockObjectStore;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::time::Instant;

    /// Outcome of one scripted factory attempt
    #[derive(Clone, Copy)]
    enum Attempt {
        BuildFails,
        ProbeFails,
        Ok,
    }

    struct ScriptedFactory {
        script: Mutex<Vec<Attempt>>,
        builds: AtomicU32,
        probes: std::sync::Arc<AtomicU32>,
    }

    impl ScriptedFactory {
        fn new(script: &[Attempt]) -> Self {
            let mut script = script.to_vec();
            script.reverse();
            Self {
                script: Mutex::new(script),
                builds: AtomicU32::new(0),
                probes: std::sync::Arc::new(AtomicU32::new(0)),
            }
        }
    }

    #[async_trait]
    impl SessionFactory for ScriptedFactory {
        type Store = MockObjectStore;

        fn region(&self) -> &str {
            "eu-central-1"
        }

        async fn build(&self) -> Result<MockObjectStore> {
            self.builds.fetch_add(1, Ordering::SeqCst);
            let next = self
                .script
                .lock()
                .unwrap()
                .pop()
                .expect("factory called more often than scripted");

            let probes = self.probes.clone();
            let mut store = MockObjectStore::new();
            match next {
                Attempt::BuildFails => {
                    return Err(Error::Network("credentials unavailable".to_string()));
                }
                Attempt::ProbeFails => {
                    store.expect_list_buckets().times(1).returning(move || {
                        probes.fetch_add(1, Ordering::SeqCst);
                        Err(Error::Network("503 Service Unavailable".to_string()))
                    });
                }
                Attempt::Ok => {
                    store.expect_list_buckets().times(1).returning(move || {
                        probes.fetch_add(1, Ordering::SeqCst);
                        Ok(vec!["bucket".to_string()])
                    });
                }
            }
            Ok(store)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_connect_first_attempt() {
        let factory = ScriptedFactory::new(&[Attempt::Ok]);
        let start = Instant::now();

        let session = connect(&factory, &RetryConfig::default()).await.unwrap();

        assert_eq!(session.region(), "eu-central-1");
        assert_eq!(factory.builds.load(Ordering::SeqCst), 1);
        assert_eq!(factory.probes.load(Ordering::SeqCst), 1);
        assert_eq!(start.elapsed().as_secs(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_connect_stops_after_first_success() {
        let factory = ScriptedFactory::new(&[Attempt::ProbeFails, Attempt::Ok, Attempt::Ok]);
        let start = Instant::now();

        connect(&factory, &RetryConfig::default()).await.unwrap();

        assert_eq!(factory.builds.load(Ordering::SeqCst), 2);
        assert_eq!(factory.probes.load(Ordering::SeqCst), 2);
        assert_eq!(start.elapsed().as_secs(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_connect_build_failures_consume_attempts() {
        let factory =
            ScriptedFactory::new(&[Attempt::BuildFails, Attempt::BuildFails, Attempt::Ok]);
        let start = Instant::now();

        connect(&factory, &RetryConfig::default()).await.unwrap();

        assert_eq!(factory.builds.load(Ordering::SeqCst), 3);
        assert_eq!(factory.probes.load(Ordering::SeqCst), 1);
        assert_eq!(start.elapsed().as_secs(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_connect_exhausted() {
        let factory = ScriptedFactory::new(&[
            Attempt::ProbeFails,
            Attempt::BuildFails,
            Attempt::ProbeFails,
        ]);
        let start = Instant::now();

        let Err(err) = connect(&factory, &RetryConfig::default()).await else {
            panic!("connect should fail after three attempts");
        };

        match &err {
            Error::Connection { region, source } => {
                assert_eq!(region, "eu-central-1");
                assert!(source.to_string().contains("503"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(factory.builds.load(Ordering::SeqCst), 3);
        assert_eq!(factory.probes.load(Ordering::SeqCst), 2);
        assert_eq!(start.elapsed().as_secs(), 2);
    }
}
