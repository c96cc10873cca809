//! Transport traits
//!
//! The core talks to storage only through [`ObjectStore`], so it never
//! depends on a particular SDK. Any backend offering list-buckets,
//! list-objects-by-prefix, get-object and put-object can sit behind it.

use std::collections::VecDeque;
use std::fmt;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;

/// A readable object body, consumed chunk by chunk
#[async_trait]
pub trait ObjectBody: Send {
    /// Next chunk of the body, or `None` once it is exhausted
    async fn next_chunk(&mut self) -> Result<Option<Bytes>>;
}

/// Response of a get-object call
pub struct GetObjectOutput {
    /// Length the service declared for the body, if any
    pub content_length: Option<u64>,

    pub body: Box<dyn ObjectBody>,
}

impl GetObjectOutput {
    pub fn new(content_length: Option<u64>, body: impl ObjectBody + 'static) -> Self {
        Self {
            content_length,
            body: Box::new(body),
        }
    }
}

impl fmt::Debug for GetObjectOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GetObjectOutput")
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}

/// In-memory body yielding pre-split chunks
#[derive(Debug, Clone, Default)]
pub struct MemoryBody {
    chunks: VecDeque<Bytes>,
}

impl MemoryBody {
    pub fn new(chunks: impl IntoIterator<Item = Bytes>) -> Self {
        Self {
            chunks: chunks.into_iter().collect(),
        }
    }
}

#[async_trait]
impl ObjectBody for MemoryBody {
    async fn next_chunk(&mut self) -> Result<Option<Bytes>> {
        Ok(self.chunks.pop_front())
    }
}

/// Minimal object-store surface used by the transfer operations
///
/// Implementations must be safe to share between concurrent callers; a
/// single store backs every operation issued through a session.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List bucket names; also used as a connectivity probe
    async fn list_buckets(&self) -> Result<Vec<String>>;

    /// List every key under `prefix`, in the service's enumeration order
    async fn list_objects(&self, bucket: &str, prefix: &str) -> Result<Vec<String>>;

    /// Fetch an object's declared length and body
    async fn get_object(&self, bucket: &str, key: &str) -> Result<GetObjectOutput>;

    /// Write `data` as the full body of `key`
    async fn put_object(&self, bucket: &str, key: &str, data: Bytes) -> Result<()>;
}

/// Builds store handles bound to one region
#[async_trait]
pub trait SessionFactory: Send + Sync {
    type Store: ObjectStore;

    /// Region every store from this factory is bound to
    fn region(&self) -> &str;

    /// Construct a new, unprobed store
    async fn build(&self) -> Result<Self::Store>;
}
