use crate::error::Result;
use crate::key::StorageKey;
use async_trait::async_trait;
use bytes::Bytes;

/// Where an uploaded blob ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    pub key: StorageKey,
    /// Publicly reachable URL of the blob
    pub location: String,
}

/// Minimal object storage interface: put bytes under a key, delete by key
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn put(&self, key: StorageKey, bytes: Bytes) -> Result<StoredBlob>;

    /// Deleting a key that does not exist is not an error
    async fn delete(&self, key: &str) -> Result<()>;
}
