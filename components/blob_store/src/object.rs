use crate::error::{BlobError, Result};
use crate::key::StorageKey;
use crate::store::{BlobStore, StoredBlob};
use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::path::Path as ObjectPath;
use object_store::{ObjectStore, PutPayload};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Credentials and placement of an S3 bucket
#[derive(Debug, Clone)]
pub struct S3Settings {
    pub bucket: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl S3Settings {
    /// Virtual-hosted style base URL of the bucket
    pub fn public_base(&self) -> String {
        format!("https://{}.s3.{}.amazonaws.com", self.bucket, self.region)
    }
}

/// [`BlobStore`] over any `object_store` backend
///
/// Locations handed back from [`BlobStore::put`] are `public_base/key`.
#[derive(Debug, Clone)]
pub struct ObjectBlobStore {
    backend: &'static str,
    inner: Arc<dyn ObjectStore>,
    public_base: String,
}

impl ObjectBlobStore {
    pub fn new(
        backend: &'static str,
        inner: Arc<dyn ObjectStore>,
        public_base: impl Into<String>,
    ) -> Self {
        let mut public_base = public_base.into();
        if public_base.ends_with('/') {
            public_base.pop();
        }
        Self {
            backend,
            inner,
            public_base,
        }
    }

    pub fn s3(settings: &S3Settings) -> Result<Self> {
        let s3 = AmazonS3Builder::new()
            .with_bucket_name(&settings.bucket)
            .with_region(&settings.region)
            .with_access_key_id(&settings.access_key_id)
            .with_secret_access_key(&settings.secret_access_key)
            .build()
            .map_err(|source| BlobError::Configure {
                backend: "s3",
                source,
            })?;

        info!(bucket = %settings.bucket, region = %settings.region, "using S3 blob store");
        Ok(Self::new("s3", Arc::new(s3), settings.public_base()))
    }

    /// Blobs as plain files under `dir`, served by the caller under `public_base`
    pub fn local(dir: impl AsRef<Path>, public_base: impl Into<String>) -> Result<Self> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir).map_err(|source| BlobError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let local = LocalFileSystem::new_with_prefix(dir).map_err(|source| BlobError::Configure {
            backend: "local",
            source,
        })?;

        info!(dir = %dir.display(), "using local filesystem blob store");
        Ok(Self::new("local", Arc::new(local), public_base))
    }

    pub fn in_memory() -> Self {
        Self::new("memory", Arc::new(InMemory::new()), "memory://")
    }

    pub fn backend(&self) -> &'static str {
        self.backend
    }

    pub fn location_of(&self, key: &str) -> String {
        format!("{}/{}", self.public_base, key)
    }

    /// Read a blob back, `None` if nothing is stored under `key`
    pub async fn fetch(&self, key: &str) -> Result<Option<Bytes>> {
        let read_err = |source| BlobError::Read {
            key: key.to_string(),
            source,
        };

        match self.inner.get(&ObjectPath::from(key)).await {
            Ok(result) => result.bytes().await.map(Some).map_err(read_err),
            Err(object_store::Error::NotFound { .. }) => Ok(None),
            Err(source) => Err(read_err(source)),
        }
    }
}

#[async_trait]
impl BlobStore for ObjectBlobStore {
    async fn put(&self, key: StorageKey, bytes: Bytes) -> Result<StoredBlob> {
        let size = bytes.len();
        self.inner
            .put(&ObjectPath::from(key.as_str()), PutPayload::from(bytes))
            .await
            .map_err(|source| BlobError::Upload {
                key: key.to_string(),
                source,
            })?;

        let location = self.location_of(key.as_str());
        debug!(backend = self.backend, %key, size, "stored blob");
        Ok(StoredBlob { key, location })
    }

    async fn delete(&self, key: &str) -> Result<()> {
        match self.inner.delete(&ObjectPath::from(key)).await {
            Ok(()) => {
                debug!(backend = self.backend, key, "deleted blob");
                Ok(())
            }
            Err(object_store::Error::NotFound { .. }) => {
                debug!(backend = self.backend, key, "blob already absent");
                Ok(())
            }
            Err(source) => Err(BlobError::Delete {
                key: key.to_string(),
                source,
            }),
        }
    }
}
