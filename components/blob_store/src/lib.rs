//! Blob storage for uploaded audio files
//!
//! - [`BlobStore`]: the narrow put/delete interface the web layer depends on
//! - [`ObjectBlobStore`]: implementation over the `object_store` crate
//!   (S3 in production, local filesystem for development, memory for tests)
//! - [`StorageKey`]: `<uuid>.<extension>` names for new blobs

mod error;
mod key;
mod object;
mod store;

pub use error::{BlobError, Result};
pub use key::StorageKey;
pub use object::{ObjectBlobStore, S3Settings};
pub use store::{BlobStore, StoredBlob};
