use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlobError {
    #[error("failed to configure {backend} blob store")]
    Configure {
        backend: &'static str,
        #[source]
        source: object_store::Error,
    },

    #[error("failed to create blob directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to upload blob {key}")]
    Upload {
        key: String,
        #[source]
        source: object_store::Error,
    },

    #[error("failed to delete blob {key}")]
    Delete {
        key: String,
        #[source]
        source: object_store::Error,
    },

    #[error("failed to read blob {key}")]
    Read {
        key: String,
        #[source]
        source: object_store::Error,
    },
}

pub type Result<T> = std::result::Result<T, BlobError>;
