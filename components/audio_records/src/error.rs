use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("failed to connect to record database at {url}")]
    Connect {
        url: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("record database error during {operation}")]
    Database {
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("stored record has a malformed id: {0}")]
    CorruptId(String),
}

impl RecordError {
    pub fn database(operation: &'static str, source: sqlx::Error) -> Self {
        RecordError::Database { operation, source }
    }
}

pub type Result<T> = std::result::Result<T, RecordError>;
