use crate::error::{RecordError, Result};
use crate::record::{AudioRecord, AudioUpdate, NewAudioRecord, RecordId};
use crate::store::RecordStore;
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{FromRow, SqlitePool};
use std::str::FromStr;
use tracing::{debug, info};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS audios (
    id TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    bpm TEXT NOT NULL,
    duration TEXT NOT NULL,
    storage_key TEXT NOT NULL,
    source TEXT NOT NULL,
    mime_type TEXT NOT NULL
)";

const COLUMNS: &str = "id, name, bpm, duration, storage_key, source, mime_type";

#[derive(Debug, FromRow)]
struct AudioRow {
    id: String,
    name: String,
    bpm: String,
    duration: String,
    storage_key: String,
    source: String,
    mime_type: String,
}

impl TryFrom<AudioRow> for AudioRecord {
    type Error = RecordError;

    fn try_from(row: AudioRow) -> Result<Self> {
        let id = RecordId::from_str(&row.id).map_err(|_| RecordError::CorruptId(row.id.clone()))?;
        Ok(AudioRecord {
            id,
            name: row.name,
            bpm: row.bpm,
            duration: row.duration,
            key: row.storage_key,
            source: row.source,
            mime_type: row.mime_type,
        })
    }
}

/// [`RecordStore`] backed by a SQLite database
#[derive(Debug, Clone)]
pub struct SqliteRecordStore {
    pool: SqlitePool,
}

impl SqliteRecordStore {
    /// Open (creating if missing) the database at `url` and ensure the table exists
    pub async fn connect(url: &str) -> Result<Self> {
        let connect_err = |source| RecordError::Connect {
            url: url.to_string(),
            source,
        };

        let options = SqliteConnectOptions::from_str(url)
            .map_err(connect_err)?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(connect_err)?;

        info!(url, "connected to record database");
        Self::from_pool(pool).await
    }

    /// Private in-memory database, gone when the store is dropped
    pub async fn in_memory() -> Result<Self> {
        let connect_err = |source| RecordError::Connect {
            url: "sqlite::memory:".to_string(),
            source,
        };

        let options = SqliteConnectOptions::from_str("sqlite::memory:").map_err(connect_err)?;

        // Every in-memory connection is its own database, so pin exactly one
        // and never let the pool recycle it.
        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(connect_err)?;

        Self::from_pool(pool).await
    }

    pub async fn from_pool(pool: SqlitePool) -> Result<Self> {
        sqlx::query(CREATE_TABLE)
            .execute(&pool)
            .await
            .map_err(|e| RecordError::database("create table", e))?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn create(&self, record: NewAudioRecord) -> Result<AudioRecord> {
        let record = record.with_id(RecordId::generate());

        sqlx::query(
            "INSERT INTO audios (id, name, bpm, duration, storage_key, source, mime_type)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(record.id.to_string())
        .bind(&record.name)
        .bind(&record.bpm)
        .bind(&record.duration)
        .bind(&record.key)
        .bind(&record.source)
        .bind(&record.mime_type)
        .execute(&self.pool)
        .await
        .map_err(|e| RecordError::database("insert record", e))?;

        debug!(id = %record.id, key = %record.key, "inserted audio record");
        Ok(record)
    }

    async fn find_by_id(&self, id: &RecordId) -> Result<Option<AudioRecord>> {
        let sql = format!("SELECT {COLUMNS} FROM audios WHERE id = ?");
        sqlx::query_as::<_, AudioRow>(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RecordError::database("find record", e))?
            .map(AudioRecord::try_from)
            .transpose()
    }

    async fn find_all(&self) -> Result<Vec<AudioRecord>> {
        let sql = format!("SELECT {COLUMNS} FROM audios ORDER BY rowid");
        sqlx::query_as::<_, AudioRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RecordError::database("list records", e))?
            .into_iter()
            .map(AudioRecord::try_from)
            .collect()
    }

    async fn update_by_id(
        &self,
        id: &RecordId,
        update: AudioUpdate,
    ) -> Result<Option<AudioRecord>> {
        let sql = format!(
            "UPDATE audios SET
                name = COALESCE(?, name),
                bpm = COALESCE(?, bpm),
                duration = COALESCE(?, duration),
                storage_key = COALESCE(?, storage_key),
                source = COALESCE(?, source),
                mime_type = COALESCE(?, mime_type)
             WHERE id = ?
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AudioRow>(&sql)
            .bind(update.name)
            .bind(update.bpm)
            .bind(update.duration)
            .bind(update.key)
            .bind(update.source)
            .bind(update.mime_type)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RecordError::database("update record", e))?
            .map(AudioRecord::try_from)
            .transpose()
    }

    async fn delete_by_id(&self, id: &RecordId) -> Result<Option<AudioRecord>> {
        let sql = format!("DELETE FROM audios WHERE id = ? RETURNING {COLUMNS}");
        sqlx::query_as::<_, AudioRow>(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RecordError::database("delete record", e))?
            .map(AudioRecord::try_from)
            .transpose()
    }
}
