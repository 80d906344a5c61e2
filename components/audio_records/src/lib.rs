//! Audio record storage
//!
//! Metadata for uploaded audio files lives here. The [`RecordStore`] trait is
//! the repository seam; [`SqliteRecordStore`] is the SQLite-backed
//! implementation used by the web application.
//!
//! ```no_run
//! use audio_records::{NewAudioRecord, RecordStore, SqliteRecordStore};
//!
//! # async fn demo() -> audio_records::Result<()> {
//! let store = SqliteRecordStore::connect("sqlite://audio.db").await?;
//! let record = store
//!     .create(NewAudioRecord {
//!         name: "Test".into(),
//!         bpm: "120".into(),
//!         duration: "180".into(),
//!         key: "5f0c.wav".into(),
//!         source: "https://bucket.s3.amazonaws.com/5f0c.wav".into(),
//!         mime_type: "audio/wav".into(),
//!     })
//!     .await?;
//! assert!(store.find_by_id(&record.id).await?.is_some());
//! # Ok(())
//! # }
//! ```

mod error;
mod record;
mod sqlite;
mod store;

pub use error::{RecordError, Result};
pub use record::{AudioRecord, AudioUpdate, NewAudioRecord, RecordId};
pub use sqlite::SqliteRecordStore;
pub use store::RecordStore;
