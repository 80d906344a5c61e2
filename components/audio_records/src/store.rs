use crate::error::Result;
use crate::record::{AudioRecord, AudioUpdate, NewAudioRecord, RecordId};
use async_trait::async_trait;

/// Repository over [`AudioRecord`]s
///
/// Lookups that miss return `Ok(None)`; `Err` is reserved for the backing
/// database failing.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persist a new record and return it with its assigned id
    async fn create(&self, record: NewAudioRecord) -> Result<AudioRecord>;

    async fn find_by_id(&self, id: &RecordId) -> Result<Option<AudioRecord>>;

    /// All records in insertion order
    async fn find_all(&self) -> Result<Vec<AudioRecord>>;

    /// Overwrite the fields present in `update`, returning the updated record
    async fn update_by_id(&self, id: &RecordId, update: AudioUpdate)
        -> Result<Option<AudioRecord>>;

    /// Remove a record, returning what was removed
    async fn delete_by_id(&self, id: &RecordId) -> Result<Option<AudioRecord>>;
}
