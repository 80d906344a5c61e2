use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque identifier assigned by the store when a record is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.as_hyphenated())
    }
}

impl FromStr for RecordId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Metadata for one uploaded audio file
///
/// `bpm` and `duration` are free text: whatever the form sent is kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioRecord {
    pub id: RecordId,
    pub name: String,
    pub bpm: String,
    pub duration: String,
    /// Storage key of the blob, needed to delete it later
    pub key: String,
    /// Location URL returned by the blob store
    pub source: String,
    #[serde(rename = "type")]
    pub mime_type: String,
}

/// Everything needed to create a record; the id comes from the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAudioRecord {
    pub name: String,
    pub bpm: String,
    pub duration: String,
    pub key: String,
    pub source: String,
    #[serde(rename = "type")]
    pub mime_type: String,
}

impl NewAudioRecord {
    pub(crate) fn with_id(self, id: RecordId) -> AudioRecord {
        AudioRecord {
            id,
            name: self.name,
            bpm: self.bpm,
            duration: self.duration,
            key: self.key,
            source: self.source,
            mime_type: self.mime_type,
        }
    }
}

/// Field overwrite for an existing record
///
/// Every field that is `Some` replaces the stored value; `None` keeps it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bpm: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default, rename = "type")]
    pub mime_type: Option<String>,
}

impl AudioUpdate {
    /// True when the update would leave every field as it is
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.bpm.is_none()
            && self.duration.is_none()
            && self.key.is_none()
            && self.source.is_none()
            && self.mime_type.is_none()
    }

    /// Apply this update to a record in place
    pub fn apply_to(self, record: &mut AudioRecord) {
        if let Some(name) = self.name {
            record.name = name;
        }
        if let Some(bpm) = self.bpm {
            record.bpm = bpm;
        }
        if let Some(duration) = self.duration {
            record.duration = duration;
        }
        if let Some(key) = self.key {
            record.key = key;
        }
        if let Some(source) = self.source {
            record.source = source;
        }
        if let Some(mime_type) = self.mime_type {
            record.mime_type = mime_type;
        }
    }
}
