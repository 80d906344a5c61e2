use std::fmt;
use uuid::Uuid;

/// Globally unique name of a blob: `<uuid-v4>.<extension>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey(String);

impl StorageKey {
    /// Generate a fresh key carrying the extension of `original_filename`
    ///
    /// Any directory part of the name is ignored. The extension is whatever
    /// follows the last `.`; a name without any dot is used whole.
    ///
    /// # Examples
    /// ```
    /// # use blob_store::StorageKey;
    /// let key = StorageKey::for_filename("track.wav");
    /// assert_eq!(key.extension(), "wav");
    /// ```
    pub fn for_filename(original_filename: &str) -> Self {
        let basename = original_filename
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(original_filename);
        let extension = basename.rsplit_once('.').map_or(basename, |(_, ext)| ext);
        Self(format!("{}.{}", Uuid::new_v4(), extension))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn extension(&self) -> &str {
        self.0.split_once('.').map_or("", |(_, ext)| ext)
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
