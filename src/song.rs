//! # Song Records
//!
//! The output type of the parser. Field order matches the JSON key order:
//! `id`, `title`, `authors`, `duration`.

use serde::{Deserialize, Serialize};

/// One song (or medley, speech, intro) from a setlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongRecord {
    /// Opaque identifier handed out by an [`IdSource`](crate::IdSource).
    pub id: String,
    pub title: String,
    /// Author credits and, for medleys, the sub-song lines. May be empty.
    pub authors: String,
    /// Free text such as `"3:05"`; never validated by the parser.
    pub duration: String,
}

impl SongRecord {
    /// Duration in seconds, if the duration text can be read as a time.
    pub fn duration_seconds(&self) -> Option<u32> {
        crate::time::parse_seconds(&self.duration)
    }
}
