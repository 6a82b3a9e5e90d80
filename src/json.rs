//! # JSON Output
//!
//! Serializes parsed songs as a JSON array, pretty-printed with 2-space indentation:
//!
//! ```text
//! [
//!   {
//!     "id": "song-1",
//!     "title": "CASI ALGO",
//!     "authors": "Sergio Prada, Agustin Fantili",
//!     "duration": "2:22"
//!   }
//! ]
//! ```

use crate::error::SetlistError;
use crate::song::SongRecord;

/// Convert songs to a pretty-printed JSON array.
pub fn to_json(songs: &[SongRecord]) -> Result<String, SetlistError> {
    Ok(serde_json::to_string_pretty(songs)?)
}

/// Read songs back from JSON produced by [`to_json`].
pub fn from_json(json: &str) -> Result<Vec<SongRecord>, SetlistError> {
    Ok(serde_json::from_str(json)?)
}
