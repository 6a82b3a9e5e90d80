pub mod config;
pub mod error;
pub mod ids;
pub mod json;
pub mod parser;
pub mod song;
pub mod time;

pub use config::ParserConfig;
pub use error::*;
pub use ids::{IdSource, RandomIds, SequentialIds};
pub use json::{from_json, to_json};
pub use parser::{parse, parse_with_ids, ParseOutcome, SetlistParser};
pub use song::SongRecord;

/// Convert a plain-text setlist to a JSON array of songs.
/// This is the main entry point for the library.
pub fn convert(source: &str) -> Result<String, SetlistError> {
    to_json(&parse(source))
}

/// Convert with a custom configuration and id source
pub fn convert_with<I: IdSource>(
    source: &str,
    config: ParserConfig,
    ids: I,
) -> Result<String, SetlistError> {
    let outcome = SetlistParser::with_ids(config, ids).parse(source);
    to_json(&outcome.songs)
}
