//! # Setlist Parser
//!
//! Turns a plain-text setlist into [`SongRecord`]s.
//!
//! ## Input Shape
//! Songs are separated by blank lines. Inside a block:
//!
//! ```text
//! CASI ALGO
//! Autores: Sergio Prada, Agustin Fantili
//! Tiempo: 2:22
//! ```
//!
//! ## Line Classification
//! Each line is trimmed, then classified in this order:
//! 1. Blank: block boundary. The block is committed if complete, then discarded.
//! 2. Duration marker (`Tiempo:`, any case): the rest of the line replaces the block's
//!    duration. A parenthetical note is cut off (`5:33 (aprox)` becomes `5:33`).
//! 3. Authors marker (`Autores:`, any case): the rest of the line is appended to the authors.
//! 4. Anything else: the first such line is the title, later ones are appended to the
//!    authors. Medley blocks list their sub-songs this way.
//!
//! ## Commit Rule
//! A block becomes a song only when it has a title and a non-empty duration. Blocks
//! missing either are dropped silently; [`ParseOutcome::dropped`] counts them.
//!
//! ## Example
//! ```rust
//! use setlist::{parse_with_ids, SequentialIds};
//!
//! let source = "CASI ALGO \nAutores: Sergio Prada, Agustin Fantili\nTiempo: 2:22\n";
//! let songs = parse_with_ids(source, SequentialIds::new());
//!
//! assert_eq!(songs.len(), 1);
//! assert_eq!(songs[0].id, "song-1");
//! assert_eq!(songs[0].title, "CASI ALGO");
//! assert_eq!(songs[0].authors, "Sergio Prada, Agustin Fantili");
//! assert_eq!(songs[0].duration, "2:22");
//! ```

use crate::config::ParserConfig;
use crate::ids::{IdSource, RandomIds};
use crate::song::SongRecord;
use tracing::debug;

/// What a single trimmed line means to the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    /// Duration value, parenthetical note already removed.
    Duration(&'a str),
    Authors(&'a str),
    Text(&'a str),
}

/// Classify one raw line. Marker checks take priority over plain text.
pub fn classify<'a>(line: &'a str, config: &ParserConfig) -> LineKind<'a> {
    let line = line.trim();

    if line.is_empty() {
        return LineKind::Blank;
    }
    if let Some(value) = strip_marker(line, &config.duration_marker) {
        return LineKind::Duration(clean_duration(value));
    }
    if let Some(value) = strip_marker(line, &config.authors_marker) {
        return LineKind::Authors(value.trim());
    }
    LineKind::Text(line)
}

/// Case-insensitive prefix match. Returns the text after the marker.
fn strip_marker<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let mut chars = line.char_indices();
    for expected in marker.chars() {
        let (_, actual) = chars.next()?;
        if !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
    }
    let rest = chars.next().map_or(line.len(), |(i, _)| i);
    Some(&line[rest..])
}

/// Trim a duration value and cut it at the first `(`.
fn clean_duration(value: &str) -> &str {
    let value = value.trim();
    match value.find('(') {
        Some(paren) => value[..paren].trim_end(),
        None => value,
    }
}

/// Which buffer a plain text line goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Collecting {
    #[default]
    Title,
    Rest,
}

/// State of the block currently being read.
#[derive(Debug, Default)]
struct Accumulator {
    title: Vec<String>,
    authors: Vec<String>,
    duration: Option<String>,
    collecting: Collecting,
    /// Any non-blank line seen since the last boundary.
    touched: bool,
}

impl Accumulator {
    fn push(&mut self, kind: LineKind<'_>) {
        match kind {
            LineKind::Blank => return,
            LineKind::Duration(value) => self.duration = Some(value.to_string()),
            LineKind::Authors(value) => self.authors.push(value.to_string()),
            LineKind::Text(text) => match self.collecting {
                Collecting::Title => {
                    self.title.push(text.to_string());
                    self.collecting = Collecting::Rest;
                }
                Collecting::Rest => self.authors.push(text.to_string()),
            },
        }
        self.touched = true;
    }

    /// Build a record if the block is complete. Always resets the accumulator.
    fn flush(&mut self, ids: &mut impl IdSource) -> Flush {
        let block = std::mem::take(self);

        if !block.touched {
            return Flush::Empty;
        }

        match block.duration {
            Some(duration) if !block.title.is_empty() && !duration.is_empty() => {
                Flush::Song(SongRecord {
                    id: ids.next_id(),
                    title: block.title.join(" "),
                    authors: block.authors.join(" "),
                    duration,
                })
            }
            duration => {
                debug!(
                    title = ?block.title.first(),
                    has_duration = duration.is_some_and(|d| !d.is_empty()),
                    "dropping incomplete block"
                );
                Flush::Dropped
            }
        }
    }
}

enum Flush {
    Empty,
    Song(SongRecord),
    Dropped,
}

/// Songs parsed from a setlist, plus how many non-empty blocks were thrown away.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParseOutcome {
    pub songs: Vec<SongRecord>,
    pub dropped: usize,
}

/// Line-oriented setlist parser with an injected id source.
#[derive(Debug, Clone)]
pub struct SetlistParser<I = RandomIds> {
    config: ParserConfig,
    ids: I,
}

impl SetlistParser<RandomIds> {
    /// Parser with the default markers and random UUID ids.
    pub fn new() -> Self {
        Self::with_ids(ParserConfig::default(), RandomIds)
    }
}

impl Default for SetlistParser<RandomIds> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: IdSource> SetlistParser<I> {
    pub fn with_ids(config: ParserConfig, ids: I) -> Self {
        Self { config, ids }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a whole setlist. Never fails.
    pub fn parse(&mut self, source: &str) -> ParseOutcome {
        let mut outcome = ParseOutcome::default();
        let mut block = Accumulator::default();

        for line in source.lines() {
            match classify(line, &self.config) {
                LineKind::Blank => self.commit(&mut block, &mut outcome),
                kind => block.push(kind),
            }
        }
        self.commit(&mut block, &mut outcome);

        debug!(
            songs = outcome.songs.len(),
            dropped = outcome.dropped,
            "parsed setlist"
        );
        outcome
    }

    fn commit(&mut self, block: &mut Accumulator, outcome: &mut ParseOutcome) {
        match block.flush(&mut self.ids) {
            Flush::Song(song) => outcome.songs.push(song),
            Flush::Dropped => outcome.dropped += 1,
            Flush::Empty => {}
        }
    }
}

/// Parse with the default markers and random UUID ids.
pub fn parse(source: &str) -> Vec<SongRecord> {
    SetlistParser::new().parse(source).songs
}

/// Parse with the default markers and the given id source.
pub fn parse_with_ids<I: IdSource>(source: &str, ids: I) -> Vec<SongRecord> {
    SetlistParser::with_ids(ParserConfig::default(), ids)
        .parse(source)
        .songs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;

    fn parse_seq(source: &str) -> ParseOutcome {
        SetlistParser::with_ids(ParserConfig::default(), SequentialIds::new()).parse(source)
    }

    fn fields(song: &SongRecord) -> (&str, &str, &str) {
        (song.title.as_str(), song.authors.as_str(), song.duration.as_str())
    }

    #[test]
    fn test_classify_priority() {
        let config = ParserConfig::default();
        assert_eq!(classify("   ", &config), LineKind::Blank);
        assert_eq!(classify(" Tiempo: 3:05 ", &config), LineKind::Duration("3:05"));
        assert_eq!(classify("TIEMPO:1:00", &config), LineKind::Duration("1:00"));
        assert_eq!(
            classify("autores:  (Sergio Prada)", &config),
            LineKind::Authors("(Sergio Prada)")
        );
        assert_eq!(classify("CASI ALGO ", &config), LineKind::Text("CASI ALGO"));
        assert_eq!(classify("Tiempos modernos", &config), LineKind::Text("Tiempos modernos"));
    }

    #[test]
    fn test_classify_strips_parenthetical() {
        let config = ParserConfig::default();
        assert_eq!(
            classify("Tiempo: 5:33 (mas el grito)", &config),
            LineKind::Duration("5:33")
        );
        assert_eq!(classify("Tiempo: (calcular)", &config), LineKind::Duration(""));
    }

    #[test]
    fn test_strip_marker_non_ascii() {
        assert_eq!(strip_marker("DURACIÓN: 3:00", "duración:"), Some(" 3:00"));
        assert_eq!(strip_marker("Dura", "duración:"), None);
        assert_eq!(strip_marker("Tiempo:", "Tiempo:"), Some(""));
    }

    #[test]
    fn test_simple_block() {
        let outcome = parse_seq("CASI ALGO \nAutores: Sergio Prada, Agustin Fantili\nTiempo: 2:22\n");
        assert_eq!(outcome.songs.len(), 1);
        assert_eq!(outcome.dropped, 0);
        assert_eq!(outcome.songs[0].id, "song-1");
        assert_eq!(
            fields(&outcome.songs[0]),
            ("CASI ALGO", "Sergio Prada, Agustin Fantili", "2:22")
        );
    }

    #[test]
    fn test_no_authors_gives_empty_string() {
        let outcome = parse_seq("INTRO CORTA\nTiempo: 0:32");
        assert_eq!(fields(&outcome.songs[0]), ("INTRO CORTA", "", "0:32"));
    }

    #[test]
    fn test_multiple_author_lines_join_in_order() {
        let outcome = parse_seq("TE QUIERO\nAutores: Jose Luis\nAutores: Perales\nTiempo: 3:07\n");
        assert_eq!(outcome.songs[0].authors, "Jose Luis Perales");
    }

    #[test]
    fn test_medley_lines_fold_into_authors() {
        let source = "\
MIX CARPERAS
LA TALEÑITA (Jesus Ruben Perez)
DE ALBERDI (Jose Ignacio Rodriguez)
DEL CHUCARO  (Heraclio Catalin Rodriguez)
Tiempo: 6:10
";
        let outcome = parse_seq(source);
        assert_eq!(
            fields(&outcome.songs[0]),
            (
                "MIX CARPERAS",
                "LA TALEÑITA (Jesus Ruben Perez) DE ALBERDI (Jose Ignacio Rodriguez) DEL CHUCARO  (Heraclio Catalin Rodriguez)",
                "6:10"
            )
        );
    }

    #[test]
    fn test_comment_line_after_duration() {
        let source = "MIX CHACARERAS\nTiempo: 5:33 \n(mas el tiempo que le pedimos el grito a carlitos, calcular)\n";
        let outcome = parse_seq(source);
        assert_eq!(outcome.songs[0].duration, "5:33");
        assert_eq!(
            outcome.songs[0].authors,
            "(mas el tiempo que le pedimos el grito a carlitos, calcular)"
        );
    }

    #[test]
    fn test_last_duration_wins() {
        let outcome = parse_seq("FESTIVALERO\nTiempo: 4:40\nTiempo: 3:42\n");
        assert_eq!(outcome.songs[0].duration, "3:42");
    }

    #[test]
    fn test_marker_lines_after_duration_still_count() {
        let outcome = parse_seq("LA ZAMBA\nTiempo: 3:33\nAutores: Sergio Prada, Agustin Fantili\n");
        assert_eq!(
            fields(&outcome.songs[0]),
            ("LA ZAMBA", "Sergio Prada, Agustin Fantili", "3:33")
        );
    }

    #[test]
    fn test_block_without_duration_is_dropped() {
        let outcome = parse_seq("SIN TIEMPO\nAutores: Nadie\n\nTE VI\nTiempo: 3:55\n");
        assert_eq!(outcome.songs.len(), 1);
        assert_eq!(outcome.songs[0].title, "TE VI");
        assert_eq!(outcome.dropped, 1);
    }

    #[test]
    fn test_incomplete_block_does_not_leak_into_next() {
        let outcome = parse_seq("HUERFANO\n\nTiempo: 1:00\n");
        assert!(outcome.songs.is_empty());
        assert_eq!(outcome.dropped, 2);
    }

    #[test]
    fn test_block_without_title_is_dropped() {
        let outcome = parse_seq("Autores: Alguien\nTiempo: 2:00\n");
        assert!(outcome.songs.is_empty());
        assert_eq!(outcome.dropped, 1);
    }

    #[test]
    fn test_empty_duration_is_dropped() {
        let outcome = parse_seq("DISCURSOS\nTiempo: (calcular)\n");
        assert!(outcome.songs.is_empty());
        assert_eq!(outcome.dropped, 1);
    }

    #[test]
    fn test_blank_runs_are_not_blocks() {
        let outcome = parse_seq("\n\n  \nSALUDO\nTiempo: 1:00\n\n\n\nDESPEDIDA\r\nTiempo: 1:45\r\n\n");
        assert_eq!(outcome.songs.len(), 2);
        assert_eq!(outcome.dropped, 0);
        assert_eq!(outcome.songs[1].id, "song-2");
        assert_eq!(fields(&outcome.songs[1]), ("DESPEDIDA", "", "1:45"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_seq(""), ParseOutcome::default());
    }

    #[test]
    fn test_custom_markers() {
        let config = ParserConfig {
            duration_marker: "Time:".to_string(),
            authors_marker: "By:".to_string(),
            ..ParserConfig::default()
        };
        let mut parser = SetlistParser::with_ids(config, SequentialIds::new());
        let outcome = parser.parse("YESTERDAY\nby: Lennon, McCartney\ntime: 2:05\nTiempo: 9:99\n");
        assert_eq!(
            fields(&outcome.songs[0]),
            ("YESTERDAY", "Lennon, McCartney Tiempo: 9:99", "2:05")
        );
    }

    #[test]
    fn test_parser_is_reusable() {
        let mut parser = SetlistParser::with_ids(ParserConfig::default(), SequentialIds::new());
        let first = parser.parse("A\nTiempo: 1:00");
        let second = parser.parse("A\nTiempo: 1:00");
        assert_eq!(fields(&first.songs[0]), fields(&second.songs[0]));
        assert_eq!(second.songs[0].id, "song-2");
    }
}
