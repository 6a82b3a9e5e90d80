//! # Duration Arithmetic
//!
//! The parser keeps durations as free text. This module reads that text as a time when
//! a caller needs numbers, e.g. to add up the running time of a whole show.
//!
//! ## Accepted Forms
//! - `mm:ss` (`"03:30"`) and `hh:mm:ss` (`"01:05:20"`)
//! - Bare digits, where the last two digits are seconds: `"305"` is 3:05, `"112"` is 1:12
//!
//! Anything other than digits and `:` is ignored before reading, so `"3:05 min"` works.
//!
//! ## Show Totals
//! [`total_running_time`] adds a fixed gap between consecutive songs (10 seconds by
//! default, see [`ParserConfig`](crate::ParserConfig)).

use crate::song::SongRecord;

/// Pause between consecutive songs when totaling a show.
pub const DEFAULT_GAP_SECONDS: u32 = 10;

/// Read a duration string as seconds.
///
/// Returns `None` when nothing numeric is left after cleaning or a component is too large.
/// A colon form with other than two or three components reads as zero.
///
/// # Example
/// ```rust
/// use setlist::time::parse_seconds;
///
/// assert_eq!(parse_seconds("3:05"), Some(185));
/// assert_eq!(parse_seconds("01:05:20"), Some(3920));
/// assert_eq!(parse_seconds("305"), Some(185));
/// assert_eq!(parse_seconds("n/a"), None);
/// ```
pub fn parse_seconds(input: &str) -> Option<u32> {
    let clean: String = input
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ':')
        .collect();

    if clean.is_empty() {
        return None;
    }

    if clean.contains(':') {
        let parts = clean
            .split(':')
            .map(|part| if part.is_empty() { Some(0) } else { part.parse::<u32>().ok() })
            .collect::<Option<Vec<u32>>>()?;

        return match parts.as_slice() {
            [hours, minutes, seconds] => hours
                .checked_mul(3600)?
                .checked_add(minutes.checked_mul(60)?)?
                .checked_add(*seconds),
            [minutes, seconds] => minutes.checked_mul(60)?.checked_add(*seconds),
            _ => Some(0),
        };
    }

    let number: u32 = clean.parse().ok()?;
    (number / 100).checked_mul(60)?.checked_add(number % 100)
}

/// Format seconds as `mm:ss`, or `hh:mm:ss` from one hour up.
pub fn format_seconds(total: u32) -> String {
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

/// Rewrite loosely typed input (`"305"`, `"3:5"`) into canonical form (`"03:05"`).
/// Unreadable input becomes `"00:00"`.
pub fn normalize_duration(input: &str) -> String {
    format_seconds(parse_seconds(input).unwrap_or(0))
}

/// Total running time of a show: every song's duration plus `gap_seconds` between each
/// pair of consecutive songs. Unreadable durations count as zero.
///
/// # Example
/// ```rust
/// use setlist::{parse_with_ids, SequentialIds};
/// use setlist::time::total_running_time;
///
/// let songs = parse_with_ids("A\nTiempo: 1:00\n\nB\nTiempo: 2:00\n", SequentialIds::new());
/// assert_eq!(total_running_time(&songs, 10), "03:10");
/// ```
pub fn total_running_time(songs: &[SongRecord], gap_seconds: u32) -> String {
    if songs.is_empty() {
        return format_seconds(0);
    }

    let music: u32 = songs
        .iter()
        .map(|song| song.duration_seconds().unwrap_or(0))
        .fold(0, u32::saturating_add);
    let gaps = gap_seconds.saturating_mul((songs.len() - 1) as u32);

    format_seconds(music.saturating_add(gaps))
}
