//! # Parser Configuration
//!
//! Marker prefixes and the inter-song gap, read from YAML:
//!
//! ```yaml
//! duration-marker: "Tiempo:"
//! authors-marker: "Autores:"
//! gap-seconds: 10
//! ```
//!
//! Every key is optional. The defaults match the Spanish setlists the tool was written for.

use crate::error::SetlistError;
use crate::time::DEFAULT_GAP_SECONDS;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_DURATION_MARKER: &str = "Tiempo:";
pub const DEFAULT_AUTHORS_MARKER: &str = "Autores:";

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ParserConfig {
    /// Prefix of the line carrying a song's duration. Matched case-insensitively.
    pub duration_marker: String,
    /// Prefix of a line carrying author credits. Matched case-insensitively.
    pub authors_marker: String,
    /// Pause added between consecutive songs when totaling a show.
    pub gap_seconds: u32,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            duration_marker: DEFAULT_DURATION_MARKER.to_string(),
            authors_marker: DEFAULT_AUTHORS_MARKER.to_string(),
            gap_seconds: DEFAULT_GAP_SECONDS,
        }
    }
}

impl ParserConfig {
    /// Parse and validate a YAML configuration document.
    pub fn from_yaml(content: &str) -> Result<Self, SetlistError> {
        // serde_yaml reads an empty document as null, not as an empty mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: ParserConfig = serde_yaml::from_str(content)
            .map_err(|e| SetlistError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML configuration file.
    pub fn load(path: &Path) -> Result<Self, SetlistError> {
        let content = fs::read_to_string(path).map_err(|source| SetlistError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Check that both markers are usable prefixes.
    ///
    /// A marker must end with its only colon, so the value of a marker line is everything
    /// after the first colon. The two markers must not shadow each other.
    pub fn validate(&self) -> Result<(), SetlistError> {
        validate_marker("duration-marker", &self.duration_marker)?;
        validate_marker("authors-marker", &self.authors_marker)?;

        if self.duration_marker.to_lowercase() == self.authors_marker.to_lowercase() {
            return Err(SetlistError::Config(format!(
                "duration-marker and authors-marker are both '{}'",
                self.duration_marker
            )));
        }
        Ok(())
    }
}

fn validate_marker(key: &str, marker: &str) -> Result<(), SetlistError> {
    if marker.trim().len() <= 1 {
        return Err(SetlistError::Config(format!("{} must not be empty", key)));
    }
    if !marker.ends_with(':') {
        return Err(SetlistError::Config(format!(
            "{} must end with ':' (got '{}')",
            key, marker
        )));
    }
    if marker.matches(':').count() > 1 {
        return Err(SetlistError::Config(format!(
            "{} must contain a single ':' (got '{}')",
            key, marker
        )));
    }
    if marker.starts_with(char::is_whitespace) {
        return Err(SetlistError::Config(format!(
            "{} must not start with whitespace",
            key
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ParserConfig::default();
        assert_eq!(config.duration_marker, "Tiempo:");
        assert_eq!(config.authors_marker, "Autores:");
        assert_eq!(config.gap_seconds, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = ParserConfig::from_yaml("duration-marker: \"Duration:\"\n").unwrap();
        assert_eq!(config.duration_marker, "Duration:");
        assert_eq!(config.authors_marker, "Autores:");
        assert_eq!(config.gap_seconds, 10);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(ParserConfig::from_yaml("").unwrap(), ParserConfig::default());
    }

    #[test]
    fn test_full_yaml() {
        let yaml = "duration-marker: \"Time:\"\nauthors-marker: \"Writers:\"\ngap-seconds: 0\n";
        let config = ParserConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.duration_marker, "Time:");
        assert_eq!(config.authors_marker, "Writers:");
        assert_eq!(config.gap_seconds, 0);
    }

    #[test]
    fn test_rejects_bad_markers() {
        for yaml in [
            "duration-marker: \"Tiempo\"",
            "duration-marker: \":\"",
            "authors-marker: \"By: x:\"",
            "authors-marker: \"TIEMPO:\"",
        ] {
            let result = ParserConfig::from_yaml(yaml);
            assert!(
                matches!(result, Err(SetlistError::Config(_))),
                "expected config error for {yaml}"
            );
        }
    }

    #[test]
    fn test_rejects_unknown_keys_and_bad_yaml() {
        assert!(ParserConfig::from_yaml("tempo: 120").is_err());
        assert!(ParserConfig::from_yaml("gap-seconds: [1, 2").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "gap-seconds: 15").unwrap();

        let config = ParserConfig::load(file.path()).unwrap();
        assert_eq!(config.gap_seconds, 15);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = ParserConfig::load(&dir.path().join("missing.yaml"));
        assert!(matches!(result, Err(SetlistError::Io { .. })));
    }
}
