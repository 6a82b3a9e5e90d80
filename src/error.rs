//! # Error Types
//!
//! Parsing a setlist never fails: incomplete blocks are dropped, not reported as errors.
//! The errors here come from everything around the parser: reading input and
//! configuration files, validating configuration, and serializing the output.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SetlistError {
    /// Reading or writing a file failed.
    ///
    /// # Example
    /// ```
    /// # use setlist::SetlistError;
    /// let err = SetlistError::Io {
    ///     path: "show.txt".into(),
    ///     source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
    /// };
    /// assert_eq!(err.to_string(), "I/O error on 'show.txt': not found");
    /// ```
    #[error("I/O error on '{shown}': {source}", shown = .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid parser configuration (bad YAML or unusable markers).
    ///
    /// # Example
    /// ```
    /// # use setlist::SetlistError;
    /// let err = SetlistError::Config("duration-marker must end with ':'".to_string());
    /// assert_eq!(err.to_string(), "Invalid configuration: duration-marker must end with ':'");
    /// ```
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The song records could not be serialized.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
