//! Error types for hCard generation and parsing.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HCardError {
    /// The input has no markup to look into (empty, whitespace, plain text).
    #[error("not an hcard document: {0}")]
    NotADocument(String),

    /// A field needed to build or read the profile is absent or unusable.
    #[error("invalid hcard data: {0}")]
    InvalidData(String),
}

pub type HCardResult<T> = Result<T, HCardError>;
