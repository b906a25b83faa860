//! Error types for rule construction and validator authoring.

use thiserror::Error;

/// A rule or validator was declared with a malformed configuration.
///
/// These are programming/deployment defects: they surface when a rule or
/// validator is built, never while a value is being checked.
#[derive(Debug, Error)]
pub enum RuleConfigError {
    /// A format rule was given neither `with` nor `without`.
    #[error("either `with` or `without` must be specified")]
    MissingPattern,

    /// A format rule was given both `with` and `without`.
    #[error("`with` and `without` are mutually exclusive")]
    ConflictingPatterns,

    /// A pattern parameter was not a string.
    #[error("a regular expression must be supplied for `{0}`")]
    NotAPattern(String),

    /// A pattern parameter did not compile.
    #[error("invalid regular expression for `{param}`: {source}")]
    InvalidPattern {
        param: String,
        #[source]
        source: regex::Error,
    },

    /// The rule kind takes no parameter of this name.
    #[error("rule `{rule}` does not accept parameter `{param}`")]
    UnexpectedParameter { rule: String, param: String },

    /// A parameter was present but unusable.
    #[error("rule `{rule}` has an invalid `{param}` parameter: {reason}")]
    InvalidParameter {
        rule: String,
        param: String,
        reason: String,
    },

    /// No constructor is registered under this name.
    #[error("unknown rule `{0}`")]
    UnknownRule(String),

    /// Two rules on one property would report the same error key.
    #[error("property `{property}` already has a rule reporting `{key}`")]
    DuplicateRule { property: String, key: String },

    /// A declarative validator spec could not be parsed.
    #[error("invalid validator spec: {0}")]
    Spec(#[from] toml::de::Error),
}

/// Result type for rule construction.
pub type RuleResult<T> = Result<T, RuleConfigError>;
