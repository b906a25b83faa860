//! Built-in single-property rules.
//!
//! Every rule is an immutable predicate over the string form of a property
//! value plus the error key it reports on failure. Configuration is checked
//! by the constructors; [`Rule::valid_value`] never fails.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{RuleConfigError, RuleResult};

static GUID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[0-9a-z\-_@.:]{16,255}$").expect("guid pattern"));

static DIASPORA_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z0-9\-_.]+@(?:[a-z0-9\-]+\.)*[a-z0-9\-]+(?::[0-9]+)?$")
        .expect("diaspora id pattern")
});

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)#[\w-]+").expect("tag pattern"));

/// Longest handle accepted by [`Rule::DiasporaId`].
pub const MAX_DIASPORA_ID_LENGTH: usize = 255;

/// A single-property validation rule.
#[derive(Debug, Clone)]
pub enum Rule {
    /// Value must contain something other than whitespace.
    NotEmpty,
    /// Value length (in characters) must lie within bounds.
    Length(Length),
    /// Value must (or must not) match a regular expression.
    Format(Format),
    /// Value must be an integer or decimal number.
    Numeric,
    /// Value must be one of a fixed set.
    Inclusion(Inclusion),
    /// Value must be `true` or `false`.
    Boolean,
    /// Value must look like an entity guid.
    Guid,
    /// Value must be a `user@host[:port]` handle.
    DiasporaId,
    /// Value may carry at most a fixed number of `#tags`.
    TagCount(TagCount),
    /// Value must be a PEM armoured public key.
    PublicKey,
}

impl Rule {
    /// The key recorded when this rule rejects a value.
    pub fn error_key(&self) -> &'static str {
        match self {
            Self::NotEmpty => "not_empty",
            Self::Length(_) => "length",
            Self::Format(_) => "format",
            Self::Numeric => "numeric",
            Self::Inclusion(_) => "inclusion",
            Self::Boolean => "boolean",
            Self::Guid => "guid",
            Self::DiasporaId => "diaspora_id",
            Self::TagCount(_) => "tag_count",
            Self::PublicKey => "public_key",
        }
    }

    /// Returns true if `value` satisfies the rule.
    pub fn valid_value(&self, value: &str) -> bool {
        match self {
            Self::NotEmpty => !value.trim().is_empty(),
            Self::Length(rule) => rule.valid_value(value),
            Self::Format(rule) => rule.valid_value(value),
            Self::Numeric => is_numeric(value),
            Self::Inclusion(rule) => rule.valid_value(value),
            Self::Boolean => matches!(value, "true" | "false"),
            Self::Guid => GUID_RE.is_match(value),
            Self::DiasporaId => {
                value.len() <= MAX_DIASPORA_ID_LENGTH && DIASPORA_ID_RE.is_match(value)
            }
            Self::TagCount(rule) => rule.valid_value(value),
            Self::PublicKey => is_public_key(value),
        }
    }
}

impl From<Length> for Rule {
    fn from(rule: Length) -> Self {
        Self::Length(rule)
    }
}

impl From<Format> for Rule {
    fn from(rule: Format) -> Self {
        Self::Format(rule)
    }
}

impl From<Inclusion> for Rule {
    fn from(rule: Inclusion) -> Self {
        Self::Inclusion(rule)
    }
}

impl From<TagCount> for Rule {
    fn from(rule: TagCount) -> Self {
        Self::TagCount(rule)
    }
}

// ── Numeric ──────────────────────────────────────────────────────

/// Optional sign, then digits with at most one decimal point.
fn is_numeric(value: &str) -> bool {
    let unsigned = value.strip_prefix(['+', '-']).unwrap_or(value);
    let mut seen_digit = false;
    let mut seen_point = false;
    for c in unsigned.chars() {
        match c {
            '0'..='9' => seen_digit = true,
            '.' if !seen_point => seen_point = true,
            _ => return false,
        }
    }
    seen_digit
}

fn is_public_key(value: &str) -> bool {
    let value = value.trim();
    ["PUBLIC KEY", "RSA PUBLIC KEY"].iter().any(|label| {
        value.starts_with(&format!("-----BEGIN {label}-----"))
            && value.ends_with(&format!("-----END {label}-----"))
    })
}

// ── Format ───────────────────────────────────────────────────────

/// The two exclusive matching modes of a [`Format`] rule.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// The value must match.
    With(Regex),
    /// The value must not match.
    Without(Regex),
}

/// Regular-expression rule.
#[derive(Debug, Clone)]
pub struct Format {
    pattern: Pattern,
    allow_blank: bool,
}

impl Format {
    /// Accepts values matching `regex`.
    pub fn with(regex: Regex) -> Self {
        Self {
            pattern: Pattern::With(regex),
            allow_blank: false,
        }
    }

    /// Accepts values not matching `regex`.
    pub fn without(regex: Regex) -> Self {
        Self {
            pattern: Pattern::Without(regex),
            allow_blank: false,
        }
    }

    /// Builds a rule from optional pattern sources; exactly one must be set.
    pub fn from_patterns(with: Option<&str>, without: Option<&str>) -> RuleResult<Self> {
        match (with, without) {
            (Some(source), None) => Ok(Self::with(compile("with", source)?)),
            (None, Some(source)) => Ok(Self::without(compile("without", source)?)),
            (Some(_), Some(_)) => Err(RuleConfigError::ConflictingPatterns),
            (None, None) => Err(RuleConfigError::MissingPattern),
        }
    }

    /// Lets the empty value pass regardless of the pattern.
    #[must_use]
    pub fn allow_blank(mut self, allow: bool) -> Self {
        self.allow_blank = allow;
        self
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn allows_blank(&self) -> bool {
        self.allow_blank
    }

    pub fn valid_value(&self, value: &str) -> bool {
        if value.is_empty() && self.allow_blank {
            return true;
        }
        match &self.pattern {
            Pattern::With(regex) => regex.is_match(value),
            Pattern::Without(regex) => !regex.is_match(value),
        }
    }
}

pub(crate) fn compile(param: &str, source: &str) -> RuleResult<Regex> {
    Regex::new(source).map_err(|source| RuleConfigError::InvalidPattern {
        param: param.to_string(),
        source,
    })
}

// ── Length ───────────────────────────────────────────────────────

/// Character-count bounds. At least one bound is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Length {
    minimum: Option<usize>,
    maximum: Option<usize>,
}

impl Length {
    pub fn new(minimum: Option<usize>, maximum: Option<usize>) -> RuleResult<Self> {
        match (minimum, maximum) {
            (None, None) => Err(RuleConfigError::InvalidParameter {
                rule: "length".into(),
                param: "minimum".into(),
                reason: "one of `minimum` or `maximum` is required".into(),
            }),
            (Some(min), Some(max)) if min > max => Err(RuleConfigError::InvalidParameter {
                rule: "length".into(),
                param: "minimum".into(),
                reason: format!("{min} exceeds maximum {max}"),
            }),
            _ => Ok(Self { minimum, maximum }),
        }
    }

    /// Shorthand for an upper bound only.
    pub fn maximum(maximum: usize) -> Self {
        Self {
            minimum: None,
            maximum: Some(maximum),
        }
    }

    pub fn valid_value(&self, value: &str) -> bool {
        let len = value.chars().count();
        self.minimum.is_none_or(|min| len >= min) && self.maximum.is_none_or(|max| len <= max)
    }
}

// ── Inclusion ────────────────────────────────────────────────────

/// Set membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inclusion {
    values: Vec<String>,
}

impl Inclusion {
    pub fn new<I, S>(values: I) -> RuleResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Err(RuleConfigError::InvalidParameter {
                rule: "inclusion".into(),
                param: "in".into(),
                reason: "the set of accepted values is empty".into(),
            });
        }
        Ok(Self { values })
    }

    pub fn valid_value(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }
}

// ── TagCount ─────────────────────────────────────────────────────

/// Upper bound on the number of `#tags` in a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagCount {
    maximum: usize,
}

impl TagCount {
    pub fn new(maximum: usize) -> Self {
        Self { maximum }
    }

    pub fn valid_value(&self, value: &str) -> bool {
        TAG_RE.find_iter(value).count() <= self.maximum
    }
}
