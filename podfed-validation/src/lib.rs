//! Property validation for federation entities.
//!
//! - [`Rule`]: a single-property predicate with an error key
//! - [`RuleRegistry`]: name → constructor table for declarative authoring
//! - [`Validator`]: rules grouped by property, producing a [`ValidationReport`]
//! - [`ValidatorSpec`]: TOML/JSON description of a validator
//!
//! Rule and validator construction is where configuration mistakes are
//! reported ([`RuleConfigError`]). Evaluating a built validator never
//! fails; it returns every violated rule key per property.

mod error;
mod registry;
mod rule;
mod spec;
mod validator;

pub use error::{RuleConfigError, RuleResult};
pub use registry::{RuleConstructor, RuleParams, RuleRegistry};
pub use rule::{Format, Inclusion, Length, MAX_DIASPORA_ID_LENGTH, Pattern, Rule, TagCount};
pub use spec::{PropertySpec, RuleSpec, ValidatorSpec};
pub use validator::{PropertySource, ValidationReport, Validator, ValidatorBuilder};

/// Re-exported so callers can build [`Format`] rules without a direct dependency.
pub use regex::Regex;
