//! Name → constructor registry for declarative rule authoring.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use serde_json::Value;

use crate::error::{RuleConfigError, RuleResult};
use crate::rule::{Format, Inclusion, Length, Rule, TagCount};

/// Parameters handed to a rule constructor.
pub type RuleParams = serde_json::Map<String, Value>;

/// Builds a rule from its parameters, rejecting malformed configuration.
pub type RuleConstructor = fn(&RuleParams) -> RuleResult<Rule>;

static BUILTIN: LazyLock<RuleRegistry> = LazyLock::new(RuleRegistry::new_builtin);

/// Maps rule kind names (e.g. `"format"`) to constructors.
#[derive(Clone)]
pub struct RuleRegistry {
    constructors: HashMap<String, RuleConstructor>,
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("RuleRegistry").field("rules", &names).finish()
    }
}

impl RuleRegistry {
    /// An empty registry.
    pub fn empty() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// The shared registry of built-in rule kinds.
    pub fn builtin() -> &'static RuleRegistry {
        &BUILTIN
    }

    fn new_builtin() -> Self {
        let mut registry = Self::empty();
        registry.register("not_empty", |p| unit("not_empty", p, Rule::NotEmpty));
        registry.register("numeric", |p| unit("numeric", p, Rule::Numeric));
        registry.register("boolean", |p| unit("boolean", p, Rule::Boolean));
        registry.register("guid", |p| unit("guid", p, Rule::Guid));
        registry.register("diaspora_id", |p| unit("diaspora_id", p, Rule::DiasporaId));
        registry.register("public_key", |p| unit("public_key", p, Rule::PublicKey));
        registry.register("format", format);
        registry.register("length", length);
        registry.register("inclusion", inclusion);
        registry.register("tag_count", tag_count);
        registry
    }

    /// A copy of the built-in registry, open for custom kinds.
    pub fn extended() -> Self {
        Self::builtin().clone()
    }

    /// Registers (or replaces) a constructor.
    pub fn register(&mut self, name: impl Into<String>, constructor: RuleConstructor) {
        self.constructors.insert(name.into(), constructor);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Constructs the rule registered under `name`.
    pub fn build(&self, name: &str, params: &RuleParams) -> RuleResult<Rule> {
        let constructor = self
            .constructors
            .get(name)
            .ok_or_else(|| RuleConfigError::UnknownRule(name.to_string()))?;
        constructor(params)
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::extended()
    }
}

// ── Constructors ─────────────────────────────────────────────────

fn unit(rule: &str, params: &RuleParams, value: Rule) -> RuleResult<Rule> {
    reject_unknown(rule, params, &[])?;
    Ok(value)
}

fn format(params: &RuleParams) -> RuleResult<Rule> {
    reject_unknown("format", params, &["with", "without", "allow_blank"])?;
    let with = pattern_param(params, "with")?;
    let without = pattern_param(params, "without")?;
    let allow_blank = match params.get("allow_blank") {
        None => false,
        Some(Value::Bool(b)) => *b,
        Some(_) => return Err(invalid("format", "allow_blank", "expected a boolean")),
    };
    Ok(Format::from_patterns(with, without)?
        .allow_blank(allow_blank)
        .into())
}

fn length(params: &RuleParams) -> RuleResult<Rule> {
    reject_unknown("length", params, &["minimum", "maximum"])?;
    let minimum = count_param("length", params, "minimum")?;
    let maximum = count_param("length", params, "maximum")?;
    Ok(Length::new(minimum, maximum)?.into())
}

fn inclusion(params: &RuleParams) -> RuleResult<Rule> {
    reject_unknown("inclusion", params, &["in"])?;
    let values = match params.get("in") {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                _ => Err(invalid("inclusion", "in", "expected a list of strings")),
            })
            .collect::<RuleResult<Vec<_>>>()?,
        Some(_) => return Err(invalid("inclusion", "in", "expected a list of strings")),
        None => return Err(invalid("inclusion", "in", "parameter is required")),
    };
    Ok(Inclusion::new(values)?.into())
}

fn tag_count(params: &RuleParams) -> RuleResult<Rule> {
    reject_unknown("tag_count", params, &["maximum"])?;
    let maximum = count_param("tag_count", params, "maximum")?
        .ok_or_else(|| invalid("tag_count", "maximum", "parameter is required"))?;
    Ok(TagCount::new(maximum).into())
}

// ── Parameter helpers ────────────────────────────────────────────

fn reject_unknown(rule: &str, params: &RuleParams, accepted: &[&str]) -> RuleResult<()> {
    match params.keys().find(|k| !accepted.contains(&k.as_str())) {
        Some(param) => Err(RuleConfigError::UnexpectedParameter {
            rule: rule.to_string(),
            param: param.clone(),
        }),
        None => Ok(()),
    }
}

fn pattern_param<'a>(params: &'a RuleParams, name: &str) -> RuleResult<Option<&'a str>> {
    match params.get(name) {
        None => Ok(None),
        Some(Value::String(source)) => Ok(Some(source.as_str())),
        Some(_) => Err(RuleConfigError::NotAPattern(name.to_string())),
    }
}

fn count_param(rule: &str, params: &RuleParams, name: &str) -> RuleResult<Option<usize>> {
    match params.get(name) {
        None => Ok(None),
        Some(value) => value
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| invalid(rule, name, "expected a non-negative integer")),
    }
}

fn invalid(rule: &str, param: &str, reason: &str) -> RuleConfigError {
    RuleConfigError::InvalidParameter {
        rule: rule.to_string(),
        param: param.to_string(),
        reason: reason.to_string(),
    }
}
