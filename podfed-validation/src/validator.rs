//! Per-entity aggregation of rules and the failure report they produce.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::hash::BuildHasher;

use tracing::debug;

use crate::error::{RuleConfigError, RuleResult};
use crate::registry::{RuleParams, RuleRegistry};
use crate::rule::Rule;

/// Anything whose properties can be read as strings for validation.
pub trait PropertySource {
    /// The string form of `name`, or `None` if the property is absent.
    fn property_value(&self, name: &str) -> Option<Cow<'_, str>>;
}

impl<S: BuildHasher> PropertySource for HashMap<String, String, S> {
    fn property_value(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(|v| Cow::Borrowed(v.as_str()))
    }
}

impl PropertySource for BTreeMap<String, String> {
    fn property_value(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(|v| Cow::Borrowed(v.as_str()))
    }
}

#[derive(Debug, Clone)]
struct RuleEntry {
    rule: Rule,
    error_key: String,
}

/// An immutable set of rules keyed by property name.
///
/// Rules on one property are evaluated independently, so a single run can
/// report several keys for the same property. Absent properties are
/// checked as the empty value.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    properties: Vec<(String, Vec<RuleEntry>)>,
}

impl Validator {
    /// A builder resolving named rules through [`RuleRegistry::builtin`].
    pub fn builder() -> ValidatorBuilder<'static> {
        ValidatorBuilder::new(RuleRegistry::builtin())
    }

    /// A builder resolving named rules through `registry`.
    pub fn builder_with_registry(registry: &RuleRegistry) -> ValidatorBuilder<'_> {
        ValidatorBuilder::new(registry)
    }

    /// Property names in declaration order.
    pub fn properties(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|(name, _)| name.as_str())
    }

    /// Number of declared (property, rule) pairs.
    pub fn rule_count(&self) -> usize {
        self.properties.iter().map(|(_, rules)| rules.len()).sum()
    }

    /// Runs every rule against `source`.
    pub fn validate<P: PropertySource + ?Sized>(&self, source: &P) -> ValidationReport {
        let mut report = ValidationReport::default();
        for (property, rules) in &self.properties {
            let value = source.property_value(property).unwrap_or_default();
            for entry in rules {
                if !entry.rule.valid_value(&value) {
                    debug!(property = %property, key = %entry.error_key, "rule rejected value");
                    report.add(property.clone(), entry.error_key.clone());
                }
            }
        }
        report
    }

    /// Shorthand for `validate(source).is_valid()`.
    pub fn is_valid<P: PropertySource + ?Sized>(&self, source: &P) -> bool {
        self.validate(source).is_valid()
    }
}

/// Collects rule declarations; configuration errors surface from [`build`].
///
/// [`build`]: ValidatorBuilder::build
#[derive(Debug)]
pub struct ValidatorBuilder<'r> {
    registry: &'r RuleRegistry,
    properties: Vec<(String, Vec<RuleEntry>)>,
    error: Option<RuleConfigError>,
}

impl<'r> ValidatorBuilder<'r> {
    fn new(registry: &'r RuleRegistry) -> Self {
        Self {
            registry,
            properties: Vec::new(),
            error: None,
        }
    }

    /// Attaches `rule` to `property`, reporting the rule's default key.
    pub fn rule(self, property: impl Into<String>, rule: impl Into<Rule>) -> Self {
        let rule = rule.into();
        let key = rule.error_key().to_string();
        self.push(property.into(), rule, key)
    }

    /// Attaches `rule` to `property`, reporting `error_key` instead of the default.
    pub fn rule_with_key(
        self,
        property: impl Into<String>,
        rule: impl Into<Rule>,
        error_key: impl Into<String>,
    ) -> Self {
        self.push(property.into(), rule.into(), error_key.into())
    }

    /// Attaches a rule constructed through the registry.
    pub fn rule_named(self, property: impl Into<String>, kind: &str, params: &RuleParams) -> Self {
        self.rule_named_with_key(property, kind, params, None)
    }

    /// Like [`rule_named`](Self::rule_named) with an optional custom key.
    pub fn rule_named_with_key(
        mut self,
        property: impl Into<String>,
        kind: &str,
        params: &RuleParams,
        error_key: Option<String>,
    ) -> Self {
        if self.error.is_some() {
            return self;
        }
        match self.registry.build(kind, params) {
            Ok(rule) => {
                let key = error_key.unwrap_or_else(|| rule.error_key().to_string());
                self.push(property.into(), rule, key)
            }
            Err(e) => {
                self.error = Some(e);
                self
            }
        }
    }

    /// Folds a fallible rule construction into the builder.
    pub fn try_rule(self, property: impl Into<String>, rule: RuleResult<impl Into<Rule>>) -> Self {
        match rule {
            Ok(rule) => self.rule(property, rule),
            Err(e) => self.fail(e),
        }
    }

    fn fail(mut self, error: RuleConfigError) -> Self {
        self.error.get_or_insert(error);
        self
    }

    fn push(mut self, property: String, rule: Rule, error_key: String) -> Self {
        if self.error.is_some() {
            return self;
        }
        let index = match self.properties.iter().position(|(name, _)| *name == property) {
            Some(index) => index,
            None => {
                self.properties.push((property.clone(), Vec::new()));
                self.properties.len() - 1
            }
        };
        let rules = &mut self.properties[index].1;
        if rules.iter().any(|entry| entry.error_key == error_key) {
            return self.fail(RuleConfigError::DuplicateRule {
                property,
                key: error_key,
            });
        }
        rules.push(RuleEntry { rule, error_key });
        self
    }

    /// Finishes the validator, or returns the first configuration error.
    pub fn build(self) -> RuleResult<Validator> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(Validator {
                properties: self.properties,
            }),
        }
    }
}

/// Property name → every error key triggered by that property.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: BTreeMap<String, BTreeSet<String>>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Records a failure.
    pub fn add(&mut self, property: impl Into<String>, error_key: impl Into<String>) {
        self.errors
            .entry(property.into())
            .or_default()
            .insert(error_key.into());
    }

    /// Error keys recorded for `property`, if any.
    pub fn errors_for(&self, property: &str) -> Option<&BTreeSet<String>> {
        self.errors.get(property)
    }

    pub fn contains(&self, property: &str) -> bool {
        self.errors.contains_key(property)
    }

    /// Copies every failure of `nested` under `prefix.` (e.g. `photos[0].guid`).
    pub fn merge_nested(&mut self, prefix: &str, nested: ValidationReport) {
        for (property, keys) in nested.errors {
            self.errors
                .entry(format!("{prefix}.{property}"))
                .or_default()
                .extend(keys);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_errors(self) -> BTreeMap<String, BTreeSet<String>> {
        self.errors
    }
}
