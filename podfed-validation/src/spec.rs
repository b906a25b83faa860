//! Declarative validator definitions.
//!
//! A validator spec is plain data (TOML or JSON) naming rule kinds and their
//! parameters; compiling it resolves every kind through a [`RuleRegistry`]:
//!
//! ```toml
//! [[property]]
//! name = "guid"
//! rules = [{ kind = "guid" }]
//!
//! [[property]]
//! name = "first_name"
//! rules = [
//!     { kind = "length", maximum = 32 },
//!     { kind = "format", without = "[;]", key = "no_semicolon" },
//! ]
//! ```

use serde::{Deserialize, Serialize};

use crate::error::RuleResult;
use crate::registry::{RuleParams, RuleRegistry};
use crate::validator::Validator;

/// A whole validator: properties in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidatorSpec {
    #[serde(default, rename = "property")]
    pub properties: Vec<PropertySpec>,
}

/// Rules attached to one property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySpec {
    pub name: String,
    #[serde(default)]
    pub rules: Vec<RuleSpec>,
}

/// One rule: its registered kind, an optional error key override, and
/// every remaining key as a constructor parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSpec {
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(flatten)]
    pub params: RuleParams,
}

impl ValidatorSpec {
    /// Parses a spec from TOML.
    pub fn from_toml_str(source: &str) -> RuleResult<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Compiles the spec with the built-in registry.
    pub fn build(&self) -> RuleResult<Validator> {
        self.build_with(RuleRegistry::builtin())
    }

    /// Compiles the spec, resolving rule kinds through `registry`.
    pub fn build_with(&self, registry: &RuleRegistry) -> RuleResult<Validator> {
        let mut builder = Validator::builder_with_registry(registry);
        for property in &self.properties {
            for rule in &property.rules {
                builder = builder.rule_named_with_key(
                    property.name.as_str(),
                    &rule.kind,
                    &rule.params,
                    rule.key.clone(),
                );
            }
        }
        builder.build()
    }
}

impl Validator {
    /// Parses and compiles a TOML validator spec.
    pub fn from_toml_str(source: &str) -> RuleResult<Self> {
        ValidatorSpec::from_toml_str(source)?.build()
    }
}
