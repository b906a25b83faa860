use std::collections::{BTreeMap, BTreeSet, HashMap};

use podfed_validation::{
    Format, Length, Regex, Rule, RuleConfigError, RuleParams, RuleRegistry, ValidationReport,
    Validator, ValidatorSpec,
};
use pretty_assertions::assert_eq;

fn record(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn keys(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ── Evaluation ───────────────────────────────────────────────────

#[test]
fn valid_record_has_empty_report() {
    let validator = Validator::builder()
        .rule("number", Rule::Numeric)
        .rule("guid", Rule::Guid)
        .build()
        .unwrap();
    let report = validator.validate(&record(&[("number", "123"), ("guid", "0123456789abcdef")]));
    assert!(report.is_valid());
    assert!(report.is_empty());
}

#[test]
fn failure_recorded_under_property() {
    let validator = Validator::builder().rule("number", Rule::Numeric).build().unwrap();
    let report = validator.validate(&record(&[("number", "asdf qwer")]));
    assert!(!report.is_valid());
    assert!(report.contains("number"));
    assert_eq!(report.errors_for("number"), Some(&keys(&["numeric"])));
}

#[test]
fn every_violated_key_is_reported() {
    let validator = Validator::builder()
        .rule("name", Rule::NotEmpty)
        .rule("name", Length::new(Some(3), None).unwrap())
        .rule("name", Format::with(Regex::new("^[a-z]+$").unwrap()))
        .build()
        .unwrap();

    let report = validator.validate(&record(&[("name", "")]));
    assert_eq!(
        report.errors_for("name"),
        Some(&keys(&["format", "length", "not_empty"]))
    );
}

#[test]
fn properties_are_reported_independently() {
    let validator = Validator::builder()
        .rule("a", Rule::NotEmpty)
        .rule("b", Rule::Boolean)
        .rule("c", Rule::Numeric)
        .build()
        .unwrap();
    let report = validator.validate(&record(&[("a", ""), ("b", "yes"), ("c", "1")]));

    let expected: BTreeMap<String, BTreeSet<String>> = [
        ("a".to_string(), keys(&["not_empty"])),
        ("b".to_string(), keys(&["boolean"])),
    ]
    .into_iter()
    .collect();
    assert_eq!(report.into_errors(), expected);
}

#[test]
fn missing_property_is_checked_as_empty() {
    let validator = Validator::builder()
        .rule("required", Rule::NotEmpty)
        .rule("optional", Format::with(Regex::new("^x$").unwrap()).allow_blank(true))
        .build()
        .unwrap();
    let report = validator.validate(&HashMap::<String, String>::new());
    assert!(report.contains("required"));
    assert!(!report.contains("optional"));
}

#[test]
fn btreemap_source() {
    let validator = Validator::builder().rule("flag", Rule::Boolean).build().unwrap();
    let mut source = BTreeMap::new();
    source.insert("flag".to_string(), "true".to_string());
    assert!(validator.is_valid(&source));
}

#[test]
fn validator_is_reusable_across_threads() {
    let validator = std::sync::Arc::new(
        Validator::builder().rule("n", Rule::Numeric).build().unwrap(),
    );
    let handles: Vec<_> = ["1", "x", "2.5", "--"]
        .into_iter()
        .map(|value| {
            let validator = validator.clone();
            std::thread::spawn(move || validator.is_valid(&record(&[("n", value)])))
        })
        .collect();
    let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec![true, false, true, false]);
}

// ── Authoring ────────────────────────────────────────────────────

#[test]
fn duplicate_default_key_is_rejected() {
    let err = Validator::builder()
        .rule("name", Length::maximum(32))
        .rule("name", Length::maximum(64))
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        RuleConfigError::DuplicateRule { ref property, ref key } if property == "name" && key == "length"
    ));
}

#[test]
fn same_kind_with_distinct_keys_is_allowed() {
    let validator = Validator::builder()
        .rule_with_key("name", Format::without(Regex::new(";").unwrap()), "no_semicolon")
        .rule_with_key("name", Format::without(Regex::new("/").unwrap()), "no_slash")
        .build()
        .unwrap();
    assert_eq!(validator.rule_count(), 2);

    let report = validator.validate(&record(&[("name", "a;b/c")]));
    assert_eq!(report.errors_for("name"), Some(&keys(&["no_semicolon", "no_slash"])));
}

#[test]
fn same_kind_on_different_properties_is_allowed() {
    let validator = Validator::builder()
        .rule("guid", Rule::Guid)
        .rule("parent_guid", Rule::Guid)
        .build()
        .unwrap();
    assert_eq!(validator.properties().collect::<Vec<_>>(), vec!["guid", "parent_guid"]);
}

#[test]
fn named_rule_errors_surface_at_build() {
    let result = Validator::builder()
        .rule_named("number", "numeric", &serde_json::json!({ "param": true }).as_object().cloned().unwrap())
        .rule("other", Rule::NotEmpty)
        .build();
    assert!(matches!(result, Err(RuleConfigError::UnexpectedParameter { .. })));
}

#[test]
fn try_rule_folds_construction_error() {
    let result = Validator::builder()
        .try_rule("name", Format::from_patterns(Some("a"), Some("b")))
        .build();
    assert!(matches!(result, Err(RuleConfigError::ConflictingPatterns)));
}

#[test]
fn unknown_named_rule() {
    let result = Validator::builder()
        .rule_named("x", "does_not_exist", &RuleParams::new())
        .build();
    assert!(matches!(result, Err(RuleConfigError::UnknownRule(_))));
}

#[test]
fn named_rules_resolve_through_shared_builtin() {
    let params = serde_json::json!({ "maximum": 3 }).as_object().cloned().unwrap();
    let validator = Validator::builder()
        .rule_named("name", "length", &params)
        .build()
        .unwrap();
    assert!(validator.is_valid(&record(&[("name", "abc")])));
    assert!(!validator.is_valid(&record(&[("name", "abcd")])));
}

#[test]
fn named_rules_resolve_through_borrowed_registry() {
    let mut registry = RuleRegistry::extended();
    registry.register("lowercase", |_| {
        Ok(Format::with(Regex::new("^[a-z]*$").unwrap()).into())
    });

    let validator = Validator::builder_with_registry(&registry)
        .rule_named("slug", "lowercase", &RuleParams::new())
        .build()
        .unwrap();
    assert!(validator.is_valid(&record(&[("slug", "abc")])));
    assert!(!validator.is_valid(&record(&[("slug", "Abc")])));

    // The registry stays with its owner and keeps serving builders.
    assert!(registry.contains("lowercase"));
    let result = Validator::builder()
        .rule_named("slug", "lowercase", &RuleParams::new())
        .build();
    assert!(matches!(result, Err(RuleConfigError::UnknownRule(_))));
}

// ── Reports ──────────────────────────────────────────────────────

#[test]
fn nested_reports_are_prefixed() {
    let mut inner = ValidationReport::default();
    inner.add("guid", "guid");
    let mut outer = ValidationReport::default();
    outer.add("public", "boolean");
    outer.merge_nested("photos[1]", inner);

    let props: Vec<&str> = outer.iter().map(|(p, _)| p).collect();
    assert_eq!(props, vec!["photos[1].guid", "public"]);
    assert_eq!(outer.len(), 2);
}

// ── Declarative specs ────────────────────────────────────────────

const LIKE_SPEC: &str = r#"
[[property]]
name = "guid"
rules = [{ kind = "guid" }]

[[property]]
name = "first_name"
rules = [
    { kind = "length", maximum = 32 },
    { kind = "format", without = "[;]", key = "no_semicolon" },
]

[[property]]
name = "positive"
rules = [{ kind = "boolean" }]
"#;

#[test]
fn spec_from_toml() {
    let spec = ValidatorSpec::from_toml_str(LIKE_SPEC).unwrap();
    assert_eq!(spec.properties.len(), 3);
    assert_eq!(spec.properties[1].rules[1].key.as_deref(), Some("no_semicolon"));

    let validator = spec.build().unwrap();
    assert_eq!(validator.rule_count(), 4);

    let report = validator.validate(&record(&[
        ("guid", "0123456789abcdef"),
        ("first_name", "Bobby;"),
        ("positive", "maybe"),
    ]));
    assert_eq!(report.errors_for("first_name"), Some(&keys(&["no_semicolon"])));
    assert_eq!(report.errors_for("positive"), Some(&keys(&["boolean"])));
    assert!(!report.contains("guid"));
}

#[test]
fn spec_with_bad_rule_config_fails_to_build() {
    let err = Validator::from_toml_str(
        r#"
[[property]]
name = "n"
rules = [{ kind = "format", with = "a", without = "b" }]
"#,
    )
    .unwrap_err();
    assert!(matches!(err, RuleConfigError::ConflictingPatterns));
}

#[test]
fn spec_with_malformed_toml() {
    let err = ValidatorSpec::from_toml_str("[[property]\nname = ").unwrap_err();
    assert!(matches!(err, RuleConfigError::Spec(_)));
}
