use podfed_validation::{
    Format, Inclusion, Length, Regex, Rule, RuleConfigError, RuleParams, RuleRegistry, TagCount,
};
use proptest::prelude::*;
use serde_json::json;

fn params(value: serde_json::Value) -> RuleParams {
    value.as_object().cloned().unwrap()
}

// ── Format ───────────────────────────────────────────────────────

#[test]
fn format_with_matches() {
    let rule = Rule::from(Format::with(Regex::new(r"^[a-z]+$").unwrap()));
    assert!(rule.valid_value("abc"));
    assert!(!rule.valid_value("ABC"));
    assert_eq!(rule.error_key(), "format");
}

#[test]
fn format_without_rejects_matches() {
    let rule = Rule::from(Format::without(Regex::new(r"[;]").unwrap()));
    assert!(rule.valid_value("Test"));
    assert!(!rule.valid_value("Te;st"));
}

#[test]
fn format_blank_rejected_by_default() {
    let rule = Format::with(Regex::new(r"^[a-z]+$").unwrap());
    assert!(!rule.valid_value(""));
}

#[test]
fn format_allow_blank_accepts_empty_value() {
    let rule = Format::with(Regex::new(r"^[a-z]+$").unwrap()).allow_blank(true);
    assert!(rule.valid_value(""));
    assert!(!rule.valid_value("123"));

    let without = Format::without(Regex::new(r".*").unwrap()).allow_blank(true);
    assert!(without.valid_value(""));
}

#[test]
fn format_requires_a_pattern() {
    let err = Format::from_patterns(None, None).unwrap_err();
    assert!(matches!(err, RuleConfigError::MissingPattern));
}

#[test]
fn format_rejects_both_patterns() {
    let err = Format::from_patterns(Some("a"), Some("b")).unwrap_err();
    assert!(matches!(err, RuleConfigError::ConflictingPatterns));
}

#[test]
fn format_rejects_uncompilable_pattern() {
    let err = Format::from_patterns(Some("(unclosed"), None).unwrap_err();
    assert!(matches!(err, RuleConfigError::InvalidPattern { .. }));
}

#[test]
fn format_params_must_be_patterns() {
    let registry = RuleRegistry::builtin();

    let err = registry.build("format", &params(json!({ "with": 42 }))).unwrap_err();
    assert!(matches!(err, RuleConfigError::NotAPattern(p) if p == "with"));

    let err = registry.build("format", &params(json!({ "without": true }))).unwrap_err();
    assert!(matches!(err, RuleConfigError::NotAPattern(p) if p == "without"));
}

#[test]
fn format_params_exclusivity() {
    let registry = RuleRegistry::builtin();

    let both = registry.build("format", &params(json!({ "with": "a", "without": "b" })));
    assert!(matches!(both, Err(RuleConfigError::ConflictingPatterns)));

    let neither = registry.build("format", &params(json!({ "allow_blank": true })));
    assert!(matches!(neither, Err(RuleConfigError::MissingPattern)));
}

#[test]
fn format_params_allow_blank() {
    let rule = RuleRegistry::builtin()
        .build("format", &params(json!({ "with": "^x$", "allow_blank": true })))
        .unwrap();
    assert!(rule.valid_value(""));
    assert!(rule.valid_value("x"));
    assert!(!rule.valid_value("y"));
}

// ── Numeric ──────────────────────────────────────────────────────

#[test]
fn numeric_accepts_float() {
    assert!(Rule::Numeric.valid_value("123.34"));
}

#[test]
fn numeric_accepts_integer() {
    assert!(Rule::Numeric.valid_value("123"));
}

#[test]
fn numeric_accepts_negative() {
    assert!(Rule::Numeric.valid_value("-987"));
}

#[test]
fn numeric_rejects_words() {
    assert!(!Rule::Numeric.valid_value("asdf qwer"));
    assert!(!Rule::Numeric.valid_value("12abc"));
    assert!(!Rule::Numeric.valid_value(""));
}

#[test]
fn numeric_takes_no_parameters() {
    let err = RuleRegistry::builtin()
        .build("numeric", &params(json!({ "param": true })))
        .unwrap_err();
    assert!(matches!(err, RuleConfigError::UnexpectedParameter { .. }));
}

proptest! {
    #[test]
    fn numeric_accepts_signed_decimals(
        sign in prop::sample::select(vec!["", "+", "-"]),
        int in "[0-9]{1,12}",
        frac in prop::option::of("[0-9]{0,6}"),
    ) {
        let value = match frac {
            Some(frac) => format!("{sign}{int}.{frac}"),
            None => format!("{sign}{int}"),
        };
        prop_assert!(Rule::Numeric.valid_value(&value));
    }

    #[test]
    fn numeric_rejects_any_other_character(
        prefix in "[0-9]{0,5}",
        bad in "[^0-9.+\\-]",
        suffix in "[0-9]{0,5}",
    ) {
        let value = format!("{prefix}{bad}{suffix}");
        prop_assert!(!Rule::Numeric.valid_value(&value));
    }

    #[test]
    fn numeric_rejects_second_decimal_point(a in "[0-9]{1,4}", b in "[0-9]{0,4}", c in "[0-9]{0,4}") {
        let value = format!("{a}.{b}.{c}");
        prop_assert!(!Rule::Numeric.valid_value(&value));
    }
}

// ── Other kinds ──────────────────────────────────────────────────

#[test]
fn not_empty_rejects_whitespace() {
    assert!(Rule::NotEmpty.valid_value("x"));
    assert!(!Rule::NotEmpty.valid_value(""));
    assert!(!Rule::NotEmpty.valid_value("  \t"));
}

#[test]
fn length_bounds() {
    let rule = Rule::from(Length::new(Some(2), Some(4)).unwrap());
    assert!(!rule.valid_value("a"));
    assert!(rule.valid_value("ab"));
    assert!(rule.valid_value("abcd"));
    assert!(!rule.valid_value("abcde"));
    // counts characters, not bytes
    assert!(rule.valid_value("äöü"));
}

#[test]
fn length_requires_a_consistent_bound() {
    assert!(Length::new(None, None).is_err());
    assert!(Length::new(Some(5), Some(1)).is_err());
    assert!(Length::new(Some(1), None).is_ok());
}

#[test]
fn inclusion_set() {
    let rule = Rule::from(Inclusion::new(["Post", "Comment"]).unwrap());
    assert!(rule.valid_value("Post"));
    assert!(!rule.valid_value("post"));
    assert!(Inclusion::new(Vec::<String>::new()).is_err());
}

#[test]
fn boolean_accepts_canonical_literals_only() {
    assert!(Rule::Boolean.valid_value("true"));
    assert!(Rule::Boolean.valid_value("false"));
    assert!(!Rule::Boolean.valid_value("TRUE"));
    assert!(!Rule::Boolean.valid_value("1"));
}

#[test]
fn guid_shape() {
    assert!(Rule::Guid.valid_value("abcdef0123456789"));
    assert!(Rule::Guid.valid_value("ABCDEF01-2345-6789@pod.tld:x"));
    assert!(!Rule::Guid.valid_value("short"));
    assert!(!Rule::Guid.valid_value("abcdef0123456789 space"));
}

#[test]
fn diaspora_id_shape() {
    assert!(Rule::DiasporaId.valid_value("alice@pod.example.tld"));
    assert!(Rule::DiasporaId.valid_value("bob_1@localhost:3000"));
    assert!(!Rule::DiasporaId.valid_value("alice"));
    assert!(!Rule::DiasporaId.valid_value("alice@"));
    assert!(!Rule::DiasporaId.valid_value("al ice@pod.tld"));
    let long = format!("{}@pod.tld", "a".repeat(250));
    assert!(!Rule::DiasporaId.valid_value(&long));
}

#[test]
fn tag_count_limit() {
    let rule = Rule::from(TagCount::new(2));
    assert!(rule.valid_value("#one #two"));
    assert!(!rule.valid_value("#one #two #three"));
}

#[test]
fn public_key_armour() {
    let key = "-----BEGIN PUBLIC KEY-----\nMIIBIjAN\n-----END PUBLIC KEY-----\n";
    assert!(Rule::PublicKey.valid_value(key));
    assert!(!Rule::PublicKey.valid_value("ABCDEF=="));
}

// ── Registry ─────────────────────────────────────────────────────

#[test]
fn registry_unknown_rule() {
    let err = RuleRegistry::builtin().build("nope", &RuleParams::new()).unwrap_err();
    assert!(matches!(err, RuleConfigError::UnknownRule(name) if name == "nope"));
}

#[test]
fn registry_custom_kind() {
    let mut registry = RuleRegistry::extended();
    registry.register("lowercase", |p| {
        if !p.is_empty() {
            return Err(RuleConfigError::UnexpectedParameter {
                rule: "lowercase".into(),
                param: p.keys().next().cloned().unwrap_or_default(),
            });
        }
        Ok(Format::with(Regex::new("^[a-z]*$").unwrap()).into())
    });
    assert!(registry.contains("lowercase"));
    assert!(!RuleRegistry::builtin().contains("lowercase"));

    let rule = registry.build("lowercase", &RuleParams::new()).unwrap();
    assert!(rule.valid_value("abc"));
    assert!(!rule.valid_value("Abc"));
}

#[test]
fn registry_parameter_types() {
    let registry = RuleRegistry::builtin();
    assert!(registry.build("length", &params(json!({ "maximum": -1 }))).is_err());
    assert!(registry.build("tag_count", &RuleParams::new()).is_err());
    assert!(registry.build("inclusion", &params(json!({ "in": "x" }))).is_err());
    assert!(registry.build("inclusion", &params(json!({ "in": ["a", "b"] }))).is_ok());
}
