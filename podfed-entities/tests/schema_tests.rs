use podfed_entities::{EntityKind, PropertyDescriptor, PropertyKind};

// ── PropertyDescriptor constructors ──────────────────────────────

#[test]
fn string_property_defaults() {
    let p = PropertyDescriptor::string("guid");
    assert_eq!(p.name, "guid");
    assert_eq!(p.kind, PropertyKind::String);
    assert!(!p.required);
    assert!(!p.signed);
    assert!(p.is_scalar());
}

#[test]
fn required_and_signed_flags() {
    let p = PropertyDescriptor::boolean("positive").required().signed();
    assert_eq!(p.kind, PropertyKind::Boolean);
    assert!(p.required);
    assert!(p.signed);
}

#[test]
fn nested_property_kinds() {
    let e = PropertyDescriptor::entity("location", EntityKind::Location);
    assert_eq!(e.kind, PropertyKind::Entity(EntityKind::Location));
    assert!(!e.is_scalar());

    let c = PropertyDescriptor::collection("photos", EntityKind::Photo);
    assert_eq!(c.kind, PropertyKind::Collection(EntityKind::Photo));
    assert!(!c.is_scalar());
}

#[test]
fn property_kind_display() {
    assert_eq!(PropertyKind::Integer.to_string(), "integer");
    assert_eq!(PropertyKind::Entity(EntityKind::Location).to_string(), "location");
    assert_eq!(
        PropertyKind::Collection(EntityKind::Photo).to_string(),
        "list of photo"
    );
}

// ── EntityKind ───────────────────────────────────────────────────

#[test]
fn element_names_round_trip() {
    for kind in EntityKind::ALL {
        assert_eq!(EntityKind::from_element_name(kind.element_name()), Some(kind));
        assert_eq!(kind.schema().kind, kind);
    }
    assert_eq!(EntityKind::from_element_name("comment"), None);
}

#[test]
fn element_names_are_snake_case() {
    for kind in EntityKind::ALL {
        for name in std::iter::once(kind.element_name())
            .chain(kind.schema().properties.iter().map(|p| p.name))
        {
            assert!(
                name.chars().all(|c| c.is_ascii_lowercase() || c == '_'),
                "{name} is not lowercase_with_underscores"
            );
        }
    }
}

#[test]
fn property_names_are_unique_per_schema() {
    for kind in EntityKind::ALL {
        let props = kind.schema().properties;
        for (i, p) in props.iter().enumerate() {
            assert!(
                props[i + 1..].iter().all(|q| q.name != p.name),
                "{kind} declares {} twice",
                p.name
            );
        }
    }
}

#[test]
fn status_message_schema_order() {
    let names: Vec<&str> = EntityKind::StatusMessage
        .schema()
        .properties
        .iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(
        names,
        vec![
            "raw_message",
            "photos",
            "location",
            "guid",
            "diaspora_handle",
            "public",
            "created_at",
            "provider_display_name",
        ]
    );
}

#[test]
fn like_signature_bearing_properties() {
    let signed: Vec<&str> = EntityKind::Like.schema().signed().map(|p| p.name).collect();
    assert_eq!(
        signed,
        vec!["positive", "guid", "target_type", "parent_guid", "diaspora_handle"]
    );
}

#[test]
fn schema_lookup() {
    let schema = EntityKind::Photo.schema();
    assert_eq!(schema.property("height").map(|p| p.kind), Some(PropertyKind::Integer));
    assert!(schema.property("nope").is_none());
    assert!(schema.required().any(|p| p.name == "remote_photo_name"));
    assert!(!schema.required().any(|p| p.name == "text"));
}
