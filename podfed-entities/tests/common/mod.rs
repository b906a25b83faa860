//! Shared entity fixtures.

#![allow(dead_code)]

use podfed_entities::{Entity, EntityKind, Value};

pub const HANDLE: &str = "alice@pod.example.tld";
pub const GUID: &str = "0123456789abcdef";
pub const PARENT_GUID: &str = "fedcba9876543210";

pub fn entity(kind: EntityKind, properties: Vec<(&str, Value)>) -> Entity {
    Entity::from_properties(kind, properties).expect("fixture matches schema")
}

pub fn account_deletion() -> Entity {
    entity(
        EntityKind::AccountDeletion,
        vec![("diaspora_handle", "me@goes.byebye.tld".into())],
    )
}

pub fn like() -> Entity {
    entity(
        EntityKind::Like,
        vec![
            ("positive", true.into()),
            ("guid", GUID.into()),
            ("target_type", "Post".into()),
            ("parent_guid", PARENT_GUID.into()),
            ("parent_author_signature", "cGFyZW50IHNpZw==".into()),
            ("author_signature", "YXV0aG9yIHNpZw==".into()),
            ("diaspora_handle", HANDLE.into()),
        ],
    )
}

pub fn location() -> Entity {
    entity(
        EntityKind::Location,
        vec![
            ("address", "Vienna, Austria".into()),
            ("lat", "48.208174".into()),
            ("lng", "16.373819".into()),
        ],
    )
}

pub fn photo(guid: &str) -> Entity {
    entity(
        EntityKind::Photo,
        vec![
            ("guid", guid.into()),
            ("diaspora_handle", HANDLE.into()),
            ("public", false.into()),
            ("created_at", "2015-03-02T12:34:56Z".into()),
            ("remote_photo_path", "https://pod.example.tld/uploads/images/".into()),
            ("remote_photo_name", "f2a41e9d2db4d9a199c8.jpg".into()),
            ("status_message_guid", GUID.into()),
            ("height", 480.into()),
            ("width", 800.into()),
        ],
    )
}

pub fn status_message() -> Entity {
    entity(
        EntityKind::StatusMessage,
        vec![
            ("raw_message", "I <3 #federation & friends".into()),
            (
                "photos",
                vec![photo("photo0000000000a"), photo("photo0000000000b")].into(),
            ),
            ("location", location().into()),
            ("guid", GUID.into()),
            ("diaspora_handle", HANDLE.into()),
            ("public", true.into()),
            ("created_at", "2015-03-02T12:34:56Z".into()),
        ],
    )
}

pub fn profile() -> Entity {
    entity(
        EntityKind::Profile,
        vec![
            ("diaspora_handle", HANDLE.into()),
            ("first_name", "Alice".into()),
            ("last_name", "Example".into()),
            ("birthday", "1988-07-15".into()),
            ("bio", "likes federated things".into()),
            ("searchable", true.into()),
            ("nsfw", false.into()),
            ("tag_string", "#rust #xml".into()),
        ],
    )
}

pub fn request() -> Entity {
    entity(
        EntityKind::Request,
        vec![
            ("sender_handle", HANDLE.into()),
            ("recipient_handle", "bob@other.example.tld".into()),
        ],
    )
}

pub fn retraction() -> Entity {
    entity(
        EntityKind::Retraction,
        vec![
            ("post_guid", GUID.into()),
            ("diaspora_handle", HANDLE.into()),
            ("type", "Post".into()),
        ],
    )
}
