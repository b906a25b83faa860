//! The closed set of federation entity types and their schemas.

use std::fmt;

use crate::schema::{EntitySchema, PropertyDescriptor as P};

/// Every entity type this layer can model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    AccountDeletion,
    Like,
    Location,
    Photo,
    Profile,
    Request,
    Retraction,
    StatusMessage,
}

impl EntityKind {
    pub const ALL: [EntityKind; 8] = [
        Self::AccountDeletion,
        Self::Like,
        Self::Location,
        Self::Photo,
        Self::Profile,
        Self::Request,
        Self::Retraction,
        Self::StatusMessage,
    ];

    /// Root element name of this entity type.
    pub const fn element_name(self) -> &'static str {
        match self {
            Self::AccountDeletion => "account_deletion",
            Self::Like => "like",
            Self::Location => "location",
            Self::Photo => "photo",
            Self::Profile => "profile",
            Self::Request => "request",
            Self::Retraction => "retraction",
            Self::StatusMessage => "status_message",
        }
    }

    /// Resolves a root element name.
    pub fn from_element_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.element_name() == name)
    }

    pub fn schema(self) -> &'static EntitySchema {
        match self {
            Self::AccountDeletion => &ACCOUNT_DELETION,
            Self::Like => &LIKE,
            Self::Location => &LOCATION,
            Self::Photo => &PHOTO,
            Self::Profile => &PROFILE,
            Self::Request => &REQUEST,
            Self::Retraction => &RETRACTION,
            Self::StatusMessage => &STATUS_MESSAGE,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_name())
    }
}

// ── Schemas ──────────────────────────────────────────────────────

static ACCOUNT_DELETION: EntitySchema = EntitySchema {
    kind: EntityKind::AccountDeletion,
    properties: &[P::string("diaspora_handle").required().signed()],
};

static LIKE: EntitySchema = EntitySchema {
    kind: EntityKind::Like,
    properties: &[
        P::boolean("positive").required().signed(),
        P::string("guid").required().signed(),
        P::string("target_type").required().signed(),
        P::string("parent_guid").required().signed(),
        P::string("parent_author_signature"),
        P::string("author_signature"),
        P::string("diaspora_handle").required().signed(),
    ],
};

static LOCATION: EntitySchema = EntitySchema {
    kind: EntityKind::Location,
    properties: &[
        P::string("address").required(),
        P::string("lat").required(),
        P::string("lng").required(),
    ],
};

static PHOTO: EntitySchema = EntitySchema {
    kind: EntityKind::Photo,
    properties: &[
        P::string("guid").required(),
        P::string("diaspora_handle").required(),
        P::boolean("public").required(),
        P::string("created_at").required(),
        P::string("remote_photo_path").required(),
        P::string("remote_photo_name").required(),
        P::string("text"),
        P::string("status_message_guid").required(),
        P::integer("height").required(),
        P::integer("width").required(),
    ],
};

static PROFILE: EntitySchema = EntitySchema {
    kind: EntityKind::Profile,
    properties: &[
        P::string("diaspora_handle").required(),
        P::string("first_name"),
        P::string("last_name"),
        P::string("image_url"),
        P::string("image_url_medium"),
        P::string("image_url_small"),
        P::string("birthday"),
        P::string("gender"),
        P::string("bio"),
        P::string("location"),
        P::boolean("searchable").required(),
        P::boolean("nsfw"),
        P::string("tag_string"),
    ],
};

static REQUEST: EntitySchema = EntitySchema {
    kind: EntityKind::Request,
    properties: &[
        P::string("sender_handle").required().signed(),
        P::string("recipient_handle").required().signed(),
    ],
};

static RETRACTION: EntitySchema = EntitySchema {
    kind: EntityKind::Retraction,
    properties: &[
        P::string("post_guid").required().signed(),
        P::string("diaspora_handle").required().signed(),
        P::string("type").required().signed(),
    ],
};

static STATUS_MESSAGE: EntitySchema = EntitySchema {
    kind: EntityKind::StatusMessage,
    properties: &[
        P::string("raw_message").required(),
        P::collection("photos", EntityKind::Photo),
        P::entity("location", EntityKind::Location),
        P::string("guid").required(),
        P::string("diaspora_handle").required(),
        P::boolean("public").required(),
        P::string("created_at").required(),
        P::string("provider_display_name"),
    ],
};
