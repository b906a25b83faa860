//! Built-in validators, one per entity kind.

use std::sync::LazyLock;

use podfed_validation::{Format, Length, Regex, Rule, TagCount, Validator, ValidatorBuilder};

use crate::EntityKind;

/// Longest first/last name a profile may carry.
pub const MAX_NAME_LENGTH: usize = 32;

/// Most `#tags` a profile's tag string may carry.
pub const MAX_PROFILE_TAGS: usize = 5;

// Declarations below are static; `every_kind_has_a_validator` builds them all.
fn declare(builder: ValidatorBuilder<'static>) -> Validator {
    builder
        .build()
        .expect("built-in validator declarations are well-formed")
}

fn pattern(source: &str) -> Regex {
    Regex::new(source).expect("built-in validator pattern")
}

static ACCOUNT_DELETION: LazyLock<Validator> =
    LazyLock::new(|| declare(Validator::builder().rule("diaspora_handle", Rule::DiasporaId)));

static LIKE: LazyLock<Validator> = LazyLock::new(|| {
    declare(
        Validator::builder()
            .rule("positive", Rule::Boolean)
            .rule("guid", Rule::Guid)
            .rule("target_type", Rule::NotEmpty)
            .rule("parent_guid", Rule::Guid)
            .rule("parent_author_signature", Rule::NotEmpty)
            .rule("author_signature", Rule::NotEmpty)
            .rule("diaspora_handle", Rule::DiasporaId),
    )
});

static LOCATION: LazyLock<Validator> = LazyLock::new(|| {
    declare(
        Validator::builder()
            .rule("address", Rule::NotEmpty)
            .rule("lat", Rule::Numeric)
            .rule("lng", Rule::Numeric),
    )
});

static PHOTO: LazyLock<Validator> = LazyLock::new(|| {
    declare(
        Validator::builder()
            .rule("guid", Rule::Guid)
            .rule("diaspora_handle", Rule::DiasporaId)
            .rule("public", Rule::Boolean)
            .rule("created_at", Rule::NotEmpty)
            .rule("remote_photo_path", Rule::NotEmpty)
            .rule("remote_photo_name", Rule::NotEmpty)
            .rule("status_message_guid", Rule::Guid)
            .rule("height", Rule::Numeric)
            .rule("width", Rule::Numeric),
    )
});

static PROFILE: LazyLock<Validator> = LazyLock::new(|| {
    let name_rules = |builder: ValidatorBuilder<'static>, property: &str| {
        builder
            .rule(property, Length::maximum(MAX_NAME_LENGTH))
            .rule(property, Format::without(pattern("[;]")))
    };
    let builder = Validator::builder().rule("diaspora_handle", Rule::DiasporaId);
    let builder = name_rules(builder, "first_name");
    let builder = name_rules(builder, "last_name");
    declare(
        builder
            .rule(
                "birthday",
                Format::with(pattern(r"^\d{4}-\d{2}-\d{2}$")).allow_blank(true),
            )
            .rule("gender", Length::maximum(255))
            .rule("bio", Length::maximum(65_535))
            .rule("location", Length::maximum(255))
            .rule("searchable", Rule::Boolean)
            .rule("tag_string", TagCount::new(MAX_PROFILE_TAGS)),
    )
});

static REQUEST: LazyLock<Validator> = LazyLock::new(|| {
    declare(
        Validator::builder()
            .rule("sender_handle", Rule::DiasporaId)
            .rule("recipient_handle", Rule::DiasporaId),
    )
});

static RETRACTION: LazyLock<Validator> = LazyLock::new(|| {
    declare(
        Validator::builder()
            .rule("post_guid", Rule::Guid)
            .rule("diaspora_handle", Rule::DiasporaId)
            .rule("type", Rule::NotEmpty),
    )
});

static STATUS_MESSAGE: LazyLock<Validator> = LazyLock::new(|| {
    declare(
        Validator::builder()
            .rule("guid", Rule::Guid)
            .rule("diaspora_handle", Rule::DiasporaId)
            .rule("public", Rule::Boolean)
            .rule("created_at", Rule::NotEmpty)
            .rule("provider_display_name", Length::maximum(255)),
    )
});

impl EntityKind {
    /// The built-in validator for this kind.
    pub fn validator(self) -> &'static Validator {
        match self {
            Self::AccountDeletion => &*ACCOUNT_DELETION,
            Self::Like => &*LIKE,
            Self::Location => &*LOCATION,
            Self::Photo => &*PHOTO,
            Self::Profile => &*PROFILE,
            Self::Request => &*REQUEST,
            Self::Retraction => &*RETRACTION,
            Self::StatusMessage => &*STATUS_MESSAGE,
        }
    }
}
