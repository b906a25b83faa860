//! Where each hCard field lives, per generation of the profile page layout.
//!
//! A [`Convention`] maps fields to [`Locator`]s and names the fields a
//! document laid out that way must carry. Decoding asks the conventions in
//! priority order, field by field, and keeps the first value found.

use std::collections::BTreeMap;
use std::fmt;

use crate::html::{Document, Node};

/// The logical fields of an hCard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HCardField {
    Guid,
    Nickname,
    FullName,
    FirstName,
    LastName,
    Url,
    PhotoLarge,
    PhotoMedium,
    PhotoSmall,
    PublicKey,
    Searchable,
}

impl HCardField {
    pub const ALL: [HCardField; 11] = [
        Self::Guid,
        Self::Nickname,
        Self::FullName,
        Self::FirstName,
        Self::LastName,
        Self::Url,
        Self::PhotoLarge,
        Self::PhotoMedium,
        Self::PhotoSmall,
        Self::PublicKey,
        Self::Searchable,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Guid => "guid",
            Self::Nickname => "nickname",
            Self::FullName => "full_name",
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Url => "url",
            Self::PhotoLarge => "photo_large_url",
            Self::PhotoMedium => "photo_medium_url",
            Self::PhotoSmall => "photo_small_url",
            Self::PublicKey => "public_key",
            Self::Searchable => "searchable",
        }
    }
}

impl fmt::Display for HCardField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Class(&'static str),
    Id(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Read {
    Text,
    Attribute(&'static str),
}

/// Finds one value in a document, CSS-style: an element matching the
/// target, optionally inside an element carrying the scope class.
///
/// Whitespace around the value is trimmed; blank values count as absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locator {
    scope: Option<&'static str>,
    target: Target,
    read: Read,
}

impl Locator {
    /// Text of `.class` inside `.scope`.
    pub const fn text(scope: &'static str, class: &'static str) -> Self {
        Self {
            scope: Some(scope),
            target: Target::Class(class),
            read: Read::Text,
        }
    }

    /// Attribute `attr` of `.class` inside `.scope`.
    pub const fn attribute(scope: &'static str, class: &'static str, attr: &'static str) -> Self {
        Self {
            scope: Some(scope),
            target: Target::Class(class),
            read: Read::Attribute(attr),
        }
    }

    /// Attribute `attr` of `#id`, anywhere in the document.
    pub const fn by_id(id: &'static str, attr: &'static str) -> Self {
        Self {
            scope: None,
            target: Target::Id(id),
            read: Read::Attribute(attr),
        }
    }

    pub fn locate(&self, document: &Document) -> Option<String> {
        let root = document.root();
        match self.scope {
            Some(scope) => root.find_map(&mut |holder| {
                if holder.has_class(scope) {
                    holder.find_map(&mut |node| self.read(node))
                } else {
                    None
                }
            }),
            None => root.find_map(&mut |node| self.read(node)),
        }
    }

    fn read(&self, node: &Node) -> Option<String> {
        let selected = match self.target {
            Target::Class(class) => node.has_class(class),
            Target::Id(id) => node.id() == Some(id),
        };
        if !selected {
            return None;
        }
        let raw = match self.read {
            Read::Text => node.text_content(),
            Read::Attribute(attr) => node.attr(attr)?.to_string(),
        };
        let value = raw.trim();
        (!value.is_empty()).then(|| value.to_string())
    }
}

/// One recognised layout of the profile page.
#[derive(Debug)]
pub struct Convention {
    pub name: &'static str,
    pub locations: &'static [(HCardField, Locator)],
    /// Fields a document in this layout always carries.
    pub required: &'static [HCardField],
}

impl Convention {
    pub fn locator(&self, field: HCardField) -> Option<&Locator> {
        self.locations
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, locator)| locator)
    }

    /// Looks `field` up using this layout only.
    pub fn find(&self, document: &Document, field: HCardField) -> Option<String> {
        self.locator(field)?.locate(document)
    }

    /// Required fields absent from `found`.
    pub fn missing(&self, found: &BTreeMap<HCardField, String>) -> Vec<HCardField> {
        self.required
            .iter()
            .copied()
            .filter(|field| !found.contains_key(field))
            .collect()
    }
}

/// The layout this crate generates.
pub static CURRENT: Convention = Convention {
    name: "current",
    locations: &[
        (HCardField::Guid, Locator::text("entity_uid", "uid")),
        (HCardField::Nickname, Locator::text("entity_nickname", "nickname")),
        (HCardField::FullName, Locator::text("entity_full_name", "fn")),
        (HCardField::Searchable, Locator::text("entity_searchable", "searchable")),
        (HCardField::PublicKey, Locator::text("entity_key", "key")),
        (HCardField::FirstName, Locator::text("entity_first_name", "given_name")),
        (HCardField::LastName, Locator::text("entity_family_name", "family_name")),
        (HCardField::Url, Locator::by_id("pod_location", "href")),
        (HCardField::PhotoLarge, Locator::attribute("entity_photo", "photo", "src")),
        (HCardField::PhotoMedium, Locator::attribute("entity_photo_medium", "photo", "src")),
        (HCardField::PhotoSmall, Locator::attribute("entity_photo_small", "photo", "src")),
    ],
    required: &HCardField::ALL,
};

/// Pages published before the uid and key entries were split out: the uid
/// rides on the nickname link, names sit under `entity_fn` and
/// `entity_given_name`, and there is no public key.
pub static LEGACY: Convention = Convention {
    name: "legacy",
    locations: &[
        (HCardField::Guid, Locator::text("entity_nickname", "uid")),
        (HCardField::Nickname, Locator::text("entity_nickname", "nickname")),
        (HCardField::FullName, Locator::text("entity_fn", "fn")),
        (HCardField::FirstName, Locator::text("entity_given_name", "given_name")),
        (HCardField::LastName, Locator::text("entity_family_name", "family_name")),
        (HCardField::Url, Locator::attribute("entity_url", "url", "href")),
        (HCardField::PhotoLarge, Locator::attribute("entity_photo", "photo", "src")),
        (HCardField::PhotoMedium, Locator::attribute("entity_photo_medium", "photo", "src")),
        (HCardField::PhotoSmall, Locator::attribute("entity_photo_small", "photo", "src")),
        (HCardField::Searchable, Locator::text("entity_searchable", "searchable")),
    ],
    required: &[
        HCardField::Guid,
        HCardField::Nickname,
        HCardField::FullName,
        HCardField::FirstName,
        HCardField::LastName,
        HCardField::Url,
        HCardField::PhotoLarge,
        HCardField::PhotoMedium,
        HCardField::PhotoSmall,
        HCardField::Searchable,
    ],
};

/// Conventions in the order decoding consults them.
pub static CONVENTIONS: &[&Convention] = &[&CURRENT, &LEGACY];
