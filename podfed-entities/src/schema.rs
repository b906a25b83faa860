use std::fmt;

use crate::EntityKind;

/// Describes an entity type's ordered property list.
///
/// Both codec directions walk `properties` in order; the order is the
/// element order on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntitySchema {
    pub kind: EntityKind,
    pub properties: &'static [PropertyDescriptor],
}

impl EntitySchema {
    /// Looks up a property by name.
    pub fn property(&self, name: &str) -> Option<&'static PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Required properties, in schema order.
    pub fn required(&self) -> impl Iterator<Item = &'static PropertyDescriptor> {
        self.properties.iter().filter(|p| p.required)
    }

    /// Signature-bearing properties, in schema order.
    pub fn signed(&self) -> impl Iterator<Item = &'static PropertyDescriptor> {
        self.properties.iter().filter(|p| p.signed)
    }
}

/// One property of an entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyDescriptor {
    /// Element name on the wire (lowercase_with_underscores).
    pub name: &'static str,
    pub kind: PropertyKind,
    /// Must be present for the entity to be encoded or decoded.
    pub required: bool,
    /// Included in the payload an external signer signs.
    pub signed: bool,
}

impl PropertyDescriptor {
    const fn simple(name: &'static str, kind: PropertyKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            signed: false,
        }
    }

    /// Shorthand for an optional string property.
    pub const fn string(name: &'static str) -> Self {
        Self::simple(name, PropertyKind::String)
    }

    /// Shorthand for an optional integer property.
    pub const fn integer(name: &'static str) -> Self {
        Self::simple(name, PropertyKind::Integer)
    }

    /// Shorthand for an optional boolean property.
    pub const fn boolean(name: &'static str) -> Self {
        Self::simple(name, PropertyKind::Boolean)
    }

    /// Shorthand for an optional nested entity.
    pub const fn entity(name: &'static str, kind: EntityKind) -> Self {
        Self::simple(name, PropertyKind::Entity(kind))
    }

    /// Shorthand for an optional collection of nested entities.
    pub const fn collection(name: &'static str, kind: EntityKind) -> Self {
        Self::simple(name, PropertyKind::Collection(kind))
    }

    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    pub const fn signed(self) -> Self {
        Self {
            signed: true,
            ..self
        }
    }

    /// True for string, integer and boolean properties.
    pub const fn is_scalar(&self) -> bool {
        matches!(
            self.kind,
            PropertyKind::String | PropertyKind::Integer | PropertyKind::Boolean
        )
    }
}

/// The shape of a property value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    String,
    Integer,
    Boolean,
    /// A single owned nested entity.
    Entity(EntityKind),
    /// An ordered list of nested entities, wrapped in one container element.
    Collection(EntityKind),
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::Integer => f.write_str("integer"),
            Self::Boolean => f.write_str("boolean"),
            Self::Entity(kind) => write!(f, "{kind}"),
            Self::Collection(kind) => write!(f, "list of {kind}"),
        }
    }
}
