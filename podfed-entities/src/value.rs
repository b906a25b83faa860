use std::borrow::Cow;

use crate::{Entity, PropertyKind};

/// A property value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Boolean(bool),
    Entity(Box<Entity>),
    Collection(Vec<Entity>),
}

impl Value {
    /// The wire form of a scalar; `None` for nested entities and collections.
    pub fn scalar_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::String(s) => Some(Cow::Borrowed(s)),
            Self::Integer(i) => Some(Cow::Owned(i.to_string())),
            Self::Boolean(b) => Some(Cow::Borrowed(bool_literal(*b))),
            Self::Entity(_) | Self::Collection(_) => None,
        }
    }

    /// Returns true if this value can be stored in a property of `kind`.
    pub fn fits(&self, kind: PropertyKind) -> bool {
        match (self, kind) {
            (Self::String(_), PropertyKind::String)
            | (Self::Integer(_), PropertyKind::Integer)
            | (Self::Boolean(_), PropertyKind::Boolean) => true,
            (Self::Entity(e), PropertyKind::Entity(k)) => e.kind() == k,
            (Self::Collection(items), PropertyKind::Collection(k)) => {
                items.iter().all(|e| e.kind() == k)
            }
            _ => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_entity(&self) -> Option<&Entity> {
        match self {
            Self::Entity(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_collection(&self) -> Option<&[Entity]> {
        match self {
            Self::Collection(items) => Some(items),
            _ => None,
        }
    }
}

/// Canonical boolean literals on the wire.
pub(crate) fn bool_literal(b: bool) -> &'static str {
    if b { "true" } else { "false" }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Integer(i64::from(i))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<Entity> for Value {
    fn from(e: Entity) -> Self {
        Self::Entity(Box::new(e))
    }
}

impl From<Vec<Entity>> for Value {
    fn from(items: Vec<Entity>) -> Self {
        Self::Collection(items)
    }
}
