//! Federation entity model.
//!
//! Defines the messages pods exchange and their wire form:
//! - [`EntityKind`]: the closed set of entity types, each with a schema and a validator
//! - [`EntitySchema`]: ordered property descriptors consulted by both codec directions
//! - [`Entity`] / [`Value`]: schema-checked property values, nestable
//! - [`XmlCodec`]: entity ⇄ XML, configured by [`XmlConfig`]
//! - [`payload`]: the `<XML><post>` envelope
//!
//! Validation and encoding are separate steps: callers run
//! [`Entity::validate`] before handing an entity to the codec, and run it
//! again on decoded entities before accepting them. Signing is external;
//! [`Entity::signable_fields`] exposes the signature-bearing payload.

mod entity;
mod error;
mod kind;
pub mod payload;
mod schema;
mod validators;
mod value;
mod xml;

pub use entity::{Entity, new_guid};
pub use error::{
    ConfigError, DecodeError, DecodeResult, EncodeError, EncodeResult, EntityError, EntityResult,
};
pub use kind::EntityKind;
pub use schema::{EntitySchema, PropertyDescriptor, PropertyKind};
pub use validators::{MAX_NAME_LENGTH, MAX_PROFILE_TAGS};
pub use value::Value;
pub use xml::{XmlCodec, XmlConfig};

pub use podfed_validation::ValidationReport;
