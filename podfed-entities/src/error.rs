//! Error types for the entity model and XML codec.

use thiserror::Error;

use crate::{EntityKind, PropertyKind};

/// A value did not fit the entity's schema.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntityError {
    #[error("{entity} has no property `{property}`")]
    UnknownProperty { entity: EntityKind, property: String },

    #[error("{entity}.{property} expects a {expected} value")]
    TypeMismatch {
        entity: EntityKind,
        property: &'static str,
        expected: PropertyKind,
    },
}

/// Structurally required data was absent, or the writer failed.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("{entity} is missing required property `{property}`")]
    MissingProperty {
        entity: EntityKind,
        property: &'static str,
    },

    #[error("xml write failed: {0}")]
    Write(String),
}

/// Input could not be interpreted as a well-formed message of the requested type.
///
/// Decoding fails wholesale: no partially materialized entity is returned.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// No root element at all (empty or whitespace-only input).
    #[error("document is empty")]
    Empty,

    #[error("malformed xml: {0}")]
    Malformed(String),

    #[error("expected <{expected}> root element, found <{found}>")]
    UnexpectedRoot { expected: EntityKind, found: String },

    #[error("<{0}> is not a known entity type")]
    UnknownEntity(String),

    #[error("{entity} is missing required property `{property}`")]
    MissingProperty {
        entity: EntityKind,
        property: &'static str,
    },

    #[error("{entity}.{property}: `{value}` is not a valid {expected}")]
    InvalidScalar {
        entity: EntityKind,
        property: &'static str,
        expected: PropertyKind,
        value: String,
    },

    #[error("invalid payload envelope: {0}")]
    InvalidEnvelope(String),
}

/// Codec configuration could not be parsed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid codec configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type EntityResult<T> = Result<T, EntityError>;
pub type EncodeResult<T> = Result<T, EncodeError>;
pub type DecodeResult<T> = Result<T, DecodeError>;
