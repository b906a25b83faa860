use std::borrow::Cow;
use std::collections::BTreeMap;

use podfed_validation::{PropertySource, ValidationReport};

use crate::error::{EntityError, EntityResult};
use crate::{EntityKind, EntitySchema, PropertyDescriptor, Value};

/// A federation message: an entity kind plus the values of its properties.
///
/// Values are checked against the kind's schema when set, so an `Entity`
/// never holds unknown properties or mistyped values. Required properties
/// may be missing while an entity is being built; the codec refuses to
/// encode such an entity and [`Entity::validate`] reports them.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    kind: EntityKind,
    properties: BTreeMap<&'static str, Value>,
}

impl Entity {
    /// An entity of `kind` with no properties set.
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            properties: BTreeMap::new(),
        }
    }

    /// Builds an entity from (name, value) pairs.
    pub fn from_properties<I, K, V>(kind: EntityKind, properties: I) -> EntityResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let mut entity = Self::new(kind);
        for (name, value) in properties {
            entity.set(name.as_ref(), value)?;
        }
        Ok(entity)
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn schema(&self) -> &'static EntitySchema {
        self.kind.schema()
    }

    /// Sets a property, checking it against the schema.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> EntityResult<()> {
        let descriptor = self.descriptor(name)?;
        let value = value.into();
        if !value.fits(descriptor.kind) {
            return Err(EntityError::TypeMismatch {
                entity: self.kind,
                property: descriptor.name,
                expected: descriptor.kind,
            });
        }
        self.properties.insert(descriptor.name, value);
        Ok(())
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> EntityResult<Self> {
        self.set(name, value)?;
        Ok(self)
    }

    /// Stores a value the caller has already matched to its descriptor.
    pub(crate) fn insert(&mut self, name: &'static str, value: Value) {
        self.properties.insert(name, value);
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.properties.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn get_integer(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_integer)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    pub fn get_entity(&self, name: &str) -> Option<&Entity> {
        self.get(name).and_then(Value::as_entity)
    }

    pub fn get_collection(&self, name: &str) -> Option<&[Entity]> {
        self.get(name).and_then(Value::as_collection)
    }

    /// Set properties in schema order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static PropertyDescriptor, &Value)> {
        self.schema()
            .properties
            .iter()
            .filter_map(|p| self.properties.get(p.name).map(|v| (p, v)))
    }

    /// Required properties that are not set, in schema order.
    pub fn missing_required(&self) -> Vec<&'static str> {
        self.schema()
            .required()
            .filter(|p| !self.properties.contains_key(p.name))
            .map(|p| p.name)
            .collect()
    }

    /// Signature-bearing (name, wire value) pairs in schema order.
    ///
    /// This is the payload an external signer signs or verifies; absent
    /// optional properties are skipped.
    pub fn signable_fields(&self) -> Vec<(&'static str, Cow<'_, str>)> {
        self.fields()
            .filter(|(p, _)| p.signed)
            .filter_map(|(p, v)| v.scalar_text().map(|text| (p.name, text)))
            .collect()
    }

    /// Signature-bearing values joined with `;`.
    pub fn signature_data(&self) -> String {
        self.signable_fields()
            .into_iter()
            .map(|(_, v)| v)
            .collect::<Vec<_>>()
            .join(";")
    }

    /// Runs the kind's validator, recursing into nested entities.
    ///
    /// Failures inside nested entities are reported as `location.lat` or
    /// `photos[1].guid`.
    pub fn validate(&self) -> ValidationReport {
        let mut report = self.kind.validator().validate(self);
        for property in self.schema().required() {
            if !self.properties.contains_key(property.name) {
                report.add(property.name, "not_empty");
            }
        }
        for (descriptor, value) in self.fields() {
            match value {
                Value::Entity(nested) => report.merge_nested(descriptor.name, nested.validate()),
                Value::Collection(items) => {
                    for (index, item) in items.iter().enumerate() {
                        let prefix = format!("{}[{index}]", descriptor.name);
                        report.merge_nested(&prefix, item.validate());
                    }
                }
                _ => {}
            }
        }
        report
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_valid()
    }

    fn descriptor(&self, name: &str) -> EntityResult<&'static PropertyDescriptor> {
        self.schema()
            .property(name)
            .ok_or_else(|| EntityError::UnknownProperty {
                entity: self.kind,
                property: name.to_string(),
            })
    }
}

impl PropertySource for Entity {
    fn property_value(&self, name: &str) -> Option<Cow<'_, str>> {
        self.properties.get(name).and_then(Value::scalar_text)
    }
}

/// A fresh random guid accepted by the `guid` rule.
pub fn new_guid() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
