//! Entity ⇄ XML codec driven by [`EntitySchema`](crate::EntitySchema).
//!
//! Wire shape:
//! - one root element per entity, named after the entity kind
//! - one child per set property, in schema order
//! - scalars as element text (`true`/`false` for booleans)
//! - a nested entity as an element named after the property
//! - a collection as a wrapper named after the property, holding one
//!   element per member named after the member's kind
//!
//! Decoding ignores elements the schema does not name.

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, DecodeError, DecodeResult, EncodeError, EncodeResult};
use crate::{Entity, EntityKind, PropertyKind, Value};

/// Output formatting for [`XmlCodec`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct XmlConfig {
    /// Spaces per nesting level; `0` writes everything on one line.
    pub indent: usize,
    /// Emit an `<?xml ...?>` declaration before the root element.
    pub declaration: bool,
}

impl Default for XmlConfig {
    fn default() -> Self {
        Self {
            indent: 2,
            declaration: false,
        }
    }
}

impl XmlConfig {
    /// Parses a configuration from TOML; missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }
}

/// Encodes and decodes entities.
#[derive(Debug, Clone, Default)]
pub struct XmlCodec {
    config: XmlConfig,
}

impl XmlCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: XmlConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &XmlConfig {
        &self.config
    }

    /// Encodes `entity` as a standalone document.
    ///
    /// Content rules are not consulted; validate first. Fails only when a
    /// required property (at any depth) is unset.
    pub fn encode(&self, entity: &Entity) -> EncodeResult<String> {
        let mut writer = self.start_document()?;
        write_entity(&mut writer, entity.kind().element_name(), entity)?;
        finish(writer)
    }

    /// Decodes a document whose root must be `kind`.
    pub fn decode(&self, kind: EntityKind, xml: &str) -> DecodeResult<Entity> {
        let root = parse_document(xml)?;
        if root.name != kind.element_name() {
            return Err(DecodeError::UnexpectedRoot {
                expected: kind,
                found: root.name,
            });
        }
        decode_entity(kind, &root)
    }

    /// Decodes a document, choosing the kind from its root element.
    pub fn decode_any(&self, xml: &str) -> DecodeResult<Entity> {
        let root = parse_document(xml)?;
        decode_root(&root)
    }

    /// A writer with the configured indentation, the declaration already
    /// written when enabled.
    pub(crate) fn start_document(&self) -> EncodeResult<Writer<Vec<u8>>> {
        let mut writer = if self.config.indent == 0 {
            Writer::new(Vec::new())
        } else {
            Writer::new_with_indent(Vec::new(), b' ', self.config.indent)
        };
        if self.config.declaration {
            emit(
                &mut writer,
                Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
            )?;
        }
        Ok(writer)
    }
}

impl Entity {
    /// Encodes with the default [`XmlConfig`].
    pub fn to_xml(&self) -> EncodeResult<String> {
        XmlCodec::new().encode(self)
    }

    /// Decodes a `kind` document.
    pub fn from_xml(kind: EntityKind, xml: &str) -> DecodeResult<Self> {
        XmlCodec::new().decode(kind, xml)
    }
}

// ── Encoding ─────────────────────────────────────────────────────

pub(crate) fn emit<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> EncodeResult<()> {
    writer
        .write_event(event)
        .map_err(|e| EncodeError::Write(e.to_string()))
}

pub(crate) fn finish(writer: Writer<Vec<u8>>) -> EncodeResult<String> {
    String::from_utf8(writer.into_inner()).map_err(|e| EncodeError::Write(e.to_string()))
}

pub(crate) fn write_entity<W: Write>(
    writer: &mut Writer<W>,
    element: &str,
    entity: &Entity,
) -> EncodeResult<()> {
    if let Some(&property) = entity.missing_required().first() {
        return Err(EncodeError::MissingProperty {
            entity: entity.kind(),
            property,
        });
    }

    emit(writer, Event::Start(BytesStart::new(element)))?;
    for (descriptor, value) in entity.fields() {
        match value {
            Value::Entity(nested) => write_entity(writer, descriptor.name, nested)?,
            Value::Collection(items) if items.is_empty() => {
                emit(writer, Event::Empty(BytesStart::new(descriptor.name)))?;
            }
            Value::Collection(items) => {
                emit(writer, Event::Start(BytesStart::new(descriptor.name)))?;
                for item in items {
                    write_entity(writer, item.kind().element_name(), item)?;
                }
                emit(writer, Event::End(BytesEnd::new(descriptor.name)))?;
            }
            scalar => {
                let text = scalar.scalar_text().unwrap_or_default();
                emit(writer, Event::Start(BytesStart::new(descriptor.name)))?;
                emit(writer, Event::Text(BytesText::new(&text)))?;
                emit(writer, Event::End(BytesEnd::new(descriptor.name)))?;
            }
        }
    }
    emit(writer, Event::End(BytesEnd::new(element)))
}

// ── Decoding ─────────────────────────────────────────────────────

/// A parsed element: name, concatenated text content, child elements.
#[derive(Debug, Default)]
pub(crate) struct Element {
    pub(crate) name: String,
    pub(crate) text: String,
    pub(crate) children: Vec<Element>,
}

impl Element {
    fn new(name: String) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    pub(crate) fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }
}

fn malformed(e: impl std::fmt::Display) -> DecodeError {
    DecodeError::Malformed(e.to_string())
}

fn element_name(start: &BytesStart<'_>) -> DecodeResult<String> {
    std::str::from_utf8(start.name().as_ref())
        .map(str::to_string)
        .map_err(malformed)
}

/// Parses `xml` into a tree, requiring exactly one root element.
pub(crate) fn parse_document(xml: &str) -> DecodeResult<Element> {
    let mut reader = quick_xml::Reader::from_str(xml);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Start(start) => stack.push(Element::new(element_name(&start)?)),
            Event::Empty(start) => {
                let element = Element::new(element_name(&start)?);
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| malformed("unexpected closing tag"))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => match stack.last_mut() {
                Some(open) => open.text.push_str(&text.unescape().map_err(malformed)?),
                None if text.iter().all(u8::is_ascii_whitespace) => {}
                None => return Err(malformed("text outside the root element")),
            },
            Event::CData(data) => {
                if let Some(open) = stack.last_mut() {
                    open.text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(malformed("unexpected end of document"));
    }
    root.ok_or(DecodeError::Empty)
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> DecodeResult<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(malformed("more than one root element")),
    }
    Ok(())
}

pub(crate) fn decode_root(root: &Element) -> DecodeResult<Entity> {
    let kind = EntityKind::from_element_name(&root.name)
        .ok_or_else(|| DecodeError::UnknownEntity(root.name.clone()))?;
    decode_entity(kind, root)
}

fn decode_entity(kind: EntityKind, element: &Element) -> DecodeResult<Entity> {
    let schema = kind.schema();
    let mut entity = Entity::new(kind);

    for child in &element.children {
        if schema.property(&child.name).is_none() {
            debug!(entity = %kind, element = %child.name, "Ignoring unknown element");
        }
    }

    for descriptor in schema.properties {
        let Some(child) = element.child(descriptor.name) else {
            if descriptor.required {
                return Err(DecodeError::MissingProperty {
                    entity: kind,
                    property: descriptor.name,
                });
            }
            continue;
        };

        let invalid = || DecodeError::InvalidScalar {
            entity: kind,
            property: descriptor.name,
            expected: descriptor.kind,
            value: child.text.clone(),
        };

        let value = match descriptor.kind {
            PropertyKind::String => Value::String(child.text.clone()),
            PropertyKind::Integer => Value::Integer(child.text.parse().map_err(|_| invalid())?),
            PropertyKind::Boolean => match child.text.as_str() {
                "true" => Value::Boolean(true),
                "false" => Value::Boolean(false),
                _ => return Err(invalid()),
            },
            PropertyKind::Entity(nested) => Value::from(decode_entity(nested, child)?),
            PropertyKind::Collection(member) => {
                let mut items = Vec::new();
                for item in &child.children {
                    if item.name == member.element_name() {
                        items.push(decode_entity(member, item)?);
                    } else {
                        debug!(entity = %kind, element = %item.name, "Ignoring unknown collection member");
                    }
                }
                Value::Collection(items)
            }
        };
        entity.insert(descriptor.name, value);
    }

    Ok(entity)
}
