//! The `<XML><post>…</post></XML>` envelope entities travel in.

use quick_xml::events::{BytesEnd, BytesStart, Event};

use crate::error::{DecodeError, DecodeResult, EncodeResult};
use crate::xml::{self, XmlCodec};
use crate::Entity;

const ROOT: &str = "XML";
const POST: &str = "post";

/// Wraps `entity` in the payload envelope using the default codec.
pub fn pack(entity: &Entity) -> EncodeResult<String> {
    pack_with(&XmlCodec::new(), entity)
}

/// Wraps `entity` in the payload envelope, honoring the codec's indent
/// and declaration settings.
pub fn pack_with(codec: &XmlCodec, entity: &Entity) -> EncodeResult<String> {
    let mut writer = codec.start_document()?;
    xml::emit(&mut writer, Event::Start(BytesStart::new(ROOT)))?;
    xml::emit(&mut writer, Event::Start(BytesStart::new(POST)))?;
    xml::write_entity(&mut writer, entity.kind().element_name(), entity)?;
    xml::emit(&mut writer, Event::End(BytesEnd::new(POST)))?;
    xml::emit(&mut writer, Event::End(BytesEnd::new(ROOT)))?;
    xml::finish(writer)
}

/// Unwraps the envelope and decodes the entity inside.
pub fn unpack(payload: &str) -> DecodeResult<Entity> {
    let root = xml::parse_document(payload)?;
    if root.name != ROOT {
        return Err(DecodeError::InvalidEnvelope(format!(
            "expected <{ROOT}> root, found <{}>",
            root.name
        )));
    }
    let post = root
        .child(POST)
        .ok_or_else(|| DecodeError::InvalidEnvelope(format!("missing <{POST}> element")))?;
    let inner = post
        .children
        .first()
        .ok_or_else(|| DecodeError::InvalidEnvelope(format!("<{POST}> is empty")))?;
    xml::decode_root(inner)
}
