//! Tolerant HTML tree for microformat lookups.
//!
//! Built on quick-xml's tokenizer with the leniency real profile pages need:
//! void elements need no closing tag, mismatched and stray closing tags are
//! absorbed, unquoted and valueless attributes are accepted, and entities
//! quick-xml does not know are kept as written.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::debug;

use crate::error::{HCardError, HCardResult};

const DOCUMENT: &str = "#document";

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// A parsed HTML document.
#[derive(Debug)]
pub struct Document {
    root: Node,
}

impl Document {
    /// Parses `html`. Fails with [`HCardError::NotADocument`] when the input
    /// holds no element at all.
    pub fn parse(html: &str) -> HCardResult<Self> {
        if html.trim().is_empty() {
            return Err(HCardError::NotADocument("input is empty".into()));
        }
        let root = build(html);
        if root.elements().next().is_none() {
            return Err(HCardError::NotADocument("input contains no markup".into()));
        }
        Ok(Self { root })
    }

    pub(crate) fn root(&self) -> &Node {
        &self.root
    }
}

#[derive(Debug, Default)]
pub(crate) struct Node {
    pub(crate) name: String,
    attributes: Vec<(String, String)>,
    content: Vec<Content>,
}

/// One piece of an element's content, kept in document order.
#[derive(Debug)]
enum Content {
    Text(String),
    Element(Node),
}

impl Node {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    fn open(start: &BytesStart<'_>) -> Self {
        let attributes = start
            .html_attributes()
            .filter_map(Result::ok)
            .map(|attr| {
                let key = lowercase(attr.key.as_ref());
                let value = match attr.unescape_value() {
                    Ok(value) => value.into_owned(),
                    Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
                };
                (key, value)
            })
            .collect();
        Self {
            name: lowercase(start.name().as_ref()),
            attributes,
            ..Self::default()
        }
    }

    pub(crate) fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub(crate) fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    pub(crate) fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_ascii_whitespace().any(|c| c == class))
    }

    /// Child elements, skipping text.
    fn elements(&self) -> impl Iterator<Item = &Node> {
        self.content.iter().filter_map(|content| match content {
            Content::Element(node) => Some(node),
            Content::Text(_) => None,
        })
    }

    /// Text of this element and all its descendants, in document order.
    pub(crate) fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for content in &self.content {
            match content {
                Content::Text(text) => out.push_str(text),
                Content::Element(node) => node.collect_text(out),
            }
        }
    }

    fn push_text(&mut self, text: &str) {
        match self.content.last_mut() {
            Some(Content::Text(open)) => open.push_str(text),
            _ => self.content.push(Content::Text(text.to_string())),
        }
    }

    /// Depth-first, document-order search; returns the first `Some`.
    pub(crate) fn find_map<'a, T>(
        &'a self,
        f: &mut dyn FnMut(&'a Node) -> Option<T>,
    ) -> Option<T> {
        if let Some(found) = f(self) {
            return Some(found);
        }
        for child in self.elements() {
            if let Some(found) = child.find_map(f) {
                return Some(found);
            }
        }
        None
    }
}

fn lowercase(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).to_ascii_lowercase()
}

fn build(html: &str) -> Node {
    let mut reader = Reader::from_str(html);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.check_comments = false;

    let mut stack = vec![Node::named(DOCUMENT)];
    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                let node = Node::open(&start);
                if VOID_ELEMENTS.contains(&node.name.as_str()) {
                    attach(&mut stack, node);
                } else {
                    stack.push(node);
                }
            }
            Ok(Event::Empty(start)) => attach(&mut stack, Node::open(&start)),
            Ok(Event::End(end)) => close(&mut stack, &lowercase(end.name().as_ref())),
            Ok(Event::Text(text)) => {
                if let Some(open) = stack.last_mut() {
                    match text.unescape() {
                        Ok(unescaped) => open.push_text(&unescaped),
                        Err(_) => open.push_text(&String::from_utf8_lossy(&text)),
                    }
                }
            }
            Ok(Event::CData(data)) => {
                if let Some(open) = stack.last_mut() {
                    open.push_text(&String::from_utf8_lossy(&data));
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                debug!(
                    position = reader.buffer_position(),
                    error = %e,
                    "Stopping at unreadable markup"
                );
                break;
            }
        }
    }

    while stack.len() > 1 {
        if let Some(node) = stack.pop() {
            attach(&mut stack, node);
        }
    }
    stack.pop().unwrap_or_else(|| Node::named(DOCUMENT))
}

fn attach(stack: &mut [Node], node: Node) {
    if let Some(parent) = stack.last_mut() {
        parent.content.push(Content::Element(node));
    }
}

/// Closes the innermost open `name`, implicitly closing anything opened
/// after it. A closing tag with no open counterpart is dropped.
fn close(stack: &mut Vec<Node>, name: &str) {
    let Some(index) = stack.iter().rposition(|node| node.name == name) else {
        return;
    };
    while stack.len() > index.max(1) {
        if let Some(node) = stack.pop() {
            attach(stack, node);
        }
    }
}
