//! Generic XML tree
//!
//! Converts an XML document into a nested mapping: attributes become `@name`
//! keys, text next to child elements becomes `#text`, and repeated sibling
//! elements collapse into a list. A single occurrence stays
//! scalar, so callers that expect "zero, one or many" go through [`XmlValue::as_list`].

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{ConvertError, Result};

/// A node of the parsed XML tree.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlValue {
    /// An element with no attributes, no children and no text.
    Null,
    /// A leaf element holding only text.
    Text(String),
    /// An element with attributes or children, in document order.
    Map(Vec<(String, XmlValue)>),
    /// Repeated sibling elements sharing a name.
    List(Vec<XmlValue>),
}

impl XmlValue {
    /// Look up a child by key. Only maps have children.
    pub fn get(&self, key: &str) -> Option<&XmlValue> {
        match self {
            XmlValue::Map(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Text content of a leaf, or the `#text` of an element with attributes.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            XmlValue::Text(text) => Some(text),
            XmlValue::Map(_) => self.get("#text").and_then(XmlValue::as_text),
            _ => None,
        }
    }

    /// True for `Null`, empty text and maps or lists without entries.
    pub fn is_empty(&self) -> bool {
        match self {
            XmlValue::Null => true,
            XmlValue::Text(text) => text.is_empty(),
            XmlValue::Map(entries) => entries.is_empty(),
            XmlValue::List(items) => items.is_empty(),
        }
    }

    /// View the node as an ordered sequence: `Null` is empty, a list yields its
    /// items and any other node is a sequence of one.
    pub fn as_list(&self) -> Vec<&XmlValue> {
        match self {
            XmlValue::Null => Vec::new(),
            XmlValue::List(items) => items.iter().collect(),
            other => vec![other],
        }
    }
}

// An element whose closing tag has not been read yet
struct OpenElement {
    name: String,
    entries: Vec<(String, XmlValue)>,
    text: String,
}

impl OpenElement {
    fn open(start: &BytesStart) -> Result<Self> {
        let name = decode_name(start.name().as_ref())?;
        let mut entries = Vec::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(quick_xml::Error::from)?;
            let key = decode_name(attribute.key.as_ref())?;
            let value = attribute.unescape_value()?.into_owned();
            entries.push((format!("@{}", key), XmlValue::Text(value)));
        }
        Ok(Self {
            name,
            entries,
            text: String::new(),
        })
    }

    fn insert(&mut self, key: String, value: XmlValue) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, XmlValue::List(items))) => items.push(value),
            Some((_, existing)) => {
                let first = std::mem::replace(existing, XmlValue::Null);
                *existing = XmlValue::List(vec![first, value]);
            }
            None => self.entries.push((key, value)),
        }
    }

    fn finish(mut self) -> (String, XmlValue) {
        let text = self.text.trim().to_string();
        if self.entries.is_empty() {
            let value = if text.is_empty() {
                XmlValue::Null
            } else {
                XmlValue::Text(text)
            };
            return (self.name, value);
        }
        if !text.is_empty() {
            self.insert("#text".to_string(), XmlValue::Text(text));
        }
        (self.name, XmlValue::Map(self.entries))
    }
}

fn decode_name(bytes: &[u8]) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| ConvertError::MalformedXml(format!("element name is not UTF-8: {}", e)))
}

/// Parse XML text into a one-key map `{root_name: root_value}`.
pub fn parse(xml: &str) -> Result<XmlValue> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<OpenElement> = Vec::new();
    let mut root: Option<(String, XmlValue)> = None;

    let mut close = |element: OpenElement, stack: &mut Vec<OpenElement>| -> Result<()> {
        let (name, value) = element.finish();
        match stack.last_mut() {
            Some(parent) => parent.insert(name, value),
            None if root.is_none() => root = Some((name, value)),
            None => {
                return Err(ConvertError::MalformedXml(format!(
                    "multiple root elements, second one is `{}`",
                    name
                )))
            }
        }
        Ok(())
    };

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(OpenElement::open(&start)?),
            Event::Empty(start) => {
                let element = OpenElement::open(&start)?;
                close(element, &mut stack)?;
            }
            Event::End(_) => {
                let element = stack.pop().ok_or_else(|| {
                    ConvertError::MalformedXml("closing tag without an open element".to_string())
                })?;
                close(element, &mut stack)?;
            }
            Event::Text(text) => {
                if let Some(element) = stack.last_mut() {
                    element.text.push_str(&text.unescape()?);
                }
            }
            Event::CData(data) => {
                if let Some(element) = stack.last_mut() {
                    element
                        .text
                        .push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(element) = stack.last() {
        return Err(ConvertError::MalformedXml(format!(
            "element `{}` is never closed",
            element.name
        )));
    }

    let (name, value) =
        root.ok_or_else(|| ConvertError::MalformedXml("document has no root element".to_string()))?;
    Ok(XmlValue::Map(vec![(name, value)]))
}
