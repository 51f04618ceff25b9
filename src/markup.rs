//! Generic element tree for the markup payloads
//!
//! Notes and feature blocks carry small XML documents. They are first read into an
//! [`Element`] tree that only knows about names, attributes and child nodes, and the
//! block decoders then map that tree onto the record model.

use std::fmt::Write;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{FormatError, Result};

/// A node in the element tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Character data with entities already resolved
    Text(String),
    CData(String),
}

/// A markup element with its attributes and children in document order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}
impl Element {
    /// Reads a complete document into a tree and returns its root element.
    ///
    /// The document must be UTF-8, have balanced tags and exactly one root element.
    /// Declarations, comments and processing instructions are dropped.
    pub fn parse(payload: &[u8]) -> Result<Self> {
        let source = std::str::from_utf8(payload).map_err(|_| FormatError::NonUtf8Markup)?;
        let mut reader = Reader::from_str(source);
        let mut tree = TreeBuilder::default();
        loop {
            match reader.read_event().map_err(FormatError::from)? {
                Event::Start(start) => tree.open(Self::from_start(&start)?),
                Event::Empty(start) => tree.attach(Self::from_start(&start)?)?,
                Event::End(_) => tree.close()?,
                Event::Text(text) => {
                    let text = text.unescape().map_err(FormatError::from)?;
                    tree.text(Node::Text(text.into_owned()))?;
                }
                Event::CData(cdata) => {
                    let text =
                        std::str::from_utf8(&cdata).map_err(|_| FormatError::NonUtf8Markup)?;
                    tree.text(Node::CData(text.to_string()))?;
                }
                Event::Eof => break,
                _ => {}
            }
        }
        tree.finish()
    }

    fn from_start(start: &BytesStart) -> Result<Self> {
        let name = utf8(start.local_name().as_ref())?;
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(FormatError::from)?;
            let key = utf8(attr.key.local_name().as_ref())?;
            let value = attr.unescape_value().map_err(FormatError::from)?;
            attributes.push((key, value.into_owned()));
        }
        Ok(Self {
            name,
            attributes,
            children: Vec::new(),
        })
    }

    /// Returns the value of an attribute, if present
    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates over the direct child elements
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    /// Iterates over the direct child elements with the given name
    pub fn elements_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.elements().filter(move |element| element.name == name)
    }

    /// Concatenates the element's content into a single string.
    ///
    /// Text and CDATA are taken as-is. Nested elements are written back out as markup
    /// rather than interpreted.
    #[must_use]
    pub fn inner_text(&self) -> String {
        let mut buffer = String::new();
        self.write_children(&mut buffer);
        buffer
    }

    fn write_children(&self, buffer: &mut String) {
        for node in &self.children {
            match node {
                Node::Text(text) | Node::CData(text) => buffer.push_str(text),
                Node::Element(element) => element.write_markup(buffer),
            }
        }
    }

    fn write_markup(&self, buffer: &mut String) {
        buffer.push('<');
        buffer.push_str(&self.name);
        for (key, value) in &self.attributes {
            // writing into a String cannot fail
            let _ = write!(buffer, " {key}=\"{}\"", quick_xml::escape::escape(value.as_str()));
        }
        if self.children.is_empty() {
            buffer.push_str("/>");
            return;
        }
        buffer.push('>');
        self.write_children(buffer);
        buffer.push_str("</");
        buffer.push_str(&self.name);
        buffer.push('>');
    }
}

fn utf8(bytes: &[u8]) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|_| FormatError::NonUtf8Markup.into())
}

/// Stack of open elements while a document is being read
#[derive(Default)]
struct TreeBuilder {
    open: Vec<Element>,
    root: Option<Element>,
}
impl TreeBuilder {
    fn open(&mut self, element: Element) {
        self.open.push(element);
    }

    fn close(&mut self) -> Result<()> {
        let element = self
            .open
            .pop()
            .ok_or_else(|| FormatError::MalformedMarkup("unmatched closing tag".to_string()))?;
        self.attach(element)
    }

    fn attach(&mut self, element: Element) -> Result<()> {
        if let Some(parent) = self.open.last_mut() {
            parent.children.push(Node::Element(element));
            return Ok(());
        }
        if self.root.is_some() {
            return Err(FormatError::MalformedMarkup(format!(
                "second root element <{}>",
                element.name
            ))
            .into());
        }
        self.root = Some(element);
        Ok(())
    }

    fn text(&mut self, node: Node) -> Result<()> {
        if let Some(parent) = self.open.last_mut() {
            parent.children.push(node);
            return Ok(());
        }
        match node {
            Node::Text(text) if text.trim().is_empty() => Ok(()),
            _ => Err(FormatError::MalformedMarkup("content outside root element".to_string()).into()),
        }
    }

    fn finish(self) -> Result<Element> {
        if let Some(element) = self.open.last() {
            return Err(FormatError::MalformedMarkup(format!(
                "unclosed element <{}>",
                element.name
            ))
            .into());
        }
        self.root.ok_or_else(|| FormatError::MissingRoot.into())
    }
}
