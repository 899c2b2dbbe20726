// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Scale Invariant

/// Configuration Document Model
///
/// A minimal element tree over quick_xml: enough structure to locate a
/// parameter element by name anywhere under a section root, rewrite its text
/// content, and serialize the document back out with everything else
/// (attributes, comments, sibling sections) preserved. No schema knowledge
/// lives here; field semantics belong to the form layer.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::pfe_error::FormError;

// ============================================================================
// SECTION 1: Tree structures
// ============================================================================

#[derive(Debug, Clone)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

/// XML declaration captured at parse time so serialization can re-emit it
#[derive(Debug, Clone)]
struct Decl {
    version: String,
    encoding: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Document {
    decl: Option<Decl>,
    pub root: Element,
}

// ============================================================================
// SECTION 2: Element queries and mutation
// ============================================================================

impl Element {
    fn new(name: String) -> Self {
        Element {
            name,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Depth-first search for the first descendant element with this name
    /// (the element itself is not a candidate, matching `.//name` semantics)
    pub fn find_descendant(&self, name: &str) -> Option<&Element> {
        for child in &self.children {
            if let Node::Element(el) = child {
                if el.name == name {
                    return Some(el);
                }
                if let Some(found) = el.find_descendant(name) {
                    return Some(found);
                }
            }
        }
        None
    }

    pub fn find_descendant_mut(&mut self, name: &str) -> Option<&mut Element> {
        for child in &mut self.children {
            if let Node::Element(el) = child {
                if el.name == name {
                    return Some(el);
                }
                if let Some(found) = el.find_descendant_mut(name) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Concatenated text content of direct children (empty for element-only
    /// or childless elements)
    pub fn text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            if let Node::Text(t) = child {
                out.push_str(t);
            }
        }
        out
    }

    /// Replace this element's content with a single text node
    pub fn set_text(&mut self, text: &str) {
        self.children.clear();
        self.children.push(Node::Text(text.to_string()));
    }

    #[allow(dead_code)] // Public API, may be used by future hosts
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

// ============================================================================
// SECTION 3: Parsing (quick_xml events → tree)
// ============================================================================

impl Document {
    pub fn parse(xml: &str) -> Result<Self, FormError> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        let mut decl = None;
        let mut root: Option<Element> = None;
        let mut stack: Vec<Element> = Vec::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Decl(ref d)) => {
                    let version = d
                        .version()
                        .map(|v| String::from_utf8_lossy(&v).to_string())
                        .unwrap_or_else(|_| "1.0".to_string());
                    let encoding = d
                        .encoding()
                        .and_then(|r| r.ok())
                        .map(|v| String::from_utf8_lossy(&v).to_string());
                    decl = Some(Decl { version, encoding });
                }
                Ok(Event::Start(ref e)) => {
                    stack.push(Self::element_from_start(e, &reader)?);
                }
                Ok(Event::Empty(ref e)) => {
                    let el = Self::element_from_start(e, &reader)?;
                    Self::attach(Node::Element(el), &mut stack, &mut root, &reader)?;
                }
                Ok(Event::End(_)) => {
                    // Mismatched end tags are rejected by the reader itself
                    if let Some(el) = stack.pop() {
                        Self::attach(Node::Element(el), &mut stack, &mut root, &reader)?;
                    }
                }
                Ok(Event::Text(ref t)) => {
                    let text = t
                        .unescape()
                        .map_err(|e| FormError::xml(reader.buffer_position() as u64, e))?;
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(Node::Text(text.into_owned()));
                    }
                }
                Ok(Event::CData(ref c)) => {
                    let text = String::from_utf8_lossy(c).to_string();
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(Node::Text(text));
                    }
                }
                Ok(Event::Comment(ref c)) => {
                    let text = String::from_utf8_lossy(c).to_string();
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(Node::Comment(text));
                    }
                    // Comments outside the root element are dropped
                }
                Ok(Event::Eof) => break,
                Ok(_) => {} // PIs, DOCTYPE: not meaningful for config documents
                Err(e) => {
                    return Err(FormError::xml(reader.buffer_position() as u64, e));
                }
            }
            buf.clear();
        }

        let root = root.ok_or_else(|| FormError::xml(0, "document has no root element"))?;
        Ok(Document { decl, root })
    }

    fn element_from_start(
        e: &BytesStart,
        reader: &Reader<&[u8]>,
    ) -> Result<Element, FormError> {
        let mut el = Element::new(String::from_utf8_lossy(e.name().as_ref()).to_string());
        for attr in e.attributes() {
            let attr =
                attr.map_err(|e| FormError::xml(reader.buffer_position() as u64, e))?;
            let value = attr
                .unescape_value()
                .map_err(|e| FormError::xml(reader.buffer_position() as u64, e))?;
            el.attributes.push((
                String::from_utf8_lossy(attr.key.as_ref()).to_string(),
                value.into_owned(),
            ));
        }
        Ok(el)
    }

    fn attach(
        node: Node,
        stack: &mut Vec<Element>,
        root: &mut Option<Element>,
        reader: &Reader<&[u8]>,
    ) -> Result<(), FormError> {
        if let Some(parent) = stack.last_mut() {
            parent.children.push(node);
        } else if let Node::Element(el) = node {
            if root.is_some() {
                return Err(FormError::xml(
                    reader.buffer_position() as u64,
                    "multiple root elements",
                ));
            }
            *root = Some(el);
        }
        Ok(())
    }

    // ========================================================================
    // SECTION 4: Serialization (tree → quick_xml events)
    // ========================================================================

    pub fn to_xml(&self) -> Result<String, FormError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        if let Some(ref decl) = self.decl {
            writer
                .write_event(Event::Decl(BytesDecl::new(
                    &decl.version,
                    decl.encoding.as_deref(),
                    None,
                )))
                .map_err(|e| FormError::xml(0, e))?;
        }
        Self::write_element(&mut writer, &self.root)?;

        let bytes = writer.into_inner();
        String::from_utf8(bytes).map_err(|e| FormError::xml(0, e))
    }

    fn write_element(writer: &mut Writer<Vec<u8>>, el: &Element) -> Result<(), FormError> {
        let mut start = BytesStart::new(el.name.as_str());
        for (key, value) in &el.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if el.children.is_empty() {
            return writer
                .write_event(Event::Empty(start))
                .map_err(|e| FormError::xml(0, e));
        }

        writer
            .write_event(Event::Start(start))
            .map_err(|e| FormError::xml(0, e))?;
        for child in &el.children {
            match child {
                Node::Element(c) => Self::write_element(writer, c)?,
                Node::Text(t) => writer
                    .write_event(Event::Text(BytesText::new(t)))
                    .map_err(|e| FormError::xml(0, e))?,
                Node::Comment(c) => writer
                    .write_event(Event::Comment(BytesText::from_escaped(c.as_str())))
                    .map_err(|e| FormError::xml(0, e))?,
            }
        }
        writer
            .write_event(Event::End(BytesEnd::new(el.name.as_str())))
            .map_err(|e| FormError::xml(0, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
        <settings version="1">
            <!-- tuning knobs -->
            <user_parameters>
                <random_seed type="int">0</random_seed>
                <tumor_radius type="double" units="micron">250.0</tumor_radius>
            </user_parameters>
        </settings>
    "#;

    #[test]
    fn test_parse_and_find() {
        let doc = Document::parse(SAMPLE).unwrap();
        assert_eq!(doc.root.name, "settings");
        assert_eq!(doc.root.attr("version"), Some("1"));

        let section = doc.root.find_descendant("user_parameters").unwrap();
        let radius = section.find_descendant("tumor_radius").unwrap();
        assert_eq!(radius.text(), "250.0");
        assert_eq!(radius.attr("units"), Some("micron"));
    }

    #[test]
    fn test_find_descendant_is_recursive() {
        let doc = Document::parse(SAMPLE).unwrap();
        // Lookup from the document root reaches nested parameter elements
        assert!(doc.root.find_descendant("random_seed").is_some());
        assert!(doc.root.find_descendant("nonexistent").is_none());
    }

    #[test]
    fn test_set_text_and_reserialize() {
        let mut doc = Document::parse(SAMPLE).unwrap();
        doc.root
            .find_descendant_mut("random_seed")
            .unwrap()
            .set_text("13");

        let xml = doc.to_xml().unwrap();
        let reparsed = Document::parse(&xml).unwrap();
        assert_eq!(
            reparsed.root.find_descendant("random_seed").unwrap().text(),
            "13"
        );
        // Untouched siblings and attributes survive the rewrite
        let radius = reparsed.root.find_descendant("tumor_radius").unwrap();
        assert_eq!(radius.text(), "250.0");
        assert_eq!(radius.attr("units"), Some("micron"));
    }

    #[test]
    fn test_comments_preserved() {
        let doc = Document::parse(SAMPLE).unwrap();
        let xml = doc.to_xml().unwrap();
        assert!(xml.contains("<!-- tuning knobs -->"));
    }

    #[test]
    fn test_malformed_xml_reports_position() {
        let err = Document::parse("<a><b></a>").unwrap_err();
        assert!(err.to_string().contains("XML error at byte"));
    }

    #[test]
    fn test_escaped_text_round_trip() {
        let doc = Document::parse("<a><b>x &amp; y</b></a>").unwrap();
        assert_eq!(doc.root.find_descendant("b").unwrap().text(), "x & y");
        let xml = doc.to_xml().unwrap();
        assert!(xml.contains("x &amp; y"));
    }
}
