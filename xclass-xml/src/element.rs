//! Minimal element tree over quick-xml.
//!
//! Classes and objects are plain nested elements with text leaves; no
//! attributes, namespaces or mixed content. Reading is lenient in one way:
//! bare `<>`/`</>` tags become `unknown` placeholder elements, and a
//! placeholder left open is closed by its parent's end tag.

use crate::{XmlError, XmlResult};
use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use std::fmt;

/// Tag given to bare `<>` elements.
pub const PLACEHOLDER_TAG: &str = "unknown";

/// One XML element: either text or child elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Leaf element holding `text`.
    #[must_use]
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            children: Vec::new(),
        }
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    /// First child named `name`.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Text of the first child named `name`.
    #[must_use]
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(|c| c.text.as_str())
    }

    /// Parses a document with exactly one root element.
    pub fn parse(xml: &str) -> XmlResult<Self> {
        let normalized = xml
            .replace("</>", &format!("</{PLACEHOLDER_TAG}>"))
            .replace("<>", &format!("<{PLACEHOLDER_TAG}>"));
        let mut reader = Reader::from_str(&normalized);
        reader.config_mut().check_end_names = false;

        let mut stack: Vec<Element> = Vec::new();
        let mut roots: Vec<Element> = Vec::new();

        loop {
            let event = reader
                .read_event()
                .map_err(|e| XmlError::parse(e.to_string(), xml))?;
            match event {
                Event::Start(e) => stack.push(Self::new(tag_name(e.name().as_ref(), xml)?)),
                Event::Empty(e) => {
                    let el = Self::new(tag_name(e.name().as_ref(), xml)?);
                    attach(&mut stack, &mut roots, el);
                }
                Event::End(e) => {
                    let name = tag_name(e.name().as_ref(), xml)?;
                    close(&mut stack, &mut roots, &name, xml)?;
                }
                Event::Text(e) => {
                    let text = e.unescape().map_err(|e| XmlError::parse(e.to_string(), xml))?;
                    append_text(&mut stack, &text, xml)?;
                }
                Event::CData(e) => {
                    let raw = e.into_inner();
                    let text = std::str::from_utf8(&raw)
                        .map_err(|e| XmlError::parse(e.to_string(), xml))?
                        .to_string();
                    append_text(&mut stack, &text, xml)?;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(XmlError::parse(format!("unclosed element <{}>", open.name), xml));
        }
        match roots.len() {
            1 => Ok(roots.remove(0)),
            0 => Err(XmlError::parse("no root element", xml)),
            n => Err(XmlError::parse(format!("{n} root elements"), xml)),
        }
    }

    /// Serializes the element; `indent` spaces per level, 0 for compact output.
    pub fn to_xml(&self, indent: usize) -> XmlResult<String> {
        let mut writer = if indent == 0 {
            Writer::new(Vec::new())
        } else {
            Writer::new_with_indent(Vec::new(), b' ', indent)
        };
        self.write_into(&mut writer)?;
        String::from_utf8(writer.into_inner()).map_err(write_error)
    }

    fn write_into(&self, writer: &mut Writer<Vec<u8>>) -> XmlResult<()> {
        writer
            .write_event(Event::Start(BytesStart::new(self.name.as_str())))
            .map_err(write_error)?;
        if self.children.is_empty() {
            // Always emitted, so empty leaves stay on one line when indenting.
            writer
                .write_event(Event::Text(BytesText::new(&self.text)))
                .map_err(write_error)?;
        } else {
            for child in &self.children {
                child.write_into(writer)?;
            }
        }
        writer
            .write_event(Event::End(BytesEnd::new(self.name.as_str())))
            .map_err(write_error)?;
        Ok(())
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let xml = self.to_xml(0).map_err(|_| fmt::Error)?;
        f.write_str(&xml)
    }
}

fn write_error(e: impl fmt::Display) -> XmlError {
    XmlError::Write(e.to_string())
}

fn tag_name(raw: &[u8], xml: &str) -> XmlResult<String> {
    std::str::from_utf8(raw)
        .map(str::to_string)
        .map_err(|e| XmlError::parse(e.to_string(), xml))
}

fn attach(stack: &mut [Element], roots: &mut Vec<Element>, mut el: Element) {
    if !el.children.is_empty() && el.text.trim().is_empty() {
        el.text.clear();
    }
    match stack.last_mut() {
        Some(parent) => parent.children.push(el),
        None => roots.push(el),
    }
}

/// Closes the innermost element named `name`, implicitly closing any open
/// placeholders above it.
fn close(stack: &mut Vec<Element>, roots: &mut Vec<Element>, name: &str, xml: &str) -> XmlResult<()> {
    loop {
        let Some(top) = stack.pop() else {
            return Err(XmlError::parse(format!("unexpected closing tag </{name}>"), xml));
        };
        if top.name == name {
            attach(stack, roots, top);
            return Ok(());
        }
        if top.name != PLACEHOLDER_TAG {
            return Err(XmlError::parse(
                format!("expected </{}>, found </{name}>", top.name),
                xml,
            ));
        }
        attach(stack, roots, top);
    }
}

fn append_text(stack: &mut [Element], text: &str, xml: &str) -> XmlResult<()> {
    match stack.last_mut() {
        Some(el) => {
            el.text.push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(XmlError::parse("text outside the root element", xml)),
    }
}
