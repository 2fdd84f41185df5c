//! Minimal element tree over quick-xml, used by both directions.

use std::io::Write;

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use yed_graph::{ForeignAttributes, Fragment};

use crate::error::{GraphmlError, GraphmlResult};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum XmlNode {
    Element(Element),
    Text(String),
    CData(String),
    /// Pre-serialized markup, written without escaping.
    Raw(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn attr(mut self, key: &str, value: impl Into<String>) -> Self {
        self.attributes.push((key.to_string(), value.into()));
        self
    }

    pub fn attr_opt(self, key: &str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.attr(key, value),
            None => self,
        }
    }

    /// Append foreign attributes. One whose name is already present
    /// replaces the typed value.
    pub fn merge(mut self, foreign: &ForeignAttributes) -> Self {
        for (key, value) in foreign {
            match self.attributes.iter_mut().find(|(k, _)| k == key) {
                Some(slot) => slot.1 = value.clone(),
                None => self.attributes.push((key.clone(), value.clone())),
            }
        }
        self
    }

    pub fn child(mut self, element: Element) -> Self {
        self.children.push(XmlNode::Element(element));
        self
    }

    pub fn push(&mut self, element: Element) {
        self.children.push(XmlNode::Element(element));
    }

    pub fn text(mut self, text: &str) -> Self {
        if !text.is_empty() {
            self.children.push(XmlNode::Text(text.to_string()));
        }
        self
    }

    pub fn fragments(mut self, fragments: &[Fragment]) -> Self {
        self.push_fragments(fragments);
        self
    }

    pub fn push_fragments(&mut self, fragments: &[Fragment]) {
        self.children
            .extend(fragments.iter().map(|f| XmlNode::Raw(f.as_str().to_string())));
    }

    /// Name without namespace prefix.
    pub fn local_name(&self) -> &str {
        local_name(&self.name)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn require(&self, key: &str) -> GraphmlResult<&str> {
        self.get(key).ok_or_else(|| {
            GraphmlError::structure(format!("<{}> is missing attribute '{key}'", self.name))
        })
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            XmlNode::Element(element) => Some(element),
            _ => None,
        })
    }

    /// First child element with the given local name.
    pub fn find(&self, local: &str) -> Option<&Element> {
        self.elements().find(|e| e.local_name() == local)
    }

    /// Concatenated direct text content.
    pub fn text_content(&self) -> String {
        self.children
            .iter()
            .filter_map(|child| match child {
                XmlNode::Text(text) | XmlNode::CData(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Serialize compactly for verbatim preservation.
    pub fn to_fragment(&self) -> GraphmlResult<Fragment> {
        let mut writer = Writer::new(Vec::new());
        write_element(&mut writer, self)?;
        let text = std::str::from_utf8(writer.get_ref())?;
        Ok(Fragment::new(text))
    }
}

pub(crate) fn local_name(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}

fn read_start(start: &BytesStart<'_>) -> GraphmlResult<Element> {
    let name = std::str::from_utf8(start.name().as_ref())?.to_string();
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
        let value = attr.unescape_value()?.into_owned();
        attributes.push((key, value));
    }
    Ok(Element {
        name,
        attributes,
        children: Vec::new(),
    })
}

/// Parse a document into its root element.
///
/// Whitespace-only text between sibling elements is layout and is dropped.
/// In a text-only element it is content and is kept. Comments, processing
/// instructions and the declaration are dropped.
pub(crate) fn parse(text: &str) -> GraphmlResult<Element> {
    let mut reader = Reader::from_str(text);
    let mut stack: Vec<Element> = Vec::new();
    let mut root = None;

    fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> GraphmlResult<()> {
        match stack.last_mut() {
            Some(parent) => parent.push(element),
            None if root.is_none() => *root = Some(element),
            None => return Err(GraphmlError::structure("more than one root element")),
        }
        Ok(())
    }

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(read_start(&start)?),
            Event::Empty(start) => {
                let element = read_start(&start)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let mut element = stack
                    .pop()
                    .ok_or_else(|| GraphmlError::structure("unbalanced end tag"))?;
                drop_layout_whitespace(&mut element);
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                let text = text.unescape()?;
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(XmlNode::Text(text.into_owned()));
                }
            }
            Event::CData(data) => {
                if let Some(parent) = stack.last_mut() {
                    let data = std::str::from_utf8(&data)?;
                    parent.children.push(XmlNode::CData(data.to_string()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(GraphmlError::structure("document ended inside an element"));
    }
    root.ok_or_else(|| GraphmlError::structure("document has no root element"))
}

fn drop_layout_whitespace(element: &mut Element) {
    if element.elements().next().is_none() {
        return;
    }
    element
        .children
        .retain(|child| !matches!(child, XmlNode::Text(text) if text.trim().is_empty()));
}

fn write_element<W: Write>(writer: &mut Writer<W>, element: &Element) -> GraphmlResult<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }
    if element.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in &element.children {
        match child {
            XmlNode::Element(inner) => write_element(writer, inner)?,
            XmlNode::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
            XmlNode::CData(data) => writer.write_event(Event::CData(BytesCData::new(data.as_str())))?,
            XmlNode::Raw(raw) => writer.get_mut().write_all(raw.as_bytes())?,
        }
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    Ok(())
}

/// Write a full document: declaration plus `root`, compact or tab-indented.
pub(crate) fn write_document(root: &Element, indent: bool) -> GraphmlResult<String> {
    let mut writer = if indent {
        Writer::new_with_indent(Vec::new(), b'\t', 1)
    } else {
        Writer::new(Vec::new())
    };
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("no"))))?;
    if !indent {
        writer.get_mut().write_all(b"\n")?;
    }
    write_element(&mut writer, root)?;
    if indent {
        writer.get_mut().write_all(b"\n")?;
    }
    let bytes = writer.into_inner();
    Ok(std::str::from_utf8(&bytes)?.to_string())
}
