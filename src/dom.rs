//! A minimal element tree on top of `xml-rs`.
//!
//! The registry mixes markup and C text (`<param>const <ptype>GLuint</ptype> *<name>v</name></param>`),
//! so text nodes are kept verbatim, whitespace included.

use std::io::Read;

use xml::reader::{ParserConfig, XmlEvent};

use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, Default)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn required_attr(&self, name: &'static str) -> Result<&str> {
        self.attr(name).ok_or_else(|| Error::MissingAttribute {
            element: self.name.clone(),
            attribute: name,
        })
    }

    /// Child elements, skipping text.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    pub fn elements_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.elements().filter(move |element| element.name == name)
    }

    pub fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|element| element.name == name)
    }

    /// Concatenated text of this element and all of its descendants, in document order.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) => element.collect_text(out),
            }
        }
    }
}

/// Read a whole document and return its root element.
pub fn parse(source: impl Read) -> Result<Element> {
    let reader = ParserConfig::new()
        .trim_whitespace(false)
        .whitespace_to_characters(true)
        .cdata_to_characters(true)
        .ignore_comments(true)
        .create_reader(source);

    // The bottom of the stack is a synthetic document node.
    let mut stack = vec![Element::default()];
    for event in reader {
        match event? {
            XmlEvent::StartElement {
                name, attributes, ..
            } => {
                stack.push(Element {
                    name: name.local_name,
                    attributes: attributes
                        .into_iter()
                        .map(|attr| (attr.name.local_name, attr.value))
                        .collect(),
                    children: Vec::new(),
                });
            }
            XmlEvent::EndElement { .. } => {
                // Unbalanced documents are rejected by the parser before we get here.
                if let Some(done) = stack.pop() {
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(Node::Element(done));
                    }
                }
            }
            XmlEvent::Characters(text) | XmlEvent::Whitespace(text) | XmlEvent::CData(text) => {
                if let Some(current) = stack.last_mut() {
                    // Adjacent text events are merged so `text()` callers see one run.
                    if let Some(Node::Text(previous)) = current.children.last_mut() {
                        previous.push_str(&text);
                    } else {
                        current.children.push(Node::Text(text));
                    }
                }
            }
            _ => {}
        }
    }

    let document = stack.pop().unwrap_or_default();
    document
        .children
        .into_iter()
        .find_map(|node| match node {
            Node::Element(root) => Some(root),
            Node::Text(_) => None,
        })
        .ok_or_else(|| Error::MissingChild {
            element: "document".into(),
            child: "root",
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_c_text_around_markup() {
        let root = parse(
            "<command><param group=\"G\">const <ptype>GLuint</ptype> *<name>v</name></param></command>"
                .as_bytes(),
        )
        .unwrap();
        let param = root.child("param").unwrap();
        assert_eq!(param.attr("group"), Some("G"));
        assert_eq!(param.text(), "const GLuint *v");
        assert_eq!(param.child("ptype").unwrap().text(), "GLuint");
    }

    #[test]
    fn missing_attribute_names_element() {
        let root = parse("<feature api=\"gl\"/>".as_bytes()).unwrap();
        let err = root.required_attr("name").unwrap_err();
        assert_eq!(err.to_string(), "<feature> is missing attribute `name`");
    }

    #[test]
    fn comments_are_dropped() {
        let root = parse("<a><!-- nope --><b/>text</a>".as_bytes()).unwrap();
        assert_eq!(root.elements().count(), 1);
        assert_eq!(root.text(), "text");
    }
}
