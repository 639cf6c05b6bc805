//! Minimal namespace-aware XML element tree.
//!
//! WSDL documents refer to schema components through prefixed names inside
//! attribute values (`type="tns:Address"`), so every element keeps the
//! namespace declarations in scope at its position.

use crate::error::ParseError;
use crate::types::QName;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::collections::BTreeMap;

/// XML element with resolved namespace and in-scope prefix declarations.
#[derive(Debug, Clone, Default)]
pub struct Element {
    /// Local element name.
    pub local_name: String,
    /// Namespace URI of the element.
    pub namespace: String,
    /// Non-namespace attributes as (raw key, value).
    pub attributes: Vec<(String, String)>,
    /// Child elements in document order.
    pub children: Vec<Element>,
    /// Concatenated text content.
    pub text: String,
    namespaces: BTreeMap<String, String>,
}

impl Element {
    /// Returns true if the element has the given namespace and local name.
    #[must_use]
    pub fn is(&self, namespace: &str, local_name: &str) -> bool {
        self.namespace == namespace && self.local_name == local_name
    }

    /// Returns the value of an attribute by its raw key.
    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the value of a required attribute.
    ///
    /// # Errors
    /// Returns `ParseError::MissingAttribute` if the attribute is absent.
    pub fn required_attr(&self, key: &str) -> Result<&str, ParseError> {
        self.attr(key)
            .ok_or_else(|| ParseError::missing_attr(self.local_name.clone(), key))
    }

    /// Iterates over child elements with the given namespace and local name.
    pub fn children_named<'a>(
        &'a self,
        namespace: &'a str,
        local_name: &'a str,
    ) -> impl Iterator<Item = &'a Element> + 'a {
        self.children
            .iter()
            .filter(move |c| c.is(namespace, local_name))
    }

    /// Returns the first child element with the given name.
    #[must_use]
    pub fn child(&self, namespace: &str, local_name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.is(namespace, local_name))
    }

    /// Resolves a prefixed name found in an attribute value against the
    /// declarations in scope. Unprefixed names use the default namespace.
    ///
    /// # Errors
    /// Returns `ParseError::UnknownPrefix` if the prefix is not declared.
    pub fn resolve_qname(&self, value: &str) -> Result<QName, ParseError> {
        let (prefix, local) = split_qname(value.trim());
        match self.namespaces.get(prefix) {
            Some(uri) => Ok(QName::new(uri.clone(), local)),
            None if prefix.is_empty() => Ok(QName::new("", local)),
            None => Err(ParseError::UnknownPrefix {
                prefix: prefix.to_string(),
            }),
        }
    }
}

/// Splits `prefix:local` into its parts; the prefix is empty when absent.
fn split_qname(name: &str) -> (&str, &str) {
    match name.split_once(':') {
        Some((prefix, local)) => (prefix, local),
        None => ("", name),
    }
}

/// Parses an XML document into its root element.
///
/// # Errors
/// Returns `ParseError` if the XML is malformed or uses undeclared prefixes.
pub fn parse_document(xml: &str) -> Result<Element, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let element = open_element(e, stack.last())?;
                stack.push(element);
            }
            Ok(Event::Empty(ref e)) => {
                let element = open_element(e, stack.last())?;
                attach(&mut stack, &mut root, element);
            }
            Ok(Event::End(_)) => {
                if let Some(element) = stack.pop() {
                    attach(&mut stack, &mut root, element);
                }
            }
            Ok(Event::Text(ref t)) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(std::str::from_utf8(t.as_ref())?.trim());
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(ParseError::invalid("unexpected end of document"));
    }
    root.ok_or_else(|| ParseError::invalid("document has no root element"))
}

/// Places a finished element under its parent, or makes it the root.
fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => {
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}

/// Builds an element from a start tag, inheriting the parent's scope.
fn open_element(e: &BytesStart<'_>, parent: Option<&Element>) -> Result<Element, ParseError> {
    let mut namespaces = parent.map(|p| p.namespaces.clone()).unwrap_or_default();
    let mut attributes = Vec::new();

    for attr in e.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;

        if key == "xmlns" {
            namespaces.insert(String::new(), value.to_string());
        } else if let Some(prefix) = key.strip_prefix("xmlns:") {
            namespaces.insert(prefix.to_string(), value.to_string());
        } else {
            attributes.push((key.to_string(), value.to_string()));
        }
    }

    let name_bytes = e.name().as_ref().to_vec();
    let name = std::str::from_utf8(&name_bytes)?;
    let (prefix, local) = split_qname(name);
    let namespace = match namespaces.get(prefix) {
        Some(uri) => uri.clone(),
        None if prefix.is_empty() => String::new(),
        None => {
            return Err(ParseError::UnknownPrefix {
                prefix: prefix.to_string(),
            });
        }
    };

    Ok(Element {
        local_name: local.to_string(),
        namespace,
        attributes,
        children: Vec::new(),
        text: String::new(),
        namespaces,
    })
}
