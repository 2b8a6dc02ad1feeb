//! Namespace-aware XML document tree
//!
//! Parses raw bytes into an owned element tree using `quick_xml`'s
//! namespace-resolving reader, and provides the lookup primitives the
//! flattener is built on: direct-child lookup by qualified name, multi-hop
//! path lookup with an empty-string default, and depth-unbounded descendant
//! search in document order.

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;

use crate::error::{Result, TcxError};

/// Qualified name of an element: resolved namespace URI plus local part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedName {
    /// Namespace URI the element name resolved to, if any
    pub namespace: Option<String>,
    /// Local part of the element name (prefix stripped)
    pub local: String,
}

/// One element of a parsed document, with its attributes, child elements
/// and accumulated text content.
#[derive(Debug, Clone)]
pub struct Element {
    pub name: QualifiedName,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text: String,
}

impl Element {
    fn new(name: QualifiedName, attributes: Vec<(String, String)>) -> Self {
        Element {
            name,
            attributes,
            children: Vec::new(),
            text: String::new(),
        }
    }

    /// Check whether this element has the given namespace URI and local name.
    pub fn is_named(&self, namespace: Option<&str>, local: &str) -> bool {
        self.name.namespace.as_deref() == namespace && self.name.local == local
    }

    /// Text content accumulated directly under this element.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Look up an attribute by local name. Attribute prefixes are not
    /// resolved; TCX attributes (`Sport`, `StartTime`) are unqualified.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First direct child with the given qualified name.
    pub fn child(&self, namespace: Option<&str>, local: &str) -> Option<&Element> {
        self.children
            .iter()
            .find(|child| child.is_named(namespace, local))
    }

    /// All direct children with the given qualified name, in document order.
    pub fn children_named<'a>(
        &'a self,
        namespace: Option<&'a str>,
        local: &'a str,
    ) -> impl Iterator<Item = &'a Element> {
        self.children
            .iter()
            .filter(move |child| child.is_named(namespace, local))
    }

    /// Follow a path of qualified names hop by hop, taking the first match
    /// at each hop. Returns `None` as soon as any hop is missing.
    pub fn find_path(&self, path: &[(Option<&str>, &str)]) -> Option<&Element> {
        let mut current = self;
        for (namespace, local) in path {
            current = current.child(*namespace, local)?;
        }
        Some(current)
    }

    /// Text content at the end of a path, or the empty string if any hop on
    /// the path is absent. This is the uniform optional-field lookup the
    /// whole flattener uses.
    pub fn text_at(&self, path: &[(Option<&str>, &str)]) -> String {
        self.find_path(path)
            .map(|element| element.text.clone())
            .unwrap_or_default()
    }

    /// Every descendant (at any depth, excluding this element) with the
    /// given qualified name, in document order.
    pub fn descendants(&self, namespace: Option<&str>, local: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_descendants(namespace, local, &mut found);
        found
    }

    fn collect_descendants<'a>(
        &'a self,
        namespace: Option<&str>,
        local: &str,
        found: &mut Vec<&'a Element>,
    ) {
        for child in &self.children {
            if child.is_named(namespace, local) {
                found.push(child);
            }
            child.collect_descendants(namespace, local, found);
        }
    }
}

/// Parse a byte buffer into an element tree.
///
/// Namespace prefixes on element names are resolved to URIs as the document
/// declares them. Malformed XML, an input with no root element, or multiple
/// root elements fail with [`TcxError::Parse`].
pub fn parse_document(bytes: &[u8]) -> Result<Element> {
    let mut reader = NsReader::from_reader(bytes);
    let mut buf = Vec::new();
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_resolved_event_into(&mut buf)? {
            (resolve, Event::Start(start)) => {
                stack.push(open_element(resolve, &start)?);
            }
            (resolve, Event::Empty(start)) => {
                let element = open_element(resolve, &start)?;
                close_element(&mut stack, &mut root, element)?;
            }
            (_, Event::End(_)) => {
                let element = stack.pop().ok_or_else(|| {
                    TcxError::Parse("close tag without matching open tag".to_string())
                })?;
                close_element(&mut stack, &mut root, element)?;
            }
            (_, Event::Text(text)) => {
                if let Some(open) = stack.last_mut() {
                    open.text.push_str(&text.unescape()?);
                }
            }
            (_, Event::CData(cdata)) => {
                if let Some(open) = stack.last_mut() {
                    open.text.push_str(decode(&cdata)?);
                }
            }
            (_, Event::Eof) => break,
            // Declaration, comments, processing instructions, doctype
            _ => {}
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(TcxError::Parse("unexpected end of document".to_string()));
    }
    root.ok_or_else(|| TcxError::Parse("document has no root element".to_string()))
}

fn decode(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes)
        .map_err(|err| TcxError::Parse(format!("invalid UTF-8 in document: {}", err)))
}

fn open_element(resolve: ResolveResult, start: &BytesStart) -> Result<Element> {
    let namespace = match resolve {
        ResolveResult::Bound(ns) => Some(decode(ns.0)?.to_string()),
        _ => None,
    };
    let local = decode(start.local_name().into_inner())?.to_string();

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::InvalidAttr)?;
        // xmlns declarations are namespace bindings, not data attributes
        let raw_key = attr.key.into_inner();
        if raw_key == b"xmlns" || raw_key.starts_with(b"xmlns:") {
            continue;
        }
        let key = decode(attr.key.local_name().into_inner())?.to_string();
        let value = attr.unescape_value()?.into_owned();
        attributes.push((key, value));
    }

    Ok(Element::new(QualifiedName { namespace, local }, attributes))
}

fn close_element(
    stack: &mut Vec<Element>,
    root: &mut Option<Element>,
    element: Element,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => {
            if root.is_some() {
                return Err(TcxError::Parse("multiple root elements".to_string()));
            }
            *root = Some(element);
        }
    }
    Ok(())
}
