//! Owned element tree for rendered SVG artwork.
//!
//! The artwork is read through the `svg` crate's event parser and folded
//! into an [`Artwork`] tree that can be inspected and edited: marker lines
//! are removed from it and fill colors rewritten before it is emitted again
//! as symbol content.

use std::collections::BTreeMap;

use log::{debug, trace};
use svg::{node::element::tag::Type, parser::Event};

use symlib_core::geometry::ViewBox;

use crate::{error::ParseError, path_data::parse_view_box};

/// A node of the artwork tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ArtworkNode {
    Element(ArtworkElement),
    Text(String),
}

/// An SVG element with its attributes and children.
///
/// Attributes are kept sorted by name so that re-emitted artwork is
/// deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtworkElement {
    name: String,
    attributes: BTreeMap<String, String>,
    children: Vec<ArtworkNode>,
}

impl ArtworkElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn children(&self) -> &[ArtworkNode] {
        &self.children
    }

    pub fn into_children(self) -> Vec<ArtworkNode> {
        self.children
    }

    /// Iterates over the direct child elements, skipping text.
    pub fn child_elements(&self) -> impl Iterator<Item = &ArtworkElement> {
        self.children.iter().filter_map(|child| match child {
            ArtworkNode::Element(element) => Some(element),
            ArtworkNode::Text(_) => None,
        })
    }

    /// Removes descendant elements for which `keep` returns `false`.
    ///
    /// Descendants are visited in document order. A removed element's own
    /// descendants are not visited.
    pub fn retain_descendants<F>(&mut self, keep: &mut F)
    where
        F: FnMut(&ArtworkElement) -> bool,
    {
        self.children.retain_mut(|child| match child {
            ArtworkNode::Element(element) => {
                if !keep(element) {
                    return false;
                }
                element.retain_descendants(keep);
                true
            }
            ArtworkNode::Text(_) => true,
        });
    }

    /// Calls `f` on every descendant element, in document order.
    pub fn for_each_descendant_mut<F>(&mut self, f: &mut F)
    where
        F: FnMut(&mut ArtworkElement),
    {
        for child in &mut self.children {
            if let ArtworkNode::Element(element) = child {
                f(element);
                element.for_each_descendant_mut(f);
            }
        }
    }

    fn push(&mut self, node: ArtworkNode) {
        self.children.push(node);
    }
}

/// A parsed artwork document rooted at its `<svg>` element.
#[derive(Debug, Clone, PartialEq)]
pub struct Artwork {
    root: ArtworkElement,
}

impl Artwork {
    /// Wraps an `<svg>` root element.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::UnexpectedRoot`] if `root` is not an `svg` element.
    pub fn new(root: ArtworkElement) -> Result<Self, ParseError> {
        if root.name() != "svg" {
            return Err(ParseError::UnexpectedRoot(root.name().to_string()));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &ArtworkElement {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut ArtworkElement {
        &mut self.root
    }

    pub fn into_root(self) -> ArtworkElement {
        self.root
    }

    /// Returns the parsed `viewBox` attribute of the root element.
    pub fn view_box(&self) -> Result<ViewBox, ParseError> {
        let value = self
            .root
            .attribute("viewBox")
            .ok_or(ParseError::MissingViewBox)?;
        parse_view_box(value)
    }
}

/// Parses SVG source text into an [`Artwork`] tree.
///
/// Comments, declarations and processing instructions are dropped;
/// whitespace-only text is dropped.
///
/// # Errors
///
/// Returns a [`ParseError`] if the XML is malformed, tags are unbalanced,
/// or the document is not rooted at a single `<svg>` element.
pub fn parse_artwork(source: &str) -> Result<Artwork, ParseError> {
    let parser = svg::read(source).map_err(|err| ParseError::Xml(err.to_string()))?;

    let mut stack: Vec<ArtworkElement> = Vec::new();
    let mut root: Option<ArtworkElement> = None;

    let mut close = |element: ArtworkElement,
                     stack: &mut Vec<ArtworkElement>|
     -> Result<(), ParseError> {
        match stack.last_mut() {
            Some(parent) => parent.push(ArtworkNode::Element(element)),
            None if root.is_none() => root = Some(element),
            None => {
                return Err(ParseError::Xml(format!(
                    "unexpected second root element `{}`",
                    element.name()
                )));
            }
        }
        Ok(())
    };

    for event in parser {
        match event {
            Event::Tag(name, kind, attributes) => {
                trace!(name; "Artwork tag");
                match kind {
                    Type::Start => {
                        let mut element = ArtworkElement::new(name);
                        for (key, value) in attributes {
                            element.set_attribute(key, unescape(&value));
                        }
                        stack.push(element);
                    }
                    Type::Empty => {
                        let mut element = ArtworkElement::new(name);
                        for (key, value) in attributes {
                            element.set_attribute(key, unescape(&value));
                        }
                        close(element, &mut stack)?;
                    }
                    Type::End => {
                        let element = stack.pop().ok_or_else(|| {
                            ParseError::Xml(format!("unexpected closing tag `{name}`"))
                        })?;
                        if element.name() != name {
                            return Err(ParseError::Xml(format!(
                                "closing tag `{name}` does not match `{}`",
                                element.name()
                            )));
                        }
                        close(element, &mut stack)?;
                    }
                }
            }
            Event::Text(text) => {
                if text.trim().is_empty() {
                    continue;
                }
                if let Some(parent) = stack.last_mut() {
                    parent.push(ArtworkNode::Text(unescape(text)));
                }
            }
            Event::Error(err) => return Err(ParseError::Xml(err.to_string())),
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(ParseError::Xml(format!("unclosed tag `{}`", open.name())));
    }

    let root = root.ok_or(ParseError::MissingRoot)?;
    debug!(children = root.children().len(); "Artwork parsed");
    Artwork::new(root)
}

/// Replaces XML entity and character references with the characters they
/// stand for. Unknown or malformed references are kept as written.
fn unescape(raw: &str) -> String {
    let mut output = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(start) = rest.find('&') {
        output.push_str(&rest[..start]);
        rest = &rest[start..];
        let decoded = rest
            .find(';')
            .and_then(|end| decode_reference(&rest[1..end]).map(|c| (c, end)));
        match decoded {
            Some((c, end)) => {
                output.push(c);
                rest = &rest[end + 1..];
            }
            None => {
                output.push('&');
                rest = &rest[1..];
            }
        }
    }
    output.push_str(rest);
    output
}

fn decode_reference(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = match name.strip_prefix('#')? {
                hex if hex.starts_with(['x', 'X']) => u32::from_str_radix(&hex[1..], 16).ok()?,
                decimal => decimal.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}
