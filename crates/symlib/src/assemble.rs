//! Library assembly.
//!
//! Fragments of the same [`ComponentIdentity`] are merged into one
//! [`ComponentRecord`]. The first fragment of a group supplies the shared
//! labels and option descriptors; every fragment contributes a
//! [`VariantRecord`] with its own geometry.

use indexmap::IndexMap;
use log::debug;

use symlib_core::{
    catalog::ComponentIdentity,
    geometry::{Point, ViewBox},
};
use symlib_parser::ArtworkNode;

use crate::fragment::{ComponentLabels, OptionDescriptor, PinAnchor, VariantFragment};

/// The per-variant facts of one fragment inside a component record.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantRecord {
    symbol_id: String,
    reference: Point,
    view_box: ViewBox,
    active_options: Vec<String>,
    pins: Vec<PinAnchor>,
    text_anchor: Option<Point>,
    content: Vec<ArtworkNode>,
}

impl VariantRecord {
    fn from_fragment(fragment: VariantFragment) -> Self {
        let active_options = fragment
            .active_options()
            .into_iter()
            .map(str::to_string)
            .collect();
        Self {
            symbol_id: fragment.symbol_id,
            reference: fragment.reference,
            view_box: fragment.view_box,
            active_options,
            pins: fragment.pins,
            text_anchor: fragment.text_anchor,
            content: fragment.content,
        }
    }

    /// Returns the id of the symbol holding this variant's artwork.
    pub fn symbol_id(&self) -> &str {
        &self.symbol_id
    }

    pub fn reference(&self) -> Point {
        self.reference
    }

    pub fn view_box(&self) -> ViewBox {
        self.view_box
    }

    /// Returns the active option names, in declaration order.
    pub fn active_options(&self) -> &[String] {
        &self.active_options
    }

    pub fn pins(&self) -> &[PinAnchor] {
        &self.pins
    }

    pub fn text_anchor(&self) -> Option<Point> {
        self.text_anchor
    }

    pub fn content(&self) -> &[ArtworkNode] {
        &self.content
    }
}

/// All variants of one component identity.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentRecord {
    identity: ComponentIdentity,
    labels: ComponentLabels,
    options: Vec<OptionDescriptor>,
    variants: Vec<VariantRecord>,
}

impl ComponentRecord {
    fn from_first(fragment: &VariantFragment) -> Self {
        Self {
            identity: fragment.identity.clone(),
            labels: fragment.labels.clone(),
            options: fragment
                .options
                .iter()
                .map(OptionDescriptor::deactivated)
                .collect(),
            variants: Vec::new(),
        }
    }

    pub fn identity(&self) -> &ComponentIdentity {
        &self.identity
    }

    pub fn labels(&self) -> &ComponentLabels {
        &self.labels
    }

    /// Returns the shared option descriptors; no leaf is active.
    pub fn options(&self) -> &[OptionDescriptor] {
        &self.options
    }

    /// Returns the variants in the order their fragments were given.
    pub fn variants(&self) -> &[VariantRecord] {
        &self.variants
    }
}

/// The assembled symbol library.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LibraryDocument {
    components: Vec<ComponentRecord>,
}

impl LibraryDocument {
    /// Returns the component records in first-seen order.
    pub fn components(&self) -> &[ComponentRecord] {
        &self.components
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Iterates over every variant of every component.
    pub fn variants(&self) -> impl Iterator<Item = &VariantRecord> {
        self.components
            .iter()
            .flat_map(|component| component.variants.iter())
    }
}

/// Groups fragments by identity into a [`LibraryDocument`].
///
/// Groups keep the order in which their identity was first seen, and
/// variants keep the order of their fragments. An empty input yields an
/// empty document.
pub fn assemble<I>(fragments: I) -> LibraryDocument
where
    I: IntoIterator<Item = VariantFragment>,
{
    let mut groups: IndexMap<ComponentIdentity, ComponentRecord> = IndexMap::new();

    for fragment in fragments {
        let record = groups
            .entry(fragment.identity.clone())
            .or_insert_with(|| ComponentRecord::from_first(&fragment));
        record.variants.push(VariantRecord::from_fragment(fragment));
    }

    debug!(components = groups.len(); "Library assembled");
    LibraryDocument {
        components: groups.into_values().collect(),
    }
}
