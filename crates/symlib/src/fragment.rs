//! Per-variant extraction results.
//!
//! A [`VariantFragment`] is the immutable outcome of extracting one rendered
//! artifact: where the component's reference point lies, where its pins
//! and text label go, which options were active, and the artwork left after
//! marker lines were stripped.

use symlib_core::{
    catalog::{ComponentDescription, ComponentIdentity, ComponentKind},
    geometry::{Point, ViewBox},
    options::{OptionLeaf, OptionSelection, OptionSpec},
};
use symlib_parser::ArtworkNode;

/// A named attachment point, relative to the reference point.
#[derive(Debug, Clone, PartialEq)]
pub struct PinAnchor {
    name: String,
    offset: Point,
    is_default: bool,
}

impl PinAnchor {
    pub fn new(name: impl Into<String>, offset: Point, is_default: bool) -> Self {
        Self {
            name: name.into(),
            offset,
            is_default,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Whether this is the anchor the component is placed by.
    pub fn is_default(&self) -> bool {
        self.is_default
    }

    pub(crate) fn mark_default(&mut self) {
        self.is_default = true;
    }
}

/// An option leaf and whether it is part of the fragment's selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionState {
    leaf: OptionLeaf,
    active: bool,
}

impl OptionState {
    pub fn new(leaf: OptionLeaf, active: bool) -> Self {
        Self { leaf, active }
    }

    pub fn leaf(&self) -> &OptionLeaf {
        &self.leaf
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    fn deactivated(&self) -> Self {
        Self {
            leaf: self.leaf.clone(),
            active: false,
        }
    }
}

/// The state of one option axis, mirroring [`OptionSpec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionDescriptor {
    Toggle(OptionState),
    Enum {
        display_name: Option<String>,
        select_none: Option<bool>,
        options: Vec<OptionState>,
    },
}

impl OptionDescriptor {
    /// Records, for every leaf of `spec`, whether `selection` contains it.
    pub fn from_spec(spec: &OptionSpec, selection: &OptionSelection) -> Self {
        let state =
            |leaf: &OptionLeaf| OptionState::new(leaf.clone(), selection.contains(leaf.name()));
        match spec {
            OptionSpec::Toggle(leaf) => Self::Toggle(state(leaf)),
            OptionSpec::Enum(enumeration) => Self::Enum {
                display_name: enumeration.display_name().map(str::to_string),
                select_none: enumeration.declared_select_none(),
                options: enumeration.options().iter().map(state).collect(),
            },
        }
    }

    /// Iterates over the leaf states of this axis in declaration order.
    pub fn states(&self) -> impl Iterator<Item = &OptionState> {
        let states: &[OptionState] = match self {
            Self::Toggle(state) => std::slice::from_ref(state),
            Self::Enum { options, .. } => options,
        };
        states.iter()
    }

    /// Returns a copy with every leaf inactive.
    pub fn deactivated(&self) -> Self {
        match self {
            Self::Toggle(state) => Self::Toggle(state.deactivated()),
            Self::Enum {
                display_name,
                select_none,
                options,
            } => Self::Enum {
                display_name: display_name.clone(),
                select_none: *select_none,
                options: options.iter().map(OptionState::deactivated).collect(),
            },
        }
    }
}

/// The descriptive labels shared by every variant of a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentLabels {
    display: Option<String>,
    shape: Option<String>,
    group: Option<String>,
    class: Option<String>,
    fillable: Option<bool>,
    source: Option<String>,
}

impl ComponentLabels {
    pub fn from_description(kind: ComponentKind, description: &ComponentDescription) -> Self {
        Self {
            display: description.display_name().map(str::to_string),
            shape: description.shape_name(kind),
            group: description.group().map(str::to_string),
            class: description.class().map(str::to_string),
            fillable: description.fillable(),
            source: description.source().map(str::to_string),
        }
    }

    pub fn display(&self) -> Option<&str> {
        self.display.as_deref()
    }

    /// Shape name; present for path components only.
    pub fn shape(&self) -> Option<&str> {
        self.shape.as_deref()
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    pub fn fillable(&self) -> Option<bool> {
        self.fillable
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

/// Metadata and cleaned artwork of one component variant.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantFragment {
    pub(crate) symbol_id: String,
    pub(crate) identity: ComponentIdentity,
    pub(crate) labels: ComponentLabels,
    pub(crate) reference: Point,
    pub(crate) view_box: ViewBox,
    pub(crate) pins: Vec<PinAnchor>,
    pub(crate) text_anchor: Option<Point>,
    pub(crate) options: Vec<OptionDescriptor>,
    pub(crate) content: Vec<ArtworkNode>,
}

impl VariantFragment {
    /// Returns the id of the symbol this fragment renders to.
    pub fn symbol_id(&self) -> &str {
        &self.symbol_id
    }

    pub fn identity(&self) -> &ComponentIdentity {
        &self.identity
    }

    pub fn labels(&self) -> &ComponentLabels {
        &self.labels
    }

    /// Returns the reference point in artwork coordinates.
    pub fn reference(&self) -> Point {
        self.reference
    }

    pub fn view_box(&self) -> ViewBox {
        self.view_box
    }

    /// Returns the pin anchors in their final order.
    pub fn pins(&self) -> &[PinAnchor] {
        &self.pins
    }

    /// Returns the text label offset, if the artwork had a text anchor line.
    pub fn text_anchor(&self) -> Option<Point> {
        self.text_anchor
    }

    pub fn options(&self) -> &[OptionDescriptor] {
        &self.options
    }

    /// Returns the names of the active options in declaration order.
    pub fn active_options(&self) -> Vec<&str> {
        self.options
            .iter()
            .flat_map(OptionDescriptor::states)
            .filter(|state| state.is_active())
            .map(|state| state.leaf().name())
            .collect()
    }

    /// Returns the artwork left after marker lines were removed.
    pub fn content(&self) -> &[ArtworkNode] {
        &self.content
    }
}
