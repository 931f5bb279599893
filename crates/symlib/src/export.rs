//! SVG serialization of symbols and libraries.
//!
//! - [`symbol`] renders one [`VariantFragment`](crate::fragment::VariantFragment)
//!   as a `<symbol>` with its metadata block.
//! - [`library`] renders a [`LibraryDocument`](crate::assemble::LibraryDocument)
//!   as one SVG document: every symbol under `<defs>` plus a single metadata
//!   block describing all components.

pub mod library;
pub mod symbol;

use svg::{
    Node,
    node::{
        Text,
        element::{Element, Symbol},
    },
};

use symlib_core::geometry::Point;
use symlib_parser::{ArtworkElement, ArtworkNode};

use crate::fragment::{OptionDescriptor, OptionState, PinAnchor};

/// Formats a coordinate with `precision` decimals, without a negative zero.
pub(crate) fn format_coordinate(value: f64, precision: usize) -> String {
    let formatted = format!("{value:.precision$}");
    if formatted.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        format!("{:.precision$}", 0.0)
    } else {
        formatted
    }
}

/// Formats a coordinate, or returns `None` if it rounds to zero.
pub(crate) fn nonzero_coordinate(value: f64, precision: usize) -> Option<String> {
    let formatted = format_coordinate(value, precision);
    let zero = format!("{:.precision$}", 0.0);
    (formatted != zero).then_some(formatted)
}

/// Builds a `<symbol>` holding a copy of the artwork `content`.
pub(crate) fn symbol_element(id: &str, content: &[ArtworkNode]) -> Symbol {
    let mut symbol = Symbol::new().set("id", id);
    for node in content {
        symbol.append(artwork_node(node));
    }
    symbol
}

fn artwork_node(node: &ArtworkNode) -> Box<dyn Node> {
    match node {
        ArtworkNode::Element(element) => Box::new(artwork_element(element)),
        ArtworkNode::Text(text) => Box::new(Text::new(text.as_str())),
    }
}

fn artwork_element(element: &ArtworkElement) -> Element {
    let mut output = Element::new(element.name());
    for (name, value) in element.attributes() {
        // Attribute values are written inside double quotes, which the
        // writer does not escape.
        if value.contains('"') {
            output.assign(name, value.replace('"', "'"));
        } else {
            output.assign(name, value);
        }
    }
    for child in element.children() {
        output.append(artwork_node(child));
    }
    output
}

/// Builds the `<options>` block for `descriptors`.
pub(crate) fn options_element(descriptors: &[OptionDescriptor]) -> Element {
    let mut options = Element::new("options");
    for descriptor in descriptors {
        match descriptor {
            OptionDescriptor::Toggle(state) => options.append(option_element(state)),
            OptionDescriptor::Enum {
                display_name,
                select_none,
                options: states,
            } => {
                let mut enumeration = Element::new("enumopt");
                if let Some(select_none) = select_none {
                    enumeration.assign("selectNone", select_none.to_string());
                }
                if let Some(display_name) = display_name {
                    enumeration.assign("name", display_name.as_str());
                }
                for state in states {
                    enumeration.append(option_element(state));
                }
                options.append(enumeration);
            }
        }
    }
    options
}

fn option_element(state: &OptionState) -> Element {
    let mut option = Element::new("option");
    option.assign("name", state.leaf().name());
    if let Some(display_name) = state.leaf().display_name() {
        option.assign("display", display_name);
    }
    if state.is_active() {
        option.assign("active", "true");
    }
    option
}

/// Builds one `<pin>` element; zero coordinates are omitted.
pub(crate) fn pin_element(pin: &PinAnchor, precision: usize) -> Element {
    let mut element = Element::new("pin");
    element.assign("name", pin.name());
    if let Some(x) = nonzero_coordinate(pin.offset().x(), precision) {
        element.assign("x", x);
    }
    if let Some(y) = nonzero_coordinate(pin.offset().y(), precision) {
        element.assign("y", y);
    }
    if pin.is_default() {
        element.assign("isDefault", "true");
    }
    element
}

/// Builds the `<textpos>` element for a text anchor offset.
pub(crate) fn text_position_element(offset: Point, precision: usize) -> Element {
    let mut element = Element::new("textpos");
    element.assign("x", format_coordinate(offset.x(), precision));
    element.assign("y", format_coordinate(offset.y(), precision));
    element
}
