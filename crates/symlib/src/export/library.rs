//! Serialization of an assembled library as one SVG document.

use log::debug;
use svg::{
    self, Node,
    node::element::{self as svg_element, Element},
};

use crate::{
    assemble::{ComponentRecord, LibraryDocument, VariantRecord},
    export::{
        nonzero_coordinate, options_element, pin_element, symbol_element, text_position_element,
    },
};

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

/// Renders the library as an SVG document.
///
/// Every variant's artwork becomes a `<symbol>` under `<defs>`. A single
/// `<metadata>` block follows with one `<component>` per record; each of
/// its `<variant>` children points at its symbol through the `for`
/// attribute.
pub fn render_library(document: &LibraryDocument, precision: usize) -> svg::Document {
    let mut defs = svg_element::Definitions::new();
    for variant in document.variants() {
        defs = defs.add(symbol_element(variant.symbol_id(), variant.content()));
    }

    let mut metadata = Element::new("metadata");
    for component in document.components() {
        metadata.append(component_element(component, precision));
    }

    debug!(
        components = document.components().len(),
        symbols = document.variants().count();
        "Library rendered"
    );

    svg::Document::new()
        .set("version", "1.1")
        .set("xmlns", SVG_NAMESPACE)
        .set("xmlns:xlink", XLINK_NAMESPACE)
        .add(defs)
        .add(metadata)
}

fn component_element(component: &ComponentRecord, precision: usize) -> Element {
    let identity = component.identity();
    let labels = component.labels();

    let mut element = Element::new("component");
    element.assign("type", identity.kind().as_str());
    element.assign("display", labels.display().unwrap_or_default());
    element.assign("tikz", identity.label());
    element.assign("group", labels.group().unwrap_or_default());
    if let Some(shape) = labels.shape() {
        element.assign("shape", shape);
    }

    if !component.options().is_empty() {
        element.append(options_element(component.options()));
    }
    for variant in component.variants() {
        element.append(variant_element(variant, precision));
    }
    element
}

fn variant_element(variant: &VariantRecord, precision: usize) -> Element {
    let mut element = Element::new("variant");
    if let Some(x) = nonzero_coordinate(variant.reference().x(), precision) {
        element.assign("x", x);
    }
    if let Some(y) = nonzero_coordinate(variant.reference().y(), precision) {
        element.assign("y", y);
    }
    element.assign("viewBox", variant.view_box().to_string());
    element.assign("for", variant.symbol_id());

    for name in variant.active_options() {
        let mut option = Element::new("option");
        option.assign("name", name.as_str());
        element.append(option);
    }

    for pin in variant.pins() {
        element.append(pin_element(pin, precision));
    }

    if let Some(text_anchor) = variant.text_anchor() {
        element.append(text_position_element(text_anchor, precision));
    }
    element
}

#[cfg(test)]
mod tests {
    use symlib_core::{
        catalog::{ComponentDescription, ComponentIdentity, ComponentKind},
        options::{OptionLeaf, OptionSelection, OptionSpec},
    };
    use symlib_parser::{ArtworkElement, parse_artwork};

    use super::*;
    use crate::{assemble::assemble, config::ExtractionSettings, extract::extract};

    const ARTWORK: &str = r##"<svg viewBox="0 0 10 10">
        <path d="M5 5L10 5" stroke="#f00"/>
        <path d="M5 5L5 0" stroke="#009999"/>
        <rect x="1" y="1" width="8" height="8"/>
    </svg>"##;

    fn fragment(label: &str, selection: &[&str]) -> crate::fragment::VariantFragment {
        let description = ComponentDescription::new(label)
            .with_display_name(label.to_uppercase())
            .with_group("Probes")
            .with_pins(["tip"])
            .with_options(vec![OptionSpec::Toggle(OptionLeaf::new("flag"))]);
        let identity = ComponentIdentity::new(ComponentKind::Node, label);
        let selection =
            OptionSelection::new(selection.iter().map(|name| OptionLeaf::new(*name)).collect());

        extract(
            parse_artwork(ARTWORK).unwrap(),
            &identity,
            &description,
            &selection,
            &ExtractionSettings::default(),
        )
        .unwrap()
        .into_parts()
        .0
    }

    fn children<'a>(element: &'a ArtworkElement, name: &str) -> Vec<&'a ArtworkElement> {
        element
            .child_elements()
            .filter(|child| child.name() == name)
            .collect()
    }

    #[test]
    fn test_render_library_structure() {
        let document = assemble([
            fragment("probe", &["flag"]),
            fragment("meter", &[]),
            fragment("probe", &[]),
        ]);
        let text = render_library(&document, 5).to_string();
        let root = parse_artwork(&text).unwrap().into_root();

        assert_eq!(root.attribute("version"), Some("1.1"));
        assert_eq!(root.attribute("xmlns:xlink"), Some(XLINK_NAMESPACE));

        let defs = children(&root, "defs");
        assert_eq!(defs.len(), 1);
        let symbol_ids: Vec<_> = children(defs[0], "symbol")
            .into_iter()
            .map(|symbol| symbol.attribute("id"))
            .collect();
        assert_eq!(
            symbol_ids,
            [Some("node_probe_flag"), Some("node_probe"), Some("node_meter")]
        );
        assert!(children(children(defs[0], "symbol")[0], "metadata").is_empty());

        let metadata = children(&root, "metadata");
        let components = children(metadata[0], "component");
        assert_eq!(components.len(), 2);

        let probe = components[0];
        assert_eq!(probe.attribute("type"), Some("node"));
        assert_eq!(probe.attribute("tikz"), Some("probe"));
        assert_eq!(probe.attribute("display"), Some("PROBE"));
        assert_eq!(probe.attribute("group"), Some("Probes"));
        assert_eq!(probe.attribute("shape"), None);

        let shared = children(children(probe, "options")[0], "option");
        assert_eq!(shared[0].attribute("active"), None);

        let variants = children(probe, "variant");
        assert_eq!(variants.len(), 2);
        assert_eq!(variants[0].attribute("for"), Some("node_probe_flag"));
        assert_eq!(variants[0].attribute("x"), Some("5.00000"));
        assert_eq!(variants[0].attribute("viewBox"), Some("0 0 10 10"));
        let active: Vec<_> = children(variants[0], "option")
            .into_iter()
            .map(|option| option.attribute("name"))
            .collect();
        assert_eq!(active, [Some("flag")]);
        assert!(children(variants[1], "option").is_empty());

        assert!(children(variants[1], "pins").is_empty());
        let pins = children(variants[1], "pin");
        assert_eq!(pins.len(), 1);
        let pin = pins[0];
        assert_eq!(pin.attribute("name"), Some("tip"));
        assert_eq!(pin.attribute("x"), None);
        assert_eq!(pin.attribute("y"), Some("-5.00000"));

        let text_position = children(variants[1], "textpos")[0];
        assert_eq!(text_position.attribute("x"), Some("5.00000"));
    }

    #[test]
    fn test_variant_at_origin_omits_coordinates() {
        let source = r##"<svg viewBox="0 0 4 4">
            <path d="M0 0L0 -2" stroke="#009999"/>
        </svg>"##;
        let description = ComponentDescription::new("dot").with_pins(["a"]);
        let identity = ComponentIdentity::new(ComponentKind::Node, "dot");
        let fragment = extract(
            parse_artwork(source).unwrap(),
            &identity,
            &description,
            &OptionSelection::default(),
            &ExtractionSettings::default(),
        )
        .unwrap()
        .into_parts()
        .0;

        let text = render_library(&assemble([fragment]), 5).to_string();
        let root = parse_artwork(&text).unwrap().into_root();
        let component = children(children(&root, "metadata")[0], "component")[0];
        let variant = children(component, "variant")[0];
        assert_eq!(variant.attribute("x"), None);
        assert_eq!(variant.attribute("y"), None);
        assert_eq!(children(variant, "pin").len(), 1);
        assert_eq!(component.attribute("display"), Some(""));
        assert_eq!(component.attribute("group"), Some(""));
        assert!(children(component, "options").is_empty());
        assert!(children(variant, "textpos").is_empty());
    }

    #[test]
    fn test_empty_library() {
        let text = render_library(&LibraryDocument::default(), 5).to_string();
        let root = parse_artwork(&text).unwrap().into_root();
        assert!(children(&root, "metadata")[0].child_elements().next().is_none());
    }
}
