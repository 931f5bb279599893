//! Serialization of a single variant as a `<symbol>`.

use svg::{
    Node,
    node::element::{Element, Symbol},
};

use crate::{
    export::{
        format_coordinate, options_element, pin_element, symbol_element, text_position_element,
    },
    fragment::VariantFragment,
};

/// Renders `fragment` as a `<symbol>` element.
///
/// The symbol holds the cleaned artwork followed by a
/// `<metadata><componentInformation …/></metadata>` block describing the
/// component and this variant's geometry.
pub fn render_symbol(fragment: &VariantFragment, precision: usize) -> Symbol {
    let mut symbol = symbol_element(fragment.symbol_id(), fragment.content());
    let mut metadata = Element::new("metadata");
    metadata.append(component_information(fragment, precision));
    symbol.append(metadata);
    symbol
}

fn component_information(fragment: &VariantFragment, precision: usize) -> Element {
    let identity = fragment.identity();
    let labels = fragment.labels();

    let mut info = Element::new("componentInformation");
    info.assign("type", identity.kind().as_str());
    if let Some(display) = labels.display() {
        info.assign("display", display);
    }
    info.assign("tikz", identity.label());
    if let Some(shape) = labels.shape() {
        info.assign("shape", shape);
    }
    if let Some(group) = labels.group() {
        info.assign("group", group);
    }
    if let Some(class) = labels.class() {
        info.assign("class", class);
    }
    if let Some(fillable) = labels.fillable() {
        info.assign("fillable", fillable.to_string());
    }
    if let Some(source) = labels.source() {
        info.assign("source", source);
    }
    info.assign("refX", format_coordinate(fragment.reference().x(), precision));
    info.assign("refY", format_coordinate(fragment.reference().y(), precision));
    info.assign("viewBox", fragment.view_box().to_string());

    if !fragment.options().is_empty() {
        info.append(options_element(fragment.options()));
    }

    if !fragment.pins().is_empty() {
        let mut pins = Element::new("pins");
        for pin in fragment.pins() {
            pins.append(pin_element(pin, precision));
        }
        info.append(pins);
    }

    if let Some(text_anchor) = fragment.text_anchor() {
        info.append(text_position_element(text_anchor, precision));
    }

    info
}

#[cfg(test)]
mod tests {
    use symlib_core::{
        catalog::{ComponentDescription, ComponentIdentity, ComponentKind},
        options::{EnumOption, OptionLeaf, OptionSelection, OptionSpec},
    };
    use symlib_parser::{ArtworkElement, parse_artwork};

    use super::*;
    use crate::{config::ExtractionSettings, extract::extract};

    fn fragment() -> VariantFragment {
        let source = r##"<svg viewBox="0 0 10 10">
            <path d="M5 5L10 5" stroke="#f00"/>
            <path d="M5 5L0 5" stroke="#009999"/>
            <path d="M5 5L10 5" stroke="#049999"/>
            <circle cx="5" cy="5" r="2" fill="#0f0"/>
        </svg>"##;
        let description = ComponentDescription::new("american resistor")
            .with_display_name("Resistor")
            .with_group("Resistors")
            .with_options(vec![
                OptionSpec::Toggle(OptionLeaf::new("v")),
                OptionSpec::Enum(
                    EnumOption::new(vec![OptionLeaf::new("a"), OptionLeaf::new("b")])
                        .with_display_name("letters"),
                ),
            ]);
        let identity = ComponentIdentity::new(ComponentKind::Path, description.name());
        let selection = OptionSelection::new(vec![OptionLeaf::new("b")]);

        extract(
            parse_artwork(source).unwrap(),
            &identity,
            &description,
            &selection,
            &ExtractionSettings::default(),
        )
        .unwrap()
        .into_parts()
        .0
    }

    fn find<'a>(element: &'a ArtworkElement, name: &str) -> &'a ArtworkElement {
        element
            .child_elements()
            .find(|child| child.name() == name)
            .unwrap()
    }

    #[test]
    fn test_render_symbol_structure() {
        let fragment = fragment();
        let text = format!("<svg>{}</svg>", render_symbol(&fragment, 5));
        let root = parse_artwork(&text).unwrap().into_root();

        let symbol = find(&root, "symbol");
        assert_eq!(symbol.attribute("id"), Some("path_american-resistor_b"));

        let circle = find(symbol, "circle");
        assert_eq!(circle.attribute("class"), Some("fillable"));

        let info = find(find(symbol, "metadata"), "componentInformation");
        assert_eq!(info.attribute("type"), Some("path"));
        assert_eq!(info.attribute("display"), Some("Resistor"));
        assert_eq!(info.attribute("tikz"), Some("american resistor"));
        assert_eq!(info.attribute("shape"), Some("americanresistorshape"));
        assert_eq!(info.attribute("group"), Some("Resistors"));
        assert_eq!(info.attribute("refX"), Some("5.00000"));
        assert_eq!(info.attribute("refY"), Some("5.00000"));
        assert_eq!(info.attribute("viewBox"), Some("0 0 10 10"));
        assert_eq!(info.attribute("class"), None);

        let options = find(info, "options");
        let option = find(options, "option");
        assert_eq!(option.attribute("name"), Some("v"));
        assert_eq!(option.attribute("active"), None);
        let enumeration = find(options, "enumopt");
        assert_eq!(enumeration.attribute("name"), Some("letters"));
        let active: Vec<_> = enumeration
            .child_elements()
            .filter(|option| option.attribute("active") == Some("true"))
            .map(|option| option.attribute("name"))
            .collect();
        assert_eq!(active, [Some("b")]);

        let pins: Vec<_> = find(info, "pins")
            .child_elements()
            .map(|pin| (pin.attribute("name"), pin.attribute("x"), pin.attribute("y")))
            .collect();
        assert_eq!(
            pins,
            [
                (Some("START"), Some("-5.00000"), None),
                (Some("END"), Some("5.00000"), None),
            ]
        );

        let text_position = find(info, "textpos");
        assert_eq!(text_position.attribute("x"), Some("5.00000"));
        assert_eq!(text_position.attribute("y"), Some("0.00000"));
    }
}
