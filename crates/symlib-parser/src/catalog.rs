//! TOML component catalog reader.

use log::debug;

use symlib_core::catalog::Catalog;

use crate::error::ParseError;

/// Parses and validates a component catalog.
///
/// The catalog is a TOML document with `[[node]]` and `[[path]]` arrays of
/// component descriptions. Array positions are the component indices.
///
/// # Errors
///
/// Returns [`ParseError::Catalog`] if the TOML is malformed or does not
/// match the catalog schema, and [`ParseError::InvalidCatalog`] if a
/// component declaration is invalid.
pub fn parse_catalog(source: &str) -> Result<Catalog, ParseError> {
    let catalog: Catalog =
        toml::from_str(source).map_err(|err| ParseError::Catalog(err.to_string()))?;
    catalog.validate()?;
    debug!(components = catalog.len(); "Catalog parsed");
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use symlib_core::{
        catalog::{ComponentKind, ConfigError},
        options::{OptionSpec, expand},
    };

    use super::*;

    const CATALOG: &str = r#"
        [[node]]
        name = "nigfete"
        display_name = "n-channel IGFET enhancement"
        group = "Transistors"
        pins = ["gate", "drain", "source", "center"]

        [[node.options]]
        kind = "toggle"
        name = "solderdot"
        display_name = "solder dot"
        add_pins = ["bulk"]

        [[node.options]]
        kind = "enum"
        display_name = "arrow"
        select_none = false

        [[node.options.options]]
        name = "arrowmos"

        [[node.options.options]]
        name = "noarrowmos"
        sub_pins = ["center"]

        [[path]]
        draw_name = "american resistor"
        display_name = "Resistor (American)"
        group_name = "Resistors"
        fillable = true
    "#;

    #[test]
    fn test_parse_catalog() {
        let catalog = parse_catalog(CATALOG).unwrap();
        assert_eq!(catalog.len(), 2);

        let node = catalog.get(ComponentKind::Node, 0).unwrap();
        assert_eq!(node.name(), "nigfete");
        assert_eq!(node.group(), Some("Transistors"));
        assert_eq!(node.pins(), ["gate", "drain", "source", "center"]);
        assert_eq!(node.options().len(), 2);
        assert!(matches!(node.options()[0], OptionSpec::Toggle(_)));
        assert!(matches!(node.options()[1], OptionSpec::Enum(_)));
        assert_eq!(expand(node.options()).len(), 4);

        let path = catalog.get(ComponentKind::Path, 0).unwrap();
        assert_eq!(path.name(), "american resistor");
        assert_eq!(path.group(), Some("Resistors"));
        assert_eq!(path.fillable(), Some(true));
        assert_eq!(
            path.shape_name(ComponentKind::Path).as_deref(),
            Some("americanresistorshape")
        );
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = parse_catalog("").unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            parse_catalog("[[node]\nname = 1"),
            Err(ParseError::Catalog(_))
        ));
    }

    #[test]
    fn test_unknown_option_kind() {
        let source = r#"
            [[node]]
            name = "x"
            [[node.options]]
            kind = "slider"
            name = "y"
        "#;
        assert!(matches!(parse_catalog(source), Err(ParseError::Catalog(_))));
    }

    #[test]
    fn test_invalid_declaration() {
        let source = r#"
            [[node]]
            name = "x"
            [[node.options]]
            kind = "toggle"
            name = "a"
            [[node.options]]
            kind = "toggle"
            name = "a"
        "#;
        assert!(matches!(
            parse_catalog(source),
            Err(ParseError::InvalidCatalog(ConfigError::InvalidComponent { .. }))
        ));
    }
}
