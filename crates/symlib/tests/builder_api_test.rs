//! Integration tests for the LibraryBuilder API
//!
//! These tests drive the whole pipeline through the public API: planning,
//! extraction of rendered artwork, assembly and SVG rendering.

use symlib::{
    LibraryBuilder, SymlibError,
    config::AppConfig,
    diagnostic::DiagnosticCode,
    extract::ExtractError,
    geometry::Point,
};

const CATALOG: &str = r#"
    [[node]]
    name = "probe"
    display_name = "Probe"
    pins = ["tip"]

    [[node.options]]
    kind = "toggle"
    name = "long"
    display_name = "long tip"

    [[path]]
    draw_name = "american resistor"
    group_name = "Resistors"
"#;

/// A node artifact with the reference point at (5,5), one pin line and a
/// text anchor line.
const PROBE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10">
    <g>
        <path d="M5 5L10 5" fill="none" stroke="#f00"/>
        <path d="M5 5L5 0" fill="none" stroke="#009999"/>
    </g>
    <circle cx="5" cy="5" r="3" fill="#0f0" stroke="#000"/>
</svg>"##;

const RESISTOR: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="-5 -2 10 4">
    <path d="M-5 0L0 0" fill="none" stroke="rgb(0,153,153)"/>
    <path d="M0 0L5 0" fill="none" stroke="rgb(4,153,153)"/>
    <path d="M0 0L0 -2" fill="none" stroke="#ff0"/>
    <rect x="-3" y="-1" width="6" height="2" fill="none" stroke="#000"/>
</svg>"##;

fn builder() -> LibraryBuilder {
    LibraryBuilder::from_catalog_source(AppConfig::default(), CATALOG)
        .expect("Failed to load catalog")
}

#[test]
fn test_plan_lists_every_variant() {
    let stems: Vec<_> = builder()
        .plan()
        .iter()
        .map(|variant| variant.file_stem().to_string())
        .collect();

    assert_eq!(
        stems,
        [
            "node_000_probe_long-tip",
            "node_000_probe",
            "path_000_american-resistor",
        ]
    );
}

#[test]
fn test_extract_node_variant() {
    let builder = builder();
    let extraction = builder
        .extract("node_000_probe", PROBE)
        .expect("Failed to extract");
    assert!(extraction.diagnostics().is_empty());

    let fragment = extraction.fragment();
    assert_eq!(fragment.symbol_id(), "node_probe");
    assert_eq!(fragment.reference(), Point::new(5.0, 5.0));
    assert_eq!(fragment.pins().len(), 1);
    assert_eq!(fragment.pins()[0].name(), "tip");
    assert_eq!(fragment.pins()[0].offset(), Point::new(0.0, -5.0));
    assert_eq!(fragment.text_anchor(), Some(Point::new(5.0, 0.0)));

    let symbol = builder.render_symbol(fragment);
    assert!(symbol.contains(r#"id="node_probe""#));
    assert!(symbol.contains("componentInformation"));
    assert!(symbol.contains(r#"class="fillable""#));
    assert!(!symbol.contains("#009999"));
}

#[test]
fn test_extract_path_variant_with_origin_line() {
    let extraction = builder()
        .extract("path_000_american-resistor", RESISTOR)
        .expect("Failed to extract");

    let fragment = extraction.fragment();
    assert_eq!(fragment.reference(), Point::new(0.0, 0.0));
    let pins: Vec<_> = fragment
        .pins()
        .iter()
        .map(|pin| (pin.name(), pin.offset()))
        .collect();
    assert_eq!(
        pins,
        [
            ("START", Point::new(-5.0, 0.0)),
            ("END", Point::new(5.0, 0.0)),
        ]
    );
    assert_eq!(fragment.text_anchor(), None);
}

#[test]
fn test_missing_anchor_is_a_warning() {
    let source = r##"<svg viewBox="0 0 10 10">
        <path d="M5 5L10 5" stroke="#f00"/>
        <path d="M5 5L5 10" stroke="#ff0"/>
    </svg>"##;
    let extraction = builder()
        .extract("node_000_probe", source)
        .expect("Failed to extract");

    assert!(!extraction.has_errors());
    let codes: Vec<_> = extraction
        .diagnostics()
        .iter()
        .map(|diagnostic| diagnostic.code())
        .collect();
    assert_eq!(codes, [Some(DiagnosticCode::W101)]);
    assert!(extraction.fragment().pins()[0].is_default());
}

#[test]
fn test_extract_errors_carry_the_artifact_id() {
    let source = r#"<svg viewBox="0 0 10 10"><rect width="1" height="1"/></svg>"#;
    let err = builder()
        .extract("node_000_probe", source)
        .expect_err("Artwork without marker lines should fail");

    match err {
        SymlibError::Extract { id, source } => {
            assert_eq!(id, "node_000_probe");
            assert_eq!(source, ExtractError::NoGeometry);
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let err = builder()
        .extract("node_007_missing", PROBE)
        .expect_err("Unknown component should fail");
    assert!(matches!(
        err,
        SymlibError::Extract {
            source: ExtractError::Config(_),
            ..
        }
    ));

    let err = builder()
        .extract("symbol", PROBE)
        .expect_err("Malformed stem should fail");
    assert!(matches!(
        err,
        SymlibError::Extract {
            source: ExtractError::Name(_),
            ..
        }
    ));
}

#[test]
fn test_render_library() {
    let builder = builder();
    let fragments = [
        ("node_000_probe_long-tip", PROBE),
        ("path_000_american-resistor", RESISTOR),
        ("node_000_probe", PROBE),
    ]
    .into_iter()
    .map(|(stem, source)| {
        builder
            .extract(stem, source)
            .expect("Failed to extract")
            .into_parts()
            .0
    });

    let document = builder.assemble(fragments);
    assert_eq!(document.components().len(), 2);
    assert_eq!(document.components()[0].variants().len(), 2);
    assert_eq!(
        document.components()[0].variants()[0].active_options(),
        ["long"]
    );

    let svg = builder.render_library(&document);
    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");
    assert!(svg.contains(r#"for="node_probe_long-tip""#));
    assert!(svg.contains(r#"for="path_american-resistor""#));
    assert_eq!(svg.matches("<component ").count(), 2);
}

#[test]
fn test_invalid_config_is_rejected() {
    let config: AppConfig = toml::from_str(
        r#"
        [extraction]
        text_anchor_color = "not a color"
        "#,
    )
    .unwrap();

    let result = LibraryBuilder::from_catalog_source(config, CATALOG);
    assert!(matches!(result, Err(SymlibError::Config(_))));
}

#[test]
fn test_invalid_catalog_is_rejected() {
    let result = LibraryBuilder::from_catalog_source(AppConfig::default(), "[[node]]\npins = 3");
    assert!(matches!(result, Err(SymlibError::Parse(_))));
}
