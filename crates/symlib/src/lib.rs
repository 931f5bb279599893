//! Symlib - Builds circuit symbol libraries from marker-annotated artwork.
//!
//! Component artwork is rendered once per option variant with short colored
//! marker lines drawn into it. This crate recovers the metadata those lines
//! encode (reference point, pin anchors, text position), strips them from the
//! artwork, and assembles all variants into one SVG symbol library.
//!
//! The pipeline is:
//!
//! 1. [`plan`](LibraryBuilder::plan) the variants to render from a catalog;
//! 2. [`extract`](LibraryBuilder::extract) each rendered artifact;
//! 3. [`assemble`](LibraryBuilder::assemble) the fragments into a library;
//! 4. render single symbols or the whole library to SVG text.

pub mod assemble;
pub mod config;
pub mod diagnostic;
pub mod extract;
pub mod fragment;
pub mod plan;

mod error;
mod export;

pub use symlib_core::{anchor, catalog, color, geometry, marker, naming, options};

pub use error::SymlibError;
pub use export::{library::render_library, symbol::render_symbol};

use log::{debug, info, trace};

use symlib_core::catalog::Catalog;
use symlib_parser::{parse_artwork, parse_catalog};

use assemble::LibraryDocument;
use config::{AppConfig, ExtractionSettings};
use extract::{ExtractError, Extraction};
use fragment::VariantFragment;
use plan::PlannedVariant;

/// Builder for extracting and assembling symbol libraries.
///
/// Holds the component catalog and the resolved extraction settings, and
/// exposes each pipeline stage as a method.
///
/// # Examples
///
/// ```rust,no_run
/// use symlib::{LibraryBuilder, config::AppConfig};
///
/// let catalog = r#"
/// [[node]]
/// name = "ground"
/// "#;
/// let builder = LibraryBuilder::from_catalog_source(AppConfig::default(), catalog)
///     .expect("Failed to load catalog");
///
/// for variant in builder.plan() {
///     println!("{}", variant.file_stem());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct LibraryBuilder {
    catalog: Catalog,
    settings: ExtractionSettings,
    precision: usize,
}

impl LibraryBuilder {
    /// Create a new library builder for `catalog`.
    ///
    /// # Errors
    ///
    /// Returns [`SymlibError::Config`] if the extraction settings are invalid.
    pub fn new(config: AppConfig, catalog: Catalog) -> Result<Self, SymlibError> {
        let settings = config
            .extraction()
            .settings()
            .map_err(SymlibError::Config)?;
        Ok(Self {
            catalog,
            settings,
            precision: config.output().precision(),
        })
    }

    /// Create a new library builder from catalog TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`SymlibError::Parse`] if the catalog cannot be read and
    /// [`SymlibError::Config`] if the extraction settings are invalid.
    pub fn from_catalog_source(config: AppConfig, source: &str) -> Result<Self, SymlibError> {
        let catalog = parse_catalog(source)?;
        Self::new(config, catalog)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn settings(&self) -> &ExtractionSettings {
        &self.settings
    }

    /// Lists every variant to render, with the file stem it is expected under.
    pub fn plan(&self) -> Vec<PlannedVariant> {
        let variants = plan::plan(&self.catalog);
        info!(
            components = self.catalog.len(),
            variants = variants.len();
            "Variants planned"
        );
        variants
    }

    /// Resolves a rendered artifact's file stem to its planned variant.
    ///
    /// # Errors
    ///
    /// Returns [`SymlibError::Extract`] if the stem does not follow the
    /// naming scheme or names no catalog component.
    pub fn resolve(&self, file_stem: &str) -> Result<PlannedVariant, SymlibError> {
        plan::resolve(&self.catalog, file_stem)
            .map_err(|err| SymlibError::new_extract_error(file_stem, err))
    }

    /// Extracts the variant rendered to `source`, stored under `file_stem`.
    ///
    /// # Errors
    ///
    /// Returns [`SymlibError::Extract`], identifying the artifact by
    /// `file_stem`, if the stem cannot be resolved, the artwork cannot be
    /// read, or extraction fails.
    pub fn extract(&self, file_stem: &str, source: &str) -> Result<Extraction, SymlibError> {
        let wrap = |err: ExtractError| SymlibError::new_extract_error(file_stem, err);

        let variant = plan::resolve(&self.catalog, file_stem).map_err(wrap)?;
        let description = self
            .catalog
            .get(variant.identity().kind(), variant.index())
            .map_err(|err| wrap(err.into()))?;
        let artwork = parse_artwork(source).map_err(|err| wrap(err.into()))?;

        debug!(file_stem; "Extracting variant");
        let extraction = extract::extract(
            artwork,
            variant.identity(),
            description,
            variant.selection(),
            &self.settings,
        )
        .map_err(wrap)?;

        info!(
            file_stem,
            symbol_id = extraction.fragment().symbol_id(),
            diagnostics = extraction.diagnostics().len();
            "Variant extracted"
        );
        Ok(extraction)
    }

    /// Renders one fragment as a standalone `<symbol>` element.
    pub fn render_symbol(&self, fragment: &VariantFragment) -> String {
        render_symbol(fragment, self.precision).to_string()
    }

    /// Groups fragments by component identity.
    pub fn assemble<I>(&self, fragments: I) -> LibraryDocument
    where
        I: IntoIterator<Item = VariantFragment>,
    {
        let document = assemble::assemble(fragments);
        trace!(document:?; "Assembled library");
        document
    }

    /// Renders the library as one SVG document.
    pub fn render_library(&self, document: &LibraryDocument) -> String {
        let svg = render_library(document, self.precision).to_string();
        info!(components = document.components().len(); "SVG library rendered");
        svg
    }
}
