//! CLI logic for the symlib symbol library tool.
//!
//! This module contains the core CLI logic: planning the variants of a
//! catalog, and building a symbol library out of rendered artwork.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command};

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use log::{debug, error, info, warn};

use symlib::{LibraryBuilder, SymlibError, config::AppConfig, naming::parse_component_name};

use error_adapter::{diagnostics_to_reportables, render, to_reportable};

/// Totals of one CLI run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    processed: usize,
    failed: usize,
}

impl Summary {
    /// Number of variants planned, or artifacts read.
    pub fn processed(&self) -> usize {
        self.processed
    }

    /// Number of artifacts that failed to extract or extracted with errors.
    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Run the symlib CLI application
///
/// # Errors
///
/// Returns `SymlibError` for configuration loading errors, unreadable
/// catalogs, and I/O errors on the output files. Failures of individual
/// artifacts during a build are reported and counted in the returned
/// [`Summary`] instead.
pub fn run(args: &Args) -> Result<Summary, SymlibError> {
    let catalog = match &args.command {
        Command::Plan { catalog, .. } | Command::Build { catalog, .. } => catalog,
    };
    let app_config = config::load_config(args.config.as_ref(), Path::new(catalog))?;

    match &args.command {
        Command::Plan { catalog, output } => plan(app_config, catalog, output.as_deref()),
        Command::Build {
            catalog,
            input,
            output,
            library,
        } => build(
            app_config,
            catalog,
            Path::new(input),
            Path::new(output),
            Path::new(library),
        ),
    }
}

fn load_builder(config: AppConfig, catalog_path: &str) -> Result<LibraryBuilder, SymlibError> {
    info!(catalog_path; "Loading component catalog");
    let source = fs::read_to_string(catalog_path)?;
    LibraryBuilder::from_catalog_source(config, &source)
}

fn plan(
    config: AppConfig,
    catalog_path: &str,
    output: Option<&str>,
) -> Result<Summary, SymlibError> {
    let builder = load_builder(config, catalog_path)?;
    let variants = builder.plan();

    let mut listing = String::new();
    for variant in &variants {
        listing.push_str(variant.file_stem());
        listing.push('\n');
    }

    match output {
        Some(path) => {
            fs::write(path, listing)?;
            info!(output_file = path; "Variant list written");
        }
        None => io::stdout().lock().write_all(listing.as_bytes())?,
    }

    Ok(Summary {
        processed: variants.len(),
        failed: 0,
    })
}

fn build(
    config: AppConfig,
    catalog_path: &str,
    input: &Path,
    output: &Path,
    library: &Path,
) -> Result<Summary, SymlibError> {
    let builder = load_builder(config, catalog_path)?;
    let artifacts = collect_artifacts(input)?;
    info!(
        input_dir = input.display().to_string(),
        artifacts = artifacts.len();
        "Building symbol library"
    );

    fs::create_dir_all(output)?;

    let mut summary = Summary::default();
    let mut fragments = Vec::with_capacity(artifacts.len());

    for (file_stem, path) in &artifacts {
        summary.processed += 1;

        let extraction = fs::read_to_string(path)
            .map_err(SymlibError::from)
            .and_then(|source| builder.extract(file_stem, &source));
        let extraction = match extraction {
            Ok(extraction) => extraction,
            Err(err) => {
                error!("{}", render(&to_reportable(&err)));
                summary.failed += 1;
                continue;
            }
        };

        for reportable in diagnostics_to_reportables(file_stem, extraction.diagnostics()) {
            let rendered = render(&reportable);
            if extraction.has_errors() {
                error!("{rendered}");
            } else {
                warn!("{rendered}");
            }
        }
        if extraction.has_errors() {
            summary.failed += 1;
        }

        let (fragment, _) = extraction.into_parts();
        let symbol_path = output.join(format!("{file_stem}.svg"));
        fs::write(&symbol_path, builder.render_symbol(&fragment))?;
        debug!(symbol_file = symbol_path.display().to_string(); "Symbol written");

        fragments.push(fragment);
    }

    let document = builder.assemble(fragments);
    fs::write(library, builder.render_library(&document))?;

    if summary.is_success() {
        info!(
            library_file = library.display().to_string(),
            artifacts = summary.processed;
            "Symbol library built"
        );
    } else {
        warn!(
            library_file = library.display().to_string(),
            artifacts = summary.processed,
            failed = summary.failed;
            "Symbol library built with failures"
        );
    }

    Ok(summary)
}

/// Lists the `.svg` files in `dir` whose stem follows the variant naming
/// scheme, sorted by stem.
fn collect_artifacts(dir: &Path) -> Result<Vec<(String, PathBuf)>, SymlibError> {
    let mut artifacts = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("svg") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if parse_component_name(stem).is_err() {
            debug!(path = path.display().to_string(); "Skipping file outside the naming scheme");
            continue;
        }
        let stem = stem.to_string();
        artifacts.push((stem, path));
    }

    artifacts.sort();
    Ok(artifacts)
}
