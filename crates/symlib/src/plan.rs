//! Variant planning and resolution.
//!
//! Planning turns the catalog into the full list of variants to render,
//! each with the file stem its artwork is expected under. Resolution is the
//! inverse: given a rendered artifact's file stem, find the variant it was
//! rendered for.

use log::debug;

use symlib_core::{
    catalog::{Catalog, ComponentDescription, ComponentIdentity, ComponentKind, ConfigError},
    naming::{component_name, parse_component_name},
    options::{OptionSelection, expand},
};

use crate::extract::ExtractError;

/// One buildable variant of a catalog component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedVariant {
    identity: ComponentIdentity,
    index: usize,
    selection: OptionSelection,
    file_stem: String,
}

impl PlannedVariant {
    pub fn identity(&self) -> &ComponentIdentity {
        &self.identity
    }

    /// Returns the component's position in its catalog list.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn selection(&self) -> &OptionSelection {
        &self.selection
    }

    /// Returns the file stem the rendered artwork is stored under.
    pub fn file_stem(&self) -> &str {
        &self.file_stem
    }

    /// Returns the id of the emitted symbol: the file stem without the index.
    pub fn symbol_id(&self) -> String {
        component_name(
            None,
            self.identity.label(),
            self.identity.kind(),
            &self.selection.labels(),
        )
    }
}

/// Plans every variant of one component, in expansion order.
pub fn plan_component(
    kind: ComponentKind,
    index: usize,
    description: &ComponentDescription,
) -> Vec<PlannedVariant> {
    let identity = ComponentIdentity::new(kind, description.name());
    expand(description.options())
        .into_iter()
        .map(|selection| {
            let file_stem = component_name(
                Some(index),
                identity.label(),
                kind,
                &selection.labels(),
            );
            PlannedVariant {
                identity: identity.clone(),
                index,
                selection,
                file_stem,
            }
        })
        .collect()
}

/// Plans every variant of every catalog component: nodes first, then paths.
pub fn plan(catalog: &Catalog) -> Vec<PlannedVariant> {
    catalog
        .components()
        .flat_map(|(kind, index, description)| plan_component(kind, index, description))
        .collect()
}

/// Finds the planned variant a rendered artifact's file stem belongs to.
///
/// If no planned stem matches exactly, the last variant of the component
/// is used.
///
/// # Errors
///
/// Returns [`ExtractError::Name`] if the stem does not follow the naming
/// scheme and [`ExtractError::Config`] if it names no catalog component.
pub fn resolve(catalog: &Catalog, file_stem: &str) -> Result<PlannedVariant, ExtractError> {
    let (index, kind) = parse_component_name(file_stem)?;
    let description = catalog.get(kind, index)?;

    let mut variants = plan_component(kind, index, description);
    if let Some(position) = variants
        .iter()
        .position(|variant| variant.file_stem == file_stem)
    {
        return Ok(variants.swap_remove(position));
    }

    let fallback = variants.pop().ok_or_else(|| ConfigError::InvalidComponent {
        kind,
        name: description.name().to_string(),
        reason: "options admit no selection".to_string(),
    })?;
    debug!(
        file_stem,
        fallback = fallback.file_stem();
        "No planned variant matches file stem, using last selection"
    );
    Ok(fallback)
}
