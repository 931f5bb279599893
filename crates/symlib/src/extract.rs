//! Variant extraction.
//!
//! Extraction turns one rendered artifact into a [`VariantFragment`]. The
//! artwork encodes its metadata as short marker lines that all touch the
//! component's reference point:
//!
//! - a line in the text anchor color points at the text label position;
//! - lines in an origin color only help locate the reference point;
//! - every other marker line points at a pin, and its stroke color encodes
//!   the pin's position in the expected anchor list.
//!
//! Marker lines are stripped from the artwork; what is left becomes the
//! symbol content.

mod classify;

pub use classify::{PathClass, classify_path};

use log::{debug, trace};
use thiserror::Error;

use symlib_core::{
    catalog::{CENTER_PIN, ComponentDescription, ComponentIdentity, ComponentKind, ConfigError},
    color::Rgb,
    geometry::Point,
    marker::{MarkerLine, find_reference_point},
    naming::{NameError, component_name},
    options::OptionSelection,
};
use symlib_parser::{Artwork, ArtworkElement, ParseError};

use crate::{
    config::ExtractionSettings,
    diagnostic::{Diagnostic, DiagnosticCode, DiagnosticCollector},
    fragment::{ComponentLabels, OptionDescriptor, PinAnchor, VariantFragment},
};

/// Implicit first anchor of path components.
pub const START_PIN: &str = "START";

/// Implicit second anchor of path components.
pub const END_PIN: &str = "END";

/// Fatal extraction errors; the artifact produces no fragment.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractError {
    #[error("artwork contains no marker lines")]
    NoGeometry,

    #[error("anchor color {color} decodes to index {index}, but only {anchors} anchors are expected")]
    UnknownPinColor { color: Rgb, index: u8, anchors: usize },

    #[error("stroke color {0} is neither a reserved marker color nor an anchor color")]
    InvalidPinColor(Rgb),

    #[error("artwork has no viewBox")]
    MissingViewBox,

    #[error("artwork has a malformed viewBox: {0}")]
    InvalidViewBox(String),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Name(#[from] NameError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A successful extraction: the fragment plus its non-fatal diagnostics.
#[derive(Debug, Clone)]
pub struct Extraction {
    fragment: VariantFragment,
    diagnostics: Vec<Diagnostic>,
}

impl Extraction {
    pub fn fragment(&self) -> &VariantFragment {
        &self.fragment
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Returns `true` if any diagnostic has error severity.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diagnostic| diagnostic.severity().is_error())
    }

    pub fn into_parts(self) -> (VariantFragment, Vec<Diagnostic>) {
        (self.fragment, self.diagnostics)
    }
}

/// Extracts the metadata of one variant from its rendered artwork.
///
/// `description` is the catalog entry of `identity`, and `selection` the
/// options the artwork was rendered with.
///
/// # Errors
///
/// Returns [`ExtractError::NoGeometry`] if the artwork has no marker lines,
/// [`ExtractError::InvalidPinColor`] or [`ExtractError::UnknownPinColor`]
/// if a pin marker's color does not name an expected anchor, and a
/// view-box error if the artwork's view box is missing or malformed.
pub fn extract(
    mut artwork: Artwork,
    identity: &ComponentIdentity,
    description: &ComponentDescription,
    selection: &OptionSelection,
    settings: &ExtractionSettings,
) -> Result<Extraction, ExtractError> {
    let view_box = artwork.view_box().map_err(|err| match err {
        ParseError::MissingViewBox => ExtractError::MissingViewBox,
        other => ExtractError::InvalidViewBox(other.to_string()),
    })?;
    let tolerance = settings.tolerance();
    let mut diagnostics = DiagnosticCollector::new();

    let lines = strip_marker_lines(&mut artwork, &mut diagnostics);
    recolor_fillable(&mut artwork, settings);

    let reference =
        find_reference_point(&lines, tolerance).map_err(|_| ExtractError::NoGeometry)?;
    debug!(
        component:% = identity,
        lines = lines.len(),
        ref_x = reference.x(),
        ref_y = reference.y();
        "Reference point found"
    );

    let (names, has_center) = expected_anchor_names(identity.kind(), description, selection);
    let mut offsets: Vec<Option<Point>> = vec![None; names.len()];

    for line in lines.iter().filter(|line| !settings.is_reserved(line.color())) {
        let index = settings
            .codec()
            .decode(line.color())
            .map_err(|_| ExtractError::InvalidPinColor(line.color()))?;
        let anchors = names.len();
        let slot = offsets
            .get_mut(usize::from(index))
            .ok_or(ExtractError::UnknownPinColor {
                color: line.color(),
                index,
                anchors,
            })?;

        let far = match line.far_endpoint(reference, tolerance) {
            Some(far) => far,
            None => {
                diagnostics.emit(
                    Diagnostic::error(format!(
                        "ambiguous orientation for anchor `{}` of {identity}",
                        names[usize::from(index)]
                    ))
                    .with_code(DiagnosticCode::W100)
                    .with_help("the marker line's end point was used as the anchor"),
                );
                line.end()
            }
        };
        *slot = Some(far.sub_point(reference));
    }

    let mut pins = Vec::with_capacity(names.len() + 1);
    for (name, offset) in names.into_iter().zip(offsets) {
        let offset = offset.unwrap_or_else(|| {
            diagnostics.emit(
                Diagnostic::warning(format!("anchor `{name}` of {identity} not found"))
                    .with_code(DiagnosticCode::W101)
                    .with_help("the anchor was placed at the reference point"),
            );
            Point::default()
        });
        pins.push(PinAnchor::new(name, offset, false));
    }
    if has_center {
        pins.push(PinAnchor::new(CENTER_PIN, Point::default(), false));
    }
    if let Some(position) = pins
        .iter()
        .position(|pin| pin.offset().is_near_origin(tolerance))
    {
        pins[position].mark_default();
    }

    let text_anchor = lines
        .iter()
        .find(|line| line.color() == settings.text_anchor())
        .map(|line| {
            line.far_endpoint(reference, tolerance)
                .unwrap_or(line.end())
                .sub_point(reference)
        });

    let options = description
        .options()
        .iter()
        .map(|spec| OptionDescriptor::from_spec(spec, selection))
        .collect();

    let fragment = VariantFragment {
        symbol_id: component_name(None, identity.label(), identity.kind(), &selection.labels()),
        identity: identity.clone(),
        labels: ComponentLabels::from_description(identity.kind(), description),
        reference,
        view_box,
        pins,
        text_anchor,
        options,
        content: artwork.into_root().into_children(),
    };
    trace!(fragment:?; "Variant extracted");

    Ok(Extraction {
        fragment,
        diagnostics: diagnostics.finish(),
    })
}

/// Removes marker lines from the artwork and returns them in document order.
fn strip_marker_lines(
    artwork: &mut Artwork,
    diagnostics: &mut DiagnosticCollector,
) -> Vec<MarkerLine> {
    let mut lines = Vec::new();
    artwork
        .root_mut()
        .retain_descendants(&mut |element: &ArtworkElement| match classify_path(element) {
            PathClass::Line(line) => {
                lines.push(line);
                false
            }
            PathClass::Malformed(reason) => {
                diagnostics.emit(
                    Diagnostic::warning(format!("unreadable marker candidate: {reason}"))
                        .with_code(DiagnosticCode::W102)
                        .with_help("the path was kept as symbol content"),
                );
                true
            }
            PathClass::NotMetadata => true,
        });
    lines
}

/// Turns regions filled with the fillable color into classed, unfilled regions.
fn recolor_fillable(artwork: &mut Artwork, settings: &ExtractionSettings) {
    artwork
        .root_mut()
        .for_each_descendant_mut(&mut |element: &mut ArtworkElement| {
            if element.attribute("fill") == Some(settings.fillable_color()) {
                element.set_attribute("class", settings.fillable_class());
                element.set_attribute("fill", "none");
            }
        });
}

/// Builds the ordered anchor names pin marker indices refer to.
///
/// Returns the names and whether a `center` anchor is to be appended. A pin
/// added by the selection under a name already present is listed once.
fn expected_anchor_names(
    kind: ComponentKind,
    description: &ComponentDescription,
    selection: &OptionSelection,
) -> (Vec<String>, bool) {
    let removed: Vec<&str> = selection.removed_pins().collect();
    let mut pins: Vec<&str> = description
        .pins()
        .iter()
        .map(String::as_str)
        .filter(|pin| !removed.contains(pin))
        .collect();
    for added in selection.added_pins() {
        if pins.contains(&added) {
            trace!(pin = added; "Added pin is already declared");
        } else {
            pins.push(added);
        }
    }

    let has_center = pins.contains(&CENTER_PIN);
    let implicit: &[&str] = match kind {
        ComponentKind::Node => &[],
        ComponentKind::Path => &[START_PIN, END_PIN],
    };
    let names = implicit
        .iter()
        .copied()
        .chain(pins.into_iter().filter(|pin| *pin != CENTER_PIN && !implicit.contains(pin)))
        .map(str::to_string)
        .collect();

    (names, has_center)
}
