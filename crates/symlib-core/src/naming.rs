//! The stable naming scheme for rendered variants.
//!
//! Every variant is rendered to a file whose stem encodes the component it
//! belongs to:
//!
//! ```text
//! {kind}_{index:03}_{label}_{option1-option2-...}
//! ```
//!
//! Every non-word character in every segment is replaced by `-`. The index
//! segment is omitted for symbol ids, and the options segment is omitted
//! when no option is selected. Names must be bit-for-bit reproducible:
//! the per-variant artwork is found again by this name.

use thiserror::Error;

use crate::catalog::ComponentKind;

/// Errors produced when parsing a variant name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("variant name `{0}` has fewer than two `_`-separated segments")]
    MissingSegments(String),

    #[error("variant name `{name}` has unknown kind `{kind}`")]
    UnknownKind { name: String, kind: String },

    #[error("variant name `{name}` has non-numeric index `{index}`")]
    InvalidIndex { name: String, index: String },
}

/// Builds the name of a component variant.
///
/// `options` are the labels of the selected options in selection order.
///
/// # Examples
///
/// ```
/// use symlib_core::{catalog::ComponentKind, naming::component_name};
///
/// let name = component_name(Some(3), "foo bar", ComponentKind::Node, &["x=1"]);
/// assert_eq!(name, "node_003_foo-bar_x-1");
///
/// let id = component_name(None, "resistor", ComponentKind::Path, &[] as &[&str]);
/// assert_eq!(id, "path_resistor");
/// ```
pub fn component_name<S: AsRef<str>>(
    index: Option<usize>,
    label: &str,
    kind: ComponentKind,
    options: &[S],
) -> String {
    let mut segments = vec![kind.as_str().to_string()];
    if let Some(index) = index {
        segments.push(format!("{index:03}"));
    }
    segments.push(label.to_string());
    if !options.is_empty() {
        let joined: Vec<&str> = options.iter().map(AsRef::as_ref).collect();
        segments.push(joined.join("-"));
    }

    segments
        .iter()
        .map(|segment| sanitize(segment))
        .collect::<Vec<_>>()
        .join("_")
}

/// Recovers `(index, kind)` from a variant name built with an index.
///
/// Only the first two segments are read; the rest of the name is ignored.
///
/// # Errors
///
/// Returns a [`NameError`] if the name has fewer than two segments, the
/// first segment is neither `node` nor `path`, or the second is not a
/// non-negative integer.
///
/// # Examples
///
/// ```
/// use symlib_core::{catalog::ComponentKind, naming::parse_component_name};
///
/// let parsed = parse_component_name("path_012_american-resistor_");
/// assert_eq!(parsed, Ok((12, ComponentKind::Path)));
/// ```
pub fn parse_component_name(name: &str) -> Result<(usize, ComponentKind), NameError> {
    let mut parts = name.split('_');
    let (Some(kind), Some(index)) = (parts.next(), parts.next()) else {
        return Err(NameError::MissingSegments(name.to_string()));
    };

    let kind = match kind {
        "node" => ComponentKind::Node,
        "path" => ComponentKind::Path,
        other => {
            return Err(NameError::UnknownKind {
                name: name.to_string(),
                kind: other.to_string(),
            });
        }
    };

    let index = index.parse().map_err(|_| NameError::InvalidIndex {
        name: name.to_string(),
        index: index.to_string(),
    })?;

    Ok((index, kind))
}

/// Replaces every character that is not alphanumeric or `_` with `-`.
fn sanitize(segment: &str) -> String {
    segment
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '-' })
        .collect()
}
