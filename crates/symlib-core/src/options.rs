//! Component option declarations and their expansion.
//!
//! A component declares a list of [`OptionSpec`]s. Each spec is one
//! configurable axis: either a boolean toggle or a mutually exclusive
//! enumeration. [`expand`] turns that list into every concrete
//! [`OptionSelection`] the component can be built with.
//!
//! # Ordering
//!
//! The order of [`expand`]'s output is part of its contract. Variant file
//! names are derived from selections, so the traversal (outer loop over the
//! head axis's choices, inner loop over the expanded rest) must stay stable.

use serde::Deserialize;

/// A single selectable option: a toggle, or one choice of an enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OptionLeaf {
    /// Option key, passed to the renderer and recorded in metadata.
    name: String,

    /// Human-readable name; also used in variant file names when present.
    #[serde(default)]
    display_name: Option<String>,

    /// Pins this option adds to the component's anchor list.
    #[serde(default)]
    add_pins: Vec<String>,

    /// Pins this option removes from the component's anchor list.
    #[serde(default)]
    sub_pins: Vec<String>,
}

impl OptionLeaf {
    /// Creates a leaf with no display name and no pin modifiers.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            add_pins: Vec::new(),
            sub_pins: Vec::new(),
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_add_pins<I, S>(mut self, pins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_pins = pins.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_sub_pins<I, S>(mut self, pins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sub_pins = pins.into_iter().map(Into::into).collect();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Returns the display name if set, otherwise the key.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    pub fn add_pins(&self) -> &[String] {
        &self.add_pins
    }

    pub fn sub_pins(&self) -> &[String] {
        &self.sub_pins
    }
}

/// A mutually exclusive group of options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EnumOption {
    #[serde(default)]
    display_name: Option<String>,

    /// Whether choosing none of the options is allowed. Unset means allowed.
    #[serde(default)]
    select_none: Option<bool>,

    options: Vec<OptionLeaf>,
}

impl EnumOption {
    pub fn new(options: Vec<OptionLeaf>) -> Self {
        Self {
            display_name: None,
            select_none: None,
            options,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_select_none(mut self, select_none: bool) -> Self {
        self.select_none = Some(select_none);
        self
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Returns the declared `select_none` flag, if any.
    pub fn declared_select_none(&self) -> Option<bool> {
        self.select_none
    }

    /// Returns whether the "none of these" choice is part of the expansion.
    pub fn select_none(&self) -> bool {
        self.select_none.unwrap_or(true)
    }

    pub fn options(&self) -> &[OptionLeaf] {
        &self.options
    }
}

/// One configurable axis of a component.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OptionSpec {
    /// A boolean option that is either on or off.
    Toggle(OptionLeaf),
    /// A choice of at most one (or exactly one) of several options.
    Enum(EnumOption),
}

impl OptionSpec {
    /// Iterates over the selectable leaves of this axis.
    pub fn leaves(&self) -> impl Iterator<Item = &OptionLeaf> {
        let leaves: &[OptionLeaf] = match self {
            OptionSpec::Toggle(leaf) => std::slice::from_ref(leaf),
            OptionSpec::Enum(enumeration) => enumeration.options(),
        };
        leaves.iter()
    }

    /// Number of distinct choices this axis contributes to the expansion.
    pub fn multiplier(&self) -> usize {
        match self {
            OptionSpec::Toggle(_) => 2,
            OptionSpec::Enum(enumeration) => {
                enumeration.options().len() + usize::from(enumeration.select_none())
            }
        }
    }
}

/// One concrete, ordered choice of option leaves for a component.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OptionSelection {
    leaves: Vec<OptionLeaf>,
}

impl OptionSelection {
    pub fn new(leaves: Vec<OptionLeaf>) -> Self {
        Self { leaves }
    }

    pub fn leaves(&self) -> &[OptionLeaf] {
        &self.leaves
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Checks whether a leaf with key `name` is part of this selection.
    pub fn contains(&self, name: &str) -> bool {
        self.leaves.iter().any(|leaf| leaf.name() == name)
    }

    /// Returns the option keys, in selection order.
    pub fn names(&self) -> Vec<&str> {
        self.leaves.iter().map(OptionLeaf::name).collect()
    }

    /// Returns the display labels, in selection order.
    pub fn labels(&self) -> Vec<&str> {
        self.leaves.iter().map(OptionLeaf::label).collect()
    }

    /// Pins added by any selected option, in selection order.
    pub fn added_pins(&self) -> impl Iterator<Item = &str> {
        self.leaves
            .iter()
            .flat_map(|leaf| leaf.add_pins().iter().map(String::as_str))
    }

    /// Pins removed by any selected option, in selection order.
    pub fn removed_pins(&self) -> impl Iterator<Item = &str> {
        self.leaves
            .iter()
            .flat_map(|leaf| leaf.sub_pins().iter().map(String::as_str))
    }

    fn prepended(&self, leaf: &OptionLeaf) -> Self {
        let mut leaves = Vec::with_capacity(self.leaves.len() + 1);
        leaves.push(leaf.clone());
        leaves.extend(self.leaves.iter().cloned());
        Self { leaves }
    }
}

/// Expands option declarations into every buildable selection.
///
/// `expand(&[])` is a single empty selection. Otherwise the head axis is
/// combined with every selection of the expanded tail:
///
/// - an enumeration yields `[choice, ..rest]` for every choice and every
///   rest, followed by every rest unchanged if "none" is allowed;
/// - a toggle yields `[toggle, ..rest]` immediately followed by `rest`, for
///   every rest.
///
/// The result length is the product of [`OptionSpec::multiplier`] over all
/// axes.
///
/// # Examples
///
/// ```
/// use symlib_core::options::{EnumOption, OptionLeaf, OptionSpec, expand};
///
/// let specs = [
///     OptionSpec::Enum(EnumOption::new(vec![
///         OptionLeaf::new("a"),
///         OptionLeaf::new("b"),
///         OptionLeaf::new("c"),
///     ])),
///     OptionSpec::Toggle(OptionLeaf::new("t")),
/// ];
///
/// let selections = expand(&specs);
/// assert_eq!(selections.len(), 8);
/// assert_eq!(selections[0].names(), ["a", "t"]);
/// assert_eq!(selections[1].names(), ["a"]);
/// assert!(selections[7].is_empty());
/// ```
pub fn expand(specs: &[OptionSpec]) -> Vec<OptionSelection> {
    let Some((head, tail)) = specs.split_first() else {
        return vec![OptionSelection::default()];
    };

    let rest = expand(tail);
    let mut result = Vec::with_capacity(rest.len() * head.multiplier());

    match head {
        OptionSpec::Enum(enumeration) => {
            for leaf in enumeration.options() {
                result.extend(rest.iter().map(|selection| selection.prepended(leaf)));
            }
            if enumeration.select_none() {
                result.extend(rest);
            }
        }
        OptionSpec::Toggle(leaf) => {
            for selection in rest {
                result.push(selection.prepended(leaf));
                result.push(selection);
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toggle(name: &str) -> OptionSpec {
        OptionSpec::Toggle(OptionLeaf::new(name))
    }

    fn enumeration(names: &[&str], select_none: Option<bool>) -> OptionSpec {
        let mut option = EnumOption::new(names.iter().map(|name| OptionLeaf::new(*name)).collect());
        if let Some(select_none) = select_none {
            option = option.with_select_none(select_none);
        }
        OptionSpec::Enum(option)
    }

    fn names(selections: &[OptionSelection]) -> Vec<Vec<&str>> {
        selections.iter().map(OptionSelection::names).collect()
    }

    #[test]
    fn test_expand_empty() {
        let selections = expand(&[]);
        assert_eq!(selections.len(), 1);
        assert!(selections[0].is_empty());
    }

    #[test]
    fn test_expand_toggle() {
        let selections = expand(&[toggle("t")]);
        assert_eq!(names(&selections), vec![vec!["t"], vec![]]);
    }

    #[test]
    fn test_expand_enum_with_none_and_toggle() {
        let specs = [enumeration(&["a", "b", "c"], Some(true)), toggle("t")];
        let selections = expand(&specs);

        assert_eq!(selections.len(), (3 + 1) * 2);
        assert_eq!(
            names(&selections),
            vec![
                vec!["a", "t"],
                vec!["a"],
                vec!["b", "t"],
                vec!["b"],
                vec!["c", "t"],
                vec!["c"],
                vec!["t"],
                vec![],
            ]
        );
    }

    #[test]
    fn test_expand_enum_select_none_unset_means_allowed() {
        let selections = expand(&[enumeration(&["a", "b"], None)]);
        assert_eq!(names(&selections), vec![vec!["a"], vec!["b"], vec![]]);
    }

    #[test]
    fn test_expand_enum_without_none() {
        let specs = [toggle("t"), enumeration(&["a", "b"], Some(false))];
        let selections = expand(&specs);
        assert_eq!(
            names(&selections),
            vec![vec!["t", "a"], vec!["a"], vec!["t", "b"], vec!["b"]]
        );
    }

    #[test]
    fn test_expand_two_toggles() {
        let selections = expand(&[toggle("x"), toggle("y")]);
        assert_eq!(
            names(&selections),
            vec![vec!["x", "y"], vec!["y"], vec!["x"], vec![]]
        );
    }

    #[test]
    fn test_expand_is_deterministic() {
        let specs = [
            toggle("x"),
            enumeration(&["a", "b", "c"], None),
            toggle("y"),
        ];
        assert_eq!(expand(&specs), expand(&specs));
    }

    #[test]
    fn test_empty_enum_without_none_yields_nothing() {
        let specs = [enumeration(&[], Some(false)), toggle("t")];
        assert!(expand(&specs).is_empty());
    }

    #[test]
    fn test_selection_pin_modifiers() {
        let selection = OptionSelection::new(vec![
            OptionLeaf::new("a").with_add_pins(["x", "y"]),
            OptionLeaf::new("b").with_sub_pins(["z"]).with_add_pins(["w"]),
        ]);
        assert_eq!(selection.added_pins().collect::<Vec<_>>(), ["x", "y", "w"]);
        assert_eq!(selection.removed_pins().collect::<Vec<_>>(), ["z"]);
        assert!(selection.contains("b"));
        assert!(!selection.contains("c"));
    }

    #[test]
    fn test_leaf_label_prefers_display_name() {
        assert_eq!(OptionLeaf::new("key").label(), "key");
        assert_eq!(OptionLeaf::new("key").with_display_name("Key").label(), "Key");
    }

    #[test]
    fn test_spec_leaves() {
        let spec = enumeration(&["a", "b"], None);
        let leaves: Vec<_> = spec.leaves().map(OptionLeaf::name).collect();
        assert_eq!(leaves, ["a", "b"]);

        let spec = toggle("t");
        let leaves: Vec<_> = spec.leaves().map(OptionLeaf::name).collect();
        assert_eq!(leaves, ["t"]);
    }
}
