//! Component descriptions and identities.
//!
//! The [`Catalog`] is the build's configuration source for components: two
//! ordered lists, one of node-style and one of path-style components. A
//! component is addressed by its [`ComponentKind`] and its position in the
//! matching list; that position is the index used in variant file names.

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

use crate::options::OptionSpec;

/// Pseudo-pin that places an anchor at the reference point.
pub const CENTER_PIN: &str = "center";

/// Configuration errors for component lookups and declarations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("no {kind} component with index {index}")]
    UnknownComponent { kind: ComponentKind, index: usize },

    #[error("invalid declaration for {kind} component `{name}`: {reason}")]
    InvalidComponent {
        kind: ComponentKind,
        name: String,
        reason: String,
    },
}

/// Whether a component is drawn as a node or along a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Node,
    Path,
}

impl ComponentKind {
    /// Returns the lowercase discriminant used in file names and metadata.
    pub fn as_str(self) -> &'static str {
        match self {
            ComponentKind::Node => "node",
            ComponentKind::Path => "path",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The logical grouping key shared by all variants of one component.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentIdentity {
    kind: ComponentKind,
    label: String,
}

impl ComponentIdentity {
    pub fn new(kind: ComponentKind, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
        }
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// Returns the drawing name the component is invoked by.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for ComponentIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} `{}`", self.kind, self.label)
    }
}

/// Declarative description of one component family.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ComponentDescription {
    /// Drawing name of the component (`draw_name` is accepted for paths).
    #[serde(alias = "draw_name")]
    name: String,

    #[serde(default)]
    display_name: Option<String>,

    #[serde(default)]
    shape_name: Option<String>,

    #[serde(default, alias = "group_name")]
    group: Option<String>,

    #[serde(default)]
    class: Option<String>,

    #[serde(default)]
    fillable: Option<bool>,

    #[serde(default)]
    source: Option<String>,

    #[serde(default)]
    pins: Vec<String>,

    #[serde(default)]
    options: Vec<OptionSpec>,
}

impl ComponentDescription {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            shape_name: None,
            group: None,
            class: None,
            fillable: None,
            source: None,
            pins: Vec::new(),
            options: Vec::new(),
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_shape_name(mut self, shape_name: impl Into<String>) -> Self {
        self.shape_name = Some(shape_name.into());
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn with_fillable(mut self, fillable: bool) -> Self {
        self.fillable = Some(fillable);
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_pins<I, S>(mut self, pins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pins = pins.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_options(mut self, options: Vec<OptionSpec>) -> Self {
        self.options = options;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Returns the shape name for path components.
    ///
    /// Defaults to the drawing name with spaces removed, suffixed by `shape`.
    /// Node components have no shape name.
    pub fn shape_name(&self, kind: ComponentKind) -> Option<String> {
        match kind {
            ComponentKind::Node => None,
            ComponentKind::Path => Some(
                self.shape_name
                    .clone()
                    .unwrap_or_else(|| format!("{}shape", self.name.replace(' ', ""))),
            ),
        }
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    pub fn fillable(&self) -> Option<bool> {
        self.fillable
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Returns the declared pins, in declaration order.
    pub fn pins(&self) -> &[String] {
        &self.pins
    }

    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    /// Checks the declaration for problems that would make every build of
    /// this component meaningless.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidComponent`] if the name is empty, an
    /// option key is declared twice, or the options admit no selection.
    pub fn validate(&self, kind: ComponentKind) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidComponent {
            kind,
            name: self.name.clone(),
            reason,
        };

        if self.name.trim().is_empty() {
            return Err(invalid("component name is empty".to_string()));
        }

        let mut seen: Vec<&str> = Vec::new();
        for leaf in self.options.iter().flat_map(OptionSpec::leaves) {
            if leaf.name().is_empty() {
                return Err(invalid("option name is empty".to_string()));
            }
            if seen.contains(&leaf.name()) {
                return Err(invalid(format!("option `{}` is declared twice", leaf.name())));
            }
            seen.push(leaf.name());
        }

        if self.options.iter().any(|option| option.multiplier() == 0) {
            return Err(invalid(
                "an enumeration without options forbids selecting none".to_string(),
            ));
        }

        Ok(())
    }
}

/// The ordered node and path component lists of a build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Catalog {
    #[serde(default, rename = "node")]
    nodes: Vec<ComponentDescription>,

    #[serde(default, rename = "path")]
    paths: Vec<ComponentDescription>,
}

impl Catalog {
    pub fn new(nodes: Vec<ComponentDescription>, paths: Vec<ComponentDescription>) -> Self {
        Self { nodes, paths }
    }

    /// Looks up a component by kind and index.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownComponent`] if there is no such entry.
    pub fn get(
        &self,
        kind: ComponentKind,
        index: usize,
    ) -> Result<&ComponentDescription, ConfigError> {
        let list = match kind {
            ComponentKind::Node => &self.nodes,
            ComponentKind::Path => &self.paths,
        };
        list.get(index)
            .ok_or(ConfigError::UnknownComponent { kind, index })
    }

    /// Returns the identity of the component at `(kind, index)`.
    pub fn identity(
        &self,
        kind: ComponentKind,
        index: usize,
    ) -> Result<ComponentIdentity, ConfigError> {
        self.get(kind, index)
            .map(|description| ComponentIdentity::new(kind, description.name()))
    }

    /// Iterates over all components: nodes first, then paths.
    pub fn components(
        &self,
    ) -> impl Iterator<Item = (ComponentKind, usize, &ComponentDescription)> {
        let nodes = self
            .nodes
            .iter()
            .enumerate()
            .map(|(index, description)| (ComponentKind::Node, index, description));
        let paths = self
            .paths
            .iter()
            .enumerate()
            .map(|(index, description)| (ComponentKind::Path, index, description));
        nodes.chain(paths)
    }

    pub fn len(&self) -> usize {
        self.nodes.len() + self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Validates every component declaration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.components()
            .try_for_each(|(kind, _, description)| description.validate(kind))
    }
}
