//! Error type for the input readers.

use thiserror::Error;

use symlib_core::catalog::ConfigError;

/// Errors produced while reading artwork, path data or catalogs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("malformed SVG: {0}")]
    Xml(String),

    #[error("SVG document has no root element")]
    MissingRoot,

    #[error("SVG root element is `{0}`, expected `svg`")]
    UnexpectedRoot(String),

    #[error("malformed path data at offset {offset}: `{data}`")]
    PathData { data: String, offset: usize },

    #[error("path command `{command}` expects groups of {arity} parameters, found {found}")]
    PathArity {
        command: char,
        arity: usize,
        found: usize,
    },

    #[error("SVG document has no viewBox")]
    MissingViewBox,

    #[error("malformed viewBox `{0}`: expected four numbers")]
    ViewBox(String),

    #[error("malformed component catalog: {0}")]
    Catalog(String),

    #[error(transparent)]
    InvalidCatalog(#[from] ConfigError),
}
