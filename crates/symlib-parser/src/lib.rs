//! # Symlib Parser
//!
//! Readers for the inputs of a symbol library build:
//!
//! - rendered SVG artwork, read into an owned element tree ([`Artwork`]);
//! - SVG path data, resolved into absolute segments ([`parse_path_data`]);
//! - view-box attribute values ([`parse_view_box`]);
//! - the TOML component catalog ([`parse_catalog`]).
//!
//! ## Usage
//!
//! ```
//! # use symlib_parser::{parse_artwork, ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = r##"<svg viewBox="0 0 10 10">
//!         <path d="M5 5L10 5" stroke="#f00"/>
//!     </svg>"##;
//!
//!     let artwork = parse_artwork(source)?;
//!     assert_eq!(artwork.view_box()?.width(), 10.0);
//!     Ok(())
//! }
//! ```

mod artwork;
mod catalog;
mod error;
mod path_data;

pub use artwork::{Artwork, ArtworkElement, ArtworkNode, parse_artwork};
pub use catalog::parse_catalog;
pub use error::ParseError;
pub use path_data::{Segment, SegmentKind, parse_path_data, parse_view_box};
