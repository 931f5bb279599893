//! Symlib Core Types and Algorithms
//!
//! This crate provides the foundational types for turning marker-annotated
//! symbol artwork into structured component metadata. It includes:
//!
//! - **Colors**: CSS color parsing and 8-bit RGB triples ([`color`] module)
//! - **Anchor codec**: The pin-index ⇄ color encoding ([`anchor`] module)
//! - **Geometry**: Points, view boxes and tolerances ([`geometry`] module)
//! - **Markers**: Marker lines and reference point recovery ([`marker`] module)
//! - **Options**: Option declarations and their expansion ([`options`] module)
//! - **Catalog**: Component descriptions and identities ([`catalog`] module)
//! - **Naming**: The stable per-variant file naming scheme ([`naming`] module)

pub mod anchor;
pub mod catalog;
pub mod color;
pub mod geometry;
pub mod marker;
pub mod naming;
pub mod options;
