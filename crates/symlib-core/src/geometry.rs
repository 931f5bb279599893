//! Geometric primitives for symbol artwork.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in artwork space
//! - [`Tolerance`] - Per-axis closeness threshold used when comparing points
//! - [`ViewBox`] - The artwork's document-level view-box rectangle
//!
//! # Coordinate System
//!
//! Artwork coordinates follow SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! Anchor offsets are expressed relative to a component's reference point,
//! so an anchor above the reference point has a negative `y`.

use std::fmt;

/// Default per-axis tolerance for point comparisons.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// A 2D point in artwork coordinate space.
///
/// # Examples
///
/// ```
/// # use symlib_core::geometry::Point;
/// let far = Point::new(10.0, 5.0);
/// let reference = Point::new(5.0, 5.0);
///
/// let offset = far.sub_point(reference);
/// assert_eq!(offset, Point::new(5.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Checks if both x and y coordinates are exactly zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Checks whether `other` lies within `tolerance` of this point on both
    /// axes independently.
    ///
    /// This is a box test, not a Euclidean distance test: `(0, 0)` and
    /// `(ε, ε)` are close even though their distance is `ε·√2`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use symlib_core::geometry::{Point, Tolerance};
    /// let tolerance = Tolerance::default();
    /// assert!(Point::new(1.0, 1.0).is_close(Point::new(1.0000005, 0.9999995), tolerance));
    /// assert!(!Point::new(1.0, 1.0).is_close(Point::new(1.00001, 1.0), tolerance));
    /// ```
    pub fn is_close(self, other: Point, tolerance: Tolerance) -> bool {
        let eps = tolerance.value();
        self.x >= other.x - eps
            && self.x <= other.x + eps
            && self.y >= other.y - eps
            && self.y <= other.y + eps
    }

    /// Checks whether this point lies within `tolerance` of the origin.
    pub fn is_near_origin(self, tolerance: Tolerance) -> bool {
        self.is_close(Point::default(), tolerance)
    }
}

/// Per-axis closeness threshold for point comparisons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance(f64);

impl Tolerance {
    /// Creates a tolerance; negative values are treated as their magnitude.
    pub fn new(value: f64) -> Self {
        Self(value.abs())
    }

    /// Returns the tolerance value.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self(DEFAULT_TOLERANCE)
    }
}

/// The view-box rectangle of a rendered artwork document.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewBox {
    min_x: f64,
    min_y: f64,
    width: f64,
    height: f64,
}

impl ViewBox {
    /// Creates a new view box
    pub fn new(min_x: f64, min_y: f64, width: f64, height: f64) -> Self {
        Self {
            min_x,
            min_y,
            width,
            height,
        }
    }

    pub fn min_x(self) -> f64 {
        self.min_x
    }

    pub fn min_y(self) -> f64 {
        self.min_y
    }

    pub fn width(self) -> f64 {
        self.width
    }

    pub fn height(self) -> f64 {
        self.height
    }
}

/// Formats as the SVG `viewBox` attribute value, e.g. `0 0 10 12.5`.
impl fmt::Display for ViewBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.min_x(),
            self.min_y(),
            self.width(),
            self.height()
        )
    }
}
