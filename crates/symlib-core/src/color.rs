//! Color handling for symbol artwork
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate, and the [`Rgb`] triple that marker colors are compared
//! and decoded in. Artwork strokes arrive as arbitrary CSS color strings
//! (`#f00`, `rgb(0,153,153)`, `yellow`, ...); everything downstream works on
//! the quantized 8-bit sRGB value.

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::{DynamicColor, Srgb};

/// An 8-bit sRGB color triple.
///
/// This is the representation marker colors are matched and decoded in:
/// two colors are the same marker color iff their triples are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    red: u8,
    green: u8,
    blue: u8,
}

impl Rgb {
    /// Creates a new triple from its channels.
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Returns the red channel.
    pub fn red(self) -> u8 {
        self.red
    }

    /// Returns the green channel.
    pub fn green(self) -> u8 {
        self.green
    }

    /// Returns the blue channel.
    pub fn blue(self) -> u8 {
        self.blue
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.red, self.green, self.blue)
    }
}

impl From<Rgb> for svg::node::Value {
    fn from(rgb: Rgb) -> Self {
        Self::from(rgb.to_string())
    }
}

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use symlib_core::color::Color;
    ///
    /// let red = Color::new("#f00").unwrap();
    /// let teal = Color::new("rgb(0, 153, 153)").unwrap();
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str.trim()) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Quantizes this color to an 8-bit sRGB triple, dropping alpha.
    ///
    /// # Examples
    ///
    /// ```
    /// use symlib_core::color::{Color, Rgb};
    ///
    /// let yellow = Color::new("#ff0").unwrap();
    /// assert_eq!(yellow.to_rgb(), Rgb::new(255, 255, 0));
    /// ```
    pub fn to_rgb(self) -> Rgb {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        Rgb::new(rgba.r, rgba.g, rgba.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}
