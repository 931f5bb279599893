//! The pin-index color encoding used by marker lines.
//!
//! Each pin marker in rendered artwork is stroked with a color that encodes
//! the pin's position in the component's ordered anchor list:
//!
//! ```text
//! index i ∈ [0, 63]  ⇄  rgb(4·i, 0x99, 0x99)
//! ```
//!
//! Decoding rejects a color whose green or blue channel is not `0x99`, or
//! whose red channel shares a bit with the codec's reject mask. The default
//! mask is `0x11`, which is stricter than "red is a multiple of four": it
//! also rejects every red value with bit 4 set (indices 4–7, 12–15, ...).
//! Bit 1 is not tested at all, so `rgb(2,153,153)` decodes to index 0.
//! Use [`AnchorCodec::new`] with mask `0x03` for the plain multiple-of-four
//! check.

use thiserror::Error;

use crate::color::Rgb;

/// Green and blue channel value shared by every anchor color.
pub const ANCHOR_CHANNEL: u8 = 0x99;

/// Largest encodable pin index.
pub const MAX_ANCHOR_INDEX: u8 = 63;

/// Reject mask applied to the red channel by [`AnchorCodec::default`].
pub const DEFAULT_REJECT_MASK: u8 = 0x11;

/// Errors produced by the anchor codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("anchor index {0} is outside the encodable range 0..=63")]
    IndexOutOfRange(u8),

    #[error("color {0} is not an anchor color")]
    InvalidEncoding(Rgb),
}

/// Bidirectional mapping between pin indices and reserved anchor colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorCodec {
    reject_mask: u8,
}

impl Default for AnchorCodec {
    fn default() -> Self {
        Self::new(DEFAULT_REJECT_MASK)
    }
}

impl AnchorCodec {
    /// Creates a codec that rejects red channels sharing any bit with `reject_mask`.
    pub fn new(reject_mask: u8) -> Self {
        Self { reject_mask }
    }

    /// Returns the red-channel reject mask.
    pub fn reject_mask(self) -> u8 {
        self.reject_mask
    }

    /// Encodes a pin index as its anchor color.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::IndexOutOfRange`] if `index` exceeds
    /// [`MAX_ANCHOR_INDEX`].
    ///
    /// # Examples
    ///
    /// ```
    /// use symlib_core::{anchor::AnchorCodec, color::Rgb};
    ///
    /// let codec = AnchorCodec::default();
    /// assert_eq!(codec.encode(2), Ok(Rgb::new(8, 0x99, 0x99)));
    /// ```
    pub fn encode(self, index: u8) -> Result<Rgb, CodecError> {
        if index > MAX_ANCHOR_INDEX {
            return Err(CodecError::IndexOutOfRange(index));
        }
        Ok(Rgb::new(index << 2, ANCHOR_CHANNEL, ANCHOR_CHANNEL))
    }

    /// Decodes an anchor color back to its pin index.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidEncoding`] if the green or blue channel
    /// is not [`ANCHOR_CHANNEL`], or if the red channel intersects the
    /// reject mask.
    ///
    /// # Examples
    ///
    /// ```
    /// use symlib_core::{anchor::AnchorCodec, color::Rgb};
    ///
    /// let codec = AnchorCodec::default();
    /// assert_eq!(codec.decode(Rgb::new(12, 0x99, 0x99)), Ok(3));
    /// assert!(codec.decode(Rgb::new(12, 0x99, 0x98)).is_err());
    /// ```
    pub fn decode(self, color: Rgb) -> Result<u8, CodecError> {
        if color.red() & self.reject_mask != 0
            || color.green() != ANCHOR_CHANNEL
            || color.blue() != ANCHOR_CHANNEL
        {
            return Err(CodecError::InvalidEncoding(color));
        }
        Ok(color.red() >> 2)
    }
}

/// Encodes `index` with the default codec.
pub fn index_to_color(index: u8) -> Result<Rgb, CodecError> {
    AnchorCodec::default().encode(index)
}

/// Decodes `color` with the default codec.
pub fn color_to_index(color: Rgb) -> Result<u8, CodecError> {
    AnchorCodec::default().decode(color)
}
