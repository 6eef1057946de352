// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RGB color type and its textual color-code form.
//!
//! A color code is the [`COLOR_MARKER`] followed by six hex digits, two per
//! channel in red-green-blue order. Codes are emitted in lowercase and
//! accepted in any case.

use std::fmt;
use std::str::FromStr;

use crate::error::{DecodeError, ValueError};

/// Leading character that marks a string as a color code.
pub const COLOR_MARKER: char = '#';

/// Number of hex digits in a full color code, marker excluded.
const CODE_LEN: usize = 6;

/// Number of hex digits encoding one channel.
const CHANNEL_LEN: usize = 2;

/// RGB color with 8-bit channels (0-255).
///
/// # Examples
///
/// ```
/// use flux_bridge::types::RgbColor;
///
/// let color = RgbColor::new(255, 128, 0);
/// assert_eq!(color.to_hex_with_hash(), "#ff8000");
///
/// let parsed: RgbColor = "#FF8000".parse().unwrap();
/// assert_eq!(parsed, color);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RgbColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl RgbColor {
    /// Creates a new RGB color.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Creates a color from wider integer channels.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if any channel exceeds 255.
    ///
    /// # Examples
    ///
    /// ```
    /// use flux_bridge::types::RgbColor;
    ///
    /// assert!(RgbColor::from_channels(10, 20, 30).is_ok());
    /// assert!(RgbColor::from_channels(256, 0, 0).is_err());
    /// ```
    pub fn from_channels(red: u32, green: u32, blue: u32) -> Result<Self, ValueError> {
        Ok(Self::new(
            narrow_channel("red", red)?,
            narrow_channel("green", green)?,
            narrow_channel("blue", blue)?,
        ))
    }

    /// Parses a color code, with or without the leading marker.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError` if the remaining text is not exactly six hex digits.
    pub fn from_hex(hex: &str) -> Result<Self, DecodeError> {
        decode_triple(hex.strip_prefix(COLOR_MARKER).unwrap_or(hex))
    }

    /// Returns the red component.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Returns the green component.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Returns the blue component.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }

    /// Returns the six lowercase hex digits without the marker.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }

    /// Returns the full color code, marker included.
    #[must_use]
    pub fn to_hex_with_hash(&self) -> String {
        format!("{COLOR_MARKER}{}", self.to_hex())
    }

    /// Returns the channels as a `(red, green, blue)` tuple.
    #[must_use]
    pub const fn channels(&self) -> (u8, u8, u8) {
        (self.red, self.green, self.blue)
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_with_hash())
    }
}

impl FromStr for RgbColor {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<(u8, u8, u8)> for RgbColor {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::new(red, green, blue)
    }
}

/// Encodes a color as a marker-prefixed, zero-padded color code.
#[must_use]
pub fn encode(color: RgbColor) -> String {
    color.to_hex_with_hash()
}

/// Decodes exactly two hex digits into a channel value.
///
/// # Errors
///
/// Returns `DecodeError` if the input is not two characters long or contains
/// anything other than hex digits.
pub fn decode_channel(digits: &str) -> Result<u8, DecodeError> {
    let actual = digits.chars().count();
    if actual != CHANNEL_LEN {
        return Err(DecodeError::InvalidLength {
            expected: CHANNEL_LEN,
            actual,
        });
    }
    // from_str_radix alone would accept a leading sign
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(DecodeError::InvalidHex(digits.to_string()));
    }
    u8::from_str_radix(digits, 16).map_err(|_| DecodeError::InvalidHex(digits.to_string()))
}

/// Decodes six hex digits (no marker) into a color.
///
/// # Errors
///
/// Returns `DecodeError` if the input is not exactly six characters or any
/// channel pair is not valid hex. Truncated input is never zero-filled.
///
/// # Examples
///
/// ```
/// use flux_bridge::types::{RgbColor, decode_triple};
///
/// assert_eq!(decode_triple("00ff80").unwrap(), RgbColor::new(0, 255, 128));
/// assert!(decode_triple("00ff8").is_err());
/// ```
pub fn decode_triple(digits: &str) -> Result<RgbColor, DecodeError> {
    let actual = digits.chars().count();
    if actual != CODE_LEN {
        return Err(DecodeError::InvalidLength {
            expected: CODE_LEN,
            actual,
        });
    }
    if !digits.is_ascii() {
        return Err(DecodeError::InvalidHex(digits.to_string()));
    }

    Ok(RgbColor::new(
        decode_channel(&digits[0..2])?,
        decode_channel(&digits[2..4])?,
        decode_channel(&digits[4..6])?,
    ))
}

fn narrow_channel(field: &'static str, value: u32) -> Result<u8, ValueError> {
    u8::try_from(value).map_err(|_| ValueError::OutOfRange {
        field,
        min: 0,
        max: u32::from(u8::MAX),
        actual: value,
    })
}
