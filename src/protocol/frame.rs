// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Magic Home / LEDENET binary frames.
//!
//! Every frame ends with a checksum byte: the sum of all preceding bytes,
//! truncated to 8 bits.
//!
//! | Frame | Bytes |
//! |-------|-------|
//! | Power on | `71 23 0f cs` |
//! | Power off | `71 24 0f cs` |
//! | Set color | `31 rr gg bb 00 f0 0f cs` |
//! | Query state | `81 8a 8b 96` |
//!
//! The bulb answers a state query with a 14-byte [`StateResponse`].

use crate::error::ProtocolError;
use crate::types::{PowerState, RgbColor};

/// First byte of a state response.
pub const STATE_HEADER: u8 = 0x81;

/// Length of a state response, checksum included.
pub const STATE_RESPONSE_LEN: usize = 14;

const POWER_ON: u8 = 0x23;
const POWER_OFF: u8 = 0x24;
const LOCAL: u8 = 0x0f;

/// Computes the trailing checksum for a frame body.
///
/// # Examples
///
/// ```
/// use flux_bridge::protocol::frame::checksum;
///
/// assert_eq!(checksum(&[0x81, 0x8a, 0x8b]), 0x96);
/// ```
#[must_use]
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, b| acc.wrapping_add(*b))
}

/// A command sent to the bulb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandFrame {
    /// Switch the bulb on.
    PowerOn,
    /// Switch the bulb off.
    PowerOff,
    /// Set the RGB channels, leaving white channels untouched.
    SetRgb(RgbColor),
    /// Ask for a state response.
    QueryState,
}

impl CommandFrame {
    /// Returns the frame for switching to the given power state.
    #[must_use]
    pub const fn power(state: PowerState) -> Self {
        match state {
            PowerState::On => Self::PowerOn,
            PowerState::Off => Self::PowerOff,
        }
    }

    /// Serializes the frame, checksum included.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = match self {
            Self::PowerOn => vec![0x71, POWER_ON, LOCAL],
            Self::PowerOff => vec![0x71, POWER_OFF, LOCAL],
            Self::SetRgb(color) => {
                let (r, g, b) = color.channels();
                // 0xf0: write color channels only
                vec![0x31, r, g, b, 0x00, 0xf0, LOCAL]
            }
            Self::QueryState => vec![STATE_HEADER, 0x8a, 0x8b],
        };
        bytes.push(checksum(&bytes));
        bytes
    }
}

/// Telemetry decoded from a 14-byte state response.
///
/// Layout: header, model, power, mode, run flag, speed, red, green, blue,
/// warm white, firmware version, cold white, color mode, checksum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateResponse {
    model: u8,
    power: PowerState,
    mode: u8,
    speed: u8,
    color: RgbColor,
    warm_white: u8,
    version: u8,
}

impl StateResponse {
    /// Parses a state response frame.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the frame is short, has the wrong header,
    /// fails its checksum or carries an unknown power byte.
    pub fn parse(frame: &[u8]) -> Result<Self, ProtocolError> {
        if frame.len() < STATE_RESPONSE_LEN {
            return Err(ProtocolError::Truncated {
                expected: STATE_RESPONSE_LEN,
                actual: frame.len(),
            });
        }
        let frame = &frame[..STATE_RESPONSE_LEN];

        if frame[0] != STATE_HEADER {
            return Err(ProtocolError::UnexpectedHeader {
                expected: STATE_HEADER,
                actual: frame[0],
            });
        }

        let expected = checksum(&frame[..STATE_RESPONSE_LEN - 1]);
        let actual = frame[STATE_RESPONSE_LEN - 1];
        if expected != actual {
            return Err(ProtocolError::ChecksumMismatch { expected, actual });
        }

        let power = match frame[2] {
            POWER_ON => PowerState::On,
            POWER_OFF => PowerState::Off,
            other => return Err(ProtocolError::UnknownPowerState(other)),
        };

        Ok(Self {
            model: frame[1],
            power,
            mode: frame[3],
            speed: frame[5],
            color: RgbColor::new(frame[6], frame[7], frame[8]),
            warm_white: frame[9],
            version: frame[10],
        })
    }

    /// Returns the model byte reported by the firmware.
    #[must_use]
    pub const fn model(&self) -> u8 {
        self.model
    }

    /// Returns the power state.
    #[must_use]
    pub const fn power(&self) -> PowerState {
        self.power
    }

    /// Returns the active mode or pattern code.
    #[must_use]
    pub const fn mode(&self) -> u8 {
        self.mode
    }

    /// Returns the pattern speed byte.
    #[must_use]
    pub const fn speed(&self) -> u8 {
        self.speed
    }

    /// Returns the RGB channels.
    #[must_use]
    pub const fn color(&self) -> RgbColor {
        self.color
    }

    /// Returns the warm white channel.
    #[must_use]
    pub const fn warm_white(&self) -> u8 {
        self.warm_white
    }

    /// Returns the firmware version byte.
    #[must_use]
    pub const fn version(&self) -> u8 {
        self.version
    }
}
