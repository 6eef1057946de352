// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the bridge.
//!
//! Errors are split by where they originate: malformed color codes from the
//! caller, out-of-range channel values, transport failures while reaching the
//! bulb, and frames the bulb sent back that could not be interpreted.

use thiserror::Error;

/// The main error type for this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// A color code supplied by the caller could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// A value violated its range constraint.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// The device could not be reached.
    #[error("device unreachable: {0}")]
    Unreachable(#[from] TransportError),

    /// The device answered with something that could not be interpreted.
    #[error("device protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

impl Error {
    /// Returns `true` if the error was caused by bad caller input.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::Value(_))
    }

    /// Returns `true` if the error is a device timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Unreachable(TransportError::Timeout(_)))
    }
}

/// Errors raised while decoding a textual color code.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The input does not have the required number of characters.
    #[error("expected {expected} hex digits, got {actual}")]
    InvalidLength {
        /// Required number of characters.
        expected: usize,
        /// Number of characters received.
        actual: usize,
    },

    /// The input contains characters that are not hexadecimal digits.
    #[error("invalid hex digits: {0:?}")]
    InvalidHex(String),
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("{field} value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Name of the offending value.
        field: &'static str,
        /// Minimum allowed value.
        min: u32,
        /// Maximum allowed value.
        max: u32,
        /// The actual value that was provided.
        actual: u32,
    },
}

/// Transport failures while talking to the device.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection to the device failed.
    #[error("connection to {address} failed: {source}")]
    ConnectionFailed {
        /// The address that was dialled.
        address: String,
        /// Underlying socket error.
        #[source]
        source: std::io::Error,
    },

    /// A device operation did not complete in time.
    #[error("device operation timed out after {0} ms")]
    Timeout(u64),

    /// Reading from or writing to an open session failed.
    #[error("socket {action} error: {source}")]
    Io {
        /// What the session was doing.
        action: &'static str,
        /// Underlying socket error.
        #[source]
        source: std::io::Error,
    },

    /// The configured device address is unusable.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

impl TransportError {
    /// Creates a socket IO error for the given action.
    pub(crate) fn io(action: &'static str, source: std::io::Error) -> Self {
        Self::Io { action, source }
    }
}

/// Errors raised while interpreting frames received from the device.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// The frame did not start with the expected header byte.
    #[error("unexpected frame header 0x{actual:02x}, expected 0x{expected:02x}")]
    UnexpectedHeader {
        /// Expected header byte.
        expected: u8,
        /// Received header byte.
        actual: u8,
    },

    /// The trailing checksum byte did not match the frame contents.
    #[error("checksum mismatch: computed 0x{expected:02x}, frame carries 0x{actual:02x}")]
    ChecksumMismatch {
        /// Checksum computed over the frame.
        expected: u8,
        /// Checksum carried by the frame.
        actual: u8,
    },

    /// The power byte holds a value the firmware is not known to send.
    #[error("unknown power state byte 0x{0:02x}")]
    UnknownPowerState(u8),

    /// The frame is shorter than required.
    #[error("truncated frame: expected {expected} bytes, got {actual}")]
    Truncated {
        /// Required frame length.
        expected: usize,
        /// Bytes received.
        actual: usize,
    },
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
