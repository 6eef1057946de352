// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device transport.
//!
//! The orchestration core talks to the bulb only through the
//! [`DeviceDriver`] and [`DeviceSession`] traits. [`TcpDriver`] implements
//! them for Magic Home / LEDENET controllers; see [`frame`] for the wire
//! format.

pub mod frame;
mod tcp;

pub use tcp::{TcpDriver, TcpSession};

use std::future::Future;
use std::time::Duration;

use crate::error::Result;
use crate::types::RgbColor;

/// A live session with one bulb.
///
/// `is_on` and `current_rgb` report the telemetry captured by the most recent
/// state read; call [`refresh_state`](Self::refresh_state) to re-read it.
pub trait DeviceSession: Send {
    /// Returns whether the bulb was on at the last state read.
    fn is_on(&self) -> bool;

    /// Returns the RGB channels at the last state read.
    fn current_rgb(&self) -> RgbColor;

    /// Switches the bulb on.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be delivered.
    fn turn_on(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Switches the bulb off.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be delivered.
    fn turn_off(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Sets the RGB channels.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be delivered.
    fn set_rgb(&mut self, color: RgbColor) -> impl Future<Output = Result<()>> + Send;

    /// Re-reads live telemetry from the bulb.
    ///
    /// # Errors
    ///
    /// Returns an error if the bulb is unreachable or its answer is malformed.
    fn refresh_state(&mut self) -> impl Future<Output = Result<()>> + Send;
}

/// Opens sessions with a bulb.
pub trait DeviceDriver: Send + Sync {
    /// The session type produced by this driver.
    type Session: DeviceSession;

    /// Opens a session. Telemetry is read once so the session is usable
    /// immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if the bulb cannot be reached.
    fn open(&self) -> impl Future<Output = Result<Self::Session>> + Send;
}

/// Connection parameters for a bulb.
///
/// # Examples
///
/// ```
/// use flux_bridge::protocol::DriverConfig;
/// use std::time::Duration;
///
/// let config = DriverConfig::new("192.168.1.53")
///     .with_port(5577)
///     .with_timeout(Duration::from_secs(2));
/// assert_eq!(config.address(), "192.168.1.53:5577");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    host: String,
    port: u16,
    timeout: Duration,
}

impl DriverConfig {
    /// Default controller port.
    pub const DEFAULT_PORT: u16 = 5577;
    /// Default connect/read/write timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Creates a configuration for the specified host.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_PORT,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the IO timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the IO timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the `host:port` string to dial. IPv6 literals are bracketed.
    #[must_use]
    pub fn address(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn driver_config_defaults() {
        let config = DriverConfig::new("192.168.1.53");
        assert_eq!(config.host(), "192.168.1.53");
        assert_eq!(config.port(), 5577);
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn driver_config_builder_chain() {
        let config = DriverConfig::new("bulb.local")
            .with_port(6000)
            .with_timeout(Duration::from_millis(250));
        assert_eq!(config.port(), 6000);
        assert_eq!(config.timeout(), Duration::from_millis(250));
        assert_eq!(config.address(), "bulb.local:6000");
    }

    #[test]
    fn driver_config_ipv6_address() {
        assert_eq!(DriverConfig::new("fe80::1").address(), "[fe80::1]:5577");
        assert_eq!(DriverConfig::new("[fe80::1]").address(), "[fe80::1]:5577");
    }
}
