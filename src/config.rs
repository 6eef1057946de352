// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Process-wide bridge configuration.

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use crate::orchestrator::StateOrchestrator;
use crate::protocol::DriverConfig;

/// Configuration read once at startup.
///
/// # Examples
///
/// ```
/// use flux_bridge::config::BridgeConfig;
/// use flux_bridge::protocol::DriverConfig;
/// use std::time::Duration;
///
/// let config = BridgeConfig::new(DriverConfig::new("192.168.1.53"))
///     .with_listen("127.0.0.1:9000".parse().unwrap())
///     .with_settle(Duration::from_millis(500));
///
/// assert_eq!(config.listen().port(), 9000);
/// assert_eq!(config.orchestrator().settle(), Duration::from_millis(500));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    listen: SocketAddr,
    device: DriverConfig,
    settle: Duration,
}

impl BridgeConfig {
    /// Default HTTP bind address.
    pub const DEFAULT_LISTEN: SocketAddr =
        SocketAddr::new(std::net::IpAddr::V4(Ipv4Addr::UNSPECIFIED), 8000);

    /// Creates a configuration for the given bulb with default settings.
    #[must_use]
    pub fn new(device: DriverConfig) -> Self {
        Self {
            listen: Self::DEFAULT_LISTEN,
            device,
            settle: StateOrchestrator::DEFAULT_SETTLE,
        }
    }

    /// Sets the HTTP bind address.
    #[must_use]
    pub fn with_listen(mut self, listen: SocketAddr) -> Self {
        self.listen = listen;
        self
    }

    /// Sets the settle interval applied after each command.
    #[must_use]
    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    /// Returns the HTTP bind address.
    #[must_use]
    pub fn listen(&self) -> SocketAddr {
        self.listen
    }

    /// Returns the bulb connection parameters.
    #[must_use]
    pub fn device(&self) -> &DriverConfig {
        &self.device
    }

    /// Returns the settle interval.
    #[must_use]
    pub fn settle(&self) -> Duration {
        self.settle
    }

    /// Builds the orchestrator for this configuration.
    #[must_use]
    pub fn orchestrator(&self) -> StateOrchestrator {
        StateOrchestrator::new(self.settle)
    }
}
