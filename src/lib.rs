// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `flux_bridge` - an HTTP control shim for a single Magic Home / LEDENET
//! RGB bulb.
//!
//! The crate turns simple HTTP calls (`/on`, `/off`, `/poll`,
//! `/macros/set?color=rrggbb`) into device commands, waits for the bulb to
//! settle, and answers with the state the bulb reports afterwards:
//!
//! ```json
//! {"color": "#00ff80", "state": "on"}
//! ```
//!
//! # Layers
//!
//! - [`types`]: [`RgbColor`] with its color-code codec, [`PowerState`]
//! - [`state`]: intents ([`DesiredState`]), snapshots and the output record
//! - [`protocol`]: the [`DeviceDriver`]/[`DeviceSession`] traits and the TCP
//!   driver for Magic Home controllers
//! - [`orchestrator`]: applies an intent, settles, verifies, reports
//! - [`server`]: the axum router and its error mapping
//!
//! # Quick Start
//!
//! ```no_run
//! use flux_bridge::config::BridgeConfig;
//! use flux_bridge::protocol::{DriverConfig, TcpDriver};
//! use flux_bridge::server::{self, Bridge};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = BridgeConfig::new(DriverConfig::new("192.168.1.53"));
//!     let driver = TcpDriver::new(config.device().clone())?;
//!     let bridge = Bridge::new(driver, config.orchestrator());
//!
//!     let listener = tokio::net::TcpListener::bind(config.listen()).await?;
//!     server::serve(listener, bridge, async {
//!         let _ = tokio::signal::ctrl_c().await;
//!     })
//!     .await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod protocol;
pub mod server;
pub mod state;
pub mod types;

pub use config::BridgeConfig;
pub use error::{DecodeError, Error, ProtocolError, Result, TransportError, ValueError};
pub use orchestrator::{Phase, StateOrchestrator};
pub use protocol::{DeviceDriver, DeviceSession, DriverConfig, TcpDriver, TcpSession};
pub use server::{ApiError, Bridge};
pub use state::{DesiredState, DeviceSnapshot, StateReport};
pub use types::{PowerState, RgbColor};
