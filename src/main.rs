// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `flux-bridge` - serves the HTTP control endpoints for one bulb.

use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use flux_bridge::config::BridgeConfig;
use flux_bridge::protocol::{DriverConfig, TcpDriver};
use flux_bridge::server::{self, Bridge};

#[derive(Debug, Parser)]
#[command(name = "flux-bridge")]
#[command(about = "HTTP control shim for a Magic Home / LEDENET RGB bulb", long_about = None)]
struct Cli {
    /// Host name or IP address of the bulb
    #[arg(long, env = "FLUX_BRIDGE_DEVICE")]
    device: String,

    /// TCP port of the bulb
    #[arg(long, env = "FLUX_BRIDGE_DEVICE_PORT", default_value_t = DriverConfig::DEFAULT_PORT)]
    device_port: u16,

    /// Address the HTTP server binds to
    #[arg(long, env = "FLUX_BRIDGE_LISTEN", default_value = "0.0.0.0:8000")]
    listen: SocketAddr,

    /// Milliseconds to wait after a command before re-reading the bulb
    #[arg(long, env = "FLUX_BRIDGE_SETTLE_MS", default_value_t = 1000)]
    settle_ms: u64,

    /// Connect/read/write timeout for the bulb, in milliseconds
    #[arg(long, env = "FLUX_BRIDGE_TIMEOUT_MS", default_value_t = 5000)]
    timeout_ms: u64,
}

impl Cli {
    fn into_config(self) -> BridgeConfig {
        let device = DriverConfig::new(self.device)
            .with_port(self.device_port)
            .with_timeout(Duration::from_millis(self.timeout_ms));
        BridgeConfig::new(device)
            .with_listen(self.listen)
            .with_settle(Duration::from_millis(self.settle_ms))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Cli::parse().into_config();
    tracing::info!(
        device = %config.device().address(),
        listen = %config.listen(),
        settle = ?config.settle(),
        "Starting bridge"
    );

    let driver = TcpDriver::new(config.device().clone())?;
    let bridge = Bridge::new(driver, config.orchestrator());
    let listener = tokio::net::TcpListener::bind(config.listen()).await?;

    server::serve(listener, bridge, shutdown_signal()).await?;
    tracing::info!("Bridge stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
