// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP surface of the bridge.
//!
//! Handlers turn each request into a [`DesiredState`], run it through the
//! [`StateOrchestrator`] and answer with the resulting
//! [`StateReport`](crate::state::StateReport) as JSON.
//!
//! The bulb accepts one session at a time and overlapping command/settle
//! sequences leave it in an undefined state, so [`Bridge`] serializes every
//! operation behind a single lock.

mod error;
mod routes;

pub use error::ApiError;
pub use routes::router;

use std::future::Future;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::Mutex;

use crate::error::Result;
use crate::orchestrator::StateOrchestrator;
use crate::protocol::DeviceDriver;
use crate::state::{DesiredState, DeviceSnapshot};

/// Shared handler state: the driver, the orchestrator and the device lock.
#[derive(Debug)]
pub struct Bridge<D> {
    driver: Arc<D>,
    orchestrator: StateOrchestrator,
    device_lock: Arc<Mutex<()>>,
}

impl<D> Clone for Bridge<D> {
    fn clone(&self) -> Self {
        Self {
            driver: Arc::clone(&self.driver),
            orchestrator: self.orchestrator,
            device_lock: Arc::clone(&self.device_lock),
        }
    }
}

impl<D: DeviceDriver> Bridge<D> {
    /// Creates the bridge state.
    #[must_use]
    pub fn new(driver: D, orchestrator: StateOrchestrator) -> Self {
        Self {
            driver: Arc::new(driver),
            orchestrator,
            device_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Opens a session and applies `intent`, holding the device lock
    /// throughout.
    ///
    /// If the returned future is dropped mid-way, commands already sent stay
    /// applied on the bulb.
    ///
    /// # Errors
    ///
    /// Returns any error raised while opening the session or orchestrating.
    pub async fn execute(&self, intent: DesiredState) -> Result<DeviceSnapshot> {
        let _guard = self.device_lock.lock().await;
        let mut session = self.driver.open().await?;
        self.orchestrator
            .apply_and_report(&mut session, &intent)
            .await
    }
}

/// Serves the router on `listener` until `shutdown` resolves.
///
/// # Errors
///
/// Returns an IO error if the server fails.
pub async fn serve<D, F>(
    listener: TcpListener,
    bridge: Bridge<D>,
    shutdown: F,
) -> std::io::Result<()>
where
    D: DeviceDriver + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "HTTP server listening");
    }
    axum::serve(listener, router(bridge))
        .with_graceful_shutdown(shutdown)
        .await
}
