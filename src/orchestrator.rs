// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Applies desired-state intents to a bulb and reports what it settled on.
//!
//! An orchestrated operation walks through four phases:
//!
//! ```text
//! Idle --command--> CommandIssued --> Settling --refresh--> Verified
//!   \__________________ pure poll __________________________/
//! ```
//!
//! The bulb needs a moment after each command before its telemetry reflects
//! the change, so every command is followed by a fixed settle wait and a
//! forced state refresh. Pure polls read the current state immediately.
//!
//! Errors from the session are returned unchanged; nothing is retried.

use std::fmt;
use std::time::Duration;

use crate::error::Result;
use crate::protocol::DeviceSession;
use crate::state::{DesiredState, DeviceSnapshot};
use crate::types::PowerState;

/// Phase of an orchestrated operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing sent yet.
    Idle,
    /// A command reached the bulb.
    CommandIssued,
    /// Waiting for the firmware to apply the command, then re-reading state.
    Settling,
    /// Telemetry is trustworthy and can be reported.
    Verified,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::CommandIssued => "command-issued",
            Self::Settling => "settling",
            Self::Verified => "verified",
        })
    }
}

/// Drives a [`DeviceSession`] from a [`DesiredState`] to a [`DeviceSnapshot`].
///
/// The orchestrator holds no device state of its own. Callers must make sure
/// at most one operation per bulb is in flight.
///
/// # Examples
///
/// ```no_run
/// use flux_bridge::orchestrator::StateOrchestrator;
/// use flux_bridge::protocol::{DeviceDriver, DriverConfig, TcpDriver};
/// use flux_bridge::state::DesiredState;
/// use flux_bridge::types::PowerState;
///
/// # async fn example() -> flux_bridge::Result<()> {
/// let driver = TcpDriver::new(DriverConfig::new("192.168.1.53"))?;
/// let mut session = driver.open().await?;
///
/// let orchestrator = StateOrchestrator::default();
/// let snapshot = orchestrator
///     .apply_and_report(&mut session, &DesiredState::power(PowerState::On))
///     .await?;
/// println!("{}", snapshot.report().color);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateOrchestrator {
    settle: Duration,
}

impl StateOrchestrator {
    /// Settle interval used by [`Default`].
    pub const DEFAULT_SETTLE: Duration = Duration::from_secs(1);

    /// Creates an orchestrator with a custom settle interval.
    #[must_use]
    pub const fn new(settle: Duration) -> Self {
        Self { settle }
    }

    /// Returns the settle interval.
    #[must_use]
    pub const fn settle(&self) -> Duration {
        self.settle
    }

    /// Applies `intent` to the bulb and returns its state afterwards.
    ///
    /// A color intent powers the bulb on first if needed, then sets the
    /// color; its power field is not consulted. Otherwise a power intent
    /// switches the bulb on or off. Any command is followed by the settle wait
    /// and a telemetry refresh. A pure poll issues nothing and does not wait.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by the session.
    pub async fn apply_and_report<S: DeviceSession>(
        &self,
        session: &mut S,
        intent: &DesiredState,
    ) -> Result<DeviceSnapshot> {
        let mut phase = Phase::Idle;

        loop {
            tracing::trace!(%phase, %intent, "Orchestrator phase");

            phase = match phase {
                Phase::Idle => {
                    if issue(session, intent).await? {
                        Phase::CommandIssued
                    } else {
                        Phase::Verified
                    }
                }
                Phase::CommandIssued => {
                    tracing::debug!(settle = ?self.settle, "Waiting for device to settle");
                    Phase::Settling
                }
                Phase::Settling => {
                    tokio::time::sleep(self.settle).await;
                    session.refresh_state().await?;
                    Phase::Verified
                }
                Phase::Verified => return Ok(read_snapshot(session)),
            };
        }
    }
}

impl Default for StateOrchestrator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SETTLE)
    }
}

/// Sends the commands for `intent`. Returns `false` if there was nothing to send.
async fn issue<S: DeviceSession>(session: &mut S, intent: &DesiredState) -> Result<bool> {
    if let Some(color) = intent.color_value() {
        if !session.is_on() {
            session.turn_on().await?;
        }
        session.set_rgb(color).await?;
        return Ok(true);
    }

    match intent.power_value() {
        Some(PowerState::On) => session.turn_on().await?,
        Some(PowerState::Off) => session.turn_off().await?,
        None => return Ok(false),
    }
    Ok(true)
}

fn read_snapshot<S: DeviceSession>(session: &S) -> DeviceSnapshot {
    DeviceSnapshot::new(PowerState::from(session.is_on()), session.current_rgb())
}
