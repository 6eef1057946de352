// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Live device snapshots and their canonical output record.

use serde::Serialize;

use crate::types::{PowerState, RgbColor, encode};

/// Power and color as read back from the bulb at one point in time.
///
/// Snapshots are never cached between requests; the bulb is the only source
/// of truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceSnapshot {
    power: PowerState,
    color: RgbColor,
}

impl DeviceSnapshot {
    /// Creates a snapshot from telemetry values.
    #[must_use]
    pub const fn new(power: PowerState, color: RgbColor) -> Self {
        Self { power, color }
    }

    /// Returns the power state.
    #[must_use]
    pub const fn power(&self) -> PowerState {
        self.power
    }

    /// Returns the color.
    #[must_use]
    pub const fn color(&self) -> RgbColor {
        self.color
    }

    /// Renders this snapshot into its output record.
    #[must_use]
    pub fn report(&self) -> StateReport {
        StateReport::from(self)
    }
}

/// The canonical `{color, state}` record returned to callers.
///
/// # Examples
///
/// ```
/// use flux_bridge::state::{DeviceSnapshot, StateReport};
/// use flux_bridge::types::{PowerState, RgbColor};
///
/// let snapshot = DeviceSnapshot::new(PowerState::On, RgbColor::new(0, 255, 0));
/// let report = StateReport::from(&snapshot);
/// assert_eq!(
///     serde_json::to_string(&report).unwrap(),
///     r##"{"color":"#00ff00","state":"on"}"##
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateReport {
    /// Marker-prefixed color code.
    pub color: String,
    /// Power state.
    pub state: PowerState,
}

impl From<&DeviceSnapshot> for StateReport {
    fn from(snapshot: &DeviceSnapshot) -> Self {
        Self {
            color: encode(snapshot.color),
            state: snapshot.power,
        }
    }
}

impl From<DeviceSnapshot> for StateReport {
    fn from(snapshot: DeviceSnapshot) -> Self {
        Self::from(&snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_fields() {
        let report = DeviceSnapshot::new(PowerState::Off, RgbColor::new(0, 0, 0)).report();
        assert_eq!(report.color, "#000000");
        assert_eq!(report.state, PowerState::Off);
    }

    #[test]
    fn report_json_shape() {
        let report = DeviceSnapshot::new(PowerState::On, RgbColor::new(255, 0, 0)).report();
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "color": "#ff0000", "state": "on" })
        );
    }

    #[test]
    fn report_is_deterministic() {
        let snapshot = DeviceSnapshot::new(PowerState::On, RgbColor::new(0, 255, 128));
        assert_eq!(snapshot.report(), snapshot.report());
        assert_eq!(StateReport::from(snapshot), snapshot.report());
    }
}
