// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Desired-state intents.

use std::fmt;

use crate::types::{PowerState, RgbColor};

/// The change a caller wants applied to the bulb.
///
/// Both fields are optional. An intent with neither set is a pure poll. When
/// a color is present it takes precedence over the power field, since setting
/// a color always powers the bulb on first.
///
/// # Examples
///
/// ```
/// use flux_bridge::state::DesiredState;
/// use flux_bridge::types::{PowerState, RgbColor};
///
/// assert!(DesiredState::poll().is_poll());
///
/// let intent = DesiredState::color(RgbColor::new(255, 0, 0));
/// assert_eq!(intent.color_value(), Some(RgbColor::new(255, 0, 0)));
/// assert_eq!(intent.power_value(), None);
///
/// let intent = DesiredState::power(PowerState::Off);
/// assert!(!intent.is_poll());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DesiredState {
    power: Option<PowerState>,
    color: Option<RgbColor>,
}

impl DesiredState {
    /// An intent that changes nothing and only reads the current state.
    #[must_use]
    pub const fn poll() -> Self {
        Self {
            power: None,
            color: None,
        }
    }

    /// An intent that switches power.
    #[must_use]
    pub const fn power(state: PowerState) -> Self {
        Self {
            power: Some(state),
            color: None,
        }
    }

    /// An intent that sets a color.
    #[must_use]
    pub const fn color(color: RgbColor) -> Self {
        Self {
            power: None,
            color: Some(color),
        }
    }

    /// Adds a power state to this intent.
    #[must_use]
    pub const fn with_power(mut self, state: PowerState) -> Self {
        self.power = Some(state);
        self
    }

    /// Adds a color to this intent.
    #[must_use]
    pub const fn with_color(mut self, color: RgbColor) -> Self {
        self.color = Some(color);
        self
    }

    /// Returns the requested power state, if any.
    #[must_use]
    pub const fn power_value(&self) -> Option<PowerState> {
        self.power
    }

    /// Returns the requested color, if any.
    #[must_use]
    pub const fn color_value(&self) -> Option<RgbColor> {
        self.color
    }

    /// Returns `true` if the intent issues no command.
    #[must_use]
    pub const fn is_poll(&self) -> bool {
        self.power.is_none() && self.color.is_none()
    }
}

impl fmt::Display for DesiredState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.power, self.color) {
            (None, None) => f.write_str("poll"),
            (Some(power), None) => write!(f, "power={power}"),
            (None, Some(color)) => write!(f, "color={color}"),
            (Some(power), Some(color)) => write!(f, "power={power} color={color}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_poll() {
        assert_eq!(DesiredState::default(), DesiredState::poll());
        assert!(DesiredState::default().is_poll());
    }

    #[test]
    fn builders_combine() {
        let intent = DesiredState::power(PowerState::On).with_color(RgbColor::new(1, 2, 3));
        assert_eq!(intent.power_value(), Some(PowerState::On));
        assert_eq!(intent.color_value(), Some(RgbColor::new(1, 2, 3)));
        assert!(!intent.is_poll());
    }

    #[test]
    fn display() {
        assert_eq!(DesiredState::poll().to_string(), "poll");
        assert_eq!(DesiredState::power(PowerState::Off).to_string(), "power=off");
        assert_eq!(
            DesiredState::color(RgbColor::new(0, 255, 128)).to_string(),
            "color=#00ff80"
        );
    }
}
