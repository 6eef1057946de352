// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bulb state types.
//!
//! [`DesiredState`] is what a caller asks for, [`DeviceSnapshot`] is what the
//! bulb reports afterwards, and [`StateReport`] is the record handed back to
//! HTTP clients.
//!
//! # Examples
//!
//! ```
//! use flux_bridge::state::{DesiredState, DeviceSnapshot};
//! use flux_bridge::types::{PowerState, RgbColor};
//!
//! let intent = DesiredState::power(PowerState::On);
//! assert!(!intent.is_poll());
//!
//! let snapshot = DeviceSnapshot::new(PowerState::On, RgbColor::new(255, 0, 0));
//! assert_eq!(snapshot.report().color, "#ff0000");
//! ```

mod intent;
mod snapshot;

pub use intent::DesiredState;
pub use snapshot::{DeviceSnapshot, StateReport};
