// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for bulb control.
//!
//! - [`PowerState`] - On/Off
//! - [`RgbColor`] - 8-bit RGB color, with the color-code codec
//!   ([`encode`], [`decode_channel`], [`decode_triple`])

mod power;
mod rgb_color;

pub use power::PowerState;
pub use rgb_color::{COLOR_MARKER, RgbColor, decode_channel, decode_triple, encode};
