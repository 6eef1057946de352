// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Route table and handlers.

use axum::Json;
use axum::Router;
use axum::extract::{Query, State};
use axum::routing::get;
use serde::Deserialize;

use crate::error::Error;
use crate::protocol::DeviceDriver;
use crate::server::{ApiError, Bridge};
use crate::state::{DesiredState, StateReport};
use crate::types::{PowerState, decode_triple};

type ApiResult = Result<Json<StateReport>, ApiError>;

/// Builds the HTTP router.
///
/// | Route | Intent |
/// |-------|--------|
/// | `GET /on` | power on |
/// | `GET /off` | power off |
/// | `GET /poll` | poll |
/// | `GET /macros/getData` | poll |
/// | `GET /macros/set?color=rrggbb` | set color |
pub fn router<D: DeviceDriver + 'static>(bridge: Bridge<D>) -> Router {
    Router::new()
        .route("/on", get(power_on::<D>))
        .route("/off", get(power_off::<D>))
        .route("/poll", get(poll::<D>))
        .route("/macros/getData", get(poll::<D>))
        .route("/macros/set", get(set_color::<D>))
        .with_state(bridge)
}

/// Query string of `/macros/set`.
#[derive(Debug, Deserialize)]
struct SetColorParams {
    color: Option<String>,
}

async fn power_on<D: DeviceDriver + 'static>(State(bridge): State<Bridge<D>>) -> ApiResult {
    respond(&bridge, DesiredState::power(PowerState::On)).await
}

async fn power_off<D: DeviceDriver + 'static>(State(bridge): State<Bridge<D>>) -> ApiResult {
    respond(&bridge, DesiredState::power(PowerState::Off)).await
}

async fn poll<D: DeviceDriver + 'static>(State(bridge): State<Bridge<D>>) -> ApiResult {
    respond(&bridge, DesiredState::poll()).await
}

async fn set_color<D: DeviceDriver + 'static>(
    State(bridge): State<Bridge<D>>,
    Query(params): Query<SetColorParams>,
) -> ApiResult {
    let raw = params.color.ok_or(ApiError::MissingParameter("color"))?;
    // decoded before the device is touched
    let color = decode_triple(&raw).map_err(Error::from)?;
    respond(&bridge, DesiredState::color(color)).await
}

async fn respond<D: DeviceDriver + 'static>(bridge: &Bridge<D>, intent: DesiredState) -> ApiResult {
    tracing::info!(%intent, "Handling request");
    let snapshot = bridge.execute(intent).await?;
    let report = snapshot.report();
    tracing::debug!(color = %report.color, state = %report.state, "Reporting state");
    Ok(Json(report))
}
