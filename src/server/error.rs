// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mapping of bridge errors onto HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::Error;

/// Errors returned by HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A required query parameter was absent.
    #[error("missing query parameter: {0}")]
    MissingParameter(&'static str),

    /// The core or the device reported an error.
    #[error(transparent)]
    Bridge(#[from] Error),
}

impl ApiError {
    /// Returns the HTTP status for this error.
    ///
    /// Bad input maps to `400`, device timeouts to `504` and every other
    /// device failure to `502`.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingParameter(_) => StatusCode::BAD_REQUEST,
            Self::Bridge(err) if err.is_client_error() => StatusCode::BAD_REQUEST,
            Self::Bridge(err) if err.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            Self::Bridge(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), error = %self, "Device request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "Rejected request");
        }

        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DecodeError, ProtocolError, TransportError, ValueError};

    #[test]
    fn client_errors_are_bad_request() {
        assert_eq!(
            ApiError::MissingParameter("color").status(),
            StatusCode::BAD_REQUEST
        );

        let decode = ApiError::from(Error::from(DecodeError::InvalidHex("zz".to_string())));
        assert_eq!(decode.status(), StatusCode::BAD_REQUEST);

        let value = ApiError::from(Error::from(ValueError::OutOfRange {
            field: "red",
            min: 0,
            max: 255,
            actual: 256,
        }));
        assert_eq!(value.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn device_errors_are_upstream_failures() {
        let timeout = ApiError::from(Error::from(TransportError::Timeout(5000)));
        assert_eq!(timeout.status(), StatusCode::GATEWAY_TIMEOUT);

        let refused = ApiError::from(Error::from(TransportError::ConnectionFailed {
            address: "10.0.0.2:5577".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::ConnectionRefused),
        }));
        assert_eq!(refused.status(), StatusCode::BAD_GATEWAY);

        let protocol = ApiError::from(Error::from(ProtocolError::UnknownPowerState(7)));
        assert_eq!(protocol.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn response_carries_status() {
        let response = ApiError::MissingParameter("color").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
