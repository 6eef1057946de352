// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! TCP transport for Magic Home / LEDENET controllers.

use std::future::Future;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::error::{ProtocolError, Result, TransportError};
use crate::protocol::frame::{CommandFrame, STATE_HEADER, STATE_RESPONSE_LEN, StateResponse};
use crate::protocol::{DeviceDriver, DeviceSession, DriverConfig};
use crate::types::RgbColor;

/// Bytes tolerated ahead of a state response header. Commands may be
/// acknowledged with a short frame that is left unread until the next query.
const MAX_DISCARD: usize = 32;

/// Driver that opens a fresh TCP connection per session.
///
/// # Examples
///
/// ```no_run
/// use flux_bridge::protocol::{DeviceDriver, DeviceSession, DriverConfig, TcpDriver};
///
/// # async fn example() -> flux_bridge::Result<()> {
/// let driver = TcpDriver::new(DriverConfig::new("192.168.1.53"))?;
/// let mut session = driver.open().await?;
/// session.turn_on().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TcpDriver {
    config: DriverConfig,
}

impl TcpDriver {
    /// Creates a driver for the configured bulb.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::InvalidAddress` if the host is empty.
    pub fn new(config: DriverConfig) -> std::result::Result<Self, TransportError> {
        if config.host().trim().is_empty() {
            return Err(TransportError::InvalidAddress("device host is empty".to_string()));
        }
        Ok(Self { config })
    }
}

impl DeviceDriver for TcpDriver {
    type Session = TcpSession;

    async fn open(&self) -> Result<TcpSession> {
        TcpSession::connect(&self.config).await
    }
}

/// An open connection to one bulb, holding the last telemetry read.
#[derive(Debug)]
pub struct TcpSession {
    stream: TcpStream,
    timeout: Duration,
    telemetry: StateResponse,
}

impl TcpSession {
    /// Connects and reads the initial state.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or the state query fails.
    pub async fn connect(config: &DriverConfig) -> Result<Self> {
        let address = config.address();
        let timeout = config.timeout();

        tracing::debug!(address = %address, "Connecting to device");

        let mut stream = with_timeout(timeout, TcpStream::connect(&address))
            .await?
            .map_err(|source| TransportError::ConnectionFailed {
                address: address.clone(),
                source,
            })?;
        stream
            .set_nodelay(true)
            .map_err(|e| TransportError::io("configure", e))?;

        let telemetry = query_state(&mut stream, timeout).await?;

        Ok(Self {
            stream,
            timeout,
            telemetry,
        })
    }

    /// Returns the full telemetry captured by the last state read.
    #[must_use]
    pub fn telemetry(&self) -> &StateResponse {
        &self.telemetry
    }

    async fn send(&mut self, frame: CommandFrame) -> Result<()> {
        send_frame(&mut self.stream, self.timeout, frame).await
    }
}

impl DeviceSession for TcpSession {
    fn is_on(&self) -> bool {
        self.telemetry.power().is_on()
    }

    fn current_rgb(&self) -> RgbColor {
        self.telemetry.color()
    }

    async fn turn_on(&mut self) -> Result<()> {
        self.send(CommandFrame::PowerOn).await
    }

    async fn turn_off(&mut self) -> Result<()> {
        self.send(CommandFrame::PowerOff).await
    }

    async fn set_rgb(&mut self, color: RgbColor) -> Result<()> {
        self.send(CommandFrame::SetRgb(color)).await
    }

    async fn refresh_state(&mut self) -> Result<()> {
        self.telemetry = query_state(&mut self.stream, self.timeout).await?;
        Ok(())
    }
}

async fn send_frame(stream: &mut TcpStream, timeout: Duration, frame: CommandFrame) -> Result<()> {
    let bytes = frame.to_bytes();
    tracing::debug!(command = ?frame, bytes = ?bytes, "Sending frame");

    with_timeout(timeout, stream.write_all(&bytes))
        .await?
        .map_err(|e| TransportError::io("write", e))?;
    Ok(())
}

async fn query_state(stream: &mut TcpStream, timeout: Duration) -> Result<StateResponse> {
    send_frame(stream, timeout, CommandFrame::QueryState).await?;
    with_timeout(timeout, read_state_response(stream)).await?
}

/// Reads one state response, skipping any stray bytes ahead of its header.
async fn read_state_response<R: AsyncRead + Unpin>(reader: &mut R) -> Result<StateResponse> {
    let mut frame = [0u8; STATE_RESPONSE_LEN];
    let mut discarded = 0usize;

    loop {
        reader
            .read_exact(&mut frame[..1])
            .await
            .map_err(|e| TransportError::io("read", e))?;
        if frame[0] == STATE_HEADER {
            break;
        }
        discarded += 1;
        if discarded > MAX_DISCARD {
            return Err(ProtocolError::UnexpectedHeader {
                expected: STATE_HEADER,
                actual: frame[0],
            }
            .into());
        }
    }
    if discarded > 0 {
        tracing::trace!(discarded, "Skipped bytes ahead of state response");
    }

    reader
        .read_exact(&mut frame[1..])
        .await
        .map_err(|e| TransportError::io("read", e))?;

    tracing::debug!(frame = ?frame, "Received state response");

    Ok(StateResponse::parse(&frame)?)
}

async fn with_timeout<F, T>(limit: Duration, future: F) -> std::result::Result<T, TransportError>
where
    F: Future<Output = T>,
{
    tokio::time::timeout(limit, future)
        .await
        .map_err(|_| TransportError::Timeout(u64::try_from(limit.as_millis()).unwrap_or(u64::MAX)))
}
