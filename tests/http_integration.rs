// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the HTTP surface, backed by an in-memory bulb.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use flux_bridge::error::{Result, TransportError};
use flux_bridge::orchestrator::StateOrchestrator;
use flux_bridge::protocol::{DeviceDriver, DeviceSession};
use flux_bridge::server::{self, Bridge};
use flux_bridge::types::RgbColor;
use serde_json::{Value, json};
use tokio::net::TcpListener;

// ============================================================================
// In-memory bulb
// ============================================================================

#[derive(Debug, Default)]
struct Bulb {
    on: bool,
    color: RgbColor,
    commands: Vec<String>,
    unreachable: bool,
    active_sessions: usize,
    max_active_sessions: usize,
}

#[derive(Debug, Clone, Default)]
struct FakeDriver {
    bulb: Arc<Mutex<Bulb>>,
}

impl FakeDriver {
    fn with_state(on: bool, color: RgbColor) -> Self {
        let driver = Self::default();
        {
            let mut bulb = driver.bulb.lock().unwrap();
            bulb.on = on;
            bulb.color = color;
        }
        driver
    }

    fn commands(&self) -> Vec<String> {
        self.bulb.lock().unwrap().commands.clone()
    }
}

#[derive(Debug)]
struct FakeSession {
    bulb: Arc<Mutex<Bulb>>,
    telemetry: (bool, RgbColor),
}

impl FakeSession {
    fn record(&self, command: String, apply: impl FnOnce(&mut Bulb)) {
        let mut bulb = self.bulb.lock().unwrap();
        bulb.commands.push(command);
        apply(&mut bulb);
    }
}

impl Drop for FakeSession {
    fn drop(&mut self) {
        self.bulb.lock().unwrap().active_sessions -= 1;
    }
}

impl DeviceDriver for FakeDriver {
    type Session = FakeSession;

    async fn open(&self) -> Result<FakeSession> {
        let mut bulb = self.bulb.lock().unwrap();
        if bulb.unreachable {
            return Err(TransportError::Timeout(100).into());
        }
        bulb.active_sessions += 1;
        bulb.max_active_sessions = bulb.max_active_sessions.max(bulb.active_sessions);
        Ok(FakeSession {
            bulb: Arc::clone(&self.bulb),
            telemetry: (bulb.on, bulb.color),
        })
    }
}

impl DeviceSession for FakeSession {
    fn is_on(&self) -> bool {
        self.telemetry.0
    }

    fn current_rgb(&self) -> RgbColor {
        self.telemetry.1
    }

    async fn turn_on(&mut self) -> Result<()> {
        self.record("turn_on".to_string(), |bulb| bulb.on = true);
        Ok(())
    }

    async fn turn_off(&mut self) -> Result<()> {
        self.record("turn_off".to_string(), |bulb| bulb.on = false);
        Ok(())
    }

    async fn set_rgb(&mut self, color: RgbColor) -> Result<()> {
        self.record(format!("set_rgb {color}"), |bulb| bulb.color = color);
        Ok(())
    }

    async fn refresh_state(&mut self) -> Result<()> {
        let bulb = self.bulb.lock().unwrap();
        self.telemetry = (bulb.on, bulb.color);
        Ok(())
    }
}

async fn start_bridge(driver: FakeDriver) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let bridge = Bridge::new(driver, StateOrchestrator::new(Duration::from_millis(10)));
    tokio::spawn(server::serve(listener, bridge, std::future::pending()));
    format!("http://{addr}")
}

async fn get(url: &str) -> (u16, Value) {
    let response = reqwest::get(url).await.unwrap();
    let status = response.status().as_u16();
    let body = response.json::<Value>().await.unwrap();
    (status, body)
}

// ============================================================================
// Routes
// ============================================================================

mod routes {
    use super::*;

    #[tokio::test]
    async fn on_turns_bulb_on() {
        let driver = FakeDriver::with_state(false, RgbColor::new(1, 2, 3));
        let base = start_bridge(driver.clone()).await;

        let (status, body) = get(&format!("{base}/on")).await;

        assert_eq!(status, 200);
        assert_eq!(body, json!({ "color": "#010203", "state": "on" }));
        assert_eq!(driver.commands(), ["turn_on"]);
    }

    #[tokio::test]
    async fn off_turns_bulb_off() {
        let driver = FakeDriver::with_state(true, RgbColor::new(255, 255, 255));
        let base = start_bridge(driver.clone()).await;

        let (status, body) = get(&format!("{base}/off")).await;

        assert_eq!(status, 200);
        assert_eq!(body, json!({ "color": "#ffffff", "state": "off" }));
        assert_eq!(driver.commands(), ["turn_off"]);
    }

    #[tokio::test]
    async fn poll_routes_issue_no_commands() {
        let driver = FakeDriver::with_state(true, RgbColor::new(0, 255, 0));
        let base = start_bridge(driver.clone()).await;

        for route in ["poll", "macros/getData"] {
            let (status, body) = get(&format!("{base}/{route}")).await;
            assert_eq!(status, 200, "{route}");
            assert_eq!(body, json!({ "color": "#00ff00", "state": "on" }), "{route}");
        }
        assert!(driver.commands().is_empty());
    }

    #[tokio::test]
    async fn set_color_on_powered_off_bulb() {
        let driver = FakeDriver::with_state(false, RgbColor::new(0, 0, 0));
        let base = start_bridge(driver.clone()).await;

        let (status, body) = get(&format!("{base}/macros/set?color=00ff80")).await;

        assert_eq!(status, 200);
        assert_eq!(body, json!({ "color": "#00ff80", "state": "on" }));
        assert_eq!(driver.commands(), ["turn_on", "set_rgb #00ff80"]);
    }

    #[tokio::test]
    async fn set_color_accepts_uppercase() {
        let driver = FakeDriver::with_state(true, RgbColor::new(0, 0, 0));
        let base = start_bridge(driver.clone()).await;

        let (status, body) = get(&format!("{base}/macros/set?color=C0FFEE")).await;

        assert_eq!(status, 200);
        assert_eq!(body["color"], "#c0ffee");
        assert_eq!(driver.commands(), ["set_rgb #c0ffee"]);
    }

    #[tokio::test]
    async fn on_twice_is_idempotent() {
        let driver = FakeDriver::with_state(true, RgbColor::new(9, 9, 9));
        let base = start_bridge(driver.clone()).await;

        let first = get(&format!("{base}/on")).await;
        let second = get(&format!("{base}/on")).await;

        assert_eq!(first, second);
        assert_eq!(driver.commands(), ["turn_on", "turn_on"]);
    }
}

// ============================================================================
// Error mapping
// ============================================================================

mod errors {
    use super::*;

    #[tokio::test]
    async fn invalid_hex_is_bad_request() {
        let driver = FakeDriver::default();
        let base = start_bridge(driver.clone()).await;

        let (status, body) = get(&format!("{base}/macros/set?color=zz0000")).await;

        assert_eq!(status, 400);
        assert!(body["error"].as_str().unwrap().contains("invalid hex"));
        assert!(driver.commands().is_empty());
    }

    #[tokio::test]
    async fn truncated_color_is_bad_request() {
        let driver = FakeDriver::default();
        let base = start_bridge(driver.clone()).await;

        let (status, body) = get(&format!("{base}/macros/set?color=ff00")).await;

        assert_eq!(status, 400);
        assert!(body["error"].as_str().unwrap().contains("expected 6 hex digits"));
        assert!(driver.commands().is_empty());
    }

    #[tokio::test]
    async fn overlong_color_is_bad_request() {
        let driver = FakeDriver::default();
        let base = start_bridge(driver.clone()).await;

        let (status, body) = get(&format!("{base}/macros/set?color=00ff800")).await;

        assert_eq!(status, 400);
        assert!(body["error"].as_str().unwrap().contains("expected 6 hex digits"));
        assert!(driver.commands().is_empty());
    }

    #[tokio::test]
    async fn missing_color_is_bad_request() {
        let base = start_bridge(FakeDriver::default()).await;

        let (status, body) = get(&format!("{base}/macros/set")).await;

        assert_eq!(status, 400);
        assert_eq!(body, json!({ "error": "missing query parameter: color" }));
    }

    #[tokio::test]
    async fn unreachable_bulb_is_gateway_timeout() {
        let driver = FakeDriver::default();
        driver.bulb.lock().unwrap().unreachable = true;
        let base = start_bridge(driver).await;

        let (status, body) = get(&format!("{base}/poll")).await;

        assert_eq!(status, 504);
        assert!(body["error"].as_str().unwrap().contains("timed out"));
    }
}

// ============================================================================
// Concurrency
// ============================================================================

#[tokio::test]
async fn concurrent_requests_are_serialized() {
    let driver = FakeDriver::with_state(false, RgbColor::new(0, 0, 0));
    let base = start_bridge(driver.clone()).await;

    let requests = ["on", "off", "macros/set?color=112233", "on", "poll"]
        .into_iter()
        .map(|route| {
            let url = format!("{base}/{route}");
            tokio::spawn(async move { reqwest::get(url).await.unwrap().status().as_u16() })
        })
        .collect::<Vec<_>>();

    for request in requests {
        assert_eq!(request.await.unwrap(), 200);
    }
    assert_eq!(driver.bulb.lock().unwrap().max_active_sessions, 1);
}
