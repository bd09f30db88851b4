//! Inbound telemetry feed: Signal K delta decoding, unit conversion, and the
//! connection seam used by the ingest activity.
//!
//! A delta looks like:
//!
//! ```json
//! {"updates":[{"values":[{"path":"environment.wind.speedTrue","value":6.17}]}]}
//! ```
//!
//! Anything that does not fit (malformed JSON, missing `updates`, unknown
//! path, non-numeric value) is skipped without error.
use futures_util::Future;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::time::Instant;
use tracing::debug;

use crate::core::{ms_to_knots, rad_to_deg, PerformanceSample};
use crate::error::FeedError;

pub mod tcp;

pub use tcp::TcpFeedConnector;

/// Requested update period for each subscribed path (ms).
pub const SUBSCRIPTION_PERIOD_MS: u32 = 1000;

//==================================================================================PATHS
/// Feed paths the monitor consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackedPath {
    /// `navigation.speedThroughWater`, m/s.
    SpeedThroughWater,
    /// `environment.wind.angleTrueWater`, radians.
    WindAngleTrue,
    /// `environment.wind.speedTrue`, m/s.
    WindSpeedTrue,
}

impl TrackedPath {
    pub const ALL: [TrackedPath; 3] = [
        TrackedPath::SpeedThroughWater,
        TrackedPath::WindAngleTrue,
        TrackedPath::WindSpeedTrue,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TrackedPath::SpeedThroughWater => "navigation.speedThroughWater",
            TrackedPath::WindAngleTrue => "environment.wind.angleTrueWater",
            TrackedPath::WindSpeedTrue => "environment.wind.speedTrue",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == path)
    }

    /// Convert a raw SI value to knots or degrees.
    pub fn convert(self, raw: f64) -> f64 {
        match self {
            TrackedPath::SpeedThroughWater | TrackedPath::WindSpeedTrue => ms_to_knots(raw),
            TrackedPath::WindAngleTrue => rad_to_deg(raw),
        }
    }
}

/// One converted value taken from a delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedReading {
    pub path: TrackedPath,
    /// Knots or degrees.
    pub value: f64,
}

//==================================================================================DELTA
#[derive(Deserialize)]
struct Delta {
    updates: Vec<DeltaUpdate>,
}

#[derive(Deserialize)]
struct DeltaUpdate {
    #[serde(default)]
    values: Vec<DeltaValue>,
}

#[derive(Deserialize)]
struct DeltaValue {
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    value: Value,
}

/// Extract the tracked readings of one delta message, in message order.
pub fn parse_delta(text: &str) -> Vec<FeedReading> {
    let delta: Delta = match serde_json::from_str(text) {
        Ok(delta) => delta,
        Err(e) => {
            debug!(error = %e, "ignoring feed message");
            return Vec::new();
        }
    };

    delta
        .updates
        .iter()
        .flat_map(|update| update.values.iter())
        .filter_map(|entry| {
            let path = TrackedPath::from_path(entry.path.as_deref()?)?;
            let raw = entry.value.as_f64()?;
            Some(FeedReading {
                path,
                value: path.convert(raw),
            })
        })
        .collect()
}

/// Subscription request for the three tracked paths.
pub fn subscription_request() -> String {
    let subscribe: Vec<Value> = TrackedPath::ALL
        .iter()
        .map(|path| json!({ "path": path.as_str(), "period": SUBSCRIPTION_PERIOD_MS }))
        .collect();
    json!({ "context": "vessels.self", "subscribe": subscribe }).to_string()
}

//==================================================================================STATE
/// Latest value of each tracked path.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SensorState {
    pub stw: Option<f64>,
    pub twa: Option<f64>,
    pub tws: Option<f64>,
}

impl SensorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply readings; returns a sample when at least one value was applied
    /// and all three paths have been seen.
    pub fn update(&mut self, readings: &[FeedReading], now: Instant) -> Option<PerformanceSample> {
        if readings.is_empty() {
            return None;
        }
        for reading in readings {
            let slot = match reading.path {
                TrackedPath::SpeedThroughWater => &mut self.stw,
                TrackedPath::WindAngleTrue => &mut self.twa,
                TrackedPath::WindSpeedTrue => &mut self.tws,
            };
            *slot = Some(reading.value);
        }
        self.sample(now)
    }

    /// Parse a raw delta and [`update`](Self::update) with it.
    pub fn apply(&mut self, text: &str, now: Instant) -> Option<PerformanceSample> {
        self.update(&parse_delta(text), now)
    }

    /// Current state as a sample, once complete.
    pub fn sample(&self, now: Instant) -> Option<PerformanceSample> {
        Some(PerformanceSample::new(self.stw?, self.twa?, self.tws?, now))
    }
}

//==================================================================================CONNECTION
/// An open feed connection.
pub trait FeedStream: Send {
    /// Send a subscription request.
    fn subscribe<'a>(
        &'a mut self,
        request: &'a str,
    ) -> impl Future<Output = Result<(), FeedError>> + Send + 'a;

    /// Wait for the next message. Must be cancel safe: the ingest activity
    /// wraps it in a timeout.
    fn next_message<'a>(&'a mut self) -> impl Future<Output = Result<String, FeedError>> + Send + 'a;
}

/// Opens feed connections; called again after every disconnect.
pub trait FeedConnector: Send + Sync {
    type Stream: FeedStream;

    fn connect<'a>(&'a self) -> impl Future<Output = Result<Self::Stream, FeedError>> + Send + 'a;

    /// Human-readable endpoint, for logs.
    fn endpoint(&self) -> &str;
}
