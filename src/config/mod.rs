//! Runtime configuration of the efficiency monitor.
//!
//! Loaded from an optional JSON file; every missing field takes its default.
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::aggregator::DEFAULT_CAPACITY;
use crate::error::ConfigError;

/// Highest assignable NMEA 2000 source address.
pub const MAX_SOURCE_ADDRESS: u8 = 252;

/// Highest CAN priority value.
pub const MAX_PRIORITY: u8 = 7;

/// Shortest accepted window or interval, in seconds.
pub const MIN_PERIOD_SECS: f64 = 0.001;

const DEFAULT_WINDOW_SECS: f64 = 10.0;
const DEFAULT_INTERVAL_SECS: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Telemetry feed endpoint, `host:port`.
    pub feed_address: String,
    /// Serial device of the RAW-mode gateway.
    pub gateway_port: String,
    /// Seconds of samples averaged per transmission (fractions allowed).
    pub averaging_window_secs: f64,
    /// Seconds between two transmissions (fractions allowed).
    pub transmit_interval_secs: f64,
    /// Engine instance carried in PGN 127489.
    pub engine_instance: u8,
    /// NMEA 2000 source address of this node (0-252).
    pub source_address: u8,
    /// CAN priority of the emitted frames (0-7).
    pub priority: u8,
    /// Maximum number of buffered samples.
    pub buffer_capacity: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            feed_address: "localhost:8375".to_string(),
            gateway_port: "/dev/ttyACM0".to_string(),
            averaging_window_secs: DEFAULT_WINDOW_SECS,
            transmit_interval_secs: DEFAULT_INTERVAL_SECS,
            engine_instance: 0,
            source_address: 42,
            priority: 6,
            buffer_capacity: DEFAULT_CAPACITY,
        }
    }
}

impl MonitorConfig {
    /// Read and validate a JSON configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse and validate a JSON document.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_period("averaging_window_secs", self.averaging_window_secs)?;
        check_period("transmit_interval_secs", self.transmit_interval_secs)?;
        if self.buffer_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "buffer_capacity",
                reason: "must hold at least one sample",
            });
        }
        if self.source_address > MAX_SOURCE_ADDRESS {
            return Err(ConfigError::Invalid {
                field: "source_address",
                reason: "must be between 0 and 252",
            });
        }
        if self.priority > MAX_PRIORITY {
            return Err(ConfigError::Invalid {
                field: "priority",
                reason: "must be between 0 and 7",
            });
        }
        Ok(())
    }

    /// Averaging window; the default applies if the field was never validated.
    pub fn averaging_window(&self) -> Duration {
        period(self.averaging_window_secs, DEFAULT_WINDOW_SECS)
    }

    /// Transmission period; the default applies if the field was never validated.
    pub fn transmit_interval(&self) -> Duration {
        period(self.transmit_interval_secs, DEFAULT_INTERVAL_SECS)
    }
}

fn check_period(field: &'static str, secs: f64) -> Result<(), ConfigError> {
    if !secs.is_finite() || secs < MIN_PERIOD_SECS {
        return Err(ConfigError::Invalid {
            field,
            reason: "must be a finite number of seconds, at least 0.001",
        });
    }
    if Duration::try_from_secs_f64(secs).is_err() {
        return Err(ConfigError::Invalid {
            field,
            reason: "too large",
        });
    }
    Ok(())
}

fn period(secs: f64, fallback: f64) -> Duration {
    match check_period("", secs) {
        Ok(()) => Duration::from_secs_f64(secs),
        Err(_) => Duration::from_secs_f64(fallback),
    }
}
