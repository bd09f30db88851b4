//! Data types shared by the feed adapter, the aggregator, and the transmit loop.
//!
//! Speeds are carried in knots and angles in degrees everywhere inside the crate;
//! unit conversion happens once, when a feed value is decoded.
use tokio::time::Instant;

/// Metres per second to knots.
pub const MS_TO_KNOTS: f64 = 1.94384;

/// Radians to degrees.
pub const RAD_TO_DEG: f64 = 180.0 / core::f64::consts::PI;

/// Convert a speed from m/s to knots.
#[inline]
pub fn ms_to_knots(ms: f64) -> f64 {
    ms * MS_TO_KNOTS
}

/// Convert an angle from radians to degrees.
#[inline]
pub fn rad_to_deg(radians: f64) -> f64 {
    radians * RAD_TO_DEG
}

/// One instant of vessel state, captured when a feed update is applied.
///
/// Samples are never modified once stored in the aggregation window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerformanceSample {
    /// Speed through water (knots).
    pub stw: f64,
    /// True wind angle (degrees, signed: negative to port).
    pub twa: f64,
    /// True wind speed (knots).
    pub tws: f64,
    /// Capture time.
    pub timestamp: Instant,
}

impl PerformanceSample {
    pub fn new(stw: f64, twa: f64, tws: f64, timestamp: Instant) -> Self {
        Self {
            stw,
            twa,
            tws,
            timestamp,
        }
    }
}

/// Arithmetic mean of the samples retained by a window snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowAverage {
    /// Mean speed through water (knots).
    pub stw: f64,
    /// Mean true wind angle (degrees).
    pub twa: f64,
    /// Mean true wind speed (knots).
    pub tws: f64,
    /// Number of samples that contributed.
    pub samples: usize,
}
