//! Polar performance model: target boat speed for a true wind speed and angle,
//! and the resulting sailing efficiency.
//!
//! The model is built for one tack only; port and starboard angles are folded
//! onto `[0, 180]` before querying. Outside the table's wind range the target is
//! `0.0` (no extrapolation), which the efficiency computation treats as calm.
use tracing::debug;

use crate::error::PolarError;
use crate::infra::interpolation::LinearInterpolator;
use crate::performance::table::{PolarTable, DEAD_RUN_FACTOR, SISTER_SHIP};

/// Targets at or below this speed (knots) are too ambiguous to divide by.
pub const CALM_THRESHOLD_KNOTS: f64 = 0.5;

/// Efficiency ceiling (%). Downstream displays scale engine load on 0–125.
pub const MAX_EFFICIENCY_PERCENT: f64 = 125.0;

/// Target speed returned outside the tabulated wind range.
const OUT_OF_TABLE_SPEED: f64 = 0.0;

/// Efficiency of the boat against its polar target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Efficiency {
    /// Speed through water as a percentage of target, in `[0, 125]`.
    pub percent: f64,
    /// Polar target speed (knots).
    pub target: f64,
}

/// Interpolated polar diagram.
#[derive(Debug, Clone)]
pub struct BoatPerformance {
    field: LinearInterpolator,
    calm_threshold: f64,
}

/// Builder exposing the model constants.
#[derive(Debug, Clone, Copy)]
pub struct BoatPerformanceBuilder<'a> {
    table: PolarTable<'a>,
    dead_run_factor: f64,
    calm_threshold: f64,
}

impl<'a> BoatPerformanceBuilder<'a> {
    /// Fraction of the best downwind speed used at 180° (default 0.95).
    pub fn dead_run_factor(mut self, factor: f64) -> Self {
        self.dead_run_factor = factor;
        self
    }

    /// Targets at or below this speed give 0 % efficiency (default 0.5 kt).
    pub fn calm_threshold(mut self, knots: f64) -> Self {
        self.calm_threshold = knots;
        self
    }

    /// Derive polar points and triangulate them.
    pub fn build(self) -> Result<BoatPerformance, PolarError> {
        if !(self.dead_run_factor.is_finite() && self.dead_run_factor >= 0.0) {
            return Err(PolarError::InvalidParameter {
                name: "dead_run_factor",
                value: self.dead_run_factor,
            });
        }
        if !(self.calm_threshold.is_finite() && self.calm_threshold >= 0.0) {
            return Err(PolarError::InvalidParameter {
                name: "calm_threshold",
                value: self.calm_threshold,
            });
        }

        let points = self.table.polar_points(self.dead_run_factor)?;
        let field = LinearInterpolator::new(&points, OUT_OF_TABLE_SPEED)?;
        debug!(
            vertices = field.vertex_count(),
            triangles = field.triangle_count(),
            "polar model triangulated"
        );

        Ok(BoatPerformance {
            field,
            calm_threshold: self.calm_threshold,
        })
    }
}

impl BoatPerformance {
    /// Start configuring a model for `table`.
    pub fn builder(table: PolarTable<'_>) -> BoatPerformanceBuilder<'_> {
        BoatPerformanceBuilder {
            table,
            dead_run_factor: DEAD_RUN_FACTOR,
            calm_threshold: CALM_THRESHOLD_KNOTS,
        }
    }

    /// Model of the bundled sister-ship polar with default constants.
    pub fn sister_ship() -> Result<Self, PolarError> {
        Self::builder(SISTER_SHIP).build()
    }

    /// Target boat speed (knots) for a true wind speed (knots) and a signed true
    /// wind angle (degrees). `None` when either input is NaN.
    pub fn target_speed(&self, tws: f64, twa: f64) -> Option<f64> {
        if tws.is_nan() || twa.is_nan() {
            return None;
        }
        Some(self.field.query(tws, fold_angle(twa)))
    }

    /// Speed through water against the polar target, capped to `[0, 125]` %.
    ///
    /// A target at or below the calm threshold gives `0.0` %. `None` when any
    /// input is NaN.
    pub fn efficiency(&self, tws: f64, twa: f64, stw: f64) -> Option<Efficiency> {
        if stw.is_nan() {
            return None;
        }
        let target = self.target_speed(tws, twa)?;

        if target <= self.calm_threshold {
            return Some(Efficiency {
                percent: 0.0,
                target,
            });
        }

        let percent = (stw / target * 100.0).clamp(0.0, MAX_EFFICIENCY_PERCENT);
        Some(Efficiency { percent, target })
    }

    /// Underlying interpolation field (`x` = TWS, `y` = folded TWA).
    pub fn interpolator(&self) -> &LinearInterpolator {
        &self.field
    }
}

/// Fold a signed angle onto `[0, 180]` using port/starboard symmetry.
pub fn fold_angle(twa: f64) -> f64 {
    let angle = twa.abs();
    if angle > 180.0 {
        360.0 - angle
    } else {
        angle
    }
}
