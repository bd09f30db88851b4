//! Static polar reference data and its conversion into interpolation samples.
//!
//! A table has one column per reference true wind speed. Each column holds the
//! optimal upwind angle and VMG, boat speeds at eight fixed true wind angles, and
//! the optimal downwind angle and VMG. VMG figures are turned back into boat
//! speed with `speed = vmg / |cos(angle)|`.
use crate::error::PolarError;
use crate::infra::interpolation::ScatterSample;

/// Fixed true wind angles of the speed rows (degrees).
pub const FIXED_ANGLES: [f64; 8] = [52.0, 60.0, 75.0, 90.0, 110.0, 120.0, 135.0, 150.0];

/// Dead-run speed as a fraction of the best downwind speed.
pub const DEAD_RUN_FACTOR: f64 = 0.95;

/// Polar diagram in the usual "VPP summary" layout.
#[derive(Debug, Clone, Copy)]
pub struct PolarTable<'a> {
    /// Reference true wind speeds (knots), strictly increasing.
    pub wind_speeds: &'a [f64],
    /// Best upwind true wind angle per column (degrees).
    pub beat_angle: &'a [f64],
    /// Upwind VMG at `beat_angle` (knots).
    pub beat_vmg: &'a [f64],
    /// Boat speed per column at each of [`FIXED_ANGLES`] (knots).
    pub fixed: [&'a [f64]; 8],
    /// Downwind VMG at `gybe_angle` (knots).
    pub run_vmg: &'a [f64],
    /// Best downwind true wind angle per column (degrees).
    pub gybe_angle: &'a [f64],
}

/// Sister-ship polar, TWS 4 to 24 knots.
pub const SISTER_SHIP: PolarTable<'static> = PolarTable {
    wind_speeds: &[4.0, 6.0, 8.0, 10.0, 12.0, 14.0, 16.0, 20.0, 24.0],
    beat_angle: &[42.1, 42.1, 40.4, 39.8, 39.6, 39.2, 39.1, 39.7, 41.1],
    beat_vmg: &[2.59, 3.48, 4.10, 4.46, 4.64, 4.72, 4.75, 4.71, 4.58],
    fixed: [
        &[3.95, 5.21, 6.02, 6.44, 6.64, 6.73, 6.77, 6.77, 6.71],
        &[4.15, 5.44, 6.23, 6.62, 6.82, 6.92, 6.96, 6.99, 6.97],
        &[4.30, 5.60, 6.37, 6.76, 6.99, 7.14, 7.23, 7.33, 7.38],
        &[4.20, 5.51, 6.33, 6.80, 7.04, 7.24, 7.40, 7.64, 7.76],
        &[4.13, 5.56, 6.53, 7.01, 7.32, 7.56, 7.71, 7.96, 8.11],
        &[4.00, 5.43, 6.44, 6.97, 7.31, 7.62, 7.90, 8.27, 8.55],
        &[3.52, 4.90, 6.00, 6.71, 7.12, 7.45, 7.77, 8.43, 9.18],
        &[2.94, 4.15, 5.21, 6.10, 6.70, 7.06, 7.34, 7.90, 8.52],
    ],
    run_vmg: &[2.54, 3.60, 4.51, 5.28, 5.83, 6.25, 6.59, 7.14, 7.63],
    gybe_angle: &[144.2, 144.2, 148.0, 149.3, 153.1, 159.0, 163.0, 176.2, 175.9],
};

/// Boat speed sailed at `angle` to make good `vmg` upwind or downwind.
pub fn speed_from_vmg(vmg: f64, angle_deg: f64) -> f64 {
    vmg / angle_deg.to_radians().cos().abs()
}

impl PolarTable<'_> {
    /// Number of reference wind speed columns.
    pub fn columns(&self) -> usize {
        self.wind_speeds.len()
    }

    /// Check shape and ranges. Any failure is a defect in the static data.
    pub fn validate(&self) -> Result<(), PolarError> {
        let n = self.columns();
        if n == 0 {
            return Err(PolarError::EmptyTable);
        }

        let mut rows: Vec<(&'static str, &[f64])> = vec![
            ("beat_angle", self.beat_angle),
            ("beat_vmg", self.beat_vmg),
            ("run_vmg", self.run_vmg),
            ("gybe_angle", self.gybe_angle),
        ];
        rows.extend(self.fixed.iter().map(|row| ("fixed", *row)));
        for (row, values) in &rows {
            if values.len() != n {
                return Err(PolarError::RowLength {
                    row: *row,
                    found: values.len(),
                    expected: n,
                });
            }
        }

        for (column, pair) in self.wind_speeds.windows(2).enumerate() {
            if !(pair[0].is_finite() && pair[1].is_finite() && pair[0] < pair[1]) {
                return Err(PolarError::UnorderedWindSpeeds { column: column + 1 });
            }
        }
        if !self.wind_speeds[0].is_finite() || self.wind_speeds[0] < 0.0 {
            return Err(PolarError::UnorderedWindSpeeds { column: 0 });
        }

        for (row, angles) in [("beat_angle", self.beat_angle), ("gybe_angle", self.gybe_angle)] {
            if let Some(&angle) = angles.iter().find(|a| !(0.0..=180.0).contains(*a)) {
                return Err(PolarError::AngleOutOfRange { row, angle });
            }
        }

        for (row, values) in rows.iter().filter(|(row, _)| !row.ends_with("angle")) {
            if let Some(&speed) = values.iter().find(|v| !v.is_finite() || **v < 0.0) {
                return Err(PolarError::InvalidSpeed { row: *row, speed });
            }
        }

        Ok(())
    }

    /// Derive the `(tws, twa) -> speed` samples, with the two synthetic boundary
    /// points per column: head to wind (0° -> 0 kt) and dead run
    /// (180° -> downwind speed x `dead_run_factor`).
    pub fn polar_points(&self, dead_run_factor: f64) -> Result<Vec<ScatterSample>, PolarError> {
        self.validate()?;

        let mut samples = Vec::with_capacity(self.columns() * (FIXED_ANGLES.len() + 4));
        for (i, &tws) in self.wind_speeds.iter().enumerate() {
            let beat_speed = speed_from_vmg(self.beat_vmg[i], self.beat_angle[i]);
            let run_speed = speed_from_vmg(self.run_vmg[i], self.gybe_angle[i]);
            for (row, speed) in [("beat_vmg", beat_speed), ("run_vmg", run_speed)] {
                if !speed.is_finite() {
                    return Err(PolarError::InvalidSpeed { row, speed });
                }
            }

            let mut column = Vec::with_capacity(FIXED_ANGLES.len() + 4);
            column.push(ScatterSample::new(tws, self.beat_angle[i], beat_speed));
            column.push(ScatterSample::new(tws, 0.0, 0.0));
            for (angle, row) in FIXED_ANGLES.iter().zip(self.fixed.iter()) {
                column.push(ScatterSample::new(tws, *angle, row[i]));
            }
            column.push(ScatterSample::new(tws, self.gybe_angle[i], run_speed));
            column.push(ScatterSample::new(tws, 180.0, run_speed * dead_run_factor));

            let mut angles: Vec<f64> = column.iter().map(|s| s.y).collect();
            angles.sort_by(f64::total_cmp);
            if let Some(pair) = angles.windows(2).find(|pair| pair[0] == pair[1]) {
                return Err(PolarError::DuplicateAngle {
                    tws,
                    angle: pair[0],
                });
            }

            samples.extend(column);
        }

        Ok(samples)
    }
}
