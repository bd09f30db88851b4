//! Piecewise-linear interpolation over scattered 2-D samples.
//!
//! The `(x, y)` plane is triangulated once at construction; a query returns the
//! barycentric blend of the three vertex values of the enclosing triangle, or a
//! fill value when the point lies outside the convex hull. There is no
//! extrapolation.
//!
//! ```rust
//! use korri_efficiency::infra::interpolation::{LinearInterpolator, ScatterSample};
//!
//! let samples = [
//!     ScatterSample::new(0.0, 0.0, 0.0),
//!     ScatterSample::new(1.0, 0.0, 1.0),
//!     ScatterSample::new(0.0, 1.0, 1.0),
//!     ScatterSample::new(1.0, 1.0, 2.0),
//! ];
//! let field = LinearInterpolator::new(&samples, 0.0).unwrap();
//! assert!((field.query(0.5, 0.5) - 1.0).abs() < 1e-12);
//! assert_eq!(field.query(2.0, 2.0), 0.0);
//! ```
pub mod triangulation;

use std::collections::HashSet;

use tracing::debug;

use crate::error::InterpolationError;
use triangulation::{orient, Point, Triangulation};

/// Barycentric tolerance: points this close to an edge count as inside.
const EDGE_TOLERANCE: f64 = 1e-9;

/// One scattered sample: a value known at `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterSample {
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

impl ScatterSample {
    pub const fn new(x: f64, y: f64, value: f64) -> Self {
        Self { x, y, value }
    }
}

/// Linear scalar field built from scattered samples.
#[derive(Debug, Clone)]
pub struct LinearInterpolator {
    triangulation: Triangulation,
    values: Vec<f64>,
    fill_value: f64,
}

impl LinearInterpolator {
    /// Triangulate `samples` and keep `fill_value` for out-of-hull queries.
    ///
    /// Coincident points are merged, the first occurrence wins.
    pub fn new(samples: &[ScatterSample], fill_value: f64) -> Result<Self, InterpolationError> {
        let mut seen = HashSet::with_capacity(samples.len());
        let mut points = Vec::with_capacity(samples.len());
        let mut values = Vec::with_capacity(samples.len());

        for (index, sample) in samples.iter().enumerate() {
            if !(sample.x.is_finite() && sample.y.is_finite() && sample.value.is_finite()) {
                return Err(InterpolationError::NonFiniteSample { index });
            }
            // `+ 0.0` folds -0.0 onto 0.0 before hashing the bit pattern.
            let key = ((sample.x + 0.0).to_bits(), (sample.y + 0.0).to_bits());
            if !seen.insert(key) {
                debug!(x = sample.x, y = sample.y, "dropping coincident sample");
                continue;
            }
            points.push(Point::new(sample.x, sample.y));
            values.push(sample.value);
        }

        let triangulation = Triangulation::new(points)?;
        Ok(Self {
            triangulation,
            values,
            fill_value,
        })
    }

    /// Interpolated value at `(x, y)`, or the fill value outside the hull.
    pub fn query(&self, x: f64, y: f64) -> f64 {
        if !(x.is_finite() && y.is_finite()) {
            return self.fill_value;
        }
        let p = Point::new(x, y);
        let points = self.triangulation.points();

        for tri in self.triangulation.triangles() {
            let [ia, ib, ic] = tri.vertices;
            let (a, b, c) = (points[ia], points[ib], points[ic]);

            let area = orient(a, b, c);
            let wa = orient(p, b, c) / area;
            let wb = orient(a, p, c) / area;
            let wc = 1.0 - wa - wb;

            if wa >= -EDGE_TOLERANCE && wb >= -EDGE_TOLERANCE && wc >= -EDGE_TOLERANCE {
                return wa * self.values[ia] + wb * self.values[ib] + wc * self.values[ic];
            }
        }

        self.fill_value
    }

    /// Value returned outside the triangulated region.
    pub fn fill_value(&self) -> f64 {
        self.fill_value
    }

    /// Number of distinct vertices kept after de-duplication.
    pub fn vertex_count(&self) -> usize {
        self.triangulation.points().len()
    }

    /// Number of triangles covering the hull.
    pub fn triangle_count(&self) -> usize {
        self.triangulation.triangles().len()
    }

    /// Underlying triangulation.
    pub fn triangulation(&self) -> &Triangulation {
        &self.triangulation
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
