//! Unit tests for the triangulation and the linear interpolator.
use super::*;

fn plane(x: f64, y: f64) -> f64 {
    2.0 * x - 0.5 * y + 3.0
}

/// Irregular scatter over [0, 10] x [0, 20] with its four corners.
fn scattered_plane() -> Vec<ScatterSample> {
    let coords = [
        (0.0, 0.0),
        (10.0, 0.0),
        (0.0, 20.0),
        (10.0, 20.0),
        (3.1, 4.7),
        (7.9, 2.2),
        (5.5, 11.3),
        (1.2, 15.8),
        (8.8, 17.4),
        (4.4, 8.8),
        (9.1, 9.9),
        (2.6, 19.0),
    ];
    coords
        .iter()
        .map(|&(x, y)| ScatterSample::new(x, y, plane(x, y)))
        .collect()
}

/// `rows x cols` integer grid, value = x * y.
fn grid(rows: usize, cols: usize) -> Vec<ScatterSample> {
    let mut samples = Vec::new();
    for i in 0..cols {
        for j in 0..rows {
            let (x, y) = (i as f64, j as f64);
            samples.push(ScatterSample::new(x, y, x * y));
        }
    }
    samples
}

fn covered_area(field: &LinearInterpolator) -> f64 {
    let tri = field.triangulation();
    tri.triangles()
        .iter()
        .map(|t| {
            let [a, b, c] = t.vertices;
            orient(tri.points()[a], tri.points()[b], tri.points()[c]) / 2.0
        })
        .sum()
}

#[test]
/// A linear field is reproduced exactly anywhere inside the hull.
fn test_linear_field_is_reproduced() {
    let field = LinearInterpolator::new(&scattered_plane(), -1.0).unwrap();
    for &(x, y) in &[(0.5, 0.5), (5.0, 10.0), (9.9, 19.9), (3.3, 17.2), (6.0, 1.0)] {
        let got = field.query(x, y);
        assert!(
            (got - plane(x, y)).abs() < 1e-9,
            "({x}, {y}) -> {got}, expected {}",
            plane(x, y)
        );
    }
}

#[test]
/// Vertices return their own sample value.
fn test_exact_at_samples() {
    let samples = scattered_plane();
    let field = LinearInterpolator::new(&samples, 0.0).unwrap();
    for s in &samples {
        assert!((field.query(s.x, s.y) - s.value).abs() < 1e-9);
    }
}

#[test]
/// Outside the convex hull the fill value is returned, never an extrapolation.
fn test_outside_hull_returns_fill_value() {
    let field = LinearInterpolator::new(&scattered_plane(), -1.0).unwrap();
    assert_eq!(field.query(-0.1, 5.0), -1.0);
    assert_eq!(field.query(5.0, 20.5), -1.0);
    assert_eq!(field.query(100.0, 100.0), -1.0);
    assert_eq!(field.query(f64::NAN, 1.0), -1.0);
    assert_eq!(field.fill_value(), -1.0);
}

#[test]
/// Points on the hull boundary are inside.
fn test_hull_boundary_is_inside() {
    let field = LinearInterpolator::new(&scattered_plane(), -1.0).unwrap();
    assert!((field.query(5.0, 0.0) - plane(5.0, 0.0)).abs() < 1e-9);
    assert!((field.query(0.0, 7.5) - plane(0.0, 7.5)).abs() < 1e-9);
    assert!((field.query(10.0, 20.0) - plane(10.0, 20.0)).abs() < 1e-9);
}

#[test]
/// Cocircular grid points (every cell) still yield a full triangulation.
fn test_grid_is_fully_covered() {
    let field = LinearInterpolator::new(&grid(5, 5), 0.0).unwrap();
    // 2n - h - 2 triangles, with all 16 boundary points on the hull.
    assert_eq!(field.vertex_count(), 25);
    assert_eq!(field.triangle_count(), 2 * 25 - 16 - 2);
    assert!((covered_area(&field) - 16.0).abs() < 1e-9);
}

#[test]
/// Coincident points are merged instead of breaking the triangulation.
fn test_duplicates_are_tolerated() {
    let mut samples = grid(3, 3);
    samples.push(ScatterSample::new(0.0, 0.0, 42.0));
    samples.push(ScatterSample::new(-0.0, 1.0, 42.0));
    let field = LinearInterpolator::new(&samples, 0.0).unwrap();
    assert_eq!(field.vertex_count(), 9);
    // First occurrence wins.
    assert_eq!(field.query(0.0, 0.0), 0.0);
}

#[test]
/// Rebuilding from the same samples yields the same triangles.
fn test_triangulation_is_deterministic() {
    let a = LinearInterpolator::new(&grid(4, 6), 0.0).unwrap();
    let b = LinearInterpolator::new(&grid(4, 6), 0.0).unwrap();
    assert_eq!(a.triangulation().triangles(), b.triangulation().triangles());
    assert_eq!(a.query(2.5, 1.5), b.query(2.5, 1.5));
}

#[test]
/// Degenerate inputs are construction errors.
fn test_invalid_inputs() {
    let two = [
        ScatterSample::new(0.0, 0.0, 0.0),
        ScatterSample::new(1.0, 1.0, 0.0),
        ScatterSample::new(1.0, 1.0, 5.0),
    ];
    assert_eq!(
        LinearInterpolator::new(&two, 0.0).unwrap_err(),
        InterpolationError::NotEnoughPoints { count: 2 }
    );

    let line: Vec<_> = (0..5)
        .map(|i| ScatterSample::new(i as f64, 2.0 * i as f64, 1.0))
        .collect();
    assert_eq!(
        LinearInterpolator::new(&line, 0.0).unwrap_err(),
        InterpolationError::Collinear
    );

    let nan = [
        ScatterSample::new(0.0, 0.0, 0.0),
        ScatterSample::new(1.0, 0.0, f64::NAN),
        ScatterSample::new(0.0, 1.0, 0.0),
    ];
    assert_eq!(
        LinearInterpolator::new(&nan, 0.0).unwrap_err(),
        InterpolationError::NonFiniteSample { index: 1 }
    );
}

#[test]
/// Every triangle is stored counter-clockwise with a positive area.
fn test_triangles_are_counter_clockwise() {
    let field = LinearInterpolator::new(&scattered_plane(), 0.0).unwrap();
    let tri = field.triangulation();
    for t in tri.triangles() {
        let [a, b, c] = t.vertices;
        assert!(orient(tri.points()[a], tri.points()[b], tri.points()[c]) > 0.0);
    }
}
