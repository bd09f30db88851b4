//! Incremental Delaunay triangulation (Bowyer–Watson) of a planar point set.
//!
//! Points are inserted in the order they are given, inside a large enclosing
//! "super triangle" that is discarded at the end. For a fixed input the output
//! is fully deterministic: no hashing, no randomized insertion order.
//!
//! The in-circle predicate is evaluated in its determinant form relative to the
//! inserted point, which is exact for small integer coordinates. This matters for
//! reference tables laid out on a grid, where four points are often cocircular.
use crate::error::InterpolationError;

/// Size of the super triangle relative to the bounding box of the input.
const SUPER_TRIANGLE_SCALE: f64 = 20.0;

/// Planar point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Counter-clockwise triangle referencing three vertices by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    pub vertices: [usize; 3],
}

impl Triangle {
    fn edges(&self) -> [(usize, usize); 3] {
        let [a, b, c] = self.vertices;
        [(a, b), (b, c), (c, a)]
    }

    fn shares_edge_with(&self, other: &Triangle) -> bool {
        self.edges().iter().any(|&(a, b)| {
            other
                .edges()
                .iter()
                .any(|&(c, d)| (a == d && b == c) || (a == c && b == d))
        })
    }
}

/// Twice the signed area of `(a, b, c)`; positive when counter-clockwise.
#[inline]
pub fn orient(a: Point, b: Point, c: Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Positive when `d` lies strictly inside the circumcircle of the
/// counter-clockwise triangle `(a, b, c)`.
#[inline]
fn in_circle(a: Point, b: Point, c: Point, d: Point) -> f64 {
    let (adx, ady) = (a.x - d.x, a.y - d.y);
    let (bdx, bdy) = (b.x - d.x, b.y - d.y);
    let (cdx, cdy) = (c.x - d.x, c.y - d.y);

    (adx * adx + ady * ady) * (bdx * cdy - cdx * bdy)
        + (bdx * bdx + bdy * bdy) * (cdx * ady - adx * cdy)
        + (cdx * cdx + cdy * cdy) * (adx * bdy - bdx * ady)
}

/// Delaunay triangulation of a set of distinct points.
#[derive(Debug, Clone)]
pub struct Triangulation {
    points: Vec<Point>,
    triangles: Vec<Triangle>,
}

impl Triangulation {
    /// Triangulate `points`. They must be finite and distinct; at least three of
    /// them must not be collinear.
    pub fn new(points: Vec<Point>) -> Result<Self, InterpolationError> {
        if points.len() < 3 {
            return Err(InterpolationError::NotEnoughPoints {
                count: points.len(),
            });
        }
        if !has_area(&points) {
            return Err(InterpolationError::Collinear);
        }

        let n = points.len();
        let mut work = points.clone();
        work.extend_from_slice(&super_triangle(&points));

        // Super vertices are n, n+1, n+2, stored counter-clockwise.
        let mut triangles = vec![Triangle {
            vertices: [n, n + 1, n + 2],
        }];

        for index in 0..n {
            insert_point(&work, &mut triangles, index);
        }

        triangles.retain(|t| t.vertices.iter().all(|&v| v < n));
        triangles.retain(|t| {
            let [a, b, c] = t.vertices;
            orient(work[a], work[b], work[c]) > 0.0
        });

        Ok(Self { points, triangles })
    }

    /// Triangulated vertices, in insertion order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Counter-clockwise triangles covering the convex hull.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }
}

fn has_area(points: &[Point]) -> bool {
    let first = points[0];
    let Some(second) = points.iter().copied().find(|p| *p != first) else {
        return false;
    };
    points.iter().any(|p| orient(first, second, *p) != 0.0)
}

fn super_triangle(points: &[Point]) -> [Point; 3] {
    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    let delta = (max_x - min_x).max(max_y - min_y);
    let mid_x = (min_x + max_x) / 2.0;
    let mid_y = (min_y + max_y) / 2.0;
    let span = SUPER_TRIANGLE_SCALE * delta;

    [
        Point::new(mid_x - span, mid_y - delta),
        Point::new(mid_x + span, mid_y - delta),
        Point::new(mid_x, mid_y + span),
    ]
}

fn insert_point(work: &[Point], triangles: &mut Vec<Triangle>, index: usize) {
    let p = work[index];

    // Triangle enclosing the new point: the cavity grows from here.
    let seed = triangles.iter().position(|t| {
        let [a, b, c] = t.vertices;
        orient(work[a], work[b], p) >= 0.0
            && orient(work[b], work[c], p) >= 0.0
            && orient(work[c], work[a], p) >= 0.0
    });
    let Some(seed) = seed else {
        // Unreachable for points inside the super triangle.
        return;
    };

    let candidates: Vec<bool> = triangles
        .iter()
        .map(|t| {
            let [a, b, c] = t.vertices;
            in_circle(work[a], work[b], work[c], p) > 0.0
        })
        .collect();

    // Flood fill keeps the cavity connected even if rounding flags a stray
    // triangle elsewhere.
    let mut in_cavity = vec![false; triangles.len()];
    in_cavity[seed] = true;
    let mut frontier = vec![seed];
    while let Some(current) = frontier.pop() {
        for (i, tri) in triangles.iter().enumerate() {
            if !in_cavity[i] && candidates[i] && tri.shares_edge_with(&triangles[current]) {
                in_cavity[i] = true;
                frontier.push(i);
            }
        }
    }

    // Cavity boundary: edges owned by exactly one cavity triangle.
    let mut boundary: Vec<(usize, usize)> = Vec::new();
    for (i, tri) in triangles.iter().enumerate() {
        if !in_cavity[i] {
            continue;
        }
        for (a, b) in tri.edges() {
            let shared = triangles.iter().enumerate().any(|(j, other)| {
                j != i
                    && in_cavity[j]
                    && other.edges().iter().any(|&(c, d)| c == b && d == a)
            });
            if !shared {
                boundary.push((a, b));
            }
        }
    }

    let mut kept = Vec::with_capacity(triangles.len() + 2);
    for (i, tri) in triangles.iter().enumerate() {
        if !in_cavity[i] {
            kept.push(*tri);
        }
    }
    for (a, b) in boundary {
        kept.push(Triangle {
            vertices: [a, b, index],
        });
    }
    *triangles = kept;
}
