//! Bowyer–Watson Delaunay triangulation.
//!
//! Points are inserted one at a time into a triangulation seeded with a
//! large super triangle. Each insertion removes the triangles whose
//! circumcircle contains the new point and re-fans the resulting cavity
//! from it. Triangles touching a super-triangle vertex are dropped at the
//! end.
//!
//! # Example
//!
//! ```
//! use rasterlab::delaunay::triangulate;
//! use rasterlab::geometry::Point2;
//!
//! let square = [
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(1.0, 1.0),
//!     Point2::new(0.0, 1.0),
//! ];
//! assert_eq!(triangulate(&square).unwrap().len(), 2);
//! ```

use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};
use crate::geometry::{BoundingBox, EdgeKey, Point2};
use crate::log::debug;

/// A triangle with its circumcircle computed once at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Triangle {
    vertices: [Point2; 3],
    circumcenter: Point2,
    radius_sq: f64,
}

impl Triangle {
    /// Build a triangle and its circumcircle.
    ///
    /// Collinear vertices give a degenerate triangle: infinite radius, the
    /// centroid standing in for the center, and a circumcircle that contains
    /// no point.
    #[must_use]
    pub fn new(a: Point2, b: Point2, c: Point2) -> Self {
        let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
        if d == 0.0 {
            return Self {
                vertices: [a, b, c],
                circumcenter: Point2::new((a.x + b.x + c.x) / 3.0, (a.y + b.y + c.y) / 3.0),
                radius_sq: f64::INFINITY,
            };
        }

        let (sa, sb, sc) = (a.dot(a), b.dot(b), c.dot(c));
        let ux = (sa * (b.y - c.y) + sb * (c.y - a.y) + sc * (a.y - b.y)) / d;
        let uy = (sa * (c.x - b.x) + sb * (a.x - c.x) + sc * (b.x - a.x)) / d;
        let circumcenter = Point2::new(ux, uy);
        Self {
            vertices: [a, b, c],
            circumcenter,
            radius_sq: circumcenter.distance_sq(a),
        }
    }

    /// The three vertices in construction order.
    #[must_use]
    pub const fn vertices(&self) -> [Point2; 3] {
        self.vertices
    }

    /// Center of the circumcircle.
    #[must_use]
    pub const fn circumcenter(&self) -> Point2 {
        self.circumcenter
    }

    /// Squared circumradius; infinite when degenerate.
    #[must_use]
    pub const fn radius_sq(&self) -> f64 {
        self.radius_sq
    }

    /// Whether the vertices are collinear.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.radius_sq.is_infinite()
    }

    /// Whether `p` lies in or on the circumcircle. Always false when
    /// degenerate.
    #[must_use]
    pub fn circumcircle_contains(&self, p: Point2) -> bool {
        !self.is_degenerate() && self.circumcenter.distance_sq(p) <= self.radius_sq
    }

    /// Whether `p` is one of the vertices.
    #[must_use]
    pub fn has_vertex(&self, p: Point2) -> bool {
        self.vertices.contains(&p)
    }

    /// The three edges `(v0, v1)`, `(v1, v2)`, `(v2, v0)`.
    #[must_use]
    pub fn edges(&self) -> [EdgeKey; 3] {
        let [a, b, c] = self.vertices;
        [EdgeKey::new(a, b), EdgeKey::new(b, c), EdgeKey::new(c, a)]
    }

    /// The vertex not on `edge`, if `edge` belongs to this triangle.
    #[must_use]
    pub fn opposite(&self, edge: EdgeKey) -> Option<Point2> {
        let (p, q) = edge.endpoints();
        self.vertices.iter().copied().find(|&v| v != p && v != q)
    }
}

/// Triangle enclosing `bounds` with room to spare.
fn super_triangle(bounds: BoundingBox) -> Triangle {
    let delta = bounds.width().max(bounds.height());
    let mid = bounds.center();
    Triangle::new(
        Point2::new(mid.x - 20.0 * delta, mid.y - delta),
        Point2::new(mid.x, mid.y + 20.0 * delta),
        Point2::new(mid.x + 20.0 * delta, mid.y - delta),
    )
}

/// Edges used by exactly one of `triangles`, in first-seen order.
fn cavity_boundary(triangles: &[Triangle]) -> Vec<EdgeKey> {
    let mut order: Vec<EdgeKey> = Vec::new();
    let mut counts: HashMap<EdgeKey, usize> = HashMap::new();
    for edge in triangles.iter().flat_map(Triangle::edges) {
        let count = counts.entry(edge).or_insert(0);
        if *count == 0 {
            order.push(edge);
        }
        *count += 1;
    }
    order.retain(|edge| counts.get(edge) == Some(&1));
    order
}

/// Delaunay-triangulate `points` in insertion order.
///
/// Exact duplicate points are inserted once.
///
/// # Errors
///
/// [`Error::InvalidInput`] with fewer than three distinct points.
pub fn triangulate(points: &[Point2]) -> Result<Vec<Triangle>> {
    let mut seen = HashSet::new();
    let unique: Vec<Point2> = points
        .iter()
        .copied()
        .filter(|p| seen.insert(p.key_bits()))
        .collect();
    if unique.len() < 3 {
        return Err(Error::invalid(format!(
            "triangulation needs at least 3 distinct points, got {}",
            unique.len()
        )));
    }

    let bounds = BoundingBox::enclosing(&unique)
        .ok_or_else(|| Error::invalid("triangulation needs at least one point"))?;
    let outer = super_triangle(bounds);
    let mut triangles = vec![outer];

    for (i, &point) in unique.iter().enumerate() {
        let (bad, good): (Vec<Triangle>, Vec<Triangle>) = triangles
            .into_iter()
            .partition(|t| t.circumcircle_contains(point));

        let boundary = cavity_boundary(&bad);
        triangles = good;
        triangles.extend(boundary.iter().map(|edge| {
            let (p, q) = edge.endpoints();
            Triangle::new(p, q, point)
        }));

        debug!(
            step = i,
            x = point.x,
            y = point.y,
            removed = bad.len(),
            added = boundary.len(),
            total = triangles.len(),
            "inserted point"
        );
    }

    let [s0, s1, s2] = outer.vertices();
    triangles.retain(|t| !(t.has_vertex(s0) || t.has_vertex(s1) || t.has_vertex(s2)));

    debug!(points = unique.len(), triangles = triangles.len(), "triangulation done");
    Ok(triangles)
}
