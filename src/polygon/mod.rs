//! Editable 2D polygons: normals, containment and convexity.
//!
//! Scan-conversion and seed fills live in [`fill`], convex hulls of point
//! sets in [`hull`].

pub mod fill;
pub mod hull;

use std::fmt;

use crate::error::{Error, Result};
use crate::geometry::Point2;
use crate::trace::{note, StepLog};

/// Cross products smaller than this count as collinear.
pub const COLLINEAR_EPSILON: f64 = 1e-6;

/// Ray-casting parity test for `p` against the closed ring `vertices`.
///
/// Casts a ray towards +x and counts edge crossings, treating each edge as
/// half-open in y so a ray through a vertex is counted once.
#[must_use]
pub fn point_in_polygon(p: Point2, vertices: &[Point2]) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (vi, vj) = (vertices[i], vertices[j]);
        if (vi.y > p.y) != (vj.y > p.y) {
            let x_cross = vi.x + (vj.x - vi.x) * (p.y - vi.y) / (vj.y - vi.y);
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Shoelace signed area; positive for counter-clockwise rings in a y-up frame.
#[must_use]
pub fn signed_area(vertices: &[Point2]) -> f64 {
    let n = vertices.len();
    (0..n)
        .map(|i| vertices[i].cross(vertices[(i + 1) % n]))
        .sum::<f64>()
        / 2.0
}

/// Outcome of [`Polygon::check_convexity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Convexity {
    /// Every non-degenerate turn has the same orientation.
    Convex,
    /// The turn at `vertex` reverses the orientation established earlier.
    Concave {
        /// Index of the reflex-side vertex.
        vertex: usize,
    },
}

impl Convexity {
    /// Whether the polygon is convex.
    #[must_use]
    pub const fn is_convex(&self) -> bool {
        matches!(self, Self::Convex)
    }

    /// Human-readable reason for the verdict.
    #[must_use]
    pub fn explanation(&self) -> String {
        match self {
            Self::Convex => "polygon is convex: every turn has the same orientation".to_string(),
            Self::Concave { vertex } => {
                format!("polygon is concave: the turn at vertex {vertex} changes orientation")
            }
        }
    }
}

impl fmt::Display for Convexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.explanation())
    }
}

/// A polygon under construction or closed.
///
/// Vertices are appended until [`close`](Self::close) is called. From then on
/// the polygon keeps one outward unit normal per edge (edge `i` runs from
/// vertex `i` to vertex `i + 1`), refreshed whenever a vertex moves.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon {
    vertices: Vec<Point2>,
    closed: bool,
    normals: Vec<Point2>,
}

impl Polygon {
    /// An empty, open polygon.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A closed polygon from a vertex ring.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] with fewer than three vertices.
    pub fn from_vertices(vertices: Vec<Point2>) -> Result<Self> {
        let mut polygon = Self {
            vertices,
            closed: false,
            normals: Vec::new(),
        };
        polygon.close()?;
        Ok(polygon)
    }

    /// Vertices in order.
    #[must_use]
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    /// Number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether there are no vertices yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Whether [`close`](Self::close) has succeeded.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Outward unit normals, one per edge. Empty until closed.
    #[must_use]
    pub fn normals(&self) -> &[Point2] {
        &self.normals
    }

    /// Append a vertex.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] once the polygon is closed.
    pub fn add_vertex(&mut self, p: Point2) -> Result<()> {
        if self.closed {
            return Err(Error::invalid("cannot add a vertex to a closed polygon"));
        }
        self.vertices.push(p);
        Ok(())
    }

    /// Move vertex `index` to `p`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] when `index` is out of range.
    pub fn set_vertex(&mut self, index: usize, p: Point2) -> Result<()> {
        let len = self.vertices.len();
        let slot = self
            .vertices
            .get_mut(index)
            .ok_or_else(|| Error::invalid(format!("vertex {index} out of range ({len} vertices)")))?;
        *slot = p;
        if self.closed {
            self.compute_normals();
        }
        Ok(())
    }

    /// Close the ring and compute normals.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] with fewer than three vertices; the polygon
    /// stays open.
    pub fn close(&mut self) -> Result<()> {
        if self.vertices.len() < 3 {
            return Err(Error::invalid(format!(
                "closing a polygon needs at least 3 vertices, got {}",
                self.vertices.len()
            )));
        }
        self.closed = true;
        self.compute_normals();
        Ok(())
    }

    fn compute_normals(&mut self) {
        let n = self.vertices.len();
        let ccw = signed_area(&self.vertices) > 0.0;
        self.normals = (0..n)
            .map(|i| {
                let d = self.vertices[(i + 1) % n] - self.vertices[i];
                let normal = if ccw {
                    Point2::new(d.y, -d.x)
                } else {
                    Point2::new(-d.y, d.x)
                };
                normal.normalized()
            })
            .collect();
    }

    /// Shoelace signed area.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area(&self.vertices)
    }

    /// Validate that the polygon can be filled or queried.
    pub(crate) fn ensure_closed(&self) -> Result<()> {
        if !self.closed || self.vertices.len() < 3 {
            return Err(Error::invalid(
                "polygon must be closed with at least 3 vertices",
            ));
        }
        Ok(())
    }

    /// Ray-casting containment.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] for an open polygon or fewer than three
    /// vertices.
    pub fn contains(&self, p: Point2) -> Result<bool> {
        self.ensure_closed()?;
        Ok(point_in_polygon(p, &self.vertices))
    }

    /// Check that consecutive edge cross products never change sign.
    ///
    /// Near-zero cross products (collinear edges) are skipped.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] with fewer than three vertices.
    pub fn check_convexity(&self, mut log: Option<&mut StepLog>) -> Result<Convexity> {
        let n = self.vertices.len();
        if n < 3 {
            return Err(Error::invalid(format!(
                "convexity needs at least 3 vertices, got {n}"
            )));
        }

        let mut orientation = None;
        for i in 0..n {
            let (a, b, c) = (
                self.vertices[i],
                self.vertices[(i + 1) % n],
                self.vertices[(i + 2) % n],
            );
            let cross = (b - a).cross(c - b);
            note(&mut log, || {
                format!(
                    "cross product at vertices {i},{},{} = {cross:.2}",
                    (i + 1) % n,
                    (i + 2) % n
                )
            });

            if cross.abs() < COLLINEAR_EPSILON {
                continue;
            }
            let positive = cross > 0.0;
            match orientation {
                None => orientation = Some(positive),
                Some(expected) if expected != positive => {
                    let verdict = Convexity::Concave { vertex: (i + 1) % n };
                    note(&mut log, || verdict.explanation());
                    return Ok(verdict);
                }
                Some(_) => {}
            }
        }

        note(&mut log, || Convexity::Convex.explanation());
        Ok(Convexity::Convex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square() -> Polygon {
        Polygon::from_vertices(vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ])
        .unwrap()
    }

    fn arrow() -> Polygon {
        Polygon::from_vertices(vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 5.0),
            Point2::new(0.0, 10.0),
            Point2::new(4.0, 5.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_point_in_square() {
        let sq = square();
        assert!(sq.contains(Point2::new(5.0, 5.0)).unwrap());
        assert!(!sq.contains(Point2::new(15.0, 5.0)).unwrap());
        assert!(!sq.contains(Point2::new(-1.0, 5.0)).unwrap());
        assert!(!sq.contains(Point2::new(5.0, -0.5)).unwrap());
    }

    #[test]
    fn test_point_in_concave() {
        let a = arrow();
        assert!(a.contains(Point2::new(6.0, 5.0)).unwrap());
        assert!(!a.contains(Point2::new(2.0, 5.0)).unwrap());
    }

    #[test]
    fn test_contains_requires_closed() {
        let mut open = Polygon::new();
        for p in [(0.0, 0.0), (4.0, 0.0), (0.0, 4.0)] {
            open.add_vertex(p.into()).unwrap();
        }
        assert!(open.contains(Point2::new(1.0, 1.0)).is_err());
        open.close().unwrap();
        assert!(open.contains(Point2::new(1.0, 1.0)).unwrap());
    }

    #[test]
    fn test_close_needs_three_vertices() {
        let mut poly = Polygon::new();
        poly.add_vertex(Point2::new(0.0, 0.0)).unwrap();
        poly.add_vertex(Point2::new(1.0, 0.0)).unwrap();
        assert!(poly.close().is_err());
        assert!(!poly.is_closed());
        assert!(poly.normals().is_empty());
    }

    #[test]
    fn test_add_after_close_fails() {
        let mut sq = square();
        assert!(sq.add_vertex(Point2::new(3.0, 3.0)).is_err());
        assert_eq!(sq.len(), 4);
    }

    #[test]
    fn test_normals_point_outward_both_windings() {
        let ccw = square();
        let mut cw_vertices = ccw.vertices().to_vec();
        cw_vertices.reverse();
        let cw = Polygon::from_vertices(cw_vertices).unwrap();

        for poly in [&ccw, &cw] {
            assert_eq!(poly.normals().len(), poly.len());
            let n = poly.len();
            for (i, normal) in poly.normals().iter().enumerate() {
                let mid = poly.vertices()[i].midpoint(poly.vertices()[(i + 1) % n]);
                let probe = mid + *normal * 0.5;
                assert!(!point_in_polygon(probe, poly.vertices()), "edge {i} normal points inward");
                assert_relative_eq!(normal.x.hypot(normal.y), 1.0, epsilon = 1e-12);
            }
        }
        // bottom edge of the counter-clockwise square faces down
        assert_eq!(ccw.normals()[0], Point2::new(0.0, -1.0));
    }

    #[test]
    fn test_set_vertex_refreshes_normals() {
        let mut sq = square();
        sq.set_vertex(1, Point2::new(10.0, 10.0)).unwrap();
        sq.set_vertex(1, Point2::new(10.0, -10.0)).unwrap();
        // edge 0 now runs down-right, so its outward side is down-left
        let normal = sq.normals()[0];
        assert_relative_eq!(normal.x, -1.0 / 2f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(normal.y, -1.0 / 2f64.sqrt(), epsilon = 1e-12);
        assert!(sq.set_vertex(9, Point2::ORIGIN).is_err());
    }

    #[test]
    fn test_zero_length_edge_has_zero_normal() {
        let poly = Polygon::from_vertices(vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 0.0),
            Point2::new(5.0, 0.0),
            Point2::new(0.0, 5.0),
        ])
        .unwrap();
        assert_eq!(poly.normals()[0], Point2::ORIGIN);
    }

    #[test]
    fn test_square_is_convex() {
        let mut log = StepLog::new();
        let verdict = square().check_convexity(Some(&mut log)).unwrap();
        assert_eq!(verdict, Convexity::Convex);
        assert!(verdict.is_convex());
        assert_eq!(log.len(), 5);
    }

    #[test]
    fn test_reflex_vertex_detected() {
        let verdict = arrow().check_convexity(None).unwrap();
        assert_eq!(verdict, Convexity::Concave { vertex: 3 });
        assert!(!verdict.explanation().is_empty());
        assert!(verdict.to_string().contains("vertex 3"));
    }

    #[test]
    fn test_collinear_vertices_are_neutral() {
        let poly = Polygon::from_vertices(vec![
            Point2::new(0.0, 0.0),
            Point2::new(5.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ])
        .unwrap();
        assert!(poly.check_convexity(None).unwrap().is_convex());
    }

    #[test]
    fn test_signed_area_orientation() {
        assert_relative_eq!(square().signed_area(), 100.0);
        let mut rev = square().vertices().to_vec();
        rev.reverse();
        assert_relative_eq!(signed_area(&rev), -100.0);
    }
}
