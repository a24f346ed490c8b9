//! Voronoi edges as the dual of a Delaunay triangulation.
//!
//! Every triangulation edge shared by two triangles yields the segment
//! between their circumcenters. A hull edge, used by one triangle only,
//! yields a ray from that triangle's circumcenter along the edge's outward
//! normal, cut off where it leaves the caller's bounding box.

use std::collections::HashMap;

use crate::delaunay::Triangle;
use crate::geometry::{BoundingBox, EdgeKey, Point2};
use crate::log::warn;

/// Tolerance for box-side hits and duplicate intersection points.
const BOX_EPSILON: f64 = 1e-6;

/// Where a Voronoi edge comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VoronoiEdgeKind {
    /// Joins the circumcenters of two adjacent triangles.
    Interior,
    /// Unbounded edge clipped to the bounding box.
    Boundary,
}

/// One segment of the Voronoi diagram.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VoronoiEdge {
    /// A circumcenter.
    pub start: Point2,
    /// The neighboring circumcenter, or the box exit point.
    pub end: Point2,
    /// Interior or boundary.
    pub kind: VoronoiEdgeKind,
}

/// All points where the infinite line through `p` with direction `d` meets
/// the sides of `bbox`, without near-duplicates (corner hits).
#[must_use]
pub fn line_box_intersections(p: Point2, d: Point2, bbox: BoundingBox) -> Vec<Point2> {
    let BoundingBox { min, max } = bbox;
    let mut hits = Vec::with_capacity(4);

    if d.x != 0.0 {
        for x in [min.x, max.x] {
            let hit = p + d * ((x - p.x) / d.x);
            if min.y - BOX_EPSILON <= hit.y && hit.y <= max.y + BOX_EPSILON {
                hits.push(hit);
            }
        }
    }
    if d.y != 0.0 {
        for y in [min.y, max.y] {
            let hit = p + d * ((y - p.y) / d.y);
            if min.x - BOX_EPSILON <= hit.x && hit.x <= max.x + BOX_EPSILON {
                hits.push(hit);
            }
        }
    }

    let mut unique: Vec<Point2> = Vec::with_capacity(hits.len());
    for hit in hits {
        if unique.iter().all(|u| u.distance(hit) >= BOX_EPSILON) {
            unique.push(hit);
        }
    }
    unique
}

/// Nearest forward (`t > 0`) hit of the ray `origin + t·direction` with the
/// sides of `bbox`, or `origin` itself when there is none.
#[must_use]
pub fn intersect_ray_box(origin: Point2, direction: Point2, bbox: BoundingBox) -> Point2 {
    let BoundingBox { min, max } = bbox;
    let mut nearest: Option<f64> = None;
    let mut consider = |t: f64| {
        if t > 0.0 && nearest.map_or(true, |best| t < best) {
            nearest = Some(t);
        }
    };

    if direction.x != 0.0 {
        for x in [min.x, max.x] {
            let t = (x - origin.x) / direction.x;
            let y = origin.y + t * direction.y;
            if min.y <= y && y <= max.y {
                consider(t);
            }
        }
    }
    if direction.y != 0.0 {
        for y in [min.y, max.y] {
            let t = (y - origin.y) / direction.y;
            let x = origin.x + t * direction.x;
            if min.x <= x && x <= max.x {
                consider(t);
            }
        }
    }

    nearest.map_or(origin, |t| origin + direction * t)
}

/// Unit normal of `edge` pointing away from `third`, the triangle's
/// remaining vertex.
fn outward_normal(edge: EdgeKey, third: Point2) -> Point2 {
    let (p, q) = edge.endpoints();
    let e = q - p;
    let n1 = Point2::new(e.y, -e.x).normalized();
    let n2 = Point2::new(-e.y, e.x).normalized();
    let away = p.midpoint(q) - third;
    if away.dot(n1) >= away.dot(n2) {
        n1
    } else {
        n2
    }
}

/// Box exit point for the boundary ray leaving `triangle` across `edge`.
fn boundary_end(triangle: &Triangle, edge: EdgeKey, bbox: BoundingBox) -> Option<Point2> {
    let third = triangle.opposite(edge)?;
    let normal = outward_normal(edge, third);
    let origin = triangle.circumcenter();

    let farthest = line_box_intersections(origin, normal, bbox)
        .into_iter()
        .max_by(|a, b| (*a - origin).dot(normal).total_cmp(&(*b - origin).dot(normal)));
    Some(farthest.unwrap_or_else(|| intersect_ray_box(origin, normal, bbox)))
}

/// Voronoi edges dual to `triangles`, clipped to `bbox`.
///
/// Edges are reported in the order their triangulation edge is first seen.
/// Degenerate triangles are skipped.
#[must_use]
pub fn voronoi_edges(triangles: &[Triangle], bbox: BoundingBox) -> Vec<VoronoiEdge> {
    let mut order: Vec<EdgeKey> = Vec::new();
    let mut owners: HashMap<EdgeKey, Vec<&Triangle>> = HashMap::new();
    for triangle in triangles.iter().filter(|t| !t.is_degenerate()) {
        for edge in triangle.edges() {
            let entry = owners.entry(edge).or_default();
            if entry.is_empty() {
                order.push(edge);
            }
            entry.push(triangle);
        }
    }

    let mut edges = Vec::with_capacity(order.len());
    for key in order {
        match owners.get(&key).map(Vec::as_slice) {
            Some([a, b]) => edges.push(VoronoiEdge {
                start: a.circumcenter(),
                end: b.circumcenter(),
                kind: VoronoiEdgeKind::Interior,
            }),
            Some([only]) => {
                if let Some(end) = boundary_end(only, key, bbox) {
                    edges.push(VoronoiEdge {
                        start: only.circumcenter(),
                        end,
                        kind: VoronoiEdgeKind::Boundary,
                    });
                }
            }
            Some(shared) => {
                warn!(owners = shared.len(), "edge shared by more than two triangles, skipped");
            }
            None => {}
        }
    }
    edges
}
