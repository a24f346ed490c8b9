//! Polygon scan conversion and seed fills.
//!
//! The two scanline variants share one span rule: on scanline `y` a span
//! between intersections `xa ≤ xb` covers every integer `x` with
//! `xa ≤ x ≤ xb` (within [`SPAN_EPSILON`]). Edges are half-open in y,
//! `y_lower ≤ y < y_upper`, so a scanline through a vertex counts it once
//! and horizontal edges never contribute.
//!
//! Seed fills test each pixel center with [`point_in_polygon`] and never
//! leave the caller's canvas.

use std::collections::HashSet;

use super::{point_in_polygon, Polygon};
use crate::error::{Error, Result};
use crate::geometry::{Canvas, Point2};
use crate::log::debug;
use crate::render::PixelSink;

/// Tolerance for span endpoints landing on integer x.
pub const SPAN_EPSILON: f64 = 1e-6;

/// Emit the integer pixels of each `(xa, xb)` pair on scanline `y`.
fn emit_spans(y: i64, crossings: &mut [f64], sink: &mut (impl PixelSink + ?Sized)) {
    crossings.sort_by(f64::total_cmp);
    for pair in crossings.chunks_exact(2) {
        let first = (pair[0] - SPAN_EPSILON).ceil() as i64;
        let last = (pair[1] + SPAN_EPSILON).floor() as i64;
        for x in first..=last {
            sink.plot(x as i32, y as i32, 1.0);
        }
    }
}

/// Integer scanlines covering the polygon's y extent.
fn scanline_range(vertices: &[Point2]) -> std::ops::RangeInclusive<i64> {
    let (min_y, max_y) = vertices
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v.y), hi.max(v.y))
        });
    min_y.ceil() as i64..=max_y.floor() as i64
}

/// Non-horizontal edges as `(lower, upper)` endpoint pairs.
fn edges(vertices: &[Point2]) -> impl Iterator<Item = (Point2, Point2)> + '_ {
    let n = vertices.len();
    (0..n).filter_map(move |i| {
        let (a, b) = (vertices[i], vertices[(i + 1) % n]);
        if a.y == b.y {
            None
        } else if a.y < b.y {
            Some((a, b))
        } else {
            Some((b, a))
        }
    })
}

/// Ordered-edge-list scan fill: each scanline intersects every edge anew.
///
/// # Errors
///
/// [`Error::InvalidInput`] for an open polygon or fewer than three vertices.
pub fn fill_scanline(polygon: &Polygon, sink: &mut (impl PixelSink + ?Sized)) -> Result<()> {
    polygon.ensure_closed()?;
    let vertices = polygon.vertices();

    let mut crossings = Vec::new();
    for y in scanline_range(vertices) {
        let yf = y as f64;
        crossings.clear();
        crossings.extend(
            edges(vertices)
                .filter(|(lo, hi)| lo.y <= yf && yf < hi.y)
                .map(|(lo, hi)| lo.x + (yf - lo.y) * (hi.x - lo.x) / (hi.y - lo.y)),
        );
        emit_spans(y, &mut crossings, sink);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy)]
struct ActiveEdge {
    x: f64,
    inv_slope: f64,
    y_upper: f64,
}

/// Active-edge-table scan fill.
///
/// Edges wait in buckets keyed by their first scanline, join the active set
/// there, leave it once the scanline reaches their upper end, and advance
/// their crossing by the inverse slope each line. Fills the same pixels as
/// [`fill_scanline`].
///
/// # Errors
///
/// [`Error::InvalidInput`] for an open polygon or fewer than three vertices.
pub fn fill_active_edge(polygon: &Polygon, sink: &mut (impl PixelSink + ?Sized)) -> Result<()> {
    polygon.ensure_closed()?;
    let vertices = polygon.vertices();
    let range = scanline_range(vertices);
    let (first, last) = (*range.start(), *range.end());
    if first > last {
        return Ok(());
    }

    let mut table: Vec<Vec<ActiveEdge>> = vec![Vec::new(); (last - first + 1) as usize];
    for (lo, hi) in edges(vertices) {
        let start = lo.y.ceil() as i64;
        if (start as f64) >= hi.y || start > last {
            continue;
        }
        let inv_slope = (hi.x - lo.x) / (hi.y - lo.y);
        table[(start - first) as usize].push(ActiveEdge {
            x: lo.x + (start as f64 - lo.y) * inv_slope,
            inv_slope,
            y_upper: hi.y,
        });
    }

    let mut active: Vec<ActiveEdge> = Vec::new();
    let mut crossings = Vec::new();
    for (bucket, y) in table.into_iter().zip(first..=last) {
        let yf = y as f64;
        active.extend(bucket);
        active.retain(|edge| yf < edge.y_upper);

        crossings.clear();
        crossings.extend(active.iter().map(|edge| edge.x));
        emit_spans(y, &mut crossings, sink);

        for edge in &mut active {
            edge.x += edge.inv_slope;
        }
    }
    Ok(())
}

/// Containment test for a pixel's integer coordinates.
fn inside(polygon: &Polygon, x: i32, y: i32) -> bool {
    point_in_polygon(Point2::new(f64::from(x), f64::from(y)), polygon.vertices())
}

fn check_seed(polygon: &Polygon, seed: (i32, i32)) -> Result<()> {
    polygon.ensure_closed()?;
    if inside(polygon, seed.0, seed.1) {
        Ok(())
    } else {
        debug!(seed_x = seed.0, seed_y = seed.1, "seed outside polygon, fill refused");
        Err(Error::invalid(format!(
            "seed ({}, {}) lies outside the polygon",
            seed.0, seed.1
        )))
    }
}

/// Stack-based 4-connected flood fill from `seed`.
///
/// Fills every pixel reachable from the seed through pixels that are inside
/// the polygon and on `canvas`.
///
/// # Errors
///
/// [`Error::InvalidInput`] when the polygon is open or the seed is outside
/// it.
pub fn fill_boundary(
    polygon: &Polygon,
    seed: (i32, i32),
    canvas: Canvas,
    sink: &mut (impl PixelSink + ?Sized),
) -> Result<()> {
    check_seed(polygon, seed)?;

    let mut filled = HashSet::new();
    let mut stack = vec![seed];
    while let Some((x, y)) = stack.pop() {
        if !canvas.contains(x, y) || filled.contains(&(x, y)) || !inside(polygon, x, y) {
            continue;
        }
        sink.plot(x, y, 1.0);
        filled.insert((x, y));
        stack.extend([(x + 1, y), (x - 1, y), (x, y + 1), (x, y - 1)]);
    }

    debug!(pixels = filled.len(), "boundary fill done");
    Ok(())
}

/// Span-based seed fill.
///
/// Pops a seed, extends it left and right to the span edges, fills the span,
/// then pushes the unfilled inside pixels directly above and below it.
/// Produces the same pixel set as [`fill_boundary`] with far fewer pushes.
///
/// # Errors
///
/// [`Error::InvalidInput`] when the polygon is open or the seed is outside
/// it.
pub fn fill_span(
    polygon: &Polygon,
    seed: (i32, i32),
    canvas: Canvas,
    sink: &mut (impl PixelSink + ?Sized),
) -> Result<()> {
    check_seed(polygon, seed)?;
    if !canvas.contains(seed.0, seed.1) {
        return Ok(());
    }

    let mut filled: HashSet<(i32, i32)> = HashSet::new();
    let open = |filled: &HashSet<(i32, i32)>, x: i32, y: i32| {
        canvas.contains(x, y) && !filled.contains(&(x, y)) && inside(polygon, x, y)
    };

    let mut stack = vec![seed];
    while let Some((x, y)) = stack.pop() {
        if !open(&filled, x, y) {
            continue;
        }

        let mut left = x;
        while open(&filled, left - 1, y) {
            left -= 1;
        }
        let mut right = x;
        while open(&filled, right + 1, y) {
            right += 1;
        }

        for xi in left..=right {
            sink.plot(xi, y, 1.0);
            filled.insert((xi, y));
        }
        for xi in left..=right {
            for ny in [y - 1, y + 1] {
                if open(&filled, xi, ny) {
                    stack.push((xi, ny));
                }
            }
        }
    }

    debug!(pixels = filled.len(), "span fill done");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Pixel;
    use std::collections::BTreeSet;

    fn pixel_set(pixels: &[Pixel]) -> BTreeSet<(i32, i32)> {
        pixels.iter().map(Pixel::position).collect()
    }

    fn polygon(points: &[(f64, f64)]) -> Polygon {
        Polygon::from_vertices(points.iter().copied().map(Point2::from).collect()).unwrap()
    }

    #[test]
    fn test_scanline_square() {
        let sq = polygon(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
        let mut pixels = Vec::<Pixel>::new();
        fill_scanline(&sq, &mut pixels).unwrap();

        // rows 0..=3 (top edge is excluded by the half-open rule), x 0..=4
        assert_eq!(pixels.len(), 4 * 5);
        let set = pixel_set(&pixels);
        assert!(set.contains(&(0, 0)));
        assert!(set.contains(&(4, 3)));
        assert!(!set.contains(&(0, 4)));
    }

    #[test]
    fn test_scanline_triangle_rows() {
        let tri = polygon(&[(0.0, 0.0), (8.0, 0.0), (0.0, 8.0)]);
        let mut pixels = Vec::<Pixel>::new();
        fill_scanline(&tri, &mut pixels).unwrap();
        let row = |y: i32| pixels.iter().filter(|p| p.y == y).count();
        assert_eq!(row(0), 9);
        assert_eq!(row(4), 5);
        assert_eq!(row(7), 2);
        assert_eq!(row(8), 0);
    }

    #[test]
    fn test_active_edge_matches_scanline() {
        let shapes = [
            polygon(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]),
            polygon(&[(3.2, 1.7), (17.9, 6.1), (12.4, 19.3), (1.1, 12.8)]),
            polygon(&[(0.0, 0.0), (10.0, 5.0), (0.0, 10.0), (4.0, 5.0)]),
            polygon(&[(5.5, 0.5), (9.5, 9.5), (0.5, 3.5), (10.5, 3.5), (1.5, 9.5)]),
        ];
        for shape in &shapes {
            let mut a = Vec::<Pixel>::new();
            let mut b = Vec::<Pixel>::new();
            fill_scanline(shape, &mut a).unwrap();
            fill_active_edge(shape, &mut b).unwrap();
            assert_eq!(pixel_set(&a), pixel_set(&b));
            assert_eq!(a.len(), b.len());
        }
    }

    #[test]
    fn test_fill_requires_closed_polygon() {
        let mut open = Polygon::new();
        for p in [(0.0, 0.0), (4.0, 0.0), (0.0, 4.0)] {
            open.add_vertex(p.into()).unwrap();
        }
        assert!(fill_scanline(&open, &mut Vec::new()).is_err());
        assert!(fill_active_edge(&open, &mut Vec::new()).is_err());
        assert!(fill_boundary(&open, (1, 1), Canvas::default(), &mut Vec::new()).is_err());
    }

    #[test]
    fn test_seed_outside_refused() {
        let sq = polygon(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        let mut pixels = Vec::<Pixel>::new();
        let err = fill_boundary(&sq, (20, 20), Canvas::default(), &mut pixels).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(fill_span(&sq, (-3, 5), Canvas::default(), &mut pixels).is_err());
        assert!(pixels.is_empty());
    }

    #[test]
    fn test_boundary_fill_square() {
        let sq = polygon(&[(0.5, 0.5), (10.5, 0.5), (10.5, 10.5), (0.5, 10.5)]);
        let mut pixels = Vec::<Pixel>::new();
        fill_boundary(&sq, (5, 5), Canvas::new(50, 50), &mut pixels).unwrap();
        assert_eq!(pixels.len(), 100);
        assert_eq!(pixel_set(&pixels).len(), 100);
    }

    #[test]
    fn test_span_matches_boundary() {
        let shapes = [
            polygon(&[(0.5, 0.5), (20.5, 0.5), (20.5, 20.5), (0.5, 20.5)]),
            polygon(&[(1.0, 1.0), (30.0, 15.0), (1.0, 29.0), (12.0, 15.0)]),
            polygon(&[(2.0, 2.0), (28.0, 2.0), (28.0, 28.0), (20.0, 28.0), (20.0, 10.0), (10.0, 10.0), (10.0, 28.0), (2.0, 28.0)]),
        ];
        for shape in &shapes {
            let seed = (5, 5);
            let mut a = Vec::<Pixel>::new();
            let mut b = Vec::<Pixel>::new();
            fill_boundary(shape, seed, Canvas::new(64, 64), &mut a).unwrap();
            fill_span(shape, seed, Canvas::new(64, 64), &mut b).unwrap();
            assert_eq!(pixel_set(&a), pixel_set(&b));
            assert_eq!(a.len(), b.len());
        }
    }

    #[test]
    fn test_seed_fill_clipped_to_canvas() {
        let big = polygon(&[(-50.0, -50.0), (500.0, -50.0), (500.0, 500.0), (-50.0, 500.0)]);
        let canvas = Canvas::new(16, 12);
        let mut a = Vec::<Pixel>::new();
        let mut b = Vec::<Pixel>::new();
        fill_boundary(&big, (3, 3), canvas, &mut a).unwrap();
        fill_span(&big, (3, 3), canvas, &mut b).unwrap();
        assert_eq!(a.len(), 16 * 12);
        assert_eq!(pixel_set(&a), pixel_set(&b));
    }
}
