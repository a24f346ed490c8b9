//! Convex hulls of point sets.
//!
//! Both algorithms return the hull counter-clockwise (y-up), starting from
//! their own anchor point, without repeating the start and without points
//! that lie on a hull edge. Exact duplicate input points are ignored.

use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::geometry::{orient, Point2};
use crate::log::{debug, warn};
use crate::trace::{note, StepLog};

/// Sorted copy of `points` without exact duplicates; errors below three.
fn distinct(points: &[Point2]) -> Result<Vec<Point2>> {
    let mut unique = points.to_vec();
    unique.sort_by(Point2::lex_cmp);
    unique.dedup_by(|a, b| a.lex_cmp(b) == Ordering::Equal);
    if unique.len() < 3 {
        return Err(Error::invalid(format!(
            "convex hull needs at least 3 distinct points, got {}",
            unique.len()
        )));
    }
    Ok(unique)
}

/// Graham scan.
///
/// Anchors on the lowest point (leftmost among ties), sorts the rest by polar
/// angle around it with nearer points first on ties, then sweeps, popping
/// while the last two hull points and the candidate fail to turn left.
///
/// # Errors
///
/// [`Error::InvalidInput`] with fewer than three distinct points.
pub fn graham_scan(points: &[Point2], mut log: Option<&mut StepLog>) -> Result<Vec<Point2>> {
    let mut sorted = distinct(points)?;
    note(&mut log, || "graham scan started".to_string());

    let pivot_idx = sorted
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)))
        .map_or(0, |(i, _)| i);
    let pivot = sorted.swap_remove(pivot_idx);
    note(&mut log, || format!("pivot ({:.2}, {:.2})", pivot.x, pivot.y));

    // Every other point lies at an angle in [0, π) from the pivot, so the
    // orientation test is a total order on angle.
    sorted.sort_by(|a, b| {
        let turn = orient(pivot, *a, *b);
        if turn > 0.0 {
            Ordering::Less
        } else if turn < 0.0 {
            Ordering::Greater
        } else {
            pivot.distance_sq(*a).total_cmp(&pivot.distance_sq(*b))
        }
    });

    let mut hull = vec![pivot];
    for p in sorted {
        while hull.len() >= 2 {
            let (a, b) = (hull[hull.len() - 2], hull[hull.len() - 1]);
            let cross = orient(a, b, p);
            if cross <= 0.0 {
                note(&mut log, || {
                    format!("drop ({:.2}, {:.2}): cross = {cross:.2}", b.x, b.y)
                });
                hull.pop();
            } else {
                break;
            }
        }
        hull.push(p);
        note(&mut log, || format!("push ({:.2}, {:.2})", p.x, p.y));
    }

    debug!(input = points.len(), hull = hull.len(), "graham scan done");
    Ok(hull)
}

/// Jarvis march (gift wrapping).
///
/// Anchors on the leftmost point (lowest among ties) and repeatedly wraps to
/// the point that leaves every other point on its left, preferring the
/// farther point when several are collinear. O(n·h).
///
/// # Errors
///
/// [`Error::InvalidInput`] with fewer than three distinct points.
pub fn jarvis_march(points: &[Point2], mut log: Option<&mut StepLog>) -> Result<Vec<Point2>> {
    let unique = distinct(points)?;
    note(&mut log, || "jarvis march started".to_string());

    // `distinct` sorts lexicographically, so the first point is leftmost.
    let start = unique[0];
    let mut hull = Vec::new();
    let mut p = start;
    loop {
        hull.push(p);
        let mut q = if unique[0] == p { unique[1] } else { unique[0] };
        for &r in &unique {
            if r == p || r == q {
                continue;
            }
            let cross = orient(p, q, r);
            let farther = cross == 0.0 && p.distance_sq(r) > p.distance_sq(q);
            if cross < 0.0 || farther {
                q = r;
            }
        }
        note(&mut log, || format!("next hull point ({:.2}, {:.2})", q.x, q.y));

        p = q;
        if p == start {
            break;
        }
        if hull.len() > unique.len() {
            warn!(points = unique.len(), "jarvis march did not close, stopping");
            break;
        }
    }

    debug!(input = points.len(), hull = hull.len(), "jarvis march done");
    Ok(hull)
}
