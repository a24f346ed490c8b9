//! Line scan conversion.
//!
//! Three classic algorithms behind one entry point:
//!
//! - **DDA**: floating-point increments, rounded per sample
//! - **Bresenham**: integer error term
//! - **Wu**: two antialiased pixels per major-axis step
//!
//! # References
//!
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."
//! - Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.

use crate::geometry::{Pixel, Point2};
use crate::render::PixelSink;
use crate::trace::{begin, DebugRow, Trace};

/// Line rasterization algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineAlgorithm {
    /// Digital differential analyzer.
    Dda,
    /// Bresenham's integer algorithm.
    #[default]
    Bresenham,
    /// Xiaolin Wu's antialiased algorithm.
    Wu,
}

impl LineAlgorithm {
    /// All algorithms, in presentation order.
    pub const ALL: [Self; 3] = [Self::Dda, Self::Bresenham, Self::Wu];

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dda => "DDA",
            Self::Bresenham => "Bresenham",
            Self::Wu => "Wu",
        }
    }

    /// Rasterize a segment and return the emitted pixels.
    #[must_use]
    pub fn pixels(self, from: Point2, to: Point2) -> Vec<Pixel> {
        let mut pixels = Vec::new();
        rasterize_line(from, to, self, &mut pixels, None);
        pixels
    }
}

/// Rasterize the segment `from → to` with `algorithm`.
///
/// DDA produces [`DebugRow::Step`] rows; Bresenham and Wu produce
/// [`DebugRow::Error`] rows.
pub fn rasterize_line(
    from: Point2,
    to: Point2,
    algorithm: LineAlgorithm,
    sink: &mut (impl PixelSink + ?Sized),
    trace: Option<&mut Trace>,
) {
    match algorithm {
        LineAlgorithm::Dda => dda(from, to, sink, trace),
        LineAlgorithm::Bresenham => bresenham(from, to, sink, trace),
        LineAlgorithm::Wu => wu(from, to, sink, trace),
    }
}

/// DDA line: `round(max(|dx|, |dy|))` steps, coordinates accumulated in
/// floating point and rounded only for display.
pub fn dda(
    from: Point2,
    to: Point2,
    sink: &mut (impl PixelSink + ?Sized),
    trace: Option<&mut Trace>,
) {
    let mut trace = begin(trace);
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let steps = dx.abs().max(dy.abs()).round() as i64;

    if steps == 0 {
        let displayed = from.round();
        if let Some(trace) = trace.as_deref_mut() {
            trace.push(DebugRow::Step {
                iteration: 0,
                x: from.x,
                y: from.y,
                displayed,
            });
        }
        sink.plot(displayed.0, displayed.1, 1.0);
        return;
    }

    let x_inc = dx / steps as f64;
    let y_inc = dy / steps as f64;
    let (mut x, mut y) = (from.x, from.y);

    for iteration in 0..=steps as usize {
        let displayed = (x.round() as i32, y.round() as i32);
        if let Some(trace) = trace.as_deref_mut() {
            trace.push(DebugRow::Step {
                iteration,
                x,
                y,
                displayed,
            });
        }
        sink.plot(displayed.0, displayed.1, 1.0);
        x += x_inc;
        y += y_inc;
    }
}

/// Bresenham line between the rounded endpoints.
///
/// The walk always starts at the lexicographically smaller endpoint, so a
/// segment and its reverse emit the same pixels in the same order.
pub fn bresenham(
    from: Point2,
    to: Point2,
    sink: &mut (impl PixelSink + ?Sized),
    trace: Option<&mut Trace>,
) {
    let mut trace = begin(trace);
    let a = (from.x.round() as i64, from.y.round() as i64);
    let b = (to.x.round() as i64, to.y.round() as i64);
    let ((x0, y0), (x1, y1)) = if a <= b { (a, b) } else { (b, a) };

    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx - dy;

    let (mut x, mut y) = (x0, y0);
    let mut iteration = 0;

    loop {
        let before = err;
        let (mut next_x, mut next_y) = (x, y);
        let done = x == x1 && y == y1;

        if !done {
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                next_x += sx;
            }
            if e2 < dx {
                err += dx;
                next_y += sy;
            }
        }

        let displayed = (x as i32, y as i32);
        if let Some(trace) = trace.as_deref_mut() {
            trace.push(DebugRow::Error {
                iteration,
                x: x as f64,
                y: y as f64,
                error: before as f64,
                corrected: err as f64,
                displayed,
            });
        }
        sink.plot(displayed.0, displayed.1, 1.0);

        if done {
            break;
        }
        x = next_x;
        y = next_y;
        iteration += 1;
    }
}

/// Wu antialiased line.
///
/// Walks the integer positions of the major axis from `round(x0)` up to but
/// not including `round(x1)` and emits the two pixels straddling the ideal line,
/// with intensities `rfpart(y)` and `fpart(y)` that sum to one. Endpoints get
/// no special coverage treatment.
pub fn wu(
    from: Point2,
    to: Point2,
    sink: &mut (impl PixelSink + ?Sized),
    trace: Option<&mut Trace>,
) {
    let mut trace = begin(trace);
    let (mut x0, mut y0, mut x1, mut y1) = (from.x, from.y, to.x, to.y);

    let steep = (y1 - y0).abs() > (x1 - x0).abs();
    if steep {
        std::mem::swap(&mut x0, &mut y0);
        std::mem::swap(&mut x1, &mut y1);
    }
    if x0 > x1 {
        std::mem::swap(&mut x0, &mut x1);
        std::mem::swap(&mut y0, &mut y1);
    }

    let dx = x1 - x0;
    let dy = y1 - y0;
    let gradient = if dx == 0.0 { 0.0 } else { dy / dx };

    let x_start = round_half_up(x0);
    let x_end = round_half_up(x1);
    let mut intery = y0 + gradient * (x_start as f64 - x0);

    for (iteration, x) in (x_start..x_end).enumerate() {
        let y = intery.floor() as i64;
        let upper = rfpart(intery);
        let lower = fpart(intery);

        let (first, second) = if steep {
            ((y as i32, x as i32), (y as i32 + 1, x as i32))
        } else {
            ((x as i32, y as i32), (x as i32, y as i32 + 1))
        };

        if let Some(trace) = trace.as_deref_mut() {
            trace.push(DebugRow::Error {
                iteration,
                x: f64::from(first.0),
                y: f64::from(first.1),
                error: upper,
                corrected: lower,
                displayed: first,
            });
        }

        sink.plot(first.0, first.1, upper as f32);
        sink.plot(second.0, second.1, lower as f32);
        intery += gradient;
    }
}

/// `floor(x + 0.5)`: halves always round up, independent of sign.
#[inline]
fn round_half_up(x: f64) -> i64 {
    (x + 0.5).floor() as i64
}

/// Fractional part of a float.
#[inline]
fn fpart(x: f64) -> f64 {
    x - x.floor()
}

/// Reverse fractional part.
#[inline]
fn rfpart(x: f64) -> f64 {
    1.0 - fpart(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::RowShape;
    use std::collections::HashSet;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn positions(pixels: &[Pixel]) -> Vec<(i32, i32)> {
        pixels.iter().map(Pixel::position).collect()
    }

    #[test]
    fn test_dda_horizontal() {
        let pixels = LineAlgorithm::Dda.pixels(p(0.0, 0.0), p(4.0, 0.0));
        assert_eq!(positions(&pixels), vec![(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]);
    }

    #[test]
    fn test_dda_single_point() {
        let mut trace = Trace::new();
        let mut pixels = Vec::<Pixel>::new();
        dda(p(3.0, 7.0), p(3.0, 7.0), &mut pixels, Some(&mut trace));
        assert_eq!(positions(&pixels), vec![(3, 7)]);
        assert_eq!(trace.len(), 1);
    }

    #[test]
    fn test_dda_trace_rows() {
        let mut trace = Trace::new();
        let mut pixels = Vec::<Pixel>::new();
        dda(p(0.0, 0.0), p(5.0, 2.0), &mut pixels, Some(&mut trace));

        assert_eq!(trace.shape(), Some(RowShape::Step));
        assert_eq!(trace.len(), 6);
        match trace.rows()[1] {
            DebugRow::Step { iteration, x, y, displayed } => {
                assert_eq!(iteration, 1);
                assert!((x - 1.0).abs() < 1e-12);
                assert!((y - 0.4).abs() < 1e-12);
                assert_eq!(displayed, (1, 0));
            }
            other => panic!("unexpected row {other:?}"),
        }
    }

    #[test]
    fn test_bresenham_known_octant() {
        let pixels = LineAlgorithm::Bresenham.pixels(p(0.0, 0.0), p(6.0, 3.0));
        assert_eq!(
            positions(&pixels),
            vec![(0, 0), (1, 0), (2, 1), (3, 1), (4, 2), (5, 2), (6, 3)]
        );
    }

    #[test]
    fn test_bresenham_reverse_same_pixels() {
        let forward = LineAlgorithm::Bresenham.pixels(p(0.0, 0.0), p(2.0, 1.0));
        let backward = LineAlgorithm::Bresenham.pixels(p(2.0, 1.0), p(0.0, 0.0));
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_bresenham_trace_errors() {
        let mut trace = Trace::new();
        let mut pixels = Vec::<Pixel>::new();
        bresenham(p(0.0, 0.0), p(4.0, 1.0), &mut pixels, Some(&mut trace));

        assert_eq!(trace.shape(), Some(RowShape::Error));
        assert_eq!(trace.len(), pixels.len());
        match trace.rows()[0] {
            DebugRow::Error { error, corrected, .. } => {
                // err = dx - dy = 3; e2 = 6 > -1 steps x, 6 < 4 does not step y
                assert_eq!(error, 3.0);
                assert_eq!(corrected, 2.0);
            }
            other => panic!("unexpected row {other:?}"),
        }
        match trace.rows().last() {
            Some(DebugRow::Error { error, corrected, displayed, .. }) => {
                assert_eq!(error, corrected);
                assert_eq!(*displayed, (4, 1));
            }
            other => panic!("unexpected row {other:?}"),
        }
    }

    #[test]
    fn test_bresenham_steep_negative() {
        let pixels = LineAlgorithm::Bresenham.pixels(p(2.0, 10.0), p(0.0, 0.0));
        assert_eq!(pixels.len(), 11);
        let ys: HashSet<i32> = pixels.iter().map(|px| px.y).collect();
        assert_eq!(ys.len(), 11);
    }

    #[test]
    fn test_wu_horizontal_intensities() {
        let pixels = LineAlgorithm::Wu.pixels(p(0.0, 2.0), p(3.0, 2.0));
        assert_eq!(pixels.len(), 6);
        for pair in pixels.chunks(2) {
            assert_eq!(pair[0].y, 2);
            assert_eq!(pair[0].intensity, 1.0);
            assert_eq!(pair[1].y, 3);
            assert_eq!(pair[1].intensity, 0.0);
        }
    }

    #[test]
    fn test_wu_steep_swaps_back() {
        let pixels = LineAlgorithm::Wu.pixels(p(1.0, 0.0), p(1.0, 4.0));
        assert_eq!(pixels.len(), 8);
        for pair in pixels.chunks(2) {
            // vertical line: pairs sit side by side on the same row
            assert_eq!(pair[0].y, pair[1].y);
            assert_eq!(pair[0].x, 1);
            assert_eq!(pair[1].x, 2);
        }
    }

    #[test]
    fn test_wu_stops_before_end_column() {
        let pixels = LineAlgorithm::Wu.pixels(p(0.0, 0.0), p(4.0, 0.0));
        let columns: Vec<i32> = pixels.iter().step_by(2).map(|px| px.x).collect();
        assert_eq!(columns, vec![0, 1, 2, 3]);

        // reversed input is swapped, so the same columns are walked
        let reversed = LineAlgorithm::Wu.pixels(p(4.0, 0.0), p(0.0, 0.0));
        assert_eq!(reversed, pixels);

        assert!(LineAlgorithm::Wu.pixels(p(2.0, 2.0), p(2.0, 2.0)).is_empty());
    }

    #[test]
    fn test_wu_trace_matches_intensities() {
        let mut trace = Trace::new();
        let mut pixels = Vec::<Pixel>::new();
        wu(p(0.0, 0.0), p(10.0, 3.0), &mut pixels, Some(&mut trace));

        assert_eq!(trace.len() * 2, pixels.len());
        for (row, pair) in trace.rows().iter().zip(pixels.chunks(2)) {
            match row {
                DebugRow::Error { error, corrected, displayed, .. } => {
                    assert_eq!(*displayed, pair[0].position());
                    assert!((*error as f32 - pair[0].intensity).abs() < 1e-6);
                    assert!((*corrected as f32 - pair[1].intensity).abs() < 1e-6);
                }
                other => panic!("unexpected row {other:?}"),
            }
        }
    }

    #[test]
    fn test_trace_does_not_change_output() {
        for algorithm in LineAlgorithm::ALL {
            let mut traced = Vec::<Pixel>::new();
            let mut trace = Trace::new();
            rasterize_line(p(1.5, 2.0), p(17.0, 9.5), algorithm, &mut traced, Some(&mut trace));
            assert_eq!(traced, algorithm.pixels(p(1.5, 2.0), p(17.0, 9.5)), "{}", algorithm.name());
            assert!(!trace.is_empty());
        }
    }
}
