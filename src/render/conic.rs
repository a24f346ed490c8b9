//! Second-order curve rasterization.
//!
//! Circle and ellipse use incremental midpoint decision variables; parabola
//! and hyperbola are sampled explicitly/parametrically and mirrored.
//!
//! Every routine can fill a [`Trace`] with [`DebugRow::Decision`] rows. For
//! the circle the decision column is the genuine midpoint variable; for the
//! other curves the delta columns are diagnostic approximations only.

use crate::error::{Error, Result};
use crate::geometry::{Canvas, Pixel, Point2};
use crate::render::PixelSink;
use crate::trace::{begin, DebugRow, Trace};

/// Midpoint circle centered on `center` with integer radius.
///
/// Each iteration plots all 8 octant reflections of `(x, y)`, so points on
/// the axes and diagonals are emitted more than once.
pub fn circle(
    center: (i32, i32),
    radius: u32,
    sink: &mut (impl PixelSink + ?Sized),
    trace: Option<&mut Trace>,
) {
    let mut trace = begin(trace);
    let (cx, cy) = (i64::from(center.0), i64::from(center.1));
    let mut x: i64 = 0;
    let mut y = i64::from(radius);
    let mut d = 3 - 2 * y;
    let mut step = 0;

    while x <= y {
        for (px, py) in [
            (cx + x, cy + y),
            (cx - x, cy + y),
            (cx + x, cy - y),
            (cx - x, cy - y),
            (cx + y, cy + x),
            (cx - y, cy + x),
            (cx + y, cy - x),
            (cx - y, cy - x),
        ] {
            sink.plot(px as i32, py as i32, 1.0);
        }

        let current = d;
        let (row_x, row_y) = (x, y);
        if d < 0 {
            d += 4 * x + 6;
        } else {
            d += 4 * (x - y) + 10;
            y -= 1;
        }
        x += 1;

        if let Some(trace) = trace.as_deref_mut() {
            let pixel = ((cx + row_x) as i32, (cy + row_y) as i32);
            trace.push(DebugRow::Decision {
                step,
                decision: current as f64,
                delta: (d - current) as f64,
                delta_star: 0.0,
                pixel,
                x: row_x as f64,
                y: row_y as f64,
                next_decision: d as f64,
                plot: pixel,
            });
        }
        step += 1;
    }
}

/// Two-region midpoint ellipse with semi-axes `rx` (horizontal) and `ry`
/// (vertical), plotting 4 symmetric points per step.
pub fn ellipse(
    center: (i32, i32),
    rx: u32,
    ry: u32,
    sink: &mut (impl PixelSink + ?Sized),
    trace: Option<&mut Trace>,
) {
    let mut trace = begin(trace);
    let (cx, cy) = (i64::from(center.0), i64::from(center.1));
    let rx2 = f64::from(rx) * f64::from(rx);
    let ry2 = f64::from(ry) * f64::from(ry);
    let mut x: i64 = 0;
    let mut y = i64::from(ry);
    let mut step = 0;

    let mut emit = |x: i64, y: i64, decision: f64, next: f64, step: usize, trace: &mut Option<&mut Trace>| {
        for (px, py) in [(cx + x, cy + y), (cx - x, cy + y), (cx + x, cy - y), (cx - x, cy - y)] {
            sink.plot(px as i32, py as i32, 1.0);
        }
        if let Some(trace) = trace.as_deref_mut() {
            let pixel = ((cx + x) as i32, (cy + y) as i32);
            trace.push(DebugRow::Decision {
                step,
                decision,
                delta: next - decision,
                delta_star: 0.0,
                pixel,
                x: x as f64,
                y: y as f64,
                next_decision: next,
                plot: pixel,
            });
        }
    };

    // Region 1: slope magnitude below one.
    let mut p1 = ry2 - rx2 * f64::from(ry) + 0.25 * rx2;
    while 2.0 * ry2 * (x as f64) < 2.0 * rx2 * (y as f64) {
        let (px, py) = (x, y);
        let next = if p1 < 0.0 {
            p1 + 2.0 * ry2 * (x + 1) as f64 + ry2
        } else {
            let next = p1 + 2.0 * ry2 * (x + 1) as f64 - 2.0 * rx2 * (y - 1) as f64 + ry2;
            y -= 1;
            next
        };
        x += 1;
        emit(px, py, p1, next, step, &mut trace);
        p1 = next;
        step += 1;
    }

    // Region 2: walk y down to the major axis.
    let mut p2 = ry2 * (x as f64 + 0.5).powi(2) + rx2 * ((y - 1) as f64).powi(2) - rx2 * ry2;
    while y >= 0 {
        let (px, py) = (x, y);
        let next = if p2 > 0.0 {
            p2 - 2.0 * rx2 * (y - 1) as f64 + rx2
        } else {
            let next = p2 + 2.0 * ry2 * (x + 1) as f64 - 2.0 * rx2 * (y - 1) as f64 + rx2;
            x += 1;
            next
        };
        y -= 1;
        emit(px, py, p2, next, step, &mut trace);
        p2 = next;
        step += 1;
    }
}

/// Vertical parabola `y = a (x − xc)² + yc` with its vertex at `vertex`,
/// passing through `through`.
///
/// Samples every integer column of the canvas, skips rows outside
/// `[0, height]`, and plots each point together with its mirror about the
/// axis `x = xc`.
///
/// # Errors
///
/// [`Error::InvalidInput`] when `through` shares the vertex's x coordinate.
pub fn parabola(
    vertex: Point2,
    through: Point2,
    canvas: Canvas,
    sink: &mut (impl PixelSink + ?Sized),
    trace: Option<&mut Trace>,
) -> Result<()> {
    let mut trace = begin(trace);
    if through.x == vertex.x {
        return Err(Error::invalid(
            "parabola point must not share the vertex x coordinate",
        ));
    }

    let (xc, yc) = (vertex.x, vertex.y);
    let a = (through.y - yc) / (through.x - xc).powi(2);
    let height = f64::from(canvas.height);
    let width = i64::from(canvas.width);
    let mut step = 0;

    for col in 0..width {
        let x = col as f64;
        let dx = x - xc;
        let y = a * dx * dx + yc;
        if y < 0.0 || y > height {
            continue;
        }

        let row = y.round() as i32;
        sink.plot(col as i32, row, 1.0);
        sink.plot((xc - dx).round() as i32, row, 1.0);

        if let Some(trace) = trace.as_deref_mut() {
            let decision = y - yc;
            let next = if col + 1 < width {
                a * (dx + 1.0).powi(2)
            } else {
                decision
            };
            let pixel = (col as i32, row);
            trace.push(DebugRow::Decision {
                step,
                decision,
                delta: next - decision,
                delta_star: 0.0,
                pixel,
                x,
                y,
                next_decision: next,
                plot: pixel,
            });
        }
        step += 1;
    }

    Ok(())
}

/// Which axis a hyperbola opens along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HyperbolaAxis {
    /// Branches open left and right.
    Horizontal,
    /// Branches open up and down.
    Vertical,
}

impl HyperbolaAxis {
    /// Horizontal when the x offset from `center` to `point` is at least the
    /// y offset, vertical otherwise.
    #[must_use]
    pub fn from_points(center: Point2, point: Point2) -> Self {
        if (point.x - center.x).abs() >= (point.y - center.y).abs() {
            Self::Horizontal
        } else {
            Self::Vertical
        }
    }
}

/// Largest number of parameter steps [`hyperbola`] will take.
pub const MAX_HYPERBOLA_STEPS: usize = 1_000_000;

/// Parameter sampling for [`hyperbola`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HyperbolaParams {
    /// `t` is sampled over `[-t_max, t_max]`.
    pub t_max: f64,
    /// Parameter step.
    pub dt: f64,
}

impl Default for HyperbolaParams {
    fn default() -> Self {
        Self {
            t_max: 2.0,
            dt: 0.01,
        }
    }
}

/// Parametric hyperbola centered on `center` with semi-axes
/// `a = |x₂ − xc|` and `b = |y₂ − yc|` taken from `through`.
///
/// Horizontal: `(xc ± a·cosh t, yc ± b·sinh t)`; vertical:
/// `(xc ± b·sinh t, yc ± a·cosh t)`. Four points per sample.
///
/// # Errors
///
/// [`Error::InvalidInput`] for a non-positive `dt` or `t_max`, or a ratio
/// needing more than [`MAX_HYPERBOLA_STEPS`] samples.
pub fn hyperbola(
    center: Point2,
    through: Point2,
    axis: HyperbolaAxis,
    params: HyperbolaParams,
    sink: &mut (impl PixelSink + ?Sized),
    trace: Option<&mut Trace>,
) -> Result<()> {
    let mut trace = begin(trace);
    if !(params.dt > 0.0 && params.t_max > 0.0) {
        return Err(Error::invalid(
            "hyperbola sampling needs positive dt and t_max",
        ));
    }
    let span = (2.0 * params.t_max / params.dt + 1e-9).floor();
    if span >= MAX_HYPERBOLA_STEPS as f64 {
        return Err(Error::invalid(format!(
            "hyperbola sampling with t_max {} and dt {} exceeds {MAX_HYPERBOLA_STEPS} steps",
            params.t_max, params.dt
        )));
    }

    let a = (through.x - center.x).abs();
    let b = (through.y - center.y).abs();
    let (xc, yc) = (center.x, center.y);
    let steps = span as usize;

    let branch = |t: f64| -> (f64, f64, f64, f64) {
        match axis {
            HyperbolaAxis::Horizontal => (
                xc + a * t.cosh(),
                yc + b * t.sinh(),
                xc - a * t.cosh(),
                yc - b * t.sinh(),
            ),
            HyperbolaAxis::Vertical => (
                xc + b * t.sinh(),
                yc + a * t.cosh(),
                xc - b * t.sinh(),
                yc - a * t.cosh(),
            ),
        }
    };

    for step in 0..=steps {
        let t = -params.t_max + step as f64 * params.dt;
        let (x_right, y_top, x_left, y_bottom) = branch(t);

        for (px, py) in [
            (x_right, y_top),
            (x_left, y_top),
            (x_right, y_bottom),
            (x_left, y_bottom),
        ] {
            sink.plot(px.round() as i32, py.round() as i32, 1.0);
        }

        if let Some(trace) = trace.as_deref_mut() {
            let (next_right, next_top, _, _) = branch(t + params.dt);
            let (decision, next) = match axis {
                HyperbolaAxis::Horizontal => (x_right, next_right),
                HyperbolaAxis::Vertical => (y_top, next_top),
            };
            let pixel = (x_right.round() as i32, y_top.round() as i32);
            trace.push(DebugRow::Decision {
                step,
                decision,
                delta: next - decision,
                delta_star: 0.0,
                pixel,
                x: x_right,
                y: y_top,
                next_decision: next,
                plot: pixel,
            });
        }
    }

    Ok(())
}

/// A second-order curve ready to rasterize.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Conic {
    /// Midpoint circle.
    Circle {
        /// Center pixel.
        center: (i32, i32),
        /// Radius in pixels.
        radius: u32,
    },
    /// Midpoint ellipse.
    Ellipse {
        /// Center pixel.
        center: (i32, i32),
        /// Horizontal semi-axis.
        rx: u32,
        /// Vertical semi-axis.
        ry: u32,
    },
    /// Explicit vertical parabola.
    Parabola {
        /// Vertex.
        vertex: Point2,
        /// Second point on the curve.
        through: Point2,
    },
    /// Parametric hyperbola.
    Hyperbola {
        /// Center.
        center: Point2,
        /// Point fixing both semi-axes.
        through: Point2,
        /// Opening direction.
        axis: HyperbolaAxis,
        /// Parameter sampling.
        params: HyperbolaParams,
    },
}

impl Conic {
    /// Circle centered on `center` whose radius is the truncated distance to
    /// `point`.
    #[must_use]
    pub fn circle_through(center: Point2, point: Point2) -> Self {
        Self::Circle {
            center: center.round(),
            radius: center.distance(point) as u32,
        }
    }

    /// Ellipse centered on `center` with semi-axes `|dx|` and `|dy|` to
    /// `corner`.
    #[must_use]
    pub fn ellipse_through(center: Point2, corner: Point2) -> Self {
        Self::Ellipse {
            center: center.round(),
            rx: (corner.x - center.x).abs().round() as u32,
            ry: (corner.y - center.y).abs().round() as u32,
        }
    }

    /// Hyperbola whose axis follows the larger offset from `center` to
    /// `point`, with default sampling.
    #[must_use]
    pub fn hyperbola_through(center: Point2, point: Point2) -> Self {
        Self::Hyperbola {
            center,
            through: point,
            axis: HyperbolaAxis::from_points(center, point),
            params: HyperbolaParams::default(),
        }
    }

    /// Rasterize into `sink`. The canvas bounds parabola sampling.
    pub fn rasterize(
        &self,
        canvas: Canvas,
        sink: &mut (impl PixelSink + ?Sized),
        trace: Option<&mut Trace>,
    ) -> Result<()> {
        match *self {
            Self::Circle { center, radius } => {
                circle(center, radius, sink, trace);
                Ok(())
            }
            Self::Ellipse { center, rx, ry } => {
                ellipse(center, rx, ry, sink, trace);
                Ok(())
            }
            Self::Parabola { vertex, through } => parabola(vertex, through, canvas, sink, trace),
            Self::Hyperbola {
                center,
                through,
                axis,
                params,
            } => hyperbola(center, through, axis, params, sink, trace),
        }
    }

    /// Rasterize and return the emitted pixels.
    pub fn pixels(&self, canvas: Canvas) -> Result<Vec<Pixel>> {
        let mut pixels = Vec::new();
        self.rasterize(canvas, &mut pixels, None)?;
        Ok(pixels)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        /// Every circle pixel rounds to a distance within one of the radius.
        #[test]
        fn prop_circle_points_near_radius(
            cx in -300i32..300,
            cy in -300i32..300,
            radius in 0u32..200,
        ) {
            let mut pixels = Vec::<Pixel>::new();
            circle((cx, cy), radius, &mut pixels, None);
            prop_assert!(!pixels.is_empty());
            let r = i64::from(radius);
            for px in &pixels {
                let dx = f64::from(px.x - cx);
                let dy = f64::from(px.y - cy);
                let d = dx.hypot(dy).round() as i64;
                prop_assert!((r - 1..=r + 1).contains(&d), "distance {} for radius {}", d, r);
            }
        }
    }
}
