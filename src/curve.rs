//! Parametric cubic curves: Hermite, Bézier and uniform B-spline.
//!
//! Curves are sampled at a fixed parameter step. [`Curve::samples`] returns
//! a lazy iterator that can be cloned or recreated to start over; sampling
//! never touches the control points.

use crate::error::{Error, Result};
use crate::geometry::{Pixel, Point2};
use crate::render::PixelSink;
use crate::trace::{begin, DebugRow, Trace};

/// Parameter step used by interactive redraws.
pub const DEFAULT_DT: f64 = 0.01;

/// Upper bound on samples per segment, reached at `dt = 1e-6`.
pub const MAX_SAMPLES_PER_SEGMENT: usize = 1_000_001;

/// Uniform cubic B-spline basis, scaled by 6.
const BSPLINE_BASIS: [[f64; 4]; 4] = [
    [-1.0, 3.0, -3.0, 1.0],
    [3.0, -6.0, 3.0, 0.0],
    [-3.0, 0.0, 3.0, 0.0],
    [1.0, 4.0, 1.0, 0.0],
];

/// Cubic Hermite segment from `p0` to `p1` with end tangents `t0` and `t1`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hermite {
    /// Start point.
    pub p0: Point2,
    /// End point.
    pub p1: Point2,
    /// Tangent at the start.
    pub t0: Point2,
    /// Tangent at the end.
    pub t1: Point2,
}

impl Hermite {
    /// Point at parameter `t ∈ [0, 1]`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        let t2 = t * t;
        let t3 = t2 * t;
        let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
        let h10 = t3 - 2.0 * t2 + t;
        let h01 = -2.0 * t3 + 3.0 * t2;
        let h11 = t3 - t2;
        self.p0 * h00 + self.t0 * h10 + self.p1 * h01 + self.t1 * h11
    }
}

/// Cubic Bézier curve over four control points.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bezier {
    /// Control polygon; the curve passes through the first and last points.
    pub control: [Point2; 4],
}

impl Bezier {
    /// Point at parameter `t ∈ [0, 1]`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        let u = 1.0 - t;
        let [p0, p1, p2, p3] = self.control;
        p0 * (u * u * u) + p1 * (3.0 * t * u * u) + p2 * (3.0 * t * t * u) + p3 * (t * t * t)
    }
}

/// Uniform cubic B-spline; segment `i` is shaped by control points
/// `i..i + 4`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BSpline {
    control: Vec<Point2>,
}

impl BSpline {
    /// # Errors
    ///
    /// [`Error::InvalidInput`] with fewer than four control points.
    pub fn new(control: Vec<Point2>) -> Result<Self> {
        if control.len() < 4 {
            return Err(Error::invalid(format!(
                "B-spline needs at least 4 control points, got {}",
                control.len()
            )));
        }
        Ok(Self { control })
    }

    /// Control points.
    #[must_use]
    pub fn control(&self) -> &[Point2] {
        &self.control
    }

    /// Number of cubic segments.
    #[must_use]
    pub fn segments(&self) -> usize {
        self.control.len() - 3
    }

    /// Point at parameter `t ∈ [0, 1]` of segment `segment`.
    #[must_use]
    pub fn point_at(&self, segment: usize, t: f64) -> Point2 {
        let powers = [t * t * t, t * t, t, 1.0];
        let window = &self.control[segment..segment + 4];

        let mut point = Point2::ORIGIN;
        for (j, &p) in window.iter().enumerate() {
            let weight: f64 = (0..4).map(|k| powers[k] * BSPLINE_BASIS[k][j]).sum();
            point = point + p * weight;
        }
        point * (1.0 / 6.0)
    }
}

/// Curve family selector used by [`recompute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CurveKind {
    /// Hermite from `[p0, p1, h0, h1]`; tangents are `h0 − p0` and `h1 − p1`.
    Hermite,
    /// Bézier from exactly four control points.
    #[default]
    Bezier,
    /// B-spline from four or more control points.
    BSpline,
}

/// A parametric curve of any supported family.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Curve {
    /// Single Hermite segment.
    Hermite(Hermite),
    /// Single Bézier segment.
    Bezier(Bezier),
    /// Piecewise B-spline.
    BSpline(BSpline),
}

impl Curve {
    /// Build a curve from an editor's clicked points.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] when the point count does not fit `kind`.
    pub fn from_points(kind: CurveKind, points: &[Point2]) -> Result<Self> {
        match kind {
            CurveKind::Hermite => match *points {
                [p0, p1, h0, h1] => Ok(Self::Hermite(Hermite {
                    p0,
                    p1,
                    t0: h0 - p0,
                    t1: h1 - p1,
                })),
                _ => Err(Error::invalid(format!(
                    "Hermite curve needs exactly 4 points, got {}",
                    points.len()
                ))),
            },
            CurveKind::Bezier => <[Point2; 4]>::try_from(points)
                .map(|control| Self::Bezier(Bezier { control }))
                .map_err(|_| {
                    Error::invalid(format!(
                        "Bezier curve needs exactly 4 points, got {}",
                        points.len()
                    ))
                }),
            CurveKind::BSpline => BSpline::new(points.to_vec()).map(Self::BSpline),
        }
    }

    /// Number of independently sampled segments.
    #[must_use]
    pub fn segments(&self) -> usize {
        match self {
            Self::Hermite(_) | Self::Bezier(_) => 1,
            Self::BSpline(spline) => spline.segments(),
        }
    }

    /// Point at parameter `t` of `segment`.
    #[must_use]
    pub fn point_at(&self, segment: usize, t: f64) -> Point2 {
        match self {
            Self::Hermite(h) => h.point_at(t),
            Self::Bezier(b) => b.point_at(t),
            Self::BSpline(s) => s.point_at(segment, t),
        }
    }

    /// Lazily sample every segment at `t = 0, dt, 2dt, …` up to 1.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] unless `0 < dt ≤ 1` and the step yields at
    /// most [`MAX_SAMPLES_PER_SEGMENT`] samples per segment.
    pub fn samples(&self, dt: f64) -> Result<CurveSamples<'_>> {
        if !(dt > 0.0 && dt <= 1.0) {
            return Err(Error::invalid(format!(
                "curve step must lie in (0, 1], got {dt}"
            )));
        }
        let steps = (1.0 / dt + 1e-9).floor();
        if steps >= MAX_SAMPLES_PER_SEGMENT as f64 {
            return Err(Error::invalid(format!(
                "curve step {dt} needs more than {MAX_SAMPLES_PER_SEGMENT} samples per segment"
            )));
        }
        Ok(CurveSamples {
            curve: self,
            dt,
            per_segment: steps as usize + 1,
            segment: 0,
            index: 0,
        })
    }

    /// Plot every sample, rounded to the nearest pixel.
    ///
    /// Trace rows are [`DebugRow::Decision`] rows carrying the parameter in
    /// the decision column; the delta columns are zero.
    pub fn rasterize(
        &self,
        dt: f64,
        sink: &mut (impl PixelSink + ?Sized),
        trace: Option<&mut Trace>,
    ) -> Result<()> {
        let samples = self.samples(dt)?;
        let mut trace = begin(trace);
        for (step, sample) in samples.enumerate() {
            let pixel = sample.point.round();
            sink.plot(pixel.0, pixel.1, 1.0);
            if let Some(trace) = trace.as_deref_mut() {
                trace.push(DebugRow::Decision {
                    step,
                    decision: sample.t,
                    delta: 0.0,
                    delta_star: 0.0,
                    pixel,
                    x: sample.point.x,
                    y: sample.point.y,
                    next_decision: 0.0,
                    plot: pixel,
                });
            }
        }
        Ok(())
    }
}

/// One evaluated curve sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSample {
    /// Segment index (always 0 for Hermite and Bézier).
    pub segment: usize,
    /// Parameter within the segment.
    pub t: f64,
    /// Position on the curve.
    pub point: Point2,
}

/// Iterator returned by [`Curve::samples`].
#[derive(Debug, Clone)]
pub struct CurveSamples<'a> {
    curve: &'a Curve,
    dt: f64,
    per_segment: usize,
    segment: usize,
    index: usize,
}

impl Iterator for CurveSamples<'_> {
    type Item = CurveSample;

    fn next(&mut self) -> Option<CurveSample> {
        if self.index == self.per_segment {
            self.index = 0;
            self.segment += 1;
        }
        if self.segment >= self.curve.segments() {
            return None;
        }

        let t = (self.index as f64 * self.dt).min(1.0);
        self.index += 1;
        Some(CurveSample {
            segment: self.segment,
            t,
            point: self.curve.point_at(self.segment, t),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let total = self.curve.segments().saturating_mul(self.per_segment);
        let done = self
            .segment
            .saturating_mul(self.per_segment)
            .saturating_add(self.index)
            .min(total);
        (total - done, Some(total - done))
    }
}

impl ExactSizeIterator for CurveSamples<'_> {}

/// Redraw a curve from scratch after its control points changed.
///
/// # Errors
///
/// [`Error::InvalidInput`] for a point count `kind` cannot use or a bad `dt`.
pub fn recompute(kind: CurveKind, points: &[Point2], dt: f64) -> Result<Vec<Pixel>> {
    let curve = Curve::from_points(kind, points)?;
    let mut pixels = Vec::new();
    curve.rasterize(dt, &mut pixels, None)?;
    Ok(pixels)
}
