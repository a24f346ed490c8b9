//! Geometric primitives shared by every algorithm.
//!
//! Coordinates are `f64`. Pixels are integer positions carrying an
//! intensity, the unit every rasterizer emits.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Sub};

/// A 2D point with floating-point coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point2 {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point2 {
    /// Origin point (0, 0).
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared distance to another point.
    #[must_use]
    pub fn distance_sq(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Calculate the distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        self.distance_sq(other).sqrt()
    }

    /// Midpoint of the segment to `other`.
    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Dot product, treating both points as vectors.
    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the cross product `self × other`.
    #[must_use]
    pub fn cross(self, other: Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Unit vector in the same direction, or the zero vector for zero length.
    #[must_use]
    pub fn normalized(self) -> Self {
        let len = self.x.hypot(self.y);
        if len == 0.0 {
            Self::ORIGIN
        } else {
            Self::new(self.x / len, self.y / len)
        }
    }

    /// Nearest pixel position (halves round away from zero).
    #[must_use]
    pub fn round(self) -> (i32, i32) {
        (self.x.round() as i32, self.y.round() as i32)
    }

    /// Lexicographic (x, then y) total order.
    #[must_use]
    pub fn lex_cmp(&self, other: &Self) -> Ordering {
        self.x.total_cmp(&other.x).then(self.y.total_cmp(&other.y))
    }

    /// Same point with `-0.0` folded into `0.0`.
    fn canonical(self) -> Self {
        Self::new(self.x + 0.0, self.y + 0.0)
    }

    pub(crate) fn key_bits(self) -> (u64, u64) {
        let p = self.canonical();
        (p.x.to_bits(), p.y.to_bits())
    }
}

impl Add for Point2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point2 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl From<(f64, f64)> for Point2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Z component of `(b - a) × (c - a)`; positive for a counter-clockwise turn
/// in y-up coordinates.
#[must_use]
pub fn orient(a: Point2, b: Point2, c: Point2) -> f64 {
    (b - a).cross(c - a)
}

/// A 3D point with floating-point coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point3 {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
}

impl Point3 {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl From<(f64, f64, f64)> for Point3 {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::new(x, y, z)
    }
}

/// A plotted pixel: integer position plus intensity in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pixel {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
    /// Coverage, 1.0 is fully opaque.
    pub intensity: f32,
}

impl Pixel {
    /// Create a pixel, clamping the intensity into `[0, 1]`.
    #[must_use]
    pub fn new(x: i32, y: i32, intensity: f32) -> Self {
        Self {
            x,
            y,
            intensity: intensity.clamp(0.0, 1.0),
        }
    }

    /// Fully opaque pixel.
    #[must_use]
    pub const fn opaque(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            intensity: 1.0,
        }
    }

    /// Position as a tuple.
    #[must_use]
    pub const fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }
}

/// Axis-aligned rectangle given by its minimum and maximum corners.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    /// Minimum corner.
    pub min: Point2,
    /// Maximum corner.
    pub max: Point2,
}

impl BoundingBox {
    /// Create a box from its corner coordinates.
    #[must_use]
    pub const fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            min: Point2::new(xmin, ymin),
            max: Point2::new(xmax, ymax),
        }
    }

    /// Smallest box containing all points, `None` for an empty slice.
    #[must_use]
    pub fn enclosing(points: &[Point2]) -> Option<Self> {
        let first = points.first()?;
        let mut bbox = Self {
            min: *first,
            max: *first,
        };
        for p in &points[1..] {
            bbox.min.x = bbox.min.x.min(p.x);
            bbox.min.y = bbox.min.y.min(p.y);
            bbox.max.x = bbox.max.x.max(p.x);
            bbox.max.y = bbox.max.y.max(p.y);
        }
        Some(bbox)
    }

    /// Width of the box.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Height of the box.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Center point of the box.
    #[must_use]
    pub fn center(&self) -> Point2 {
        self.min.midpoint(self.max)
    }

    /// Check if a point is inside the box (edges included).
    #[must_use]
    pub fn contains(&self, point: Point2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

/// The pixel grid an algorithm may touch: columns `0..width`, rows `0..height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a canvas of the given size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether the pixel lies on the canvas.
    #[must_use]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as i64) < i64::from(self.width) && (y as i64) < i64::from(self.height)
    }

    /// Center of the canvas in pixel coordinates.
    #[must_use]
    pub fn center(&self) -> Point2 {
        Point2::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }

    /// The canvas as a bounding box.
    #[must_use]
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

/// An unordered pair of points usable as a hash key.
///
/// The endpoints are stored in lexicographic order, so `(a, b)` and `(b, a)`
/// produce equal keys.
#[derive(Debug, Clone, Copy)]
pub struct EdgeKey {
    a: Point2,
    b: Point2,
}

impl EdgeKey {
    /// Canonical key for the edge between `p` and `q`.
    #[must_use]
    pub fn new(p: Point2, q: Point2) -> Self {
        let (p, q) = (p.canonical(), q.canonical());
        if p.lex_cmp(&q) == Ordering::Greater {
            Self { a: q, b: p }
        } else {
            Self { a: p, b: q }
        }
    }

    /// Endpoints in canonical order.
    #[must_use]
    pub const fn endpoints(&self) -> (Point2, Point2) {
        (self.a, self.b)
    }
}

impl PartialEq for EdgeKey {
    fn eq(&self, other: &Self) -> bool {
        self.a.key_bits() == other.a.key_bits() && self.b.key_bits() == other.b.key_bits()
    }
}

impl Eq for EdgeKey {}

impl Hash for EdgeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.a.key_bits().hash(state);
        self.b.key_bits().hash(state);
    }
}
