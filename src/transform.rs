//! 4×4 affine transforms and screen projection.
//!
//! Matrices act on column vectors, so `(a * b).transform_point(p)` applies
//! `b` first. A [`SceneTransform`] accumulates by left-multiplying each new
//! transform (`M' = T·M`): operations apply in the order they were issued.

use std::ops::Mul;

use crate::geometry::{Point2, Point3};

/// Row-major 4×4 matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix4 {
    /// `rows[r][c]`.
    pub rows: [[f64; 4]; 4],
}

impl Matrix4 {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        rows: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Identity matrix.
    #[must_use]
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Translation by `(dx, dy, dz)`.
    #[must_use]
    pub const fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        Self {
            rows: [
                [1.0, 0.0, 0.0, dx],
                [0.0, 1.0, 0.0, dy],
                [0.0, 0.0, 1.0, dz],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Axis-aligned scaling.
    #[must_use]
    pub const fn scaling(sx: f64, sy: f64, sz: f64) -> Self {
        Self {
            rows: [
                [sx, 0.0, 0.0, 0.0],
                [0.0, sy, 0.0, 0.0],
                [0.0, 0.0, sz, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Rotation about the X axis, in degrees.
    #[must_use]
    pub fn rotation_x(degrees: f64) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        Self {
            rows: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, c, -s, 0.0],
                [0.0, s, c, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Rotation about the Y axis, in degrees.
    #[must_use]
    pub fn rotation_y(degrees: f64) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        Self {
            rows: [
                [c, 0.0, s, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [-s, 0.0, c, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Rotation about the Z axis, in degrees.
    #[must_use]
    pub fn rotation_z(degrees: f64) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        Self {
            rows: [
                [c, -s, 0.0, 0.0],
                [s, c, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Combined rotation `Rz·Ry·Rx` (X applied first), in degrees.
    #[must_use]
    pub fn rotation(ax: f64, ay: f64, az: f64) -> Self {
        Self::rotation_z(az) * Self::rotation_y(ay) * Self::rotation_x(ax)
    }

    /// Apply the affine part of the matrix to a point.
    #[must_use]
    pub fn transform_point(&self, p: Point3) -> Point3 {
        let m = &self.rows;
        Point3::new(
            m[0][0] * p.x + m[0][1] * p.y + m[0][2] * p.z + m[0][3],
            m[1][0] * p.x + m[1][1] * p.y + m[1][2] * p.z + m[1][3],
            m[2][0] * p.x + m[2][1] * p.y + m[2][2] * p.z + m[2][3],
        )
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Matrix4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let mut rows = [[0.0; 4]; 4];
        for (i, row) in rows.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.rows[i][k] * rhs.rows[k][j]).sum();
            }
        }
        Self { rows }
    }
}

/// Named camera orientations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ViewPreset {
    /// Looking down -Z.
    Front,
    /// Rotated 180° about Y.
    Back,
    /// Rotated 90° about Y.
    Left,
    /// Rotated −90° about Y.
    Right,
    /// Rotated 90° about X.
    Top,
    /// Rotated −90° about X.
    Bottom,
}

impl ViewPreset {
    /// All presets.
    pub const ALL: [Self; 6] = [
        Self::Front,
        Self::Back,
        Self::Left,
        Self::Right,
        Self::Top,
        Self::Bottom,
    ];

    /// Rotation angles `(x, y, z)` in degrees.
    #[must_use]
    pub const fn angles(self) -> (f64, f64, f64) {
        match self {
            Self::Front => (0.0, 0.0, 0.0),
            Self::Back => (0.0, 180.0, 0.0),
            Self::Left => (0.0, 90.0, 0.0),
            Self::Right => (0.0, -90.0, 0.0),
            Self::Top => (90.0, 0.0, 0.0),
            Self::Bottom => (-90.0, 0.0, 0.0),
        }
    }

    /// The preset's rotation matrix.
    #[must_use]
    pub fn matrix(self) -> Matrix4 {
        let (ax, ay, az) = self.angles();
        Matrix4::rotation(ax, ay, az)
    }
}

/// Accumulated object-space transform owned by whoever drives a scene.
///
/// # Example
///
/// ```
/// use rasterlab::geometry::Point3;
/// use rasterlab::transform::SceneTransform;
///
/// let mut scene = SceneTransform::new();
/// scene.scale(2.0, 2.0, 2.0).translate(1.0, 0.0, 0.0);
/// // scale first, then translate
/// assert_eq!(scene.apply_to(Point3::new(1.0, 1.0, 1.0)), Point3::new(3.0, 2.0, 2.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SceneTransform {
    matrix: Matrix4,
}

impl SceneTransform {
    /// Start from the identity.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            matrix: Matrix4::IDENTITY,
        }
    }

    /// The accumulated matrix.
    #[must_use]
    pub const fn matrix(&self) -> Matrix4 {
        self.matrix
    }

    /// Compose `m` after everything applied so far (`M' = m·M`).
    pub fn apply(&mut self, m: Matrix4) -> &mut Self {
        self.matrix = m * self.matrix;
        self
    }

    /// Compose a translation.
    pub fn translate(&mut self, dx: f64, dy: f64, dz: f64) -> &mut Self {
        self.apply(Matrix4::translation(dx, dy, dz))
    }

    /// Compose a scaling.
    pub fn scale(&mut self, sx: f64, sy: f64, sz: f64) -> &mut Self {
        self.apply(Matrix4::scaling(sx, sy, sz))
    }

    /// Compose a combined `Rz·Ry·Rx` rotation in degrees.
    pub fn rotate(&mut self, ax: f64, ay: f64, az: f64) -> &mut Self {
        self.apply(Matrix4::rotation(ax, ay, az))
    }

    /// Replace the accumulated matrix with a view preset.
    pub fn set_view(&mut self, preset: ViewPreset) -> &mut Self {
        self.matrix = preset.matrix();
        self
    }

    /// Back to the identity.
    pub fn reset(&mut self) -> &mut Self {
        self.matrix = Matrix4::IDENTITY;
        self
    }

    /// Transform a single point by the accumulated matrix.
    #[must_use]
    pub fn apply_to(&self, p: Point3) -> Point3 {
        self.matrix.transform_point(p)
    }
}

/// Default viewer distance for perspective projection.
pub const DEFAULT_PERSPECTIVE_DISTANCE: f64 = 500.0;

/// How transformed points reach the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Projection {
    /// Drop z.
    Orthographic,
    /// Scale by `distance / (distance + z)`.
    Perspective {
        /// Viewer distance from the z = 0 plane.
        distance: f64,
    },
}

impl Default for Projection {
    fn default() -> Self {
        Self::Perspective {
            distance: DEFAULT_PERSPECTIVE_DISTANCE,
        }
    }
}

impl Projection {
    /// Scale factor for a point at depth `z`.
    #[must_use]
    pub fn factor(&self, z: f64) -> f64 {
        match *self {
            Self::Orthographic => 1.0,
            Self::Perspective { distance } => {
                let denom = distance + z;
                if denom == 0.0 {
                    1.0
                } else {
                    distance / denom
                }
            }
        }
    }

    /// Screen position of `p`; screen y grows downward from `center`.
    #[must_use]
    pub fn project(&self, p: Point3, center: Point2) -> Point2 {
        let f = self.factor(p.z);
        Point2::new(p.x * f + center.x, -p.y * f + center.y)
    }
}
