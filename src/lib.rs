//! # Rasterlab
//!
//! Classic rasterization and computational geometry algorithms, written to
//! be watched as much as run.
//!
//! Every rasterizer writes into a [`render::PixelSink`], so the same code
//! fills a [`framebuffer::Framebuffer`] for PNG output or a `Vec<Pixel>` for
//! inspection. Most algorithms can also record their intermediate state
//! (decision variables, error terms, hull steps) into a [`trace::Trace`] or
//! [`trace::StepLog`].
//!
//! ## Quick Start
//!
//! ```rust
//! use rasterlab::prelude::*;
//!
//! let mut fb = Framebuffer::new(64, 64)?;
//! fb.clear(Rgba::WHITE);
//! let mut trace = Trace::new();
//! bresenham(
//!     Point2::new(2.0, 3.0),
//!     Point2::new(40.0, 20.0),
//!     &mut fb.pen(Rgba::BLACK),
//!     Some(&mut trace),
//! );
//! assert_eq!(trace.len(), 39);
//! # Ok::<(), rasterlab::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `tracing`: emit `debug`/`warn` events from the algorithms
//! - `serde`: `Serialize`/`Deserialize` on pixels, points, traces and meshes
//!
//! ## References
//!
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."
//! - Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.
//! - Graham, R. L. (1972). "An efficient algorithm for determining the convex hull."
//! - Watson, D. F. (1981). "Computing the n-dimensional Delaunay tessellation."

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Log fields are the only readers of some bindings
#![cfg_attr(not(feature = "tracing"), allow(unused_variables))]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

mod log;

// ============================================================================
// Core Modules
// ============================================================================

/// Color type for framebuffer pixels.
pub mod color;

/// RGBA framebuffer, the default pixel sink.
pub mod framebuffer;

/// Points, pixels, boxes and the canvas.
pub mod geometry;

/// Per-step debug rows and hull step logs.
pub mod trace;

/// Error types for rasterlab operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Rasterization
// ============================================================================

/// Lines, conics and wireframes.
pub mod render;

/// Hermite, Bézier and B-spline curves.
pub mod curve;

/// Polygon editing, containment, convexity, filling and hulls.
pub mod polygon;

// ============================================================================
// Triangulation
// ============================================================================

pub mod delaunay;

pub mod voronoi;

// ============================================================================
// 3D
// ============================================================================

/// Homogeneous transforms, view presets and projection.
pub mod transform;

/// Polygon meshes, primitives and the text mesh format.
pub mod mesh;

// ============================================================================
// Output
// ============================================================================

/// Output encoders (PNG).
pub mod output;

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and functions for convenient imports.
///
/// ```rust
/// use rasterlab::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::Rgba;
    pub use crate::curve::{Curve, CurveKind};
    pub use crate::delaunay::{triangulate, Triangle};
    pub use crate::error::{Error, Result};
    pub use crate::framebuffer::Framebuffer;
    pub use crate::geometry::{BoundingBox, Canvas, Pixel, Point2, Point3};
    pub use crate::mesh::Mesh;
    pub use crate::output::PngEncoder;
    pub use crate::polygon::hull::{graham_scan, jarvis_march};
    pub use crate::polygon::{Convexity, Polygon};
    pub use crate::render::{
        bresenham, dda, rasterize_line, wu, Conic, LineAlgorithm, PixelSink,
    };
    pub use crate::trace::{DebugRow, StepLog, Trace};
    pub use crate::transform::{Matrix4, Projection, SceneTransform, ViewPreset};
    pub use crate::voronoi::{voronoi_edges, VoronoiEdge, VoronoiEdgeKind};
}
