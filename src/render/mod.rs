//! Rasterization of geometric primitives into a [`PixelSink`].
//!
//! # Algorithms
//!
//! - **DDA**: Floating-point incremental line stepping
//! - **Bresenham's Line**: Integer-only error-term line drawing
//! - **Wu's Anti-aliased Line**: Paired pixels weighted by sub-pixel coverage
//! - **Midpoint Circle / Ellipse**: Incremental decision-variable conics
//! - **Parabola / Hyperbola**: Sampled and mirrored
//! - **Wireframe**: Projected mesh faces drawn as closed polylines
//!
//! # References
//!
//! - Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."

mod conic;
mod line;
mod sink;
mod wireframe;

pub use conic::{
    circle, ellipse, hyperbola, parabola, Conic, HyperbolaAxis, HyperbolaParams,
    MAX_HYPERBOLA_STEPS,
};
pub use line::{bresenham, dda, rasterize_line, wu, LineAlgorithm};
pub use sink::PixelSink;
pub use wireframe::draw_wireframe;
