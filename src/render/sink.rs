//! The single output operation every rasterizer needs.

use crate::geometry::Pixel;

/// Receiver of plotted pixels (a framebuffer, a canvas, a test harness).
pub trait PixelSink {
    /// Plot the pixel at `(x, y)` with an intensity in `[0, 1]`.
    fn plot(&mut self, x: i32, y: i32, intensity: f32);
}

/// Collects pixels in emission order.
impl PixelSink for Vec<Pixel> {
    fn plot(&mut self, x: i32, y: i32, intensity: f32) {
        self.push(Pixel::new(x, y, intensity));
    }
}

impl<S: PixelSink + ?Sized> PixelSink for &mut S {
    fn plot(&mut self, x: i32, y: i32, intensity: f32) {
        (**self).plot(x, y, intensity);
    }
}
