//! RGBA framebuffer that rasterizers can draw into.
//!
//! The framebuffer is one concrete [`PixelSink`]: a [`FramebufferPen`] pairs
//! it with a color and composites each plotted pixel, scaled by its
//! intensity, over what is already there. Pixels off the canvas are
//! clipped silently.

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::geometry::{Canvas, Pixel};
use crate::render::PixelSink;

/// Row-major RGBA pixel buffer.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    canvas: Canvas,
    /// 4 bytes per pixel, top row first.
    data: Vec<u8>,
}

impl Framebuffer {
    /// Create a framebuffer cleared to transparent black.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDimensions`] if width or height is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use rasterlab::framebuffer::Framebuffer;
    ///
    /// let fb = Framebuffer::new(800, 600).unwrap();
    /// assert_eq!(fb.width(), 800);
    /// assert_eq!(fb.height(), 600);
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::for_canvas(Canvas::new(width, height))
    }

    /// Create a framebuffer covering `canvas`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDimensions`] for an empty canvas.
    pub fn for_canvas(canvas: Canvas) -> Result<Self> {
        let Canvas { width, height } = canvas;
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        Ok(Self {
            canvas,
            data: vec![0; width as usize * height as usize * 4],
        })
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.canvas.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.canvas.height
    }

    /// The drawable extent.
    #[must_use]
    pub const fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Raw RGBA bytes.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.data
    }

    /// Fill every pixel with `color`.
    pub fn clear(&mut self, color: Rgba) {
        let rgba = color.to_array();
        self.data
            .chunks_exact_mut(4)
            .for_each(|px| px.copy_from_slice(&rgba));
    }

    /// Color at `(x, y)`, or `None` off the canvas.
    #[must_use]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        let idx = self.index(i64::from(x), i64::from(y))?;
        let mut rgba = [0; 4];
        rgba.copy_from_slice(&self.data[idx..idx + 4]);
        Some(Rgba::from_array(rgba))
    }

    /// Overwrite `(x, y)` with `color`; ignored off the canvas.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if let Some(idx) = self.index(i64::from(x), i64::from(y)) {
            self.data[idx..idx + 4].copy_from_slice(&color.to_array());
        }
    }

    /// Composite `color` over `(x, y)`; ignored off the canvas.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if let Some(idx) = self.index(i64::from(x), i64::from(y)) {
            let mut dst = [0; 4];
            dst.copy_from_slice(&self.data[idx..idx + 4]);
            let out = color.over(Rgba::from_array(dst));
            self.data[idx..idx + 4].copy_from_slice(&out.to_array());
        }
    }

    /// Replay a recorded pixel list in `color`.
    pub fn draw(&mut self, pixels: &[Pixel], color: Rgba) {
        let mut pen = self.pen(color);
        for px in pixels {
            pen.plot(px.x, px.y, px.intensity);
        }
    }

    /// Number of pixels exactly equal to `color`.
    #[must_use]
    pub fn count(&self, color: Rgba) -> usize {
        let rgba = color.to_array();
        self.data.chunks_exact(4).filter(|px| *px == rgba).count()
    }

    /// Borrow the framebuffer as a sink that draws in `color`.
    pub fn pen(&mut self, color: Rgba) -> FramebufferPen<'_> {
        FramebufferPen { fb: self, color }
    }

    /// Byte offset of `(x, y)`, or `None` off the canvas.
    fn index(&self, x: i64, y: i64) -> Option<usize> {
        let (w, h) = (i64::from(self.canvas.width), i64::from(self.canvas.height));
        if x < 0 || y < 0 || x >= w || y >= h {
            return None;
        }
        Some(((y * w + x) * 4) as usize)
    }
}

/// A framebuffer paired with a drawing color.
#[derive(Debug)]
pub struct FramebufferPen<'a> {
    fb: &'a mut Framebuffer,
    color: Rgba,
}

impl PixelSink for FramebufferPen<'_> {
    fn plot(&mut self, x: i32, y: i32, intensity: f32) {
        self.fb
            .blend_pixel(x, y, self.color.with_intensity(intensity));
    }
}
