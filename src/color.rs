//! RGBA color used by the framebuffer sink.

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Opaque red.
    pub const RED: Self = Self::new(255, 0, 0, 255);
    /// Opaque green.
    pub const GREEN: Self = Self::new(0, 255, 0, 255);
    /// Opaque blue.
    pub const BLUE: Self = Self::new(0, 0, 255, 255);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create a color with modified alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Scale the alpha channel by a pixel intensity in `[0, 1]`.
    #[must_use]
    pub fn with_intensity(self, intensity: f32) -> Self {
        let alpha = f32::from(self.a) * intensity.clamp(0.0, 1.0);
        self.with_alpha(alpha.round() as u8)
    }

    /// Composite `self` over `dst` with straight (non-premultiplied) alpha.
    #[must_use]
    pub fn over(self, dst: Self) -> Self {
        let src_a = f32::from(self.a) / 255.0;
        let dst_a = f32::from(dst.a) / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        if out_a <= 0.0 {
            return Self::TRANSPARENT;
        }

        let mix = |src: u8, dst: u8| {
            let out = (f32::from(src) * src_a + f32::from(dst) * dst_a * (1.0 - src_a)) / out_a;
            out.round() as u8
        };
        Self::new(
            mix(self.r, dst.r),
            mix(self.g, dst.g),
            mix(self.b, dst.b),
            (out_a * 255.0).round() as u8,
        )
    }

    /// Convert to array representation.
    #[must_use]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Create from array representation.
    #[must_use]
    pub const fn from_array(arr: [u8; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_constants() {
        assert_eq!(Rgba::BLACK.to_array(), [0, 0, 0, 255]);
        assert_eq!(Rgba::WHITE.to_array(), [255, 255, 255, 255]);
        assert_eq!(Rgba::TRANSPARENT.a, 0);
    }

    #[test]
    fn test_with_intensity() {
        assert_eq!(Rgba::RED.with_intensity(1.0), Rgba::RED);
        assert_eq!(Rgba::RED.with_intensity(0.0).a, 0);
        assert_eq!(Rgba::RED.with_intensity(0.5).a, 128);
    }

    #[test]
    fn test_over_opaque_and_clear() {
        assert_eq!(Rgba::BLACK.over(Rgba::WHITE), Rgba::BLACK);
        assert_eq!(Rgba::TRANSPARENT.over(Rgba::WHITE), Rgba::WHITE);
        assert_eq!(Rgba::TRANSPARENT.over(Rgba::TRANSPARENT), Rgba::TRANSPARENT);
    }

    #[test]
    fn test_over_half_coverage() {
        let gray = Rgba::BLACK.with_intensity(0.5).over(Rgba::WHITE);
        assert_eq!(gray.a, 255);
        assert_eq!(gray.r, gray.b);
        assert!(gray.r > 120 && gray.r < 135);
    }

    #[test]
    fn test_rgba_to_array_from_array() {
        let c = Rgba::new(10, 20, 30, 40);
        assert_eq!(Rgba::from_array(c.to_array()), c);
    }
}
