#![forbid(unsafe_code)]

//! The immediate-mode drawing surface capability.
//!
//! The painter issues commands in CSS-pixel units; the concrete surface owns
//! its backing store at CSS size × device pixel ratio behind a fixed scale
//! transform. The surface is immediate-mode with no retained diffing, so
//! every paint is a full clear-then-draw of the region.

use geogrid_core::geometry::{PixelPoint, PixelRect, SurfaceSize};

/// An RGBA color with a floating-point alpha channel.
///
/// The grid alphas derived from opacity (0.015 at the low end) need
/// sub-1/255 precision, so alpha stays a float rather than a packed byte.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Alpha in `[0, 1]`.
    pub a: f64,
}

impl Rgba {
    /// Create a new color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 1.0);

    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 1.0);

    /// This color with a different alpha.
    #[must_use]
    pub const fn with_alpha(mut self, a: f64) -> Self {
        self.a = a;
        self
    }
}

/// Immediate-mode 2D raster surface.
///
/// All coordinates are CSS pixels. Implementations apply alpha blending for
/// every fill and stroke.
pub trait Surface {
    /// Resize the backing store to `size` CSS pixels at the given device
    /// pixel ratio, re-establishing the fixed scale transform.
    fn resize(&mut self, size: SurfaceSize, scale_factor: f64);

    /// Clear the full region of the given size.
    fn clear(&mut self, size: SurfaceSize);

    /// Fill a rectangle.
    fn fill_rect(&mut self, rect: PixelRect, color: Rgba);

    /// Stroke a rectangle outline.
    fn stroke_rect(&mut self, rect: PixelRect, color: Rgba, line_width: f64);

    /// Stroke a single line segment.
    fn stroke_line(&mut self, from: PixelPoint, to: PixelPoint, color: Rgba, line_width: f64);
}
