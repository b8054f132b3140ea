#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Three coordinate spaces meet in this module:
//!
//! - **Pixel space**: CSS pixels in the map container, origin at top-left.
//! - **Geographic space**: WGS84 longitude/latitude degrees.
//! - **World space**: meters relative to the grid anchor (plus offset),
//!   X east-positive, Y south-positive to match screen Y.

/// A point in CSS-pixel space, origin at the container's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    /// Create a new pixel point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// This point translated by `(dx, dy)` pixels.
    #[inline]
    pub const fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// An axis-aligned rectangle in CSS-pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PixelRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Center of the rectangle.
    #[inline]
    pub const fn center(&self) -> PixelPoint {
        PixelPoint::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Check if the rectangle has zero (or negative) area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// CSS-pixel size of the drawing surface / map container.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl SurfaceSize {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Center point of a surface of this size.
    #[inline]
    pub const fn center(&self) -> PixelPoint {
        PixelPoint::new(self.width / 2.0, self.height / 2.0)
    }

    /// Check if either dimension is zero or negative.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// A geographic coordinate in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    /// Longitude in degrees, east-positive.
    pub lng: f64,
    /// Latitude in degrees, north-positive.
    pub lat: f64,
}

impl GeoPoint {
    /// Create a new geographic point.
    #[inline]
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

/// A point in anchor-relative world space, in meters.
///
/// X grows east, Y grows south (screen-aligned), and the origin is the grid
/// anchor shifted by the configured offset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WorldPoint {
    pub x: f64,
    pub y: f64,
}

impl WorldPoint {
    /// Create a new world point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A selection's real-world extent in meters, snapped outward to grid
/// spacing. Independent of the current zoom or pixel scale.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldRect {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl WorldRect {
    /// Snap the rectangle spanned by two world points outward to multiples
    /// of `spacing`.
    ///
    /// Per axis: `min` is the smaller of the two floored-to-spacing values,
    /// `max` the larger of the two ceiled-to-spacing values, so the result
    /// always contains both input points and both bounds land on grid lines.
    pub fn snapped(start: WorldPoint, current: WorldPoint, spacing: f64) -> Self {
        debug_assert!(spacing > 0.0);
        let floor = |v: f64| (v / spacing).floor() * spacing;
        let ceil = |v: f64| (v / spacing).ceil() * spacing;
        Self {
            min_x: floor(start.x).min(floor(current.x)),
            max_x: ceil(start.x).max(ceil(current.x)),
            min_y: floor(start.y).min(floor(current.y)),
            max_y: ceil(start.y).max(ceil(current.y)),
        }
    }

    /// Width in meters.
    #[inline]
    pub fn width(&self) -> f64 {
        (self.max_x - self.min_x).max(0.0)
    }

    /// Height in meters.
    #[inline]
    pub fn height(&self) -> f64 {
        (self.max_y - self.min_y).max(0.0)
    }
}
