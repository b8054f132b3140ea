#![forbid(unsafe_code)]

//! Pixel ↔ world-meter conversion at a captured view state.
//!
//! World coordinates are meters relative to `anchor + offset`, which makes
//! them independent of zoom and pan: a selection keeps its real-world extent
//! while the view moves under it. The transform is a value snapshot taken at
//! point of use — never cached across an async boundary — so a settings or
//! view change between two events is always picked up by the next event.

use crate::geodesy::{Mpp, pixels_from_meters};
use crate::geometry::{PixelPoint, PixelRect, WorldPoint, WorldRect};
use crate::map::MapCamera;
use crate::settings::GridSettings;

/// A captured pixel↔world transform: anchor pixel, offset meters, and the
/// current meters-per-pixel rates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    /// The grid anchor projected into container pixels.
    pub anchor_px: PixelPoint,
    /// Grid offset in meters along (X, Y).
    pub offset_m: (f64, f64),
    /// Meters-per-pixel rates at the capture instant.
    pub mpp: Mpp,
}

impl ViewTransform {
    /// Capture the transform for the current view and settings.
    pub fn capture(map: &dyn MapCamera, settings: &GridSettings, mpp: Mpp) -> Self {
        Self {
            anchor_px: map.project(settings.anchor()),
            offset_m: settings.offset_m(),
            mpp,
        }
    }

    /// Convert a container pixel to anchor-relative world meters.
    pub fn pixel_to_world(&self, px: PixelPoint) -> WorldPoint {
        WorldPoint::new(
            (px.x - self.anchor_px.x) * rate(self.mpp.x) - self.offset_m.0,
            (px.y - self.anchor_px.y) * rate(self.mpp.y) - self.offset_m.1,
        )
    }

    /// Convert anchor-relative world meters back to a container pixel.
    pub fn world_to_pixel(&self, world: WorldPoint) -> PixelPoint {
        PixelPoint::new(
            self.anchor_px.x + pixels_from_meters(world.x + self.offset_m.0, self.mpp.x),
            self.anchor_px.y + pixels_from_meters(world.y + self.offset_m.1, self.mpp.y),
        )
    }

    /// Convert a world rectangle to the pixel rectangle that covers it.
    pub fn world_rect_to_pixels(&self, rect: &WorldRect) -> PixelRect {
        let origin = self.world_to_pixel(WorldPoint::new(rect.min_x, rect.min_y));
        PixelRect::new(
            origin.x,
            origin.y,
            pixels_from_meters(rect.width(), self.mpp.x),
            pixels_from_meters(rect.height(), self.mpp.y),
        )
    }
}

#[inline]
fn rate(mpp: f64) -> f64 {
    if mpp == 0.0 { 1.0 } else { mpp }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transform(anchor: PixelPoint, offset_m: (f64, f64), mpp: Mpp) -> ViewTransform {
        ViewTransform {
            anchor_px: anchor,
            offset_m,
            mpp,
        }
    }

    #[test]
    fn pixel_world_round_trip() {
        let t = transform(
            PixelPoint::new(100.0, 50.0),
            (0.3, -0.2),
            Mpp { x: 0.5, y: 2.0 },
        );
        let world = t.pixel_to_world(PixelPoint::new(140.0, 60.0));
        let back = t.world_to_pixel(world);
        assert!((back.x - 140.0).abs() < 1e-9);
        assert!((back.y - 60.0).abs() < 1e-9);
    }

    #[test]
    fn anchor_maps_to_negated_offset() {
        let t = transform(PixelPoint::new(10.0, 20.0), (1.5, 2.5), Mpp { x: 1.0, y: 1.0 });
        let world = t.pixel_to_world(PixelPoint::new(10.0, 20.0));
        assert_eq!(world, WorldPoint::new(-1.5, -2.5));
    }

    #[test]
    fn unit_rate_at_origin_is_identity() {
        let t = transform(PixelPoint::new(0.0, 0.0), (0.0, 0.0), Mpp { x: 1.0, y: 1.0 });
        let world = t.pixel_to_world(PixelPoint::new(23.0, 47.0));
        assert_eq!(world, WorldPoint::new(23.0, 47.0));
    }

    #[test]
    fn zero_rate_is_guarded() {
        let t = transform(PixelPoint::new(0.0, 0.0), (0.0, 0.0), Mpp { x: 0.0, y: 0.0 });
        let world = t.pixel_to_world(PixelPoint::new(5.0, 6.0));
        assert_eq!(world, WorldPoint::new(5.0, 6.0));
        let px = t.world_to_pixel(world);
        assert_eq!(px, PixelPoint::new(5.0, 6.0));
    }

    #[test]
    fn world_rect_to_pixels_scales_extents() {
        let t = transform(PixelPoint::new(0.0, 0.0), (0.0, 0.0), Mpp { x: 2.0, y: 0.5 });
        let rect = WorldRect {
            min_x: 10.0,
            max_x: 30.0,
            min_y: 0.0,
            max_y: 50.0,
        };
        let px = t.world_rect_to_pixels(&rect);
        assert_eq!(px.x, 5.0);
        assert_eq!(px.y, 0.0);
        assert_eq!(px.width, 10.0);
        assert_eq!(px.height, 100.0);
    }
}
