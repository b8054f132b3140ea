#![forbid(unsafe_code)]

//! Map capability traits.
//!
//! The engine never touches a concrete map provider. It depends on two small
//! capabilities — camera math and gesture toggles — and one adapter per
//! provider implements both. `project`/`unproject` must be mutually
//! approximate inverses at a fixed viewport state, and pixel coordinates
//! share the container's coordinate space.

use crate::geometry::{GeoPoint, PixelPoint, SurfaceSize};

/// Camera/projection capability of the host map.
pub trait MapCamera {
    /// Project a geographic coordinate to container pixels.
    fn project(&self, geo: GeoPoint) -> PixelPoint;

    /// Unproject container pixels to a geographic coordinate.
    fn unproject(&self, px: PixelPoint) -> GeoPoint;

    /// Current map center.
    fn center(&self) -> GeoPoint;

    /// CSS-pixel size of the map container.
    fn container_size(&self) -> SurfaceSize;
}

/// A map manipulation behavior that can conflict with a selection drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gesture {
    /// Drag-to-pan.
    Pan,
    /// Drag-to-rotate.
    Rotate,
    /// Wheel zoom.
    ScrollZoom,
}

impl Gesture {
    /// All gestures the selection drag needs exclusive ownership over.
    pub const ALL: [Gesture; 3] = [Gesture::Pan, Gesture::Rotate, Gesture::ScrollZoom];
}

/// Gesture enable/disable capability of the host map.
pub trait MapGestures {
    /// Whether the gesture is currently enabled.
    fn is_enabled(&self, gesture: Gesture) -> bool;

    /// Enable or disable the gesture.
    fn set_enabled(&mut self, gesture: Gesture, enabled: bool);
}

/// Combined map capability the overlay consumes.
pub trait MapAdapter: MapCamera + MapGestures {}

impl<T: MapCamera + MapGestures> MapAdapter for T {}

/// Saved gesture state for the duration of a selection drag.
///
/// Capturing disables every gesture; restoring re-enables only those that
/// were enabled before, so a gesture the host had already turned off is
/// never force-enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureSnapshot {
    pan: bool,
    rotate: bool,
    scroll_zoom: bool,
}

impl GestureSnapshot {
    /// Snapshot the current gesture state and disable all gestures.
    #[must_use]
    pub fn capture_and_disable(map: &mut dyn MapGestures) -> Self {
        let snapshot = Self {
            pan: map.is_enabled(Gesture::Pan),
            rotate: map.is_enabled(Gesture::Rotate),
            scroll_zoom: map.is_enabled(Gesture::ScrollZoom),
        };
        for gesture in Gesture::ALL {
            map.set_enabled(gesture, false);
        }
        snapshot
    }

    /// Restore the captured state, re-enabling only what was enabled.
    pub fn restore(self, map: &mut dyn MapGestures) {
        if self.pan {
            map.set_enabled(Gesture::Pan, true);
        }
        if self.rotate {
            map.set_enabled(Gesture::Rotate, true);
        }
        if self.scroll_zoom {
            map.set_enabled(Gesture::ScrollZoom, true);
        }
    }
}
