#![forbid(unsafe_code)]

//! Pointer-driven, grid-snapped rectangle selection.
//!
//! The engine is a three-state machine — Idle, Dragging, Committed — encoded
//! by the `active`/`exists` flags. While dragging it owns the pointer: map
//! gestures are snapshotted and disabled at drag start and restored to their
//! exact pre-drag state at release or cancel.
//!
//! Every move re-reads settings and re-derives the world coordinates of both
//! corners from their pixels, so a live spacing or offset change mid-drag
//! re-snaps the rectangle immediately. Extents come from the snapped world
//! rect, never from raw pixel distance, so the reported size is always an
//! exact multiple of the spacing.

use geogrid_core::geodesy::Mpp;
use geogrid_core::geometry::{PixelPoint, PixelRect, WorldRect};
use geogrid_core::map::{GestureSnapshot, MapCamera, MapGestures};
use geogrid_core::settings::GridSettings;
use geogrid_core::transform::ViewTransform;
use tracing::debug;

/// Live selection data, readable through the telemetry surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SelectionState {
    /// A drag is in progress.
    pub active: bool,
    /// A selection has been committed.
    pub exists: bool,
    /// Pixel where the drag started.
    pub start_px: Option<PixelPoint>,
    /// Most recent pointer pixel.
    pub current_px: Option<PixelPoint>,
    /// Snapped selection rectangle in pixels, for drawing.
    pub rect_px: Option<PixelRect>,
    /// Snapped selection extent in world meters.
    pub world: Option<WorldRect>,
    /// Selection width in meters (a multiple of the spacing).
    pub width_m: f64,
    /// Selection height in meters (a multiple of the spacing).
    pub height_m: f64,
}

/// Size label for the external label display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionLabel {
    pub width_m: f64,
    pub height_m: f64,
    /// Center of the pixel rectangle, where the label is placed.
    pub center_px: PixelPoint,
}

impl SelectionLabel {
    /// Human-readable size, e.g. `12.0m x 30.0m`.
    #[must_use]
    pub fn text(&self) -> String {
        format!("{:.1}m x {:.1}m", self.width_m, self.height_m)
    }
}

/// The selection state machine.
#[derive(Debug, Default)]
pub struct SelectionEngine {
    state: SelectionState,
    gestures: Option<GestureSnapshot>,
}

impl SelectionEngine {
    /// Create an idle engine.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current selection state.
    #[inline]
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// The rectangle to draw, present while dragging or committed.
    #[inline]
    pub fn visible_rect(&self) -> Option<PixelRect> {
        if self.state.active || self.state.exists {
            self.state.rect_px
        } else {
            None
        }
    }

    /// Size label for the external label display, present while dragging or
    /// committed.
    pub fn label(&self) -> Option<SelectionLabel> {
        if !(self.state.active || self.state.exists) {
            return None;
        }
        let rect = self.state.rect_px?;
        Some(SelectionLabel {
            width_m: self.state.width_m,
            height_m: self.state.height_m,
            center_px: rect.center(),
        })
    }

    /// Begin a drag at `at`.
    ///
    /// Only valid while the grid is enabled and no drag is active. Discards
    /// any committed selection, then snapshots and disables the conflicting
    /// map gestures for the duration of the drag.
    pub fn pointer_down(
        &mut self,
        at: PixelPoint,
        map: &mut (impl MapCamera + MapGestures),
        settings: &GridSettings,
        mpp: Mpp,
    ) -> bool {
        if !settings.enabled() || self.state.active {
            return false;
        }
        self.state = SelectionState::default();
        self.gestures = Some(GestureSnapshot::capture_and_disable(map));
        self.state.active = true;
        self.state.start_px = Some(at);
        self.state.current_px = Some(at);
        let start_world = ViewTransform::capture(map, settings, mpp).pixel_to_world(at);
        debug!(x_m = start_world.x, y_m = start_world.y, "selection drag started");
        true
    }

    /// Update the drag with a new pointer position.
    ///
    /// Settings are read at this instant, never cached from drag start.
    pub fn pointer_move(
        &mut self,
        at: PixelPoint,
        map: &impl MapCamera,
        settings: &GridSettings,
        mpp: Mpp,
    ) -> bool {
        if !self.state.active || !settings.enabled() {
            return false;
        }
        let Some(start_px) = self.state.start_px else {
            return false;
        };

        let transform = ViewTransform::capture(map, settings, mpp);
        let start_world = transform.pixel_to_world(start_px);
        let current_world = transform.pixel_to_world(at);
        let world = WorldRect::snapped(start_world, current_world, settings.spacing_m());

        self.state.current_px = Some(at);
        self.state.world = Some(world);
        self.state.rect_px = Some(transform.world_rect_to_pixels(&world));
        self.state.width_m = world.width();
        self.state.height_m = world.height();
        true
    }

    /// Finish the drag.
    ///
    /// Commits iff the snapped extent is strictly positive on both axes;
    /// otherwise the engine returns to Idle with all fields discarded.
    /// Either way the pre-drag gesture state is restored.
    pub fn pointer_up(&mut self, map: &mut (impl MapGestures)) -> bool {
        if !self.state.active {
            return false;
        }
        self.state.active = false;
        let committed =
            self.state.world.is_some() && self.state.width_m > 0.0 && self.state.height_m > 0.0;
        if committed {
            self.state.exists = true;
            debug!(
                width_m = self.state.width_m,
                height_m = self.state.height_m,
                "selection committed"
            );
        } else {
            self.state = SelectionState::default();
            debug!("selection released with zero extent");
        }
        if let Some(snapshot) = self.gestures.take() {
            snapshot.restore(map);
        }
        true
    }

    /// Cancel from any state, discarding all selection data.
    ///
    /// Restores gestures if a drag was in progress. Returns whether anything
    /// changed.
    pub fn cancel(&mut self, map: &mut (impl MapGestures)) -> bool {
        if let Some(snapshot) = self.gestures.take() {
            snapshot.restore(map);
        }
        let changed = self.state != SelectionState::default();
        if changed {
            debug!("selection cancelled");
        }
        self.state = SelectionState::default();
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geogrid_core::geometry::{GeoPoint, SurfaceSize};
    use geogrid_core::map::Gesture;
    use geogrid_core::settings::SettingsUpdate;

    /// Identity-projection map: one pixel is one meter, anchor pixel space
    /// equals geographic space scaled arbitrarily. Good enough for the state
    /// machine; the real projection paths are covered in the harness tests.
    struct FlatMap {
        pan: bool,
        rotate: bool,
        scroll_zoom: bool,
    }

    impl FlatMap {
        fn new() -> Self {
            Self {
                pan: true,
                rotate: true,
                scroll_zoom: true,
            }
        }
    }

    impl MapCamera for FlatMap {
        fn project(&self, geo: GeoPoint) -> PixelPoint {
            PixelPoint::new(geo.lng, geo.lat)
        }

        fn unproject(&self, px: PixelPoint) -> GeoPoint {
            GeoPoint::new(px.x, px.y)
        }

        fn center(&self) -> GeoPoint {
            GeoPoint::new(0.0, 0.0)
        }

        fn container_size(&self) -> SurfaceSize {
            SurfaceSize::new(800.0, 600.0)
        }
    }

    impl MapGestures for FlatMap {
        fn is_enabled(&self, gesture: Gesture) -> bool {
            match gesture {
                Gesture::Pan => self.pan,
                Gesture::Rotate => self.rotate,
                Gesture::ScrollZoom => self.scroll_zoom,
            }
        }

        fn set_enabled(&mut self, gesture: Gesture, enabled: bool) {
            match gesture {
                Gesture::Pan => self.pan = enabled,
                Gesture::Rotate => self.rotate = enabled,
                Gesture::ScrollZoom => self.scroll_zoom = enabled,
            }
        }
    }

    fn settings(spacing_m: f64) -> GridSettings {
        let mut s = GridSettings::default();
        s.apply(
            SettingsUpdate::new()
                .enabled(true)
                .spacing_m(spacing_m)
                .anchor(GeoPoint::new(0.0, 0.0)),
        );
        s
    }

    const UNIT: Mpp = Mpp { x: 1.0, y: 1.0 };

    #[test]
    fn drag_snaps_outward_and_commits() {
        let mut map = FlatMap::new();
        let mut engine = SelectionEngine::new();
        let s = settings(10.0);

        assert!(engine.pointer_down(PixelPoint::new(5.0, 5.0), &mut map, &s, UNIT));
        assert!(engine.pointer_move(PixelPoint::new(23.0, 47.0), &map, &s, UNIT));
        assert!(engine.pointer_up(&mut map));

        let state = engine.state();
        assert!(state.exists);
        assert!(!state.active);
        let world = state.world.unwrap();
        assert_eq!(world.min_x, 0.0);
        assert_eq!(world.max_x, 30.0);
        assert_eq!(world.min_y, 0.0);
        assert_eq!(world.max_y, 50.0);
        assert_eq!(state.width_m, 30.0);
        assert_eq!(state.height_m, 50.0);
    }

    #[test]
    fn drag_disables_then_restores_gestures() {
        let mut map = FlatMap::new();
        map.rotate = false;
        let mut engine = SelectionEngine::new();
        let s = settings(10.0);

        engine.pointer_down(PixelPoint::new(0.0, 0.0), &mut map, &s, UNIT);
        assert!(!map.pan);
        assert!(!map.rotate);
        assert!(!map.scroll_zoom);

        engine.pointer_move(PixelPoint::new(15.0, 15.0), &map, &s, UNIT);
        engine.pointer_up(&mut map);
        assert!(map.pan);
        assert!(!map.rotate, "pre-drag disabled gesture must stay disabled");
        assert!(map.scroll_zoom);
    }

    #[test]
    fn release_without_move_returns_to_idle() {
        let mut map = FlatMap::new();
        let mut engine = SelectionEngine::new();
        let s = settings(10.0);

        engine.pointer_down(PixelPoint::new(5.0, 5.0), &mut map, &s, UNIT);
        engine.pointer_up(&mut map);
        assert_eq!(*engine.state(), SelectionState::default());
        assert!(map.pan, "gestures restored even without a commit");
    }

    #[test]
    fn disabled_grid_rejects_drag_start() {
        let mut map = FlatMap::new();
        let mut engine = SelectionEngine::new();
        let s = GridSettings::default();
        assert!(!engine.pointer_down(PixelPoint::new(5.0, 5.0), &mut map, &s, UNIT));
        assert!(map.pan, "gestures untouched when the drag never starts");
    }

    #[test]
    fn reentrant_down_is_ignored() {
        let mut map = FlatMap::new();
        let mut engine = SelectionEngine::new();
        let s = settings(10.0);
        engine.pointer_down(PixelPoint::new(5.0, 5.0), &mut map, &s, UNIT);
        assert!(!engine.pointer_down(PixelPoint::new(8.0, 8.0), &mut map, &s, UNIT));
        assert_eq!(engine.state().start_px, Some(PixelPoint::new(5.0, 5.0)));
    }

    #[test]
    fn move_without_drag_is_ignored() {
        let map = FlatMap::new();
        let mut engine = SelectionEngine::new();
        let s = settings(10.0);
        assert!(!engine.pointer_move(PixelPoint::new(5.0, 5.0), &map, &s, UNIT));
    }

    #[test]
    fn live_spacing_change_resnaps_both_corners() {
        let mut map = FlatMap::new();
        let mut engine = SelectionEngine::new();
        let coarse = settings(10.0);
        let fine = settings(5.0);

        engine.pointer_down(PixelPoint::new(5.0, 5.0), &mut map, &coarse, UNIT);
        engine.pointer_move(PixelPoint::new(23.0, 47.0), &map, &coarse, UNIT);
        assert_eq!(engine.state().width_m, 30.0);

        // Spacing changed mid-drag: the next move re-reads settings and
        // re-snaps from the original start pixel.
        engine.pointer_move(PixelPoint::new(23.0, 47.0), &map, &fine, UNIT);
        let world = engine.state().world.unwrap();
        assert_eq!(world.min_x, 5.0);
        assert_eq!(world.max_x, 25.0);
        assert_eq!(engine.state().width_m, 20.0);
        assert_eq!(engine.state().height_m, 45.0);
    }

    #[test]
    fn cancel_mid_drag_restores_and_clears() {
        let mut map = FlatMap::new();
        let mut engine = SelectionEngine::new();
        let s = settings(10.0);

        engine.pointer_down(PixelPoint::new(5.0, 5.0), &mut map, &s, UNIT);
        engine.pointer_move(PixelPoint::new(23.0, 47.0), &map, &s, UNIT);
        assert!(engine.cancel(&mut map));
        assert_eq!(*engine.state(), SelectionState::default());
        assert!(map.pan);
        assert!(engine.visible_rect().is_none());
    }

    #[test]
    fn cancel_when_idle_reports_no_change() {
        let mut map = FlatMap::new();
        let mut engine = SelectionEngine::new();
        assert!(!engine.cancel(&mut map));
    }

    #[test]
    fn label_reports_snapped_size_and_center() {
        let mut map = FlatMap::new();
        let mut engine = SelectionEngine::new();
        let s = settings(10.0);

        engine.pointer_down(PixelPoint::new(5.0, 5.0), &mut map, &s, UNIT);
        engine.pointer_move(PixelPoint::new(23.0, 47.0), &map, &s, UNIT);
        let label = engine.label().unwrap();
        assert_eq!(label.text(), "30.0m x 50.0m");
        assert_eq!(label.center_px, PixelPoint::new(15.0, 25.0));
    }

    #[test]
    fn label_absent_when_idle() {
        let engine = SelectionEngine::new();
        assert!(engine.label().is_none());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn committed_extents_are_spacing_multiples(
                sx in -300.0f64..300.0,
                sy in -300.0f64..300.0,
                cx in -300.0f64..300.0,
                cy in -300.0f64..300.0,
                spacing in 0.5f64..50.0,
            ) {
                let mut map = FlatMap::new();
                let mut engine = SelectionEngine::new();
                let s = settings(spacing);

                engine.pointer_down(PixelPoint::new(sx, sy), &mut map, &s, UNIT);
                engine.pointer_move(PixelPoint::new(cx, cy), &map, &s, UNIT);
                engine.pointer_up(&mut map);

                let state = engine.state();
                if state.exists {
                    let tol = 1e-6 * spacing;
                    for extent in [state.width_m, state.height_m] {
                        prop_assert!(extent > 0.0);
                        let rem = (extent / spacing).round() * spacing - extent;
                        prop_assert!(rem.abs() < tol);
                    }
                }
                prop_assert!(map.pan, "gestures always restored after release");
            }
        }
    }
}
