#![forbid(unsafe_code)]

//! Test doubles and fixtures for geogrid.
//!
//! # Role in geogrid
//! Everything the engine consumes is a capability, so everything it consumes
//! can be faked. This crate holds the shared fakes the other crates drive
//! their tests with:
//!
//! - [`FakeMap`] — a deterministic equirectangular camera anchored at the
//!   equator, where the configured meters-per-pixel rate is reproduced
//!   (within float rounding) by the live haversine sampling, plus gesture
//!   toggles.
//! - [`RecordingSurface`] — records every draw command for assertion.
//! - [`ManualScheduler`] — hands out frame tokens and remembers requests and
//!   cancellations; tests fire frames by calling the overlay directly.
//! - [`ScriptedEvents`] — a pull-based event source over a fixed script.

use std::collections::VecDeque;

use geogrid_core::event::Event;
use geogrid_core::geodesy::EARTH_RADIUS_M;
use geogrid_core::geometry::{GeoPoint, PixelPoint, PixelRect, SurfaceSize};
use geogrid_core::map::{Gesture, MapCamera, MapGestures};
use geogrid_render::surface::{Rgba, Surface};
use geogrid_runtime::scheduler::{EventSource, FrameScheduler, FrameToken};

/// A deterministic flat-Earth map camera.
///
/// The projection is equirectangular around a camera center on the equator,
/// scaled so one pixel covers `mpp` meters on both axes. Sampling the
/// projection with one-pixel deltas (the way the engine measures
/// meters-per-pixel) recovers `mpp` to within a few ulps.
#[derive(Debug, Clone)]
pub struct FakeMap {
    center: GeoPoint,
    mpp: f64,
    size: SurfaceSize,
    pan: bool,
    rotate: bool,
    scroll_zoom: bool,
}

impl Default for FakeMap {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeMap {
    /// An 800×600 camera at 1 m/px, centered on the equator.
    #[must_use]
    pub fn new() -> Self {
        Self::with_mpp(1.0)
    }

    /// An 800×600 equator camera with the given meters-per-pixel rate.
    #[must_use]
    pub fn with_mpp(mpp: f64) -> Self {
        Self {
            center: GeoPoint::new(0.0, 0.0),
            mpp,
            size: SurfaceSize::new(800.0, 600.0),
            pan: true,
            rotate: true,
            scroll_zoom: true,
        }
    }

    /// Change the container size.
    pub fn set_size(&mut self, size: SurfaceSize) {
        self.size = size;
    }

    /// Pan the camera by a pixel delta. Fixed geographic points shift by the
    /// negated delta on screen.
    pub fn pan_by(&mut self, dx_px: f64, dy_px: f64) {
        let deg = self.deg_per_px();
        self.center.lng += dx_px * deg;
        self.center.lat -= dy_px * deg;
    }

    fn deg_per_px(&self) -> f64 {
        (self.mpp / EARTH_RADIUS_M).to_degrees()
    }
}

impl MapCamera for FakeMap {
    fn project(&self, geo: GeoPoint) -> PixelPoint {
        let deg = self.deg_per_px();
        let c = self.size.center();
        PixelPoint::new(
            c.x + (geo.lng - self.center.lng) / deg,
            c.y - (geo.lat - self.center.lat) / deg,
        )
    }

    fn unproject(&self, px: PixelPoint) -> GeoPoint {
        let deg = self.deg_per_px();
        let c = self.size.center();
        GeoPoint::new(
            self.center.lng + (px.x - c.x) * deg,
            self.center.lat - (px.y - c.y) * deg,
        )
    }

    fn center(&self) -> GeoPoint {
        self.center
    }

    fn container_size(&self) -> SurfaceSize {
        self.size
    }
}

impl MapGestures for FakeMap {
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

/// One recorded draw command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawOp {
    Resize {
        size: SurfaceSize,
        scale_factor: f64,
    },
    Clear {
        size: SurfaceSize,
    },
    FillRect {
        rect: PixelRect,
        color: Rgba,
    },
    StrokeRect {
        rect: PixelRect,
        color: Rgba,
        line_width: f64,
    },
    StrokeLine {
        from: PixelPoint,
        to: PixelPoint,
        color: Rgba,
        line_width: f64,
    },
}

/// A surface that records every command it receives.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    /// An empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded commands, in order.
    #[inline]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Forget everything recorded so far.
    pub fn reset(&mut self) {
        self.ops.clear();
    }

    /// Number of filled rectangles.
    pub fn fill_count(&self) -> usize {
        self.fills().len()
    }

    /// Number of stroked line segments.
    pub fn line_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::StrokeLine { .. }))
            .count()
    }

    /// Number of full-surface clears.
    pub fn clear_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Clear { .. }))
            .count()
    }

    /// Every filled rectangle with its color, in draw order.
    pub fn fills(&self) -> Vec<(PixelRect, Rgba)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillRect { rect, color } => Some((*rect, *color)),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn resize(&mut self, size: SurfaceSize, scale_factor: f64) {
        self.ops.push(DrawOp::Resize { size, scale_factor });
    }

    fn clear(&mut self, size: SurfaceSize) {
        self.ops.push(DrawOp::Clear { size });
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Rgba) {
        self.ops.push(DrawOp::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: PixelRect, color: Rgba, line_width: f64) {
        self.ops.push(DrawOp::StrokeRect {
            rect,
            color,
            line_width,
        });
    }

    fn stroke_line(&mut self, from: PixelPoint, to: PixelPoint, color: Rgba, line_width: f64) {
        self.ops.push(DrawOp::StrokeLine {
            from,
            to,
            color,
            line_width,
        });
    }
}

/// A scheduler that records requests and cancellations.
///
/// Tokens are handed out sequentially. Tests "fire" a frame by calling the
/// overlay's paint entry point themselves.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next: u64,
    requested: Vec<FrameToken>,
    cancelled: Vec<FrameToken>,
}

impl ManualScheduler {
    /// A scheduler with no history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every token handed out, in order.
    #[inline]
    pub fn requested(&self) -> &[FrameToken] {
        &self.requested
    }

    /// Every token cancelled, in order.
    #[inline]
    pub fn cancelled(&self) -> &[FrameToken] {
        &self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request(&mut self) -> FrameToken {
        let token = FrameToken(self.next);
        self.next += 1;
        self.requested.push(token);
        token
    }

    fn cancel(&mut self, token: FrameToken) {
        self.cancelled.push(token);
    }
}

/// A fixed script of events, drained front to back.
#[derive(Debug, Default)]
pub struct ScriptedEvents {
    queue: VecDeque<Event>,
}

impl ScriptedEvents {
    /// Build a source over the given events.
    pub fn new(events: impl IntoIterator<Item = Event>) -> Self {
        Self {
            queue: events.into_iter().collect(),
        }
    }
}

impl EventSource for ScriptedEvents {
    fn next_event(&mut self) -> Option<Event> {
        self.queue.pop_front()
    }
}
