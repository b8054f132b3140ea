#![forbid(unsafe_code)]

//! geogrid: a geographically-anchored measurement-grid overlay engine.
//!
//! Overlays a meter-true, grid-snapped measurement grid on a pannable,
//! zoomable map surface and reports the real-world size of a drag-selected
//! rectangle live. The engine owns the hard part — keeping a discrete,
//! screen-stable grid consistent with a continuously changing, distortion-
//! prone geographic projection at interactive frame rates — and consumes the
//! map, the drawing surface, and the frame scheduler as capabilities.
//!
//! # Layers
//! - [`geogrid_core`]: geometry, geodesy, grid alignment, map capabilities.
//! - [`geogrid_render`]: the immediate-mode paint kernel.
//! - [`geogrid_runtime`]: the overlay orchestrator and selection engine.
//!
//! # Quick start
//!
//! ```
//! use geogrid::prelude::*;
//!
//! # use geogrid_core::geometry::{GeoPoint, PixelPoint, PixelRect, SurfaceSize};
//! # struct HostMap;
//! # impl MapCamera for HostMap {
//! #     fn project(&self, g: GeoPoint) -> PixelPoint { PixelPoint::new(g.lng, g.lat) }
//! #     fn unproject(&self, p: PixelPoint) -> GeoPoint { GeoPoint::new(p.x, p.y) }
//! #     fn center(&self) -> GeoPoint { GeoPoint::new(0.0, 0.0) }
//! #     fn container_size(&self) -> SurfaceSize { SurfaceSize::new(800.0, 600.0) }
//! # }
//! # impl MapGestures for HostMap {
//! #     fn is_enabled(&self, _: Gesture) -> bool { true }
//! #     fn set_enabled(&mut self, _: Gesture, _: bool) {}
//! # }
//! # struct HostSurface;
//! # impl Surface for HostSurface {
//! #     fn resize(&mut self, _: SurfaceSize, _: f64) {}
//! #     fn clear(&mut self, _: SurfaceSize) {}
//! #     fn fill_rect(&mut self, _: PixelRect, _: Rgba) {}
//! #     fn stroke_rect(&mut self, _: PixelRect, _: Rgba, _: f64) {}
//! #     fn stroke_line(&mut self, _: PixelPoint, _: PixelPoint, _: Rgba, _: f64) {}
//! # }
//! # struct HostScheduler(u64);
//! # impl FrameScheduler for HostScheduler {
//! #     fn request(&mut self) -> FrameToken { self.0 += 1; FrameToken(self.0) }
//! #     fn cancel(&mut self, _: FrameToken) {}
//! # }
//! let mut overlay = GridOverlay::new(
//!     HostMap,
//!     HostSurface,
//!     HostScheduler(0),
//!     GridSettings::default(),
//! );
//! overlay.on_ready(1.0);
//! overlay.apply_settings(SettingsUpdate::new().enabled(true).spacing_m(10.0));
//! overlay.handle_event(Event::MapRender);
//! overlay.on_frame();
//! ```

pub mod error;

pub use error::{OverlayError, Result};

pub use geogrid_core as core;
pub use geogrid_render as render;
pub use geogrid_runtime as runtime;

/// Everything a host adapter typically needs.
pub mod prelude {
    pub use crate::error::{OverlayError, Result};
    pub use geogrid_core::event::{
        Event, KeyCode, KeyEvent, Modifiers, PointerButton, PointerEvent, PointerKind,
    };
    pub use geogrid_core::geometry::{GeoPoint, PixelPoint, PixelRect, SurfaceSize};
    pub use geogrid_core::grid::{RenderMode, RuntimeState};
    pub use geogrid_core::map::{Gesture, MapAdapter, MapCamera, MapGestures};
    pub use geogrid_core::settings::{GridSettings, SettingsUpdate};
    pub use geogrid_render::surface::{Rgba, Surface};
    pub use geogrid_runtime::overlay::GridOverlay;
    pub use geogrid_runtime::scheduler::{EventSource, FrameScheduler, FrameToken};
    pub use geogrid_runtime::selection::{SelectionLabel, SelectionState};
}
