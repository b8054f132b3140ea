#![forbid(unsafe_code)]

//! Core: geometry, geodesy, grid alignment, and map capabilities.
//!
//! # Role in geogrid
//! `geogrid-core` is the vocabulary layer. It owns the coordinate math that
//! keeps a discrete, screen-stable grid consistent with a continuously
//! changing geographic projection, plus the canonical event types and the
//! capability traits the host map is accessed through.
//!
//! # Primary responsibilities
//! - **Geometry**: pixel/world/geographic points, rects, snapped world
//!   extents.
//! - **Geodesy**: haversine distance and live meters-per-pixel sampling.
//! - **Grid alignment**: phase and checkerboard parity relative to the
//!   anchor, density-based render-mode selection, the per-frame
//!   [`RuntimeState`].
//! - **Capabilities**: [`MapCamera`], [`MapGestures`], and the gesture
//!   snapshot used while a selection drag owns the pointer.
//!
//! # How it fits in the system
//! `geogrid-render` paints from the state computed here and
//! `geogrid-runtime` drives the recomputation; neither re-derives geometry.
//! Everything in this crate is a pure function over explicit state so it
//! tests without a display surface or a real map.

pub mod event;
pub mod geodesy;
pub mod geometry;
pub mod grid;
pub mod map;
pub mod settings;
pub mod transform;

pub use event::{Event, KeyCode, KeyEvent, Modifiers, PointerButton, PointerEvent, PointerKind};
pub use geodesy::{EARTH_RADIUS_M, Mpp, haversine_m, meters_per_pixel, pixels_from_meters};
pub use geometry::{GeoPoint, PixelPoint, PixelRect, SurfaceSize, WorldPoint, WorldRect};
pub use grid::{MAX_CELLS, MAX_LINES, MIN_CELL_PX, RenderMode, RuntimeState, decide, parity, phase};
pub use map::{Gesture, GestureSnapshot, MapAdapter, MapCamera, MapGestures};
pub use settings::{GridSettings, MIN_SPACING_M, OPACITY_RANGE, SettingsUpdate};
pub use transform::ViewTransform;
