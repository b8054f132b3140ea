#![forbid(unsafe_code)]

//! Paint kernel for the geogrid overlay.
//!
//! # Role in geogrid
//! `geogrid-render` turns already-computed grid state into draw commands.
//! It is deliberately dumb: no geometry derivation, no scheduling, no input —
//! just clear-then-draw over the [`Surface`] capability.
//!
//! # This crate provides
//! - [`Surface`]: the immediate-mode 2D raster capability the host adapts
//!   its canvas (or test recorder) to.
//! - [`Rgba`] and [`GridPalette`]: opacity-derived overlay colors.
//! - [`painter::paint`]: one full frame — checkerboard, grid lines, and the
//!   selection rectangle on top.
//!
//! # How it fits in the system
//! `geogrid-runtime` computes `RuntimeState` and the selection rectangle in
//! its event handlers, then calls [`painter::paint`] from the scheduled
//! frame. Tests drive the painter against the recording surface in
//! `geogrid-harness`.

pub mod painter;
pub mod palette;
pub mod surface;

pub use painter::paint;
pub use palette::{
    GRID_LINE_WIDTH, GridPalette, SELECTION_FILL, SELECTION_LINE_WIDTH, SELECTION_STROKE,
};
pub use surface::{Rgba, Surface};
