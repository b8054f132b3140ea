#![forbid(unsafe_code)]

//! Grid alignment (phase/parity), render-mode selection, and runtime state.
//!
//! The grid is anchored to a geographic point, not to the screen origin, so
//! its pixel alignment must be recomputed on every map movement. Two numbers
//! capture that alignment per axis:
//!
//! - **phase**: the sub-spacing pixel offset of the first grid boundary on
//!   screen, always in `[0, spacing_px)`;
//! - **parity**: which side of the checkerboard the anchor-relative cell
//!   index falls on. Parity is anchor-relative because the screen-relative
//!   cell index shifts continuously under pan — coloring by it would flicker
//!   every frame, while the anchor-relative index only changes when a
//!   spacing boundary is crossed.

use crate::geodesy::Mpp;
use crate::geometry::SurfaceSize;

/// Below this pixel spacing, cells are sub-pixel noise; draw lines only.
pub const MIN_CELL_PX: f64 = 4.0;

/// Cap on checkerboard fill count per frame.
pub const MAX_CELLS: u32 = 40_000;

/// Cap on stroked grid lines per frame.
pub const MAX_LINES: u32 = 500;

/// How the grid is rasterized for the current view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RenderMode {
    /// Checkerboard fills plus grid lines.
    #[default]
    Cells,

    /// Grid lines only.
    Lines,
}

impl RenderMode {
    /// Mode label for logging and telemetry.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cells => "cells",
            Self::Lines => "lines",
        }
    }
}

/// Sub-spacing pixel phase of the grid boundary nearest the screen origin.
///
/// Euclidean modulo of `anchor_px + offset_px` by `spacing_px`, non-negative
/// even for negative inputs. Float `rem_euclid` can round up to the divisor
/// itself for tiny negative dividends; that edge is wrapped back to 0 so the
/// `[0, spacing_px)` invariant holds unconditionally.
pub fn phase(anchor_px: f64, offset_px: f64, spacing_px: f64) -> f64 {
    debug_assert!(spacing_px > 0.0);
    let p = (anchor_px + offset_px).rem_euclid(spacing_px);
    if p >= spacing_px { 0.0 } else { p }
}

/// Checkerboard parity of the grid cell containing the screen origin,
/// relative to the anchor: `floor((anchor_px + offset_px) / spacing_px) mod 2`.
pub fn parity(anchor_px: f64, offset_px: f64, spacing_px: f64) -> u8 {
    debug_assert!(spacing_px > 0.0);
    let index = ((anchor_px + offset_px) / spacing_px).floor();
    index.rem_euclid(2.0) as u8
}

/// Choose the render mode for the current density.
///
/// Checked in priority order: sub-pixel cells, then the fill-count cap, then
/// the line-count cap; everything else (including arbitrarily large spacing)
/// renders as cells.
pub fn decide(spacing_px_x: f64, spacing_px_y: f64, size: SurfaceSize) -> RenderMode {
    if spacing_px_x < MIN_CELL_PX || spacing_px_y < MIN_CELL_PX {
        return RenderMode::Lines;
    }
    let cols = (size.width / spacing_px_x).ceil();
    let rows = (size.height / spacing_px_y).ceil();
    if cols * rows > f64::from(MAX_CELLS) {
        return RenderMode::Lines;
    }
    if cols + rows > f64::from(MAX_LINES) {
        return RenderMode::Lines;
    }
    RenderMode::Cells
}

/// Per-frame derived state of the grid overlay.
///
/// Recomputed wholesale in the handler of every map movement notification;
/// the paint path only reads it and never recomputes geometry itself.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuntimeState {
    /// Local meters-per-pixel rates at the surface center.
    pub mpp: Mpp,
    /// Grid spacing in pixels along X.
    pub spacing_px_x: f64,
    /// Grid spacing in pixels along Y.
    pub spacing_px_y: f64,
    /// Grid offset in pixels along X.
    pub offset_px_x: f64,
    /// Grid offset in pixels along Y.
    pub offset_px_y: f64,
    /// Pixel phase along X, in `[0, spacing_px_x)`.
    pub phase_x: f64,
    /// Pixel phase along Y, in `[0, spacing_px_y)`.
    pub phase_y: f64,
    /// Checkerboard parity along X, `0` or `1`.
    pub parity_x: u8,
    /// Checkerboard parity along Y, `0` or `1`.
    pub parity_y: u8,
    /// Device pixel ratio of the hosting display.
    pub scale_factor: f64,
    /// CSS-pixel size of the drawing surface.
    pub surface_size: SurfaceSize,
    /// Render mode chosen for the current density.
    pub mode: RenderMode,
}

impl Default for RuntimeState {
    fn default() -> Self {
        Self {
            mpp: Mpp::default(),
            spacing_px_x: 10.0,
            spacing_px_y: 10.0,
            offset_px_x: 0.0,
            offset_px_y: 0.0,
            phase_x: 0.0,
            phase_y: 0.0,
            parity_x: 0,
            parity_y: 0,
            scale_factor: 1.0,
            surface_size: SurfaceSize::default(),
            mode: RenderMode::Cells,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_is_non_negative_for_negative_inputs() {
        let p = phase(-3.0, 0.0, 10.0);
        assert_eq!(p, 7.0);
        let p = phase(-23.5, 2.0, 10.0);
        assert!((p - 8.5).abs() < 1e-12);
    }

    #[test]
    fn phase_combines_anchor_and_offset() {
        assert_eq!(phase(12.0, 3.0, 10.0), 5.0);
        assert_eq!(phase(0.0, 0.0, 10.0), 0.0);
    }

    #[test]
    fn parity_tracks_anchor_relative_cell_index() {
        assert_eq!(parity(0.0, 0.0, 10.0), 0);
        assert_eq!(parity(10.0, 0.0, 10.0), 1);
        assert_eq!(parity(20.0, 0.0, 10.0), 0);
        assert_eq!(parity(-10.0, 0.0, 10.0), 1);
        assert_eq!(parity(-0.5, 0.0, 10.0), 1);
    }

    #[test]
    fn parity_toggles_exactly_at_boundary_crossings() {
        let spacing = 10.0;
        let mut toggles = 0u32;
        let mut last = parity(0.05, 0.0, spacing);
        // Sweep anchor in 0.1 px steps across three boundaries.
        let mut v = 0.05;
        while v < 30.0 {
            let p = parity(v, 0.0, spacing);
            if p != last {
                toggles += 1;
                last = p;
            }
            v += 0.1;
        }
        assert_eq!(toggles, 2);
    }

    #[test]
    fn decide_sub_pixel_spacing_forces_lines() {
        // 1 m spacing at 1 m/px: spacing is 1 px, below the 4 px floor.
        let mode = decide(1.0, 1.0, SurfaceSize::new(800.0, 600.0));
        assert_eq!(mode, RenderMode::Lines);
    }

    #[test]
    fn decide_moderate_density_yields_cells() {
        // 10 m spacing at 1 m/px on 800x600: 80x60 = 4800 cells, 140 lines.
        let mode = decide(10.0, 10.0, SurfaceSize::new(800.0, 600.0));
        assert_eq!(mode, RenderMode::Cells);
    }

    #[test]
    fn decide_cell_count_cap_forces_lines() {
        // 4 px spacing passes the sub-pixel check but 500*375 > 40000.
        let mode = decide(4.0, 4.0, SurfaceSize::new(2000.0, 1500.0));
        assert_eq!(mode, RenderMode::Lines);
    }

    #[test]
    fn decide_line_count_cap_forces_lines() {
        // 8 px spacing on a wide short surface: cells are under the cap but
        // cols + rows = 500 + 13 exceeds the stroke budget.
        let mode = decide(8.0, 8.0, SurfaceSize::new(4000.0, 100.0));
        assert_eq!(mode, RenderMode::Lines);
    }

    #[test]
    fn decide_very_large_spacing_yields_cells() {
        let mode = decide(5000.0, 5000.0, SurfaceSize::new(800.0, 600.0));
        assert_eq!(mode, RenderMode::Cells);
    }

    #[test]
    fn mode_labels() {
        assert_eq!(RenderMode::Cells.as_str(), "cells");
        assert_eq!(RenderMode::Lines.as_str(), "lines");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn phase_stays_in_range(
                anchor in -1e6f64..1e6,
                offset in -1e4f64..1e4,
                spacing in 0.001f64..1e4,
            ) {
                let p = phase(anchor, offset, spacing);
                prop_assert!(p >= 0.0);
                prop_assert!(p < spacing);
            }

            #[test]
            fn parity_is_binary(
                anchor in -1e6f64..1e6,
                offset in -1e4f64..1e4,
                spacing in 0.001f64..1e4,
            ) {
                prop_assert!(parity(anchor, offset, spacing) <= 1);
            }

            #[test]
            fn decide_below_min_cell_is_always_lines(
                spacing_x in 0.001f64..3.999,
                spacing_y in 0.001f64..1e4,
                width in 1.0f64..4000.0,
                height in 1.0f64..4000.0,
            ) {
                let mode = decide(spacing_x, spacing_y, SurfaceSize::new(width, height));
                prop_assert_eq!(mode, RenderMode::Lines);
            }
        }
    }
}
