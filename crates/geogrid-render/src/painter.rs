#![forbid(unsafe_code)]

//! The grid painter.
//!
//! Paints the whole overlay for one frame: clear, checkerboard fills (cells
//! mode), grid lines, then the selection rectangle on top. The surface is
//! immediate-mode, so the full region repaints every call; nothing here
//! recomputes geometry — phase, parity, spacing, and the selection rect all
//! arrive precomputed in [`RuntimeState`] and the selection view.

use crate::palette::{
    GRID_LINE_WIDTH, GridPalette, SELECTION_FILL, SELECTION_LINE_WIDTH, SELECTION_STROKE,
};
use crate::surface::Surface;
use geogrid_core::geometry::{PixelPoint, PixelRect};
use geogrid_core::grid::{RenderMode, RuntimeState};
use geogrid_core::settings::GridSettings;

/// Paint one frame of the overlay.
///
/// When the grid is disabled the surface is cleared and nothing else is
/// drawn. `selection_rect` is the precomputed pixel rectangle of an active
/// or committed selection, if any.
pub fn paint(
    surface: &mut dyn Surface,
    runtime: &RuntimeState,
    settings: &GridSettings,
    selection_rect: Option<PixelRect>,
) {
    let size = runtime.surface_size;
    surface.clear(size);
    if !settings.enabled() {
        return;
    }

    let palette = GridPalette::from_opacity(settings.opacity());
    if spacing_is_drawable(runtime.spacing_px_x) && spacing_is_drawable(runtime.spacing_px_y) {
        if runtime.mode == RenderMode::Cells {
            paint_cells(surface, runtime, &palette);
        }
        paint_lines(surface, runtime, &palette);
    }

    if let Some(rect) = selection_rect {
        surface.fill_rect(rect, SELECTION_FILL);
        surface.stroke_rect(rect, SELECTION_STROKE, SELECTION_LINE_WIDTH);
    }
}

/// Tile the checkerboard, starting one tile before phase and running one
/// tile past the far edge so non-zero phase leaves no gap at the borders.
fn paint_cells(surface: &mut dyn Surface, runtime: &RuntimeState, palette: &GridPalette) {
    let size = runtime.surface_size;
    let sx = runtime.spacing_px_x;
    let sy = runtime.spacing_px_y;
    let cols = (size.width / sx).ceil() as i32 + 2;
    let rows = (size.height / sy).ceil() as i32 + 2;
    let base = i32::from(runtime.parity_x) + i32::from(runtime.parity_y);

    for row in -1..rows {
        for col in -1..cols {
            let x = f64::from(col) * sx + runtime.phase_x;
            let y = f64::from(row) * sy + runtime.phase_y;
            let dark = (base + col + row).rem_euclid(2) == 0;
            let color = if dark { palette.dark } else { palette.light };
            surface.fill_rect(PixelRect::new(x, y, sx, sy), color);
        }
    }
}

/// Stroke the grid lines at the aligned phase.
fn paint_lines(surface: &mut dyn Surface, runtime: &RuntimeState, palette: &GridPalette) {
    let size = runtime.surface_size;
    let sx = runtime.spacing_px_x;
    let sy = runtime.spacing_px_y;

    let mut x = runtime.phase_x;
    while x <= size.width + sx {
        surface.stroke_line(
            PixelPoint::new(x, 0.0),
            PixelPoint::new(x, size.height),
            palette.line,
            GRID_LINE_WIDTH,
        );
        x += sx;
    }

    let mut y = runtime.phase_y;
    while y <= size.height + sy {
        surface.stroke_line(
            PixelPoint::new(0.0, y),
            PixelPoint::new(size.width, y),
            palette.line,
            GRID_LINE_WIDTH,
        );
        y += sy;
    }
}

/// Degenerate pixel spacing would make the tiling loops unbounded; skip
/// painting rather than hang.
#[inline]
fn spacing_is_drawable(spacing_px: f64) -> bool {
    spacing_px.is_finite() && spacing_px > 0.0
}
