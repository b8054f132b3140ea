#![forbid(unsafe_code)]

//! Opacity-derived grid colors.

use crate::surface::Rgba;

/// Fill color of the selection rectangle.
pub const SELECTION_FILL: Rgba = Rgba::new(0, 150, 255, 0.15);

/// Stroke color of the selection rectangle.
pub const SELECTION_STROKE: Rgba = Rgba::new(0, 150, 255, 0.9);

/// Stroke width of the selection rectangle, in CSS pixels.
pub const SELECTION_LINE_WIDTH: f64 = 2.0;

/// Stroke width of grid lines, in CSS pixels.
pub const GRID_LINE_WIDTH: f64 = 1.0;

/// The three colors the grid is painted with, derived from the configured
/// opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPalette {
    /// Light checkerboard fill.
    pub light: Rgba,
    /// Dark checkerboard fill.
    pub dark: Rgba,
    /// Grid line stroke.
    pub line: Rgba,
}

impl GridPalette {
    /// Derive the palette from an opacity in `[0.1, 0.9]`.
    ///
    /// The value is clamped once more here so a palette built from a raw
    /// float still lands in the intended alpha range.
    #[must_use]
    pub fn from_opacity(opacity: f64) -> Self {
        let a = opacity.clamp(0.1, 0.9);
        Self {
            light: Rgba::WHITE.with_alpha(0.25 * a),
            dark: Rgba::BLACK.with_alpha(0.15 * a),
            line: Rgba::WHITE.with_alpha(0.30 * a),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimum_opacity_alphas() {
        let p = GridPalette::from_opacity(0.1);
        assert!((p.dark.a - 0.015).abs() < 1e-12);
        assert!((p.light.a - 0.025).abs() < 1e-12);
        assert!((p.line.a - 0.03).abs() < 1e-12);
    }

    #[test]
    fn clamps_out_of_range_opacity() {
        let low = GridPalette::from_opacity(-2.0);
        assert_eq!(low, GridPalette::from_opacity(0.1));
        let high = GridPalette::from_opacity(7.0);
        assert_eq!(high, GridPalette::from_opacity(0.9));
    }

    #[test]
    fn light_is_white_dark_is_black() {
        let p = GridPalette::from_opacity(0.5);
        assert_eq!((p.light.r, p.light.g, p.light.b), (255, 255, 255));
        assert_eq!((p.dark.r, p.dark.g, p.dark.b), (0, 0, 0));
        assert_eq!((p.line.r, p.line.g, p.line.b), (255, 255, 255));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn alphas_stay_ordered_and_bounded(opacity in -10.0f64..10.0) {
                let p = GridPalette::from_opacity(opacity);
                prop_assert!(p.dark.a < p.light.a);
                prop_assert!(p.light.a < p.line.a);
                for alpha in [p.dark.a, p.light.a, p.line.a] {
                    prop_assert!(alpha >= 0.015);
                    prop_assert!(alpha <= 0.27);
                }
            }
        }
    }
}
