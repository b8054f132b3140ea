#![forbid(unsafe_code)]

//! Grid settings and the partial-update API the external controls drive.
//!
//! The core never mutates settings on its own; every change flows through
//! [`SettingsUpdate`]. Reads are clamped at this boundary so degenerate
//! values (zero spacing, out-of-range opacity) cannot reach the grid math
//! even if upstream validation misses them.

use crate::geometry::GeoPoint;

/// Smallest permitted grid spacing in meters.
pub const MIN_SPACING_M: f64 = 0.1;

/// Permitted opacity range.
pub const OPACITY_RANGE: (f64, f64) = (0.1, 0.9);

/// User-facing grid configuration.
///
/// Owned by the overlay, mutated only through [`GridSettings::apply`]; the
/// painting and selection paths read it fresh at point of use.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSettings {
    enabled: bool,
    spacing_m: f64,
    offset_x_cm: f64,
    offset_y_cm: f64,
    opacity: f64,
    anchor: GeoPoint,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            spacing_m: 1.0,
            offset_x_cm: 0.0,
            offset_y_cm: 0.0,
            opacity: 0.4,
            anchor: GeoPoint::new(127.0, 37.5),
        }
    }
}

impl GridSettings {
    /// Whether the grid (and therefore selection) is enabled.
    #[inline]
    pub const fn enabled(&self) -> bool {
        self.enabled
    }

    /// Grid spacing in meters, clamped to at least [`MIN_SPACING_M`].
    ///
    /// Non-finite values also collapse to the minimum so the pixel-spacing
    /// math downstream never sees NaN.
    #[inline]
    pub fn spacing_m(&self) -> f64 {
        if self.spacing_m.is_finite() {
            self.spacing_m.max(MIN_SPACING_M)
        } else {
            MIN_SPACING_M
        }
    }

    /// Grid offset in meters along (X, Y), converted from the stored
    /// centimeter values.
    #[inline]
    pub fn offset_m(&self) -> (f64, f64) {
        (self.offset_x_cm / 100.0, self.offset_y_cm / 100.0)
    }

    /// Overlay opacity, clamped to [`OPACITY_RANGE`].
    #[inline]
    pub fn opacity(&self) -> f64 {
        let (lo, hi) = OPACITY_RANGE;
        if self.opacity.is_finite() {
            self.opacity.clamp(lo, hi)
        } else {
            lo
        }
    }

    /// Geographic anchor the grid is aligned to.
    #[inline]
    pub const fn anchor(&self) -> GeoPoint {
        self.anchor
    }

    /// Re-anchor the grid (used by the anchor-reset control).
    #[inline]
    pub fn set_anchor(&mut self, anchor: GeoPoint) {
        self.anchor = anchor;
    }

    /// Merge a partial update into the settings.
    pub fn apply(&mut self, update: SettingsUpdate) {
        if let Some(enabled) = update.enabled {
            self.enabled = enabled;
        }
        if let Some(spacing_m) = update.spacing_m {
            self.spacing_m = spacing_m;
        }
        if let Some(offset_x_cm) = update.offset_x_cm {
            self.offset_x_cm = offset_x_cm;
        }
        if let Some(offset_y_cm) = update.offset_y_cm {
            self.offset_y_cm = offset_y_cm;
        }
        if let Some(opacity) = update.opacity {
            self.opacity = opacity;
        }
        if let Some(anchor) = update.anchor {
            self.anchor = anchor;
        }
    }
}

/// A partial settings change from the external controls.
///
/// Unset fields leave the current value untouched.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SettingsUpdate {
    pub enabled: Option<bool>,
    pub spacing_m: Option<f64>,
    pub offset_x_cm: Option<f64>,
    pub offset_y_cm: Option<f64>,
    pub opacity: Option<f64>,
    pub anchor: Option<GeoPoint>,
}

impl SettingsUpdate {
    /// An empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the enabled flag.
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    /// Set the spacing in meters.
    #[must_use]
    pub fn spacing_m(mut self, spacing_m: f64) -> Self {
        self.spacing_m = Some(spacing_m);
        self
    }

    /// Set both offsets in centimeters.
    #[must_use]
    pub fn offset_cm(mut self, x_cm: f64, y_cm: f64) -> Self {
        self.offset_x_cm = Some(x_cm);
        self.offset_y_cm = Some(y_cm);
        self
    }

    /// Set the opacity.
    #[must_use]
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Set the anchor.
    #[must_use]
    pub fn anchor(mut self, anchor: GeoPoint) -> Self {
        self.anchor = Some(anchor);
        self
    }
}
