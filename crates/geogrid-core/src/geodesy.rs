#![forbid(unsafe_code)]

//! Great-circle distance and meters-per-pixel sampling.
//!
//! Web-map projections distort ground distance non-uniformly with latitude
//! and zoom, so the meter↔pixel rate cannot be assumed constant: it is
//! resampled from the live projection on every map movement by unprojecting
//! one-pixel deltas and measuring the ground distance between the results.

use crate::geometry::{GeoPoint, PixelPoint};
use crate::map::MapCamera;

/// Mean Earth radius in meters, as used by the spherical haversine.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Local meters-per-pixel rates along the screen axes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mpp {
    /// Meters per pixel along screen X.
    pub x: f64,
    /// Meters per pixel along screen Y.
    pub y: f64,
}

impl Default for Mpp {
    fn default() -> Self {
        Self { x: 1.0, y: 1.0 }
    }
}

/// Great-circle distance in meters between two geographic points, by the
/// spherical law of haversines.
pub fn haversine_m(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_M * c
}

/// Sample the local meters-per-pixel rates at a screen position.
///
/// Unprojects `at`, `at + (1, 0)`, and `at + (0, 1)` and measures the ground
/// distance from the base point to each perturbed point. A degenerate
/// projection (zero, negative, or non-finite distance) falls back to 1 so
/// NaN never propagates into spacing, phase, or selection math.
pub fn meters_per_pixel(map: &dyn MapCamera, at: PixelPoint) -> Mpp {
    let base = map.unproject(at);
    let east = map.unproject(at.translated(1.0, 0.0));
    let south = map.unproject(at.translated(0.0, 1.0));
    Mpp {
        x: sanitize(haversine_m(base, east)),
        y: sanitize(haversine_m(base, south)),
    }
}

/// Convert a meter length to pixels at the given rate, guarding a zero rate.
#[inline]
pub fn pixels_from_meters(meters: f64, mpp: f64) -> f64 {
    meters / if mpp == 0.0 { 1.0 } else { mpp }
}

#[inline]
fn sanitize(rate: f64) -> f64 {
    if rate.is_finite() && rate > 0.0 {
        rate
    } else {
        1.0
    }
}
