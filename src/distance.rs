// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

/// Mean radius of Earth, in kilometers.
pub const EARTH_RADIUS: f64 = 6371.0;

/// Calculates the great-circle distance between two lat-lon positions
/// on Earth using the [haversine formula](https://en.wikipedia.org/wiki/Haversine_formula).
/// Returns the result in kilometers.
///
/// The result is symmetric in its two endpoints and zero for identical positions.
pub fn earth_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1 = lat1.to_radians();
    let lon1 = lon1.to_radians();
    let lat2 = lat2.to_radians();
    let lon2 = lon2.to_radians();

    let sin_dlat_half = ((lat2 - lat1) * 0.5).sin();
    let sin_dlon_half = ((lon2 - lon1) * 0.5).sin();

    // Rounding may push `a` slightly outside of [0, 1] for (near-)antipodal points
    let a = (sin_dlat_half * sin_dlat_half
        + lat1.cos() * lat2.cos() * sin_dlon_half * sin_dlon_half)
        .clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS * c
}
