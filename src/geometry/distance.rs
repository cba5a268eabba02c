use crate::domain::Coordinate;

/// Earth radius used for all distance calculations, in km
pub const EARTH_RADIUS_KM: f64 = 6378.0;

/// Great-circle distance between two points in kilometers.
///
/// Haversine formula on a sphere of radius [`EARTH_RADIUS_KM`]. Symmetric,
/// and zero for identical points.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    // Rounding can push h just past 1 for near-antipodal points
    let h = ((d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}
