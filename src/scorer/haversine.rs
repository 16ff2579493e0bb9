use crate::consts::EARTH_RADIUS_KM;
use crate::geo::Coordinate;

/// Great-circle distance in kilometres on a sphere of the given radius.
///
/// Uses the sine of the half-differences, so a longitude gap across the date line
/// (179 to -179) is the same as the 2 degree gap it really is.
pub fn distance_on_sphere(a: Coordinate, b: Coordinate, radius_km: f64) -> f64 {
    let lat1 = a.lat().to_radians();
    let lat2 = b.lat().to_radians();
    let d_lat = (b.lat() - a.lat()).to_radians();
    let d_lng = (b.lng() - a.lng()).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);

    // Rounding can push h a hair past 1.0 for antipodal points.
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    radius_km * c
}

/// Haversine distance with the mean Earth radius (6371 km).
#[inline]
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    distance_on_sphere(a, b, EARTH_RADIUS_KM)
}
