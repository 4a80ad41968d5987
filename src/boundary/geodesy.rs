//! Geo-metric transform: local meter offsets vs. WGS84 degrees
//!
//! All snapping and shape generation goes through these helpers so that the
//! meters-to-degrees conversion is defined in exactly one place. Distances,
//! bearings, and projections are great-circle (haversine) via the geo crate.

use geo::{HaversineBearing, HaversineDestination, HaversineDistance};

use crate::boundary::types::Coordinate;

/// Meters per degree of latitude, constant by design (spherical model).
pub const METERS_PER_DEGREE_LAT: f64 = 111_320.0;

/// Convert a local meter offset `(dx east, dy north)` at a given latitude to
/// a degree offset `(d_lon, d_lat)`.
///
/// Near the poles `cos(lat)` approaches zero and `d_lon` becomes non-finite.
/// That is deliberate: callers detect the non-finite value and treat it as
/// "snapping disabled for this region" rather than this function guessing.
pub fn offset_to_degrees(at_lat_deg: f64, dx_m: f64, dy_m: f64) -> (f64, f64) {
    let d_lat = dy_m / METERS_PER_DEGREE_LAT;
    let d_lon = dx_m / (METERS_PER_DEGREE_LAT * at_lat_deg.to_radians().cos());
    (d_lon, d_lat)
}

/// Great-circle distance in meters and initial bearing in [0, 360) from `a`
/// to `b`.
pub fn distance_and_bearing(a: Coordinate, b: Coordinate) -> (f64, f64) {
    let pa = a.to_point();
    let pb = b.to_point();
    let meters = pa.haversine_distance(&pb);
    let bearing = normalize_bearing(pa.haversine_bearing(pb));
    (meters, bearing)
}

/// Destination point when travelling `distance_m` meters from `origin` along
/// the given initial bearing.
pub fn project(origin: Coordinate, bearing_deg: f64, distance_m: f64) -> Coordinate {
    Coordinate::from_point(origin.to_point().haversine_destination(bearing_deg, distance_m))
}

/// Normalize any bearing (including negatives) into [0, 360).
pub fn normalize_bearing(deg: f64) -> f64 {
    deg.rem_euclid(360.0)
}
