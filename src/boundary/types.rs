//! Core value types for boundary construction
//!
//! Everything here is plain data: coordinates, rings, snap specifications,
//! per-call configuration, and the result payload handed to the field-state
//! collaborator. Algorithms live in the sibling modules.

use geo::{Coord, Point};
use serde::{Deserialize, Serialize};

/// A WGS84 position in degrees.
///
/// Stored as explicit `(lat, lon)` to keep axis order unambiguous at the API
/// surface; GeoJSON's `[lon, lat]` ordering is handled at the envelope layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Both components are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }

    /// Finite and inside the WGS84 domain.
    pub fn is_valid(&self) -> bool {
        self.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    pub fn to_point(self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }

    pub fn to_coord(self) -> Coord<f64> {
        Coord {
            x: self.lon,
            y: self.lat,
        }
    }

    pub fn from_point(p: Point<f64>) -> Self {
        Self {
            lat: p.y(),
            lon: p.x(),
        }
    }

    pub fn from_coord(c: Coord<f64>) -> Self {
        Self { lat: c.y, lon: c.x }
    }
}

/// Ordered boundary vertex sequence. Open while editing, closed
/// (first == last) once finalized.
pub type Ring = Vec<Coordinate>;

/// True when the ring repeats its first vertex at the end.
pub fn is_closed(ring: &[Coordinate]) -> bool {
    match (ring.first(), ring.last()) {
        (Some(a), Some(b)) => ring.len() >= 2 && a == b,
        _ => false,
    }
}

/// Append a copy of the first vertex if the ring is open.
pub fn close_ring(ring: &mut Ring) {
    if !ring.is_empty() && !is_closed(ring) {
        ring.push(ring[0]);
    }
}

/// Drop consecutive duplicate vertices (the "no two consecutive vertices
/// coincide" invariant). Keeps a trailing closing vertex intact.
pub fn dedup_consecutive(ring: &mut Ring) {
    ring.dedup();
}

/// Grid snapping: spacing is defined in meters and applied as a
/// latitude-dependent degree offset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GridSpec {
    pub spacing_m: f64,
}

/// Bearing snapping: edges are rounded to `base_deg + k * step_deg`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BearingSpec {
    pub step_deg: f64,
    pub base_deg: f64,
}

/// Per-call configuration for snapping and freehand reconstruction.
/// Supplied by the caller on every operation; never persisted by the core.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SnapConfig {
    pub snap_to_grid: bool,
    pub grid: GridSpec,
    pub snap_to_bearing: bool,
    pub bearing: BearingSpec,
    /// Maximum hull edge length for freehand concave reconstruction.
    pub concavity_m: f64,
    /// Douglas-Peucker tolerance for freehand strokes, in meters.
    pub simplify_m: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            snap_to_grid: false,
            grid: GridSpec { spacing_m: 10.0 },
            snap_to_bearing: false,
            bearing: BearingSpec {
                step_deg: 15.0,
                base_deg: 0.0,
            },
            concavity_m: 50.0,
            simplify_m: 2.0,
        }
    }
}

/// Per-edge measurement: arithmetic-mean midpoint (deliberately not the
/// geodesic midpoint), haversine length, initial bearing in [0, 360).
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SegmentMetric {
    pub midpoint: Coordinate,
    pub length_m: f64,
    pub bearing_deg: f64,
}

/// Derived measurements for a finished boundary.
#[derive(Debug, Clone, Serialize)]
pub struct Metrics {
    pub area_ha: f64,
    pub segments: Vec<SegmentMetric>,
}

/// Payload emitted to the field-state collaborator when a boundary is
/// finished. The session keeps no reference to it afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct BoundaryResult {
    /// Closed outer ring of the finished polygon.
    pub geometry: Ring,
    pub area_ha: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_and_dedup() {
        let mut ring = vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 0.0),
            Coordinate::new(1.0, 0.0),
            Coordinate::new(1.0, 1.0),
        ];
        dedup_consecutive(&mut ring);
        assert_eq!(ring.len(), 3);
        assert!(!is_closed(&ring));
        close_ring(&mut ring);
        assert!(is_closed(&ring));
        assert_eq!(ring.len(), 4);
        // closing twice is a no-op
        close_ring(&mut ring);
        assert_eq!(ring.len(), 4);
    }

    #[test]
    fn coordinate_validity() {
        assert!(Coordinate::new(6.5, 3.3).is_valid());
        assert!(!Coordinate::new(91.0, 0.0).is_valid());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
    }
}
