//! Area and per-segment measurements for boundary rings
//!
//! Area is geodesic (WGS84 ellipsoid via geo's `GeodesicArea`) and reported
//! in hectares. Segment midpoints are the arithmetic mean of the endpoint
//! coordinates — a flat approximation kept for compatibility with the
//! original display behavior.

use geo::{GeodesicArea, LineString, Polygon};

use crate::boundary::geodesy::distance_and_bearing;
use crate::boundary::types::{Coordinate, Metrics, Ring, SegmentMetric};

/// Geodesic area of the ring in hectares. Degenerate or too-short rings
/// report 0.0; this never errors.
pub fn area_ha(ring: &Ring) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let exterior = LineString::from(ring.iter().map(|c| c.to_coord()).collect::<Vec<_>>());
    let polygon = Polygon::new(exterior, vec![]);
    let sq_m = polygon.geodesic_area_unsigned();
    if sq_m.is_finite() {
        sq_m / 10_000.0
    } else {
        0.0
    }
}

/// Length, bearing, and midpoint for each edge of the vertex sequence,
/// wrapping last -> first. A closed ring's duplicated endpoint is ignored so
/// the wrap edge is not double counted. Pairs containing a non-finite vertex
/// are skipped.
pub fn segment_metrics(vertices: &[Coordinate]) -> Vec<SegmentMetric> {
    let open = match (vertices.first(), vertices.last()) {
        (Some(a), Some(b)) if vertices.len() > 1 && a == b => &vertices[..vertices.len() - 1],
        _ => vertices,
    };
    if open.len() < 2 {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(open.len());
    for i in 0..open.len() {
        let a = open[i];
        let b = open[(i + 1) % open.len()];
        if !a.is_finite() || !b.is_finite() {
            continue;
        }
        let (length_m, bearing_deg) = distance_and_bearing(a, b);
        out.push(SegmentMetric {
            midpoint: Coordinate::new((a.lat + b.lat) / 2.0, (a.lon + b.lon) / 2.0),
            length_m,
            bearing_deg,
        });
    }
    out
}

/// Area plus segment metrics in one pass.
pub fn metrics(ring: &Ring) -> Metrics {
    Metrics {
        area_ha: area_ha(ring),
        segments: segment_metrics(ring),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::rectangle::generate_rectangle;

    #[test]
    fn square_segments_have_expected_lengths_and_bearings() {
        let bearing = 30.0;
        let ring = generate_rectangle(Coordinate::new(6.5, 3.3), 100.0, 100.0, bearing);
        let segs = segment_metrics(&ring);
        assert_eq!(segs.len(), 4);
        for seg in &segs {
            assert!(
                (seg.length_m - 100.0).abs() / 100.0 < 0.01,
                "length {}",
                seg.length_m
            );
        }
        // the four edges run at bearing + {90, 180, 270, 0} in ring order
        let mut bearings: Vec<f64> = segs.iter().map(|s| s.bearing_deg).collect();
        bearings.sort_by(|a, b| a.partial_cmp(b).unwrap());
        for (got, want) in bearings.iter().zip([30.0, 120.0, 210.0, 300.0]) {
            let diff = (got - want).abs();
            let diff = diff.min(360.0 - diff);
            assert!(diff < 0.5, "bearing {got}, wanted ~{want}");
        }
    }

    #[test]
    fn closed_ring_wrap_edge_not_double_counted() {
        let ring = generate_rectangle(Coordinate::new(6.5, 3.3), 100.0, 50.0, 0.0);
        assert_eq!(segment_metrics(&ring).len(), 4);
        let open = &ring[..4];
        assert_eq!(segment_metrics(open).len(), 4);
    }

    #[test]
    fn degenerate_ring_reports_zero_area() {
        assert_eq!(area_ha(&vec![Coordinate::new(0.0, 0.0)]), 0.0);
        let spike = vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 1.0),
            Coordinate::new(0.0, 0.0),
        ];
        assert!(area_ha(&spike) < 0.01);
    }

    #[test]
    fn non_finite_vertices_are_skipped() {
        let ring = vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(f64::NAN, 0.5),
            Coordinate::new(0.0, 1.0),
        ];
        let segs = segment_metrics(&ring);
        assert_eq!(segs.len(), 1); // only the wrap edge (last -> first) survives
    }
}
