//! Oriented rectangle generation
//!
//! Builds a closed four-corner ring from center, side lengths, and bearing.
//! Corners are found by projecting to the two long-edge midpoints and then
//! sideways from each, so the rectangle is geodesically oriented rather than
//! axis-aligned in degrees.

use crate::boundary::geodesy::project;
use crate::boundary::types::{Coordinate, Ring};

/// Generate a closed 5-vertex ring (4 corners + repeated first) for an
/// oriented rectangle.
///
/// Degenerate sizes (`length_m <= 0` or `width_m <= 0`) yield a degenerate
/// zero-area ring rather than an error; validate beforehand if that matters.
pub fn generate_rectangle(
    center: Coordinate,
    length_m: f64,
    width_m: f64,
    bearing_deg: f64,
) -> Ring {
    let half_len = length_m / 2.0;
    let half_wid = width_m / 2.0;

    let head = project(center, bearing_deg, half_len);
    let tail = project(center, bearing_deg + 180.0, half_len);

    let c1 = project(head, bearing_deg - 90.0, half_wid);
    let c2 = project(head, bearing_deg + 90.0, half_wid);
    let c3 = project(tail, bearing_deg + 90.0, half_wid);
    let c4 = project(tail, bearing_deg - 90.0, half_wid);

    vec![c1, c2, c3, c4, c1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::metrics::area_ha;
    use crate::boundary::types::is_closed;

    #[test]
    fn rectangle_is_closed_with_five_vertices() {
        let ring = generate_rectangle(Coordinate::new(6.5, 3.3), 200.0, 100.0, 30.0);
        assert_eq!(ring.len(), 5);
        assert!(is_closed(&ring));
        // four distinct corners
        for i in 0..4 {
            for j in (i + 1)..4 {
                assert!(ring[i] != ring[j], "corners {i} and {j} coincide");
            }
        }
    }

    #[test]
    fn rectangle_area_matches_sides() {
        let ring = generate_rectangle(Coordinate::new(6.5, 3.3), 200.0, 100.0, 0.0);
        let area = area_ha(&ring);
        let expected = 200.0 * 100.0 / 10_000.0;
        assert!(
            (area - expected).abs() / expected < 0.01,
            "area {area} ha, expected ~{expected}"
        );
    }

    #[test]
    fn degenerate_sizes_give_zero_area() {
        let ring = generate_rectangle(Coordinate::new(6.5, 3.3), 0.0, 100.0, 0.0);
        assert_eq!(ring.len(), 5);
        assert!(area_ha(&ring) < 1e-6);
    }
}
