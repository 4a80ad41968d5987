// End-to-end rectangle generation scenarios
use fieldbound::{area_ha, generate_rectangle, segment_metrics, Coordinate};

#[test]
fn test_two_hectare_rectangle() {
    let center = Coordinate::new(6.5, 3.3);
    let ring = generate_rectangle(center, 200.0, 100.0, 0.0);

    assert_eq!(ring.len(), 5, "expected a closed 5-vertex ring");
    assert_eq!(ring.first(), ring.last());

    let area = area_ha(&ring);
    println!("200m x 100m rectangle: {:.4} ha", area);
    assert!(
        (area - 2.0).abs() < 0.02,
        "expected ~2.0 ha, got {area:.4}"
    );
}

#[test]
fn test_rotated_rectangle_keeps_its_area() {
    let center = Coordinate::new(6.5, 3.3);
    for bearing in [0.0, 17.0, 45.0, 90.0, 133.0, 270.0] {
        let ring = generate_rectangle(center, 150.0, 80.0, bearing);
        let area = area_ha(&ring);
        let expected = 150.0 * 80.0 / 10_000.0;
        assert!(
            (area - expected).abs() / expected < 0.01,
            "bearing {bearing}: area {area:.4}, expected {expected:.4}"
        );
    }
    println!("✓ rectangle area is bearing-invariant");
}

#[test]
fn test_square_segment_metrics() {
    let bearing = 40.0;
    let ring = generate_rectangle(Coordinate::new(6.5, 3.3), 100.0, 100.0, bearing);
    let segments = segment_metrics(&ring);

    assert_eq!(segments.len(), 4);
    let mut expected: Vec<f64> = (0..4).map(|k| (bearing + 90.0 * k as f64) % 360.0).collect();
    expected.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let mut got: Vec<f64> = segments.iter().map(|s| s.bearing_deg).collect();
    got.sort_by(|a, b| a.partial_cmp(b).unwrap());

    for (seg_bearing, want) in got.iter().zip(expected.iter()) {
        let diff = (seg_bearing - want).abs();
        let diff = diff.min(360.0 - diff);
        assert!(diff < 0.5, "segment bearing {seg_bearing:.2}, wanted ~{want:.2}");
    }
    for segment in &segments {
        assert!(
            (segment.length_m - 100.0).abs() < 1.0,
            "segment length {:.2} m",
            segment.length_m
        );
        assert!(segment.midpoint.is_valid());
    }
    println!("✓ square segments measure 100 m at 90-degree steps");
}

#[test]
fn test_far_northern_rectangle_still_squares_up() {
    // high latitude stresses the meters/degrees conversion
    let ring = generate_rectangle(Coordinate::new(64.1, -21.9), 100.0, 100.0, 0.0);
    let area = area_ha(&ring);
    assert!((area - 1.0).abs() < 0.01, "area {area:.4} ha at lat 64");
}
