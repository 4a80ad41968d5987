// GeoJSON upload and survey-traverse construction, end to end
use fieldbound::boundary::survey::{leg_from_strings, traverse};
use fieldbound::{area_ha, extract_boundary, metrics, repair, Coordinate};

#[test]
fn test_uploaded_polygon_through_repair_and_metrics() {
    // roughly 1.1 km x 1.1 km plot near Ibese
    let json = r#"{
        "type": "Feature",
        "properties": {"name": "survey upload"},
        "geometry": {
            "type": "Polygon",
            "coordinates": [[
                [3.30, 6.50],
                [3.31, 6.50],
                [3.31, 6.51],
                [3.30, 6.51],
                [3.30, 6.50]
            ]]
        }
    }"#;

    let ring = extract_boundary(json).expect("extract");
    let polygon = repair(ring);
    let derived = metrics(&polygon);

    assert_eq!(polygon.first(), polygon.last());
    assert_eq!(derived.segments.len(), 4);
    // ~0.01 deg on each side: about 1105 m x 1113 m
    assert!(
        derived.area_ha > 118.0 && derived.area_ha < 128.0,
        "area {} ha",
        derived.area_ha
    );
    println!("✓ uploaded plot measures {:.1} ha", derived.area_ha);
}

#[test]
fn test_unsupported_upload_reports_reason() {
    let err = extract_boundary(r#"{"type": "Point", "coordinates": [3.3, 6.5]}"#).unwrap_err();
    assert!(
        err.to_string().contains("unsupported geometry type"),
        "message: {err}"
    );
}

#[test]
fn test_survey_sheet_walks_into_a_closed_plot() {
    // four legs from a surveyor's sheet, quadrant bearings
    let rows = [
        ("N 0 E", "200"),
        ("N 90 E", "100"),
        ("S 0 E", "200"),
        ("270", "100"), // plain azimuths pass straight through
    ];
    let legs: Vec<_> = rows
        .iter()
        .map(|(b, d)| leg_from_strings(b, d).expect("leg"))
        .collect();

    let start = Coordinate::new(6.5, 3.3);
    let walked = traverse(start, &legs).expect("traverse");
    println!("closure error: {:.3} m", walked.closure_error_m);
    assert!(walked.closure_error_m < 2.0);

    let polygon = repair(walked.ring);
    let area = area_ha(&polygon);
    assert!((area - 2.0).abs() < 0.05, "area {area} ha, expected ~2");
}

#[test]
fn test_survey_sheet_with_bad_row_is_rejected() {
    assert!(leg_from_strings("northish", "100").is_err());
    assert!(leg_from_strings("N 45 E", "-5").is_err());
    assert!(leg_from_strings("N 45 E", "hundred").is_err());
}
