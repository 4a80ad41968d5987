//! fieldbound — field boundary construction and snapping engine
//!
//! A pure, synchronous library that converts operator input into clean,
//! closed, geodesically measured polygons (WGS84). Supported input paths:
//!
//! - GeoJSON uploads via [`envelope::extract_boundary`]
//! - generated rectangles via [`boundary::generate_rectangle`]
//! - survey traverses via [`boundary::survey`]
//! - vertex-by-vertex and freehand drawing via [`boundary::BoundarySession`]
//!
//! Rendering, network calls, and persistence are external collaborators:
//! this crate takes coordinate sequences plus per-call configuration and
//! returns polygons and derived metrics through an injected
//! [`boundary::FieldSink`] port.

pub mod boundary;
pub mod envelope;
pub mod fallback;

pub use boundary::{
    apply_snaps, area_ha, concave_hull, distance_and_bearing, generate_rectangle, metrics,
    repair, segment_metrics, snap_to_bearing, snap_to_grid, BearingSpec, BoundaryResult,
    BoundarySession, Coordinate, DrawMode, FieldSink, FreehandStroke, GridSpec, Metrics, Ring,
    SegmentMetric, SnapConfig,
};
pub use envelope::{extract_boundary, GeometryEnvelope};
