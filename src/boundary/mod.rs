//! Boundary construction and snapping engine
//!
//! The geospatial core: everything needed to turn operator input into a
//! clean, closed, geodesically measured field polygon.
//!
//! # Submodules
//! - `types` - coordinates, rings, snap specs, configuration, results
//! - `geodesy` - meter/degree transform, haversine distance/bearing/projection
//! - `snap` - grid and bearing snappers
//! - `rectangle` - oriented rectangle generation
//! - `survey` - quadrant-bearing parsing and traverse walking
//! - `hull` - concave hull with a metric max-edge bound
//! - `freehand` - stroke accumulation and polygon reconstruction
//! - `repair` - ring closing and unkinking
//! - `metrics` - geodesic area and per-segment measurements
//! - `session` - the drawing-session state machine

pub mod freehand;
pub mod geodesy;
pub mod hull;
pub mod metrics;
pub mod rectangle;
pub mod repair;
pub mod session;
pub mod snap;
pub mod survey;
pub mod types;

pub use freehand::FreehandStroke;
pub use geodesy::{distance_and_bearing, normalize_bearing, offset_to_degrees, project};
pub use hull::concave_hull;
pub use metrics::{area_ha, metrics, segment_metrics};
pub use rectangle::generate_rectangle;
pub use repair::repair;
pub use session::{BoundarySession, DrawMode, FieldSink};
pub use snap::{apply_snaps, snap_to_bearing, snap_to_grid};
pub use survey::{leg_from_strings, parse_bearing, traverse, SurveyLeg, Traverse};
pub use types::{
    BearingSpec, BoundaryResult, Coordinate, GridSpec, Metrics, Ring, SegmentMetric, SnapConfig,
};
