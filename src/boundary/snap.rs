//! Grid and bearing snapping
//!
//! Both snappers are pure functions over a candidate coordinate. The grid
//! snapper rounds latitude and longitude independently to multiples of the
//! degree-converted spacing (an accepted simplification of a true 2D lattice
//! snap). The bearing snapper rounds the bearing of the implied edge while
//! preserving the candidate's distance from the previous vertex.

use log::warn;

use crate::boundary::geodesy::{distance_and_bearing, normalize_bearing, offset_to_degrees, project};
use crate::boundary::types::{BearingSpec, Coordinate, GridSpec, SnapConfig};

/// Snap `point` to the nearest node of a local square grid sized for
/// `spec.spacing_m` at `at_lat_deg`.
///
/// Latitude and longitude are rounded on their own axes. Near the poles the
/// longitude cell size is non-finite and the returned coordinate is too;
/// callers decide what "snapping disabled" means for them.
pub fn snap_to_grid(point: Coordinate, at_lat_deg: f64, spec: &GridSpec) -> Coordinate {
    let (d_lon, d_lat) = offset_to_degrees(at_lat_deg, spec.spacing_m, spec.spacing_m);
    Coordinate {
        lat: (point.lat / d_lat).round() * d_lat,
        lon: (point.lon / d_lon).round() * d_lon,
    }
}

/// Snap the edge `prev -> candidate` to the nearest bearing of the form
/// `base_deg + k * step_deg`, keeping the candidate's distance from `prev`.
///
/// With no previous vertex there is no edge to constrain, so the candidate
/// passes through unchanged.
pub fn snap_to_bearing(
    prev: Option<&Coordinate>,
    candidate: Coordinate,
    spec: &BearingSpec,
) -> Coordinate {
    let Some(prev) = prev else {
        return candidate;
    };
    let (distance, bearing) = distance_and_bearing(*prev, candidate);
    if distance <= 0.0 {
        return candidate;
    }
    let snapped =
        ((bearing - spec.base_deg) / spec.step_deg).round() * spec.step_deg + spec.base_deg;
    project(*prev, normalize_bearing(snapped), distance)
}

/// Apply the enabled snappers to a candidate vertex: bearing first, then
/// grid. The grid pass may perturb the snapped bearing slightly; that is the
/// contractual combined behavior, not a defect.
///
/// A non-finite grid result (polar degeneracy) falls back to the pre-grid
/// point so one bad region cannot poison the session.
pub fn apply_snaps(prev: Option<&Coordinate>, candidate: Coordinate, cfg: &SnapConfig) -> Coordinate {
    let mut out = candidate;
    if cfg.snap_to_bearing {
        out = snap_to_bearing(prev, out, &cfg.bearing);
    }
    if cfg.snap_to_grid {
        let gridded = snap_to_grid(out, out.lat, &cfg.grid);
        if gridded.is_finite() {
            out = gridded;
        } else {
            warn!(
                "grid snap degenerate at lat {:.4}; keeping unsnapped point",
                out.lat
            );
        }
    }
    out
}
