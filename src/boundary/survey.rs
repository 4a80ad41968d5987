//! Survey traverse construction
//!
//! Converts surveyor-style segment data (quadrant bearing + distance per leg)
//! into a boundary ring by walking geodesically from a start coordinate.
//! Quadrant bearings like `N 34° E` are converted to azimuths; plain numeric
//! strings are accepted as azimuths directly. Reading the survey file itself
//! is the upload collaborator's job; this module starts from parsed strings.

use anyhow::{bail, Context, Result};

use crate::boundary::geodesy::{distance_and_bearing, normalize_bearing, project};
use crate::boundary::types::{Coordinate, Ring};

/// One leg of a survey traverse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurveyLeg {
    pub azimuth_deg: f64,
    pub distance_m: f64,
}

/// A walked traverse: the open ring of visited vertices and how far the walk
/// ended from its start (surveyors call this the closure error).
#[derive(Debug, Clone)]
pub struct Traverse {
    pub ring: Ring,
    pub closure_error_m: f64,
}

/// Convert a quadrant bearing (`N 34° E`, `s12.5w`, `N34DEG E`) or a plain
/// azimuth string to degrees clockwise from north in [0, 360).
pub fn parse_bearing(text: &str) -> Result<f64> {
    let cleaned = text
        .trim()
        .to_ascii_uppercase()
        .replace("DEG", "")
        .replace('°', "");

    if let Ok(azimuth) = cleaned.trim().parse::<f64>() {
        if !azimuth.is_finite() {
            bail!("bearing {text:?} is not a finite angle");
        }
        return Ok(normalize_bearing(azimuth));
    }

    let compact: String = cleaned.chars().filter(|c| !c.is_whitespace()).collect();
    let mut chars = compact.chars();
    let ns = chars.next();
    let ew = compact.chars().last();
    let body: String = compact
        .chars()
        .skip(1)
        .take(compact.chars().count().saturating_sub(2))
        .collect();

    let angle: f64 = body
        .parse()
        .with_context(|| format!("unrecognized bearing format: {text:?}"))?;
    if !(0.0..=90.0).contains(&angle) {
        bail!("quadrant bearing angle {angle} out of [0, 90] in {text:?}");
    }

    let azimuth = match (ns, ew) {
        (Some('N'), Some('E')) => angle,
        (Some('S'), Some('E')) => 180.0 - angle,
        (Some('S'), Some('W')) => 180.0 + angle,
        (Some('N'), Some('W')) => (360.0 - angle) % 360.0,
        _ => bail!("unrecognized bearing format: {text:?}"),
    };
    Ok(azimuth)
}

/// Build a leg from its textual bearing and distance fields.
pub fn leg_from_strings(bearing: &str, distance: &str) -> Result<SurveyLeg> {
    let azimuth_deg = parse_bearing(bearing)?;
    let distance_m: f64 = distance
        .trim()
        .parse()
        .with_context(|| format!("invalid distance: {distance:?}"))?;
    if !distance_m.is_finite() || distance_m <= 0.0 {
        bail!("distance must be a positive number of meters, got {distance:?}");
    }
    Ok(SurveyLeg {
        azimuth_deg,
        distance_m,
    })
}

/// Walk the legs geodesically from `start`. Requires at least 3 legs (fewer
/// cannot enclose an area). The returned ring is open; feed it to the
/// repairer to close it.
pub fn traverse(start: Coordinate, legs: &[SurveyLeg]) -> Result<Traverse> {
    if legs.len() < 3 {
        bail!(
            "a traverse needs at least 3 legs to enclose an area, got {}",
            legs.len()
        );
    }
    let mut ring = Vec::with_capacity(legs.len() + 1);
    ring.push(start);
    let mut at = start;
    for leg in legs {
        at = project(at, leg.azimuth_deg, leg.distance_m);
        ring.push(at);
    }
    // the final leg should land back on the start; report how far off it is
    let (closure_error_m, _) = distance_and_bearing(at, start);
    if closure_error_m < 1e-6 {
        ring.pop(); // walked exactly home, drop the duplicate
    }
    Ok(Traverse {
        ring,
        closure_error_m,
    })
}
