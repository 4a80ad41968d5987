//! Freehand stroke reconstruction
//!
//! A stroke is a dense pointer trail. Points closer than half a meter to the
//! previous accepted point are dropped on ingest to bound the stream without
//! losing shape. On finish the trail is simplified (Douglas-Peucker, high
//! fidelity) and rebuilt into a ring through an ordered strategy chain:
//! concave hull, then convex hull, then naively closing the simplified path.
//! Noisy input must always yield some usable polygon.

use geo::{ConvexHull, LineString, MultiPoint, Simplify};
use log::debug;

use crate::boundary::geodesy::{distance_and_bearing, offset_to_degrees};
use crate::boundary::hull::concave_hull;
use crate::boundary::snap::{snap_to_bearing, snap_to_grid};
use crate::boundary::types::{dedup_consecutive, Coordinate, Ring, SnapConfig};
use crate::fallback::{try_each, Strategy};

/// Minimum great-circle step between accepted stroke points, in meters.
const MIN_STEP_M: f64 = 0.5;

/// Accumulates raw pointer coordinates for one freehand stroke.
#[derive(Debug, Default)]
pub struct FreehandStroke {
    raw: Vec<Coordinate>,
}

impl FreehandStroke {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pointer position, unless it is within [`MIN_STEP_M`] of the
    /// last accepted point.
    pub fn push(&mut self, point: Coordinate) {
        if let Some(last) = self.raw.last() {
            let (step, _) = distance_and_bearing(*last, point);
            if step <= MIN_STEP_M {
                return;
            }
        }
        self.raw.push(point);
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Discard the stroke.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Reconstruct a ring from the stroke and clear it. Fewer than 3 raw
    /// points cannot enclose anything; the stroke is discarded silently and
    /// `None` returned.
    pub fn finish(&mut self, cfg: &SnapConfig) -> Option<Ring> {
        if self.raw.len() < 3 {
            debug!("freehand stroke too short ({} points), discarded", self.raw.len());
            self.raw.clear();
            return None;
        }
        let raw = std::mem::take(&mut self.raw);
        let simplified = simplify_stroke(&raw, cfg.simplify_m);

        let mut ring = try_each(
            "freehand reconstruction",
            vec![
                Strategy::new("concave hull", || {
                    concave_hull(&simplified, cfg.concavity_m).ok()
                }),
                Strategy::new("convex hull", || convex_ring(&simplified)),
                Strategy::new("naive close", || Some(simplified.clone())),
            ],
        )?;

        if cfg.snap_to_bearing {
            resnap_ring_bearings(&mut ring, cfg);
        }
        if cfg.snap_to_grid {
            resnap_ring_grid(&mut ring, cfg);
        }
        dedup_consecutive(&mut ring);
        Some(ring)
    }
}

/// Douglas-Peucker with the tolerance converted from meters to degrees at the
/// stream's median-index latitude.
fn simplify_stroke(raw: &[Coordinate], simplify_m: f64) -> Vec<Coordinate> {
    let median_lat = raw[raw.len() / 2].lat;
    let (d_lon, d_lat) = offset_to_degrees(median_lat, simplify_m, simplify_m);
    let tolerance_deg = if d_lon.is_finite() {
        (d_lon + d_lat) / 2.0
    } else {
        d_lat
    };

    let path = LineString::from(raw.iter().map(|c| c.to_coord()).collect::<Vec<_>>());
    let simplified = path.simplify(&tolerance_deg);
    simplified.0.into_iter().map(Coordinate::from_coord).collect()
}

/// Convex hull as an open ring, or `None` when the arrangement is degenerate.
fn convex_ring(points: &[Coordinate]) -> Option<Ring> {
    let multipoint: MultiPoint<f64> = points.iter().map(|c| c.to_point()).collect();
    let hull = multipoint.convex_hull();
    let exterior = &hull.exterior().0;
    if exterior.len() < 4 {
        return None;
    }
    Some(
        exterior[..exterior.len() - 1]
            .iter()
            .map(|c| Coordinate::from_coord(*c))
            .collect(),
    )
}

/// Re-snap every edge bearing in sequence, each vertex relative to its
/// already-snapped predecessor.
fn resnap_ring_bearings(ring: &mut Ring, cfg: &SnapConfig) {
    for i in 1..ring.len() {
        let prev = ring[i - 1];
        ring[i] = snap_to_bearing(Some(&prev), ring[i], &cfg.bearing);
    }
}

/// Grid-snap every vertex. Runs after the bearing pass; the small bearing
/// perturbation this can introduce is accepted combined-snap behavior.
fn resnap_ring_grid(ring: &mut Ring, cfg: &SnapConfig) {
    for v in ring.iter_mut() {
        let snapped = snap_to_grid(*v, v.lat, &cfg.grid);
        if snapped.is_finite() {
            *v = snapped;
        }
    }
}
