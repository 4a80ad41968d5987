//! Concave hull reconstruction
//!
//! Seeds with the convex hull of the point set, then "digs" every hull edge
//! longer than the configured maximum: the nearest non-hull point is inserted
//! between the edge's endpoints when doing so keeps the hull simple. Distances
//! are measured in a local equirectangular frame so the edge bound is metric;
//! output vertices are the original coordinates, never reprojected.
//!
//! Failure (too few points, degenerate frame, or an over-long edge with no
//! admissible candidate) is reported as an error so the caller can fall back
//! to a convex hull.

use std::collections::HashMap;

use anyhow::{bail, Result};
use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo::{ConvexHull, Coord, Line, MultiPoint, Point};
use rstar::primitives::GeomWithData;
use rstar::RTree;

use crate::boundary::geodesy::METERS_PER_DEGREE_LAT;
use crate::boundary::types::{Coordinate, Ring};

/// How many nearest candidates to consider when digging one edge.
const DIG_CANDIDATES: usize = 16;

type IndexedPoint = GeomWithData<[f64; 2], usize>;

/// Concave hull of `points` with no hull edge longer than `max_edge_m`.
/// Returns an open ring of input coordinates in hull order.
pub fn concave_hull(points: &[Coordinate], max_edge_m: f64) -> Result<Ring> {
    if max_edge_m <= 0.0 {
        bail!("max edge length must be positive, got {max_edge_m}");
    }

    // distinct points only; duplicates add nothing to a hull
    let mut distinct: Vec<Coordinate> = Vec::with_capacity(points.len());
    for p in points {
        if !distinct.contains(p) {
            distinct.push(*p);
        }
    }
    if distinct.len() < 4 {
        bail!(
            "concave hull needs at least 4 distinct points, got {}",
            distinct.len()
        );
    }

    let frame = LocalFrame::new(distinct[0])?;
    let local: Vec<[f64; 2]> = distinct.iter().map(|c| frame.to_local(*c)).collect();

    // map local positions back to input indices for hull extraction
    let mut index_of: HashMap<(u64, u64), usize> = HashMap::with_capacity(local.len());
    for (i, xy) in local.iter().enumerate() {
        index_of.entry((xy[0].to_bits(), xy[1].to_bits())).or_insert(i);
    }

    let multipoint: MultiPoint<f64> =
        local.iter().map(|xy| Point::new(xy[0], xy[1])).collect();
    let convex = multipoint.convex_hull();
    let exterior = convex.exterior();
    if exterior.0.len() < 4 {
        bail!("point arrangement is degenerate (collinear or coincident)");
    }

    // open index ring of the convex hull
    let mut hull: Vec<usize> = exterior.0[..exterior.0.len() - 1]
        .iter()
        .map(|c| index_of[&(c.x.to_bits(), c.y.to_bits())])
        .collect();

    let tree: RTree<IndexedPoint> = RTree::bulk_load(
        local
            .iter()
            .enumerate()
            .map(|(i, xy)| IndexedPoint::new(*xy, i))
            .collect(),
    );

    // dig over-long edges until every edge fits or one cannot be split
    let mut remaining_digs = distinct.len();
    loop {
        let Some(edge) = longest_offending_edge(&hull, &local, max_edge_m) else {
            break;
        };
        if remaining_digs == 0 {
            bail!("edge digging did not converge");
        }
        remaining_digs -= 1;
        match dig_candidate(&hull, &local, &tree, edge) {
            Some(idx) => hull.insert(edge + 1, idx),
            None => bail!("no admissible point to split an over-long hull edge"),
        }
    }

    Ok(hull.into_iter().map(|i| distinct[i]).collect())
}

/// Index of the longest hull edge exceeding the bound, if any.
fn longest_offending_edge(hull: &[usize], local: &[[f64; 2]], max_edge_m: f64) -> Option<usize> {
    let mut worst: Option<(usize, f64)> = None;
    for i in 0..hull.len() {
        let a = local[hull[i]];
        let b = local[hull[(i + 1) % hull.len()]];
        let len = dist(a, b);
        if len > max_edge_m && worst.map_or(true, |(_, l)| len > l) {
            worst = Some((i, len));
        }
    }
    worst.map(|(i, _)| i)
}

/// Find a non-hull point that can split edge `i` without breaking hull
/// simplicity. Candidates come nearest-first from the edge midpoint.
fn dig_candidate(
    hull: &[usize],
    local: &[[f64; 2]],
    tree: &RTree<IndexedPoint>,
    i: usize,
) -> Option<usize> {
    let a = local[hull[i]];
    let b = local[hull[(i + 1) % hull.len()]];
    let edge_len = dist(a, b);
    let mid = [(a[0] + b[0]) / 2.0, (a[1] + b[1]) / 2.0];

    for candidate in tree.nearest_neighbor_iter(&mid).take(DIG_CANDIDATES) {
        let idx = candidate.data;
        if hull.contains(&idx) {
            continue;
        }
        let p = local[idx];
        // the split must actually shorten the boundary locally
        if dist(a, p) >= edge_len || dist(b, p) >= edge_len {
            continue;
        }
        if splits_cleanly(hull, local, i, p) {
            return Some(idx);
        }
    }
    None
}

/// Would replacing edge `i` with the two edges through `p` keep the hull
/// simple? Checks both new edges against every surviving hull edge.
fn splits_cleanly(hull: &[usize], local: &[[f64; 2]], i: usize, p: [f64; 2]) -> bool {
    let n = hull.len();
    let a = local[hull[i]];
    let b = local[hull[(i + 1) % n]];
    let new_a = Line::new(coord(a), coord(p));
    let new_b = Line::new(coord(p), coord(b));

    for j in 0..n {
        if j == i {
            continue; // the edge being replaced
        }
        let q = local[hull[j]];
        let r = local[hull[(j + 1) % n]];
        let existing = Line::new(coord(q), coord(r));
        // edges adjacent to the replaced one legitimately share an endpoint,
        // so only proper crossings count
        if crosses(&new_a, &existing) || crosses(&new_b, &existing) {
            return false;
        }
    }
    true
}

fn crosses(a: &Line<f64>, b: &Line<f64>) -> bool {
    matches!(
        line_intersection(*a, *b),
        Some(LineIntersection::SinglePoint { is_proper: true, .. })
    )
}

fn coord(xy: [f64; 2]) -> Coord<f64> {
    Coord { x: xy[0], y: xy[1] }
}

fn dist(a: [f64; 2], b: [f64; 2]) -> f64 {
    ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2)).sqrt()
}

/// Equirectangular frame: meters east/north of an anchor coordinate.
struct LocalFrame {
    anchor: Coordinate,
    meters_per_degree_lon: f64,
}

impl LocalFrame {
    fn new(anchor: Coordinate) -> Result<Self> {
        let meters_per_degree_lon = METERS_PER_DEGREE_LAT * anchor.lat.to_radians().cos();
        if !meters_per_degree_lon.is_finite() || meters_per_degree_lon.abs() < 1e-6 {
            bail!("local metric frame is degenerate at latitude {}", anchor.lat);
        }
        Ok(Self {
            anchor,
            meters_per_degree_lon,
        })
    }

    fn to_local(&self, c: Coordinate) -> [f64; 2] {
        [
            (c.lon - self.anchor.lon) * self.meters_per_degree_lon,
            (c.lat - self.anchor.lat) * METERS_PER_DEGREE_LAT,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::geodesy::distance_and_bearing;

    fn grid_points(anchor: Coordinate, step_m: f64, cols: usize, rows: usize) -> Vec<Coordinate> {
        let mut out = Vec::new();
        for r in 0..rows {
            for c in 0..cols {
                let d_lat = (r as f64 * step_m) / METERS_PER_DEGREE_LAT;
                let d_lon = (c as f64 * step_m)
                    / (METERS_PER_DEGREE_LAT * anchor.lat.to_radians().cos());
                out.push(Coordinate::new(anchor.lat + d_lat, anchor.lon + d_lon));
            }
        }
        out
    }

    #[test]
    fn hull_of_grid_respects_edge_bound() {
        let points = grid_points(Coordinate::new(6.5, 3.3), 20.0, 5, 5);
        let hull = concave_hull(&points, 50.0).expect("hull");
        assert!(hull.len() >= 4);
        for i in 0..hull.len() {
            let (len, _) = distance_and_bearing(hull[i], hull[(i + 1) % hull.len()]);
            assert!(len <= 50.0 * 1.01, "edge {i} is {len} m");
        }
        // every hull vertex is one of the inputs
        for v in &hull {
            assert!(points.contains(v));
        }
    }

    #[test]
    fn too_few_points_fail() {
        let points = grid_points(Coordinate::new(6.5, 3.3), 20.0, 3, 1);
        assert!(concave_hull(&points, 50.0).is_err());
    }

    #[test]
    fn collinear_points_fail() {
        let points = grid_points(Coordinate::new(6.5, 3.3), 20.0, 6, 1);
        assert!(concave_hull(&points, 500.0).is_err());
    }

    #[test]
    fn generous_bound_reduces_to_convex_hull() {
        let points = grid_points(Coordinate::new(6.5, 3.3), 20.0, 4, 4);
        let hull = concave_hull(&points, 10_000.0).expect("hull");
        // convex hull of a square grid is its four corners
        assert_eq!(hull.len(), 4);
    }
}
