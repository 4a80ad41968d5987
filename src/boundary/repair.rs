//! Ring closing and self-intersection repair
//!
//! `repair` closes an open ring and, when the ring crosses itself, splits it
//! at proper segment intersections into simple sub-rings, keeping the first.
//! Repair is best effort: any failure returns the closed-but-unrepaired ring
//! rather than blocking the user. Callers must supply at least 3 distinct
//! vertices.

use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo::Line;
use log::{debug, warn};

use crate::boundary::types::{close_ring, dedup_consecutive, Coordinate, Ring};

/// Recursion guard for pathological strokes; each split consumes one level.
const MAX_SPLITS: usize = 32;

/// Close the ring if open and resolve self-intersections, keeping the first
/// simple sub-ring. Never fails.
pub fn repair(mut ring: Ring) -> Ring {
    dedup_consecutive(&mut ring);
    close_ring(&mut ring);
    if ring.len() < 4 {
        // nothing to unkink below a triangle; return as-is
        return ring;
    }

    if find_self_intersection(&ring).is_none() {
        return ring;
    }

    let mut pieces = Vec::new();
    split_at_kinks(ring.clone(), MAX_SPLITS, &mut pieces);
    match pieces.into_iter().find(|r| distinct_len(r) >= 3) {
        Some(first) => {
            debug!("unkinked self-intersecting ring, kept first simple piece");
            first
        }
        None => {
            warn!("could not unkink ring, returning it closed but unrepaired");
            ring
        }
    }
}

/// First proper intersection between two non-adjacent edges of a closed
/// ring, as `(edge_i, edge_j, point)`.
fn find_self_intersection(ring: &[Coordinate]) -> Option<(usize, usize, Coordinate)> {
    let edges = ring.len() - 1; // closed: last vertex repeats the first
    for i in 0..edges {
        for j in (i + 1)..edges {
            // adjacent edges share a vertex; the wrap pair (first, last) too
            if j == i + 1 || (i == 0 && j == edges - 1) {
                continue;
            }
            let a = Line::new(ring[i].to_coord(), ring[i + 1].to_coord());
            let b = Line::new(ring[j].to_coord(), ring[j + 1].to_coord());
            if let Some(LineIntersection::SinglePoint {
                intersection,
                is_proper: true,
            }) = line_intersection(a, b)
            {
                return Some((i, j, Coordinate::from_coord(intersection)));
            }
        }
    }
    None
}

/// Recursively split a closed ring at its first kink into two closed rings.
fn split_at_kinks(ring: Ring, depth: usize, out: &mut Vec<Ring>) {
    let kink = if depth == 0 {
        None
    } else {
        find_self_intersection(&ring)
    };
    match kink {
        None => out.push(ring),
        Some((i, j, cross)) => {
            // piece A: start..=i, the crossing, then j+1..end (stays closed)
            let mut piece_a: Ring = ring[..=i].to_vec();
            piece_a.push(cross);
            piece_a.extend_from_slice(&ring[j + 1..]);
            // piece B: the loop between the two edges, closed at the crossing
            let mut piece_b: Ring = vec![cross];
            piece_b.extend_from_slice(&ring[i + 1..=j]);
            piece_b.push(cross);

            for mut piece in [piece_a, piece_b] {
                dedup_consecutive(&mut piece);
                if distinct_len(&piece) >= 3 {
                    split_at_kinks(piece, depth - 1, out);
                }
            }
        }
    }
}

/// Vertex count ignoring the closing duplicate.
fn distinct_len(ring: &[Coordinate]) -> usize {
    match (ring.first(), ring.last()) {
        (Some(a), Some(b)) if ring.len() > 1 && a == b => ring.len() - 1,
        _ => ring.len(),
    }
}
