//! GeoJSON-shaped input envelopes
//!
//! Uploaded survey files arrive here as already-parsed JSON text in one of
//! the usual GeoJSON wrappings: a bare Polygon or MultiPolygon, a Feature
//! around one, or a FeatureCollection whose first feature wraps one. Only the
//! first ring of the first polygon component is accepted; everything else is
//! rejected with a message, never silently coerced.

use anyhow::{bail, ensure, Context, Result};
use serde::Deserialize;

use crate::boundary::types::{dedup_consecutive, Coordinate, Ring};

/// The supported envelope shapes, discriminated by the GeoJSON `type` tag.
/// Positions are `[lon, lat, ...]`; trailing members (altitude) are ignored.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum GeometryEnvelope {
    Polygon {
        coordinates: Vec<Vec<Vec<f64>>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Vec<f64>>>>,
    },
    Feature {
        geometry: Option<Box<GeometryEnvelope>>,
    },
    FeatureCollection {
        #[serde(default)]
        features: Vec<GeometryEnvelope>,
    },
    #[serde(other)]
    Unsupported,
}

/// Parse GeoJSON text and extract the outer boundary ring.
pub fn extract_boundary(json: &str) -> Result<Ring> {
    let envelope: GeometryEnvelope =
        serde_json::from_str(json).context("input is not valid GeoJSON")?;
    boundary_from_envelope(&envelope)
}

/// Extract the first ring of the first polygon component of the envelope.
pub fn boundary_from_envelope(envelope: &GeometryEnvelope) -> Result<Ring> {
    match envelope {
        GeometryEnvelope::Polygon { coordinates } => {
            let ring = coordinates
                .first()
                .context("polygon has no rings")?;
            ring_from_positions(ring)
        }
        GeometryEnvelope::MultiPolygon { coordinates } => {
            // only the first sub-polygon is modeled
            let polygon = coordinates
                .first()
                .context("multi-polygon has no polygons")?;
            let ring = polygon.first().context("polygon has no rings")?;
            ring_from_positions(ring)
        }
        GeometryEnvelope::Feature { geometry } => {
            let inner = geometry.as_deref().context("feature has no geometry")?;
            boundary_from_envelope(inner)
        }
        GeometryEnvelope::FeatureCollection { features } => {
            let first = features
                .first()
                .context("feature collection is empty")?;
            boundary_from_envelope(first)
        }
        GeometryEnvelope::Unsupported => {
            bail!("unsupported geometry type: only Polygon and MultiPolygon boundaries are accepted")
        }
    }
}

fn ring_from_positions(positions: &[Vec<f64>]) -> Result<Ring> {
    let mut ring: Ring = Vec::with_capacity(positions.len());
    for (i, position) in positions.iter().enumerate() {
        ensure!(
            position.len() >= 2,
            "position {i} has {} members, expected [lon, lat]",
            position.len()
        );
        let coordinate = Coordinate::new(position[1], position[0]);
        ensure!(
            coordinate.is_valid(),
            "position {i} ({}, {}) is outside the WGS84 domain",
            position[1],
            position[0]
        );
        ring.push(coordinate);
    }
    dedup_consecutive(&mut ring);
    let distinct = if ring.len() > 1 && ring.first() == ring.last() {
        ring.len() - 1
    } else {
        ring.len()
    };
    ensure!(
        distinct >= 3,
        "boundary ring has only {distinct} distinct vertices, need at least 3"
    );
    Ok(ring)
}
