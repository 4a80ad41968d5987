//! Boundary drawing session
//!
//! Owns the in-progress vertex list and drawing mode, routes pointer input
//! through the snappers, and on finish runs repair + metrics and hands the
//! result to the injected field-state port. One session drives one boundary;
//! everything is synchronous and exclusively owned, so there is no locking.

use anyhow::{bail, ensure, Result};
use log::debug;

use crate::boundary::freehand::FreehandStroke;
use crate::boundary::metrics::area_ha;
use crate::boundary::repair::repair;
use crate::boundary::snap::apply_snaps;
use crate::boundary::types::{BoundaryResult, Coordinate, SnapConfig};

/// Current drawing mode. Only one of vertex/freehand is ever active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawMode {
    #[default]
    Idle,
    Vertex,
    Freehand,
}

/// Receives finished boundaries. The session keeps no reference to emitted
/// geometry; whatever holds the field list owns it from then on.
pub trait FieldSink {
    fn emit(&mut self, result: BoundaryResult);
}

/// Ephemeral drawing state for one boundary.
#[derive(Default)]
pub struct BoundarySession {
    mode: DrawMode,
    pending: Vec<Coordinate>,
    stroke: FreehandStroke,
}

impl BoundarySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> DrawMode {
        self.mode
    }

    pub fn pending_vertices(&self) -> &[Coordinate] {
        &self.pending
    }

    /// Enter vertex-by-vertex mode. Cancels any active freehand stroke.
    pub fn start_vertex_drawing(&mut self) {
        self.clear_buffers();
        self.mode = DrawMode::Vertex;
    }

    /// Enter freehand mode. Cancels any pending vertex drawing.
    pub fn start_freehand(&mut self) {
        self.clear_buffers();
        self.mode = DrawMode::Freehand;
    }

    /// Abandon the current drawing, clearing all buffers.
    pub fn cancel(&mut self) {
        self.clear_buffers();
        self.mode = DrawMode::Idle;
    }

    /// Append a clicked vertex, snapped against the previous pending vertex.
    pub fn add_vertex(&mut self, raw: Coordinate, cfg: &SnapConfig) {
        let snapped = apply_snaps(self.pending.last(), raw, cfg);
        self.pending.push(snapped);
    }

    /// Remove a pending vertex by position.
    pub fn delete_vertex(&mut self, index: usize) -> Result<()> {
        ensure!(
            index < self.pending.len(),
            "no vertex at index {index} (have {})",
            self.pending.len()
        );
        self.pending.remove(index);
        Ok(())
    }

    /// Replace a pending vertex, re-snapping it relative to its predecessor
    /// in ring order (wrapping), so the result does not depend on drag order.
    pub fn drag_vertex(&mut self, index: usize, raw: Coordinate, cfg: &SnapConfig) -> Result<()> {
        let n = self.pending.len();
        ensure!(index < n, "no vertex at index {index} (have {n})");
        let prev = if n >= 2 {
            Some(self.pending[(index + n - 1) % n])
        } else {
            None
        };
        self.pending[index] = apply_snaps(prev.as_ref(), raw, cfg);
        Ok(())
    }

    /// Route a pointer-move into the active freehand stroke. Ignored outside
    /// freehand mode.
    pub fn freehand_point(&mut self, raw: Coordinate) {
        if self.mode == DrawMode::Freehand {
            self.stroke.push(raw);
        }
    }

    /// Finish the current drawing: repair into a closed polygon, compute the
    /// area, emit to the sink, and return to idle.
    ///
    /// Vertex mode with fewer than 3 vertices is a validation error and
    /// leaves the session untouched. A too-short freehand stroke is discarded
    /// silently (no emission, back to idle) per the stroke contract.
    pub fn finish(&mut self, cfg: &SnapConfig, sink: &mut dyn FieldSink) -> Result<()> {
        match self.mode {
            DrawMode::Idle => bail!("nothing to finish: no drawing in progress"),
            DrawMode::Vertex => {
                ensure!(
                    self.pending.len() >= 3,
                    "a boundary needs at least 3 vertices, have {}",
                    self.pending.len()
                );
                let ring = std::mem::take(&mut self.pending);
                self.emit(ring, sink);
            }
            DrawMode::Freehand => {
                if let Some(ring) = self.stroke.finish(cfg) {
                    self.emit(ring, sink);
                } else {
                    debug!("freehand finish with empty result, nothing emitted");
                }
            }
        }
        self.mode = DrawMode::Idle;
        Ok(())
    }

    fn emit(&mut self, ring: Vec<Coordinate>, sink: &mut dyn FieldSink) {
        let geometry = repair(ring);
        let area_ha = area_ha(&geometry);
        sink.emit(BoundaryResult { geometry, area_ha });
        self.clear_buffers();
    }

    fn clear_buffers(&mut self) {
        self.pending.clear();
        self.stroke.clear();
    }
}
