// Copyright 2025 Lars Brubaker
// License: MIT
//
// Incrementally constructed polygon ring.
//
// The ring is built vertex by vertex while a pending vertex follows the
// user's cursor. Area is a triangle fan anchored at vertex 0, updated one
// triangle per append and recomputed in full after an undo.

mod legality;

use log::debug;

use crate::area::AreaAccumulator;
use crate::geom::{BoundingBox, Point, Real};
use crate::projection::{Projection, WebMercator};
use crate::sphere::Sphere;

#[derive(Clone, Debug)]
pub struct Polygon<P = WebMercator> {
    vertices: Vec<Point>,
    /// `None` means the ring closes straight back to vertex 0.
    pending: Option<Point>,
    bbox: Option<BoundingBox>,
    /// Signed fan area over the committed vertices.
    area: Real,
    finished: bool,
    /// Bumped on every edit that changes the filled shape.
    revision: u64,
    accumulator: AreaAccumulator<P>,
}

impl Polygon<WebMercator> {
    pub fn new() -> Self {
        Polygon::with_accumulator(AreaAccumulator::new(WebMercator, Sphere::default()))
    }
}

impl Default for Polygon<WebMercator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Projection> Polygon<P> {
    pub fn with_accumulator(accumulator: AreaAccumulator<P>) -> Self {
        Polygon {
            vertices: Vec::new(),
            pending: None,
            bbox: None,
            area: 0.0,
            finished: false,
            revision: 0,
            accumulator,
        }
    }

    /// Pre-seeds the ring with committed vertices.
    pub fn with_vertices<I, T>(mut self, vertices: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Point>,
    {
        for v in vertices {
            self.push(v);
        }
        self
    }

    // ───────────────────────── Construction protocol ─────────────────────────

    /// Appends a committed vertex. Ignored once the ring is finished.
    pub fn push(&mut self, point: impl Into<Point>) {
        if self.finished {
            debug!("push ignored on finished polygon");
            return;
        }
        let point = point.into();
        match self.bbox.as_mut() {
            Some(bbox) => bbox.extend(point),
            None => {
                self.bbox = Some(BoundingBox::from_point(point));
                self.pending = None;
            }
        }
        self.vertices.push(point);

        let n = self.vertices.len();
        if n > 2 {
            self.area += self
                .accumulator
                .triangle(self.vertices[0], self.vertices[n - 2], self.vertices[n - 1]);
        }
        self.revision += 1;
    }

    pub fn set_pending(&mut self, point: impl Into<Point>) {
        if self.finished {
            return;
        }
        let point = point.into();
        if self.pending != Some(point) {
            self.pending = Some(point);
            self.revision += 1;
        }
    }

    /// Drops the pending vertex so the ring closes at vertex 0 again.
    pub fn reset_pending(&mut self) {
        if self.pending.take().is_some() {
            self.revision += 1;
        }
    }

    /// Commits the pending vertex. Returns false when there is none.
    ///
    /// The caller is expected to have checked [`Polygon::legal`]; an illegal
    /// vertex is committed as-is.
    pub fn confirm_pending(&mut self) -> bool {
        if self.finished {
            return false;
        }
        match self.pending.take() {
            Some(p) => {
                debug_assert!(self.vertices.len() < 3 || self.legal_with(p));
                self.push(p);
                true
            }
            None => false,
        }
    }

    /// Removes the last committed vertex and rebuilds bbox and area from scratch.
    pub fn undo(&mut self) {
        if self.finished || self.vertices.pop().is_none() {
            return;
        }
        self.recalculate();
        self.revision += 1;
        debug!("undo: {} vertices left", self.vertices.len());
    }

    /// Closes the ring by repeating vertex 0.
    ///
    /// Requires at least three committed vertices, a legal pending vertex
    /// and a closing edge that crosses nothing. The pending vertex itself is
    /// dropped. After this the polygon no longer accepts edits.
    pub fn finish(&mut self) -> bool {
        if self.finished || self.vertices.len() < 3 {
            return false;
        }
        let first = self.vertices[0];
        if !self.legal() || !self.legal_with(first) {
            debug!("finish refused: closing edge self-intersects");
            return false;
        }
        self.vertices.push(first);
        self.pending = None;
        self.finished = true;
        self.revision += 1;
        debug!(
            "finished polygon with {} vertices, area {:.3}",
            self.vertices.len() - 1,
            self.committed_area()
        );
        true
    }

    fn recalculate(&mut self) {
        self.bbox = BoundingBox::from_points(&self.vertices);
        self.area = self.accumulator.fan(&self.vertices);
    }

    // ───────────────────────────── Queries ───────────────────────────────────

    /// Committed vertices. A finished ring ends with a copy of vertex 0.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn pending(&self) -> Option<Point> {
        self.pending
    }

    /// The vertex that provisionally closes the ring: the pending vertex, or
    /// vertex 0 when nothing is pending.
    pub fn candidate(&self) -> Option<Point> {
        self.pending.or_else(|| self.vertices.first().copied())
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.bbox
    }

    pub fn center(&self) -> Option<Point> {
        self.bbox.map(|b| b.center())
    }

    pub fn accumulator(&self) -> &AreaAccumulator<P> {
        &self.accumulator
    }

    /// Signed fan area of the committed vertices.
    pub fn signed_area(&self) -> Real {
        self.area
    }

    pub fn committed_area(&self) -> Real {
        self.area.abs()
    }

    /// Area as if the pending vertex were committed.
    ///
    /// Only meaningful while [`Polygon::size_legal`] holds.
    pub fn speculative_area(&self) -> Real {
        let n = self.vertices.len();
        if n < 2 || self.finished {
            return self.committed_area();
        }
        let extra = match self.pending {
            Some(p) => self.accumulator.triangle(self.vertices[0], self.vertices[n - 1], p),
            None => 0.0,
        };
        (self.area + extra).abs()
    }

    /// Ring edges, including the provisional closure through the pending
    /// vertex while the ring is still open.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let closure = match (self.finished, self.vertices.first(), self.vertices.last()) {
            (false, Some(&first), Some(&last)) => match self.pending {
                Some(p) => [Some((last, p)), Some((p, first))],
                None => [Some((last, first)), None],
            },
            _ => [None, None],
        };
        self.vertices
            .windows(2)
            .map(|w| (w[0], w[1]))
            .chain(closure.into_iter().flatten())
    }
}
