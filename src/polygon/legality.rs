// Copyright 2025 Lars Brubaker
// Self-intersection checks for the ring under construction.

use super::Polygon;
use crate::geom::{segments_intersect, Point};
use crate::projection::Projection;

impl<P: Projection> Polygon<P> {
    /// True if the edge from the last committed vertex to the candidate
    /// vertex crosses no earlier edge.
    ///
    /// Rings with fewer than three committed vertices are always legal.
    pub fn legal(&self) -> bool {
        if self.finished {
            return true;
        }
        match self.candidate() {
            Some(c) => self.legal_with(c),
            None => true,
        }
    }

    /// True if the ring closed through the candidate vertex is simple, so
    /// its area can be trusted.
    pub fn size_legal(&self) -> bool {
        if self.finished {
            return true;
        }
        let Some(c) = self.candidate() else {
            return true;
        };
        if !self.legal_with(c) {
            return false;
        }
        let v = &self.vertices;
        let n = v.len();
        if n < 3 {
            return true;
        }
        // Edge 0 shares vertex 0 with the closing edge.
        (1..n - 1).all(|i| !segments_intersect(v[i], v[i + 1], v[0], c))
    }

    /// Checks the edge `last -> candidate` against every edge except the one
    /// ending at `last`, which shares its endpoint.
    pub(crate) fn legal_with(&self, candidate: Point) -> bool {
        let v = &self.vertices;
        let n = v.len();
        if n < 3 {
            return true;
        }
        let last = v[n - 1];
        (0..n - 2).all(|i| !segments_intersect(v[i], v[i + 1], last, candidate))
    }
}
