// Copyright 2025 Lars Brubaker
// License: MIT
//
// Planar primitives in the normalized projected space.
//
// Both axes of the projected space span [0, 1], so a fixed absolute tolerance
// is meaningful everywhere. Every predicate in the crate goes through the
// functions here; none re-derive their own tolerance.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub type Real = f64;

/// Absolute tolerance for collinearity, horizontal-edge and near-zero
/// denominator checks.
pub const EPSILON: Real = 1e-16;

/// A point in the normalized projected space.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: Real,
    pub y: Real,
}

impl Point {
    #[inline]
    pub const fn new(x: Real, y: Real) -> Self {
        Point { x, y }
    }
}

impl From<(Real, Real)> for Point {
    fn from((x, y): (Real, Real)) -> Self {
        Point { x, y }
    }
}

/// Axis-aligned world rectangle, `(x1, y1)` top-left to `(x2, y2)` bottom-right.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    pub x1: Real,
    pub y1: Real,
    pub x2: Real,
    pub y2: Real,
}

impl Rect {
    pub const fn new(x1: Real, y1: Real, x2: Real, y2: Real) -> Self {
        Rect { x1, y1, x2, y2 }
    }

    #[inline]
    pub fn width(&self) -> Real {
        self.x2 - self.x1
    }

    #[inline]
    pub fn height(&self) -> Real {
        self.y2 - self.y1
    }

    #[inline]
    pub fn origin(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    pub fn center(&self) -> Point {
        Point::new((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }
}

/// Component-wise min/max over a vertex set.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    pub fn from_point(p: Point) -> Self {
        BoundingBox { min: p, max: p }
    }

    /// Returns `None` for an empty slice.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bbox = BoundingBox::from_point(*first);
        for &p in rest {
            bbox.extend(p);
        }
        Some(bbox)
    }

    #[inline]
    pub fn extend(&mut self, p: Point) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    #[inline]
    pub fn width(&self) -> Real {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> Real {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    /// True when the box lies entirely outside `rect`.
    pub fn is_clipped(&self, rect: &Rect) -> bool {
        rect.x1 > self.max.x || rect.y1 > self.max.y || rect.x2 < self.min.x || rect.y2 < self.min.y
    }

    /// True when the box is strictly smaller than a `dx` by `dy` extent.
    pub fn fits_within(&self, dx: Real, dy: Real) -> bool {
        dx > self.width() && dy > self.height()
    }

    pub fn as_rect(&self) -> Rect {
        Rect::new(self.min.x, self.min.y, self.max.x, self.max.y)
    }
}

/// Cross product of (p1 - q) and (p2 - q).
#[inline]
fn cross(q: Point, p1: Point, p2: Point) -> Real {
    (p1.x - q.x) * (p2.y - q.y) - (p2.x - q.x) * (p1.y - q.y)
}

/// Returns true if `q` lies on segment `p1`-`p2`: collinear within
/// [`EPSILON`] and inside the segment's bounding box.
pub fn on_segment(q: Point, p1: Point, p2: Point) -> bool {
    cross(q, p1, p2).abs() < EPSILON
        && (q.x - p1.x) * (q.x - p2.x) <= 0.0
        && (q.y - p1.y) * (q.y - p2.y) <= 0.0
}

/// Intersects segment `p1`-`p2` with the ray leaving `q` towards +x.
///
/// Returns the x-coordinate of the crossing, or `None`. A horizontal edge or
/// one passing through `q` never crosses. When the ray passes exactly through
/// an endpoint, only the endpoint with the larger y counts, so a ring vertex
/// is seen once when the ring passes through the ray and zero or two times
/// when it merely touches it.
pub fn ray_intersect(p1: Point, p2: Point, q: Point) -> Option<Real> {
    if p1.x.max(p2.x) < q.x || p1.y.max(p2.y) < q.y || q.y < p1.y.min(p2.y) {
        return None;
    }
    if on_segment(q, p1, p2) || (p2.y - p1.y).abs() < EPSILON {
        return None;
    }
    if (p1.y - q.y).abs() <= EPSILON {
        return (p1.x > q.x && p1.y > p2.y).then_some(p1.x);
    }
    if (p2.y - q.y).abs() <= EPSILON {
        return (p2.x > q.x && p2.y > p1.y).then_some(p2.x);
    }

    let above = p1.y - q.y;
    let below = q.y - p2.y;
    // above + below == p1.y - p2.y, already known to exceed EPSILON.
    let x = p1.x + (p2.x - p1.x) * (above / (above + below));
    (x >= q.x).then_some(x)
}

/// Returns true if segments `p1`-`p2` and `q1`-`q2` properly cross.
///
/// Touching at an endpoint or overlapping collinearly is not a crossing.
pub fn segments_intersect(p1: Point, p2: Point, q1: Point, q2: Point) -> bool {
    if p1.x.max(p2.x) < q1.x.min(q2.x)
        || p1.y.max(p2.y) < q1.y.min(q2.y)
        || q1.x.max(q2.x) < p1.x.min(p2.x)
        || q1.y.max(q2.y) < p1.y.min(p2.y)
    {
        return false;
    }
    let side = |a: Point, b: Point, c: Point| (c.x - a.x) * (b.y - a.y) - (b.x - a.x) * (c.y - a.y);
    if side(p1, p2, q1) * side(p1, p2, q2) >= 0.0 {
        return false;
    }
    side(q1, q2, p1) * side(q1, q2, p2) < 0.0
}
