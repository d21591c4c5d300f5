// Copyright 2025 Lars Brubaker
// License: MIT
//
// Edge-of-screen arrow pointing at a region outside the viewport.
//
// The arrow sits on a box inset from the display edges, in the direction of
// the great-circle bearing from the viewport centre to the region centre.
// Its barbs shrink as the region gets further away.

use std::f64::consts::PI;

use crate::cache::Viewport;
use crate::geom::{Point, Real, EPSILON};
use crate::projection::Projection;
use crate::sphere::Sphere;

/// Angle between the reversed shaft and each barb.
const BARB_ANGLE: Real = PI * 5.0 / 18.0;

/// Fraction of the half display size at which the tip is placed.
const EDGE_INSET: Real = 0.9;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Indicator {
    /// Arrow tip in display pixels, origin at the top-left corner.
    pub x: Real,
    pub y: Real,
    /// Initial bearing from the viewport centre to the target, radians
    /// clockwise from north.
    pub bearing: Real,
    /// Great-circle distance to the target in the sphere's unit.
    pub distance: Real,
    /// Barb length in display pixels.
    pub length: Real,
}

impl Indicator {
    /// Arrow from the centre of `viewport` towards projected point `target`.
    pub fn new<P: Projection>(
        projection: &P,
        sphere: &Sphere,
        viewport: &Viewport,
        target: Point,
    ) -> Self {
        let from = projection.unproject(viewport.rect().center());
        let to = projection.unproject(target);
        let distance = sphere.distance(from, to);
        let bearing = sphere.initial_bearing(from, to);

        let w = viewport.width() as Real;
        let h = viewport.height() as Real;
        // Screen y grows downwards, so north is -y.
        let (dx, dy) = (bearing.sin(), -bearing.cos());
        let reach = |half: Real, d: Real| {
            if d.abs() > EPSILON {
                half / d.abs()
            } else {
                Real::INFINITY
            }
        };
        let t = reach(EDGE_INSET * w / 2.0, dx).min(reach(EDGE_INSET * h / 2.0, dy));

        let short = w.min(h);
        let (longest, shortest) = (short / 12.0, short / 30.0);
        let km = distance / 1000.0;
        let length = longest * 1.05_f64.powf(-km / 3.0) + shortest;

        Indicator {
            x: w / 2.0 + t * dx,
            y: h / 2.0 + t * dy,
            bearing,
            distance,
            length,
        }
    }

    /// Direction the arrow points in display space, radians from +x
    /// towards +y.
    pub fn angle(&self) -> Real {
        (-self.bearing.cos()).atan2(self.bearing.sin())
    }

    /// Polyline `[barb, tip, barb]` in display pixels.
    pub fn polyline(&self) -> [Point; 3] {
        let tip = Point::new(self.x, self.y);
        let barb = |a: Real| Point::new(self.x + self.length * a.cos(), self.y + self.length * a.sin());
        let angle = self.angle();
        [
            barb(angle + BARB_ANGLE - PI),
            tip,
            barb(angle - BARB_ANGLE - PI),
        ]
    }

    pub fn stroke_width(&self) -> Real {
        self.length / 25.0 + 2.0
    }
}
