// Copyright 2025 Lars Brubaker
// License: MIT
//
// Mapping between geographic coordinates and the normalized projected space.

use std::f64::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geom::{Point, Real};
use crate::sphere::LngLat;

/// Latitude at which the web-mercator square ends.
pub const MAX_LATITUDE: Real = 85.051_128_779_806_59;

/// A pure, invertible mapping into the `[0, 1] x [0, 1]` projected space.
///
/// Datum shifts between reference frames belong in the implementation; the
/// engine only ever calls these two functions.
pub trait Projection {
    fn project(&self, geo: LngLat) -> Point;
    fn unproject(&self, p: Point) -> LngLat;
}

/// Spherical web mercator: x grows east from the antimeridian, y grows south
/// from the northern clamp latitude.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WebMercator;

impl Projection for WebMercator {
    fn project(&self, geo: LngLat) -> Point {
        let lat = geo.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
        let x = (geo.lng + 180.0) / 360.0;
        let y = 0.5 - (lat.tan() + 1.0 / lat.cos()).ln() / (2.0 * PI);
        Point::new(x, y)
    }

    fn unproject(&self, p: Point) -> LngLat {
        let lng = p.x * 360.0 - 180.0;
        let lat = (PI - 2.0 * PI * p.y).sinh().atan().to_degrees();
        LngLat::new(lng, lat)
    }
}

impl<P: Projection + ?Sized> Projection for &P {
    fn project(&self, geo: LngLat) -> Point {
        (**self).project(geo)
    }

    fn unproject(&self, p: Point) -> LngLat {
        (**self).unproject(p)
    }
}
