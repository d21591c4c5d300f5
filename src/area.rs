// Copyright 2025 Lars Brubaker
// License: MIT
//
// Signed curved-earth area of projected triangles and triangle fans.

use crate::geom::{Point, Real};
use crate::projection::{Projection, WebMercator};
use crate::sphere::Sphere;

/// Measures projected triangles on the sphere.
#[derive(Clone, Debug, Default)]
pub struct AreaAccumulator<P = WebMercator> {
    projection: P,
    sphere: Sphere,
}

impl<P: Projection> AreaAccumulator<P> {
    pub fn new(projection: P, sphere: Sphere) -> Self {
        AreaAccumulator { projection, sphere }
    }

    pub fn projection(&self) -> &P {
        &self.projection
    }

    pub fn sphere(&self) -> &Sphere {
        &self.sphere
    }

    /// Signed area of triangle `abc` given in projected coordinates.
    pub fn triangle(&self, a: Point, b: Point, c: Point) -> Real {
        if a == b || a == c || b == c {
            return 0.0;
        }
        let a = self.projection.unproject(a);
        let b = self.projection.unproject(b);
        let c = self.projection.unproject(c);
        self.sphere.spherical_triangle(a, b, c)
    }

    /// Signed area of the fan `(v0, v[i-1], v[i])` for `i = 2..n`.
    pub fn fan(&self, vertices: &[Point]) -> Real {
        let Some((&first, rest)) = vertices.split_first() else {
            return 0.0;
        };
        rest.windows(2)
            .fold(0.0, |area, pair| area + self.triangle(first, pair[0], pair[1]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sphere::LngLat;
    use approx::assert_relative_eq;

    #[test]
    fn fan_of_fewer_than_three_is_zero() {
        let acc = AreaAccumulator::<WebMercator>::default();
        assert_eq!(acc.fan(&[]), 0.0);
        assert_eq!(acc.fan(&[Point::new(0.5, 0.5)]), 0.0);
        assert_eq!(acc.fan(&[Point::new(0.5, 0.5), Point::new(0.6, 0.5)]), 0.0);
    }

    #[test]
    fn fan_equals_sum_of_triangles() {
        let acc = AreaAccumulator::<WebMercator>::default();
        let m = WebMercator;
        let v: Vec<Point> = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]
            .iter()
            .map(|&(lng, lat)| m.project(LngLat::new(lng, lat)))
            .collect();
        let expected = acc.triangle(v[0], v[1], v[2]) + acc.triangle(v[0], v[2], v[3]);
        assert_relative_eq!(acc.fan(&v), expected);
    }

    #[test]
    fn projected_square_degree_has_expected_magnitude() {
        // One degree square at the equator: ~ (111.3 km)^2.
        let acc = AreaAccumulator::<WebMercator>::default();
        let m = WebMercator;
        let v: Vec<Point> = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]
            .iter()
            .map(|&(lng, lat)| m.project(LngLat::new(lng, lat)))
            .collect();
        let side = acc.sphere().radius * std::f64::consts::PI / 180.0;
        assert_relative_eq!(acc.fan(&v).abs(), side * side, max_relative = 1e-3);
    }
}
