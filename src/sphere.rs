// Copyright 2025 Lars Brubaker
// License: MIT
//
// Great-circle distance, bearing and signed spherical-triangle area.
//
// References: haversine and initial-bearing formulas as given at
// movable-type.co.uk/scripts/latlong.html.

use std::f64::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geom::{Real, EPSILON};

/// Radius of the reference datum's sphere, in metres.
pub const EARTH_RADIUS: Real = 6_378_245.0;

/// Side length below which a triangle is measured with Heron's formula.
pub const SMALL_SIDE_THRESHOLD: Real = 100.0;

/// Geographic coordinate in degrees.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LngLat {
    pub lng: Real,
    pub lat: Real,
}

impl LngLat {
    #[inline]
    pub const fn new(lng: Real, lat: Real) -> Self {
        LngLat { lng, lat }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Sphere {
    pub radius: Real,
    pub small_side_threshold: Real,
}

impl Default for Sphere {
    fn default() -> Self {
        Sphere {
            radius: EARTH_RADIUS,
            small_side_threshold: SMALL_SIDE_THRESHOLD,
        }
    }
}

/// Wraps an angle into (-pi, pi].
fn normalize_angle(mut a: Real) -> Real {
    while a > PI {
        a -= 2.0 * PI;
    }
    while a <= -PI {
        a += 2.0 * PI;
    }
    a
}

impl Sphere {
    pub fn with_radius(radius: Real) -> Self {
        Sphere {
            radius,
            ..Sphere::default()
        }
    }

    /// Great-circle distance in the radius' unit (haversine).
    pub fn distance(&self, a: LngLat, b: LngLat) -> Real {
        let lat_a = a.lat.to_radians();
        let lat_b = b.lat.to_radians();
        let d_lat = lat_b - lat_a;
        let d_lng = (b.lng - a.lng).to_radians();
        let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);
        let h = h.clamp(0.0, 1.0);
        2.0 * h.sqrt().atan2((1.0 - h).sqrt()) * self.radius
    }

    /// Initial bearing from `a` towards `b` in radians, clockwise from north.
    pub fn initial_bearing(&self, a: LngLat, b: LngLat) -> Real {
        let lat_a = a.lat.to_radians();
        let lat_b = b.lat.to_radians();
        let d_lng = (b.lng - a.lng).to_radians();
        (d_lng.sin() * lat_b.cos())
            .atan2(lat_a.cos() * lat_b.sin() - lat_a.sin() * lat_b.cos() * d_lng.cos())
    }

    /// Signed area of the spherical triangle `abc`, positive when the
    /// vertices run counter-clockwise (east = +x, north = +y).
    ///
    /// Tiny triangles are measured with Heron's formula on the great-circle
    /// sides; the spherical excess of such a triangle is lost to cancellation.
    /// Everything else uses `excess * R^2`.
    pub fn spherical_triangle(&self, a: LngLat, b: LngLat, c: LngLat) -> Real {
        if a == b || a == c || b == c {
            return 0.0;
        }
        let side_a = self.distance(b, c);
        let side_b = self.distance(a, c);
        let side_c = self.distance(a, b);

        let angle_a = normalize_angle(self.initial_bearing(a, b) - self.initial_bearing(a, c));
        let angle_b = normalize_angle(self.initial_bearing(b, c) - self.initial_bearing(b, a));
        let angle_c = normalize_angle(self.initial_bearing(c, a) - self.initial_bearing(c, b));
        let sum = angle_a + angle_b + angle_c;

        let threshold = self.small_side_threshold;
        if side_a < threshold && side_b < threshold && side_c < threshold {
            let p = (side_a + side_b + side_c) / 2.0;
            let product = p * (p - side_a) * (p - side_b) * (p - side_c);
            if product <= EPSILON {
                return 0.0;
            }
            let magnitude = product.sqrt();
            return if sum > 0.0 { magnitude } else { -magnitude };
        }

        let excess = if sum > 0.0 { sum - PI } else { sum + PI };
        excess * self.radius * self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn distance_one_degree_of_meridian() {
        let s = Sphere::default();
        let d = s.distance(LngLat::new(10.0, 0.0), LngLat::new(10.0, 1.0));
        assert_relative_eq!(d, EARTH_RADIUS * PI / 180.0, max_relative = 1e-12);
    }

    #[test]
    fn distance_is_zero_for_identical_points() {
        let s = Sphere::default();
        let p = LngLat::new(121.4, 31.0);
        assert_eq!(s.distance(p, p), 0.0);
    }

    #[test]
    fn bearing_cardinal_directions() {
        let s = Sphere::default();
        let o = LngLat::new(0.0, 0.0);
        assert_relative_eq!(s.initial_bearing(o, LngLat::new(0.0, 1.0)), 0.0, epsilon = 1e-12);
        assert_relative_eq!(s.initial_bearing(o, LngLat::new(1.0, 0.0)), PI / 2.0, epsilon = 1e-12);
        assert_relative_eq!(s.initial_bearing(o, LngLat::new(-1.0, 0.0)), -PI / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn octant_triangle_is_an_eighth_of_the_sphere() {
        let s = Sphere {
            radius: 1.0,
            small_side_threshold: 0.0,
        };
        let a = LngLat::new(0.0, 0.0);
        let b = LngLat::new(90.0, 0.0);
        let c = LngLat::new(0.0, 90.0);
        assert_relative_eq!(s.spherical_triangle(a, b, c), PI / 2.0, epsilon = 1e-9);
        assert_relative_eq!(s.spherical_triangle(a, c, b), -PI / 2.0, epsilon = 1e-9);
    }

    #[test]
    fn both_branches_agree_in_sign() {
        let s = Sphere::default();
        // ~ 50 m sides: Heron branch.
        let d = 50.0 / EARTH_RADIUS * 180.0 / PI;
        let small = [LngLat::new(0.0, 0.0), LngLat::new(d, 0.0), LngLat::new(0.0, d)];
        // ~ 111 km sides: excess branch.
        let large = [LngLat::new(0.0, 0.0), LngLat::new(1.0, 0.0), LngLat::new(0.0, 1.0)];
        for tri in [small, large] {
            assert!(s.spherical_triangle(tri[0], tri[1], tri[2]) > 0.0);
            assert!(s.spherical_triangle(tri[0], tri[2], tri[1]) < 0.0);
        }
    }

    #[test]
    fn heron_branch_matches_planar_area() {
        let s = Sphere::default();
        let d = 60.0 / EARTH_RADIUS * 180.0 / PI;
        let area = s.spherical_triangle(
            LngLat::new(0.0, 0.0),
            LngLat::new(d, 0.0),
            LngLat::new(0.0, d),
        );
        assert_relative_eq!(area, 1800.0, max_relative = 1e-6);
    }

    #[test]
    fn coincident_vertices_have_no_area() {
        let s = Sphere::default();
        let a = LngLat::new(1.0, 1.0);
        let b = LngLat::new(2.0, 1.0);
        assert_eq!(s.spherical_triangle(a, a, b), 0.0);
        assert_eq!(s.spherical_triangle(a, b, b), 0.0);
        assert_eq!(s.spherical_triangle(b, a, b), 0.0);
    }

    #[test]
    fn collinear_small_triangle_is_not_nan() {
        let s = Sphere::default();
        let d = 10.0 / EARTH_RADIUS * 180.0 / PI;
        let area = s.spherical_triangle(
            LngLat::new(0.0, 0.0),
            LngLat::new(0.0, d),
            LngLat::new(0.0, 2.0 * d),
        );
        assert!(area.is_finite());
        assert!(area.abs() < 1e-3);
    }
}
