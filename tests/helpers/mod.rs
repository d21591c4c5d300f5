// Copyright 2025 Lars Brubaker
// Shared test utilities for geoarea tests.

#![allow(dead_code)]

use std::f64::consts::PI;

use geoarea::{LngLat, Point, Polygon, Projection, Real, WebMercator, EngineConfig, RegionSet};

pub const EARTH_RADIUS: Real = geoarea::sphere::EARTH_RADIUS;

/// Parse `.dat` rings: one `lng lat` (or `lng, lat`) pair per line.
/// Blank lines and `#` comments are skipped.
pub fn parse_lnglat(data: &str) -> Vec<LngLat> {
    data.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let v: Vec<Real> = line
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|s| !s.is_empty())
                .filter_map(|s| s.parse::<Real>().ok())
                .collect();
            match v[..] {
                [lng, lat] => Some(LngLat::new(lng, lat)),
                _ => None,
            }
        })
        .collect()
}

pub fn project_all(ring: &[LngLat]) -> Vec<Point> {
    ring.iter().map(|&ll| WebMercator.project(ll)).collect()
}

/// Polygon built by pushing every vertex of `ring`, not finished.
pub fn polygon_from(ring: &[LngLat]) -> Polygon {
    Polygon::new().with_vertices(project_all(ring))
}

/// Degrees of arc spanned by `metres` along a great circle.
pub fn metres_to_degrees(metres: Real) -> Real {
    metres / EARTH_RADIUS * 180.0 / PI
}

/// Axis-aligned lng/lat square with its south-west corner at `origin`,
/// `side` metres along the meridian.
pub fn square_at(origin: LngLat, side: Real) -> Vec<LngLat> {
    let d_lat = metres_to_degrees(side);
    let d_lng = d_lat / origin.lat.to_radians().cos();
    vec![
        origin,
        LngLat::new(origin.lng + d_lng, origin.lat),
        LngLat::new(origin.lng + d_lng, origin.lat + d_lat),
        LngLat::new(origin.lng, origin.lat + d_lat),
    ]
}

/// Area of a lng/lat rectangle bounded by meridians and parallels.
pub fn lat_lng_rectangle_area(sw: LngLat, ne: LngLat) -> Real {
    EARTH_RADIUS * EARTH_RADIUS
        * (ne.lng - sw.lng).to_radians()
        * (ne.lat.to_radians().sin() - sw.lat.to_radians().sin())
}

pub fn region_set() -> RegionSet {
    RegionSet::new(EngineConfig::default()).expect("default config is valid")
}

/// Shoelace area of `ring` on a local equirectangular plane, in square metres.
/// Good to a fraction of a percent for rings a few kilometres across.
pub fn planar_area(ring: &[LngLat]) -> Real {
    let lat0 = ring.iter().map(|p| p.lat).sum::<Real>() / ring.len() as Real;
    let k = lat0.to_radians().cos();
    let xy: Vec<(Real, Real)> = ring
        .iter()
        .map(|p| {
            (
                EARTH_RADIUS * p.lng.to_radians() * k,
                EARTH_RADIUS * p.lat.to_radians(),
            )
        })
        .collect();
    let n = xy.len();
    let twice: Real = (0..n)
        .map(|i| {
            let (x1, y1) = xy[i];
            let (x2, y2) = xy[(i + 1) % n];
            x1 * y2 - x2 * y1
        })
        .sum();
    twice.abs() / 2.0
}
