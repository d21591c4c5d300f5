// Copyright 2025 Lars Brubaker
// License: MIT
//
// Parity scanline fill of a polygon ring into an RGBA8 buffer.
//
// Each output row casts one ray from its leftmost pixel centre. The parity of
// the crossings gives the starting state; walking the sorted crossings left to
// right toggles it. Pixels are sampled at their centres, so a rectangle whose
// sides fall on pixel boundaries fills exactly the pixels it covers.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub use crate::color::Rgba;
use crate::geom::{ray_intersect, Point, Real, Rect};
use crate::polygon::Polygon;
use crate::projection::Projection;

/// Row-major RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// A fully transparent buffer.
    pub fn new(width: u32, height: u32) -> Self {
        PixelBuffer {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Rgba::new(self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3])
    }

    #[inline]
    pub fn is_filled(&self, x: u32, y: u32) -> bool {
        self.pixel(x, y).a != 0
    }

    pub fn filled_count(&self) -> usize {
        self.data.chunks_exact(4).filter(|px| px[3] != 0).count()
    }

    /// Nearest-neighbour resample to `width` x `height`.
    pub fn scaled(&self, width: u32, height: u32) -> PixelBuffer {
        if width == self.width && height == self.height {
            return self.clone();
        }
        let mut out = PixelBuffer::new(width, height);
        if self.width == 0 || self.height == 0 {
            return out;
        }
        for y in 0..height {
            let sy = (y as u64 * self.height as u64 / height as u64) as u32;
            for x in 0..width {
                let sx = (x as u64 * self.width as u64 / width as u64) as u32;
                let src = (sy as usize * self.width as usize + sx as usize) * 4;
                let dst = (y as usize * width as usize + x as usize) * 4;
                out.data[dst..dst + 4].copy_from_slice(&self.data[src..src + 4]);
            }
        }
        out
    }
}

/// Casts a +x ray from `q` through `edges`.
///
/// Returns whether `q` starts inside (odd crossing count) and the crossing
/// x-coordinates in ascending order.
pub fn trace_ray<I>(edges: I, q: Point) -> (bool, Vec<Real>)
where
    I: IntoIterator<Item = (Point, Point)>,
{
    let mut crossings: Vec<Real> = edges
        .into_iter()
        .filter_map(|(p1, p2)| ray_intersect(p1, p2, q))
        .collect();
    crossings.sort_by(|a, b| a.total_cmp(b));
    (crossings.len() % 2 == 1, crossings)
}

/// Fills the interior of `polygon` as seen through `rect` into a
/// `width` x `height` buffer.
///
/// An open ring is closed through its pending vertex (or vertex 0). Rings
/// with fewer than three committed vertices have no interior and yield a
/// transparent buffer.
pub fn rasterize<P: Projection>(
    polygon: &Polygon<P>,
    rect: Rect,
    width: u32,
    height: u32,
    color: Rgba,
) -> PixelBuffer {
    let mut buffer = PixelBuffer::new(width, height);
    if polygon.vertex_count() < 3 || width == 0 || height == 0 {
        return buffer;
    }

    let edges: Vec<(Point, Point)> = polygon.edges().collect();
    let px = rect.width() / width as Real;
    let py = rect.height() / height as Real;
    let rgba = color.to_array();
    let row_len = width as usize * 4;

    let fill_row = |(j, row): (usize, &mut [u8])| {
        let y = rect.y1 + (j as Real + 0.5) * py;
        let x0 = rect.x1 + 0.5 * px;
        let (mut inside, crossings) = trace_ray(edges.iter().copied(), Point::new(x0, y));
        if crossings.is_empty() {
            return;
        }
        let mut ahead = crossings.iter().peekable();
        for (i, pixel) in row.chunks_exact_mut(4).enumerate() {
            let cx = rect.x1 + (i as Real + 0.5) * px;
            while ahead.next_if(|&&c| c <= cx).is_some() {
                inside = !inside;
            }
            if inside {
                pixel.copy_from_slice(&rgba);
            } else if ahead.peek().is_none() {
                break;
            }
        }
    };

    #[cfg(feature = "parallel")]
    buffer.data.par_chunks_mut(row_len).enumerate().for_each(fill_row);
    #[cfg(not(feature = "parallel"))]
    buffer.data.chunks_mut(row_len).enumerate().for_each(fill_row);

    buffer
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: Real, y: Real) -> Point {
        Point::new(x, y)
    }

    const RED: Rgba = Rgba::new(255, 0, 0, 128);

    #[test]
    fn trace_ray_inside_unit_square() {
        let square = [p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)];
        let edges = (0..4).map(|i| (square[i], square[(i + 1) % 4]));
        let (inside, crossings) = trace_ray(edges, p(0.1, 0.5));
        assert!(inside);
        assert_eq!(crossings, vec![1.0]);
    }

    #[test]
    fn trace_ray_through_vertex_counts_once() {
        // Diamond: the ray at y = 0.5 passes exactly through the side vertices.
        let diamond = [p(0.5, 0.0), p(1.0, 0.5), p(0.5, 1.0), p(0.0, 0.5)];
        let edges = (0..4).map(|i| (diamond[i], diamond[(i + 1) % 4]));
        let (inside, crossings) = trace_ray(edges, p(-1.0, 0.5));
        assert!(!inside);
        assert_eq!(crossings, vec![0.0, 1.0]);
    }

    #[test]
    fn trace_ray_touching_apex_counts_zero_or_two() {
        // Triangle apex touches the ray from below.
        let tri = [p(0.0, 0.0), p(1.0, 0.0), p(0.5, 0.5)];
        let edges: Vec<_> = (0..3).map(|i| (tri[i], tri[(i + 1) % 3])).collect();
        let (inside, crossings) = trace_ray(edges, p(-1.0, 0.5));
        assert!(!inside);
        assert_eq!(crossings.len() % 2, 0);
    }

    #[test]
    fn aligned_rectangle_fills_exactly() {
        let poly = Polygon::new().with_vertices([(0.25, 0.25), (0.75, 0.25), (0.75, 0.75), (0.25, 0.75)]);
        let buf = rasterize(&poly, Rect::new(0.0, 0.0, 1.0, 1.0), 8, 8, RED);
        for y in 0..8 {
            for x in 0..8 {
                let expected = (2..6).contains(&x) && (2..6).contains(&y);
                assert_eq!(buf.is_filled(x, y), expected, "pixel ({}, {})", x, y);
            }
        }
        assert_eq!(buf.pixel(3, 3), RED);
        assert_eq!(buf.filled_count(), 16);
    }

    #[test]
    fn concave_notch_stays_empty() {
        // U shape: the notch between the arms must not be filled.
        let poly = Polygon::new().with_vertices([
            (0.0, 0.0),
            (0.25, 0.0),
            (0.25, 0.5),
            (0.75, 0.5),
            (0.75, 0.0),
            (1.0, 0.0),
            (1.0, 1.0),
            (0.0, 1.0),
        ]);
        let buf = rasterize(&poly, Rect::new(0.0, 0.0, 1.0, 1.0), 4, 4, RED);
        // Top half: arms filled, notch empty.
        for y in 0..2 {
            assert!(buf.is_filled(0, y));
            assert!(!buf.is_filled(1, y));
            assert!(!buf.is_filled(2, y));
            assert!(buf.is_filled(3, y));
        }
        for y in 2..4 {
            for x in 0..4 {
                assert!(buf.is_filled(x, y));
            }
        }
    }

    #[test]
    fn pending_vertex_extends_fill_without_committing() {
        let mut poly = Polygon::new().with_vertices([(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        let rect = Rect::new(0.0, 0.0, 1.0, 1.0);
        let triangle = rasterize(&poly, rect, 10, 10, RED).filled_count();

        poly.set_pending((0.0, 1.0));
        let square = rasterize(&poly, rect, 10, 10, RED).filled_count();
        assert_eq!(square, 100);
        assert!(triangle < square);
        assert_eq!(poly.vertex_count(), 3);
    }

    #[test]
    fn fewer_than_three_vertices_never_fill() {
        let mut poly = Polygon::new().with_vertices([(0.0, 0.0), (1.0, 0.0)]);
        poly.set_pending((0.5, 1.0));
        let buf = rasterize(&poly, Rect::new(0.0, 0.0, 1.0, 1.0), 8, 8, RED);
        assert_eq!(buf.filled_count(), 0);
    }

    #[test]
    fn viewport_offset_shifts_fill() {
        let poly = Polygon::new().with_vertices([(0.5, 0.5), (1.0, 0.5), (1.0, 1.0), (0.5, 1.0)]);
        let buf = rasterize(&poly, Rect::new(0.5, 0.5, 1.5, 1.5), 4, 4, RED);
        assert!(buf.is_filled(0, 0));
        assert!(buf.is_filled(1, 1));
        assert!(!buf.is_filled(2, 0));
        assert!(!buf.is_filled(0, 2));
        assert_eq!(buf.filled_count(), 4);
    }

    #[test]
    fn scaled_repeats_pixels() {
        let poly = Polygon::new().with_vertices([(0.0, 0.0), (0.5, 0.0), (0.5, 1.0), (0.0, 1.0)]);
        let buf = rasterize(&poly, Rect::new(0.0, 0.0, 1.0, 1.0), 2, 2, RED);
        let big = buf.scaled(6, 6);
        assert_eq!(big.width(), 6);
        assert_eq!(big.filled_count(), 18);
        assert!(big.is_filled(2, 5));
        assert!(!big.is_filled(3, 0));
    }
}
