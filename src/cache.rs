// Copyright 2025 Lars Brubaker
// License: MIT
//
// Per-polygon raster cache.
//
// A polygon that fits inside the viewport is rasterized once over its own
// bounding box. Panning then only moves the blit offset, computed from the
// world-space anchor the raster was produced at. Anything else (a shape
// larger than the viewport, a zoom, a resize, an edit) regenerates.

use log::{debug, trace};

use crate::config::DEFAULT_DOWNSAMPLE;
use crate::error::{Error, Result};
use crate::geom::{BoundingBox, Point, Real, Rect};
use crate::polygon::Polygon;
use crate::projection::Projection;
use crate::raster::{rasterize, PixelBuffer, Rgba};

/// Relative tolerance when deciding whether two viewports share a zoom level.
const EXTENT_TOLERANCE: Real = 1e-9;

/// A world rectangle shown on a `width` x `height` pixel display.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    rect: Rect,
    width: u32,
    height: u32,
}

impl Viewport {
    pub fn new(rect: Rect, width: u32, height: u32) -> Result<Self> {
        let finite = [rect.x1, rect.y1, rect.x2, rect.y2].iter().all(|v| v.is_finite());
        if !finite {
            return Err(Error::InvalidViewport(format!("non-finite rectangle {:?}", rect)));
        }
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return Err(Error::InvalidViewport(format!("empty rectangle {:?}", rect)));
        }
        if width == 0 || height == 0 {
            return Err(Error::InvalidViewport(format!(
                "display size {}x{} has no pixels",
                width, height
            )));
        }
        Ok(Viewport { rect, width, height })
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The same viewport moved by `(dx, dy)` world units.
    pub fn translated(&self, dx: Real, dy: Real) -> Viewport {
        let r = self.rect;
        Viewport {
            rect: Rect::new(r.x1 + dx, r.y1 + dy, r.x2 + dx, r.y2 + dy),
            ..*self
        }
    }

    /// Display pixel containing world point `p`.
    pub fn to_screen(&self, p: Point) -> (i64, i64) {
        let x = (p.x - self.rect.x1) / self.rect.width() * self.width as Real;
        let y = (p.y - self.rect.y1) / self.rect.height() * self.height as Real;
        (x.floor() as i64, y.floor() as i64)
    }

    fn same_scale(&self, extent: (Real, Real), display: (u32, u32)) -> bool {
        let close = |a: Real, b: Real| (a - b).abs() <= EXTENT_TOLERANCE * a.abs().max(b.abs());
        display == (self.width, self.height)
            && close(extent.0, self.rect.width())
            && close(extent.1, self.rect.height())
    }
}

/// What the canvas should draw: `image` stretched to `width` x `height`
/// display pixels with its top-left corner at `(x, y)`.
#[derive(Copy, Clone, Debug)]
pub struct Blit<'a> {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
    pub image: &'a PixelBuffer,
}

#[derive(Clone, Debug)]
pub struct CacheEntry {
    /// World position of the raster's top-left corner.
    pub anchor: Point,
    /// World size of the viewport the raster was produced for.
    pub extent: (Real, Real),
    /// Display size of that viewport.
    pub display: (u32, u32),
    /// Display pixels the raster covers.
    pub size: (u32, u32),
    pub revision: u64,
    pub color: Rgba,
    pub buffer: PixelBuffer,
}

#[derive(Clone, Debug, Default)]
pub enum CacheState {
    #[default]
    Empty,
    Valid(CacheEntry),
}

#[derive(Clone, Debug)]
pub struct RasterCache {
    state: CacheState,
    downsample: u32,
    /// Last uncached full-viewport raster, kept so a [`Blit`] can borrow it.
    scratch: Option<PixelBuffer>,
    rasterizations: u64,
}

impl Default for RasterCache {
    fn default() -> Self {
        RasterCache::new(DEFAULT_DOWNSAMPLE)
    }
}

/// Internal raster size for `display` pixels.
fn reduced(display: u32, downsample: u32) -> u32 {
    ((display + downsample - 1) / downsample).max(1)
}

impl RasterCache {
    pub fn new(downsample: u32) -> Self {
        RasterCache {
            state: CacheState::Empty,
            downsample: downsample.max(1),
            scratch: None,
            rasterizations: 0,
        }
    }

    pub fn state(&self) -> &CacheState {
        &self.state
    }

    pub fn is_valid(&self) -> bool {
        matches!(self.state, CacheState::Valid(_))
    }

    pub fn anchor(&self) -> Option<Point> {
        match &self.state {
            CacheState::Valid(entry) => Some(entry.anchor),
            CacheState::Empty => None,
        }
    }

    /// Number of times this cache has invoked the rasterizer.
    pub fn rasterizations(&self) -> u64 {
        self.rasterizations
    }

    /// Forces regeneration on the next draw.
    pub fn invalidate(&mut self) {
        self.state = CacheState::Empty;
        self.scratch = None;
    }

    /// Produces the blit for `polygon` in `viewport`, regenerating the raster
    /// only when the cached one cannot be repositioned.
    ///
    /// Returns `None` when there is nothing to draw: fewer than three
    /// vertices, or a shape entirely outside the viewport.
    pub fn draw<P: Projection>(
        &mut self,
        polygon: &Polygon<P>,
        viewport: &Viewport,
        color: Rgba,
        resize: bool,
    ) -> Option<Blit<'_>> {
        if resize {
            self.invalidate();
        }
        if polygon.vertex_count() < 3 {
            return None;
        }
        let bounds = fill_bounds(polygon)?;
        let rect = viewport.rect();
        if bounds.is_clipped(&rect) {
            return None;
        }

        if !bounds.fits_within(rect.width(), rect.height()) {
            self.state = CacheState::Empty;
            let buffer = rasterize(
                polygon,
                rect,
                reduced(viewport.width(), self.downsample),
                reduced(viewport.height(), self.downsample),
                color,
            );
            self.rasterizations += 1;
            debug!("rasterized full viewport {}x{}", buffer.width(), buffer.height());
            let image = self.scratch.insert(buffer);
            return Some(Blit {
                x: 0,
                y: 0,
                width: viewport.width(),
                height: viewport.height(),
                image,
            });
        }

        if let CacheState::Valid(entry) = &self.state {
            let stale = entry.revision != polygon.revision()
                || entry.color != color
                || !viewport.same_scale(entry.extent, entry.display);
            if stale {
                self.state = CacheState::Empty;
            }
        }

        if let CacheState::Empty = self.state {
            let entry = self.regenerate(polygon, viewport, bounds, color);
            self.state = CacheState::Valid(entry);
        } else {
            trace!("re-blitting cached raster");
        }

        let CacheState::Valid(entry) = &self.state else {
            return None;
        };
        let (x, y) = viewport.to_screen(entry.anchor);
        Some(Blit {
            x,
            y,
            width: entry.size.0,
            height: entry.size.1,
            image: &entry.buffer,
        })
    }

    fn regenerate<P: Projection>(
        &mut self,
        polygon: &Polygon<P>,
        viewport: &Viewport,
        bounds: BoundingBox,
        color: Rgba,
    ) -> CacheEntry {
        let rect = viewport.rect();
        let px = rect.width() / viewport.width() as Real;
        let py = rect.height() / viewport.height() as Real;
        // Whole display pixels, so the raster stretches uniformly on blit.
        let size = (
            ((bounds.width() / px).ceil() as u32).max(1),
            ((bounds.height() / py).ceil() as u32).max(1),
        );
        let world = Rect::new(
            bounds.min.x,
            bounds.min.y,
            bounds.min.x + size.0 as Real * px,
            bounds.min.y + size.1 as Real * py,
        );
        let buffer = rasterize(
            polygon,
            world,
            reduced(size.0, self.downsample),
            reduced(size.1, self.downsample),
            color,
        );
        self.rasterizations += 1;
        self.scratch = None;
        debug!(
            "anchored raster {}x{} at ({:.6}, {:.6})",
            buffer.width(),
            buffer.height(),
            bounds.min.x,
            bounds.min.y
        );
        CacheEntry {
            anchor: bounds.min,
            extent: (rect.width(), rect.height()),
            display: (viewport.width(), viewport.height()),
            size,
            revision: polygon.revision(),
            color,
            buffer,
        }
    }
}

/// Bounding box of everything that can be filled, pending vertex included.
fn fill_bounds<P: Projection>(polygon: &Polygon<P>) -> Option<BoundingBox> {
    let mut bbox = polygon.bounding_box()?;
    if let Some(p) = polygon.pending() {
        bbox.extend(p);
    }
    Some(bbox)
}
