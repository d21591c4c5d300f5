// Copyright 2025 Lars Brubaker
// License: MIT
//
// Named, colored regions and the collection that owns them.
//
// A region is built in the collection's in-progress slot and moves into the
// committed list once its ring is finished. Every region owns its raster
// cache; nothing is shared between regions.

use log::{debug, info};

use crate::area::AreaAccumulator;
use crate::cache::{Blit, RasterCache, Viewport};
use crate::color::{ColorGenerator, Rgba};
use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::format::AreaText;
use crate::indicator::Indicator;
use crate::geom::{BoundingBox, Point, Real};
use crate::polygon::Polygon;
use crate::projection::{Projection, WebMercator};
use crate::raster::{rasterize, PixelBuffer};

#[derive(Clone, Debug)]
pub struct Region<P = WebMercator> {
    name: String,
    color: Rgba,
    visible: bool,
    polygon: Polygon<P>,
    cache: RasterCache,
}

impl<P: Projection> Region<P> {
    pub fn new(name: impl Into<String>, color: Rgba, polygon: Polygon<P>, downsample: u32) -> Self {
        Region {
            name: name.into(),
            color,
            visible: true,
            polygon,
            cache: RasterCache::new(downsample),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    pub fn set_color(&mut self, color: Rgba) {
        self.color = color;
        self.cache.invalidate();
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn flip_visible(&mut self) {
        self.visible = !self.visible;
        self.cache.invalidate();
    }

    pub fn polygon(&self) -> &Polygon<P> {
        &self.polygon
    }

    pub fn cache(&self) -> &RasterCache {
        &self.cache
    }

    /// Drops the cached raster; the next draw regenerates it.
    pub fn request_invalidate(&mut self) {
        self.cache.invalidate();
    }

    pub fn push(&mut self, point: impl Into<Point>) {
        self.polygon.push(point);
        self.cache.invalidate();
    }

    pub fn set_pending(&mut self, point: impl Into<Point>) {
        self.polygon.set_pending(point);
        self.cache.invalidate();
    }

    pub fn reset_pending(&mut self) {
        self.polygon.reset_pending();
        self.cache.invalidate();
    }

    pub fn confirm_pending(&mut self) -> bool {
        let confirmed = self.polygon.confirm_pending();
        if confirmed {
            self.cache.invalidate();
        }
        confirmed
    }

    pub fn undo(&mut self) {
        self.polygon.undo();
        self.cache.invalidate();
    }

    pub fn finish(&mut self) -> bool {
        let finished = self.polygon.finish();
        if finished {
            self.cache.invalidate();
        }
        finished
    }

    pub fn legal(&self) -> bool {
        self.polygon.legal()
    }

    pub fn size_legal(&self) -> bool {
        self.polygon.size_legal()
    }

    pub fn is_finished(&self) -> bool {
        self.polygon.is_finished()
    }

    pub fn vertex_count(&self) -> usize {
        self.polygon.vertex_count()
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.polygon.bounding_box()
    }

    pub fn center(&self) -> Option<Point> {
        self.polygon.center()
    }

    pub fn committed_area(&self) -> Real {
        self.polygon.committed_area()
    }

    pub fn speculative_area(&self) -> Real {
        self.polygon.speculative_area()
    }

    /// Area readout for the ring as it would close right now.
    pub fn area_text(&self) -> AreaText {
        if self.polygon.size_legal() {
            AreaText::new(self.polygon.speculative_area())
        } else {
            AreaText::illegal()
        }
    }

    /// Cached fill for `viewport`. Hidden regions draw nothing.
    pub fn draw(&mut self, viewport: &Viewport, resize: bool) -> Option<Blit<'_>> {
        if !self.visible {
            return None;
        }
        self.cache.draw(&self.polygon, viewport, self.color, resize)
    }

    /// Arrow towards the region when its bounding box lies entirely outside
    /// `viewport`. Hidden and empty regions get none.
    pub fn indicator(&self, viewport: &Viewport) -> Option<Indicator> {
        if !self.visible {
            return None;
        }
        let bbox = self.polygon.bounding_box()?;
        if !bbox.is_clipped(&viewport.rect()) {
            return None;
        }
        let accumulator = self.polygon.accumulator();
        Some(Indicator::new(
            accumulator.projection(),
            accumulator.sphere(),
            viewport,
            bbox.center(),
        ))
    }

    /// Uncached fill of the whole viewport at display resolution.
    pub fn rasterize(&self, viewport: &Viewport) -> PixelBuffer {
        rasterize(
            &self.polygon,
            viewport.rect(),
            viewport.width(),
            viewport.height(),
            self.color,
        )
    }
}

/// The in-progress region plus every committed one, in creation order.
#[derive(Clone, Debug)]
pub struct RegionSet<P = WebMercator> {
    config: EngineConfig,
    projection: P,
    current: Option<Region<P>>,
    regions: Vec<Region<P>>,
    palette: ColorGenerator,
}

impl RegionSet<WebMercator> {
    pub fn new(config: EngineConfig) -> Result<Self> {
        RegionSet::with_projection(WebMercator, config)
    }
}

impl<P: Projection + Clone> RegionSet<P> {
    pub fn with_projection(projection: P, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(RegionSet {
            config,
            projection,
            current: None,
            regions: Vec::new(),
            palette: ColorGenerator::default(),
        })
    }

    /// Replaces the palette, e.g. to get a different color sequence.
    pub fn with_palette(mut self, palette: ColorGenerator) -> Self {
        self.palette = palette;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Starts a new region with the next palette color. Any region still in
    /// progress is discarded.
    pub fn begin(&mut self, name: impl Into<String>) -> &mut Region<P> {
        let color = self.palette.next_color(self.config.default_alpha);
        self.begin_with_color(name, color)
    }

    pub fn begin_with_color(&mut self, name: impl Into<String>, color: Rgba) -> &mut Region<P> {
        if let Some(old) = self.current.take() {
            debug!("discarding unfinished region `{}`", old.name());
        }
        let accumulator = AreaAccumulator::new(self.projection.clone(), self.config.sphere);
        let polygon = Polygon::with_accumulator(accumulator);
        self.current.insert(Region::new(name, color, polygon, self.config.downsample))
    }

    pub fn current(&self) -> Option<&Region<P>> {
        self.current.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut Region<P>> {
        self.current.as_mut()
    }

    /// Finishes the in-progress region and moves it to the committed list.
    ///
    /// Returns false when there is no region in progress or its ring cannot
    /// be closed; the region then stays in progress. The pending vertex only
    /// has to keep the last edge simple, since it is dropped on close.
    pub fn finish_current(&mut self) -> bool {
        let Some(region) = self.current.as_mut() else {
            return false;
        };
        if !region.finish() {
            debug!("region `{}` cannot be closed yet", region.name());
            return false;
        }
        if let Some(region) = self.current.take() {
            info!(
                "committed region `{}` ({})",
                region.name(),
                region.area_text()
            );
            self.regions.push(region);
        }
        true
    }

    /// Drops the in-progress region.
    pub fn cancel(&mut self) -> Option<Region<P>> {
        self.current.take()
    }

    pub fn regions(&self) -> &[Region<P>] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn get(&self, name: &str) -> Result<&Region<P>> {
        self.regions
            .iter()
            .find(|r| r.name() == name)
            .ok_or_else(|| Error::UnknownRegion(name.to_string()))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut Region<P>> {
        self.regions
            .iter_mut()
            .find(|r| r.name() == name)
            .ok_or_else(|| Error::UnknownRegion(name.to_string()))
    }

    pub fn remove(&mut self, name: &str) -> Result<Region<P>> {
        let index = self
            .regions
            .iter()
            .position(|r| r.name() == name)
            .ok_or_else(|| Error::UnknownRegion(name.to_string()))?;
        Ok(self.regions.remove(index))
    }

    /// Color and name of every committed region.
    pub fn info(&self) -> Vec<(Rgba, String)> {
        self.regions
            .iter()
            .map(|r| (r.color(), r.name().to_string()))
            .collect()
    }

    /// Arrows towards every visible region outside `viewport`, with the
    /// region's color.
    pub fn indicators(&self, viewport: &Viewport) -> Vec<(Rgba, Indicator)> {
        self.regions
            .iter()
            .chain(self.current.as_ref())
            .filter_map(|r| r.indicator(viewport).map(|i| (r.color(), i)))
            .collect()
    }

    /// Blits for every visible region, committed ones first and the region
    /// in progress on top.
    pub fn draw_all(&mut self, viewport: &Viewport, resize: bool) -> Vec<Blit<'_>> {
        let committed = self.regions.iter_mut().filter_map(|r| r.draw(viewport, resize));
        let current = self.current.as_mut().and_then(|r| r.draw(viewport, resize));
        committed.chain(current).collect()
    }
}
