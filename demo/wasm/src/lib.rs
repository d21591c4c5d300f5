// Copyright 2025 Lars Brubaker
// WASM bindings for geoarea

use geoarea::{
    Blit, EngineConfig, LngLat, Projection, Rect, Region, RegionSet, Viewport, WebMercator,
};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main_js() {
    console_error_panic_hook::set_once();
}

fn js_err(e: geoarea::Error) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// One cached fill: stretch `image_width` x `image_height` RGBA8 pixels over
/// `width` x `height` display pixels at `(x, y)`.
#[wasm_bindgen]
pub struct BlitJs {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub image_width: u32,
    pub image_height: u32,
    data: Vec<u8>,
}

#[wasm_bindgen]
impl BlitJs {
    pub fn data(&self) -> Vec<u8> {
        self.data.clone()
    }
}

impl From<&Blit<'_>> for BlitJs {
    fn from(blit: &Blit<'_>) -> Self {
        BlitJs {
            x: blit.x as i32,
            y: blit.y as i32,
            width: blit.width,
            height: blit.height,
            image_width: blit.image.width(),
            image_height: blit.image.height(),
            data: blit.image.data().to_vec(),
        }
    }
}

/// Region editor driven by pointer events. Coordinates are projected
/// Web-Mercator units in [0, 1].
#[wasm_bindgen]
pub struct RegionEditorJs {
    inner: RegionSet,
    frame: Vec<Option<BlitJs>>,
}

#[wasm_bindgen]
impl RegionEditorJs {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<RegionEditorJs, JsValue> {
        let inner = RegionSet::new(EngineConfig::default()).map_err(js_err)?;
        Ok(RegionEditorJs {
            inner,
            frame: Vec::new(),
        })
    }

    pub fn begin(&mut self, name: &str) {
        self.inner.begin(name);
    }

    pub fn cancel(&mut self) {
        self.inner.cancel();
    }

    pub fn push(&mut self, x: f64, y: f64) {
        if let Some(r) = self.inner.current_mut() {
            r.push((x, y));
        }
    }

    pub fn set_pending(&mut self, x: f64, y: f64) {
        if let Some(r) = self.inner.current_mut() {
            r.set_pending((x, y));
        }
    }

    pub fn reset_pending(&mut self) {
        if let Some(r) = self.inner.current_mut() {
            r.reset_pending();
        }
    }

    /// Commits the pending vertex if it keeps the ring simple.
    pub fn confirm_pending(&mut self) -> bool {
        match self.inner.current_mut() {
            Some(r) if r.legal() => r.confirm_pending(),
            _ => false,
        }
    }

    pub fn undo(&mut self) {
        if let Some(r) = self.inner.current_mut() {
            r.undo();
        }
    }

    pub fn finish(&mut self) -> bool {
        self.inner.finish_current()
    }

    pub fn legal(&self) -> bool {
        self.inner.current().map_or(true, Region::legal)
    }

    pub fn size_legal(&self) -> bool {
        self.inner.current().map_or(true, Region::size_legal)
    }

    pub fn vertex_count(&self) -> u32 {
        self.inner.current().map_or(0, |r| r.vertex_count() as u32)
    }

    /// Area readout of the region in progress, e.g. `"1.234 km²"`.
    pub fn area_text(&self) -> String {
        self.inner
            .current()
            .map(|r| r.area_text().to_string())
            .unwrap_or_default()
    }

    pub fn committed_area(&self) -> f64 {
        self.inner.current().map_or(0.0, Region::committed_area)
    }

    pub fn speculative_area(&self) -> f64 {
        self.inner.current().map_or(0.0, Region::speculative_area)
    }

    pub fn region_count(&self) -> u32 {
        self.inner.len() as u32
    }

    /// Names of the committed regions.
    pub fn region_names(&self) -> Vec<String> {
        self.inner.info().into_iter().map(|(_, name)| name).collect()
    }

    /// Renders every visible region through its raster cache and returns
    /// the number of blits; fetch them with [`RegionEditorJs::blit`].
    /// Pass `resize` after the canvas size changed.
    #[allow(clippy::too_many_arguments)]
    pub fn draw(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        width: u32,
        height: u32,
        resize: bool,
    ) -> Result<u32, JsValue> {
        let viewport = Viewport::new(Rect::new(x1, y1, x2, y2), width, height).map_err(js_err)?;
        self.frame = self
            .inner
            .draw_all(&viewport, resize)
            .iter()
            .map(|blit| Some(BlitJs::from(blit)))
            .collect();
        Ok(self.frame.len() as u32)
    }

    /// Takes blit `index` of the last frame, bottom-most first.
    pub fn blit(&mut self, index: u32) -> Option<BlitJs> {
        self.frame.get_mut(index as usize).and_then(Option::take)
    }

    /// Arrows towards off-screen regions, flattened as
    /// `[x0, y0, tip_x, tip_y, x1, y1, stroke_width, rgba]` per arrow, with the
    /// color packed as `0xRRGGBBAA`.
    pub fn indicators(
        &self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        width: u32,
        height: u32,
    ) -> Result<Vec<f64>, JsValue> {
        let viewport = Viewport::new(Rect::new(x1, y1, x2, y2), width, height).map_err(js_err)?;
        let mut out = Vec::new();
        for (color, arrow) in self.inner.indicators(&viewport) {
            let [a, tip, b] = arrow.polyline();
            let rgba = u32::from_be_bytes(color.to_array());
            out.extend_from_slice(&[a.x, a.y, tip.x, tip.y, b.x, b.y, arrow.stroke_width(), rgba as f64]);
        }
        Ok(out)
    }
}

/// Projects longitude/latitude in degrees to `[x, y]`.
#[wasm_bindgen]
pub fn project(lng: f64, lat: f64) -> Vec<f64> {
    let p = WebMercator.project(LngLat::new(lng, lat));
    vec![p.x, p.y]
}

/// Inverse of [`project`], returning `[lng, lat]`.
#[wasm_bindgen]
pub fn unproject(x: f64, y: f64) -> Vec<f64> {
    let ll = WebMercator.unproject(geoarea::Point::new(x, y));
    vec![ll.lng, ll.lat]
}
