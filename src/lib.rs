// geoarea: incremental geodesic polygon measurement and fill rasterization
// Copyright 2025 Lars Brubaker
// License: MIT

pub mod area;
pub mod cache;
pub mod color;
pub mod config;
pub mod error;
pub mod format;
pub mod indicator;
pub mod geom;
pub mod polygon;
pub mod projection;
pub mod raster;
pub mod region;
pub mod sphere;

pub use area::AreaAccumulator;
pub use cache::{Blit, CacheState, RasterCache, Viewport};
pub use color::{ColorGenerator, Rgba};
pub use config::EngineConfig;
pub use error::{Error, Result};
pub use format::AreaText;
pub use indicator::Indicator;
pub use geom::{BoundingBox, Point, Real, Rect};
pub use polygon::Polygon;
pub use projection::{Projection, WebMercator};
pub use raster::{rasterize, PixelBuffer};
pub use region::{Region, RegionSet};
pub use sphere::{LngLat, Sphere};
