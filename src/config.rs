// Copyright 2025 Lars Brubaker
// License: MIT
//
// Engine tunables.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geom::Real;
use crate::sphere::Sphere;

/// Linear factor between display resolution and raster resolution.
pub const DEFAULT_DOWNSAMPLE: u32 = 3;

/// Fill alpha for regions created without an explicit color.
pub const DEFAULT_ALPHA: u8 = 32;

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Rasters are produced at `1 / downsample` of the display resolution
    /// and stretched on blit.
    pub downsample: u32,
    pub sphere: Sphere,
    pub default_alpha: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            downsample: DEFAULT_DOWNSAMPLE,
            sphere: Sphere::default(),
            default_alpha: DEFAULT_ALPHA,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_downsample(mut self, downsample: u32) -> Self {
        self.downsample = downsample;
        self
    }

    pub fn with_sphere(mut self, sphere: Sphere) -> Self {
        self.sphere = sphere;
        self
    }

    pub fn with_radius(mut self, radius: Real) -> Self {
        self.sphere.radius = radius;
        self
    }

    pub fn with_default_alpha(mut self, alpha: u8) -> Self {
        self.default_alpha = alpha;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.downsample == 0 {
            return Err(Error::InvalidConfig("downsample must be at least 1".into()));
        }
        if !self.sphere.radius.is_finite() || self.sphere.radius <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "sphere radius must be positive, got {}",
                self.sphere.radius
            )));
        }
        if !self.sphere.small_side_threshold.is_finite() || self.sphere.small_side_threshold < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "small side threshold must be non-negative, got {}",
                self.sphere.small_side_threshold
            )));
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration. Missing fields keep their
    /// defaults.
    #[cfg(feature = "serde")]
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
