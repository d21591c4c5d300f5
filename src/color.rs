// Copyright 2025 Lars Brubaker
// License: MIT
//
// Fill colors and the palette that hands them out to new regions.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geom::Real;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba { r, g, b, a }
    }

    #[inline]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Rgba { a, ..self }
    }

    /// Opaque color from hue in degrees, saturation and lightness in [0, 1].
    pub fn from_hsl(hue: Real, saturation: Real, lightness: Real) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = lightness - c / 2.0;
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let channel = |v: Real| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Rgba::new(channel(r), channel(g), channel(b), 255)
    }
}

/// Hands out well-separated colors by walking the hue circle in large,
/// randomized steps.
#[derive(Clone, Debug)]
pub struct ColorGenerator {
    rng: Pcg32,
    hue: Real,
}

impl Default for ColorGenerator {
    fn default() -> Self {
        ColorGenerator::new(0)
    }
}

impl ColorGenerator {
    pub fn new(seed: u64) -> Self {
        ColorGenerator {
            rng: Pcg32::seed_from_u64(seed),
            hue: 0.0,
        }
    }

    pub fn next_color(&mut self, alpha: u8) -> Rgba {
        self.hue = (self.hue + self.rng.gen_range(180.0..300.0)) % 360.0;
        let saturation = self.rng.gen_range(0.75..1.0);
        let lightness = self.rng.gen_range(0.45..0.75);
        Rgba::from_hsl(self.hue, saturation, lightness).with_alpha(alpha)
    }

    pub fn hue(&self) -> Real {
        self.hue
    }
}
