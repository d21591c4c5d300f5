// Copyright 2025 Lars Brubaker
// License: MIT
//
// Human-readable area text.

use std::fmt;

use crate::geom::Real;

/// Displays an area given in square metres, switching to square kilometres
/// for large values. A shape whose area cannot be trusted renders as `---`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AreaText(Option<Real>);

impl AreaText {
    pub fn new(square_metres: Real) -> Self {
        AreaText(Some(square_metres))
    }

    pub fn illegal() -> Self {
        AreaText(None)
    }

    pub fn value(&self) -> Option<Real> {
        self.0
    }
}

/// Formats `v` with four significant digits, dropping trailing zeros.
fn significant(v: Real) -> String {
    if v == 0.0 || !v.is_finite() {
        return format!("{}", v);
    }
    let magnitude = v.abs().log10().floor() as i32;
    let decimals = (3 - magnitude).max(0) as usize;
    let s = format!("{:.*}", decimals, v);
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

impl fmt::Display for AreaText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            None => write!(f, "---"),
            Some(a) if a > 1e9 => write!(f, "{:.3e} km²", a / 1e6),
            Some(a) if a > 1e4 => write!(f, "{:.4} km²", a / 1e6),
            Some(a) => write!(f, "{} m²", significant(a)),
        }
    }
}
