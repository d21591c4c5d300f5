// Copyright 2025 Lars Brubaker
// License: MIT
//
// Error type for the fallible edges of the engine.
//
// Geometry itself never fails: illegal shapes are a queryable state, not an
// error. Only viewport construction, configuration and region lookups do.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid viewport: {0}")]
    InvalidViewport(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("no region named `{0}`")]
    UnknownRegion(String),

    #[cfg(feature = "serde")]
    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
