//! Raster perturbation chain: geometry, color, noise, JPEG.

pub(crate) mod enhance;
pub(crate) mod geometry;
pub(crate) mod jpeg;
pub(crate) mod kernel;
pub(crate) mod noise;
pub(crate) mod pipeline;
