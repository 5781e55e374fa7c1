//! Perturbation plan generation: one fresh, independently drawn plan per variation.

pub(crate) mod image;
pub(crate) mod video;
