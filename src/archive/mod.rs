//! Zip-in, zip-out batch processing.

pub(crate) mod batch;
