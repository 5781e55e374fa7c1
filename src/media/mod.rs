//! Source media descriptors.

pub(crate) mod blob;
