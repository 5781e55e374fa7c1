//! Video variations via the system `ffmpeg`/`ffprobe` binaries.
//!
//! We shell out rather than link libav so the crate builds without native
//! FFmpeg headers; a missing binary surfaces as `UnsupportedFeature`.

pub(crate) mod filters;
pub(crate) mod pipeline;
pub(crate) mod probe;
