//! Respin produces perturbed re-encodings of images and short videos.
//!
//! Each variation is close to its source visually but differs in pixel data,
//! encoder settings and (for video) container metadata. The entry points are:
//!
//! - [`produce`]: `count` variations of one [`MediaBlob`]
//! - [`process_archive`]: one transformed JPEG per image entry of a zip archive
//!
//! Randomness is always passed in. Use [`seeded_rng`] for reproducible batches
//! and [`entropy_rng`] otherwise.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod archive;
pub(crate) mod media;
pub(crate) mod orchestrator;
pub(crate) mod plan;
pub(crate) mod raster;
pub(crate) mod video;

pub use crate::foundation::config::{
    ArchiveConfig, EngineConfig, ImageConfig, OnEntryError, Threading, VideoConfig,
};
pub use crate::foundation::error::{ErrorKind, RespinError, RespinResult};
pub use crate::foundation::rng::{VariationRng, entropy_rng, gaussian, seeded_rng};

pub use crate::archive::batch::{
    ArchiveEntry, ArchiveOutput, ArchiveSummary, process_archive, read_entries, renamed_entry,
};
pub use crate::media::blob::{
    IMAGE_EXTENSIONS, MediaBlob, MediaKind, VIDEO_EXTENSIONS, extension_of,
};
pub use crate::orchestrator::{MAX_VARIATIONS, VariationOutput, VariationRequest, produce};
pub use crate::plan::image::{ChromaSubsampling, ImagePlan, SpatialFilter};
pub use crate::plan::video::{ContainerMetadata, CropFractions, EffectClass, VideoPlan};
pub use crate::raster::pipeline::{decode_canonical, perturb, render_variation};
pub use crate::video::filters::{CropRect, crop_rect, filter_chain};
pub use crate::video::pipeline::{VideoSource, export_args};
pub use crate::video::probe::{VideoSourceInfo, is_ffmpeg_on_path, probe_video, tool_on_path};
