use rand::Rng;
use rayon::prelude::*;

use crate::{
    foundation::{
        config::{EngineConfig, Threading},
        error::{RespinError, RespinResult},
    },
    media::blob::{MediaBlob, MediaKind},
    plan::{image::ImagePlan, video::VideoPlan},
    raster::pipeline::{decode_canonical, render_variation},
    video::pipeline::VideoSource,
};

/// Largest number of variations one request may ask for.
pub const MAX_VARIATIONS: u32 = 5;

/// How many variations to produce and how far they may drift.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct VariationRequest {
    /// Number of outputs, `1..=MAX_VARIATIONS`.
    pub count: u32,
    /// Jitter magnitude of the enhancement factors, in `[0, 1)`.
    pub modification_level: f64,
}

impl Default for VariationRequest {
    fn default() -> Self {
        Self {
            count: 3,
            modification_level: 0.2,
        }
    }
}

impl VariationRequest {
    /// Request `count` variations at the default modification level.
    pub fn with_count(count: u32) -> Self {
        Self {
            count,
            ..Self::default()
        }
    }

    /// Reject counts outside `1..=MAX_VARIATIONS` and non-finite or
    /// out-of-range levels.
    pub fn validate(&self) -> RespinResult<()> {
        if !(1..=MAX_VARIATIONS).contains(&self.count) {
            return Err(RespinError::configuration(format!(
                "count must be in 1..={MAX_VARIATIONS}, got {}",
                self.count
            )));
        }
        if !self.modification_level.is_finite() || !(0.0..1.0).contains(&self.modification_level)
        {
            return Err(RespinError::configuration(format!(
                "modification_level must be in [0, 1), got {}",
                self.modification_level
            )));
        }
        Ok(())
    }
}

/// Encoded variations in request order.
#[derive(Clone, Debug)]
pub struct VariationOutput {
    kind: MediaKind,
    items: Vec<Vec<u8>>,
}

impl VariationOutput {
    /// Kind of media the items encode (JPEG for images, MP4 for video).
    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    /// Number of variations.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// `true` when there are no variations.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Bytes of the `index`-th variation.
    pub fn get(&self, index: usize) -> Option<&[u8]> {
        self.items.get(index).map(Vec::as_slice)
    }

    /// Iterate variations in order.
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        self.items.iter().map(Vec::as_slice)
    }

    /// Take ownership of the encoded buffers.
    pub fn into_inner(self) -> Vec<Vec<u8>> {
        self.items
    }
}

/// Produce `request.count` perturbed re-encodings of `blob`.
///
/// Plans are drawn from `rng` sequentially in index order, so a seeded
/// generator fixes the whole batch even when image variations render in
/// parallel. Any failing variation fails the request.
#[tracing::instrument(skip(blob, config, rng), fields(kind = ?blob.kind(), len = blob.bytes().len()))]
pub fn produce<R: Rng + ?Sized>(
    blob: &MediaBlob,
    request: &VariationRequest,
    config: &EngineConfig,
    rng: &mut R,
) -> RespinResult<VariationOutput> {
    request.validate()?;
    config.validate()?;

    let items = match blob.kind() {
        MediaKind::Image => produce_images(blob, request, config, rng)?,
        MediaKind::Video => produce_videos(blob, request, config, rng)?,
        MediaKind::Other => {
            return Err(RespinError::decode(
                "input is neither a supported image nor a supported video",
            ));
        }
    };

    tracing::info!(count = items.len(), "variations produced");
    Ok(VariationOutput {
        kind: blob.kind(),
        items,
    })
}

fn produce_images<R: Rng + ?Sized>(
    blob: &MediaBlob,
    request: &VariationRequest,
    config: &EngineConfig,
    rng: &mut R,
) -> RespinResult<Vec<Vec<u8>>> {
    let source = decode_canonical(blob.bytes())?;
    let plans: Vec<ImagePlan> = (0..request.count)
        .map(|index| {
            let plan = ImagePlan::generate(
                rng,
                source.width(),
                source.height(),
                request.modification_level,
                &config.image,
            );
            tracing::debug!(index, ?plan, "image plan");
            plan
        })
        .collect();

    if config.threading.parallel && plans.len() > 1 {
        let pool = build_thread_pool(&config.threading)?;
        pool.install(|| {
            plans
                .par_iter()
                .map(|plan| render_variation(&source, plan, &config.image))
                .collect::<RespinResult<Vec<_>>>()
        })
    } else {
        plans
            .iter()
            .map(|plan| render_variation(&source, plan, &config.image))
            .collect()
    }
}

fn produce_videos<R: Rng + ?Sized>(
    blob: &MediaBlob,
    request: &VariationRequest,
    config: &EngineConfig,
    rng: &mut R,
) -> RespinResult<Vec<Vec<u8>>> {
    let source = VideoSource::open(blob.bytes(), blob.extension().unwrap_or("mp4"))?;

    let mut items = Vec::with_capacity(request.count as usize);
    for index in 0..request.count as usize {
        let plan = VideoPlan::generate(rng, index, source.info(), &config.video);
        tracing::debug!(index, ?plan, "video plan");
        items.push(source.render(&plan, &config.video)?);
    }
    Ok(items)
}

fn build_thread_pool(threading: &Threading) -> RespinResult<rayon::ThreadPool> {
    if let Some(n) = threading.threads
        && n == 0
    {
        return Err(RespinError::configuration(
            "threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threading.threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| anyhow::anyhow!("failed to build rayon thread pool: {e}").into())
}

#[cfg(test)]
#[path = "../tests/unit/orchestrator.rs"]
mod tests;
