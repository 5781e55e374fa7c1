use rand::Rng;

use crate::{foundation::config::VideoConfig, video::probe::VideoSourceInfo};

/// Bounds of the color multiplier, contrast multiplier and gamma draws.
pub const FACTOR_RANGE: (f64, f64) = (0.9, 1.1);
/// Maximum absolute luminance shift, in 8-bit code values.
pub const MAX_LUM_SHIFT: f64 = 5.0;
/// Probability that a variation is cropped.
pub const CROP_PROBABILITY: f64 = 0.5;
/// Bounds of the per-edge crop fraction.
pub const CROP_FRACTION_RANGE: (f64, f64) = (0.02, 0.05);

/// Which adjustment a video variation applies. Picked by index, not drawn, so a
/// multi-variation batch always spreads across classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EffectClass {
    /// Scale all color channels by one multiplier.
    Color,
    /// Shift luminance and scale contrast.
    LumContrast,
    /// Gamma curve.
    Gamma,
    /// All three at half strength.
    Mild,
}

impl EffectClass {
    /// Class for the zero-based `index`-th variation of a batch.
    pub fn for_index(index: usize) -> Self {
        match index % 4 {
            0 => Self::Color,
            1 => Self::LumContrast,
            2 => Self::Gamma,
            _ => Self::Mild,
        }
    }
}

/// Fraction of the frame removed from each edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CropFractions {
    /// Removed from the left edge.
    pub left: f64,
    /// Removed from the right edge.
    pub right: f64,
    /// Removed from the top edge.
    pub top: f64,
    /// Removed from the bottom edge.
    pub bottom: f64,
}

/// Container tags written in place of whatever the source carried.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContainerMetadata {
    /// `title` tag.
    pub title: String,
    /// `artist` tag (written empty).
    pub artist: String,
    /// `comment` tag.
    pub comment: String,
    /// `date` tag, `YYYY-MM-DD`.
    pub date: String,
}

/// Fully-resolved parameters for one video variation.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoPlan {
    /// Zero-based position in the batch.
    pub index: usize,
    /// Adjustment selected by `index % 4`.
    pub effect: EffectClass,
    /// RGB multiplier for [`EffectClass::Color`].
    pub color_multiplier: f64,
    /// Luminance offset in 8-bit code values.
    pub lum_shift: f64,
    /// Contrast multiplier.
    pub contrast: f64,
    /// Gamma exponent.
    pub gamma: f64,
    /// Optional crop.
    pub crop: Option<CropFractions>,
    /// Output length; the source is truncated to this, never stretched.
    pub duration_secs: f64,
    /// Output frame rate.
    pub target_fps: f64,
    /// Replacement container metadata.
    pub metadata: ContainerMetadata,
}

impl VideoPlan {
    /// Draw a plan for the `index`-th variation of `source`.
    pub fn generate<R: Rng + ?Sized>(
        rng: &mut R,
        index: usize,
        source: &VideoSourceInfo,
        cfg: &VideoConfig,
    ) -> Self {
        let color_multiplier = rng.random_range(FACTOR_RANGE.0..=FACTOR_RANGE.1);
        let lum_shift = rng.random_range(-MAX_LUM_SHIFT..=MAX_LUM_SHIFT);
        let contrast = rng.random_range(FACTOR_RANGE.0..=FACTOR_RANGE.1);
        let gamma = rng.random_range(FACTOR_RANGE.0..=FACTOR_RANGE.1);

        let crop = rng.random_bool(CROP_PROBABILITY).then(|| {
            let mut edge = || rng.random_range(CROP_FRACTION_RANGE.0..=CROP_FRACTION_RANGE.1);
            CropFractions {
                left: edge(),
                right: edge(),
                top: edge(),
                bottom: edge(),
            }
        });

        let duration_secs = if source.duration_sec > 0.0 {
            source.duration_sec.min(cfg.max_duration_secs)
        } else {
            cfg.max_duration_secs
        };
        let target_fps = source
            .source_fps()
            .filter(|f| f.is_finite() && *f > 0.0)
            .unwrap_or(cfg.default_fps);

        let metadata = ContainerMetadata {
            title: format!("VID_{:08}", rng.random_range(0..100_000_000u32)),
            artist: String::new(),
            comment: format!("{:016x}", rng.random::<u64>()),
            date: format!(
                "{:04}-{:02}-{:02}",
                rng.random_range(2016..=2025u32),
                rng.random_range(1..=12u32),
                rng.random_range(1..=28u32)
            ),
        };

        Self {
            index,
            effect: EffectClass::for_index(index),
            color_multiplier,
            lum_shift,
            contrast,
            gamma,
            crop,
            duration_secs,
            target_fps,
            metadata,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plan/video.rs"]
mod tests;
