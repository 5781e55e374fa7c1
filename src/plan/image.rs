use rand::Rng;

use crate::foundation::config::ImageConfig;

/// Bounds of the uniform resize factor (half-open).
pub const RESIZE_FACTOR_RANGE: (f64, f64) = (0.98, 1.02);
/// Maximum absolute rotation, in degrees.
pub const MAX_ROTATION_DEG: f64 = 0.3;
/// Bounds of the per-channel multiplicative gain (half-open).
pub const CHANNEL_GAIN_RANGE: (f64, f64) = (0.99, 1.01);
/// Maximum absolute translation per axis, in pixels.
pub const MAX_TRANSLATE_PX: i32 = 2;

/// Largest modification level the generator honors; keeps factors above zero.
const MAX_LEVEL: f64 = 0.95;

/// 3x3 spatial filter applied after the enhancement passes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpatialFilter {
    /// Mild low-pass.
    Smooth,
    /// Strong unsharp-style kernel.
    Sharpen,
    /// Mild high-boost that brings out fine detail.
    Detail,
}

impl SpatialFilter {
    /// All filters a plan may pick from.
    pub const ALL: [SpatialFilter; 3] = [Self::Smooth, Self::Sharpen, Self::Detail];
}

/// JPEG chroma subsampling layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChromaSubsampling {
    /// Full-resolution chroma.
    Yuv444,
    /// Chroma halved horizontally.
    Yuv422,
    /// Chroma halved in both directions.
    Yuv420,
}

impl ChromaSubsampling {
    /// All layouts a plan may pick from.
    pub const ALL: [ChromaSubsampling; 3] = [Self::Yuv444, Self::Yuv422, Self::Yuv420];
}

/// Fully-resolved parameters for one image variation.
///
/// A plan plus the canonical source buffer determines the output bytes exactly;
/// the noise field is drawn from `noise_seed` rather than from shared state.
#[derive(Clone, Debug, PartialEq)]
pub struct ImagePlan {
    /// Scale applied to both dimensions.
    pub resize_factor: f64,
    /// `floor(width * resize_factor)`, at least 1.
    pub target_width: u32,
    /// `floor(height * resize_factor)`, at least 1.
    pub target_height: u32,
    /// Counter-clockwise rotation in degrees.
    pub rotation_deg: f64,
    /// Multiplicative gain for R, G and B.
    pub channel_gain: [f64; 3],
    /// Horizontal sampling offset in pixels.
    pub dx: i32,
    /// Vertical sampling offset in pixels.
    pub dy: i32,
    /// Brightness enhancement factor (1.0 = identity).
    pub brightness: f64,
    /// Contrast enhancement factor (1.0 = identity).
    pub contrast: f64,
    /// Saturation enhancement factor (1.0 = identity).
    pub color: f64,
    /// Sharpness enhancement factor (1.0 = identity).
    pub sharpness: f64,
    /// Filter applied after enhancement.
    pub filter: SpatialFilter,
    /// Gaussian noise standard deviation in code values.
    pub noise_sigma: f64,
    /// Seed of the per-variation noise generator.
    pub noise_seed: u64,
    /// JPEG quality, 1-100.
    pub quality: u8,
    /// JPEG chroma layout.
    pub subsampling: ChromaSubsampling,
}

impl ImagePlan {
    /// Draw a plan for a `width` x `height` source.
    ///
    /// Never fails. `modification_level` is clamped into `[0, 0.95]` so every
    /// enhancement factor stays strictly positive.
    pub fn generate<R: Rng + ?Sized>(
        rng: &mut R,
        width: u32,
        height: u32,
        modification_level: f64,
        cfg: &ImageConfig,
    ) -> Self {
        let level = if modification_level.is_finite() {
            modification_level.clamp(0.0, MAX_LEVEL)
        } else {
            0.0
        };

        let resize_factor = rng.random_range(RESIZE_FACTOR_RANGE.0..RESIZE_FACTOR_RANGE.1);
        let rotation_deg = rng.random_range(-MAX_ROTATION_DEG..=MAX_ROTATION_DEG);
        let channel_gain = [
            rng.random_range(CHANNEL_GAIN_RANGE.0..CHANNEL_GAIN_RANGE.1),
            rng.random_range(CHANNEL_GAIN_RANGE.0..CHANNEL_GAIN_RANGE.1),
            rng.random_range(CHANNEL_GAIN_RANGE.0..CHANNEL_GAIN_RANGE.1),
        ];
        let dx = rng.random_range(-MAX_TRANSLATE_PX..=MAX_TRANSLATE_PX);
        let dy = rng.random_range(-MAX_TRANSLATE_PX..=MAX_TRANSLATE_PX);

        let mut enhance = || rng.random_range((1.0 - level)..=(1.0 + level));
        let brightness = enhance();
        let contrast = enhance();
        let color = enhance();
        let sharpness = enhance();

        let filter = SpatialFilter::ALL[rng.random_range(0..SpatialFilter::ALL.len())];
        let (q_lo, q_hi) = quality_bounds(cfg);
        let quality = rng.random_range(q_lo..=q_hi);
        let subsampling = ChromaSubsampling::ALL[rng.random_range(0..ChromaSubsampling::ALL.len())];
        let noise_seed = rng.random::<u64>();

        Self {
            resize_factor,
            target_width: scaled_dim(width, resize_factor),
            target_height: scaled_dim(height, resize_factor),
            rotation_deg,
            channel_gain,
            dx,
            dy,
            brightness,
            contrast,
            color,
            sharpness,
            filter,
            noise_sigma: cfg.noise_sigma,
            noise_seed,
            quality,
            subsampling,
        }
    }
}

/// `cfg`'s quality range, ordered and clamped to `1..=100`.
fn quality_bounds(cfg: &ImageConfig) -> (u8, u8) {
    let a = cfg.quality_min.clamp(1, 100);
    let b = cfg.quality_max.clamp(1, 100);
    (a.min(b), a.max(b))
}

fn scaled_dim(dim: u32, factor: f64) -> u32 {
    // The epsilon absorbs products like 100 * 0.98 landing just under 98.
    let scaled = (f64::from(dim) * factor + 1e-9).floor();
    (scaled as u32).max(1)
}

#[cfg(test)]
#[path = "../../tests/unit/plan/image.rs"]
mod tests;
