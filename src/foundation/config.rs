use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{RespinError, RespinResult};

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Engine-wide tuning knobs.
///
/// Every field has a documented default, so an empty JSON object (`{}`) is a
/// valid configuration. Values are checked by [`EngineConfig::validate`]
/// before any processing starts.
pub struct EngineConfig {
    /// Image pipeline settings.
    pub image: ImageConfig,
    /// Video pipeline settings.
    pub video: VideoConfig,
    /// Archive batch settings.
    pub archive: ArchiveConfig,
    /// Parallelism for image variations.
    pub threading: Threading,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Parameters of the image perturbation that are fixed rather than drawn.
pub struct ImageConfig {
    /// Standard deviation of the additive Gaussian noise, in 8-bit code values.
    pub noise_sigma: f64,
    /// Lowest JPEG quality a plan may pick (inclusive).
    pub quality_min: u8,
    /// Highest JPEG quality a plan may pick (inclusive).
    pub quality_max: u8,
    /// Emit optimized Huffman tables (4:4:4 and 4:2:2 output only).
    pub optimize_huffman: bool,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            noise_sigma: 0.5,
            quality_min: 85,
            quality_max: 96,
            optimize_huffman: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Export settings for video variations.
pub struct VideoConfig {
    /// Output clips are truncated to this length.
    pub max_duration_secs: f64,
    /// Frame rate used when the source does not report one.
    pub default_fps: f64,
    /// libx264 constant rate factor.
    pub crf: u8,
    /// libx264 preset name.
    pub preset: String,
    /// AAC bitrate for the audio track, when the source has one.
    pub audio_bitrate_kbps: u32,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            max_duration_secs: 30.0,
            default_fps: 30.0,
            crf: 23,
            preset: "veryfast".to_string(),
            audio_bitrate_kbps: 128,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Settings for [`crate::process_archive`].
pub struct ArchiveConfig {
    /// Deflate level (0-9) of the output archive.
    pub compression_level: u8,
    /// Appended to the stem of every transformed entry, before `.jpg`.
    pub renamed_suffix: String,
    /// What to do with an image entry that fails to transform.
    pub on_entry_error: OnEntryError,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            compression_level: 6,
            renamed_suffix: String::new(),
            on_entry_error: OnEntryError::PassThrough,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Per-entry failure policy of the archive processor.
pub enum OnEntryError {
    /// Copy the failing entry unchanged and keep going.
    #[default]
    PassThrough,
    /// Abort the whole archive.
    Abort,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Thread usage for image variations.
pub struct Threading {
    /// Render variations concurrently on a rayon pool.
    pub parallel: bool,
    /// Override the number of rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

impl Default for Threading {
    fn default() -> Self {
        Self {
            parallel: true,
            threads: None,
        }
    }
}

impl EngineConfig {
    /// Parse a JSON document. Missing fields take their defaults.
    pub fn from_json_str(s: &str) -> RespinResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| RespinError::configuration(format!("invalid config json: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and parse a JSON config file.
    pub fn from_json_file(path: &Path) -> RespinResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Check value ranges.
    pub fn validate(&self) -> RespinResult<()> {
        let img = &self.image;
        if !img.noise_sigma.is_finite() || img.noise_sigma < 0.0 {
            return Err(RespinError::configuration(
                "image.noise_sigma must be finite and >= 0",
            ));
        }
        if img.quality_min == 0 || img.quality_max > 100 || img.quality_min > img.quality_max {
            return Err(RespinError::configuration(
                "image quality range must satisfy 1 <= quality_min <= quality_max <= 100",
            ));
        }

        let vid = &self.video;
        if !vid.max_duration_secs.is_finite() || vid.max_duration_secs <= 0.0 {
            return Err(RespinError::configuration(
                "video.max_duration_secs must be finite and > 0",
            ));
        }
        if !vid.default_fps.is_finite() || vid.default_fps <= 0.0 {
            return Err(RespinError::configuration(
                "video.default_fps must be finite and > 0",
            ));
        }
        if vid.crf > 51 {
            return Err(RespinError::configuration("video.crf must be <= 51"));
        }
        if vid.preset.trim().is_empty() {
            return Err(RespinError::configuration("video.preset must be non-empty"));
        }
        if vid.audio_bitrate_kbps == 0 {
            return Err(RespinError::configuration(
                "video.audio_bitrate_kbps must be > 0",
            ));
        }

        if self.archive.compression_level > 9 {
            return Err(RespinError::configuration(
                "archive.compression_level must be <= 9",
            ));
        }
        if self.archive.renamed_suffix.contains(['/', '\\']) {
            return Err(RespinError::configuration(
                "archive.renamed_suffix must not contain path separators",
            ));
        }

        if self.threading.threads == Some(0) {
            return Err(RespinError::configuration(
                "threading.threads must be >= 1 when set",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
