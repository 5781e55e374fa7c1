use std::path::{Path, PathBuf};

use crate::foundation::error::{RespinError, RespinResult};

/// What `ffprobe` reports about a source clip.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoSourceInfo {
    /// Path of the probed file.
    pub source_path: PathBuf,
    /// Width of the first video stream.
    pub width: u32,
    /// Height of the first video stream.
    pub height: u32,
    /// Frame rate numerator (`0` when unknown).
    pub fps_num: u32,
    /// Frame rate denominator.
    pub fps_den: u32,
    /// Container duration in seconds (`0.0` when unknown).
    pub duration_sec: f64,
    /// Whether an audio stream is present.
    pub has_audio: bool,
}

impl VideoSourceInfo {
    /// Source frame rate, or `None` when the container did not expose one.
    pub fn source_fps(&self) -> Option<f64> {
        if self.fps_num == 0 || self.fps_den == 0 {
            None
        } else {
            Some(f64::from(self.fps_num) / f64::from(self.fps_den))
        }
    }
}

/// Is the `name` binary runnable from PATH?
pub fn tool_on_path(name: &str) -> bool {
    std::process::Command::new(name)
        .arg("-version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// `ffmpeg` and `ffprobe` are both available.
pub fn is_ffmpeg_on_path() -> bool {
    tool_on_path("ffmpeg") && tool_on_path("ffprobe")
}

/// Probe `source_path` with `ffprobe`. A file that ffprobe rejects, or that has
/// no video stream, is a decode error.
#[cfg(feature = "media-ffmpeg")]
pub fn probe_video(source_path: &Path) -> RespinResult<VideoSourceInfo> {
    #[derive(serde::Deserialize)]
    struct ProbeStream {
        codec_type: Option<String>,
        width: Option<u32>,
        height: Option<u32>,
        r_frame_rate: Option<String>,
        avg_frame_rate: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeFormat {
        duration: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeOut {
        #[serde(default)]
        streams: Vec<ProbeStream>,
        format: Option<ProbeFormat>,
    }

    let out = std::process::Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_streams",
            "-show_format",
        ])
        .arg(source_path)
        .output()
        .map_err(|e| RespinError::unsupported(format!("failed to run ffprobe: {e}")))?;
    if !out.status.success() {
        return Err(RespinError::decode(format!(
            "ffprobe failed for '{}': {}",
            source_path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let parsed: ProbeOut = serde_json::from_slice(&out.stdout)
        .map_err(|e| RespinError::decode(format!("ffprobe json parse failed: {e}")))?;
    let video_stream = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| RespinError::decode("no video stream found"))?;
    let width = video_stream
        .width
        .filter(|w| *w > 0)
        .ok_or_else(|| RespinError::decode("missing video width from ffprobe"))?;
    let height = video_stream
        .height
        .filter(|h| *h > 0)
        .ok_or_else(|| RespinError::decode("missing video height from ffprobe"))?;

    // Unparseable or 0/0 rates are treated as "not exposed".
    let (fps_num, fps_den) = [&video_stream.avg_frame_rate, &video_stream.r_frame_rate]
        .into_iter()
        .filter_map(|r| r.as_deref().and_then(parse_ff_ratio))
        .find(|(n, _)| *n > 0)
        .unwrap_or((0, 1));
    let duration_sec = parsed
        .format
        .as_ref()
        .and_then(|f| f.duration.as_ref())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|d| d.is_finite() && *d > 0.0)
        .unwrap_or(0.0);
    let has_audio = parsed
        .streams
        .iter()
        .any(|s| s.codec_type.as_deref() == Some("audio"));

    Ok(VideoSourceInfo {
        source_path: source_path.to_path_buf(),
        width,
        height,
        fps_num,
        fps_den,
        duration_sec,
        has_audio,
    })
}

/// Probe `source_path`. Always unsupported without the `media-ffmpeg` feature.
#[cfg(not(feature = "media-ffmpeg"))]
pub fn probe_video(_source_path: &Path) -> RespinResult<VideoSourceInfo> {
    Err(RespinError::unsupported(
        "video processing requires the 'media-ffmpeg' feature",
    ))
}

fn parse_ff_ratio(s: &str) -> Option<(u32, u32)> {
    let mut parts = s.split('/');
    let a = parts.next()?.trim().parse::<u32>().ok()?;
    let b = match parts.next() {
        Some(b) => b.trim().parse::<u32>().ok()?,
        None => 1,
    };
    if b == 0 {
        return None;
    }
    Some((a, b))
}

#[cfg(test)]
#[path = "../../tests/unit/video/probe.rs"]
mod tests;
