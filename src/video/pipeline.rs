use std::{
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::Context as _;

use crate::{
    foundation::{
        config::VideoConfig,
        error::{RespinError, RespinResult},
    },
    plan::video::VideoPlan,
    video::{
        filters::filter_chain,
        probe::{VideoSourceInfo, is_ffmpeg_on_path, probe_video},
    },
};

/// A clip written to request-scoped temporary storage and probed once.
///
/// Every variation of a request renders from the same handle. Dropping it
/// removes the working directory and everything rendered into it, on success
/// and error paths alike.
#[derive(Debug)]
pub struct VideoSource {
    workdir: tempfile::TempDir,
    info: VideoSourceInfo,
}

impl VideoSource {
    /// Stage `bytes` (a clip with extension `ext`) and probe it.
    #[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
    pub fn open(bytes: &[u8], ext: &str) -> RespinResult<Self> {
        if !cfg!(feature = "media-ffmpeg") {
            return Err(RespinError::unsupported(
                "video processing requires the 'media-ffmpeg' feature",
            ));
        }
        if !is_ffmpeg_on_path() {
            return Err(RespinError::unsupported(
                "video processing requires ffmpeg and ffprobe on PATH",
            ));
        }

        let workdir = tempfile::Builder::new()
            .prefix("respin-")
            .tempdir()
            .map_err(|e| RespinError::encode_export(format!("create temp dir: {e}")))?;
        let ext = sanitize_ext(ext);
        let input = workdir.path().join(format!("source.{ext}"));
        std::fs::write(&input, bytes)
            .map_err(|e| RespinError::encode_export(format!("stage source clip: {e}")))?;

        let info = probe_video(&input)?;
        tracing::debug!(
            width = info.width,
            height = info.height,
            duration = info.duration_sec,
            has_audio = info.has_audio,
            "probed source clip"
        );
        Ok(Self { workdir, info })
    }

    /// Probe results for the staged clip.
    pub fn info(&self) -> &VideoSourceInfo {
        &self.info
    }

    /// Working directory; removed on drop.
    pub fn workdir(&self) -> &Path {
        self.workdir.path()
    }

    /// Render one variation and return the encoded MP4 bytes.
    pub fn render(&self, plan: &VideoPlan, cfg: &VideoConfig) -> RespinResult<Vec<u8>> {
        let out_path = self
            .workdir
            .path()
            .join(format!("variation_{:02}.mp4", plan.index));
        let _guard = TempFileGuard(Some(out_path.clone()));

        let args = export_args(&self.info, plan, cfg, &out_path);
        let output = Command::new("ffmpeg").args(&args).output().map_err(|e| {
            RespinError::unsupported(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RespinError::encode_export(format!(
                "ffmpeg exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let bytes = std::fs::read(&out_path)
            .with_context(|| format!("read rendered clip '{}'", out_path.display()))?;
        if bytes.is_empty() {
            return Err(RespinError::encode_export("ffmpeg produced an empty file"));
        }
        Ok(bytes)
    }
}

/// Full ffmpeg argument list for one export.
///
/// Global metadata and chapters are dropped and the four descriptive tags are
/// rewritten from the plan, so nothing from the source container survives.
pub fn export_args(
    info: &VideoSourceInfo,
    plan: &VideoPlan,
    cfg: &VideoConfig,
    out_path: &Path,
) -> Vec<String> {
    let mut args: Vec<String> = ["-v", "error", "-y", "-i"]
        .into_iter()
        .map(String::from)
        .collect();
    args.push(info.source_path.display().to_string());

    args.extend(
        [
            "-map",
            "0:v:0",
            "-map",
            "0:a:0?",
            "-map_metadata",
            "-1",
            "-map_chapters",
            "-1",
            "-t",
        ]
        .map(String::from),
    );
    args.push(format!("{:.3}", plan.duration_secs));
    args.push("-vf".to_string());
    args.push(filter_chain(plan, info));
    args.push("-r".to_string());
    args.push(format!("{:.6}", plan.target_fps));
    args.extend(
        ["-c:v", "libx264", "-preset", cfg.preset.as_str(), "-crf"].map(String::from),
    );
    args.push(cfg.crf.to_string());

    if info.has_audio {
        args.extend(["-c:a", "aac", "-b:a"].map(String::from));
        args.push(format!("{}k", cfg.audio_bitrate_kbps));
    } else {
        args.push("-an".to_string());
    }

    let meta = &plan.metadata;
    for (key, value) in [
        ("title", &meta.title),
        ("artist", &meta.artist),
        ("comment", &meta.comment),
        ("date", &meta.date),
    ] {
        args.push("-metadata".to_string());
        args.push(format!("{key}={value}"));
    }

    args.extend(["-movflags", "+faststart"].map(String::from));
    args.push(out_path.display().to_string());
    args
}

fn sanitize_ext(ext: &str) -> String {
    let ext: String = ext
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();
    if ext.is_empty() { "mp4".to_string() } else { ext }
}

struct TempFileGuard(Option<PathBuf>);

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if let Some(path) = self.0.take() {
            let _ = std::fs::remove_file(path);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/video/pipeline.rs"]
mod tests;
