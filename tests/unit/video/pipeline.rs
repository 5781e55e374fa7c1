use std::path::PathBuf;

use super::*;
use crate::plan::video::{ContainerMetadata, EffectClass};

fn info(has_audio: bool) -> VideoSourceInfo {
    VideoSourceInfo {
        source_path: PathBuf::from("/tmp/source.mp4"),
        width: 320,
        height: 240,
        fps_num: 30,
        fps_den: 1,
        duration_sec: 12.0,
        has_audio,
    }
}

fn plan() -> VideoPlan {
    VideoPlan {
        index: 2,
        effect: EffectClass::for_index(2),
        color_multiplier: 1.0,
        lum_shift: 0.0,
        contrast: 1.0,
        gamma: 0.95,
        crop: None,
        duration_secs: 12.0,
        target_fps: 30.0,
        metadata: ContainerMetadata {
            title: "VID_00001234".to_string(),
            artist: String::new(),
            comment: "00112233aabbccdd".to_string(),
            date: "2019-04-07".to_string(),
        },
    }
}

fn value_after<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

#[test]
fn export_args_strip_source_metadata_and_write_plan_tags() {
    let args = export_args(
        &info(true),
        &plan(),
        &VideoConfig::default(),
        Path::new("/tmp/out.mp4"),
    );

    assert_eq!(value_after(&args, "-map_metadata"), Some("-1"));
    assert_eq!(value_after(&args, "-map_chapters"), Some("-1"));
    let tags: Vec<&str> = args
        .iter()
        .enumerate()
        .filter(|(_, a)| *a == "-metadata")
        .filter_map(|(i, _)| args.get(i + 1).map(String::as_str))
        .collect();
    assert_eq!(
        tags,
        vec![
            "title=VID_00001234",
            "artist=",
            "comment=00112233aabbccdd",
            "date=2019-04-07"
        ]
    );
    assert_eq!(args.last().map(String::as_str), Some("/tmp/out.mp4"));
}

#[test]
fn export_args_follow_plan_and_config() {
    let cfg = VideoConfig::default();
    let args = export_args(&info(true), &plan(), &cfg, Path::new("/tmp/out.mp4"));

    assert_eq!(value_after(&args, "-i"), Some("/tmp/source.mp4"));
    assert_eq!(value_after(&args, "-t"), Some("12.000"));
    assert_eq!(value_after(&args, "-r"), Some("30.000000"));
    assert_eq!(value_after(&args, "-c:v"), Some("libx264"));
    assert_eq!(value_after(&args, "-preset"), Some(cfg.preset.as_str()));
    assert_eq!(
        value_after(&args, "-crf").map(str::to_string),
        Some(cfg.crf.to_string())
    );
    assert_eq!(value_after(&args, "-c:a"), Some("aac"));
    assert_eq!(
        value_after(&args, "-vf"),
        Some("eq=gamma=0.950000,scale=trunc(iw/2)*2:trunc(ih/2)*2,format=yuv420p")
    );
    assert!(!args.iter().any(|a| a == "-an"));
}

#[test]
fn silent_sources_disable_audio() {
    let args = export_args(
        &info(false),
        &plan(),
        &VideoConfig::default(),
        Path::new("/tmp/out.mp4"),
    );
    assert!(args.iter().any(|a| a == "-an"));
    assert!(!args.iter().any(|a| a == "-c:a"));
}

#[test]
fn staged_extension_is_sanitized() {
    assert_eq!(sanitize_ext("MOV"), "mov");
    assert_eq!(sanitize_ext("../mp4"), "mp4");
    assert_eq!(sanitize_ext(""), "mp4");
}

#[test]
fn temp_file_guard_removes_its_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.mp4");
    std::fs::write(&path, b"x").unwrap();
    {
        let _guard = TempFileGuard(Some(path.clone()));
    }
    assert!(!path.exists());
}

#[test]
fn open_rejects_non_video_bytes() {
    if !cfg!(feature = "media-ffmpeg") || !is_ffmpeg_on_path() {
        return;
    }
    let err = VideoSource::open(b"definitely not a video", "mp4").unwrap_err();
    assert!(matches!(err, RespinError::Decode(_)), "{err}");
}
