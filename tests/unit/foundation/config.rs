use super::*;

#[test]
fn empty_object_yields_defaults() {
    let cfg = EngineConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, EngineConfig::default());
    assert_eq!(cfg.image.quality_min, 85);
    assert_eq!(cfg.image.quality_max, 96);
    assert_eq!(cfg.video.max_duration_secs, 30.0);
    assert_eq!(cfg.archive.on_entry_error, OnEntryError::PassThrough);
    assert!(cfg.threading.parallel);
}

#[test]
fn partial_sections_keep_other_defaults() {
    let cfg = EngineConfig::from_json_str(
        r#"{ "image": { "noise_sigma": 0.2 }, "archive": { "on_entry_error": "abort" } }"#,
    )
    .unwrap();
    assert_eq!(cfg.image.noise_sigma, 0.2);
    assert_eq!(cfg.image.quality_max, 96);
    assert_eq!(cfg.archive.on_entry_error, OnEntryError::Abort);
    assert_eq!(cfg.archive.compression_level, 6);
}

#[test]
fn unknown_fields_are_rejected() {
    let err = EngineConfig::from_json_str(r#"{ "image": { "noise": 1.0 } }"#).unwrap_err();
    assert!(matches!(err, RespinError::Configuration(_)));
}

#[test]
fn validation_catches_bad_values() {
    let mut cfg = EngineConfig::default();
    cfg.image.quality_min = 97;
    assert!(cfg.validate().is_err());

    let mut cfg = EngineConfig::default();
    cfg.image.noise_sigma = f64::NAN;
    assert!(cfg.validate().is_err());

    let mut cfg = EngineConfig::default();
    cfg.video.max_duration_secs = 0.0;
    assert!(cfg.validate().is_err());

    let mut cfg = EngineConfig::default();
    cfg.archive.compression_level = 10;
    assert!(cfg.validate().is_err());

    let mut cfg = EngineConfig::default();
    cfg.archive.renamed_suffix = "../x".to_string();
    assert!(cfg.validate().is_err());

    let mut cfg = EngineConfig::default();
    cfg.threading.threads = Some(0);
    assert!(cfg.validate().is_err());

    assert!(EngineConfig::default().validate().is_ok());
}

#[test]
fn config_file_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cfg.json");
    let mut cfg = EngineConfig::default();
    cfg.video.crf = 28;
    std::fs::write(&path, serde_json::to_string_pretty(&cfg).unwrap()).unwrap();
    assert_eq!(EngineConfig::from_json_file(&path).unwrap(), cfg);
}

#[test]
fn missing_config_file_is_other_error() {
    let err = EngineConfig::from_json_file(Path::new("definitely/not/here.json")).unwrap_err();
    assert!(matches!(err, RespinError::Other(_)));
}
