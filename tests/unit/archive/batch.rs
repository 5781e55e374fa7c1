use std::io::{Cursor, Write as _};

use super::*;
use crate::foundation::rng::seeded_rng;

fn png_bytes(w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbImage::from_fn(w, h, |x, y| {
        image::Rgb([(x * 4) as u8, (y * 4) as u8, 128])
    });
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

fn zip_of(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut w = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let opts = zip::write::SimpleFileOptions::default();
    for (name, bytes) in entries {
        if name.ends_with('/') {
            w.add_directory(*name, opts).unwrap();
        } else {
            w.start_file(*name, opts).unwrap();
            w.write_all(bytes).unwrap();
        }
    }
    w.finish().unwrap().into_inner()
}

fn names(bytes: &[u8]) -> Vec<String> {
    read_entries(bytes)
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect()
}

#[test]
fn renamed_entry_keeps_directory_and_swaps_extension() {
    assert_eq!(renamed_entry("photos/a.png", ""), "photos/a.jpg");
    assert_eq!(renamed_entry("b.JPEG", "_v"), "b_v.jpg");
    assert_eq!(renamed_entry("c.tar.gif", ""), "c.tar.jpg");
}

#[test]
fn unique_name_appends_counter_on_collision() {
    let mut used = HashSet::new();
    assert_eq!(unique_name("a.jpg".to_string(), &mut used), "a.jpg");
    assert_eq!(unique_name("a.jpg".to_string(), &mut used), "a_1.jpg");
    assert_eq!(unique_name("a.jpg".to_string(), &mut used), "a_2.jpg");
    assert_eq!(unique_name("README".to_string(), &mut used), "README");
    assert_eq!(unique_name("README".to_string(), &mut used), "README_1");
}

#[test]
fn images_are_transformed_and_others_copied() {
    let png = png_bytes(32, 24);
    let input = zip_of(&[
        ("docs/", &b""[..]),
        ("docs/notes.txt", &b"hello archive"[..]),
        ("docs/pic.png", &png[..]),
    ]);

    let out = process_archive(&input, 0.2, &EngineConfig::default(), &mut seeded_rng(1)).unwrap();
    assert_eq!(
        out.summary,
        ArchiveSummary {
            transformed: 1,
            copied: 1,
            passed_through: 0,
        }
    );

    let entries = read_entries(&out.bytes).unwrap();
    assert_eq!(entries.len(), 2);
    let notes = entries.iter().find(|e| e.name == "docs/notes.txt").unwrap();
    assert_eq!(notes.bytes, b"hello archive");
    let pic = entries.iter().find(|e| e.name == "docs/pic.jpg").unwrap();
    assert_ne!(pic.bytes, png);
    let decoded = image::load_from_memory(&pic.bytes).unwrap();
    assert!((31..=33).contains(&decoded.width()));
}

#[test]
fn renamed_collisions_are_disambiguated() {
    let png = png_bytes(16, 16);
    let input = zip_of(&[("a.png", &png[..]), ("a.bmp", &png[..])]);
    let out = process_archive(&input, 0.1, &EngineConfig::default(), &mut seeded_rng(2)).unwrap();
    assert_eq!(names(&out.bytes), vec!["a.jpg", "a_1.jpg"]);
}

#[test]
fn broken_image_passes_through_by_default() {
    let input = zip_of(&[("broken.png", &b"not a png"[..]), ("x.txt", &b"x"[..])]);
    let out = process_archive(&input, 0.2, &EngineConfig::default(), &mut seeded_rng(3)).unwrap();
    assert_eq!(out.summary.passed_through, 1);
    assert_eq!(out.summary.copied, 1);

    let entries = read_entries(&out.bytes).unwrap();
    let broken = entries.iter().find(|e| e.name == "broken.png").unwrap();
    assert_eq!(broken.bytes, b"not a png");
}

#[test]
fn broken_image_aborts_when_configured() {
    let input = zip_of(&[("broken.png", &b"not a png"[..])]);
    let mut cfg = EngineConfig::default();
    cfg.archive.on_entry_error = OnEntryError::Abort;
    let err = process_archive(&input, 0.2, &cfg, &mut seeded_rng(4)).unwrap_err();
    assert!(matches!(err, RespinError::Decode(_)), "{err}");
}

#[test]
fn unreadable_archive_is_decode_error() {
    let err = process_archive(
        b"PK but not really",
        0.2,
        &EngineConfig::default(),
        &mut seeded_rng(5),
    )
    .unwrap_err();
    assert!(matches!(err, RespinError::Decode(_)), "{err}");
}

#[test]
fn out_of_range_level_is_rejected() {
    let input = zip_of(&[("x.txt", &b"x"[..])]);
    for level in [-0.1, 1.0, f64::NAN] {
        let err =
            process_archive(&input, level, &EngineConfig::default(), &mut seeded_rng(6)).unwrap_err();
        assert!(matches!(err, RespinError::Configuration(_)), "{err}");
    }
}
