use super::*;

#[test]
fn kind_follows_extension_case_insensitively() {
    assert_eq!(MediaKind::from_name("a/b/Photo.JPG"), MediaKind::Image);
    assert_eq!(MediaKind::from_name("scan.tif"), MediaKind::Image);
    assert_eq!(MediaKind::from_name("clip.MOV"), MediaKind::Video);
    assert_eq!(MediaKind::from_name("notes.txt"), MediaKind::Other);
    assert_eq!(MediaKind::from_name("README"), MediaKind::Other);
}

#[test]
fn extension_ignores_dotfiles_and_directories() {
    assert_eq!(extension_of(".png"), None);
    assert_eq!(extension_of("dir.png/file"), None);
    assert_eq!(extension_of("dir/x.tar.gz"), Some("gz"));
    assert_eq!(extension_of("trailing."), None);
}

#[test]
fn blob_with_name_records_lowercase_extension() {
    let blob = MediaBlob::with_name(vec![1, 2, 3], "Holiday.MP4");
    assert_eq!(blob.kind(), MediaKind::Video);
    assert_eq!(blob.extension(), Some("mp4"));
    assert_eq!(blob.bytes(), &[1, 2, 3]);

    let blob = MediaBlob::new(vec![], MediaKind::Image);
    assert_eq!(blob.extension(), None);
}

#[test]
fn from_path_reads_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.png");
    std::fs::write(&path, b"not really a png").unwrap();
    let blob = MediaBlob::from_path(&path).unwrap();
    assert_eq!(blob.kind(), MediaKind::Image);
    assert_eq!(blob.bytes(), b"not really a png");
}
