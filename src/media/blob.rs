use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::RespinResult;

/// Raster extensions the image pipeline accepts (lowercase, no dot).
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "gif", "webp"];

/// Clip extensions the video pipeline accepts (lowercase, no dot).
pub const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "mov", "m4v", "mkv", "webm", "avi", "wmv", "flv", "mpg", "mpeg", "ts",
];

/// What a blob is, judged from its file extension alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// A still raster image.
    Image,
    /// A time-based clip.
    Video,
    /// Anything else; never transformed.
    Other,
}

impl MediaKind {
    /// Classify a lowercase-insensitive extension without the leading dot.
    pub fn from_extension(ext: &str) -> Self {
        let ext = ext.to_ascii_lowercase();
        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Self::Image
        } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            Self::Video
        } else {
            Self::Other
        }
    }

    /// Classify an entry or file name by its suffix.
    pub fn from_name(name: &str) -> Self {
        extension_of(name).map_or(Self::Other, Self::from_extension)
    }
}

/// Extension of `name` after the last `.` of its final path component.
pub fn extension_of(name: &str) -> Option<&str> {
    let file = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let (stem, ext) = file.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        None
    } else {
        Some(ext)
    }
}

/// Raw media bytes plus their kind. Immutable once built.
#[derive(Clone, Debug)]
pub struct MediaBlob {
    bytes: Vec<u8>,
    kind: MediaKind,
    extension: Option<String>,
}

impl MediaBlob {
    /// Wrap bytes whose kind the caller already knows.
    pub fn new(bytes: Vec<u8>, kind: MediaKind) -> Self {
        Self {
            bytes,
            kind,
            extension: None,
        }
    }

    /// Wrap bytes and infer the kind from a file name.
    pub fn with_name(bytes: Vec<u8>, name: &str) -> Self {
        let extension = extension_of(name).map(str::to_ascii_lowercase);
        Self {
            bytes,
            kind: MediaKind::from_name(name),
            extension,
        }
    }

    /// Read a file from disk.
    pub fn from_path(path: &Path) -> RespinResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read media '{}'", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::with_name(bytes, &name))
    }

    /// Encoded source bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Detected kind.
    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    /// Lowercase extension hint, if the blob was built from a name.
    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/blob.rs"]
mod tests;
