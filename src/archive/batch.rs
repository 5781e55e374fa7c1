use std::{
    collections::HashSet,
    io::{Cursor, Read as _, Write as _},
};

use anyhow::Context as _;
use rand::Rng;

use crate::{
    foundation::{
        config::{EngineConfig, OnEntryError},
        error::{RespinError, RespinResult},
    },
    media::blob::{MediaKind, extension_of},
    plan::image::ImagePlan,
    raster::pipeline::{decode_canonical, render_variation},
};

// Declared sizes are untrusted.
const MAX_PREALLOC: usize = 16 << 20;

/// One member of an input archive.
#[derive(Clone, Debug)]
pub struct ArchiveEntry {
    /// Full entry name, including any directory prefix.
    pub name: String,
    /// Uncompressed bytes.
    pub bytes: Vec<u8>,
    /// Kind inferred from the name suffix.
    pub kind: MediaKind,
}

/// What happened to the entries of one archive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ArchiveSummary {
    /// Image entries replaced by a transformed JPEG.
    pub transformed: usize,
    /// Non-image entries copied byte-for-byte.
    pub copied: usize,
    /// Image entries that failed and were copied unchanged.
    pub passed_through: usize,
}

/// Output of [`process_archive`].
#[derive(Clone, Debug)]
pub struct ArchiveOutput {
    /// The new zip archive.
    pub bytes: Vec<u8>,
    /// Per-entry outcome counts.
    pub summary: ArchiveSummary,
}

/// Rewrite a zip archive, replacing every image entry with one transformed JPEG.
///
/// Directory markers are dropped. Non-image entries keep their name and bytes.
/// A failing image entry is copied unchanged or aborts the archive depending on
/// `config.archive.on_entry_error`.
#[tracing::instrument(skip(bytes, config, rng), fields(len = bytes.len()))]
pub fn process_archive<R: Rng + ?Sized>(
    bytes: &[u8],
    modification_level: f64,
    config: &EngineConfig,
    rng: &mut R,
) -> RespinResult<ArchiveOutput> {
    config.validate()?;
    if !modification_level.is_finite() || !(0.0..1.0).contains(&modification_level) {
        return Err(RespinError::configuration(format!(
            "modification_level must be in [0, 1), got {modification_level}"
        )));
    }

    let entries = read_entries(bytes)?;
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .compression_level(Some(i64::from(config.archive.compression_level)));

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let mut used = HashSet::<String>::new();
    let mut summary = ArchiveSummary::default();

    for entry in entries {
        let (name, payload) = match entry.kind {
            MediaKind::Image => match transform_entry(&entry, modification_level, config, rng) {
                Ok(jpeg) => {
                    summary.transformed += 1;
                    let name = renamed_entry(&entry.name, &config.archive.renamed_suffix);
                    (unique_name(name, &mut used), jpeg)
                }
                Err(err) => match config.archive.on_entry_error {
                    OnEntryError::Abort => return Err(err),
                    OnEntryError::PassThrough => {
                        tracing::warn!(
                            entry = %entry.name,
                            error = %err,
                            "passing entry through unchanged"
                        );
                        summary.passed_through += 1;
                        (unique_name(entry.name, &mut used), entry.bytes)
                    }
                },
            },
            MediaKind::Video | MediaKind::Other => {
                summary.copied += 1;
                (unique_name(entry.name, &mut used), entry.bytes)
            }
        };

        writer
            .start_file(name.as_str(), options)
            .map_err(|e| RespinError::encode_export(format!("start zip entry '{name}': {e}")))?;
        writer
            .write_all(&payload)
            .map_err(|e| RespinError::encode_export(format!("write zip entry '{name}': {e}")))?;
    }

    let out = writer
        .finish()
        .map_err(|e| RespinError::encode_export(format!("finish zip archive: {e}")))?
        .into_inner();

    tracing::info!(
        transformed = summary.transformed,
        copied = summary.copied,
        passed_through = summary.passed_through,
        "archive processed"
    );
    Ok(ArchiveOutput {
        bytes: out,
        summary,
    })
}

/// Read every file entry of `bytes`, in archive order.
pub fn read_entries(bytes: &[u8]) -> RespinResult<Vec<ArchiveEntry>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| RespinError::decode(format!("read zip archive: {e}")))?;

    let mut entries = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let mut file = archive
            .by_index(i)
            .map_err(|e| RespinError::decode(format!("read zip entry #{i}: {e}")))?;
        if file.is_dir() {
            continue;
        }
        let name = file.name().to_string();
        let hint = usize::try_from(file.size()).unwrap_or(0).min(MAX_PREALLOC);
        let mut buf = Vec::with_capacity(hint);
        file.read_to_end(&mut buf)
            .with_context(|| format!("inflate zip entry '{name}'"))
            .map_err(|e| RespinError::decode(format!("{e:#}")))?;
        entries.push(ArchiveEntry {
            kind: MediaKind::from_name(&name),
            name,
            bytes: buf,
        });
    }
    Ok(entries)
}

fn transform_entry<R: Rng + ?Sized>(
    entry: &ArchiveEntry,
    modification_level: f64,
    config: &EngineConfig,
    rng: &mut R,
) -> RespinResult<Vec<u8>> {
    let source = decode_canonical(&entry.bytes)?;
    let plan = ImagePlan::generate(
        rng,
        source.width(),
        source.height(),
        modification_level,
        &config.image,
    );
    tracing::debug!(entry = %entry.name, ?plan, "entry plan");
    render_variation(&source, &plan, &config.image)
}

/// `dir/photo.png` becomes `dir/photo<suffix>.jpg`.
pub fn renamed_entry(name: &str, suffix: &str) -> String {
    let stem = match extension_of(name) {
        Some(ext) => &name[..name.len() - ext.len() - 1],
        None => name,
    };
    format!("{stem}{suffix}.jpg")
}

/// Return `name` if unused, otherwise the first free `<stem>_<n>.<ext>`.
fn unique_name(name: String, used: &mut HashSet<String>) -> String {
    if used.insert(name.clone()) {
        return name;
    }
    let (stem, ext) = match extension_of(&name) {
        Some(ext) => (&name[..name.len() - ext.len() - 1], Some(ext)),
        None => (name.as_str(), None),
    };
    let mut n = 1usize;
    loop {
        let candidate = match ext {
            Some(ext) => format!("{stem}_{n}.{ext}"),
            None => format!("{stem}_{n}"),
        };
        if used.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/archive/batch.rs"]
mod tests;
