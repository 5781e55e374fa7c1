use image::RgbImage;
use jpeg_encoder::{ColorType, Encoder, SamplingFactor};

use crate::{
    foundation::error::{RespinError, RespinResult},
    plan::image::ChromaSubsampling,
};

impl ChromaSubsampling {
    fn sampling_factor(self) -> SamplingFactor {
        match self {
            Self::Yuv444 => SamplingFactor::F_1_1,
            Self::Yuv422 => SamplingFactor::F_2_1,
            Self::Yuv420 => SamplingFactor::F_2_2,
        }
    }
}

/// Baseline JPEG encode of an RGB raster.
///
/// JPEG caps each side at 65 535 pixels; larger rasters are an export error.
/// `optimize_huffman` is ignored for 4:2:0, which the encoder corrupts when
/// both are enabled.
pub fn encode_jpeg(
    img: &RgbImage,
    quality: u8,
    subsampling: ChromaSubsampling,
    optimize_huffman: bool,
) -> RespinResult<Vec<u8>> {
    let (w, h) = img.dimensions();
    let (Ok(w16), Ok(h16)) = (u16::try_from(w), u16::try_from(h)) else {
        return Err(RespinError::encode_export(format!(
            "{w}x{h} exceeds the JPEG dimension limit"
        )));
    };

    let mut out = Vec::with_capacity(img.as_raw().len() / 4);
    let mut encoder = Encoder::new(&mut out, quality.clamp(1, 100));
    encoder.set_sampling_factor(subsampling.sampling_factor());
    encoder.set_optimized_huffman_tables(
        optimize_huffman && subsampling != ChromaSubsampling::Yuv420,
    );
    encoder
        .encode(img.as_raw(), w16, h16, ColorType::Rgb)
        .map_err(|e| RespinError::encode_export(format!("jpeg encode failed: {e}")))?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/raster/jpeg.rs"]
mod tests;
