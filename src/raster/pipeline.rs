use image::RgbImage;

use crate::{
    foundation::{
        config::ImageConfig,
        error::{RespinError, RespinResult},
        rng::seeded_rng,
    },
    plan::image::ImagePlan,
    raster::{
        enhance, geometry,
        jpeg::encode_jpeg,
        kernel::{SHARPEN, convolve3},
        noise::add_gaussian_noise,
    },
};

/// Decode `bytes` once into the canonical 8-bit RGB buffer every variation starts from.
///
/// Alpha is dropped, not composited.
pub fn decode_canonical(bytes: &[u8]) -> RespinResult<RgbImage> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| RespinError::decode(format!("decode image from memory: {e}")))?;
    let rgb = img.to_rgb8();
    if rgb.width() == 0 || rgb.height() == 0 {
        return Err(RespinError::decode("image has zero width or height"));
    }
    Ok(rgb)
}

/// Apply steps 1-8 of the perturbation chain. Total: never fails.
///
/// Geometry runs first so that the noise lands on the final framing and is not
/// resampled away afterwards.
pub fn perturb(source: &RgbImage, plan: &ImagePlan) -> RgbImage {
    let img = geometry::resize(source, plan.target_width, plan.target_height);
    let img = geometry::rotate(&img, plan.rotation_deg);
    let img = enhance::channel_gain(&img, plan.channel_gain);
    let img = geometry::translate(&img, plan.dx, plan.dy);

    let img = enhance::brightness(&img, plan.brightness);
    let img = enhance::contrast(&img, plan.contrast);
    let img = enhance::color(&img, plan.color);
    let img = enhance::sharpness(&img, plan.sharpness);

    let mut img = convolve3(&img, plan.filter.kernel());
    add_gaussian_noise(&mut img, plan.noise_sigma, &mut seeded_rng(plan.noise_seed));
    convolve3(&img, &SHARPEN)
}

/// Perturb and encode one variation.
pub fn render_variation(
    source: &RgbImage,
    plan: &ImagePlan,
    cfg: &ImageConfig,
) -> RespinResult<Vec<u8>> {
    let img = perturb(source, plan);
    encode_jpeg(&img, plan.quality, plan.subsampling, cfg.optimize_huffman)
}

#[cfg(test)]
#[path = "../../tests/unit/raster/pipeline.rs"]
mod tests;
