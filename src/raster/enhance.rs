//! Colorimetric passes.
//!
//! Each enhancement interpolates (or extrapolates) between the image and a
//! "degenerate" version of it: `out = degenerate + factor * (px - degenerate)`.
//! A factor of 1.0 is the identity.

use image::{Rgb, RgbImage};

use crate::raster::{
    geometry::to_u8,
    kernel::{SMOOTH, convolve3},
};

/// Multiply R, G and B by independent gains.
pub fn channel_gain(src: &RgbImage, gain: [f64; 3]) -> RgbImage {
    let mut out = src.clone();
    for px in out.pixels_mut() {
        for c in 0..3 {
            px[c] = to_u8(f64::from(px[c]) * gain[c]);
        }
    }
    out
}

/// Degenerate: black.
pub fn brightness(src: &RgbImage, factor: f64) -> RgbImage {
    channel_gain(src, [factor; 3])
}

/// Degenerate: flat grey at the image's mean luma.
pub fn contrast(src: &RgbImage, factor: f64) -> RgbImage {
    let n = u64::from(src.width()) * u64::from(src.height());
    let mean = if n == 0 {
        0.0
    } else {
        let total: f64 = src.pixels().map(luma).sum();
        (total / n as f64).round()
    };
    let mut out = src.clone();
    for px in out.pixels_mut() {
        for c in 0..3 {
            px[c] = blend(mean, f64::from(px[c]), factor);
        }
    }
    out
}

/// Degenerate: the per-pixel greyscale value.
pub fn color(src: &RgbImage, factor: f64) -> RgbImage {
    let mut out = src.clone();
    for px in out.pixels_mut() {
        let l = luma(px);
        for c in 0..3 {
            px[c] = blend(l, f64::from(px[c]), factor);
        }
    }
    out
}

/// Degenerate: the smoothed image, with the one-pixel border left untouched.
pub fn sharpness(src: &RgbImage, factor: f64) -> RgbImage {
    let (w, h) = src.dimensions();
    let smoothed = convolve3(src, &SMOOTH);
    RgbImage::from_fn(w, h, |x, y| {
        let px = src.get_pixel(x, y);
        if x == 0 || y == 0 || x + 1 == w || y + 1 == h {
            return *px;
        }
        let deg = smoothed.get_pixel(x, y);
        Rgb([
            blend(f64::from(deg[0]), f64::from(px[0]), factor),
            blend(f64::from(deg[1]), f64::from(px[1]), factor),
            blend(f64::from(deg[2]), f64::from(px[2]), factor),
        ])
    })
}

/// ITU-R 601 luma rounded to a code value.
pub(crate) fn luma(px: &Rgb<u8>) -> f64 {
    let [r, g, b] = px.0;
    ((299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b)) as f64 / 1000.0).round()
}

fn blend(degenerate: f64, value: f64, factor: f64) -> u8 {
    to_u8(degenerate + factor * (value - degenerate))
}

#[cfg(test)]
#[path = "../../tests/unit/raster/enhance.rs"]
mod tests;
