use image::RgbImage;
use rand::Rng;

use crate::foundation::rng::gaussian;

/// Add zero-mean Gaussian noise to every channel sample.
///
/// Noise is rounded to whole code values before it is added, and the sum is
/// clipped to `0..=255`.
pub fn add_gaussian_noise<R: Rng + ?Sized>(img: &mut RgbImage, sigma: f64, rng: &mut R) {
    if sigma <= 0.0 {
        return;
    }
    for v in img.iter_mut() {
        let n = gaussian(rng, sigma).round() as i32;
        *v = (i32::from(*v) + n).clamp(0, 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/noise.rs"]
mod tests;
