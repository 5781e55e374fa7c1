use image::RgbImage;

use crate::{plan::image::SpatialFilter, raster::geometry::to_u8};

/// A 3x3 integer convolution kernel, row-major, normalized by `scale`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Kernel3 {
    /// Row-major weights.
    pub weights: [i32; 9],
    /// Divisor applied to the weighted sum.
    pub scale: i32,
}

/// Mild low-pass.
pub const SMOOTH: Kernel3 = Kernel3 {
    weights: [1, 1, 1, 1, 5, 1, 1, 1, 1],
    scale: 13,
};

/// Strong sharpening.
pub const SHARPEN: Kernel3 = Kernel3 {
    weights: [-2, -2, -2, -2, 32, -2, -2, -2, -2],
    scale: 16,
};

/// Detail boost.
pub const DETAIL: Kernel3 = Kernel3 {
    weights: [0, -1, 0, -1, 10, -1, 0, -1, 0],
    scale: 6,
};

impl SpatialFilter {
    /// Kernel implementing this filter.
    pub fn kernel(self) -> &'static Kernel3 {
        match self {
            Self::Smooth => &SMOOTH,
            Self::Sharpen => &SHARPEN,
            Self::Detail => &DETAIL,
        }
    }
}

/// Convolve every channel with `k`. Neighbours outside the image clamp to the edge.
pub fn convolve3(src: &RgbImage, k: &Kernel3) -> RgbImage {
    let (w, h) = src.dimensions();
    let max_x = i64::from(w) - 1;
    let max_y = i64::from(h) - 1;
    let scale = f64::from(k.scale);

    RgbImage::from_fn(w, h, |x, y| {
        let mut acc = [0i32; 3];
        for (ki, &kw) in k.weights.iter().enumerate() {
            if kw == 0 {
                continue;
            }
            let dx = (ki % 3) as i64 - 1;
            let dy = (ki / 3) as i64 - 1;
            let sx = (i64::from(x) + dx).clamp(0, max_x) as u32;
            let sy = (i64::from(y) + dy).clamp(0, max_y) as u32;
            let px = src.get_pixel(sx, sy);
            for c in 0..3 {
                acc[c] += kw * i32::from(px[c]);
            }
        }
        image::Rgb([
            to_u8(f64::from(acc[0]) / scale),
            to_u8(f64::from(acc[1]) / scale),
            to_u8(f64::from(acc[2]) / scale),
        ])
    })
}

#[cfg(test)]
#[path = "../../tests/unit/raster/kernel.rs"]
mod tests;
