use image::{Rgb, RgbImage, imageops::FilterType};

/// Lanczos3 resize to exactly `width` x `height`.
pub fn resize(src: &RgbImage, width: u32, height: u32) -> RgbImage {
    image::imageops::resize(src, width.max(1), height.max(1), FilterType::Lanczos3)
}

/// Rotate counter-clockwise by `angle_deg` about the image centre.
///
/// The canvas keeps its size; samples that fall outside the source take the
/// nearest edge pixel, so corners never turn black.
pub fn rotate(src: &RgbImage, angle_deg: f64) -> RgbImage {
    if angle_deg == 0.0 {
        return src.clone();
    }
    let (w, h) = src.dimensions();
    let cx = (f64::from(w) - 1.0) / 2.0;
    let cy = (f64::from(h) - 1.0) / 2.0;
    let (sin, cos) = angle_deg.to_radians().sin_cos();

    RgbImage::from_fn(w, h, |x, y| {
        let u = f64::from(x) - cx;
        let v = f64::from(y) - cy;
        let sx = cx + u * cos - v * sin;
        let sy = cy + u * sin + v * cos;
        to_rgb8(sample_bicubic(src, sx, sy))
    })
}

/// Shift content so that output `(x, y)` reads source `(x + dx, y + dy)`.
/// The vacated strip repeats the edge row/column.
pub fn translate(src: &RgbImage, dx: i32, dy: i32) -> RgbImage {
    if dx == 0 && dy == 0 {
        return src.clone();
    }
    let (w, h) = src.dimensions();
    let max_x = i64::from(w) - 1;
    let max_y = i64::from(h) - 1;
    RgbImage::from_fn(w, h, |x, y| {
        let sx = (i64::from(x) + i64::from(dx)).clamp(0, max_x) as u32;
        let sy = (i64::from(y) + i64::from(dy)).clamp(0, max_y) as u32;
        *src.get_pixel(sx, sy)
    })
}

/// Keys cubic convolution weight (a = -0.5).
fn cubic_weight(t: f64) -> f64 {
    const A: f64 = -0.5;
    let t = t.abs();
    if t <= 1.0 {
        ((A + 2.0) * t - (A + 3.0)) * t * t + 1.0
    } else if t < 2.0 {
        ((A * t - 5.0 * A) * t + 8.0 * A) * t - 4.0 * A
    } else {
        0.0
    }
}

pub(crate) fn sample_bicubic(src: &RgbImage, x: f64, y: f64) -> [f64; 3] {
    let (w, h) = src.dimensions();
    let max_x = i64::from(w) - 1;
    let max_y = i64::from(h) - 1;
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let mut acc = [0.0f64; 3];
    for j in -1..=2i64 {
        let wy = cubic_weight(fy - j as f64);
        if wy == 0.0 {
            continue;
        }
        let sy = (y0 + j).clamp(0, max_y) as u32;
        for i in -1..=2i64 {
            let wx = cubic_weight(fx - i as f64);
            if wx == 0.0 {
                continue;
            }
            let sx = (x0 + i).clamp(0, max_x) as u32;
            let px = src.get_pixel(sx, sy);
            for c in 0..3 {
                acc[c] += wx * wy * f64::from(px[c]);
            }
        }
    }
    acc
}

pub(crate) fn to_u8(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

pub(crate) fn to_rgb8(v: [f64; 3]) -> Rgb<u8> {
    Rgb([to_u8(v[0]), to_u8(v[1]), to_u8(v[2])])
}

#[cfg(test)]
#[path = "../../tests/unit/raster/geometry.rs"]
mod tests;
