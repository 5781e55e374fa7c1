use image::Rgb;

use super::*;

#[test]
fn kernels_preserve_flat_regions() {
    for k in [&SMOOTH, &SHARPEN, &DETAIL] {
        assert_eq!(k.weights.iter().sum::<i32>(), k.scale);
        let flat = RgbImage::from_pixel(5, 4, Rgb([77, 140, 3]));
        assert_eq!(convolve3(&flat, k), flat);
    }
}

#[test]
fn filter_maps_to_kernel() {
    assert_eq!(SpatialFilter::Smooth.kernel(), &SMOOTH);
    assert_eq!(SpatialFilter::Sharpen.kernel(), &SHARPEN);
    assert_eq!(SpatialFilter::Detail.kernel(), &DETAIL);
}

#[test]
fn sharpen_amplifies_an_isolated_spike_and_smooth_spreads_it() {
    let mut img = RgbImage::from_pixel(5, 5, Rgb([100, 100, 100]));
    img.put_pixel(2, 2, Rgb([110, 110, 110]));

    let sharp = convolve3(&img, &SHARPEN);
    assert_eq!(sharp.get_pixel(2, 2)[0], 120);
    assert!(sharp.get_pixel(1, 2)[0] < 100);

    let smooth = convolve3(&img, &SMOOTH);
    assert!(smooth.get_pixel(2, 2)[0] < 110);
    assert!(smooth.get_pixel(1, 1)[0] >= 100);
}

#[test]
fn results_clip_to_channel_range() {
    let mut img = RgbImage::from_pixel(3, 3, Rgb([0, 0, 0]));
    img.put_pixel(1, 1, Rgb([255, 255, 255]));
    let out = convolve3(&img, &SHARPEN);
    assert_eq!(out.get_pixel(1, 1)[0], 255);
    assert_eq!(out.get_pixel(0, 0)[0], 0);
}
