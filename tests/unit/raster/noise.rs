use image::Rgb;

use super::*;
use crate::foundation::rng::seeded_rng;

#[test]
fn noise_perturbs_a_flat_image() {
    let mut img = RgbImage::from_pixel(50, 50, Rgb([128, 128, 128]));
    add_gaussian_noise(&mut img, 0.5, &mut seeded_rng(1));
    let changed = img.iter().filter(|v| **v != 128).count();
    assert!(changed > 0);
    assert!(img.iter().all(|v| (124..=132).contains(v)));
}

#[test]
fn noise_clips_at_range_limits() {
    let mut img = RgbImage::from_pixel(40, 40, Rgb([0, 255, 0]));
    add_gaussian_noise(&mut img, 3.0, &mut seeded_rng(2));
    assert!(img.pixels().any(|p| p[0] > 0));
    assert!(img.pixels().any(|p| p[1] < 255));
}

#[test]
fn zero_sigma_is_noop_and_seed_is_reproducible() {
    let base = RgbImage::from_pixel(8, 8, Rgb([9, 9, 9]));
    let mut img = base.clone();
    add_gaussian_noise(&mut img, 0.0, &mut seeded_rng(3));
    assert_eq!(img, base);

    let mut a = base.clone();
    let mut b = base.clone();
    add_gaussian_noise(&mut a, 1.0, &mut seeded_rng(4));
    add_gaussian_noise(&mut b, 1.0, &mut seeded_rng(4));
    assert_eq!(a, b);
}
