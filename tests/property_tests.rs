//! Property-based tests for fpga-wiener
//!
//! These tests use proptest to verify the invariants of the fixed-point filter
//! that should hold for all possible inputs.

use fpga_wiener::{
    filter_window, mean_squared_error, peak_signal_to_noise_ratio, Image, ReplicatePadding,
    WienerFilter, WindowStats,
};
use image::Luma;
use proptest::prelude::*;

/// Strategy for generating small but valid image dimensions
fn image_dimensions() -> impl Strategy<Value = (u32, u32)> {
    (1u32..=20, 1u32..=20)
}

/// Strategy for generating noise variances around the hardware default
fn noise_variance() -> impl Strategy<Value = u32> {
    prop_oneof![Just(0u32), Just(500u32), 0u32..=2_000, any::<u32>()]
}

/// Strategy for generating an 8-bit image of random content
fn luma_image() -> impl Strategy<Value = Image<Luma<u8>>> {
    image_dimensions().prop_flat_map(|(width, height)| {
        prop::collection::vec(any::<u8>(), (width * height) as usize).prop_map(move |samples| {
            Image::from_raw(width, height, samples).expect("sample count matches dimensions")
        })
    })
}

/// Strategy for generating a 3x3 window of 8-bit samples
fn window() -> impl Strategy<Value = [i64; 9]> {
    prop::array::uniform9(0i64..=255)
}

proptest! {
    /// Property: The filter preserves dimensions
    #[test]
    fn wiener_filter_preserves_dimensions(image in luma_image(), noise in noise_variance()) {
        let result = image.wiener_filter(noise).unwrap();
        prop_assert_eq!(result.dimensions(), image.dimensions());
    }

    /// Property: Two passes with the same input give the same output
    #[test]
    fn wiener_filter_is_deterministic(image in luma_image(), noise in noise_variance()) {
        let first = image.wiener_filter(noise).unwrap();
        let second = image.wiener_filter(noise).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Property: A uniform image is returned unchanged
    #[test]
    fn wiener_filter_keeps_flat_images(
        (width, height) in image_dimensions(),
        value in any::<u8>(),
        noise in noise_variance()
    ) {
        let image: Image<Luma<u8>> = Image::from_pixel(width, height, Luma([value]));
        let result = image.wiener_filter(noise).unwrap();
        prop_assert!(result.pixels().all(|p| p[0] == value));
    }

    /// Property: Without noise the output tracks the input within truncation error
    #[test]
    fn wiener_filter_with_zero_noise_tracks_input(image in luma_image()) {
        let result = image.wiener_filter(0).unwrap();
        for (input, output) in image.pixels().zip(result.pixels()) {
            prop_assert!(input[0].abs_diff(output[0]) <= 2);
        }
    }

    /// Property: Every output equals the window filter applied to the
    /// edge-replicated neighbourhood
    #[test]
    fn wiener_filter_matches_padded_windows(image in luma_image(), noise in noise_variance()) {
        let result = image.wiener_filter(noise).unwrap();
        let padded = image.replicate_border(1).unwrap();

        for (x, y, pixel) in result.enumerate_pixels() {
            let mut window = [0i64; 9];
            for (i, slot) in window.iter_mut().enumerate() {
                *slot = i64::from(padded.get_pixel(x + (i % 3) as u32, y + (i / 3) as u32)[0]);
            }
            prop_assert_eq!(pixel[0], filter_window(&window, noise));
        }
    }

    /// Property: A higher noise estimate never increases the gain
    #[test]
    fn gain_is_monotone_in_noise(w in window(), low in 0u32..=5_000, extra in 0u32..=5_000) {
        let weak = WindowStats::from_window(&w, low);
        let strong = WindowStats::from_window(&w, low + extra);
        prop_assert!(strong.gain_q16 <= weak.gain_q16);
        prop_assert!(weak.gain_q16 <= 1 << 16);
        prop_assert!(strong.gain_q16 >= 0);
    }

    /// Property: Output lies between the window mean and the centre sample
    #[test]
    fn output_lies_between_mean_and_centre(w in window(), noise in noise_variance()) {
        let stats = WindowStats::from_window(&w, noise);
        let output = i64::from(filter_window(&w, noise));
        let low = stats.mean.min(w[4]);
        let high = stats.mean.max(w[4]);
        prop_assert!(output >= low && output <= high);
    }

    /// Property: Comparing an image with itself gives zero error
    #[test]
    fn comparison_of_identical_images_is_lossless(image in luma_image()) {
        prop_assert_eq!(mean_squared_error(&image, &image).unwrap(), 0.0);
        prop_assert_eq!(peak_signal_to_noise_ratio(&image, &image).unwrap(), f64::INFINITY);
    }
}
