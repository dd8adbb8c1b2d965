//! Test utilities for fpga-wiener
//!
//! This module provides common functionality for testing the filter and its collaborators.
//! It is only compiled when running tests.

use image::{ImageBuffer, Luma};
use imageproc::definitions::Image;

/// Creates a test grayscale (Luma) image with predefined pixel values for testing.
///
/// This function creates a 2x2 test image with known grayscale values:
/// - (0,0): [200]
/// - (1,0): [150]
/// - (0,1): [100]
/// - (1,1): [50]
pub fn create_test_luma_image() -> Image<Luma<u8>> {
    luma_from_rows(&[&[200, 150], &[100, 50]])
}

/// Builds an 8-bit grayscale image from equally long rows.
pub fn luma_from_rows(rows: &[&[u8]]) -> Image<Luma<u8>> {
    let height = rows.len() as u32;
    let width = rows.first().map_or(0, |row| row.len()) as u32;
    ImageBuffer::from_fn(width, height, |x, y| Luma([rows[y as usize][x as usize]]))
}

/// Returns the samples of an 8-bit image as nested rows.
pub fn rows_of(image: &Image<Luma<u8>>) -> Vec<Vec<u8>> {
    image
        .rows()
        .map(|row| row.map(|pixel| pixel[0]).collect())
        .collect()
}

/// Creates a gradient image with a sharp diagonal edge, wrapping at 256.
///
/// The mix of smooth ramps and hard steps exercises both the flat-region and
/// the edge-preserving branches of the filter.
pub fn create_gradient_luma_image(width: u32, height: u32) -> Image<Luma<u8>> {
    ImageBuffer::from_fn(width, height, |x, y| {
        let ramp = (x * 37 + y * 91) % 256;
        let value = if x > y { ramp } else { 255 - ramp };
        Luma([value as u8])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_test_luma_image_with_valid_input_creates_image() {
        let image = create_test_luma_image();
        assert_eq!(image.dimensions(), (2, 2));
        assert_eq!(image.get_pixel(0, 0), &Luma([200]));
        assert_eq!(image.get_pixel(1, 0), &Luma([150]));
        assert_eq!(image.get_pixel(1, 1), &Luma([50]));
    }

    #[test]
    fn rows_of_inverts_luma_from_rows() {
        let rows: Vec<Vec<u8>> = vec![vec![1, 2, 3], vec![4, 5, 6]];
        let image = luma_from_rows(&[rows[0].as_slice(), rows[1].as_slice()]);
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(rows_of(&image), rows);
    }

    #[test]
    fn create_gradient_luma_image_has_requested_size() {
        let image = create_gradient_luma_image(7, 5);
        assert_eq!(image.dimensions(), (7, 5));
        assert_eq!(image.get_pixel(0, 0)[0], 255);
        assert_eq!(image.get_pixel(1, 0)[0], 37);
    }
}
