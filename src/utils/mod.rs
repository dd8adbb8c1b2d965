//! Internal utility functions for fpga-wiener.
//!
//! This module contains the dimension checks shared by the filter and its collaborators.

use crate::error::QualityError;

/// Returns `true` when an image with these dimensions holds no samples.
#[inline]
pub fn is_empty(width: u32, height: u32) -> bool {
    width == 0 || height == 0
}

/// Validates that two images have matching dimensions.
///
/// # Arguments
///
/// * `expected` - The dimensions of the reference image
/// * `actual` - The dimensions of the image compared against it
///
/// # Returns
///
/// `Ok(())` if the dimensions match, otherwise `QualityError::DimensionMismatch`
pub fn validate_matching_dimensions(
    expected: (u32, u32),
    actual: (u32, u32),
) -> Result<(), QualityError> {
    if expected != actual {
        return Err(QualityError::DimensionMismatch { expected, actual });
    }
    Ok(())
}

/// Number of samples in a `width` x `height` grid.
#[inline]
pub fn sample_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_empty() {
        assert!(!is_empty(100, 100));
        assert!(!is_empty(1, 1));
        assert!(is_empty(0, 100));
        assert!(is_empty(100, 0));
        assert!(is_empty(0, 0));
    }

    #[test]
    fn test_validate_matching_dimensions() {
        assert!(validate_matching_dimensions((100, 100), (100, 100)).is_ok());
        assert!(validate_matching_dimensions((50, 75), (50, 75)).is_ok());
        assert_eq!(
            validate_matching_dimensions((100, 100), (100, 50)),
            Err(QualityError::DimensionMismatch {
                expected: (100, 100),
                actual: (100, 50),
            })
        );
        assert!(validate_matching_dimensions((100, 100), (50, 100)).is_err());
    }

    #[test]
    fn test_sample_count() {
        assert_eq!(sample_count(320, 240), 76_800);
        assert_eq!(sample_count(0, 240), 0);
    }
}
