use std::fmt;

use crate::error::QualityError;
use crate::utils::{is_empty, validate_matching_dimensions};
use image::{imageops, ImageBuffer, Luma, Primitive};
use imageproc::definitions::Image;
use imageproc::map::map_colors2;

/// Peak sample value of 8-bit images
pub const PEAK_VALUE: f64 = 255.0;

/// Result of comparing a reference image with a processed one
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityReport {
    /// Mean squared error
    pub mse: f64,
    /// Peak signal-to-noise ratio in dB, infinite for identical images
    pub psnr: f64,
}

impl fmt::Display for QualityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Image Comparison Results:")?;
        writeln!(f, "--------------------------")?;
        writeln!(f, "MSE  : {:.3}", self.mse)?;
        write!(f, "PSNR : {:.3} dB", self.psnr)
    }
}

/// Computes `mean((A - B)^2)` over all samples.
///
/// # Errors
///
/// * `QualityError::DimensionMismatch` - If the images differ in size
/// * `QualityError::EmptyImage` - If the images hold no samples
pub fn mean_squared_error<S>(
    reference: &Image<Luma<S>>,
    processed: &Image<Luma<S>>,
) -> Result<f64, QualityError>
where
    S: Primitive + Into<f64> + 'static,
{
    validate_matching_dimensions(reference.dimensions(), processed.dimensions())?;
    let (width, height) = reference.dimensions();
    if is_empty(width, height) {
        return Err(QualityError::EmptyImage);
    }

    let sum: f64 = reference
        .as_raw()
        .iter()
        .zip(processed.as_raw())
        .map(|(&a, &b)| {
            let (a, b): (f64, f64) = (a.into(), b.into());
            (a - b) * (a - b)
        })
        .sum();

    Ok(sum / reference.as_raw().len() as f64)
}

/// Converts a mean squared error into PSNR for 8-bit samples.
///
/// Returns `f64::INFINITY` when `mse` is exactly zero.
pub fn psnr_from_mse(mse: f64) -> f64 {
    if mse == 0.0 {
        f64::INFINITY
    } else {
        20.0 * (PEAK_VALUE / mse.sqrt()).log10()
    }
}

/// Computes `20 * log10(255 / sqrt(MSE))` between two images.
pub fn peak_signal_to_noise_ratio<S>(
    reference: &Image<Luma<S>>,
    processed: &Image<Luma<S>>,
) -> Result<f64, QualityError>
where
    S: Primitive + Into<f64> + 'static,
{
    mean_squared_error(reference, processed).map(psnr_from_mse)
}

/// Computes both metrics at once.
pub fn compare<S>(
    reference: &Image<Luma<S>>,
    processed: &Image<Luma<S>>,
) -> Result<QualityReport, QualityError>
where
    S: Primitive + Into<f64> + 'static,
{
    let mse = mean_squared_error(reference, processed)?;
    Ok(QualityReport {
        mse,
        psnr: psnr_from_mse(mse),
    })
}

/// Absolute per-sample difference, for locating where two images disagree.
pub fn difference_map(
    reference: &Image<Luma<u8>>,
    processed: &Image<Luma<u8>>,
) -> Result<Image<Luma<u8>>, QualityError> {
    validate_matching_dimensions(reference.dimensions(), processed.dimensions())?;
    Ok(map_colors2(reference, processed, |Luma([a]), Luma([b])| {
        Luma([a.abs_diff(b)])
    }))
}

/// Places two images next to each other for a visual check.
pub fn side_by_side(
    reference: &Image<Luma<u8>>,
    processed: &Image<Luma<u8>>,
) -> Result<Image<Luma<u8>>, QualityError> {
    validate_matching_dimensions(reference.dimensions(), processed.dimensions())?;
    let (width, height) = reference.dimensions();

    let mut canvas = ImageBuffer::new(width * 2, height);
    imageops::replace(&mut canvas, reference, 0, 0);
    imageops::replace(&mut canvas, processed, i64::from(width), 0);
    Ok(canvas)
}
