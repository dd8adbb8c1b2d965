use crate::error::WienerError;
use crate::fpga_wiener::padding::ReplicatePadding;
use crate::utils::{is_empty, sample_count};
use image::{ImageBuffer, Luma, Primitive};
use imageproc::definitions::Image;
#[cfg(feature = "rayon")]
use rayon::prelude::*;
use tracing::debug;

/// Side length of the square neighbourhood window
pub const WINDOW_SIZE: u32 = 3;

/// Number of samples in one window
const WINDOW_LEN: i64 = 9;

/// Fractional bits of the Q16.16 gain
pub const Q16_SHIFT: u32 = 16;

/// Noise variance the hardware instance is built with
pub const DEFAULT_NOISE_VARIANCE: u32 = 500;

/// Largest sample magnitude the 64-bit datapath is overflow-free for
pub const MAX_SAMPLE_MAGNITUDE: i64 = 65_535;

/// A flattened 3x3 neighbourhood, row-major, centre sample at index 4
pub type Window = [i64; 9];

/// Parameters for one filter pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WienerParams {
    /// Estimated sensor noise power (σ_n²)
    pub noise_variance: u32,
}

impl WienerParams {
    pub const fn new(noise_variance: u32) -> Self {
        Self { noise_variance }
    }
}

impl Default for WienerParams {
    fn default() -> Self {
        Self::new(DEFAULT_NOISE_VARIANCE)
    }
}

/// Intermediate values the hardware computes for one window
///
/// Every field is an exact integer. Divisions by the window length floor,
/// which equals truncation for the non-negative sums 8-bit input produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowStats {
    /// Σ p
    pub sum: i64,
    /// Σ p²
    pub sum_sq: i64,
    /// sum / 9
    pub mean: i64,
    /// sum_sq / 9, the E[x²] estimate
    pub mean_sq: i64,
    /// max(0, E[x²] − mean²)
    pub variance: i64,
    /// max(0, variance − noise_variance)
    pub signal_variance: i64,
    /// (signal_variance << 16) / variance in Q16.16, zero for a flat window
    pub gain_q16: i64,
}

impl WindowStats {
    /// Computes the window statistics and the Q16.16 gain
    pub fn from_window(window: &Window, noise_variance: u32) -> Self {
        let sum: i64 = window.iter().sum();
        let sum_sq: i64 = window.iter().map(|&p| p * p).sum();

        let mean = sum.div_euclid(WINDOW_LEN);
        let mean_sq = sum_sq.div_euclid(WINDOW_LEN);

        let variance = (mean_sq - mean * mean).max(0);
        let signal_variance = (variance - i64::from(noise_variance)).max(0);

        // Shift before dividing: truncation happens at the division only.
        let gain_q16 = if variance == 0 {
            0
        } else {
            (signal_variance << Q16_SHIFT) / variance
        };

        Self {
            sum,
            sum_sq,
            mean,
            mean_sq,
            variance,
            signal_variance,
            gain_q16,
        }
    }

    /// Correction added to the mean for a window centred on `center`
    ///
    /// The product is scaled back with an arithmetic shift, so negative
    /// products round toward negative infinity like the hardware does.
    #[inline]
    pub fn add_term(&self, center: i64) -> i64 {
        let delta = center - self.mean;
        (self.gain_q16 * delta) >> Q16_SHIFT
    }
}

/// Filters a single window and returns the saturated output sample
#[inline]
pub fn filter_window(window: &Window, noise_variance: u32) -> u8 {
    let stats = WindowStats::from_window(window, noise_variance);
    saturate(stats.mean + stats.add_term(window[4]))
}

/// Clamps a filtered value into the 8-bit output range
#[inline]
pub fn saturate(value: i64) -> u8 {
    value.clamp(0, i64::from(u8::MAX)) as u8
}

/// Fixed-point 3x3 adaptive Wiener filter trait
///
/// Models the hardware `weiner3x3` pipeline bit for bit: window sums in
/// integer arithmetic, a Q16.16 gain computed by shift-then-divide, an
/// arithmetic right shift for the correction term and saturation to 8 bits.
/// Border pixels see an edge-replicated neighbourhood.
///
/// Flat windows (variance 0) produce gain 0 and output the window mean.
/// Windows whose variance is well above the noise floor have a gain close to
/// unity and keep the original sample.
///
/// # Examples
///
/// ```rust
/// use fpga_wiener::WienerFilter;
/// use image::{ImageBuffer, Luma};
///
/// let image: ImageBuffer<Luma<u8>, Vec<u8>> = ImageBuffer::from_pixel(4, 4, Luma([100]));
/// let filtered = image.wiener_filter(500).unwrap();
/// assert_eq!(filtered.dimensions(), (4, 4));
/// assert!(filtered.pixels().all(|p| p[0] == 100));
/// ```
pub trait WienerFilter {
    /// Applies the filter with explicit parameters
    ///
    /// # Returns
    ///
    /// A new 8-bit image with the input's dimensions
    ///
    /// # Errors
    ///
    /// * `WienerError::EmptyImage` - If the image has zero width or height
    /// * `WienerError::SampleOutOfRange` - If a sample of a wide type exceeds
    ///   [`MAX_SAMPLE_MAGNITUDE`]
    fn wiener_filter_with(&self, params: &WienerParams) -> Result<Image<Luma<u8>>, WienerError>;

    /// Applies the filter with the given noise variance
    fn wiener_filter(&self, noise_variance: u32) -> Result<Image<Luma<u8>>, WienerError> {
        self.wiener_filter_with(&WienerParams::new(noise_variance))
    }
}

impl<S> WienerFilter for Image<Luma<S>>
where
    S: Primitive + Into<i64> + 'static,
{
    fn wiener_filter_with(&self, params: &WienerParams) -> Result<Image<Luma<u8>>, WienerError> {
        let (width, height) = self.dimensions();
        if is_empty(width, height) {
            return Err(WienerError::EmptyImage { width, height });
        }
        validate_sample_range(self)?;

        debug!(
            width,
            height,
            noise_variance = params.noise_variance,
            "Applying fixed-point Wiener filter"
        );

        let padded = self
            .replicate_border(WINDOW_SIZE / 2)
            .map_err(|_| WienerError::EmptyImage { width, height })?;
        let samples: Vec<i64> = padded.as_raw().iter().map(|&s| s.into()).collect();

        let mut output = vec![0u8; sample_count(width, height)];
        filter_rows(&samples, width as usize, &mut output, params.noise_variance);

        ImageBuffer::from_raw(width, height, output).ok_or(WienerError::ImageBufferCreationFailed)
    }
}

/// Rejects samples the datapath could overflow on
///
/// Types no wider than 16 bits pass without a scan.
fn validate_sample_range<S>(image: &Image<Luma<S>>) -> Result<(), WienerError>
where
    S: Primitive + Into<i64> + 'static,
{
    let type_max: i64 = S::DEFAULT_MAX_VALUE.into();
    let type_min: i64 = S::DEFAULT_MIN_VALUE.into();
    if type_max <= MAX_SAMPLE_MAGNITUDE && type_min >= -MAX_SAMPLE_MAGNITUDE {
        return Ok(());
    }

    for (x, y, pixel) in image.enumerate_pixels() {
        let value: i64 = pixel[0].into();
        if value.abs() > MAX_SAMPLE_MAGNITUDE {
            return Err(WienerError::SampleOutOfRange {
                x,
                y,
                value,
                limit: MAX_SAMPLE_MAGNITUDE,
            });
        }
    }
    Ok(())
}

/// Filters every output row; `padded` has a one-sample border on each side.
#[cfg(feature = "rayon")]
fn filter_rows(padded: &[i64], width: usize, output: &mut [u8], noise_variance: u32) {
    output
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| filter_row(padded, y, row, noise_variance));
}

#[cfg(not(feature = "rayon"))]
fn filter_rows(padded: &[i64], width: usize, output: &mut [u8], noise_variance: u32) {
    output
        .chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| filter_row(padded, y, row, noise_variance));
}

#[inline]
fn filter_row(padded: &[i64], y: usize, row: &mut [u8], noise_variance: u32) {
    let stride = row.len() + 2;
    let above = &padded[y * stride..(y + 1) * stride];
    let centre = &padded[(y + 1) * stride..(y + 2) * stride];
    let below = &padded[(y + 2) * stride..(y + 3) * stride];

    for (x, out) in row.iter_mut().enumerate() {
        let window = [
            above[x],
            above[x + 1],
            above[x + 2],
            centre[x],
            centre[x + 1],
            centre[x + 2],
            below[x],
            below[x + 1],
            below[x + 2],
        ];
        *out = filter_window(&window, noise_variance);
    }
}
