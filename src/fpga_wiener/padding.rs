use crate::error::PaddingError;
use crate::utils::is_empty;
use image::{ImageBuffer, Luma, Primitive};
use imageproc::definitions::Image;
use itertools::iproduct;

/// Edge-replication padding for single-channel images
///
/// Every sample of the border repeats the nearest edge sample of the input,
/// so a window centred on any original pixel is fully populated. This is
/// neither zero padding nor wraparound.
pub trait ReplicatePadding {
    /// The padded image type
    type Output;

    /// Adds a `border`-sample wide replicated border on all four sides
    ///
    /// # Arguments
    ///
    /// * `border` - Width of the border in samples
    ///
    /// # Returns
    ///
    /// An image of size `(width + 2 * border) x (height + 2 * border)`
    ///
    /// # Errors
    ///
    /// * `PaddingError::EmptyImage` - If the image has no edge samples to replicate
    fn replicate_border(&self, border: u32) -> Result<Self::Output, PaddingError>;
}

impl<S> ReplicatePadding for Image<Luma<S>>
where
    S: Primitive + 'static,
{
    type Output = Self;

    fn replicate_border(&self, border: u32) -> Result<Self::Output, PaddingError> {
        let (width, height) = self.dimensions();
        if is_empty(width, height) {
            return Err(PaddingError::EmptyImage { width, height });
        }

        let pad_width = width + 2 * border;
        let pad_height = height + 2 * border;
        let mut padded = ImageBuffer::new(pad_width, pad_height);

        for (y, x) in iproduct!(0..pad_height, 0..pad_width) {
            let src_x = source_index(x, border, width);
            let src_y = source_index(y, border, height);
            padded.put_pixel(x, y, *self.get_pixel(src_x, src_y));
        }

        Ok(padded)
    }
}

/// Maps a padded coordinate back to the nearest coordinate of the source axis.
#[inline]
fn source_index(padded: u32, border: u32, len: u32) -> u32 {
    padded.saturating_sub(border).min(len - 1)
}
