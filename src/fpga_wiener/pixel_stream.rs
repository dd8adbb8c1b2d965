use std::io::{ErrorKind, Read};

use crate::error::StreamError;
use crate::utils::{is_empty, sample_count};
use image::imageops::{self, FilterType};
use image::{ImageBuffer, Luma};
use imageproc::definitions::Image;
use tracing::{debug, info};

/// Width of the frames the capture board streams out
pub const FRAME_WIDTH: u32 = 320;

/// Height of the frames the capture board streams out
pub const FRAME_HEIGHT: u32 = 240;

const PROGRESS_INTERVAL: usize = 1000;

/// Assembles a frame from a raw row-major stream of 8-bit samples.
///
/// Reads until `width * height` samples have arrived. Read timeouts,
/// interrupts and `WouldBlock` are retried, so a serial port opened with
/// a short timeout can be passed directly.
///
/// # Errors
///
/// * `StreamError::EmptyFrame` - If `width` or `height` is zero
/// * `StreamError::Truncated` - If the stream ends before the frame is complete
/// * `StreamError::Io` - For any other read failure
pub fn capture_frame<R: Read>(
    mut reader: R,
    width: u32,
    height: u32,
) -> Result<Image<Luma<u8>>, StreamError> {
    if is_empty(width, height) {
        return Err(StreamError::EmptyFrame { width, height });
    }

    let expected = sample_count(width, height);
    let mut samples = vec![0u8; expected];
    let mut received = 0;
    let mut next_report = PROGRESS_INTERVAL;

    debug!(width, height, "Reading pixels");
    while received < expected {
        match reader.read(&mut samples[received..]) {
            Ok(0) => return Err(StreamError::Truncated { expected, received }),
            Ok(n) => {
                received += n;
                while received >= next_report && next_report < expected {
                    debug!(received, expected, "Pixel stream progress");
                    next_report += PROGRESS_INTERVAL;
                }
            }
            Err(e)
                if matches!(
                    e.kind(),
                    ErrorKind::Interrupted | ErrorKind::TimedOut | ErrorKind::WouldBlock
                ) =>
            {
                continue
            }
            Err(e) => return Err(e.into()),
        }
    }
    info!(width, height, "Frame captured");

    ImageBuffer::from_raw(width, height, samples).ok_or(StreamError::ImageBufferCreationFailed)
}

/// Crops the top-left quadrant and scales it back to the full frame size
/// with nearest-neighbour sampling.
///
/// Used to inspect the region the hardware filter was applied to at full size.
pub fn zoom_top_left_quadrant(image: &Image<Luma<u8>>) -> Image<Luma<u8>> {
    let (width, height) = image.dimensions();
    if is_empty(width, height) {
        return image.clone();
    }

    let quadrant =
        imageops::crop_imm(image, 0, 0, (width / 2).max(1), (height / 2).max(1)).to_image();
    imageops::resize(&quadrant, width, height, FilterType::Nearest)
}
