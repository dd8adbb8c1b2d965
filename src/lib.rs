mod error;
mod fpga_wiener;
mod utils;

#[cfg(test)]
mod test_utils;

use image::{ImageBuffer, Pixel};

pub use error::{CoeError, PaddingError, QualityError, StreamError, WienerError};
pub use fpga_wiener::coe::{load_coe_image, parse_coe, save_coe, write_coe};
pub use fpga_wiener::padding::ReplicatePadding;
pub use fpga_wiener::pixel_stream::{
    capture_frame, zoom_top_left_quadrant, FRAME_HEIGHT, FRAME_WIDTH,
};
pub use fpga_wiener::quality::{
    compare, difference_map, mean_squared_error, peak_signal_to_noise_ratio, psnr_from_mse,
    side_by_side, QualityReport, PEAK_VALUE,
};
pub use fpga_wiener::wiener::{
    filter_window, saturate, WienerFilter, WienerParams, Window, WindowStats,
    DEFAULT_NOISE_VARIANCE, MAX_SAMPLE_MAGNITUDE, Q16_SHIFT, WINDOW_SIZE,
};

pub type Image<P> = ImageBuffer<P, Vec<<P as Pixel>::Subpixel>>;
