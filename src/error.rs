use std::io;

use thiserror::Error;

/// Error type for the fixed-point Wiener filter
///
/// The filter itself has no runtime failure modes for well-formed input;
/// these variants cover the preconditions it checks before a pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WienerError {
    /// The input grid has zero width or height
    #[error("Image dimensions must be non-zero, got {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    /// A sample of a wide integer type is outside the range the
    /// 64-bit datapath is overflow-free for
    ///
    /// Only reachable for sample types wider than 16 bits.
    #[error("Sample {value} at ({x}, {y}) exceeds the supported magnitude {limit}")]
    SampleOutOfRange {
        x: u32,
        y: u32,
        value: i64,
        limit: i64,
    },

    /// Failed to create ImageBuffer from filtered samples
    #[error("Failed to create ImageBuffer from filtered samples")]
    ImageBufferCreationFailed,
}

/// Error type for padding operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaddingError {
    /// There is no edge sample to replicate
    #[error("Cannot pad an empty image ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
}

/// Error type for image quality comparisons
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QualityError {
    /// The two images being compared have different sizes
    #[error("Image dimensions do not match: expected {expected:?}, actual {actual:?}")]
    DimensionMismatch {
        /// Expected dimensions (width, height)
        expected: (u32, u32),
        /// Actual dimensions (width, height)
        actual: (u32, u32),
    },

    /// Both images are empty, so the mean is undefined
    #[error("Cannot compare empty images")]
    EmptyImage,
}

/// Error type for reading and writing COE memory initialisation files
#[derive(Debug, Error)]
pub enum CoeError {
    #[error("COE I/O failed: {0}")]
    Io(#[from] io::Error),

    /// The file declares a radix other than 16
    #[error("Unsupported COE radix '{0}', only radix 16 is supported")]
    UnsupportedRadix(String),

    /// No `memory_initialization_vector=` section was found
    #[error("COE file has no memory_initialization_vector section")]
    MissingVector,

    /// A vector entry is not an 8-bit hexadecimal word
    #[error("Invalid COE word '{word}' at index {index}")]
    InvalidWord { index: usize, word: String },

    /// The number of words does not match the requested image size
    #[error("COE holds {actual} words, expected {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    /// The image to dump has no samples
    #[error("Cannot write an empty COE vector")]
    EmptyVector,
}

/// Error type for raw pixel-stream capture
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("Pixel stream read failed: {0}")]
    Io(#[from] io::Error),

    /// The stream ended before a full frame arrived
    #[error("Pixel stream ended after {received} of {expected} samples")]
    Truncated { expected: usize, received: usize },

    /// Requested frame has zero width or height
    #[error("Frame dimensions must be non-zero, got {width}x{height}")]
    EmptyFrame { width: u32, height: u32 },

    /// Failed to create ImageBuffer from the captured samples
    #[error("Failed to create ImageBuffer from captured samples")]
    ImageBufferCreationFailed,
}
