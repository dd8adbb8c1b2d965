//! Xilinx COE memory initialisation files.
//!
//! Frames are handed to block RAM as one 8-bit word per sample, row-major,
//! written in radix 16:
//!
//! ```text
//! memory_initialization_radix=16;
//! memory_initialization_vector=
//! 0A,
//! FF;
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::CoeError;
use crate::utils::sample_count;
use image::{ImageBuffer, Luma};
use imageproc::definitions::Image;
use tracing::info;

const RADIX_KEY: &str = "memory_initialization_radix";
const VECTOR_KEY: &str = "memory_initialization_vector";

/// Writes `samples` as a radix-16 COE vector.
///
/// # Errors
///
/// * `CoeError::EmptyVector` - If `samples` is empty
/// * `CoeError::Io` - If writing fails
pub fn write_coe<W: Write>(mut writer: W, samples: &[u8]) -> Result<(), CoeError> {
    let Some((last, words)) = samples.split_last() else {
        return Err(CoeError::EmptyVector);
    };

    writeln!(writer, "{RADIX_KEY}=16;")?;
    writeln!(writer, "{VECTOR_KEY}=")?;
    for word in words {
        writeln!(writer, "{word:02X},")?;
    }
    writeln!(writer, "{last:02X};")?;
    writer.flush()?;
    Ok(())
}

/// Dumps an 8-bit image row-major into a COE file at `path`.
pub fn save_coe<P: AsRef<Path>>(path: P, image: &Image<Luma<u8>>) -> Result<(), CoeError> {
    let path = path.as_ref();
    let writer = BufWriter::new(File::create(path)?);
    write_coe(writer, image.as_raw())?;

    info!(
        path = %path.display(),
        words = image.as_raw().len(),
        "Wrote COE file, 8-bit each"
    );
    Ok(())
}

/// Parses the vector of a radix-16 COE file.
///
/// Whitespace and line layout are ignored; the vector ends at the first `;`.
///
/// # Errors
///
/// * `CoeError::UnsupportedRadix` - If the declared radix is not 16
/// * `CoeError::MissingVector` - If there is no vector section
/// * `CoeError::InvalidWord` - If an entry is not a hexadecimal byte
pub fn parse_coe(text: &str) -> Result<Vec<u8>, CoeError> {
    if let Some(radix) = field_value(text, RADIX_KEY) {
        let radix = radix.split(';').next().unwrap_or_default().trim();
        if radix != "16" {
            return Err(CoeError::UnsupportedRadix(radix.to_string()));
        }
    }

    let vector = field_value(text, VECTOR_KEY).ok_or(CoeError::MissingVector)?;
    let vector = vector.split(';').next().unwrap_or_default();

    vector
        .split(',')
        .map(str::trim)
        .enumerate()
        .filter(|(_, word)| !word.is_empty())
        .map(|(index, word)| {
            u8::from_str_radix(word, 16).map_err(|_| CoeError::InvalidWord {
                index,
                word: word.to_string(),
            })
        })
        .collect()
}

/// Reads a COE file and reshapes it into a `width` x `height` image.
///
/// # Errors
///
/// * `CoeError::LengthMismatch` - If the word count is not `width * height`
pub fn load_coe_image<P: AsRef<Path>>(
    path: P,
    width: u32,
    height: u32,
) -> Result<Image<Luma<u8>>, CoeError> {
    let text = std::fs::read_to_string(path)?;
    let samples = parse_coe(&text)?;

    let expected = sample_count(width, height);
    let actual = samples.len();
    if actual != expected {
        return Err(CoeError::LengthMismatch { expected, actual });
    }

    ImageBuffer::from_raw(width, height, samples)
        .ok_or(CoeError::LengthMismatch { expected, actual })
}

/// Returns the text after `key` and its `=` sign.
fn field_value<'a>(text: &'a str, key: &str) -> Option<&'a str> {
    let start = text.find(key)? + key.len();
    let rest = text[start..].trim_start();
    rest.strip_prefix('=')
}
