//! Zstandard compression with externally stored lengths.
//!
//! Sections store their uncompressed length next to the compressed bytes,
//! so decompression always targets an exact output size.

use slimedit_foundation::{Error, ErrorKind, Result};

/// Default zstd compression level.
pub const DEFAULT_LEVEL: i32 = 3;

/// Compresses a buffer.
///
/// # Errors
///
/// Returns a `WriteError` if the compressor rejects the input.
pub fn compress(bytes: &[u8], level: i32) -> Result<Vec<u8>> {
    zstd::bulk::compress(bytes, level)
        .map_err(|e| Error::new(ErrorKind::WriteError(format!("compression failed: {e}"))))
}

/// Decompresses a buffer that must expand to exactly `expected_len` bytes.
///
/// An empty input with an expected length of zero yields an empty buffer.
///
/// # Errors
///
/// Returns `Decompression` if the stream is corrupt or expands to any other
/// length. Output is never truncated or padded.
pub fn decompress(bytes: &[u8], expected_len: u32) -> Result<Vec<u8>> {
    let capacity = expected_len as usize;
    if bytes.is_empty() && capacity == 0 {
        return Ok(Vec::new());
    }

    let output = zstd::bulk::decompress(bytes, capacity)
        .map_err(|e| Error::decompression(format!("{e} (expected {capacity} bytes)")))?;

    if output.len() != capacity {
        return Err(Error::decompression(format!(
            "expected {capacity} bytes, got {}",
            output.len()
        )));
    }

    Ok(output)
}
