use anyhow::Context;
use miniz_oxide::{deflate::compress_to_vec_zlib, inflate::decompress_to_vec_zlib_with_limit};

/// zlib's `Z_DEFAULT_COMPRESSION` level.
pub(crate) const DEFAULT_LEVEL: u8 = 6;

pub(crate) fn compress_data(data: &[u8]) -> Vec<u8> {
    let compressed = compress_to_vec_zlib(data, DEFAULT_LEVEL);
    log::debug!(
        "compressed {} bytes of image data to {}",
        data.len(),
        compressed.len()
    );
    compressed
}

/// Inflates at most `max_size` bytes; a stream that would produce more is an
/// error.
pub(crate) fn decompress_data(
    compressed_data: &[u8],
    max_size: usize,
) -> anyhow::Result<Vec<u8>> {
    decompress_to_vec_zlib_with_limit(compressed_data, max_size)
        .context("Failed to decompress image data.")
}
