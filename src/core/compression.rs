// Transparent inflation of compressed capture uploads

use crate::core::constants::*;
use crate::core::error::{CanLogError, Result};
use flate2::read::GzDecoder;
use std::borrow::Cow;
use std::io::Read;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionType {
    None,
    Gzip,
    Lz4,
    Zstd,
}

impl CompressionType {
    /// Sniffs the codec from the leading magic bytes.
    pub fn detect(data: &[u8]) -> Self {
        if data.starts_with(GZIP_MAGIC) {
            CompressionType::Gzip
        } else if data.starts_with(ZSTD_MAGIC) {
            CompressionType::Zstd
        } else if data.starts_with(LZ4_FRAME_MAGIC) {
            CompressionType::Lz4
        } else {
            CompressionType::None
        }
    }
}

pub fn decompress(data: &[u8]) -> Result<Cow<'_, [u8]>> {
    match CompressionType::detect(data) {
        CompressionType::None => Ok(Cow::Borrowed(data)),

        CompressionType::Gzip => {
            let mut decoder = GzDecoder::new(data);
            let mut decompressed = Vec::new();
            decoder
                .read_to_end(&mut decompressed)
                .map_err(|e| CanLogError::Decompression(format!("Gzip: {}", e)))?;
            Ok(Cow::Owned(decompressed))
        }

        #[cfg(feature = "lz4")]
        CompressionType::Lz4 => {
            let mut decoder = lz4::Decoder::new(data)
                .map_err(|e| CanLogError::Decompression(format!("LZ4: {}", e)))?;
            let mut decompressed = Vec::new();
            decoder
                .read_to_end(&mut decompressed)
                .map_err(|e| CanLogError::Decompression(format!("LZ4: {}", e)))?;
            Ok(Cow::Owned(decompressed))
        }

        #[cfg(not(feature = "lz4"))]
        CompressionType::Lz4 => Err(CanLogError::Decompression(
            "LZ4 support not compiled in".to_string(),
        )),

        #[cfg(feature = "zstd")]
        CompressionType::Zstd => zstd::decode_all(data)
            .map(Cow::Owned)
            .map_err(|e| CanLogError::Decompression(format!("Zstd: {}", e))),

        #[cfg(not(feature = "zstd"))]
        CompressionType::Zstd => Err(CanLogError::Decompression(
            "Zstd support not compiled in".to_string(),
        )),
    }
}
