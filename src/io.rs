// File-level I/O helpers for LZSS compression.
//
// Provides `compress_file()` and `decompress_file()` convenience functions
// that read the whole input, run the in-memory codec, and write the result
// through a `BufWriter`. With the `file-io` feature a SHA-256 of the
// uncompressed side is recorded so a round trip can be verified.
// `compress_files()` handles a batch, in parallel with the `parallel` feature.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};
use thiserror::Error;

#[cfg(feature = "file-io")]
use sha2::Digest;

use crate::codec::decoder::{self, DecodeError, StopReason};
use crate::codec::encoder::{self, EncodeError};
use crate::engine::compression_ratio;

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Statistics returned by `compress_file()`.
#[derive(Debug, Clone)]
pub struct CompressStats {
    /// Uncompressed input size in bytes.
    pub input_size: u64,
    /// Compressed output size in bytes.
    pub output_size: u64,
    /// Literal tokens emitted.
    pub literals: u64,
    /// Back-reference tokens emitted.
    pub matches: u64,
    /// SHA-256 of the uncompressed input (if `file-io` feature is enabled).
    pub input_sha256: Option<[u8; 32]>,
}

impl CompressStats {
    /// Output size as a percentage of input size.
    pub fn ratio(&self) -> Option<f64> {
        compression_ratio(self.input_size, self.output_size)
    }
}

/// Statistics returned by `decompress_file()`.
#[derive(Debug, Clone)]
pub struct DecompressStats {
    /// Compressed input size in bytes.
    pub input_size: u64,
    /// Reconstructed output size in bytes.
    pub output_size: u64,
    /// Tokens expanded.
    pub tokens: u64,
    /// Why decoding stopped.
    pub stop: StopReason,
    /// SHA-256 of the reconstructed output (if `file-io` feature is enabled).
    pub output_sha256: Option<[u8; 32]>,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error type for file operations.
#[derive(Debug, Error)]
pub enum IoError {
    /// Reading the input failed.
    #[error("read error: {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    /// Writing the output failed.
    #[error("write error: {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    /// Compression failed.
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),
    /// Decompression failed.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
}

// ---------------------------------------------------------------------------
// compress_file
// ---------------------------------------------------------------------------

/// Compress `input_path` into `output_path`.
///
/// The output file is only created once compression has succeeded.
pub fn compress_file(input_path: &Path, output_path: &Path) -> Result<CompressStats, IoError> {
    let input = read_input(input_path)?;
    let encoded = encoder::encode_detailed(&input)?;
    write_output(output_path, &encoded.data)?;

    let stats = CompressStats {
        input_size: input.len() as u64,
        output_size: encoded.data.len() as u64,
        literals: encoded.literals as u64,
        matches: encoded.matches as u64,
        input_sha256: sha256(&input),
    };
    info!(
        "compressed {} -> {}: {} -> {} bytes",
        input_path.display(),
        output_path.display(),
        stats.input_size,
        stats.output_size
    );
    Ok(stats)
}

// ---------------------------------------------------------------------------
// decompress_file
// ---------------------------------------------------------------------------

/// Decompress `input_path` into `output_path`, starting no token once
/// `max_output_size` bytes have been produced.
pub fn decompress_file(
    input_path: &Path,
    output_path: &Path,
    max_output_size: usize,
) -> Result<DecompressStats, IoError> {
    let input = read_input(input_path)?;
    let decoded = decoder::decode_detailed(&input, max_output_size)?;
    write_output(output_path, &decoded.data)?;

    let stats = DecompressStats {
        input_size: input.len() as u64,
        output_size: decoded.data.len() as u64,
        tokens: decoded.tokens as u64,
        stop: decoded.stop,
        output_sha256: sha256(&decoded.data),
    };
    info!(
        "decompressed {} -> {}: {} -> {} bytes ({})",
        input_path.display(),
        output_path.display(),
        stats.input_size,
        stats.output_size,
        stats.stop
    );
    Ok(stats)
}

// ---------------------------------------------------------------------------
// Batch compression
// ---------------------------------------------------------------------------

/// Compress each `(input, output)` pair independently.
///
/// Results are returned in job order. With the `parallel` feature the jobs
/// run on the rayon pool; every job builds its own hash index.
pub fn compress_files(jobs: &[(PathBuf, PathBuf)]) -> Vec<Result<CompressStats, IoError>> {
    debug!("compressing {} files", jobs.len());

    #[cfg(feature = "parallel")]
    let results = {
        use rayon::prelude::*;
        jobs.par_iter()
            .map(|(input, output)| compress_file(input, output))
            .collect()
    };

    #[cfg(not(feature = "parallel"))]
    let results = jobs
        .iter()
        .map(|(input, output)| compress_file(input, output))
        .collect();

    results
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_input(path: &Path) -> Result<Vec<u8>, IoError> {
    std::fs::read(path).map_err(|source| IoError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn write_output(path: &Path, data: &[u8]) -> Result<(), IoError> {
    let write = || -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(data)?;
        writer.flush()
    };
    write().map_err(|source| IoError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(feature = "file-io")]
fn sha256(data: &[u8]) -> Option<[u8; 32]> {
    Some(sha2::Sha256::digest(data).into())
}

#[cfg(not(feature = "file-io"))]
fn sha256(_data: &[u8]) -> Option<[u8; 32]> {
    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
