//! LZSS compression and decompression in Rust.
//!
//! The crate provides:
//! - The LZSS stream format: tokens, flag packing, encoder and decoder (`codec`)
//! - The hash index and window match finder used by the encoder (`hash`)
//! - High-level compress/decompress APIs (`engine`)
//! - File-oriented helpers (`io`)
//! - An optional CLI (`cli` feature)
//!
//! # Quick Start
//!
//! ```no_run
//! use lzss::engine::{self, DecodeOptions};
//!
//! let data = b"to be or not to be, that is the question";
//!
//! let packed = engine::compress(data).unwrap();
//! let opts = DecodeOptions::with_max_output_size(data.len());
//! let unpacked = engine::decompress_with_options(&packed, &opts).unwrap();
//! assert_eq!(unpacked, data);
//! ```

pub mod codec;
pub mod engine;
pub mod hash;
pub mod io;

#[cfg(feature = "cli")]
pub mod cli;
