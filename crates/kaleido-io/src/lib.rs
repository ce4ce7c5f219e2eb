#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
///
/// Defines [`IoError`] variants for file access and encoding/decoding failures.
pub mod error;

/// JPEG image encoding and decoding.
///
/// Pure Rust JPEG codec for reading and writing rgb8 images.
pub mod jpeg;

pub use crate::error::IoError;
pub use crate::jpeg::{
    decode_image_jpeg_rgb8, encode_image_jpeg_rgb8, read_image_jpeg_rgb8, write_image_jpeg_rgb8,
    DEFAULT_JPEG_QUALITY,
};
