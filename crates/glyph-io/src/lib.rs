#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
///
/// Defines [`IoError`] variants for file access and decoding/encoding failures.
pub mod error;

/// High-level image reading and writing functions.
///
/// See [`functional::read_image_any_rgb8`] for automatic format detection.
pub mod functional;

/// Decode a file into an RGB matrix and encode matrices back to files.
pub mod handler;

/// Split decoded images into one matrix per color channel.
pub mod channels;

pub use crate::channels::ChannelConverter;
pub use crate::error::IoError;
pub use crate::handler::ImageHandler;
