#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use glyph_augment as augment;

#[doc(inline)]
pub use glyph_image as image;

#[doc(inline)]
pub use glyph_imgproc as imgproc;

#[doc(inline)]
pub use glyph_io as io;

/// Pipeline configuration.
pub mod config;

/// Error types of the pipeline.
pub mod error;

/// Per-channel transform pipeline.
pub mod pipeline;

/// File-level preprocessing entry point.
pub mod preprocessor;

pub use crate::config::PipelineConfig;
pub use crate::error::PipelineError;
pub use crate::pipeline::TransformPipeline;
pub use crate::preprocessor::{ChannelBatch, ImagePreprocessor};
