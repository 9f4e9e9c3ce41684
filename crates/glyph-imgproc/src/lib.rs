#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// color transformations module.
pub mod color;

/// image cropping module.
pub mod crop;

/// image filtering module.
pub mod filter;

/// image flipping module.
pub mod flip;

/// intensity histogram module.
pub mod histogram;

/// morphological operations module.
pub mod morphology;

/// operations to normalize images.
pub mod normalize;

/// spatial padding module.
pub mod padding;

/// module containing parallization utilities.
pub mod parallel;

/// max pooling module.
pub mod pooling;

/// utility functions for resizing images.
pub mod resize;

/// operations to threshold images.
pub mod threshold;

/// image geometric transformations module.
pub mod warp;
