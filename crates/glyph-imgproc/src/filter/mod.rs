//! Filter operations
//!
//! This module provides correlation based filter operations for image processing.

/// Filter kernels
pub mod kernels;

/// Sliding window correlation
mod convolution;
pub use convolution::*;
