#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the augmentation module.
pub mod error;

/// flips, rotations and translations with randomized parameters.
pub mod geometric;

/// additive noise augmentations.
pub mod noise;

/// rejection-sampling orchestration of augmentation pipelines.
pub mod orchestrator;

/// sources of random scalar parameters.
pub mod provider;

/// the closed set of augmentation steps and their families.
pub mod step;

pub use crate::error::AugmentError;
pub use crate::orchestrator::{AugmentConfig, AugmentationOrchestrator, AugmentedSample};
pub use crate::provider::{ConstantProvider, ParameterProvider, UniformProvider};
pub use crate::step::{AugmentationFamily, AugmentationKind};
