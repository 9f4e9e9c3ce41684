use glyph_image::ImageError;

use crate::step::{AugmentationFamily, AugmentationKind};

/// An error type for the augmentation module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum AugmentError {
    /// Error when the catalog cannot produce a pipeline of distinct families.
    #[error("The catalog covers {0} families, at least {1} are required")]
    NotEnoughFamilies(usize, usize),

    /// Error when a family is listed without any augmentation kind.
    #[error("The family {0} has no augmentation kinds")]
    EmptyFamily(AugmentationFamily),

    /// Error when a family appears more than once in the catalog.
    #[error("The family {0} appears more than once in the catalog")]
    DuplicateFamily(AugmentationFamily),

    /// Error when a kind is listed under a family it does not belong to.
    #[error("{0} is listed under the {1} family")]
    MisplacedKind(AugmentationKind, AugmentationFamily),

    /// Error when a parameter provider is built from a non-finite range.
    #[error("Invalid provider range [{0}, {1}]")]
    InvalidProviderRange(f32, f32),

    /// Error when an acceptance threshold is not usable.
    #[error("Invalid acceptance bounds: {0}")]
    InvalidBounds(String),

    /// Error raised by an image operation.
    #[error(transparent)]
    Image(#[from] ImageError),
}
