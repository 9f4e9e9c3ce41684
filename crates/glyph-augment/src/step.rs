use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The group an augmentation belongs to. A pipeline holds at most one step per family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AugmentationFamily {
    /// Axis reversals.
    Flip,
    /// Quarter turns and small-angle rotations.
    Rotation,
    /// Dilation, erosion and their composites.
    Morphology,
    /// Pixel noise and translations.
    #[serde(rename = "Noise_Shift")]
    NoiseShift,
}

impl AugmentationFamily {
    /// The human readable name of the family.
    pub fn name(&self) -> &'static str {
        match self {
            AugmentationFamily::Flip => "Flip",
            AugmentationFamily::Rotation => "Rotation",
            AugmentationFamily::Morphology => "Morphology",
            AugmentationFamily::NoiseShift => "Noise_Shift",
        }
    }
}

impl fmt::Display for AugmentationFamily {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single augmentation step.
///
/// Serialized with its human readable tag, e.g. `"H-Flip"` or `"S&P-Noise"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AugmentationKind {
    /// Mirror the columns.
    #[serde(rename = "H-Flip")]
    HorizontalFlip,
    /// Mirror the rows.
    #[serde(rename = "V-Flip")]
    VerticalFlip,
    /// Clockwise quarter turn.
    #[serde(rename = "Rot90-R")]
    Rotate90,
    /// Clockwise-range rotation by a small random angle.
    #[serde(rename = "RotSmall-R")]
    RotateSmall,
    /// Dilation.
    Dilate,
    /// Erosion.
    Erode,
    /// Morphological closing.
    Closing,
    /// Morphological opening.
    Opening,
    /// Pixels removed by an erosion.
    Boundaries,
    /// Salt and pepper corruption.
    #[serde(rename = "S&P-Noise")]
    SaltAndPepper,
    /// Additive gaussian noise.
    #[serde(rename = "Gauss-Noise")]
    GaussianNoise,
    /// Random translation with a rightward horizontal component.
    #[serde(rename = "Shift-R")]
    ShiftRight,
}

impl AugmentationKind {
    /// Every augmentation kind.
    pub const ALL: [AugmentationKind; 12] = [
        AugmentationKind::HorizontalFlip,
        AugmentationKind::VerticalFlip,
        AugmentationKind::Rotate90,
        AugmentationKind::RotateSmall,
        AugmentationKind::Dilate,
        AugmentationKind::Erode,
        AugmentationKind::Closing,
        AugmentationKind::Opening,
        AugmentationKind::Boundaries,
        AugmentationKind::SaltAndPepper,
        AugmentationKind::GaussianNoise,
        AugmentationKind::ShiftRight,
    ];

    /// The human readable tag of the step.
    pub fn tag(&self) -> &'static str {
        match self {
            AugmentationKind::HorizontalFlip => "H-Flip",
            AugmentationKind::VerticalFlip => "V-Flip",
            AugmentationKind::Rotate90 => "Rot90-R",
            AugmentationKind::RotateSmall => "RotSmall-R",
            AugmentationKind::Dilate => "Dilate",
            AugmentationKind::Erode => "Erode",
            AugmentationKind::Closing => "Closing",
            AugmentationKind::Opening => "Opening",
            AugmentationKind::Boundaries => "Boundaries",
            AugmentationKind::SaltAndPepper => "S&P-Noise",
            AugmentationKind::GaussianNoise => "Gauss-Noise",
            AugmentationKind::ShiftRight => "Shift-R",
        }
    }

    /// The family the step belongs to.
    pub fn family(&self) -> AugmentationFamily {
        match self {
            AugmentationKind::HorizontalFlip | AugmentationKind::VerticalFlip => {
                AugmentationFamily::Flip
            }
            AugmentationKind::Rotate90 | AugmentationKind::RotateSmall => {
                AugmentationFamily::Rotation
            }
            AugmentationKind::Dilate
            | AugmentationKind::Erode
            | AugmentationKind::Closing
            | AugmentationKind::Opening
            | AugmentationKind::Boundaries => AugmentationFamily::Morphology,
            AugmentationKind::SaltAndPepper
            | AugmentationKind::GaussianNoise
            | AugmentationKind::ShiftRight => AugmentationFamily::NoiseShift,
        }
    }

    /// Whether the step rotates the image.
    pub fn is_rotation(&self) -> bool {
        matches!(
            self,
            AugmentationKind::Rotate90 | AugmentationKind::RotateSmall
        )
    }
}

impl fmt::Display for AugmentationKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Error returned when parsing an unknown augmentation tag.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown augmentation tag '{0}'")]
pub struct ParseAugmentationKindError(pub String);

impl FromStr for AugmentationKind {
    type Err = ParseAugmentationKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag() == s)
            .ok_or_else(|| ParseAugmentationKindError(s.to_string()))
    }
}

/// The kinds one family contributes to the sampling catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFamily {
    /// The family.
    pub family: AugmentationFamily,
    /// The kinds sampled for the family. Every kind must belong to `family`.
    pub kinds: Vec<AugmentationKind>,
}

/// The catalog used when none is configured.
///
/// `Flip{H-Flip, V-Flip}`, `Rotation{Rot90-R, RotSmall-R}`, `Morphology{Dilate, Closing}`
/// and `Noise_Shift{S&P-Noise, Shift-R}`.
pub fn default_catalog() -> Vec<CatalogFamily> {
    vec![
        CatalogFamily {
            family: AugmentationFamily::Flip,
            kinds: vec![
                AugmentationKind::HorizontalFlip,
                AugmentationKind::VerticalFlip,
            ],
        },
        CatalogFamily {
            family: AugmentationFamily::Rotation,
            kinds: vec![AugmentationKind::Rotate90, AugmentationKind::RotateSmall],
        },
        CatalogFamily {
            family: AugmentationFamily::Morphology,
            kinds: vec![AugmentationKind::Dilate, AugmentationKind::Closing],
        },
        CatalogFamily {
            family: AugmentationFamily::NoiseShift,
            kinds: vec![AugmentationKind::SaltAndPepper, AugmentationKind::ShiftRight],
        },
    ]
}
