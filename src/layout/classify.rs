//! Aspect-ratio classes and the per-class minimum rendered height policy.

use crate::foundation::core::EPSILON;
use crate::foundation::error::{FolioError, FolioResult};
use crate::model::entry::Photo;

/// Aspect ratio at or above which a photo is `Wide`.
pub const WIDE_RATIO: f64 = 3.0;
/// Aspect ratio at or below which a photo is `Tall`.
pub const TALL_RATIO: f64 = 1.0 / 3.0;

/// Aspect-ratio class of a photo.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum AspectClass {
    Wide,
    Tall,
    Landscape,
    Portrait,
    Square,
}

impl AspectClass {
    /// Panoramas and strips: the classes that only fit in dedicated rows/columns.
    pub fn is_extreme(self) -> bool {
        matches!(self, Self::Wide | Self::Tall)
    }
}

/// Classify an aspect ratio; non-finite or non-positive input is treated as landscape.
pub fn classify(aspect_ratio: f64) -> AspectClass {
    if !aspect_ratio.is_finite() || aspect_ratio <= 0.0 {
        // Callers substitute 1.0 for invalid ratios; stay total anyway.
        return AspectClass::Landscape;
    }
    if aspect_ratio >= WIDE_RATIO {
        AspectClass::Wide
    } else if aspect_ratio <= TALL_RATIO {
        AspectClass::Tall
    } else if (aspect_ratio - 1.0).abs() <= EPSILON {
        AspectClass::Square
    } else if aspect_ratio > 1.0 {
        AspectClass::Landscape
    } else {
        AspectClass::Portrait
    }
}

/// Aspect ratio and class of one photo, as consumed by the geometry solvers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhotoMetrics {
    /// `width / height`.
    pub aspect_ratio: f64,
    /// Class derived from `aspect_ratio`.
    pub class: AspectClass,
}

impl PhotoMetrics {
    /// Metrics for a known-good aspect ratio.
    pub fn new(aspect_ratio: f64) -> Self {
        Self {
            aspect_ratio,
            class: classify(aspect_ratio),
        }
    }

    /// Metrics for a photo record; invalid dimensions fall back to a 1:1 ratio.
    pub fn from_photo(photo: &Photo) -> Self {
        match photo.aspect_ratio() {
            Some(ar) => Self::new(ar),
            None => {
                tracing::warn!(
                    url = %photo.url,
                    width = photo.width,
                    height = photo.height,
                    "invalid photo dimensions, assuming 1:1"
                );
                Self::new(1.0)
            }
        }
    }
}

/// Three minimum heights selected by how many photos share the group.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HeightTiers {
    /// Groups of fewer than 5 photos.
    pub small: f64,
    /// Groups of 5 to 7 photos: a larger minimum forces fewer photos per row.
    pub medium: f64,
    /// Groups of 8 or more photos: denser grids are tolerated.
    pub large: f64,
}

impl HeightTiers {
    /// Tier for a group of `group_size` photos.
    pub fn for_group(&self, group_size: usize) -> f64 {
        match group_size {
            0..=4 => self.small,
            5..=7 => self.medium,
            _ => self.large,
        }
    }
}

/// Minimum acceptable rendered height per aspect class.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MinHeightPolicy {
    /// Minimum for panoramas, any group size.
    pub wide: f64,
    /// Minimum for strips, any group size.
    pub tall: f64,
    /// Tiers for landscape and square photos.
    pub landscape: HeightTiers,
    /// Tiers for portrait photos.
    pub portrait: HeightTiers,
}

impl Default for MinHeightPolicy {
    fn default() -> Self {
        Self {
            wide: 120.0,
            tall: 360.0,
            landscape: HeightTiers {
                small: 300.0,
                medium: 340.0,
                large: 220.0,
            },
            portrait: HeightTiers {
                small: 380.0,
                medium: 420.0,
                large: 260.0,
            },
        }
    }
}

impl MinHeightPolicy {
    /// Minimum rendered height of a `class` photo in a group of `group_size`.
    pub fn min_height(&self, class: AspectClass, group_size: usize) -> f64 {
        match class {
            AspectClass::Wide => self.wide,
            AspectClass::Tall => self.tall,
            AspectClass::Portrait => self.portrait.for_group(group_size),
            AspectClass::Landscape | AspectClass::Square => self.landscape.for_group(group_size),
        }
    }

    pub(crate) fn validate(&self) -> FolioResult<()> {
        let all = [
            self.wide,
            self.tall,
            self.landscape.small,
            self.landscape.medium,
            self.landscape.large,
            self.portrait.small,
            self.portrait.medium,
            self.portrait.large,
        ];
        if all.iter().any(|v| !v.is_finite() || *v <= 0.0) {
            return Err(FolioError::validation(
                "min_height values must be finite and > 0",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/classify.rs"]
mod tests;
