//! Color distance and coverage difficulty.
//!
//! Distance is plain Euclidean over 8-bit RGB, not a perceptual color
//! space. Kept separate from the calculator: its coat advice is not fed
//! into surface estimates.

use serde::{Deserialize, Serialize};

use crate::domain::{ColorInfo, HideRating};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CoverageDifficulty {
    Easy,
    Moderate,
    Difficult,
    VeryDifficult,
}

impl CoverageDifficulty {
    pub fn from_distance(delta_e: f64) -> Self {
        if delta_e < 50.0 {
            Self::Easy
        } else if delta_e < 100.0 {
            Self::Moderate
        } else if delta_e < 150.0 {
            Self::Difficult
        } else {
            Self::VeryDifficult
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverageAnalysis {
    pub delta_e: f64,
    pub difficulty: CoverageDifficulty,
    pub recommended_coats: u32,
    pub primer_recommended: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ColorAnalyzer;

impl ColorAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Euclidean RGB distance, 0 to ~441.67.
    pub fn calculate_color_difference(&self, current: &ColorInfo, target: &ColorInfo) -> f64 {
        let delta = |a: u8, b: u8| f64::from(a) - f64::from(b);

        let delta_r = delta(current.rgb.red, target.rgb.red);
        let delta_g = delta(current.rgb.green, target.rgb.green);
        let delta_b = delta(current.rgb.blue, target.rgb.blue);

        (delta_r * delta_r + delta_g * delta_g + delta_b * delta_b).sqrt()
    }

    pub fn analyze_coverage_needs(
        &self,
        current: &ColorInfo,
        target: &ColorInfo,
        paint_quality: HideRating,
    ) -> CoverageAnalysis {
        let delta_e = self.calculate_color_difference(current, target);

        CoverageAnalysis {
            delta_e,
            difficulty: CoverageDifficulty::from_distance(delta_e),
            recommended_coats: recommended_coats(delta_e, paint_quality),
            primer_recommended: delta_e > 100.0,
        }
    }
}

/// First matching band wins: >200, >100, <30, otherwise unchanged.
fn recommended_coats(delta_e: f64, quality: HideRating) -> u32 {
    let base_coats = match quality {
        HideRating::Excellent | HideRating::Good => 2,
        HideRating::Fair => 3,
    };

    if delta_e > 200.0 {
        base_coats + 2
    } else if delta_e > 100.0 {
        base_coats + 1
    } else if delta_e < 30.0 {
        (base_coats - 1).max(1)
    } else {
        base_coats
    }
}
