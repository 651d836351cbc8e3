use serde::{Deserialize, Serialize};

use super::color::ColorInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaintType {
    Latex,
    OilBased,
    Acrylic,
    Primer,
}

wire_enum!(PaintType, "paint type", {
    Latex => "LATEX",
    OilBased => "OIL_BASED",
    Acrylic => "ACRYLIC",
    Primer => "PRIMER",
});

/// Sheen level. Cosmetic only, no effect on quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaintFinish {
    Flat,
    Eggshell,
    Satin,
    SemiGloss,
    Gloss,
}

wire_enum!(PaintFinish, "paint finish", {
    Flat => "FLAT",
    Eggshell => "EGGSHELL",
    Satin => "SATIN",
    SemiGloss => "SEMI_GLOSS",
    Gloss => "GLOSS",
});

/// Manufacturer-declared opacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HideRating {
    Excellent,
    #[default]
    Good,
    Fair,
}

wire_enum!(HideRating, "hide rating", {
    Excellent => "EXCELLENT",
    Good => "GOOD",
    Fair => "FAIR",
});

/// Manufacturer-declared paint performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverageInfo {
    pub base_coats_needed: u32,
    pub sq_ft_per_gallon: u32,
    pub hide_rating: HideRating,
}

impl Default for CoverageInfo {
    fn default() -> Self {
        Self {
            base_coats_needed: 2,
            sq_ft_per_gallon: 350,
            hide_rating: HideRating::Good,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paint {
    pub id: String,
    pub brand: String,
    pub name: String,
    pub color: ColorInfo,
    #[serde(rename = "type")]
    pub paint_type: PaintType,
    pub finish: PaintFinish,
    #[serde(default)]
    pub coverage: CoverageInfo,
    pub price_per_gallon: f64,
}
