//! Estimate result types returned to the UI layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::paint::Paint;
use super::room::{Room, Surface};

/// Quantity of paint for one surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaintQuantity {
    pub gallons: f64,
    /// `floor(gallons * 4)`, truncated rather than rounded
    pub quarts: i64,
    pub recommended_purchase: String,
}

impl PaintQuantity {
    pub fn from_gallons(gallons: f64) -> Self {
        Self {
            gallons,
            quarts: (gallons * 4.0) as i64,
            recommended_purchase: format_purchase_recommendation(gallons),
        }
    }
}

/// Render a quantity as whole gallons plus leftover quarts, both truncated.
pub fn format_purchase_recommendation(gallons: f64) -> String {
    let whole_gallons = gallons as i64;
    let remaining_quarts = ((gallons - whole_gallons as f64) * 4.0) as i64;

    match (whole_gallons, remaining_quarts) {
        (0, quarts) if quarts > 0 => count_of(quarts, "quart"),
        (whole, 0) => count_of(whole, "gallon"),
        (whole, quarts) => format!("{}, {}", count_of(whole, "gallon"), count_of(quarts, "quart")),
    }
}

fn count_of(n: i64, unit: &str) -> String {
    if n > 1 {
        format!("{} {}s", n, unit)
    } else {
        format!("{} {}", n, unit)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceEstimate {
    pub surface: Surface,
    pub paint: Paint,
    pub coats_needed: u32,
    pub primer_needed: bool,
    pub paint_quantity: PaintQuantity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

wire_enum!(ConfidenceLevel, "confidence level", {
    Low => "LOW",
    Medium => "MEDIUM",
    High => "HIGH",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalEstimate {
    pub total_paint_gallons: f64,
    pub total_primer_gallons: f64,
    pub total_cost: f64,
    pub confidence_level: ConfidenceLevel,
}

/// Advisory shown alongside an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Recommendation {
    Primer,
    MultipleCoats { coats: u32 },
    SurfacePreparation,
    TexturedRoller,
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Recommendation::Primer => write!(f, "🎨 Primer recommended for best results"),
            Recommendation::MultipleCoats { coats } => {
                write!(f, "⏰ Plan for {} coats - allow proper drying time", coats)
            }
            Recommendation::SurfacePreparation => {
                write!(f, "🔧 Surface preparation required")
            }
            Recommendation::TexturedRoller => {
                write!(f, "🖌️ Use high-quality roller for textured surfaces")
            }
        }
    }
}

/// Non-fatal input problem reported with an estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EstimateWarning {
    /// Openings exceed wall area; the estimate uses the raw value.
    NegativeWallArea { wall_area: f64 },
}

impl std::fmt::Display for EstimateWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EstimateWarning::NegativeWallArea { wall_area } => write!(
                f,
                "Openings exceed wall area (net wall area {:.2} m²)",
                wall_area
            ),
        }
    }
}

/// Top-level result of a calculation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaintEstimate {
    pub id: Uuid,
    pub room: Room,
    pub selected_paint: Paint,
    pub surface_estimates: Vec<SurfaceEstimate>,
    pub total_estimate: TotalEstimate,
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<EstimateWarning>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarts_truncate() {
        let quantity = PaintQuantity::from_gallons(1.74);
        assert_eq!(quantity.quarts, 6);
        assert_eq!(PaintQuantity::from_gallons(0.24).quarts, 0);
    }

    #[test]
    fn purchase_recommendation_formats() {
        assert_eq!(format_purchase_recommendation(0.5), "2 quarts");
        assert_eq!(format_purchase_recommendation(0.3), "1 quart");
        assert_eq!(format_purchase_recommendation(2.0), "2 gallons");
        assert_eq!(format_purchase_recommendation(1.1), "1 gallon");
        assert_eq!(format_purchase_recommendation(2.25), "2 gallons, 1 quart");
        assert_eq!(format_purchase_recommendation(1.6), "1 gallon, 2 quarts");
        // Less than a quart falls through to the gallon form
        assert_eq!(format_purchase_recommendation(0.1), "0 gallon");
    }

    #[test]
    fn recommendation_messages() {
        assert_eq!(
            Recommendation::Primer.to_string(),
            "🎨 Primer recommended for best results"
        );
        assert_eq!(
            Recommendation::MultipleCoats { coats: 3 }.to_string(),
            "⏰ Plan for 3 coats - allow proper drying time"
        );
        assert_eq!(
            Recommendation::SurfacePreparation.to_string(),
            "🔧 Surface preparation required"
        );
        assert_eq!(
            Recommendation::TexturedRoller.to_string(),
            "🖌️ Use high-quality roller for textured surfaces"
        );
    }

    #[test]
    fn warning_serializes_with_kind_tag() {
        let json = serde_json::to_value(EstimateWarning::NegativeWallArea { wall_area: -2.5 }).unwrap();
        assert_eq!(json["kind"], "negative_wall_area");
        assert_eq!(json["wall_area"], -2.5);
    }
}
