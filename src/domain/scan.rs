//! AR scan snapshot types.
//!
//! Produced by platform session adapters, consumed by the scanner and by
//! room generation.

use serde::{Deserialize, Serialize};

use super::room::RoomDimensions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlaneType {
    /// Floors and table tops
    HorizontalUp,
    /// Ceilings
    HorizontalDown,
    /// Walls
    Vertical,
}

wire_enum!(PlaneType, "plane type", {
    HorizontalUp => "HORIZONTAL_UP",
    HorizontalDown => "HORIZONTAL_DOWN",
    Vertical => "VERTICAL",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlaneOrientation {
    Horizontal,
    Vertical,
    Angled,
}

impl From<PlaneType> for PlaneOrientation {
    fn from(plane_type: PlaneType) -> Self {
        match plane_type {
            PlaneType::HorizontalUp | PlaneType::HorizontalDown => Self::Horizontal,
            PlaneType::Vertical => Self::Vertical,
        }
    }
}

/// Tracked plane extent, in meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArPlane {
    pub id: String,
    #[serde(rename = "type")]
    pub plane_type: PlaneType,
    pub width: f32,
    pub height: f32,
    pub area: f32,
}

impl ArPlane {
    pub fn new(id: impl Into<String>, plane_type: PlaneType, width: f32, height: f32) -> Self {
        Self {
            id: id.into(),
            plane_type,
            width,
            height,
            area: width * height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position3D {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedPlane {
    pub id: String,
    #[serde(rename = "type")]
    pub plane_type: PlaneType,
    /// Square meters
    pub area: f32,
    pub center: Position3D,
    pub orientation: PlaneOrientation,
}

impl From<&ArPlane> for DetectedPlane {
    fn from(plane: &ArPlane) -> Self {
        Self {
            id: plane.id.clone(),
            plane_type: plane.plane_type,
            area: plane.area,
            center: Position3D::default(),
            orientation: plane.plane_type.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightingCondition {
    pub ambient_intensity: f32,
    /// Kelvin
    pub color_temperature: f32,
    pub is_adequate_for_color_matching: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LightingQuality {
    Unknown,
    Poor,
    Fair,
    Good,
}

impl LightingQuality {
    pub fn from_ambient_intensity(intensity: Option<f32>) -> Self {
        match intensity {
            None => Self::Unknown,
            Some(i) if i <= 500.0 => Self::Poor,
            Some(i) if i <= 1000.0 => Self::Fair,
            Some(_) => Self::Good,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrackingState {
    #[default]
    NotAvailable,
    Limited,
    Normal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScanWarningType {
    InsufficientLight,
    ExcessiveMotion,
    InsufficientFeatures,
    TrackingLost,
    IncompleteCoverage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanWarning {
    #[serde(rename = "type")]
    pub warning_type: ScanWarningType,
    pub message: String,
}

/// One snapshot of an in-progress scan.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanResult {
    /// 0.0 to 1.0
    pub scan_progress: f32,
    pub detected_planes: Vec<DetectedPlane>,
    /// Floor area, square meters
    pub room_area: f32,
    pub lighting_condition: Option<LightingCondition>,
    pub tracking_state: TrackingState,
    /// 0.0 to 1.0
    pub scan_quality: f32,
    pub warnings: Vec<ScanWarning>,
}

/// Accumulated planes of a finished scan, ready to become a `Room`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArScanData {
    pub planes: Vec<ArPlane>,
    pub room_dimensions: RoomDimensions,
    pub confidence: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lighting_quality_bands() {
        assert_eq!(LightingQuality::from_ambient_intensity(None), LightingQuality::Unknown);
        assert_eq!(LightingQuality::from_ambient_intensity(Some(0.0)), LightingQuality::Poor);
        assert_eq!(LightingQuality::from_ambient_intensity(Some(500.0)), LightingQuality::Poor);
        assert_eq!(LightingQuality::from_ambient_intensity(Some(750.0)), LightingQuality::Fair);
        assert_eq!(LightingQuality::from_ambient_intensity(Some(1500.0)), LightingQuality::Good);
    }

    #[test]
    fn detected_plane_from_ar_plane() {
        let wall = ArPlane::new("w1", PlaneType::Vertical, 4.0, 2.5);
        let detected = DetectedPlane::from(&wall);
        assert_eq!(detected.area, 10.0);
        assert_eq!(detected.orientation, PlaneOrientation::Vertical);
    }
}
