use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::color::ColorInfo;
use super::estimate::EstimateWarning;

/// Room envelope in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomDimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

impl RoomDimensions {
    pub fn new(length: f64, width: f64, height: f64) -> Self {
        Self {
            length,
            width,
            height,
        }
    }
}

/// Width × height of a flat element, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceDimensions {
    pub width: f64,
    pub height: f64,
}

impl SurfaceDimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SurfaceType {
    Wall,
    Ceiling,
    Trim,
}

wire_enum!(SurfaceType, "surface type", {
    Wall => "WALL",
    Ceiling => "CEILING",
    Trim => "TRIM",
});

/// Surface texture; rougher textures soak up more paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SurfaceTexture {
    Smooth,
    LightTexture,
    MediumTexture,
    HeavyTexture,
    Brick,
    Stucco,
}

wire_enum!(SurfaceTexture, "surface texture", {
    Smooth => "SMOOTH",
    LightTexture => "LIGHT_TEXTURE",
    MediumTexture => "MEDIUM_TEXTURE",
    HeavyTexture => "HEAVY_TEXTURE",
    Brick => "BRICK",
    Stucco => "STUCCO",
});

impl SurfaceTexture {
    /// Fraction of a paint's rated coverage achievable on this texture.
    pub fn coverage_multiplier(&self) -> f64 {
        match self {
            Self::Smooth => 1.0,
            Self::LightTexture => 0.85,
            Self::MediumTexture => 0.7,
            Self::HeavyTexture => 0.6,
            Self::Brick => 0.5,
            Self::Stucco => 0.4,
        }
    }

    /// Textures that call for a high-nap roller.
    pub fn is_heavy(&self) -> bool {
        matches!(self, Self::HeavyTexture | Self::Brick | Self::Stucco)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SurfaceCondition {
    Excellent,
    Good,
    Fair,
    Poor,
}

wire_enum!(SurfaceCondition, "surface condition", {
    Excellent => "EXCELLENT",
    Good => "GOOD",
    Fair => "FAIR",
    Poor => "POOR",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SurfaceMaterial {
    #[default]
    Drywall,
    Wood,
    Metal,
    Concrete,
    Brick,
    Plaster,
}

wire_enum!(SurfaceMaterial, "surface material", {
    Drywall => "DRYWALL",
    Wood => "WOOD",
    Metal => "METAL",
    Concrete => "CONCRETE",
    Brick => "BRICK",
    Plaster => "PLASTER",
});

/// A paintable surface detected in (or entered for) a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub id: String,
    #[serde(rename = "type")]
    pub surface_type: SurfaceType,
    pub dimensions: SurfaceDimensions,
    pub texture: SurfaceTexture,
    #[serde(default)]
    pub current_color: Option<ColorInfo>,
    pub condition: SurfaceCondition,
    #[serde(default)]
    pub material: SurfaceMaterial,
}

impl Surface {
    /// Area in square meters.
    pub fn area(&self) -> f64 {
        self.dimensions.area()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OpeningType {
    Door,
    Window,
    Archway,
}

wire_enum!(OpeningType, "opening type", {
    Door => "DOOR",
    Window => "WINDOW",
    Archway => "ARCHWAY",
});

/// Door, window or archway cut out of the wall area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opening {
    pub id: String,
    #[serde(rename = "type")]
    pub opening_type: OpeningType,
    pub dimensions: SurfaceDimensions,
    #[serde(default)]
    pub frame_width: f64,
}

impl Opening {
    pub fn area(&self) -> f64 {
        self.dimensions.area()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub name: String,
    pub dimensions: RoomDimensions,
    pub surfaces: Vec<Surface>,
    #[serde(default)]
    pub openings: Vec<Opening>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Room {
    /// Wall area minus openings, in square meters.
    ///
    /// Not clamped: openings larger than the walls give a negative value,
    /// which `validate` reports.
    pub fn total_wall_area(&self) -> f64 {
        let walls: f64 = self
            .surfaces
            .iter()
            .filter(|s| s.surface_type == SurfaceType::Wall)
            .map(Surface::area)
            .sum();
        let openings: f64 = self.openings.iter().map(Opening::area).sum();
        walls - openings
    }

    pub fn ceiling_area(&self) -> f64 {
        self.dimensions.length * self.dimensions.width
    }

    /// Non-fatal problems with the room as scanned.
    pub fn validate(&self) -> Vec<EstimateWarning> {
        let mut warnings = Vec::new();

        let wall_area = self.total_wall_area();
        if wall_area < 0.0 {
            warn!(
                room_id = %self.id,
                wall_area,
                "Openings exceed wall area"
            );
            warnings.push(EstimateWarning::NegativeWallArea { wall_area });
        }

        warnings
    }
}
