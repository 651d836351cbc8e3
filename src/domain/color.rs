use serde::{Deserialize, Serialize};

use crate::error::{EstimateError, EstimateResult};

/// 8-bit sRGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RgbColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl RgbColor {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Parse `#RRGGBB` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> EstimateResult<Self> {
        let clean = hex.strip_prefix('#').unwrap_or(hex);
        if clean.len() != 6 || !clean.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(EstimateError::InvalidHexColor(hex.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&clean[range], 16)
                .map_err(|_| EstimateError::InvalidHexColor(hex.to_string()))
        };

        Ok(Self {
            red: channel(0..2)?,
            green: channel(2..4)?,
            blue: channel(4..6)?,
        })
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

/// A color as presented to the user: channels, hex form and optional name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorInfo {
    pub rgb: RgbColor,
    pub hex: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl ColorInfo {
    pub fn from_hex(hex: &str) -> EstimateResult<Self> {
        let rgb = RgbColor::from_hex(hex)?;
        Ok(Self {
            rgb,
            hex: hex.to_string(),
            name: None,
        })
    }

    pub fn from_rgb(rgb: RgbColor) -> Self {
        Self {
            hex: rgb.to_hex(),
            rgb,
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
