//! Typed errors for the estimation core.
//!
//! Every failure here is an input or programming error; nothing is retried.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EstimateError {
    #[error("No surfaces to estimate{}", room_suffix(.room_id))]
    NoSurfaces { room_id: Option<String> },

    #[error("Invalid {kind} value: {value:?}")]
    InvalidEnumValue { kind: &'static str, value: String },

    #[error("Invalid hex color: {0:?}")]
    InvalidHexColor(String),

    #[error("Paint {paint_id} declares zero coverage per gallon")]
    InvalidCoverage { paint_id: String },

    #[error("AR session error: {0}")]
    Session(String),

    #[error("AR session is closed")]
    SessionClosed,
}

impl EstimateError {
    /// Stable machine-readable code, mirrors the variant.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NoSurfaces { .. } => "NO_SURFACES",
            Self::InvalidEnumValue { .. } => "INVALID_ENUM_VALUE",
            Self::InvalidHexColor(_) => "INVALID_HEX_COLOR",
            Self::InvalidCoverage { .. } => "INVALID_COVERAGE",
            Self::Session(_) => "SESSION_ERROR",
            Self::SessionClosed => "SESSION_CLOSED",
        }
    }

    pub(crate) fn invalid_enum(kind: &'static str, value: &str) -> Self {
        Self::InvalidEnumValue {
            kind,
            value: value.to_string(),
        }
    }
}

fn room_suffix(room_id: &Option<String>) -> String {
    match room_id {
        Some(id) => format!(" in room {}", id),
        None => String::new(),
    }
}

pub type EstimateResult<T> = Result<T, EstimateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_surfaces_names_room_when_known() {
        let err = EstimateError::NoSurfaces {
            room_id: Some("kitchen".into()),
        };
        assert_eq!(err.to_string(), "No surfaces to estimate in room kitchen");
        let err = EstimateError::NoSurfaces { room_id: None };
        assert_eq!(err.to_string(), "No surfaces to estimate");
        assert_eq!(err.error_code(), "NO_SURFACES");
    }

    #[test]
    fn invalid_enum_carries_kind_and_value() {
        let err = EstimateError::invalid_enum("surface texture", "POPCORN");
        assert_eq!(err.to_string(), "Invalid surface texture value: \"POPCORN\"");
        assert_eq!(err.error_code(), "INVALID_ENUM_VALUE");
    }
}
