//! Domain types for rooms, paints, estimates and AR scan snapshots.
//!
//! All values are plain immutable records handed in by the scanning/UI
//! layer and handed back as estimates; nothing here is persisted.

/// Wire-name handling for the small closed enums of the domain.
///
/// Generates `ALL`, `as_str`, `Display` and a `FromStr` that rejects
/// unknown names with `EstimateError::InvalidEnumValue`.
macro_rules! wire_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = crate::error::EstimateError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err(crate::error::EstimateError::invalid_enum($kind, other)),
                }
            }
        }
    };
}

pub mod color;
pub mod estimate;
pub mod paint;
pub mod room;
pub mod scan;

// Re-export commonly used types
pub use color::*;
pub use estimate::*;
pub use paint::*;
pub use room::*;

// Scan types are accessed via crate::domain::scan:: to keep the estimation
// surface uncluttered
