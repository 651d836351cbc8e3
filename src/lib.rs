//! Paint quantity and cost estimation for AR-scanned rooms.
//!
//! Feed a [`domain::Room`] and a [`domain::Paint`] to a
//! [`PaintCalculator`] to get a [`domain::PaintEstimate`]. The [`ar`]
//! module turns a platform AR session into the `Room` to estimate.

pub mod ar;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod services;

pub use error::{EstimateError, EstimateResult};
pub use services::{ColorAnalyzer, PaintCalculator};
