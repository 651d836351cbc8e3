//! Estimation services.
//!
//! Contains the paint calculator and the color coverage analyzer.

pub mod calculator;
pub mod color_analyzer;

pub use calculator::PaintCalculator;
pub use color_analyzer::{ColorAnalyzer, CoverageAnalysis, CoverageDifficulty};
