//! Paint estimation engine.
//!
//! Turns a scanned `Room` and a chosen `Paint` into per-surface quantities,
//! a priced total and a list of advisories. Pure arithmetic over the
//! inputs; a calculator can be shared freely across threads.

use chrono::Utc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::config::EstimatorConfig;
use crate::domain::{
    ConfidenceLevel, HideRating, Paint, PaintEstimate, PaintQuantity, PaintType, Recommendation,
    Room, Surface, SurfaceCondition, SurfaceEstimate, SurfaceMaterial, TotalEstimate,
};
use crate::error::{EstimateError, EstimateResult};

/// Coats are never fewer than one or more than four.
pub const MIN_COATS: u32 = 1;
pub const MAX_COATS: u32 = 4;

/// Coats above which drying time becomes worth calling out.
const STANDARD_COATS: u32 = 2;

#[derive(Debug, Clone, Default)]
pub struct PaintCalculator {
    config: EstimatorConfig,
}

impl PaintCalculator {
    pub fn new(config: EstimatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Estimate with the waste factor applied.
    pub fn estimate(&self, room: &Room, target_paint: &Paint) -> EstimateResult<PaintEstimate> {
        self.calculate_paint_estimate(room, target_paint, true)
    }

    #[instrument(
        skip(self, room, target_paint),
        fields(room_id = %room.id, paint_id = %target_paint.id)
    )]
    pub fn calculate_paint_estimate(
        &self,
        room: &Room,
        target_paint: &Paint,
        include_waste_factor: bool,
    ) -> EstimateResult<PaintEstimate> {
        if room.surfaces.is_empty() {
            warn!("Room has no surfaces to estimate");
            return Err(EstimateError::NoSurfaces {
                room_id: Some(room.id.clone()),
            });
        }

        let warnings = room.validate();

        let surface_estimates = room
            .surfaces
            .iter()
            .map(|surface| self.calculate_surface_estimate(surface, target_paint))
            .collect::<EstimateResult<Vec<_>>>()?;

        let total_estimate = self.calculate_total_estimate(&surface_estimates, include_waste_factor)?;
        let recommendations = self
            .generate_recommendations(&surface_estimates)
            .iter()
            .map(ToString::to_string)
            .collect();

        info!(
            surfaces = surface_estimates.len(),
            total_paint_gallons = total_estimate.total_paint_gallons,
            total_primer_gallons = total_estimate.total_primer_gallons,
            total_cost = total_estimate.total_cost,
            "Paint estimate calculated"
        );

        Ok(PaintEstimate {
            id: Uuid::new_v4(),
            room: room.clone(),
            selected_paint: target_paint.clone(),
            surface_estimates,
            total_estimate,
            recommendations,
            warnings,
            created_at: Utc::now(),
        })
    }

    pub fn calculate_surface_estimate(
        &self,
        surface: &Surface,
        paint: &Paint,
    ) -> EstimateResult<SurfaceEstimate> {
        let coats_needed = determine_coats_needed(surface, paint);
        let primer_needed = determine_primer_requirement(surface, paint);
        let paint_quantity = self.calculate_paint_quantity(surface, paint, coats_needed)?;

        debug!(
            surface_id = %surface.id,
            coats_needed,
            primer_needed,
            gallons = paint_quantity.gallons,
            "Surface estimated"
        );

        Ok(SurfaceEstimate {
            surface: surface.clone(),
            paint: paint.clone(),
            coats_needed,
            primer_needed,
            paint_quantity,
        })
    }

    pub fn calculate_paint_quantity(
        &self,
        surface: &Surface,
        paint: &Paint,
        coats: u32,
    ) -> EstimateResult<PaintQuantity> {
        if paint.coverage.sq_ft_per_gallon == 0 {
            return Err(EstimateError::InvalidCoverage {
                paint_id: paint.id.clone(),
            });
        }

        let adjusted_coverage =
            f64::from(paint.coverage.sq_ft_per_gallon) * surface.texture.coverage_multiplier();
        let area_sq_ft = surface.area() * self.config.sq_ft_per_sq_m;
        let total_area_sq_ft = area_sq_ft * f64::from(coats);

        Ok(PaintQuantity::from_gallons(total_area_sq_ft / adjusted_coverage))
    }

    pub fn calculate_total_estimate(
        &self,
        surface_estimates: &[SurfaceEstimate],
        include_waste_factor: bool,
    ) -> EstimateResult<TotalEstimate> {
        // Every estimate in one request shares the target paint, so the
        // first one prices the whole room. Wrong if surfaces ever get
        // their own paints.
        let price_per_gallon = surface_estimates
            .first()
            .map(|estimate| estimate.paint.price_per_gallon)
            .ok_or(EstimateError::NoSurfaces { room_id: None })?;

        let base_paint_gallons: f64 = surface_estimates
            .iter()
            .map(|estimate| estimate.paint_quantity.gallons)
            .sum();
        let primed_surfaces = surface_estimates.iter().filter(|e| e.primer_needed).count();
        let base_primer_gallons = primed_surfaces as f64 * self.config.primer_gallons_per_surface;

        let waste_factor = if include_waste_factor {
            self.config.waste_factor
        } else {
            0.0
        };

        let total_paint_gallons = base_paint_gallons * (1.0 + waste_factor);
        let total_primer_gallons = base_primer_gallons * (1.0 + waste_factor);

        let paint_cost = total_paint_gallons * price_per_gallon;
        let primer_cost = total_primer_gallons * (price_per_gallon * self.config.primer_cost_ratio);

        Ok(TotalEstimate {
            total_paint_gallons,
            total_primer_gallons,
            total_cost: paint_cost + primer_cost,
            confidence_level: ConfidenceLevel::High,
        })
    }

    /// Advisories in display order. Each check is independent.
    pub fn generate_recommendations(&self, surface_estimates: &[SurfaceEstimate]) -> Vec<Recommendation> {
        let mut recommendations = Vec::new();

        if surface_estimates.iter().any(|e| e.primer_needed) {
            recommendations.push(Recommendation::Primer);
        }

        if let Some(max_coats) = surface_estimates.iter().map(|e| e.coats_needed).max() {
            if max_coats > STANDARD_COATS {
                recommendations.push(Recommendation::MultipleCoats { coats: max_coats });
            }
        }

        if surface_estimates
            .iter()
            .any(|e| e.surface.condition == SurfaceCondition::Poor)
        {
            recommendations.push(Recommendation::SurfacePreparation);
        }

        if surface_estimates.iter().any(|e| e.surface.texture.is_heavy()) {
            recommendations.push(Recommendation::TexturedRoller);
        }

        recommendations
    }
}

/// Base coats adjusted for surface condition, then for the paint's hide
/// rating, clamped to `MIN_COATS..=MAX_COATS`.
pub fn determine_coats_needed(surface: &Surface, paint: &Paint) -> u32 {
    let mut coats = paint.coverage.base_coats_needed;

    match surface.condition {
        SurfaceCondition::Poor => coats = coats.saturating_add(1),
        SurfaceCondition::Fair | SurfaceCondition::Good => {}
        SurfaceCondition::Excellent => coats = coats.saturating_sub(1).max(MIN_COATS),
    }

    match paint.coverage.hide_rating {
        HideRating::Excellent => coats = coats.saturating_sub(1).max(MIN_COATS),
        HideRating::Good => {}
        HideRating::Fair => coats = coats.saturating_add(1),
    }

    coats.clamp(MIN_COATS, MAX_COATS)
}

pub fn determine_primer_requirement(surface: &Surface, paint: &Paint) -> bool {
    matches!(
        surface.condition,
        SurfaceCondition::Poor | SurfaceCondition::Fair
    ) || surface.material == SurfaceMaterial::Metal
        || (surface.material == SurfaceMaterial::Wood && paint.paint_type == PaintType::Latex)
}
