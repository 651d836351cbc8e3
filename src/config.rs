use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Staging,
    Prod,
}

impl Environment {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "prod" | "production" => Self::Prod,
            "staging" => Self::Staging,
            _ => Self::Dev,
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }

    pub fn is_prod(&self) -> bool {
        matches!(self, Self::Prod)
    }
}

/// Tunable constants of the paint calculator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatorConfig {
    /// Overage added to paint and primer when waste is included
    pub waste_factor: f64,
    /// Primer price as a fraction of the paint's price per gallon
    pub primer_cost_ratio: f64,
    /// Flat primer allowance for every surface that needs it
    pub primer_gallons_per_surface: f64,
    pub sq_ft_per_sq_m: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            waste_factor: 0.15,
            primer_cost_ratio: 0.8,
            primer_gallons_per_surface: 0.5,
            sq_ft_per_sq_m: 10.764,
        }
    }
}

impl EstimatorConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Absent keys keep their defaults,
    /// present but malformed keys are an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            waste_factor: parse_or(&lookup, "VERTEX_WASTE_FACTOR", defaults.waste_factor)?,
            primer_cost_ratio: parse_or(
                &lookup,
                "VERTEX_PRIMER_COST_RATIO",
                defaults.primer_cost_ratio,
            )?,
            primer_gallons_per_surface: parse_or(
                &lookup,
                "VERTEX_PRIMER_GALLONS_PER_SURFACE",
                defaults.primer_gallons_per_surface,
            )?,
            sq_ft_per_sq_m: defaults.sq_ft_per_sq_m,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub env: Environment,
    pub estimator: EstimatorConfig,

    // AR scanning
    pub scan_interval: Duration,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Environment::from_str(&lookup("ENV").unwrap_or_else(|| "dev".to_string()));
        let estimator = EstimatorConfig::from_lookup(&lookup)?;

        let scan_interval_ms: u64 = parse_or(&lookup, "VERTEX_SCAN_INTERVAL_MS", 100)?; // ~10 updates per second

        Ok(Settings {
            env,
            estimator,
            scan_interval: Duration::from_millis(scan_interval_ms),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a number, got {:?}", key, raw)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings.env, Environment::Dev);
        assert_eq!(settings.estimator, EstimatorConfig::default());
        assert_eq!(settings.scan_interval, Duration::from_millis(100));
    }

    #[test]
    fn overrides_from_environment() {
        let settings = Settings::from_lookup(lookup(&[
            ("ENV", "Production"),
            ("VERTEX_WASTE_FACTOR", "0.1"),
            ("VERTEX_PRIMER_COST_RATIO", " 0.75 "),
            ("VERTEX_SCAN_INTERVAL_MS", "250"),
        ]))
        .unwrap();
        assert!(settings.env.is_prod());
        assert_eq!(settings.estimator.waste_factor, 0.1);
        assert_eq!(settings.estimator.primer_cost_ratio, 0.75);
        assert_eq!(settings.estimator.primer_gallons_per_surface, 0.5);
        assert_eq!(settings.scan_interval, Duration::from_millis(250));
    }

    #[test]
    fn malformed_value_is_an_error() {
        let err = EstimatorConfig::from_lookup(lookup(&[("VERTEX_WASTE_FACTOR", "lots")])).unwrap_err();
        assert!(err.to_string().contains("VERTEX_WASTE_FACTOR"));
    }
}
