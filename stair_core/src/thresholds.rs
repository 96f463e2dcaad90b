//! # Regulatory Thresholds
//!
//! The limits every stair is checked against. The defaults follow the
//! Québec residential construction code and the APCHQ guide, expressed in
//! inches and degrees.
//!
//! ## Threshold Summary
//!
//! | Key                            | Default | Meaning                               |
//! |--------------------------------|---------|---------------------------------------|
//! | `riser_height_min`             | 5       | Lowest legal riser                    |
//! | `riser_height_max`             | 8 1/4   | Highest legal riser                   |
//! | `riser_height_comfort_target`  | 7 1/2   | Riser height most people walk best on |
//! | `tread_depth_min`              | 8 1/4   | Shallowest legal tread                |
//! | `tread_depth_max`              | 14      | Deepest practical tread               |
//! | `tread_depth_comfort_min`      | 9       | Shallowest comfortable tread          |
//! | `combined_formula_min`         | 21      | Lower bound of 2 × riser + tread      |
//! | `combined_formula_max`         | 25      | Upper bound of 2 × riser + tread      |
//! | `headroom_min`                 | 78.74   | Clearance above a nose (2000 mm)      |
//! | `slope_comfort_max`            | 35°     | Steeper than this is uncomfortable    |
//! | `slope_too_steep_max`          | 42°     | Steeper than this fails               |
//!
//! A table is loaded once at start-up (from [`RegulatoryThresholds::default`]
//! or a TOML override file) and passed by reference to every calculation.
//!
//! ## Example
//!
//! ```rust
//! use stair_core::thresholds::RegulatoryThresholds;
//!
//! let overrides = r#"
//!     headroom_min = 80.0
//!     slope_comfort_max = 37.0
//! "#;
//! let thresholds = RegulatoryThresholds::from_toml_str(overrides).unwrap();
//! assert_eq!(thresholds.headroom_min, 80.0);
//! assert_eq!(thresholds.riser_height_max, 8.25);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{StairError, StairResult};

/// Code section references for the rule checks.
pub mod code_ref {
    /// Riser height limits
    pub const RISER_HEIGHT: &str = "CCQ 9.8.4.1";
    /// Tread depth (run) limits
    pub const TREAD_DEPTH: &str = "CCQ 9.8.4.2";
    /// Headroom over stairs
    pub const HEADROOM: &str = "CCQ 9.8.2.2";
    /// Combined-step (Blondel) comfort rule
    pub const COMBINED_STEP: &str = "Blondel 2H + G";
}

/// How far a riser may stray from the comfort target before it is flagged (in)
pub const RISER_COMFORT_TOLERANCE_IN: f64 = 0.5;

/// Largest rise residual treated as exact (in)
pub const RISE_RESIDUAL_TOLERANCE_IN: f64 = 1.0 / 64.0;

/// Immutable table of regulatory and comfort limits.
///
/// Every key is optional in a TOML override; missing keys keep the default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegulatoryThresholds {
    /// Minimum riser height (in)
    pub riser_height_min: f64,
    /// Maximum riser height (in)
    pub riser_height_max: f64,
    /// Comfortable riser height, also used to size a stair from scratch (in)
    pub riser_height_comfort_target: f64,
    /// Minimum tread depth (in)
    pub tread_depth_min: f64,
    /// Maximum tread depth (in)
    pub tread_depth_max: f64,
    /// Minimum comfortable tread depth (in)
    pub tread_depth_comfort_min: f64,
    /// Lower bound of 2 × riser + tread (in)
    pub combined_formula_min: f64,
    /// Upper bound of 2 × riser + tread (in)
    pub combined_formula_max: f64,
    /// Minimum vertical clearance above a nose (in)
    pub headroom_min: f64,
    /// Slope above which the stair is uncomfortable (degrees)
    pub slope_comfort_max: f64,
    /// Slope above which the stair fails (degrees)
    pub slope_too_steep_max: f64,
}

impl Default for RegulatoryThresholds {
    fn default() -> Self {
        RegulatoryThresholds {
            riser_height_min: 5.0,
            riser_height_max: 8.25,
            riser_height_comfort_target: 7.5,
            tread_depth_min: 8.25,
            tread_depth_max: 14.0,
            tread_depth_comfort_min: 9.0,
            combined_formula_min: 21.0,
            combined_formula_max: 25.0,
            headroom_min: 78.74,
            slope_comfort_max: 35.0,
            slope_too_steep_max: 42.0,
        }
    }
}

impl RegulatoryThresholds {
    /// Parse a TOML override table and validate the result.
    pub fn from_toml_str(text: &str) -> StairResult<Self> {
        let thresholds: RegulatoryThresholds = toml::from_str(text)
            .map_err(|e| StairError::serialization(format!("Invalid thresholds TOML: {}", e)))?;
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Load a TOML override file.
    pub fn load(path: &Path) -> StairResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| StairError::file_error("read thresholds", path.display().to_string(), e.to_string()))?;
        let thresholds = Self::from_toml_str(&text)?;
        tracing::info!("Loaded regulatory thresholds from {}", path.display());
        Ok(thresholds)
    }

    /// Midpoint of the combined-step band, used to derive a missing tread depth
    pub fn combined_formula_target(&self) -> f64 {
        (self.combined_formula_min + self.combined_formula_max) / 2.0
    }

    /// Check that every bound is positive and every band is ordered.
    pub fn validate(&self) -> StairResult<()> {
        let values = [
            ("riser_height_min", self.riser_height_min),
            ("riser_height_max", self.riser_height_max),
            ("riser_height_comfort_target", self.riser_height_comfort_target),
            ("tread_depth_min", self.tread_depth_min),
            ("tread_depth_max", self.tread_depth_max),
            ("tread_depth_comfort_min", self.tread_depth_comfort_min),
            ("combined_formula_min", self.combined_formula_min),
            ("combined_formula_max", self.combined_formula_max),
            ("headroom_min", self.headroom_min),
            ("slope_comfort_max", self.slope_comfort_max),
            ("slope_too_steep_max", self.slope_too_steep_max),
        ];
        for (field, value) in values {
            if !value.is_finite() || value <= 0.0 {
                return Err(StairError::invalid_thresholds(field, format!("must be positive, got {}", value)));
            }
        }

        let bands = [
            ("riser_height_max", self.riser_height_min, self.riser_height_max),
            ("tread_depth_max", self.tread_depth_min, self.tread_depth_max),
            ("combined_formula_max", self.combined_formula_min, self.combined_formula_max),
            ("slope_too_steep_max", self.slope_comfort_max, self.slope_too_steep_max),
        ];
        for (field, low, high) in bands {
            if low >= high {
                return Err(StairError::invalid_thresholds(
                    field,
                    format!("upper bound {} must exceed lower bound {}", high, low),
                ));
            }
        }

        if self.slope_too_steep_max > 90.0 {
            return Err(StairError::invalid_thresholds("slope_too_steep_max", "must not exceed 90 degrees"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let t = RegulatoryThresholds::default();
        assert!(t.validate().is_ok());
        assert_eq!(t.combined_formula_target(), 23.0);
    }

    #[test]
    fn test_toml_partial_override() {
        let t = RegulatoryThresholds::from_toml_str("tread_depth_min = 9.0\n").unwrap();
        assert_eq!(t.tread_depth_min, 9.0);
        assert_eq!(t.tread_depth_max, 14.0);
    }

    #[test]
    fn test_bundled_config_matches_defaults() {
        let text = include_str!("../config/thresholds.toml");
        let t = RegulatoryThresholds::from_toml_str(text).unwrap();
        assert_eq!(t, RegulatoryThresholds::default());
    }

    #[test]
    fn test_inverted_band_rejected() {
        let err = RegulatoryThresholds::from_toml_str("riser_height_min = 9.0\n").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_THRESHOLDS");
        assert_eq!(err.field(), Some("riser_height_max"));
    }

    #[test]
    fn test_non_positive_rejected() {
        let err = RegulatoryThresholds::from_toml_str("headroom_min = 0.0\n").unwrap_err();
        assert_eq!(err.field(), Some("headroom_min"));
    }

    #[test]
    fn test_bad_toml_is_serialization_error() {
        let err = RegulatoryThresholds::from_toml_str("headroom_min = \"tall\"").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }
}
