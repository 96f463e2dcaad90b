//! # User Preferences
//!
//! Named defaults the application remembers between sessions. The core only
//! ever reads a snapshot; the application owns the value and persists it
//! through [`crate::file_io`].
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "default_tread_depth": 9.25,
//!   "default_floor_finish_thickness_upper": 1.5,
//!   "default_floor_finish_thickness_lower": 1.0,
//!   "default_tread_thickness": 1.0625,
//!   "fraction_display_denominator": 16,
//!   "display_unit": "inches"
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{StairError, StairResult};
use crate::measurement::{MeasurementFormat, ALLOWED_DENOMINATORS};
use crate::units::DisplayUnit;

/// Preference keys accepted by [`UserPreferences::set`]
pub const PREFERENCE_KEYS: [&str; 6] = [
    "default_tread_depth",
    "default_floor_finish_thickness_upper",
    "default_floor_finish_thickness_lower",
    "default_tread_thickness",
    "fraction_display_denominator",
    "display_unit",
];

/// Persisted user defaults.
///
/// Lengths are in inches. Keys missing from a saved file take their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPreferences {
    /// Tread depth used when the user leaves the field empty (in)
    pub default_tread_depth: f64,

    /// Finished floor thickness on the upper level (in)
    pub default_floor_finish_thickness_upper: f64,

    /// Finished floor thickness on the lower level (in)
    pub default_floor_finish_thickness_lower: f64,

    /// Thickness of the tread boards, used for the bottom riser cut (in)
    pub default_tread_thickness: f64,

    /// Largest denominator shown in fractions (2, 4, 8, 16, 32 or 64)
    pub fraction_display_denominator: u32,

    /// Unit for input and display
    pub display_unit: DisplayUnit,
}

impl Default for UserPreferences {
    fn default() -> Self {
        UserPreferences {
            default_tread_depth: 9.25,
            default_floor_finish_thickness_upper: 1.5,
            default_floor_finish_thickness_lower: 1.0,
            default_tread_thickness: 1.0625,
            fraction_display_denominator: 16,
            display_unit: DisplayUnit::Inches,
        }
    }
}

impl UserPreferences {
    /// Display settings derived from these preferences
    pub fn measurement_format(&self) -> MeasurementFormat {
        MeasurementFormat {
            unit: self.display_unit,
            denominator_limit: self.fraction_display_denominator,
        }
    }

    /// Set a preference from its key and textual value.
    ///
    /// Lengths use the measurement grammar and are given in inches.
    pub fn set(&mut self, key: &str, value: &str) -> StairResult<()> {
        match key {
            "default_tread_depth" => self.default_tread_depth = parse_length(key, value)?,
            "default_floor_finish_thickness_upper" => {
                self.default_floor_finish_thickness_upper = parse_length(key, value)?
            }
            "default_floor_finish_thickness_lower" => {
                self.default_floor_finish_thickness_lower = parse_length(key, value)?
            }
            "default_tread_thickness" => self.default_tread_thickness = parse_length(key, value)?,
            "fraction_display_denominator" => {
                let den: u32 = value
                    .trim()
                    .parse()
                    .map_err(|_| StairError::parse(key, value, "Expected a whole number"))?;
                if !ALLOWED_DENOMINATORS.contains(&den) {
                    return Err(StairError::invalid_input(
                        key,
                        value,
                        format!("Denominator must be one of {:?}", ALLOWED_DENOMINATORS),
                    ));
                }
                self.fraction_display_denominator = den;
            }
            "display_unit" => {
                self.display_unit = value
                    .parse()
                    .map_err(|reason: String| StairError::invalid_input(key, value, reason))?;
            }
            _ => {
                return Err(StairError::invalid_input(
                    key,
                    value,
                    format!("Unknown preference; expected one of {}", PREFERENCE_KEYS.join(", ")),
                ))
            }
        }
        Ok(())
    }
}

fn parse_length(key: &str, value: &str) -> StairResult<f64> {
    let inches = crate::measurement::Measurement::parse(key, value)?.inches();
    if inches < 0.0 {
        return Err(StairError::invalid_input(key, value, "Length cannot be negative"));
    }
    Ok(inches)
}
