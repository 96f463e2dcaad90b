//! # Unit Types
//!
//! Type-safe wrappers for the lengths a stair builder works with. These
//! provide compile-time safety against unit confusion while remaining
//! lightweight (just f64 wrappers).
//!
//! ## Internal Unit
//!
//! Every computation runs in inches. Centimetre input is converted on the
//! way in, and display code converts back on the way out:
//! - Length: inches (in), centimetres (cm), millimetres (mm)
//! - Angle: degrees
//!
//! ## Example
//!
//! ```rust
//! use stair_core::units::{Centimeters, Inches, Millimeters};
//!
//! let rise = Inches(108.0);
//! let rise_cm: Centimeters = rise.into();
//! assert!((rise_cm.0 - 274.32).abs() < 1e-9);
//!
//! let tread: Millimeters = Inches(10.0).into();
//! assert_eq!(tread.0, 254.0);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Centimetres per inch
pub const CM_PER_INCH: f64 = 2.54;

/// Millimetres per inch
pub const MM_PER_INCH: f64 = 25.4;

// ============================================================================
// Length Units
// ============================================================================

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

/// Length in centimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Centimeters(pub f64);

/// Length in millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

impl From<Centimeters> for Inches {
    fn from(cm: Centimeters) -> Self {
        Inches(cm.0 / CM_PER_INCH)
    }
}

impl From<Inches> for Centimeters {
    fn from(inches: Inches) -> Self {
        Centimeters(inches.0 * CM_PER_INCH)
    }
}

impl From<Inches> for Millimeters {
    fn from(inches: Inches) -> Self {
        Millimeters(inches.0 * MM_PER_INCH)
    }
}

// ============================================================================
// Angle Units
// ============================================================================

/// Angle in degrees
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f64);

impl Degrees {
    /// Angle of a right triangle's hypotenuse above the horizontal.
    ///
    /// A zero run with a positive rise is a vertical line (90°).
    pub fn from_rise_run(rise: f64, run: f64) -> Self {
        if run <= 0.0 {
            return if rise > 0.0 { Degrees(90.0) } else { Degrees(0.0) };
        }
        Degrees((rise / run).atan().to_degrees())
    }
}

// ============================================================================
// Display Unit
// ============================================================================

/// Unit used for raw text input and for display.
///
/// Calculations always run in inches regardless of this setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayUnit {
    /// Imperial inches, shown as fractions (e.g. `7 11/16"`)
    #[default]
    Inches,
    /// Metric centimetres, shown as decimals (e.g. `19.6 cm`)
    Centimeters,
}

impl DisplayUnit {
    /// Convert a value expressed in this unit to inches
    pub fn to_inches(self, value: f64) -> Inches {
        match self {
            DisplayUnit::Inches => Inches(value),
            DisplayUnit::Centimeters => Centimeters(value).into(),
        }
    }

    /// Convert inches to a value expressed in this unit
    pub fn from_inches(self, inches: Inches) -> f64 {
        match self {
            DisplayUnit::Inches => inches.0,
            DisplayUnit::Centimeters => Centimeters::from(inches).0,
        }
    }

    /// Short suffix for display
    pub fn suffix(self) -> &'static str {
        match self {
            DisplayUnit::Inches => "\"",
            DisplayUnit::Centimeters => " cm",
        }
    }
}

impl fmt::Display for DisplayUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayUnit::Inches => write!(f, "in"),
            DisplayUnit::Centimeters => write!(f, "cm"),
        }
    }
}

impl std::str::FromStr for DisplayUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "in" | "inch" | "inches" => Ok(DisplayUnit::Inches),
            "cm" | "centimeter" | "centimeters" | "centimetre" | "centimetres" => {
                Ok(DisplayUnit::Centimeters)
            }
            other => Err(format!("Unknown unit '{}': expected 'in' or 'cm'", other)),
        }
    }
}

// Raw Access
// ============================================================================

macro_rules! impl_value {
    ($($type:ty),+) => {
        $(
            impl $type {
                /// Get the raw f64 value
                pub fn value(self) -> f64 {
                    self.0
                }
            }
        )+
    };
}

impl_value!(Inches, Centimeters, Millimeters, Degrees);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cm_roundtrip() {
        let cm: Centimeters = Inches(10.0).into();
        assert!((cm.0 - 25.4).abs() < 1e-12);
        let back: Inches = cm.into();
        assert!((back.0 - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_mm_and_raw_values() {
        let tread: Millimeters = Inches(9.25).into();
        assert!((tread.value() - 234.95).abs() < 1e-9);
        assert_eq!(Degrees(42.0).value(), 42.0);
    }

    #[test]
    fn test_slope_from_rise_run() {
        assert!((Degrees::from_rise_run(1.0, 1.0).0 - 45.0).abs() < 1e-9);
        assert_eq!(Degrees::from_rise_run(108.0, 0.0).0, 90.0);
        assert_eq!(Degrees::from_rise_run(0.0, 0.0).0, 0.0);
    }

    #[test]
    fn test_display_unit_parse() {
        assert_eq!("cm".parse::<DisplayUnit>(), Ok(DisplayUnit::Centimeters));
        assert_eq!("Inches".parse::<DisplayUnit>(), Ok(DisplayUnit::Inches));
        assert!("furlong".parse::<DisplayUnit>().is_err());
        assert!((DisplayUnit::Centimeters.to_inches(2.54).0 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_serialization() {
        let length = Inches(9.25);
        let json = serde_json::to_string(&length).unwrap();
        assert_eq!(json, "9.25");

        let unit_json = serde_json::to_string(&DisplayUnit::Centimeters).unwrap();
        assert_eq!(unit_json, "\"centimeters\"");
    }
}
