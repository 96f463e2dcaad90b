//! # Stair Calculation
//!
//! One-shot entry point: raw fields in, resolved stair, conformity report and
//! stringer layout out.
//!
//! ## Example
//!
//! ```rust
//! use stair_core::calculations::stair::{calculate, StairInput};
//! use stair_core::calculations::EditedField;
//! use stair_core::debug::DebugContext;
//! use stair_core::preferences::UserPreferences;
//! use stair_core::thresholds::RegulatoryThresholds;
//!
//! let input = StairInput {
//!     total_rise: "108".to_string(),
//!     desired_riser_height: "7 1/2".to_string(),
//!     edited: EditedField::DesiredRiserHeight,
//!     opening_depth: "120".to_string(),
//!     ..Default::default()
//! };
//!
//! let result = calculate(
//!     &input,
//!     &RegulatoryThresholds::default(),
//!     &UserPreferences::default(),
//!     DebugContext::default(),
//! ).unwrap();
//!
//! println!("{} risers at {}", result.spec.riser_count, result.format.format(result.spec.riser_height_in));
//! println!("Conform: {}", result.report.is_conform);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::conformity::{self, ConformityReport, SiteGeometry};
use crate::calculations::layout::StringerLayout;
use crate::calculations::resolver::{self, EditedField, ResolverInput, StaircaseSpec};
use crate::debug::DebugContext;
use crate::errors::StairResult;
use crate::measurement::{Measurement, MeasurementFormat};
use crate::preferences::UserPreferences;
use crate::thresholds::RegulatoryThresholds;
use crate::units::{DisplayUnit, Inches};

/// Every raw field of the stair form, as typed.
///
/// Empty strings mean "not supplied". Lengths are read in `unit`.
///
/// ## JSON Example
///
/// ```json
/// {
///   "total_rise": "108",
///   "desired_riser_height": "7 1/2",
///   "desired_tread_depth": "9 1/4",
///   "manual_tread_count": "",
///   "manual_riser_count": "",
///   "edited": "desired_riser_height",
///   "floor_thickness_upper": "1 1/2",
///   "floor_thickness_lower": "1",
///   "opening_depth": "120",
///   "opening_offset": "0",
///   "available_run": "",
///   "unit": "inches"
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StairInput {
    /// Floor-to-floor rise
    pub total_rise: String,
    /// Riser height the user would like
    pub desired_riser_height: String,
    /// Tread depth the user would like (preference default when empty)
    pub desired_tread_depth: String,
    /// Manual tread count override
    pub manual_tread_count: String,
    /// Manual riser count override
    pub manual_riser_count: String,
    /// Field the user edited last
    pub edited: EditedField,
    /// Upper floor finish thickness (preference default when empty)
    pub floor_thickness_upper: String,
    /// Lower floor finish thickness (preference default when empty)
    pub floor_thickness_lower: String,
    /// Stairwell opening length
    pub opening_depth: String,
    /// Stairwell opening start, measured from the first nose
    pub opening_offset: String,
    /// Floor length available for the stair
    pub available_run: String,
    /// Unit the lengths are typed in
    pub unit: DisplayUnit,
}

/// Everything produced for one stair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StairCalculation {
    /// Resolved dimensions
    pub spec: StaircaseSpec,
    /// Site measurements the checks were run against (in)
    pub site: SiteGeometry,
    /// Rule outcomes
    pub report: ConformityReport,
    /// Stringer marking-out table
    pub layout: StringerLayout,
    /// Display settings used for messages
    pub format: MeasurementFormat,
}

/// Resolve, check and lay out a stair from raw input.
///
/// Empty floor thicknesses and an empty tread depth take the values from
/// `preferences`. Messages are formatted with the preference display
/// settings.
pub fn calculate(
    input: &StairInput,
    thresholds: &RegulatoryThresholds,
    preferences: &UserPreferences,
    debug: DebugContext,
) -> StairResult<StairCalculation> {
    let unit = input.unit;

    let desired_tread_depth = if input.desired_tread_depth.trim().is_empty() {
        debug.step(
            "calculate",
            format!("tread depth from preferences: {}", preferences.default_tread_depth),
        );
        unit.from_inches(Inches(preferences.default_tread_depth)).to_string()
    } else {
        input.desired_tread_depth.clone()
    };

    let resolver_input = ResolverInput {
        total_rise: input.total_rise.clone(),
        desired_riser_height: input.desired_riser_height.clone(),
        desired_tread_depth,
        manual_tread_count: input.manual_tread_count.clone(),
        manual_riser_count: input.manual_riser_count.clone(),
        edited: input.edited,
        unit,
    };
    let spec = resolver::resolve(&resolver_input, thresholds, debug)?;

    let site = SiteGeometry {
        floor_thickness_upper_in: length_or(
            "floor_thickness_upper",
            &input.floor_thickness_upper,
            unit,
            preferences.default_floor_finish_thickness_upper,
        )?,
        floor_thickness_lower_in: length_or(
            "floor_thickness_lower",
            &input.floor_thickness_lower,
            unit,
            preferences.default_floor_finish_thickness_lower,
        )?,
        opening_depth_in: optional_length("opening_depth", &input.opening_depth, unit)?,
        opening_offset_in: optional_length("opening_offset", &input.opening_offset, unit)?,
        available_run_in: optional_length("available_run", &input.available_run, unit)?,
    };

    let format = preferences.measurement_format();
    let report = conformity::check(&spec, &site, thresholds, &format, debug);
    let layout = StringerLayout::from_spec(&spec, preferences.default_tread_thickness);

    Ok(StairCalculation {
        spec,
        site,
        report,
        layout,
        format,
    })
}

fn optional_length(field: &str, text: &str, unit: DisplayUnit) -> StairResult<Option<f64>> {
    Ok(Measurement::parse_optional(field, text, unit)?.map(Measurement::inches))
}

fn length_or(field: &str, text: &str, unit: DisplayUnit, default_in: f64) -> StairResult<f64> {
    Ok(optional_length(field, text, unit)?.unwrap_or(default_in))
}
