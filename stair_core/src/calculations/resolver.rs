//! # Quantity Resolver
//!
//! Turns the raw stair fields into one consistent set of dimensions.
//!
//! Riser count, riser height, tread count and total rise are tied together:
//! once the total rise is fixed, any one of the other three determines the
//! rest. The resolver picks the driving quantity from the field the user
//! edited last ([`EditedField`]):
//!
//! 1. A manual riser or tread count the user just typed is authoritative.
//! 2. Otherwise the desired riser height sets the count:
//!    `round(total_rise / desired_riser_height)` with halves going to the
//!    even count, never below 2.
//! 3. Without a desired riser height, the comfort target from
//!    [`RegulatoryThresholds`] is used instead.
//!
//! The riser height is always re-derived from the rounded count, so it may
//! differ slightly from what the user typed. The tread depth is taken as
//! given; only when it is missing is it derived from the middle of the
//! combined-step band and clamped into the legal tread range.
//!
//! ## Example
//!
//! ```rust
//! use stair_core::calculations::resolver::{resolve, EditedField, ResolverInput};
//! use stair_core::debug::DebugContext;
//! use stair_core::thresholds::RegulatoryThresholds;
//!
//! let input = ResolverInput {
//!     total_rise: "108".to_string(),
//!     desired_riser_height: "7 1/2".to_string(),
//!     desired_tread_depth: "9 1/4".to_string(),
//!     edited: EditedField::DesiredRiserHeight,
//!     ..Default::default()
//! };
//!
//! let spec = resolve(&input, &RegulatoryThresholds::default(), DebugContext::default()).unwrap();
//! assert_eq!(spec.riser_count, 14);
//! assert_eq!(spec.tread_count, 13);
//! assert!((spec.riser_height_in - 108.0 / 14.0).abs() < 1e-9);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::debug::DebugContext;
use crate::errors::{StairError, StairResult};
use crate::measurement::{parse_count, Measurement};
use crate::thresholds::RegulatoryThresholds;
use crate::units::{Degrees, DisplayUnit};

/// Fewest risers a stair can have
pub const MIN_RISER_COUNT: u32 = 2;

/// Most risers the resolver will produce
pub const MAX_RISER_COUNT: u32 = 1000;

const VALID_COMBINATIONS: &str = "provide a desired riser height, a manual riser count, \
     or a tread depth together with a manual tread count";

/// The input field the user edited most recently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditedField {
    /// Manual riser count override
    ManualRiserCount,
    /// Manual tread (step) count override
    ManualTreadCount,
    /// Desired riser height
    DesiredRiserHeight,
    /// Desired tread depth
    DesiredTreadDepth,
    /// First calculation, nothing edited yet
    #[default]
    ColdStart,
}

impl EditedField {
    /// All variants for UI selection
    pub const ALL: [EditedField; 5] = [
        EditedField::ManualRiserCount,
        EditedField::ManualTreadCount,
        EditedField::DesiredRiserHeight,
        EditedField::DesiredTreadDepth,
        EditedField::ColdStart,
    ];
}

impl fmt::Display for EditedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EditedField::ManualRiserCount => "risers",
            EditedField::ManualTreadCount => "treads",
            EditedField::DesiredRiserHeight => "riser-height",
            EditedField::DesiredTreadDepth => "tread-depth",
            EditedField::ColdStart => "none",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for EditedField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "risers" | "riser-count" | "manual-riser-count" => Ok(EditedField::ManualRiserCount),
            "treads" | "tread-count" | "steps" | "manual-tread-count" => Ok(EditedField::ManualTreadCount),
            "riser-height" | "desired-riser-height" => Ok(EditedField::DesiredRiserHeight),
            "tread-depth" | "desired-tread-depth" => Ok(EditedField::DesiredTreadDepth),
            "none" | "cold-start" => Ok(EditedField::ColdStart),
            other => Err(format!(
                "Unknown field '{}': expected risers, treads, riser-height, tread-depth or none",
                other
            )),
        }
    }
}

/// Raw text for the resolver, exactly as typed.
///
/// Empty strings mean "not supplied". Lengths are read in `unit`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverInput {
    /// Floor-to-floor rise
    pub total_rise: String,
    /// Riser height the user would like
    pub desired_riser_height: String,
    /// Tread depth (giron) the user would like
    pub desired_tread_depth: String,
    /// Manual tread (step) count override
    pub manual_tread_count: String,
    /// Manual riser count override
    pub manual_riser_count: String,
    /// Field the user edited last
    pub edited: EditedField,
    /// Unit the lengths are typed in
    pub unit: DisplayUnit,
}

/// What fixed the riser count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiserCountSource {
    /// Manual riser count override
    ManualRiserCount,
    /// Manual tread count override plus one
    ManualTreadCount,
    /// Rounded from the desired riser height
    DesiredRiserHeight,
    /// Rounded from the comfort-target riser height
    ComfortTarget,
}

/// Where the tread depth came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreadDepthSource {
    /// Taken verbatim from the input
    Supplied,
    /// Back-computed from the combined-step band
    Derived,
}

/// A fully resolved straight stair. Lengths in inches.
///
/// ## JSON Example
///
/// ```json
/// {
///   "total_rise_in": 108.0,
///   "riser_count": 14,
///   "riser_height_in": 7.714,
///   "tread_count": 13,
///   "tread_depth_in": 9.25,
///   "run_length_in": 120.25,
///   "slope_angle_deg": 41.9,
///   "stringer_length_in": 161.8,
///   "riser_count_source": "desired_riser_height",
///   "tread_depth_source": "supplied"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaircaseSpec {
    /// Total rise as supplied
    pub total_rise_in: f64,
    /// Number of risers (at least 2)
    pub riser_count: u32,
    /// Height of one riser: total_rise / riser_count
    pub riser_height_in: f64,
    /// Number of treads: riser_count - 1
    pub tread_count: u32,
    /// Depth of one tread (giron)
    pub tread_depth_in: f64,
    /// Horizontal length: tread_count × tread_depth
    pub run_length_in: f64,
    /// Slope above horizontal in degrees
    pub slope_angle_deg: f64,
    /// Diagonal length: hypotenuse of total rise and run
    pub stringer_length_in: f64,
    /// What fixed the riser count
    pub riser_count_source: RiserCountSource,
    /// Where the tread depth came from
    pub tread_depth_source: TreadDepthSource,
}

impl StaircaseSpec {
    /// Build a spec from a rise, a riser count and a tread depth.
    ///
    /// The count is clamped to [`MIN_RISER_COUNT`]; everything else is
    /// derived geometrically.
    pub fn from_counts(
        total_rise_in: f64,
        riser_count: u32,
        tread_depth_in: f64,
        riser_count_source: RiserCountSource,
        tread_depth_source: TreadDepthSource,
    ) -> Self {
        let riser_count = riser_count.max(MIN_RISER_COUNT);
        let tread_count = riser_count - 1;
        let riser_height_in = total_rise_in / f64::from(riser_count);
        let run_length_in = f64::from(tread_count) * tread_depth_in;

        StaircaseSpec {
            total_rise_in,
            riser_count,
            riser_height_in,
            tread_count,
            tread_depth_in,
            run_length_in,
            slope_angle_deg: Degrees::from_rise_run(total_rise_in, run_length_in).value(),
            stringer_length_in: total_rise_in.hypot(run_length_in),
            riser_count_source,
            tread_depth_source,
        }
    }

    /// Combined-step value 2 × riser + tread
    pub fn combined_step_in(&self) -> f64 {
        2.0 * self.riser_height_in + self.tread_depth_in
    }

    /// Diagonal of one step: √(riser² + tread²)
    pub fn unit_hypotenuse_in(&self) -> f64 {
        self.riser_height_in.hypot(self.tread_depth_in)
    }

    /// Signed difference between the total rise and the sum of the risers
    pub fn rise_residual_in(&self) -> f64 {
        self.total_rise_in - f64::from(self.riser_count) * self.riser_height_in
    }
}

/// Resolve raw stair fields into a consistent [`StaircaseSpec`].
///
/// # Errors
///
/// * `ParseError` - a field is not in the measurement grammar
/// * `MissingOrInvalidInput` - total rise missing, or a supplied value is not positive
/// * `AmbiguousConfiguration` - both manual counts supplied, or no usable combination
pub fn resolve(
    input: &ResolverInput,
    thresholds: &RegulatoryThresholds,
    debug: DebugContext,
) -> StairResult<StaircaseSpec> {
    let unit = input.unit;

    let total_rise = Measurement::parse_optional("total_rise", &input.total_rise, unit)?
        .ok_or_else(|| StairError::missing_field("total_rise"))?
        .inches();
    require_positive("total_rise", &input.total_rise, total_rise)?;

    let riser_height = optional_positive("desired_riser_height", &input.desired_riser_height, unit)?;
    let tread_depth = optional_positive("desired_tread_depth", &input.desired_tread_depth, unit)?;
    let manual_treads = parse_count("manual_tread_count", &input.manual_tread_count)?;
    let manual_risers = parse_count("manual_riser_count", &input.manual_riser_count)?;

    if manual_treads.is_some() && manual_risers.is_some() {
        return Err(StairError::ambiguous(
            "both a manual riser count and a manual tread count were supplied; keep only one",
        ));
    }

    let has_combination =
        riser_height.is_some() || manual_risers.is_some() || (tread_depth.is_some() && manual_treads.is_some());
    if !has_combination {
        return Err(StairError::ambiguous(format!(
            "not enough information to size the stair: {}",
            VALID_COMBINATIONS
        )));
    }

    debug.step(
        "resolve",
        format!(
            "edited={} total_rise={} riser_height={:?} tread_depth={:?} treads={:?} risers={:?}",
            input.edited, total_rise, riser_height, tread_depth, manual_treads, manual_risers
        ),
    );

    let (riser_count, riser_count_source) = match (input.edited, manual_risers, manual_treads) {
        (EditedField::ManualRiserCount, Some(risers), _) => (risers, RiserCountSource::ManualRiserCount),
        (EditedField::ManualTreadCount, _, Some(treads)) => {
            (treads.saturating_add(1), RiserCountSource::ManualTreadCount)
        }
        _ => match riser_height {
            Some(height) => (
                count_for_height("desired_riser_height", total_rise, height)?,
                RiserCountSource::DesiredRiserHeight,
            ),
            None => (
                count_for_height("total_rise", total_rise, thresholds.riser_height_comfort_target)?,
                RiserCountSource::ComfortTarget,
            ),
        },
    };
    if riser_count > MAX_RISER_COUNT {
        let field = match riser_count_source {
            RiserCountSource::ManualTreadCount => "manual_tread_count",
            _ => "manual_riser_count",
        };
        return Err(StairError::invalid_input(
            field,
            riser_count.to_string(),
            format!("A stair cannot have more than {} risers", MAX_RISER_COUNT),
        ));
    }
    debug.step("resolve", format!("riser_count={} from {:?}", riser_count, riser_count_source));

    let riser_height_in = total_rise / f64::from(riser_count.max(MIN_RISER_COUNT));
    let (tread_depth_in, tread_depth_source) = match tread_depth {
        Some(depth) => (depth, TreadDepthSource::Supplied),
        None => {
            let derived = (thresholds.combined_formula_target() - 2.0 * riser_height_in)
                .clamp(thresholds.tread_depth_min, thresholds.tread_depth_max);
            debug.step("resolve", format!("tread depth derived from combined-step target: {}", derived));
            (derived, TreadDepthSource::Derived)
        }
    };

    let spec = StaircaseSpec::from_counts(
        total_rise,
        riser_count,
        tread_depth_in,
        riser_count_source,
        tread_depth_source,
    );
    debug.step(
        "resolve",
        format!(
            "riser_height={} run={} slope={} stringer={}",
            spec.riser_height_in, spec.run_length_in, spec.slope_angle_deg, spec.stringer_length_in
        ),
    );
    Ok(spec)
}

/// Riser count nearest to a target height, never below the minimum.
///
/// Exact halves round to the even count. `field` names the input blamed
/// when the count is absurd.
fn count_for_height(field: &str, total_rise: f64, height: f64) -> StairResult<u32> {
    let exact = (total_rise / height).round_ties_even();
    if exact > f64::from(MAX_RISER_COUNT) {
        let value = if field == "total_rise" { total_rise } else { height };
        return Err(StairError::invalid_input(
            field,
            value.to_string(),
            format!("Would need {} risers; check the riser height and total rise", exact),
        ));
    }
    Ok((exact as u32).max(MIN_RISER_COUNT))
}

fn require_positive(field: &str, text: &str, value: f64) -> StairResult<()> {
    if value <= 0.0 {
        return Err(StairError::invalid_input(field, text.trim(), "Value must be greater than zero"));
    }
    Ok(())
}

fn optional_positive(field: &str, text: &str, unit: DisplayUnit) -> StairResult<Option<f64>> {
    match Measurement::parse_optional(field, text, unit)? {
        Some(m) => {
            require_positive(field, text, m.inches())?;
            Ok(Some(m.inches()))
        }
        None => Ok(None),
    }
}
