//! # Conformity Checker
//!
//! Grades a resolved [`StaircaseSpec`] against the [`RegulatoryThresholds`].
//!
//! Every rule runs on every call; a failing rule never hides the others.
//! Each rule lands in one of five states:
//!
//! | Status           | Meaning                                    |
//! |------------------|--------------------------------------------|
//! | `OPTIMAL`        | Inside the comfort target                  |
//! | `OK`             | Inside the legal band                      |
//! | `WARNING`        | Legal but uncomfortable or imprecise       |
//! | `FAIL`           | Breaks a regulatory limit                  |
//! | `NOT_APPLICABLE` | Not enough site information to check       |
//!
//! ## Rules
//!
//! 1. **Riser height**: FAIL outside `[riser_height_min, riser_height_max]`,
//!    WARNING more than 1/2" from the comfort target, else OPTIMAL.
//! 2. **Tread depth**: FAIL outside `[tread_depth_min, tread_depth_max]`,
//!    WARNING below `tread_depth_comfort_min`, else OK.
//! 3. **Combined step** (2 × riser + tread): FAIL outside the band, else OK.
//! 4. **Headroom**: minimum clearance over every nose under the stairwell
//!    opening; FAIL below `headroom_min`.
//! 5. **Available run**: FAIL when the stair is longer than the room.
//! 6. **Slope**: FAIL above `slope_too_steep_max`, WARNING above
//!    `slope_comfort_max`, else OPTIMAL.
//! 7. **Rise residual**: WARNING when the risers, marked out at display
//!    precision (nearest millimetre in metric), miss the total rise by more
//!    than 1/64".
//!
//! The checker never returns an error: rules without enough data degrade to
//! `NOT_APPLICABLE`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calculations::resolver::StaircaseSpec;
use crate::debug::DebugContext;
use crate::measurement::MeasurementFormat;
use crate::thresholds::{code_ref, RegulatoryThresholds, RISER_COMFORT_TOLERANCE_IN, RISE_RESIDUAL_TOLERANCE_IN};

const POSITION_EPSILON: f64 = 1e-9;

/// The rules a stair is checked against, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    RiserHeight,
    TreadDepth,
    CombinedStep,
    Headroom,
    AvailableRun,
    Slope,
    RiseResidual,
}

impl Rule {
    /// All rules in evaluation order
    pub const ALL: [Rule; 7] = [
        Rule::RiserHeight,
        Rule::TreadDepth,
        Rule::CombinedStep,
        Rule::Headroom,
        Rule::AvailableRun,
        Rule::Slope,
        Rule::RiseResidual,
    ];

    /// Short label for reports
    pub fn label(&self) -> &'static str {
        match self {
            Rule::RiserHeight => "Riser height",
            Rule::TreadDepth => "Tread depth",
            Rule::CombinedStep => "Combined step (2R + T)",
            Rule::Headroom => "Headroom",
            Rule::AvailableRun => "Available run",
            Rule::Slope => "Slope",
            Rule::RiseResidual => "Rise residual",
        }
    }

    /// Best status this rule can reach
    pub fn best_status(&self) -> RuleStatus {
        match self {
            Rule::RiserHeight | Rule::Slope => RuleStatus::Optimal,
            _ => RuleStatus::Ok,
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Outcome of a single rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleStatus {
    Optimal,
    Ok,
    Warning,
    Fail,
    NotApplicable,
}

impl fmt::Display for RuleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RuleStatus::Optimal => "OPTIMAL",
            RuleStatus::Ok => "OK",
            RuleStatus::Warning => "WARNING",
            RuleStatus::Fail => "FAIL",
            RuleStatus::NotApplicable => "NOT_APPLICABLE",
        };
        write!(f, "{}", text)
    }
}

/// Result of one rule: status, measured value and a ready-to-show message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleCheck {
    /// Which rule
    pub rule: Rule,
    /// Outcome
    pub status: RuleStatus,
    /// Measured value (inches, or degrees for slope), when one exists
    pub value: Option<f64>,
    /// Human-readable explanation, already formatted for display
    pub message: String,
}

impl RuleCheck {
    fn new(rule: Rule, status: RuleStatus, value: Option<f64>, message: impl Into<String>) -> Self {
        RuleCheck {
            rule,
            status,
            value,
            message: message.into(),
        }
    }

    /// Whether the rule reached its best status
    pub fn is_best(&self) -> bool {
        self.status == self.rule.best_status()
    }
}

/// Site measurements around the stair. Lengths in inches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteGeometry {
    /// Finished floor thickness on the upper level
    pub floor_thickness_upper_in: f64,
    /// Finished floor thickness on the lower level
    pub floor_thickness_lower_in: f64,
    /// Horizontal length of the stairwell opening
    pub opening_depth_in: Option<f64>,
    /// Distance from the first nose to the start of the opening; negative
    /// when the opening starts before the first nose
    pub opening_offset_in: Option<f64>,
    /// Floor length available for the stair
    pub available_run_in: Option<f64>,
}

/// Every rule outcome plus the aggregate verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConformityReport {
    /// One entry per [`Rule`], in [`Rule::ALL`] order
    pub checks: Vec<RuleCheck>,
    /// Messages of every rule not in its best state, in rule order
    pub warnings: Vec<String>,
    /// False when any rule failed
    pub is_conform: bool,
    /// 2 × riser + tread (in)
    pub combined_step_in: f64,
    /// Smallest clearance under the opening, when one was measured (in)
    pub min_headroom_in: Option<f64>,
}

impl ConformityReport {
    /// Outcome of a given rule
    pub fn status_of(&self, rule: Rule) -> Option<RuleStatus> {
        self.checks.iter().find(|c| c.rule == rule).map(|c| c.status)
    }

    /// The full check for a given rule
    pub fn check_for(&self, rule: Rule) -> Option<&RuleCheck> {
        self.checks.iter().find(|c| c.rule == rule)
    }

    /// Rules that failed
    pub fn failures(&self) -> impl Iterator<Item = &RuleCheck> {
        self.checks.iter().filter(|c| c.status == RuleStatus::Fail)
    }
}

/// Run every rule against a resolved stair.
pub fn check(
    spec: &StaircaseSpec,
    site: &SiteGeometry,
    thresholds: &RegulatoryThresholds,
    format: &MeasurementFormat,
    debug: DebugContext,
) -> ConformityReport {
    let (headroom, min_headroom_in) = check_headroom(spec, site, thresholds, format);

    let checks = vec![
        check_riser_height(spec, thresholds, format),
        check_tread_depth(spec, thresholds, format),
        check_combined_step(spec, thresholds, format),
        headroom,
        check_available_run(spec, site, format),
        check_slope(spec, thresholds),
        check_rise_residual(spec, format),
    ];

    for c in &checks {
        debug.step("check", format!("{:?} -> {} ({:?})", c.rule, c.status, c.value));
    }

    let warnings = checks.iter().filter(|c| !c.is_best()).map(|c| c.message.clone()).collect();
    let is_conform = checks.iter().all(|c| c.status != RuleStatus::Fail);

    ConformityReport {
        checks,
        warnings,
        is_conform,
        combined_step_in: spec.combined_step_in(),
        min_headroom_in,
    }
}

fn check_riser_height(spec: &StaircaseSpec, t: &RegulatoryThresholds, f: &MeasurementFormat) -> RuleCheck {
    let h = spec.riser_height_in;
    let (status, message) = if h < t.riser_height_min || h > t.riser_height_max {
        (
            RuleStatus::Fail,
            format!(
                "Riser height {} is outside {} to {} ({})",
                f.format(h),
                f.format(t.riser_height_min),
                f.format(t.riser_height_max),
                code_ref::RISER_HEIGHT
            ),
        )
    } else if (h - t.riser_height_comfort_target).abs() > RISER_COMFORT_TOLERANCE_IN {
        (
            RuleStatus::Warning,
            format!(
                "Riser height {} is legal but less comfortable (target {})",
                f.format(h),
                f.format(t.riser_height_comfort_target)
            ),
        )
    } else {
        (RuleStatus::Optimal, format!("Riser height {} is optimal", f.format(h)))
    };
    RuleCheck::new(Rule::RiserHeight, status, Some(h), message)
}

fn check_tread_depth(spec: &StaircaseSpec, t: &RegulatoryThresholds, f: &MeasurementFormat) -> RuleCheck {
    let d = spec.tread_depth_in;
    let (status, message) = if d < t.tread_depth_min || d > t.tread_depth_max {
        (
            RuleStatus::Fail,
            format!(
                "Tread depth {} is outside {} to {} ({})",
                f.format(d),
                f.format(t.tread_depth_min),
                f.format(t.tread_depth_max),
                code_ref::TREAD_DEPTH
            ),
        )
    } else if d < t.tread_depth_comfort_min {
        (
            RuleStatus::Warning,
            format!(
                "Tread depth {} is legal but less comfortable (recommended at least {})",
                f.format(d),
                f.format(t.tread_depth_comfort_min)
            ),
        )
    } else {
        (RuleStatus::Ok, format!("Tread depth {} is within limits", f.format(d)))
    };
    RuleCheck::new(Rule::TreadDepth, status, Some(d), message)
}

fn check_combined_step(spec: &StaircaseSpec, t: &RegulatoryThresholds, f: &MeasurementFormat) -> RuleCheck {
    let sum = spec.combined_step_in();
    let (status, message) = if sum < t.combined_formula_min || sum > t.combined_formula_max {
        (
            RuleStatus::Fail,
            format!(
                "2 × riser + tread = {} is outside {} to {} ({})",
                f.format(sum),
                f.format(t.combined_formula_min),
                f.format(t.combined_formula_max),
                code_ref::COMBINED_STEP
            ),
        )
    } else {
        (RuleStatus::Ok, format!("2 × riser + tread = {}", f.format(sum)))
    };
    RuleCheck::new(Rule::CombinedStep, status, Some(sum), message)
}

/// Minimum clearance over every nose under the opening.
///
/// Nose k (1-based) sits at x = (k - 1) × tread from the first nose and at
/// height k × riser. The underside of the upper floor is at
/// total_rise - floor_thickness_upper.
fn check_headroom(
    spec: &StaircaseSpec,
    site: &SiteGeometry,
    t: &RegulatoryThresholds,
    f: &MeasurementFormat,
) -> (RuleCheck, Option<f64>) {
    let depth = match site.opening_depth_in {
        Some(depth) if depth > 0.0 => depth,
        _ => {
            let check = RuleCheck::new(
                Rule::Headroom,
                RuleStatus::NotApplicable,
                None,
                "No stairwell opening given; headroom not checked",
            );
            return (check, None);
        }
    };
    let offset = site.opening_offset_in.unwrap_or(0.0);
    let ceiling = spec.total_rise_in - site.floor_thickness_upper_in;

    let min_clearance = (1..=spec.riser_count)
        .filter(|k| {
            let x = f64::from(k - 1) * spec.tread_depth_in;
            x >= offset - POSITION_EPSILON && x < offset + depth - POSITION_EPSILON
        })
        .map(|k| ceiling - f64::from(k) * spec.riser_height_in)
        .fold(None, |min: Option<f64>, c| Some(min.map_or(c, |m| m.min(c))));

    match min_clearance {
        None => {
            let check = RuleCheck::new(
                Rule::Headroom,
                RuleStatus::NotApplicable,
                None,
                format!(
                    "No stair nose lies under the opening ({} to {}); headroom not checked",
                    f.format(offset),
                    f.format(offset + depth)
                ),
            );
            (check, None)
        }
        Some(clearance) if clearance < t.headroom_min => {
            let check = RuleCheck::new(
                Rule::Headroom,
                RuleStatus::Fail,
                Some(clearance),
                format!(
                    "Headroom {} is below the minimum {} ({})",
                    f.format(clearance),
                    f.format(t.headroom_min),
                    code_ref::HEADROOM
                ),
            );
            (check, Some(clearance))
        }
        Some(clearance) => {
            let check = RuleCheck::new(
                Rule::Headroom,
                RuleStatus::Ok,
                Some(clearance),
                format!("Headroom {} meets the minimum {}", f.format(clearance), f.format(t.headroom_min)),
            );
            (check, Some(clearance))
        }
    }
}

fn check_available_run(spec: &StaircaseSpec, site: &SiteGeometry, f: &MeasurementFormat) -> RuleCheck {
    let run = spec.run_length_in;
    match site.available_run_in {
        Some(available) if available > 0.0 => {
            if run > available {
                RuleCheck::new(
                    Rule::AvailableRun,
                    RuleStatus::Fail,
                    Some(run),
                    format!(
                        "Stair run {} exceeds the available space {} by {}",
                        f.format(run),
                        f.format(available),
                        f.format(run - available)
                    ),
                )
            } else {
                RuleCheck::new(
                    Rule::AvailableRun,
                    RuleStatus::Ok,
                    Some(run),
                    format!("Stair run {} fits in {}", f.format(run), f.format(available)),
                )
            }
        }
        _ => RuleCheck::new(
            Rule::AvailableRun,
            RuleStatus::NotApplicable,
            Some(run),
            "Available run not given; stair length was not checked against the room",
        ),
    }
}

fn check_slope(spec: &StaircaseSpec, t: &RegulatoryThresholds) -> RuleCheck {
    let angle = spec.slope_angle_deg;
    let (status, message) = if angle > t.slope_too_steep_max {
        (
            RuleStatus::Fail,
            format!("Slope {:.1}° is steeper than {:.1}°", angle, t.slope_too_steep_max),
        )
    } else if angle > t.slope_comfort_max {
        (
            RuleStatus::Warning,
            format!("Slope {:.1}° is steep (comfortable up to {:.1}°)", angle, t.slope_comfort_max),
        )
    } else {
        (RuleStatus::Optimal, format!("Slope {:.1}° is comfortable", angle))
    };
    RuleCheck::new(Rule::Slope, status, Some(angle), message)
}

/// Residual left when every riser is marked at display precision.
fn check_rise_residual(spec: &StaircaseSpec, f: &MeasurementFormat) -> RuleCheck {
    let marked = f.marked(spec.riser_height_in);
    let residual = spec.total_rise_in - f64::from(spec.riser_count) * marked;

    if residual.abs() > RISE_RESIDUAL_TOLERANCE_IN {
        RuleCheck::new(
            Rule::RiseResidual,
            RuleStatus::Warning,
            Some(residual),
            format!(
                "{} risers marked at {} leave {} of total rise to absorb",
                spec.riser_count,
                f.format(marked),
                f.format(residual)
            ),
        )
    } else {
        RuleCheck::new(
            Rule::RiseResidual,
            RuleStatus::Ok,
            Some(residual),
            format!("{} risers at {} match the total rise", spec.riser_count, f.format(marked)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::resolver::{RiserCountSource, TreadDepthSource};
    use crate::units::DisplayUnit;

    fn spec(total_rise: f64, risers: u32, tread: f64) -> StaircaseSpec {
        StaircaseSpec::from_counts(
            total_rise,
            risers,
            tread,
            RiserCountSource::ManualRiserCount,
            TreadDepthSource::Supplied,
        )
    }

    fn run(spec: &StaircaseSpec, site: &SiteGeometry) -> ConformityReport {
        check(
            spec,
            site,
            &RegulatoryThresholds::default(),
            &MeasurementFormat::default(),
            DebugContext::default(),
        )
    }

    #[test]
    fn test_every_rule_reported_in_order() {
        let report = run(&spec(108.0, 14, 10.0), &SiteGeometry::default());
        let rules: Vec<Rule> = report.checks.iter().map(|c| c.rule).collect();
        assert_eq!(rules, Rule::ALL.to_vec());
    }

    #[test]
    fn test_comfortable_stair() {
        // 112.5 / 15 = 7.5 exactly, 10" treads: 2 × 7.5 + 10 = 25
        let s = spec(112.5, 15, 10.0);
        let site = SiteGeometry {
            available_run_in: Some(200.0),
            ..Default::default()
        };
        let report = run(&s, &site);
        assert_eq!(report.status_of(Rule::RiserHeight), Some(RuleStatus::Optimal));
        assert_eq!(report.status_of(Rule::TreadDepth), Some(RuleStatus::Ok));
        assert_eq!(report.status_of(Rule::CombinedStep), Some(RuleStatus::Ok));
        assert_eq!(report.status_of(Rule::AvailableRun), Some(RuleStatus::Ok));
        assert_eq!(report.status_of(Rule::Slope), Some(RuleStatus::Warning));
        assert_eq!(report.status_of(Rule::RiseResidual), Some(RuleStatus::Ok));
        assert!(report.is_conform);
        assert_eq!(report.combined_step_in, 25.0);
    }

    #[test]
    fn test_riser_height_states() {
        let t = RegulatoryThresholds::default();
        let f = MeasurementFormat::default();
        assert_eq!(check_riser_height(&spec(90.0, 10, 10.0), &t, &f).status, RuleStatus::Fail);
        assert_eq!(check_riser_height(&spec(80.5, 10, 10.0), &t, &f).status, RuleStatus::Warning);
        assert_eq!(check_riser_height(&spec(74.0, 10, 10.0), &t, &f).status, RuleStatus::Optimal);
        assert_eq!(check_riser_height(&spec(40.0, 10, 10.0), &t, &f).status, RuleStatus::Fail);
    }

    #[test]
    fn test_tread_depth_states() {
        let t = RegulatoryThresholds::default();
        let f = MeasurementFormat::default();
        assert_eq!(check_tread_depth(&spec(75.0, 10, 8.0), &t, &f).status, RuleStatus::Fail);
        assert_eq!(check_tread_depth(&spec(75.0, 10, 8.5), &t, &f).status, RuleStatus::Warning);
        assert_eq!(check_tread_depth(&spec(75.0, 10, 9.25), &t, &f).status, RuleStatus::Ok);
        assert_eq!(check_tread_depth(&spec(75.0, 10, 15.0), &t, &f).status, RuleStatus::Fail);
    }

    #[test]
    fn test_combined_step_always_reports_sum() {
        let t = RegulatoryThresholds::default();
        let f = MeasurementFormat::default();
        let c = check_combined_step(&spec(80.0, 10, 14.0), &t, &f);
        assert_eq!(c.status, RuleStatus::Fail);
        assert_eq!(c.value, Some(30.0));
        assert!(c.message.contains("30\""));
    }

    #[test]
    fn test_headroom_minimum_over_noses() {
        let s = spec(108.0, 15, 9.25);
        let site = SiteGeometry {
            floor_thickness_upper_in: 1.5,
            opening_depth_in: Some(30.0),
            opening_offset_in: Some(0.0),
            ..Default::default()
        };
        let report = run(&s, &site);
        let clearance = report.min_headroom_in.unwrap();
        // Noses at 0, 9.25, 18.5, 27.75 are under the opening; k = 4 governs
        assert!((clearance - (106.5 - 4.0 * 7.2)).abs() < 1e-9);
        assert_eq!(report.status_of(Rule::Headroom), Some(RuleStatus::Fail));
        assert!(!report.is_conform);
    }

    #[test]
    fn test_headroom_opening_higher_up_the_stair() {
        let s = spec(108.0, 15, 10.0);
        let site = SiteGeometry {
            opening_depth_in: Some(40.0),
            opening_offset_in: Some(100.0),
            ..Default::default()
        };
        let report = run(&s, &site);
        // Noses 11..=14 at x = 100..=130; k = 14 governs: 108 - 14 × 7.2
        assert!((report.min_headroom_in.unwrap() - 7.2).abs() < 1e-9);
    }

    #[test]
    fn test_headroom_opening_starting_before_first_nose() {
        let s = spec(108.0, 15, 9.25);
        let site = SiteGeometry {
            floor_thickness_upper_in: 1.5,
            opening_depth_in: Some(30.0),
            opening_offset_in: Some(-10.0),
            ..Default::default()
        };
        let report = run(&s, &site);
        // Span [-10, 20) covers noses at 0, 9.25 and 18.5; k = 3 governs
        assert!((report.min_headroom_in.unwrap() - (106.5 - 3.0 * 7.2)).abs() < 1e-9);
        assert_eq!(report.status_of(Rule::Headroom), Some(RuleStatus::Ok));
    }

    #[test]
    fn test_headroom_not_applicable() {
        let s = spec(108.0, 14, 10.0);
        let report = run(&s, &SiteGeometry::default());
        assert_eq!(report.status_of(Rule::Headroom), Some(RuleStatus::NotApplicable));
        assert_eq!(report.min_headroom_in, None);

        let zero = SiteGeometry {
            opening_depth_in: Some(0.0),
            ..Default::default()
        };
        assert_eq!(run(&s, &zero).status_of(Rule::Headroom), Some(RuleStatus::NotApplicable));

        let beyond = SiteGeometry {
            opening_depth_in: Some(20.0),
            opening_offset_in: Some(500.0),
            ..Default::default()
        };
        let report = run(&s, &beyond);
        assert_eq!(report.status_of(Rule::Headroom), Some(RuleStatus::NotApplicable));
        assert!(report.check_for(Rule::Headroom).unwrap().message.contains("No stair nose"));
    }

    #[test]
    fn test_available_run() {
        let s = spec(108.0, 14, 10.0);
        let short = SiteGeometry {
            available_run_in: Some(100.0),
            ..Default::default()
        };
        let report = run(&s, &short);
        assert_eq!(report.status_of(Rule::AvailableRun), Some(RuleStatus::Fail));
        assert!(report.failures().any(|c| c.rule == Rule::AvailableRun));

        let report = run(&s, &SiteGeometry::default());
        assert_eq!(report.status_of(Rule::AvailableRun), Some(RuleStatus::NotApplicable));
        assert!(report.warnings.iter().any(|w| w.contains("Available run not given")));
    }

    #[test]
    fn test_slope_states() {
        let t = RegulatoryThresholds::default();
        assert_eq!(check_slope(&spec(30.0, 4, 10.0), &t).status, RuleStatus::Fail);
        assert_eq!(check_slope(&spec(70.0, 10, 10.0), &t).status, RuleStatus::Warning);
        assert_eq!(check_slope(&spec(60.0, 10, 10.0), &t).status, RuleStatus::Optimal);
    }

    #[test]
    fn test_rise_residual_uses_marked_height() {
        let f = MeasurementFormat::default();
        // 108 / 14 = 7.714..., marked at 7 11/16 = 7.6875 → 108 - 107.625 = 3/8
        let c = check_rise_residual(&spec(108.0, 14, 10.0), &f);
        assert_eq!(c.status, RuleStatus::Warning);
        assert!((c.value.unwrap() - 0.375).abs() < 1e-9);
        assert!(c.message.contains("3/8\""));

        let exact = check_rise_residual(&spec(105.0, 14, 10.0), &f);
        assert_eq!(exact.status, RuleStatus::Ok);
    }

    #[test]
    fn test_rise_residual_metric_marks_to_the_millimetre() {
        let metric = MeasurementFormat {
            unit: DisplayUnit::Centimeters,
            denominator_limit: 16,
        };
        // 14 risers of exactly 190 mm: exact in mm, off by 1/4" in sixteenths
        let s = spec(14.0 * 190.0 / 25.4, 14, 10.0);
        let c = check_rise_residual(&s, &metric);
        assert_eq!(c.status, RuleStatus::Ok);
        assert!(c.value.unwrap().abs() < 1e-9);

        let c = check_rise_residual(&s, &MeasurementFormat::default());
        assert_eq!(c.status, RuleStatus::Warning);
    }

    #[test]
    fn test_warnings_follow_rule_order() {
        let s = spec(90.0, 10, 8.5);
        let report = run(&s, &SiteGeometry::default());
        let expected: Vec<String> = report
            .checks
            .iter()
            .filter(|c| !c.is_best())
            .map(|c| c.message.clone())
            .collect();
        assert_eq!(report.warnings, expected);
        assert!(report.warnings[0].starts_with("Riser height"));
    }

    #[test]
    fn test_is_conform_iff_no_failure() {
        for (rise, risers, tread) in [(108.0, 14, 9.25), (90.0, 10, 10.0), (112.5, 15, 10.0), (30.0, 4, 20.0)] {
            let report = run(&spec(rise, risers, tread), &SiteGeometry::default());
            let any_fail = report.checks.iter().any(|c| c.status == RuleStatus::Fail);
            assert_eq!(report.is_conform, !any_fail);
        }
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(serde_json::to_string(&RuleStatus::NotApplicable).unwrap(), "\"NOT_APPLICABLE\"");
        assert_eq!(serde_json::to_string(&RuleStatus::Optimal).unwrap(), "\"OPTIMAL\"");
        assert_eq!(RuleStatus::Warning.to_string(), "WARNING");
    }

    #[test]
    fn test_check_is_idempotent() {
        let s = spec(108.0, 15, 9.25);
        let site = SiteGeometry {
            floor_thickness_upper_in: 1.5,
            opening_depth_in: Some(30.0),
            available_run_in: Some(120.0),
            ..Default::default()
        };
        let a = serde_json::to_string(&run(&s, &site)).unwrap();
        let b = serde_json::to_string(&run(&s, &site)).unwrap();
        assert_eq!(a, b);
    }
}
