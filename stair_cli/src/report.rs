//! Plain-text rendering of a stair calculation.

use std::fmt::Write;

use stair_core::calculations::{MarkPosition, RuleStatus, StairCalculation};
use stair_core::units::{Inches, Millimeters};

const RULE: &str = "═══════════════════════════════════════════════════════";

pub fn render(result: &StairCalculation) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = write_report(&mut out, result);
    out
}

fn write_report(out: &mut String, result: &StairCalculation) -> std::fmt::Result {
    let spec = &result.spec;
    let report = &result.report;
    let layout = &result.layout;
    let f = &result.format;

    writeln!(out, "{}", RULE)?;
    writeln!(out, "  STAIR CALCULATION")?;
    writeln!(out, "{}", RULE)?;
    writeln!(out)?;
    writeln!(out, "Dimensions:")?;
    writeln!(out, "  Total rise:      {}", f.format(spec.total_rise_in))?;
    writeln!(out, "  Risers:          {} × {}", spec.riser_count, f.format(spec.riser_height_in))?;
    writeln!(out, "  Treads:          {} × {}", spec.tread_count, f.format(spec.tread_depth_in))?;
    writeln!(out, "  Run:             {}", f.format(spec.run_length_in))?;
    writeln!(out, "  Slope:           {:.1}°", spec.slope_angle_deg)?;
    writeln!(out, "  Stringer:        {}", f.format(spec.stringer_length_in))?;
    writeln!(out, "  2R + T:          {}", f.format(report.combined_step_in))?;
    writeln!(out)?;

    writeln!(out, "Checks:")?;
    for check in &report.checks {
        writeln!(out, "  {:<24} {:<15} {}", check.rule.label(), status_icon(check.status), check.message)?;
    }
    writeln!(out)?;

    writeln!(out, "Stringer layout:")?;
    writeln!(
        out,
        "  Unit hypotenuse: {} ({:.1} mm)",
        f.format(layout.unit_hypotenuse_in),
        layout.unit_hypotenuse_mm
    )?;
    writeln!(
        out,
        "  Bottom riser:    {} ({:.1} mm)",
        f.format(layout.bottom_riser_height_in),
        mm(layout.bottom_riser_height_in)
    )?;
    writeln!(
        out,
        "  Top riser:       {} ({:.1} mm)",
        f.format(layout.top_riser_height_in),
        mm(layout.top_riser_height_in)
    )?;
    for mark in &layout.marks {
        let label = match mark.position {
            MarkPosition::Foot => format!("Riser {} (foot)", mark.riser),
            MarkPosition::Head => format!("Riser {} (head)", mark.riser),
            MarkPosition::Intermediate => format!("Riser {}", mark.riser),
        };
        writeln!(
            out,
            "  {:<18} {:>12} {:>10.0} mm",
            label,
            f.format(mark.cumulative_in),
            mark.cumulative_mm
        )?;
    }
    writeln!(out)?;

    writeln!(out, "{}", RULE)?;
    writeln!(out, "  RESULT: {}", if report.is_conform { "CONFORM" } else { "NOT CONFORM" })?;
    writeln!(out, "{}", RULE)?;
    Ok(())
}

fn status_icon(status: RuleStatus) -> String {
    format!("[{}]", status)
}

fn mm(inches: f64) -> f64 {
    Millimeters::from(Inches(inches)).value()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stair_core::calculations::{calculate, EditedField, StairInput};
    use stair_core::debug::DebugContext;
    use stair_core::preferences::UserPreferences;
    use stair_core::thresholds::RegulatoryThresholds;

    #[test]
    fn test_render_contains_sections() {
        let input = StairInput {
            total_rise: "108".to_string(),
            desired_riser_height: "7 1/2".to_string(),
            edited: EditedField::DesiredRiserHeight,
            ..Default::default()
        };
        let result = calculate(
            &input,
            &RegulatoryThresholds::default(),
            &UserPreferences::default(),
            DebugContext::default(),
        )
        .unwrap();

        let text = render(&result);
        assert!(text.contains("14 × 7 11/16\""));
        assert!(text.contains("Riser 1 (foot)"));
        assert!(text.contains("Riser 14 (head)"));
        assert!(text.contains("[NOT_APPLICABLE]"));
        assert!(text.contains("RESULT:"));
    }
}
