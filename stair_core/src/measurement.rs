//! # Measurements
//!
//! Parsing and display of tape-measure lengths. A [`Measurement`] is always
//! stored in inches; the textual forms below are accepted on input and
//! converted from the caller's [`DisplayUnit`]:
//!
//! | Form     | Example  | Value  |
//! |----------|----------|--------|
//! | Decimal  | `9.5`    | 9.5    |
//! | Fraction | `1/4`    | 0.25   |
//! | Mixed    | `9 1/4`  | 9.25   |
//!
//! A leading `-` negates the whole value (`-9 1/4` is -9.25). Surrounding
//! whitespace is ignored; anything else is a [`StairError::ParseError`].
//!
//! On output, inch values are shown as reduced fractions whose denominator
//! is one of [`ALLOWED_DENOMINATORS`], capped by the user's precision
//! preference.
//!
//! ## Example
//!
//! ```rust
//! use stair_core::measurement::{format_fraction, Measurement};
//!
//! let tread = Measurement::parse("tread_depth", "9 1/4").unwrap();
//! assert_eq!(tread.inches(), 9.25);
//! assert_eq!(format_fraction(7.714, 16), "7 11/16");
//! assert!(Measurement::parse("tread_depth", "9 1a/4").is_err());
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::{StairError, StairResult};
use crate::units::{DisplayUnit, Inches, Millimeters, MM_PER_INCH};

/// Denominators allowed when displaying imperial fractions
pub const ALLOWED_DENOMINATORS: [u32; 6] = [2, 4, 8, 16, 32, 64];

/// Denominator used when the configured limit admits none of the allowed ones
pub const FALLBACK_DENOMINATOR: u32 = 16;

/// Values closer to zero than this display as "0"
const ZERO_DISPLAY_EPSILON: f64 = 0.0001;

const GRAMMAR_HINT: &str = "Expected a decimal ('9.5'), a fraction ('1/4') or a mixed number ('9 1/4')";

static DECIMAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(-?)(\d+(?:\.\d+)?)$").expect("decimal pattern is valid"));
static FRACTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(-?)(\d+)/(\d+)$").expect("fraction pattern is valid"));
static MIXED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(-?)(\d+) (\d+)/(\d+)$").expect("mixed pattern is valid"));
static COUNT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d+$").expect("count pattern is valid"));

/// A length normalized to inches.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Measurement(Inches);

impl Measurement {
    /// Create a measurement from a value in inches
    pub fn from_inches(inches: f64) -> Self {
        Measurement(Inches(inches))
    }

    /// Value in inches
    pub fn inches(self) -> f64 {
        self.0 .0
    }

    /// Parse a measurement given in inches.
    ///
    /// `field` names the input in the error message.
    pub fn parse(field: &str, text: &str) -> StairResult<Self> {
        Self::parse_in(field, text, DisplayUnit::Inches)
    }

    /// Parse a measurement expressed in `unit` and normalize it to inches.
    pub fn parse_in(field: &str, text: &str, unit: DisplayUnit) -> StairResult<Self> {
        let value = parse_number(field, text)?;
        Ok(Measurement(unit.to_inches(value)))
    }

    /// Parse an optional measurement: empty (or all-whitespace) text is `None`.
    pub fn parse_optional(field: &str, text: &str, unit: DisplayUnit) -> StairResult<Option<Self>> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        Self::parse_in(field, text, unit).map(Some)
    }

    /// Format for display
    pub fn format(self, format: &MeasurementFormat) -> String {
        format.format(self.inches())
    }
}

impl From<Inches> for Measurement {
    fn from(inches: Inches) -> Self {
        Measurement(inches)
    }
}

impl From<Measurement> for Inches {
    fn from(m: Measurement) -> Self {
        m.0
    }
}

/// Parse text in the measurement grammar into a plain number (no unit conversion).
fn parse_number(field: &str, text: &str) -> StairResult<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(StairError::parse(field, text, "Value is empty"));
    }

    if let Some(caps) = DECIMAL_RE.captures(trimmed) {
        let magnitude = parse_digits(field, text, &caps[2])?;
        return Ok(apply_sign(&caps[1], magnitude));
    }

    if let Some(caps) = FRACTION_RE.captures(trimmed) {
        let magnitude = parse_ratio(field, text, &caps[2], &caps[3])?;
        return Ok(apply_sign(&caps[1], magnitude));
    }

    if let Some(caps) = MIXED_RE.captures(trimmed) {
        let whole = parse_digits(field, text, &caps[2])?;
        let fraction = parse_ratio(field, text, &caps[3], &caps[4])?;
        return Ok(apply_sign(&caps[1], whole + fraction));
    }

    Err(StairError::parse(field, text, GRAMMAR_HINT))
}

fn parse_digits(field: &str, text: &str, digits: &str) -> StairResult<f64> {
    digits
        .parse::<f64>()
        .map_err(|e| StairError::parse(field, text, e.to_string()))
}

fn parse_ratio(field: &str, text: &str, numerator: &str, denominator: &str) -> StairResult<f64> {
    let num = parse_digits(field, text, numerator)?;
    let den = parse_digits(field, text, denominator)?;
    if den == 0.0 {
        return Err(StairError::parse(field, text, "Denominator cannot be zero"));
    }
    Ok(num / den)
}

fn apply_sign(sign: &str, magnitude: f64) -> f64 {
    if sign == "-" {
        -magnitude
    } else {
        magnitude
    }
}

/// Parse an optional whole-number count (steps or risers).
///
/// Empty text is `None`. Text that is not an integer is a parse error; zero
/// or negative counts are rejected as invalid input.
pub fn parse_count(field: &str, text: &str) -> StairResult<Option<u32>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if !COUNT_RE.is_match(trimmed) {
        return Err(StairError::parse(field, text, "Expected a whole number"));
    }
    let value: i64 = trimmed
        .parse()
        .map_err(|_| StairError::invalid_input(field, trimmed, "Count is out of range"))?;
    if value <= 0 {
        return Err(StairError::invalid_input(field, trimmed, "Count must be positive"));
    }
    u32::try_from(value)
        .map(Some)
        .map_err(|_| StairError::invalid_input(field, trimmed, "Count is out of range"))
}

// ============================================================================
// Display
// ============================================================================

/// Display settings for measurements, taken from the user's preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementFormat {
    /// Unit to display in
    pub unit: DisplayUnit,
    /// Largest fraction denominator to show (inches only)
    pub denominator_limit: u32,
}

impl Default for MeasurementFormat {
    fn default() -> Self {
        MeasurementFormat {
            unit: DisplayUnit::Inches,
            denominator_limit: FALLBACK_DENOMINATOR,
        }
    }
}

impl MeasurementFormat {
    /// Format a value given in inches
    pub fn format(&self, inches: f64) -> String {
        match self.unit {
            DisplayUnit::Inches => format!("{}{}", format_fraction(inches, self.denominator_limit), self.unit.suffix()),
            DisplayUnit::Centimeters => {
                format!("{:.1}{}", self.unit.from_inches(Inches(inches)), self.unit.suffix())
            }
        }
    }

    /// Value as a builder marks it out in this format: the nearest display
    /// fraction in inches, or the nearest millimetre in metric. Result in inches.
    pub fn marked(&self, inches: f64) -> f64 {
        match self.unit {
            DisplayUnit::Inches => round_to_precision(inches, self.denominator_limit),
            DisplayUnit::Centimeters => Millimeters::from(Inches(inches)).value().round() / MM_PER_INCH,
        }
    }
}

/// Largest allowed denominator not exceeding `limit`
fn finest_denominator(limit: u32) -> u32 {
    ALLOWED_DENOMINATORS
        .iter()
        .copied()
        .filter(|d| *d <= limit)
        .max()
        .unwrap_or(FALLBACK_DENOMINATOR)
}

/// Round a value to the nearest fraction displayable under `denominator_limit`
pub fn round_to_precision(value: f64, denominator_limit: u32) -> f64 {
    let den = f64::from(finest_denominator(denominator_limit));
    (value * den).round() / den
}

/// Format a decimal inch value as a whole-plus-fraction string (no unit mark).
///
/// The fraction uses the closest of the allowed denominators up to
/// `denominator_limit`, preferring the smaller denominator on ties, and is
/// reduced. A fraction that rounds up to one carries into the whole part.
pub fn format_fraction(value: f64, denominator_limit: u32) -> String {
    if value.abs() < ZERO_DISPLAY_EPSILON {
        return "0".to_string();
    }

    let mut denominators: Vec<u32> = ALLOWED_DENOMINATORS
        .iter()
        .copied()
        .filter(|d| *d <= denominator_limit)
        .collect();
    if denominators.is_empty() {
        denominators.push(FALLBACK_DENOMINATOR);
    }

    let magnitude = value.abs();
    let mut whole = magnitude.floor() as u64;
    let fraction = magnitude - whole as f64;

    let mut best_num = 0u64;
    let mut best_den = 1u64;
    let mut min_diff = fraction;
    for den in denominators {
        let den = u64::from(den);
        let num = ((fraction * den as f64).round() as u64).min(den);
        let diff = (fraction - num as f64 / den as f64).abs();
        if diff < min_diff - 1e-9 {
            min_diff = diff;
            best_num = num;
            best_den = den;
        }
    }

    let mut fraction_str = String::new();
    if best_num > 0 {
        let g = gcd(best_num, best_den);
        let (num, den) = (best_num / g, best_den / g);
        if num == den {
            whole += 1;
        } else {
            fraction_str = format!("{}/{}", num, den);
        }
    }

    let body = match (whole, fraction_str.is_empty()) {
        (0, true) => return "0".to_string(),
        (0, false) => fraction_str,
        (w, true) => w.to_string(),
        (w, false) => format!("{} {}", w, fraction_str),
    };

    if value < 0.0 {
        format!("-{}", body)
    } else {
        body
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> f64 {
        Measurement::parse("test", text).unwrap().inches()
    }

    #[test]
    fn test_parse_grammar_forms() {
        assert_eq!(parse("9.5"), 9.5);
        assert_eq!(parse("10"), 10.0);
        assert_eq!(parse("1/4"), 0.25);
        assert_eq!(parse("9 1/4"), 9.25);
        assert_eq!(parse("  108 "), 108.0);
    }

    #[test]
    fn test_parse_negative_values() {
        assert_eq!(parse("-3/8"), -0.375);
        assert_eq!(parse("-9 1/4"), -9.25);
        assert_eq!(parse("-0.5"), -0.5);
    }

    #[test]
    fn test_parse_rejects_malformed_text() {
        for bad in ["9 1a/4", "abc", "9.", ".5", "9  1/4", "1/4/2", "9 1/4\"", "9,5", "1e3", ""] {
            let err = Measurement::parse("tread_depth", bad).unwrap_err();
            assert_eq!(err.error_code(), "PARSE_ERROR", "input {:?}", bad);
            assert_eq!(err.field(), Some("tread_depth"));
        }
    }

    #[test]
    fn test_parse_rejects_zero_denominator() {
        assert!(matches!(
            Measurement::parse("x", "1/0"),
            Err(StairError::ParseError { .. })
        ));
        assert!(matches!(
            Measurement::parse("x", "9 3/0"),
            Err(StairError::ParseError { .. })
        ));
    }

    #[test]
    fn test_parse_centimeters() {
        let m = Measurement::parse_in("total_rise", "254", DisplayUnit::Centimeters).unwrap();
        assert!((m.inches() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_optional() {
        assert_eq!(Measurement::parse_optional("x", "   ", DisplayUnit::Inches).unwrap(), None);
        assert_eq!(
            Measurement::parse_optional("x", "1 1/2", DisplayUnit::Inches).unwrap(),
            Some(Measurement::from_inches(1.5))
        );
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("risers", "").unwrap(), None);
        assert_eq!(parse_count("risers", " 14 ").unwrap(), Some(14));
        assert_eq!(parse_count("risers", "1.5").unwrap_err().error_code(), "PARSE_ERROR");
        assert_eq!(
            parse_count("risers", "0").unwrap_err().error_code(),
            "MISSING_OR_INVALID_INPUT"
        );
        assert_eq!(
            parse_count("risers", "-2").unwrap_err().error_code(),
            "MISSING_OR_INVALID_INPUT"
        );
    }

    #[test]
    fn test_format_fraction() {
        assert_eq!(format_fraction(9.25, 16), "9 1/4");
        assert_eq!(format_fraction(0.5, 16), "1/2");
        assert_eq!(format_fraction(7.714_285_7, 16), "7 11/16");
        assert_eq!(format_fraction(10.0, 16), "10");
        assert_eq!(format_fraction(0.00005, 16), "0");
    }

    #[test]
    fn test_format_fraction_carries_into_whole() {
        assert_eq!(format_fraction(7.99, 16), "8");
        assert_eq!(format_fraction(-7.99, 16), "-8");
    }

    #[test]
    fn test_format_fraction_negative_and_limits() {
        assert_eq!(format_fraction(-0.375, 16), "-3/8");
        assert_eq!(format_fraction(-2.75, 16), "-2 3/4");
        assert_eq!(format_fraction(7.714_285_7, 4), "7 3/4");
        assert_eq!(format_fraction(0.015_625, 64), "1/64");
        // Below the smallest allowed denominator, fall back to sixteenths
        assert_eq!(format_fraction(0.0625, 1), "1/16");
    }

    #[test]
    fn test_round_to_precision() {
        assert_eq!(round_to_precision(7.714_285_7, 16), 7.6875);
        assert_eq!(round_to_precision(7.714_285_7, 8), 7.75);
        assert_eq!(round_to_precision(7.2, 64), 7.203125);
    }

    #[test]
    fn test_measurement_format() {
        let inches = MeasurementFormat::default();
        assert_eq!(inches.format(9.25), "9 1/4\"");

        let metric = MeasurementFormat {
            unit: DisplayUnit::Centimeters,
            denominator_limit: 16,
        };
        assert_eq!(metric.format(10.0), "25.4 cm");
    }

    #[test]
    fn test_marked_precision_follows_unit() {
        let inches = MeasurementFormat::default();
        assert_eq!(inches.marked(7.714_285_7), 7.6875);

        let metric = MeasurementFormat {
            unit: DisplayUnit::Centimeters,
            denominator_limit: 16,
        };
        // 7.714" = 195.94 mm, marked at 196 mm
        assert!((metric.marked(7.714_285_7) - 196.0 / 25.4).abs() < 1e-12);
    }
}
