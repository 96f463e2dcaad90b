//! # Stringer Layout
//!
//! Marking-out data for cutting a stringer from a resolved stair.
//!
//! Marks are measured along the stringer diagonal. The first (foot) mark is
//! at half a unit hypotenuse and each later riser is one unit further:
//!
//! ```text
//! unit  = √(riser² + tread²)
//! mark₁ = unit / 2
//! markₖ = mark₁ + (k - 1) × unit
//! ```
//!
//! The bottom riser is shortened by the tread thickness so the first step
//! comes out the same height as the others once the tread is fitted.

use serde::{Deserialize, Serialize};

use crate::calculations::resolver::StaircaseSpec;
use crate::units::{Inches, Millimeters};

/// Position of a riser mark on the stringer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkPosition {
    /// First riser at the bottom
    Foot,
    /// Riser between foot and head
    Intermediate,
    /// Last riser at the top
    Head,
}

/// One cumulative mark along the stringer diagonal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutMark {
    /// Riser number, 1-based from the bottom
    pub riser: u32,
    /// Foot, head or in between
    pub position: MarkPosition,
    /// Distance along the diagonal (in)
    pub cumulative_in: f64,
    /// Same distance (mm)
    pub cumulative_mm: f64,
}

/// Stringer marking-out table. Lengths in inches unless suffixed `_mm`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringerLayout {
    /// Diagonal of one step
    pub unit_hypotenuse_in: f64,
    /// Diagonal of one step (mm)
    pub unit_hypotenuse_mm: f64,
    /// Height to cut on the bottom riser: riser - tread thickness, never negative
    pub bottom_riser_height_in: f64,
    /// Height of the top riser
    pub top_riser_height_in: f64,
    /// Tread board thickness the bottom riser was reduced by
    pub tread_thickness_in: f64,
    /// One mark per riser, foot first
    pub marks: Vec<LayoutMark>,
}

impl StringerLayout {
    /// Build the marking-out table for a resolved stair.
    pub fn from_spec(spec: &StaircaseSpec, tread_thickness_in: f64) -> Self {
        let unit = spec.unit_hypotenuse_in();
        let foot = unit / 2.0;

        let marks = (1..=spec.riser_count)
            .map(|riser| {
                let cumulative_in = foot + f64::from(riser - 1) * unit;
                LayoutMark {
                    riser,
                    position: position_of(riser, spec.riser_count),
                    cumulative_in,
                    cumulative_mm: to_mm(cumulative_in),
                }
            })
            .collect();

        StringerLayout {
            unit_hypotenuse_in: unit,
            unit_hypotenuse_mm: to_mm(unit),
            bottom_riser_height_in: (spec.riser_height_in - tread_thickness_in).max(0.0),
            top_riser_height_in: spec.riser_height_in,
            tread_thickness_in,
            marks,
        }
    }

    /// Mark for the last riser
    pub fn head(&self) -> Option<&LayoutMark> {
        self.marks.last()
    }
}

fn position_of(riser: u32, riser_count: u32) -> MarkPosition {
    if riser == 1 {
        MarkPosition::Foot
    } else if riser == riser_count {
        MarkPosition::Head
    } else {
        MarkPosition::Intermediate
    }
}

fn to_mm(inches: f64) -> f64 {
    Millimeters::from(Inches(inches)).value()
}
