//! # Stair Calculations
//!
//! Every calculation follows the same pattern:
//!
//! - `*Input` - raw parameters (JSON-serializable)
//! - a resolved or checked result type (JSON-serializable)
//! - a pure function from one to the other, returning `StairResult` where it can fail
//!
//! ## Available Calculations
//!
//! - [`resolver`] - riser/tread counts and heights from raw fields
//! - [`conformity`] - rule checks against the regulatory thresholds
//! - [`layout`] - stringer marking-out table
//! - [`stair`] - all three in one call

pub mod conformity;
pub mod layout;
pub mod resolver;
pub mod stair;

// Re-export commonly used types
pub use conformity::{check, ConformityReport, Rule, RuleCheck, RuleStatus, SiteGeometry};
pub use layout::{LayoutMark, MarkPosition, StringerLayout};
pub use resolver::{resolve, EditedField, ResolverInput, RiserCountSource, StaircaseSpec, TreadDepthSource};
pub use stair::{calculate, StairCalculation, StairInput};
