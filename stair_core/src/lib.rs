//! # stair_core - Straight Stair Calculation Engine
//!
//! `stair_core` sizes a straight residential stair from a handful of raw
//! measurements and checks it against building-code limits. All inputs and
//! outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **Explicit context**: Thresholds, preferences and debug switches are parameters, never globals
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use stair_core::{calculate, DebugContext, EditedField, RegulatoryThresholds, StairInput, UserPreferences};
//!
//! let input = StairInput {
//!     total_rise: "108".to_string(),
//!     desired_riser_height: "7 1/2".to_string(),
//!     desired_tread_depth: "9 1/4".to_string(),
//!     edited: EditedField::DesiredRiserHeight,
//!     ..Default::default()
//! };
//!
//! let result = calculate(
//!     &input,
//!     &RegulatoryThresholds::default(),
//!     &UserPreferences::default(),
//!     DebugContext::default(),
//! ).unwrap();
//! assert_eq!(result.spec.riser_count, 14);
//!
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Resolver, conformity checks and stringer layout
//! - [`measurement`] - Measurement grammar and fraction display
//! - [`thresholds`] - Regulatory limits and their TOML override
//! - [`preferences`] - Persisted user defaults
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - Preference file with atomic saves and locking
//! - [`debug`] - Per-call debug tracing switch

pub mod calculations;
pub mod debug;
pub mod errors;
pub mod file_io;
pub mod measurement;
pub mod preferences;
pub mod thresholds;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{
    calculate, check, resolve, ConformityReport, EditedField, RuleStatus, StairCalculation, StairInput, StaircaseSpec,
};
pub use debug::DebugContext;
pub use errors::{StairError, StairResult};
pub use file_io::{load_or_default, load_preferences, save_preferences};
pub use measurement::{Measurement, MeasurementFormat};
pub use preferences::UserPreferences;
pub use thresholds::RegulatoryThresholds;
pub use units::DisplayUnit;
