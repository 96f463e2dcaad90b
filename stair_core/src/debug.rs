//! # Debug Context
//!
//! Explicit switch for step-by-step tracing of a calculation. The caller
//! decides per call whether the intermediate values are logged; there is no
//! process-wide debug flag.
//!
//! ```rust
//! use stair_core::debug::DebugContext;
//!
//! let quiet = DebugContext::default();
//! assert!(!quiet.is_enabled());
//! let verbose = DebugContext::enabled();
//! verbose.step("resolve", "riser count from desired height");
//! ```

use serde::{Deserialize, Serialize};

/// Per-call debug switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DebugContext {
    enabled: bool,
}

impl DebugContext {
    /// A context that emits trace events
    pub fn enabled() -> Self {
        DebugContext { enabled: true }
    }

    /// A context that stays silent
    pub fn disabled() -> Self {
        DebugContext { enabled: false }
    }

    /// Whether step events are emitted
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Emit one calculation step as a `tracing` debug event
    pub fn step(&self, stage: &str, detail: impl AsRef<str>) {
        if self.enabled {
            tracing::debug!(stage, "{}", detail.as_ref());
        }
    }
}

impl From<bool> for DebugContext {
    fn from(enabled: bool) -> Self {
        DebugContext { enabled }
    }
}
