use serde::{Deserialize, Serialize};

/// Annual rate, in percent, used to derive the proposed EMI when none is supplied.
pub const DEFAULT_ANNUAL_RATE: f64 = 12.0;

/// Policy dials for the scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityConfig {
    pub default_annual_rate: f64,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            default_annual_rate: DEFAULT_ANNUAL_RATE,
        }
    }
}
