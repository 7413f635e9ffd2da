//! Machine configuration.

use serde::Deserialize;

/// Default bound on the number of steps a single run may take.
pub const DEFAULT_STEP_LIMIT: u64 = 1_000_000;

/// How `/` rounds a non-exact quotient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DivisionMode {
    /// Round toward negative infinity: `-7 / 2 == -4`.
    #[default]
    Floor,
    /// Round toward zero: `-7 / 2 == -3`.
    Truncate,
}

/// Tunables for a [`Machine`](crate::Machine) run.
///
/// Deserialises from JSON; omitted fields take their defaults:
///
/// ```json
/// { "step_limit": 500, "division": "truncate" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MachineConfig {
    /// Maximum number of steps before the run fails.
    pub step_limit: u64,
    pub division: DivisionMode,
}

impl MachineConfig {
    /// Parse a configuration from a JSON document.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            step_limit: DEFAULT_STEP_LIMIT,
            division: DivisionMode::Floor,
        }
    }
}
