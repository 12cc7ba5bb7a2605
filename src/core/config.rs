//! Simulation configuration
//!
//! Plane size, preset mode, optional seed and rule overrides. Can be built
//! in code or loaded from a TOML document:
//!
//! ```toml
//! width = 100
//! height = 100
//! mode = "advanced"
//! seed = 42
//!
//! [rules]
//! disaster_chance = 0.0
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{EcoError, Result};
use crate::rules::ruleset::{Mode, RulePatch};

/// Configuration for one ecosystem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Plane width (world units)
    pub width: f64,

    /// Plane height (world units)
    pub height: f64,

    /// Which rule preset the ecosystem is seeded from
    pub mode: Mode,

    /// Seed for the random event source. `None` draws from entropy.
    pub seed: Option<u64>,

    /// Overrides merged on top of the mode preset
    pub rules: RulePatch,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 100.0,
            mode: Mode::Basic,
            seed: None,
            rules: RulePatch::default(),
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(EcoError::InvalidConfig(format!(
                    "{} must be a positive finite number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SimulationConfig::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.mode, Mode::Basic);
        assert_eq!(config.width, 100.0);
    }

    #[test]
    fn test_from_toml_with_rules() {
        let config = SimulationConfig::from_toml_str(
            r#"
            width = 40.0
            mode = "advanced"
            seed = 9

            [rules]
            energyDecay = 0.5
            "#,
        )
        .unwrap();
        assert_eq!(config.width, 40.0);
        assert_eq!(config.height, 100.0);
        assert_eq!(config.mode, Mode::Advanced);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.rules.energy_decay, Some(0.5));
    }

    #[test]
    fn test_rejects_degenerate_plane() {
        let config = SimulationConfig {
            width: 0.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(EcoError::InvalidConfig(_))));
        assert!(SimulationConfig::from_toml_str("height = -3.0").is_err());
    }

    #[test]
    fn test_rejects_unknown_keys() {
        assert!(SimulationConfig::from_toml_str("depth = 3.0").is_err());
    }
}
