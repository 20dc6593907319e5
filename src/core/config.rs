//! Arena configuration with documented constants
//!
//! All tunable values are collected here with explanations of their purpose
//! and how they interact with each other.

use crate::core::error::{ArenaError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for scoring and evolution
///
/// These values have been tuned to produce readable battle pacing.
/// Changing them will affect how quickly matches resolve and how often
/// combatants climb or drop evolution tiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    // === SCORING ===
    /// Half-width of the uniform momentum perturbation, as a fraction of the
    /// base magnitude
    ///
    /// At 0.2, a devastating action (base 20) is perturbed by up to ±4.
    /// The draw comes from the caller-supplied random source.
    pub variance_fraction: f64,

    /// Fraction of the attacker's raw momentum that lands on the defender
    /// as a loss, before defense scaling
    ///
    /// At 0.6, defense mitigates but never fully cancels a hit.
    pub mitigation_factor: f64,

    /// Baseline stat value around which power and defense scale
    ///
    /// A power of pivot+10 amplifies attacker gain by 10%; a defense of
    /// pivot+10 shrinks defender loss by the same proportion. Stats sit in
    /// [0, 100], so scaling factors stay within [0.5, 1.5].
    pub stat_pivot: i32,

    // === EVOLUTION ===
    /// Maximum turn count for a victory to count as domination
    ///
    /// Matches decided in this many resolved actions or fewer grant the
    /// winner an extra tier.
    pub domination_turn_limit: u32,

    /// Minimum final momentum for a victory to count as flawless
    pub flawless_momentum: i32,

    /// Maximum final momentum for a defeat to count as devastating
    pub devastation_momentum: i32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            // Scoring
            variance_fraction: 0.2,
            mitigation_factor: 0.6,
            stat_pivot: 50,

            // Evolution
            domination_turn_limit: 5,
            flawless_momentum: 80,
            devastation_momentum: 10,
        }
    }
}

impl ArenaConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a TOML file, falling back to defaults for any
    /// field the file omits
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ArenaConfig =
            toml::from_str(&content).map_err(|e| ArenaError::ConfigError(e.to_string()))?;
        config.validate().map_err(ArenaError::ConfigError)?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !(0.0..1.0).contains(&self.variance_fraction) {
            return Err(format!(
                "variance_fraction ({}) must be in [0, 1)",
                self.variance_fraction
            ));
        }

        if self.mitigation_factor <= 0.0 || self.mitigation_factor > 1.0 {
            return Err(format!(
                "mitigation_factor ({}) must be in (0, 1]",
                self.mitigation_factor
            ));
        }

        // Pivot must keep the scaling divisor positive for all stats in [0, 100]
        if self.stat_pivot <= 0 || self.stat_pivot >= 100 {
            return Err(format!(
                "stat_pivot ({}) must be strictly between 0 and 100",
                self.stat_pivot
            ));
        }

        if !(0..=100).contains(&self.flawless_momentum)
            || !(0..=100).contains(&self.devastation_momentum)
        {
            return Err("momentum thresholds must be within [0, 100]".into());
        }

        if self.devastation_momentum >= self.flawless_momentum {
            return Err(format!(
                "devastation_momentum ({}) should be < flawless_momentum ({})",
                self.devastation_momentum, self.flawless_momentum
            ));
        }

        Ok(())
    }
}
