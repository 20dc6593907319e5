//! Impact tiers and battle narration
//!
//! The impact tier is derived from the attacker's momentum delta through
//! fixed thresholds. Narration comes from a built-in pool per tier; an
//! external narrator may supply richer text, but the pool guarantees every
//! resolved action carries a non-empty line.

pub mod llm;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Discrete classification of an action's momentum effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImpactType {
    Critical,
    Strong,
    Normal,
    Weak,
    Miss,
}

impl ImpactType {
    /// Map an attacker momentum delta to a tier
    ///
    /// Thresholds are evaluated top-down, first match wins.
    pub fn from_momentum_delta(delta: i32) -> Self {
        if delta >= 18 {
            ImpactType::Critical
        } else if delta >= 12 {
            ImpactType::Strong
        } else if delta >= 6 {
            ImpactType::Normal
        } else if delta >= 3 {
            ImpactType::Weak
        } else {
            ImpactType::Miss
        }
    }

    /// Human-readable tier label
    pub fn label(&self) -> &'static str {
        match self {
            ImpactType::Critical => "critical",
            ImpactType::Strong => "strong",
            ImpactType::Normal => "normal",
            ImpactType::Weak => "weak",
            ImpactType::Miss => "miss",
        }
    }
}

const CRITICAL_LINES: &[&str] = &[
    "A thunderous blow lands clean and the whole arena shakes!",
    "Perfect execution! The strike connects with devastating force!",
    "An opening found, and punished without mercy!",
    "The crowd gasps as the hit lands square!",
];

const STRONG_LINES: &[&str] = &[
    "A heavy hit drives the opponent back!",
    "The attack breaks through and connects hard!",
    "Solid contact! The opponent staggers!",
    "A fierce exchange ends badly for the defender!",
];

const NORMAL_LINES: &[&str] = &[
    "The attack lands, doing steady damage.",
    "A clean hit keeps the pressure on.",
    "The opponent absorbs the blow and resets.",
    "Contact made, nothing spectacular.",
];

const WEAK_LINES: &[&str] = &[
    "A glancing blow, barely felt.",
    "The attack connects, but without conviction.",
    "More noise than damage on that one.",
    "The opponent shrugs it off.",
];

const MISS_LINES: &[&str] = &[
    "The attack sails wide of the mark.",
    "Nothing there! The opponent slips away untouched.",
    "A swing and a miss.",
    "The effort fizzles out before it connects.",
];

fn pool_for(impact: ImpactType) -> &'static [&'static str] {
    match impact {
        ImpactType::Critical => CRITICAL_LINES,
        ImpactType::Strong => STRONG_LINES,
        ImpactType::Normal => NORMAL_LINES,
        ImpactType::Weak => WEAK_LINES,
        ImpactType::Miss => MISS_LINES,
    }
}

/// Pick a narration line for the tier, uniformly from the built-in pool
pub fn fallback_narration(impact: ImpactType, rng: &mut impl Rng) -> &'static str {
    let pool = pool_for(impact);
    pool[rng.gen_range(0..pool.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_thresholds_top_down() {
        assert_eq!(ImpactType::from_momentum_delta(30), ImpactType::Critical);
        assert_eq!(ImpactType::from_momentum_delta(18), ImpactType::Critical);
        assert_eq!(ImpactType::from_momentum_delta(17), ImpactType::Strong);
        assert_eq!(ImpactType::from_momentum_delta(12), ImpactType::Strong);
        assert_eq!(ImpactType::from_momentum_delta(11), ImpactType::Normal);
        assert_eq!(ImpactType::from_momentum_delta(6), ImpactType::Normal);
        assert_eq!(ImpactType::from_momentum_delta(5), ImpactType::Weak);
        assert_eq!(ImpactType::from_momentum_delta(3), ImpactType::Weak);
        assert_eq!(ImpactType::from_momentum_delta(2), ImpactType::Miss);
        assert_eq!(ImpactType::from_momentum_delta(0), ImpactType::Miss);
        assert_eq!(ImpactType::from_momentum_delta(-5), ImpactType::Miss);
    }

    #[test]
    fn test_full_strength_hit_is_critical() {
        // An unmitigated gain of 20 clears the top threshold
        assert_eq!(ImpactType::from_momentum_delta(20), ImpactType::Critical);
    }

    #[test]
    fn test_every_tier_narrates() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        for impact in [
            ImpactType::Critical,
            ImpactType::Strong,
            ImpactType::Normal,
            ImpactType::Weak,
            ImpactType::Miss,
        ] {
            let line = fallback_narration(impact, &mut rng);
            assert!(!line.is_empty());
        }
    }

    #[test]
    fn test_pool_pick_stays_in_pool() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..20 {
            let line = fallback_narration(ImpactType::Critical, &mut rng);
            assert!(CRITICAL_LINES.contains(&line));
        }
    }
}
