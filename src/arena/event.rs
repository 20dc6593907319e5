//! The battle event log
//!
//! Each resolved action becomes one immutable `EventEntry`. The log is
//! append-only and is the sole source for derived battle statistics.

use serde::{Deserialize, Serialize};

use crate::arena::player::StatDeltas;
use crate::core::types::PlayerId;
use crate::narrate::ImpactType;

/// Immutable record of one resolved action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEntry {
    /// Who acted
    pub player: PlayerId,
    /// Raw action text as submitted
    pub action_text: String,
    /// Narration shown for the outcome
    pub narration: String,
    /// Impact tier of the attacker's momentum delta
    pub impact: ImpactType,
    /// Deltas applied to the acting player
    pub attacker_deltas: StatDeltas,
    /// Deltas applied to the opponent
    pub defender_deltas: StatDeltas,
}

/// Statistics recomputed from the full event log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleReport {
    /// Sum of momentum knocked off defenders across the battle
    pub total_damage: i32,
    /// Number of critical-impact actions
    pub critical_count: u32,
    /// Longest streak of non-miss actions by a single player
    pub max_combo: u32,
}

impl BattleReport {
    pub fn from_log(log: &[EventEntry]) -> Self {
        let total_damage = log
            .iter()
            .map(|e| e.defender_deltas.momentum.min(0).abs())
            .sum();

        let critical_count = log
            .iter()
            .filter(|e| e.impact == ImpactType::Critical)
            .count() as u32;

        let mut max_combo = 0u32;
        for player in [PlayerId::One, PlayerId::Two] {
            let mut streak = 0u32;
            for entry in log.iter().filter(|e| e.player == player) {
                if entry.impact == ImpactType::Miss {
                    streak = 0;
                } else {
                    streak += 1;
                    max_combo = max_combo.max(streak);
                }
            }
        }

        Self {
            total_damage,
            critical_count,
            max_combo,
        }
    }
}
