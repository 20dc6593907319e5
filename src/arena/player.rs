//! Combatant stats and per-player state

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::types::PlayerId;
use crate::evolution::{LEVEL_MAX, LEVEL_MIN};

/// Lower bound for every stat field
pub const STAT_MIN: i32 = 0;
/// Upper bound for every stat field
pub const STAT_MAX: i32 = 100;

/// The four bounded battle stats
///
/// Momentum is the win/lose axis: reaching 100 wins, reaching 0 loses.
/// Every field stays within [0, 100]; `apply` is the only mutation point
/// during battle and clamps both written fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub momentum: i32,
    pub power: i32,
    pub defense: i32,
    pub energy: i32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            momentum: 50,
            power: 50,
            defense: 50,
            energy: 100,
        }
    }
}

/// Signed per-side deltas actually handed to a stats mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatDeltas {
    pub momentum: i32,
    pub energy: i32,
}

impl PlayerStats {
    /// Apply a delta set, clamping every written field to [0, 100]
    pub fn apply(&mut self, deltas: &StatDeltas) {
        self.momentum = (self.momentum + deltas.momentum).clamp(STAT_MIN, STAT_MAX);
        self.energy = (self.energy + deltas.energy).clamp(STAT_MIN, STAT_MAX);
    }
}

/// One combatant's full state
///
/// Identity and descriptors are populated during setup and frozen once the
/// battle starts. Stats mutate once per resolved action; the evolution level
/// mutates once per completed battle. The streaming fields belong to the
/// external video collaborator and never gate battle logic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub id: PlayerId,
    pub name: String,
    pub character: String,
    pub world: String,
    pub character_prompt: Option<String>,
    pub stats: PlayerStats,
    pub evolution: i8,
    pub stream_id: Option<Uuid>,
    pub is_streaming: bool,
}

impl PlayerState {
    /// Empty player, as it exists in the idle phase
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            name: format!("Player {}", id.number()),
            character: String::new(),
            world: String::new(),
            character_prompt: None,
            stats: PlayerStats::default(),
            evolution: 0,
            stream_id: None,
            is_streaming: false,
        }
    }

    /// Reset for a rematch: fresh stats, identity and evolution kept
    pub fn reset_for_rematch(&mut self) {
        self.stats = PlayerStats::default();
    }

    /// Write a new evolution level, clamped to the valid band
    pub fn set_evolution(&mut self, level: i8) {
        self.evolution = level.clamp(LEVEL_MIN, LEVEL_MAX);
    }
}
