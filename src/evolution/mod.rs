//! Post-battle evolution
//!
//! Runs once after a winner is declared. Deterministic: no randomness, only
//! the final stats and the turn count. Levels persist across battles and
//! move by one per trigger, clamped to the [-2, 2] band.

use serde::{Deserialize, Serialize};

use crate::core::config::ArenaConfig;
use crate::core::types::PlayerId;

/// Floor of the evolution band
pub const LEVEL_MIN: i8 = -2;
/// Ceiling of the evolution band
pub const LEVEL_MAX: i8 = 2;

/// Why a level moved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvolutionTrigger {
    Victory,
    DominationVictory,
    FlawlessVictory,
    Defeat,
    DevastatingDefeat,
}

impl EvolutionTrigger {
    pub fn label(&self) -> &'static str {
        match self {
            EvolutionTrigger::Victory => "Victory",
            EvolutionTrigger::DominationVictory => "Domination victory",
            EvolutionTrigger::FlawlessVictory => "Flawless victory",
            EvolutionTrigger::Defeat => "Defeat",
            EvolutionTrigger::DevastatingDefeat => "Devastating defeat",
        }
    }
}

/// Result of evolving one combatant
///
/// `trigger` is the last trigger that actually moved the level; when the cap
/// or floor nullified every step, it stays at the base trigger with
/// `changed` false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionOutcome {
    pub player: PlayerId,
    pub previous: i8,
    pub level: i8,
    pub changed: bool,
    pub trigger: EvolutionTrigger,
}

/// Evolve the winner
///
/// Base +1 for the victory, +1 more for a short match, +1 more for finishing
/// with high momentum. Each bonus applies only while still below the cap, so
/// a dominant flawless win can climb up to three levels.
pub fn evolve_winner(
    player: PlayerId,
    level: i8,
    final_momentum: i32,
    turns: u32,
    config: &ArenaConfig,
) -> EvolutionOutcome {
    let previous = level.clamp(LEVEL_MIN, LEVEL_MAX);
    let mut level = previous;
    let mut trigger = EvolutionTrigger::Victory;

    if level < LEVEL_MAX {
        level += 1;
    }
    if turns <= config.domination_turn_limit && level < LEVEL_MAX {
        level += 1;
        trigger = EvolutionTrigger::DominationVictory;
    }
    if final_momentum >= config.flawless_momentum && level < LEVEL_MAX {
        level += 1;
        trigger = EvolutionTrigger::FlawlessVictory;
    }

    let level = level.clamp(LEVEL_MIN, LEVEL_MAX);
    EvolutionOutcome {
        player,
        previous,
        level,
        changed: level != previous,
        trigger,
    }
}

/// Evolve the loser
///
/// Base -1 for the defeat, -1 more for being left with almost no momentum.
pub fn evolve_loser(
    player: PlayerId,
    level: i8,
    final_momentum: i32,
    config: &ArenaConfig,
) -> EvolutionOutcome {
    let previous = level.clamp(LEVEL_MIN, LEVEL_MAX);
    let mut level = previous;
    let mut trigger = EvolutionTrigger::Defeat;

    if level > LEVEL_MIN {
        level -= 1;
    }
    if final_momentum <= config.devastation_momentum && level > LEVEL_MIN {
        level -= 1;
        trigger = EvolutionTrigger::DevastatingDefeat;
    }

    let level = level.clamp(LEVEL_MIN, LEVEL_MAX);
    EvolutionOutcome {
        player,
        previous,
        level,
        changed: level != previous,
        trigger,
    }
}
