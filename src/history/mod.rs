//! Battle history persistence
//!
//! After each decided battle an immutable summary is appended to a JSON
//! lines file. Persistence is a collaborator, not a dependency: a failed
//! write is logged and swallowed, and the in-memory match is unaffected.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::arena::event::BattleReport;
use crate::arena::player::PlayerStats;
use crate::arena::state::ArenaState;
use crate::core::types::PlayerId;
use crate::evolution::EvolutionOutcome;

/// Errors that can occur when writing history
#[derive(Debug, Error)]
pub enum HistoryError {
    /// JSON encoding failed
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    /// File I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// One combatant's final line in a summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub name: String,
    pub character: String,
    pub final_stats: PlayerStats,
    pub evolution: i8,
}

/// Immutable record of one finished battle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleSummary {
    pub battle_id: Uuid,
    pub winner: PlayerId,
    pub turns: u32,
    pub players: [PlayerSummary; 2],
    pub report: BattleReport,
    pub evolutions: Vec<EvolutionOutcome>,
}

impl BattleSummary {
    /// Build a summary from a decided match
    ///
    /// Returns None while no winner is set.
    pub fn from_state(
        state: &ArenaState,
        evolutions: &(EvolutionOutcome, EvolutionOutcome),
    ) -> Option<Self> {
        let winner = state.winner?;
        let players = [PlayerId::One, PlayerId::Two].map(|id| {
            let player = state.player(id);
            PlayerSummary {
                name: player.name.clone(),
                character: player.character.clone(),
                final_stats: player.stats,
                evolution: player.evolution,
            }
        });

        Some(Self {
            battle_id: Uuid::new_v4(),
            winner,
            turns: state.turn_count(),
            players,
            report: BattleReport::from_log(&state.event_log),
            evolutions: vec![evolutions.0, evolutions.1],
        })
    }
}

/// Appends battle summaries to a JSON lines file
pub struct HistoryWriter {
    path: PathBuf,
}

impl HistoryWriter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn append(&self, summary: &BattleSummary) -> Result<(), HistoryError> {
        let line = serde_json::to_string(summary)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)?;
        Ok(())
    }

    /// Record a summary, swallowing any write failure
    pub fn record(&self, summary: &BattleSummary) {
        match self.append(summary) {
            Ok(()) => {
                tracing::debug!(battle_id = %summary.battle_id, "battle recorded");
            }
            Err(e) => {
                tracing::warn!(error = %e, path = %self.path.display(), "history write failed");
            }
        }
    }
}
