//! The battle state machine
//!
//! One `ArenaState` exists per match. It is mutated only by applying a
//! `Transition`; every other component reads it or hands a transition to
//! `apply`. Out-of-phase transitions are ignored rather than rejected so the
//! machine stays resilient to rapid duplicate events.

use serde::{Deserialize, Serialize};

use crate::arena::event::EventEntry;
use crate::arena::player::{PlayerState, PlayerStats};
use crate::core::types::PlayerId;
use crate::visual::{self, StreamStatus};

/// Coarse battle lifecycle stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Idle,
    Setup,
    Battle,
    Victory,
}

/// A requested state change, dispatched through `ArenaState::apply`
#[derive(Debug, Clone)]
pub enum Transition {
    /// Connection established; idle moves to setup
    Connect,
    /// Store a combatant's descriptors (pre-battle only)
    SetCharacter {
        player: PlayerId,
        character: String,
        world: String,
    },
    /// Mark one side ready; battle starts when both are
    CompleteSetup { player: PlayerId },
    /// Append a resolved action and apply its deltas
    ResolveAction { entry: EventEntry },
    /// Hand the turn to the other player
    SwitchActivePlayer,
    /// Freeze the match outcome
    DeclareWinner { winner: PlayerId },
    /// Write a post-battle evolution level (victory phase only)
    EvolvePlayer { player: PlayerId, level: i8 },
    /// New battle, same combatants: stats and log reset, identity and
    /// evolution kept
    Rematch,
    /// Full wipe back to the initial state
    ResetGame,
}

/// The canonical game state for one match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaState {
    pub phase: Phase,
    pub players: [PlayerState; 2],
    pub event_log: Vec<EventEntry>,
    pub active_player: PlayerId,
    pub winner: Option<PlayerId>,
    /// One resolution in flight at a time; owned by the orchestration layer
    pub is_processing: bool,
    pub connected: bool,
    pub ready: [bool; 2],
    /// Reported by the streaming collaborator, display only
    pub stream_status: StreamStatus,
}

impl Default for ArenaState {
    fn default() -> Self {
        Self::new()
    }
}

impl ArenaState {
    /// The initial idle state
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            players: [PlayerState::new(PlayerId::One), PlayerState::new(PlayerId::Two)],
            event_log: Vec::new(),
            active_player: PlayerId::One,
            winner: None,
            is_processing: false,
            connected: false,
            ready: [false, false],
            stream_status: StreamStatus::Disconnected,
        }
    }

    pub fn player(&self, id: PlayerId) -> &PlayerState {
        &self.players[id.index()]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut PlayerState {
        &mut self.players[id.index()]
    }

    /// Resolved actions so far; one action is one turn
    pub fn turn_count(&self) -> u32 {
        self.event_log.len() as u32
    }

    /// Apply a transition, returning whether the state changed
    ///
    /// Transitions requested in an incompatible phase return false and leave
    /// the state untouched.
    pub fn apply(&mut self, transition: Transition) -> bool {
        match transition {
            Transition::Connect => {
                let mut changed = false;
                if !self.connected {
                    self.connected = true;
                    changed = true;
                }
                if self.phase == Phase::Idle {
                    self.phase = Phase::Setup;
                    changed = true;
                }
                changed
            }

            Transition::SetCharacter {
                player,
                character,
                world,
            } => {
                if !matches!(self.phase, Phase::Idle | Phase::Setup) {
                    tracing::debug!(phase = ?self.phase, "ignoring SetCharacter outside setup");
                    return false;
                }
                let evolution = self.player(player).evolution;
                let prompt = visual::character_prompt(&character, &world, evolution);
                let state = self.player_mut(player);
                state.character = character;
                state.world = world;
                state.character_prompt = Some(prompt);
                true
            }

            Transition::CompleteSetup { player } => {
                if self.phase != Phase::Setup {
                    tracing::debug!(phase = ?self.phase, "ignoring CompleteSetup");
                    return false;
                }
                self.ready[player.index()] = true;
                if self.ready.iter().all(|r| *r) {
                    // Whoever finishes second flips the phase; the first
                    // turn always belongs to player 1
                    self.phase = Phase::Battle;
                    self.active_player = PlayerId::One;
                    tracing::info!("both sides ready, battle begins");
                }
                true
            }

            Transition::ResolveAction { entry } => {
                if self.phase != Phase::Battle || self.winner.is_some() {
                    tracing::debug!(phase = ?self.phase, "ignoring ResolveAction");
                    return false;
                }
                let attacker = entry.player;
                let defender = attacker.opponent();
                self.player_mut(attacker).stats.apply(&entry.attacker_deltas);
                self.player_mut(defender).stats.apply(&entry.defender_deltas);
                self.event_log.push(entry);
                true
            }

            Transition::SwitchActivePlayer => {
                if self.phase != Phase::Battle {
                    return false;
                }
                self.active_player = self.active_player.opponent();
                true
            }

            Transition::DeclareWinner { winner } => {
                if self.phase != Phase::Battle {
                    tracing::debug!(phase = ?self.phase, "ignoring DeclareWinner");
                    return false;
                }
                self.phase = Phase::Victory;
                self.winner = Some(winner);
                tracing::info!(%winner, turns = self.turn_count(), "battle decided");
                true
            }

            Transition::EvolvePlayer { player, level } => {
                if self.phase != Phase::Victory {
                    tracing::debug!(phase = ?self.phase, "ignoring EvolvePlayer");
                    return false;
                }
                self.player_mut(player).set_evolution(level);
                true
            }

            Transition::Rematch => {
                if self.phase != Phase::Victory {
                    tracing::debug!(phase = ?self.phase, "ignoring Rematch");
                    return false;
                }
                for player in &mut self.players {
                    player.reset_for_rematch();
                }
                self.event_log.clear();
                self.winner = None;
                self.is_processing = false;
                self.active_player = PlayerId::One;
                self.phase = Phase::Battle;
                true
            }

            Transition::ResetGame => {
                *self = ArenaState::new();
                true
            }
        }
    }

    /// Stats of both players, in id order
    pub fn stats_pair(&self) -> (PlayerStats, PlayerStats) {
        (self.players[0].stats, self.players[1].stats)
    }
}
