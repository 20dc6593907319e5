//! Turn orchestration
//!
//! Drives one full resolution: classify the text, score it, pick the impact
//! tier and narration, feed the entry through the state machine, then either
//! declare the winner and evolve both sides or hand the turn over. Exactly
//! one resolution may be in flight per match.

use rand::Rng;

use crate::arena::event::EventEntry;
use crate::arena::player::StatDeltas;
use crate::arena::state::{ArenaState, Phase, Transition};
use crate::arena::victory::evaluate_victory;
use crate::classify::classify_action;
use crate::core::config::ArenaConfig;
use crate::core::error::{ArenaError, Result};
use crate::core::types::PlayerId;
use crate::evolution::{evolve_loser, evolve_winner, EvolutionOutcome};
use crate::narrate::{fallback_narration, ImpactType};
use crate::scoring::score_action;

/// Everything one resolved turn produced
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// The entry appended to the event log
    pub entry: EventEntry,
    pub winner: Option<PlayerId>,
    /// Winner outcome first, loser second; present only when the turn
    /// decided the match
    pub evolutions: Option<(EvolutionOutcome, EvolutionOutcome)>,
}

/// Resolve one action for the active player
///
/// `narration` carries text from the external narrator when it answered in
/// time; the built-in pool covers every other case. The ordering is fixed:
/// resolve, check victory, then either declare the winner or switch the
/// turn, so a winning blow never also hands the turn away.
pub fn resolve_turn(
    state: &mut ArenaState,
    action_text: &str,
    narration: Option<String>,
    config: &ArenaConfig,
    rng: &mut impl Rng,
) -> Result<TurnOutcome> {
    if state.phase != Phase::Battle {
        return Err(ArenaError::InvalidPhase("resolve action".into()));
    }
    if state.is_processing {
        return Err(ArenaError::ResolutionInFlight);
    }
    if action_text.trim().is_empty() {
        return Err(ArenaError::EmptyAction);
    }

    state.is_processing = true;

    let attacker = state.active_player;
    let defender = attacker.opponent();
    let class = classify_action(action_text);
    let deltas = score_action(
        &class,
        &state.player(attacker).stats,
        &state.player(defender).stats,
        config,
        rng,
    );
    let impact = ImpactType::from_momentum_delta(deltas.attacker_momentum);
    let narration =
        narration.unwrap_or_else(|| fallback_narration(impact, rng).to_string());

    tracing::debug!(
        %attacker,
        kind = ?class.kind,
        intensity = ?class.intensity,
        impact = impact.label(),
        momentum = deltas.attacker_momentum,
        "action resolved"
    );

    let entry = EventEntry {
        player: attacker,
        action_text: action_text.to_string(),
        narration,
        impact,
        attacker_deltas: StatDeltas {
            momentum: deltas.attacker_momentum,
            energy: deltas.attacker_energy,
        },
        defender_deltas: StatDeltas {
            momentum: deltas.defender_momentum,
            energy: 0,
        },
    };

    state.apply(Transition::ResolveAction {
        entry: entry.clone(),
    });

    let (p1, p2) = state.stats_pair();
    let winner = evaluate_victory(&p1, &p2);

    let evolutions = match winner {
        Some(winner_id) => {
            state.apply(Transition::DeclareWinner { winner: winner_id });

            let loser_id = winner_id.opponent();
            let turns = state.turn_count();
            let winner_outcome = evolve_winner(
                winner_id,
                state.player(winner_id).evolution,
                state.player(winner_id).stats.momentum,
                turns,
                config,
            );
            let loser_outcome = evolve_loser(
                loser_id,
                state.player(loser_id).evolution,
                state.player(loser_id).stats.momentum,
                config,
            );
            state.apply(Transition::EvolvePlayer {
                player: winner_id,
                level: winner_outcome.level,
            });
            state.apply(Transition::EvolvePlayer {
                player: loser_id,
                level: loser_outcome.level,
            });

            Some((winner_outcome, loser_outcome))
        }
        None => {
            state.apply(Transition::SwitchActivePlayer);
            None
        }
    };

    state.is_processing = false;

    Ok(TurnOutcome {
        entry,
        winner,
        evolutions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn battle_state() -> ArenaState {
        let mut state = ArenaState::new();
        state.apply(Transition::Connect);
        state.apply(Transition::CompleteSetup {
            player: PlayerId::One,
        });
        state.apply(Transition::CompleteSetup {
            player: PlayerId::Two,
        });
        state
    }

    #[test]
    fn test_turn_appends_entry_and_switches() {
        let mut state = battle_state();
        let config = ArenaConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let outcome =
            resolve_turn(&mut state, "jabs at the ribs", None, &config, &mut rng).unwrap();

        assert_eq!(outcome.winner, None);
        assert_eq!(state.event_log.len(), 1);
        assert_eq!(state.active_player, PlayerId::Two);
        assert!(!state.is_processing);
        assert!(!outcome.entry.narration.is_empty());
    }

    #[test]
    fn test_rejects_outside_battle() {
        let mut state = ArenaState::new();
        let config = ArenaConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let result = resolve_turn(&mut state, "punch", None, &config, &mut rng);
        assert!(matches!(result, Err(ArenaError::InvalidPhase(_))));
    }

    #[test]
    fn test_rejects_while_processing() {
        let mut state = battle_state();
        state.is_processing = true;
        let config = ArenaConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let result = resolve_turn(&mut state, "punch", None, &config, &mut rng);
        assert!(matches!(result, Err(ArenaError::ResolutionInFlight)));
    }

    #[test]
    fn test_rejects_blank_text() {
        let mut state = battle_state();
        let config = ArenaConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let result = resolve_turn(&mut state, "   ", None, &config, &mut rng);
        assert!(matches!(result, Err(ArenaError::EmptyAction)));
    }

    #[test]
    fn test_external_narration_wins_over_pool() {
        let mut state = battle_state();
        let config = ArenaConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let outcome = resolve_turn(
            &mut state,
            "swings a chair",
            Some("The chair splinters across the arena!".into()),
            &config,
            &mut rng,
        )
        .unwrap();

        assert_eq!(
            outcome.entry.narration,
            "The chair splinters across the arena!"
        );
    }

    #[test]
    fn test_winning_blow_keeps_the_turn() {
        let mut state = battle_state();
        state.player_mut(PlayerId::Two).stats.momentum = 5;
        let config = ArenaConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        // A devastating special knocks at least 10 off the defender
        let outcome = resolve_turn(
            &mut state,
            "unleash the ultimate devastating cosmic storm",
            None,
            &config,
            &mut rng,
        )
        .unwrap();

        assert_eq!(outcome.winner, Some(PlayerId::One));
        assert_eq!(state.phase, Phase::Victory);
        // The turn never switched away from the winner
        assert_eq!(state.active_player, PlayerId::One);
        let (winner_outcome, loser_outcome) = outcome.evolutions.unwrap();
        assert_eq!(winner_outcome.player, PlayerId::One);
        assert!(winner_outcome.level >= 1);
        assert!(loser_outcome.level <= -1);
    }
}
