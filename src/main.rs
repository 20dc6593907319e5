//! Versus Arena - Entry Point
//!
//! Interactive duel loop: two players are set up from stdin, then free-text
//! actions are resolved one turn at a time. Narration is enriched through
//! the optional LLM narrator when configured, with a bounded wait and the
//! built-in pool as fallback.

use versus_arena::arena::state::{ArenaState, Phase, Transition};
use versus_arena::arena::{resolve_turn, TurnOutcome};
use versus_arena::core::config::ArenaConfig;
use versus_arena::core::error::Result;
use versus_arena::core::types::PlayerId;
use versus_arena::history::{BattleSummary, HistoryWriter};
use versus_arena::narrate::llm::{NarrationClient, NarrationRequest};

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tokio::runtime::Runtime;

/// Longest the loop waits on the external narrator
const NARRATION_WAIT: Duration = Duration::from_secs(3);

#[derive(Parser, Debug)]
#[command(name = "versus-arena", about = "Two-player battle arena resolved from free-text actions")]
struct Args {
    /// Seed for the battle random source (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Path of the battle history file
    #[arg(long, default_value = "battle_history.jsonl")]
    history: PathBuf,

    /// Optional TOML config overriding the scoring defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip the external narrator even when LLM_API_KEY is set
    #[arg(long)]
    no_narration: bool,
}

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("versus_arena=info")
        .init();

    let args = Args::parse();
    tracing::info!("Versus Arena starting...");

    let config = match &args.config {
        Some(path) => ArenaConfig::load_from_path(path)?,
        None => ArenaConfig::default(),
    };

    // Create the async runtime for narration calls
    let rt = Runtime::new()?;

    let mut rng = match args.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    // Try to create the narration client (optional - works without it)
    let narrator = if args.no_narration {
        None
    } else {
        NarrationClient::from_env().ok()
    };
    if narrator.is_none() {
        tracing::warn!("narrator disabled - using built-in narration pool");
    }

    let history = HistoryWriter::new(&args.history);
    let mut state = ArenaState::new();

    println!("\n=== VERSUS ARENA ===");
    println!("Two combatants, free-text actions, one winner");
    println!();
    print_help(&state);

    loop {
        print_status(&state);

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input == "quit" || input == "q" {
            break;
        }

        if input == "help" || input == "h" {
            print_help(&state);
            continue;
        }

        if input == "status" || input == "s" {
            print_detailed_status(&state);
            continue;
        }

        if input == "connect" {
            if state.apply(Transition::Connect) {
                println!("Connection established. Set both characters, then mark them ready.");
            }
            continue;
        }

        if let Some(rest) = input.strip_prefix("set ") {
            handle_set(&mut state, rest);
            continue;
        }

        if let Some(rest) = input.strip_prefix("ready ") {
            handle_ready(&mut state, rest);
            continue;
        }

        if input == "rematch" {
            if state.apply(Transition::Rematch) {
                println!("Rematch! Same combatants, fresh stats.");
            } else {
                println!("Rematch is only available after a victory.");
            }
            continue;
        }

        if input == "reset" {
            state.apply(Transition::ResetGame);
            println!("Arena reset.");
            continue;
        }

        // Anything else is an action for the active player
        if state.phase != Phase::Battle {
            println!("Unknown command. Type 'help' for the command list.");
            continue;
        }

        match resolve_turn(&mut state, input, None, &config, &mut rng) {
            Ok(outcome) => {
                report_turn(&rt, narrator.as_ref(), &state, &outcome, input);
                if outcome.winner.is_some() {
                    if let Some(evolutions) = &outcome.evolutions {
                        if let Some(summary) = BattleSummary::from_state(&state, evolutions) {
                            history.record(&summary);
                        }
                    }
                    println!("Type 'rematch' to run it back, or 'reset' to start over.");
                }
            }
            Err(e) => println!("Could not resolve action: {}", e),
        }
    }

    println!(
        "\nGoodbye! {} actions resolved this battle.",
        state.turn_count()
    );
    Ok(())
}

fn handle_set(state: &mut ArenaState, rest: &str) {
    let mut parts = rest.splitn(2, ' ');
    let player = parts
        .next()
        .and_then(|n| n.parse::<u8>().ok())
        .and_then(PlayerId::from_number);
    let Some(player) = player else {
        println!("Usage: set <1|2> <character> | <world>");
        return;
    };
    let Some(descriptor) = parts.next() else {
        println!("Usage: set <1|2> <character> | <world>");
        return;
    };

    let (character, world) = match descriptor.split_once('|') {
        Some((c, w)) => (c.trim().to_string(), w.trim().to_string()),
        None => (descriptor.trim().to_string(), String::new()),
    };

    if state.apply(Transition::SetCharacter {
        player,
        character,
        world,
    }) {
        let prompt = state
            .player(player)
            .character_prompt
            .as_deref()
            .unwrap_or("");
        println!("{} set: {}", player, prompt);
    } else {
        println!("Characters can only be set before the battle starts.");
    }
}

fn handle_ready(state: &mut ArenaState, rest: &str) {
    let player = rest
        .trim()
        .parse::<u8>()
        .ok()
        .and_then(PlayerId::from_number);
    let Some(player) = player else {
        println!("Usage: ready <1|2>");
        return;
    };

    if state.apply(Transition::CompleteSetup { player }) {
        if state.phase == Phase::Battle {
            println!("Both sides ready. Battle begins - player 1 acts first.");
        } else {
            println!("{} is ready.", player);
        }
    } else {
        println!("Ready only applies during setup (try 'connect' first).");
    }
}

/// Print the outcome of a resolved turn, preferring narrator text when it
/// arrives within the wait window
fn report_turn(
    rt: &Runtime,
    narrator: Option<&NarrationClient>,
    state: &ArenaState,
    outcome: &TurnOutcome,
    action_text: &str,
) {
    let attacker = outcome.entry.player;
    let defender = attacker.opponent();

    let line = narrator
        .and_then(|client| {
            let request = NarrationRequest {
                attacker_name: &state.player(attacker).name,
                defender_name: &state.player(defender).name,
                action_text,
                impact: outcome.entry.impact,
            };
            rt.block_on(async {
                tokio::time::timeout(NARRATION_WAIT, client.narrate(&request))
                    .await
                    .ok()
            })
            .and_then(|result| result.ok())
        })
        .unwrap_or_else(|| outcome.entry.narration.clone());

    println!();
    println!("[{}] {}", outcome.entry.impact.label().to_uppercase(), line);

    if let Some(winner) = outcome.winner {
        println!();
        println!("*** {} WINS in {} turns! ***", state.player(winner).name, state.turn_count());
        if let Some((winner_outcome, loser_outcome)) = &outcome.evolutions {
            for evo in [winner_outcome, loser_outcome] {
                let movement = if evo.changed {
                    format!("{} -> {}", evo.previous, evo.level)
                } else {
                    format!("holds at {}", evo.level)
                };
                println!(
                    "  {}: {} ({})",
                    state.player(evo.player).name,
                    movement,
                    evo.trigger.label()
                );
            }
        }
    }
}

fn print_help(state: &ArenaState) {
    println!("Commands:");
    println!("  connect               - Open the arena (idle -> setup)");
    println!("  set <1|2> <character> | <world>");
    println!("                        - Describe a combatant");
    println!("  ready <1|2>           - Mark one side ready; battle starts when both are");
    println!("  status / s            - Show detailed status");
    println!("  rematch               - After a victory: same combatants, fresh battle");
    println!("  reset                 - Full wipe back to idle");
    println!("  quit / q              - Exit");
    if state.phase == Phase::Battle {
        println!("  <any text>            - The active player's action");
    }
    println!();
}

fn print_status(state: &ArenaState) {
    println!();
    match state.phase {
        Phase::Idle => println!("--- Idle | type 'connect' to begin ---"),
        Phase::Setup => {
            let ready: Vec<String> = state
                .players
                .iter()
                .map(|p| {
                    format!(
                        "{}{}",
                        p.name,
                        if state.ready[p.id.index()] { " [ready]" } else { "" }
                    )
                })
                .collect();
            println!("--- Setup | {} ---", ready.join(" vs "));
        }
        Phase::Battle => {
            let p1 = &state.players[0];
            let p2 = &state.players[1];
            println!(
                "--- Turn {} | {} {} vs {} {} | acting: {} ---",
                state.turn_count() + 1,
                p1.name,
                p1.stats.momentum,
                p2.stats.momentum,
                p2.name,
                state.player(state.active_player).name
            );
        }
        Phase::Victory => {
            if let Some(winner) = state.winner {
                println!("--- Victory: {} ---", state.player(winner).name);
            }
        }
    }
}

fn print_detailed_status(state: &ArenaState) {
    println!();
    println!(
        "=== Arena (phase: {:?}, stream: {:?}) ===",
        state.phase, state.stream_status
    );
    for player in &state.players {
        println!("{}", player.name);
        if !player.character.is_empty() {
            println!("  Character: {}", player.character);
        }
        if !player.world.is_empty() {
            println!("  World: {}", player.world);
        }
        println!(
            "  Momentum {:>3} | Power {:>3} | Defense {:>3} | Energy {:>3}",
            player.stats.momentum, player.stats.power, player.stats.defense, player.stats.energy
        );
        println!("  Evolution: {:+}", player.evolution);
    }
    if !state.event_log.is_empty() {
        println!();
        println!("Recent actions:");
        for entry in state.event_log.iter().rev().take(5).rev() {
            println!(
                "  {} [{}] {}",
                entry.player,
                entry.impact.label(),
                entry.narration
            );
        }
    }
    println!();
}
