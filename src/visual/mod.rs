//! Visual and streaming collaborator surface
//!
//! The live-visual integration consumes a character prompt derived from the
//! setup descriptors plus an evolution-level appearance modifier. Its
//! connection status is reported back as an opaque enum for display only;
//! nothing here gates a battle transition.

use serde::{Deserialize, Serialize};

/// Connection status reported by the external streaming collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StreamStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    Streaming,
    Error,
}

/// Appearance modifier for an evolution level
///
/// Levels outside the valid band read as the nearest extreme.
pub fn evolution_descriptor(level: i8) -> &'static str {
    match level.clamp(-2, 2) {
        -2 => "broken and diminished, aura guttering out",
        -1 => "worn down, aura dimmed",
        0 => "at full fighting form",
        1 => "empowered, aura flaring bright",
        _ => "ascended, radiating overwhelming power",
    }
}

/// Build the presentation prompt for a combatant
///
/// The descriptors are opaque setup strings; empty ones are skipped so the
/// prompt never carries dangling separators.
pub fn character_prompt(character: &str, world: &str, evolution: i8) -> String {
    let mut parts: Vec<&str> = Vec::new();
    let character = character.trim();
    let world = world.trim();

    if !character.is_empty() {
        parts.push(character);
    }
    parts.push(evolution_descriptor(evolution));
    if !world.is_empty() {
        parts.push(world);
    }

    parts.join(", ")
}
