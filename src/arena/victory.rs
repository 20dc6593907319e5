//! Victory detection
//!
//! Pure predicate over both players' momentum, evaluated after every
//! resolved action. Rule order is fixed; the first matching rule wins even
//! if a single action lands both combatants on a boundary at once.

use crate::arena::player::PlayerStats;
use crate::core::types::PlayerId;

/// Momentum at or above this wins the match
pub const WIN_MOMENTUM: i32 = 100;
/// Momentum at or below this loses the match
pub const LOSS_MOMENTUM: i32 = 0;

/// Check both players' momentum for a decided match
pub fn evaluate_victory(p1: &PlayerStats, p2: &PlayerStats) -> Option<PlayerId> {
    if p1.momentum >= WIN_MOMENTUM {
        Some(PlayerId::One)
    } else if p2.momentum >= WIN_MOMENTUM {
        Some(PlayerId::Two)
    } else if p1.momentum <= LOSS_MOMENTUM {
        Some(PlayerId::Two)
    } else if p2.momentum <= LOSS_MOMENTUM {
        Some(PlayerId::One)
    } else {
        None
    }
}
