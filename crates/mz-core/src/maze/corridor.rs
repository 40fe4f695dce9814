//! Corridor events
//!
//! Typed, parameterized edge metadata. A corridor carries exactly one
//! event, shared by both traversal directions. Events are plain values;
//! relocation replaces the stored event wholesale instead of mutating it.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use super::room::LockId;

/// Effect triggered when traversing a corridor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CorridorEvent {
    /// Nothing happens. Also what queries report for a missing corridor:
    /// absence of an edge is indistinguishable from a safe edge.
    #[default]
    Safe,
    /// Impassable unless the agent holds the lock id.
    Locked(LockId),
    /// Pushes the agent back along its trail by up to this many rooms.
    MoveBack(u32),
    /// Costs the agent this many of its next turns.
    BlockTurn(u32),
    /// Grants the agent an immediate extra turn.
    ExtraTurn,
    /// Swaps the agent with a random other agent.
    SwapPosition,
}

impl CorridorEvent {
    /// Relocatable trap events, the ones `relocate_trap` moves.
    pub fn is_trap(self) -> bool {
        matches!(self, Self::MoveBack(_) | Self::BlockTurn(_))
    }

    pub fn is_safe(self) -> bool {
        self == Self::Safe
    }

    pub fn is_locked(self) -> bool {
        matches!(self, Self::Locked(_))
    }

    /// Whether an agent holding `unlocked` may traverse a corridor
    /// carrying this event. Only locks ever bar traversal; traps fire but
    /// do not block.
    pub fn passable_with(self, unlocked: &HashSet<LockId>) -> bool {
        match self {
            Self::Locked(id) => unlocked.contains(&id),
            _ => true,
        }
    }
}
