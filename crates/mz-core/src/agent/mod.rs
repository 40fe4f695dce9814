//! Traversing agents
//!
//! Agent state (position, held unlocks, penalty bookkeeping) and the bot
//! decision layer. The engine treats human-driven and bot agents
//! identically except that bots ask the pathfinder for their moves.

mod pathfind;

pub use pathfind::next_step;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::consts::TRAIL_DEPTH;
use crate::maze::{LockId, RoomId};

/// One traversing entity, human-driven or bot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub name: String,
    pub position: RoomId,
    /// Bot agents ask the pathfinder for moves; other agents are driven
    /// externally.
    pub is_bot: bool,
    /// Turns this agent must sit out before moving again.
    pub blocked_turns: u32,
    /// An ExtraTurn corridor granted a turn that has not been taken yet.
    pub extra_turn: bool,
    /// The agent stands on the goal room.
    pub finished: bool,
    /// Lock ids this agent has opened. Grows monotonically and is scoped
    /// to this agent only.
    unlocked: HashSet<LockId>,
    /// Recently visited rooms, newest last; consumed by MoveBack traps.
    trail: Vec<RoomId>,
}

impl Agent {
    pub fn new(name: impl Into<String>, position: RoomId, is_bot: bool) -> Self {
        Self {
            name: name.into(),
            position,
            is_bot,
            blocked_turns: 0,
            extra_turn: false,
            finished: false,
            unlocked: HashSet::new(),
            trail: Vec::new(),
        }
    }

    /// Add `lock` to the held set. Returns false when the lock was already
    /// open; re-opening is a no-op.
    pub fn unlock(&mut self, lock: LockId) -> bool {
        self.unlocked.insert(lock)
    }

    pub fn has_unlocked(&self, lock: LockId) -> bool {
        self.unlocked.contains(&lock)
    }

    pub fn unlocked(&self) -> &HashSet<LockId> {
        &self.unlocked
    }

    /// Record `room` as the most recent trail entry, keeping the trail
    /// bounded.
    pub fn record_visit(&mut self, room: RoomId) {
        self.trail.push(room);
        if self.trail.len() > TRAIL_DEPTH {
            self.trail.remove(0);
        }
    }

    /// Pop the most recent trail entry, if any.
    pub fn step_back(&mut self) -> Option<RoomId> {
        self.trail.pop()
    }
}
