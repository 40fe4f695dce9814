//! Room identity and categories
//!
//! Rooms live in the graph's arena; a `RoomId` is the insertion index and
//! stays valid for the life of the graph. Rooms are created by the
//! generator or the loader and never destroyed; after creation they are
//! mutated only to attach a lever or bind its lock id.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::lever::LeverPuzzle;

/// Stable handle to a room in the graph's arena.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct RoomId(pub usize);

impl RoomId {
    /// The underlying arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Integer key linking a Locked corridor to the lever room that opens it.
pub type LockId = u32;

/// Room categories
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum RoomKind {
    /// Starting room attached at the maze edge
    Entrance,
    /// Ordinary room
    #[default]
    Normal,
    /// Room posing a riddle (riddle content lives in the front end)
    PuzzleRoom,
    /// Room holding a three-slot lever mechanism
    LeverRoom,
    /// The room every agent is trying to reach
    GoalRoom,
}

/// A single maze location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Category of this room
    pub kind: RoomKind,
    /// Lever mechanism, created lazily on first visit to a lever room.
    /// At most one per room; it persists for the room's lifetime.
    pub lever: Option<LeverPuzzle>,
    /// Lock id this room's lever opens, bound once by the generator or
    /// loader.
    pub unlocks: Option<LockId>,
}

impl Room {
    /// Create a room of the given kind with no lever binding.
    pub fn new(kind: RoomKind) -> Self {
        Self {
            kind,
            lever: None,
            unlocks: None,
        }
    }

    /// Create a lever room pre-bound to open `lock`.
    pub fn lever_room(lock: LockId) -> Self {
        Self {
            kind: RoomKind::LeverRoom,
            lever: None,
            unlocks: Some(lock),
        }
    }
}
