//! Maze system
//!
//! Rooms, corridor events, the adjacency-list graph, the organic map
//! generator and the lever puzzle.

mod corridor;
mod generation;
mod graph;
mod lever;
mod room;

pub use corridor::CorridorEvent;
pub use generation::{GenerationConfig, generate};
pub use graph::MazeGraph;
pub use lever::{LeverOutcome, LeverPuzzle};
pub use room::{LockId, Room, RoomId, RoomKind};
