//! Map persistence
//!
//! JSON import and export of a maze graph. The guarantee the format makes
//! is behavioral: a loaded graph has the same rooms, the same neighbor
//! sets and the same corridor events as the graph that was saved (per-room
//! neighbor order may differ, since corridors reload in canonical order).
//! Corridors are
//! stored once per undirected pair and re-registered in both directions on
//! load, so the symmetry invariant cannot be violated by a save file.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::maze::{
    CorridorEvent, LeverOutcome, LeverPuzzle, LockId, MazeGraph, Room, RoomId, RoomKind,
};

/// Errors loading a saved maze.
#[derive(Error, Debug)]
pub enum SaveError {
    #[error("corridor references room {room} but only {rooms} rooms exist")]
    RoomOutOfRange { room: usize, rooms: usize },

    #[error("corridor {a}-{b} is listed more than once")]
    DuplicateCorridor { a: usize, b: usize },

    #[error("corridor from room {room} to itself")]
    SelfCorridor { room: usize },

    #[error("lever slots of room {room} are not a permutation of the three outcomes")]
    BadLever { room: usize },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// One room as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedRoom {
    pub kind: RoomKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlocks: Option<LockId>,
    /// Slot permutation of an already-created lever, slot 1 first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lever: Option<[LeverOutcome; 3]>,
}

/// One undirected corridor as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedCorridor {
    pub a: usize,
    pub b: usize,
    pub event: CorridorEvent,
}

/// Serde shape of a whole maze.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedMaze {
    pub rooms: Vec<SavedRoom>,
    pub corridors: Vec<SavedCorridor>,
}

/// Capture a graph into its serde shape.
pub fn to_saved(graph: &MazeGraph) -> SavedMaze {
    let rooms = graph
        .rooms()
        .map(|(_, room)| SavedRoom {
            kind: room.kind,
            unlocks: room.unlocks,
            lever: room.lever.as_ref().map(LeverPuzzle::slots),
        })
        .collect();
    let corridors = graph
        .corridors()
        .map(|(a, b, event)| SavedCorridor {
            a: a.index(),
            b: b.index(),
            event,
        })
        .collect();
    SavedMaze { rooms, corridors }
}

/// Rebuild a graph from its serde shape, validating references.
pub fn from_saved(saved: &SavedMaze) -> Result<MazeGraph, SaveError> {
    let mut graph = MazeGraph::new();
    for (index, saved_room) in saved.rooms.iter().enumerate() {
        let mut room = Room::new(saved_room.kind);
        room.unlocks = saved_room.unlocks;
        if let Some(slots) = saved_room.lever {
            room.lever =
                Some(LeverPuzzle::from_slots(slots).ok_or(SaveError::BadLever { room: index })?);
        }
        graph.add_room(room);
    }

    for corridor in &saved.corridors {
        for room in [corridor.a, corridor.b] {
            if room >= saved.rooms.len() {
                return Err(SaveError::RoomOutOfRange {
                    room,
                    rooms: saved.rooms.len(),
                });
            }
        }
        if corridor.a == corridor.b {
            return Err(SaveError::SelfCorridor { room: corridor.a });
        }
        let (a, b) = (RoomId(corridor.a), RoomId(corridor.b));
        if graph.has_corridor(a, b) {
            return Err(SaveError::DuplicateCorridor {
                a: corridor.a,
                b: corridor.b,
            });
        }
        graph.add_corridor(a, b, corridor.event);
    }
    Ok(graph)
}

/// Export a graph as JSON.
pub fn to_json(graph: &MazeGraph) -> Result<String, SaveError> {
    Ok(serde_json::to_string_pretty(&to_saved(graph))?)
}

/// Import a graph from JSON.
pub fn from_json(json: &str) -> Result<MazeGraph, SaveError> {
    from_saved(&serde_json::from_str(json)?)
}
