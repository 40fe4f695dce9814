//! Maze graph
//!
//! An undirected adjacency-list graph over rooms with a per-corridor event
//! overlay. Rooms live in an arena: `RoomId` is the insertion index and
//! growth never invalidates held ids. Each undirected corridor stores its
//! event twice, once per traversal direction, because play always asks
//! "what happens going from room a to room b"; every mutation keeps the
//! two directions in agreement.
//!
//! Invalid room references are a closed-world condition, not an error:
//! queries answer with an empty slice or a Safe event, and mutations
//! silently no-op.

use hashbrown::HashMap;

use crate::consts::TRAP_RELOCATION_ATTEMPTS;
use crate::rng::GameRng;

use super::corridor::CorridorEvent;
use super::room::{Room, RoomId, RoomKind};

const NO_NEIGHBORS: &[RoomId] = &[];

/// Adjacency-list maze graph with per-corridor events.
#[derive(Debug, Clone, Default)]
pub struct MazeGraph {
    rooms: Vec<Room>,
    adjacency: Vec<Vec<RoomId>>,
    events: HashMap<(RoomId, RoomId), CorridorEvent>,
}

impl MazeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a room; its id is the arena index. Existing ids are never
    /// reused or shifted.
    pub fn add_room(&mut self, room: Room) -> RoomId {
        let id = RoomId(self.rooms.len());
        self.rooms.push(room);
        self.adjacency.push(Vec::new());
        id
    }

    /// Number of rooms.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn contains(&self, id: RoomId) -> bool {
        id.0 < self.rooms.len()
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id.0)
    }

    pub fn room_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(id.0)
    }

    /// All room ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = RoomId> + '_ {
        (0..self.rooms.len()).map(RoomId)
    }

    /// All rooms with their ids, in insertion order.
    pub fn rooms(&self) -> impl Iterator<Item = (RoomId, &Room)> {
        self.rooms.iter().enumerate().map(|(i, r)| (RoomId(i), r))
    }

    /// Ids of every room of the given kind, in insertion order.
    pub fn ids_of_kind(&self, kind: RoomKind) -> Vec<RoomId> {
        self.rooms()
            .filter(|(_, room)| room.kind == kind)
            .map(|(id, _)| id)
            .collect()
    }

    /// Register `event` as the corridor event for both directions between
    /// `a` and `b`. No-ops if either id is invalid, if `a == b`, or if the
    /// corridor already exists (use `set_corridor_event` to replace).
    pub fn add_corridor(&mut self, a: RoomId, b: RoomId, event: CorridorEvent) {
        if !self.contains(a) || !self.contains(b) || a == b || self.has_corridor(a, b) {
            return;
        }
        self.adjacency[a.0].push(b);
        self.adjacency[b.0].push(a);
        self.events.insert((a, b), event);
        self.events.insert((b, a), event);
    }

    /// Neighbors of `room` in corridor-creation order; empty if the room
    /// has none or the id is invalid.
    pub fn neighbors(&self, room: RoomId) -> &[RoomId] {
        self.adjacency
            .get(room.0)
            .map(Vec::as_slice)
            .unwrap_or(NO_NEIGHBORS)
    }

    pub fn has_corridor(&self, a: RoomId, b: RoomId) -> bool {
        self.events.contains_key(&(a, b))
    }

    /// The stored event for the corridor from `a` to `b`, or `Safe` when
    /// no such corridor exists.
    pub fn corridor_event(&self, a: RoomId, b: RoomId) -> CorridorEvent {
        self.events.get(&(a, b)).copied().unwrap_or_default()
    }

    /// Replace the event on an existing corridor, in both directions.
    /// No-ops if the corridor does not exist.
    pub fn set_corridor_event(&mut self, a: RoomId, b: RoomId, event: CorridorEvent) {
        if !self.has_corridor(a, b) {
            return;
        }
        self.events.insert((a, b), event);
        self.events.insert((b, a), event);
    }

    /// Number of undirected corridors.
    pub fn corridor_count(&self) -> usize {
        self.events.len() / 2
    }

    /// Every undirected corridor once, as `(a, b, event)` with `a < b`.
    pub fn corridors(&self) -> impl Iterator<Item = (RoomId, RoomId, CorridorEvent)> + '_ {
        self.ids().flat_map(move |a| {
            self.neighbors(a)
                .iter()
                .filter(move |&&b| a < b)
                .map(move |&b| (a, b, self.corridor_event(a, b)))
        })
    }

    /// Move the trap on corridor `(a, b)` somewhere else.
    ///
    /// Clears the corridor to `Safe`, then makes up to
    /// `TRAP_RELOCATION_ATTEMPTS` random draws looking for a distinct
    /// corridor that is currently `Safe`; the first hit receives the trap
    /// unchanged. If the budget runs out the trap dissipates - a bounded
    /// search, not a retry-until-success loop, so a saturated graph cannot
    /// stall the turn. No-ops unless `(a, b)` currently carries a trap.
    pub fn relocate_trap(&mut self, a: RoomId, b: RoomId, rng: &mut GameRng) {
        let trap = self.corridor_event(a, b);
        if !trap.is_trap() {
            return;
        }
        self.set_corridor_event(a, b, CorridorEvent::Safe);

        for _ in 0..TRAP_RELOCATION_ATTEMPTS {
            let x = RoomId(rng.rn2(self.rooms.len() as u32) as usize);
            let Some(&y) = rng.choose(self.neighbors(x)) else {
                continue;
            };
            if (x == a && y == b) || (x == b && y == a) {
                continue;
            }
            if self.corridor_event(x, y).is_safe() {
                self.set_corridor_event(x, y, trap);
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn line_graph(n: usize) -> (MazeGraph, Vec<RoomId>) {
        let mut graph = MazeGraph::new();
        let ids: Vec<RoomId> = (0..n)
            .map(|_| graph.add_room(Room::new(RoomKind::Normal)))
            .collect();
        for pair in ids.windows(2) {
            graph.add_corridor(pair[0], pair[1], CorridorEvent::Safe);
        }
        (graph, ids)
    }

    #[test]
    fn test_add_room_ids_are_stable() {
        let mut graph = MazeGraph::new();
        let a = graph.add_room(Room::new(RoomKind::GoalRoom));
        let b = graph.add_room(Room::new(RoomKind::Normal));
        assert_eq!(a, RoomId(0));
        assert_eq!(b, RoomId(1));

        // Growth never shifts existing ids.
        for _ in 0..100 {
            graph.add_room(Room::new(RoomKind::Normal));
        }
        assert_eq!(graph.room(a).unwrap().kind, RoomKind::GoalRoom);
        assert_eq!(graph.room(b).unwrap().kind, RoomKind::Normal);
    }

    #[test]
    fn test_corridor_event_symmetry() {
        let mut graph = MazeGraph::new();
        let a = graph.add_room(Room::new(RoomKind::Normal));
        let b = graph.add_room(Room::new(RoomKind::Normal));
        graph.add_corridor(a, b, CorridorEvent::Locked(1));
        assert_eq!(graph.corridor_event(a, b), graph.corridor_event(b, a));

        graph.set_corridor_event(b, a, CorridorEvent::MoveBack(2));
        assert_eq!(graph.corridor_event(a, b), CorridorEvent::MoveBack(2));
        assert_eq!(graph.corridor_event(a, b), graph.corridor_event(b, a));
    }

    #[test]
    fn test_missing_corridor_reads_safe() {
        let (graph, ids) = line_graph(3);
        // Adjacent rooms only: 0-2 has no corridor.
        assert_eq!(
            graph.corridor_event(ids[0], ids[2]),
            CorridorEvent::Safe
        );
        // Out-of-range ids behave the same way.
        assert_eq!(
            graph.corridor_event(RoomId(99), ids[0]),
            CorridorEvent::Safe
        );
        assert!(graph.neighbors(RoomId(99)).is_empty());
    }

    #[test]
    fn test_add_corridor_invalid_refs_noop() {
        let mut graph = MazeGraph::new();
        let a = graph.add_room(Room::new(RoomKind::Normal));
        graph.add_corridor(a, RoomId(5), CorridorEvent::Safe);
        graph.add_corridor(a, a, CorridorEvent::Safe);
        assert!(graph.neighbors(a).is_empty());
        assert_eq!(graph.corridor_count(), 0);
    }

    #[test]
    fn test_add_corridor_duplicate_noop() {
        let mut graph = MazeGraph::new();
        let a = graph.add_room(Room::new(RoomKind::Normal));
        let b = graph.add_room(Room::new(RoomKind::Normal));
        graph.add_corridor(a, b, CorridorEvent::Locked(1));
        graph.add_corridor(b, a, CorridorEvent::Safe);
        assert_eq!(graph.corridor_event(a, b), CorridorEvent::Locked(1));
        assert_eq!(graph.neighbors(a).len(), 1);
    }

    #[test]
    fn test_set_corridor_event_missing_noop() {
        let mut graph = MazeGraph::new();
        let a = graph.add_room(Room::new(RoomKind::Normal));
        let b = graph.add_room(Room::new(RoomKind::Normal));
        graph.set_corridor_event(a, b, CorridorEvent::ExtraTurn);
        assert!(!graph.has_corridor(a, b));
        assert_eq!(graph.corridor_event(a, b), CorridorEvent::Safe);
    }

    #[test]
    fn test_neighbors_in_creation_order() {
        let mut graph = MazeGraph::new();
        let hub = graph.add_room(Room::new(RoomKind::Normal));
        let spokes: Vec<RoomId> = (0..4)
            .map(|_| graph.add_room(Room::new(RoomKind::Normal)))
            .collect();
        for &s in &spokes {
            graph.add_corridor(hub, s, CorridorEvent::Safe);
        }
        assert_eq!(graph.neighbors(hub), spokes.as_slice());
    }

    #[test]
    fn test_relocate_trap_clears_origin() {
        let (mut graph, ids) = line_graph(5);
        graph.set_corridor_event(ids[0], ids[1], CorridorEvent::MoveBack(2));
        let mut rng = GameRng::new(9);
        graph.relocate_trap(ids[0], ids[1], &mut rng);
        assert_eq!(graph.corridor_event(ids[0], ids[1]), CorridorEvent::Safe);
    }

    #[test]
    fn test_relocate_trap_conserves_trap_when_free_edge_exists() {
        // Enough free corridors that 50 random draws cannot plausibly
        // miss them all with this seed.
        let (mut graph, ids) = line_graph(20);
        graph.set_corridor_event(ids[3], ids[4], CorridorEvent::BlockTurn(1));
        let mut rng = GameRng::new(1);
        graph.relocate_trap(ids[3], ids[4], &mut rng);
        assert_eq!(graph.corridor_event(ids[3], ids[4]), CorridorEvent::Safe);
        let moved = graph
            .corridors()
            .filter(|&(_, _, e)| e == CorridorEvent::BlockTurn(1))
            .count();
        assert_eq!(moved, 1);
    }

    #[test]
    fn test_relocate_trap_dissipates_on_saturated_graph() {
        // Two rooms, one corridor: no other edge can take the trap.
        let (mut graph, ids) = line_graph(2);
        graph.set_corridor_event(ids[0], ids[1], CorridorEvent::MoveBack(2));
        let mut rng = GameRng::new(5);
        graph.relocate_trap(ids[0], ids[1], &mut rng);
        assert_eq!(graph.corridor_event(ids[0], ids[1]), CorridorEvent::Safe);
        assert!(graph.corridors().all(|(_, _, e)| e.is_safe()));
    }

    #[test]
    fn test_relocate_non_trap_noop() {
        let (mut graph, ids) = line_graph(3);
        graph.set_corridor_event(ids[0], ids[1], CorridorEvent::Locked(1));
        let mut rng = GameRng::new(2);
        graph.relocate_trap(ids[0], ids[1], &mut rng);
        assert_eq!(graph.corridor_event(ids[0], ids[1]), CorridorEvent::Locked(1));
    }

    proptest! {
        /// Both directions agree after any interleaving of corridor
        /// creation and replacement.
        #[test]
        fn prop_event_symmetry(ops in prop::collection::vec((0usize..8, 0usize..8, 0u32..4), 1..60)) {
            let mut graph = MazeGraph::new();
            for _ in 0..8 {
                graph.add_room(Room::new(RoomKind::Normal));
            }
            for (i, (a, b, kind)) in ops.into_iter().enumerate() {
                let (a, b) = (RoomId(a), RoomId(b));
                let event = match kind {
                    0 => CorridorEvent::Safe,
                    1 => CorridorEvent::Locked(kind),
                    2 => CorridorEvent::MoveBack(2),
                    _ => CorridorEvent::BlockTurn(1),
                };
                if i % 2 == 0 {
                    graph.add_corridor(a, b, event);
                } else {
                    graph.set_corridor_event(a, b, event);
                }
                for x in graph.ids() {
                    for y in graph.ids() {
                        prop_assert_eq!(graph.corridor_event(x, y), graph.corridor_event(y, x));
                    }
                }
            }
        }
    }
}
