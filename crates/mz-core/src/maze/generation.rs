//! Organic map generation
//!
//! Builds a maze graph from room-type quotas: one goal room ringed by
//! guardian rooms, a shuffled bag of rooms grown outward on a FIFO
//! frontier, entrances attached last, and extra cycles injected so the
//! result is not a strict tree.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::consts::{
    BLOCK_TURN_COST, BLOCK_TURN_THRESHOLD, ENTRANCE_TRAP_CHANCE, FRONTIER_REPUSH_CHANCE,
    LOCK_THRESHOLD, MOVE_BACK_DISTANCE, MOVE_BACK_THRESHOLD,
};
use crate::rng::GameRng;

use super::corridor::CorridorEvent;
use super::graph::MazeGraph;
use super::room::{LockId, Room, RoomId, RoomKind};

/// Quotas and tuning for `generate`.
///
/// The thresholds partition the unit interval: a uniform draw strictly
/// above `lock_threshold` becomes a lock (while the lock budget lasts),
/// the band down to `move_back_threshold` a MoveBack trap, the band down
/// to `block_turn_threshold` a BlockTurn trap, everything else safe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Entrance rooms attached at the maze edge.
    pub entrances: usize,
    /// Riddle rooms.
    pub puzzle_rooms: usize,
    /// Plain rooms beyond the guardian ring.
    pub normal_rooms: usize,
    /// Lever rooms; also the ceiling on issued lock ids.
    pub lock_rooms: usize,
    pub lock_threshold: f64,
    pub move_back_threshold: f64,
    pub block_turn_threshold: f64,
    /// Probability a frontier parent is re-pushed after receiving a child;
    /// lower values grow longer corridors, higher values bushier maps.
    pub frontier_repush_chance: f64,
    /// Probability an entrance corridor carries a BlockTurn trap.
    pub entrance_trap_chance: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            entrances: 2,
            puzzle_rooms: 3,
            normal_rooms: 8,
            lock_rooms: 2,
            lock_threshold: LOCK_THRESHOLD,
            move_back_threshold: MOVE_BACK_THRESHOLD,
            block_turn_threshold: BLOCK_TURN_THRESHOLD,
            frontier_repush_chance: FRONTIER_REPUSH_CHANCE,
            entrance_trap_chance: ENTRANCE_TRAP_CHANCE,
        }
    }
}

impl GenerationConfig {
    /// Quotas only, engine defaults for everything else.
    pub fn with_quotas(
        entrances: usize,
        puzzle_rooms: usize,
        normal_rooms: usize,
        lock_rooms: usize,
    ) -> Self {
        Self {
            entrances,
            puzzle_rooms,
            normal_rooms,
            lock_rooms,
            ..Self::default()
        }
    }
}

/// Draws corridor events against the configured thresholds while handing
/// out lock ids in increasing order from 1, never past the quota. Each id
/// is consumed exactly once, so Locked edges line up with the lever rooms
/// pre-bound in the bag.
struct EventSampler<'a> {
    config: &'a GenerationConfig,
    next_lock: LockId,
}

impl<'a> EventSampler<'a> {
    fn new(config: &'a GenerationConfig) -> Self {
        Self {
            config,
            next_lock: 1,
        }
    }

    fn sample(&mut self, rng: &mut GameRng) -> CorridorEvent {
        let r = rng.uniform();
        if self.next_lock as usize <= self.config.lock_rooms && r > self.config.lock_threshold {
            let id = self.next_lock;
            self.next_lock += 1;
            CorridorEvent::Locked(id)
        } else if r > self.config.move_back_threshold {
            CorridorEvent::MoveBack(MOVE_BACK_DISTANCE)
        } else if r > self.config.block_turn_threshold {
            CorridorEvent::BlockTurn(BLOCK_TURN_COST)
        } else {
            CorridorEvent::Safe
        }
    }
}

/// Generate a maze from the configured quotas.
///
/// Every generated room ends up connected to the goal component, so the
/// whole maze is reachable from every entrance (locks permitting).
pub fn generate(config: &GenerationConfig, rng: &mut GameRng) -> MazeGraph {
    let mut graph = MazeGraph::new();
    let mut sampler = EventSampler::new(config);

    let goal = graph.add_room(Room::new(RoomKind::GoalRoom));

    // Guardian ring. The goal is only reachable through these rooms, and
    // their corridors roll events like any other - guardians are not
    // automatically safe.
    let guardian_count = config.lock_rooms.max(1);
    let mut guardians = Vec::with_capacity(guardian_count);
    let mut frontier: VecDeque<RoomId> = VecDeque::new();
    for _ in 0..guardian_count {
        let guardian = graph.add_room(Room::new(RoomKind::Normal));
        let event = sampler.sample(rng);
        graph.add_corridor(goal, guardian, event);
        guardians.push(guardian);
        frontier.push_back(guardian);
    }

    // The room bag: one lever room per lock id, the riddle rooms, the
    // plain rooms. Shuffled so special rooms spread through the maze
    // instead of clustering near the goal.
    let mut bag: Vec<Room> = Vec::new();
    for lock in 1..=guardian_count as LockId {
        bag.push(Room::lever_room(lock));
    }
    for _ in 0..config.puzzle_rooms {
        bag.push(Room::new(RoomKind::PuzzleRoom));
    }
    for _ in 0..config.normal_rooms {
        bag.push(Room::new(RoomKind::Normal));
    }
    rng.shuffle(&mut bag);

    // Organic growth along the FIFO frontier.
    for room in bag {
        let parent = frontier.pop_front().unwrap_or(goal);
        let child = graph.add_room(room);
        graph.add_corridor(parent, child, sampler.sample(rng));
        frontier.push_back(child);
        if rng.chance(config.frontier_repush_chance) {
            frontier.push_back(parent);
        }
    }

    // Entrances hang off whatever the frontier ended on, falling back to
    // the guardian ring once it is exhausted.
    for _ in 0..config.entrances {
        let attach = frontier
            .pop_front()
            .or_else(|| rng.choose(&guardians).copied())
            .unwrap_or(goal);
        let entrance = graph.add_room(Room::new(RoomKind::Entrance));
        let event = if rng.chance(config.entrance_trap_chance) {
            CorridorEvent::BlockTurn(BLOCK_TURN_COST)
        } else {
            CorridorEvent::Safe
        };
        graph.add_corridor(attach, entrance, event);
    }

    // Extra cycles: growth alone yields a tree hanging off the guardian
    // ring. Attempt N/2 random-random corridors, leaving the goal's own
    // wiring untouched; attempts that hit an existing corridor or a
    // self-pair are simply lost.
    let n = graph.len();
    for _ in 0..n / 2 {
        let a = RoomId(rng.rn2(n as u32) as usize);
        let b = RoomId(rng.rn2(n as u32) as usize);
        if a == b || a == goal || b == goal || graph.has_corridor(a, b) {
            continue;
        }
        let event = sampler.sample(rng);
        graph.add_corridor(a, b, event);
    }

    graph
}
