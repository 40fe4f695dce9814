//! Bot pathfinding
//!
//! Two greedy BFS phases, each a full search from the bot's current room:
//! first toward the goal room, then toward lever rooms whose lock the bot
//! still needs, finally a uniform random-walk fallback. Each phase
//! reconstructs the shortest path through parent pointers and returns only
//! the first hop; the caller re-plans every turn, which keeps the bot
//! honest when traps move it around.

use std::collections::VecDeque;

use hashbrown::{HashMap, HashSet};

use crate::maze::{LockId, MazeGraph, Room, RoomId, RoomKind};
use crate::rng::GameRng;

/// Decide the bot's next single step from `position`.
///
/// Returns `None` only when the bot is isolated: no goal, no useful lever,
/// and no neighbor to wander into. Callers treat that as an ordinary
/// skipped turn, not a failure.
pub fn next_step(
    graph: &MazeGraph,
    position: RoomId,
    unlocked: &HashSet<LockId>,
    rng: &mut GameRng,
) -> Option<RoomId> {
    if let Some(step) = bfs_first_step(graph, position, unlocked, |room| {
        room.kind == RoomKind::GoalRoom
    }) {
        return Some(step);
    }

    // Lever rooms whose lock the bot already holds are not targets at all;
    // skipping them (rather than deprioritizing) is what keeps the bot
    // from looping back to a solved lever.
    if let Some(step) = bfs_first_step(graph, position, unlocked, |room| {
        room.kind == RoomKind::LeverRoom
            && room.unlocks.is_some_and(|id| !unlocked.contains(&id))
    }) {
        return Some(step);
    }

    rng.choose(graph.neighbors(position)).copied()
}

/// Single BFS from `start` honoring locked corridors, returning the first
/// hop of the shortest path to a room matching `target`.
///
/// The lock check runs during expansion: a corridor the agent cannot open
/// must not enter the shortest-path tree at all. Neighbors are visited in
/// the graph's declared order, so ties break by discovery order.
fn bfs_first_step(
    graph: &MazeGraph,
    start: RoomId,
    unlocked: &HashSet<LockId>,
    target: impl Fn(&Room) -> bool,
) -> Option<RoomId> {
    let mut parent: HashMap<RoomId, RoomId> = HashMap::new();
    let mut visited: HashSet<RoomId> = HashSet::new();
    let mut queue = VecDeque::new();
    visited.insert(start);
    queue.push_back(start);

    let mut found = None;
    'search: while let Some(current) = queue.pop_front() {
        for &next in graph.neighbors(current) {
            if visited.contains(&next) {
                continue;
            }
            if !graph
                .corridor_event(current, next)
                .passable_with(unlocked)
            {
                continue;
            }
            visited.insert(next);
            parent.insert(next, current);
            if graph.room(next).is_some_and(&target) {
                found = Some(next);
                break 'search;
            }
            queue.push_back(next);
        }
    }

    // Walk the parent chain back to the hop adjacent to the start.
    let mut step = found?;
    while let Some(&prev) = parent.get(&step) {
        if prev == start {
            return Some(step);
        }
        step = prev;
    }
    None
}
