//! Turn engine
//!
//! The single authoritative session layer: owns the graph, the agents and
//! the session RNG, and advances play one agent-turn at a time. Front ends
//! drive `advance` and render the returned `TurnReport`; the engine never
//! prints or reads anything itself.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::agent::{Agent, next_step};
use crate::maze::{CorridorEvent, LeverOutcome, LeverPuzzle, LockId, MazeGraph, RoomId, RoomKind};
use crate::rng::GameRng;

/// Index of an agent within the session.
pub type AgentId = usize;

/// One thing that happened during an agent-turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEvent {
    /// The agent entered this room.
    Moved { to: RoomId },
    /// A locked corridor barred the move.
    BlockedByLock { lock: LockId },
    /// The requested destination is not adjacent; no room you cannot
    /// reach through a corridor can be entered.
    RejectedNotAdjacent { to: RoomId },
    /// The agent sat out one of its blocked turns.
    SatOutBlockedTurn,
    /// A MoveBack trap pushed the agent back along its trail.
    MovedBack { to: RoomId, rooms: u32 },
    /// A BlockTurn trap (or a Penalize lever) cost future turns.
    TurnsBlocked { turns: u32 },
    /// An ExtraTurn corridor granted an immediate extra turn.
    ExtraTurnGranted,
    /// A SwapPosition corridor exchanged places with another agent.
    Swapped { with: AgentId },
    /// A lever slot was pulled.
    LeverPulled { choice: usize, outcome: LeverOutcome },
    /// A lever opened this lock for the agent.
    LockOpened { lock: LockId },
    /// The agent stands on the goal room and is done.
    ReachedGoal,
    /// No move was possible or provided; the turn passes.
    NoMoveAvailable,
}

/// Everything one agent-turn produced, for the front end to render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnReport {
    pub turn: u64,
    pub agent: AgentId,
    pub events: Vec<TurnEvent>,
}

/// A running maze session.
pub struct Session {
    graph: MazeGraph,
    agents: Vec<Agent>,
    rng: GameRng,
    /// Round-robin of agents still playing.
    queue: VecDeque<AgentId>,
    turn: u64,
}

impl Session {
    pub fn new(graph: MazeGraph, rng: GameRng) -> Self {
        Self {
            graph,
            agents: Vec::new(),
            rng,
            queue: VecDeque::new(),
            turn: 0,
        }
    }

    pub fn graph(&self) -> &MazeGraph {
        &self.graph
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id)
    }

    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// Add an agent, spawning it at an entrance (agents cycle through the
    /// entrances in order). Returns `None` when the graph has no rooms.
    pub fn add_agent(&mut self, name: impl Into<String>, is_bot: bool) -> Option<AgentId> {
        let entrances = self.graph.ids_of_kind(RoomKind::Entrance);
        let start = if entrances.is_empty() {
            self.graph.ids().next()?
        } else {
            entrances[self.agents.len() % entrances.len()]
        };
        let id = self.agents.len();
        self.agents.push(Agent::new(name, start, is_bot));
        self.queue.push_back(id);
        Some(id)
    }

    /// All agents have reached the goal (or none exist).
    pub fn is_over(&self) -> bool {
        self.agents.iter().all(|a| a.finished)
    }

    /// Agents that have reached the goal, in id order.
    pub fn finishers(&self) -> Vec<AgentId> {
        (0..self.agents.len())
            .filter(|&id| self.agents[id].finished)
            .collect()
    }

    /// The agent whose turn is next, if any remain.
    pub fn next_agent(&self) -> Option<AgentId> {
        self.queue
            .iter()
            .copied()
            .find(|&id| !self.agents[id].finished)
    }

    /// Advance play by one agent-turn.
    ///
    /// Bot agents plan their own move; externally driven agents move to
    /// `input` (an adjacent room chosen by the front end) or pass when
    /// `input` is `None`. Returns `None` once every agent has finished.
    pub fn advance(&mut self, input: Option<RoomId>) -> Option<TurnReport> {
        let id = self.pop_next()?;
        self.turn += 1;
        let mut events = Vec::new();

        if self.agents[id].blocked_turns > 0 {
            self.agents[id].blocked_turns -= 1;
            events.push(TurnEvent::SatOutBlockedTurn);
            self.queue.push_back(id);
            return Some(self.report(id, events));
        }

        let destination = if self.agents[id].is_bot {
            next_step(
                &self.graph,
                self.agents[id].position,
                self.agents[id].unlocked(),
                &mut self.rng,
            )
        } else {
            input
        };

        match destination {
            Some(to) => events.extend(self.apply_move(id, to)),
            None => events.push(TurnEvent::NoMoveAvailable),
        }

        if !self.agents[id].finished {
            if self.agents[id].extra_turn {
                self.agents[id].extra_turn = false;
                self.queue.push_front(id);
            } else {
                self.queue.push_back(id);
            }
        }
        Some(self.report(id, events))
    }

    /// Pull slot `choice` of the lever in the agent's current room,
    /// creating the lever on first use. Returns the resulting events;
    /// empty if the agent is not in a lever room.
    pub fn pull_lever(&mut self, id: AgentId, choice: usize) -> Vec<TurnEvent> {
        let Some(agent) = self.agents.get(id) else {
            return Vec::new();
        };
        let position = agent.position;
        let Some(room) = self.graph.room_mut(position) else {
            return Vec::new();
        };
        if room.kind != RoomKind::LeverRoom {
            return Vec::new();
        }
        let lever = room
            .lever
            .get_or_insert_with(|| LeverPuzzle::new(&mut self.rng));
        let outcome = lever.activate(choice);
        let unlocks = room.unlocks;

        let mut events = vec![TurnEvent::LeverPulled { choice, outcome }];
        match outcome {
            LeverOutcome::OpenPath => {
                if let Some(lock) = unlocks {
                    // Re-opening an already open lock is a no-op.
                    if self.agents[id].unlock(lock) {
                        events.push(TurnEvent::LockOpened { lock });
                    }
                }
            }
            LeverOutcome::Penalize => {
                self.agents[id].blocked_turns += 1;
                events.push(TurnEvent::TurnsBlocked { turns: 1 });
            }
            LeverOutcome::Nothing => {}
        }
        events
    }

    fn report(&self, agent: AgentId, events: Vec<TurnEvent>) -> TurnReport {
        TurnReport {
            turn: self.turn,
            agent,
            events,
        }
    }

    /// Next unfinished agent in the round-robin.
    fn pop_next(&mut self) -> Option<AgentId> {
        while let Some(id) = self.queue.pop_front() {
            if !self.agents[id].finished {
                return Some(id);
            }
        }
        None
    }

    /// Move agent `id` into `to`, applying the corridor event and anything
    /// the destination room does on arrival.
    fn apply_move(&mut self, id: AgentId, to: RoomId) -> Vec<TurnEvent> {
        let mut events = Vec::new();
        let from = self.agents[id].position;

        if !self.graph.neighbors(from).contains(&to) {
            events.push(TurnEvent::RejectedNotAdjacent { to });
            return events;
        }

        let event = self.graph.corridor_event(from, to);
        if let CorridorEvent::Locked(lock) = event
            && !self.agents[id].has_unlocked(lock)
        {
            events.push(TurnEvent::BlockedByLock { lock });
            return events;
        }

        self.agents[id].record_visit(from);
        self.agents[id].position = to;
        events.push(TurnEvent::Moved { to });

        match event {
            CorridorEvent::MoveBack(distance) => {
                let mut stepped = 0;
                while stepped < distance {
                    match self.agents[id].step_back() {
                        Some(room) => {
                            self.agents[id].position = room;
                            stepped += 1;
                        }
                        None => break,
                    }
                }
                events.push(TurnEvent::MovedBack {
                    to: self.agents[id].position,
                    rooms: stepped,
                });
                self.graph.relocate_trap(from, to, &mut self.rng);
            }
            CorridorEvent::BlockTurn(turns) => {
                self.agents[id].blocked_turns += turns;
                events.push(TurnEvent::TurnsBlocked { turns });
                self.graph.relocate_trap(from, to, &mut self.rng);
            }
            CorridorEvent::ExtraTurn => {
                self.agents[id].extra_turn = true;
                events.push(TurnEvent::ExtraTurnGranted);
            }
            CorridorEvent::SwapPosition => {
                let others: Vec<AgentId> = (0..self.agents.len())
                    .filter(|&other| other != id && !self.agents[other].finished)
                    .collect();
                if let Some(&other) = self.rng.choose(&others) {
                    let mine = self.agents[id].position;
                    self.agents[id].position = self.agents[other].position;
                    self.agents[other].position = mine;
                    events.push(TurnEvent::Swapped { with: other });
                    self.check_goal(other);
                }
            }
            CorridorEvent::Safe | CorridorEvent::Locked(_) => {}
        }

        // Bots pull a random lever slot on arrival; human agents decide
        // for themselves through `pull_lever`.
        let here = self.agents[id].position;
        let in_lever_room = self
            .graph
            .room(here)
            .is_some_and(|room| room.kind == RoomKind::LeverRoom);
        if in_lever_room && self.agents[id].is_bot {
            let choice = self.rng.rn2(3) as usize + 1;
            events.extend(self.pull_lever(id, choice));
        }

        if self.check_goal(id) {
            events.push(TurnEvent::ReachedGoal);
        }
        events
    }

    /// Mark the agent finished if it stands on the goal room.
    fn check_goal(&mut self, id: AgentId) -> bool {
        let on_goal = self
            .graph
            .room(self.agents[id].position)
            .is_some_and(|room| room.kind == RoomKind::GoalRoom);
        if on_goal {
            self.agents[id].finished = true;
        }
        on_goal
    }
}
