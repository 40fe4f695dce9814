//! Engine-wide tuning constants.
//!
//! The sampling thresholds and the relocation budget are long-standing
//! tuning values; change them through `GenerationConfig` rather than here.

/// Random attempts `MazeGraph::relocate_trap` makes to find a free corridor
/// before the trap is discarded.
pub const TRAP_RELOCATION_ATTEMPTS: u32 = 50;

/// Event sampling: draws strictly above this are locks (while unused lock
/// ids remain).
pub const LOCK_THRESHOLD: f64 = 0.92;

/// Event sampling: draws strictly above this (and below the lock band) are
/// MoveBack traps.
pub const MOVE_BACK_THRESHOLD: f64 = 0.85;

/// Event sampling: draws strictly above this (and below the MoveBack band)
/// are BlockTurn traps.
pub const BLOCK_TURN_THRESHOLD: f64 = 0.80;

/// Probability that a frontier parent is pushed back after receiving a
/// child. Lower values grow longer corridors, higher values bushier maps.
pub const FRONTIER_REPUSH_CHANCE: f64 = 0.7;

/// Probability that an entrance corridor carries a BlockTurn(1) event.
pub const ENTRANCE_TRAP_CHANCE: f64 = 0.1;

/// Rooms of back-trail an agent remembers for MoveBack traps.
pub const TRAIL_DEPTH: usize = 8;

/// Distance of a sampled MoveBack trap.
pub const MOVE_BACK_DISTANCE: u32 = 2;

/// Turns cost by a sampled BlockTurn trap.
pub const BLOCK_TURN_COST: u32 = 1;
