//! mz-core: Core engine for the mazecrawl simulation
//!
//! This crate contains all maze logic with no terminal or input
//! dependencies. It is designed to be pure and testable: front ends own
//! presentation and input, and drive the engine through value-returning
//! queries and commands.
//!
//! The pieces, leaves first: rooms and corridor events, the adjacency-list
//! [`maze::MazeGraph`] with its per-corridor event overlay, the organic
//! map generator, the lever puzzle, the bot pathfinder, and the
//! [`session::Session`] turn engine tying them together. All randomness
//! flows through one seedable [`GameRng`].

pub mod agent;
pub mod maze;
pub mod save;
pub mod session;

mod consts;
mod rng;

pub use consts::*;
pub use rng::GameRng;
