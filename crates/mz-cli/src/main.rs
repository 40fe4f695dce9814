//! mazecrawl console front end
//!
//! Generates a maze from the given quotas, fills it with bot agents and
//! replays the session turn by turn on stdout. A thin wrapper: all rules
//! live in mz-core.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use mz_core::GameRng;
use mz_core::maze::{GenerationConfig, MazeGraph, RoomKind, generate};
use mz_core::save;
use mz_core::session::{Session, TurnEvent, TurnReport};

#[derive(Parser, Debug)]
#[command(name = "mazecrawl", about = "Turn-based maze-crawl simulation")]
struct Args {
    /// Seed for the session RNG; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Load the maze from a JSON map instead of generating one.
    #[arg(long, conflicts_with_all = ["entrances", "puzzle_rooms", "normal_rooms", "lock_rooms"])]
    load: Option<PathBuf>,

    #[arg(long, default_value_t = 2)]
    entrances: usize,

    #[arg(long, default_value_t = 3)]
    puzzle_rooms: usize,

    #[arg(long, default_value_t = 8)]
    normal_rooms: usize,

    #[arg(long, default_value_t = 2)]
    lock_rooms: usize,

    /// Number of bot agents to run.
    #[arg(long, default_value_t = 2)]
    bots: usize,

    /// Stop after this many agent-turns even if nobody has finished.
    #[arg(long, default_value_t = 500)]
    max_turns: u64,

    /// Write the maze as JSON to this path before playing.
    #[arg(long)]
    export: Option<PathBuf>,

    /// Print every turn instead of a final summary only.
    #[arg(long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut rng = match args.seed {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_entropy(),
    };
    println!("seed: {}", rng.seed());

    let graph = match &args.load {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading map {}", path.display()))?;
            save::from_json(&json).context("parsing map")?
        }
        None => {
            let config = GenerationConfig::with_quotas(
                args.entrances,
                args.puzzle_rooms,
                args.normal_rooms,
                args.lock_rooms,
            );
            generate(&config, &mut rng)
        }
    };

    if let Some(path) = &args.export {
        let json = save::to_json(&graph).context("serializing map")?;
        std::fs::write(path, json).with_context(|| format!("writing map {}", path.display()))?;
        println!("map exported to {}", path.display());
    }

    print_map_summary(&graph);

    let mut session = Session::new(graph, rng);
    for i in 0..args.bots {
        session
            .add_agent(format!("bot-{}", i + 1), true)
            .context("maze has no rooms to spawn in")?;
    }

    while !session.is_over() && session.turn() < args.max_turns {
        let Some(report) = session.advance(None) else {
            break;
        };
        if args.verbose {
            print_turn(&session, &report);
        }
    }

    println!();
    if session.is_over() {
        println!("everyone reached the goal after {} turns", session.turn());
    } else {
        println!("stopped after {} turns", session.turn());
    }
    for agent in session.agents() {
        let status = if agent.finished { "finished" } else { "in maze" };
        println!(
            "  {:<8} {} (room {}, {} locks opened)",
            agent.name,
            status,
            agent.position.index(),
            agent.unlocked().len()
        );
    }
    Ok(())
}

fn print_map_summary(graph: &MazeGraph) {
    println!(
        "maze: {} rooms, {} corridors",
        graph.len(),
        graph.corridor_count()
    );
    for kind in [
        RoomKind::Entrance,
        RoomKind::Normal,
        RoomKind::PuzzleRoom,
        RoomKind::LeverRoom,
        RoomKind::GoalRoom,
    ] {
        let count = graph.ids_of_kind(kind).len();
        if count > 0 {
            println!("  {kind}: {count}");
        }
    }
    let eventful = graph.corridors().filter(|(_, _, e)| !e.is_safe()).count();
    println!("  eventful corridors: {eventful}");
}

fn print_turn(session: &Session, report: &TurnReport) {
    let name = session
        .agent(report.agent)
        .map(|a| a.name.as_str())
        .unwrap_or("?");
    for event in &report.events {
        println!("[{:>4}] {}: {}", report.turn, name, describe(session, event));
    }
}

fn describe(session: &Session, event: &TurnEvent) -> String {
    match event {
        TurnEvent::Moved { to } => format!("moves into room {}", to.index()),
        TurnEvent::BlockedByLock { lock } => format!("is stopped by lock {lock}"),
        TurnEvent::RejectedNotAdjacent { to } => {
            format!("cannot reach room {} from here", to.index())
        }
        TurnEvent::SatOutBlockedTurn => "sits out a blocked turn".to_string(),
        TurnEvent::MovedBack { to, rooms } => {
            format!("is thrown back {} rooms to room {}", rooms, to.index())
        }
        TurnEvent::TurnsBlocked { turns } => format!("loses the next {turns} turn(s)"),
        TurnEvent::ExtraTurnGranted => "gains an extra turn".to_string(),
        TurnEvent::Swapped { with } => {
            let other = session
                .agent(*with)
                .map(|a| a.name.as_str())
                .unwrap_or("?");
            format!("swaps places with {other}")
        }
        TurnEvent::LeverPulled { choice, outcome } => {
            format!("pulls lever {choice}: {outcome}")
        }
        TurnEvent::LockOpened { lock } => format!("opens lock {lock}"),
        TurnEvent::ReachedGoal => "reaches the goal!".to_string(),
        TurnEvent::NoMoveAvailable => "has nowhere to go".to_string(),
    }
}
