//! Lever puzzle
//!
//! A three-slot mechanism attached to lever rooms. The slots hold a
//! uniform random permutation of the three outcomes, drawn once at
//! creation. Pulling a slot never consumes or disables it: repeated pulls
//! of the same slot, by any agent, return the same outcome.

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::rng::GameRng;

/// Result of pulling one lever slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum LeverOutcome {
    /// Opens the lock bound to this room
    OpenPath,
    /// Costs the puller a turn
    Penalize,
    /// No effect
    Nothing,
}

/// Three-slot lever mechanism.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeverPuzzle {
    slots: [LeverOutcome; 3],
}

impl LeverPuzzle {
    /// Draw a fresh permutation of the three outcomes.
    pub fn new(rng: &mut GameRng) -> Self {
        let mut slots = [
            LeverOutcome::OpenPath,
            LeverOutcome::Penalize,
            LeverOutcome::Nothing,
        ];
        rng.shuffle(&mut slots);
        Self { slots }
    }

    /// Rebuild a puzzle from stored slots. Returns `None` unless the slots
    /// are a permutation of the three outcomes.
    pub fn from_slots(slots: [LeverOutcome; 3]) -> Option<Self> {
        let mut seen = [false; 3];
        for outcome in slots {
            let idx = match outcome {
                LeverOutcome::OpenPath => 0,
                LeverOutcome::Penalize => 1,
                LeverOutcome::Nothing => 2,
            };
            if seen[idx] {
                return None;
            }
            seen[idx] = true;
        }
        Some(Self { slots })
    }

    /// The stored permutation, slot 1 first.
    pub fn slots(&self) -> [LeverOutcome; 3] {
        self.slots
    }

    /// Pull slot `choice` (1-based). Out-of-range choices pull nothing.
    pub fn activate(&self, choice: usize) -> LeverOutcome {
        match choice {
            1..=3 => self.slots[choice - 1],
            _ => LeverOutcome::Nothing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_outcome_appears_once() {
        for seed in 0..50 {
            let mut rng = GameRng::new(seed);
            let lever = LeverPuzzle::new(&mut rng);
            let outcomes: Vec<LeverOutcome> = (1..=3).map(|c| lever.activate(c)).collect();
            assert!(outcomes.contains(&LeverOutcome::OpenPath));
            assert!(outcomes.contains(&LeverOutcome::Penalize));
            assert!(outcomes.contains(&LeverOutcome::Nothing));
        }
    }

    #[test]
    fn test_out_of_range_pulls_nothing() {
        let mut rng = GameRng::new(3);
        let lever = LeverPuzzle::new(&mut rng);
        assert_eq!(lever.activate(0), LeverOutcome::Nothing);
        assert_eq!(lever.activate(4), LeverOutcome::Nothing);
        assert_eq!(lever.activate(usize::MAX), LeverOutcome::Nothing);
    }

    #[test]
    fn test_repeated_pulls_are_deterministic() {
        let mut rng = GameRng::new(11);
        let lever = LeverPuzzle::new(&mut rng);
        for choice in 1..=3 {
            let first = lever.activate(choice);
            for _ in 0..10 {
                assert_eq!(lever.activate(choice), first);
            }
        }
    }

    #[test]
    fn test_from_slots_rejects_duplicates() {
        assert!(
            LeverPuzzle::from_slots([
                LeverOutcome::OpenPath,
                LeverOutcome::OpenPath,
                LeverOutcome::Nothing,
            ])
            .is_none()
        );
        let valid = [
            LeverOutcome::Nothing,
            LeverOutcome::OpenPath,
            LeverOutcome::Penalize,
        ];
        let lever = LeverPuzzle::from_slots(valid).unwrap();
        assert_eq!(lever.slots(), valid);
    }
}
