#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Periodic placement of jammer obstacles.

use cut_n_align_core::{CellCoord, Grid, Stone, JAMMER_TURN};
use rand::Rng;

/// Turns past this value inject one extra jammer.
pub const LATE_GAME_TURN: u32 = 50;

/// Reports whether jammers are injected at the end of the given turn.
#[must_use]
pub const fn is_injection_turn(turn: u32) -> bool {
    turn % JAMMER_TURN == 0
}

/// Number of jammer placements attempted on an injection turn.
///
/// Cycles through 1, 2, 3 as injection turns pass, plus one once the game is
/// past [`LATE_GAME_TURN`].
#[must_use]
pub const fn injection_count(turn: u32) -> usize {
    let base = (turn / JAMMER_TURN + 2) % 3 + 1;
    let late = if turn > LATE_GAME_TURN { 1 } else { 0 };
    (base + late) as usize
}

/// Pure system that drops jammers on top of random interior columns.
#[derive(Clone, Copy, Debug, Default)]
pub struct JammerInjector;

impl JammerInjector {
    /// Creates a new injector.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Places this turn's jammers, if the turn calls for any, and returns their cells.
    ///
    /// Each placement picks a uniformly random interior column and puts the
    /// jammer directly above its stack. Columns with fewer than three free
    /// rows are skipped without retrying.
    pub fn handle<R>(&self, turn: u32, grid: &mut Grid, rng: &mut R) -> Vec<CellCoord>
    where
        R: Rng + ?Sized,
    {
        if !is_injection_turn(turn) {
            return Vec::new();
        }

        let mut placed = Vec::new();
        for _ in 0..injection_count(turn) {
            let column = rng.gen_range(1..=grid.width() - 2);
            let row = grid.height_at(column) - 1;
            if row <= 1 {
                continue;
            }
            let cell = CellCoord::new(column, row);
            grid.put(cell, Stone::jammer());
            placed.push(cell);
        }
        placed
    }
}
