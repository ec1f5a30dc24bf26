#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the cut'n'align engine.
//!
//! This crate defines the message surface that connects hosts, the
//! authoritative world, and the pure board systems. Hosts submit [`Command`]
//! values describing player intent or the passage of a tick, the world
//! executes those commands via its `apply` entry point, and then broadcasts
//! [`Event`] values describing what changed. Board systems operate on the
//! [`Grid`] defined here and never reach into world state directly.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod grid;

pub use grid::{Cell, Grid};

/// Number of grid columns, including both side walls.
pub const BOARD_WIDTH: usize = 8;

/// Number of grid rows, including the wall floor.
pub const BOARD_HEIGHT: usize = 16;

/// Longest vertical run of stones a single pick may hold.
pub const PICK_MAX: usize = 6;

/// Number of stones the look-ahead buffer is replenished to after each turn.
pub const RESERVE_NUM: usize = PICK_MAX;

/// Jammers are injected on every turn that is a multiple of this value.
pub const JAMMER_TURN: u32 = 5;

/// Default number of ticks marked stones linger before they are cleared.
pub const WAIT_ERASE_TICKS: u32 = 15;

/// Shortest same-colored run that qualifies for erasure.
pub const MIN_RUN_LENGTH: usize = 3;

/// The six hues a stone may carry, in unlock order.
pub const COLORS: [StoneKind; 6] = [
    StoneKind::Red,
    StoneKind::Blue,
    StoneKind::Green,
    StoneKind::Yellow,
    StoneKind::Pink,
    StoneKind::Orange,
];

/// Kinds of stones that may occupy a grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoneKind {
    /// Red hue.
    Red,
    /// Blue hue.
    Blue,
    /// Green hue.
    Green,
    /// Yellow hue.
    Yellow,
    /// Pink hue.
    Pink,
    /// Orange hue.
    Orange,
    /// Permanent border stone.
    Wall,
    /// Obstacle removed only by an adjacent erasure.
    Jammer,
    /// Presentation marker for the pick cursor.
    Cursor,
    /// Presentation marker for the ceiling row.
    Limit,
}

impl StoneKind {
    /// Reports whether the kind is one of the six hues that take part in runs.
    #[must_use]
    pub const fn is_colored(self) -> bool {
        matches!(
            self,
            Self::Red | Self::Blue | Self::Green | Self::Yellow | Self::Pink | Self::Orange
        )
    }

    /// Single character used by text hosts to draw the kind.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Red => 'R',
            Self::Blue => 'B',
            Self::Green => 'G',
            Self::Yellow => 'Y',
            Self::Pink => 'P',
            Self::Orange => 'O',
            Self::Wall => '#',
            Self::Jammer => 'x',
            Self::Cursor => '>',
            Self::Limit => '-',
        }
    }
}

/// A single stone held by a grid cell or by the look-ahead buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stone {
    kind: StoneKind,
    erase_pending: bool,
}

impl Stone {
    /// Creates a stone of the provided kind that is not marked for erasure.
    #[must_use]
    pub const fn new(kind: StoneKind) -> Self {
        Self {
            kind,
            erase_pending: false,
        }
    }

    /// Creates a wall stone.
    #[must_use]
    pub const fn wall() -> Self {
        Self::new(StoneKind::Wall)
    }

    /// Creates a jammer stone.
    #[must_use]
    pub const fn jammer() -> Self {
        Self::new(StoneKind::Jammer)
    }

    /// Kind carried by the stone.
    #[must_use]
    pub const fn kind(&self) -> StoneKind {
        self.kind
    }

    /// Reports whether the stone takes part in run detection.
    #[must_use]
    pub const fn is_colored(&self) -> bool {
        self.kind.is_colored()
    }

    /// Reports whether the stone was marked by the last scan and awaits clearing.
    #[must_use]
    pub const fn is_erase_pending(&self) -> bool {
        self.erase_pending
    }

    /// Marks the stone for erasure, returning `true` when it was not marked before.
    pub fn mark_erase(&mut self) -> bool {
        let newly_marked = !self.erase_pending;
        self.erase_pending = true;
        newly_marked
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
///
/// Row zero is the ceiling; rows grow downward toward the wall floor. The
/// coordinates are signed so neighbour arithmetic may step off the grid and
/// be rejected by the bounds-checked accessors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: i32,
    row: i32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Returns the coordinate displaced by the provided column and row deltas.
    #[must_use]
    pub const fn offset(self, columns: i32, rows: i32) -> Self {
        Self::new(self.column + columns, self.row + rows)
    }

    /// The four orthogonal neighbours: left, right, above, below.
    #[must_use]
    pub const fn orthogonal_neighbours(self) -> [Self; 4] {
        [
            self.offset(-1, 0),
            self.offset(1, 0),
            self.offset(0, -1),
            self.offset(0, 1),
        ]
    }
}

/// Discrete phases of the turn state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStep {
    /// Waiting for the host to start a game.
    Title,
    /// Awaiting the player's pick.
    Move,
    /// Stones settle one row per tick before the board is scanned.
    Falling,
    /// Marked stones linger for the erase countdown.
    WaitErase,
    /// Turn bookkeeping, jammer injection and look-ahead refill.
    Jammer,
    /// The board is full; only re-initialization leaves this step.
    GameOver,
}

/// Score awarded by a single cascade step, kept for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreEquation {
    multiplier: u64,
    erased: u32,
    score: u64,
}

impl ScoreEquation {
    /// Computes `2^sequent * erased` for the cascade depth `sequent`.
    #[must_use]
    pub fn for_cascade(sequent: u32, erased: u32) -> Self {
        let multiplier = 1_u64.checked_shl(sequent).unwrap_or(u64::MAX);
        Self {
            multiplier,
            erased,
            score: multiplier.saturating_mul(u64::from(erased)),
        }
    }

    /// Chain multiplier, `2^sequent`.
    #[must_use]
    pub const fn multiplier(&self) -> u64 {
        self.multiplier
    }

    /// Number of stones erased by the cascade step.
    #[must_use]
    pub const fn erased(&self) -> u32 {
        self.erased
    }

    /// Score delta awarded by the cascade step.
    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }
}

impl fmt::Display for ScoreEquation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}={}.", self.multiplier, self.erased, self.score)
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Resets the board, counters and look-ahead, returning to the title step.
    Initialize,
    /// Leaves the title step and starts accepting picks.
    Start,
    /// Moves the pick cursor to the provided cell, as reported by the input host.
    AimPick {
        /// Column under the cursor; clamped to the interior.
        column: i32,
        /// Row under the cursor; selects how many stones are held.
        row: i32,
    },
    /// Aims at the column and places the requested number of held stones.
    CommitPick {
        /// Target column; clamped to the interior.
        column: i32,
        /// Requested number of stones; clamped to what the column can take.
        length: usize,
    },
    /// Advances the simulation by one discrete step.
    Tick,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// The world was reset to its initial state.
    Initialized,
    /// The turn state machine moved between steps.
    StepChanged {
        /// Step active before the transition.
        from: GameStep,
        /// Step active after the transition.
        to: GameStep,
    },
    /// Held stones were written into the grid.
    PickCommitted {
        /// Column that received the stones.
        column: i32,
        /// Row of the lowest placed stone.
        bottom_row: i32,
        /// Number of stones placed.
        length: usize,
    },
    /// A pick request was ignored.
    PickRejected {
        /// Reason the request was ignored.
        reason: PickRejection,
    },
    /// A cascade step marked stones and awarded score.
    CascadeScored {
        /// One-based depth of the cascade step within the current chain.
        sequent: u32,
        /// Number of stones marked by run detection.
        erased: u32,
        /// Score equation shown to the player.
        equation: ScoreEquation,
    },
    /// Marked stones were removed from the grid.
    StonesCleared {
        /// Number of cells emptied, jammers included.
        count: u32,
    },
    /// A placed pick fully settled and the turn counter advanced.
    TurnAdvanced {
        /// Turn counter after the increment.
        turn: u32,
    },
    /// Jammer stones were placed into the grid.
    JammersInjected {
        /// Cells that received a jammer.
        cells: Vec<CellCoord>,
    },
    /// The board filled up.
    GameOver {
        /// Final score of the game.
        score: u64,
        /// Best score seen since the world was created.
        high_score: u64,
    },
}

/// Reasons a pick request may be ignored by the world.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickRejection {
    /// The world is not awaiting a pick.
    #[error("picks are only accepted while awaiting a move")]
    InvalidStep,
    /// The clamped pick holds no stones.
    #[error("the pick holds no stones at the requested position")]
    EmptyPick,
}

#[cfg(test)]
mod tests {
    use super::{CellCoord, ScoreEquation, Stone, StoneKind, COLORS};

    #[test]
    fn only_hues_are_colored() {
        for kind in COLORS {
            assert!(kind.is_colored(), "{kind:?} should be colored");
        }
        for kind in [
            StoneKind::Wall,
            StoneKind::Jammer,
            StoneKind::Cursor,
            StoneKind::Limit,
        ] {
            assert!(!kind.is_colored(), "{kind:?} must never be colored");
        }
    }

    #[test]
    fn mark_erase_reports_first_mark_only() {
        let mut stone = Stone::new(StoneKind::Red);
        assert!(stone.mark_erase());
        assert!(!stone.mark_erase());
        assert!(stone.is_erase_pending());
    }

    #[test]
    fn score_equation_matches_chain_formula() {
        let first = ScoreEquation::for_cascade(1, 3);
        assert_eq!(first.score(), 6);
        assert_eq!(first.to_string(), "2x3=6.");

        let second = ScoreEquation::for_cascade(2, 4);
        assert_eq!(second.score(), 16);
        assert_eq!(second.to_string(), "4x4=16.");
    }

    #[test]
    fn score_equation_saturates_for_deep_chains() {
        let equation = ScoreEquation::for_cascade(80, 3);
        assert_eq!(equation.multiplier(), u64::MAX);
        assert_eq!(equation.score(), u64::MAX);
    }

    #[test]
    fn neighbours_surround_the_cell() {
        let neighbours = CellCoord::new(3, 4).orthogonal_neighbours();
        assert_eq!(
            neighbours,
            [
                CellCoord::new(2, 4),
                CellCoord::new(4, 4),
                CellCoord::new(3, 3),
                CellCoord::new(3, 5),
            ]
        );
    }
}
