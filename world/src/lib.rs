#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for cut'n'align.
//!
//! The world owns the board, the look-ahead buffer, the held pick and the
//! turn state machine. Hosts mutate it exclusively through [`apply`] and read
//! it through the [`query`] module.

mod cascade;
mod pick;

use cut_n_align_core::{
    Command, Event, GameStep, Grid, PickRejection, ScoreEquation, WAIT_ERASE_TICKS,
};
use cut_n_align_system_jammer::JammerInjector;
use cut_n_align_system_run_scanner::RunScanner;
use cut_n_align_system_stone_supply::StoneSupply;
use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::pick::Pick;

const DEFAULT_SEED: u64 = 0x6375_745f_616c_6e67;

/// Tunable parameters supplied when constructing a [`World`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Config {
    seed: u64,
    erase_wait_ticks: u32,
}

impl Config {
    /// Creates a configuration from a random seed and the erase countdown length.
    #[must_use]
    pub const fn new(seed: u64, erase_wait_ticks: u32) -> Self {
        Self {
            seed,
            erase_wait_ticks,
        }
    }

    /// Seed for the world's stone and jammer randomness.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Ticks marked stones linger before they are cleared.
    #[must_use]
    pub const fn erase_wait_ticks(&self) -> u32 {
        self.erase_wait_ticks
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_SEED, WAIT_ERASE_TICKS)
    }
}

/// Represents the authoritative cut'n'align world state.
#[derive(Debug)]
pub struct World {
    config: Config,
    grid: Grid,
    supply: StoneSupply,
    pick: Pick,
    scanner: RunScanner,
    jammers: JammerInjector,
    rng: ChaCha8Rng,
    step: GameStep,
    wait: u32,
    sequent: u32,
    erase_count: u32,
    turn: u32,
    score: u64,
    high_score: u64,
    score_equation: Option<ScoreEquation>,
    ticks: u64,
}

impl World {
    /// Creates a world on the title step with a freshly walled board.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let grid = Grid::new();
        let pick = Pick::new(&grid);
        let mut world = Self {
            config,
            grid,
            supply: StoneSupply::new(),
            pick,
            scanner: RunScanner::new(),
            jammers: JammerInjector::new(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            step: GameStep::Title,
            wait: 0,
            sequent: 0,
            erase_count: 0,
            turn: 0,
            score: 0,
            high_score: 0,
            score_equation: None,
            ticks: 0,
        };
        world.supply.refill(world.turn, &mut world.rng);
        world
    }

    fn initialize(&mut self, out_events: &mut Vec<Event>) {
        self.grid.initialize();
        self.supply.clear();
        self.supply.refill(0, &mut self.rng);
        self.pick = Pick::new(&self.grid);
        self.wait = 0;
        self.sequent = 0;
        self.erase_count = 0;
        self.turn = 0;
        self.score = 0;
        self.score_equation = None;

        info!("board initialized, high score {}", self.high_score);
        out_events.push(Event::Initialized);
        self.transition(GameStep::Title, out_events);
    }

    fn commit_pick(&mut self, column: i32, length: usize, out_events: &mut Vec<Event>) {
        if self.step != GameStep::Move {
            reject(PickRejection::InvalidStep, out_events);
            return;
        }

        let mut candidate = self.pick;
        candidate.aim_length(&self.grid, column, length);
        let (column, bottom_row, length) =
            (candidate.column(), candidate.bottom_row(), candidate.length());
        if !candidate.place(&mut self.grid, &mut self.supply) {
            reject(PickRejection::EmptyPick, out_events);
            return;
        }

        self.pick = candidate;
        debug!("placed {length} stones in column {column} from row {bottom_row} upward");
        out_events.push(Event::PickCommitted {
            column,
            bottom_row,
            length,
        });
        self.transition(GameStep::Falling, out_events);
    }

    fn transition(&mut self, to: GameStep, out_events: &mut Vec<Event>) {
        if self.step == to {
            return;
        }
        let from = std::mem::replace(&mut self.step, to);
        debug!("step {from:?} -> {to:?}");
        out_events.push(Event::StepChanged { from, to });
    }

    fn is_full(&self) -> bool {
        self.grid
            .interior_columns()
            .all(|column| self.grid.height_at(column) <= 1)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

fn reject(reason: PickRejection, out_events: &mut Vec<Event>) {
    debug!("pick rejected: {reason}");
    out_events.push(Event::PickRejected { reason });
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Commands that are not valid in the current step leave the world untouched.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Initialize => world.initialize(out_events),
        Command::Start => {
            if world.step == GameStep::Title {
                world.transition(GameStep::Move, out_events);
            }
        }
        Command::AimPick { column, row } => {
            if world.step == GameStep::Move {
                world.pick.aim(&world.grid, column, row);
            }
        }
        Command::CommitPick { column, length } => world.commit_pick(column, length, out_events),
        Command::Tick => world.tick(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use cut_n_align_core::{GameStep, Grid, ScoreEquation, Stone};

    /// Read-only description of the held pick.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct PickView {
        /// Column the pick is aimed at.
        pub column: i32,
        /// Row receiving the lowest held stone.
        pub bottom_row: i32,
        /// Number of look-ahead stones currently held.
        pub length: usize,
    }

    /// Provides read-only access to the board.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Current step of the turn state machine.
    #[must_use]
    pub fn step(world: &World) -> GameStep {
        world.step
    }

    /// Score accumulated in the current game.
    #[must_use]
    pub fn score(world: &World) -> u64 {
        world.score
    }

    /// Best score seen since the world was constructed.
    #[must_use]
    pub fn high_score(world: &World) -> u64 {
        world.high_score
    }

    /// Number of completed turns.
    #[must_use]
    pub fn turn(world: &World) -> u32 {
        world.turn
    }

    /// Depth of the running cascade, zero between turns.
    #[must_use]
    pub fn sequent(world: &World) -> u32 {
        world.sequent
    }

    /// Stones marked by the latest cascade step.
    #[must_use]
    pub fn erase_count(world: &World) -> u32 {
        world.erase_count
    }

    /// Equation of the latest cascade step, if any scored this game.
    #[must_use]
    pub fn score_equation(world: &World) -> Option<ScoreEquation> {
        world.score_equation
    }

    /// Upcoming stones, front first; the pick holds a prefix of them.
    pub fn look_ahead(world: &World) -> impl Iterator<Item = &Stone> {
        world.supply.iter()
    }

    /// Captures where and how many stones the pick currently holds.
    #[must_use]
    pub fn pick(world: &World) -> PickView {
        PickView {
            column: world.pick.column(),
            bottom_row: world.pick.bottom_row(),
            length: world.pick.length(),
        }
    }

    /// Remaining erase countdown ticks.
    #[must_use]
    pub fn wait(world: &World) -> u32 {
        world.wait
    }

    /// Ticks processed since construction.
    #[must_use]
    pub fn ticks(world: &World) -> u64 {
        world.ticks
    }

    /// Mean stack top over the interior columns.
    #[must_use]
    pub fn height_average(world: &World) -> f32 {
        let (sum, count) = world
            .grid
            .interior_columns()
            .fold((0, 0), |(sum, count), column| {
                (sum + world.grid.height_at(column), count + 1)
            });
        if count == 0 {
            0.0
        } else {
            sum as f32 / count as f32
        }
    }

    /// Reports whether every interior column is filled to the ceiling.
    #[must_use]
    pub fn is_full(world: &World) -> bool {
        world.is_full()
    }
}
