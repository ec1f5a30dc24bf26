//! Seeded random player that drives the world without human input.

use cut_n_align_core::{Command, Event, PickRejection, PICK_MAX};
use cut_n_align_world::{self as world, query, World};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const STREAM_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Chooses picks at random from its own deterministic stream.
#[derive(Debug)]
pub(crate) struct Autoplayer {
    rng: ChaCha8Rng,
}

impl Autoplayer {
    /// Creates a player whose stream is derived from, but distinct to, the world seed.
    pub(crate) fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed ^ STREAM_SALT),
        }
    }

    /// Commits one pick, trying columns in random order until one accepts it.
    ///
    /// Returns the events of the accepted commit, or `None` when every column
    /// rejected the pick.
    pub(crate) fn play(&mut self, world: &mut World) -> Option<Vec<Event>> {
        let length = self.rng.gen_range(1..=PICK_MAX);
        let mut columns: Vec<i32> = query::grid(world).interior_columns().collect();
        columns.shuffle(&mut self.rng);

        for column in columns {
            let mut events = Vec::new();
            world::apply(world, Command::CommitPick { column, length }, &mut events);

            let rejected = events.iter().any(|event| {
                matches!(
                    event,
                    Event::PickRejected {
                        reason: PickRejection::EmptyPick
                    }
                )
            });
            if !rejected {
                return Some(events);
            }
            log::debug!("column {column} cannot take a pick");
        }
        None
    }
}
