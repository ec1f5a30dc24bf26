#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Look-ahead buffer of upcoming stones with a turn-based difficulty ramp.

use std::collections::VecDeque;

use cut_n_align_core::{Stone, StoneKind, COLORS, RESERVE_NUM};
use rand::{seq::SliceRandom, Rng};

const BASE_COLOR_COUNT: usize = 3;
const UNLOCK_THRESHOLDS: [u32; 3] = [24, 48, 72];

/// Colors available to stone generation on the given turn.
///
/// Three colors are unlocked at first and one more once the turn passes each
/// of 24, 48 and 72.
#[must_use]
pub fn unlocked_colors(turn: u32) -> &'static [StoneKind] {
    let unlocked = UNLOCK_THRESHOLDS
        .iter()
        .filter(|threshold| turn > **threshold)
        .count();
    &COLORS[..BASE_COLOR_COUNT + unlocked]
}

/// Ordered queue of generated stones waiting to be picked.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StoneSupply {
    look_ahead: VecDeque<Stone>,
}

impl StoneSupply {
    /// Creates an empty supply; call [`StoneSupply::refill`] before drawing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends whole shuffled batches of the unlocked colors until the reserve is met.
    ///
    /// Batches are never split, so the buffer may end up longer than
    /// [`RESERVE_NUM`].
    pub fn refill<R>(&mut self, turn: u32, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        while self.look_ahead.len() < RESERVE_NUM {
            let mut batch = unlocked_colors(turn).to_vec();
            batch.shuffle(rng);
            self.look_ahead
                .extend(batch.into_iter().map(Stone::new));
        }
    }

    /// Removes up to `count` stones from the front of the buffer.
    pub fn take(&mut self, count: usize) -> Vec<Stone> {
        let count = count.min(self.look_ahead.len());
        self.look_ahead.drain(..count).collect()
    }

    /// Stones in draw order, front first.
    pub fn iter(&self) -> impl Iterator<Item = &Stone> {
        self.look_ahead.iter()
    }

    /// Number of buffered stones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.look_ahead.len()
    }

    /// Reports whether the buffer holds no stones.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.look_ahead.is_empty()
    }

    /// Discards every buffered stone.
    pub fn clear(&mut self) {
        self.look_ahead.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn color_unlocks_follow_turn_thresholds() {
        assert_eq!(unlocked_colors(0).len(), 3);
        assert_eq!(unlocked_colors(24).len(), 3);
        assert_eq!(unlocked_colors(25).len(), 4);
        assert_eq!(unlocked_colors(48).len(), 4);
        assert_eq!(unlocked_colors(49).len(), 5);
        assert_eq!(unlocked_colors(73).len(), 6);
        assert_eq!(unlocked_colors(u32::MAX).len(), 6);
    }

    #[test]
    fn take_never_exceeds_buffer() {
        let mut supply = StoneSupply::new();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        supply.refill(0, &mut rng);

        let taken = supply.take(100);
        assert_eq!(taken.len(), RESERVE_NUM);
        assert!(supply.is_empty());
    }
}
