#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Clearing of marked stones and column gravity.
//!
//! [`fall_step`] moves every floating stone down by at most one row, which
//! lets hosts animate the drop tick by tick. [`settle`] repeats it until the
//! board is compact.

use cut_n_align_core::{CellCoord, Grid};

/// Empties every cell whose stone is marked for erasure.
///
/// Returns the number of cells that were emptied.
pub fn clear(grid: &mut Grid) -> usize {
    let coords: Vec<CellCoord> = grid.coords().collect();
    let mut cleared = 0;
    for cell in coords {
        if let Some(slot) = grid.at_mut(cell) {
            if slot.is_some_and(|stone| stone.is_erase_pending()) {
                *slot = None;
                cleared += 1;
            }
        }
    }
    cleared
}

/// Performs one gravity tick and reports whether any stone moved.
///
/// Each column is walked from the floor upward; an empty cell with an
/// occupied cell directly above swaps with it. A floating stack therefore
/// drops exactly one row per call.
pub fn fall_step(grid: &mut Grid) -> bool {
    let mut moved = false;
    for column in 0..grid.width() {
        for row in (1..grid.height()).rev() {
            let below = CellCoord::new(column, row);
            let above = CellCoord::new(column, row - 1);
            if grid.is_vacant(below) {
                if let Some(stone) = grid.at_mut(above).and_then(Option::take) {
                    grid.put(below, stone);
                    moved = true;
                }
            }
        }
    }
    moved
}

/// Applies gravity until nothing moves, returning the number of ticks that moved stones.
pub fn settle(grid: &mut Grid) -> usize {
    let mut ticks = 0;
    while fall_step(grid) {
        ticks += 1;
    }
    ticks
}

#[cfg(test)]
mod tests {
    use super::*;
    use cut_n_align_core::{Stone, StoneKind};

    #[test]
    fn floating_stack_drops_one_row_per_step() {
        let mut grid = Grid::new();
        grid.put(CellCoord::new(2, 5), Stone::new(StoneKind::Red));
        grid.put(CellCoord::new(2, 6), Stone::new(StoneKind::Blue));

        assert!(fall_step(&mut grid));
        assert!(grid.is_vacant(CellCoord::new(2, 5)));
        assert_eq!(
            grid.stone(CellCoord::new(2, 6)).map(Stone::kind),
            Some(StoneKind::Red)
        );
        assert_eq!(
            grid.stone(CellCoord::new(2, 7)).map(Stone::kind),
            Some(StoneKind::Blue)
        );
    }

    #[test]
    fn settle_counts_moving_ticks() {
        let mut grid = Grid::new();
        grid.put(CellCoord::new(4, 10), Stone::new(StoneKind::Green));

        assert_eq!(settle(&mut grid), 4);
        assert!(grid.stone(CellCoord::new(4, 14)).is_some());
        assert_eq!(settle(&mut grid), 0);
    }
}
