use cut_n_align_core::{CellCoord, Grid, PICK_MAX};
use cut_n_align_system_stone_supply::StoneSupply;

const PICK_MAX_ROWS: i32 = PICK_MAX as i32;
const INITIAL_COLUMN: i32 = 3;

/// Column and vertical extent of the stones currently held by the player.
///
/// `bottom_row` is where the lowest held stone is written. It stays at
/// `PICK_MAX - 1` until the column's stack climbs into the pick zone, after
/// which one free row is kept between the hand and the stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct Pick {
    column: i32,
    bottom_row: i32,
    length: usize,
    cursor_row: i32,
}

impl Pick {
    /// Pick aimed at the starting column with the cursor below the board.
    pub(crate) fn new(grid: &Grid) -> Self {
        let mut pick = Self {
            column: INITIAL_COLUMN,
            bottom_row: PICK_MAX_ROWS,
            length: 1,
            cursor_row: grid.height(),
        };
        pick.aim(grid, INITIAL_COLUMN, grid.height());
        pick
    }

    pub(crate) const fn column(&self) -> i32 {
        self.column
    }

    pub(crate) const fn bottom_row(&self) -> i32 {
        self.bottom_row
    }

    pub(crate) const fn length(&self) -> usize {
        self.length
    }

    /// Moves the pick under the cursor cell, clamping column and length.
    pub(crate) fn aim(&mut self, grid: &Grid, column: i32, row: i32) {
        self.column = column.clamp(1, grid.width() - 2);
        self.bottom_row = landing_row(grid, self.column);
        self.cursor_row = row;

        let span = (self.bottom_row - row.max(0) + 1).clamp(0, PICK_MAX_ROWS);
        self.length = usize::try_from(span).unwrap_or(0);
    }

    /// Aims at `column` holding `length` stones, as far as the column allows.
    pub(crate) fn aim_length(&mut self, grid: &Grid, column: i32, length: usize) {
        let column = column.clamp(1, grid.width() - 2);
        let requested = i32::try_from(length.min(PICK_MAX)).unwrap_or(0);
        let row = landing_row(grid, column) - requested + 1;
        self.aim(grid, column, row);
    }

    /// Re-applies the stored cursor row after the board changed underneath the pick.
    pub(crate) fn reaim(&mut self, grid: &Grid) {
        self.aim(grid, self.column, self.cursor_row);
    }

    /// Writes the held stones into the grid, lowest stone first.
    ///
    /// Returns `false` without touching anything when the pick is empty.
    ///
    /// # Panics
    ///
    /// Panics if a target cell is occupied or off the grid, which means the
    /// landing row was computed against a different board.
    pub(crate) fn place(&mut self, grid: &mut Grid, supply: &mut StoneSupply) -> bool {
        if self.length == 0 {
            return false;
        }

        let stones = supply.take(self.length);
        assert_eq!(
            stones.len(),
            self.length,
            "look-ahead ran dry while placing a pick"
        );

        for (cell, stone) in self.cells().zip(stones) {
            let Some(slot) = grid.at_mut(cell) else {
                panic!("pick target {cell:?} lies off the grid");
            };
            if let Some(occupant) = slot.as_ref() {
                panic!("pick target {cell:?} already holds {occupant:?}");
            }
            *slot = Some(stone);
        }

        self.bottom_row -= self.length as i32;
        self.length = 1;
        true
    }

    fn cells(&self) -> impl Iterator<Item = CellCoord> {
        let column = self.column;
        let bottom_row = self.bottom_row;
        (0..self.length as i32).map(move |offset| CellCoord::new(column, bottom_row - offset))
    }
}

fn landing_row(grid: &Grid, column: i32) -> i32 {
    let height = grid.height_at(column);
    PICK_MAX_ROWS - 1 + (height - PICK_MAX_ROWS - 1).min(0)
}
