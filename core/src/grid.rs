//! Fixed-size stone grid bordered by permanent walls.

use serde::{Deserialize, Serialize};

use crate::{CellCoord, Stone, BOARD_HEIGHT, BOARD_WIDTH};

const WIDTH: i32 = BOARD_WIDTH as i32;
const HEIGHT: i32 = BOARD_HEIGHT as i32;

/// Contents of a single grid cell; `None` is an empty cell.
pub type Cell = Option<Stone>;

/// Column-major storage of every cell on the board.
///
/// All cell access goes through [`Grid::at`] and [`Grid::at_mut`], which
/// reject coordinates outside the board instead of panicking. The outermost
/// columns and the bottom row hold [`crate::StoneKind::Wall`] stones once the
/// grid is initialized.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    cells: [[Cell; BOARD_HEIGHT]; BOARD_WIDTH],
}

impl Grid {
    /// Creates an initialized grid: empty interior, walled border.
    #[must_use]
    pub fn new() -> Self {
        let mut grid = Self::empty();
        grid.initialize();
        grid
    }

    /// Creates a grid with no stones at all, walls included.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            cells: [[None; BOARD_HEIGHT]; BOARD_WIDTH],
        }
    }

    /// Clears every cell, then stamps the wall floor and both side walls.
    pub fn initialize(&mut self) {
        for column in &mut self.cells {
            column.fill(None);
        }
        for column in 0..WIDTH {
            self.put(CellCoord::new(column, HEIGHT - 1), Stone::wall());
        }
        for row in 0..HEIGHT {
            self.put(CellCoord::new(0, row), Stone::wall());
            self.put(CellCoord::new(WIDTH - 1, row), Stone::wall());
        }
    }

    /// Number of columns, walls included.
    #[must_use]
    pub const fn width(&self) -> i32 {
        WIDTH
    }

    /// Number of rows, floor included.
    #[must_use]
    pub const fn height(&self) -> i32 {
        HEIGHT
    }

    /// Columns that may hold player stones, left to right.
    pub fn interior_columns(&self) -> impl Iterator<Item = i32> {
        1..WIDTH - 1
    }

    /// Returns the cell at the coordinate, or `None` when it lies off the grid.
    #[must_use]
    pub fn at(&self, cell: CellCoord) -> Option<&Cell> {
        let (column, row) = index(cell)?;
        Some(&self.cells[column][row])
    }

    /// Returns the mutable cell at the coordinate, or `None` when it lies off the grid.
    pub fn at_mut(&mut self, cell: CellCoord) -> Option<&mut Cell> {
        let (column, row) = index(cell)?;
        Some(&mut self.cells[column][row])
    }

    /// Returns the stone at the coordinate when the cell is on the grid and occupied.
    #[must_use]
    pub fn stone(&self, cell: CellCoord) -> Option<&Stone> {
        self.at(cell).and_then(Option::as_ref)
    }

    /// Reports whether the coordinate is on the grid and holds no stone.
    #[must_use]
    pub fn is_vacant(&self, cell: CellCoord) -> bool {
        matches!(self.at(cell), Some(None))
    }

    /// Writes a stone into an on-grid cell, replacing whatever it held.
    ///
    /// # Panics
    ///
    /// Panics when the coordinate lies off the grid; internal callers only
    /// address cells they have already bounds-checked.
    pub fn put(&mut self, cell: CellCoord, stone: Stone) {
        match self.at_mut(cell) {
            Some(slot) => *slot = Some(stone),
            None => panic!("cell {cell:?} lies outside the grid"),
        }
    }

    /// Row of the topmost occupied cell in the column, or the grid height when empty.
    #[must_use]
    pub fn height_at(&self, column: i32) -> i32 {
        (0..HEIGHT)
            .find(|row| self.stone(CellCoord::new(column, *row)).is_some())
            .unwrap_or(HEIGHT)
    }

    /// Iterates over every coordinate in row-major order, top row first.
    pub fn coords(&self) -> impl Iterator<Item = CellCoord> {
        (0..HEIGHT).flat_map(|row| (0..WIDTH).map(move |column| CellCoord::new(column, row)))
    }

    /// Counts the occupied cells matching the predicate.
    #[must_use]
    pub fn count_stones<F>(&self, mut predicate: F) -> usize
    where
        F: FnMut(&Stone) -> bool,
    {
        self.cells
            .iter()
            .flatten()
            .flatten()
            .filter(|stone| predicate(*stone))
            .count()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

fn index(cell: CellCoord) -> Option<(usize, usize)> {
    let column = usize::try_from(cell.column()).ok()?;
    let row = usize::try_from(cell.row()).ok()?;
    (column < BOARD_WIDTH && row < BOARD_HEIGHT).then_some((column, row))
}
