#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Run detection across rows, columns and both diagonals.
//!
//! The scanner walks four families of scan lines over the grid. Every maximal
//! run of at least [`MIN_RUN_LENGTH`] identical colored stones is marked for
//! erasure, and any jammer orthogonally adjacent to a newly marked stone is
//! marked alongside it. Marking never removes stones; clearing is a separate
//! pass owned by the gravity system.

use cut_n_align_core::{CellCoord, Grid, StoneKind, BOARD_HEIGHT, BOARD_WIDTH, MIN_RUN_LENGTH};

/// The four directions scanned for runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScanFamily {
    /// Rows, left to right.
    Horizontal,
    /// Columns, top to bottom.
    Vertical,
    /// Diagonals stepping one column right and one row down.
    DownRight,
    /// Diagonals stepping one column right and one row up.
    UpRight,
}

impl ScanFamily {
    /// Every family, in scan order.
    pub const ALL: [Self; 4] = [
        Self::Horizontal,
        Self::Vertical,
        Self::DownRight,
        Self::UpRight,
    ];
}

/// Pure system that marks qualifying runs on a grid.
#[derive(Clone, Debug)]
pub struct RunScanner {
    families: Vec<(ScanFamily, Vec<Vec<CellCoord>>)>,
}

impl RunScanner {
    /// Creates a scanner for the engine's fixed board dimensions.
    #[must_use]
    pub fn new() -> Self {
        Self::with_dimensions(BOARD_WIDTH as i32, BOARD_HEIGHT as i32)
    }

    fn with_dimensions(width: i32, height: i32) -> Self {
        let families = ScanFamily::ALL
            .into_iter()
            .map(|family| (family, scan_lines(family, width, height)))
            .collect();
        Self { families }
    }

    /// Scan lines belonging to the family, each ordered left to right.
    #[must_use]
    pub fn lines(&self, family: ScanFamily) -> &[Vec<CellCoord>] {
        self.families
            .iter()
            .find(|(candidate, _)| *candidate == family)
            .map(|(_, lines)| lines.as_slice())
            .unwrap_or(&[])
    }

    /// Marks every qualifying run and returns how many run stones were newly marked.
    ///
    /// Jammers marked through adjacency are not included in the count. A stone
    /// that belongs to runs in several families is counted once.
    pub fn mark(&self, grid: &mut Grid) -> usize {
        let mut marked = 0;
        for (_, lines) in &self.families {
            for line in lines {
                marked += mark_line(grid, line);
            }
        }
        marked
    }
}

impl Default for RunScanner {
    fn default() -> Self {
        Self::new()
    }
}

fn mark_line(grid: &mut Grid, line: &[CellCoord]) -> usize {
    let mut marked = 0;
    let mut start = 0;
    for index in 1..=line.len() {
        if index < line.len() && extends_run(grid, line[start], line[index]) {
            continue;
        }
        if index - start >= MIN_RUN_LENGTH {
            for cell in &line[start..index] {
                if mark_at(grid, *cell) {
                    marked += 1;
                }
            }
        }
        start = index;
    }
    marked
}

fn extends_run(grid: &Grid, start: CellCoord, current: CellCoord) -> bool {
    match (grid.stone(start), grid.stone(current)) {
        (Some(first), Some(next)) => first.is_colored() && first.kind() == next.kind(),
        _ => false,
    }
}

fn mark_at(grid: &mut Grid, cell: CellCoord) -> bool {
    let newly_marked = match grid.at_mut(cell) {
        Some(Some(stone)) => stone.mark_erase(),
        _ => return false,
    };

    for neighbour in cell.orthogonal_neighbours() {
        if let Some(Some(stone)) = grid.at_mut(neighbour) {
            if stone.kind() == StoneKind::Jammer {
                let _ = stone.mark_erase();
            }
        }
    }

    newly_marked
}

fn scan_lines(family: ScanFamily, width: i32, height: i32) -> Vec<Vec<CellCoord>> {
    let walk = |start: CellCoord, columns: i32, rows: i32| -> Vec<CellCoord> {
        let mut line = Vec::new();
        let mut cell = start;
        while (0..width).contains(&cell.column()) && (0..height).contains(&cell.row()) {
            line.push(cell);
            cell = cell.offset(columns, rows);
        }
        line
    };

    match family {
        ScanFamily::Horizontal => (0..height)
            .map(|row| walk(CellCoord::new(0, row), 1, 0))
            .collect(),
        ScanFamily::Vertical => (0..width)
            .map(|column| walk(CellCoord::new(column, 0), 0, 1))
            .collect(),
        ScanFamily::DownRight => (0..height)
            .map(|row| CellCoord::new(0, row))
            .chain((1..width).map(|column| CellCoord::new(column, 0)))
            .map(|start| walk(start, 1, 1))
            .collect(),
        ScanFamily::UpRight => (0..height)
            .map(|row| CellCoord::new(0, row))
            .chain((1..width).map(|column| CellCoord::new(column, height - 1)))
            .map(|start| walk(start, 1, -1))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_cell_belongs_to_one_line_per_family() {
        let scanner = RunScanner::with_dimensions(5, 4);
        for family in ScanFamily::ALL {
            let mut seen = HashSet::new();
            for line in scanner.lines(family) {
                for cell in line {
                    assert!(seen.insert(*cell), "{cell:?} repeated in {family:?}");
                }
            }
            assert_eq!(seen.len(), 20, "{family:?} must cover the grid");
        }
    }

    #[test]
    fn diagonal_families_include_corner_singletons() {
        let scanner = RunScanner::with_dimensions(5, 4);
        let down_right = scanner.lines(ScanFamily::DownRight);
        assert_eq!(down_right.len(), 4 + 4);
        assert!(down_right
            .iter()
            .any(|line| line.as_slice() == [CellCoord::new(0, 3)]));
        assert!(down_right
            .iter()
            .any(|line| line.as_slice() == [CellCoord::new(4, 0)]));

        let up_right = scanner.lines(ScanFamily::UpRight);
        assert!(up_right
            .iter()
            .any(|line| line.as_slice() == [CellCoord::new(0, 0)]));
        assert!(up_right
            .iter()
            .any(|line| line.as_slice() == [CellCoord::new(4, 3)]));
    }

    #[test]
    fn lines_run_left_to_right() {
        let scanner = RunScanner::new();
        for family in ScanFamily::ALL {
            for line in scanner.lines(family) {
                for pair in line.windows(2) {
                    assert!(pair[0].column() <= pair[1].column());
                }
            }
        }
    }
}
