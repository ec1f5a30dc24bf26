//! Plain-text rendering of the board for terminal output.

use std::fmt::Write as _;

use cut_n_align_core::{CellCoord, GameStep, Stone, StoneKind};
use cut_n_align_world::{query, World};

const EMPTY: char = '.';
const ERASING: char = '*';

/// Draws the board, the held pick and a status line.
///
/// Held stones are drawn in lowercase above the target column. In the move
/// step a trailing `<` marks the row of the topmost held stone.
#[must_use]
pub(crate) fn board(world: &World) -> String {
    let grid = query::grid(world);
    let step = query::step(world);
    let pick = query::pick(world);
    let held: Vec<Stone> = query::look_ahead(world).copied().collect();
    let cursor_row = pick.bottom_row - pick.length as i32 + 1;

    let mut out = String::new();
    for row in 0..grid.height() {
        for column in 0..grid.width() {
            let cell = CellCoord::new(column, row);
            let glyph = match grid.stone(cell) {
                Some(stone) if stone.is_erase_pending() => ERASING,
                Some(stone) => stone.kind().glyph(),
                None if step != GameStep::Title && column == pick.column => {
                    held_glyph(&held, pick.bottom_row - row)
                        .unwrap_or_else(|| background(row))
                }
                None => background(row),
            };
            out.push(glyph);
        }
        if step == GameStep::Move && pick.length > 0 && row == cursor_row {
            out.push_str(" <");
        }
        out.push('\n');
    }

    let _ = write!(
        out,
        "turn {} | score {} | high {} | {:?}",
        query::turn(world),
        query::score(world),
        query::high_score(world),
        step
    );
    if let Some(equation) = query::score_equation(world) {
        let _ = write!(out, " | {equation}");
    }
    out.push('\n');
    out
}

fn held_glyph(held: &[Stone], index: i32) -> Option<char> {
    let index = usize::try_from(index).ok()?;
    held.get(index)
        .map(|stone| stone.kind().glyph().to_ascii_lowercase())
}

fn background(row: i32) -> char {
    if row == 0 {
        StoneKind::Limit.glyph()
    } else {
        EMPTY
    }
}
