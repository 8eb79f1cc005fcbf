#![cfg(feature = "std")]

//! Text rendering for both games.

use std::fmt::Write;

use crate::{
    board::{Board, CellState},
    coordinate::{Coordinate, MAX_ROW_INDEX},
    tictactoe::{Grid, GRID_SIZE},
};

fn cell_symbol(state: CellState) -> char {
    match state {
        CellState::Empty => '.',
        CellState::Occupied => 'S',
        CellState::Hit => 'X',
        CellState::Miss => 'M',
    }
}

/// Render a board with column numbers across the top and row letters down
/// the side. Ships are drawn only when `reveal` is set.
pub fn render_board(board: &Board, reveal: bool) -> String {
    let size = board.size();
    let mut out = String::new();
    out.push_str("  ");
    for c in 1..=size {
        let _ = write!(out, "{:>2} ", c);
    }
    out.push('\n');
    for r in 0..size {
        let label = if r <= MAX_ROW_INDEX { (b'A' + r as u8) as char } else { '?' };
        let _ = write!(out, "{} ", label);
        for c in 0..size {
            let state = board
                .visible_cell(Coordinate::new(r, c), reveal)
                .unwrap_or(CellState::Empty);
            let _ = write!(out, " {} ", cell_symbol(state));
        }
        out.push('\n');
    }
    if reveal {
        out.push_str("Legend: S=Ship  X=Hit  M=Miss  .=Water\n");
    } else {
        out.push_str("Legend: X=Hit  M=Miss  .=Unknown\n");
    }
    out
}

/// Both boards as the human sees them: their own fleet, then the hidden one.
pub fn render_player_view(own: &Board, opponent: &Board) -> String {
    format!(
        "-- Player Board --\n{}\n-- AI Board (hidden) --\n{}",
        render_board(own, true),
        render_board(opponent, false)
    )
}

/// Render a tic-tac-toe grid with 1-based row and column labels.
pub fn render_grid(grid: &Grid) -> String {
    let mut out = String::from("  1 2 3\n");
    for r in 0..GRID_SIZE {
        let _ = write!(out, "{} ", r + 1);
        for c in 0..GRID_SIZE {
            match grid.get(r, c) {
                Some(mark) => {
                    let _ = write!(out, "{}", mark);
                }
                None => out.push(' '),
            }
            if c + 1 < GRID_SIZE {
                out.push('|');
            }
        }
        out.push('\n');
        if r + 1 < GRID_SIZE {
            out.push_str("  -+-+-\n");
        }
    }
    out
}
