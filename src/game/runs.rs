//! Directional run detection.
//!
//! Each scan asks whether `run_length` cells, starting at `(start_row,
//! start_col)` and stepping in one direction, all hold `player`'s piece.
//! Row 0 is the top of the grid, so "north" means decreasing row index.
//! A run that would leave the grid is never a match.

use super::board::Grid;
use super::player::Player;

/// The four directions a run is scanned in. The other four are covered by
/// starting the scan from the opposite end of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    East,
    South,
    NorthEast,
    SouthEast,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::East,
        Direction::South,
        Direction::NorthEast,
        Direction::SouthEast,
    ];
}

/// True if `run_length` cells starting at `start` stay below `limit`.
/// Written without `start + run_length` so huge inputs cannot overflow.
fn fits(start: usize, run_length: usize, limit: usize) -> bool {
    start < limit && run_length <= limit - start
}

/// Dispatch to the scan for `direction`.
pub fn run_in(
    direction: Direction,
    player: Player,
    start_row: usize,
    start_col: usize,
    grid: &Grid,
    run_length: usize,
) -> bool {
    match direction {
        Direction::East => run_east(player, start_row, start_col, grid, run_length),
        Direction::South => run_south(player, start_row, start_col, grid, run_length),
        Direction::NorthEast => run_northeast(player, start_row, start_col, grid, run_length),
        Direction::SouthEast => run_southeast(player, start_row, start_col, grid, run_length),
    }
}

/// `run_length` cells at `(start_row, start_col + i)`.
pub fn run_east(
    player: Player,
    start_row: usize,
    start_col: usize,
    grid: &Grid,
    run_length: usize,
) -> bool {
    if run_length == 0 || start_row >= grid.height() {
        return false;
    }
    if !fits(start_col, run_length, grid.width()) {
        return false;
    }
    let cell = player.to_cell();
    (0..run_length).all(|i| grid.get(start_row, start_col + i) == cell)
}

/// `run_length` cells at `(start_row + i, start_col)`.
pub fn run_south(
    player: Player,
    start_row: usize,
    start_col: usize,
    grid: &Grid,
    run_length: usize,
) -> bool {
    if run_length == 0 || !fits(start_row, run_length, grid.height()) {
        return false;
    }
    if start_col >= grid.width() {
        return false;
    }
    let cell = player.to_cell();
    (0..run_length).all(|i| grid.get(start_row + i, start_col) == cell)
}

/// `run_length` cells at `(start_row - i, start_col + i)`.
pub fn run_northeast(
    player: Player,
    start_row: usize,
    start_col: usize,
    grid: &Grid,
    run_length: usize,
) -> bool {
    // start_row - (run_length - 1) must stay >= 0
    if run_length == 0 || start_row >= grid.height() || run_length - 1 > start_row {
        return false;
    }
    if !fits(start_col, run_length, grid.width()) {
        return false;
    }
    let cell = player.to_cell();
    (0..run_length).all(|i| grid.get(start_row - i, start_col + i) == cell)
}

/// `run_length` cells at `(start_row + i, start_col + i)`.
pub fn run_southeast(
    player: Player,
    start_row: usize,
    start_col: usize,
    grid: &Grid,
    run_length: usize,
) -> bool {
    if run_length == 0 || !fits(start_row, run_length, grid.height()) {
        return false;
    }
    if !fits(start_col, run_length, grid.width()) {
        return false;
    }
    let cell = player.to_cell();
    (0..run_length).all(|i| grid.get(start_row + i, start_col + i) == cell)
}
