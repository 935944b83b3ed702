use std::fmt;

use tracing::debug;

use super::player::Player;
use super::runs::{run_in, Direction};
use crate::error::{BoardError, MoveError};

pub const STANDARD_WIDTH: usize = 7;
pub const STANDARD_HEIGHT: usize = 6;

/// Number of identical pieces in a line needed to win.
pub const WIN_LENGTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    PlayerA,
    PlayerB,
}

impl Cell {
    /// The player occupying this cell, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::PlayerA => Some(Player::A),
            Cell::PlayerB => Some(Player::B),
        }
    }

    pub fn symbol(self) -> char {
        self.player().map_or(' ', Player::symbol)
    }
}

/// Fixed-size matrix of cells, stored row-major. Row 0 is the top.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    fn new(width: usize, height: usize) -> Self {
        Grid {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the cell at a specific position.
    ///
    /// Panics if `row` or `col` is outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        assert!(row < self.height && col < self.width, "cell ({row}, {col}) out of range");
        self.cells[row * self.width + col]
    }

    fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row * self.width + col] = cell;
    }
}

/// A Connect Four board of arbitrary size.
///
/// Alongside the grid the board tracks how many pieces sit in each column,
/// so that dropping and lifting a piece never needs to scan.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    grid: Grid,
    heights: Vec<usize>,
}

impl Board {
    /// Create an empty `width` x `height` board.
    pub fn new(width: usize, height: usize) -> Result<Self, BoardError> {
        if width == 0 || height == 0 {
            return Err(BoardError::InvalidDimensions { width, height });
        }
        Ok(Board {
            grid: Grid::new(width, height),
            heights: vec![0; width],
        })
    }

    /// The usual 7 x 6 board.
    pub fn standard() -> Self {
        Board {
            grid: Grid::new(STANDARD_WIDTH, STANDARD_HEIGHT),
            heights: vec![0; STANDARD_WIDTH],
        }
    }

    pub fn width(&self) -> usize {
        self.grid.width
    }

    pub fn height(&self) -> usize {
        self.grid.height
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Get the cell at a specific position.
    /// Row 0 is the top, row `height - 1` is the bottom.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.grid.get(row, col)
    }

    /// Number of pieces currently in `col` (0 for columns off the board).
    pub fn column_height(&self, col: usize) -> usize {
        self.heights.get(col).copied().unwrap_or(0)
    }

    /// True if `col` is on the board and its top cell is empty.
    pub fn allows_move(&self, col: usize) -> bool {
        col < self.width() && self.heights[col] < self.height()
    }

    /// True once no column accepts another piece.
    pub fn is_full(&self) -> bool {
        (0..self.width()).all(|col| !self.allows_move(col))
    }

    /// Drop `player`'s piece into `col` and return the row it landed in.
    ///
    /// An illegal request (column full or off the board) leaves the board
    /// untouched and returns `None`. Check [`Board::allows_move`] first.
    pub fn add_move(&mut self, col: usize, player: Player) -> Option<usize> {
        if !self.allows_move(col) {
            return None;
        }
        let row = self.height() - 1 - self.heights[col];
        self.grid.set(row, col, player.to_cell());
        self.heights[col] += 1;
        Some(row)
    }

    /// Like [`Board::add_move`], but reports why a move was refused.
    pub fn try_add_move(&mut self, col: usize, player: Player) -> Result<usize, MoveError> {
        if col >= self.width() {
            return Err(MoveError::InvalidColumn(col));
        }
        self.add_move(col, player).ok_or(MoveError::ColumnFull(col))
    }

    /// Lift the top piece out of `col` and return whose it was.
    ///
    /// This is **not** a general undo. It removes whatever sits on top of the
    /// column, so it reverses an [`Board::add_move`] only when no other piece
    /// has landed in the same column since. Pair each speculative add with
    /// its `del_move` before touching that column again.
    pub fn del_move(&mut self, col: usize) -> Option<Player> {
        if col >= self.width() || self.heights[col] == 0 {
            return None;
        }
        let row = self.height() - self.heights[col];
        let removed = self.grid.get(row, col).player();
        self.grid.set(row, col, Cell::Empty);
        self.heights[col] -= 1;
        removed
    }

    /// Empty every cell.
    pub fn clear(&mut self) {
        self.grid.cells.fill(Cell::Empty);
        self.heights.fill(0);
    }

    /// Replay a string of column digits, alternating players and starting
    /// with [`Player::A`].
    ///
    /// Digits naming a column off the board (or a full column) are skipped
    /// but still consume a turn. Any character that is not a decimal digit
    /// rejects the whole string before a single piece is placed.
    pub fn set_board(&mut self, moves: &str) -> Result<(), BoardError> {
        let columns = moves
            .chars()
            .enumerate()
            .map(|(index, found)| {
                found
                    .to_digit(10)
                    .map(|d| d as usize)
                    .ok_or(BoardError::InvalidMoveString { index, found })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut player = Player::A;
        for col in columns {
            self.add_move(col, player);
            player = player.other();
        }
        Ok(())
    }

    /// True if `player` has `WIN_LENGTH` pieces in a line anywhere.
    pub fn wins_for(&self, player: Player) -> bool {
        (0..self.height()).any(|row| {
            (0..self.width()).any(|col| {
                Direction::ALL
                    .iter()
                    .any(|&dir| run_in(dir, player, row, col, &self.grid, WIN_LENGTH))
            })
        })
    }

    /// Every column, in ascending order, where `player` would win by moving
    /// right now.
    ///
    /// Each candidate is played and lifted again, so the board is left
    /// exactly as it was found.
    pub fn cols_to_win(&mut self, player: Player) -> Vec<usize> {
        let mut winning = Vec::new();
        for col in 0..self.width() {
            if self.add_move(col, player).is_none() {
                continue;
            }
            if self.wins_for(player) {
                winning.push(col);
            }
            self.del_move(col);
        }
        winning
    }

    /// Columns ordered by distance from the centre, nearer first, with
    /// ties going to the lower index. For width 7: `[3, 2, 4, 1, 5, 0, 6]`.
    pub fn preference_order(&self) -> Vec<usize> {
        let width = self.width();
        let mut order: Vec<usize> = (0..width).collect();
        // Doubled distance keeps even widths (centre between two columns) integral.
        order.sort_by_key(|&col| ((2 * col).abs_diff(width - 1), col));
        order
    }

    /// Pick a column for `player` with one ply of lookahead.
    ///
    /// Takes an immediate win if there is one, otherwise blocks the
    /// opponent's immediate win, otherwise plays the most central open
    /// column. Returns `None` only when the board is full.
    pub fn ai_move(&mut self, player: Player) -> Option<usize> {
        if let Some(&col) = self.cols_to_win(player).first() {
            debug!(player = %player.symbol(), col, "taking winning column");
            return Some(col);
        }
        if let Some(&col) = self.cols_to_win(player.other()).first() {
            debug!(player = %player.symbol(), col, "blocking opponent");
            return Some(col);
        }
        let col = self
            .preference_order()
            .into_iter()
            .find(|&col| self.allows_move(col));
        debug!(player = %player.symbol(), ?col, "no tactic, choosing by preference");
        col
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

/// Rows top to bottom as `|X| |O|`, a dashed base `2 * width + 1` wide, then
/// the column numbers (mod 10). No trailing newline.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height() {
            f.write_str("|")?;
            for col in 0..self.width() {
                write!(f, "{}|", self.get(row, col).symbol())?;
            }
            f.write_str("\n")?;
        }
        f.write_str(&"-".repeat(2 * self.width() + 1))?;
        f.write_str("\n ")?;
        for col in 0..self.width() {
            write!(f, "{} ", col % 10)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn snapshot(board: &Board) -> Vec<Cell> {
        let mut cells = Vec::new();
        for row in 0..board.height() {
            for col in 0..board.width() {
                cells.push(board.get(row, col));
            }
        }
        cells
    }

    fn assert_gravity(board: &Board) {
        for col in 0..board.width() {
            let mut seen_piece = false;
            for row in 0..board.height() {
                let occupied = board.get(row, col) != Cell::Empty;
                assert!(
                    !seen_piece || occupied,
                    "gap below a piece in column {col} at row {row}"
                );
                seen_piece |= occupied;
            }
            let count = (0..board.height())
                .filter(|&row| board.get(row, col) != Cell::Empty)
                .count();
            assert_eq!(count, board.column_height(col));
        }
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(7, 6).unwrap();
        for row in 0..6 {
            for col in 0..7 {
                assert_eq!(board.get(row, col), Cell::Empty);
            }
        }
        assert!(!board.wins_for(Player::A));
        assert!(!board.wins_for(Player::B));
        assert!(!board.is_full());
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert_eq!(
            Board::new(0, 6),
            Err(BoardError::InvalidDimensions { width: 0, height: 6 })
        );
        assert!(Board::new(7, 0).is_err());
        assert!(Board::new(1, 1).is_ok());
    }

    #[test]
    fn test_add_move_stacks_from_bottom() {
        let mut board = Board::standard();
        assert_eq!(board.add_move(3, Player::A), Some(5));
        assert_eq!(board.add_move(3, Player::B), Some(4));
        assert_eq!(board.get(5, 3), Cell::PlayerA);
        assert_eq!(board.get(4, 3), Cell::PlayerB);
        assert_eq!(board.column_height(3), 2);
    }

    #[test]
    fn test_add_move_on_illegal_column_is_noop() {
        let mut board = Board::standard();
        for _ in 0..6 {
            board.add_move(0, Player::A);
        }
        let before = board.clone();
        assert_eq!(board.add_move(0, Player::B), None);
        assert_eq!(board.add_move(7, Player::B), None);
        assert_eq!(board.add_move(usize::MAX, Player::B), None);
        assert_eq!(board, before);
    }

    #[test]
    fn test_try_add_move_errors() {
        let mut board = Board::new(2, 1).unwrap();
        assert_eq!(board.try_add_move(0, Player::A), Ok(0));
        assert_eq!(board.try_add_move(0, Player::B), Err(MoveError::ColumnFull(0)));
        assert_eq!(board.try_add_move(2, Player::B), Err(MoveError::InvalidColumn(2)));
    }

    #[test]
    fn test_allows_move() {
        let mut board = Board::standard();
        assert!(board.allows_move(0));
        assert!(board.allows_move(6));
        assert!(!board.allows_move(7));
        for _ in 0..5 {
            board.add_move(2, Player::A);
        }
        assert!(board.allows_move(2));
        board.add_move(2, Player::B);
        assert!(!board.allows_move(2));
    }

    #[test]
    fn test_del_move_removes_top_piece() {
        let mut board = Board::standard();
        board.add_move(4, Player::A);
        board.add_move(4, Player::B);
        assert_eq!(board.del_move(4), Some(Player::B));
        assert_eq!(board.get(4, 4), Cell::Empty);
        assert_eq!(board.get(5, 4), Cell::PlayerA);
        assert_eq!(board.del_move(4), Some(Player::A));
        assert_eq!(board.del_move(4), None);
        assert_eq!(board.del_move(42), None);
    }

    #[test]
    fn test_add_then_del_restores_board() {
        let mut board = Board::standard();
        board.set_board("3344201").unwrap();
        let before = board.clone();
        for col in 0..7 {
            board.add_move(col, Player::B);
            board.del_move(col);
            assert_eq!(board, before);
        }
    }

    #[test]
    fn test_full_board() {
        let mut board = Board::standard();
        for col in 0..7 {
            for _ in 0..6 {
                board.add_move(col, Player::A);
            }
        }
        assert!(board.is_full());
        assert!((0..7).all(|col| !board.allows_move(col)));
    }

    #[test]
    fn test_clear() {
        let mut board = Board::standard();
        board.set_board("0123456").unwrap();
        board.clear();
        assert_eq!(board, Board::standard());
    }

    #[test]
    fn test_set_board_alternates_players() {
        let mut board = Board::standard();
        board.set_board("0001112").unwrap();

        assert_eq!(board.get(5, 0), Cell::PlayerA);
        assert_eq!(board.get(4, 0), Cell::PlayerB);
        assert_eq!(board.get(3, 0), Cell::PlayerA);
        assert_eq!(board.get(5, 1), Cell::PlayerB);
        assert_eq!(board.get(4, 1), Cell::PlayerA);
        assert_eq!(board.get(3, 1), Cell::PlayerB);
        assert_eq!(board.get(5, 2), Cell::PlayerA);
        assert_eq!(board.column_height(2), 1);
        assert_eq!(board.get(4, 2), Cell::Empty);
    }

    #[test]
    fn test_set_board_skips_out_of_range_but_keeps_turn() {
        let mut board = Board::new(3, 3).unwrap();
        board.set_board("091").unwrap();
        assert_eq!(board.get(2, 0), Cell::PlayerA);
        // the '9' was O's turn, so column 1 gets X
        assert_eq!(board.get(2, 1), Cell::PlayerA);
        assert_eq!(board.column_height(0) + board.column_height(1), 2);
    }

    #[test]
    fn test_set_board_rejects_non_digit() {
        let mut board = Board::standard();
        let err = board.set_board("01x2").unwrap_err();
        assert_eq!(err, BoardError::InvalidMoveString { index: 2, found: 'x' });
        assert_eq!(board, Board::standard());
    }

    #[test]
    fn test_horizontal_win() {
        let mut board = Board::standard();
        for col in 0..4 {
            board.add_move(col, Player::A);
        }
        assert!(board.wins_for(Player::A));
        assert!(!board.wins_for(Player::B));
    }

    #[test]
    fn test_vertical_win() {
        let mut board = Board::standard();
        for _ in 0..4 {
            board.add_move(3, Player::B);
        }
        assert!(board.wins_for(Player::B));
    }

    #[test]
    fn test_diagonal_wins() {
        let mut rising = Board::standard();
        rising.set_board("01123223633").unwrap();
        assert!(rising.wins_for(Player::A));

        let mut falling = Board::standard();
        falling.set_board("32210110600").unwrap();
        assert!(falling.wins_for(Player::A));
    }

    #[test]
    fn test_no_win_with_three() {
        let mut board = Board::standard();
        for col in 0..3 {
            board.add_move(col, Player::A);
        }
        assert!(!board.wins_for(Player::A));
    }

    #[test]
    fn test_wins_on_wide_short_board() {
        let mut board = Board::new(10, 1).unwrap();
        for col in 6..10 {
            board.add_move(col, Player::B);
        }
        assert!(board.wins_for(Player::B));
        assert!(!board.is_full());
    }

    #[test]
    fn test_board_smaller_than_win_length_never_wins() {
        let mut board = Board::new(3, 3).unwrap();
        for col in 0..3 {
            for _ in 0..3 {
                board.add_move(col, Player::A);
            }
        }
        assert!(board.is_full());
        assert!(!board.wins_for(Player::A));
    }

    #[test]
    fn test_cols_to_win_finds_all_and_restores_board() {
        let mut board = Board::standard();
        // X on the bottom row at 1, 2, 3 with O on top of 1 and 2
        board.set_board("11223").unwrap();
        let before = snapshot(&board);
        assert_eq!(board.cols_to_win(Player::A), vec![0, 4]);
        assert_eq!(snapshot(&board), before);
        assert!(board.cols_to_win(Player::B).is_empty());
        assert_eq!(snapshot(&board), before);
    }

    #[test]
    fn test_cols_to_win_empty_board() {
        let mut board = Board::standard();
        assert!(board.cols_to_win(Player::A).is_empty());
        assert_eq!(board, Board::standard());
    }

    #[test]
    fn test_preference_order() {
        let order = |width| Board::new(width, 1).unwrap().preference_order();
        assert_eq!(order(7), vec![3, 2, 4, 1, 5, 0, 6]);
        assert_eq!(order(1), vec![0]);
        assert_eq!(order(2), vec![0, 1]);
        assert_eq!(order(6), vec![2, 3, 1, 4, 0, 5]);
        assert_eq!(order(8), vec![3, 4, 2, 5, 1, 6, 0, 7]);
    }

    #[test]
    fn test_ai_move_empty_board_takes_center() {
        let mut board = Board::standard();
        assert_eq!(board.ai_move(Player::A), Some(3));
        assert_eq!(board, Board::standard());
    }

    #[test]
    fn test_ai_move_blocks_vertical_three() {
        let mut board = Board::standard();
        for _ in 0..3 {
            board.add_move(5, Player::B);
        }
        board.add_move(0, Player::A);
        let before = board.clone();
        assert_eq!(board.ai_move(Player::A), Some(5));
        assert_eq!(board, before);
    }

    #[test]
    fn test_ai_move_prefers_win_over_block() {
        let mut board = Board::standard();
        for _ in 0..3 {
            board.add_move(0, Player::A);
            board.add_move(6, Player::B);
        }
        assert_eq!(board.ai_move(Player::A), Some(0));
        assert_eq!(board.ai_move(Player::B), Some(6));
    }

    #[test]
    fn test_ai_move_skips_full_preferred_columns() {
        let mut board = Board::standard();
        // Fill column 3 without creating a threat
        board.set_board("333333").unwrap();
        assert_eq!(board.ai_move(Player::A), Some(2));
    }

    #[test]
    fn test_ai_move_full_board_is_none() {
        let mut board = Board::new(2, 2).unwrap();
        board.set_board("0011").unwrap();
        assert!(board.is_full());
        assert_eq!(board.ai_move(Player::A), None);
    }

    #[test]
    fn test_display_format() {
        let mut board = Board::new(3, 2).unwrap();
        board.set_board("01").unwrap();
        assert_eq!(board.to_string(), "| | | |\n|X|O| |\n-------\n 0 1 2 ");
    }

    #[test]
    fn test_display_wraps_column_numbers() {
        let board = Board::new(12, 1).unwrap();
        let text = board.to_string();
        let footer = text.lines().last().unwrap();
        assert_eq!(footer, " 0 1 2 3 4 5 6 7 8 9 0 1 ");
    }

    #[test]
    fn test_random_games_keep_gravity_and_win_search_symmetry() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let width = rng.random_range(1..=9);
            let height = rng.random_range(1..=8);
            let mut board = Board::new(width, height).unwrap();
            let mut player = Player::A;
            while !board.is_full() {
                let before = board.clone();
                board.cols_to_win(player);
                board.ai_move(player.other());
                assert_eq!(board, before);

                let col = rng.random_range(0..width + 1);
                board.add_move(col, player);
                assert_gravity(&board);
                player = player.other();
            }
        }
    }
}
