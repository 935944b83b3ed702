use tracing::debug;

use super::{Board, Player};
use crate::error::{BoardError, MoveError};

/// Where a game stands after the last applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    WonBy(Player),
    Drawn,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    first_player: Player,
    current_player: Player,
    status: GameStatus,
}

impl GameState {
    /// Start a game on an empty `width` x `height` board.
    pub fn new(width: usize, height: usize, first_player: Player) -> Result<Self, BoardError> {
        Ok(GameState {
            board: Board::new(width, height)?,
            first_player,
            current_player: first_player,
            status: GameStatus::InProgress,
        })
    }

    /// Create initial game state: standard board, `A` to move.
    pub fn initial() -> Self {
        GameState {
            board: Board::standard(),
            first_player: Player::A,
            current_player: Player::A,
            status: GameStatus::InProgress,
        }
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.status != GameStatus::InProgress
    }

    /// Get list of legal columns (not full)
    pub fn legal_actions(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }

        (0..self.board.width())
            .filter(|&col| self.board.allows_move(col))
            .collect()
    }

    /// Apply a move and return new state (immutable)
    pub fn apply_move(&self, column: usize) -> Result<GameState, MoveError> {
        let mut next = self.clone();
        next.apply_move_mut(column)?;
        Ok(next)
    }

    /// Apply a move in place and return the resulting status.
    pub fn apply_move_mut(&mut self, column: usize) -> Result<GameStatus, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }

        let mover = self.current_player;
        let row = self.board.try_add_move(column, mover)?;

        if self.board.wins_for(mover) {
            self.status = GameStatus::WonBy(mover);
        } else if self.board.is_full() {
            self.status = GameStatus::Drawn;
        }
        debug!(player = %mover.symbol(), column, row, status = ?self.status, "move applied");

        self.current_player = mover.other();
        Ok(self.status)
    }

    /// Empty the board and hand the move back to whoever started.
    pub fn reset(&mut self) {
        self.board.clear();
        self.current_player = self.first_player;
        self.status = GameStatus::InProgress;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}
