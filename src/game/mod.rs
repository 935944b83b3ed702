//! Core Connect Four game logic: board and run detection, player types, and
//! the game state machine.

mod board;
mod player;
pub mod runs;
mod state;

pub use board::{Board, Cell, Grid, STANDARD_HEIGHT, STANDARD_WIDTH, WIN_LENGTH};
pub use player::Player;
pub use state::{GameState, GameStatus};
