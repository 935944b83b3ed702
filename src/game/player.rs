use serde::{Deserialize, Serialize};

use super::board::Cell;

/// One of the two sides. `A` plays `X` and conventionally moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    #[serde(rename = "x", alias = "X")]
    A,
    #[serde(rename = "o", alias = "O")]
    B,
}

impl Player {
    /// Get the other player
    pub fn other(self) -> Player {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    /// Convert player to cell type
    pub fn to_cell(self) -> Cell {
        match self {
            Player::A => Cell::PlayerA,
            Player::B => Cell::PlayerB,
        }
    }

    /// Marker drawn on the board.
    pub fn symbol(self) -> char {
        match self {
            Player::A => 'X',
            Player::B => 'O',
        }
    }

    /// Parse a marker symbol, case-insensitively.
    pub fn from_symbol(symbol: char) -> Option<Player> {
        match symbol.to_ascii_uppercase() {
            'X' => Some(Player::A),
            'O' => Some(Player::B),
            _ => None,
        }
    }
}
