use crate::game::GameState;

use super::agent::Agent;

/// One-ply opponent: win if possible, block if necessary, else play
/// towards the centre. See [`crate::game::Board::ai_move`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LookaheadAgent;

impl LookaheadAgent {
    pub fn new() -> Self {
        LookaheadAgent
    }
}

impl Agent for LookaheadAgent {
    fn select_action(&mut self, state: &GameState) -> Option<usize> {
        if state.is_terminal() {
            return None;
        }
        // The win search mutates and restores, so search a scratch copy.
        let mut board = state.board().clone();
        board.ai_move(state.current_player())
    }

    fn name(&self) -> &str {
        "Lookahead"
    }
}
