use crate::game::GameState;

/// Anything that can choose a column to play.
pub trait Agent {
    /// Select a column for the player to move in `state`, or `None` when
    /// there is nothing legal left to play.
    fn select_action(&mut self, state: &GameState) -> Option<usize>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
