//! Line-oriented game loop: a human at a prompt against an [`Agent`].
//!
//! Generic over the reader and writer so the same loop drives stdin/stdout
//! and scripted tests.

use std::io::{BufRead, Write};

use tracing::{debug, info};

use crate::ai::Agent;
use crate::error::SessionError;
use crate::game::{GameState, GameStatus, Player};

pub struct TextSession<R, W> {
    input: R,
    output: W,
    state: GameState,
    human: Player,
    agent: Box<dyn Agent>,
}

impl<R: BufRead, W: Write> TextSession<R, W> {
    pub fn new(
        state: GameState,
        human: Player,
        agent: Box<dyn Agent>,
        input: R,
        output: W,
    ) -> Self {
        TextSession {
            input,
            output,
            state,
            human,
            agent,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Play until someone wins or the board fills, and return how it ended.
    pub fn run(&mut self) -> Result<GameStatus, SessionError> {
        writeln!(self.output, "\nWelcome to Connect Four!")?;
        info!(
            human = %self.human.symbol(),
            agent = self.agent.name(),
            width = self.state.board().width(),
            height = self.state.board().height(),
            "session started"
        );

        loop {
            writeln!(self.output)?;
            writeln!(self.output, "{}", self.state.board())?;
            writeln!(self.output)?;

            let player = self.state.current_player();
            let column = if player == self.human {
                self.read_human_move(player)?
            } else {
                self.agent_move(player)?
            };

            match self.state.apply_move_mut(column)? {
                GameStatus::InProgress => continue,
                GameStatus::WonBy(winner) => {
                    writeln!(self.output, "{} wins. Congratulations! :)", winner.symbol())?;
                }
                GameStatus::Drawn => {
                    writeln!(self.output, "It's a draw.")?;
                }
            }

            writeln!(self.output)?;
            writeln!(self.output, "{}", self.state.board())?;
            self.output.flush()?;
            info!(status = ?self.state.status(), "session finished");
            return Ok(self.state.status());
        }
    }

    /// Prompt until the human names a column that accepts a piece.
    fn read_human_move(&mut self, player: Player) -> Result<usize, SessionError> {
        loop {
            write!(self.output, "{}'s choice: ", player.symbol())?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(SessionError::InputClosed);
            }
            match line.trim().parse::<usize>() {
                Ok(column) if self.state.board().allows_move(column) => return Ok(column),
                _ => debug!(input = line.trim(), "rejected column"),
            }
        }
    }

    fn agent_move(&mut self, player: Player) -> Result<usize, SessionError> {
        let choice = self.agent.select_action(&self.state);
        match choice {
            Some(column) if self.state.board().allows_move(column) => {
                writeln!(self.output, "{} plays column {}", player.symbol(), column)?;
                Ok(column)
            }
            _ => Err(SessionError::AgentFailed {
                agent: self.agent.name().to_string(),
            }),
        }
    }
}
