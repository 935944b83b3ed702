use crate::ai::Agent;
use crate::game::{GameState, GameStatus, Player};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;
use tracing::{debug, warn};

pub struct App {
    game_state: GameState,
    human: Player,
    agent: Box<dyn Agent>,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(game_state: GameState, human: Player, agent: Box<dyn Agent>) -> Self {
        let selected_column = game_state.board().width() / 2;
        let mut app = App {
            game_state,
            human,
            agent,
            selected_column,
            should_quit: false,
            message: None,
        };
        app.play_agent_turn();
        app
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal
                .draw(|f| self.render(f))
                .map_err(|e| io::Error::other(e.to_string()))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < self.game_state.board().width() {
                    self.selected_column += 1;
                }
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let col = c.to_digit(10).unwrap_or(0) as usize;
                if col < self.game_state.board().width() {
                    self.selected_column = col;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char('r') => {
                self.game_state.reset();
                self.selected_column = self.game_state.board().width() / 2;
                self.message = Some("New game started!".to_string());
                self.play_agent_turn();
            }
            _ => {}
        }
    }

    /// Drop the human's piece in the selected column, then let the agent reply.
    fn drop_piece(&mut self) {
        if self.game_state.is_terminal() {
            self.message = Some("Game over! Press 'r' to restart.".to_string());
            return;
        }

        match self.game_state.apply_move_mut(self.selected_column) {
            Ok(GameStatus::InProgress) => self.play_agent_turn(),
            Ok(status) => self.announce(status),
            Err(e) => {
                debug!(error = %e, "move refused");
                self.message = Some(format!("Cannot play there: {e}"));
            }
        }
    }

    /// Let the agent move if it is the agent's turn.
    fn play_agent_turn(&mut self) {
        if self.game_state.is_terminal() || self.game_state.current_player() == self.human {
            return;
        }
        let Some(col) = self.agent.select_action(&self.game_state) else {
            warn!(agent = self.agent.name(), "agent had no move");
            return;
        };
        match self.game_state.apply_move_mut(col) {
            Ok(GameStatus::InProgress) => {
                self.message = Some(format!("{} played column {}", self.agent.name(), col));
            }
            Ok(status) => self.announce(status),
            Err(e) => warn!(agent = self.agent.name(), col, error = %e, "agent move refused"),
        }
    }

    fn announce(&mut self, status: GameStatus) {
        self.message = match status {
            GameStatus::WonBy(player) if player == self.human => Some("You win!".to_string()),
            GameStatus::WonBy(player) => Some(format!("{} wins!", player.symbol())),
            GameStatus::Drawn => Some("It's a draw!".to_string()),
            GameStatus::InProgress => None,
        };
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(
            frame,
            &self.game_state,
            self.selected_column,
            &self.message,
            self.agent.name(),
        );
    }
}
