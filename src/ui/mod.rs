//! Terminal UI: play Connect Four against one of the built-in agents.

mod app;
mod game_view;

pub use app::App;
