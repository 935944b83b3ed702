//! # Connect Four
//!
//! Rules engine for Connect Four on a board of any size, with a one-ply
//! lookahead opponent and two front ends.
//!
//! ## Modules
//!
//! - [`game`] — Board, run detection, players, game state machine
//! - [`ai`] — Agent trait, lookahead and random opponents
//! - [`session`] — Line-oriented game loop over any reader/writer
//! - [`ui`] — Terminal UI
//! - [`config`] — TOML configuration loading and validation
//! - [`logging`] — Tracing subscriber setup
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod session;
pub mod ui;
