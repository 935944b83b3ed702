//! Move selection: the [`Agent`] trait and the built-in opponents.

mod agent;
mod lookahead;
mod random;

use serde::{Deserialize, Serialize};

pub use agent::Agent;
pub use lookahead::LookaheadAgent;
pub use random::RandomAgent;

/// Which built-in opponent to play against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OpponentKind {
    #[default]
    Lookahead,
    Random,
}

/// Build the agent for `kind`. `seed` only affects the random opponent.
pub fn build_agent(kind: OpponentKind, seed: Option<u64>) -> Box<dyn Agent> {
    match kind {
        OpponentKind::Lookahead => Box::new(LookaheadAgent::new()),
        OpponentKind::Random => match seed {
            Some(seed) => Box::new(RandomAgent::seeded(seed)),
            None => Box::new(RandomAgent::new()),
        },
    }
}
