#![warn(missing_docs)]
//! Tabular Q-learning agent.
//!
//! [`QLearningAgent`] learns a [`QTable`] of action values with one-step
//! Q-learning backups and explores with the [`EpsilonGreedy`] strategy. The
//! learned state round-trips through an explicit, versioned on-disk format.
mod base;
mod config;
mod explorer;
mod qtable;
mod state;

pub use base::QLearningAgent;
pub use config::QLearningAgentConfig;
pub use explorer::EpsilonGreedy;
pub use qtable::QTable;
pub use state::QLearningAgentState;
