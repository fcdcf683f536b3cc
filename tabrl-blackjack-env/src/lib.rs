#![warn(missing_docs)]
//! Blackjack environment.
//!
//! The Sutton & Barto variant of Blackjack: an infinite deck, the dealer
//! stands on 17, and episode rewards are +1 for a win, 0 for a draw and −1
//! for a loss with no natural bonus. Observations are the
//! `(player sum, dealer showing card, usable ace)` triple, which makes the
//! state space small enough for tabular agents.
mod act;
mod base;
mod config;

pub use act::BlackjackAct;
pub use base::{BlackjackEnv, BlackjackObs};
pub use config::BlackjackEnvConfig;
