//! Discrete action of the Blackjack environment.
use serde::{Deserialize, Serialize};
use std::fmt;
use tabrl_core::Act;

/// Action of the Blackjack environment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlackjackAct {
    /// Stop drawing cards and let the dealer play out.
    Stick,

    /// Draw one more card.
    Hit,
}

impl Act for BlackjackAct {}

impl From<usize> for BlackjackAct {
    fn from(ix: usize) -> Self {
        match ix {
            0 => Self::Stick,
            _ => Self::Hit,
        }
    }
}

impl From<BlackjackAct> for usize {
    fn from(a: BlackjackAct) -> Self {
        match a {
            BlackjackAct::Stick => 0,
            BlackjackAct::Hit => 1,
        }
    }
}

impl fmt::Display for BlackjackAct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stick => write!(f, "Stick"),
            Self::Hit => write!(f, "Hit"),
        }
    }
}
