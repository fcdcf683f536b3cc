//! Configuration of [`BlackjackEnv`](super::BlackjackEnv).
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`BlackjackEnv`](super::BlackjackEnv).
///
/// The rule set is fixed (Sutton & Barto); the configuration currently only
/// carries the rendering switch.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct BlackjackEnvConfig {
    /// Whether [`BlackjackEnv::render`](super::BlackjackEnv::render) output
    /// reveals the dealer's hole card before the episode ends.
    pub open_hands: bool,
}

impl Default for BlackjackEnvConfig {
    fn default() -> Self {
        Self { open_hands: false }
    }
}

impl BlackjackEnvConfig {
    /// Sets whether rendering reveals the dealer's hole card.
    pub fn open_hands(mut self, v: bool) -> Self {
        self.open_hands = v;
        self
    }

    /// Constructs [`BlackjackEnvConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`BlackjackEnvConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(self)?.as_bytes())?;
        Ok(())
    }
}
