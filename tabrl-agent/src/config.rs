//! Configuration of [`QLearningAgent`](super::QLearningAgent).
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`QLearningAgent`](super::QLearningAgent).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct QLearningAgentConfig {
    /// The number of discrete actions.
    pub n_actions: usize,

    /// Step size of the Q-value updates, in `(0, 1]`.
    pub learning_rate: f64,

    /// Weight of future reward relative to immediate reward, in `[0, 1]`.
    pub discount_factor: f64,

    /// Exploration probability at the start of training.
    pub initial_epsilon: f64,

    /// Amount subtracted from epsilon after each episode.
    pub epsilon_decay: f64,

    /// Floor of the epsilon schedule.
    pub final_epsilon: f64,
}

impl Default for QLearningAgentConfig {
    fn default() -> Self {
        Self {
            n_actions: 2,
            learning_rate: 0.1,
            discount_factor: 0.95,
            initial_epsilon: 1.0,
            epsilon_decay: 0.0,
            final_epsilon: 0.1,
        }
    }
}

impl QLearningAgentConfig {
    /// Sets the number of discrete actions.
    pub fn n_actions(mut self, v: usize) -> Self {
        self.n_actions = v;
        self
    }

    /// Sets the learning rate.
    pub fn learning_rate(mut self, v: f64) -> Self {
        self.learning_rate = v;
        self
    }

    /// Sets the discount factor.
    pub fn discount_factor(mut self, v: f64) -> Self {
        self.discount_factor = v;
        self
    }

    /// Sets the initial exploration probability.
    pub fn initial_epsilon(mut self, v: f64) -> Self {
        self.initial_epsilon = v;
        self
    }

    /// Sets the per-episode epsilon decay step.
    pub fn epsilon_decay(mut self, v: f64) -> Self {
        self.epsilon_decay = v;
        self
    }

    /// Sets the epsilon floor.
    pub fn final_epsilon(mut self, v: f64) -> Self {
        self.final_epsilon = v;
        self
    }

    /// Constructs [`QLearningAgentConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`QLearningAgentConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(self)?.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_serde_agent_config() -> Result<()> {
        let config = QLearningAgentConfig::default()
            .n_actions(2)
            .learning_rate(0.05)
            .epsilon_decay(2e-6);

        let dir = TempDir::new("agent_config")?;
        let path = dir.path().join("agent_config.yaml");

        config.save(&path)?;
        let config_ = QLearningAgentConfig::load(&path)?;
        assert_eq!(config, config_);
        Ok(())
    }
}
