//! This module is used for tests.
//!
//! [`DummyEnv`] is a deterministic episodic environment: every episode runs
//! for a fixed number of steps and the final step pays a reward taken from a
//! cycle, so tests can script win/draw/loss sequences.
use crate::{Act, Env, Info, Obs, Step};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Dummy observation: the current step index within the episode.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DummyObs(pub u32);

impl Obs for DummyObs {}

/// Dummy action: a bare action index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DummyAct(pub usize);

impl Act for DummyAct {}

impl From<usize> for DummyAct {
    fn from(ix: usize) -> Self {
        Self(ix)
    }
}

impl From<DummyAct> for usize {
    fn from(a: DummyAct) -> Self {
        a.0
    }
}

/// Dummy info.
#[derive(Clone, Debug)]
pub struct DummyInfo;

impl Info for DummyInfo {}

/// Configuration of [`DummyEnv`].
#[derive(Clone, Debug)]
pub struct DummyEnvConfig {
    /// Steps per episode.
    pub episode_len: usize,

    /// Final-step rewards, cycled over episodes.
    pub final_rewards: Vec<f64>,

    /// The number of discrete actions.
    pub n_actions: usize,
}

impl Default for DummyEnvConfig {
    fn default() -> Self {
        Self {
            episode_len: 2,
            final_rewards: vec![1.0],
            n_actions: 2,
        }
    }
}

/// Dummy env.
pub struct DummyEnv {
    config: DummyEnvConfig,
    t: usize,
    episode: usize,
    rng: fastrand::Rng,
}

impl Env for DummyEnv {
    type Config = DummyEnvConfig;
    type Obs = DummyObs;
    type Act = DummyAct;
    type Info = DummyInfo;

    fn build(config: &Self::Config, seed: u64) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            t: 0,
            episode: 0,
            rng: fastrand::Rng::with_seed(seed),
        })
    }

    fn reset(&mut self) -> Result<Self::Obs> {
        self.t = 0;
        Ok(DummyObs(0))
    }

    fn step(&mut self, a: &Self::Act) -> Step<Self> {
        self.t += 1;
        let is_terminated = self.t >= self.config.episode_len;
        let reward = if is_terminated {
            let rewards = &self.config.final_rewards;
            let r = rewards[self.episode % rewards.len()];
            self.episode += 1;
            r
        } else {
            0.0
        };
        Step::new(
            DummyObs(self.t as u32),
            a.clone(),
            reward,
            is_terminated,
            false,
            DummyInfo,
        )
    }

    fn sample_random_action(&mut self) -> Self::Act {
        DummyAct(self.rng.usize(..self.config.n_actions))
    }

    fn action_count(&self) -> usize {
        self.config.n_actions
    }
}
