//! Outcome-classifying implementation of the [`Evaluator`] trait.
//!
//! Runs a fixed number of episodes and classifies each one as a win, draw or
//! loss by the sign of its final reward. This fits episodic games where the
//! reward at the terminal step carries the result.

use super::Evaluator;
use crate::{
    record::{Record, RecordValue::Scalar},
    Env, Policy,
};
use anyhow::Result;

/// Result of a single evaluation episode, classified by the sign of the
/// final reward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EvalOutcome {
    /// Final reward was positive.
    Win,

    /// Final reward was zero.
    Draw,

    /// Final reward was negative.
    Loss,
}

impl EvalOutcome {
    /// Classifies a final reward.
    pub fn from_reward(reward: f64) -> Self {
        if reward > 0.0 {
            Self::Win
        } else if reward < 0.0 {
            Self::Loss
        } else {
            Self::Draw
        }
    }
}

/// Aggregate outcome counts of an evaluation run.
///
/// `wins + draws + losses` equals the number of episodes run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EvalStats {
    /// Episodes ending with positive final reward.
    pub wins: usize,

    /// Episodes ending with zero final reward.
    pub draws: usize,

    /// Episodes ending with negative final reward.
    pub losses: usize,
}

impl EvalStats {
    /// The total number of classified episodes.
    pub fn n_episodes(&self) -> usize {
        self.wins + self.draws + self.losses
    }

    fn count(&mut self, outcome: EvalOutcome) {
        match outcome {
            EvalOutcome::Win => self.wins += 1,
            EvalOutcome::Draw => self.draws += 1,
            EvalOutcome::Loss => self.losses += 1,
        }
    }
}

/// An [`Evaluator`] that counts wins, draws and losses.
pub struct OutcomeEvaluator<E: Env> {
    /// The number of episodes to run during evaluation.
    n_episodes: usize,

    /// The environment instance used for evaluation.
    env: E,
}

impl<E: Env> OutcomeEvaluator<E> {
    /// Constructs a new [`OutcomeEvaluator`].
    pub fn new(config: &E::Config, seed: u64, n_episodes: usize) -> Result<Self> {
        Ok(Self {
            n_episodes,
            env: E::build(config, seed)?,
        })
    }

    /// Runs one episode and returns its final reward.
    pub fn run_episode<P>(&mut self, policy: &mut P) -> Result<f64>
    where
        P: Policy<E>,
    {
        let mut obs = self.env.reset()?;
        loop {
            let act = policy.sample(&obs);
            let step = self.env.step(&act);
            if step.is_done() {
                return Ok(step.reward);
            }
            obs = step.obs;
        }
    }

    /// Runs all evaluation episodes and returns the outcome counts.
    pub fn stats<P>(&mut self, policy: &mut P) -> Result<EvalStats>
    where
        P: Policy<E>,
    {
        let mut stats = EvalStats::default();
        for _ in 0..self.n_episodes {
            let reward = self.run_episode(policy)?;
            stats.count(EvalOutcome::from_reward(reward));
        }
        Ok(stats)
    }
}

impl<E: Env> Evaluator<E> for OutcomeEvaluator<E> {
    fn evaluate<P>(&mut self, policy: &mut P) -> Result<Record>
    where
        P: Policy<E>,
    {
        let stats = self.stats(policy)?;
        let mut record = Record::empty();
        record.insert("wins", Scalar(stats.wins as f32));
        record.insert("draws", Scalar(stats.draws as f32));
        record.insert("losses", Scalar(stats.losses as f32));
        record.insert(
            "win_rate",
            Scalar(stats.wins as f32 / stats.n_episodes() as f32),
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::{EvalOutcome, OutcomeEvaluator};
    use crate::{
        dummy::{DummyAct, DummyEnv, DummyEnvConfig, DummyObs},
        Evaluator, Policy,
    };
    use anyhow::Result;

    struct FixedPolicy;

    impl Policy<DummyEnv> for FixedPolicy {
        fn sample(&mut self, _obs: &DummyObs) -> DummyAct {
            DummyAct(0)
        }
    }

    #[test]
    fn test_outcome_classification() {
        assert_eq!(EvalOutcome::from_reward(1.0), EvalOutcome::Win);
        assert_eq!(EvalOutcome::from_reward(0.0), EvalOutcome::Draw);
        assert_eq!(EvalOutcome::from_reward(-1.0), EvalOutcome::Loss);
    }

    #[test]
    fn test_outcome_partition() -> Result<()> {
        // Final rewards cycle over episodes: win, draw, loss, ...
        let env_config = DummyEnvConfig {
            episode_len: 3,
            final_rewards: vec![1.0, 0.0, -1.0],
            n_actions: 2,
        };
        let n_episodes = 7;
        let mut evaluator = OutcomeEvaluator::<DummyEnv>::new(&env_config, 42, n_episodes)?;
        let mut policy = FixedPolicy;

        let stats = evaluator.stats(&mut policy)?;
        assert_eq!(stats.n_episodes(), n_episodes);
        assert_eq!(stats.wins, 3);
        assert_eq!(stats.draws, 2);
        assert_eq!(stats.losses, 2);

        let record = evaluator.evaluate(&mut policy)?;
        let n = record.get_scalar("wins")?
            + record.get_scalar("draws")?
            + record.get_scalar("losses")?;
        assert_eq!(n as usize, n_episodes);
        Ok(())
    }
}
