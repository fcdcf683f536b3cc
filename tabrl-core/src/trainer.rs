//! Train [`Agent`].
mod config;

use crate::{
    record::{Record, RecordValue::Scalar, Recorder},
    Agent, Env, Transition,
};
use anyhow::Result;
pub use config::TrainerConfig;
use log::info;
use std::path::Path;

/// Manages the training loop.
///
/// Training proceeds episode by episode:
///
/// 1. Reset [`Env`] and observe the initial state.
/// 2. Sample an action from the agent, perform an environment step and feed
///    the resulting [`Transition`] to [`Agent::opt`]. Repeat until the
///    environment signals termination or truncation; the trainer imposes no
///    step limit of its own.
/// 3. Invoke [`Agent::on_episode_end`] exactly once.
/// 4. After `n_episodes` episodes, save the agent state into `model_dir`
///    if one is configured.
///
/// Per-step and per-episode diagnostics go to the given
/// [`Recorder`], which flushes aggregates every `flush_record_interval`
/// episodes.
pub struct Trainer<E: Env> {
    /// Configuration of the environment for training.
    env_config: E::Config,

    /// Where to save the learned agent state.
    model_dir: Option<String>,

    /// The number of training episodes.
    n_episodes: usize,

    /// Interval of flushing records in episodes.
    flush_record_interval: usize,
}

impl<E: Env> Trainer<E> {
    /// Constructs a trainer.
    pub fn build(config: TrainerConfig, env_config: E::Config) -> Self {
        Self {
            env_config,
            model_dir: config.model_dir,
            n_episodes: config.n_episodes,
            flush_record_interval: config.flush_record_interval,
        }
    }

    fn save_model<A: Agent<E>>(agent: &A, model_dir: &str) {
        match agent.save_params(Path::new(model_dir)) {
            Ok(()) => info!("Saved the agent state in {:?}.", model_dir),
            Err(_) => info!("Failed to save agent state in {:?}.", model_dir),
        }
    }

    /// Runs a single training episode and returns its summary record.
    ///
    /// Each transition is recorded through `recorder` as it is consumed by
    /// the agent.
    pub fn train_episode<A, R>(
        &self,
        env: &mut E,
        agent: &mut A,
        recorder: &mut R,
    ) -> Result<Record>
    where
        A: Agent<E>,
        R: Recorder,
    {
        let mut obs = env.reset()?;
        let mut episode_return = 0f64;
        let mut n_steps = 0;

        loop {
            let act = agent.sample(&obs);
            let step = env.step(&act);
            episode_return += step.reward;
            n_steps += 1;

            let is_done = step.is_done();
            let transition =
                Transition::new(obs, act, step.reward, step.is_terminated, step.obs.clone());
            recorder.store(agent.opt_with_record(&transition));

            if is_done {
                break;
            }
            obs = step.obs;
        }

        let mut record = agent.on_episode_end();
        record.insert("episode_return", Scalar(episode_return as f32));
        record.insert("n_steps", Scalar(n_steps as f32));
        Ok(record)
    }

    /// Train the agent.
    pub fn train<A, R>(&mut self, agent: &mut A, recorder: &mut R) -> Result<()>
    where
        A: Agent<E>,
        R: Recorder,
    {
        let mut env = E::build(&self.env_config, 0)?;
        agent.train();

        for episode in 0..self.n_episodes {
            let record = self.train_episode(&mut env, agent, recorder)?;
            recorder.store(record);

            if (episode + 1) % self.flush_record_interval == 0 {
                recorder.flush((episode + 1) as _);
            }
        }
        info!("Finished training over {} episodes", self.n_episodes);

        if let Some(model_dir) = self.model_dir.clone() {
            Self::save_model(agent, &model_dir);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Trainer, TrainerConfig};
    use crate::{
        dummy::{DummyAct, DummyEnv, DummyEnvConfig, DummyObs},
        record::{BufferedRecorder, Record},
        Agent, Policy, Transition,
    };
    use anyhow::Result;
    use std::path::Path;

    /// Agent that always sticks to action 0 and counts its callbacks.
    struct CountingAgent {
        n_opts: usize,
        n_episode_ends: usize,
        train: bool,
    }

    impl CountingAgent {
        fn new() -> Self {
            Self {
                n_opts: 0,
                n_episode_ends: 0,
                train: false,
            }
        }
    }

    impl Policy<DummyEnv> for CountingAgent {
        fn sample(&mut self, _obs: &DummyObs) -> DummyAct {
            DummyAct(0)
        }
    }

    impl Agent<DummyEnv> for CountingAgent {
        fn train(&mut self) {
            self.train = true;
        }

        fn eval(&mut self) {
            self.train = false;
        }

        fn is_train(&self) -> bool {
            self.train
        }

        fn opt_with_record(&mut self, _transition: &Transition<DummyEnv>) -> Record {
            self.n_opts += 1;
            Record::from_scalar("td_err", 0.0)
        }

        fn on_episode_end(&mut self) -> Record {
            self.n_episode_ends += 1;
            Record::empty()
        }

        fn save_params(&self, _path: &Path) -> Result<()> {
            Ok(())
        }

        fn load_params(&mut self, _path: &Path) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_episode_protocol() -> Result<()> {
        let env_config = DummyEnvConfig {
            episode_len: 2,
            final_rewards: vec![1.0],
            n_actions: 2,
        };
        let config = TrainerConfig::default()
            .n_episodes(3)
            .flush_record_interval(1);
        let mut trainer = Trainer::<DummyEnv>::build(config, env_config);
        let mut agent = CountingAgent::new();
        let mut recorder = BufferedRecorder::new();

        trainer.train(&mut agent, &mut recorder)?;

        // One opt call per environment step, one episode-end per episode.
        assert_eq!(agent.n_opts, 6);
        assert_eq!(agent.n_episode_ends, 3);
        assert!(agent.is_train());
        assert_eq!(recorder.len(), 3);

        let first = recorder.iter().next().unwrap();
        assert_eq!(first.get_scalar("episode_return").unwrap(), 1.0);
        assert_eq!(first.get_scalar("n_steps").unwrap(), 2.0);
        Ok(())
    }
}
