//! Tabular Q-learning agent.
use crate::{
    state::{QLearningAgentState, STATE_FILE_NAME, STATE_FORMAT_VERSION},
    EpsilonGreedy, QLearningAgentConfig, QTable,
};
use anyhow::Result;
use log::info;
use serde::{de::DeserializeOwned, Serialize};
use std::{
    fs,
    hash::Hash,
    io::{BufReader, BufWriter},
    path::Path,
};
use tabrl_core::{error::TabrlError, record::Record, Agent, Configurable, Env, Policy, Transition};

/// Tabular Q-learning agent.
///
/// Learns one-step off-policy TD backups over a [`QTable`] keyed by
/// observations: the bootstrap target uses the greedy maximum over the next
/// observation, independent of the action actually taken next. In training
/// mode actions come from the [`EpsilonGreedy`] explorer; in evaluation mode
/// they are purely greedy.
pub struct QLearningAgent<E: Env>
where
    E::Obs: Eq + Hash,
{
    qtable: QTable<E::Obs>,
    learning_rate: f64,
    discount_factor: f64,
    explorer: EpsilonGreedy,
    training_error: Vec<f64>,
    train: bool,
}

impl<E> QLearningAgent<E>
where
    E: Env,
    E::Obs: Eq + Hash,
{
    /// The current exploration probability.
    pub fn epsilon(&self) -> f64 {
        self.explorer.epsilon()
    }

    /// The number of observations with materialized action values.
    pub fn n_states(&self) -> usize {
        self.qtable.len()
    }

    /// The action values of the given observation.
    pub fn q_values(&mut self, obs: &E::Obs) -> &[f64] {
        self.qtable.get(obs)
    }

    /// TD errors of every update so far, in call order.
    pub fn training_error(&self) -> &[f64] {
        &self.training_error
    }
}

impl<E> Policy<E> for QLearningAgent<E>
where
    E: Env,
    E::Obs: Eq + Hash,
    E::Act: From<usize>,
{
    fn sample(&mut self, obs: &E::Obs) -> E::Act {
        let q = self.qtable.get(obs);
        let ix = if self.train {
            self.explorer.action(q)
        } else {
            EpsilonGreedy::greedy(q)
        };
        ix.into()
    }
}

impl<E> Configurable for QLearningAgent<E>
where
    E: Env,
    E::Obs: Eq + Hash,
{
    type Config = QLearningAgentConfig;

    /// Builds the agent.
    ///
    /// # Panics
    ///
    /// Panics on malformed hyperparameters: a learning rate outside `(0, 1]`,
    /// a discount factor outside `[0, 1]` or an inconsistent epsilon
    /// schedule.
    fn build(config: Self::Config) -> Self {
        assert!(
            config.learning_rate > 0.0 && config.learning_rate <= 1.0,
            "learning_rate must be in (0, 1]"
        );
        assert!(
            (0.0..=1.0).contains(&config.discount_factor),
            "discount_factor must be in [0, 1]"
        );
        Self {
            qtable: QTable::new(config.n_actions),
            learning_rate: config.learning_rate,
            discount_factor: config.discount_factor,
            explorer: EpsilonGreedy::new(
                config.initial_epsilon,
                config.epsilon_decay,
                config.final_epsilon,
            ),
            training_error: Vec::new(),
            train: true,
        }
    }
}

impl<E> Agent<E> for QLearningAgent<E>
where
    E: Env,
    E::Obs: Eq + Hash + Serialize + DeserializeOwned,
    E::Act: From<usize> + Into<usize>,
{
    fn train(&mut self) {
        self.train = true;
    }

    fn eval(&mut self) {
        self.train = false;
    }

    fn is_train(&self) -> bool {
        self.train
    }

    /// One Q-learning backup.
    ///
    /// Terminal transitions zero out the bootstrap term exactly, so no value
    /// leaks across episode boundaries. Exactly one slot of one table entry
    /// is mutated; the TD error is appended to the diagnostic log.
    fn opt_with_record(&mut self, transition: &Transition<E>) -> Record {
        let action: usize = transition.act.clone().into();
        let future = if transition.is_terminated {
            0.0
        } else {
            self.qtable.max_value(&transition.next_obs)
        };
        let q_sa = self.qtable.get(&transition.obs)[action];
        let td_err = transition.reward + self.discount_factor * future - q_sa;
        self.qtable
            .set(&transition.obs, action, q_sa + self.learning_rate * td_err);
        self.training_error.push(td_err);

        Record::from_scalar("td_err", td_err as f32)
    }

    fn on_episode_end(&mut self) -> Record {
        self.explorer.decay();
        Record::from_scalar("epsilon", self.explorer.epsilon() as f32)
    }

    fn save_params(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path)?;
        let state = QLearningAgentState {
            version: STATE_FORMAT_VERSION,
            n_actions: self.qtable.n_actions(),
            entries: self.qtable.to_entries(),
            learning_rate: self.learning_rate,
            discount_factor: self.discount_factor,
            epsilon: self.explorer.epsilon,
            epsilon_decay: self.explorer.epsilon_decay,
            final_epsilon: self.explorer.final_epsilon,
            training_error: self.training_error.clone(),
        };
        let file = fs::File::create(path.join(STATE_FILE_NAME))?;
        bincode::serialize_into(BufWriter::new(file), &state)?;
        info!(
            "Saved {} table entries and {} TD errors",
            state.entries.len(),
            state.training_error.len()
        );
        Ok(())
    }

    fn load_params(&mut self, path: &Path) -> Result<()> {
        let file_path = path.join(STATE_FILE_NAME);
        if !file_path.exists() {
            return Err(TabrlError::AgentStateNotFound(file_path).into());
        }
        let file = fs::File::open(&file_path)?;
        let state: QLearningAgentState<E::Obs> =
            bincode::deserialize_from(BufReader::new(file))?;
        if state.version != STATE_FORMAT_VERSION {
            return Err(TabrlError::AgentStateVersion(state.version).into());
        }

        self.qtable = QTable::from_entries(state.n_actions, state.entries);
        self.learning_rate = state.learning_rate;
        self.discount_factor = state.discount_factor;
        self.explorer = EpsilonGreedy {
            epsilon: state.epsilon,
            epsilon_decay: state.epsilon_decay,
            final_epsilon: state.final_epsilon,
        };
        self.training_error = state.training_error;
        info!("Loaded agent state from {:?}", file_path);
        Ok(())
    }
}
