//! On-disk format of the learned agent state.
use serde::{Deserialize, Serialize};

/// Version of the serialized format.
pub(crate) const STATE_FORMAT_VERSION: u32 = 1;

/// File name of the serialized state within the model directory.
pub(crate) const STATE_FILE_NAME: &str = "agent.bincode";

/// Serialized form of a [`QLearningAgent`](crate::QLearningAgent).
///
/// An explicit schema rather than an opaque object graph: table entries,
/// every hyperparameter including the current epsilon, and the diagnostic
/// error log, enough for exact behavioral resumption. Encoded with bincode
/// so `f64` values round-trip bit-identically.
#[derive(Debug, Serialize, Deserialize)]
pub struct QLearningAgentState<K> {
    /// Format version, checked on load.
    pub version: u32,

    /// The number of discrete actions.
    pub n_actions: usize,

    /// Materialized table entries.
    pub entries: Vec<(K, Vec<f64>)>,

    /// Step size of the Q-value updates.
    pub learning_rate: f64,

    /// Weight of future reward.
    pub discount_factor: f64,

    /// Exploration probability at save time.
    pub epsilon: f64,

    /// Per-episode epsilon decay step.
    pub epsilon_decay: f64,

    /// Floor of the epsilon schedule.
    pub final_epsilon: f64,

    /// TD errors of every update so far.
    pub training_error: Vec<f64>,
}
