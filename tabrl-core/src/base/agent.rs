//! Agent.
use super::{Env, Policy, Transition};
use crate::record::Record;
use anyhow::Result;
use std::path::Path;

/// Represents a trainable policy on an environment.
///
/// Unlike batch learners, agents in this crate learn online: every
/// environment transition is fed to [`Agent::opt`] exactly once, and
/// [`Agent::on_episode_end`] runs once per completed episode.
pub trait Agent<E: Env>: Policy<E> {
    /// Set the policy to training mode.
    fn train(&mut self);

    /// Set the policy to evaluation mode.
    ///
    /// In evaluation mode the policy must be fully greedy: no exploration,
    /// and no mutation of the learned state.
    fn eval(&mut self);

    /// Return if it is in training mode.
    fn is_train(&self) -> bool;

    /// Performs an optimization step on a single transition.
    fn opt(&mut self, transition: &Transition<E>) {
        let _ = self.opt_with_record(transition);
    }

    /// Performs an optimization step and returns some information.
    fn opt_with_record(&mut self, transition: &Transition<E>) -> Record;

    /// Hook invoked once per completed episode.
    ///
    /// Schedules living on episode boundaries (like exploration decay) are
    /// advanced here. The trainer calls this exactly once per episode.
    fn on_episode_end(&mut self) -> Record;

    /// Save the learned state of the agent in the given directory.
    fn save_params(&self, path: &Path) -> Result<()>;

    /// Load the learned state of the agent from the given directory.
    ///
    /// Fails with [`TabrlError::AgentStateNotFound`] if nothing has been
    /// saved there; the caller is expected to report this and abort the
    /// requested operation.
    ///
    /// [`TabrlError::AgentStateNotFound`]: crate::error::TabrlError::AgentStateNotFound
    fn load_params(&mut self, path: &Path) -> Result<()>;
}
