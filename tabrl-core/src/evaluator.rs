//! Evaluate [`Policy`].
use crate::{record::Record, Env, Policy};
use anyhow::Result;
mod outcome_evaluator;
pub use outcome_evaluator::{EvalOutcome, EvalStats, OutcomeEvaluator};

/// Evaluate [`Policy`].
pub trait Evaluator<E: Env> {
    /// Evaluate a policy.
    ///
    /// The caller of this method needs to handle the internal state of the
    /// policy, like training/evaluation mode.
    fn evaluate<P>(&mut self, policy: &mut P) -> Result<Record>
    where
        P: Policy<E>;
}
