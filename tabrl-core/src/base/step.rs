//! Environment step.
use super::Env;

/// Additional information to `Obs` and `Act`.
pub trait Info {}

impl Info for () {}

/// Represents an action, observation and reward tuple `(a_t, o_t+1, r_t)`
/// with some additional information.
///
/// An environment emits a [`Step`] object at every interaction step.
pub struct Step<E: Env> {
    /// Action.
    pub act: E::Act,

    /// Observation.
    pub obs: E::Obs,

    /// Reward.
    pub reward: f64,

    /// Flag denoting if the episode is terminated.
    pub is_terminated: bool,

    /// Flag denoting if the episode is truncated.
    pub is_truncated: bool,

    /// Information defined by user.
    pub info: E::Info,
}

impl<E: Env> Step<E> {
    /// Constructs a [`Step`] object.
    pub fn new(
        obs: E::Obs,
        act: E::Act,
        reward: f64,
        is_terminated: bool,
        is_truncated: bool,
        info: E::Info,
    ) -> Self {
        Step {
            act,
            obs,
            reward,
            is_terminated,
            is_truncated,
            info,
        }
    }

    #[inline]
    /// Terminated or truncated.
    pub fn is_done(&self) -> bool {
        self.is_terminated || self.is_truncated
    }
}

/// A transition `(o_t, a_t, r_t, o_t+1)`, consumed by exactly one
/// [`Agent::opt`](crate::Agent::opt) call.
///
/// `is_terminated` distinguishes a true terminal transition, whose bootstrap
/// target is exactly zero, from a truncated one, which still bootstraps from
/// `next_obs`.
pub struct Transition<E: Env> {
    /// Observation at the decision point.
    pub obs: E::Obs,

    /// Action taken at the decision point.
    pub act: E::Act,

    /// Reward received for the action.
    pub reward: f64,

    /// Whether the environment signalled termination on this step.
    pub is_terminated: bool,

    /// Observation after the action.
    pub next_obs: E::Obs,
}

impl<E: Env> Transition<E> {
    /// Constructs a [`Transition`] object.
    pub fn new(
        obs: E::Obs,
        act: E::Act,
        reward: f64,
        is_terminated: bool,
        next_obs: E::Obs,
    ) -> Self {
        Self {
            obs,
            act,
            reward,
            is_terminated,
            next_obs,
        }
    }
}
