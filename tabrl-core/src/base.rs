//! Core functionalities.
mod agent;
mod env;
mod policy;
mod step;
use std::fmt::Debug;

pub use agent::Agent;
pub use env::Env;
pub use policy::{Configurable, Policy};
pub use step::{Info, Step, Transition};

/// An observation of an environment.
///
/// Tabular agents use observations as lookup keys, so concrete observation
/// types are expected to also implement `Eq` and `Hash`; those bounds are
/// stated where the table lives, not here.
pub trait Obs: Clone + Debug {}

/// An action of the environment.
pub trait Act: Clone + Debug {}
