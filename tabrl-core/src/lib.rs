#![warn(missing_docs)]
//! A library for tabular reinforcement learning.
//!
//! This crate provides the abstractions shared by the agents and environments
//! of the workspace: the [`Env`] and [`Policy`]/[`Agent`] traits, the
//! [`Record`](record::Record) diagnostics, the episodic [`Trainer`] and the
//! outcome-classifying [`Evaluator`] implementations.
pub mod error;
pub mod record;

mod base;
pub use base::{Act, Agent, Configurable, Env, Info, Obs, Policy, Step, Transition};

mod trainer;
pub use trainer::{Trainer, TrainerConfig};

mod evaluator;
pub use evaluator::{EvalOutcome, EvalStats, Evaluator, OutcomeEvaluator};

pub mod dummy;
