use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use log::{error, info};
use tabrl_agent::{QLearningAgent, QLearningAgentConfig};
use tabrl_blackjack_env::{BlackjackEnv, BlackjackEnvConfig};
use tabrl_core::{
    error::TabrlError, record::LogRecorder, Agent, Configurable, Env, OutcomeEvaluator, Policy,
    Trainer, TrainerConfig,
};

const LEARNING_RATE: f64 = 0.1;
const DISCOUNT_FACTOR: f64 = 0.95;
const INITIAL_EPSILON: f64 = 1.0;
const FINAL_EPSILON: f64 = 0.1;
const MODEL_DIR: &str = "./model/blackjack";

/// Train and evaluate a tabular Q-learning Blackjack agent.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Random seed.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Directory holding the learned agent state.
    #[arg(long, default_value = MODEL_DIR)]
    model_dir: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Train an agent and save its learned state.
    Train {
        /// The number of training episodes.
        #[arg(long, default_value_t = 1_000_000)]
        episodes: usize,
    },

    /// Evaluate a previously trained agent with exploration disabled.
    Eval {
        /// What kind of evaluation to run.
        #[arg(value_enum)]
        mode: EvalMode,

        /// The number of evaluation episodes (ignored by `single`).
        #[arg(long)]
        episodes: Option<usize>,
    },
}

/// The three evaluation modes.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum EvalMode {
    /// Run and render one episode.
    Single,

    /// Run and render several episodes.
    Multi,

    /// Aggregate win/draw/loss statistics over many episodes.
    Stats,
}

fn train(episodes: usize, model_dir: &str, seed: u64) -> Result<()> {
    fastrand::seed(seed);
    let env_config = BlackjackEnvConfig::default();
    let n_actions = BlackjackEnv::build(&env_config, 0)?.action_count();

    let agent_config = QLearningAgentConfig::default()
        .n_actions(n_actions)
        .learning_rate(LEARNING_RATE)
        .discount_factor(DISCOUNT_FACTOR)
        .initial_epsilon(INITIAL_EPSILON)
        .epsilon_decay(1.0 / (episodes as f64 / 2.0))
        .final_epsilon(FINAL_EPSILON);
    let trainer_config = TrainerConfig::default()
        .n_episodes(episodes)
        .flush_record_interval((episodes / 100).max(1))
        .model_dir(model_dir);

    let mut agent = QLearningAgent::<BlackjackEnv>::build(agent_config);
    let mut trainer = Trainer::<BlackjackEnv>::build(trainer_config, env_config);
    let mut recorder = LogRecorder::new();

    info!("Training over {} episodes", episodes);
    trainer.train(&mut agent, &mut recorder)?;
    Ok(())
}

/// Loads the saved agent and puts it in evaluation mode.
///
/// Returns `None` after reporting when no saved state exists, so the
/// requested evaluation aborts cleanly.
fn load_agent(model_dir: &str) -> Result<Option<QLearningAgent<BlackjackEnv>>> {
    let mut agent =
        QLearningAgent::<BlackjackEnv>::build(QLearningAgentConfig::default().n_actions(2));
    match agent.load_params(model_dir.as_ref()) {
        Ok(()) => {
            agent.eval();
            Ok(Some(agent))
        }
        Err(e) => match e.downcast_ref::<TabrlError>() {
            Some(TabrlError::AgentStateNotFound(_)) => {
                error!("No trained agent found in {:?}", model_dir);
                Ok(None)
            }
            _ => Err(e),
        },
    }
}

/// Runs one greedy episode, printing a frame per step; returns the final
/// reward.
fn run_rendered_episode(
    env: &mut BlackjackEnv,
    agent: &mut QLearningAgent<BlackjackEnv>,
) -> Result<f64> {
    let mut obs = env.reset()?;
    println!("{}", env.render());
    loop {
        let act = agent.sample(&obs);
        println!("action: {}", act);
        let step = env.step(&act);
        println!("{}", env.render());
        if step.is_done() {
            return Ok(step.reward);
        }
        obs = step.obs;
    }
}

fn eval_single(model_dir: &str, seed: u64) -> Result<()> {
    let mut agent = match load_agent(model_dir)? {
        Some(agent) => agent,
        None => return Ok(()),
    };
    let mut env = BlackjackEnv::build(&BlackjackEnvConfig::default(), seed)?;
    let reward = run_rendered_episode(&mut env, &mut agent)?;
    println!("Final reward: {}", reward);
    Ok(())
}

fn eval_multi(model_dir: &str, seed: u64, episodes: usize) -> Result<()> {
    let mut agent = match load_agent(model_dir)? {
        Some(agent) => agent,
        None => return Ok(()),
    };
    let mut env = BlackjackEnv::build(&BlackjackEnvConfig::default(), seed)?;
    for episode in 1..=episodes {
        println!("--- Test episode {} ---", episode);
        let reward = run_rendered_episode(&mut env, &mut agent)?;
        println!("Final reward: {}", reward);
    }
    Ok(())
}

fn eval_stats(model_dir: &str, seed: u64, episodes: usize) -> Result<()> {
    let mut agent = match load_agent(model_dir)? {
        Some(agent) => agent,
        None => return Ok(()),
    };
    let mut evaluator =
        OutcomeEvaluator::<BlackjackEnv>::new(&BlackjackEnvConfig::default(), seed, episodes)?;
    let stats = evaluator.stats(&mut agent)?;
    println!(
        "Wins: {}, Draws: {}, Losses: {}",
        stats.wins, stats.draws, stats.losses
    );
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Train { episodes } => train(episodes, &cli.model_dir, cli.seed),
        Command::Eval { mode, episodes } => match mode {
            EvalMode::Single => eval_single(&cli.model_dir, cli.seed),
            EvalMode::Multi => eval_multi(&cli.model_dir, cli.seed, episodes.unwrap_or(5)),
            EvalMode::Stats => eval_stats(&cli.model_dir, cli.seed, episodes.unwrap_or(1000)),
        },
    }
}
