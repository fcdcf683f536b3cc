use anyhow::Result;
use tabrl_agent::{QLearningAgent, QLearningAgentConfig};
use tabrl_blackjack_env::{BlackjackEnv, BlackjackEnvConfig, BlackjackObs};
use tabrl_core::{error::TabrlError, Agent, Configurable, Env, Policy, Transition};
use tempdir::TempDir;

fn fresh_agent(n_episodes: usize) -> QLearningAgent<BlackjackEnv> {
    QLearningAgent::<BlackjackEnv>::build(
        QLearningAgentConfig::default()
            .n_actions(2)
            .learning_rate(0.1)
            .discount_factor(0.95)
            .initial_epsilon(1.0)
            .epsilon_decay(1.0 / (n_episodes as f64 / 2.0))
            .final_epsilon(0.1),
    )
}

fn train(agent: &mut QLearningAgent<BlackjackEnv>, n_episodes: usize) -> Result<()> {
    let mut env = BlackjackEnv::build(&BlackjackEnvConfig::default(), 42)?;
    for _ in 0..n_episodes {
        let mut obs = env.reset()?;
        loop {
            let act = agent.sample(&obs);
            let step = env.step(&act);
            let is_done = step.is_done();
            agent.opt(&Transition::new(
                obs,
                act,
                step.reward,
                step.is_terminated,
                step.obs,
            ));
            if is_done {
                break;
            }
            obs = step.obs;
        }
        agent.on_episode_end();
    }
    Ok(())
}

#[test]
fn test_save_load_round_trip_is_bit_identical() -> Result<()> {
    let n_episodes = 500;
    let mut agent = fresh_agent(n_episodes);
    train(&mut agent, n_episodes)?;
    assert!(agent.n_states() > 0);
    assert!(!agent.training_error().is_empty());

    let dir = TempDir::new("round_trip")?;
    agent.save_params(dir.path())?;

    let mut loaded = fresh_agent(n_episodes);
    loaded.load_params(dir.path())?;

    assert_eq!(loaded.n_states(), agent.n_states());
    assert_eq!(loaded.epsilon().to_bits(), agent.epsilon().to_bits());
    assert_eq!(loaded.training_error().len(), agent.training_error().len());
    for (a, b) in agent
        .training_error()
        .iter()
        .zip(loaded.training_error().iter())
    {
        assert_eq!(a.to_bits(), b.to_bits());
    }

    // Every previously visited state returns bit-identical action values.
    for player_sum in 2..=31u8 {
        for dealer_showing in 1..=10u8 {
            for usable_ace in [false, true].iter() {
                let obs = BlackjackObs {
                    player_sum,
                    dealer_showing,
                    usable_ace: *usable_ace,
                };
                let q = agent.q_values(&obs).to_vec();
                let q_loaded = loaded.q_values(&obs).to_vec();
                assert_eq!(q.len(), q_loaded.len());
                for (a, b) in q.iter().zip(q_loaded.iter()) {
                    assert_eq!(a.to_bits(), b.to_bits());
                }
            }
        }
    }
    Ok(())
}

#[test]
fn test_load_from_empty_dir_reports_not_found() -> Result<()> {
    let dir = TempDir::new("no_state")?;
    let mut agent = fresh_agent(100);

    let err = agent.load_params(dir.path()).unwrap_err();
    match err.downcast_ref::<TabrlError>() {
        Some(TabrlError::AgentStateNotFound(_)) => {}
        other => panic!("unexpected error: {:?}", other),
    }
    Ok(())
}

#[test]
fn test_greedy_policy_after_reload_matches() -> Result<()> {
    let n_episodes = 300;
    let mut agent = fresh_agent(n_episodes);
    train(&mut agent, n_episodes)?;

    let dir = TempDir::new("greedy_match")?;
    agent.save_params(dir.path())?;
    let mut loaded = fresh_agent(n_episodes);
    loaded.load_params(dir.path())?;

    agent.eval();
    loaded.eval();
    for player_sum in 4..=21u8 {
        for dealer_showing in 1..=10u8 {
            let obs = BlackjackObs {
                player_sum,
                dealer_showing,
                usable_ace: false,
            };
            assert_eq!(agent.sample(&obs), loaded.sample(&obs));
        }
    }
    Ok(())
}
