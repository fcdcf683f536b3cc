//! Blackjack environment.
use crate::{BlackjackAct, BlackjackEnvConfig};
use anyhow::Result;
use log::trace;
use serde::{Deserialize, Serialize};
use tabrl_core::{Env, Obs, Step};

/// Card values of the infinite deck; ace is 1, face cards count 10.
const DECK: [u8; 13] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 10, 10, 10];

/// The dealer stands at this hand sum or above.
const DEALER_STAND: u8 = 17;

/// Observation of the Blackjack environment.
///
/// Small value type that doubles as the lookup key of tabular agents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlackjackObs {
    /// Current sum of the player's hand, counting a usable ace as 11.
    pub player_sum: u8,

    /// The dealer's face-up card.
    pub dealer_showing: u8,

    /// Whether the player holds an ace countable as 11 without busting.
    pub usable_ace: bool,
}

impl Obs for BlackjackObs {}

fn raw_sum(hand: &[u8]) -> u8 {
    hand.iter().sum()
}

/// An ace counts as 11 if that does not bust the hand.
fn usable_ace(hand: &[u8]) -> bool {
    hand.contains(&1) && raw_sum(hand) + 10 <= 21
}

fn sum_hand(hand: &[u8]) -> u8 {
    if usable_ace(hand) {
        raw_sum(hand) + 10
    } else {
        raw_sum(hand)
    }
}

fn is_bust(hand: &[u8]) -> bool {
    sum_hand(hand) > 21
}

fn score(hand: &[u8]) -> u8 {
    if is_bust(hand) {
        0
    } else {
        sum_hand(hand)
    }
}

/// A two-card 21: an ace next to a ten-valued card.
fn is_natural(hand: &[u8]) -> bool {
    hand.len() == 2 && hand.contains(&1) && hand.contains(&10)
}

/// Blackjack environment with Sutton & Barto rules.
///
/// Cards are drawn from an infinite deck with a per-environment seeded RNG,
/// so episodes are reproducible given the seed and the action sequence.
pub struct BlackjackEnv {
    config: BlackjackEnvConfig,
    rng: fastrand::Rng,
    player: Vec<u8>,
    dealer: Vec<u8>,
    done: bool,
}

impl BlackjackEnv {
    fn draw_card(&mut self) -> u8 {
        DECK[self.rng.usize(..DECK.len())]
    }

    fn observe(&self) -> BlackjackObs {
        BlackjackObs {
            player_sum: sum_hand(&self.player),
            dealer_showing: self.dealer.first().copied().unwrap_or(0),
            usable_ace: usable_ace(&self.player),
        }
    }

    /// Resolves a stick: the dealer draws to seventeen, then hands are
    /// compared. Under the Sutton & Barto rules a player natural wins +1
    /// against anything but a dealer natural.
    fn resolve_stick(&mut self) -> f64 {
        while sum_hand(&self.dealer) < DEALER_STAND {
            let card = self.draw_card();
            self.dealer.push(card);
        }
        let mut reward = match score(&self.player).cmp(&score(&self.dealer)) {
            std::cmp::Ordering::Greater => 1.0,
            std::cmp::Ordering::Equal => 0.0,
            std::cmp::Ordering::Less => -1.0,
        };
        if is_natural(&self.player) && !is_natural(&self.dealer) {
            reward = 1.0;
        }
        trace!(
            "player {} vs dealer {}: reward {}",
            sum_hand(&self.player),
            sum_hand(&self.dealer),
            reward
        );
        reward
    }

    /// Renders the current table as a text frame.
    pub fn render(&self) -> String {
        let hand = |cards: &[u8]| {
            cards
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        };
        let dealer = if self.done || self.config.open_hands {
            format!("[{}] = {}", hand(&self.dealer), sum_hand(&self.dealer))
        } else {
            format!(
                "[{} ?]",
                self.dealer.first().copied().unwrap_or(0)
            )
        };
        let ace = if usable_ace(&self.player) {
            ", usable ace"
        } else {
            ""
        };
        format!(
            "dealer: {} | player: [{}] = {}{}",
            dealer,
            hand(&self.player),
            sum_hand(&self.player),
            ace
        )
    }
}

impl Env for BlackjackEnv {
    type Config = BlackjackEnvConfig;
    type Obs = BlackjackObs;
    type Act = BlackjackAct;
    type Info = ();

    fn build(config: &Self::Config, seed: u64) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            rng: fastrand::Rng::with_seed(seed),
            player: Vec::new(),
            dealer: Vec::new(),
            done: false,
        })
    }

    fn reset(&mut self) -> Result<Self::Obs> {
        self.dealer = vec![self.draw_card(), self.draw_card()];
        self.player = vec![self.draw_card(), self.draw_card()];
        self.done = false;
        Ok(self.observe())
    }

    fn step(&mut self, a: &Self::Act) -> Step<Self> {
        let (reward, is_terminated) = match a {
            BlackjackAct::Hit => {
                let card = self.draw_card();
                self.player.push(card);
                if is_bust(&self.player) {
                    (-1.0, true)
                } else {
                    (0.0, false)
                }
            }
            BlackjackAct::Stick => (self.resolve_stick(), true),
        };
        self.done = is_terminated;
        Step::new(self.observe(), *a, reward, is_terminated, false, ())
    }

    fn sample_random_action(&mut self) -> Self::Act {
        BlackjackAct::from(self.rng.usize(..2))
    }

    fn action_count(&self) -> usize {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabrl_core::Env;

    fn env(seed: u64) -> BlackjackEnv {
        BlackjackEnv::build(&BlackjackEnvConfig::default(), seed).unwrap()
    }

    #[test]
    fn test_hand_arithmetic() {
        assert_eq!(sum_hand(&[1, 5]), 16);
        assert!(usable_ace(&[1, 5]));
        assert_eq!(sum_hand(&[1, 5, 10]), 16);
        assert!(!usable_ace(&[1, 5, 10]));
        assert_eq!(sum_hand(&[10, 9, 5]), 24);
        assert!(is_bust(&[10, 9, 5]));
        assert_eq!(score(&[10, 9, 5]), 0);
        assert!(is_natural(&[1, 10]));
        assert!(is_natural(&[10, 1]));
        assert!(!is_natural(&[1, 5, 10]));
    }

    #[test]
    fn test_bust_on_hit_loses() {
        let mut e = env(0);
        e.reset().unwrap();
        e.player = vec![10, 10];
        let step = e.step(&BlackjackAct::Hit);
        // Any draw on a hard 20 except an ace busts; an ace leaves 21.
        if step.is_terminated {
            assert_eq!(step.reward, -1.0);
        } else {
            assert_eq!(step.obs.player_sum, 21);
        }
    }

    #[test]
    fn test_stick_compares_scores() {
        let mut e = env(0);
        e.reset().unwrap();
        e.player = vec![10, 10];
        e.dealer = vec![10, 7];
        // Dealer already stands on 17; no draws, plain comparison.
        let step = e.step(&BlackjackAct::Stick);
        assert!(step.is_terminated);
        assert_eq!(step.reward, 1.0);
    }

    #[test]
    fn test_player_natural_beats_dealer_21() {
        let mut e = env(0);
        e.reset().unwrap();
        e.player = vec![1, 10];
        e.dealer = vec![5, 6, 10];
        let step = e.step(&BlackjackAct::Stick);
        assert_eq!(step.reward, 1.0);
    }

    #[test]
    fn test_dealer_natural_draws_against_player_natural() {
        let mut e = env(0);
        e.reset().unwrap();
        e.player = vec![1, 10];
        e.dealer = vec![10, 1];
        let step = e.step(&BlackjackAct::Stick);
        assert_eq!(step.reward, 0.0);
    }

    #[test]
    fn test_episodes_terminate_with_signed_unit_rewards() {
        let mut e = env(42);
        for _ in 0..200 {
            let mut obs = e.reset().unwrap();
            let mut steps = 0;
            loop {
                assert!(obs.player_sum >= 2 && obs.player_sum <= 31);
                let act = e.sample_random_action();
                let step = e.step(&act);
                steps += 1;
                assert!(steps <= 60, "episode did not terminate");
                if step.is_done() {
                    assert!([-1.0, 0.0, 1.0].contains(&step.reward));
                    break;
                }
                assert_eq!(step.reward, 0.0);
                obs = step.obs;
            }
        }
    }

    #[test]
    fn test_seeded_episodes_are_reproducible() {
        let mut e1 = env(7);
        let mut e2 = env(7);
        for _ in 0..20 {
            assert_eq!(e1.reset().unwrap(), e2.reset().unwrap());
            loop {
                let s1 = e1.step(&BlackjackAct::Hit);
                let s2 = e2.step(&BlackjackAct::Hit);
                assert_eq!(s1.obs, s2.obs);
                assert_eq!(s1.reward, s2.reward);
                if s1.is_done() {
                    break;
                }
            }
        }
    }

    #[test]
    fn test_render_hides_hole_card_until_done() {
        let mut e = env(3);
        e.reset().unwrap();
        assert!(e.render().contains('?'));
        e.step(&BlackjackAct::Stick);
        assert!(!e.render().contains('?'));
    }
}
