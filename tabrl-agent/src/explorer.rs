//! Exploration strategy of the tabular agent.
use serde::{Deserialize, Serialize};

/// Epsilon-greedy explorer.
///
/// With probability `epsilon` a uniformly random action is taken, otherwise
/// the greedy one. Ties between equal action values resolve to the lowest
/// index; note that this tie-break is inherited from the usual argmax scan
/// rather than being a designed exploration strategy, but learned behavior
/// under all-zero initial values depends on it, so it is kept fixed.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct EpsilonGreedy {
    pub(crate) epsilon: f64,
    pub(crate) epsilon_decay: f64,
    pub(crate) final_epsilon: f64,
}

impl EpsilonGreedy {
    /// Constructs an epsilon-greedy explorer.
    ///
    /// # Panics
    ///
    /// Panics if the schedule is malformed: epsilon values outside `[0, 1]`,
    /// a floor above the initial value, or a negative decay step.
    pub fn new(initial_epsilon: f64, epsilon_decay: f64, final_epsilon: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&initial_epsilon),
            "initial_epsilon must be in [0, 1]"
        );
        assert!(
            (0.0..=initial_epsilon).contains(&final_epsilon),
            "final_epsilon must be in [0, initial_epsilon]"
        );
        assert!(epsilon_decay >= 0.0, "epsilon_decay must be non-negative");
        Self {
            epsilon: initial_epsilon,
            epsilon_decay,
            final_epsilon,
        }
    }

    /// Takes an action based on the given action values.
    pub fn action(&mut self, q: &[f64]) -> usize {
        if fastrand::f64() < self.epsilon {
            fastrand::usize(..q.len())
        } else {
            Self::greedy(q)
        }
    }

    /// The greedy action: index of the maximum value, lowest index on ties.
    pub fn greedy(q: &[f64]) -> usize {
        let mut best = 0;
        for (ix, v) in q.iter().enumerate().skip(1) {
            if *v > q[best] {
                best = ix;
            }
        }
        best
    }

    /// Advances the linear decay schedule by one episode.
    ///
    /// Epsilon decreases by `epsilon_decay` and holds flat at
    /// `final_epsilon`; it never increases.
    pub fn decay(&mut self) {
        self.epsilon = (self.epsilon - self.epsilon_decay).max(self.final_epsilon);
    }

    /// The current exploration probability.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

#[cfg(test)]
mod tests {
    use super::EpsilonGreedy;

    #[test]
    fn test_greedy_tie_break_is_lowest_index() {
        assert_eq!(EpsilonGreedy::greedy(&[0.0, 0.0]), 0);
        assert_eq!(EpsilonGreedy::greedy(&[1.0, 1.0, 1.0]), 0);
        assert_eq!(EpsilonGreedy::greedy(&[0.0, 2.0, 2.0]), 1);
    }

    #[test]
    fn test_greedy_picks_maximum() {
        assert_eq!(EpsilonGreedy::greedy(&[0.1, 0.5, 0.3]), 1);
        assert_eq!(EpsilonGreedy::greedy(&[-1.0, -0.5]), 1);
    }

    #[test]
    fn test_zero_epsilon_never_explores() {
        let mut explorer = EpsilonGreedy::new(0.0, 0.0, 0.0);
        for _ in 0..100 {
            assert_eq!(explorer.action(&[0.0, 1.0, 0.5]), 1);
        }
    }

    #[test]
    fn test_decay_schedule() {
        let mut explorer = EpsilonGreedy::new(1.0, 0.1, 0.1);
        for _ in 0..9 {
            explorer.decay();
        }
        assert!((explorer.epsilon() - 0.1).abs() < 1e-12);

        // Holds flat at the floor.
        explorer.decay();
        assert!((explorer.epsilon() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_decay_is_monotone() {
        let mut explorer = EpsilonGreedy::new(0.7, 0.03, 0.05);
        let mut prev = explorer.epsilon();
        for _ in 0..50 {
            explorer.decay();
            let eps = explorer.epsilon();
            assert!(eps <= prev);
            assert!(eps >= 0.05);
            prev = eps;
        }
    }

    #[test]
    #[should_panic]
    fn test_floor_above_initial_is_rejected() {
        let _ = EpsilonGreedy::new(0.1, 0.01, 0.5);
    }
}
