//! Table of action values.
use std::collections::HashMap;
use std::hash::Hash;

/// A table of action values, keyed by observation.
///
/// The action count is fixed at construction. Looking up an unseen key
/// materializes an all-zero value vector and stores it, so repeated lookups
/// of the same key observe the same entry. Entries are never removed.
#[derive(Debug, Clone, PartialEq)]
pub struct QTable<K: Eq + Hash> {
    n_actions: usize,
    values: HashMap<K, Vec<f64>>,
}

impl<K> QTable<K>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty table for `n_actions` actions.
    pub fn new(n_actions: usize) -> Self {
        assert!(n_actions > 0, "n_actions must be positive");
        Self {
            n_actions,
            values: HashMap::new(),
        }
    }

    /// The number of actions per entry.
    pub fn n_actions(&self) -> usize {
        self.n_actions
    }

    /// Returns the action values of `key`, materializing a zero entry on
    /// first access.
    pub fn get(&mut self, key: &K) -> &[f64] {
        let n_actions = self.n_actions;
        self.values
            .entry(key.clone())
            .or_insert_with(|| vec![0.0; n_actions])
    }

    /// Overwrites the value of one action of `key`.
    ///
    /// Action indices outside `[0, n_actions)` are a contract violation.
    pub fn set(&mut self, key: &K, action: usize, value: f64) {
        debug_assert!(action < self.n_actions);
        let n_actions = self.n_actions;
        let q = self
            .values
            .entry(key.clone())
            .or_insert_with(|| vec![0.0; n_actions]);
        q[action] = value;
    }

    /// The greedy value of `key`: the maximum over its action values.
    pub fn max_value(&mut self, key: &K) -> f64 {
        self.get(key)
            .iter()
            .cloned()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// The number of materialized entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no entry has been materialized yet.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over the materialized entries.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &[f64])> {
        self.values.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Copies the table into a plain entry list, for serialization.
    pub fn to_entries(&self) -> Vec<(K, Vec<f64>)> {
        self.values
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Rebuilds a table from an entry list.
    pub fn from_entries(n_actions: usize, entries: Vec<(K, Vec<f64>)>) -> Self {
        Self {
            n_actions,
            values: entries.into_iter().collect(),
        }
    }
}
