//! Worker-count policies for the parallel algorithms.
//!
//! An algorithm asks its [`ThreadBudget`] once per call, passing its name and
//! an input-size metric (the vertex count for Johnson). A `None` answer means
//! the policy has nothing to say and the algorithm uses every available core.

use std::collections::HashMap;
use std::fmt::Debug;
use std::num::NonZeroUsize;

/// Source of worker-count recommendations
pub trait ThreadBudget: Debug + Send + Sync {
    /// Recommended number of workers, or `None` to decline
    fn recommend(&self, algorithm: &str, input_size: usize) -> Option<usize>;
}

/// Number of hardware threads, falling back to 1 when it cannot be queried
pub fn available_cores() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Policy that never recommends anything
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultBudget;

impl ThreadBudget for DefaultBudget {
    fn recommend(&self, _algorithm: &str, _input_size: usize) -> Option<usize> {
        None
    }
}

/// Policy that always recommends the same worker count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedThreads(pub usize);

impl ThreadBudget for FixedThreads {
    fn recommend(&self, _algorithm: &str, _input_size: usize) -> Option<usize> {
        Some(self.0)
    }
}

/// Worker count of a policy rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ThreadCount {
    /// One worker per hardware thread
    Cores,
    Fixed(usize),
}

impl ThreadCount {
    pub fn resolve(self) -> usize {
        match self {
            ThreadCount::Cores => available_cores(),
            ThreadCount::Fixed(count) => count,
        }
    }
}

/// Applies to inputs whose size lies in `min_size..=max_size`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntervalRule {
    pub min_size: usize,
    pub max_size: usize,
    pub threads: ThreadCount,
}

impl IntervalRule {
    pub fn contains(&self, input_size: usize) -> bool {
        (self.min_size..=self.max_size).contains(&input_size)
    }
}

/// Settings of one algorithm in a [`SizeIntervalPolicy`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlgorithmThreads {
    /// Used when no rule matches; `None` means [`ThreadCount::Cores`]
    #[cfg_attr(feature = "serde", serde(default))]
    pub default: Option<ThreadCount>,
    /// Kept sorted by `(min_size, max_size)`; the first match wins
    #[cfg_attr(feature = "serde", serde(default))]
    pub rules: Vec<IntervalRule>,
}

/// Per-algorithm table of input-size intervals and worker counts
///
/// Algorithms without an entry are declined. A registered algorithm always
/// gets an answer: the first matching interval, else its default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SizeIntervalPolicy {
    algorithms: HashMap<String, AlgorithmThreads>,
}

impl SizeIntervalPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fallback worker count of an algorithm
    pub fn with_default(mut self, algorithm: &str, threads: ThreadCount) -> Self {
        self.algorithms
            .entry(algorithm.to_string())
            .or_default()
            .default = Some(threads);
        self
    }

    /// Add a rule for inputs of size `min_size..=max_size`
    pub fn with_interval(
        mut self,
        algorithm: &str,
        min_size: usize,
        max_size: usize,
        threads: ThreadCount,
    ) -> Self {
        let settings = self.algorithms.entry(algorithm.to_string()).or_default();
        settings.rules.push(IntervalRule {
            min_size,
            max_size,
            threads,
        });
        settings
            .rules
            .sort_by_key(|rule| (rule.min_size, rule.max_size));
        self
    }

    pub fn settings(&self, algorithm: &str) -> Option<&AlgorithmThreads> {
        self.algorithms.get(algorithm)
    }
}

impl ThreadBudget for SizeIntervalPolicy {
    fn recommend(&self, algorithm: &str, input_size: usize) -> Option<usize> {
        let settings = self.algorithms.get(algorithm)?;
        let threads = settings
            .rules
            .iter()
            .find(|rule| rule.contains(input_size))
            .map(|rule| rule.threads)
            .or(settings.default)
            .unwrap_or(ThreadCount::Cores);
        Some(threads.resolve())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_budget_declines() {
        assert_eq!(DefaultBudget.recommend("johnson", 100), None);
        assert_eq!(FixedThreads(3).recommend("johnson", 100), Some(3));
    }

    #[test]
    fn test_interval_policy_picks_first_matching_rule() {
        let policy = SizeIntervalPolicy::new()
            .with_default("johnson", ThreadCount::Fixed(8))
            .with_interval("johnson", 100, usize::MAX, ThreadCount::Fixed(4))
            .with_interval("johnson", 0, 99, ThreadCount::Fixed(1))
            .with_interval("johnson", 50, 150, ThreadCount::Fixed(2));

        assert_eq!(policy.recommend("johnson", 10), Some(1));
        assert_eq!(policy.recommend("johnson", 60), Some(1));
        assert_eq!(policy.recommend("johnson", 120), Some(2));
        assert_eq!(policy.recommend("johnson", 1_000), Some(4));
        assert_eq!(policy.settings("johnson").unwrap().rules[0].min_size, 0);
    }

    #[test]
    fn test_interval_policy_falls_back_to_default() {
        let policy = SizeIntervalPolicy::new()
            .with_default("johnson", ThreadCount::Fixed(6))
            .with_interval("johnson", 10, 20, ThreadCount::Fixed(2));
        assert_eq!(policy.recommend("johnson", 5), Some(6));

        let cores_only = SizeIntervalPolicy::new().with_interval("boruvka", 1, 2, ThreadCount::Fixed(2));
        assert_eq!(cores_only.recommend("boruvka", 3), Some(available_cores()));
    }

    #[test]
    fn test_interval_policy_declines_unknown_algorithms() {
        let policy = SizeIntervalPolicy::new().with_default("johnson", ThreadCount::Cores);
        assert_eq!(policy.recommend("hierholzer", 10), None);
    }
}
