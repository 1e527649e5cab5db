#![forbid(unsafe_code)]

use alloc::vec::Vec;
use hlba_core::SMALL_BATCH_THRESHOLD;

/// A contiguous run `start..=end` and its total weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subarray {
    pub sum: i128,
    pub start: usize,
    pub end: usize,
}

impl Subarray {
    pub fn contains(&self, idx: usize) -> bool { idx >= self.start && idx <= self.end }
}

/// Kadane's scan. `None` only for an empty input.
///
/// A run keeps extending while its running sum is non-negative, and the best
/// run is replaced only on a strictly larger sum, so ties go to the run that
/// starts earliest.
pub fn max_subarray(weights: &[i64]) -> Option<Subarray> {
    let (&first, rest) = weights.split_first()?;

    let mut best = Subarray { sum: first as i128, start: 0, end: 0 };
    let mut running = first as i128;
    let mut run_start = 0;

    for (offset, &w) in rest.iter().enumerate() {
        let i = offset + 1;
        let w = w as i128;
        if running >= 0 {
            running += w;
        } else {
            running = w;
            run_start = i;
        }
        if running > best.sum {
            best = Subarray { sum: running, start: run_start, end: i };
        }
    }
    Some(best)
}

/// Turns per-packet weights into an admission order (a permutation of indices).
pub trait OrderingPolicy: Send + Sync {
    fn order(&self, weights: &[i64]) -> Vec<usize>;
}

/// Arrival order. Reordering a handful of packets is not worth its cost.
#[derive(Debug, Clone, Copy, Default)]
pub struct SmallBatchPolicy;

impl OrderingPolicy for SmallBatchPolicy {
    fn order(&self, weights: &[i64]) -> Vec<usize> {
        (0..weights.len()).collect()
    }
}

/// Densest contiguous block first, then everything else, each in arrival order.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxSubarrayPolicy;

impl OrderingPolicy for MaxSubarrayPolicy {
    fn order(&self, weights: &[i64]) -> Vec<usize> {
        let run = match max_subarray(weights) {
            Some(run) => run,
            None => return Vec::new(),
        };
        let mut order = Vec::with_capacity(weights.len());
        order.extend(run.start..=run.end);
        order.extend((0..weights.len()).filter(|&i| !run.contains(i)));
        order
    }
}

/// Picks a policy by batch size: `n <= threshold` keeps arrival order.
#[derive(Debug, Clone, Copy)]
pub struct Scheduler {
    threshold: usize,
}

impl Default for Scheduler {
    fn default() -> Self { Self::new() }
}

impl Scheduler {
    pub fn new() -> Self {
        Self { threshold: SMALL_BATCH_THRESHOLD }
    }

    pub fn with_threshold(threshold: usize) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> usize { self.threshold }

    pub fn policy_for(&self, n: usize) -> &'static dyn OrderingPolicy {
        if n <= self.threshold {
            return &SmallBatchPolicy;
        }
        &MaxSubarrayPolicy
    }

    /// Order by packet size.
    pub fn order(&self, sizes: &[usize]) -> Vec<usize> {
        let weights: Vec<i64> = sizes
            .iter()
            .map(|&s| i64::try_from(s).unwrap_or(i64::MAX))
            .collect();
        self.order_by_weight(&weights)
    }

    /// Order by arbitrary signed scores.
    pub fn order_by_weight(&self, weights: &[i64]) -> Vec<usize> {
        self.policy_for(weights.len()).order(weights)
    }
}
