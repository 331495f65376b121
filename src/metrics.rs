//! Caller-owned performance tracking.
//!
//! There is no process-wide tracker: a caller that wants timings creates
//! a [`Tracker`] (or any other [`MetricsSink`]) and passes it down
//! explicitly. The engine itself never records anything on its own.

use std::time::{Duration, Instant};

/// One timed engine operation.
#[derive(Clone, Copy, Debug)]
pub struct OperationSample {
    /// Operation label, e.g. `"encrypt"`.
    pub operation: &'static str,
    /// Wall-clock duration of the call.
    pub duration: Duration,
    /// Letters processed by the call.
    pub chars: usize,
}

/// Destination for operation samples. The backing store is the caller's
/// choice; the engine only ever appends.
pub trait MetricsSink {
    /// Accepts one sample.
    fn record(&mut self, sample: OperationSample);
}

/// Aggregated view of one operation's samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OperationSummary {
    /// Operation label.
    pub operation: &'static str,
    /// Number of recorded calls.
    pub calls: usize,
    /// Total time across all calls.
    pub total: Duration,
}

/// In-memory sink that keeps every sample and can aggregate them.
#[derive(Debug, Default)]
pub struct Tracker {
    samples: Vec<OperationSample>,
}

impl Tracker {
    /// An empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `op`, records its duration under `operation`, and returns
    /// its result.
    pub fn time<T>(&mut self, operation: &'static str, chars: usize, op: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let result = op();
        self.record(OperationSample {
            operation,
            duration: start.elapsed(),
            chars,
        });
        result
    }

    /// All recorded samples in insertion order.
    #[must_use]
    pub fn samples(&self) -> &[OperationSample] {
        &self.samples
    }

    /// Per-operation aggregates, in first-seen order.
    #[must_use]
    pub fn summary(&self) -> Vec<OperationSummary> {
        let mut summaries: Vec<OperationSummary> = Vec::new();
        for sample in &self.samples {
            match summaries
                .iter_mut()
                .find(|s| s.operation == sample.operation)
            {
                Some(existing) => {
                    existing.calls += 1;
                    existing.total += sample.duration;
                }
                None => summaries.push(OperationSummary {
                    operation: sample.operation,
                    calls: 1,
                    total: sample.duration,
                }),
            }
        }
        summaries
    }
}

impl MetricsSink for Tracker {
    fn record(&mut self, sample: OperationSample) {
        self.samples.push(sample);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn time_records_a_sample_and_passes_the_result_through() {
        let mut tracker = Tracker::new();
        let out = tracker.time("encrypt", 5, || "KHOOR");
        assert_eq!(out, "KHOOR");
        assert_eq!(tracker.samples().len(), 1);
        assert_eq!(tracker.samples()[0].operation, "encrypt");
        assert_eq!(tracker.samples()[0].chars, 5);
    }

    #[test]
    fn summary_groups_by_operation() {
        let mut tracker = Tracker::new();
        tracker.time("encrypt", 5, || ());
        tracker.time("analyze", 5, || ());
        tracker.time("encrypt", 7, || ());
        let summary = tracker.summary();
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].operation, "encrypt");
        assert_eq!(summary[0].calls, 2);
        assert_eq!(summary[1].operation, "analyze");
        assert_eq!(summary[1].calls, 1);
    }

    #[test]
    fn independent_trackers_share_nothing() {
        let mut a = Tracker::new();
        let b = Tracker::new();
        a.time("encrypt", 1, || ());
        assert_eq!(a.samples().len(), 1);
        assert!(b.samples().is_empty());
    }
}
