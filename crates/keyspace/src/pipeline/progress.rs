use core::time::Duration;
use portable_atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Records persisted so far.
///
/// Only the writer advances it, once per record that its sink accepted, so
/// it never runs ahead of the artifact.
#[derive(Clone, Debug, Default)]
pub struct ProgressCounter(Arc<AtomicU64>);

impl ProgressCounter {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Acquire)
    }

    #[inline]
    pub(crate) fn advance(&self) {
        self.0.fetch_add(1, Ordering::Release);
    }
}

/// One observation of a run's progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressSample {
    pub completed: u64,
    pub total: u64,
    /// Records per second since the run started.
    pub rate: f64,
    pub elapsed: Duration,
}

impl ProgressSample {
    /// Completed share of the total, in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}

/// Receives progress samples from a [`ProgressMonitor`].
pub trait ProgressSink: Send + 'static {
    fn observe(&mut self, sample: ProgressSample);

    /// Called once with the last sample of the run.
    fn finish(&mut self, sample: ProgressSample) {
        self.observe(sample);
    }
}

impl ProgressSink for () {
    fn observe(&mut self, _sample: ProgressSample) {}
}

/// Periodically samples a [`ProgressCounter`]. Purely an observer: nothing
/// in the run depends on it.
#[derive(Clone, Debug)]
pub struct ProgressMonitor {
    counter: ProgressCounter,
    total: u64,
    interval: Duration,
}

impl ProgressMonitor {
    pub const fn new(counter: ProgressCounter, total: u64, interval: Duration) -> Self {
        Self {
            counter,
            total,
            interval,
        }
    }

    /// Feeds `sink` until `stop` is cancelled, then emits one final sample.
    pub async fn run<P: ProgressSink>(self, mut sink: P, stop: CancellationToken) {
        let started = Instant::now();
        let mut ticker = tokio::time::interval(self.interval.max(Duration::from_millis(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                () = stop.cancelled() => break,
                _ = ticker.tick() => sink.observe(self.sample(started)),
            }
        }

        sink.finish(self.sample(started));
    }

    fn sample(&self, started: Instant) -> ProgressSample {
        let completed = self.counter.get();
        let elapsed = started.elapsed();
        let secs = elapsed.as_secs_f64();
        ProgressSample {
            completed,
            total: self.total,
            rate: if secs > 0.0 { completed as f64 / secs } else { 0.0 },
            elapsed,
        }
    }
}
