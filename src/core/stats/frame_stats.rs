//! Rolling frames-per-second statistics.
//!
//! One sample is recorded per animation tick from the time elapsed since the
//! previous tick. Only the most recent `capacity` samples are kept; min, max
//! and mean are recomputed over that window on every call.

use std::collections::VecDeque;
use std::fmt;
use std::time::Instant;

pub const DEFAULT_FRAME_HISTORY: usize = 100;

/// Rounded statistics for display.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FrameStatsSnapshot {
    pub latest: u64,
    pub mean: u64,
    pub min: u64,
    pub max: u64,
    pub window: usize,
}

impl fmt::Display for FrameStatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Frames per Second:")?;
        writeln!(f, "latest = {}", self.latest)?;
        writeln!(f, "avg of last {} = {}", self.window, self.mean)?;
        writeln!(f, "min of last {} = {}", self.window, self.min)?;
        write!(f, "max of last {} = {}", self.window, self.max)
    }
}

#[derive(Debug, Clone)]
pub struct FrameStatsTracker {
    capacity: usize,
    samples: VecDeque<f64>,
    last_timestamp: Option<Instant>,
    latest: Option<f64>,
    mean: f64,
    min: f64,
    max: f64,
}

impl FrameStatsTracker {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);

        Self {
            capacity,
            samples: VecDeque::with_capacity(capacity),
            last_timestamp: None,
            latest: None,
            mean: 0.0,
            min: 0.0,
            max: 0.0,
        }
    }

    /// Records a tick observed at `now`.
    ///
    /// The first call only primes the timestamp. A zero (or backwards) delta
    /// produces no sample. Returns the instantaneous fps when one was recorded.
    pub fn record_frame(&mut self, now: Instant) -> Option<f64> {
        let previous = self.last_timestamp.replace(now)?;
        let delta_ms = now.checked_duration_since(previous)?.as_secs_f64() * 1000.0;

        if delta_ms <= 0.0 {
            return None;
        }

        let fps = 1000.0 / delta_ms;

        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(fps);
        self.latest = Some(fps);
        self.recompute();

        Some(fps)
    }

    fn recompute(&mut self) {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;

        for &sample in &self.samples {
            sum += sample;
            min = min.min(sample);
            max = max.max(sample);
        }

        self.mean = sum / self.samples.len() as f64;
        self.min = min;
        self.max = max;
    }

    /// `None` until at least one sample exists.
    #[must_use]
    pub fn snapshot(&self) -> Option<FrameStatsSnapshot> {
        let latest = self.latest?;

        Some(FrameStatsSnapshot {
            latest: latest.round() as u64,
            mean: self.mean.round() as u64,
            min: self.min.round() as u64,
            max: self.max.round() as u64,
            window: self.capacity,
        })
    }

    pub fn samples(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Forgets samples and the last timestamp, e.g. after the loop was paused.
    pub fn reset(&mut self) {
        self.samples.clear();
        self.last_timestamp = None;
        self.latest = None;
        self.mean = 0.0;
        self.min = 0.0;
        self.max = 0.0;
    }
}

impl Default for FrameStatsTracker {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_HISTORY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn ticks(tracker: &mut FrameStatsTracker, start: Instant, deltas_ms: &[u64]) -> Instant {
        let mut now = start;
        tracker.record_frame(now);
        for &delta in deltas_ms {
            now += Duration::from_millis(delta);
            tracker.record_frame(now);
        }
        now
    }

    #[test]
    fn first_call_records_no_sample() {
        let mut tracker = FrameStatsTracker::default();

        assert_eq!(tracker.record_frame(Instant::now()), None);
        assert!(tracker.is_empty());
        assert_eq!(tracker.snapshot(), None);
    }

    #[test]
    fn latest_is_rounded_fps_of_final_delta() {
        let mut tracker = FrameStatsTracker::default();
        ticks(&mut tracker, Instant::now(), &[10, 20, 30]);

        let snapshot = tracker.snapshot().unwrap();
        // 1000 / 30 = 33.33
        assert_eq!(snapshot.latest, 33);
        assert_eq!(snapshot.max, 100);
        assert_eq!(snapshot.min, 33);
        // (100 + 50 + 33.33) / 3 = 61.1
        assert_eq!(snapshot.mean, 61);
    }

    #[test]
    fn zero_delta_is_skipped() {
        let mut tracker = FrameStatsTracker::default();
        let start = Instant::now();
        let now = ticks(&mut tracker, start, &[20]);

        assert_eq!(tracker.record_frame(now), None);
        assert_eq!(tracker.len(), 1);
        assert_eq!(tracker.snapshot().unwrap().latest, 50);
    }

    #[test]
    fn history_is_capped_with_fifo_eviction() {
        let mut tracker = FrameStatsTracker::new(100);
        let deltas: Vec<u64> = (1..=150).collect();
        ticks(&mut tracker, Instant::now(), &deltas);

        assert_eq!(tracker.len(), 100);

        let expected: Vec<f64> = (51..=150).map(|d| 1000.0 / d as f64).collect();
        let actual: Vec<f64> = tracker.samples().collect();
        for (a, e) in actual.iter().zip(expected.iter()) {
            assert!((a - e).abs() < 1e-9, "sample {a} != {e}");
        }
    }

    #[test]
    fn snapshot_formats_like_readout() {
        let mut tracker = FrameStatsTracker::default();
        ticks(&mut tracker, Instant::now(), &[16]);

        let text = tracker.snapshot().unwrap().to_string();

        assert!(text.starts_with("Frames per Second:\nlatest = 63"));
        assert!(text.ends_with("max of last 100 = 63"));
    }

    #[test]
    fn reset_discards_prior_timestamp() {
        let mut tracker = FrameStatsTracker::default();
        let now = ticks(&mut tracker, Instant::now(), &[10]);

        tracker.reset();

        assert_eq!(tracker.record_frame(now + Duration::from_millis(5)), None);
        assert!(tracker.is_empty());
    }
}
