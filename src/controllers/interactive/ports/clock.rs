use std::time::{Duration, Instant};

/// Source of tick timestamps.
pub trait FrameClock {
    fn now(&mut self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl FrameClock for SystemClock {
    fn now(&mut self) -> Instant {
        Instant::now()
    }
}

/// Advances by a fixed step on every reading.
#[derive(Debug, Clone, Copy)]
pub struct FixedStepClock {
    current: Instant,
    step: Duration,
}

impl FixedStepClock {
    #[must_use]
    pub fn new(start: Instant, step: Duration) -> Self {
        Self {
            current: start,
            step,
        }
    }
}

impl FrameClock for FixedStepClock {
    fn now(&mut self) -> Instant {
        let now = self.current;
        self.current += self.step;
        now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_step_clock_advances_by_step() {
        let start = Instant::now();
        let mut clock = FixedStepClock::new(start, Duration::from_millis(16));

        assert_eq!(clock.now(), start);
        assert_eq!(clock.now(), start + Duration::from_millis(16));
        assert_eq!(clock.now(), start + Duration::from_millis(32));
    }
}
