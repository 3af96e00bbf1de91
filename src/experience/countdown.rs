use std::time::{Duration, Instant};

/// A fixed-length timer polled by the owner's periodic tick.
///
/// It holds no callback, so dropping it is cancelling it: once the stage
/// that owns a countdown is replaced, nothing can fire for it any more.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    started: Instant,
    duration: Duration,
}

impl Countdown {
    pub fn new(started: Instant, duration: Duration) -> Self {
        Self { started, duration }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started)
    }

    /// Percentage in `0.0..=100.0`.
    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 100.0;
        }
        (self.elapsed(now).as_secs_f64() / self.duration.as_secs_f64() * 100.0).min(100.0)
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.elapsed(now) >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_capped() {
        let t0 = Instant::now();
        let c = Countdown::new(t0, Duration::from_secs(10));
        assert_eq!(c.progress(t0), 0.0);
        assert!((c.progress(t0 + Duration::from_secs(5)) - 50.0).abs() < 1e-9);
        assert_eq!(c.progress(t0 + Duration::from_secs(30)), 100.0);
        assert!(!c.is_finished(t0 + Duration::from_millis(9_999)));
        assert!(c.is_finished(t0 + Duration::from_secs(10)));
    }

    #[test]
    fn time_before_start_counts_as_zero() {
        let t0 = Instant::now() + Duration::from_secs(1);
        let c = Countdown::new(t0, Duration::from_secs(1));
        assert_eq!(c.elapsed(Instant::now()), Duration::ZERO);
    }
}
