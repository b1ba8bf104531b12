use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// Elapsed time since some fixed origin, plus a way to wait for it to pass.
pub trait Clock {
    fn elapsed(&self) -> Duration;
    fn sleep_until(&self, deadline: Duration);
}

pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn elapsed(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep_until(&self, deadline: Duration) {
        let now = self.elapsed();
        if deadline > now {
            thread::sleep(deadline - now);
        }
    }
}

/// Test clock: sleeping jumps straight to the deadline.
#[derive(Default)]
pub struct ManualClock {
    micros: AtomicU64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.micros.fetch_add(by.as_micros() as u64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn elapsed(&self) -> Duration {
        Duration::from_micros(self.micros.load(Ordering::SeqCst))
    }

    fn sleep_until(&self, deadline: Duration) {
        let target = deadline.as_micros() as u64;
        self.micros.fetch_max(target, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_jumps_forward_only() {
        let clock = ManualClock::new();
        clock.sleep_until(Duration::from_millis(3000));
        assert_eq!(clock.elapsed(), Duration::from_millis(3000));

        clock.sleep_until(Duration::from_millis(1000));
        assert_eq!(clock.elapsed(), Duration::from_millis(3000));

        clock.advance(Duration::from_millis(30));
        assert_eq!(clock.elapsed(), Duration::from_millis(3030));
    }
}
