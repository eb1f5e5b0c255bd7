//! Cooperative Periodic Trigger
//!
//! The title style should change at a rate people can follow, independent of how fast
//! frames are drawn.  A `Cadence` is polled once per frame and reports when a period has
//! elapsed.  Nothing runs in the background, so stopping it is immediate.
use std::time;

#[derive(Debug, Clone)]
pub struct Cadence {
    period: time::Duration,
    next: Option<time::Instant>,
}

impl Cadence {
    /// Create a stopped cadence
    pub fn new(period: time::Duration) -> Cadence {
        assert!(period > time::Duration::from_secs(0), "Cadence period is zero!");

        Cadence { period, next: None }
    }

    #[inline]
    pub fn period(&self) -> time::Duration {
        self.period
    }

    /// Start firing, the first time one period after `now`
    ///
    /// Restarting a running cadence reschedules it.
    pub fn start(&mut self, now: time::Instant) {
        self.next = Some(now + self.period);
    }

    /// Stop firing until started again
    pub fn stop(&mut self) {
        self.next = None;
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.next.is_some()
    }

    /// Check whether a period elapsed
    ///
    /// Fires at most once per call.  If several periods were missed they are skipped rather
    /// than fired in a burst.
    pub fn poll(&mut self, now: time::Instant) -> bool {
        let next = match self.next {
            Some(n) if n <= now => n,
            _ => return false,
        };

        let missed = (now - next).as_nanos() / self.period.as_nanos();
        let skip = (missed + 1) * self.period.as_nanos();
        self.next = Some(next + time::Duration::from_nanos(skip as u64));

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> time::Duration {
        time::Duration::from_millis(n)
    }

    #[test]
    fn test_stopped() {
        let start = time::Instant::now();
        let mut c = Cadence::new(ms(200));

        assert!(!c.is_running());
        assert!(!c.poll(start + ms(1000)));
    }

    #[test]
    fn test_periods() {
        let start = time::Instant::now();
        let mut c = Cadence::new(ms(200));
        c.start(start);

        assert!(!c.poll(start));
        assert!(!c.poll(start + ms(199)));
        assert!(c.poll(start + ms(200)));
        assert!(!c.poll(start + ms(210)));
        assert!(!c.poll(start + ms(399)));
        assert!(c.poll(start + ms(400)));
    }

    #[test]
    fn test_no_burst() {
        let start = time::Instant::now();
        let mut c = Cadence::new(ms(200));
        c.start(start);

        assert!(c.poll(start + ms(1050)));
        assert!(!c.poll(start + ms(1100)));
        assert!(c.poll(start + ms(1200)));
    }

    #[test]
    fn test_stop() {
        let start = time::Instant::now();
        let mut c = Cadence::new(ms(200));
        c.start(start);
        c.stop();

        assert!(!c.poll(start + ms(400)));

        c.start(start + ms(400));
        assert!(!c.poll(start + ms(500)));
        assert!(c.poll(start + ms(600)));
    }

    #[test]
    fn test_long_stall() {
        let start = time::Instant::now();
        let mut c = Cadence::new(time::Duration::from_nanos(1));
        c.start(start);

        let late = start + time::Duration::from_secs(3600);
        assert!(c.poll(late));
        assert!(!c.poll(late));
        assert!(c.poll(late + time::Duration::from_nanos(1)));
    }

    #[test]
    #[should_panic]
    fn test_zero_period() {
        Cadence::new(ms(0));
    }
}
