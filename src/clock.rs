use std::time::Duration;
use std::time::Instant;

/// Turns elapsed wall time into a number of ticks to run.
///
/// Time that doesn't add up to a whole tick carries over to the next call, so the tick rate holds
/// on average even when frames are shorter than a tick or not a multiple of one.
#[derive(Debug, Clone)]
pub struct TickClock {
    interval: Duration,

    /// Time up to which ticks have been handed out
    last: Instant,

    /// Most ticks handed out by one call. Anything past it is dropped rather than owed.
    max: u32,
}

impl TickClock {
    pub fn new(interval: Duration, now: Instant, max: u32) -> Self {
        Self {
            interval,
            last: now,
            max,
        }
    }

    /// Forget any time owed. Called while paused.
    pub fn hold(&mut self, now: Instant) {
        self.last = now;
    }

    /// Number of ticks due at `now`
    pub fn owed(&mut self, now: Instant) -> u32 {
        let elapsed = now.saturating_duration_since(self.last);
        let owed = elapsed.as_nanos() / self.interval.as_nanos().max(1);

        if owed > self.max as u128 {
            self.last = now;

            return self.max;
        }

        let owed = owed as u32;
        self.last += self.interval * owed;

        owed
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;
    use std::time::Instant;

    use super::TickClock;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn remainder_carries_over() {
        let start = Instant::now();
        let mut clock = TickClock::new(MS, start, 100);

        assert_eq!(clock.owed(start + MS / 2), 0);
        assert_eq!(clock.owed(start + MS * 5 / 2), 2);

        // The half tick left over from before completes here
        assert_eq!(clock.owed(start + MS * 3), 1);
    }

    #[test]
    fn steady_frames_keep_the_rate() {
        let start = Instant::now();
        let mut clock = TickClock::new(MS, start, 100);

        // 60 frames of 16.7ms should give 1002 ticks, not 60 * 16
        let frame = Duration::from_micros(16_700);
        let total: u32 = (1..=60).map(|i| clock.owed(start + frame * i)).sum();

        assert_eq!(total, 1002);
    }

    #[test]
    fn backlog_past_the_cap_is_dropped() {
        let start = Instant::now();
        let mut clock = TickClock::new(MS, start, 10);

        assert_eq!(clock.owed(start + MS * 50), 10);
        assert_eq!(clock.owed(start + MS * 50 + MS / 2), 0);
    }

    #[test]
    fn hold_forgets_time() {
        let start = Instant::now();
        let mut clock = TickClock::new(MS, start, 100);

        clock.hold(start + MS * 20);

        assert_eq!(clock.owed(start + MS * 21), 1);
    }
}
