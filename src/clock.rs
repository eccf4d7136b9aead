use chrono::Utc;

/// Source of the current time, in whole Unix epoch seconds.
pub trait Clock: Send + Sync {
    fn now_secs(&self) -> i64;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now_secs(&self) -> i64 {
        (**self).now_secs()
    }
}

/// Wall clock.
#[derive(Debug, Default, Copy, Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_secs(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Clock frozen at a given epoch second.
#[derive(Debug, Copy, Clone)]
pub struct FixedClock(i64);

impl FixedClock {
    pub fn new(now_secs: i64) -> Self {
        FixedClock(now_secs)
    }
}

impl Clock for FixedClock {
    fn now_secs(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_does_not_move() {
        let clock = FixedClock::new(1_600_000_000);
        assert_eq!(1_600_000_000, clock.now_secs());
        assert_eq!(clock.now_secs(), clock.now_secs());
    }

    #[test]
    fn system_clock_is_after_2020() {
        assert!(SystemClock.now_secs() > 1_577_836_800);
    }
}
