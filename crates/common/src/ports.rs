//! Testability ports for injecting time and randomness.

use chrono::{DateTime, Utc};
use rand::Rng;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub trait RandomPort: Send + Sync {
    /// Uniform integer in `[min, max]`. Callers guarantee `min <= max`.
    fn gen_range(&self, min: i64, max: i64) -> i64;
    fn gen_uuid(&self) -> Uuid;
}

/// System clock - uses real time.
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// System random - thread-local RNG for integers, OS randomness for UUIDs.
pub struct SystemRandom;

impl SystemRandom {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPort for SystemRandom {
    fn gen_range(&self, min: i64, max: i64) -> i64 {
        rand::thread_rng().gen_range(min.min(max)..=max.max(min))
    }

    fn gen_uuid(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Fixed random for testing.
#[cfg(test)]
pub struct FixedRandom(pub i64);

#[cfg(test)]
impl RandomPort for FixedRandom {
    fn gen_range(&self, _min: i64, _max: i64) -> i64 {
        self.0
    }

    fn gen_uuid(&self) -> Uuid {
        Uuid::nil()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_random_stays_in_range() {
        let random = SystemRandom::new();
        for _ in 0..200 {
            let n = random.gen_range(-3, 3);
            assert!((-3..=3).contains(&n));
        }
    }

    #[test]
    fn test_system_random_uuid_is_v4() {
        assert_eq!(SystemRandom.gen_uuid().get_version_num(), 4);
    }

    #[test]
    fn test_system_clock_moves_forward() {
        let clock = SystemClock::default();
        let first = clock.now();
        assert!(clock.now() >= first);
    }
}
