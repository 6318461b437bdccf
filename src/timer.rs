//! Millisecond timers owned by the session
//!
//! Nothing here reads a wall clock. The owner supplies `now_ms` and asks
//! which timer is due next; cancelling is dropping the value.

/// A periodic timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    period_ms: u64,
    next_due_ms: u64,
}

impl Interval {
    /// First firing one period after `now_ms`
    pub fn starting_at(now_ms: u64, period_ms: u64) -> Self {
        Self {
            period_ms: period_ms.max(1),
            next_due_ms: now_ms + period_ms.max(1),
        }
    }

    #[inline]
    pub fn next_due(&self) -> u64 {
        self.next_due_ms
    }

    #[inline]
    pub fn is_due(&self, now_ms: u64) -> bool {
        self.next_due_ms <= now_ms
    }

    /// Consume the pending firing and schedule the next. Returns the fire time.
    pub fn fire(&mut self) -> u64 {
        let due = self.next_due_ms;
        self.next_due_ms += self.period_ms;
        due
    }
}

/// A one-shot expiry that can be pushed back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    at_ms: u64,
}

impl Deadline {
    pub fn after(now_ms: u64, timeout_ms: u64) -> Self {
        Self {
            at_ms: now_ms + timeout_ms,
        }
    }

    #[inline]
    pub fn at(&self) -> u64 {
        self.at_ms
    }

    #[inline]
    pub fn is_expired(&self, now_ms: u64) -> bool {
        self.at_ms <= now_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_fires_every_period() {
        let mut interval = Interval::starting_at(1000, 50);
        assert!(!interval.is_due(1049));
        assert!(interval.is_due(1050));
        assert_eq!(interval.fire(), 1050);
        assert_eq!(interval.next_due(), 1100);
    }

    #[test]
    fn test_zero_period_still_advances() {
        let mut interval = Interval::starting_at(0, 0);
        let first = interval.fire();
        assert!(interval.next_due() > first);
    }

    #[test]
    fn test_deadline() {
        let deadline = Deadline::after(100, 200);
        assert_eq!(deadline.at(), 300);
        assert!(!deadline.is_expired(299));
        assert!(deadline.is_expired(300));
    }
}
