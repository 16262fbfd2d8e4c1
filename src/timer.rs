/// Single-shot alarm that drives every phase transition
use std::time::Duration;

use tokio::time::{self, Instant};

pub const fn minutes(minutes: u64) -> Duration {
    Duration::from_secs(minutes * 60)
}

/// What happens when the pending timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// A randomized study interval ran out; a break of some kind is due.
    StudyInterval,
    ShortBreakEnd,
    LongBreakEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Armed {
    pub kind: TimerKind,
    pub delay: Duration,
    pub deadline: Instant,
}

/// Holds at most one pending timer. Arming a second one before the first
/// has expired is a scheduling bug.
#[derive(Debug, Default)]
pub struct Alarm {
    armed: Option<Armed>,
}

impl Alarm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self, kind: TimerKind, delay: Duration) {
        let previous = self.armed.replace(Armed {
            kind,
            delay,
            deadline: Instant::now() + delay,
        });
        debug_assert!(
            previous.is_none(),
            "alarm armed while {previous:?} was still pending"
        );
    }

    pub fn pending(&self) -> Option<&Armed> {
        self.armed.as_ref()
    }

    /// Waits for the pending timer and disarms it. Returns `None` when
    /// nothing is armed.
    ///
    /// The alarm stays armed until the deadline has passed, so dropping this
    /// future early loses nothing.
    pub async fn expire(&mut self) -> Option<Armed> {
        let armed = self.armed?;
        time::sleep_until(armed.deadline).await;
        self.armed = None;
        Some(armed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minutes_converts_to_seconds() {
        assert_eq!(minutes(0), Duration::ZERO);
        assert_eq!(minutes(90), Duration::from_secs(5400));
    }

    #[tokio::test(start_paused = true)]
    async fn expire_waits_for_the_deadline() {
        let mut alarm = Alarm::new();
        let started = Instant::now();
        alarm.arm(TimerKind::ShortBreakEnd, Duration::from_secs(20));

        let pending = alarm.pending().copied().unwrap();
        assert_eq!(pending.kind, TimerKind::ShortBreakEnd);
        assert_eq!(pending.deadline, started + Duration::from_secs(20));

        let fired = alarm.expire().await.unwrap();
        assert_eq!(fired, pending);
        assert_eq!(started.elapsed(), Duration::from_secs(20));
        assert!(alarm.pending().is_none());
    }

    #[tokio::test]
    async fn expire_without_timer_returns_none() {
        let mut alarm = Alarm::new();
        assert!(alarm.expire().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_wait_keeps_timer_pending() {
        let mut alarm = Alarm::new();
        alarm.arm(TimerKind::LongBreakEnd, minutes(20));

        let timed_out = time::timeout(minutes(1), alarm.expire()).await;
        assert!(timed_out.is_err());
        assert_eq!(
            alarm.pending().map(|armed| armed.kind),
            Some(TimerKind::LongBreakEnd)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn rearm_after_expiry() {
        let mut alarm = Alarm::new();
        alarm.arm(TimerKind::StudyInterval, minutes(3));
        alarm.expire().await.unwrap();
        alarm.arm(TimerKind::ShortBreakEnd, Duration::from_secs(20));
        assert_eq!(
            alarm.pending().map(|armed| armed.kind),
            Some(TimerKind::ShortBreakEnd)
        );
    }

    #[cfg(debug_assertions)]
    #[tokio::test]
    #[should_panic(expected = "still pending")]
    async fn arming_twice_panics_in_debug() {
        let mut alarm = Alarm::new();
        alarm.arm(TimerKind::StudyInterval, minutes(3));
        alarm.arm(TimerKind::StudyInterval, minutes(4));
    }
}
