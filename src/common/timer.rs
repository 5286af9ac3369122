//! Countdown primitive behind every timed sequence.
//!
//! A sequence (burst fire, telegraph, flash/fade, ...) is an enum whose phases own
//! an [`ActionTimer`]. The owning system ticks the timer once per fixed step; the
//! phase's action runs synchronously when the timer reports [`TimerStatus::Elapsed`].
//! That tick is the only place a sequence resumes, so it is also the only place it
//! has to check whether its owner is still alive.

use std::time::Duration;

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerStatus {
    Running,
    Elapsed,
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct ActionTimer {
    timer: Timer,
    cancelled: bool,
}

impl ActionTimer {
    /// Start a countdown. Negative or non-finite durations count as zero.
    pub fn start(seconds: f32) -> Self {
        let seconds = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
        Self {
            timer: Timer::from_seconds(seconds, TimerMode::Once),
            cancelled: false,
        }
    }

    /// Advance by `dt`. Zero-length timers elapse on their first tick.
    pub fn tick(&mut self, dt: Duration) -> TimerStatus {
        if self.cancelled {
            return TimerStatus::Cancelled;
        }
        if self.timer.duration().is_zero() {
            return TimerStatus::Elapsed;
        }
        self.timer.tick(dt);
        if self.timer.is_finished() {
            TimerStatus::Elapsed
        } else {
            TimerStatus::Running
        }
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    #[inline]
    pub fn is_elapsed(&self) -> bool {
        !self.cancelled && (self.timer.duration().is_zero() || self.timer.is_finished())
    }

    /// Progress in [0..1].
    pub fn fraction(&self) -> f32 {
        let total = self.timer.duration().as_secs_f32();
        if total <= 0.0 {
            return 1.0;
        }
        (self.timer.elapsed_secs() / total).clamp(0.0, 1.0)
    }

    #[inline]
    pub fn duration(&self) -> Duration {
        self.timer.duration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(125);

    #[test]
    fn elapses_after_exact_duration() {
        let mut t = ActionTimer::start(0.5);
        assert_eq!(t.tick(TICK), TimerStatus::Running);
        assert_eq!(t.tick(TICK), TimerStatus::Running);
        assert_eq!(t.tick(TICK), TimerStatus::Running);
        assert_eq!(t.tick(TICK), TimerStatus::Elapsed);
        assert!(t.is_elapsed());
        assert_eq!(t.fraction(), 1.0);
    }

    #[test]
    fn zero_and_negative_durations_elapse_immediately() {
        assert_eq!(ActionTimer::start(0.0).tick(Duration::ZERO), TimerStatus::Elapsed);
        assert_eq!(ActionTimer::start(-3.0).tick(TICK), TimerStatus::Elapsed);
        assert_eq!(ActionTimer::start(f32::NAN).tick(TICK), TimerStatus::Elapsed);
    }

    #[test]
    fn cancelled_timer_never_elapses() {
        let mut t = ActionTimer::start(0.25);
        t.tick(TICK);
        t.cancel();
        assert_eq!(t.tick(TICK), TimerStatus::Cancelled);
        assert_eq!(t.tick(Duration::from_secs(10)), TimerStatus::Cancelled);
        assert!(!t.is_elapsed());
    }

    #[test]
    fn independent_timers_do_not_share_progress() {
        let mut a = ActionTimer::start(0.25);
        let mut b = ActionTimer::start(0.5);
        assert_eq!(a.tick(TICK), TimerStatus::Running);
        assert_eq!(a.tick(TICK), TimerStatus::Elapsed);
        assert_eq!(b.tick(TICK), TimerStatus::Running);
        assert!((b.fraction() - 0.25).abs() < 1e-6);
    }
}
