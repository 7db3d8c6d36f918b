use std::time::{Duration, Instant};

/// Period of an auto-repeat while a scrub key is held.
pub const REPEAT_INTERVAL: Duration = Duration::from_millis(80);

/// Direction of a cursor scrub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum ScrubDirection {
    Backward,
    Forward,
}

impl ScrubDirection {
    /// Moves `value` one step in this direction, clamped to `0..=max`.
    #[must_use]
    pub fn step(self, value: usize, amount: usize, max: usize) -> usize {
        match self {
            Self::Backward => value.saturating_sub(amount),
            Self::Forward => value.saturating_add(amount).min(max),
        }
    }
}

/// Token of one repeat run, returned by [`RepeatTimer::start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeatHandle {
    run: u64,
    direction: ScrubDirection,
}

impl RepeatHandle {
    #[must_use]
    pub fn direction(&self) -> ScrubDirection {
        self.direction
    }
}

#[derive(Debug, Clone, Copy)]
struct ActiveRepeat {
    handle: RepeatHandle,
    next_fire: Instant,
}

/// Fixed-interval auto-repeat with at most one active run.
///
/// Time is passed in by the caller; the timer never reads the clock.
#[derive(Debug, Clone)]
pub struct RepeatTimer {
    interval: Duration,
    active: Option<ActiveRepeat>,
    runs: u64,
}

impl Default for RepeatTimer {
    fn default() -> Self {
        Self::new(REPEAT_INTERVAL)
    }
}

impl RepeatTimer {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            active: None,
            runs: 0,
        }
    }

    /// Starts repeating in `direction`; the first firing is one interval after `now`.
    ///
    /// While a run is active this does nothing and returns that run's handle.
    #[must_use]
    pub fn start(
&mut self, direction: ScrubDirection, now: Instant) -> RepeatHandle {
        if let Some(active) = &self.active {
            return active.handle;
        }
        self.runs += 1;
        let handle = RepeatHandle {
            run: self.runs,
            direction,
        };
        self.active = Some(ActiveRepeat {
            handle,
            next_fire: now + self.interval,
        });
        log::trace!("repeat {} started {direction:?}", handle.run);
        handle
    }

    /// Stops the active run, if any. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if let Some(active) = self.active.take() {
            log::trace!("repeat {} stopped", active.handle.run);
        }
    }

    /// Stops the run identified by `handle`; a later run is left alone.
    pub fn stop_run(&mut self, handle: RepeatHandle) {
        if self.is_current(handle) {
            self.stop();
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    #[must_use]
    pub fn is_current(&self, handle: RepeatHandle) -> bool {
        self.active.is_some_and(|active| active.handle == handle)
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.active.map(|active| active.next_fire)
    }

    /// Fires once if the deadline has passed at `now`.
    ///
    /// A late poll fires a single time and reschedules from `now`, so missed
    /// periods are dropped rather than replayed.
    pub fn poll(&mut self, now: Instant) -> Option<ScrubDirection> {
        let active = self.active.as_mut()?;
        if now < active.next_fire {
            return None;
        }
        active.next_fire = now + self.interval;
        Some(active.handle.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_fires_every_interval() {
        let t0 = Instant::now();
        let mut timer = RepeatTimer::default();
        let _ = timer.start(ScrubDirection::Forward, t0);
        assert_eq!(timer.poll(t0 + 79 * MS), None);
        assert_eq!(timer.poll(t0 + 80 * MS), Some(ScrubDirection::Forward));
        assert_eq!(timer.poll(t0 + 100 * MS), None);
        assert_eq!(timer.next_deadline(), Some(t0 + 160 * MS));
        assert_eq!(timer.poll(t0 + 160 * MS), Some(ScrubDirection::Forward));
    }

    #[test]
    fn test_late_poll_fires_once() {
        let t0 = Instant::now();
        let mut timer = RepeatTimer::default();
        let _ = timer.start(ScrubDirection::Backward, t0);
        assert!(timer.poll(t0 + 1000 * MS).is_some());
        assert!(timer.poll(t0 + 1001 * MS).is_none());
    }

    #[test]
    fn test_start_while_running_is_a_no_op() {
        let t0 = Instant::now();
        let mut timer = RepeatTimer::default();
        let first = timer.start(ScrubDirection::Forward, t0);
        let second = timer.start(ScrubDirection::Backward, t0 + 50 * MS);
        assert_eq!(first, second);
        assert_eq!(second.direction(), ScrubDirection::Forward);
        assert_eq!(timer.next_deadline(), Some(t0 + 80 * MS));
    }

    #[test]
    fn test_stop_is_idempotent() {
        let t0 = Instant::now();
        let mut timer = RepeatTimer::default();
        timer.stop();
        let _ = timer.start(ScrubDirection::Forward, t0);
        timer.stop();
        timer.stop();
        assert!(!timer.is_running());
        assert_eq!(timer.poll(t0 + 500 * MS), None);
        assert_eq!(timer.next_deadline(), None);
    }

    #[test]
    fn test_stale_handle_does_not_stop_new_run() {
        let t0 = Instant::now();
        let mut timer = RepeatTimer::default();
        let old = timer.start(ScrubDirection::Forward, t0);
        timer.stop();
        let new = timer.start(ScrubDirection::Backward, t0);
        timer.stop_run(old);
        assert!(timer.is_running());
        timer.stop_run(new);
        assert!(!timer.is_running());
    }

    #[test]
    fn test_step_is_clamped() {
        assert_eq!(ScrubDirection::Backward.step(3, 10, 100), 0);
        assert_eq!(ScrubDirection::Forward.step(95, 10, 100), 100);
        assert_eq!(ScrubDirection::Forward.step(5, 1, 100), 6);
    }
}
