use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::{RepeatTimer, event::TuiEvent};

/// When renders happen.
#[derive(Debug, Clone, Copy, Default)]
pub enum RenderMode {
    /// At a fixed interval.
    Interval(Duration),
    /// Whenever state may have changed (tick, repeat or terminal event).
    #[default]
    OnDirty,
    /// Like `OnDirty`, but at most once per interval; bursts are batched.
    Throttled(Duration),
}

impl RenderMode {
    #[must_use]
    pub fn interval_from_rate(rate: f64) -> Self {
        Self::Interval(Duration::from_secs_f64(1.0 / rate))
    }

    #[must_use]
    pub fn throttled_from_rate(rate: f64) -> Self {
        Self::Throttled(Duration::from_secs_f64(1.0 / rate))
    }
}

/// Scheduling state of the runtime.
///
/// Deadlines are computed from an explicit `now` so the scheduling logic can
/// be exercised without a terminal.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    render_mode: RenderMode,
    last_tick: Instant,
    last_render: Instant,
    dirty: bool,
    pub(super) repeat: RepeatTimer,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new(Instant::now())
    }
}

impl EventLoop {
    /// Loop with ticks disabled, `OnDirty` rendering and a pending first render.
    pub(super) fn new(now: Instant) -> Self {
        let long_ago = now.checked_sub(Duration::from_secs(86400)).unwrap_or(now);
        Self {
            tick_interval: None,
            render_mode: RenderMode::default(),
            last_tick: long_ago,
            last_render: long_ago,
            dirty: true,
            repeat: RepeatTimer::default(),
        }
    }

    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.tick_interval = interval;
    }

    pub(super) fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.render_mode = render_mode;
    }

    /// Timer-driven event due at `now`, if any. Ticks win over repeats, repeats over renders.
    pub(super) fn due(&mut self, now: Instant) -> Option<TuiEvent> {
        if let Some(tick_interval) = self.tick_interval
            && now.duration_since(self.last_tick) >= tick_interval
        {
            self.last_tick = now;
            self.dirty = true;
            return Some(TuiEvent::Tick);
        }

        if let Some(direction) = self.repeat.poll(now) {
            self.dirty = true;
            return Some(TuiEvent::Repeat(direction));
        }

        let render = match self.render_mode {
            RenderMode::Interval(interval) => now.duration_since(self.last_render) >= interval,
            RenderMode::OnDirty => self.dirty,
            RenderMode::Throttled(interval) => {
                self.dirty && now.duration_since(self.last_render) >= interval
            }
        };
        if render {
            self.last_render = now;
            self.dirty = false;
            return Some(TuiEvent::Render);
        }
        None
    }

    /// Blocks until the next timer event or terminal input.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(event) = self.due(now) {
                return Ok(event);
            }
            if let Some(timeout) = self.timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }
            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    /// Time until the earliest deadline, `None` when only input can wake the loop.
    pub(super) fn timeout(&self, now: Instant) -> Option<Duration> {
        let next_tick = self.tick_interval.map(|interval| self.last_tick + interval);
        let next_render = match self.render_mode {
            RenderMode::Interval(interval) => Some(self.last_render + interval),
            RenderMode::OnDirty => self.dirty.then_some(now),
            RenderMode::Throttled(interval) => self.dirty.then(|| self.last_render + interval),
        };
        let next_repeat = self.repeat.next_deadline();
        let earliest = [next_tick, next_render, next_repeat]
            .into_iter()
            .flatten()
            .min()?;

        Some(earliest.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScrubDirection;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_first_render_is_immediate_then_idle() {
        let t0 = Instant::now();
        let mut events = EventLoop::new(t0);
        assert!(events.due(t0).is_some_and(|e| e.is_render()));
        assert!(events.due(t0).is_none());
        assert_eq!(events.timeout(t0), None);
    }

    #[test]
    fn test_repeat_fires_and_marks_dirty() {
        let t0 = Instant::now();
        let mut events = EventLoop::new(t0);
        events.due(t0);
        let _ = events.repeat.start(ScrubDirection::Forward, t0);
        assert_eq!(events.timeout(t0), Some(80 * MS));

        let fired = events.due(t0 + 80 * MS);
        assert!(matches!(fired, Some(TuiEvent::Repeat(ScrubDirection::Forward))));
        assert!(events.due(t0 + 80 * MS).is_some_and(|e| e.is_render()));

        events.repeat.stop();
        assert_eq!(events.timeout(t0 + 90 * MS), None);
    }

    #[test]
    fn test_throttled_batches_renders() {
        let t0 = Instant::now();
        let mut events = EventLoop::new(t0);
        events.set_render_mode(RenderMode::Throttled(100 * MS));
        assert!(events.due(t0).is_some_and(|e| e.is_render()));

        let _ = events.repeat.start(ScrubDirection::Backward, t0);
        assert!(events.due(t0 + 80 * MS).is_some_and(|e| e.is_repeat()));
        // dirty, but the throttle window is still open
        assert!(events.due(t0 + 80 * MS).is_none());
        assert_eq!(events.timeout(t0 + 80 * MS), Some(20 * MS));
        assert!(events.due(t0 + 100 * MS).is_some_and(|e| e.is_render()));
    }

    #[test]
    fn test_ticks_follow_interval() {
        let t0 = Instant::now();
        let mut events = EventLoop::new(t0);
        events.set_tick_interval(Some(50 * MS));
        assert!(events.due(t0).is_some_and(|e| e.is_tick()));
        assert!(events.due(t0).is_some_and(|e| e.is_render()));
        assert_eq!(events.timeout(t0 + 10 * MS), Some(40 * MS));
    }
}
