use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::tui::event::TuiEvent;

/// Event loop state management.
///
/// Multiplexes the tick deadline, render-on-dirty, and terminal events.
/// Without a tick interval no tick events are produced — that is how the
/// gravity timer is suspended while the game is not running.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    last_tick: Instant,
    dirty: bool,
}

impl EventLoop {
    pub(super) fn new() -> Self {
        Self {
            tick_interval: None,
            last_tick: Instant::now(),
            dirty: true, // Initial render is required on startup
        }
    }

    /// Sets the tick interval; `None` suspends tick events.
    ///
    /// Changing the interval restarts the cadence from now. Setting an equal
    /// interval keeps the current phase, so re-deriving the interval after
    /// every input event cannot postpone the pending tick.
    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        if self.tick_interval != interval {
            self.tick_interval = interval;
            self.last_tick = Instant::now();
        }
    }

    /// Returns the next event.
    ///
    /// Blocks until the tick deadline is reached, a render is due, or a
    /// terminal event arrives.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(tick_interval) = self.tick_interval
                && now.duration_since(self.last_tick) >= tick_interval
            {
                self.last_tick = now;
                self.dirty = true;
                return Ok(TuiEvent::Tick);
            }

            if self.dirty {
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            if let Some(timeout) = self.next_tick_timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    fn next_tick_timeout(&self, now: Instant) -> Option<Duration> {
        let next_tick_at = self.tick_interval.map(|interval| self.last_tick + interval)?;
        Some(next_tick_at.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_interval_keeps_phase() {
        let mut events = EventLoop::new();
        events.set_tick_interval(Some(Duration::from_millis(100)));
        let scheduled_at = events.last_tick;

        std::thread::sleep(Duration::from_millis(5));
        events.set_tick_interval(Some(Duration::from_millis(100)));
        assert_eq!(events.last_tick, scheduled_at);
    }

    #[test]
    fn test_changed_interval_restarts_cadence() {
        let mut events = EventLoop::new();
        events.set_tick_interval(Some(Duration::from_millis(100)));
        let scheduled_at = events.last_tick;

        std::thread::sleep(Duration::from_millis(5));
        events.set_tick_interval(Some(Duration::from_millis(50)));
        assert!(events.last_tick > scheduled_at);
    }

    #[test]
    fn test_clearing_interval_suspends_ticks() {
        let mut events = EventLoop::new();
        events.set_tick_interval(Some(Duration::from_millis(100)));
        events.set_tick_interval(None);

        // With no interval there is no tick deadline to wait for.
        assert_eq!(events.next_tick_timeout(Instant::now()), None);
    }

    #[test]
    fn test_timeout_never_exceeds_interval() {
        let mut events = EventLoop::new();
        events.set_tick_interval(Some(Duration::from_millis(100)));

        let timeout = events.next_tick_timeout(Instant::now()).unwrap();
        assert!(timeout <= Duration::from_millis(100));
    }
}
