use std::time::Instant;

/// Elapsed-time clock owned by a single entity.
///
/// Clocks are advanced by the frame delta rather than reading the wall clock,
/// so a paused simulation freezes every entity and tests can step time exactly.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Clock {
    elapsed: f64,
}

impl Clock {
    pub fn new() -> Self {
        Clock { elapsed: 0.0 }
    }

    pub fn advance(&mut self, dt: f64) {
        self.elapsed += dt.max(0.0);
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn has_elapsed(&self, duration: f64) -> bool {
        self.elapsed() >= duration
    }

    /// Like [`Clock::has_elapsed`], but restarts the clock when it fires.
    pub fn has_elapsed_reset(&mut self, duration: f64) -> bool {
        if self.has_elapsed(duration) {
            self.reset();
            true
        } else {
            false
        }
    }

    /// Fraction of `duration` that has passed, clamped to `[0, 1]`.
    pub fn elapsed_fraction(&self, duration: f64) -> f64 {
        if duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed() / duration).clamp(0.0, 1.0)
    }
}

/// Produces the per-frame delta for the frame loop.
pub struct FrameTimer {
    last_frame: Instant,
    max_delta: f64,
}

impl FrameTimer {
    pub fn new(max_delta: f64) -> Self {
        FrameTimer { last_frame: Instant::now(), max_delta }
    }

    /// Seconds since the previous tick, never negative and never above `max_delta`.
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();
        let delta = now.saturating_duration_since(self.last_frame).as_secs_f64();
        self.last_frame = now;
        delta.min(self.max_delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_accumulates_and_resets() {
        let mut clock = Clock::new();
        clock.advance(0.25);
        clock.advance(0.5);
        assert_eq!(clock.elapsed(), 0.75);
        assert!(clock.has_elapsed(0.75));
        assert!(!clock.has_elapsed(0.8));
        clock.reset();
        assert_eq!(clock.elapsed(), 0.0);
    }

    #[test]
    fn negative_deltas_are_ignored() {
        let mut clock = Clock::new();
        clock.advance(0.5);
        clock.advance(-1.0);
        assert_eq!(clock.elapsed(), 0.5);
    }

    #[test]
    fn has_elapsed_reset_fires_once() {
        let mut clock = Clock::new();
        clock.advance(0.5);
        assert!(!clock.has_elapsed_reset(1.0));
        clock.advance(0.5);
        assert!(clock.has_elapsed_reset(1.0));
        assert_eq!(clock.elapsed(), 0.0);
        assert!(!clock.has_elapsed_reset(1.0));
    }

    #[test]
    fn fraction_is_clamped() {
        let mut clock = Clock::new();
        assert_eq!(clock.elapsed_fraction(2.0), 0.0);
        clock.advance(1.0);
        assert_eq!(clock.elapsed_fraction(2.0), 0.5);
        clock.advance(5.0);
        assert_eq!(clock.elapsed_fraction(2.0), 1.0);
        assert_eq!(clock.elapsed_fraction(0.0), 1.0);
    }

    #[test]
    fn frame_timer_is_capped() {
        let mut timer = FrameTimer::new(0.0);
        assert_eq!(timer.tick(), 0.0);
        let mut timer = FrameTimer::new(10.0);
        let delta = timer.tick();
        assert!((0.0..=10.0).contains(&delta));
    }
}
