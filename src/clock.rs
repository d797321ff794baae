/// Longest step a single frame may advance, in seconds
pub const MAX_DELTA: f32 = 0.1;

/// Time handed to a demo for one frame
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    /// Seconds since the first frame, kept in `f64` so long sessions do
    /// not quantize frame steps
    pub elapsed: f64,
    /// Seconds since the previous frame, clamped to [`MAX_DELTA`]
    pub delta: f32,
}

/// Converts animation-frame timestamps (milliseconds) into frame times.
#[derive(Debug, Default)]
pub struct FrameClock {
    start: Option<f64>,
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to `now_ms`. The first tick has zero delta; timestamps going
    /// backwards are treated as no time passing.
    pub fn tick(&mut self, now_ms: f64) -> FrameTime {
        let start = *self.start.get_or_insert(now_ms);
        let delta = match self.last {
            Some(last) if now_ms > last => (((now_ms - last) / 1000.0) as f32).min(MAX_DELTA),
            _ => 0.0,
        };
        let latest = self.last.map_or(now_ms, |last| last.max(now_ms));
        self.last = Some(latest);
        FrameTime {
            elapsed: (latest - start) / 1000.0,
            delta,
        }
    }

    /// Forget all timestamps; the next tick starts again from zero
    pub fn reset(&mut self) {
        self.start = None;
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_measures_delta() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(1000.0), FrameTime { elapsed: 0.0, delta: 0.0 });

        let frame = clock.tick(1016.0);
        assert!((frame.delta - 0.016).abs() < 1e-6);
        assert!((frame.elapsed - 0.016).abs() < 1e-6);
    }

    #[test]
    fn clock_clamps_long_pauses() {
        let mut clock = FrameClock::new();
        clock.tick(0.0);
        let frame = clock.tick(5000.0);
        assert_eq!(frame.delta, MAX_DELTA);
        assert!((frame.elapsed - 5.0).abs() < 1e-6);
    }

    #[test]
    fn clock_ignores_time_going_backwards() {
        let mut clock = FrameClock::new();
        clock.tick(100.0);
        clock.tick(200.0);
        let frame = clock.tick(150.0);
        assert_eq!(frame.delta, 0.0);
        assert!((frame.elapsed - 0.1).abs() < 1e-6);
    }

    #[test]
    fn clock_keeps_frame_steps_after_days() {
        let mut clock = FrameClock::new();
        clock.tick(0.0);
        let three_days = 3.0 * 86_400_000.0;
        let a = clock.tick(three_days).elapsed;
        let b = clock.tick(three_days + 1000.0 / 60.0).elapsed;
        assert!((b - a - 1.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn clock_resets() {
        let mut clock = FrameClock::new();
        clock.tick(0.0);
        clock.tick(500.0);
        clock.reset();
        assert_eq!(clock.tick(900.0).elapsed, 0.0);
    }
}
