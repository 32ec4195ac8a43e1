use web_time::{Duration, Instant};

/// Frame pacing for the viewer loop.
///
/// Produces the `dt` passed to
/// [`ViewController::on_frame_advance`](crate::camera::ViewController::on_frame_advance)
/// and keeps a smoothed frame rate for logging.
pub struct FrameTiming {
    /// Minimum frame duration (zero when unlimited)
    frame_budget: Duration,
    last_frame: Instant,
    /// Exponential moving average of the frame rate
    smoothed_fps: f32,
    smoothing: f32,
    frames: u64,
}

impl FrameTiming {
    /// Timer targeting `target_fps` frames per second (0 = unlimited).
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        let frame_budget = if target_fps > 0 {
            Duration::from_secs_f64(1.0 / f64::from(target_fps))
        } else {
            Duration::ZERO
        };

        Self {
            frame_budget,
            last_frame: Instant::now(),
            smoothed_fps: if target_fps > 0 { target_fps as f32 } else { 60.0 },
            smoothing: 0.05,
            frames: 0,
        }
    }

    /// Time left before the next frame is due.
    #[must_use]
    pub fn time_until_next(&self) -> Duration {
        self.frame_budget.saturating_sub(self.last_frame.elapsed())
    }

    /// Mark the end of a frame. Returns the seconds since the previous one.
    pub fn end_frame(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frames += 1;

        if dt > 0.0 {
            self.smoothed_fps =
                self.smoothed_fps * (1.0 - self.smoothing) + self.smoothing / dt;
        }
        dt
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }

    /// Frames completed so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlimited_never_waits() {
        let timing = FrameTiming::new(0);
        assert_eq!(timing.time_until_next(), Duration::ZERO);
    }

    #[test]
    fn end_frame_counts_and_reports_delta() {
        let mut timing = FrameTiming::new(60);
        std::thread::sleep(Duration::from_millis(2));
        let dt = timing.end_frame();
        assert!(dt > 0.0);
        assert_eq!(timing.frames(), 1);
        assert!(timing.fps() > 0.0);
    }
}
