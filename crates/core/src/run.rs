use crate::gfx::FrameHooks;
use std::time::{Duration, Instant};

/// Run length and pacing of the demo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunConfig {
    /// Target frames per second.
    pub framerate: f64,
    /// Frames to draw before stopping; 0 runs until the window closes.
    pub framecount: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            framerate: 60.0,
            framecount: 360,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Finished,
}

/// Counts frames against the budget and drives `on_draw`.
#[derive(Debug, Clone)]
pub struct FrameLoop {
    framecount: u64,
    frames: u64,
}

impl FrameLoop {
    pub fn new(config: &RunConfig) -> Self {
        Self {
            framecount: config.framecount,
            frames: 0,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_finished(&self) -> bool {
        self.framecount != 0 && self.frames >= self.framecount
    }

    /// Draw one frame unless the budget is spent.
    pub fn step<H: FrameHooks>(&mut self, hooks: &mut H, dt: f32) -> Result<LoopState, H::Error> {
        if self.is_finished() {
            return Ok(LoopState::Finished);
        }
        hooks.on_draw(dt)?;
        self.frames += 1;

        if self.is_finished() {
            tracing::info!(frames = self.frames, "frame budget reached");
            Ok(LoopState::Finished)
        } else {
            Ok(LoopState::Running)
        }
    }
}

/// Fixed-interval frame deadlines.
#[derive(Debug, Clone, Copy)]
pub struct FramePacer {
    interval: Duration,
}

impl FramePacer {
    pub fn new(framerate: f64) -> Self {
        let interval = if framerate > 0.0 {
            Duration::from_secs_f64(1.0 / framerate)
        } else {
            Duration::ZERO
        };
        Self { interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// The deadline after `previous`. A deadline already behind `now` is
    /// rescheduled from `now` instead of firing a burst of late frames.
    pub fn next_deadline(&self, previous: Instant, now: Instant) -> Instant {
        let next = previous + self.interval;
        if next < now { now + self.interval } else { next }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::RecordingBackend;
    use crate::renderer::RotatingCubeRenderer;

    struct Counter {
        draws: u32,
    }

    impl FrameHooks for Counter {
        type Error = std::convert::Infallible;

        fn on_init(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }

        fn on_resize(&mut self, _width: u32, _height: u32) -> Result<(), Self::Error> {
            Ok(())
        }

        fn on_draw(&mut self, _dt: f32) -> Result<(), Self::Error> {
            self.draws += 1;
            Ok(())
        }
    }

    #[test]
    fn default_config() {
        let config = RunConfig::default();
        assert_eq!(config.framerate, 60.0);
        assert_eq!(config.framecount, 360);
    }

    #[test]
    fn stops_after_framecount() {
        let mut hooks = Counter { draws: 0 };
        let mut frames = FrameLoop::new(&RunConfig {
            framerate: 60.0,
            framecount: 3,
        });

        assert_eq!(frames.step(&mut hooks, 0.0).unwrap(), LoopState::Running);
        assert_eq!(frames.step(&mut hooks, 0.0).unwrap(), LoopState::Running);
        assert_eq!(frames.step(&mut hooks, 0.0).unwrap(), LoopState::Finished);
        // Further steps issue no draws.
        assert_eq!(frames.step(&mut hooks, 0.0).unwrap(), LoopState::Finished);
        assert_eq!(hooks.draws, 3);
        assert_eq!(frames.frames(), 3);
    }

    #[test]
    fn zero_framecount_is_unbounded() {
        let mut hooks = Counter { draws: 0 };
        let mut frames = FrameLoop::new(&RunConfig {
            framerate: 60.0,
            framecount: 0,
        });
        for _ in 0..1000 {
            assert_eq!(frames.step(&mut hooks, 0.0).unwrap(), LoopState::Running);
        }
        assert_eq!(hooks.draws, 1000);
    }

    #[test]
    fn full_run_draws_exactly_360_frames() {
        let mut renderer = RotatingCubeRenderer::new(RecordingBackend::new()).unwrap();
        renderer.on_init().unwrap();
        renderer.on_resize(512, 512).unwrap();

        let mut frames = FrameLoop::new(&RunConfig::default());
        let mut steps = 0;
        while frames.step(&mut renderer, 1.0 / 60.0).unwrap() == LoopState::Running {
            steps += 1;
        }
        assert_eq!(steps, 359);

        for _ in 0..10 {
            frames.step(&mut renderer, 1.0 / 60.0).unwrap();
        }
        assert_eq!(renderer.gfx().draw_count(), 360);
        assert_eq!(renderer.rotation().theta, 390.0);
        assert_eq!(renderer.rotation().phi, -320.0);
    }

    #[test]
    fn failed_draw_does_not_count() {
        let mut renderer = RotatingCubeRenderer::new(RecordingBackend::new()).unwrap();
        let mut frames = FrameLoop::new(&RunConfig::default());
        // No resize yet, so no projection.
        assert!(frames.step(&mut renderer, 0.0).is_err());
        assert_eq!(frames.frames(), 0);
    }

    #[test]
    fn pacer_interval_matches_framerate() {
        let pacer = FramePacer::new(60.0);
        let micros = pacer.interval().as_micros();
        assert!((16_666..=16_667).contains(&micros));
        assert_eq!(FramePacer::new(0.0).interval(), Duration::ZERO);
    }

    #[test]
    fn pacer_advances_from_previous_deadline() {
        let pacer = FramePacer::new(50.0);
        let start = Instant::now();
        let next = pacer.next_deadline(start, start + Duration::from_millis(5));
        assert_eq!(next, start + Duration::from_millis(20));
    }

    #[test]
    fn pacer_never_schedules_in_the_past() {
        let pacer = FramePacer::new(50.0);
        let start = Instant::now();
        let now = start + Duration::from_millis(200);
        let next = pacer.next_deadline(start, now);
        assert_eq!(next, now + Duration::from_millis(20));
        assert!(next > now);
    }
}
