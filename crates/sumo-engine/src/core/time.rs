/// Fixed-rate frame clock.
///
/// The host feeds it wall-clock deltas; it answers how many whole frames to
/// run. Each frame then runs the configured number of physics sub-steps.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    /// Duration of one frame.
    dt: f32,
    /// Accumulated time from variable wall-clock deltas.
    accumulator: f32,
    /// Most frames a single `accumulate` may ask for.
    max_frames: u32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            max_frames: 5,
        }
    }

    /// Limit catch-up after a stall (the host was suspended, a debugger paused it).
    pub fn with_max_frames(mut self, max_frames: u32) -> Self {
        self.max_frames = max_frames.max(1);
        self
    }

    /// Add elapsed time. Returns the number of frames to run now.
    pub fn accumulate(&mut self, elapsed: f32) -> u32 {
        self.accumulator += elapsed.max(0.0);
        // Drop time beyond the cap instead of spiralling.
        self.accumulator = self.accumulator.min(self.dt * self.max_frames as f32);
        let frames = (self.accumulator / self.dt) as u32;
        self.accumulator -= frames as f32 * self.dt;
        frames
    }

    /// Fraction of the next frame already elapsed (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }
}
