use sumo_engine::{
    EngineContext, FixedTimestep, Game, GameConfig, GameEvent, InputEvent, InputQueue, Renderer,
    SimulationError,
};

/// What the host should do after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    /// A quit event was seen; the frame was not simulated.
    Quit,
}

/// Generic game runner that wires up the engine loop.
///
/// Per frame: drain input into the game, tick its timers, run the physics
/// sub-steps (letting the game react to each one's contacts) and render.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    timestep: FixedTimestep,
    config: GameConfig,
    initialized: bool,
    frames: u64,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        Self {
            game,
            ctx: EngineContext::new(&config),
            input: InputQueue::new(),
            timestep: FixedTimestep::new(config.frame_dt),
            config,
            initialized: false,
            frames: 0,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.initialized = true;
        log::debug!(
            "runner ready: {} Hz, {} sub-steps of {:.4}s",
            (1.0 / self.config.frame_dt).round(),
            self.config.substeps,
            self.ctx.step_dt()
        );
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run exactly one frame.
    pub fn frame(&mut self, renderer: &mut dyn Renderer) -> Result<FrameOutcome, SimulationError> {
        if !self.initialized {
            return Ok(FrameOutcome::Continue);
        }

        for event in self.input.drain() {
            if event.is_quit() {
                log::info!("quit requested after {} frames", self.frames);
                return Ok(FrameOutcome::Quit);
            }
            self.game.handle_input(&mut self.ctx, event);
        }

        self.game.update(&mut self.ctx, self.config.frame_dt);
        for _ in 0..self.config.substeps.max(1) {
            self.ctx.step_physics()?;
            self.game.after_step(&mut self.ctx);
        }

        self.game.render(&self.ctx, renderer);
        self.frames += 1;
        Ok(FrameOutcome::Continue)
    }

    /// Advance by wall-clock `elapsed` seconds, running as many whole frames as have accrued.
    pub fn advance(
        &mut self,
        elapsed: f32,
        renderer: &mut dyn Renderer,
    ) -> Result<FrameOutcome, SimulationError> {
        for _ in 0..self.timestep.accumulate(elapsed) {
            if self.frame(renderer)? == FrameOutcome::Quit {
                return Ok(FrameOutcome::Quit);
            }
        }
        Ok(FrameOutcome::Continue)
    }

    /// Take the game events emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.ctx.drain_events()
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Frames simulated so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sumo_engine::{DrawList, Key, PlayerSide, SumoConfig, SumoMatch};

    fn runner() -> GameRunner<SumoMatch> {
        let mut runner = GameRunner::new(SumoMatch::new(SumoConfig::default()));
        runner.init();
        runner
    }

    #[test]
    fn uninitialized_runner_does_nothing() {
        let mut runner = GameRunner::new(SumoMatch::new(SumoConfig::default()));
        let mut list = DrawList::new();
        assert_eq!(runner.frame(&mut list).unwrap(), FrameOutcome::Continue);
        assert_eq!(runner.frames(), 0);
        assert!(list.is_empty());
    }

    #[test]
    fn frame_renders_and_counts() {
        let mut runner = runner();
        let mut list = DrawList::new();
        runner.frame(&mut list).unwrap();
        assert_eq!(runner.frames(), 1);
        assert_eq!(list.labels().collect::<Vec<_>>(), vec!["0 : 0"]);
    }

    #[test]
    fn input_reaches_the_game_before_stepping() {
        let mut runner = runner();
        let before = runner.game().ragdoll(PlayerSide::Right).unwrap().stretch();
        runner.push_input(InputEvent::KeyDown(Key::Up));
        runner.frame(&mut DrawList::new()).unwrap();
        let after = runner.game().ragdoll(PlayerSide::Right).unwrap().stretch();
        assert!(after > before);
    }

    #[test]
    fn escape_quits_without_simulating() {
        let mut runner = runner();
        runner.push_input(InputEvent::KeyDown(Key::Escape));
        assert_eq!(runner.frame(&mut DrawList::new()).unwrap(), FrameOutcome::Quit);
        assert_eq!(runner.frames(), 0);
    }

    #[test]
    fn advance_runs_whole_frames_only() {
        let mut runner = runner();
        let mut list = DrawList::new();
        runner.advance(0.05, &mut list).unwrap();
        assert_eq!(runner.frames(), 2);
        runner.advance(0.015, &mut list).unwrap();
        assert_eq!(runner.frames(), 3);
    }
}
