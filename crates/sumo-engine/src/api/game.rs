use crate::api::types::GameEvent;
use crate::core::physics::{Contact, PhysicsWorld};
use crate::error::SimulationError;
use crate::input::queue::InputEvent;
use crate::renderer::traits::Renderer;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Duration of one rendered frame in seconds (default: 1/50).
    pub frame_dt: f32,
    /// Physics sub-steps per frame (default: 10). The muscles are stiff springs,
    /// so the solver needs a much smaller step than the frame interval.
    pub substeps: u32,
    /// Gravity vector. Y points up, so the default is (0, -900).
    pub gravity: Vec2,
    /// World width in game units.
    pub world_width: f32,
    /// World height in game units.
    pub world_height: f32,
    /// Typical object size in world units; scales the solver's contact tolerances.
    pub length_unit: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            frame_dt: 1.0 / 50.0,
            substeps: 10,
            gravity: Vec2::new(0.0, -900.0),
            world_width: 600.0,
            world_height: 600.0,
            length_unit: 50.0,
        }
    }
}

impl GameConfig {
    /// Length of one physics sub-step.
    pub fn step_dt(&self) -> f32 {
        self.frame_dt / self.substeps.max(1) as f32
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Build the world: bodies, shapes, joints, springs.
    fn init(&mut self, ctx: &mut EngineContext);

    /// Apply one input event. Called for every queued event before the frame's sub-steps.
    fn handle_input(&mut self, ctx: &mut EngineContext, event: InputEvent);

    /// Frame-level tick: timers and deferred work. Runs once per frame, before stepping.
    fn update(&mut self, ctx: &mut EngineContext, frame_dt: f32);

    /// React to the contacts produced by the sub-step that just ran.
    fn after_step(&mut self, ctx: &mut EngineContext);

    /// Read-only render pass.
    fn render(&self, _ctx: &EngineContext, _renderer: &mut dyn Renderer) {}
}

/// Mutable access to engine state, passed to every `Game` hook.
pub struct EngineContext {
    pub physics: PhysicsWorld,
    pub events: Vec<GameEvent>,
    contacts: Vec<Contact>,
    step_dt: f32,
}

impl EngineContext {
    pub fn new(config: &GameConfig) -> Self {
        let mut physics = PhysicsWorld::new(config.gravity);
        physics.set_length_unit(config.length_unit);
        Self {
            physics,
            events: Vec::new(),
            contacts: Vec::new(),
            step_dt: config.step_dt(),
        }
    }

    /// Emit a game event to be forwarded to the host.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take the events emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Contacts that started during the most recent sub-step.
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Advance the simulation by one sub-step and collect its contacts.
    pub fn step_physics(&mut self) -> Result<(), SimulationError> {
        self.contacts.clear();
        self.physics.step(self.step_dt);
        self.physics.drain_contacts_into(&mut self.contacts);
        self.physics.check_finite()
    }

    pub fn step_dt(&self) -> f32 {
        self.step_dt
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}
