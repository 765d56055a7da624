pub mod api;
pub mod assets;
pub mod config;
pub mod core;
pub mod error;
pub mod input;
pub mod renderer;
pub mod sumo;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::game::{EngineContext, Game, GameConfig};
pub use api::types::{ArenaPart, GameEvent, PlayerSide, ShapeRole, ShapeTag};
pub use assets::skin::{AssetLoader, FileLoader, Skin};
pub use config::{MatchConfig, SumoConfig};
pub use core::physics::{
    BodyDesc, BodyHandle, Contact, DampedRotarySpring, PhysicsWorld, ShapeDesc, ShapeHandle,
    ShapeMaterial, SpringHandle, WorldShape,
};
pub use core::schedule::Schedule;
pub use core::time::FixedTimestep;
pub use error::{AssetError, ConfigError, SimulationError};
pub use input::bindings::{binding_for, Binding};
pub use input::queue::{InputEvent, InputQueue, Key};
pub use renderer::{to_screen, Color, DrawCommand, DrawList, Renderer};
pub use sumo::collision::{classify, Verdict};
pub use sumo::game::SumoMatch;
pub use sumo::ragdoll::{BodyPose, MuscleParams, Ragdoll, RagdollPose};
