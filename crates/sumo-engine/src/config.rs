//! Tunable constants, loadable from JSON.
//!
//! Every field has a default, so a config file only needs the values it changes.
//! Strength, damping and the sub-step count must be tuned together: the
//! muscles are stiff springs and go unstable with too large a step.

use std::f32::consts::PI;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::game::GameConfig;
use crate::error::ConfigError;

/// Match rules and character tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Muscle stiffness (torque per radian).
    pub muscle_strength: f32,
    /// Muscle damping (torque per radian/second).
    pub muscle_damping: f32,
    /// Length of thigh and calf.
    pub leg_length: f32,
    /// Radius of limb segments and torso bars.
    pub limb_radius: f32,
    pub head_radius: f32,
    /// Foot radius. Kept above `limb_radius` so the foot, not the calf end, meets the floor.
    pub foot_radius: f32,
    /// Mass of every dynamic part.
    pub part_mass: f32,
    /// Moment of inertia of every dynamic part.
    pub part_inertia: f32,
    /// Friction of feet, ground and mat. Other shapes are frictionless.
    pub friction: f32,
    /// Stretch change per flex/extend key.
    pub stretch_range: f32,
    /// Angle change per lean key.
    pub angle_range: f32,
    /// Stretch a character starts with.
    pub initial_stretch: f32,
    /// Hold the head upright with a third muscle. Without it the head is pinned but limp.
    pub neck_muscle: bool,
    /// Seconds between a kill and the round reset. Zero resets within the same frame.
    pub reset_delay: f32,
    /// Half the distance between the two hips.
    pub hip_offset: f32,
    /// Height of the shoulders above the hips.
    pub shoulder_height: f32,
    /// Torso spawn position.
    pub torso_spawn: Vec2,
    /// Ground body position; ground and mat segments are relative to it.
    pub ground_position: Vec2,
    /// Half length of the ground segment.
    pub ground_half_width: f32,
    /// Half length of the mat segment.
    pub mat_half_width: f32,
    /// Height of the mat above the ground line.
    pub mat_height: f32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            muscle_strength: 4_000_000.0,
            muscle_damping: 20_000.0,
            leg_length: 35.0,
            limb_radius: 5.0,
            head_radius: 25.0,
            foot_radius: 6.0,
            part_mass: 10.0,
            part_inertia: 10_000.0,
            friction: 0.6,
            stretch_range: PI / 5.0,
            angle_range: PI / 5.0,
            initial_stretch: PI / 4.0,
            neck_muscle: true,
            reset_delay: 1.0,
            hip_offset: 50.0,
            shoulder_height: 30.0,
            torso_spawn: Vec2::new(300.0, 300.0),
            ground_position: Vec2::new(300.0, 40.0),
            ground_half_width: 1000.0,
            mat_half_width: 200.0,
            mat_height: 5.0,
        }
    }
}

/// Complete configuration: engine loop plus match rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SumoConfig {
    pub engine: GameConfig,
    pub rules: MatchConfig,
}

impl SumoConfig {
    /// Parse and validate a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the frame loop or a renderer cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let engine = &self.engine;
        for (name, value) in [
            ("engine.frame_dt", engine.frame_dt),
            ("engine.world_width", engine.world_width),
            ("engine.world_height", engine.world_height),
            ("engine.length_unit", engine.length_unit),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Read and parse a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Load from `path` if given, falling back to defaults (with a warning) on any error.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match Self::load(path) {
            Ok(config) => {
                log::info!("loaded config from {}", path.display());
                config
            }
            Err(err) => {
                log::warn!("{}: {}; using defaults", path.display(), err);
                Self::default()
            }
        }
    }
}
