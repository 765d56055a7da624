use glam::Vec2;

use crate::api::types::{ArenaPart, ShapeTag};
use crate::config::MatchConfig;
use crate::core::physics::{BodyDesc, BodyHandle, PhysicsWorld, ShapeDesc, ShapeHandle, ShapeMaterial};

/// The static floor: a long ground line with the mat raised slightly in the middle.
#[derive(Debug, Clone, Copy)]
pub struct Arena {
    pub body: BodyHandle,
    pub ground: ShapeHandle,
    pub mat: ShapeHandle,
}

impl Arena {
    pub fn build(world: &mut PhysicsWorld, rules: &MatchConfig) -> Self {
        let body = world.create_body(
            &BodyDesc::fixed()
                .with_position(rules.ground_position)
                .with_name("ground"),
        );
        let material = ShapeMaterial::with_friction(rules.friction);
        let ground = world.add_shape(
            body,
            ShapeDesc::Segment {
                a: Vec2::new(-rules.ground_half_width, 0.0),
                b: Vec2::new(rules.ground_half_width, 0.0),
                radius: rules.limb_radius,
            },
            material,
            ShapeTag::Arena(ArenaPart::Ground),
        );
        let mat = world.add_shape(
            body,
            ShapeDesc::Segment {
                a: Vec2::new(-rules.mat_half_width, rules.mat_height),
                b: Vec2::new(rules.mat_half_width, rules.mat_height),
                radius: rules.limb_radius,
            },
            material,
            ShapeTag::Arena(ArenaPart::Mat),
        );
        Self { body, ground, mat }
    }
}
