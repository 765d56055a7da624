use glam::Vec2;

use crate::api::types::ShapeTag;
use crate::config::MatchConfig;
use crate::core::physics::{BodyDesc, BodyHandle, PhysicsWorld, ShapeDesc, ShapeMaterial};

/// The plank both characters hang from: one body, four bars between the
/// shoulders and hips. Both ragdolls hold its handle; neither owns it.
#[derive(Debug, Clone, Copy)]
pub struct SharedTorso {
    pub body: BodyHandle,
    spawn: Vec2,
    hip_offset: f32,
    shoulder_height: f32,
}

impl SharedTorso {
    pub fn build(world: &mut PhysicsWorld, rules: &MatchConfig) -> Self {
        let body = world.create_body(
            &BodyDesc::dynamic(rules.part_mass, rules.part_inertia)
                .with_position(rules.torso_spawn)
                .with_name("torso"),
        );
        let torso = Self {
            body,
            spawn: rules.torso_spawn,
            hip_offset: rules.hip_offset,
            shoulder_height: rules.shoulder_height,
        };

        let (l_shoulder, l_hip) = (torso.shoulder(-1.0), torso.hip(-1.0));
        let (r_shoulder, r_hip) = (torso.shoulder(1.0), torso.hip(1.0));
        // Two uprights and an X brace.
        for (a, b) in [
            (l_shoulder, l_hip),
            (r_shoulder, r_hip),
            (r_shoulder, l_hip),
            (l_shoulder, r_hip),
        ] {
            world.add_shape(
                body,
                ShapeDesc::Segment {
                    a,
                    b,
                    radius: rules.limb_radius,
                },
                ShapeMaterial::default(),
                ShapeTag::Torso,
            );
        }
        torso
    }

    /// Hip anchor in torso-local coordinates for the character at `direction`.
    pub fn hip(&self, direction: f32) -> Vec2 {
        Vec2::new(self.hip_offset * direction, 0.0)
    }

    /// Neck anchor in torso-local coordinates for the character at `direction`.
    pub fn shoulder(&self, direction: f32) -> Vec2 {
        Vec2::new(self.hip_offset * direction, self.shoulder_height)
    }

    /// Put the torso back at its spawn pose, at rest.
    pub fn reset(&self, world: &mut PhysicsWorld) {
        world.set_body_pose(self.body, self.spawn, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchors_mirror_across_centerline() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let torso = SharedTorso::build(&mut world, &MatchConfig::default());
        assert_eq!(torso.hip(-1.0), Vec2::new(-50.0, 0.0));
        assert_eq!(torso.hip(1.0), Vec2::new(50.0, 0.0));
        assert_eq!(torso.shoulder(1.0), Vec2::new(50.0, 30.0));
        assert_eq!(world.shapes().filter(|s| s.tag == ShapeTag::Torso).count(), 4);
    }

    #[test]
    fn reset_restores_spawn_after_falling() {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, -900.0));
        let torso = SharedTorso::build(&mut world, &MatchConfig::default());
        for _ in 0..100 {
            world.step(0.002);
        }
        assert!(world.body_pose(torso.body).0.y < 300.0);

        torso.reset(&mut world);
        assert_eq!(world.body_pose(torso.body), (Vec2::new(300.0, 300.0), 0.0));
        assert_eq!(world.body_velocity(torso.body), (Vec2::ZERO, 0.0));
    }
}
