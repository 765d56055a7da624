//! One character: head, thigh and calf pinned to the shared torso and driven by muscles.

use glam::Vec2;

use crate::api::types::{PlayerSide, ShapeRole, ShapeTag};
use crate::config::MatchConfig;
use crate::core::physics::{
    BodyDesc, BodyHandle, DampedRotarySpring, PhysicsWorld, ShapeDesc, ShapeHandle,
    ShapeMaterial, SpringHandle,
};
use crate::sumo::torso::SharedTorso;

/// Strength and damping shared by all of a character's muscles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MuscleParams {
    pub strength: f32,
    pub damping: f32,
}

impl MuscleParams {
    pub const LIMP: MuscleParams = MuscleParams {
        strength: 0.0,
        damping: 0.0,
    };
}

/// Position and angle of one body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyPose {
    pub position: Vec2,
    pub angle: f32,
}

/// Everything a renderer needs to draw one character.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RagdollPose {
    pub side: PlayerSide,
    pub head: BodyPose,
    pub head_radius: f32,
    pub thigh: BodyPose,
    pub calf: BodyPose,
    pub alive: bool,
}

/// Rest angles `(thigh, calf)` for the given controls.
///
/// The thigh muscle bends the hip by `angle + stretch`, the calf muscle bends
/// the knee back by twice the stretch, and `direction` mirrors both.
pub fn muscle_targets(stretch: f32, angle: f32, direction: f32) -> (f32, f32) {
    ((angle + stretch) * direction, (-2.0 * stretch) * direction)
}

pub struct Ragdoll {
    side: PlayerSide,
    direction: f32,
    torso: BodyHandle,
    pub head: BodyHandle,
    pub thigh: BodyHandle,
    pub calf: BodyHandle,
    pub head_shape: ShapeHandle,
    pub foot_shape: ShapeHandle,
    thigh_muscle: SpringHandle,
    calf_muscle: SpringHandle,
    neck_muscle: Option<SpringHandle>,
    stretch: f32,
    angle: f32,
    nominal: MuscleParams,
    alive: bool,
    // Torso-local anchors and body geometry used by `reset`.
    hip: Vec2,
    shoulder: Vec2,
    leg_length: f32,
    head_radius: f32,
}

impl Ragdoll {
    /// Build a character on `side` of the torso, posed relative to the torso's current pose.
    pub fn build(
        world: &mut PhysicsWorld,
        torso: &SharedTorso,
        side: PlayerSide,
        rules: &MatchConfig,
    ) -> Self {
        let direction = side.direction();
        let hip = torso.hip(direction);
        let shoulder = torso.shoulder(direction);
        let leg = rules.leg_length;
        let name = |part: &str| format!("{:?} {}", side, part).to_lowercase();
        let part = || BodyDesc::dynamic(rules.part_mass, rules.part_inertia);

        let head = world.create_body(&part().with_name(name("head")));
        let thigh = world.create_body(&part().with_name(name("thigh")));
        let calf = world.create_body(&part().with_name(name("calf")));

        let head_shape = world.add_shape(
            head,
            ShapeDesc::Circle {
                offset: Vec2::ZERO,
                radius: rules.head_radius,
            },
            ShapeMaterial::default(),
            ShapeTag::character(side, ShapeRole::Head),
        );
        for body in [thigh, calf] {
            world.add_shape(
                body,
                ShapeDesc::Segment {
                    a: Vec2::ZERO,
                    b: Vec2::new(0.0, -leg),
                    radius: rules.limb_radius,
                },
                ShapeMaterial::default(),
                ShapeTag::character(side, ShapeRole::Limb),
            );
        }
        let foot_shape = world.add_shape(
            calf,
            ShapeDesc::Circle {
                offset: Vec2::new(0.0, -leg),
                radius: rules.foot_radius,
            },
            ShapeMaterial::with_friction(rules.friction),
            ShapeTag::character(side, ShapeRole::Foot),
        );

        let nominal = MuscleParams {
            strength: rules.muscle_strength,
            damping: rules.muscle_damping,
        };
        let spring = |rest_angle| DampedRotarySpring {
            rest_angle,
            stiffness: nominal.strength,
            damping: nominal.damping,
        };

        let ragdoll = Self {
            side,
            direction,
            torso: torso.body,
            head,
            thigh,
            calf,
            head_shape,
            foot_shape,
            thigh_muscle: world.add_spring(torso.body, thigh, spring(0.0)),
            calf_muscle: world.add_spring(thigh, calf, spring(0.0)),
            neck_muscle: rules
                .neck_muscle
                .then(|| world.add_spring(torso.body, head, spring(0.0))),
            stretch: rules.initial_stretch,
            angle: 0.0,
            nominal,
            alive: true,
            hip,
            shoulder,
            leg_length: leg,
            head_radius: rules.head_radius,
        };

        // Pose the bodies first so every pin's anchors coincide when it is created.
        ragdoll.reset(world);
        world.add_pin_joint(torso.body, thigh, hip, Vec2::ZERO);
        world.add_pin_joint(thigh, calf, Vec2::new(0.0, -leg), Vec2::ZERO);
        world.add_pin_joint(torso.body, head, shoulder, Vec2::new(0.0, -rules.head_radius));
        ragdoll.update_muscles(world);
        ragdoll
    }

    pub fn side(&self) -> PlayerSide {
        self.side
    }

    pub fn direction(&self) -> f32 {
        self.direction
    }

    pub fn stretch(&self) -> f32 {
        self.stretch
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Strength and damping restored by `revive`.
    pub fn nominal_muscles(&self) -> MuscleParams {
        self.nominal
    }

    /// Set both control targets and retarget the muscles.
    pub fn set_control(&mut self, world: &mut PhysicsWorld, stretch: f32, angle: f32) {
        self.stretch = stretch;
        self.angle = angle;
        self.update_muscles(world);
    }

    /// Add to both control targets and retarget the muscles.
    pub fn adjust_control(&mut self, world: &mut PhysicsWorld, d_stretch: f32, d_angle: f32) {
        self.set_control(world, self.stretch + d_stretch, self.angle + d_angle);
    }

    fn update_muscles(&self, world: &mut PhysicsWorld) {
        let (thigh_rest, calf_rest) = muscle_targets(self.stretch, self.angle, self.direction);
        world.set_spring_rest_angle(self.thigh_muscle, thigh_rest);
        world.set_spring_rest_angle(self.calf_muscle, calf_rest);
    }

    /// Current rest angles `(thigh, calf)` as applied to the springs.
    pub fn muscle_rest_angles(&self, world: &PhysicsWorld) -> (f32, f32) {
        let rest = |spring| world.spring(spring).map(|s| s.rest_angle).unwrap_or(0.0);
        (rest(self.thigh_muscle), rest(self.calf_muscle))
    }

    /// Strength and damping currently applied, read back from the thigh muscle.
    pub fn muscle_params(&self, world: &PhysicsWorld) -> MuscleParams {
        world
            .spring(self.thigh_muscle)
            .map(|s| MuscleParams {
                strength: s.stiffness,
                damping: s.damping,
            })
            .unwrap_or(MuscleParams::LIMP)
    }

    fn muscles(&self) -> impl Iterator<Item = SpringHandle> {
        [Some(self.thigh_muscle), Some(self.calf_muscle), self.neck_muscle]
            .into_iter()
            .flatten()
    }

    fn set_muscles(&self, world: &mut PhysicsWorld, params: MuscleParams) {
        for muscle in self.muscles() {
            world.set_spring_params(muscle, params.strength, params.damping);
        }
    }

    /// Teleport head, thigh and calf to their nominal place on the torso's
    /// current pose, at rest. The torso itself is not moved.
    pub fn reset(&self, world: &mut PhysicsWorld) {
        let (_, torso_angle) = world.body_pose(self.torso);
        let hip = world.local_to_world(self.torso, self.hip);
        let knee = world.local_to_world(self.torso, self.hip + Vec2::new(0.0, -self.leg_length));
        let head = world.local_to_world(self.torso, self.shoulder + Vec2::new(0.0, self.head_radius));
        world.set_body_pose(self.thigh, hip, torso_angle);
        world.set_body_pose(self.calf, knee, torso_angle);
        world.set_body_pose(self.head, head, torso_angle);
    }

    /// Go limp: every muscle drops to zero strength and damping. The body stays in the world.
    pub fn die(&mut self, world: &mut PhysicsWorld) {
        self.set_muscles(world, MuscleParams::LIMP);
        self.alive = false;
    }

    /// Restore nominal muscle strength and damping.
    pub fn revive(&mut self, world: &mut PhysicsWorld) {
        self.set_muscles(world, self.nominal);
        self.alive = true;
    }

    /// Snapshot of the current body poses.
    pub fn pose(&self, world: &PhysicsWorld) -> RagdollPose {
        let pose = |body| {
            let (position, angle) = world.body_pose(body);
            BodyPose { position, angle }
        };
        RagdollPose {
            side: self.side,
            head: pose(self.head),
            head_radius: self.head_radius,
            thigh: pose(self.thigh),
            calf: pose(self.calf),
            alive: self.alive,
        }
    }
}
