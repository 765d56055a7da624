use glam::Vec2;
use rapier2d::na;
use rapier2d::prelude::*;
use std::sync::{Mutex, PoisonError};

use crate::api::types::ShapeTag;
use crate::error::SimulationError;

// ---------------------------------------------------------------------------
// Conversion helpers (private): glam to nalgebra and back
// ---------------------------------------------------------------------------

fn vec2_to_na(v: Vec2) -> na::Vector2<f32> {
    na::Vector2::new(v.x, v.y)
}

fn vec2_to_point(v: Vec2) -> na::Point2<f32> {
    na::Point2::new(v.x, v.y)
}

fn na_to_vec2(v: &na::Vector2<f32>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

fn point_to_vec2(p: &na::Point2<f32>) -> Vec2 {
    Vec2::new(p.x, p.y)
}

fn na_iso_to_pos_rot(iso: &na::Isometry2<f32>) -> (Vec2, f32) {
    let pos = Vec2::new(iso.translation.x, iso.translation.y);
    let rot = iso.rotation.angle();
    (pos, rot)
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Handle to a rigid body owned by the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyHandle(RigidBodyHandle);

/// Handle to a collision shape owned by the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeHandle(ColliderHandle);

/// Handle to a pin joint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JointHandle(ImpulseJointHandle);

/// Handle to a damped rotary spring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpringHandle(ImpulseJointHandle);

/// Mass model of a body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyKind {
    /// Moves under gravity, contacts, joints and springs.
    Dynamic { mass: f32, inertia: f32 },
    /// Infinite mass and inertia: never moves.
    Fixed,
}

/// Builder for describing a rigid body before creation.
#[derive(Debug, Clone)]
pub struct BodyDesc {
    pub kind: BodyKind,
    pub position: Vec2,
    pub angle: f32,
    /// Name used in diagnostics.
    pub name: String,
}

impl BodyDesc {
    /// Dynamic body with an explicit mass and moment of inertia.
    /// Shapes attached to it add no mass of their own.
    pub fn dynamic(mass: f32, inertia: f32) -> Self {
        Self {
            kind: BodyKind::Dynamic { mass, inertia },
            position: Vec2::ZERO,
            angle: 0.0,
            name: String::from("body"),
        }
    }

    /// Static body (the ground).
    pub fn fixed() -> Self {
        Self {
            kind: BodyKind::Fixed,
            position: Vec2::ZERO,
            angle: 0.0,
            name: String::from("static"),
        }
    }

    pub fn with_position(mut self, pos: Vec2) -> Self {
        self.position = pos;
        self
    }

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Collision geometry in the owning body's local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeDesc {
    Circle { offset: Vec2, radius: f32 },
    /// Segment from `a` to `b` with rounded ends of `radius`.
    Segment { a: Vec2, b: Vec2, radius: f32 },
}

impl ShapeDesc {
    fn build_collider(&self) -> ColliderBuilder {
        match *self {
            ShapeDesc::Circle { offset, radius } => {
                ColliderBuilder::ball(radius).translation(vec2_to_na(offset))
            }
            ShapeDesc::Segment { a, b, radius } => ColliderBuilder::new(SharedShape::capsule(
                vec2_to_point(a),
                vec2_to_point(b),
                radius,
            )),
        }
    }
}

/// Surface properties of a shape. Friction of a contact is the product of both shapes'.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeMaterial {
    pub friction: f32,
    pub restitution: f32,
}

impl Default for ShapeMaterial {
    fn default() -> Self {
        Self {
            friction: 0.0,
            restitution: 0.0,
        }
    }
}

impl ShapeMaterial {
    pub fn with_friction(friction: f32) -> Self {
        Self {
            friction,
            ..Self::default()
        }
    }
}

/// Soft constraint driving the relative angle `angle(a) - angle(b)` toward `rest_angle`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DampedRotarySpring {
    pub rest_angle: f32,
    /// Torque per radian of error.
    pub stiffness: f32,
    /// Torque per radian/second of relative angular velocity.
    pub damping: f32,
}

/// A pair of shapes that started touching during a step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub shape_a: ShapeHandle,
    pub shape_b: ShapeHandle,
    pub tag_a: ShapeTag,
    pub tag_b: ShapeTag,
}

/// World-space geometry of a shape, for rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorldShape {
    Circle { center: Vec2, radius: f32, angle: f32 },
    Segment { a: Vec2, b: Vec2, radius: f32 },
}

/// One shape as seen by a renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeView {
    pub handle: ShapeHandle,
    pub tag: ShapeTag,
    pub geometry: WorldShape,
}

/// Decides whether two tagged shapes get a solid collision response.
pub type ContactFilterFn = fn(ShapeTag, ShapeTag) -> bool;

fn always_solid(_: ShapeTag, _: ShapeTag) -> bool {
    true
}

// ---------------------------------------------------------------------------
// Solver callbacks
// ---------------------------------------------------------------------------

struct ContactCollector {
    started: Mutex<Vec<(ColliderHandle, ColliderHandle)>>,
}

impl ContactCollector {
    fn new() -> Self {
        Self {
            started: Mutex::new(Vec::new()),
        }
    }

    fn drain(&self) -> Vec<(ColliderHandle, ColliderHandle)> {
        std::mem::take(&mut *self.started.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl EventHandler for ContactCollector {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        if let CollisionEvent::Started(h1, h2, _) = event {
            self.started
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push((h1, h2));
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: f32,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: f32,
    ) {
    }
}

struct ContactFilter {
    solid: ContactFilterFn,
}

impl PhysicsHooks for ContactFilter {
    fn filter_contact_pair(&self, context: &PairFilterContext) -> Option<SolverFlags> {
        let tag = |handle| {
            context
                .colliders
                .get(handle)
                .map(|c: &Collider| ShapeTag::from_bits(c.user_data))
                .unwrap_or(ShapeTag::None)
        };
        if (self.solid)(tag(context.collider1), tag(context.collider2)) {
            Some(SolverFlags::COMPUTE_IMPULSES)
        } else {
            None
        }
    }
}

struct SpringEntry {
    handle: ImpulseJointHandle,
    body_a: RigidBodyHandle,
    body_b: RigidBodyHandle,
    params: DampedRotarySpring,
}

// ---------------------------------------------------------------------------
// PhysicsWorld
// ---------------------------------------------------------------------------

/// Wraps all Rapier2D boilerplate into a single struct.
///
/// Bodies, shapes, pin joints and springs are registered once and referenced
/// by handle afterwards; the world owns all of them.
pub struct PhysicsWorld {
    gravity: na::Vector2<f32>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    collector: ContactCollector,
    filter: ContactFilter,
    springs: Vec<SpringEntry>,
    names: Vec<(RigidBodyHandle, String)>,
    pin_count: usize,
}

impl PhysicsWorld {
    /// Create a new physics world with the given gravity vector (Y up).
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity: vec2_to_na(gravity),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            collector: ContactCollector::new(),
            filter: ContactFilter {
                solid: always_solid,
            },
            springs: Vec::new(),
            names: Vec::new(),
            pin_count: 0,
        }
    }

    /// Scale the solver's contact tolerances to the typical object size.
    pub fn set_length_unit(&mut self, length_unit: f32) {
        self.integration_parameters.length_unit = length_unit;
    }

    /// Register the predicate deciding which tagged shape pairs collide.
    /// Pairs it rejects get neither a collision response nor a contact event.
    pub fn set_contact_filter(&mut self, solid: ContactFilterFn) {
        self.filter = ContactFilter { solid };
    }

    // -- Registration --

    /// Create a rigid body. Dynamic bodies never sleep so muscle changes apply at once.
    pub fn create_body(&mut self, desc: &BodyDesc) -> BodyHandle {
        let builder = match desc.kind {
            BodyKind::Dynamic { mass, inertia } => RigidBodyBuilder::dynamic()
                .additional_mass_properties(MassProperties::new(
                    na::Point2::origin(),
                    mass,
                    inertia,
                ))
                .can_sleep(false),
            BodyKind::Fixed => RigidBodyBuilder::fixed(),
        };
        let rb = builder
            .translation(vec2_to_na(desc.position))
            .rotation(desc.angle)
            .build();
        let handle = self.bodies.insert(rb);
        self.names.push((handle, desc.name.clone()));
        BodyHandle(handle)
    }

    /// Attach a shape to a body. The shape carries no mass; the body's mass is explicit.
    pub fn add_shape(
        &mut self,
        body: BodyHandle,
        shape: ShapeDesc,
        material: ShapeMaterial,
        tag: ShapeTag,
    ) -> ShapeHandle {
        let collider = shape
            .build_collider()
            .density(0.0)
            .friction(material.friction)
            .friction_combine_rule(CoefficientCombineRule::Multiply)
            .restitution(material.restitution)
            .user_data(tag.to_bits())
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .active_hooks(ActiveHooks::FILTER_CONTACT_PAIRS)
            .build();
        ShapeHandle(
            self.colliders
                .insert_with_parent(collider, body.0, &mut self.bodies),
        )
    }

    /// Pin `anchor_a` (local to `a`) to `anchor_b` (local to `b`).
    /// The anchors should coincide in world space when the joint is created:
    /// the pin holds them together and leaves rotation free.
    pub fn add_pin_joint(
        &mut self,
        a: BodyHandle,
        b: BodyHandle,
        anchor_a: Vec2,
        anchor_b: Vec2,
    ) -> JointHandle {
        let joint = RevoluteJointBuilder::new()
            .local_anchor1(vec2_to_point(anchor_a))
            .local_anchor2(vec2_to_point(anchor_b))
            .build();
        self.pin_count += 1;
        JointHandle(self.impulse_joints.insert(a.0, b.0, joint, true))
    }

    /// Add a damped rotary spring between two bodies.
    pub fn add_spring(
        &mut self,
        a: BodyHandle,
        b: BodyHandle,
        spring: DampedRotarySpring,
    ) -> SpringHandle {
        let joint = GenericJointBuilder::new(JointAxesMask::empty())
            .motor_model(JointAxis::AngX, MotorModel::ForceBased)
            .motor_position(
                JointAxis::AngX,
                Self::motor_target(spring.rest_angle),
                spring.stiffness,
                spring.damping,
            )
            .build();
        let handle = self.impulse_joints.insert(a.0, b.0, joint, true);
        self.springs.push(SpringEntry {
            handle,
            body_a: a.0,
            body_b: b.0,
            params: spring,
        });
        SpringHandle(handle)
    }

    // -- Spring control --

    /// Current parameters of a spring.
    pub fn spring(&self, spring: SpringHandle) -> Option<DampedRotarySpring> {
        self.springs
            .iter()
            .find(|s| s.handle == spring.0)
            .map(|s| s.params)
    }

    /// Change only the rest angle of a spring.
    pub fn set_spring_rest_angle(&mut self, spring: SpringHandle, rest_angle: f32) {
        if let Some(mut params) = self.spring(spring) {
            params.rest_angle = rest_angle;
            self.set_spring(spring, params);
        }
    }

    /// Change strength and damping of a spring, keeping its rest angle.
    pub fn set_spring_params(&mut self, spring: SpringHandle, stiffness: f32, damping: f32) {
        if let Some(mut params) = self.spring(spring) {
            params.stiffness = stiffness;
            params.damping = damping;
            self.set_spring(spring, params);
        }
    }

    fn set_spring(&mut self, spring: SpringHandle, params: DampedRotarySpring) {
        let Some(entry) = self.springs.iter_mut().find(|s| s.handle == spring.0) else {
            return;
        };
        entry.params = params;
        if let Some((_, joint)) = self
            .impulse_joints
            .iter_mut()
            .find(|(handle, _)| *handle == spring.0)
        {
            joint.data.set_motor_position(
                JointAxis::AngX,
                Self::motor_target(params.rest_angle),
                params.stiffness,
                params.damping,
            );
        }
    }

    /// Relative angle `angle(a) - angle(b)` the spring is currently at.
    pub fn spring_angle(&self, spring: SpringHandle) -> Option<f32> {
        let entry = self.springs.iter().find(|s| s.handle == spring.0)?;
        let a = self.bodies.get(entry.body_a)?.rotation().angle();
        let b = self.bodies.get(entry.body_b)?.rotation().angle();
        Some(a - b)
    }

    // The solver measures the joint angle as angle(b) - angle(a).
    fn motor_target(rest_angle: f32) -> f32 {
        -rest_angle
    }

    // -- Stepping --

    /// Advance all bodies by `dt`: collision detection, joints as hard
    /// constraints, springs as soft ones. Contact starts are buffered until
    /// `drain_contacts_into`.
    pub fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &self.filter,
            &self.collector,
        );
    }

    /// Move contacts that started since the last drain into `out`.
    pub fn drain_contacts_into(&mut self, out: &mut Vec<Contact>) {
        for (h1, h2) in self.collector.drain() {
            let (Some(c1), Some(c2)) = (self.colliders.get(h1), self.colliders.get(h2)) else {
                continue;
            };
            out.push(Contact {
                shape_a: ShapeHandle(h1),
                shape_b: ShapeHandle(h2),
                tag_a: ShapeTag::from_bits(c1.user_data),
                tag_b: ShapeTag::from_bits(c2.user_data),
            });
        }
    }

    /// Every dynamic quantity must be finite; anything else is a tuning bug
    /// and must not reach the renderer.
    pub fn check_finite(&self) -> Result<(), SimulationError> {
        for (handle, rb) in self.bodies.iter() {
            let pos = rb.translation();
            let vel = rb.linvel();
            let finite = pos.x.is_finite()
                && pos.y.is_finite()
                && rb.rotation().angle().is_finite()
                && vel.x.is_finite()
                && vel.y.is_finite()
                && rb.angvel().is_finite();
            if !finite {
                let body = self.name_of(handle);
                log::error!("non-finite state in body {}: pos={:?} vel={:?}", body, pos, vel);
                return Err(SimulationError::NonFinite { body });
            }
        }
        Ok(())
    }

    // -- Direct state access --

    /// Teleport a body: set its pose, zero its velocities and clear accumulated forces.
    pub fn set_body_pose(&mut self, body: BodyHandle, position: Vec2, angle: f32) {
        if let Some(rb) = self.bodies.get_mut(body.0) {
            rb.set_position(na::Isometry2::new(vec2_to_na(position), angle), true);
            rb.set_linvel(na::Vector2::zeros(), true);
            rb.set_angvel(0.0, true);
            rb.reset_forces(true);
            rb.reset_torques(true);
        }
    }

    /// Current position and angle of a body.
    pub fn body_pose(&self, body: BodyHandle) -> (Vec2, f32) {
        self.bodies
            .get(body.0)
            .map(|rb| na_iso_to_pos_rot(rb.position()))
            .unwrap_or((Vec2::ZERO, 0.0))
    }

    /// Current linear and angular velocity of a body.
    pub fn body_velocity(&self, body: BodyHandle) -> (Vec2, f32) {
        self.bodies
            .get(body.0)
            .map(|rb| (na_to_vec2(rb.linvel()), rb.angvel()))
            .unwrap_or((Vec2::ZERO, 0.0))
    }

    /// World-space position of a point given in a body's local frame.
    pub fn local_to_world(&self, body: BodyHandle, local: Vec2) -> Vec2 {
        self.bodies
            .get(body.0)
            .map(|rb| point_to_vec2(&(rb.position() * vec2_to_point(local))))
            .unwrap_or(local)
    }

    pub fn shape_tag(&self, shape: ShapeHandle) -> ShapeTag {
        self.colliders
            .get(shape.0)
            .map(|c| ShapeTag::from_bits(c.user_data))
            .unwrap_or(ShapeTag::None)
    }

    /// All shapes in world space, posed from their parent bodies' current state.
    pub fn shapes(&self) -> impl Iterator<Item = ShapeView> + '_ {
        self.colliders.iter().filter_map(|(handle, collider)| {
            let iso = match (collider.parent(), collider.position_wrt_parent()) {
                (Some(parent), Some(local)) => self.bodies.get(parent)?.position() * local,
                _ => *collider.position(),
            };
            let shape = collider.shape();
            let geometry = if let Some(ball) = shape.as_ball() {
                let (center, angle) = na_iso_to_pos_rot(&iso);
                WorldShape::Circle {
                    center,
                    radius: ball.radius,
                    angle,
                }
            } else if let Some(capsule) = shape.as_capsule() {
                WorldShape::Segment {
                    a: point_to_vec2(&(iso * capsule.segment.a)),
                    b: point_to_vec2(&(iso * capsule.segment.b)),
                    radius: capsule.radius,
                }
            } else {
                return None;
            };
            Some(ShapeView {
                handle: ShapeHandle(handle),
                tag: ShapeTag::from_bits(collider.user_data),
                geometry,
            })
        })
    }

    /// Number of rigid bodies in the simulation.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Number of pin joints.
    pub fn joint_count(&self) -> usize {
        self.pin_count
    }

    /// Number of springs.
    pub fn spring_count(&self) -> usize {
        self.springs.len()
    }

    // -- private helpers --

    fn name_of(&self, handle: RigidBodyHandle) -> String {
        self.names
            .iter()
            .find(|(h, _)| *h == handle)
            .map(|(_, name)| name.clone())
            .unwrap_or_else(|| format!("{:?}", handle))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{ArenaPart, PlayerSide, ShapeRole};
    use crate::sumo::collision::is_solid;

    const DT: f32 = 0.002;

    fn ball(world: &mut PhysicsWorld, pos: Vec2, tag: ShapeTag) -> BodyHandle {
        let body = world.create_body(&BodyDesc::dynamic(1.0, 100.0).with_position(pos));
        world.add_shape(
            body,
            ShapeDesc::Circle {
                offset: Vec2::ZERO,
                radius: 5.0,
            },
            ShapeMaterial::default(),
            tag,
        );
        body
    }

    fn floor(world: &mut PhysicsWorld, tag: ShapeTag) -> BodyHandle {
        let body = world.create_body(&BodyDesc::fixed());
        world.add_shape(
            body,
            ShapeDesc::Segment {
                a: Vec2::new(-200.0, 0.0),
                b: Vec2::new(200.0, 0.0),
                radius: 5.0,
            },
            ShapeMaterial::with_friction(0.6),
            tag,
        );
        body
    }

    #[test]
    fn gravity_pulls_dynamic_body_down() {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, -900.0));
        let body = ball(&mut world, Vec2::new(0.0, 100.0), ShapeTag::None);
        for _ in 0..50 {
            world.step(DT);
        }
        let (pos, _) = world.body_pose(body);
        assert!(pos.y < 100.0, "body should fall (y up): y={}", pos.y);
    }

    #[test]
    fn fixed_body_does_not_move() {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, -900.0));
        let ground = floor(&mut world, ShapeTag::Arena(ArenaPart::Ground));
        for _ in 0..50 {
            world.step(DT);
        }
        assert_eq!(world.body_pose(ground).0, Vec2::ZERO);
    }

    #[test]
    fn pin_joint_keeps_anchors_together() {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, -900.0));
        let pivot = world.create_body(&BodyDesc::fixed().with_position(Vec2::new(0.0, 100.0)));
        let bob = world.create_body(
            &BodyDesc::dynamic(10.0, 10_000.0).with_position(Vec2::new(35.0, 100.0)),
        );
        world.add_pin_joint(pivot, bob, Vec2::ZERO, Vec2::new(-35.0, 0.0));
        assert_eq!(world.joint_count(), 1);

        // Roughly a quarter swing.
        for _ in 0..200 {
            world.step(DT);
        }

        let anchor = world.local_to_world(bob, Vec2::new(-35.0, 0.0));
        assert!(
            anchor.distance(Vec2::new(0.0, 100.0)) < 1.0,
            "anchors drifted apart: {:?}",
            anchor
        );
        let (pos, _) = world.body_pose(bob);
        assert!(pos.y < 100.0, "bob should swing down: y={}", pos.y);
    }

    #[test]
    fn spring_drives_relative_angle_to_rest() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let base = world.create_body(&BodyDesc::fixed());
        let limb = world.create_body(&BodyDesc::dynamic(10.0, 10_000.0));
        world.add_pin_joint(base, limb, Vec2::ZERO, Vec2::ZERO);
        let spring = world.add_spring(
            base,
            limb,
            DampedRotarySpring {
                rest_angle: 0.5,
                stiffness: 4_000_000.0,
                damping: 20_000.0,
            },
        );

        for _ in 0..1500 {
            world.step(DT);
        }

        let angle = world.spring_angle(spring).unwrap();
        assert!((angle - 0.5).abs() < 0.15, "relative angle {}", angle);
        // angle(base) - angle(limb) = 0.5 with a fixed base
        assert!(world.body_pose(limb).1 < 0.0);
    }

    #[test]
    fn zero_strength_spring_exerts_nothing() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let base = world.create_body(&BodyDesc::fixed());
        let limb = world.create_body(&BodyDesc::dynamic(10.0, 10_000.0));
        world.add_pin_joint(base, limb, Vec2::ZERO, Vec2::ZERO);
        let spring = world.add_spring(
            base,
            limb,
            DampedRotarySpring {
                rest_angle: 1.0,
                stiffness: 4_000_000.0,
                damping: 20_000.0,
            },
        );
        world.set_spring_params(spring, 0.0, 0.0);
        assert_eq!(world.spring(spring).unwrap().rest_angle, 1.0);

        for _ in 0..200 {
            world.step(DT);
        }
        assert!(world.body_pose(limb).1.abs() < 1e-3);
    }

    #[test]
    fn set_body_pose_teleports_and_stops() {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, -900.0));
        let body = ball(&mut world, Vec2::new(0.0, 100.0), ShapeTag::None);
        for _ in 0..50 {
            world.step(DT);
        }
        assert!(world.body_velocity(body).0.y < 0.0);

        world.set_body_pose(body, Vec2::new(10.0, 200.0), 0.25);
        let (pos, angle) = world.body_pose(body);
        assert_eq!(pos, Vec2::new(10.0, 200.0));
        assert!((angle - 0.25).abs() < 1e-6);
        assert_eq!(world.body_velocity(body), (Vec2::ZERO, 0.0));
    }

    #[test]
    fn contact_events_carry_tags() {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, -900.0));
        floor(&mut world, ShapeTag::Arena(ArenaPart::Ground));
        let head = ShapeTag::character(PlayerSide::Left, ShapeRole::Head);
        ball(&mut world, Vec2::new(0.0, 30.0), head);

        let mut contacts = Vec::new();
        for _ in 0..500 {
            world.step(DT);
            world.drain_contacts_into(&mut contacts);
        }
        assert!(!contacts.is_empty(), "ball should land on the floor");
        let tags = [contacts[0].tag_a, contacts[0].tag_b];
        assert!(tags.contains(&head));
        assert!(tags.contains(&ShapeTag::Arena(ArenaPart::Ground)));
    }

    #[test]
    fn filtered_pairs_pass_through_silently() {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, -900.0));
        world.set_contact_filter(|a, b| {
            !matches!(
                (a, b),
                (ShapeTag::Arena(_), ShapeTag::None) | (ShapeTag::None, ShapeTag::Arena(_))
            )
        });
        floor(&mut world, ShapeTag::Arena(ArenaPart::Mat));
        let body = ball(&mut world, Vec2::new(0.0, 30.0), ShapeTag::None);

        let mut contacts = Vec::new();
        for _ in 0..300 {
            world.step(DT);
            world.drain_contacts_into(&mut contacts);
        }
        assert!(contacts.is_empty());
        assert!(world.body_pose(body).0.y < -10.0, "ball should fall through");
    }

    fn limb(world: &mut PhysicsWorld, pos: Vec2, tag: ShapeTag) -> BodyHandle {
        let body = world.create_body(&BodyDesc::dynamic(10.0, 10_000.0).with_position(pos));
        world.add_shape(
            body,
            ShapeDesc::Segment {
                a: Vec2::ZERO,
                b: Vec2::new(0.0, -35.0),
                radius: 5.0,
            },
            ShapeMaterial::default(),
            tag,
        );
        body
    }

    #[test]
    fn own_limbs_and_torso_overlap_without_response() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        world.set_contact_filter(is_solid);
        let left_limb = ShapeTag::character(PlayerSide::Left, ShapeRole::Limb);
        let thigh = limb(&mut world, Vec2::ZERO, left_limb);
        let calf = limb(&mut world, Vec2::new(0.0, -20.0), left_limb);
        let torso = limb(&mut world, Vec2::new(3.0, -10.0), ShapeTag::Torso);

        let mut contacts = Vec::new();
        for _ in 0..50 {
            world.step(DT);
            world.drain_contacts_into(&mut contacts);
        }
        assert!(contacts.is_empty(), "self contacts reported: {:?}", contacts);
        for (body, start) in [
            (thigh, Vec2::ZERO),
            (calf, Vec2::new(0.0, -20.0)),
            (torso, Vec2::new(3.0, -10.0)),
        ] {
            assert!(world.body_pose(body).0.distance(start) < 1e-4);
            assert_eq!(world.body_velocity(body), (Vec2::ZERO, 0.0));
        }
    }

    #[test]
    fn opposing_limbs_still_collide() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        world.set_contact_filter(is_solid);
        let left = limb(
            &mut world,
            Vec2::ZERO,
            ShapeTag::character(PlayerSide::Left, ShapeRole::Limb),
        );
        limb(
            &mut world,
            Vec2::new(6.0, -10.0),
            ShapeTag::character(PlayerSide::Right, ShapeRole::Limb),
        );

        let mut contacts = Vec::new();
        for _ in 0..50 {
            world.step(DT);
            world.drain_contacts_into(&mut contacts);
        }
        assert!(!contacts.is_empty());
        assert!(world.body_pose(left).0.x < 0.0, "left limb should be pushed away");
    }

    #[test]
    fn shapes_are_reported_in_world_space() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let body = world.create_body(
            &BodyDesc::dynamic(10.0, 10_000.0)
                .with_position(Vec2::new(100.0, 50.0))
                .with_angle(std::f32::consts::FRAC_PI_2),
        );
        world.add_shape(
            body,
            ShapeDesc::Segment {
                a: Vec2::ZERO,
                b: Vec2::new(0.0, -35.0),
                radius: 5.0,
            },
            ShapeMaterial::default(),
            ShapeTag::Torso,
        );
        let views: Vec<_> = world.shapes().collect();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].tag, ShapeTag::Torso);
        match views[0].geometry {
            WorldShape::Segment { a, b, radius } => {
                assert!(a.distance(Vec2::new(100.0, 50.0)) < 1e-3);
                // (0, -35) rotated a quarter turn counter-clockwise is (35, 0)
                assert!(b.distance(Vec2::new(135.0, 50.0)) < 1e-3, "b={:?}", b);
                assert_eq!(radius, 5.0);
            }
            other => panic!("expected segment, got {:?}", other),
        }
    }

    #[test]
    fn check_finite_reports_named_body() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let body = world.create_body(&BodyDesc::dynamic(1.0, 1.0).with_name("left calf"));
        assert!(world.check_finite().is_ok());
        world.set_body_pose(body, Vec2::new(f32::NAN, 0.0), 0.0);
        match world.check_finite() {
            Err(SimulationError::NonFinite { body }) => assert_eq!(body, "left calf"),
            other => panic!("expected NonFinite, got {:?}", other),
        }
    }
}
