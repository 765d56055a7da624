//! Frame drawing: walk the physics world and hand primitives to a `Renderer`.

use glam::Vec2;

use crate::api::types::{ArenaPart, ShapeRole, ShapeTag};
use crate::assets::skin::Skin;
use crate::core::physics::{PhysicsWorld, WorldShape};
use crate::renderer::traits::{Color, Renderer};
use crate::sumo::ragdoll::RagdollPose;

/// Everything besides the physics world needed to draw one frame.
pub struct MatchView<'a> {
    pub poses: [RagdollPose; 2],
    pub scores: [u32; 2],
    pub skins: [Option<&'a Skin>; 2],
    /// Where the score label is centered.
    pub label_at: Vec2,
}

/// Draw every shape, both heads and the score line.
///
/// Heads are skipped in the shape pass and drawn through `Renderer::draw_head`
/// so backends can paint the skin over them.
pub fn draw_match(world: &PhysicsWorld, view: &MatchView, renderer: &mut dyn Renderer) {
    for shape in world.shapes() {
        if let ShapeTag::Character { role: ShapeRole::Head, .. } = shape.tag {
            continue;
        }
        let color = shape_color(shape.tag);
        match shape.geometry {
            WorldShape::Circle { center, radius, .. } => renderer.draw_circle(center, radius, color),
            WorldShape::Segment { a, b, radius } => renderer.draw_segment(a, b, radius, color),
        }
    }

    for (pose, skin) in view.poses.iter().zip(view.skins) {
        let color = if pose.alive { Color::Black } else { Color::Grey };
        renderer.draw_head(pose.head.position, pose.head_radius, pose.head.angle, color, skin);
    }

    renderer.draw_label(&score_line(view.scores), view.label_at);
}

/// The score line shown at the top of the arena: left score, then right.
pub fn score_line(scores: [u32; 2]) -> String {
    format!("{} : {}", scores[0], scores[1])
}

fn shape_color(tag: ShapeTag) -> Color {
    match tag {
        ShapeTag::Arena(ArenaPart::Mat) => Color::Red,
        _ => Color::Black,
    }
}
