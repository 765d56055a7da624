use glam::Vec2;

use crate::assets::skin::Skin;
use crate::renderer::traits::{Color, Renderer};

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Circle { center: Vec2, radius: f32, color: Color },
    Segment { a: Vec2, b: Vec2, radius: f32, color: Color },
    Label { text: String, position: Vec2 },
    /// A head; `skin` is the skin's source name when one was supplied.
    Head { center: Vec2, radius: f32, angle: f32, color: Color, skin: Option<String> },
}

/// Renderer that records draw calls for a backend to replay later.
///
/// Lets a host that renders on another thread take a snapshot of the frame
/// instead of touching the physics world while the solver runs.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(32),
        }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Text of every label in the list.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Label { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Replay the recorded calls into another renderer.
    pub fn replay(&self, target: &mut dyn Renderer) {
        for command in &self.commands {
            match command {
                DrawCommand::Circle { center, radius, color } => {
                    target.draw_circle(*center, *radius, *color)
                }
                DrawCommand::Segment { a, b, radius, color } => {
                    target.draw_segment(*a, *b, *radius, *color)
                }
                DrawCommand::Label { text, position } => target.draw_label(text, *position),
                DrawCommand::Head { center, radius, color, .. } => {
                    target.draw_circle(*center, *radius, *color)
                }
            }
        }
    }
}

impl Renderer for DrawList {
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle { center, radius, color });
    }

    fn draw_segment(&mut self, a: Vec2, b: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Segment { a, b, radius, color });
    }

    fn draw_label(&mut self, text: &str, position: Vec2) {
        self.commands.push(DrawCommand::Label {
            text: text.to_string(),
            position,
        });
    }

    fn draw_head(&mut self, center: Vec2, radius: f32, angle: f32, color: Color, skin: Option<&Skin>) {
        self.commands.push(DrawCommand::Head {
            center,
            radius,
            angle,
            color,
            skin: skin.map(|s| s.source.clone()),
        });
    }
}
