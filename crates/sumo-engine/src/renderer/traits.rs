//! Renderer contract.
//!
//! The engine never rasterizes anything. Each frame it walks the world and
//! issues a handful of primitives in world space (Y up) to whatever backend
//! the host plugs in: a window, a terminal, a test recorder.

use glam::Vec2;

use crate::assets::skin::Skin;

/// Palette used by the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    /// The mat.
    Red,
    /// A dead (limp) character's head.
    Grey,
}

/// Drawing backend.
///
/// # Example Implementation
///
/// ```ignore
/// struct CanvasRenderer { ctx: Canvas }
///
/// impl Renderer for CanvasRenderer {
///     fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
///         let p = to_screen(center, 600.0);
///         self.ctx.fill_circle(p.x, p.y, radius, color);
///     }
///     // ...
/// }
/// ```
pub trait Renderer {
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// A rounded segment `radius` thick on each side of the line from `a` to `b`.
    fn draw_segment(&mut self, a: Vec2, b: Vec2, radius: f32, color: Color);

    fn draw_label(&mut self, text: &str, position: Vec2);

    /// Draw a character's head. Backends that can texture override this to
    /// paint `skin` rotated by `angle`; the default draws a plain circle.
    fn draw_head(
        &mut self,
        center: Vec2,
        radius: f32,
        angle: f32,
        color: Color,
        skin: Option<&Skin>,
    ) {
        let _ = (angle, skin);
        self.draw_circle(center, radius, color);
    }
}

/// Convert a world point (Y up) to raster coordinates (Y down) for a target `height` tall.
pub fn to_screen(p: Vec2, height: f32) -> Vec2 {
    Vec2::new(p.x, height - p.y)
}
