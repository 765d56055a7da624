//! ASCII renderer: rasterizes the frame into a character grid.

use glam::Vec2;
use sumo_engine::{to_screen, Color, Renderer};

/// Smallest cell edge in world units. Keeps rasterizing finite for a degenerate world size.
const MIN_CELL: f32 = 1e-3;

/// Character-cell canvas covering the whole world.
pub struct TextRenderer {
    cols: usize,
    rows: usize,
    /// World units per cell, horizontally and vertically.
    cell: Vec2,
    world_height: f32,
    cells: Vec<char>,
    label: Option<String>,
}

impl TextRenderer {
    pub fn new(cols: usize, rows: usize, world_width: f32, world_height: f32) -> Self {
        let (cols, rows) = (cols.max(1), rows.max(1));
        let cell = Vec2::new(world_width / cols as f32, world_height / rows as f32);
        Self {
            cols,
            rows,
            // NaN.max(x) is x, so a NaN size clamps too.
            cell: cell.max(Vec2::splat(MIN_CELL)),
            world_height,
            cells: vec![' '; cols * rows],
            label: None,
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(' ');
        self.label = None;
    }

    /// The grid as lines, with the label (if any) on its own first line.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity((self.cols + 1) * (self.rows + 1));
        if let Some(label) = &self.label {
            let pad = self.cols.saturating_sub(label.len()) / 2;
            out.push_str(&" ".repeat(pad));
            out.push_str(label);
            out.push('\n');
        }
        for row in self.cells.chunks(self.cols) {
            out.extend(row.iter());
            out.push('\n');
        }
        out
    }

    fn plot(&mut self, world: Vec2, glyph: char) {
        let screen = to_screen(world, self.world_height) / self.cell;
        if screen.x < 0.0 || screen.y < 0.0 {
            return;
        }
        let (col, row) = (screen.x as usize, screen.y as usize);
        if col < self.cols && row < self.rows {
            self.cells[row * self.cols + col] = glyph;
        }
    }

    /// Grid cells whose screen-space span overlaps `lo..hi`, clamped to the canvas.
    fn cell_range(lo: f32, hi: f32, len: usize) -> std::ops::Range<usize> {
        let clamp = |v: f32| v.clamp(0.0, len as f32) as usize;
        clamp(lo.floor())..clamp(hi.ceil())
    }

    fn glyph(color: Color) -> char {
        match color {
            Color::Black => '#',
            Color::Red => '=',
            Color::Grey => '.',
        }
    }
}

impl Renderer for TextRenderer {
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let glyph = Self::glyph(color);
        // Fill cells whose centre lies in the disc; always mark the centre.
        let c = to_screen(center, self.world_height) / self.cell;
        let r = Vec2::splat(radius) / self.cell;
        for row in Self::cell_range(c.y - r.y, c.y + r.y, self.rows) {
            for col in Self::cell_range(c.x - r.x, c.x + r.x, self.cols) {
                let mid = Vec2::new(col as f32 + 0.5, row as f32 + 0.5) * self.cell;
                let world = to_screen(mid, self.world_height);
                if world.distance(center) <= radius {
                    self.cells[row * self.cols + col] = glyph;
                }
            }
        }
        self.plot(center, glyph);
    }

    fn draw_segment(&mut self, a: Vec2, b: Vec2, _radius: f32, color: Color) {
        let glyph = Self::glyph(color);
        let cells = ((b - a) / self.cell).abs().max_element().ceil().max(1.0) as usize;
        for i in 0..=cells {
            self.plot(a.lerp(b, i as f32 / cells as f32), glyph);
        }
    }

    fn draw_label(&mut self, text: &str, _position: Vec2) {
        self.label = Some(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_lands_on_flipped_row() {
        let mut r = TextRenderer::new(10, 10, 100.0, 100.0);
        r.draw_segment(Vec2::new(0.0, 5.0), Vec2::new(99.0, 5.0), 1.0, Color::Red);
        let text = r.to_text();
        let last = text.lines().last().unwrap();
        assert_eq!(last, "==========");
    }

    #[test]
    fn label_is_centered_on_top() {
        let mut r = TextRenderer::new(11, 2, 110.0, 20.0);
        r.draw_label("1 : 0", Vec2::ZERO);
        assert_eq!(r.to_text().lines().next(), Some("   1 : 0"));
        r.clear();
        assert_eq!(r.to_text(), format!("{}\n{}\n", " ".repeat(11), " ".repeat(11)));
    }

    #[test]
    fn circle_fills_cells_inside_the_disc() {
        let mut r = TextRenderer::new(10, 10, 100.0, 100.0);
        r.draw_circle(Vec2::new(50.0, 50.0), 17.0, Color::Black);
        let filled = r.to_text().chars().filter(|&c| c == '#').count();
        // Cell centres within 17 of (50, 50): the 2x2 core plus two neighbours on each side.
        assert_eq!(filled, 12);
    }

    #[test]
    fn degenerate_world_size_still_draws() {
        for (w, h) in [(0.0, 600.0), (600.0, 0.0), (-600.0, 600.0)] {
            let mut r = TextRenderer::new(60, 30, w, h);
            r.draw_circle(Vec2::new(300.0, 300.0), 25.0, Color::Black);
            r.draw_segment(Vec2::ZERO, Vec2::new(600.0, 0.0), 5.0, Color::Red);
            assert_eq!(r.to_text().lines().count(), 30);
        }
    }

    #[test]
    fn off_canvas_points_are_dropped() {
        let mut r = TextRenderer::new(4, 4, 40.0, 40.0);
        r.draw_circle(Vec2::new(-100.0, 500.0), 5.0, Color::Black);
        assert!(!r.to_text().contains('#'));
    }
}
