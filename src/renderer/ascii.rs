//! Text-mode surface
//!
//! Rasterizes the retained scene into a character grid, one cell per
//! `CELL_WIDTH` x `CELL_HEIGHT` arena units.

use glam::Vec2;

use super::recording::Scene;
use super::style::Style;
use super::{Surface, TextHandle};
use crate::sim::{BodyId, Bounds, Shape};

const CELL_WIDTH: f32 = 10.0;
const CELL_HEIGHT: f32 = 20.0;

/// Surface that renders to a string grid
#[derive(Debug, Clone)]
pub struct AsciiSurface {
    scene: Scene,
    cols: usize,
    rows: usize,
}

impl AsciiSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            scene: Scene::new(width, height),
            cols: (width / CELL_WIDTH).ceil().max(1.0) as usize,
            rows: (height / CELL_HEIGHT).ceil().max(1.0) as usize,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Cell index range covered by `[lo, hi]` along one axis
    fn span(lo: f32, hi: f32, cell: f32, count: usize) -> std::ops::Range<usize> {
        let start = (lo / cell).floor().max(0.0) as usize;
        let end = ((hi / cell).ceil().max(0.0) as usize).min(count);
        start.min(end)..end
    }

    /// Draw the current scene: framed grid, then text lines
    pub fn render(&self) -> String {
        let mut grid = vec![vec![' '; self.cols]; self.rows];

        // Rectangles first so the ball is never hidden
        let mut shapes: Vec<_> = self.scene.shapes().map(|(_, s)| s).collect();
        shapes.sort_by_key(|s| s.shape == Shape::Circle);

        for s in shapes {
            let cols = Self::span(s.bounds.left(), s.bounds.right(), CELL_WIDTH, self.cols);
            let rows = Self::span(s.bounds.top(), s.bounds.bottom(), CELL_HEIGHT, self.rows);
            for row in rows {
                for col in cols.clone() {
                    grid[row][col] = s.style.glyph;
                }
            }
        }

        let border = format!("+{}+", "-".repeat(self.cols));
        let mut out = String::with_capacity((self.cols + 3) * (self.rows + 4));
        out.push_str(&border);
        out.push('\n');
        for row in grid {
            out.push('|');
            out.extend(row);
            out.push_str("|\n");
        }
        out.push_str(&border);
        out.push('\n');

        for text in self.scene.texts() {
            out.push_str(&text.content);
            out.push('\n');
        }
        out
    }
}

impl Surface for AsciiSurface {
    fn width(&self) -> f32 {
        self.scene.width()
    }

    fn height(&self) -> f32 {
        self.scene.height()
    }

    fn create_shape(&mut self, id: BodyId, shape: Shape, bounds: Bounds, style: Style) {
        self.scene.create_shape(id, shape, bounds, style);
    }

    fn move_shape(&mut self, id: BodyId, delta: Vec2) {
        self.scene.move_shape(id, delta);
    }

    fn set_style(&mut self, id: BodyId, style: Style) {
        self.scene.set_style(id, style);
    }

    fn remove_shape(&mut self, id: BodyId) {
        self.scene.remove_shape(id);
    }

    fn draw_text(&mut self, position: Vec2, content: &str, size: u32) -> TextHandle {
        self.scene.draw_text(position, content, size)
    }

    fn update_text(&mut self, handle: TextHandle, content: &str) {
        self.scene.update_text(handle, content);
    }

    fn remove_text(&mut self, handle: TextHandle) {
        self.scene.remove_text(handle);
    }
}
