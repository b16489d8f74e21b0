//! Rendering boundary
//!
//! The simulation never draws. The controller turns `GameEvent`s into calls
//! on a `Surface`, which can be anything from a window to a test recorder.

pub mod ascii;
pub mod presenter;
pub mod recording;
pub mod style;

pub use ascii::AsciiSurface;
pub use presenter::Presenter;
pub use recording::{RecordingSurface, Scene, SurfaceCall};
pub use style::{Color, Style, brick_style, style_for};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{BodyId, Bounds, Shape};

/// Handle to a piece of text on a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TextHandle(pub u32);

/// Drawing operations the controller needs from the presentation layer.
///
/// Shapes are keyed by the arena's body ids; text gets surface-issued handles.
pub trait Surface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    fn create_shape(&mut self, id: BodyId, shape: Shape, bounds: Bounds, style: Style);
    fn move_shape(&mut self, id: BodyId, delta: Vec2);
    fn set_style(&mut self, id: BodyId, style: Style);
    fn remove_shape(&mut self, id: BodyId);

    fn draw_text(&mut self, position: Vec2, content: &str, size: u32) -> TextHandle;
    fn update_text(&mut self, handle: TextHandle, content: &str);
    fn remove_text(&mut self, handle: TextHandle);
}

/// Surface that draws nothing
#[derive(Debug, Default)]
pub struct NullSurface {
    next_text: u32,
}

impl Surface for NullSurface {
    fn width(&self) -> f32 {
        crate::consts::ARENA_WIDTH
    }

    fn height(&self) -> f32 {
        crate::consts::ARENA_HEIGHT
    }

    fn create_shape(&mut self, _id: BodyId, _shape: Shape, _bounds: Bounds, _style: Style) {}
    fn move_shape(&mut self, _id: BodyId, _delta: Vec2) {}
    fn set_style(&mut self, _id: BodyId, _style: Style) {}
    fn remove_shape(&mut self, _id: BodyId) {}

    fn draw_text(&mut self, _position: Vec2, _content: &str, _size: u32) -> TextHandle {
        self.next_text += 1;
        TextHandle(self.next_text)
    }

    fn update_text(&mut self, _handle: TextHandle, _content: &str) {}
    fn remove_text(&mut self, _handle: TextHandle) {}
}
