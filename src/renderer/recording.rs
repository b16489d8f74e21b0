//! In-memory surfaces
//!
//! `Scene` keeps the current picture; `RecordingSurface` also logs every
//! call so tests can assert on exactly what was drawn.

use std::collections::BTreeMap;

use glam::Vec2;

use super::style::Style;
use super::{Surface, TextHandle};
use crate::sim::{BodyId, Bounds, Shape};

/// A shape as the surface currently shows it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneShape {
    pub shape: Shape,
    pub bounds: Bounds,
    pub style: Style,
}

/// A piece of text as the surface currently shows it
#[derive(Debug, Clone, PartialEq)]
pub struct SceneText {
    pub position: Vec2,
    pub content: String,
    pub size: u32,
}

/// Retained picture of everything drawn so far
#[derive(Debug, Clone)]
pub struct Scene {
    width: f32,
    height: f32,
    shapes: BTreeMap<BodyId, SceneShape>,
    texts: BTreeMap<TextHandle, SceneText>,
    next_text: u32,
}

impl Scene {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            shapes: BTreeMap::new(),
            texts: BTreeMap::new(),
            next_text: 1,
        }
    }

    pub fn shape(&self, id: BodyId) -> Option<&SceneShape> {
        self.shapes.get(&id)
    }

    pub fn shapes(&self) -> impl Iterator<Item = (&BodyId, &SceneShape)> {
        self.shapes.iter()
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    pub fn texts(&self) -> impl Iterator<Item = &SceneText> {
        self.texts.values()
    }

    pub fn text_count(&self) -> usize {
        self.texts.len()
    }

    pub fn has_text(&self, content: &str) -> bool {
        self.texts.values().any(|t| t.content == content)
    }
}

impl Surface for Scene {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn create_shape(&mut self, id: BodyId, shape: Shape, bounds: Bounds, style: Style) {
        self.shapes.insert(
            id,
            SceneShape {
                shape,
                bounds,
                style,
            },
        );
    }

    fn move_shape(&mut self, id: BodyId, delta: Vec2) {
        if let Some(s) = self.shapes.get_mut(&id) {
            s.bounds = s.bounds.translated(delta);
        }
    }

    fn set_style(&mut self, id: BodyId, style: Style) {
        if let Some(s) = self.shapes.get_mut(&id) {
            s.style = style;
        }
    }

    fn remove_shape(&mut self, id: BodyId) {
        self.shapes.remove(&id);
    }

    fn draw_text(&mut self, position: Vec2, content: &str, size: u32) -> TextHandle {
        let handle = TextHandle(self.next_text);
        self.next_text += 1;
        self.texts.insert(
            handle,
            SceneText {
                position,
                content: content.to_string(),
                size,
            },
        );
        handle
    }

    fn update_text(&mut self, handle: TextHandle, content: &str) {
        if let Some(t) = self.texts.get_mut(&handle) {
            t.content = content.to_string();
        }
    }

    fn remove_text(&mut self, handle: TextHandle) {
        self.texts.remove(&handle);
    }
}

/// One call made on a `RecordingSurface`
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    CreateShape(BodyId, Shape, Bounds, Style),
    MoveShape(BodyId, Vec2),
    SetStyle(BodyId, Style),
    RemoveShape(BodyId),
    DrawText(TextHandle, String),
    UpdateText(TextHandle, String),
    RemoveText(TextHandle),
}

/// Scene plus a log of every call
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    scene: Scene,
    calls: Vec<SurfaceCall>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            scene: Scene::new(width, height),
            calls: Vec::new(),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f32 {
        self.scene.width()
    }

    fn height(&self) -> f32 {
        self.scene.height()
    }

    fn create_shape(&mut self, id: BodyId, shape: Shape, bounds: Bounds, style: Style) {
        self.calls.push(SurfaceCall::CreateShape(id, shape, bounds, style));
        self.scene.create_shape(id, shape, bounds, style);
    }

    fn move_shape(&mut self, id: BodyId, delta: Vec2) {
        self.calls.push(SurfaceCall::MoveShape(id, delta));
        self.scene.move_shape(id, delta);
    }

    fn set_style(&mut self, id: BodyId, style: Style) {
        self.calls.push(SurfaceCall::SetStyle(id, style));
        self.scene.set_style(id, style);
    }

    fn remove_shape(&mut self, id: BodyId) {
        self.calls.push(SurfaceCall::RemoveShape(id));
        self.scene.remove_shape(id);
    }

    fn draw_text(&mut self, position: Vec2, content: &str, size: u32) -> TextHandle {
        let handle = self.scene.draw_text(position, content, size);
        self.calls.push(SurfaceCall::DrawText(handle, content.to_string()));
        handle
    }

    fn update_text(&mut self, handle: TextHandle, content: &str) {
        self.calls.push(SurfaceCall::UpdateText(handle, content.to_string()));
        self.scene.update_text(handle, content);
    }

    fn remove_text(&mut self, handle: TextHandle) {
        self.calls.push(SurfaceCall::RemoveText(handle));
        self.scene.remove_text(handle);
    }
}
