//! Translates simulation events into surface calls

use std::collections::BTreeSet;

use glam::Vec2;

use super::style::{brick_style, style_for};
use super::{Surface, TextHandle};
use crate::sim::{BodyId, GameEvent};

pub const PROMPT_TEXT: &str = "Press Space to start";
pub const GAME_OVER_TEXT: &str = "You Lose! Game Over!";

const HUD_POSITION: Vec2 = Vec2::new(100.0, 20.0);
const HUD_SIZE: u32 = 15;
const CENTER_TEXT_POSITION: Vec2 = Vec2::new(300.0, 200.0);
const CENTER_TEXT_SIZE: u32 = 40;

pub fn hud_text(lives: i32, score: u64, level: u32) -> String {
    format!("Lives: {lives}  Score: {score}  Level: {level}")
}

/// Remembers which shapes and texts it put on the surface
#[derive(Debug, Default)]
pub struct Presenter {
    shapes: BTreeSet<BodyId>,
    hud: Option<TextHandle>,
    prompt: Option<TextHandle>,
    banner: Option<TextHandle>,
}

impl Presenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of shapes currently on the surface
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    pub fn prompt_visible(&self) -> bool {
        self.prompt.is_some()
    }

    pub fn apply(&mut self, surface: &mut dyn Surface, event: &GameEvent) {
        match *event {
            GameEvent::SceneCleared => {
                for id in std::mem::take(&mut self.shapes) {
                    surface.remove_shape(id);
                }
                for handle in [self.hud.take(), self.prompt.take(), self.banner.take()]
                    .into_iter()
                    .flatten()
                {
                    surface.remove_text(handle);
                }
            }
            GameEvent::BodySpawned {
                id,
                kind,
                shape,
                bounds,
                hits,
            } => {
                surface.create_shape(id, shape, bounds, style_for(kind, hits));
                self.shapes.insert(id);
            }
            GameEvent::BodyMoved { id, delta } => surface.move_shape(id, delta),
            GameEvent::BrickDamaged { id, remaining_hits } => {
                surface.set_style(id, brick_style(remaining_hits));
            }
            GameEvent::BodyRemoved { id } => {
                if self.shapes.remove(&id) {
                    surface.remove_shape(id);
                }
            }
            GameEvent::HudChanged {
                lives,
                score,
                level,
            } => {
                let text = hud_text(lives, score, level);
                match self.hud {
                    Some(handle) => surface.update_text(handle, &text),
                    None => {
                        self.hud = Some(surface.draw_text(HUD_POSITION, &text, HUD_SIZE));
                    }
                }
            }
            GameEvent::PromptShown => {
                if self.prompt.is_none() {
                    self.prompt = Some(surface.draw_text(
                        CENTER_TEXT_POSITION,
                        PROMPT_TEXT,
                        CENTER_TEXT_SIZE,
                    ));
                }
            }
            GameEvent::PromptCleared => {
                if let Some(handle) = self.prompt.take() {
                    surface.remove_text(handle);
                }
            }
            GameEvent::GameOver { .. } => {
                self.banner = Some(surface.draw_text(
                    CENTER_TEXT_POSITION,
                    GAME_OVER_TEXT,
                    CENTER_TEXT_SIZE,
                ));
            }
            GameEvent::Launched | GameEvent::LifeLost { .. } | GameEvent::LevelCleared { .. } => {}
        }
    }

    pub fn apply_all(&mut self, surface: &mut dyn Surface, events: &[GameEvent]) {
        for event in events {
            self.apply(surface, event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{RecordingSurface, SurfaceCall};
    use crate::settings::Settings;
    use crate::sim::GameState;

    #[test]
    fn test_new_game_draws_everything() {
        let mut state = GameState::new(&Settings::default());
        let mut surface = RecordingSurface::new(610.0, 400.0);
        let mut presenter = Presenter::new();
        presenter.apply_all(&mut surface, &state.drain_events());

        // Paddle, 24 bricks, ball
        assert_eq!(presenter.shape_count(), 26);
        assert_eq!(surface.scene().shape_count(), 26);
        assert!(presenter.prompt_visible());
        assert!(surface.scene().has_text(PROMPT_TEXT));
        assert!(surface.scene().has_text("Lives: 3  Score: 0  Level: 1"));
    }

    #[test]
    fn test_damage_restyles_and_removal_erases() {
        let mut surface = RecordingSurface::new(610.0, 400.0);
        let mut presenter = Presenter::new();
        let id = BodyId(7);
        presenter.apply(
            &mut surface,
            &GameEvent::BodySpawned {
                id,
                kind: crate::sim::BodyKind::Brick,
                shape: crate::sim::Shape::Rect,
                bounds: crate::sim::Bounds::new(5.0, 40.0, 80.0, 60.0),
                hits: Some(3),
            },
        );
        presenter.apply(&mut surface, &GameEvent::BrickDamaged { id, remaining_hits: 2 });
        presenter.apply(&mut surface, &GameEvent::BodyRemoved { id });

        assert_eq!(
            &surface.calls()[1..],
            &[SurfaceCall::SetStyle(id, brick_style(2)), SurfaceCall::RemoveShape(id)]
        );
        assert_eq!(presenter.shape_count(), 0);
    }

    #[test]
    fn test_scene_cleared_removes_texts() {
        let mut surface = RecordingSurface::new(610.0, 400.0);
        let mut presenter = Presenter::new();
        presenter.apply(&mut surface, &GameEvent::PromptShown);
        presenter.apply(&mut surface, &GameEvent::GameOver { score: 0, level: 1 });
        presenter.apply(&mut surface, &GameEvent::SceneCleared);

        assert!(!presenter.prompt_visible());
        assert_eq!(surface.scene().text_count(), 0);
    }
}
