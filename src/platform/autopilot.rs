//! Idle/demo mode - the computer plays
//!
//! Launches as soon as a ball is ready and chases the ball with the paddle.
//! The aim point wanders a little around the ball (seeded, so demo runs are
//! reproducible) to keep the ball from settling into a loop.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::{GamePhase, GameState, InputEvent};

/// Largest distance the aim point strays from the ball center
const MAX_AIM_OFFSET: f32 = 30.0;
/// Decisions between picking a new aim offset
const RETARGET_EVERY: u32 = 50;

pub struct Autopilot {
    rng: Pcg32,
    aim_offset: f32,
    decisions: u32,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            aim_offset: 0.0,
            decisions: 0,
        }
    }

    /// Input to send now, if any
    pub fn decide(&mut self, state: &GameState) -> Option<InputEvent> {
        match state.phase {
            GamePhase::AwaitingLaunch => return Some(InputEvent::Launch),
            GamePhase::Running => {}
            _ => return None,
        }

        if self.decisions % RETARGET_EVERY == 0 {
            self.aim_offset = self.rng.random_range(-MAX_AIM_OFFSET..MAX_AIM_OFFSET);
        }
        self.decisions = self.decisions.wrapping_add(1);

        let ball_x = state.arena.ball.as_ref()?.bounds().center().x;
        let paddle_x = state.arena.paddle.bounds().center().x;
        let error = ball_x + self.aim_offset - paddle_x;

        let dead_zone = state.settings.paddle_step / 2.0;
        if error > dead_zone {
            Some(InputEvent::MoveRight)
        } else if error < -dead_zone {
            Some(InputEvent::MoveLeft)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::launch;
    use glam::Vec2;

    #[test]
    fn test_launches_when_ready() {
        let state = GameState::new(&Settings::default());
        assert_eq!(Autopilot::new(1).decide(&state), Some(InputEvent::Launch));
    }

    #[test]
    fn test_chases_ball() {
        let mut state = GameState::new(&Settings::default());
        launch(&mut state);
        let ball = state.arena.ball.as_mut().unwrap();
        ball.body.translate(Vec2::new(200.0, 0.0));

        let mut pilot = Autopilot::new(7);
        assert_eq!(pilot.decide(&state), Some(InputEvent::MoveRight));
    }

    #[test]
    fn test_same_seed_same_decisions() {
        let mut state = GameState::new(&Settings::default());
        launch(&mut state);

        let mut a = Autopilot::new(42);
        let mut b = Autopilot::new(42);
        for _ in 0..200 {
            assert_eq!(a.decide(&state), b.decide(&state));
        }
    }
}
