//! The Running tick and the phase transitions around it
//!
//! These functions only mutate `GameState` and report what happened. When
//! the next tick or round restart should run is the controller's business.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::BodyKind;
use super::collision::query_overlaps;
use super::state::{BrickHit, GameEvent, GamePhase, GameState, PaddleMove};
use crate::consts::*;

/// Discrete player input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    MoveLeft,
    MoveRight,
    Launch,
    /// Start over once the game is lost
    Restart,
}

/// What the input did to the state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    Ignored,
    Moved,
    Launched,
    Restarted,
}

/// What a tick decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Ball moved; tick again after the tick interval
    Continue,
    /// Grid cleared; a new round is waiting for launch
    LevelCleared,
    /// Ball lost with lives to spare; restart the round after the delay
    BallLost,
    /// Final ball lost
    GameOver,
    /// Not running; nothing happened
    Idle,
}

/// Advance the Running phase by one step
pub fn tick(state: &mut GameState) -> TickOutcome {
    if state.phase != GamePhase::Running {
        log::warn!("Tick ignored in phase {:?}", state.phase);
        return TickOutcome::Idle;
    }
    let Some(ball_bounds) = state.arena.ball.as_ref().map(|b| b.bounds()) else {
        log::warn!("Tick ignored: no ball in play");
        return TickOutcome::Idle;
    };

    // Collision detection and response
    let contacts = query_overlaps(&state.arena, &ball_bounds);
    if !contacts.is_empty() {
        log::debug!("Ball at {:?} touching {:?}", ball_bounds.center(), contacts);
    }
    let hits = state.arena.resolve_ball_collision(&contacts);

    for &(id, hit) in &hits {
        state.push_event(match hit {
            BrickHit::Damaged(remaining_hits) => GameEvent::BrickDamaged { id, remaining_hits },
            BrickHit::Destroyed => GameEvent::BodyRemoved { id },
        });
    }

    let brick_contacts = contacts.iter().filter(|c| c.kind == BodyKind::Brick).count() as u64;
    state.score += brick_contacts * state.settings.points_per_brick;
    state.push_event(state.hud_event());

    // Wave clear
    if state.arena.live_bricks() == 0 {
        state.level += 1;
        state.ball_speed += state.settings.speed_increment;
        log::info!(
            "Level cleared, advancing to level {} (ball speed {})",
            state.level,
            state.ball_speed
        );
        state.push_event(GameEvent::LevelCleared { level: state.level });
        generate_bricks(state);
        setup_round(state);
        return TickOutcome::LevelCleared;
    }

    // Ball past the paddle
    if ball_bounds.bottom() >= state.arena.height {
        state.lives -= 1;
        state.push_event(GameEvent::LifeLost { lives: state.lives });
        if state.lives < 0 {
            log::info!("Game over: score {} at level {}", state.score, state.level);
            state.phase = GamePhase::GameOver;
            state.push_event(GameEvent::GameOver {
                score: state.score,
                level: state.level,
            });
            return TickOutcome::GameOver;
        }
        log::info!("Ball lost, {} lives left", state.lives);
        state.phase = GamePhase::RoundTransition;
        return TickOutcome::BallLost;
    }

    let width = state.arena.width;
    let moved = state.arena.ball.as_mut().map(|ball| (ball.id(), ball.advance(width)));
    if let Some((id, delta)) = moved {
        state.push_event(GameEvent::BodyMoved { id, delta });
    }
    TickOutcome::Continue
}

/// Place a fresh ball on the paddle and wait for launch
pub fn setup_round(state: &mut GameState) {
    state.phase = GamePhase::Setup;

    let paddle_center = state.arena.paddle.bounds().center();
    let spawn = Vec2::new(paddle_center.x, BALL_SPAWN_Y);
    if let Some(old) = state.arena.spawn_ball(spawn, state.ball_speed) {
        state.push_event(GameEvent::BodyRemoved { id: old });
    }

    if let Some(ball) = state.arena.ball.as_ref() {
        let (id, body) = (ball.id(), ball.body.clone());
        state.arena.paddle.attach_ball(id);
        state.push_event(GameEvent::BodySpawned {
            id,
            kind: body.kind,
            shape: body.shape,
            bounds: body.bounds,
            hits: None,
        });
    }

    state.push_event(state.hud_event());
    state.push_event(GameEvent::PromptShown);
    state.phase = GamePhase::AwaitingLaunch;
}

/// Release the ball from the paddle. Returns false outside AwaitingLaunch.
pub fn launch(state: &mut GameState) -> bool {
    if state.phase != GamePhase::AwaitingLaunch {
        return false;
    }
    state.arena.paddle.detach_ball();
    state.push_event(GameEvent::PromptCleared);
    state.push_event(GameEvent::Launched);
    state.phase = GamePhase::Running;
    log::info!("Ball launched at level {}", state.level);
    true
}

/// Delayed restart after a lost ball.
///
/// A restart arriving in any phase other than RoundTransition is stale
/// (the game ended or was restarted meanwhile) and does nothing.
pub fn restart_round(state: &mut GameState) -> bool {
    if state.phase != GamePhase::RoundTransition {
        log::warn!("Stale round restart ignored in phase {:?}", state.phase);
        return false;
    }
    setup_round(state);
    true
}

/// Apply one input immediately
pub fn apply_input(state: &mut GameState, input: InputEvent) -> InputOutcome {
    match input {
        InputEvent::MoveLeft | InputEvent::MoveRight => {
            if state.phase == GamePhase::GameOver {
                return InputOutcome::Ignored;
            }
            let step = state.settings.paddle_step;
            let offset = if input == InputEvent::MoveLeft { -step } else { step };
            match state.arena.move_paddle(offset) {
                PaddleMove::Rejected => InputOutcome::Ignored,
                PaddleMove::Moved { carried } => {
                    let delta = Vec2::new(offset, 0.0);
                    let paddle = state.arena.paddle.id();
                    state.push_event(GameEvent::BodyMoved { id: paddle, delta });
                    if let Some(id) = carried {
                        state.push_event(GameEvent::BodyMoved { id, delta });
                    }
                    InputOutcome::Moved
                }
            }
        }
        InputEvent::Launch => {
            if launch(state) {
                InputOutcome::Launched
            } else {
                InputOutcome::Ignored
            }
        }
        InputEvent::Restart => {
            if state.phase != GamePhase::GameOver {
                return InputOutcome::Ignored;
            }
            let settings = state.settings.clone();
            let mut fresh = GameState::new(&settings);
            let mut events = vec![GameEvent::SceneCleared];
            events.append(&mut fresh.events);
            fresh.events = events;
            *state = fresh;
            log::info!("Game restarted");
            InputOutcome::Restarted
        }
    }
}

/// Lay out the fixed three-row grid for the current arena width
pub fn generate_bricks(state: &mut GameState) {
    let width = state.arena.width;
    let mut x = BRICK_GRID_MARGIN;
    while x < width - BRICK_GRID_MARGIN {
        let center_x = x + BRICK_WIDTH / 2.0;
        for (y, hits) in BRICK_ROWS {
            let id = state.arena.add_brick(Vec2::new(center_x, y), hits);
            if let Some(brick) = state.arena.bricks.get(&id) {
                let body = &brick.body;
                state.events.push(GameEvent::BodySpawned {
                    id,
                    kind: body.kind,
                    shape: body.shape,
                    bounds: body.bounds,
                    hits: Some(hits),
                });
            }
        }
        x += BRICK_WIDTH;
    }
    log::debug!("Generated {} bricks for level {}", state.arena.live_bricks(), state.level);
}
