//! Game state and core simulation types
//!
//! Everything the controller mutates lives here. Bodies are owned by the
//! `Arena` and addressed by `BodyId`; nothing outside the arena holds a
//! reference to them.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, BodyId, BodyKind, Bounds, Shape};
use super::collision::{self, Contact};
use crate::consts::*;
use crate::settings::Settings;

/// Current phase of the game controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Placing a fresh ball on the paddle (transient)
    Setup,
    /// Ball rides the paddle, waiting for launch input
    AwaitingLaunch,
    /// Ticking
    Running,
    /// Ball was lost, waiting for the delayed round restart
    RoundTransition,
    /// Lives exhausted
    GameOver,
}

/// The ball: a circular body moving in unit steps scaled by `speed`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub body: Body,
    /// Each component is either -1 or +1
    pub direction: Vec2,
    pub speed: f32,
}

impl Ball {
    pub fn new(id: BodyId, center: Vec2, speed: f32) -> Self {
        let size = Vec2::splat(BALL_RADIUS * 2.0);
        Self {
            body: Body::new(id, BodyKind::Ball, Shape::Circle, Bounds::centered(center, size)),
            // Up and to the right
            direction: Vec2::new(1.0, -1.0),
            speed,
        }
    }

    pub fn id(&self) -> BodyId {
        self.body.id
    }

    pub fn bounds(&self) -> Bounds {
        self.body.position()
    }

    /// Bounce off the side walls and ceiling, then step.
    ///
    /// Returns the translation applied.
    pub fn advance(&mut self, arena_width: f32) -> Vec2 {
        let bounds = self.bounds();
        if bounds.left() <= 0.0 || bounds.right() >= arena_width {
            self.direction.x = -self.direction.x;
        }
        // No floor: leaving through the bottom is a lost ball
        if bounds.top() <= 0.0 {
            self.direction.y = -self.direction.y;
        }

        let delta = self.direction * self.speed;
        self.body.translate(delta);
        delta
    }

    /// Pick the new direction after touching `contacts`.
    ///
    /// Only the direction changes here; brick damage is applied by the arena.
    pub fn resolve_collision(&mut self, contacts: &[Contact]) {
        self.direction = collision::reflect_direction(&self.bounds(), self.direction, contacts);
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub body: Body,
    /// Ball riding the paddle before launch. Weak: the ball may be gone.
    pub attached_ball: Option<BodyId>,
}

impl Paddle {
    pub fn new(id: BodyId, center: Vec2) -> Self {
        Self {
            body: Body::new(
                id,
                BodyKind::Paddle,
                Shape::Rect,
                Bounds::centered(center, Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT)),
            ),
            attached_ball: None,
        }
    }

    pub fn id(&self) -> BodyId {
        self.body.id
    }

    pub fn bounds(&self) -> Bounds {
        self.body.position()
    }

    pub fn attach_ball(&mut self, ball: BodyId) {
        self.attached_ball = Some(ball);
    }

    pub fn detach_ball(&mut self) {
        self.attached_ball = None;
    }

    /// Whether shifting by `offset` keeps both edges inside `[0, arena_width]`
    pub fn can_move(&self, offset: f32, arena_width: f32) -> bool {
        let bounds = self.bounds();
        bounds.left() + offset >= 0.0 && bounds.right() + offset <= arena_width
    }
}

/// Outcome of hitting a brick once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickHit {
    /// Still standing with this many hits left
    Damaged(u8),
    Destroyed,
}

/// A multi-hit brick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub body: Body,
    pub remaining_hits: u8,
}

impl Brick {
    pub fn new(id: BodyId, center: Vec2, hits: u8) -> Self {
        debug_assert!((1..=3).contains(&hits), "brick hits must be 1..=3, got {hits}");
        Self {
            body: Body::new(
                id,
                BodyKind::Brick,
                Shape::Rect,
                Bounds::centered(center, Vec2::new(BRICK_WIDTH, BRICK_HEIGHT)),
            ),
            remaining_hits: hits,
        }
    }

    pub fn id(&self) -> BodyId {
        self.body.id
    }

    pub fn hit(&mut self) -> BrickHit {
        debug_assert!(self.remaining_hits > 0, "hit on a destroyed brick");
        self.remaining_hits = self.remaining_hits.saturating_sub(1);
        if self.remaining_hits == 0 {
            BrickHit::Destroyed
        } else {
            BrickHit::Damaged(self.remaining_hits)
        }
    }
}

/// Result of a paddle move request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddleMove {
    /// Would leave the arena; nothing moved
    Rejected,
    /// Paddle moved, carrying the attached ball if one was still live
    Moved { carried: Option<BodyId> },
}

/// Owner of every body in play
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    pub paddle: Paddle,
    pub ball: Option<Ball>,
    /// Live bricks, iterated in id order
    pub bricks: BTreeMap<BodyId, Brick>,
    next_id: u32,
}

impl Arena {
    /// Empty arena with the paddle centered horizontally
    pub fn new(width: f32, height: f32) -> Self {
        let paddle = Paddle::new(BodyId(1), Vec2::new(width / 2.0, PADDLE_Y));
        Self {
            width,
            height,
            paddle,
            ball: None,
            bricks: BTreeMap::new(),
            next_id: 2,
        }
    }

    /// Allocate a new body id
    pub fn next_body_id(&mut self) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Look up any live body by id
    pub fn body(&self, id: BodyId) -> Option<&Body> {
        if self.paddle.id() == id {
            return Some(&self.paddle.body);
        }
        if let Some(ball) = self.ball.as_ref().filter(|b| b.id() == id) {
            return Some(&ball.body);
        }
        self.bricks.get(&id).map(|b| &b.body)
    }

    /// Every body the ball can collide with, in id order
    pub fn colliders(&self) -> impl Iterator<Item = &Body> {
        std::iter::once(&self.paddle.body).chain(self.bricks.values().map(|b| &b.body))
    }

    /// Replace the ball with a fresh one. Returns the id of the ball it replaced.
    pub fn spawn_ball(&mut self, center: Vec2, speed: f32) -> Option<BodyId> {
        let id = self.next_body_id();
        let old = self.ball.replace(Ball::new(id, center, speed));
        old.map(|b| b.id())
    }

    pub fn add_brick(&mut self, center: Vec2, hits: u8) -> BodyId {
        let id = self.next_body_id();
        self.bricks.insert(id, Brick::new(id, center, hits));
        id
    }

    pub fn live_bricks(&self) -> usize {
        self.bricks.len()
    }

    /// Shift the paddle horizontally, all or nothing
    pub fn move_paddle(&mut self, offset: f32) -> PaddleMove {
        if !self.paddle.can_move(offset, self.width) {
            return PaddleMove::Rejected;
        }

        let delta = Vec2::new(offset, 0.0);
        self.paddle.body.translate(delta);

        let carried = match (self.paddle.attached_ball, self.ball.as_mut()) {
            (Some(attached), Some(ball)) if ball.id() == attached => {
                ball.body.translate(delta);
                Some(attached)
            }
            _ => None,
        };
        PaddleMove::Moved { carried }
    }

    /// Hit a brick once, removing it when it runs out of hits
    pub fn hit_brick(&mut self, id: BodyId) -> Option<BrickHit> {
        let Some(brick) = self.bricks.get_mut(&id) else {
            debug_assert!(false, "hit on unknown brick {id:?}");
            return None;
        };
        let outcome = brick.hit();
        if outcome == BrickHit::Destroyed {
            self.bricks.remove(&id);
        }
        Some(outcome)
    }

    /// Redirect the ball off `contacts`, then damage every brick among them.
    ///
    /// Direction is decided from the contact snapshot before any brick is
    /// removed.
    pub fn resolve_ball_collision(&mut self, contacts: &[Contact]) -> Vec<(BodyId, BrickHit)> {
        if let Some(ball) = self.ball.as_mut() {
            ball.resolve_collision(contacts);
        }

        contacts
            .iter()
            .filter(|c| c.kind == BodyKind::Brick)
            .filter_map(|c| self.hit_brick(c.id).map(|hit| (c.id, hit)))
            .collect()
    }
}

/// Things that happened during a state change, for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Every shape and text on the surface is stale
    SceneCleared,
    BodySpawned {
        id: BodyId,
        kind: BodyKind,
        shape: Shape,
        bounds: Bounds,
        /// Remaining hits, for bricks
        hits: Option<u8>,
    },
    BodyMoved {
        id: BodyId,
        delta: Vec2,
    },
    BrickDamaged {
        id: BodyId,
        remaining_hits: u8,
    },
    BodyRemoved {
        id: BodyId,
    },
    HudChanged {
        lives: i32,
        score: u64,
        level: u32,
    },
    PromptShown,
    PromptCleared,
    Launched,
    LifeLost {
        lives: i32,
    },
    LevelCleared {
        level: u32,
    },
    GameOver {
        score: u64,
        level: u32,
    },
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub settings: Settings,
    pub arena: Arena,
    /// Goes negative on the final loss
    pub lives: i32,
    pub score: u64,
    pub level: u32,
    /// Speed given to every ball spawned this level
    pub ball_speed: f32,
    pub phase: GamePhase,
    /// Events not yet consumed by the controller
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh game: paddle, level 1 grid and a ball waiting for launch
    pub fn new(settings: &Settings) -> Self {
        let mut state = Self {
            settings: settings.clone(),
            arena: Arena::new(settings.arena_width, settings.arena_height),
            lives: settings.initial_lives,
            score: 0,
            level: 1,
            ball_speed: settings.ball_start_speed,
            phase: GamePhase::Setup,
            events: Vec::new(),
        };

        let paddle = &state.arena.paddle.body;
        state.events.push(GameEvent::BodySpawned {
            id: paddle.id,
            kind: paddle.kind,
            shape: paddle.shape,
            bounds: paddle.bounds,
            hits: None,
        });
        super::tick::generate_bricks(&mut state);
        super::tick::setup_round(&mut state);

        state
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn hud_event(&self) -> GameEvent {
        GameEvent::HudChanged {
            lives: self.lives,
            score: self.score,
            level: self.level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ball_at(x: f32, y: f32) -> Ball {
        Ball::new(BodyId(10), Vec2::new(x, y), 5.0)
    }

    #[test]
    fn test_ball_advance_moves_by_direction_times_speed() {
        let mut ball = ball_at(300.0, 200.0);
        let delta = ball.advance(ARENA_WIDTH);
        assert_eq!(delta, Vec2::new(5.0, -5.0));
        assert_eq!(ball.bounds().center(), Vec2::new(305.0, 195.0));
    }

    #[test]
    fn test_ball_bounces_off_right_wall() {
        let mut ball = ball_at(ARENA_WIDTH - BALL_RADIUS, 200.0);
        ball.advance(ARENA_WIDTH);
        assert_eq!(ball.direction.x, -1.0);
        assert_eq!(ball.direction.y, -1.0);
    }

    #[test]
    fn test_ball_bounces_off_ceiling() {
        let mut ball = ball_at(300.0, BALL_RADIUS);
        ball.advance(ARENA_WIDTH);
        assert_eq!(ball.direction.y, 1.0);
        assert_eq!(ball.bounds().center(), Vec2::new(305.0, 15.0));
    }

    #[test]
    fn test_ball_bounces_off_left_wall() {
        let mut ball = ball_at(BALL_RADIUS, 200.0);
        ball.direction = Vec2::new(-1.0, 1.0);
        let delta = ball.advance(ARENA_WIDTH);
        assert_eq!(ball.direction, Vec2::new(1.0, 1.0));
        assert_eq!(delta, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_ball_in_corner_flips_both() {
        let mut ball = ball_at(5.0, 5.0);
        ball.direction = Vec2::new(-1.0, -1.0);
        ball.advance(ARENA_WIDTH);
        assert_eq!(ball.direction, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_brick_hit_counts_down_then_destroys() {
        let mut brick = Brick::new(BodyId(3), Vec2::new(42.5, 50.0), 3);
        assert_eq!(brick.hit(), BrickHit::Damaged(2));
        assert_eq!(brick.hit(), BrickHit::Damaged(1));
        assert_eq!(brick.hit(), BrickHit::Destroyed);
        assert_eq!(brick.remaining_hits, 0);
    }

    #[test]
    fn test_paddle_move_rejected_at_edge() {
        let mut arena = Arena::new(ARENA_WIDTH, ARENA_HEIGHT);
        // Paddle spans 265..345; walk it left until the next step would cross 0
        while arena.move_paddle(-PADDLE_STEP) != PaddleMove::Rejected {}
        let left = arena.paddle.bounds().left();
        assert!(left >= 0.0 && left < PADDLE_STEP);

        // Rejection leaves the paddle exactly where it was
        assert_eq!(arena.move_paddle(-PADDLE_STEP), PaddleMove::Rejected);
        assert_eq!(arena.paddle.bounds().left(), left);
    }

    #[test]
    fn test_paddle_carries_attached_ball() {
        let mut arena = Arena::new(ARENA_WIDTH, ARENA_HEIGHT);
        arena.spawn_ball(Vec2::new(305.0, BALL_SPAWN_Y), 5.0);
        let ball_id = arena.ball.as_ref().map(Ball::id).unwrap();
        arena.paddle.attach_ball(ball_id);

        let moved = arena.move_paddle(PADDLE_STEP);
        assert_eq!(moved, PaddleMove::Moved { carried: Some(ball_id) });
        assert_eq!(arena.ball.as_ref().unwrap().bounds().center().x, 320.0);

        arena.paddle.detach_ball();
        arena.move_paddle(PADDLE_STEP);
        assert_eq!(arena.ball.as_ref().unwrap().bounds().center().x, 320.0);
    }

    #[test]
    fn test_stale_attachment_carries_nothing() {
        let mut arena = Arena::new(ARENA_WIDTH, ARENA_HEIGHT);
        arena.spawn_ball(Vec2::new(305.0, BALL_SPAWN_Y), 5.0);
        let first = arena.ball.as_ref().map(Ball::id).unwrap();
        arena.paddle.attach_ball(first);

        // Replacing the ball leaves the weak reference dangling
        let replaced = arena.spawn_ball(Vec2::new(100.0, 100.0), 5.0);
        assert_eq!(replaced, Some(first));
        assert_eq!(arena.move_paddle(PADDLE_STEP), PaddleMove::Moved { carried: None });
        assert_eq!(arena.ball.as_ref().unwrap().bounds().center(), Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_body_lookup_by_id() {
        let mut arena = Arena::new(ARENA_WIDTH, ARENA_HEIGHT);
        let brick = arena.add_brick(Vec2::new(42.5, 50.0), 1);
        assert_eq!(arena.body(brick).map(|b| b.kind), Some(BodyKind::Brick));
        assert_eq!(arena.body(BodyId(1)).map(|b| b.kind), Some(BodyKind::Paddle));

        assert_eq!(arena.hit_brick(brick), Some(BrickHit::Destroyed));
        assert!(arena.body(brick).is_none());
    }

    #[test]
    fn test_new_game_starts_awaiting_launch() {
        let state = GameState::new(&Settings::default());
        assert_eq!(state.phase, GamePhase::AwaitingLaunch);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.arena.live_bricks(), 24);

        let ball = state.arena.ball.as_ref().expect("ball spawned");
        assert_eq!(state.arena.paddle.attached_ball, Some(ball.id()));
        assert_eq!(ball.bounds().center(), Vec2::new(305.0, BALL_SPAWN_Y));
    }

    fn unit() -> impl Strategy<Value = f32> {
        prop_oneof![Just(-1.0f32), Just(1.0f32)]
    }

    proptest! {
        #[test]
        fn test_advance_flips_only_at_walls_and_ceiling(
            x in -2.0 * BALL_RADIUS..ARENA_WIDTH + 2.0 * BALL_RADIUS,
            y in -2.0 * BALL_RADIUS..ARENA_HEIGHT + 2.0 * BALL_RADIUS,
            dx in unit(),
            dy in unit(),
            speed in 1.0f32..20.0,
        ) {
            let mut ball = Ball::new(BodyId(10), Vec2::new(x, y), speed);
            ball.direction = Vec2::new(dx, dy);
            let before = ball.bounds();

            let delta = ball.advance(ARENA_WIDTH);

            let hits_wall = before.left() <= 0.0 || before.right() >= ARENA_WIDTH;
            let hits_ceiling = before.top() <= 0.0;
            prop_assert_eq!(ball.direction.x, if hits_wall { -dx } else { dx });
            prop_assert_eq!(ball.direction.y, if hits_ceiling { -dy } else { dy });
            prop_assert_eq!(delta, ball.direction * speed);
            prop_assert_eq!(ball.bounds(), before.translated(delta));
        }
    }
}
