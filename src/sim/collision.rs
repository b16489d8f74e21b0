//! Collision detection and response for the ball
//!
//! Detection is an inclusive box-vs-box test against every collider in the
//! arena. Response never computes angles: the ball keeps unit-step
//! direction components and only their signs change.

use glam::Vec2;

use super::body::{BodyId, BodyKind, Bounds};
use super::state::Arena;

/// A body the ball is touching this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub id: BodyId,
    pub kind: BodyKind,
    /// Bounds at the moment of the query
    pub bounds: Bounds,
}

/// Every collider overlapping `bounds`, in id order.
///
/// The ball itself is never a collider.
pub fn query_overlaps(arena: &Arena, bounds: &Bounds) -> Vec<Contact> {
    arena
        .colliders()
        .filter(|body| body.bounds.overlaps(bounds))
        .map(|body| Contact {
            id: body.id,
            kind: body.kind,
            bounds: body.bounds,
        })
        .collect()
}

/// New ball direction after touching `contacts`
///
/// - several contacts: bounce vertically, horizontal is ambiguous so it stays
/// - one contact: side hits push the ball away horizontally, anything else
///   bounces vertically
/// - none: unchanged
pub fn reflect_direction(ball: &Bounds, direction: Vec2, contacts: &[Contact]) -> Vec2 {
    match contacts {
        [] => direction,
        [contact] => {
            let mid_x = ball.center().x;
            if mid_x > contact.bounds.right() {
                Vec2::new(1.0, direction.y)
            } else if mid_x < contact.bounds.left() {
                Vec2::new(-1.0, direction.y)
            } else {
                Vec2::new(direction.x, -direction.y)
            }
        }
        _ => Vec2::new(direction.x, -direction.y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::BrickHit;
    use proptest::prelude::*;

    fn contact(id: u32, kind: BodyKind, bounds: Bounds) -> Contact {
        Contact {
            id: BodyId(id),
            kind,
            bounds,
        }
    }

    fn unit() -> impl Strategy<Value = f32> {
        prop_oneof![Just(-1.0f32), Just(1.0f32)]
    }

    #[test]
    fn test_single_contact_from_above_bounces_vertically() {
        let ball = Bounds::centered(Vec2::new(300.0, 310.0), Vec2::splat(20.0));
        let paddle = contact(1, BodyKind::Paddle, Bounds::new(265.0, 321.0, 345.0, 331.0));
        let dir = reflect_direction(&ball, Vec2::new(1.0, 1.0), &[paddle]);
        assert_eq!(dir, Vec2::new(1.0, -1.0));
    }

    #[test]
    fn test_single_contact_side_hits() {
        let brick = contact(2, BodyKind::Brick, Bounds::new(100.0, 40.0, 175.0, 60.0));

        // Ball center right of the brick: always head right
        let right = Bounds::centered(Vec2::new(180.0, 50.0), Vec2::splat(20.0));
        assert_eq!(
            reflect_direction(&right, Vec2::new(-1.0, -1.0), &[brick]),
            Vec2::new(1.0, -1.0)
        );

        // Ball center left of the brick: always head left
        let left = Bounds::centered(Vec2::new(95.0, 50.0), Vec2::splat(20.0));
        assert_eq!(
            reflect_direction(&left, Vec2::new(1.0, 1.0), &[brick]),
            Vec2::new(-1.0, 1.0)
        );
    }

    #[test]
    fn test_query_skips_ball_and_orders_by_id() {
        let mut arena = Arena::new(ARENA_WIDTH, ARENA_HEIGHT);
        let a = arena.add_brick(Vec2::new(42.5, 50.0), 3);
        let b = arena.add_brick(Vec2::new(42.5, 70.0), 2);
        arena.spawn_ball(Vec2::new(42.5, 60.0), 5.0);

        let ball = arena.ball.as_ref().unwrap().bounds();
        let ids: Vec<_> = query_overlaps(&arena, &ball).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![a, b]);
    }

    #[test]
    fn test_destroyed_brick_leaves_overlap_set() {
        let mut arena = Arena::new(ARENA_WIDTH, ARENA_HEIGHT);
        let brick = arena.add_brick(Vec2::new(42.5, 90.0), 1);
        arena.spawn_ball(Vec2::new(42.5, 105.0), 5.0);
        let ball = arena.ball.as_ref().unwrap().bounds();

        let contacts = query_overlaps(&arena, &ball);
        assert_eq!(contacts.len(), 1);
        let hits = arena.resolve_ball_collision(&contacts);
        assert_eq!(hits, vec![(brick, BrickHit::Destroyed)]);

        assert!(query_overlaps(&arena, &ball).is_empty());
    }

    #[test]
    fn test_direction_uses_positions_from_before_the_hit() {
        let mut arena = Arena::new(ARENA_WIDTH, ARENA_HEIGHT);
        arena.add_brick(Vec2::new(42.5, 90.0), 1);
        arena.spawn_ball(Vec2::new(42.5, 105.0), 5.0);
        arena.ball.as_mut().unwrap().direction = Vec2::new(1.0, -1.0);

        let ball = arena.ball.as_ref().unwrap().bounds();
        let contacts = query_overlaps(&arena, &ball);
        arena.resolve_ball_collision(&contacts);

        // Brick is gone, but the bounce off it still happened
        assert_eq!(arena.live_bricks(), 0);
        assert_eq!(arena.ball.as_ref().unwrap().direction, Vec2::new(1.0, 1.0));
    }

    proptest! {
        #[test]
        fn prop_no_contacts_never_changes_direction(
            x in 0.0f32..610.0, y in 0.0f32..400.0, dx in unit(), dy in unit()
        ) {
            let ball = Bounds::centered(Vec2::new(x, y), Vec2::splat(20.0));
            let dir = Vec2::new(dx, dy);
            prop_assert_eq!(reflect_direction(&ball, dir, &[]), dir);
        }

        #[test]
        fn prop_multiple_contacts_flip_vertical_only(
            x in 0.0f32..610.0, y in 0.0f32..400.0, dx in unit(), dy in unit(),
            n in 2usize..5, bx in 0.0f32..600.0
        ) {
            let ball = Bounds::centered(Vec2::new(x, y), Vec2::splat(20.0));
            let contacts: Vec<_> = (0..n)
                .map(|i| contact(i as u32 + 2, BodyKind::Brick,
                    Bounds::new(bx, 40.0 + i as f32 * 20.0, bx + 75.0, 60.0 + i as f32 * 20.0)))
                .collect();
            let out = reflect_direction(&ball, Vec2::new(dx, dy), &contacts);
            prop_assert_eq!(out, Vec2::new(dx, -dy));
        }

        #[test]
        fn prop_single_contact_policy(
            x in 0.0f32..610.0, dx in unit(), dy in unit(), left in 0.0f32..535.0
        ) {
            let ball = Bounds::centered(Vec2::new(x, 60.0), Vec2::splat(20.0));
            let target = Bounds::new(left, 50.0, left + 75.0, 70.0);
            let out = reflect_direction(&ball, Vec2::new(dx, dy),
                &[contact(2, BodyKind::Brick, target)]);

            if x > target.right() {
                prop_assert_eq!(out, Vec2::new(1.0, dy));
            } else if x < target.left() {
                prop_assert_eq!(out, Vec2::new(-1.0, dy));
            } else {
                prop_assert_eq!(out, Vec2::new(dx, -dy));
            }
        }

        #[test]
        fn prop_every_touched_brick_loses_one_hit(col in 0usize..8, dy in 0.0f32..20.0) {
            let mut arena = Arena::new(ARENA_WIDTH, ARENA_HEIGHT);
            let cx = 5.0 + BRICK_WIDTH / 2.0 + col as f32 * BRICK_WIDTH;
            let top = arena.add_brick(Vec2::new(cx, 50.0), 3);
            let mid = arena.add_brick(Vec2::new(cx, 70.0), 2);
            arena.add_brick(Vec2::new(cx, 90.0), 1);
            // Ball straddling the seam between the top two rows
            arena.spawn_ball(Vec2::new(cx, 50.0 + dy), 5.0);

            let ball = arena.ball.as_ref().unwrap().bounds();
            let contacts = query_overlaps(&arena, &ball);
            let before: Vec<_> = contacts.iter()
                .map(|c| arena.bricks[&c.id].remaining_hits)
                .collect();
            arena.resolve_ball_collision(&contacts);

            for (c, hits) in contacts.iter().zip(before) {
                let now = arena.bricks.get(&c.id).map_or(0, |b| b.remaining_hits);
                prop_assert_eq!(now, hits - 1);
            }
            prop_assert!(contacts.iter().any(|c| c.id == top || c.id == mid));
        }
    }
}
