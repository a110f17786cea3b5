//! Throwing system - directional projectile motion with deferred completion.
//!
//! A throw either animates (dynamic body + interactive capability present)
//! or degrades to an immediate drop. Either way the completion callback
//! fires exactly once per invocation: synchronously for drops and degraded
//! throws, after the settle delay for real ones. Callers never wait on a
//! callback that cannot fire.

use hecs::{Entity, World};

use crate::components::{Direction, Interactive, PhysicsBody, Position, ThrowState, Throwable, Vec2};
use crate::config;
use crate::scheduler::{TimerAction, TimerQueue};

/// Place the object down without motion, completing immediately.
pub fn drop_object(world: &mut World, entity: Entity) {
    let callback = match world.get::<&mut Throwable>(entity) {
        Ok(mut throwable) => {
            if throwable.state != ThrowState::Idle {
                log::debug!("drop ignored: object {:?} is not idle", entity);
                return;
            }
            throwable.state = ThrowState::Settled;
            throwable.take_callback()
        }
        Err(_) => return,
    };

    if let Some(callback) = callback {
        callback();
    }
}

/// Launch the object along one axis, settling after the configured delay.
///
/// Requires a dynamic physics body and the interactive capability; lacking
/// either, the call falls back to an immediate [`drop_object`].
pub fn throw_object(
    world: &mut World,
    timers: &mut TimerQueue,
    entity: Entity,
    direction: Direction,
) {
    match world.get::<&Throwable>(entity) {
        Ok(throwable) if throwable.state == ThrowState::Idle => {}
        Ok(_) => {
            log::debug!("throw ignored: object {:?} is not idle", entity);
            return;
        }
        Err(_) => return,
    }

    let capable = matches!(world.get::<&PhysicsBody>(entity), Ok(body) if body.is_dynamic())
        && world.get::<&Interactive>(entity).is_ok();
    if !capable {
        log::debug!(
            "object {:?} cannot be thrown (no dynamic body or interactivity), completing in place",
            entity
        );
        drop_object(world, entity);
        return;
    }

    if let Ok(mut body) = world.get::<&mut PhysicsBody>(entity) {
        body.velocity = Vec2::ZERO;

        match direction {
            Direction::Down => {
                if let Ok(mut pos) = world.get::<&mut Position>(entity) {
                    pos.y += config::THROW_DOWN_OFFSET;
                }
                body.velocity.y = config::THROW_ITEM_SPEED;
            }
            Direction::Up => {
                body.velocity.y = -config::THROW_ITEM_SPEED;
            }
            Direction::Left => {
                body.velocity.x = -config::THROW_ITEM_SPEED;
            }
            Direction::Right => {
                body.velocity.x = config::THROW_ITEM_SPEED;
            }
        }
    }

    if let Ok(mut interactive) = world.get::<&mut Interactive>(entity) {
        interactive.enabled = true;
    }
    if let Ok(mut throwable) = world.get::<&mut Throwable>(entity) {
        throwable.state = ThrowState::InFlight;
    }

    timers.schedule(config::THROW_ITEM_DELAY, TimerAction::SettleThrow(entity));
}

/// Finish a flight: zero velocity and run the completion callback. Invoked
/// by the scene when the settle timer fires; a despawned entity is a no-op.
pub fn settle_thrown(world: &mut World, entity: Entity) {
    if let Ok(mut body) = world.get::<&mut PhysicsBody>(entity) {
        body.velocity = Vec2::ZERO;
    }

    let callback = match world.get::<&mut Throwable>(entity) {
        Ok(mut throwable) => {
            throwable.state = ThrowState::Settled;
            throwable.take_callback()
        }
        Err(_) => None,
    };

    if let Some(callback) = callback {
        callback();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting_throwable() -> (Throwable, Arc<AtomicUsize>) {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        let throwable = Throwable::new(Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        (throwable, fired)
    }

    fn spawn_capable(world: &mut World) -> (Entity, Arc<AtomicUsize>) {
        let (throwable, fired) = counting_throwable();
        let entity = world.spawn((
            Position::new(0.0, 0.0),
            PhysicsBody::dynamic(),
            Interactive::disabled(),
            throwable,
        ));
        (entity, fired)
    }

    #[test]
    fn test_throw_sets_exactly_one_axis() {
        let cases = [
            (Direction::Up, 0.0, -config::THROW_ITEM_SPEED),
            (Direction::Down, 0.0, config::THROW_ITEM_SPEED),
            (Direction::Left, -config::THROW_ITEM_SPEED, 0.0),
            (Direction::Right, config::THROW_ITEM_SPEED, 0.0),
        ];

        for (direction, expected_x, expected_y) in cases {
            let mut world = World::new();
            let mut timers = TimerQueue::new();
            let (entity, _) = spawn_capable(&mut world);

            throw_object(&mut world, &mut timers, entity, direction);

            let body = world.get::<&PhysicsBody>(entity).unwrap();
            assert_eq!(body.velocity.x, expected_x, "{:?}", direction);
            assert_eq!(body.velocity.y, expected_y, "{:?}", direction);
            assert!(
                body.velocity.x == 0.0 || body.velocity.y == 0.0,
                "diagonal velocity after {:?}",
                direction
            );
        }
    }

    #[test]
    fn test_down_throw_nudges_origin() {
        let mut world = World::new();
        let mut timers = TimerQueue::new();
        let (entity, _) = spawn_capable(&mut world);

        throw_object(&mut world, &mut timers, entity, Direction::Down);

        let pos = world.get::<&Position>(entity).unwrap();
        assert_eq!(pos.y, config::THROW_DOWN_OFFSET);
    }

    #[test]
    fn test_throw_enables_interactivity_and_schedules_settle() {
        let mut world = World::new();
        let mut timers = TimerQueue::new();
        let (entity, fired) = spawn_capable(&mut world);

        throw_object(&mut world, &mut timers, entity, Direction::Right);

        assert!(world.get::<&Interactive>(entity).unwrap().enabled);
        assert_eq!(
            world.get::<&Throwable>(entity).unwrap().state,
            ThrowState::InFlight
        );
        assert_eq!(timers.pending(), 1);
        // Not settled yet: no callback
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_settle_zeroes_velocity_and_fires_once() {
        let mut world = World::new();
        let mut timers = TimerQueue::new();
        let (entity, fired) = spawn_capable(&mut world);

        throw_object(&mut world, &mut timers, entity, Direction::Up);
        for action in timers.advance(config::THROW_ITEM_DELAY + 0.01) {
            let TimerAction::SettleThrow(target) = action;
            settle_thrown(&mut world, target);
        }

        let body = world.get::<&PhysicsBody>(entity).unwrap();
        assert_eq!(body.velocity, Vec2::ZERO);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        drop(body);

        // A stray second settle must not double-fire
        settle_thrown(&mut world, entity);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_throw_without_body_degrades_to_drop() {
        let mut world = World::new();
        let mut timers = TimerQueue::new();
        let (throwable, fired) = counting_throwable();
        let entity = world.spawn((Position::new(4.0, 4.0), throwable));

        throw_object(&mut world, &mut timers, entity, Direction::Left);

        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(timers.pending(), 0);
        let pos = world.get::<&Position>(entity).unwrap();
        assert_eq!((pos.x, pos.y), (4.0, 4.0));
    }

    #[test]
    fn test_throw_with_static_body_degrades_to_drop() {
        let mut world = World::new();
        let mut timers = TimerQueue::new();
        let (throwable, fired) = counting_throwable();
        let entity = world.spawn((
            Position::new(0.0, 0.0),
            PhysicsBody::fixed(),
            Interactive::enabled(),
            throwable,
        ));

        throw_object(&mut world, &mut timers, entity, Direction::Right);

        assert_eq!(fired.load(Ordering::SeqCst), 1);
        let body = world.get::<&PhysicsBody>(entity).unwrap();
        assert_eq!(body.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_drop_completes_synchronously() {
        let mut world = World::new();
        let (throwable, fired) = counting_throwable();
        let entity = world.spawn((throwable,));

        drop_object(&mut world, entity);

        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(
            world.get::<&Throwable>(entity).unwrap().state,
            ThrowState::Settled
        );
    }

    #[test]
    fn test_repeat_invocations_do_not_double_fire() {
        let mut world = World::new();
        let mut timers = TimerQueue::new();
        let (entity, fired) = spawn_capable(&mut world);

        throw_object(&mut world, &mut timers, entity, Direction::Up);
        // In flight: both are ignored
        throw_object(&mut world, &mut timers, entity, Direction::Down);
        drop_object(&mut world, entity);
        assert_eq!(timers.pending(), 1);

        for action in timers.advance(1.0) {
            let TimerAction::SettleThrow(target) = action;
            settle_thrown(&mut world, target);
        }
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        // Settled: still ignored
        drop_object(&mut world, entity);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_settle_after_despawn_is_noop() {
        let mut world = World::new();
        let mut timers = TimerQueue::new();
        let (entity, fired) = spawn_capable(&mut world);

        throw_object(&mut world, &mut timers, entity, Direction::Left);
        world.despawn(entity).unwrap();

        for action in timers.advance(1.0) {
            let TimerAction::SettleThrow(target) = action;
            settle_thrown(&mut world, target);
        }
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
