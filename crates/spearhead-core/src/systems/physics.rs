//! Physics system - integrates body velocities into positions.
//!
//! A deliberately small arcade model: dynamic bodies move by their velocity
//! each tick, static bodies never move. Collision response is the
//! renderer-side engine's concern and stays out of the core.

use hecs::{Entity, World};

use crate::components::{BodyKind, Direction, PhysicsBody, Position, Speed, Vec2};

/// Advance every dynamic body by its velocity.
pub fn physics_system(world: &mut World, delta_seconds: f32) {
    for (_, (pos, body)) in world.query_mut::<(&mut Position, &PhysicsBody)>() {
        if body.kind == BodyKind::Dynamic {
            pos.x += body.velocity.x * delta_seconds;
            pos.y += body.velocity.y * delta_seconds;
        }
    }
}

/// Start walking in a direction at the entity's attached [`Speed`].
///
/// No-op when the entity lacks a speed attribute or a dynamic body.
pub fn walk(world: &mut World, entity: Entity, direction: Direction) {
    let speed = match world.get::<&Speed>(entity) {
        Ok(speed) => speed.value(),
        Err(_) => return,
    };
    if let Ok(mut body) = world.get::<&mut PhysicsBody>(entity) {
        if body.is_dynamic() {
            body.velocity = direction.unit() * speed;
        }
    }
}

/// Stop all motion.
pub fn halt(world: &mut World, entity: Entity) {
    if let Ok(mut body) = world.get::<&mut PhysicsBody>(entity) {
        body.velocity = Vec2::ZERO;
    }
}
