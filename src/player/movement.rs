//! Player movement with collision boxes and map-bounds clamping.
//!
//! Coordinates are pixel-space with +y downward. Movement input is
//! ignored while the tool-use lock is running; the swing finishes
//! unconditionally once started.

use bevy::prelude::*;

use super::{ToolUseLock, PLAYER_HITBOX};
use crate::input::PlayerInput;
use crate::shared::*;
use crate::world::WorldMap;

pub fn player_movement(
    time: Res<Time>,
    input: Res<PlayerInput>,
    lock: Res<ToolUseLock>,
    world_map: Res<WorldMap>,
    mut player: Query<
        (&mut LogicalPosition, &mut BoundingBox, &mut PlayerMovement),
        With<Player>,
    >,
    colliders: Query<&BoundingBox, (With<Collider>, Without<Player>)>,
) {
    let Ok((mut position, mut bounds, mut movement)) = player.get_single_mut() else {
        return;
    };

    if lock.active() {
        return;
    }

    let axis = input.move_axis;
    if axis == Vec2::ZERO {
        movement.status = format!("{}Idle", movement.facing.name());
        return;
    }

    // Facing follows the dominant axis component.
    movement.facing = if axis.x.abs() > axis.y.abs() {
        if axis.x < 0.0 {
            Facing::Left
        } else {
            Facing::Right
        }
    } else if axis.y < 0.0 {
        Facing::Up
    } else {
        Facing::Down
    };
    movement.status = movement.facing.name().to_string();

    let step = axis.normalize_or_zero() * movement.speed * time.delta_secs();

    // Axis-separated movement so sliding along walls works.
    let mut center = position.0;
    for delta in [Vec2::new(step.x, 0.0), Vec2::new(0.0, step.y)] {
        let candidate = center + delta;
        let hitbox = Rect::from_center_size(candidate, PLAYER_HITBOX);
        let blocked = colliders
            .iter()
            .any(|collider| !collider.0.intersect(hitbox).is_empty());
        if !blocked {
            center = candidate;
        }
    }

    center = clamp_to_bounds(center, world_map.bounds);
    position.0 = center;
    bounds.0 = Rect::from_center_size(center, PLAYER_HITBOX);
}

/// Keep the hitbox inside the map. Degenerates to the map center when the
/// map is smaller than the hitbox on an axis.
fn clamp_to_bounds(center: Vec2, bounds: Rect) -> Vec2 {
    let half = PLAYER_HITBOX / 2.0;
    let min = bounds.min + half;
    let max = (bounds.max - half).max(min);
    center.clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_keeps_player_inside_map() {
        let bounds = Rect::from_corners(Vec2::ZERO, Vec2::new(640.0, 480.0));
        let clamped = clamp_to_bounds(Vec2::new(-50.0, 1000.0), bounds);
        assert_eq!(clamped.x, PLAYER_HITBOX.x / 2.0);
        assert_eq!(clamped.y, 480.0 - PLAYER_HITBOX.y / 2.0);
    }

    #[test]
    fn clamp_degenerates_on_tiny_maps() {
        let bounds = Rect::from_corners(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let clamped = clamp_to_bounds(Vec2::new(500.0, 500.0), bounds);
        assert_eq!(clamped, bounds.min + PLAYER_HITBOX / 2.0);
    }
}
