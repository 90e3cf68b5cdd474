//! World objects — trees, rocks, stumps, and resource drops — and the
//! axe/pickaxe interactions against them.

use bevy::prelude::*;
use rand::Rng;

use crate::shared::*;

/// Wood drops per felled tree.
const TREE_DROP_RANGE: std::ops::RangeInclusive<u32> = 2..=3;
/// Stone drops per broken rock.
const ROCK_DROP_RANGE: std::ops::RangeInclusive<u32> = 1..=2;
/// Leaf particles per chop.
const LEAF_BURST_RANGE: std::ops::RangeInclusive<u32> = 10..=15;

// ═══════════════════════════════════════════════════════════════════════
// COMPONENTS
// ═══════════════════════════════════════════════════════════════════════

/// A breakable rock prop. Its collision presence is a separate shadow
/// entity so removal can clear both.
#[derive(Component, Debug, Clone)]
pub struct Rock {
    pub shadow: Entity,
}

/// Non-interactive leftover of a felled tree.
#[derive(Component, Debug, Clone, Default)]
pub struct Stump;

// ═══════════════════════════════════════════════════════════════════════
// SPAWN HELPERS
// ═══════════════════════════════════════════════════════════════════════

pub fn spawn_tree(commands: &mut Commands, bounds: Rect) -> Entity {
    commands
        .spawn((
            LogicalPosition(bounds.min),
            BoundingBox(bounds),
            RenderLayer(LAYER_MAIN),
            Collider,
            Tree::default(),
        ))
        .id()
}

pub fn spawn_rock(commands: &mut Commands, position: Vec2) -> Entity {
    // The collision shadow is half the visible footprint.
    let shadow_rect = Rect::from_corners(position, position + Vec2::splat(16.0));
    let shadow = commands
        .spawn((
            LogicalPosition(position),
            BoundingBox(shadow_rect),
            Collider,
        ))
        .id();
    commands
        .spawn((
            LogicalPosition(position),
            BoundingBox(Rect::from_corners(
                position,
                position + Vec2::splat(TILE_SIZE),
            )),
            RenderLayer(LAYER_MAIN),
            Rock { shadow },
        ))
        .id()
}

fn spawn_resource_drop(
    commands: &mut Commands,
    registry: &ItemRegistry,
    item_id: &str,
    position: Vec2,
) {
    commands.spawn((
        LogicalPosition(position),
        BoundingBox(Rect::from_center_size(position, Vec2::splat(16.0))),
        RenderLayer(LAYER_MAIN),
        Pickupable {
            item_id: item_id.to_string(),
            icon_index: registry.icon_or_placeholder(item_id),
        },
    ));
}

fn spawn_stump(commands: &mut Commands, tree_bounds: Rect) {
    let size = Vec2::new(32.0, 16.0);
    let foot = Vec2::new(tree_bounds.center().x, tree_bounds.max.y - size.y / 2.0);
    commands.spawn((
        LogicalPosition(foot - size / 2.0),
        BoundingBox(Rect::from_center_size(foot, size)),
        RenderLayer(LAYER_MAIN),
        Stump,
        TimedDecoration { remaining: None },
    ));
}

// ═══════════════════════════════════════════════════════════════════════
// TARGET SELECTION
// ═══════════════════════════════════════════════════════════════════════

/// Among candidates whose bounds intersect the target rect, pick the one
/// whose center is nearest the target center. Equal distances resolve to
/// the lowest entity index so the choice never depends on iteration order.
pub fn nearest_target(
    candidates: impl IntoIterator<Item = (Entity, Rect)>,
    target: Rect,
) -> Option<Entity> {
    let target_center = target.center();
    let mut best: Option<(f32, u32, Entity)> = None;
    for (entity, rect) in candidates {
        if rect.intersect(target).is_empty() {
            continue;
        }
        let distance_sq = rect.center().distance_squared(target_center);
        let closer = match best {
            Some((best_dist, best_index, _)) => {
                distance_sq < best_dist
                    || (distance_sq == best_dist && entity.index() < best_index)
            }
            None => true,
        };
        if closer {
            best = Some((distance_sq, entity.index(), entity));
        }
    }
    best.map(|(_, _, entity)| entity)
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

/// Resolve axe hits: pick the nearest live tree overlapping the target
/// tile, apply one unit of damage outside its invulnerability window, and
/// on depletion drop wood exactly once, leave a stump, and remove the
/// tree. Removal goes through `Commands`, so it lands after all systems
/// finished iterating this frame.
pub fn handle_axe_on_trees(
    mut commands: Commands,
    mut tool_events: EventReader<ToolUseEvent>,
    mut trees: Query<(Entity, &BoundingBox, &mut Tree)>,
    mut rng: ResMut<GameRng>,
    registry: Res<ItemRegistry>,
    mut particle_writer: EventWriter<ParticleBurstEvent>,
) {
    for event in tool_events.read() {
        if event.tool != ToolKind::Axe {
            continue;
        }
        let target = crate::farming::tile_rect(event.target_tile);
        let candidates = trees
            .iter()
            .filter(|(_, _, tree)| tree.alive && !tree.is_chopped)
            .map(|(entity, bounds, _)| (entity, bounds.0));
        let Some(selected) = nearest_target(candidates, target) else {
            continue;
        };
        let Ok((entity, bounds, mut tree)) = trees.get_mut(selected) else {
            continue;
        };
        let bounds = bounds.0;

        if tree.invulnerable_for > 0.0 {
            continue;
        }

        tree.health -= 1;
        tree.invulnerable_for = TREE_INVULN_SECS;
        particle_writer.send(ParticleBurstEvent {
            particles: leaf_burst(&mut rng, bounds),
        });

        if tree.health <= 0 {
            tree.alive = false;
            tree.is_chopped = true;
            commands.entity(entity).remove::<Collider>();

            if !tree.has_dropped_resources {
                tree.has_dropped_resources = true;
                let count = rng.0.gen_range(TREE_DROP_RANGE);
                for _ in 0..count {
                    let offset = Vec2::new(
                        rng.0.gen_range(-20.0..=20.0),
                        rng.0.gen_range(-10.0..=10.0),
                    );
                    spawn_resource_drop(
                        &mut commands,
                        &registry,
                        "wood",
                        bounds.center() + offset,
                    );
                }
            }

            spawn_stump(&mut commands, bounds);
            commands.entity(entity).despawn();
            info!("[World] Tree felled at {:?}", bounds.min);
        }
    }
}

/// Resolve pickaxe hits: rocks break in a single hit, drop stone, and
/// take their collision shadow with them.
pub fn handle_pickaxe_on_rocks(
    mut commands: Commands,
    mut tool_events: EventReader<ToolUseEvent>,
    rocks: Query<(Entity, &BoundingBox, &Rock)>,
    mut rng: ResMut<GameRng>,
    registry: Res<ItemRegistry>,
) {
    for event in tool_events.read() {
        if event.tool != ToolKind::Pickaxe {
            continue;
        }
        let target = crate::farming::tile_rect(event.target_tile);
        let candidates = rocks
            .iter()
            .map(|(entity, bounds, _)| (entity, bounds.0));
        let Some(selected) = nearest_target(candidates, target) else {
            continue;
        };
        let Ok((entity, bounds, rock)) = rocks.get(selected) else {
            continue;
        };

        let count = rng.0.gen_range(ROCK_DROP_RANGE);
        for _ in 0..count {
            let offset = Vec2::new(
                rng.0.gen_range(-20.0..=20.0),
                rng.0.gen_range(-10.0..=10.0),
            );
            spawn_resource_drop(
                &mut commands,
                &registry,
                "stone",
                bounds.0.center() + offset,
            );
        }

        commands.entity(rock.shadow).despawn();
        commands.entity(entity).despawn();
        info!("[World] Rock broken at {:?}", bounds.0.min);
    }
}

/// Count down invulnerability windows. Real-time, like the tool lock.
pub fn tick_tree_invulnerability(time: Res<Time>, mut trees: Query<&mut Tree>) {
    let delta = time.delta_secs();
    for mut tree in &mut trees {
        if tree.invulnerable_for > 0.0 {
            tree.invulnerable_for = (tree.invulnerable_for - delta).max(0.0);
        }
    }
}

/// Remove decorations whose lifetime has elapsed. `None` is permanent.
pub fn expire_timed_decorations(
    mut commands: Commands,
    time: Res<Time>,
    mut decorations: Query<(Entity, &mut TimedDecoration)>,
) {
    let delta = time.delta_secs();
    for (entity, mut decoration) in &mut decorations {
        if let Some(remaining) = decoration.remaining.as_mut() {
            *remaining -= delta;
            if *remaining <= 0.0 {
                commands.entity(entity).despawn();
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PARTICLES
// ═══════════════════════════════════════════════════════════════════════

/// Leaf-burst descriptors scattered around the tree's canopy. Handed to
/// the external renderer; nothing in the simulation reads them back.
fn leaf_burst(rng: &mut GameRng, bounds: Rect) -> Vec<ParticleSpec> {
    let center = bounds.center();
    let spread = bounds.size() / 3.0;
    let count = rng.0.gen_range(LEAF_BURST_RANGE);
    (0..count)
        .map(|_| ParticleSpec {
            position: center
                + Vec2::new(
                    rng.0.gen_range(-spread.x..=spread.x),
                    rng.0.gen_range(-spread.y..=spread.y),
                ),
            velocity: Vec2::new(rng.0.gen_range(-100.0..=100.0), rng.0.gen_range(-80.0..=40.0)),
            lifetime_secs: rng.0.gen_range(1.5..=2.5),
        })
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::from_corners(Vec2::new(x, y), Vec2::new(x + w, y + h))
    }

    #[test]
    fn nearest_target_picks_closest_intersecting() {
        let target = rect(0.0, 0.0, 32.0, 32.0);
        let near = Entity::from_raw(1);
        let far = Entity::from_raw(2);
        let outside = Entity::from_raw(3);
        let picked = nearest_target(
            [
                (far, rect(20.0, 20.0, 64.0, 64.0)),
                (near, rect(-10.0, -10.0, 48.0, 48.0)),
                (outside, rect(200.0, 200.0, 32.0, 32.0)),
            ],
            target,
        );
        assert_eq!(picked, Some(near));
    }

    #[test]
    fn nearest_target_breaks_ties_by_entity_index() {
        let target = rect(0.0, 0.0, 32.0, 32.0);
        let a = Entity::from_raw(9);
        let b = Entity::from_raw(4);
        // Identical rects are equidistant; candidate order must not matter.
        let shape = rect(8.0, 8.0, 32.0, 32.0);
        assert_eq!(nearest_target([(a, shape), (b, shape)], target), Some(b));
        assert_eq!(nearest_target([(b, shape), (a, shape)], target), Some(b));
    }

    #[test]
    fn nearest_target_ignores_non_intersecting() {
        let target = rect(0.0, 0.0, 32.0, 32.0);
        assert_eq!(
            nearest_target([(Entity::from_raw(1), rect(100.0, 0.0, 32.0, 32.0))], target),
            None
        );
    }

    #[test]
    fn leaf_burst_is_seed_deterministic() {
        let bounds = rect(0.0, 0.0, 64.0, 96.0);
        let burst_a = leaf_burst(&mut GameRng::seeded(11), bounds);
        let burst_b = leaf_burst(&mut GameRng::seeded(11), bounds);
        assert_eq!(burst_a.len(), burst_b.len());
        assert!((10..=15).contains(&burst_a.len()));
        for (a, b) in burst_a.iter().zip(&burst_b) {
            assert_eq!(a.position, b.position);
            assert_eq!(a.velocity, b.velocity);
        }
    }
}
