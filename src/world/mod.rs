//! World domain for Witherford.
//!
//! Responsible for:
//! - The map-data seam (`MapDef`) and world setup from it
//! - World objects (trees, rocks, stumps, resource drops) and the axe /
//!   pickaxe interactions against them
//! - Tree-fragment clustering (deterministic map preprocessing)
//! - Timed decoration expiry
//! - Camera offset and draw-order keys for the external renderer

use bevy::prelude::*;

use crate::shared::*;

pub mod clusters;
pub mod objects;
pub mod view;

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WorldMap>()
            .add_systems(OnEnter(GameState::Playing), spawn_world_from_map)
            .add_systems(
                Update,
                (
                    objects::handle_axe_on_trees,
                    objects::handle_pickaxe_on_rocks,
                    objects::tick_tree_invulnerability,
                    objects::expire_timed_decorations,
                )
                    .run_if(in_state(GameState::Playing)),
            );
    }
}

// ═══════════════════════════════════════════════════════════════════════
// MAP DATA SEAM
// ═══════════════════════════════════════════════════════════════════════

/// One map-authored tree fragment (the map editor paints trees as loose
/// tile-sized pieces; clustering merges them into logical trees).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeFragment {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl TreeFragment {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            width: 16.0,
            height: 16.0,
        }
    }
}

/// Everything the core needs from the external map/tile source: bounds,
/// object layers, and the player spawn point. Tile images stay outside.
#[derive(Resource, Debug, Clone, Default)]
pub struct MapDef {
    pub width_tiles: u32,
    pub height_tiles: u32,
    pub player_spawn: Option<Vec2>,
    /// Fence tiles, collision only.
    pub fences: Vec<IVec2>,
    /// Tree fragments to be clustered into logical trees.
    pub tree_fragments: Vec<TreeFragment>,
    /// Rock placements (visible prop + collision shadow).
    pub rocks: Vec<Vec2>,
}

impl MapDef {
    pub fn pixel_size(&self) -> Vec2 {
        Vec2::new(
            self.width_tiles as f32 * TILE_SIZE,
            self.height_tiles as f32 * TILE_SIZE,
        )
    }
}

/// Bounds of the currently loaded map, in pixels. Clamps the player and
/// the camera.
#[derive(Resource, Debug, Clone)]
pub struct WorldMap {
    pub bounds: Rect,
    pub initialised: bool,
}

impl Default for WorldMap {
    fn default() -> Self {
        Self {
            bounds: Rect::from_corners(Vec2::ZERO, Vec2::new(1280.0, 720.0)),
            initialised: false,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// WORLD SETUP
// ═══════════════════════════════════════════════════════════════════════

/// Build the world from the externally supplied `MapDef`: fence colliders,
/// rocks with their collision shadows, and clustered trees. Runs once on
/// entering Playing; reproducible for a given map input.
fn spawn_world_from_map(
    mut commands: Commands,
    map_def: Option<Res<MapDef>>,
    mut world_map: ResMut<WorldMap>,
) {
    let Some(map) = map_def else {
        info!("[World] No MapDef supplied; world starts empty");
        return;
    };
    if world_map.initialised {
        return;
    }

    world_map.bounds = Rect::from_corners(Vec2::ZERO, map.pixel_size());
    world_map.initialised = true;

    for fence in &map.fences {
        let rect = crate::farming::tile_rect(*fence);
        commands.spawn((
            LogicalPosition(rect.min),
            BoundingBox(rect),
            RenderLayer(LAYER_MAIN),
            Collider,
        ));
    }

    for rock_pos in &map.rocks {
        objects::spawn_rock(&mut commands, *rock_pos);
    }

    let trees = clusters::cluster_tree_fragments(&map.tree_fragments);
    info!(
        "[World] Map setup: {} fences, {} rocks, {} trees from {} fragments",
        map.fences.len(),
        map.rocks.len(),
        trees.len(),
        map.tree_fragments.len()
    );
    for cluster in trees {
        objects::spawn_tree(&mut commands, cluster.bounds);
    }
}
