//! Player domain — movement, tool use, inventory interaction.

mod interaction;
mod movement;
mod tools;

use bevy::prelude::*;

use crate::shared::*;
use crate::world::MapDef;

pub use tools::ToolUseLock;

/// Fallback spawn point when the map doesn't author one.
const DEFAULT_SPAWN: Vec2 = Vec2::new(400.0, 300.0);
/// Feet-level collision box, smaller than the sprite.
pub const PLAYER_HITBOX: Vec2 = Vec2::new(40.0, 28.0);

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ToolUseLock>()
            .init_resource::<tools::CycleTimers>()
            .add_systems(OnEnter(GameState::Playing), spawn_player)
            .add_systems(
                Update,
                (
                    // The lock must tick (and possibly fire) before
                    // movement decides whether input is ignored.
                    tools::tick_tool_use,
                    movement::player_movement,
                    tools::tool_cycle,
                    tools::seed_cycle,
                    tools::inventory_cursor,
                    interaction::pickup_and_harvest,
                    interaction::use_selected_item,
                    interaction::add_items_to_inventory,
                )
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            );
    }
}

fn spawn_player(
    mut commands: Commands,
    map_def: Option<Res<MapDef>>,
    existing: Query<Entity, With<Player>>,
) {
    if !existing.is_empty() {
        return;
    }
    let spawn = map_def
        .and_then(|map| map.player_spawn)
        .unwrap_or(DEFAULT_SPAWN);
    commands.spawn((
        Player,
        PlayerMovement::default(),
        LogicalPosition(spawn),
        BoundingBox(Rect::from_center_size(spawn, PLAYER_HITBOX)),
        RenderLayer(LAYER_MAIN),
    ));
    info!("[Player] Spawned at {spawn:?}");
}

/// Seed ids in stable cycling order (sorted crop catalog keys).
pub fn seed_order(registry: &CropRegistry) -> Vec<ItemId> {
    let mut ids: Vec<ItemId> = registry.crops.keys().cloned().collect();
    ids.sort();
    ids
}
