//! Picking things up, using the selected item, and inventory intake.

use bevy::prelude::*;

use super::seed_order;
use crate::farming::{tile_in_front, tile_of};
use crate::input::PlayerInput;
use crate::shared::*;

/// Interact: pick up any overlapping resource drop (only when the
/// inventory actually accepts it), and attempt a harvest on the player's
/// tile and the tile ahead.
pub fn pickup_and_harvest(
    mut commands: Commands,
    input: Res<PlayerInput>,
    mut inventory: ResMut<Inventory>,
    player: Query<(&LogicalPosition, &BoundingBox, &PlayerMovement), With<Player>>,
    drops: Query<(Entity, &BoundingBox, &Pickupable)>,
    mut toast_writer: EventWriter<ToastEvent>,
    mut harvest_writer: EventWriter<HarvestAttemptEvent>,
) {
    if !input.pickup {
        return;
    }
    let Ok((position, bounds, movement)) = player.get_single() else {
        return;
    };

    for (entity, drop_bounds, pickup) in &drops {
        if drop_bounds.0.intersect(bounds.0).is_empty() {
            continue;
        }
        if inventory.add_item(&pickup.item_id, 1, pickup.icon_index) {
            info!("[Player] Picked up {}", pickup.item_id);
            commands.entity(entity).despawn();
        } else {
            toast_writer.send(ToastEvent {
                message: "Inventory full".to_string(),
                duration_secs: 2.0,
            });
        }
    }

    harvest_writer.send(HarvestAttemptEvent {
        tile: tile_of(position.0),
    });
    harvest_writer.send(HarvestAttemptEvent {
        tile: tile_in_front(position.0, movement.facing),
    });
}

/// Use the selected hotbar item. Seeds plant at the tile ahead; when the
/// cursor isn't on a seed, the active seed (cycled separately) plants
/// from whichever slot holds it. Tools act through the tool-use path,
/// materials do nothing here.
pub fn use_selected_item(
    input: Res<PlayerInput>,
    inventory: Res<Inventory>,
    player_state: Res<PlayerState>,
    item_registry: Res<ItemRegistry>,
    crop_registry: Res<CropRegistry>,
    player: Query<(&LogicalPosition, &PlayerMovement), With<Player>>,
    mut plant_writer: EventWriter<PlantSeedEvent>,
) {
    if !input.use_item {
        return;
    }
    let Ok((position, movement)) = player.get_single() else {
        return;
    };
    let tile = tile_in_front(position.0, movement.facing);

    let selected_seed = inventory.selected_slot().filter(|slot| {
        item_registry
            .get(&slot.item_id)
            .is_some_and(|def| def.category == ItemCategory::Seed)
    });

    if let Some(slot) = selected_seed {
        plant_writer.send(PlantSeedEvent {
            tile,
            seed_id: slot.item_id.clone(),
            slot_index: inventory.selected_index,
        });
        return;
    }

    // Fall back to the active seed selection.
    let seeds = seed_order(&crop_registry);
    let Some(active_seed) = seeds.get(player_state.seed_index) else {
        return;
    };
    if let Some(slot_index) = inventory
        .items
        .iter()
        .position(|slot| &slot.item_id == active_seed)
    {
        plant_writer.send(PlantSeedEvent {
            tile,
            seed_id: active_seed.clone(),
            slot_index,
        });
    }
}

/// Inventory intake for granted items (harvest yields). Drops picked off
/// the ground add directly in `pickup_and_harvest` where success gates
/// the despawn.
pub fn add_items_to_inventory(
    mut pickup_events: EventReader<ItemPickupEvent>,
    mut inventory: ResMut<Inventory>,
    registry: Res<ItemRegistry>,
    mut toast_writer: EventWriter<ToastEvent>,
) {
    for event in pickup_events.read() {
        let icon = registry.icon_or_placeholder(&event.item_id);
        if !inventory.add_item(&event.item_id, event.quantity, icon) {
            warn!(
                "[Player] Inventory full — {} × {} lost",
                event.quantity, event.item_id
            );
            toast_writer.send(ToastEvent {
                message: "Inventory full".to_string(),
                duration_secs: 2.0,
            });
        }
    }
}
