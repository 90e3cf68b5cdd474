//! Tool-use lock and tool/seed cycling.

use bevy::prelude::*;

use super::seed_order;
use crate::input::PlayerInput;
use crate::farming::tile_in_front;
use crate::shared::*;

/// Polled countdown for the current tool swing. While it runs, movement
/// is ignored; when it elapses the tool resolves against the tile in
/// front of the player. There is no cancellation; a started swing
/// always completes.
#[derive(Resource, Debug, Clone, Default)]
pub struct ToolUseLock {
    pub remaining: f32,
    pub tool: Option<ToolKind>,
}

impl ToolUseLock {
    pub fn active(&self) -> bool {
        self.tool.is_some()
    }
}

/// Debounce countdowns for the cycling inputs.
#[derive(Resource, Debug, Clone, Default)]
pub struct CycleTimers {
    pub tool: f32,
    pub seed: f32,
}

/// Start a swing on input, tick the countdown, and fire the
/// `ToolUseEvent` when it elapses.
pub fn tick_tool_use(
    time: Res<Time>,
    input: Res<PlayerInput>,
    player_state: Res<PlayerState>,
    mut lock: ResMut<ToolUseLock>,
    mut player: Query<(&LogicalPosition, &mut PlayerMovement), With<Player>>,
    mut tool_writer: EventWriter<ToolUseEvent>,
) {
    let Ok((position, mut movement)) = player.get_single_mut() else {
        return;
    };

    if let Some(tool) = lock.tool {
        lock.remaining -= time.delta_secs();
        if lock.remaining <= 0.0 {
            // The status still carries the tool suffix here; targeting
            // normalizes it back to the base direction.
            let facing = Facing::from_status(&movement.status);
            let target_tile = tile_in_front(position.0, facing);
            tool_writer.send(ToolUseEvent { tool, target_tile });
            movement.status = format!("{}Idle", facing.name());
            lock.tool = None;
            lock.remaining = 0.0;
        }
        return;
    }

    if input.tool_use {
        let tool = player_state.equipped_tool();
        lock.tool = Some(tool);
        lock.remaining = TOOL_USE_SECS;
        movement.status = format!("{}{}", movement.facing.name(), tool.status_suffix());
    }
}

/// Cycle the equipped tool forward/backward with debounce.
pub fn tool_cycle(
    time: Res<Time>,
    input: Res<PlayerInput>,
    mut timers: ResMut<CycleTimers>,
    mut player_state: ResMut<PlayerState>,
) {
    timers.tool = (timers.tool - time.delta_secs()).max(0.0);
    if timers.tool > 0.0 {
        return;
    }
    if input.next_tool {
        player_state.tool_index = (player_state.tool_index + 1) % TOOL_ORDER.len();
        timers.tool = CYCLE_DEBOUNCE_SECS;
    } else if input.prev_tool {
        player_state.tool_index =
            (player_state.tool_index + TOOL_ORDER.len() - 1) % TOOL_ORDER.len();
        timers.tool = CYCLE_DEBOUNCE_SECS;
    }
}

/// Cycle the active seed through the crop catalog with debounce.
pub fn seed_cycle(
    time: Res<Time>,
    input: Res<PlayerInput>,
    mut timers: ResMut<CycleTimers>,
    mut player_state: ResMut<PlayerState>,
    registry: Res<CropRegistry>,
) {
    timers.seed = (timers.seed - time.delta_secs()).max(0.0);
    if timers.seed > 0.0 {
        return;
    }
    let seeds = seed_order(&registry);
    if seeds.is_empty() {
        return;
    }
    if input.next_seed {
        player_state.seed_index = (player_state.seed_index + 1) % seeds.len();
        timers.seed = CYCLE_DEBOUNCE_SECS;
    } else if input.prev_seed {
        player_state.seed_index = (player_state.seed_index + seeds.len() - 1) % seeds.len();
        timers.seed = CYCLE_DEBOUNCE_SECS;
    }
}

/// Move the hotbar cursor. Edge-triggered intents, no debounce needed.
pub fn inventory_cursor(input: Res<PlayerInput>, mut inventory: ResMut<Inventory>) {
    if input.next_item {
        inventory.select_next();
    }
    if input.prev_item {
        inventory.select_prev();
    }
}
