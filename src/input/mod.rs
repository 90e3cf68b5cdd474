//! Input seam for Witherford.
//!
//! Hardware polling is an external collaborator: the embedding shell (or a
//! test) writes `PlayerInput` before the frame's `Update` runs, and the
//! plugin clears the one-shot intents again at the end of the frame so a
//! single write produces a single action.

use bevy::prelude::*;

/// Per-frame player intents. `move_axis` is held state the shell re-writes
/// every frame; everything else is an edge-triggered intent.
#[derive(Resource, Debug, Clone, Default)]
pub struct PlayerInput {
    pub move_axis: Vec2,
    pub tool_use: bool,
    pub use_item: bool,
    pub pickup: bool,
    pub next_tool: bool,
    pub prev_tool: bool,
    pub next_seed: bool,
    pub prev_seed: bool,
    pub next_item: bool,
    pub prev_item: bool,
    pub toggle_shop: bool,
    pub quicksave: bool,
    pub quickload: bool,
}

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerInput>()
            .add_systems(Last, clear_frame_input);
    }
}

/// Reset all intents after the frame has consumed them.
fn clear_frame_input(mut input: ResMut<PlayerInput>) {
    *input = PlayerInput::default();
}
