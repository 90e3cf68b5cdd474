//! Economy domain — the shop and money bookkeeping.

pub mod gold;
pub mod shop;

use bevy::prelude::*;

use crate::input::PlayerInput;
use crate::shared::*;

pub struct EconomyPlugin;

impl Plugin for EconomyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<gold::EconomyStats>()
            .add_systems(
                Update,
                toggle_shop.run_if(in_state(GameState::Playing).or(in_state(GameState::Shop))),
            )
            .add_systems(
                Update,
                (shop::handle_buy, shop::handle_sell).run_if(in_state(GameState::Shop)),
            )
            .add_systems(Update, gold::track_gold_changes);
    }
}

/// Enter/leave the shop screen. The shop UI itself is external; the core
/// only owns the state switch and the transaction handlers.
fn toggle_shop(
    input: Res<PlayerInput>,
    state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if !input.toggle_shop {
        return;
    }
    match state.get() {
        GameState::Playing => {
            info!("[Economy] Entering shop");
            next_state.set(GameState::Shop);
        }
        GameState::Shop => {
            info!("[Economy] Leaving shop");
            next_state.set(GameState::Playing);
        }
        _ => {}
    }
}
