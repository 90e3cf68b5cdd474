//! Witherford — the simulation core of a 2D top-down farming game.
//!
//! The crate is headless: windowing, rendering, audio, asset decoding,
//! and hardware input belong to the embedding shell. Add
//! [`WitherfordPlugins`] to an app that already has Bevy's `StatesPlugin`
//! (and a runner — `MinimalPlugins` is enough) and drive it through
//! [`input::PlayerInput`] and the events in [`shared`].

pub mod calendar;
pub mod data;
pub mod economy;
pub mod farming;
pub mod input;
pub mod player;
pub mod save;
pub mod shared;
pub mod world;

use bevy::prelude::*;

use crate::shared::*;

/// Registers the whole game core: the state machine, the shared
/// resources and events, and every domain plugin.
pub struct WitherfordPlugins;

impl Plugin for WitherfordPlugins {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>();

        // Shared resources.
        app.init_resource::<GameClock>()
            .init_resource::<PlayerState>()
            .init_resource::<Inventory>()
            .init_resource::<FarmState>()
            .init_resource::<DayNightTint>()
            .init_resource::<GameRng>();

        // Shared events.
        app.add_event::<ToolUseEvent>()
            .add_event::<PlantSeedEvent>()
            .add_event::<HarvestAttemptEvent>()
            .add_event::<DayEndEvent>()
            .add_event::<SeasonChangeEvent>()
            .add_event::<AutosaveEvent>()
            .add_event::<ItemPickupEvent>()
            .add_event::<GoldChangeEvent>()
            .add_event::<ToastEvent>()
            .add_event::<ParticleBurstEvent>()
            .add_event::<BuyRequestEvent>()
            .add_event::<SellRequestEvent>()
            .add_event::<SaveRequestEvent>()
            .add_event::<LoadRequestEvent>()
            .add_event::<SaveCompleteEvent>()
            .add_event::<LoadCompleteEvent>();

        // Domain plugins.
        app.add_plugins((
            input::InputPlugin,
            data::DataPlugin,
            calendar::CalendarPlugin,
            player::PlayerPlugin,
            farming::FarmingPlugin,
            world::WorldPlugin,
            economy::EconomyPlugin,
            save::SavePlugin,
        ));
    }
}
