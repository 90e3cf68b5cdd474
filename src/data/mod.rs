//! Data catalogs — immutable registries built once at boot.
//!
//! This replaces ad-hoc global tables: prices, growth times, and item
//! definitions are constructed here and inserted as resources; nothing
//! mutates them afterwards.

use bevy::prelude::*;

use crate::shared::*;

mod crops;
mod items;
mod shops;

pub use crops::populate_crops;
pub use items::populate_items;
pub use shops::populate_shop;

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ItemRegistry>()
            .init_resource::<CropRegistry>()
            .init_resource::<ShopCatalog>()
            .init_resource::<PriceTable>()
            .add_systems(Update, load_catalogs.run_if(in_state(GameState::Loading)));
    }
}

fn load_catalogs(
    mut item_registry: ResMut<ItemRegistry>,
    mut crop_registry: ResMut<CropRegistry>,
    mut catalog: ResMut<ShopCatalog>,
    mut prices: ResMut<PriceTable>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if item_registry.items.is_empty() {
        populate_items(&mut item_registry);
        populate_crops(&mut crop_registry);
        populate_shop(&mut catalog, &mut prices);
        info!(
            "[Data] Catalogs loaded: {} items, {} crops, {} listings",
            item_registry.items.len(),
            crop_registry.crops.len(),
            catalog.listings.len()
        );
    }
    next_state.set(GameState::Playing);
}
