//! Buying and selling against the shop catalog and price table.

use bevy::prelude::*;
use thiserror::Error;

use crate::shared::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShopError {
    #[error("that item is not for sale")]
    UnknownListing,
    #[error("not enough money")]
    InsufficientFunds,
    #[error("inventory is full")]
    InventoryFull,
    #[error("nothing to sell there")]
    EmptySlot,
}

/// Buy one unit of the catalog entry at `catalog_index`.
///
/// Debit and inventory-add are one transaction: when the add fails (bag
/// full of other kinds) the debit is rolled back and the purchase fails
/// with the player's money unchanged.
pub fn buy_item(
    catalog: &ShopCatalog,
    registry: &ItemRegistry,
    catalog_index: usize,
    player_state: &mut PlayerState,
    inventory: &mut Inventory,
) -> Result<ShopListing, ShopError> {
    let listing = catalog
        .listings
        .get(catalog_index)
        .ok_or(ShopError::UnknownListing)?;
    if player_state.money < listing.price {
        return Err(ShopError::InsufficientFunds);
    }

    player_state.money -= listing.price;
    let icon = registry.icon_or_placeholder(&listing.item_id);
    if !inventory.add_item(&listing.item_id, 1, icon) {
        player_state.money += listing.price;
        return Err(ShopError::InventoryFull);
    }
    Ok(listing.clone())
}

/// Sell exactly one unit from the inventory slot at `slot_index` for the
/// table price (1 for unlisted kinds).
pub fn sell_item(
    prices: &PriceTable,
    slot_index: usize,
    player_state: &mut PlayerState,
    inventory: &mut Inventory,
) -> Result<(ItemId, u32), ShopError> {
    let slot = inventory.items.get(slot_index).ok_or(ShopError::EmptySlot)?;
    let item_id = slot.item_id.clone();
    let price = prices.sell_price(&item_id);
    inventory.remove_item(slot_index, 1);
    player_state.money += price;
    Ok((item_id, price))
}

// ─────────────────────────────────────────────────────────────────────────────
// Systems
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_buy(
    mut buy_events: EventReader<BuyRequestEvent>,
    catalog: Res<ShopCatalog>,
    registry: Res<ItemRegistry>,
    mut player_state: ResMut<PlayerState>,
    mut inventory: ResMut<Inventory>,
    mut gold_writer: EventWriter<GoldChangeEvent>,
    mut toast_writer: EventWriter<ToastEvent>,
) {
    for event in buy_events.read() {
        match buy_item(
            &catalog,
            &registry,
            event.catalog_index,
            &mut player_state,
            &mut inventory,
        ) {
            Ok(listing) => {
                info!(
                    "[Economy] Bought {} for {}g. Balance: {}g",
                    listing.item_id, listing.price, player_state.money
                );
                gold_writer.send(GoldChangeEvent {
                    amount: -(listing.price as i64),
                    reason: format!("Bought {}", listing.item_id),
                });
            }
            Err(err) => {
                toast_writer.send(ToastEvent {
                    message: err.to_string(),
                    duration_secs: 2.0,
                });
            }
        }
    }
}

pub fn handle_sell(
    mut sell_events: EventReader<SellRequestEvent>,
    prices: Res<PriceTable>,
    mut player_state: ResMut<PlayerState>,
    mut inventory: ResMut<Inventory>,
    mut gold_writer: EventWriter<GoldChangeEvent>,
    mut toast_writer: EventWriter<ToastEvent>,
) {
    for event in sell_events.read() {
        match sell_item(
            &prices,
            event.slot_index,
            &mut player_state,
            &mut inventory,
        ) {
            Ok((item_id, price)) => {
                info!(
                    "[Economy] Sold {item_id} for {price}g. Balance: {}g",
                    player_state.money
                );
                gold_writer.send(GoldChangeEvent {
                    amount: price as i64,
                    reason: format!("Sold {item_id}"),
                });
            }
            Err(err) => {
                toast_writer.send(ToastEvent {
                    message: err.to_string(),
                    duration_secs: 2.0,
                });
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn fixtures() -> (ShopCatalog, ItemRegistry, PriceTable) {
        let catalog = ShopCatalog {
            listings: vec![
                ShopListing {
                    item_id: "beans".into(),
                    price: 25,
                },
                ShopListing {
                    item_id: "wood".into(),
                    price: 10,
                },
            ],
        };
        let mut registry = ItemRegistry::default();
        registry.items.insert(
            "beans".into(),
            ItemDef {
                id: "beans".into(),
                name: "Beans".into(),
                category: ItemCategory::Seed,
                icon_index: 3,
            },
        );
        let mut prices = PriceTable::default();
        prices.sell_prices.insert("beans".into(), 12);
        (catalog, registry, prices)
    }

    #[test]
    fn buy_debits_and_adds() {
        let (catalog, registry, _) = fixtures();
        let mut player = PlayerState::default();
        let mut inventory = Inventory::default();
        let listing = buy_item(&catalog, &registry, 0, &mut player, &mut inventory).unwrap();
        assert_eq!(listing.item_id, "beans");
        assert_eq!(player.money, PLAYER_START_MONEY - 25);
        assert_eq!(inventory.count("beans"), 1);
    }

    #[test]
    fn buy_fails_without_funds() {
        let (catalog, registry, _) = fixtures();
        let mut player = PlayerState {
            money: 5,
            ..Default::default()
        };
        let mut inventory = Inventory::default();
        assert_eq!(
            buy_item(&catalog, &registry, 0, &mut player, &mut inventory),
            Err(ShopError::InsufficientFunds)
        );
        assert_eq!(player.money, 5);
        assert!(inventory.items.is_empty());
    }

    #[test]
    fn buy_rolls_back_debit_when_inventory_is_full() {
        let (catalog, registry, _) = fixtures();
        let mut player = PlayerState::default();
        let mut inventory = Inventory::default();
        for i in 0..INVENTORY_CAPACITY {
            inventory.add_item(&format!("filler_{i}"), 1, 0);
        }
        assert_eq!(
            buy_item(&catalog, &registry, 0, &mut player, &mut inventory),
            Err(ShopError::InventoryFull)
        );
        assert_eq!(player.money, PLAYER_START_MONEY);
        assert_eq!(inventory.count("beans"), 0);
    }

    #[test]
    fn sell_credits_table_price_and_removes_one() {
        let (_, _, prices) = fixtures();
        let mut player = PlayerState::default();
        let mut inventory = Inventory::default();
        inventory.add_item("beans", 3, 0);
        let (item_id, price) = sell_item(&prices, 0, &mut player, &mut inventory).unwrap();
        assert_eq!((item_id.as_str(), price), ("beans", 12));
        assert_eq!(player.money, PLAYER_START_MONEY + 12);
        assert_eq!(inventory.count("beans"), 2);
    }

    #[test]
    fn sell_defaults_to_one_for_unlisted_kinds() {
        let (_, _, prices) = fixtures();
        let mut player = PlayerState::default();
        let mut inventory = Inventory::default();
        inventory.add_item("mystery_goo", 1, 0);
        let (_, price) = sell_item(&prices, 0, &mut player, &mut inventory).unwrap();
        assert_eq!(price, 1);
        assert!(inventory.items.is_empty());
    }

    #[test]
    fn sell_rejects_out_of_range_slot() {
        let (_, _, prices) = fixtures();
        let mut player = PlayerState::default();
        let mut inventory = Inventory::default();
        assert_eq!(
            sell_item(&prices, 0, &mut player, &mut inventory),
            Err(ShopError::EmptySlot)
        );
        assert_eq!(player.money, PLAYER_START_MONEY);
    }
}
