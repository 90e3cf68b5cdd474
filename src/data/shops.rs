//! Shop catalog and sell-price table.

use crate::shared::*;

/// Buy listings, in display order: (item id, price).
const BUY_LISTINGS: [(&str, u32); 16] = [
    ("wood", 10),
    ("stone", 15),
    ("kale", 20),
    ("parsnips", 15),
    ("beans", 25),
    ("potatoes", 18),
    ("berries", 30),
    ("corn", 35),
    ("hotpeppers", 28),
    ("melon", 40),
    ("tomato", 32),
    ("artichoke", 38),
    ("beets", 22),
    ("cranberries", 35),
    ("pumpkin", 45),
    ("onion", 20),
];

/// What the shop pays per unit. Kinds not listed here sell for 1.
const SELL_PRICES: [(&str, u32); 16] = [
    ("wood", 5),
    ("stone", 7),
    ("kale", 10),
    ("parsnips", 7),
    ("beans", 12),
    ("potatoes", 9),
    ("berries", 15),
    ("corn", 17),
    ("hotpeppers", 14),
    ("melon", 20),
    ("tomato", 16),
    ("artichoke", 19),
    ("beets", 11),
    ("cranberries", 17),
    ("pumpkin", 22),
    ("onion", 10),
];

pub fn populate_shop(catalog: &mut ShopCatalog, prices: &mut PriceTable) {
    for (item_id, price) in BUY_LISTINGS {
        catalog.listings.push(ShopListing {
            item_id: item_id.to_string(),
            price,
        });
    }
    for (item_id, price) in SELL_PRICES {
        prices.sell_prices.insert(item_id.to_string(), price);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listing_can_also_be_sold_back_cheaper() {
        let mut catalog = ShopCatalog::default();
        let mut prices = PriceTable::default();
        populate_shop(&mut catalog, &mut prices);
        assert_eq!(catalog.listings.len(), 16);
        for listing in &catalog.listings {
            let sell = prices.sell_price(&listing.item_id);
            assert!(sell < listing.price, "{} resells at a profit", listing.item_id);
        }
    }

    #[test]
    fn unlisted_kinds_sell_for_one() {
        let mut catalog = ShopCatalog::default();
        let mut prices = PriceTable::default();
        populate_shop(&mut catalog, &mut prices);
        assert_eq!(prices.sell_price("weird_trinket"), 1);
    }
}
