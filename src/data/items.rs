//! Item catalog — seeds, materials, tools.

use crate::shared::*;

/// (id, display name, category). Atlas icon indices are assigned from
/// the array position, offset past the placeholder at index 0.
const ITEMS: [(&str, &str, ItemCategory); 18] = [
    ("artichoke", "Artichoke", ItemCategory::Seed),
    ("beans", "Beans", ItemCategory::Seed),
    ("beets", "Beets", ItemCategory::Seed),
    ("berries", "Berries", ItemCategory::Seed),
    ("corn", "Corn", ItemCategory::Seed),
    ("cranberries", "Cranberries", ItemCategory::Seed),
    ("hotpeppers", "Hot Peppers", ItemCategory::Seed),
    ("kale", "Kale", ItemCategory::Seed),
    ("melon", "Melon", ItemCategory::Seed),
    ("onion", "Onion", ItemCategory::Seed),
    ("parsnips", "Parsnips", ItemCategory::Seed),
    ("potatoes", "Potatoes", ItemCategory::Seed),
    ("pumpkin", "Pumpkin", ItemCategory::Seed),
    ("tomato", "Tomato", ItemCategory::Seed),
    ("wood", "Wood", ItemCategory::Material),
    ("stone", "Stone", ItemCategory::Material),
    ("wateringCan", "Watering Can", ItemCategory::Tool),
    ("axe", "Axe", ItemCategory::Tool),
];

pub fn populate_items(registry: &mut ItemRegistry) {
    for (index, (id, name, category)) in ITEMS.iter().enumerate() {
        registry.items.insert(
            id.to_string(),
            ItemDef {
                id: id.to_string(),
                name: name.to_string(),
                category: *category,
                icon_index: index as u32 + 1,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_materials_and_unique_icons() {
        let mut registry = ItemRegistry::default();
        populate_items(&mut registry);
        assert_eq!(registry.items.len(), 18);
        assert_eq!(
            registry.get("wood").unwrap().category,
            ItemCategory::Material
        );
        let mut icons: Vec<u32> = registry.items.values().map(|def| def.icon_index).collect();
        icons.sort();
        icons.dedup();
        assert_eq!(icons.len(), 18);
        // Index 0 is reserved for the missing-asset placeholder.
        assert!(!icons.contains(&PLACEHOLDER_ICON_INDEX));
    }

    #[test]
    fn unknown_items_fall_back_to_the_placeholder_icon() {
        let mut registry = ItemRegistry::default();
        populate_items(&mut registry);
        assert_eq!(
            registry.icon_or_placeholder("not_an_item"),
            PLACEHOLDER_ICON_INDEX
        );
    }
}
