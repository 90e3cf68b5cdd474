//! Crop catalog.
//!
//! Growth times are authored in in-game hours and stored as in-game
//! seconds; every crop renders through six growth stages (0–5).

use crate::shared::*;

const STAGES: u8 = 6;

/// (id, display name, growth time in in-game hours)
const CROPS: [(&str, &str, f32); 14] = [
    ("artichoke", "Artichoke", 8.0),
    ("beans", "Beans", 10.0),
    ("beets", "Beets", 6.0),
    ("berries", "Berries", 13.0),
    ("corn", "Corn", 14.0),
    ("cranberries", "Cranberries", 7.0),
    ("hotpeppers", "Hot Peppers", 5.0),
    ("kale", "Kale", 6.0),
    ("melon", "Melon", 12.0),
    ("onion", "Onion", 7.0),
    ("parsnips", "Parsnips", 4.0),
    ("potatoes", "Potatoes", 6.0),
    ("pumpkin", "Pumpkin", 13.0),
    ("tomato", "Tomato", 11.0),
];

pub fn populate_crops(registry: &mut CropRegistry) {
    for (id, name, hours) in CROPS {
        registry.crops.insert(
            id.to_string(),
            CropDef {
                id: id.to_string(),
                name: name.to_string(),
                growth_time: hours * TIME_RATE,
                stages: STAGES,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_crop_is_registered_with_positive_growth() {
        let mut registry = CropRegistry::default();
        populate_crops(&mut registry);
        assert_eq!(registry.crops.len(), 14);
        for def in registry.crops.values() {
            assert!(def.growth_time > 0.0);
            assert_eq!(def.stages, STAGES);
        }
    }

    #[test]
    fn parsnips_are_the_fastest_crop() {
        let mut registry = CropRegistry::default();
        populate_crops(&mut registry);
        let fastest = registry
            .crops
            .values()
            .min_by(|a, b| a.growth_time.total_cmp(&b.growth_time))
            .unwrap();
        assert_eq!(fastest.id, "parsnips");
    }
}
