//! Crop planting and growth.

use bevy::prelude::*;
use thiserror::Error;

use crate::shared::*;

/// Why a plant action was refused. These are expected, user-facing
/// outcomes; the world is left untouched in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlantError {
    #[error("there is no soil here")]
    NoSoil,
    #[error("the soil is not tilled")]
    NotTilled,
    #[error("something is already growing here")]
    Occupied,
    #[error("unknown crop kind")]
    UnknownCrop,
}

/// Plant `seed_id` at `tile`. Succeeds only on a tilled soil tile with no
/// live crop; seed ids double as crop ids in the catalog.
pub fn plant_crop(
    farm: &mut FarmState,
    registry: &CropRegistry,
    tile: IVec2,
    seed_id: &str,
) -> Result<(), PlantError> {
    if registry.get(seed_id).is_none() {
        return Err(PlantError::UnknownCrop);
    }
    let soil = farm
        .soil
        .get(&(tile.x, tile.y))
        .ok_or(PlantError::NoSoil)?;
    if !soil.tilled {
        return Err(PlantError::NotTilled);
    }
    if farm.crops.contains_key(&(tile.x, tile.y)) {
        return Err(PlantError::Occupied);
    }
    farm.crops.insert((tile.x, tile.y), Crop::new(seed_id));
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Systems
// ─────────────────────────────────────────────────────────────────────────────

/// Listen for PlantSeedEvent, plant, and consume one seed from the slot it
/// came from. Failures surface as a toast and change nothing.
pub fn handle_plant_seed(
    mut plant_events: EventReader<PlantSeedEvent>,
    mut farm: ResMut<FarmState>,
    mut inventory: ResMut<Inventory>,
    registry: Res<CropRegistry>,
    mut toast_writer: EventWriter<ToastEvent>,
) {
    for event in plant_events.read() {
        match plant_crop(&mut farm, &registry, event.tile, &event.seed_id) {
            Ok(()) => {
                inventory.remove_item(event.slot_index, 1);
                info!("[Farming] Planted {} at {:?}", event.seed_id, event.tile);
            }
            Err(err) => {
                toast_writer.send(ToastEvent {
                    message: format!("Cannot plant here: {err}"),
                    duration_secs: 2.0,
                });
            }
        }
    }
}

/// Advance every crop once per frame by clock-scaled delta time.
pub fn tick_crop_growth(
    time: Res<Time>,
    mut farm: ResMut<FarmState>,
    registry: Res<CropRegistry>,
) {
    let delta = time.delta_secs() * TIME_RATE;
    for crop in farm.crops.values_mut() {
        if let Some(def) = registry.get(&crop.kind) {
            crop.advance(delta, def);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::farming::soil::till_at;

    fn registry() -> CropRegistry {
        let mut registry = CropRegistry::default();
        registry.crops.insert(
            "beans".into(),
            CropDef {
                id: "beans".into(),
                name: "Beans".into(),
                growth_time: 600.0,
                stages: 6,
            },
        );
        registry
    }

    #[test]
    fn plant_requires_tilled_soil() {
        let mut farm = FarmState::default();
        let registry = registry();
        let tile = IVec2::new(2, 2);

        assert_eq!(
            plant_crop(&mut farm, &registry, tile, "beans"),
            Err(PlantError::NoSoil)
        );

        farm.soil.insert((2, 2), SoilTile::default());
        assert_eq!(
            plant_crop(&mut farm, &registry, tile, "beans"),
            Err(PlantError::NotTilled)
        );
        assert!(farm.crops.is_empty());

        till_at(&mut farm, tile);
        assert_eq!(plant_crop(&mut farm, &registry, tile, "beans"), Ok(()));
    }

    #[test]
    fn plant_rejects_occupied_tile() {
        let mut farm = FarmState::default();
        let registry = registry();
        let tile = IVec2::new(0, 0);
        till_at(&mut farm, tile);
        plant_crop(&mut farm, &registry, tile, "beans").unwrap();
        assert_eq!(
            plant_crop(&mut farm, &registry, tile, "beans"),
            Err(PlantError::Occupied)
        );
        assert_eq!(farm.crops.len(), 1);
    }

    #[test]
    fn plant_rejects_unknown_kind() {
        let mut farm = FarmState::default();
        let registry = registry();
        let tile = IVec2::new(0, 0);
        till_at(&mut farm, tile);
        assert_eq!(
            plant_crop(&mut farm, &registry, tile, "moonfruit"),
            Err(PlantError::UnknownCrop)
        );
        assert!(farm.crops.is_empty());
    }

    #[test]
    fn growth_is_monotonic_across_arbitrary_deltas() {
        let registry = registry();
        let def = registry.get("beans").unwrap();
        let mut crop = Crop::new("beans");
        let mut last_stage = 0;
        for delta in [1.0, 37.5, 0.25, 120.0, 99.0, 150.0] {
            crop.advance(delta, def);
            assert!(crop.stage >= last_stage);
            last_stage = crop.stage;
        }
    }

    #[test]
    fn fully_grown_exactly_at_total_time() {
        let registry = registry();
        let def = registry.get("beans").unwrap();
        let mut crop = Crop::new("beans");
        crop.advance(599.9, def);
        assert!(!crop.fully_grown);
        crop.advance(0.1, def);
        assert!(crop.fully_grown);
        assert_eq!(crop.stage, def.stages - 1);
    }
}
