//! Harvesting mature crops.

use bevy::prelude::*;
use rand::Rng;
use thiserror::Error;

use crate::shared::*;

/// Yield quantity range for a harvested crop.
const YIELD_RANGE: std::ops::RangeInclusive<u32> = 1..=3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HarvestError {
    #[error("no crop here")]
    NoCrop,
    #[error("not ready to harvest")]
    NotGrown,
}

/// Harvest the crop at `tile`. Succeeds exactly once per crop: the mature
/// crop is marked harvested and removed from the tile in the same step,
/// freeing the soil underneath. A failed attempt mutates nothing.
///
/// Yield quantity comes from the injected rng so tests can pin it.
pub fn harvest_at(
    farm: &mut FarmState,
    rng: &mut GameRng,
    tile: IVec2,
) -> Result<(ItemId, u32), HarvestError> {
    let crop = farm
        .crops
        .get_mut(&(tile.x, tile.y))
        .ok_or(HarvestError::NoCrop)?;
    if !crop.fully_grown || crop.harvested {
        return Err(HarvestError::NotGrown);
    }
    crop.harvested = true;
    let kind = crop.kind.clone();
    farm.crops.remove(&(tile.x, tile.y));

    let quantity = rng.0.gen_range(YIELD_RANGE);
    Ok((kind, quantity))
}

// ─────────────────────────────────────────────────────────────────────────────
// Systems
// ─────────────────────────────────────────────────────────────────────────────

/// Resolve harvest attempts; a successful one flows into the inventory
/// through the pickup path.
pub fn handle_harvest_attempt(
    mut harvest_events: EventReader<HarvestAttemptEvent>,
    mut farm: ResMut<FarmState>,
    mut rng: ResMut<GameRng>,
    mut pickup_writer: EventWriter<ItemPickupEvent>,
) {
    for event in harvest_events.read() {
        match harvest_at(&mut farm, &mut rng, event.tile) {
            Ok((kind, quantity)) => {
                info!("[Farming] Harvested {quantity} × {kind} at {:?}", event.tile);
                pickup_writer.send(ItemPickupEvent {
                    item_id: kind,
                    quantity,
                });
            }
            Err(_) => {
                // Frequent, expected outcome (walking around pressing
                // interact); not worth a toast.
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

    fn grown_crop() -> Crop {
        Crop {
            kind: "beans".into(),
            stage: 5,
            elapsed_growth: 600.0,
            fully_grown: true,
            harvested: false,
        }
    }

    #[test]
    fn harvest_succeeds_exactly_once() {
        let mut farm = FarmState::default();
        let mut rng = GameRng::seeded(7);
        farm.crops.insert((1, 1), grown_crop());

        let (kind, quantity) = harvest_at(&mut farm, &mut rng, IVec2::new(1, 1)).unwrap();
        assert_eq!(kind, "beans");
        assert!((1..=3).contains(&quantity));
        assert_eq!(
            harvest_at(&mut farm, &mut rng, IVec2::new(1, 1)),
            Err(HarvestError::NoCrop)
        );
    }

    #[test]
    fn harvest_rejects_immature_crop_without_mutation() {
        let mut farm = FarmState::default();
        let mut rng = GameRng::seeded(7);
        let mut crop = grown_crop();
        crop.fully_grown = false;
        crop.stage = 2;
        farm.crops.insert((0, 0), crop.clone());

        assert_eq!(
            harvest_at(&mut farm, &mut rng, IVec2::ZERO),
            Err(HarvestError::NotGrown)
        );
        assert_eq!(farm.crops[&(0, 0)], crop);
    }

    #[test]
    fn yield_is_deterministic_under_a_seed() {
        let mut farm_a = FarmState::default();
        let mut farm_b = FarmState::default();
        farm_a.crops.insert((0, 0), grown_crop());
        farm_b.crops.insert((0, 0), grown_crop());

        let mut rng_a = GameRng::seeded(1234);
        let mut rng_b = GameRng::seeded(1234);
        assert_eq!(
            harvest_at(&mut farm_a, &mut rng_a, IVec2::ZERO),
            harvest_at(&mut farm_b, &mut rng_b, IVec2::ZERO)
        );
    }

    #[test]
    fn harvest_frees_the_tile_for_replanting() {
        let mut farm = FarmState::default();
        let mut rng = GameRng::seeded(7);
        farm.soil.insert(
            (1, 1),
            SoilTile {
                tilled: true,
                watered: false,
            },
        );
        farm.crops.insert((1, 1), grown_crop());
        harvest_at(&mut farm, &mut rng, IVec2::new(1, 1)).unwrap();
        assert!(!farm.crops.contains_key(&(1, 1)));
        assert!(farm.soil[&(1, 1)].tilled);
    }
}
