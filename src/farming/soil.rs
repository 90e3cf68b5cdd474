//! Soil tilling and watering.

use bevy::prelude::*;

use crate::shared::*;

/// Outcome of a till action. Tilling never fails: the player's intent is
/// "tilled soil here", which always holds afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TillOutcome {
    Created,
    Tilled,
    AlreadyTilled,
}

/// Till the soil at `tile`: till an existing untilled tile, create an
/// already-tilled one where none exists, and no-op (still success) on a
/// tile that is already tilled. The map key guarantees at most one
/// `SoilTile` per coordinate.
pub fn till_at(farm: &mut FarmState, tile: IVec2) -> TillOutcome {
    match farm.soil.get_mut(&(tile.x, tile.y)) {
        Some(soil) if soil.tilled => TillOutcome::AlreadyTilled,
        Some(soil) => {
            soil.tilled = true;
            TillOutcome::Tilled
        }
        None => {
            farm.soil.insert(
                (tile.x, tile.y),
                SoilTile {
                    tilled: true,
                    watered: false,
                },
            );
            TillOutcome::Created
        }
    }
}

/// Mark the soil tile containing `point` as watered. Returns false when
/// no soil tile exists there. Watered state is carried and persisted but
/// currently has no growth effect.
pub fn water_at(farm: &mut FarmState, point: Vec2) -> bool {
    let tile = super::tile_of(point);
    match farm.soil.get_mut(&(tile.x, tile.y)) {
        Some(soil) => {
            soil.watered = true;
            true
        }
        None => false,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Systems
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_hoe_tool_use(
    mut tool_events: EventReader<ToolUseEvent>,
    mut farm: ResMut<FarmState>,
) {
    for event in tool_events.read() {
        if event.tool != ToolKind::Hoe {
            continue;
        }
        let outcome = till_at(&mut farm, event.target_tile);
        info!(
            "[Farming] Hoe on {:?}: {:?}",
            event.target_tile, outcome
        );
    }
}

pub fn handle_watering_can_tool_use(
    mut tool_events: EventReader<ToolUseEvent>,
    mut farm: ResMut<FarmState>,
    mut toast_writer: EventWriter<ToastEvent>,
) {
    for event in tool_events.read() {
        if event.tool != ToolKind::WateringCan {
            continue;
        }
        let target = super::tile_rect(event.target_tile).center();
        if !water_at(&mut farm, target) {
            toast_writer.send(ToastEvent {
                message: "Nothing to water here".to_string(),
                duration_secs: 2.0,
            });
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn till_creates_already_tilled_tile() {
        let mut farm = FarmState::default();
        assert_eq!(till_at(&mut farm, IVec2::new(3, 4)), TillOutcome::Created);
        let soil = farm.soil[&(3, 4)];
        assert!(soil.tilled);
        assert!(!soil.watered);
    }

    #[test]
    fn till_is_idempotent() {
        let mut farm = FarmState::default();
        till_at(&mut farm, IVec2::new(1, 1));
        assert_eq!(
            till_at(&mut farm, IVec2::new(1, 1)),
            TillOutcome::AlreadyTilled
        );
        assert_eq!(farm.soil.len(), 1);
        assert!(farm.soil[&(1, 1)].tilled);
    }

    #[test]
    fn till_upgrades_existing_untilled_tile() {
        let mut farm = FarmState::default();
        farm.soil.insert((0, 0), SoilTile::default());
        assert_eq!(till_at(&mut farm, IVec2::ZERO), TillOutcome::Tilled);
        assert_eq!(farm.soil.len(), 1);
    }

    #[test]
    fn water_requires_a_soil_tile() {
        let mut farm = FarmState::default();
        assert!(!water_at(&mut farm, Vec2::new(16.0, 16.0)));
        till_at(&mut farm, IVec2::ZERO);
        assert!(water_at(&mut farm, Vec2::new(16.0, 16.0)));
        assert!(farm.soil[&(0, 0)].watered);
    }
}
