//! Farming domain — tile math, soil tilling/watering, planting, crop
//! growth, harvest.
//!
//! Communicates with other domains exclusively through crate::shared
//! events/resources.

use bevy::prelude::*;

use crate::shared::*;

mod crops;
mod harvest;
mod soil;

pub use crops::{plant_crop, PlantError};
pub use harvest::{harvest_at, HarvestError};
pub use soil::{till_at, water_at, TillOutcome};

pub struct FarmingPlugin;

impl Plugin for FarmingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                soil::handle_hoe_tool_use,
                soil::handle_watering_can_tool_use,
                crops::handle_plant_seed,
                crops::tick_crop_growth,
                harvest::handle_harvest_attempt,
            )
                .run_if(in_state(GameState::Playing)),
        );
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tile math
// ─────────────────────────────────────────────────────────────────────────────

/// Tile coordinate containing a pixel position (floor division).
pub fn tile_of(pixel: Vec2) -> IVec2 {
    IVec2::new(
        (pixel.x / TILE_SIZE).floor() as i32,
        (pixel.y / TILE_SIZE).floor() as i32,
    )
}

/// The tile one step ahead of `pixel` in the given direction.
pub fn tile_in_front(pixel: Vec2, facing: Facing) -> IVec2 {
    tile_of(pixel) + facing.offset()
}

/// Pixel rect covered by a tile. Used as the chop/break target area.
pub fn tile_rect(tile: IVec2) -> Rect {
    let min = Vec2::new(tile.x as f32 * TILE_SIZE, tile.y as f32 * TILE_SIZE);
    Rect::from_corners(min, min + Vec2::splat(TILE_SIZE))
}

/// World-space pixel position of a tile's top-left corner.
pub fn tile_to_world(tile: IVec2) -> Vec2 {
    Vec2::new(tile.x as f32 * TILE_SIZE, tile.y as f32 * TILE_SIZE)
}

// ─────────────────────────────────────────────────────────────────────────────
// Placeholder colors: deterministic fallbacks when atlases are missing
// ─────────────────────────────────────────────────────────────────────────────

pub fn soil_color(tile: SoilTile) -> Color {
    match (tile.tilled, tile.watered) {
        (true, true) => Color::srgb(0.30, 0.22, 0.15),
        (true, false) => Color::srgb(0.45, 0.32, 0.20),
        _ => Color::srgb(0.55, 0.42, 0.28),
    }
}

/// Lerp from pale seedling green to a ripe tone across the stage range.
pub fn crop_stage_color(stage: u8, total_stages: u8) -> Color {
    let last = total_stages.saturating_sub(1).max(1) as f32;
    let progress = (stage as f32 / last).clamp(0.0, 1.0);
    Color::srgb(
        0.5 * (1.0 - progress) + 0.2 * progress,
        0.65 + 0.15 * progress,
        0.2 * (1.0 - progress),
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_of_floors_toward_negative() {
        assert_eq!(tile_of(Vec2::new(0.0, 0.0)), IVec2::new(0, 0));
        assert_eq!(tile_of(Vec2::new(31.9, 31.9)), IVec2::new(0, 0));
        assert_eq!(tile_of(Vec2::new(32.0, 64.0)), IVec2::new(1, 2));
        assert_eq!(tile_of(Vec2::new(-0.1, -33.0)), IVec2::new(-1, -2));
    }

    #[test]
    fn tile_in_front_follows_facing() {
        let center = Vec2::new(48.0, 48.0); // tile (1, 1)
        assert_eq!(tile_in_front(center, Facing::Up), IVec2::new(1, 0));
        assert_eq!(tile_in_front(center, Facing::Down), IVec2::new(1, 2));
        assert_eq!(tile_in_front(center, Facing::Left), IVec2::new(0, 1));
        assert_eq!(tile_in_front(center, Facing::Right), IVec2::new(2, 1));
    }

    #[test]
    fn tile_in_front_accepts_normalized_statuses() {
        let center = Vec2::new(48.0, 48.0);
        let facing = Facing::from_status("leftAxe");
        assert_eq!(tile_in_front(center, facing), IVec2::new(0, 1));
    }

    #[test]
    fn tile_rect_spans_one_tile() {
        let rect = tile_rect(IVec2::new(2, 3));
        assert_eq!(rect.min, Vec2::new(64.0, 96.0));
        assert_eq!(rect.max, Vec2::new(96.0, 128.0));
    }
}
