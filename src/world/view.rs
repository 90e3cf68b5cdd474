//! Camera offset and draw ordering for the external renderer.
//!
//! The core computes *where* the viewport sits and *in what order*
//! entities should be drawn; pixels are someone else's problem.

use bevy::prelude::*;

/// Top-left offset of the viewport: the anchor centered, clamped so the
/// view never leaves the world. When the world is smaller than the
/// viewport on an axis the offset degenerates to 0; the clamp range must
/// never invert.
pub fn camera_offset(anchor: Vec2, viewport_size: Vec2, world_size: Vec2) -> Vec2 {
    let raw = anchor - viewport_size / 2.0;
    let limit = (world_size - viewport_size).max(Vec2::ZERO);
    raw.clamp(Vec2::ZERO, limit)
}

/// Sort key for drawables: layer first, then y-position for pseudo-depth
/// within a layer (an entity lower on screen draws in front). Chosen once
/// and used everywhere, never y alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DrawKey {
    pub layer: i32,
    pub y_px: i32,
}

pub fn draw_key(layer: i32, position_y: f32) -> DrawKey {
    DrawKey {
        layer,
        y_px: position_y.round() as i32,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::{LAYER_CROPS, LAYER_MAIN, LAYER_SOIL};

    const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

    #[test]
    fn offset_centers_the_anchor() {
        let world = Vec2::new(4000.0, 4000.0);
        let offset = camera_offset(Vec2::new(2000.0, 2000.0), VIEWPORT, world);
        assert_eq!(offset, Vec2::new(2000.0 - 640.0, 2000.0 - 360.0));
    }

    #[test]
    fn offset_clamps_to_world_edges() {
        let world = Vec2::new(4000.0, 4000.0);
        assert_eq!(camera_offset(Vec2::new(10.0, 10.0), VIEWPORT, world), Vec2::ZERO);
        assert_eq!(
            camera_offset(Vec2::new(3990.0, 3990.0), VIEWPORT, world),
            world - VIEWPORT
        );
    }

    #[test]
    fn offset_degenerates_when_world_fits_in_viewport() {
        let world = Vec2::new(800.0, 600.0);
        assert_eq!(
            camera_offset(Vec2::new(400.0, 300.0), VIEWPORT, world),
            Vec2::ZERO
        );
    }

    #[test]
    fn draw_order_is_layer_then_y() {
        let mut keys = vec![
            draw_key(LAYER_MAIN, 10.0),
            draw_key(LAYER_SOIL, 500.0),
            draw_key(LAYER_MAIN, 5.0),
            draw_key(LAYER_CROPS, 0.0),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![
                draw_key(LAYER_SOIL, 500.0),
                draw_key(LAYER_CROPS, 0.0),
                draw_key(LAYER_MAIN, 5.0),
                draw_key(LAYER_MAIN, 10.0),
            ]
        );
    }
}
