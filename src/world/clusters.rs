//! Tree-fragment clustering.
//!
//! Map authors paint trees as loose tile-sized fragments. At setup time,
//! fragments within a fixed radius of each other are unioned by repeated
//! nearest-neighbor absorption into connected components; a component
//! becomes one logical tree only when its fragment count falls inside the
//! configured band — smaller or larger groups are authoring noise.
//! The input is sorted by (y, x) first so the result is deterministic for
//! a given map.

use bevy::prelude::*;

use super::TreeFragment;
use crate::shared::*;

/// Padding added around a cluster's fragment bounds.
const CLUSTER_PADDING: f32 = 10.0;
/// A merged tree is never smaller than this footprint.
const MIN_TREE_SIZE: Vec2 = Vec2::new(50.0, 70.0);

#[derive(Debug, Clone, PartialEq)]
pub struct TreeCluster {
    pub bounds: Rect,
    pub fragment_count: usize,
}

pub fn cluster_tree_fragments(fragments: &[TreeFragment]) -> Vec<TreeCluster> {
    let mut sorted: Vec<TreeFragment> = fragments.to_vec();
    sorted.sort_by(|a, b| {
        (a.y, a.x)
            .partial_cmp(&(b.y, b.x))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut used = vec![false; sorted.len()];
    let mut clusters = Vec::new();

    for start in 0..sorted.len() {
        if used[start] {
            continue;
        }
        used[start] = true;
        let mut component = vec![sorted[start]];

        // Absorb any unused fragment within radius of the component,
        // repeating until the component stops growing.
        let mut grew = true;
        while grew {
            grew = false;
            for (candidate_idx, candidate) in sorted.iter().enumerate() {
                if used[candidate_idx] {
                    continue;
                }
                let close = component.iter().any(|member| {
                    let dx = member.x - candidate.x;
                    let dy = member.y - candidate.y;
                    (dx * dx + dy * dy).sqrt() < CLUSTER_RADIUS_PX
                });
                if close {
                    component.push(*candidate);
                    used[candidate_idx] = true;
                    grew = true;
                }
            }
        }

        if (CLUSTER_MIN_FRAGMENTS..=CLUSTER_MAX_FRAGMENTS).contains(&component.len()) {
            clusters.push(TreeCluster {
                bounds: component_bounds(&component),
                fragment_count: component.len(),
            });
        }
    }

    clusters
}

fn component_bounds(component: &[TreeFragment]) -> Rect {
    let min_x = component.iter().map(|f| f.x).fold(f32::INFINITY, f32::min);
    let min_y = component.iter().map(|f| f.y).fold(f32::INFINITY, f32::min);
    let max_x = component
        .iter()
        .map(|f| f.x + f.width)
        .fold(f32::NEG_INFINITY, f32::max);
    let max_y = component
        .iter()
        .map(|f| f.y + f.height)
        .fold(f32::NEG_INFINITY, f32::max);

    let width = (max_x - min_x + CLUSTER_PADDING).max(MIN_TREE_SIZE.x);
    let height = (max_y - min_y + CLUSTER_PADDING).max(MIN_TREE_SIZE.y);
    let center = Vec2::new(min_x + (max_x - min_x) / 2.0, min_y + (max_y - min_y) / 2.0);
    Rect::from_center_size(center, Vec2::new(width, height))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// A tight 4x3 block of fragments on a 16px grid, all within 32px of
    /// a neighbor, 12 fragments total.
    fn tree_block(origin_x: f32, origin_y: f32) -> Vec<TreeFragment> {
        let mut fragments = Vec::new();
        for row in 0..3 {
            for col in 0..4 {
                fragments.push(TreeFragment::new(
                    origin_x + col as f32 * 16.0,
                    origin_y + row as f32 * 16.0,
                ));
            }
        }
        fragments
    }

    #[test]
    fn block_of_twelve_becomes_one_tree() {
        let clusters = cluster_tree_fragments(&tree_block(100.0, 100.0));
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].fragment_count, 12);
    }

    #[test]
    fn far_apart_blocks_become_separate_trees() {
        let mut fragments = tree_block(0.0, 0.0);
        fragments.extend(tree_block(500.0, 500.0));
        let clusters = cluster_tree_fragments(&fragments);
        assert_eq!(clusters.len(), 2);
    }

    #[test]
    fn undersized_components_are_discarded_as_noise() {
        // 3 fragments, below the band.
        let fragments = vec![
            TreeFragment::new(0.0, 0.0),
            TreeFragment::new(16.0, 0.0),
            TreeFragment::new(0.0, 16.0),
        ];
        assert!(cluster_tree_fragments(&fragments).is_empty());
    }

    #[test]
    fn oversized_components_are_discarded_as_noise() {
        // 20 fragments in one chain, above the band.
        let fragments: Vec<TreeFragment> =
            (0..20).map(|i| TreeFragment::new(i as f32 * 16.0, 0.0)).collect();
        assert!(cluster_tree_fragments(&fragments).is_empty());
    }

    #[test]
    fn clustering_is_deterministic_under_input_shuffles() {
        let fragments = tree_block(64.0, 64.0);
        let mut reversed = fragments.clone();
        reversed.reverse();
        assert_eq!(
            cluster_tree_fragments(&fragments),
            cluster_tree_fragments(&reversed)
        );
    }

    #[test]
    fn bounds_honor_padding_and_minimum_size() {
        let clusters = cluster_tree_fragments(&tree_block(100.0, 100.0));
        let bounds = clusters[0].bounds;
        // 4x3 block of 16px fragments = 64x48 raw; padded to 74x58, then
        // clamped to the 50x70 minimum on the short axis.
        assert!((bounds.width() - 74.0).abs() < 1e-3);
        assert!((bounds.height() - 70.0).abs() < 1e-3);
    }
}
