//! Money statistics.
//!
//! Transactions mutate `PlayerState::money` directly at the point of
//! sale; `GoldChangeEvent` is the informational trail this system folds
//! into running totals.

use bevy::prelude::*;

use crate::shared::*;

#[derive(Resource, Debug, Clone, Default)]
pub struct EconomyStats {
    pub total_earned: u64,
    pub total_spent: u64,
    pub total_transactions: u64,
}

pub fn track_gold_changes(
    mut gold_events: EventReader<GoldChangeEvent>,
    mut stats: ResMut<EconomyStats>,
) {
    for event in gold_events.read() {
        if event.amount >= 0 {
            stats.total_earned = stats.total_earned.saturating_add(event.amount as u64);
        } else {
            stats.total_spent = stats.total_spent.saturating_add((-event.amount) as u64);
        }
        stats.total_transactions += 1;
        info!(
            "[Economy] {}{}g: {}",
            if event.amount >= 0 { "+" } else { "-" },
            event.amount.abs(),
            event.reason
        );
    }
}
