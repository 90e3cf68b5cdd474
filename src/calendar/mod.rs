//! Calendar domain — the heartbeat of Witherford.
//!
//! Responsible for:
//! - Advancing in-game time from real delta-seconds (`TIME_RATE` scale)
//! - Day rollover (remainder-preserving) and season rollover every 28 days
//! - Sending DayEndEvent and SeasonChangeEvent
//! - The one-shot 07:00 autosave trigger (armed/disarmed on the boundary)
//! - Deriving the day/night tint band for the external renderer
//! - Pausing time outside the Playing state

use bevy::prelude::*;

use crate::shared::*;

pub struct CalendarPlugin;

impl Plugin for CalendarPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (tick_clock, update_day_night_tint)
                .chain()
                .run_if(in_state(GameState::Playing)),
        );
    }
}

/// What a single clock advance did. Returned by `advance_clock` so both
/// the tick system and tests can assert on it directly.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClockAdvance {
    pub days_rolled: u32,
    pub season_changed: bool,
    pub autosave: bool,
}

/// Advance the clock by `real_delta` real seconds.
///
/// Rollover subtracts `DAY_LENGTH` rather than zeroing, so time past the
/// boundary carries into the new day; day increment and time reset happen
/// in the same step. Season advances when `day_count` reaches a multiple
/// of 28. The autosave flag fires once when the clock sits on the 07:00
/// minute and re-arms as soon as it leaves it, and also on day rollover.
pub fn advance_clock(clock: &mut GameClock, real_delta: f32) -> ClockAdvance {
    let mut advance = ClockAdvance::default();
    clock.current_time += real_delta * TIME_RATE;

    while clock.current_time >= DAY_LENGTH {
        clock.current_time -= DAY_LENGTH;
        clock.day_count += 1;
        advance.days_rolled += 1;
        if clock.day_count % DAYS_PER_SEASON == 0 {
            clock.season = clock.season.next();
            advance.season_changed = true;
        }
    }

    let on_trigger_minute = clock.hour() == AUTOSAVE_HOUR && clock.minute() == 0;
    if on_trigger_minute {
        if clock.autosave_armed {
            clock.autosave_armed = false;
            advance.autosave = true;
        }
    } else {
        clock.autosave_armed = true;
    }

    // A finished day is itself a save point.
    if advance.days_rolled > 0 {
        advance.autosave = true;
    }

    advance
}

fn tick_clock(
    time: Res<Time>,
    mut clock: ResMut<GameClock>,
    mut day_end_writer: EventWriter<DayEndEvent>,
    mut season_writer: EventWriter<SeasonChangeEvent>,
    mut autosave_writer: EventWriter<AutosaveEvent>,
) {
    let advance = advance_clock(&mut clock, time.delta_secs());

    if advance.days_rolled > 0 {
        info!(
            "[Calendar] Day ended — now {} ({})",
            clock.day_string(),
            clock.time_string()
        );
        day_end_writer.send(DayEndEvent {
            day_count: clock.day_count,
            season: clock.season,
        });
    }

    if advance.season_changed {
        info!("[Calendar] Season changed to {:?}", clock.season);
        season_writer.send(SeasonChangeEvent {
            new_season: clock.season,
        });
    }

    if advance.autosave {
        autosave_writer.send(AutosaveEvent);
    }
}

// ─── Day/night tint ──────────────────────────────────────────────────────────

/// Tint band for an hour of day. Presentation data only; the renderer
/// composites it, the simulation never reads it back.
///
/// Night  (20:00–04:00): dark blue, alpha 180/255
/// Dawn   (04:00–06:00): orange, alpha fading 100 → 0
/// Dusk   (18:00–20:00): purple, alpha rising 0 → 120
/// Day    (06:00–18:00): fully transparent
pub fn time_of_day_tint(hour: u32) -> Color {
    if hour >= 20 || hour < 4 {
        Color::srgba_u8(25, 25, 50, 180)
    } else if hour < 6 {
        let progress = (hour - 4) as f32 / 2.0;
        let alpha = (100.0 * (1.0 - progress)) / 255.0;
        Color::srgba(1.0, 150.0 / 255.0, 50.0 / 255.0, alpha)
    } else if hour >= 18 {
        let progress = (hour - 18) as f32 / 2.0;
        let alpha = (120.0 * progress) / 255.0;
        Color::srgba(150.0 / 255.0, 75.0 / 255.0, 100.0 / 255.0, alpha)
    } else {
        Color::NONE
    }
}

fn update_day_night_tint(clock: Res<GameClock>, mut tint: ResMut<DayNightTint>) {
    tint.color = time_of_day_tint(clock.hour());
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn clock_at(game_seconds: f32) -> GameClock {
        GameClock {
            current_time: game_seconds,
            ..Default::default()
        }
    }

    #[test]
    fn advance_accumulates_scaled_time() {
        let mut clock = clock_at(0.0);
        let advance = advance_clock(&mut clock, 1.0);
        assert_eq!(clock.current_time, TIME_RATE);
        assert_eq!(advance.days_rolled, 0);
        assert_eq!(clock.hour(), 1);
        assert_eq!(clock.minute(), 0);
    }

    #[test]
    fn rollover_preserves_remainder() {
        let mut clock = clock_at(0.0);
        clock.day_count = 3;
        // One day plus 42 game-seconds, in a single call.
        let advance = advance_clock(&mut clock, (DAY_LENGTH + 42.0) / TIME_RATE);
        assert_eq!(advance.days_rolled, 1);
        assert_eq!(clock.day_count, 4);
        assert!((clock.current_time - 42.0).abs() < 1e-3);
    }

    #[test]
    fn rollover_accumulates_across_calls() {
        let mut clock = clock_at(0.0);
        let step = DAY_LENGTH / TIME_RATE / 10.0;
        let mut rolled = 0;
        for _ in 0..10 {
            rolled += advance_clock(&mut clock, step).days_rolled;
        }
        // Float accumulation may leave the clock a hair shy of the
        // boundary, but never past it twice.
        assert!(rolled <= 1);
        assert!(clock.current_time < DAY_LENGTH);
    }

    #[test]
    fn season_advances_every_28_days() {
        let mut clock = clock_at(0.0);
        assert_eq!(clock.season, Season::Spring);
        let advance = advance_clock(&mut clock, 28.0 * DAY_LENGTH / TIME_RATE);
        assert_eq!(advance.days_rolled, 28);
        assert!(advance.season_changed);
        assert_eq!(clock.season, Season::Summer);
        assert_eq!(clock.day_count, 29);
    }

    #[test]
    fn season_steps_exactly_once_per_28_days() {
        let mut clock = clock_at(0.0);
        let mut changes = 0;
        for _ in 0..56 {
            if advance_clock(&mut clock, DAY_LENGTH / TIME_RATE).season_changed {
                changes += 1;
            }
        }
        assert_eq!(changes, 2);
        assert_eq!(clock.season, Season::Autumn);
    }

    #[test]
    fn autosave_fires_once_at_seven() {
        let mut clock = clock_at(6.0 * TIME_RATE + 59.0);
        // Step onto 07:00.
        let advance = advance_clock(&mut clock, 1.5 / TIME_RATE);
        let mut fired = advance.autosave;
        // Sit inside the 07:00 minute for a while; must not re-fire.
        for _ in 0..20 {
            let a = advance_clock(&mut clock, 1.0 / TIME_RATE);
            if clock.hour() == AUTOSAVE_HOUR && clock.minute() == 0 {
                assert!(!a.autosave || !fired, "autosave re-fired inside the boundary minute");
                fired |= a.autosave;
            }
        }
        assert!(fired, "autosave never fired while crossing 07:00");
    }

    #[test]
    fn autosave_rearms_after_leaving_the_boundary() {
        let mut clock = clock_at(7.0 * TIME_RATE);
        let first = advance_clock(&mut clock, 0.0);
        assert!(first.autosave);
        // Leave 07:00, come back next day.
        advance_clock(&mut clock, 60.0 / TIME_RATE);
        assert!(clock.autosave_armed);
        let next_day = advance_clock(&mut clock, DAY_LENGTH / TIME_RATE);
        assert!(next_day.autosave); // day rollover is itself a save point
    }

    #[test]
    fn tint_bands() {
        assert_eq!(time_of_day_tint(12), Color::NONE);
        assert_eq!(time_of_day_tint(22), Color::srgba_u8(25, 25, 50, 180));
        assert_eq!(time_of_day_tint(2), Color::srgba_u8(25, 25, 50, 180));
        // Dawn fades out, dusk fades in.
        assert!(time_of_day_tint(4).alpha() > time_of_day_tint(5).alpha());
        assert!(time_of_day_tint(19).alpha() > time_of_day_tint(18).alpha());
    }

    #[test]
    fn clock_strings() {
        let clock = clock_at(7.0 * TIME_RATE + 5.0);
        assert_eq!(clock.time_string(), "07:05");
        assert_eq!(clock.day_string(), "Day 1 - Spring");
    }
}
