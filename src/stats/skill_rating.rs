use std::collections::HashMap;

use log::debug;

use super::ranking::rank_night;
use super::types::{RatingValue, SkillRatingRow};
use crate::config::settings::AnalyticsSettings;
use crate::domain::{group_by_night, FlatRow, PlayerId};

struct RatingState {
    name: String,
    rating: RatingValue,
    nights_rated: u32,
}

/// Sequential night-by-night rating, folded over the snapshot in chronological order.
///
/// A player finishing at rank `r` of `n` is expected to score `1 - (r - 1) / n`;
/// the actual score is 1 for a profit, 0 for a loss and 0.5 for breakeven.
/// The expectation is a rank fraction rather than a pairwise comparison, so
/// rating points are not conserved across a night.
///
/// `recent_nights` controls `recent_change`: the difference between the
/// final rating and the rating held before the last `recent_nights` nights.
pub fn calculate_skill_ratings(
    rows: &[FlatRow],
    settings: &AnalyticsSettings,
    recent_nights: usize,
) -> Vec<SkillRatingRow> {
    let nights = group_by_night(rows);
    let recent_start = nights.len().saturating_sub(recent_nights);

    let mut states: HashMap<PlayerId, RatingState> = HashMap::new();
    let mut baseline: HashMap<PlayerId, RatingValue> = HashMap::new();

    for (idx, night) in nights.iter().enumerate() {
        if idx == recent_start {
            baseline = states.iter().map(|(&id, s)| (id, s.rating)).collect();
        }
        rate_night(night, &mut states, settings);
    }
    if recent_start == nights.len() {
        baseline = states.iter().map(|(&id, s)| (id, s.rating)).collect();
    }

    debug!("Rated {} players over {} nights", states.len(), nights.len());

    let mut ratings: Vec<SkillRatingRow> = states
        .into_iter()
        .map(|(player_id, state)| {
            let before = baseline.get(&player_id).copied().unwrap_or(settings.initial_rating);
            SkillRatingRow {
                player_id,
                name: state.name,
                rating: state.rating,
                nights_rated: state.nights_rated,
                recent_change: state.rating - before,
            }
        })
        .collect();

    ratings.sort_by(|a, b| {
        b.rating
            .total_cmp(&a.rating)
            .then_with(|| a.player_id.cmp(&b.player_id))
    });
    ratings
}

fn rate_night(night: &[FlatRow], states: &mut HashMap<PlayerId, RatingState>, settings: &AnalyticsSettings) {
    let participants = night.len() as f64;

    // each update reads only the player's own prior rating
    for (idx, row) in rank_night(night).into_iter().enumerate() {
        let expected = expected_score(idx + 1, participants);
        let state = states.entry(row.player_id).or_insert_with(|| RatingState {
            name: row.name.clone(),
            rating: settings.initial_rating,
            nights_rated: 0,
        });
        state.name = row.name.clone();
        state.rating += settings.k_factor * (actual_score(row.profit) - expected);
        state.nights_rated += 1;
    }
}

fn expected_score(rank: usize, participants: f64) -> f64 {
    1.0 - (rank as f64 - 1.0) / participants
}

fn actual_score(profit: i64) -> f64 {
    match profit {
        p if p > 0 => 1.0,
        p if p < 0 => 0.0,
        _ => 0.5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{flatten_nights, Cents, Entry, Night, NightId, NightStatus};
    use chrono::{TimeZone, Utc};

    fn entry(player_id: PlayerId, profit: Cents) -> Entry {
        Entry {
            player_id,
            player_name: format!("P{player_id}"),
            buy_in: 1000,
            cash_out: Some(1000 + profit),
            adjustment: 0,
        }
    }

    fn night(id: NightId, entries: Vec<Entry>) -> Night {
        Night {
            id,
            scheduled_at: Utc.with_ymd_and_hms(2024, 6, id as u32, 20, 0, 0).unwrap(),
            status: NightStatus::Closed,
            season_id: None,
            entries,
        }
    }

    fn find(rows: &[SkillRatingRow], id: PlayerId) -> &SkillRatingRow {
        rows.iter().find(|r| r.player_id == id).unwrap()
    }

    fn sample_nights() -> Vec<Night> {
        vec![
            night(1, vec![entry(1, 600), entry(2, 0), entry(3, -600)]),
            night(2, vec![entry(1, -300), entry(2, 500), entry(3, -200)]),
            night(3, vec![entry(2, 100), entry(3, -100)]),
        ]
    }

    #[test]
    fn test_single_night_updates() {
        let rows = flatten_nights(&sample_nights()[..1]);
        let ratings = calculate_skill_ratings(&rows, &AnalyticsSettings::default(), 5);

        // rank 1: 1500 + 32 * (1 - 1)
        assert!((find(&ratings, 1).rating - 1500.0).abs() < 1e-9);
        // rank 2: 1500 + 32 * (0.5 - 2/3)
        assert!((find(&ratings, 2).rating - (1500.0 + 32.0 * (0.5 - 2.0 / 3.0))).abs() < 1e-9);
        // rank 3: 1500 + 32 * (0 - 1/3)
        assert!((find(&ratings, 3).rating - (1500.0 - 32.0 / 3.0)).abs() < 1e-9);
    }

    #[test]
    fn test_output_sorted_by_rating() {
        let rows = flatten_nights(&sample_nights());
        let ratings = calculate_skill_ratings(&rows, &AnalyticsSettings::default(), 5);

        assert!(ratings.windows(2).all(|w| w[0].rating >= w[1].rating));
        assert_eq!(find(&ratings, 3).nights_rated, 3);
        assert_eq!(find(&ratings, 1).nights_rated, 2);
    }

    #[test]
    fn test_rerun_is_deterministic() {
        let rows = flatten_nights(&sample_nights());
        let settings = AnalyticsSettings::default();

        assert_eq!(
            calculate_skill_ratings(&rows, &settings, 2),
            calculate_skill_ratings(&rows, &settings, 2)
        );
    }

    #[test]
    fn test_reordering_changes_rating_trajectory() {
        let settings = AnalyticsSettings::default();
        let forward = flatten_nights(&sample_nights());
        let mut reversed_nights = sample_nights();
        reversed_nights.reverse();
        let reversed = flatten_nights(&reversed_nights);

        let a = calculate_skill_ratings(&forward, &settings, 1);
        let b = calculate_skill_ratings(&reversed, &settings, 1);

        assert_ne!(find(&a, 2).recent_change, find(&b, 2).recent_change);
    }

    #[test]
    fn test_recent_change_counts_from_initial_rating_for_newcomers() {
        let rows = flatten_nights(&sample_nights());
        let ratings = calculate_skill_ratings(&rows, &AnalyticsSettings::default(), 10);

        for row in &ratings {
            assert!((row.recent_change - (row.rating - 1500.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_empty_snapshot() {
        assert!(calculate_skill_ratings(&[], &AnalyticsSettings::default(), 5).is_empty());
    }
}
