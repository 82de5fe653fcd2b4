use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};
use log::debug;

use super::ranking::{podium_points_for, rank_night};
use super::scoring::{meets_eligibility, night_score, pot_weighted_score, roi, table_share};
use super::types::{LeagueOverview, PlayerStatsRow, SeasonSummary};
use crate::config::settings::AnalyticsSettings;
use crate::domain::{group_by_night, Cents, Eligibility, FlatRow, PlayerId, SeasonId};

#[derive(Default)]
struct PlayerAccumulator {
    name: String,
    total_buy_in: Cents,
    total_cash_out: Cents,
    total_adjustment: Cents,
    total_profit: Cents,
    nights_played: u32,
    nights_won: u32,
    nights_in_profit: u32,
    podium_points: u32,
    best_night_profit: Option<Cents>,
    worst_night_loss: Option<Cents>,
    pot_weighted_score: f64,
    table_share_sum: f64,
    table_share_nights: u32,
}

impl PlayerAccumulator {
    fn add_row(&mut self, row: &FlatRow) {
        self.name = row.name.clone();
        self.total_buy_in += row.buy_in;
        self.total_cash_out += row.cash_out.unwrap_or(0);
        self.total_adjustment += row.adjustment;
        self.total_profit += row.profit;
        self.nights_played += 1;
        if row.profit > 0 {
            self.nights_in_profit += 1;
        }
        self.best_night_profit = Some(self.best_night_profit.map_or(row.profit, |b| b.max(row.profit)));
        self.worst_night_loss = Some(self.worst_night_loss.map_or(row.profit, |w| w.min(row.profit)));

        if let Some(weighted) = pot_weighted_score(night_score(row.profit, row.buy_in), row.night_pot) {
            self.pot_weighted_score += weighted;
        }
        if let Some(share) = table_share(row.profit, row.night_pot) {
            self.table_share_sum += share;
            self.table_share_nights += 1;
        }
    }

    fn into_row(self, player_id: PlayerId, eligibility: &Eligibility) -> PlayerStatsRow {
        let nights = self.nights_played;
        PlayerStatsRow {
            player_id,
            roi: roi(self.total_profit, self.total_buy_in),
            score: night_score(self.total_profit, self.total_buy_in),
            win_rate: fraction(self.nights_won, nights),
            consistency: fraction(self.nights_in_profit, nights),
            meets_eligibility: meets_eligibility(nights, self.total_buy_in, eligibility),
            avg_table_share: (self.table_share_nights > 0)
                .then(|| self.table_share_sum / self.table_share_nights as f64),
            name: self.name,
            total_buy_in: self.total_buy_in,
            total_cash_out: self.total_cash_out,
            total_adjustment: self.total_adjustment,
            total_profit: self.total_profit,
            nights_played: nights,
            nights_won: self.nights_won,
            nights_in_profit: self.nights_in_profit,
            podium_points: self.podium_points,
            best_night_profit: self.best_night_profit.unwrap_or(0),
            worst_night_loss: self.worst_night_loss.unwrap_or(0),
            pot_weighted_score: self.pot_weighted_score,
        }
    }
}

fn fraction(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// Folds rows into one stats row per player, in order of first appearance
pub fn aggregate_players(
    rows: &[FlatRow],
    eligibility: &Eligibility,
    settings: &AnalyticsSettings,
) -> Vec<PlayerStatsRow> {
    let mut order: Vec<PlayerId> = Vec::new();
    let mut players: HashMap<PlayerId, PlayerAccumulator> = HashMap::new();

    for night in group_by_night(rows) {
        for row in night {
            let acc = players.entry(row.player_id).or_insert_with(|| {
                order.push(row.player_id);
                PlayerAccumulator::default()
            });
            acc.add_row(row);
        }
        award_finishes(night, &mut players, settings);
    }

    debug!("Aggregated {} rows into {} players", rows.len(), order.len());

    order
        .into_iter()
        .filter_map(|id| players.remove(&id).map(|acc| acc.into_row(id, eligibility)))
        .collect()
}

fn award_finishes(
    night: &[FlatRow],
    players: &mut HashMap<PlayerId, PlayerAccumulator>,
    settings: &AnalyticsSettings,
) {
    for (position, row) in rank_night(night).into_iter().enumerate() {
        if let Some(acc) = players.get_mut(&row.player_id) {
            acc.podium_points += podium_points_for(position, &settings.podium_points);
            if position == 0 && row.profit > 0 {
                acc.nights_won += 1;
            }
        }
    }
}

pub fn league_overview(
    rows: &[FlatRow],
    eligibility: &Eligibility,
    settings: &AnalyticsSettings,
    as_of: DateTime<Utc>,
) -> LeagueOverview {
    let nights = group_by_night(rows);
    if nights.is_empty() {
        return LeagueOverview::default();
    }

    let pots: Vec<Cents> = nights.iter().map(|night| night[0].night_pot).collect();
    let total_pot: Cents = pots.iter().sum();
    let recent_start = pots.len().saturating_sub(settings.recent_pot_nights);

    LeagueOverview {
        total_nights: nights.len(),
        total_pot,
        average_pot: mean(&pots),
        average_pot_recent: mean(&pots[recent_start..]),
        largest_pot: pots.iter().copied().max().unwrap_or(0),
        unique_players: count_unique_players(rows.iter()),
        active_players: count_active_players(rows, as_of, settings.active_window_days),
        average_players_per_night: rows.len() as f64 / nights.len() as f64,
        players: aggregate_players(rows, eligibility, settings),
    }
}

fn mean(values: &[Cents]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<Cents>() as f64 / values.len() as f64
}

fn count_unique_players<'a>(rows: impl Iterator<Item = &'a FlatRow>) -> usize {
    rows.map(|r| r.player_id).collect::<HashSet<_>>().len()
}

fn count_active_players(rows: &[FlatRow], as_of: DateTime<Utc>, window_days: i64) -> usize {
    let cutoff = as_of - Duration::days(window_days);
    count_unique_players(rows.iter().filter(|r| r.scheduled_at >= cutoff && r.scheduled_at <= as_of))
}

/// Per-season standings, in order of each season's first night
pub fn season_standings(
    rows: &[FlatRow],
    eligibility: &Eligibility,
    settings: &AnalyticsSettings,
) -> Vec<SeasonSummary> {
    let mut order: Vec<SeasonId> = Vec::new();
    let mut by_season: HashMap<SeasonId, Vec<FlatRow>> = HashMap::new();

    for row in rows {
        if let Some(season_id) = row.season_id {
            by_season
                .entry(season_id)
                .or_insert_with(|| {
                    order.push(season_id);
                    Vec::new()
                })
                .push(row.clone());
        }
    }

    order
        .into_iter()
        .filter_map(|id| by_season.remove(&id).map(|season_rows| build_season(id, &season_rows, eligibility, settings)))
        .collect()
}

fn build_season(
    season_id: SeasonId,
    rows: &[FlatRow],
    eligibility: &Eligibility,
    settings: &AnalyticsSettings,
) -> SeasonSummary {
    let nights = group_by_night(rows);
    SeasonSummary {
        season_id,
        nights: nights.len(),
        total_pot: nights.iter().map(|night| night[0].night_pot).sum(),
        players: aggregate_players(rows, eligibility, settings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{flatten_nights, Entry, Night, NightId, NightStatus, SeasonId};
    use chrono::TimeZone;

    fn entry(player_id: PlayerId, buy_in: Cents, cash_out: Option<Cents>, adjustment: Cents) -> Entry {
        Entry {
            player_id,
            player_name: format!("P{player_id}"),
            buy_in,
            cash_out,
            adjustment,
        }
    }

    fn night(id: NightId, day: u32, season_id: Option<SeasonId>, entries: Vec<Entry>) -> Night {
        Night {
            id,
            scheduled_at: Utc.with_ymd_and_hms(2024, 1, day, 20, 0, 0).unwrap(),
            status: NightStatus::Closed,
            season_id,
            entries,
        }
    }

    fn sample_rows() -> Vec<FlatRow> {
        flatten_nights(&[
            night(
                1,
                1,
                Some(1),
                vec![
                    entry(1, 2000, Some(3500), 0),
                    entry(2, 2000, Some(1000), 0),
                    entry(3, 2000, Some(1500), 0),
                    entry(4, 2000, Some(2000), 0),
                ],
            ),
            night(
                2,
                8,
                Some(1),
                vec![entry(1, 1000, Some(0), 0), entry(2, 1000, Some(2500), 500)],
            ),
            night(3, 15, None, vec![entry(2, 3000, None, 0), entry(5, 0, Some(3000), 0)]),
        ])
    }

    fn find(rows: &[PlayerStatsRow], id: PlayerId) -> &PlayerStatsRow {
        rows.iter().find(|r| r.player_id == id).unwrap()
    }

    #[test]
    fn test_totals_match_sum_of_nightly_profit() {
        let rows = sample_rows();
        let stats = aggregate_players(&rows, &Eligibility::default(), &AnalyticsSettings::default());

        for player in &stats {
            let expected: Cents = rows.iter().filter(|r| r.player_id == player.player_id).map(|r| r.profit).sum();
            assert_eq!(player.total_profit, expected);
            assert_eq!(
                player.total_profit,
                player.total_cash_out - player.total_buy_in - player.total_adjustment
            );
        }
    }

    #[test]
    fn test_player_fold() {
        let stats = aggregate_players(&sample_rows(), &Eligibility::default(), &AnalyticsSettings::default());
        let p2 = find(&stats, 2);

        assert_eq!(p2.nights_played, 3);
        assert_eq!(p2.total_buy_in, 6000);
        assert_eq!(p2.total_cash_out, 3500);
        assert_eq!(p2.total_adjustment, 500);
        assert_eq!(p2.total_profit, -3000);
        assert_eq!(p2.nights_in_profit, 1);
        assert_eq!(p2.best_night_profit, 1000);
        assert_eq!(p2.worst_night_loss, -3000);
        assert!(p2.meets_eligibility);
        assert!((p2.roi.unwrap() + 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_zero_buy_in_player_has_undefined_ratios() {
        let stats = aggregate_players(&sample_rows(), &Eligibility::default(), &AnalyticsSettings::default());
        let p5 = find(&stats, 5);

        assert_eq!(p5.total_profit, 3000);
        assert_eq!(p5.roi, None);
        assert_eq!(p5.score, None);
    }

    #[test]
    fn test_podium_points_and_wins() {
        let stats = aggregate_players(&sample_rows(), &Eligibility::default(), &AnalyticsSettings::default());

        // night 1: 1 (+1500), 4 (0), 3 (-500), 2 (-1000)
        // night 2: 2 (+1000), 1 (-1000)
        // night 3: 5 (+3000), 2 (-3000)
        assert_eq!(find(&stats, 1).podium_points, 3 + 2);
        assert_eq!(find(&stats, 4).podium_points, 2);
        assert_eq!(find(&stats, 3).podium_points, 1);
        assert_eq!(find(&stats, 2).podium_points, 3 + 2);
        assert_eq!(find(&stats, 5).podium_points, 3);
        assert_eq!(find(&stats, 1).nights_won, 1);
        assert!((find(&stats, 1).win_rate - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_podium_points_per_night_sum_to_six() {
        let rows = sample_rows();
        let first_night: Vec<FlatRow> = rows.iter().filter(|r| r.night_id == 1).cloned().collect();
        let stats = aggregate_players(&first_night, &Eligibility::default(), &AnalyticsSettings::default());

        assert_eq!(stats.iter().map(|s| s.podium_points).sum::<u32>(), 6);
    }

    #[test]
    fn test_output_keeps_first_appearance_order() {
        let stats = aggregate_players(&sample_rows(), &Eligibility::default(), &AnalyticsSettings::default());
        let ids: Vec<PlayerId> = stats.iter().map(|s| s.player_id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_short_history_fails_eligibility_but_is_reported() {
        let eligibility = Eligibility {
            min_nights_played: 3,
            min_total_buy_in_cents: 0,
        };
        let stats = aggregate_players(&sample_rows(), &eligibility, &AnalyticsSettings::default());
        let p1 = find(&stats, 1);

        assert_eq!(p1.nights_played, 2);
        assert!(!p1.meets_eligibility);
    }

    #[test]
    fn test_empty_overview_is_zeroed() {
        let overview = league_overview(&[], &Eligibility::default(), &AnalyticsSettings::default(), Utc::now());

        assert_eq!(overview.total_nights, 0);
        assert_eq!(overview.total_pot, 0);
        assert!(overview.players.is_empty());
    }

    #[test]
    fn test_overview_figures() {
        let as_of = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let settings = AnalyticsSettings {
            recent_pot_nights: 2,
            active_window_days: 20,
            ..AnalyticsSettings::default()
        };
        let overview = league_overview(&sample_rows(), &Eligibility::default(), &settings, as_of);

        assert_eq!(overview.total_nights, 3);
        assert_eq!(overview.total_pot, 8000 + 2000 + 3000);
        assert!((overview.average_pot - 13000.0 / 3.0).abs() < 1e-9);
        assert!((overview.average_pot_recent - 2500.0).abs() < 1e-9);
        assert_eq!(overview.largest_pot, 8000);
        assert_eq!(overview.unique_players, 5);
        // only night 3 (Jan 15) is inside the 20 day window
        assert_eq!(overview.active_players, 2);
        assert!((overview.average_players_per_night - 8.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_season_standings_skip_unassigned_nights() {
        let seasons = season_standings(&sample_rows(), &Eligibility::default(), &AnalyticsSettings::default());

        assert_eq!(seasons.len(), 1);
        assert_eq!(seasons[0].season_id, 1);
        assert_eq!(seasons[0].nights, 2);
        assert_eq!(seasons[0].total_pot, 10000);
        assert!(seasons[0].players.iter().all(|p| p.player_id != 5));
    }
}
