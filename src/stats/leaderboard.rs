use std::cmp::Ordering;

use super::types::{Leaderboards, PlayerStatsRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Profit,
    Roi,
    Score,
    BuyIn,
    NightsPlayed,
    WinRate,
    PodiumPoints,
    Name,
}

impl SortKey {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "profit" => Some(SortKey::Profit),
            "roi" => Some(SortKey::Roi),
            "score" => Some(SortKey::Score),
            "buyIn" => Some(SortKey::BuyIn),
            "nightsPlayed" => Some(SortKey::NightsPlayed),
            "winRate" => Some(SortKey::WinRate),
            "podiumPoints" => Some(SortKey::PodiumPoints),
            "name" => Some(SortKey::Name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

/// Sorts in place. Undefined ratios go last in either direction.
pub fn sort_player_rows(rows: &mut [PlayerStatsRow], key: SortKey, order: SortOrder) {
    rows.sort_by(|a, b| {
        compare_by_key(a, b, key, order).then_with(|| compare_names(a, b))
    });
}

fn compare_by_key(a: &PlayerStatsRow, b: &PlayerStatsRow, key: SortKey, order: SortOrder) -> Ordering {
    match key {
        SortKey::Roi => compare_optional(a.roi, b.roi, order),
        SortKey::Score => compare_optional(a.score, b.score, order),
        SortKey::Name => directed(compare_names(a, b), order),
        SortKey::Profit => directed(a.total_profit.cmp(&b.total_profit), order),
        SortKey::BuyIn => directed(a.total_buy_in.cmp(&b.total_buy_in), order),
        SortKey::NightsPlayed => directed(a.nights_played.cmp(&b.nights_played), order),
        SortKey::WinRate => directed(a.win_rate.total_cmp(&b.win_rate), order),
        SortKey::PodiumPoints => directed(a.podium_points.cmp(&b.podium_points), order),
    }
}

fn directed(ordering: Ordering, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

fn compare_optional(a: Option<f64>, b: Option<f64>, order: SortOrder) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => directed(x.total_cmp(&y), order),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare_names(a: &PlayerStatsRow, b: &PlayerStatsRow) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.player_id.cmp(&b.player_id))
}

/// Top lists for the dashboard. ROI and score lists only hold eligible players.
pub fn build_leaderboards(players: &[PlayerStatsRow], top_n: usize) -> Leaderboards {
    let eligible: Vec<PlayerStatsRow> = players
        .iter()
        .filter(|p| p.meets_eligibility)
        .cloned()
        .collect();

    Leaderboards {
        top_profit: top_by(players.to_vec(), SortKey::Profit, top_n),
        top_roi: top_by(with_defined(&eligible, |p| p.roi), SortKey::Roi, top_n),
        top_score: top_by(with_defined(&eligible, |p| p.score), SortKey::Score, top_n),
        top_podium: top_by(players.to_vec(), SortKey::PodiumPoints, top_n),
    }
}

fn with_defined(rows: &[PlayerStatsRow], value: impl Fn(&PlayerStatsRow) -> Option<f64>) -> Vec<PlayerStatsRow> {
    rows.iter().filter(|p| value(p).is_some()).cloned().collect()
}

fn top_by(mut rows: Vec<PlayerStatsRow>, key: SortKey, top_n: usize) -> Vec<PlayerStatsRow> {
    sort_player_rows(&mut rows, key, SortOrder::Desc);
    rows.truncate(top_n);
    rows
}
