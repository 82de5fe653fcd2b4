use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{Cents, NightId, PlayerId, SeasonId};

pub type RatingValue = f64;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStatsRow {
    pub player_id: PlayerId,
    pub name: String,
    pub total_buy_in: Cents,
    pub total_cash_out: Cents,
    pub total_adjustment: Cents,
    pub total_profit: Cents,
    pub nights_played: u32,
    pub nights_won: u32,
    pub nights_in_profit: u32,
    pub podium_points: u32,
    pub best_night_profit: Cents,
    pub worst_night_loss: Cents,
    pub pot_weighted_score: f64,
    pub avg_table_share: Option<f64>,
    pub roi: Option<f64>,
    pub score: Option<f64>,
    pub win_rate: f64,
    pub consistency: f64,
    pub meets_eligibility: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueOverview {
    pub total_nights: usize,
    pub total_pot: Cents,
    pub average_pot: f64,
    pub average_pot_recent: f64,
    pub largest_pot: Cents,
    pub unique_players: usize,
    pub active_players: usize,
    pub average_players_per_night: f64,
    pub players: Vec<PlayerStatsRow>,
}

impl Default for LeagueOverview {
    fn default() -> Self {
        Self {
            total_nights: 0,
            total_pot: 0,
            average_pot: 0.0,
            average_pot_recent: 0.0,
            largest_pot: 0,
            unique_players: 0,
            active_players: 0,
            average_players_per_night: 0.0,
            players: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonSummary {
    pub season_id: SeasonId,
    pub nights: usize,
    pub total_pot: Cents,
    pub players: Vec<PlayerStatsRow>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Leaderboards {
    pub top_profit: Vec<PlayerStatsRow>,
    pub top_roi: Vec<PlayerStatsRow>,
    pub top_score: Vec<PlayerStatsRow>,
    pub top_podium: Vec<PlayerStatsRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RollingFormRow {
    pub player_id: PlayerId,
    pub name: String,
    pub nights_in_window: u32,
    pub buy_in_in_window: Cents,
    pub profit_in_window: Cents,
    pub roi_in_window: Option<f64>,
    pub comparison_roi: Option<f64>,
    pub trend_direction: TrendDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillRatingRow {
    pub player_id: PlayerId,
    pub name: String,
    pub rating: RatingValue,
    pub nights_rated: u32,
    pub recent_change: RatingValue,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakRow {
    pub player_id: PlayerId,
    pub name: String,
    pub current_win_streak: u32,
    pub current_loss_streak: u32,
    pub longest_win_streak: u32,
    pub longest_loss_streak: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordKind {
    BiggestWin,
    BiggestLoss,
    LargestPot,
    LongestWinStreak,
    LongestLossStreak,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordItem {
    pub kind: RecordKind,
    /// Cents for money records, nights for streak records
    pub value: i64,
    pub player_id: Option<PlayerId>,
    pub player_name: Option<String>,
    pub night_id: Option<NightId>,
    pub scheduled_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionBucket {
    pub lower_bound: i64,
    pub upper_bound: i64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Distributions {
    /// Total profit in major units
    pub profit: Vec<DistributionBucket>,
    /// ROI as a percentage
    pub roi: Vec<DistributionBucket>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CompetitivenessBadge {
    Dominated,
    Competitive,
}

impl fmt::Display for CompetitivenessBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompetitivenessBadge::Dominated => write!(f, "Dominated"),
            CompetitivenessBadge::Competitive => write!(f, "Competitive"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitivenessResult {
    pub top1_share: f64,
    pub top3_share: f64,
    pub positive_profit_total: Cents,
    pub leader_id: Option<PlayerId>,
    pub leader_name: Option<String>,
    pub badge: CompetitivenessBadge,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightFacts {
    pub total_nights: usize,
    pub total_pot: Cents,
    pub unique_players: usize,
    pub profit_leader: Option<(String, Cents)>,
    pub top_rated: Option<(String, RatingValue)>,
    pub badge: CompetitivenessBadge,
    pub top1_share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsNarrative {
    pub text: String,
    pub facts: InsightFacts,
}
