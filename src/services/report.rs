use anyhow::{Context, Result};
use clap::ValueEnum;
use log::info;
use serde::Serialize;
use serde_json::Value;

use crate::config::settings::AnalyticsSettings;
use crate::domain::{flatten_nights, validate_snapshot, FlatRow, SnapshotFilters, SnapshotLoader, TenantId};
use crate::stats::{
    self, CompetitivenessResult, Distributions, InsightsNarrative, LeagueOverview, Leaderboards,
    PlayerStatsRow, RecordItem, RollingFormRow, SeasonSummary, SkillRatingRow, SortKey, SortOrder,
    StreakRow,
};

/// Every section computed over one snapshot
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueReport {
    pub overview: LeagueOverview,
    pub leaderboards: Leaderboards,
    pub seasons: Vec<SeasonSummary>,
    pub rolling_form: Vec<RollingFormRow>,
    pub skill_ratings: Vec<SkillRatingRow>,
    pub streaks: Vec<StreakRow>,
    pub records: Vec<RecordItem>,
    pub distributions: Distributions,
    pub competitiveness: CompetitivenessResult,
    pub insights: InsightsNarrative,
}

/// One addressable piece of the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportSection {
    Overview,
    Leaderboard,
    Seasons,
    Form,
    Ratings,
    Streaks,
    Records,
    Distribution,
    Competitiveness,
    Insights,
    Report,
}

pub struct ReportService<L: SnapshotLoader> {
    loader: L,
    settings: AnalyticsSettings,
}

impl<L: SnapshotLoader> ReportService<L> {
    pub fn new(loader: L, settings: AnalyticsSettings) -> Self {
        Self { loader, settings }
    }

    /// Loads, validates and flattens one filtered snapshot
    pub fn prepare(&self, tenant_id: TenantId, filters: &SnapshotFilters) -> Result<LeagueData> {
        let nights = self
            .loader
            .load_filtered_snapshot(tenant_id, filters)
            .with_context(|| format!("Failed to load snapshot for league {}", tenant_id))?;
        validate_snapshot(&nights).with_context(|| format!("Invalid snapshot for league {}", tenant_id))?;

        let rows = flatten_nights(&nights);
        info!(
            "Prepared league {}: {} nights, {} player rows",
            tenant_id,
            nights.len(),
            rows.len()
        );

        Ok(LeagueData {
            rows,
            filters: filters.clone(),
            settings: self.settings.clone(),
        })
    }
}

/// A flattened snapshot plus the filters it was loaded with.
///
/// Each method is an independent computation; none of them depends on
/// another having run, and all of them only read `rows`.
pub struct LeagueData {
    rows: Vec<FlatRow>,
    filters: SnapshotFilters,
    settings: AnalyticsSettings,
}

impl LeagueData {
    pub fn new(rows: Vec<FlatRow>, filters: SnapshotFilters, settings: AnalyticsSettings) -> Self {
        Self { rows, filters, settings }
    }

    pub fn overview(&self) -> LeagueOverview {
        stats::league_overview(&self.rows, &self.filters.eligibility, &self.settings, self.filters.as_of)
    }

    pub fn players(&self) -> Vec<PlayerStatsRow> {
        stats::aggregate_players(&self.rows, &self.filters.eligibility, &self.settings)
    }

    pub fn leaderboard(&self, key: SortKey, order: SortOrder) -> Vec<PlayerStatsRow> {
        let mut players = self.players();
        stats::sort_player_rows(&mut players, key, order);
        players
    }

    pub fn leaderboards(&self) -> Leaderboards {
        stats::build_leaderboards(&self.players(), self.filters.top_n)
    }

    pub fn season_standings(&self) -> Vec<SeasonSummary> {
        stats::season_standings(&self.rows, &self.filters.eligibility, &self.settings)
    }

    pub fn rolling_form(&self) -> Vec<RollingFormRow> {
        stats::rolling_form(&self.rows, self.filters.rolling_nights.size(), self.filters.top_n)
    }

    pub fn skill_ratings(&self) -> Vec<SkillRatingRow> {
        stats::calculate_skill_ratings(&self.rows, &self.settings, self.filters.rolling_nights.size())
    }

    pub fn streaks(&self) -> Vec<StreakRow> {
        stats::calculate_streaks(&self.rows)
    }

    pub fn records(&self) -> Vec<RecordItem> {
        stats::league_records(&self.rows)
    }

    pub fn distributions(&self) -> Distributions {
        stats::calculate_distributions(&self.players(), &self.settings)
    }

    pub fn competitiveness(&self) -> CompetitivenessResult {
        stats::calculate_competitiveness(&self.players(), &self.settings)
    }

    pub fn insights(&self) -> InsightsNarrative {
        stats::compose_insights(&self.overview(), &self.skill_ratings(), &self.competitiveness())
    }

    /// Computes one section as JSON. `sorting` only applies to the leaderboard.
    pub fn render(&self, section: ReportSection, sorting: (SortKey, SortOrder)) -> Result<Value> {
        let (key, order) = sorting;
        let value = match section {
            ReportSection::Overview => serde_json::to_value(self.overview()),
            ReportSection::Leaderboard => serde_json::to_value(self.leaderboard(key, order)),
            ReportSection::Seasons => serde_json::to_value(self.season_standings()),
            ReportSection::Form => serde_json::to_value(self.rolling_form()),
            ReportSection::Ratings => serde_json::to_value(self.skill_ratings()),
            ReportSection::Streaks => serde_json::to_value(self.streaks()),
            ReportSection::Records => serde_json::to_value(self.records()),
            ReportSection::Distribution => serde_json::to_value(self.distributions()),
            ReportSection::Competitiveness => serde_json::to_value(self.competitiveness()),
            ReportSection::Insights => serde_json::to_value(self.insights()),
            ReportSection::Report => serde_json::to_value(self.full_report()),
        };
        value.with_context(|| format!("Failed to serialize {:?} section", section))
    }

    pub fn full_report(&self) -> LeagueReport {
        let overview = self.overview();
        let skill_ratings = self.skill_ratings();
        let competitiveness = stats::calculate_competitiveness(&overview.players, &self.settings);
        let insights = stats::compose_insights(&overview, &skill_ratings, &competitiveness);

        LeagueReport {
            leaderboards: stats::build_leaderboards(&overview.players, self.filters.top_n),
            distributions: stats::calculate_distributions(&overview.players, &self.settings),
            seasons: self.season_standings(),
            rolling_form: self.rolling_form(),
            streaks: self.streaks(),
            records: self.records(),
            overview,
            skill_ratings,
            competitiveness,
            insights,
        }
    }
}
