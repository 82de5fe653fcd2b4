use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::models::{Cents, Entry, Night, NightId, PlayerId, SeasonId};

/// One row per (night, player) pair
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatRow {
    pub night_id: NightId,
    pub scheduled_at: DateTime<Utc>,
    pub season_id: Option<SeasonId>,
    pub player_id: PlayerId,
    pub name: String,
    pub buy_in: Cents,
    pub cash_out: Option<Cents>,
    pub adjustment: Cents,
    pub profit: Cents,
    pub night_pot: Cents,
    pub player_count: usize,
}

pub fn flatten_nights(nights: &[Night]) -> Vec<FlatRow> {
    nights.iter().flat_map(expand_night_to_rows).collect()
}

fn expand_night_to_rows(night: &Night) -> Vec<FlatRow> {
    let night_pot = night.pot();
    let player_count = night.player_count();

    night
        .entries
        .iter()
        .map(|entry| build_row(night, entry, night_pot, player_count))
        .collect()
}

fn build_row(night: &Night, entry: &Entry, night_pot: Cents, player_count: usize) -> FlatRow {
    FlatRow {
        night_id: night.id,
        scheduled_at: night.scheduled_at,
        season_id: night.season_id,
        player_id: entry.player_id,
        name: entry.player_name.clone(),
        buy_in: entry.buy_in,
        cash_out: entry.cash_out,
        adjustment: entry.adjustment,
        profit: entry.profit(),
        night_pot,
        player_count,
    }
}

/// Groups consecutive rows of the same night, preserving snapshot order
pub fn group_by_night(rows: &[FlatRow]) -> Vec<&[FlatRow]> {
    rows.chunk_by(|a, b| a.night_id == b.night_id).collect()
}
