use chrono::{DateTime, Utc};

/// One joined (night, entry, player) row as stored in the ledger
#[derive(Debug, Clone)]
pub struct LedgerRow {
    pub night_id: i64,
    pub scheduled_at: DateTime<Utc>,
    pub status: String,
    pub season_id: Option<i64>,
    pub player_id: i64,
    pub player_name: String,
    pub buy_in: i64,
    pub cash_out: Option<i64>,
    pub adjustment: i64,
}

/// SQL-level filter, already resolved from the report filters
#[derive(Debug, Clone)]
pub struct LedgerQuery {
    pub league_id: i64,
    pub scheduled_from: Option<DateTime<Utc>>,
    pub scheduled_to: Option<DateTime<Utc>>,
    pub season_id: Option<i64>,
    pub include_open: bool,
    pub include_guests: bool,
}
