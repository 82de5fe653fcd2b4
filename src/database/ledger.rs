use anyhow::Result;
use log::debug;

use super::connection::{get_connection, DbPool};
use super::models::LedgerQuery;
use super::nights::{group_into_nights, list_ledger_rows};
use crate::domain::{Night, SnapshotFilters, SnapshotLoader, TenantId};

/// Snapshot loader backed by the SQLite ledger
#[derive(Clone)]
pub struct SqliteLedger {
    pool: DbPool,
}

impl SqliteLedger {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn build_query(tenant_id: TenantId, filters: &SnapshotFilters) -> LedgerQuery {
        let (scheduled_from, scheduled_to) = filters.date_bounds();
        LedgerQuery {
            league_id: tenant_id,
            scheduled_from,
            scheduled_to,
            season_id: filters.season_id,
            include_open: filters.include_draft_nights,
            include_guests: filters.include_guest_players,
        }
    }
}

impl SnapshotLoader for SqliteLedger {
    fn load_filtered_snapshot(&self, tenant_id: TenantId, filters: &SnapshotFilters) -> Result<Vec<Night>> {
        let mut conn = get_connection(&self.pool)?;
        let query = Self::build_query(tenant_id, filters);
        let rows = list_ledger_rows(&mut conn, &query)?;
        debug!("Loaded {} ledger rows for league {}", rows.len(), tenant_id);
        group_into_nights(rows)
    }
}
